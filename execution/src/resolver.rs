//! Play legality and card effects.

use tracing::debug;
use uno_duel_types::{Card, CardId, Face, HouseRules, PlayerId, Suit};

use crate::error::RuleError;
use crate::rng::GameRng;
use crate::scoring;
use crate::stacking::{self, ChallengeWindow};
use crate::state::MatchState;

/// Whether `card` may be played onto the current table.
///
/// While a forced draw is pending only cards of its kind may be stacked.
/// Otherwise a card matches the active color, the top card's face, or is wild.
pub fn is_playable(state: &MatchState, card: &Card) -> bool {
    if let Some(pending) = state.pending {
        return card.face == pending.kind;
    }
    card.is_wild()
        || card.suit() == Some(state.active_color)
        || state.top_card().is_some_and(|top| top.face == card.face)
}

/// Cards in `player`'s hand that may be played right now.
pub fn legal_plays(state: &MatchState, player: &PlayerId) -> Vec<Card> {
    state
        .hand(player)
        .unwrap_or_default()
        .iter()
        .filter(|card| is_playable(state, card))
        .copied()
        .collect()
}

pub fn has_legal_play(state: &MatchState, player: &PlayerId) -> bool {
    state
        .hand(player)
        .is_some_and(|hand| hand.iter().any(|card| is_playable(state, card)))
}

/// Rejects actions that require `player` to hold the turn of an active round.
pub(crate) fn ensure_turn(state: &MatchState, player: &PlayerId) -> Result<(), RuleError> {
    if !state.round_active() {
        return Err(RuleError::RoundOver);
    }
    if state.turn.as_ref() != Some(player) {
        return Err(RuleError::NotYourTurn);
    }
    Ok(())
}

/// Validates and plays `card_id` from `player`'s hand.
pub fn attempt_play(
    state: &mut MatchState,
    rng: &mut GameRng,
    rules: &HouseRules,
    player: PlayerId,
    card_id: CardId,
    chosen_color: Option<Suit>,
) -> Result<(), RuleError> {
    ensure_turn(state, &player)?;
    let hand = state.hand(&player).unwrap_or_default();
    let index = hand
        .iter()
        .position(|card| card.id == card_id)
        .ok_or(RuleError::CardNotInHand(card_id))?;
    let card = hand[index];
    if !is_playable(state, &card) {
        return Err(RuleError::IllegalCard(card_id));
    }
    if card.is_wild() && chosen_color.is_none() {
        return Err(RuleError::ColorRequired);
    }
    apply_play(state, rng, rules, player, index, chosen_color);
    Ok(())
}

/// Moves the card at `index` of `player`'s hand onto the discard pile and
/// applies its effect. The caller has already checked legality.
pub(crate) fn apply_play(
    state: &mut MatchState,
    rng: &mut GameRng,
    rules: &HouseRules,
    player: PlayerId,
    index: usize,
    chosen_color: Option<Suit>,
) {
    let prior_color = state.active_color;
    let Some(hand) = state.hands.get_mut(&player) else {
        return;
    };
    let snapshot = hand.clone();
    let card = hand.remove(index);
    let remaining = hand.len();

    state.piles.discard(card);
    state.challenge = None;
    state.active_color = card.suit().or(chosen_color).unwrap_or(prior_color);

    let actor = state.name_of(&player).to_string();
    let color = state.active_color;
    let opponent = state.opponent_of(&player);
    let advance = match card.face {
        Face::DrawTwo | Face::WildDrawFour if rules.stacking => {
            let amount = card.face.draw_amount().unwrap_or_default();
            let count = stacking::add_pending(state, card.face, amount);
            let verb = if count > amount { "stacked" } else { "played" };
            state.last_action = if card.face == Face::WildDrawFour {
                format!("{actor} {verb} +4 ({color}). Pending draw: {count}.")
            } else {
                format!("{actor} {verb} +2. Pending draw: {count}.")
            };
            if card.face == Face::WildDrawFour && rules.challenge {
                state.challenge = opponent.map(|target| ChallengeWindow {
                    offender: player,
                    target,
                    card,
                    prior_color,
                    offender_hand: snapshot,
                });
            }
            1
        }
        Face::DrawTwo | Face::WildDrawFour => {
            let amount = card.face.draw_amount().unwrap_or_default();
            let label = match card.face {
                Face::WildDrawFour => format!("+4 ({color})"),
                _ => "+2".to_string(),
            };
            state.last_action = format!("{actor} played {label}.");
            if let Some(target) = opponent {
                let drawn = state.draw_cards(rng, target, amount);
                let note = format!(" {} drew {drawn} and was skipped.", state.name_of(&target));
                state.last_action.push_str(&note);
            }
            2
        }
        Face::Skip => {
            state.last_action = format!("{actor} played Skip.");
            2
        }
        // With two seats a reverse hands the turn straight back.
        Face::Reverse => {
            state.last_action = format!("{actor} played Reverse (skip).");
            2
        }
        Face::Wild => {
            state.last_action = format!("{actor} played Wild. Color is now {color}.");
            1
        }
        Face::Number(_) => {
            state.last_action = format!("{actor} played {}.", card.describe());
            1
        }
    };
    state.turn = state.next_player(&player, advance);
    debug!(%player, card = %card.describe(), remaining, "card played");

    if remaining == 0 {
        scoring::end_round(state, rules, player);
        return;
    }
    state.declarations.hand_changed(player, remaining);
    stacking::resolve_if_unstackable(state, rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stacking::{can_challenge, resolve_challenge, PendingDraw};
    use crate::state::tests::{card, seated_state};
    use uno_duel_types::Color;

    #[test]
    fn test_playability() {
        let (mut state, a, _) = seated_state(
            vec![
                card(1, Color::Red, Face::Number(9)),
                card(2, Color::Blue, Face::Number(5)),
                card(3, Color::Blue, Face::Number(6)),
                card(4, Color::Wild, Face::Wild),
                card(5, Color::Green, Face::DrawTwo),
            ],
            vec![],
        );
        let ids: Vec<CardId> = legal_plays(&state, &a).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);

        state.pending = Some(PendingDraw {
            count: 2,
            kind: Face::DrawTwo,
        });
        let ids: Vec<CardId> = legal_plays(&state, &a).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut rng = GameRng::seeded(1);
        let rules = HouseRules::default();
        let (mut state, a, b) = seated_state(
            vec![
                card(1, Color::Blue, Face::Number(6)),
                card(2, Color::Wild, Face::Wild),
                card(3, Color::Red, Face::Number(1)),
            ],
            vec![card(4, Color::Red, Face::Number(2))],
        );
        let before = state.clone();

        assert_eq!(
            attempt_play(&mut state, &mut rng, &rules, b, 4, None),
            Err(RuleError::NotYourTurn)
        );
        assert_eq!(
            attempt_play(&mut state, &mut rng, &rules, a, 4, None),
            Err(RuleError::CardNotInHand(4))
        );
        assert_eq!(
            attempt_play(&mut state, &mut rng, &rules, a, 1, None),
            Err(RuleError::IllegalCard(1))
        );
        assert_eq!(
            attempt_play(&mut state, &mut rng, &rules, a, 2, None),
            Err(RuleError::ColorRequired)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_number_card_passes_turn() {
        let mut rng = GameRng::seeded(1);
        let rules = HouseRules::default();
        let (mut state, a, b) = seated_state(
            vec![card(1, Color::Blue, Face::Number(5)), card(2, Color::Red, Face::Number(1))],
            vec![card(3, Color::Red, Face::Number(2))],
        );
        attempt_play(&mut state, &mut rng, &rules, a, 1, None).unwrap();
        assert_eq!(state.active_color, Suit::Blue);
        assert_eq!(state.turn, Some(b));
        assert_eq!(state.last_action, "Ada played Blue 5.");
        assert!(state.declarations.is_outstanding(&a));
        assert!(state.integrity_check().is_ok());
    }

    #[test]
    fn test_skip_and_reverse_keep_turn() {
        let mut rng = GameRng::seeded(1);
        let rules = HouseRules::default();
        let (mut state, a, _) = seated_state(
            vec![
                card(1, Color::Red, Face::Skip),
                card(2, Color::Red, Face::Reverse),
                card(3, Color::Red, Face::Number(1)),
            ],
            vec![card(4, Color::Red, Face::Number(2))],
        );
        attempt_play(&mut state, &mut rng, &rules, a, 1, None).unwrap();
        assert_eq!(state.turn, Some(a));
        attempt_play(&mut state, &mut rng, &rules, a, 2, None).unwrap();
        assert_eq!(state.turn, Some(a));
        assert_eq!(state.last_action, "Ada played Reverse (skip).");
    }

    #[test]
    fn test_wild_sets_chosen_color() {
        let mut rng = GameRng::seeded(1);
        let rules = HouseRules::default();
        let (mut state, a, b) = seated_state(
            vec![card(1, Color::Wild, Face::Wild), card(2, Color::Red, Face::Number(1))],
            vec![card(3, Color::Red, Face::Number(2))],
        );
        attempt_play(&mut state, &mut rng, &rules, a, 1, Some(Suit::Green)).unwrap();
        assert_eq!(state.active_color, Suit::Green);
        assert_eq!(state.turn, Some(b));
        assert_eq!(state.last_action, "Ada played Wild. Color is now Green.");
    }

    #[test]
    fn test_draw_two_without_stacking_hits_immediately() {
        let mut rng = GameRng::seeded(1);
        let rules = HouseRules {
            stacking: false,
            ..HouseRules::default()
        };
        let (mut state, a, b) = seated_state(
            vec![card(1, Color::Red, Face::DrawTwo), card(2, Color::Red, Face::Number(1))],
            vec![card(3, Color::Blue, Face::DrawTwo)],
        );
        attempt_play(&mut state, &mut rng, &rules, a, 1, None).unwrap();
        assert_eq!(state.hand(&b).unwrap().len(), 3);
        assert_eq!(state.pending, None);
        assert_eq!(state.turn, Some(a));
        assert_eq!(state.last_action, "Ada played +2. Bob drew 2 and was skipped.");
        assert!(state.integrity_check().is_ok());
    }

    #[test]
    fn test_draw_four_without_stacking_hits_immediately() {
        let mut rng = GameRng::seeded(1);
        let rules = HouseRules {
            stacking: false,
            ..HouseRules::default()
        };
        let (mut state, a, b) = seated_state(
            vec![card(1, Color::Wild, Face::WildDrawFour), card(2, Color::Red, Face::Number(1))],
            vec![card(3, Color::Blue, Face::Number(3)), card(4, Color::Red, Face::Number(4))],
        );
        attempt_play(&mut state, &mut rng, &rules, a, 1, Some(Suit::Blue)).unwrap();
        assert_eq!(state.hand(&b).unwrap().len(), 6);
        assert_eq!(state.turn, Some(a));
        assert_eq!(state.pending, None);
        assert!(state.challenge.is_none());
        assert_eq!(state.active_color, Suit::Blue);
        assert_eq!(state.last_action, "Ada played +4 (Blue). Bob drew 4 and was skipped.");
        assert!(!can_challenge(&state, &rules, &b));
        assert_eq!(
            resolve_challenge(&mut state, &mut rng, &rules, b),
            Err(RuleError::ChallengeNotAllowed)
        );
        assert!(state.integrity_check().is_ok());
    }

    #[test]
    fn test_draw_four_opens_challenge_window() {
        let mut rng = GameRng::seeded(1);
        let rules = HouseRules::default();
        let (mut state, a, b) = seated_state(
            vec![card(1, Color::Wild, Face::WildDrawFour), card(2, Color::Red, Face::Number(1))],
            vec![card(3, Color::Wild, Face::WildDrawFour)],
        );
        attempt_play(&mut state, &mut rng, &rules, a, 1, Some(Suit::Blue)).unwrap();
        assert_eq!(state.turn, Some(b));
        assert_eq!(state.last_action, "Ada played +4 (Blue). Pending draw: 4.");
        let window = state.challenge.as_ref().expect("window open");
        assert_eq!(window.offender, a);
        assert_eq!(window.prior_color, Suit::Red);
        assert_eq!(window.offender_hand.len(), 2);
        assert!(window.play_was_illegal());
    }

    #[test]
    fn test_emptying_hand_ends_round_despite_pending() {
        let mut rng = GameRng::seeded(1);
        let rules = HouseRules::default();
        let (mut state, a, b) = seated_state(
            vec![card(1, Color::Red, Face::DrawTwo)],
            vec![card(3, Color::Blue, Face::Number(7))],
        );
        attempt_play(&mut state, &mut rng, &rules, a, 1, None).unwrap();
        assert_eq!(state.round_winner, Some(a));
        assert_eq!(state.turn, None);
        assert_eq!(state.hand(&b).unwrap().len(), 1);
        assert!(state.integrity_check().is_ok());
    }
}
