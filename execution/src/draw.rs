//! The draw command.

use tracing::debug;
use uno_duel_types::{Card, HouseRules, PlayerId, Suit};

use crate::error::RuleError;
use crate::resolver;
use crate::rng::GameRng;
use crate::stacking;
use crate::state::MatchState;

/// The suit held most often in `hand`. Ties go to the earlier suit in
/// red, yellow, green, blue order; an all-wild hand yields red.
pub fn best_color(hand: &[Card]) -> Suit {
    let mut best = Suit::Red;
    let mut best_count = 0;
    for suit in Suit::ALL {
        let count = hand.iter().filter(|card| card.suit() == Some(suit)).count();
        if count > best_count {
            best = suit;
            best_count = count;
        }
    }
    best
}

/// Draws for `player` on their turn.
///
/// A pending forced draw is always taken in full and skips the player.
/// Otherwise the player draws one card and passes, or with draw-to-match
/// keeps drawing until a playable card turns up and plays it.
pub fn draw(
    state: &mut MatchState,
    rng: &mut GameRng,
    rules: &HouseRules,
    player: PlayerId,
) -> Result<(), RuleError> {
    resolver::ensure_turn(state, &player)?;

    if state.pending.is_some() {
        if let Some(count) = stacking::absorb_pending(state, rng, player) {
            let name = state.name_of(&player);
            state.last_action = format!("{name} drew {count} and was skipped.");
        }
        return Ok(());
    }

    let holds_legal = resolver::has_legal_play(state, &player);
    if holds_legal && rules.must_play_if_able {
        return Err(RuleError::MustPlayIfAble);
    }

    if holds_legal || !rules.draw_to_match {
        state.draw_cards(rng, player, 1);
        state.last_action = format!("{} drew a card.", state.name_of(&player));
        state.turn = state.next_player(&player, 1);
        return Ok(());
    }

    draw_to_match(state, rng, rules, player);
    Ok(())
}

fn draw_to_match(state: &mut MatchState, rng: &mut GameRng, rules: &HouseRules, player: PlayerId) {
    let mut drawn = 0u32;
    while let Some(card) = state.piles.draw_one(rng) {
        let Some(hand) = state.hands.get_mut(&player) else {
            return;
        };
        hand.push(card);
        drawn += 1;
        if resolver::is_playable(state, &card) {
            let hand = state.hand(&player).unwrap_or_default();
            let chosen = card.is_wild().then(|| best_color(hand));
            let index = hand.len() - 1;
            debug!(%player, drawn, "drew to match");
            resolver::apply_play(state, rng, rules, player, index, chosen);
            let played = std::mem::take(&mut state.last_action);
            let name = state.name_of(&player);
            state.last_action = format!("{name} drew {drawn} to match. {played}");
            return;
        }
    }

    if drawn > 0 {
        let len = state.hand(&player).map_or(0, <[Card]>::len);
        state.declarations.hand_changed(player, len);
    }
    state.last_action = format!("{} drew to match but couldn't play.", state.name_of(&player));
    state.turn = state.next_player(&player, 1);
}
