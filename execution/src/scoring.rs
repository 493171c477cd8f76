//! Dealing, round scoring and the match lifecycle.

use std::collections::BTreeMap;
use tracing::info;
use uno_duel_types::{Card, HouseRules, PlayerId, DECK_SIZE, SEATS_PER_ROOM};

use crate::deck::{self, Piles};
use crate::error::{DeckError, RuleError};
use crate::rng::GameRng;
use crate::state::MatchState;

/// Point value of the cards left in a hand.
pub fn hand_points(cards: &[Card]) -> u32 {
    cards.iter().map(Card::points).sum()
}

/// Credits `winner` with the opponent's hand value and closes the round.
pub(crate) fn end_round(state: &mut MatchState, rules: &HouseRules, winner: PlayerId) {
    let points = state
        .opponent_of(&winner)
        .and_then(|loser| state.hand(&loser))
        .map_or(0, hand_points);
    let name = state.name_of(&winner).to_string();
    let Some(seat) = state.seat_mut(&winner) else {
        return;
    };
    seat.score = seat.score.saturating_add(points);
    let total = seat.score;

    state.round_winner = Some(winner);
    state.turn = None;
    state.pending = None;
    state.challenge = None;
    state.last_action = format!("{name} wins the round and gains {points} points.");
    info!(room = %state.room_id, %winner, points, total, "round finished");

    if total >= rules.target_score {
        state.match_winner = Some(winner);
        state.last_action.push_str(&format!(" {name} wins the match!"));
        info!(room = %state.room_id, %winner, total, "match finished");
    }
}

/// Deals a fresh round: new shuffled deck, fresh hands and a starter card.
/// Nothing is changed when dealing fails.
pub fn deal_round(
    state: &mut MatchState,
    rng: &mut GameRng,
    rules: &HouseRules,
) -> Result<(), DeckError> {
    let mut piles = Piles::new(deck::build(rng));
    let mut hands = BTreeMap::new();
    for seat in &state.seats {
        hands.insert(seat.id, piles.deal(rules.hand_size)?);
    }
    let starter = piles.draw_starter()?;
    // Starter effects are not applied; a wild starter gets a random color.
    let active_color = starter.suit().unwrap_or_else(|| rng.suit());

    state.hands = hands;
    state.piles = piles;
    state.active_color = active_color;
    state.card_total = DECK_SIZE;
    state.pending = None;
    state.challenge = None;
    state.declarations.clear();
    for seat in &state.seats {
        state.declarations.hand_changed(seat.id, rules.hand_size);
    }
    Ok(())
}

fn choose_first_player(state: &MatchState, rng: &mut GameRng) -> Option<PlayerId> {
    if state.seats.is_empty() {
        return None;
    }
    Some(state.seats[rng.index(state.seats.len())].id)
}

/// Starts a new match once both seats are filled.
pub fn start_match(
    state: &mut MatchState,
    rng: &mut GameRng,
    rules: &HouseRules,
) -> Result<(), RuleError> {
    if state.seats.len() != SEATS_PER_ROOM {
        return Err(RuleError::NotEnoughPlayers);
    }
    deal_round(state, rng, rules)?;
    state.started = true;
    state.round_winner = None;
    state.match_winner = None;
    state.turn = choose_first_player(state, rng);
    if let Some(first) = state.turn {
        state.last_action = format!("Game started. {}'s turn.", state.name_of(&first));
    }
    info!(room = %state.room_id, "match started");
    Ok(())
}

/// Deals the next round after a round winner has been decided.
pub fn advance_round(
    state: &mut MatchState,
    rng: &mut GameRng,
    rules: &HouseRules,
) -> Result<(), RuleError> {
    if !state.started {
        return Err(RuleError::NotEnoughPlayers);
    }
    if state.match_winner.is_some() {
        return Err(RuleError::MatchOver);
    }
    if state.round_winner.is_none() {
        return Err(RuleError::RoundInProgress);
    }
    deal_round(state, rng, rules)?;
    state.round_winner = None;
    state.turn = choose_first_player(state, rng);
    if let Some(first) = state.turn {
        state.last_action = format!("New round. {} starts.", state.name_of(&first));
    }
    info!(room = %state.room_id, "round started");
    Ok(())
}

/// Zeroes scores and restarts the match, or waits if a seat is empty.
pub fn full_reset(
    state: &mut MatchState,
    rng: &mut GameRng,
    rules: &HouseRules,
) -> Result<(), RuleError> {
    if state.seats.len() == SEATS_PER_ROOM {
        start_match(state, rng, rules)?;
    } else {
        state.started = false;
        state.turn = None;
        state.round_winner = None;
        state.match_winner = None;
        state.pending = None;
        state.challenge = None;
        state.last_action = "Resetting…".to_string();
    }
    for seat in &mut state.seats {
        seat.score = 0;
    }
    info!(room = %state.room_id, "match reset");
    Ok(())
}
