//! Per-player views of a room.

use uno_duel_types::{Card, HouseRules, PlayerId, PlayerView, SeatView};

use crate::declarations;
use crate::resolver;
use crate::stacking;
use crate::state::{MatchState, Seat};

fn seat_view(state: &MatchState, seat: &Seat) -> SeatView {
    SeatView {
        id: seat.id,
        name: seat.name.clone(),
        hand_count: state.hand(&seat.id).map_or(0, <[Card]>::len),
        score: seat.score,
    }
}

/// What `viewer` may see: their own hand, only the count of the opponent's,
/// and the eligibility flags for every action. `None` if not seated.
pub fn project(state: &MatchState, rules: &HouseRules, viewer: &PlayerId) -> Option<PlayerView> {
    let seat = state.seat(viewer)?;
    let round_active = state.round_active();
    let your_turn = round_active && state.turn.as_ref() == Some(viewer);

    let playable_card_ids = if your_turn {
        resolver::legal_plays(state, viewer)
            .iter()
            .map(|card| card.id)
            .collect()
    } else {
        Vec::new()
    };
    let can_draw = your_turn
        && (state.pending.is_some() || playable_card_ids.is_empty() || !rules.must_play_if_able);

    Some(PlayerView {
        room_id: state.room_id.clone(),
        you: seat_view(state, seat),
        players: state.seats.iter().map(|s| seat_view(state, s)).collect(),
        your_hand: state.hand(viewer).map(<[Card]>::to_vec).unwrap_or_default(),
        opponent_hand_count: state
            .opponent_of(viewer)
            .and_then(|opponent| state.hand(&opponent))
            .map(<[Card]>::len),
        top_card: state.top_card().copied(),
        current_color: state.started.then_some(state.active_color),
        your_turn,
        started: state.started,
        winner: state.round_winner,
        match_winner: state.match_winner,
        last_action: state.last_action.clone(),
        pending_draw: state.pending.map_or(0, |pending| pending.count),
        stacking_type: state.pending.map(|pending| pending.kind),
        must_press_uno: round_active && declarations::can_declare(state, viewer),
        can_callout: round_active && declarations::callout_eligible(state, viewer),
        can_challenge: stacking::can_challenge(state, rules, viewer),
        can_draw,
        playable_card_ids,
        target_score: rules.target_score,
    })
}
