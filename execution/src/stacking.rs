//! Pending forced draws and the draw-four challenge window.

use tracing::debug;
use uno_duel_types::{Card, Color, Face, HouseRules, PlayerId, Suit, CHALLENGE_FAILURE_PENALTY};

use crate::error::RuleError;
use crate::resolver;
use crate::rng::GameRng;
use crate::state::MatchState;

/// Accumulated forced draw. Exists only while the count is positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingDraw {
    pub count: u32,
    /// Only cards of this kind may be stacked on it.
    pub kind: Face,
}

/// Evidence retained for a possible challenge of a wild draw-four.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeWindow {
    pub offender: PlayerId,
    pub target: PlayerId,
    pub card: Card,
    /// Active color immediately before the draw-four was played.
    pub prior_color: Suit,
    /// The offender's hand at the moment of play, draw-four included.
    pub offender_hand: Vec<Card>,
}

impl ChallengeWindow {
    /// The draw-four was illegal if the offender held a card of the prior color.
    pub fn play_was_illegal(&self) -> bool {
        let prior = Color::from(self.prior_color);
        self.offender_hand.iter().any(|card| card.color == prior)
    }
}

/// Adds `amount` to the pending draw and retags it with `kind`.
pub(crate) fn add_pending(state: &mut MatchState, kind: Face, amount: u32) -> u32 {
    let count = state.pending.map_or(0, |pending| pending.count) + amount;
    state.pending = Some(PendingDraw { count, kind });
    count
}

/// `player` takes the whole pending draw and loses the turn. Returns the
/// number of cards actually drawn, which falls short of the amount owed
/// only when both piles run out.
pub(crate) fn absorb_pending(
    state: &mut MatchState,
    rng: &mut GameRng,
    player: PlayerId,
) -> Option<u32> {
    let pending = state.pending.take()?;
    state.challenge = None;
    let drawn = state.draw_cards(rng, player, pending.count);
    state.turn = state.next_player(&player, 1);
    debug!(%player, owed = pending.count, drawn, "pending draw absorbed");
    Some(drawn)
}

/// Resolves a pending draw immediately when the player now holding the turn
/// has nothing to stack on it.
pub(crate) fn resolve_if_unstackable(state: &mut MatchState, rng: &mut GameRng) {
    let Some(holder) = state.turn else {
        return;
    };
    if state.pending.is_none() || resolver::has_legal_play(state, &holder) {
        return;
    }
    if let Some(count) = absorb_pending(state, rng, holder) {
        let note = format!(" {} drew {} and was skipped.", state.name_of(&holder), count);
        state.last_action.push_str(&note);
    }
}

/// Whether `player` may challenge the draw-four they currently face.
pub fn can_challenge(state: &MatchState, rules: &HouseRules, player: &PlayerId) -> bool {
    if !rules.challenge || !state.round_active() {
        return false;
    }
    let facing_draw_four = state
        .pending
        .is_some_and(|pending| pending.kind == Face::WildDrawFour);
    let targeted = state
        .challenge
        .as_ref()
        .is_some_and(|window| &window.target == player);
    facing_draw_four && targeted
}

/// Challenges the draw-four that opened the current window.
///
/// On success the offender draws four and the pending draw shrinks by four.
/// On failure the challenger draws the failure penalty and the pending draw
/// stands. The window closes either way.
pub fn resolve_challenge(
    state: &mut MatchState,
    rng: &mut GameRng,
    rules: &HouseRules,
    challenger: PlayerId,
) -> Result<(), RuleError> {
    if !can_challenge(state, rules, &challenger) {
        return Err(RuleError::ChallengeNotAllowed);
    }
    let window = state.challenge.take().ok_or(RuleError::ChallengeNotAllowed)?;

    if window.play_was_illegal() {
        let penalty = Face::WildDrawFour.draw_amount().unwrap_or(4);
        state.draw_cards(rng, window.offender, penalty);
        state.pending = state.pending.and_then(|pending| {
            let count = pending.count.saturating_sub(penalty);
            (count > 0).then_some(PendingDraw { count, ..pending })
        });
        state.last_action = format!(
            "{} challenged successfully. {} draws {}.",
            state.name_of(&challenger),
            state.name_of(&window.offender),
            penalty
        );
        debug!(%challenger, offender = %window.offender, "challenge succeeded");
    } else {
        state.draw_cards(rng, challenger, CHALLENGE_FAILURE_PENALTY);
        state.last_action = format!(
            "{} challenge failed and draws +{}.",
            state.name_of(&challenger),
            CHALLENGE_FAILURE_PENALTY
        );
        debug!(%challenger, "challenge failed");
    }
    Ok(())
}
