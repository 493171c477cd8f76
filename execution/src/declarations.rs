//! One-card declaration tracking ("UNO").
//!
//! A player whose hand reaches exactly one card must declare it. Until they do,
//! the opponent may call them out for a draw penalty.

use std::collections::BTreeSet;
use tracing::debug;
use uno_duel_types::{HouseRules, PlayerId};

use crate::error::RuleError;
use crate::rng::GameRng;
use crate::state::MatchState;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclarationTracker {
    must_declare: BTreeSet<PlayerId>,
    declared: BTreeSet<PlayerId>,
}

impl DeclarationTracker {
    /// Records a change of `player`'s hand size.
    ///
    /// Reaching exactly one card requires a fresh declaration; any other size
    /// clears both flags.
    pub fn hand_changed(&mut self, player: PlayerId, hand_len: usize) {
        self.declared.remove(&player);
        if hand_len == 1 {
            self.must_declare.insert(player);
        } else {
            self.must_declare.remove(&player);
        }
    }

    pub fn is_required(&self, player: &PlayerId) -> bool {
        self.must_declare.contains(player)
    }

    pub fn has_declared(&self, player: &PlayerId) -> bool {
        self.declared.contains(player)
    }

    /// Owes a declaration that has not been made.
    pub fn is_outstanding(&self, player: &PlayerId) -> bool {
        self.is_required(player) && !self.has_declared(player)
    }

    fn mark_declared(&mut self, player: PlayerId) {
        self.must_declare.remove(&player);
        self.declared.insert(player);
    }

    fn forget(&mut self, player: &PlayerId) {
        self.must_declare.remove(player);
        self.declared.remove(player);
    }

    pub fn clear(&mut self) {
        self.must_declare.clear();
        self.declared.clear();
    }
}

/// Whether `player` may declare holding one card right now.
pub fn can_declare(state: &MatchState, player: &PlayerId) -> bool {
    state.hand(player).map(<[_]>::len) == Some(1) && !state.declarations.has_declared(player)
}

/// Declares holding exactly one card.
pub fn declare(state: &mut MatchState, player: PlayerId) -> Result<(), RuleError> {
    if !can_declare(state, &player) {
        return Err(RuleError::DeclarationNotAllowed);
    }
    state.declarations.mark_declared(player);
    state.last_action = format!("{} called UNO!", state.name_of(&player));
    debug!(%player, "declared one card");
    Ok(())
}

/// True only while the caller's opponent owes an undeclared one-card announcement.
pub fn callout_eligible(state: &MatchState, caller: &PlayerId) -> bool {
    state
        .opponent_of(caller)
        .is_some_and(|opponent| state.declarations.is_outstanding(&opponent))
}

/// Calls out an opponent who failed to declare: they draw the penalty.
pub fn callout(
    state: &mut MatchState,
    rng: &mut GameRng,
    rules: &HouseRules,
    caller: PlayerId,
) -> Result<(), RuleError> {
    if !callout_eligible(state, &caller) {
        return Err(RuleError::CalloutNotAllowed);
    }
    let opponent = state.opponent_of(&caller).ok_or(RuleError::CalloutNotAllowed)?;
    state.draw_cards(rng, opponent, rules.declaration_penalty);
    state.declarations.forget(&opponent);
    state.last_action = format!(
        "{} called out! {} draws {}.",
        state.name_of(&caller),
        state.name_of(&opponent),
        rules.declaration_penalty
    );
    debug!(%caller, %opponent, "callout applied");
    Ok(())
}
