use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::constants::DECK_SIZE;

/// Default points needed to win a match.
pub const DEFAULT_TARGET_SCORE: u32 = 200;

/// Default cards dealt to each player per round.
pub const DEFAULT_HAND_SIZE: usize = 7;

/// Default cards drawn by a player caught without declaring their last card.
pub const DEFAULT_DECLARATION_PENALTY: u32 = 2;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum RulesError {
    #[error("target_score must be greater than zero")]
    ZeroTargetScore,
    #[error("hand_size must be greater than zero")]
    ZeroHandSize,
    #[error("hand_size too large for the deck (hand_size={hand_size}, max={max})")]
    HandSizeTooLarge { hand_size: usize, max: usize },
}

/// House rules applied by every room of a table service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseRules {
    /// Cumulative score that ends the match.
    pub target_score: u32,
    /// Cards dealt to each player at the start of a round.
    pub hand_size: usize,
    /// A player facing a forced draw may pass it on with a matching card.
    pub stacking: bool,
    /// Drawing is rejected while the player holds a legal play.
    pub must_play_if_able: bool,
    /// Drawing continues until a playable card appears, which is auto-played.
    pub draw_to_match: bool,
    /// The target of a wild draw-four may contest its legality.
    pub challenge: bool,
    /// Cards drawn by a player caught without declaring their last card.
    pub declaration_penalty: u32,
}

impl Default for HouseRules {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            hand_size: DEFAULT_HAND_SIZE,
            stacking: true,
            must_play_if_able: true,
            draw_to_match: true,
            challenge: true,
            declaration_penalty: DEFAULT_DECLARATION_PENALTY,
        }
    }
}

impl HouseRules {
    /// Largest hand size that still leaves a starter for the discard pile.
    pub const MAX_HAND_SIZE: usize = (DECK_SIZE - 1) / 2;

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.target_score == 0 {
            return Err(RulesError::ZeroTargetScore);
        }
        if self.hand_size == 0 {
            return Err(RulesError::ZeroHandSize);
        }
        // More than four undealt cards guarantees a non-draw-four starter.
        let max = Self::MAX_HAND_SIZE - 4;
        if self.hand_size > max {
            return Err(RulesError::HandSizeTooLarge {
                hand_size: self.hand_size,
                max,
            });
        }
        Ok(())
    }
}
