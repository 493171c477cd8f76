//! uno-duel rule engine.
//!
//! This crate holds the card engine for two-player rooms: deck and piles,
//! play legality and effects, forced-draw stacking with the draw-four
//! challenge, one-card declarations, scoring, and the per-room state machine
//! that turns accepted commands into per-player snapshots.
//!
//! ## Determinism requirements
//! - Do not use wall-clock time inside the engine.
//! - Only draw randomness from the room's [`GameRng`].
//! - Avoid iteration order of hash-based collections influencing outputs.
//!
//! ## Invariants
//! After every accepted command [`MatchState::integrity_check`] holds: the
//! cards of a round are conserved and unique, a pending draw is never zero,
//! and the turn pointer names a seated player exactly while a round is live.
//!
//! ## Minimal room flow (example)
//! ```rust
//! use uno_duel_execution::{GameRng, Room};
//! use uno_duel_types::{Action, HouseRules, RoomId};
//!
//! let room_id = RoomId::parse("lobby").expect("non-empty room id");
//! let mut room = Room::new(room_id, HouseRules::default(), GameRng::seeded(7));
//! room.join("Ada").expect("seat available");
//! room.join("Bob").expect("seat available");
//! assert!(room.state().started);
//!
//! // Whoever is not on turn is rejected without touching the room.
//! let waiting = room
//!     .state()
//!     .seats
//!     .iter()
//!     .map(|seat| seat.id)
//!     .find(|id| room.state().turn != Some(*id))
//!     .expect("two seats");
//! assert!(room.handle(waiting, Action::Draw).is_err());
//! ```

pub mod declarations;
pub mod deck;
pub mod draw;
pub mod error;
pub mod projector;
pub mod resolver;
pub mod rng;
pub mod room;
pub mod rooms;
pub mod scoring;
pub mod stacking;
pub mod state;

#[cfg(test)]
mod proptest_conservation;

pub use error::{DeckError, IntegrityError, JoinError, RepositoryError, RuleError};
pub use projector::project;
pub use rng::GameRng;
pub use room::{Delivery, Joined, Room};
pub use rooms::{RoomRepository, SharedRoom};
pub use stacking::{ChallengeWindow, PendingDraw};
pub use state::{MatchState, Seat};
