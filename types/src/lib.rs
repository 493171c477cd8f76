//! Common types used throughout uno-duel.
//!
//! This crate holds the data model shared by the rule engine and the table
//! service: cards, identities, house rules, and the wire messages exchanged
//! with clients. It performs no I/O.

pub mod api;
pub mod cards;
pub mod constants;
pub mod ids;
pub mod rules;

pub use api::{Action, ClientMessage, Inbound, PlayerView, SeatView, ServerMessage};
pub use cards::{Card, CardId, Color, Face, ParseFaceError, Suit};
pub use constants::*;
pub use ids::{normalize_name, PlayerId, RoomId};
pub use rules::{HouseRules, RulesError};
