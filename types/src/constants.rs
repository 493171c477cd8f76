/// Total cards in a full deck (four suits of 25 plus 8 colorless cards).
pub const DECK_SIZE: usize = 108;

/// Maximum length (in characters) of a room identifier after trimming.
pub const MAX_ROOM_ID_LENGTH: usize = 24;

/// Maximum length (in characters) of a display name after trimming.
pub const MAX_NAME_LENGTH: usize = 32;

/// Seats per room.
pub const SEATS_PER_ROOM: usize = 2;

/// Points scored for each wild or wild draw-four card left in a losing hand.
pub const WILD_CARD_POINTS: u32 = 50;

/// Points scored for each colored action card left in a losing hand.
pub const ACTION_CARD_POINTS: u32 = 20;

/// Last-action text shown before a match has started.
pub const WAITING_FOR_PLAYERS: &str = "Waiting for players…";

/// Cards drawn by a player whose draw-four challenge fails.
pub const CHALLENGE_FAILURE_PENALTY: u32 = 2;
