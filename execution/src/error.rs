use thiserror::Error as ThisError;
use uno_duel_types::{CardId, PlayerId};

/// Rejection of an in-room action. A rejected action never mutates state.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("player is not seated in this room")]
    NotSeated,
    #[error("no round is in progress")]
    RoundOver,
    #[error("it is not this player's turn")]
    NotYourTurn,
    #[error("card {0} is not in the player's hand")]
    CardNotInHand(CardId),
    #[error("card {0} cannot be played now")]
    IllegalCard(CardId),
    #[error("a color must be chosen for a wild card")]
    ColorRequired,
    #[error("You must play a card if you can.")]
    MustPlayIfAble,
    #[error("declaring one card requires exactly one card in hand")]
    DeclarationNotAllowed,
    #[error("opponent cannot be called out")]
    CalloutNotAllowed,
    #[error("no challenge is open for this player")]
    ChallengeNotAllowed,
    #[error("the current round has not finished")]
    RoundInProgress,
    #[error("the match is over; reset to play again")]
    MatchOver,
    #[error("a match needs two seated players")]
    NotEnoughPlayers,
    #[error(transparent)]
    Deal(#[from] DeckError),
}

impl RuleError {
    /// Whether the rejection is surfaced to the caller as an error notice.
    /// Every other illegal move is dropped silently.
    pub fn is_reported(&self) -> bool {
        matches!(self, RuleError::MustPlayIfAble | RuleError::Deal(_))
    }
}

/// Rejection of a join request. Always reported to the caller.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum JoinError {
    #[error("Room id and name are required.")]
    MissingField,
    #[error("Room is full (2 players max).")]
    RoomFull,
}

/// A round could not be dealt.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck cannot deal {needed} cards (available={available})")]
    NotEnoughCards { needed: usize, available: usize },
    #[error("no card other than a wild draw-four is left to start the discard pile")]
    NoStarter,
}

/// A broken invariant of the match record.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("card count changed (expected={expected}, found={found})")]
    CardCount { expected: usize, found: usize },
    #[error("card {0} appears more than once")]
    DuplicateCard(CardId),
    #[error("pending draw count is zero but still tagged")]
    EmptyPendingDraw,
    #[error("turn pointer names {0}, who is not seated")]
    TurnNotSeated(PlayerId),
    #[error("turn pointer is set after the round ended")]
    TurnAfterRoundEnd,
    #[error("no player holds the turn during an active round")]
    MissingTurn,
}

/// Failure of the room repository itself.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("room registry lock poisoned")]
    Poisoned,
}
