use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::constants::{MAX_NAME_LENGTH, MAX_ROOM_ID_LENGTH};

/// Opaque player identity, minted when a name first takes a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Builds an identity from 16 random bytes (version 4 layout).
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Caller-supplied room token, trimmed and length-capped.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Normalizes a raw room token. Returns `None` when nothing is left after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        normalize(raw, MAX_ROOM_ID_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes a display name. Returns `None` when nothing is left after trimming.
pub fn normalize_name(raw: &str) -> Option<String> {
    normalize(raw, MAX_NAME_LENGTH)
}

fn normalize(raw: &str, max_chars: usize) -> Option<String> {
    let trimmed: String = raw.trim().chars().take(max_chars).collect();
    let trimmed = trimmed.trim_end();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
