//! Wire messages exchanged with table clients.
//!
//! Inbound frames are JSON objects tagged by `type`; outbound frames are either a
//! per-player `state` snapshot or an `error` notice.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Face, Suit};
use crate::ids::{PlayerId, RoomId};

/// A frame sent by a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "join")]
    Join {
        #[serde(rename = "roomId", default)]
        room_id: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
    #[serde(rename = "play")]
    Play {
        #[serde(rename = "cardId")]
        card_id: CardId,
        #[serde(rename = "chosenColor", default)]
        chosen_color: Option<Suit>,
    },
    #[serde(rename = "draw")]
    Draw,
    #[serde(rename = "uno")]
    Uno,
    #[serde(rename = "callout")]
    Callout,
    #[serde(rename = "challenge")]
    Challenge,
    #[serde(rename = "next-round")]
    NextRound,
    #[serde(rename = "reset")]
    Reset,
}

/// An in-room command issued by a seated player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Play {
        card_id: CardId,
        chosen_color: Option<Suit>,
    },
    Draw,
    DeclareOneCard,
    Callout,
    Challenge,
    AdvanceRound,
    Reset,
}

/// A decoded client frame, split into the room-joining request and in-room actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inbound {
    Join {
        room_id: Option<String>,
        name: Option<String>,
    },
    Action(Action),
}

impl From<ClientMessage> for Inbound {
    fn from(message: ClientMessage) -> Self {
        match message {
            ClientMessage::Join { room_id, name } => Inbound::Join { room_id, name },
            ClientMessage::Play {
                card_id,
                chosen_color,
            } => Inbound::Action(Action::Play {
                card_id,
                chosen_color,
            }),
            ClientMessage::Draw => Inbound::Action(Action::Draw),
            ClientMessage::Uno => Inbound::Action(Action::DeclareOneCard),
            ClientMessage::Callout => Inbound::Action(Action::Callout),
            ClientMessage::Challenge => Inbound::Action(Action::Challenge),
            ClientMessage::NextRound => Inbound::Action(Action::AdvanceRound),
            ClientMessage::Reset => Inbound::Action(Action::Reset),
        }
    }
}

/// A frame sent to a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "state")]
    State { data: Box<PlayerView> },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Public information about a seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub id: PlayerId,
    pub name: String,
    pub hand_count: usize,
    pub score: u32,
}

/// Everything one player is allowed to see about their room.
///
/// Eligibility flags and `playable_card_ids` are computed by the engine so
/// clients never re-derive legality.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub room_id: RoomId,
    pub you: SeatView,
    pub players: Vec<SeatView>,
    pub your_hand: Vec<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent_hand_count: Option<usize>,
    pub top_card: Option<Card>,
    pub current_color: Option<Suit>,
    pub your_turn: bool,
    pub started: bool,
    pub winner: Option<PlayerId>,
    pub match_winner: Option<PlayerId>,
    pub last_action: String,
    pub pending_draw: u32,
    pub stacking_type: Option<Face>,
    pub must_press_uno: bool,
    pub can_callout: bool,
    pub can_challenge: bool,
    pub can_draw: bool,
    pub playable_card_ids: Vec<CardId>,
    pub target_score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_client_frames() {
        let join: ClientMessage =
            serde_json::from_str(r#"{"type":"join","roomId":"abc","name":"Ada"}"#).unwrap();
        assert_eq!(
            Inbound::from(join),
            Inbound::Join {
                room_id: Some("abc".to_string()),
                name: Some("Ada".to_string())
            }
        );

        let play: ClientMessage =
            serde_json::from_str(r#"{"type":"play","cardId":12,"chosenColor":"B"}"#).unwrap();
        assert_eq!(
            Inbound::from(play),
            Inbound::Action(Action::Play {
                card_id: 12,
                chosen_color: Some(Suit::Blue)
            })
        );

        let play: ClientMessage = serde_json::from_str(r#"{"type":"play","cardId":4}"#).unwrap();
        assert_eq!(
            Inbound::from(play),
            Inbound::Action(Action::Play {
                card_id: 4,
                chosen_color: None
            })
        );

        for (raw, action) in [
            (r#"{"type":"draw"}"#, Action::Draw),
            (r#"{"type":"uno"}"#, Action::DeclareOneCard),
            (r#"{"type":"callout"}"#, Action::Callout),
            (r#"{"type":"challenge"}"#, Action::Challenge),
            (r#"{"type":"next-round"}"#, Action::AdvanceRound),
            (r#"{"type":"reset"}"#, Action::Reset),
        ] {
            let message: ClientMessage = serde_json::from_str(raw).unwrap();
            assert_eq!(Inbound::from(message), Inbound::Action(action));
        }
    }

    #[test]
    fn test_join_fields_may_be_missing() {
        let join: ClientMessage = serde_json::from_str(r#"{"type":"join"}"#).unwrap();
        assert_eq!(
            join,
            ClientMessage::Join {
                room_id: None,
                name: None
            }
        );
    }

    #[test]
    fn test_malformed_frames_are_rejected() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"fly"}"#).is_err());
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"play"}"#).is_err());
        assert!(
            serde_json::from_str::<ClientMessage>(r#"{"type":"play","cardId":1,"chosenColor":"W"}"#)
                .is_err()
        );
        assert!(serde_json::from_str::<ClientMessage>("not json").is_err());
    }

    #[test]
    fn test_error_frame_shape() {
        let message = ServerMessage::Error {
            message: "Room is full (2 players max).".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&message).unwrap(),
            r#"{"type":"error","message":"Room is full (2 players max)."}"#
        );
    }
}
