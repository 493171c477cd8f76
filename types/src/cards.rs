//! Card model.
//!
//! A card has a unique identity, a color (one of four suits or the colorless
//! wild marker) and a face. Faces are serialized with the labels clients
//! render directly: `"0"`..`"9"`, `"Skip"`, `"Reverse"`, `"+2"`, `"Wild"`, `"+4"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error as ThisError;

use crate::constants::{ACTION_CARD_POINTS, WILD_CARD_POINTS};

/// Identity of a card, unique within a round.
pub type CardId = u32;

/// One of the four suits. The active color is always a suit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    #[default]
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "Y")]
    Yellow,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "B")]
    Blue,
}

impl Suit {
    /// All suits, in tie-break precedence order.
    pub const ALL: [Suit; 4] = [Suit::Red, Suit::Yellow, Suit::Green, Suit::Blue];

    pub fn name(self) -> &'static str {
        match self {
            Suit::Red => "Red",
            Suit::Yellow => "Yellow",
            Suit::Green => "Green",
            Suit::Blue => "Blue",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Printed color of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "Y")]
    Yellow,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "B")]
    Blue,
    #[serde(rename = "W")]
    Wild,
}

impl Color {
    /// The suit this color belongs to, or `None` for the wild marker.
    pub fn suit(self) -> Option<Suit> {
        match self {
            Color::Red => Some(Suit::Red),
            Color::Yellow => Some(Suit::Yellow),
            Color::Green => Some(Suit::Green),
            Color::Blue => Some(Suit::Blue),
            Color::Wild => None,
        }
    }
}

impl From<Suit> for Color {
    fn from(suit: Suit) -> Self {
        match suit {
            Suit::Red => Color::Red,
            Suit::Yellow => Color::Yellow,
            Suit::Green => Color::Green,
            Suit::Blue => Color::Blue,
        }
    }
}

#[derive(Debug, ThisError, PartialEq, Eq)]
#[error("unknown card face: {0:?}")]
pub struct ParseFaceError(pub String);

/// Face value of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Face {
    /// Numeral `0..=9`.
    Number(u8),
    Skip,
    Reverse,
    /// Force-draw-two.
    DrawTwo,
    Wild,
    /// Wild + force-draw-four.
    WildDrawFour,
}

impl Face {
    /// Colored action faces, two of each per suit.
    pub const ACTIONS: [Face; 3] = [Face::Skip, Face::Reverse, Face::DrawTwo];

    /// Cards the next player is forced to draw, for force-draw faces.
    pub fn draw_amount(self) -> Option<u32> {
        match self {
            Face::DrawTwo => Some(2),
            Face::WildDrawFour => Some(4),
            _ => None,
        }
    }

    /// Points this face scores when left in a losing hand.
    pub fn points(self) -> u32 {
        match self {
            Face::Number(value) => u32::from(value),
            Face::Wild | Face::WildDrawFour => WILD_CARD_POINTS,
            Face::Skip | Face::Reverse | Face::DrawTwo => ACTION_CARD_POINTS,
        }
    }

    pub fn label(self) -> String {
        match self {
            Face::Number(value) => value.to_string(),
            Face::Skip => "Skip".to_string(),
            Face::Reverse => "Reverse".to_string(),
            Face::DrawTwo => "+2".to_string(),
            Face::Wild => "Wild".to_string(),
            Face::WildDrawFour => "+4".to_string(),
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Face {
    type Err = ParseFaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Skip" => Ok(Face::Skip),
            "Reverse" => Ok(Face::Reverse),
            "+2" => Ok(Face::DrawTwo),
            "Wild" => Ok(Face::Wild),
            "+4" => Ok(Face::WildDrawFour),
            digit if digit.len() == 1 => digit
                .parse::<u8>()
                .map(Face::Number)
                .map_err(|_| ParseFaceError(s.to_string())),
            _ => Err(ParseFaceError(s.to_string())),
        }
    }
}

impl From<Face> for String {
    fn from(face: Face) -> Self {
        face.label()
    }
}

impl TryFrom<String> for Face {
    type Error = ParseFaceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single card. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub color: Color,
    #[serde(rename = "value")]
    pub face: Face,
}

impl Card {
    pub fn new(id: CardId, color: Color, face: Face) -> Self {
        Self { id, color, face }
    }

    /// True for the colorless cards (wild and wild draw-four).
    pub fn is_wild(&self) -> bool {
        self.color == Color::Wild
    }

    pub fn suit(&self) -> Option<Suit> {
        self.color.suit()
    }

    pub fn points(&self) -> u32 {
        self.face.points()
    }

    /// Human-readable description, e.g. `"Red 7"` or `"Wild"`.
    pub fn describe(&self) -> String {
        match self.suit() {
            Some(suit) => format!("{} {}", suit, self.face),
            None => self.face.label(),
        }
    }
}
