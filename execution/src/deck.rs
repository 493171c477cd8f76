//! Deck construction and the draw/discard piles.
//!
//! The draw pile pops from the end of its vector (the top); index 0 is the
//! bottom. The discard pile's last element is the top card.

use uno_duel_types::{Card, CardId, Color, Face, Suit, DECK_SIZE};

use crate::error::DeckError;
use crate::rng::GameRng;

/// Colorless cards of each kind in a deck.
const WILDS_PER_KIND: usize = 4;

/// Builds the full 108-card deck, shuffled.
///
/// Per suit: one zero, two of each numeral one through nine, and two each of
/// skip, reverse and draw-two. Plus four wilds and four wild draw-fours.
pub fn build(rng: &mut GameRng) -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    let mut next_id: CardId = 0;
    let mut push = |cards: &mut Vec<Card>, color: Color, face: Face| {
        cards.push(Card::new(next_id, color, face));
        next_id += 1;
    };

    for suit in Suit::ALL {
        let color = Color::from(suit);
        push(&mut cards, color, Face::Number(0));
        for value in 1..=9 {
            push(&mut cards, color, Face::Number(value));
            push(&mut cards, color, Face::Number(value));
        }
        for face in Face::ACTIONS {
            push(&mut cards, color, face);
            push(&mut cards, color, face);
        }
    }
    for _ in 0..WILDS_PER_KIND {
        push(&mut cards, Color::Wild, Face::Wild);
        push(&mut cards, Color::Wild, Face::WildDrawFour);
    }

    rng.shuffle(&mut cards);
    cards
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Piles {
    draw: Vec<Card>,
    discard: Vec<Card>,
}

impl Piles {
    pub fn new(draw: Vec<Card>) -> Self {
        Self {
            draw,
            discard: Vec::new(),
        }
    }

    pub fn draw_pile(&self) -> &[Card] {
        &self.draw
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    pub fn top(&self) -> Option<&Card> {
        self.discard.last()
    }

    pub fn len(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes `count` cards off the top of the draw pile for a fresh deal.
    pub fn deal(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        if count > self.draw.len() {
            return Err(DeckError::NotEnoughCards {
                needed: count,
                available: self.draw.len(),
            });
        }
        let mut hand = self.draw.split_off(self.draw.len() - count);
        hand.reverse();
        Ok(hand)
    }

    /// Flips the first non-draw-four card from the top onto the discard pile.
    /// Any draw-fours passed over go to the bottom of the draw pile.
    pub fn draw_starter(&mut self) -> Result<Card, DeckError> {
        let position = self
            .draw
            .iter()
            .rposition(|card| card.face != Face::WildDrawFour)
            .ok_or(DeckError::NoStarter)?;
        let passed_over = self.draw.split_off(position + 1);
        let starter = self.draw.pop().ok_or(DeckError::NoStarter)?;
        self.draw.splice(0..0, passed_over);
        self.discard.push(starter);
        Ok(starter)
    }

    pub fn discard(&mut self, card: Card) {
        self.discard.push(card);
    }

    /// Draws the top card, recycling the discard pile first if the draw pile
    /// is empty. `None` means both piles are exhausted; callers treat that as
    /// a normal outcome.
    pub fn draw_one(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.draw.is_empty() {
            self.recycle(rng);
        }
        self.draw.pop()
    }

    /// Turns every discard except the top card into a freshly shuffled draw pile.
    pub fn recycle(&mut self, rng: &mut GameRng) {
        let Some(top) = self.discard.pop() else {
            return;
        };
        let mut recycled = std::mem::take(&mut self.discard);
        rng.shuffle(&mut recycled);
        recycled.append(&mut self.draw);
        self.draw = recycled;
        self.discard.push(top);
    }
}
