//! The canonical per-room match record.

use std::collections::{BTreeMap, HashSet};
use uno_duel_types::{Card, PlayerId, RoomId, Suit, WAITING_FOR_PLAYERS};

use crate::declarations::DeclarationTracker;
use crate::deck::Piles;
use crate::error::IntegrityError;
use crate::rng::GameRng;
use crate::stacking::{ChallengeWindow, PendingDraw};

/// A seated player. Identity and score survive across rounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchState {
    pub room_id: RoomId,
    /// Seats in turn order.
    pub seats: Vec<Seat>,
    pub hands: BTreeMap<PlayerId, Vec<Card>>,
    pub piles: Piles,
    /// Meaningful once the first round has been dealt.
    pub active_color: Suit,
    /// Player to act; `None` whenever no round is in progress.
    pub turn: Option<PlayerId>,
    pub started: bool,
    pub round_winner: Option<PlayerId>,
    pub match_winner: Option<PlayerId>,
    pub last_action: String,
    pub pending: Option<PendingDraw>,
    pub declarations: DeclarationTracker,
    pub challenge: Option<ChallengeWindow>,
    /// Cards in play for the current round, fixed at deal time.
    pub card_total: usize,
}

impl MatchState {
    pub fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            seats: Vec::new(),
            hands: BTreeMap::new(),
            piles: Piles::default(),
            active_color: Suit::default(),
            turn: None,
            started: false,
            round_winner: None,
            match_winner: None,
            last_action: WAITING_FOR_PLAYERS.to_string(),
            pending: None,
            declarations: DeclarationTracker::default(),
            challenge: None,
            card_total: 0,
        }
    }

    pub fn add_seat(&mut self, id: PlayerId, name: String) {
        self.seats.push(Seat { id, name, score: 0 });
        self.hands.insert(id, Vec::new());
    }

    pub fn seat(&self, id: &PlayerId) -> Option<&Seat> {
        self.seats.iter().find(|seat| &seat.id == id)
    }

    pub fn seat_mut(&mut self, id: &PlayerId) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|seat| &seat.id == id)
    }

    pub fn seat_by_name(&self, name: &str) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.name == name)
    }

    pub fn is_seated(&self, id: &PlayerId) -> bool {
        self.seat(id).is_some()
    }

    pub fn name_of(&self, id: &PlayerId) -> &str {
        self.seat(id).map_or("Player", |seat| seat.name.as_str())
    }

    pub fn hand(&self, id: &PlayerId) -> Option<&[Card]> {
        self.hands.get(id).map(Vec::as_slice)
    }

    pub fn opponent_of(&self, id: &PlayerId) -> Option<PlayerId> {
        self.seats
            .iter()
            .find(|seat| &seat.id != id)
            .map(|seat| seat.id)
    }

    /// The player `advance` seats after `from`. With two seats an advance of
    /// two lands back on `from`.
    pub fn next_player(&self, from: &PlayerId, advance: usize) -> Option<PlayerId> {
        let index = self.seats.iter().position(|seat| &seat.id == from)?;
        let seat = &self.seats[(index + advance) % self.seats.len()];
        Some(seat.id)
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.piles.top()
    }

    /// A round has been dealt and nobody has won it yet.
    pub fn round_active(&self) -> bool {
        self.started
            && self.round_winner.is_none()
            && self.match_winner.is_none()
            && self.turn.is_some()
    }

    /// Moves up to `count` cards from the draw pile into `player`'s hand and
    /// returns how many were drawn. Fewer than `count` means both piles ran dry.
    pub fn draw_cards(&mut self, rng: &mut GameRng, player: PlayerId, count: u32) -> u32 {
        let Some(hand) = self.hands.get_mut(&player) else {
            return 0;
        };
        let mut drawn = 0;
        while drawn < count {
            match self.piles.draw_one(rng) {
                Some(card) => {
                    hand.push(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        if drawn > 0 {
            let len = hand.len();
            self.declarations.hand_changed(player, len);
        }
        drawn
    }

    /// Cards currently held in hands and piles.
    pub fn count_cards(&self) -> usize {
        self.piles.len() + self.hands.values().map(Vec::len).sum::<usize>()
    }

    /// Verifies the invariants of the match record.
    pub fn integrity_check(&self) -> Result<(), IntegrityError> {
        if let Some(pending) = &self.pending {
            if pending.count == 0 {
                return Err(IntegrityError::EmptyPendingDraw);
            }
        }

        if !self.started {
            return Ok(());
        }

        let found = self.count_cards();
        if found != self.card_total {
            return Err(IntegrityError::CardCount {
                expected: self.card_total,
                found,
            });
        }
        let mut seen = HashSet::with_capacity(found);
        let all_cards = self
            .piles
            .draw_pile()
            .iter()
            .chain(self.piles.discard_pile())
            .chain(self.hands.values().flatten());
        for card in all_cards {
            if !seen.insert(card.id) {
                return Err(IntegrityError::DuplicateCard(card.id));
            }
        }

        let round_over = self.round_winner.is_some() || self.match_winner.is_some();
        match (self.turn, round_over) {
            (Some(_), true) => Err(IntegrityError::TurnAfterRoundEnd),
            (None, false) => Err(IntegrityError::MissingTurn),
            (Some(turn), false) if !self.is_seated(&turn) => {
                Err(IntegrityError::TurnNotSeated(turn))
            }
            _ => Ok(()),
        }
    }
}
