//! A single room: seating, command dispatch and snapshot delivery.
//!
//! Every accepted command produces one snapshot per seated player. Rejected
//! commands leave the room untouched and produce no deliveries; the caller
//! decides from [`RuleError::is_reported`] whether to tell the sender.

use tracing::{debug, info, warn};
use uno_duel_types::{
    normalize_name, Action, HouseRules, PlayerId, RoomId, ServerMessage, SEATS_PER_ROOM,
};

use crate::declarations;
use crate::draw;
use crate::error::{JoinError, RuleError};
use crate::projector;
use crate::resolver;
use crate::rng::GameRng;
use crate::scoring;
use crate::stacking;
use crate::state::MatchState;

/// A message addressed to one seated player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    pub to: PlayerId,
    pub message: ServerMessage,
}

/// Outcome of a successful join.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Joined {
    pub player: PlayerId,
    /// The name was already seated; the join reattached to that seat.
    pub rejoined: bool,
    pub deliveries: Vec<Delivery>,
}

pub struct Room {
    state: MatchState,
    rules: HouseRules,
    rng: GameRng,
}

impl Room {
    pub fn new(room_id: RoomId, rules: HouseRules, rng: GameRng) -> Self {
        Self::with_state(MatchState::new(room_id), rules, rng)
    }

    /// Wraps an existing match record.
    pub fn with_state(state: MatchState, rules: HouseRules, rng: GameRng) -> Self {
        Self { state, rules, rng }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn rules(&self) -> &HouseRules {
        &self.rules
    }

    /// Seats `name`, or reattaches to the seat already holding that name.
    ///
    /// A fresh seat broadcasts to everyone; the second seat starts the match.
    /// A rejoin only refreshes the joiner.
    pub fn join(&mut self, name: &str) -> Result<Joined, JoinError> {
        let name = normalize_name(name).ok_or(JoinError::MissingField)?;
        let room = self.state.room_id.clone();

        if let Some(seat) = self.state.seat_by_name(&name) {
            let player = seat.id;
            info!(%room, %player, %name, "player rejoined");
            return Ok(Joined {
                player,
                rejoined: true,
                deliveries: self.snapshot_for(&player).into_iter().collect(),
            });
        }

        if self.state.seats.len() >= SEATS_PER_ROOM {
            debug!(%room, %name, "room full");
            return Err(JoinError::RoomFull);
        }

        let player = self.rng.player_id();
        self.state.add_seat(player, name.clone());
        info!(%room, %player, %name, "player seated");

        if self.state.seats.len() == SEATS_PER_ROOM && !self.state.started {
            if let Err(err) = scoring::start_match(&mut self.state, &mut self.rng, &self.rules) {
                warn!(%room, ?err, "failed to start match");
            }
        }
        self.verify();

        Ok(Joined {
            player,
            rejoined: false,
            deliveries: self.broadcast(),
        })
    }

    /// Applies `action` on behalf of `sender`.
    pub fn handle(&mut self, sender: PlayerId, action: Action) -> Result<Vec<Delivery>, RuleError> {
        if !self.state.is_seated(&sender) {
            return Err(RuleError::NotSeated);
        }

        let state = &mut self.state;
        let rng = &mut self.rng;
        let rules = &self.rules;
        let result = match action {
            Action::Play {
                card_id,
                chosen_color,
            } => resolver::attempt_play(state, rng, rules, sender, card_id, chosen_color),
            Action::Draw => draw::draw(state, rng, rules, sender),
            Action::DeclareOneCard => {
                if state.round_active() {
                    declarations::declare(state, sender)
                } else {
                    Err(RuleError::RoundOver)
                }
            }
            Action::Callout => {
                if state.round_active() {
                    declarations::callout(state, rng, rules, sender)
                } else {
                    Err(RuleError::RoundOver)
                }
            }
            Action::Challenge => stacking::resolve_challenge(state, rng, rules, sender),
            Action::AdvanceRound => scoring::advance_round(state, rng, rules),
            Action::Reset => scoring::full_reset(state, rng, rules),
        };

        if let Err(err) = &result {
            debug!(room = %self.state.room_id, %sender, ?action, %err, "action rejected");
        }
        result?;

        self.verify();
        Ok(self.broadcast())
    }

    /// One snapshot per seated player.
    pub fn broadcast(&self) -> Vec<Delivery> {
        self.state
            .seats
            .iter()
            .filter_map(|seat| self.snapshot_for(&seat.id))
            .collect()
    }

    pub fn snapshot_for(&self, player: &PlayerId) -> Option<Delivery> {
        let view = projector::project(&self.state, &self.rules, player)?;
        Some(Delivery {
            to: *player,
            message: ServerMessage::State {
                data: Box::new(view),
            },
        })
    }

    fn verify(&self) {
        if let Err(err) = self.state.integrity_check() {
            warn!(room = %self.state.room_id, ?err, "match integrity violated");
        }
    }
}
