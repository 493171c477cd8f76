//! Property tests for card conservation and rejection atomicity.
//!
//! Random command streams are driven through a seeded room under random house
//! rules. After every command the match record must pass its integrity check,
//! and a rejected command must leave the record exactly as it was.

use proptest::prelude::*;
use uno_duel_types::{Action, HouseRules, PlayerId, RoomId, Suit, DECK_SIZE};

use crate::rng::GameRng;
use crate::room::Room;

#[derive(Clone, Copy, Debug)]
struct Step {
    /// Sends as the turn holder unless set.
    off_turn: bool,
    kind: u8,
    pick: usize,
    suit: usize,
}

fn arb_step() -> impl Strategy<Value = Step> {
    (prop::bool::weighted(0.2), 0u8..20, any::<usize>(), 0usize..4).prop_map(
        |(off_turn, kind, pick, suit)| Step {
            off_turn,
            kind,
            pick,
            suit,
        },
    )
}

fn arb_rules() -> impl Strategy<Value = HouseRules> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        1usize..=9,
    )
        .prop_map(
            |(stacking, must_play_if_able, draw_to_match, challenge, hand_size)| HouseRules {
                hand_size,
                stacking,
                must_play_if_able,
                draw_to_match,
                challenge,
                ..HouseRules::default()
            },
        )
}

fn sender(room: &Room, step: &Step) -> Option<PlayerId> {
    let seats = &room.state().seats;
    let holder = room.state().turn.unwrap_or(seats.first()?.id);
    if step.off_turn {
        room.state().opponent_of(&holder)
    } else {
        Some(holder)
    }
}

fn action(room: &Room, player: &PlayerId, step: &Step) -> Action {
    match step.kind {
        0..=9 => {
            let hand = room.state().hand(player).unwrap_or_default();
            let card_id = hand
                .get(step.pick % hand.len().max(1))
                .map_or(u32::MAX, |card| card.id);
            Action::Play {
                card_id,
                chosen_color: Some(Suit::ALL[step.suit]),
            }
        }
        10..=13 => Action::Draw,
        14 => Action::DeclareOneCard,
        15 => Action::Callout,
        16 => Action::Challenge,
        17 | 18 => Action::AdvanceRound,
        _ => Action::Reset,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_commands_conserve_cards(
        seed in any::<u64>(),
        rules in arb_rules(),
        steps in prop::collection::vec(arb_step(), 0..300),
    ) {
        let room_id = RoomId::parse("prop").expect("valid room id");
        let mut room = Room::new(room_id, rules, GameRng::seeded(seed));
        room.join("Ada").expect("first seat");
        room.join("Bob").expect("second seat");
        prop_assert!(room.state().started);

        for step in &steps {
            let Some(player) = sender(&room, step) else {
                continue;
            };
            let command = action(&room, &player, step);
            let before = room.state().clone();
            match room.handle(player, command) {
                Ok(deliveries) => {
                    prop_assert_eq!(deliveries.len(), 2);
                }
                Err(_) => {
                    prop_assert_eq!(room.state(), &before);
                }
            }

            let state = room.state();
            prop_assert_eq!(state.integrity_check(), Ok(()));
            prop_assert_eq!(state.count_cards(), DECK_SIZE);
            if let Some(pending) = state.pending {
                prop_assert!(pending.count > 0);
                prop_assert!(rules.stacking);
            }
            if state.challenge.is_some() {
                prop_assert!(state.pending.is_some());
            }
        }
    }
}
