use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::cards_types::{Card, Color};
use crate::domain::catalog::{full_catalog, CATALOG_SIZE};
use crate::domain::draft::DraftState;
use crate::domain::events::{DiscardReason, GameEvent, PickOutcome};
use crate::domain::grid::{GridCell, PlayerGrid, GRID_SIZE};
use crate::domain::placement::{DuplicateChoice, PlacementChoice};
use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::{ChoiceKind, GamePhase, GameSession};
use crate::domain::test_gens::catalog_card;
use crate::errors::domain::ValidationKind;

/// Session whose deck starts with `top` followed by the rest of the catalog.
fn session_with_top(top: &[Card]) -> GameSession {
    let mut deck = top.to_vec();
    deck.extend(full_catalog().into_iter().filter(|c| !top.contains(c)));
    GameSession::from_deck(deck, ChaCha8Rng::seed_from_u64(7)).unwrap()
}

const KEEP_EXISTING: PlacementChoice = PlacementChoice::Duplicate(DuplicateChoice::KeepExisting);

#[test]
fn first_turn_of_round_one_starts_with_player_zero() {
    let session = GameSession::with_seed(42).unwrap();
    assert_eq!(session.current_round(), 1);
    assert_eq!(session.draft().pick_order, [0, 1, 0, 1]);
    assert_eq!(session.draft().revealed_cards.len(), 4);
    assert_eq!(session.deck().len(), CATALOG_SIZE - 4);
    assert_eq!(session.to_act(), Some(0));
}

#[test]
fn same_seed_deals_the_same_game() {
    let a = GameSession::with_seed(99).unwrap();
    let b = GameSession::with_seed(99).unwrap();
    assert_eq!(a.draft(), b.draft());
    assert_eq!(a.deck(), b.deck());
}

#[test]
fn last_picker_opens_the_next_turn() {
    // Four distinct values keep every placement on the default path.
    let top = [
        catalog_card(1, Color::Blue),
        catalog_card(2, Color::Blue),
        catalog_card(3, Color::Blue),
        catalog_card(4, Color::Blue),
    ];
    let mut session = session_with_top(&top);

    session.pick(0, top[0].id, None).unwrap();
    session.pick(1, top[1].id, None).unwrap();
    session.pick(0, top[2].id, None).unwrap();
    let result = session.pick(1, top[3].id, None).unwrap();

    assert_eq!(result.events.len(), 1);
    match &result.events[0] {
        GameEvent::TurnAdvanced {
            current_picker,
            draft,
        } => {
            assert_eq!(*current_picker, 1);
            assert_eq!(draft.pick_order, [1, 0, 1, 0]);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(session.last_picker(), Some(1));
    assert_eq!(session.player_turn_counts(), [1, 1]);
}

#[test]
fn duplicate_keep_existing_buries_the_new_card() {
    let red3 = catalog_card(3, Color::Red);
    let blue3 = catalog_card(3, Color::Blue);
    let green5 = catalog_card(5, Color::Green);
    let multi7 = catalog_card(7, Color::Multi);
    let mut session = session_with_top(&[red3, blue3, green5, multi7]);

    let first = session.pick(0, red3.id, None).unwrap();
    match first.outcome {
        PickOutcome::Placed {
            slot,
            face_up,
            validated_slot,
            ..
        } => {
            assert_eq!(slot, 2);
            assert!(face_up);
            assert_eq!(validated_slot, None);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(!session.grid(0).get(2).unwrap().validated);

    session.pick(1, green5.id, None).unwrap();

    let second = session.pick(0, blue3.id, None).unwrap();
    assert_eq!(
        second.outcome,
        PickOutcome::NeedsChoice {
            choice_kind: ChoiceKind::Duplicate,
            card: blue3,
        }
    );

    let resolved = session.resolve_choice(0, blue3.id, KEEP_EXISTING).unwrap();
    assert!(matches!(
        resolved.outcome,
        PickOutcome::Placed {
            slot: 2,
            validated_slot: Some(2),
            ..
        }
    ));
    let cell = session.grid(0).get(2).copied().unwrap();
    assert_eq!(cell.card, red3);
    assert!(cell.face_up);
    assert!(cell.validated);
    assert_eq!(cell.stacked_card, Some(blue3));
    assert_eq!(session.card_count(), CATALOG_SIZE);
}

#[test]
fn pending_choice_blocks_other_actions() {
    let red3 = catalog_card(3, Color::Red);
    let blue3 = catalog_card(3, Color::Blue);
    let green5 = catalog_card(5, Color::Green);
    let multi7 = catalog_card(7, Color::Multi);
    let mut session = session_with_top(&[red3, green5, blue3, multi7]);

    session.pick(0, red3.id, None).unwrap();
    session.pick(1, green5.id, None).unwrap();
    session.pick(0, blue3.id, None).unwrap();
    assert_eq!(session.to_act(), Some(0));

    let err = session.pick(1, multi7.id, None).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::ChoicePending));

    let err = session.resolve_choice(1, blue3.id, KEEP_EXISTING).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::WrongTurn));

    let err = session.resolve_choice(0, multi7.id, KEEP_EXISTING).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::CardNotFound));

    let err = session
        .resolve_choice(0, blue3.id, PlacementChoice::Slot(4))
        .unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::InvalidPlacementChoice));
    assert!(session.pending().is_some());

    let keep_new = PlacementChoice::Duplicate(DuplicateChoice::KeepNew);
    session.resolve_choice(0, blue3.id, keep_new).unwrap();
    let cell = session.grid(0).get(2).copied().unwrap();
    assert_eq!(cell.card, blue3);
    assert_eq!(cell.stacked_card, Some(red3));
    assert_eq!(session.to_act(), Some(1));
}

#[test]
fn supplying_the_choice_up_front_skips_the_round_trip() {
    let red3 = catalog_card(3, Color::Red);
    let blue3 = catalog_card(3, Color::Blue);
    let green5 = catalog_card(5, Color::Green);
    let multi7 = catalog_card(7, Color::Multi);
    let mut session = session_with_top(&[red3, green5, blue3, multi7]);

    session.pick(0, red3.id, None).unwrap();
    session.pick(1, green5.id, None).unwrap();
    let result = session.pick(0, blue3.id, Some(KEEP_EXISTING)).unwrap();
    assert!(matches!(result.outcome, PickOutcome::Placed { validated_slot: Some(2), .. }));
    assert!(session.pending().is_none());
}

#[test]
fn ineligible_pick_is_rejected_with_reason() {
    let red3 = catalog_card(3, Color::Red);
    let blue3 = catalog_card(3, Color::Blue);
    let green5 = catalog_card(5, Color::Green);
    let multi7 = catalog_card(7, Color::Multi);
    let mut session = session_with_top(&[red3, green5, blue3, multi7]);

    let mut slots: [Option<GridCell>; GRID_SIZE] = Default::default();
    slots[2] = Some(GridCell {
        validated: true,
        ..GridCell::face_up(catalog_card(3, Color::Yellow))
    });
    session.grids[0] = PlayerGrid::from_slots(slots);

    let err = session.pick(0, red3.id, None).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::IneligiblePick));
    assert!(err.to_string().contains("value_already_validated"));
    assert_eq!(session.draft().revealed_cards.len(), 4);
}

#[test]
fn already_validated_on_full_grid_is_discarded() {
    let red3 = catalog_card(3, Color::Red);
    let blue3 = catalog_card(3, Color::Blue);
    let yellow3 = catalog_card(3, Color::Yellow);
    let green3 = catalog_card(3, Color::Green);
    let mut session = session_with_top(&[red3, blue3, yellow3, green3]);

    // Full grid with a proven 3: every revealed card is a 3, so the pick is
    // allowed but has nowhere to go.
    let fillers: Vec<Card> = (1..=9)
        .filter(|&v| v != 3)
        .map(|v| catalog_card(v, Color::Green))
        .collect();
    let mut slots: [Option<GridCell>; GRID_SIZE] = Default::default();
    for card in &fillers {
        slots[card.natural_slot()] = Some(GridCell::face_up(*card));
    }
    let proven = catalog_card(3, Color::Multi);
    slots[2] = Some(GridCell {
        validated: true,
        ..GridCell::face_up(proven)
    });
    session.grids[0] = PlayerGrid::from_slots(slots);
    session.deck.retain(|c| !fillers.contains(c) && *c != proven);

    let result = session.pick(0, red3.id, None).unwrap();
    assert_eq!(
        result.outcome,
        PickOutcome::Discarded {
            card: red3,
            reason: DiscardReason::NoEmptySlot,
        }
    );
    assert_eq!(session.discard(), &[red3]);
    assert_eq!(session.to_act(), Some(1));
    assert_eq!(session.card_count(), CATALOG_SIZE);
}

#[test]
fn all_validated_turn_with_room_asks_for_a_slot() {
    let red3 = catalog_card(3, Color::Red);
    let blue3 = catalog_card(3, Color::Blue);
    let yellow3 = catalog_card(3, Color::Yellow);
    let green3 = catalog_card(3, Color::Green);
    let mut session = session_with_top(&[red3, blue3, yellow3, green3]);

    // Proven 3 on an otherwise empty grid: every revealed card is a 3, so
    // the restriction is waived and the pick goes face-down.
    let proven = catalog_card(3, Color::Multi);
    let mut slots: [Option<GridCell>; GRID_SIZE] = Default::default();
    slots[2] = Some(GridCell {
        validated: true,
        ..GridCell::face_up(proven)
    });
    session.grids[0] = PlayerGrid::from_slots(slots);
    session.deck.retain(|c| *c != proven);

    let picked = session.pick(0, red3.id, None).unwrap();
    assert_eq!(
        picked.outcome,
        PickOutcome::NeedsChoice {
            choice_kind: ChoiceKind::AlreadyValidated,
            card: red3,
        }
    );

    for bad in [PlacementChoice::Slot(2), PlacementChoice::Slot(9), KEEP_EXISTING] {
        let err = session.resolve_choice(0, red3.id, bad).unwrap_err();
        assert_eq!(err.kind(), Some(ValidationKind::InvalidPlacementChoice));
        assert!(session.pending().is_some());
    }

    let placed = session
        .resolve_choice(0, red3.id, PlacementChoice::Slot(6))
        .unwrap();
    assert_eq!(
        placed.outcome,
        PickOutcome::Placed {
            slot: 6,
            face_up: false,
            validated_slot: None,
            grid: session.grid(0).clone(),
        }
    );
    let cell = session.grid(0).get(6).copied().unwrap();
    assert_eq!(cell.card, red3);
    assert!(!cell.face_up);
    assert!(!cell.validated);

    // Next already-validated pick cannot reuse the slot just filled.
    session.pick(1, blue3.id, None).unwrap();
    let again = session.pick(0, yellow3.id, None).unwrap();
    assert!(again.outcome.needs_choice());
    let err = session
        .resolve_choice(0, yellow3.id, PlacementChoice::Slot(6))
        .unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::InvalidPlacementChoice));
    assert_eq!(session.grid(0).get(6).map(|c| c.card), Some(red3));
    assert_eq!(session.card_count(), CATALOG_SIZE);
}

#[test]
fn choice_on_default_placement_is_rejected_without_mutation() {
    let top = [
        catalog_card(1, Color::Blue),
        catalog_card(2, Color::Blue),
        catalog_card(3, Color::Blue),
        catalog_card(4, Color::Blue),
    ];
    let mut session = session_with_top(&top);

    let err = session
        .pick(0, top[0].id, Some(PlacementChoice::Slot(7)))
        .unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::InvalidPlacementChoice));
    assert_eq!(session.draft().revealed_cards.len(), 4);
    assert_eq!(session.grid(0).filled_count(), 0);
    assert_eq!(session.to_act(), Some(0));

    session.pick(0, top[0].id, None).unwrap();
    assert_eq!(session.grid(0).get(0).map(|c| c.card), Some(top[0]));
}

/// Player 0 holds eight face-up cards, values 2..=9; the revealed turn lets
/// them complete the grid on their first pick.
fn nearly_full_session() -> (GameSession, [Card; 4]) {
    let top = [
        catalog_card(1, Color::Red),
        catalog_card(4, Color::Yellow),
        catalog_card(6, Color::Yellow),
        catalog_card(8, Color::Yellow),
    ];
    let mut session = session_with_top(&top);
    let fillers: Vec<Card> = (2..=9).map(|v| catalog_card(v, Color::Blue)).collect();
    let mut slots: [Option<GridCell>; GRID_SIZE] = Default::default();
    for card in &fillers {
        slots[card.natural_slot()] = Some(GridCell::face_up(*card));
    }
    session.grids[0] = PlayerGrid::from_slots(slots);
    session.deck.retain(|c| !fillers.contains(c));
    (session, top)
}

#[test]
fn full_grid_mid_turn_waits_for_the_opponent() {
    let (mut session, [red1, yellow4, yellow6, yellow8]) = nearly_full_session();

    let filled = session.pick(0, red1.id, None).unwrap();
    assert!(session.grid(0).is_full());
    assert!(filled.events.is_empty());

    session.pick(1, yellow4.id, None).unwrap();
    let dup = session.pick(0, yellow6.id, Some(KEEP_EXISTING)).unwrap();
    assert!(dup.events.is_empty());
    assert_eq!(session.current_round(), 1);

    let last = session.pick(1, yellow8.id, None).unwrap();
    match last.events.as_slice() {
        [GameEvent::RoundComplete {
            round, next_round, ..
        }] => {
            assert_eq!(*round, 1);
            assert_eq!(*next_round, Some(2));
        }
        other => panic!("unexpected events {other:?}"),
    }

    assert_eq!(session.current_round(), 2);
    assert_eq!(session.player_turn_counts(), [0, 0]);
    assert_eq!(session.last_picker(), None);
    assert_eq!(session.draft().pick_order, [1, 0, 1, 0]);
    assert_eq!(session.grid(0).filled_count(), 0);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.card_count(), CATALOG_SIZE);
}

#[test]
fn unequal_turn_counts_keep_the_round_going() {
    let (mut session, [red1, yellow4, yellow6, yellow8]) = nearly_full_session();
    // Player 0 has finished one more turn than player 1.
    session.player_turn_counts = [3, 2];

    session.pick(0, red1.id, None).unwrap();
    session.pick(1, yellow4.id, None).unwrap();
    session.pick(0, yellow6.id, Some(KEEP_EXISTING)).unwrap();
    let last = session.pick(1, yellow8.id, None).unwrap();

    assert_eq!(session.player_turn_counts(), [4, 3]);
    assert!(matches!(last.events.as_slice(), [GameEvent::TurnAdvanced { .. }]));
    assert_eq!(session.current_round(), 1);

    // Next turn evens the counters and closes the round.
    session.player_turn_counts = [4, 4];
    let picks: Vec<(u8, u16)> = {
        let draft: &DraftState = session.draft();
        draft
            .pick_order
            .iter()
            .copied()
            .zip(draft.revealed_cards.iter().map(|c| c.id))
            .collect()
    };
    let mut events = Vec::new();
    for (player, card_id) in picks {
        let mut result = session.pick(player, card_id, None).unwrap();
        if let PickOutcome::NeedsChoice { choice_kind, card } = result.outcome {
            let choice = match choice_kind {
                ChoiceKind::Duplicate => KEEP_EXISTING,
                ChoiceKind::AlreadyValidated => {
                    PlacementChoice::Slot(session.grid(player).first_empty().unwrap() as u8)
                }
            };
            result = session.resolve_choice(player, card.id, choice).unwrap();
        }
        events.extend(result.events);
    }
    assert!(matches!(events.as_slice(), [GameEvent::RoundComplete { round: 1, .. }]));
}

#[test]
fn exhausted_deck_ends_the_round_early() {
    let top = [
        catalog_card(1, Color::Blue),
        catalog_card(2, Color::Blue),
        catalog_card(3, Color::Blue),
        catalog_card(4, Color::Blue),
    ];
    let mut session = session_with_top(&top);
    let stash: Vec<Card> = session.deck.drain(2..).collect();

    session.pick(0, top[0].id, None).unwrap();
    session.pick(1, top[1].id, None).unwrap();
    session.pick(0, top[2].id, None).unwrap();
    let result = session.pick(1, top[3].id, None).unwrap();

    assert!(matches!(
        result.events.as_slice(),
        [GameEvent::RoundComplete { round: 1, next_round: Some(2), .. }]
    ));
    assert_eq!(session.current_round(), 2);
    assert_eq!(session.card_count() + stash.len(), CATALOG_SIZE);
}

#[test]
fn third_round_finishes_the_game() {
    let (mut session, [red1, yellow4, yellow6, yellow8]) = nearly_full_session();
    session.current_round = 3;
    session.scores = [[10, 5, 0], [3, 20, 0]];

    session.pick(0, red1.id, None).unwrap();
    session.pick(1, yellow4.id, None).unwrap();
    session.pick(0, yellow6.id, Some(KEEP_EXISTING)).unwrap();
    let last = session.pick(1, yellow8.id, None).unwrap();

    let [GameEvent::RoundComplete { next_round: None, .. }, GameEvent::GameComplete {
        final_scores,
        winner,
    }] = last.events.as_slice()
    else {
        panic!("unexpected events {:?}", last.events);
    };
    assert_eq!(*final_scores, session.total_scores());
    assert_eq!(*winner, session.winner());
    assert_eq!(session.phase(), GamePhase::Finished);
    assert_eq!(session.to_act(), None);

    let err = session.pick(0, 1, None).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::PhaseMismatch));
}

#[test]
fn tied_totals_have_no_winner() {
    use crate::domain::session::winner_of;
    assert_eq!(winner_of([30, 30]), None);
    assert_eq!(winner_of([31, 30]), Some(0));
    assert_eq!(winner_of([-2, 4]), Some(1));
}

#[test]
fn abandoned_session_rejects_actions() {
    let mut session = GameSession::with_seed(1).unwrap();
    let card_id = session.draft().revealed_cards[0].id;
    session.abandon();
    assert_eq!(session.phase(), GamePhase::Abandoned);
    let err = session.pick(0, card_id, None).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::PhaseMismatch));
}

#[test]
fn unknown_seat_gets_the_spectator_view() {
    let session = GameSession::with_seed(42).unwrap();
    assert!(session.try_grid(2).is_none());

    let snapshot = GameSnapshot::of(&session, Some(5));
    assert_eq!(snapshot.viewer, None);
    assert!(snapshot.eligibility.is_empty());
    assert_eq!(snapshot, GameSnapshot::of(&session, None));

    let seated = GameSnapshot::of(&session, Some(0));
    assert_eq!(seated.viewer, Some(0));
    assert_eq!(seated.eligibility.len(), 4);
}
