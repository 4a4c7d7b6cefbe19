//! Property-based tests for move planning
//!
//! Arbitrary sequences of card and list moves applied to a snapshot must
//! keep every sibling sequence numbered `0..n`, lose no cards, and send a
//! batch that matches the committed state exactly.

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use boardflow::client::store::{BoardSnapshot, CardMove, ListMove, MoveCommand, MovePlan};
use boardflow::shared::{BatchOrderRequest, Card, EntityKind, List, ListWithCards};

fn board(card_counts: &[usize]) -> BoardSnapshot {
    let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let mut next_card = 1000;
    let lists = card_counts
        .iter()
        .enumerate()
        .map(|(position, &count)| {
            let list_id = position as i64 + 1;
            let cards = (0..count)
                .map(|index| {
                    next_card += 1;
                    Card {
                        id: next_card,
                        title: format!("card {}", next_card),
                        description: None,
                        order: index as i64,
                        list_id,
                        created_at: at,
                        updated_at: at,
                    }
                })
                .collect();
            ListWithCards {
                list: List {
                    id: list_id,
                    title: format!("list {}", list_id),
                    order: position as i64,
                    board_id: 1,
                    created_at: at,
                    updated_at: at,
                },
                cards,
            }
        })
        .collect();
    BoardSnapshot::from_lists(lists)
}

#[derive(Debug, Clone)]
enum Gesture {
    Card { source: usize, card: usize, dest: usize, index: usize },
    List { source: usize, index: usize },
}

fn gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        (0..8usize, 0..8usize, 0..8usize, 0..10usize)
            .prop_map(|(source, card, dest, index)| Gesture::Card { source, card, dest, index }),
        (0..8usize, 0..8usize).prop_map(|(source, index)| Gesture::List { source, index }),
    ]
}

/// Resolve a gesture against the current snapshot, like the drag layer would
fn command(snapshot: &BoardSnapshot, gesture: &Gesture) -> Option<MoveCommand> {
    let lists = snapshot.lists();
    match *gesture {
        Gesture::Card { source, card, dest, index } => {
            let source_list = &lists[source % lists.len()];
            let cards = snapshot.cards(source_list.id)?;
            if cards.is_empty() {
                return None;
            }
            let source_index = card % cards.len();
            Some(MoveCommand::Card(CardMove {
                card_id: cards[source_index].id,
                source_list_id: source_list.id,
                dest_list_id: lists[dest % lists.len()].id,
                source_index,
                dest_index: index,
            }))
        }
        Gesture::List { source, index } => {
            let source_index = source % lists.len();
            Some(MoveCommand::List(ListMove {
                list_id: lists[source_index].id,
                source_index,
                dest_index: index,
            }))
        }
    }
}

fn all_cards(snapshot: &BoardSnapshot) -> HashSet<i64> {
    snapshot
        .lists()
        .iter()
        .flat_map(|l| snapshot.cards(l.id).unwrap_or_default().iter().map(|c| c.id))
        .collect()
}

fn assert_consistent(snapshot: &BoardSnapshot) -> Result<(), TestCaseError> {
    for (index, list) in snapshot.lists().iter().enumerate() {
        prop_assert_eq!(list.order, index as i64);
        let cards = snapshot.cards(list.id).unwrap_or_default();
        for (index, card) in cards.iter().enumerate() {
            prop_assert_eq!(card.order, index as i64);
            prop_assert_eq!(card.list_id, list.id);
        }
    }
    Ok(())
}

/// Every batch item must equal the committed position of its entity
fn assert_batch_matches(snapshot: &BoardSnapshot, request: &BatchOrderRequest) -> Result<(), TestCaseError> {
    prop_assert!(request.validate().is_ok());
    for item in &request.items {
        match request.kind {
            EntityKind::List => {
                let index = snapshot.list_index(item.id);
                prop_assert_eq!(index.map(|i| i as i64), Some(item.order));
            }
            EntityKind::Card => {
                let located = snapshot.locate_card(item.id);
                prop_assert_eq!(located.map(|(l, i)| (Some(l), i as i64)), Some((item.list_id, item.order)));
            }
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_moves_keep_siblings_contiguous(
        card_counts in prop::collection::vec(0..6usize, 1..5),
        gestures in prop::collection::vec(gesture(), 1..30),
    ) {
        let mut snapshot = board(&card_counts);
        let cards = all_cards(&snapshot);

        for gesture in &gestures {
            let Some(command) = command(&snapshot, gesture) else { continue };
            match snapshot.apply(&command) {
                MovePlan::Apply { snapshot: next, request } => {
                    assert_batch_matches(&next, &request)?;
                    snapshot = next;
                }
                MovePlan::Noop => {}
                MovePlan::Stale => prop_assert!(false, "fresh command reported stale: {:?}", command),
            }
            assert_consistent(&snapshot)?;
        }

        prop_assert_eq!(all_cards(&snapshot), cards);
    }

    #[test]
    fn test_noop_moves_change_nothing(
        card_counts in prop::collection::vec(1..6usize, 1..4),
        list in 0..4usize,
        card in 0..6usize,
    ) {
        let snapshot = board(&card_counts);
        let list_id = snapshot.lists()[list % card_counts.len()].id;
        let cards = snapshot.cards(list_id).unwrap();
        let index = card % cards.len();

        let command = MoveCommand::Card(CardMove {
            card_id: cards[index].id,
            source_list_id: list_id,
            dest_list_id: list_id,
            source_index: index,
            dest_index: index,
        });
        prop_assert_eq!(snapshot.apply(&command), MovePlan::Noop);
    }

    #[test]
    fn test_unknown_card_is_stale(card_counts in prop::collection::vec(0..6usize, 1..4), id in 1..1000i64) {
        let snapshot = board(&card_counts);
        let list_id = snapshot.lists()[0].id;
        let command = MoveCommand::Card(CardMove {
            card_id: id,
            source_list_id: list_id,
            dest_list_id: list_id,
            source_index: 0,
            dest_index: 0,
        });
        prop_assert_eq!(snapshot.apply(&command), MovePlan::Stale);
    }
}
