//! Optimistic store against a real database
//!
//! The store talks to the server's own service functions through
//! `PoolBackend`, so every settled move is checked against what was
//! actually persisted.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;

use boardflow::backend::board::db;
use boardflow::client::{
    BoardSession, BoardSnapshot, BoardStore, CardMove, Dispatch, DropCandidate, ListMove, MoveOutcome, MovePhase,
    NoticeLevel,
};
use boardflow::shared::{BoardId, ListWithCards};

use crate::common::{create_test_pool, positions, PoolBackend, ORG_ID};
use crate::{assert_contiguous, assert_ok};

async fn persisted(backend: &PoolBackend, board_id: BoardId) -> Vec<ListWithCards> {
    assert_ok!(db::get_lists_with_cards(&backend.pool, ORG_ID, board_id).await).unwrap()
}

fn card_ids(lists: &[ListWithCards], position: usize) -> Vec<(i64, i64)> {
    lists[position].cards.iter().map(|c| (c.id, c.order)).collect()
}

#[tokio::test]
async fn test_single_list_reorder() {
    let pool = create_test_pool().await;
    let board = db::create_board(&pool, ORG_ID, "Roadmap").await.unwrap();
    let list = db::insert_list(&pool, board.id, "L", 0).await.unwrap();
    let a = db::insert_card(&pool, list.id, "A", None, 0).await.unwrap();
    let b = db::insert_card(&pool, list.id, "B", None, 1).await.unwrap();
    let c = db::insert_card(&pool, list.id, "C", None, 2).await.unwrap();

    let backend = Arc::new(PoolBackend::new(pool, ORG_ID));
    let store = BoardStore::load(backend.clone(), board.id).await.unwrap();

    let outcome = store
        .move_card(CardMove {
            card_id: b.id,
            source_list_id: list.id,
            dest_list_id: list.id,
            source_index: 1,
            dest_index: 0,
        })
        .await;

    assert_eq!(outcome, MoveOutcome::Settled { count: 3 });
    let expected = vec![(b.id, 0), (a.id, 1), (c.id, 2)];
    assert_eq!(card_ids(&store.snapshot().await.to_lists_with_cards(), 0), expected);
    assert_eq!(card_ids(&persisted(&backend, board.id).await, 0), expected);
}

#[tokio::test]
async fn test_cross_list_move() {
    let pool = create_test_pool().await;
    let board = db::create_board(&pool, ORG_ID, "Roadmap").await.unwrap();
    let list_a = db::insert_list(&pool, board.id, "A", 0).await.unwrap();
    let list_b = db::insert_list(&pool, board.id, "B", 1).await.unwrap();
    let x = db::insert_card(&pool, list_a.id, "X", None, 0).await.unwrap();
    let y = db::insert_card(&pool, list_a.id, "Y", None, 1).await.unwrap();
    let z = db::insert_card(&pool, list_b.id, "Z", None, 0).await.unwrap();

    let backend = Arc::new(PoolBackend::new(pool, ORG_ID));
    let store = BoardStore::load(backend.clone(), board.id).await.unwrap();

    let outcome = store
        .move_card(CardMove {
            card_id: x.id,
            source_list_id: list_a.id,
            dest_list_id: list_b.id,
            source_index: 0,
            dest_index: 1,
        })
        .await;

    // Y, Z and X only
    assert_eq!(outcome, MoveOutcome::Settled { count: 3 });

    let lists = persisted(&backend, board.id).await;
    assert_eq!(card_ids(&lists, 0), vec![(y.id, 0)]);
    assert_eq!(card_ids(&lists, 1), vec![(z.id, 0), (x.id, 1)]);
    assert_eq!(lists[1].cards[1].list_id, list_b.id);
    assert_eq!(positions(&store.snapshot().await.to_lists_with_cards()), positions(&lists));
}

#[tokio::test]
async fn test_list_reorder() {
    let pool = create_test_pool().await;
    let board = db::create_board(&pool, ORG_ID, "Roadmap").await.unwrap();
    let l1 = db::insert_list(&pool, board.id, "L1", 0).await.unwrap();
    let l2 = db::insert_list(&pool, board.id, "L2", 1).await.unwrap();
    let l3 = db::insert_list(&pool, board.id, "L3", 2).await.unwrap();

    let backend = Arc::new(PoolBackend::new(pool, ORG_ID));
    let store = BoardStore::load(backend.clone(), board.id).await.unwrap();

    let outcome = store
        .move_list(ListMove {
            list_id: l3.id,
            source_index: 2,
            dest_index: 0,
        })
        .await;
    assert_eq!(outcome, MoveOutcome::Settled { count: 3 });

    let lists: Vec<_> = persisted(&backend, board.id)
        .await
        .iter()
        .map(|l| (l.list.id, l.list.order))
        .collect();
    assert_eq!(lists, vec![(l3.id, 0), (l1.id, 1), (l2.id, 2)]);
}

#[tokio::test]
async fn test_append_then_reorder_normalizes() {
    let pool = create_test_pool().await;
    let board = db::create_board(&pool, ORG_ID, "Roadmap").await.unwrap();
    let list = db::insert_list(&pool, board.id, "L", 0).await.unwrap();
    db::insert_card(&pool, list.id, "old", None, 4).await.unwrap();

    let fresh = db::create_card(&pool, list.id, "new", None).await.unwrap();
    assert_eq!(fresh.order, 5);

    let backend = Arc::new(PoolBackend::new(pool, ORG_ID));
    let store = BoardStore::load(backend.clone(), board.id).await.unwrap();
    store
        .move_card(CardMove {
            card_id: fresh.id,
            source_list_id: list.id,
            dest_list_id: list.id,
            source_index: 1,
            dest_index: 0,
        })
        .await;

    let lists = persisted(&backend, board.id).await;
    assert_contiguous!(lists[0].cards);
    assert_eq!(lists[0].cards[0].id, fresh.id);
}

#[tokio::test]
async fn test_rollback_matches_fresh_fetch() {
    let pool = create_test_pool().await;
    let board = db::create_board(&pool, ORG_ID, "Roadmap").await.unwrap();
    let a = db::insert_list(&pool, board.id, "A", 0).await.unwrap();
    let b = db::insert_list(&pool, board.id, "B", 1).await.unwrap();
    let x = db::insert_card(&pool, a.id, "X", None, 0).await.unwrap();
    db::insert_card(&pool, b.id, "Z", None, 0).await.unwrap();

    let backend = Arc::new(PoolBackend::new(pool, ORG_ID));
    let store = BoardStore::load(backend.clone(), board.id).await.unwrap();
    backend.fail_batch.store(true, Ordering::SeqCst);

    let outcome = store
        .move_card(CardMove {
            card_id: x.id,
            source_list_id: a.id,
            dest_list_id: b.id,
            source_index: 0,
            dest_index: 0,
        })
        .await;

    assert!(matches!(outcome, MoveOutcome::RolledBack { .. }));
    assert_eq!(store.phase().await, MovePhase::RolledBack);
    assert_eq!(
        store.snapshot().await,
        BoardSnapshot::from_lists(persisted(&backend, board.id).await)
    );

    let notices = store.drain_notices().await;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_drag_session_end_to_end() {
    let pool = create_test_pool().await;
    let board = db::create_board(&pool, ORG_ID, "Roadmap").await.unwrap();
    let a = db::insert_list(&pool, board.id, "A", 0).await.unwrap();
    let b = db::insert_list(&pool, board.id, "B", 1).await.unwrap();
    let x = db::insert_card(&pool, a.id, "X", None, 0).await.unwrap();
    let y = db::insert_card(&pool, a.id, "Y", None, 1).await.unwrap();
    let z = db::insert_card(&pool, b.id, "Z", None, 0).await.unwrap();

    let backend = Arc::new(PoolBackend::new(pool, ORG_ID));
    let mut session = BoardSession::open(backend.clone(), board.id).await.unwrap();

    session.drag().drag_start(&json!({ "kind": "card", "id": x.id }));

    // hovering list B moves X there live
    let over_b = [
        DropCandidate::new(json!({ "kind": "board", "id": board.id }), 0),
        DropCandidate::new(json!({ "kind": "list", "id": b.id }), 1),
    ];
    assert_eq!(session.drag().drag_over(&over_b).await.settled().await, MoveOutcome::Settled { count: 3 });
    assert_eq!(session.snapshot().await.locate_card(x.id), Some((b.id, 1)));

    // dropping onto Z places X before it
    let over_z = [
        DropCandidate::new(json!({ "kind": "list", "id": b.id }), 1),
        DropCandidate::new(json!({ "kind": "card", "id": z.id }), 2),
    ];
    assert_eq!(session.drag().drag_end(&over_z).await.settled().await, MoveOutcome::Settled { count: 2 });
    assert!(session.drag().active().is_none());

    let lists = persisted(&backend, board.id).await;
    assert_eq!(card_ids(&lists, 0), vec![(y.id, 0)]);
    assert_eq!(card_ids(&lists, 1), vec![(x.id, 0), (z.id, 1)]);
    assert_eq!(backend.batch_calls(), 2);
}

#[tokio::test]
async fn test_cancelled_and_malformed_drags_do_nothing() {
    let pool = create_test_pool().await;
    let board = db::create_board(&pool, ORG_ID, "Roadmap").await.unwrap();
    let a = db::insert_list(&pool, board.id, "A", 0).await.unwrap();
    let b = db::insert_list(&pool, board.id, "B", 1).await.unwrap();
    let x = db::insert_card(&pool, a.id, "X", None, 0).await.unwrap();

    let backend = Arc::new(PoolBackend::new(pool, ORG_ID));
    let mut session = BoardSession::open(backend.clone(), board.id).await.unwrap();
    let before = session.snapshot().await;
    let over_b = [DropCandidate::new(json!({ "kind": "list", "id": b.id }), 1)];

    session.drag().drag_start(&json!({ "kind": "card", "id": x.id }));
    session.drag().drag_cancel();
    assert!(matches!(session.drag().drag_end(&over_b).await, Dispatch::Noop));

    assert!(session.drag().drag_start(&json!({ "kind": "card" })).is_none());
    assert!(matches!(session.drag().drag_over(&over_b).await, Dispatch::Noop));

    assert_eq!(session.snapshot().await, before);
    assert_eq!(backend.batch_calls(), 0);
}
