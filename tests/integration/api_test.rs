//! Board API integration tests
//!
//! Drives the router with `axum-test` over an in-memory database.

use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use boardflow::backend::server::build_app;
use boardflow::shared::{AuditAction, AuditEntity, AuditLog, BatchOrderResponse, Board, Card, List, ListWithCards};

use crate::common::{TestApp, WithIdentity, ORG_ID, OTHER_ORG_ID};

async fn create_board(app: &TestApp, title: &str) -> Board {
    let response = app.server.post("/api/boards").as_org(ORG_ID).json(&json!({ "title": title })).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn create_list(app: &TestApp, board_id: i64, title: &str) -> List {
    let response = app
        .server
        .post(&format!("/api/boards/{}/lists", board_id))
        .as_org(ORG_ID)
        .json(&json!({ "title": title }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn create_card(app: &TestApp, list_id: i64, title: &str) -> Card {
    let response = app
        .server
        .post(&format!("/api/lists/{}/cards", list_id))
        .as_org(ORG_ID)
        .json(&json!({ "title": title }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn lists_with_cards(app: &TestApp, board_id: i64) -> Vec<ListWithCards> {
    let response = app
        .server
        .get(&format!("/api/boards/{}/lists", board_id))
        .as_org(ORG_ID)
        .await;
    response.assert_status_ok();
    response.json()
}

/// Audit writes are fire-and-forget; poll until `expected` entries exist
async fn wait_for_audit(app: &TestApp, expected: usize) -> Vec<AuditLog> {
    for _ in 0..50 {
        let entries: Vec<AuditLog> = app.server.get("/api/audit?limit=100").as_org(ORG_ID).await.json();
        if entries.len() >= expected {
            return entries;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("audit log never reached {} entries", expected);
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/boards").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn test_create_appends_in_order() {
    let app = TestApp::new().await;
    let board = create_board(&app, "Roadmap").await;

    let todo = create_list(&app, board.id, "Todo").await;
    let done = create_list(&app, board.id, "Done").await;
    assert_eq!((todo.order, done.order), (1, 2));

    let first = create_card(&app, todo.id, "first").await;
    let second = create_card(&app, todo.id, "second").await;
    assert_eq!((first.order, second.order), (1, 2));

    let lists = lists_with_cards(&app, board.id).await;
    let titles: Vec<_> = lists.iter().map(|l| l.list.title.as_str()).collect();
    assert_eq!(titles, vec!["Todo", "Done"]);
    let cards: Vec<_> = lists[0].cards.iter().map(|c| c.id).collect();
    assert_eq!(cards, vec![first.id, second.id]);
}

#[tokio::test]
async fn test_blank_title_is_rejected() {
    let app = TestApp::new().await;
    let response = app.server.post("/api/boards").as_org(ORG_ID).json(&json!({ "title": "  " })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_foreign_board_is_not_found() {
    let app = TestApp::new().await;
    let board = create_board(&app, "Roadmap").await;
    let list = create_list(&app, board.id, "Todo").await;

    app.server
        .get(&format!("/api/boards/{}", board.id))
        .as_org(OTHER_ORG_ID)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .put(&format!("/api/boards/{}/order", board.id))
        .as_org(OTHER_ORG_ID)
        .json(&json!({ "kind": "list", "items": [{ "id": list.id, "order": 0 }] }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .post(&format!("/api/lists/{}/cards", list.id))
        .as_org(OTHER_ORG_ID)
        .json(&json!({ "title": "sneaky" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_batch_reorders_lists() {
    let app = TestApp::new().await;
    let board = create_board(&app, "Roadmap").await;
    let l1 = create_list(&app, board.id, "L1").await;
    let l2 = create_list(&app, board.id, "L2").await;
    let l3 = create_list(&app, board.id, "L3").await;

    let response = app
        .server
        .put(&format!("/api/boards/{}/order", board.id))
        .as_org(ORG_ID)
        .json(&json!({
            "kind": "list",
            "items": [
                { "id": l3.id, "title": "L3", "order": 0 },
                { "id": l1.id, "title": "L1", "order": 1 },
                { "id": l2.id, "title": "L2", "order": 2 },
            ]
        }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<BatchOrderResponse>(), BatchOrderResponse { success: true, count: 3 });

    let lists = lists_with_cards(&app, board.id).await;
    let order: Vec<_> = lists.iter().map(|l| (l.list.id, l.list.order)).collect();
    assert_eq!(order, vec![(l3.id, 0), (l1.id, 1), (l2.id, 2)]);
}

#[tokio::test]
async fn test_batch_moves_card_between_lists() {
    let app = TestApp::new().await;
    let board = create_board(&app, "Roadmap").await;
    let a = create_list(&app, board.id, "A").await;
    let b = create_list(&app, board.id, "B").await;
    let x = create_card(&app, a.id, "X").await;
    let y = create_card(&app, a.id, "Y").await;
    let z = create_card(&app, b.id, "Z").await;

    app.server
        .put(&format!("/api/boards/{}/order", board.id))
        .as_org(ORG_ID)
        .json(&json!({
            "kind": "card",
            "items": [
                { "id": y.id, "order": 0, "listId": a.id },
                { "id": z.id, "order": 0, "listId": b.id },
                { "id": x.id, "order": 1, "listId": b.id },
            ]
        }))
        .await
        .assert_status_ok();

    let lists = lists_with_cards(&app, board.id).await;
    let in_a: Vec<_> = lists[0].cards.iter().map(|c| (c.id, c.order)).collect();
    let in_b: Vec<_> = lists[1].cards.iter().map(|c| (c.id, c.order, c.list_id)).collect();
    assert_eq!(in_a, vec![(y.id, 0)]);
    assert_eq!(in_b, vec![(z.id, 0, b.id), (x.id, 1, b.id)]);
}

#[tokio::test]
async fn test_invalid_batches() {
    let app = TestApp::new().await;
    let board = create_board(&app, "Roadmap").await;
    let list = create_list(&app, board.id, "Todo").await;
    let card = create_card(&app, list.id, "card").await;
    let path = format!("/api/boards/{}/order", board.id);

    app.server
        .put(&path)
        .as_org(ORG_ID)
        .json(&json!({ "kind": "card", "items": [] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    app.server
        .put(&path)
        .as_org(ORG_ID)
        .json(&json!({ "kind": "card", "items": [{ "id": card.id, "order": -1 }] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // the valid first item must not survive the failing second one
    app.server
        .put(&path)
        .as_org(ORG_ID)
        .json(&json!({
            "kind": "card",
            "items": [
                { "id": card.id, "order": 0 },
                { "id": card.id + 1000, "order": 1 },
            ]
        }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let lists = lists_with_cards(&app, board.id).await;
    assert_eq!(lists[0].cards[0].order, 1);
}

#[tokio::test]
async fn test_copy_list() {
    let app = TestApp::new().await;
    let board = create_board(&app, "Roadmap").await;
    let list = create_list(&app, board.id, "Todo").await;
    create_card(&app, list.id, "a").await;
    create_card(&app, list.id, "b").await;

    let response = app
        .server
        .post(&format!("/api/lists/{}/copy", list.id))
        .as_org(ORG_ID)
        .await;
    response.assert_status(StatusCode::CREATED);

    let copy: ListWithCards = response.json();
    assert_eq!(copy.list.title, "Todo - Copy");
    assert_eq!(copy.list.order, 2);
    let cards: Vec<_> = copy.cards.iter().map(|c| (c.title.as_str(), c.order)).collect();
    assert_eq!(cards, vec![("a", 0), ("b", 1)]);
}

#[tokio::test]
async fn test_mutations_are_audited_but_reorders_are_not() {
    let app = TestApp::new().await;
    let board = create_board(&app, "Roadmap").await;
    let list = create_list(&app, board.id, "Todo").await;
    let card = create_card(&app, list.id, "card").await;

    app.server
        .patch(&format!("/api/cards/{}", card.id))
        .as_org(ORG_ID)
        .json(&json!({ "title": "renamed" }))
        .await
        .assert_status_ok();

    let entries = wait_for_audit(&app, 4).await;
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].action, AuditAction::Update);
    assert_eq!(entries[0].entity_type, AuditEntity::Card);
    assert_eq!(entries[0].entity_title, "renamed");

    app.server
        .put(&format!("/api/boards/{}/order", board.id))
        .as_org(ORG_ID)
        .json(&json!({ "kind": "list", "items": [{ "id": list.id, "order": 0 }] }))
        .await
        .assert_status_ok();

    let history: Vec<AuditLog> = app
        .server
        .get(&format!("/api/cards/{}/audit", card.id))
        .as_org(ORG_ID)
        .await
        .json();
    let actions: Vec<_> = history.iter().map(|e| e.action).collect();
    assert_eq!(actions, vec![AuditAction::Update, AuditAction::Create]);

    tokio::time::sleep(Duration::from_millis(50)).await;
    let entries: Vec<AuditLog> = app.server.get("/api/audit").as_org(ORG_ID).await.json();
    assert_eq!(entries.len(), 4);
}

#[tokio::test]
async fn test_delete_board_cascades() {
    let app = TestApp::new().await;
    let board = create_board(&app, "Roadmap").await;
    let list = create_list(&app, board.id, "Todo").await;
    let card = create_card(&app, list.id, "card").await;

    app.server
        .delete(&format!("/api/boards/{}", board.id))
        .as_org(ORG_ID)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .patch(&format!("/api/cards/{}", card.id))
        .as_org(ORG_ID)
        .json(&json!({ "title": "gone" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_without_database() {
    let server = TestServer::new(build_app(None)).unwrap();
    server
        .get("/api/boards")
        .as_org(ORG_ID)
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;
    app.server.get("/nope").await.assert_status(StatusCode::NOT_FOUND);
}
