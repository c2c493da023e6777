//! End-to-end shell sessions against a local mock order endpoint.

use std::io::Write as _;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use grocer_checkout::StorefrontConfig;
use grocer_core::InMemoryCatalog;
use grocer_storefront_lib::commands::{cart, checkout};
use grocer_storefront_lib::error::ErrorCode;
use grocer_storefront_lib::shell::run_shell;
use grocer_storefront_lib::state::Storefront;
use serde_json::{json, Value};
use tokio::net::TcpListener;

type Seen = Arc<Mutex<Vec<Value>>>;

#[derive(Clone)]
struct Mock {
    reply: (StatusCode, Value),
    seen: Seen,
}

async fn handle(State(mock): State<Mock>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    mock.seen.lock().expect("mock mutex poisoned").push(body);
    let (status, value) = mock.reply;
    (status, Json(value))
}

/// Starts a mock endpoint and returns its URL.
async fn start_mock(status: StatusCode, reply: Value) -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().route("/orders", post(handle)).with_state(Mock {
        reply: (status, reply),
        seen: seen.clone(),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/orders", addr), seen)
}

/// Loads a storefront whose config file points at `endpoint`.
fn storefront_for(endpoint: &str) -> Storefront {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "[store]\nname = \"Test Grocer\"\n\n[order]\nendpoint = \"{}\"\nrequest_timeout_secs = 5\n",
        endpoint
    )
    .unwrap();

    let config = StorefrontConfig::from_file(file.path()).unwrap();
    Storefront::new(config, InMemoryCatalog::sample()).unwrap()
}

async fn session(storefront: &Storefront, script: &str) -> String {
    let mut output = Vec::new();
    run_shell(storefront, script.as_bytes(), &mut output).await.unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_order_placed_clears_cart() {
    let (endpoint, seen) = start_mock(StatusCode::OK, json!({ "success": true, "order": { "id": 101 } })).await;
    let storefront = storefront_for(&endpoint);

    let text = session(
        &storefront,
        "add 1\nadd 1\nadd 5\nbill\ncity Pune\nnote avoid-bell\norder\ncart\nquit\n",
    )
    .await;

    assert!(text.starts_with("Test Grocer: 20 products."));
    assert!(text.contains("₹272"));
    assert!(text.contains("Order placed: ₹272 for 3 items"));
    assert!(text.ends_with("Thanks for shopping at Test Grocer.\n"));
    assert!(text.contains("Cart is empty"));
    assert!(storefront.cart.snapshot().lines.is_empty());

    let bodies = seen.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["total"], 27200);
    assert_eq!(body["paymentMethod"], "Google Pay UPI");
    assert_eq!(body["deliveryInfo"]["city"], "Pune");
    assert_eq!(body["deliveryInfo"]["instructions"], json!(["avoid-bell"]));
    assert_eq!(body["items"][0]["id"], "1");
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["items"][1]["name"], "Sugar");

    // City and notes are cleared for the next order, the payment label stays.
    let draft = checkout::get_checkout(&storefront.checkout);
    assert!(draft.city.is_empty());
    assert!(draft.instructions().is_empty());
    assert_eq!(draft.payment_method, "Google Pay UPI");
}

#[tokio::test]
async fn test_rejected_order_keeps_cart() {
    let (endpoint, seen) = start_mock(
        StatusCode::OK,
        json!({ "success": false, "message": "Store is closed" }),
    )
    .await;
    let storefront = storefront_for(&endpoint);

    let text = session(&storefront, "add 7\ncity Pune\norder\n").await;

    assert!(text.contains("Order not accepted: Store is closed"));
    assert_eq!(storefront.cart.snapshot().total_item_count, 1);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_server_error_keeps_cart() {
    let (endpoint, _seen) = start_mock(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" })).await;
    let storefront = storefront_for(&endpoint);

    cart::add_to_cart(&storefront.catalog, &storefront.cart, "2").unwrap();
    checkout::set_city(&storefront.checkout, "Mumbai").unwrap();

    let err = checkout::place_order(
        &storefront.config,
        &storefront.catalog,
        &storefront.cart,
        &storefront.checkout,
    )
    .await
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::OrderError);
    assert_eq!(storefront.cart.snapshot().total_item_count, 1);
    assert_eq!(checkout::get_checkout(&storefront.checkout).city, "Mumbai");
}

#[tokio::test]
async fn test_order_validation_never_reaches_endpoint() {
    let (endpoint, seen) = start_mock(StatusCode::OK, json!({ "success": true })).await;
    let storefront = storefront_for(&endpoint);

    let text = session(&storefront, "order\nadd 3\norder\n").await;

    assert!(text.contains("Cart is empty"));
    assert!(text.contains("city is required"));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_indicator_follows_cart() {
    let (endpoint, _seen) = start_mock(StatusCode::OK, json!({ "success": true })).await;
    let storefront = storefront_for(&endpoint);
    let mut updates = storefront.cart.subscribe();

    session(&storefront, "add 4\n").await;
    assert!(updates.borrow_and_update().indicator_visible);

    session(&storefront, "hide\ncart\n").await;
    assert!(!updates.borrow_and_update().indicator_visible);

    session(&storefront, "add 4\ndec 4\ndec 4\n").await;
    let snapshot = updates.borrow_and_update().clone();
    assert!(!snapshot.indicator_visible);
    assert_eq!(snapshot.total_item_count, 0);
}
