use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use storefront_orders::api::{router, AppState};
use storefront_orders::config::AppConfig;
use tower::ServiceExt;

async fn post(path: &str, body: Value) -> (StatusCode, Value) {
    let app = router(AppState::new(AppConfig::default()));
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

fn completed_session() -> Value {
    json!({
        "id": "cs_test_abc123",
        "object": "checkout.session",
        "payment_intent": "pi_xyz789",
        "payment_status": "paid",
        "amount_subtotal": 5000,
        "amount_total": 5595,
        "shipping_cost": { "amount_subtotal": 595, "amount_total": 595 },
        "collected_information": {
            "shipping_details": {
                "name": "Shipping Name",
                "address": { "line1": "1 Dock Rd", "line2": "Unit 4", "city": "Austin", "state": "TX", "postal_code": "78701", "country": "US" }
            }
        },
        "shipping_details": null,
        "customer_details": {
            "email": "test@example.com",
            "name": "Test User",
            "phone": null,
            "address": { "line1": "100 Test Lane", "line2": null, "city": "Testville", "state": "TX", "postal_code": "00000", "country": "US" }
        }
    })
}

#[tokio::test]
async fn health() {
    let app = router(AppState::new(AppConfig::default()));
    let res = app.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn normalize_stripe_shaped_session() {
    let (status, order) = post(
        "/api/v1/orders/normalize",
        json!({
            "session": completed_session(),
            "line_items": [
                { "id": "li_1", "object": "item", "description": "Test Product", "quantity": 2, "price": { "id": "price_1", "unit_amount": 2500 }, "amount_total": 5000 }
            ],
            "customer_id": "cust_123"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["stripe_session_id"], "cs_test_abc123");
    assert_eq!(order["stripe_payment_intent"], "pi_xyz789");
    assert_eq!(order["customer_id"], "cust_123");
    assert_eq!(order["customer_email"], "test@example.com");
    assert_eq!(order["customer_name"], "Shipping Name");
    assert_eq!(order["shipping_address"]["line1"], "1 Dock Rd");
    assert_eq!(order["shipping_address"]["line2"], "Unit 4");
    assert_eq!(order["subtotal"], json!(50.0));
    assert_eq!(order["shipping"], json!(5.95));
    assert_eq!(order["total"], json!(55.95));
    assert_eq!(order["status"], "paid");
    assert_eq!(
        order["line_items"],
        json!([{ "description": "Test Product", "quantity": 2, "unit_price": 25.0, "total": 50.0 }])
    );
}

#[tokio::test]
async fn normalize_without_customer_id_yields_null() {
    let (status, order) = post("/api/v1/orders/normalize", json!({ "session": completed_session(), "line_items": [] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["customer_id"], Value::Null);
    assert_eq!(order["line_items"], json!([]));
}

#[tokio::test]
async fn normalize_rejects_empty_session_id() {
    let mut session = completed_session();
    session["id"] = json!("");
    let (status, _) = post("/api/v1/orders/normalize", json!({ "session": session })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn normalize_rejects_session_missing_payment_intent() {
    let (status, body) = post("/api/v1/orders/normalize", json!({ "session": { "id": "cs_1" } })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.as_str().unwrap_or_default().contains("payment_intent"));
}

#[tokio::test]
async fn normalize_accepts_null_line_total() {
    let (status, order) = post(
        "/api/v1/orders/normalize",
        json!({
            "session": completed_session(),
            "line_items": [{ "description": "Gift", "quantity": 1, "price": null, "amount_total": null }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["line_items"][0]["total"], json!(0.0));
}

#[tokio::test]
async fn update_rejects_unknown_status() {
    let (status, _) = post(
        "/api/v1/orders/update",
        json!({ "orderId": "ord_1", "status": "lost", "currentStatus": "paid" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn shipping_quote_boundary() {
    let (_, free) = post("/api/v1/shipping/quote", json!({ "subtotal_cents": 9900 })).await;
    assert_eq!(free["free"], true);
    assert_eq!(free["amount_cents"], 0);

    let (_, standard) = post("/api/v1/shipping/quote", json!({ "subtotal_cents": 9899 })).await;
    assert_eq!(standard["display_name"], "Standard shipping");
    assert_eq!(standard["amount_cents"], 595);
}

#[tokio::test]
async fn update_adds_tracking() {
    let (status, update) = post(
        "/api/v1/orders/update",
        json!({ "orderId": "ord_1", "status": "shipped", "trackingNumber": "9400111", "currentStatus": "paid" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(update["status"], "shipped");
    assert_eq!(update["tracking_carrier"], "USPS");
    assert!(update["shipped_at"].is_string());
    assert!(update.get("delivered_at").is_none());
}

#[tokio::test]
async fn update_rejects_illegal_transition() {
    let (status, _) = post(
        "/api/v1/orders/update",
        json!({ "orderId": "ord_1", "status": "cancelled", "currentStatus": "delivered" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = post("/api/v1/orders/update", json!({ "status": "processing", "currentStatus": "paid" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard() {
    let (status, stats) = post(
        "/api/v1/dashboard/stats",
        json!([
            { "total": 55.95, "status": "paid" },
            { "total": 10.0, "status": "delivered" }
        ]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_orders"], 2);
    assert_eq!(stats["pending_orders"], 1);
}
