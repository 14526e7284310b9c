//! HTTP adapter over the order normalizer

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::config::AppConfig;
use crate::domain::aggregates::{build_order_data, OrderData, OrderStatus, OrderUpdate, OrderUpdateRequest};
use crate::domain::checkout::{CheckoutSession, LineItem};
use crate::domain::dashboard::{DashboardStats, OrderSummary};
use crate::domain::shipping::ShippingQuote;
use crate::StorefrontError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self { Self { config: Arc::new(config) } }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "storefront-orders"})) }))
        .route("/api/v1/orders/normalize", post(normalize_order))
        .route("/api/v1/orders/update", post(update_order))
        .route("/api/v1/shipping/quote", post(quote_shipping))
        .route("/api/v1/dashboard/stats", post(dashboard_stats))
        .with_state(state)
}

fn reject(e: StorefrontError) -> (StatusCode, String) {
    let status = match e {
        StorefrontError::InvalidTransition { .. } => StatusCode::CONFLICT,
        StorefrontError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    tracing::warn!(error = %e, status = %status, "request rejected");
    (status, e.to_string())
}

/// Decode a body into `T`; shape errors surface as 400 rather than axum's 422.
fn decode<T: DeserializeOwned>(body: Value) -> Result<T, (StatusCode, String)> {
    serde_json::from_value(body).map_err(|e| reject(StorefrontError::InvalidPayload(e)))
}

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub session: CheckoutSession,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub customer_id: Option<String>,
}

async fn normalize_order(Json(body): Json<Value>) -> Result<Json<OrderData>, (StatusCode, String)> {
    let r: NormalizeRequest = decode(body)?;
    r.session.ensure_valid().map_err(reject)?;
    let order = build_order_data(&r.session, &r.line_items, r.customer_id);
    tracing::info!(
        session_id = %order.stripe_session_id,
        email = order.customer_email.as_deref().unwrap_or("-"),
        items = order.line_items.len(),
        total = order.total,
        "order normalized"
    );
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderBody {
    #[serde(flatten)]
    pub request: OrderUpdateRequest,
    pub current_status: OrderStatus,
}

async fn update_order(State(s): State<AppState>, Json(body): Json<Value>) -> Result<Json<OrderUpdate>, (StatusCode, String)> {
    let r: UpdateOrderBody = decode(body)?;
    let mut update = OrderUpdate::plan_with_carrier(r.request, r.current_status, Utc::now(), &s.config.default_carrier).map_err(reject)?;
    for event in update.take_events() {
        tracing::info!(?event, "order event");
    }
    Ok(Json(update))
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub subtotal_cents: i64,
}

async fn quote_shipping(State(s): State<AppState>, Json(body): Json<Value>) -> Result<Json<ShippingQuote>, (StatusCode, String)> {
    let r: QuoteRequest = decode(body)?;
    let quote = ShippingQuote::for_subtotal(r.subtotal_cents, &s.config.shipping);
    tracing::debug!(subtotal_cents = r.subtotal_cents, free = quote.free, "shipping quoted");
    Ok(Json(quote))
}

async fn dashboard_stats(Json(body): Json<Value>) -> Result<Json<DashboardStats>, (StatusCode, String)> {
    let orders: Vec<OrderSummary> = decode(body)?;
    Ok(Json(DashboardStats::from_orders(&orders)))
}
