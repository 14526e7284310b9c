//! Order Aggregate
//!
//! Turns a completed checkout session into the canonical order record, and
//! applies the admin-side status updates that follow it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::checkout::{CheckoutSession, LineItem};
use crate::domain::events::{DomainEvent, OrderEvent};
use crate::domain::value_objects::{non_empty, to_major_units, Address, ResolvedShipping};
use crate::{Result, StorefrontError};

/// Carrier recorded when tracking is added without one.
pub const DEFAULT_TRACKING_CARRIER: &str = "USPS";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

/// Canonical order record, ready for insertion into the orders table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderData {
    pub stripe_session_id: String,
    pub stripe_payment_intent: String,
    pub customer_id: Option<String>,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub shipping_address: Option<Address>,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub line_items: Vec<OrderLineItem>,
}

/// Pick the shipping name and address for a session.
///
/// The first shipping-details block present wins; customer details are the
/// fallback. Name and address each fall back on their own, so a winning
/// block without an address still contributes its name.
pub fn extract_shipping_details(session: &CheckoutSession) -> ResolvedShipping {
    let shipping = session.shipping_sources().into_iter().flatten().next();
    let customer = session.customer_details.as_ref();

    let address = shipping
        .and_then(|s| s.address.as_ref())
        .or_else(|| customer.and_then(|c| c.address.as_ref()))
        .cloned();
    let name = shipping
        .and_then(|s| non_empty(s.name.as_ref()))
        .or_else(|| customer.and_then(|c| non_empty(c.name.as_ref())))
        .cloned();

    tracing::debug!(
        session_id = %session.id,
        from_shipping_details = shipping.is_some(),
        has_name = name.is_some(),
        has_address = address.is_some(),
        "resolved shipping details"
    );
    ResolvedShipping { name, address }
}

/// Convert provider line items to order lines, keeping their order.
pub fn transform_line_items(items: &[LineItem]) -> Vec<OrderLineItem> {
    items
        .iter()
        .map(|item| OrderLineItem {
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: to_major_units(item.price.as_ref().and_then(|p| p.unit_amount).unwrap_or(0)),
            total: to_major_units(item.amount_total.unwrap_or(0)),
        })
        .collect()
}

/// Build the order record for a session whose payment has completed.
pub fn build_order_data(session: &CheckoutSession, line_items: &[LineItem], customer_id: Option<String>) -> OrderData {
    let ResolvedShipping { name, address } = extract_shipping_details(session);
    let customer_email = session
        .customer_details
        .as_ref()
        .and_then(|c| non_empty(c.email.as_ref()))
        .cloned();

    OrderData {
        stripe_session_id: session.id.clone(),
        stripe_payment_intent: session.payment_intent.clone(),
        customer_id,
        customer_email,
        customer_name: name,
        shipping_address: address,
        subtotal: to_major_units(session.amount_subtotal.unwrap_or(0)),
        shipping: to_major_units(session.shipping_cost.as_ref().and_then(|c| c.amount_total).unwrap_or(0)),
        total: to_major_units(session.amount_total.unwrap_or(0)),
        status: OrderStatus::Paid,
        line_items: transform_line_items(line_items),
    }
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Refunded)
    }

    /// Tracking can be attached while the order has not left the warehouse.
    pub fn accepts_tracking(&self) -> bool {
        matches!(self, Self::Paid | Self::Processing)
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match next {
            Processing => *self == Paid,
            Shipped => self.accepts_tracking(),
            Delivered => *self == Shipped,
            Cancelled => !self.is_terminal(),
            Refunded => matches!(self, Paid | Processing | Shipped | Delivered),
            Pending | Paid => false,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        };
        f.write_str(s)
    }
}

/// Admin request to move an order along.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdateRequest {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub tracking_carrier: Option<String>,
}

/// Column changes to write for an order update.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderUpdate {
    pub order_id: String,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl OrderUpdate {
    /// Plan the update for an order currently in `current`.
    pub fn plan(request: OrderUpdateRequest, current: OrderStatus, now: DateTime<Utc>) -> Result<Self> {
        Self::plan_with_carrier(request, current, now, DEFAULT_TRACKING_CARRIER)
    }

    pub fn plan_with_carrier(
        request: OrderUpdateRequest,
        current: OrderStatus,
        now: DateTime<Utc>,
        default_carrier: &str,
    ) -> Result<Self> {
        if request.order_id.trim().is_empty() {
            return Err(StorefrontError::MissingOrderId);
        }
        let tracking_number = request.tracking_number.filter(|t| !t.is_empty());

        if let Some(next) = request.status {
            if next != current && !current.can_transition_to(next) {
                return Err(StorefrontError::InvalidTransition { from: current, to: next });
            }
            if next == OrderStatus::Shipped && tracking_number.is_none() && current != OrderStatus::Shipped {
                return Err(StorefrontError::Validation("shipping an order requires a tracking number".into()));
            }
            if tracking_number.is_some() && matches!(next, OrderStatus::Cancelled | OrderStatus::Refunded) {
                return Err(StorefrontError::Validation(format!("tracking cannot be added to a {} order", next)));
            }
        }
        if tracking_number.is_some() && !current.accepts_tracking() && current != OrderStatus::Shipped {
            return Err(StorefrontError::InvalidTransition { from: current, to: OrderStatus::Shipped });
        }

        let mut update = Self {
            order_id: request.order_id,
            updated_at: now,
            status: request.status,
            tracking_number: None,
            tracking_carrier: None,
            shipped_at: None,
            delivered_at: None,
            events: vec![],
        };

        if let Some(number) = tracking_number {
            let carrier = request
                .tracking_carrier
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| default_carrier.to_string());
            update.raise_event(DomainEvent::Order(OrderEvent::Shipped {
                order_id: update.order_id.clone(),
                tracking_number: number.clone(),
                carrier: carrier.clone(),
            }));
            update.tracking_number = Some(number);
            update.tracking_carrier = Some(carrier);
            if current != OrderStatus::Shipped {
                update.shipped_at = Some(now);
            }
        }

        if let Some(next) = update.status.filter(|s| *s != current) {
            update.raise_event(DomainEvent::Order(OrderEvent::StatusChanged {
                order_id: update.order_id.clone(),
                from: current,
                to: next,
            }));
            match next {
                OrderStatus::Delivered => {
                    update.delivered_at = Some(now);
                    update.raise_event(DomainEvent::Order(OrderEvent::Delivered { order_id: update.order_id.clone() }));
                }
                OrderStatus::Cancelled => {
                    update.raise_event(DomainEvent::Order(OrderEvent::Cancelled { order_id: update.order_id.clone() }));
                }
                _ => {}
            }
        }

        Ok(update)
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
}
