//! Checkout session payloads
//!
//! Read-only views of what the payment provider sends for a completed
//! checkout. Field names follow the provider's response shape exactly.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::value_objects::{CustomerDetails, ShippingDetails};
use crate::{Result, StorefrontError};

/// Event type the order pipeline consumes.
pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CheckoutSession {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub payment_intent: String,
    #[serde(default)]
    pub amount_subtotal: Option<i64>,
    #[serde(default)]
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub shipping_cost: Option<ShippingCost>,
    #[serde(default)]
    pub collected_information: Option<CollectedInformation>,
    /// Legacy shipping location, still populated by older checkout flows.
    #[serde(default)]
    pub shipping_details: Option<ShippingDetails>,
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
    /// Provider-side customer reference.
    #[serde(default)]
    pub customer: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingCost {
    #[serde(default)]
    pub amount_total: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedInformation {
    #[serde(default)]
    pub shipping_details: Option<ShippingDetails>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub amount_total: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    #[serde(default)]
    pub unit_amount: Option<i64>,
}

/// Paginated list envelope returned by the line-item listing endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LineItemList {
    pub data: Vec<LineItem>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    #[serde(rename = "type")]
    event_type: String,
    data: EventData,
}

#[derive(Debug, Deserialize)]
struct EventData {
    object: serde_json::Value,
}

impl CheckoutSession {
    /// Shipping-details blocks in precedence order: the current
    /// `collected_information` location first, then the legacy one.
    pub fn shipping_sources(&self) -> [Option<&ShippingDetails>; 2] {
        [
            self.collected_information.as_ref().and_then(|c| c.shipping_details.as_ref()),
            self.shipping_details.as_ref(),
        ]
    }

    /// Decode the session embedded in a `checkout.session.completed` event.
    pub fn from_event_json(raw: &str) -> Result<Self> {
        let envelope: EventEnvelope = serde_json::from_str(raw)?;
        if envelope.event_type != CHECKOUT_SESSION_COMPLETED {
            return Err(StorefrontError::UnexpectedEvent(envelope.event_type));
        }
        Ok(serde_json::from_value(envelope.data.object)?)
    }

    /// Reject sessions missing the identifiers an order record needs.
    pub fn ensure_valid(&self) -> Result<()> {
        self.validate().map_err(|e| StorefrontError::Validation(e.to_string()))
    }
}

impl LineItemList {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn into_items(self) -> Vec<LineItem> {
        self.data
    }
}
