//! Shipping eligibility and checkout rate selection

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::MINOR_UNITS_PER_MAJOR;

/// Free-shipping threshold in major units.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: i64 = 99;
/// Flat standard rate in minor units.
pub const DEFAULT_STANDARD_RATE_CENTS: i64 = 595;

/// Whether a subtotal (minor units) reaches the default threshold.
pub fn qualifies_for_free_shipping(subtotal_cents: i64) -> bool {
    qualifies_for_free_shipping_at(subtotal_cents, DEFAULT_FREE_SHIPPING_THRESHOLD)
}

/// Inclusive comparison against a threshold given in major units.
pub fn qualifies_for_free_shipping_at(subtotal_cents: i64, threshold_dollars: i64) -> bool {
    subtotal_cents >= threshold_dollars.saturating_mul(MINOR_UNITS_PER_MAJOR)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    pub free_threshold_dollars: i64,
    pub standard_rate_cents: i64,
    pub allowed_countries: Vec<String>,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold_dollars: DEFAULT_FREE_SHIPPING_THRESHOLD,
            standard_rate_cents: DEFAULT_STANDARD_RATE_CENTS,
            allowed_countries: vec!["US".to_string(), "CA".to_string()],
        }
    }
}

/// Rate offered when the checkout session is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingQuote {
    pub display_name: String,
    pub amount_cents: i64,
    pub free: bool,
    pub allowed_countries: Vec<String>,
}

impl ShippingQuote {
    pub fn for_subtotal(subtotal_cents: i64, policy: &ShippingPolicy) -> Self {
        let free = qualifies_for_free_shipping_at(subtotal_cents, policy.free_threshold_dollars);
        let (display_name, amount_cents) = if free {
            ("Free shipping", 0)
        } else {
            ("Standard shipping", policy.standard_rate_cents)
        };
        Self {
            display_name: display_name.to_string(),
            amount_cents,
            free,
            allowed_countries: policy.allowed_countries.clone(),
        }
    }
}

/// Cart line priced in minor units, as sent to checkout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub unit_amount: i64,
    pub quantity: u32,
}

pub fn subtotal_cents(lines: &[CartLine]) -> i64 {
    lines
        .iter()
        .fold(0i64, |acc, l| acc.saturating_add(l.unit_amount.saturating_mul(i64::from(l.quantity))))
}
