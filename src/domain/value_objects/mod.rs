//! Value objects shared by checkout payloads and order records

use serde::{Deserialize, Serialize};

/// Postal address as delivered by the payment provider.
///
/// Values pass through untouched; the provider has already collected them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// A `{name, address}` block. Both the current and the legacy shipping
/// locations on a checkout session use this shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// Name and address picked for an order. Either side may be unknown.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedShipping {
    pub name: Option<String>,
    pub address: Option<Address>,
}

/// Minor currency units per major unit (cents per dollar).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Convert a minor-unit amount to major units.
pub fn to_major_units(minor: i64) -> f64 {
    minor as f64 / MINOR_UNITS_PER_MAJOR as f64
}

/// Upstream strings count as absent when empty.
pub(crate) fn non_empty(value: Option<&String>) -> Option<&String> {
    value.filter(|v| !v.is_empty())
}
