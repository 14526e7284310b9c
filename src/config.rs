//! Service configuration from the environment

use std::env;
use std::str::FromStr;

use crate::domain::aggregates::DEFAULT_TRACKING_CARRIER;
use crate::domain::shipping::ShippingPolicy;
use crate::{Result, StorefrontError};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub shipping: ShippingPolicy,
    pub default_carrier: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: 8083, shipping: ShippingPolicy::default(), default_carrier: DEFAULT_TRACKING_CARRIER.to_string() }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let shipping = ShippingPolicy {
            free_threshold_dollars: parse_or(&lookup, "FREE_SHIPPING_THRESHOLD", defaults.shipping.free_threshold_dollars)?,
            standard_rate_cents: parse_or(&lookup, "STANDARD_SHIPPING_CENTS", defaults.shipping.standard_rate_cents)?,
            ..defaults.shipping
        };
        Ok(Self {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            shipping,
            default_carrier: lookup("DEFAULT_TRACKING_CARRIER")
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(defaults.default_carrier),
        })
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e| StorefrontError::Config(format!("Invalid {}: {}", key, e))),
        None => Ok(default),
    }
}
