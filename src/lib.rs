//! Storefront order normalization
//!
//! Reconciles a payment provider's completed checkout session into the
//! canonical order record the storefront persists.
//!
//! ## Features
//! - Shipping name/address resolution across the provider's payload versions
//! - Line item and total conversion from minor to major currency units
//! - Free-shipping eligibility and checkout rate selection
//! - Admin order status updates and dashboard figures
//!
//! Everything under [`domain`] is pure; [`api`] and the binary are thin
//! adapters over it.

use thiserror::Error;

pub mod api;
pub mod config;
pub mod domain;

pub use domain::aggregates::{
    build_order_data, extract_shipping_details, transform_line_items, CustomerStats, NewCustomer, OrderData,
    OrderLineItem, OrderStatus, OrderUpdate, OrderUpdateRequest,
};
pub use domain::checkout::{CheckoutSession, LineItem, LineItemList};
pub use domain::shipping::{qualifies_for_free_shipping, qualifies_for_free_shipping_at, ShippingPolicy, ShippingQuote};
pub use domain::value_objects::{Address, ResolvedShipping};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Unexpected event type: {0}")]
    UnexpectedEvent(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Order ID required")]
    MissingOrderId,

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
