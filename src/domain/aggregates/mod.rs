//! Aggregates module
pub mod order;
pub mod customer;

pub use order::{
    build_order_data, extract_shipping_details, transform_line_items, OrderData, OrderLineItem, OrderStatus,
    OrderUpdate, OrderUpdateRequest, DEFAULT_TRACKING_CARRIER,
};
pub use customer::{CustomerStats, NewCustomer};
