//! Domain events
use crate::domain::aggregates::OrderStatus;

#[derive(Clone, Debug, PartialEq)]
pub enum DomainEvent {
    Order(OrderEvent),
}

#[derive(Clone, Debug, PartialEq)]
pub enum OrderEvent {
    StatusChanged { order_id: String, from: OrderStatus, to: OrderStatus },
    Shipped { order_id: String, tracking_number: String, carrier: String },
    Delivered { order_id: String },
    Cancelled { order_id: String },
}
