//! Admin dashboard figures

use serde::{Deserialize, Serialize};

use crate::domain::aggregates::OrderStatus;

/// The columns the dashboard reads per order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub total: f64,
    pub status: OrderStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_revenue: f64,
    pub total_orders: usize,
    /// Paid or processing, i.e. still waiting to ship.
    pub pending_orders: usize,
}

impl DashboardStats {
    pub fn from_orders(orders: &[OrderSummary]) -> Self {
        Self {
            total_revenue: orders.iter().map(|o| o.total).sum(),
            total_orders: orders.len(),
            pending_orders: orders
                .iter()
                .filter(|o| matches!(o.status, OrderStatus::Paid | OrderStatus::Processing))
                .count(),
        }
    }
}
