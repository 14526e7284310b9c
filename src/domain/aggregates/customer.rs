//! Customer Aggregate

use serde::{Deserialize, Serialize};

use crate::domain::aggregates::OrderData;
use crate::domain::checkout::CheckoutSession;
use crate::domain::value_objects::non_empty;

/// Running totals kept on a customer row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerStats {
    pub total_orders: u32,
    pub total_spent: f64,
}

impl CustomerStats {
    pub fn first_order(order: &OrderData) -> Self {
        let mut stats = Self::default();
        stats.record_order(order);
        stats
    }

    pub fn record_order(&mut self, order: &OrderData) {
        self.total_orders = self.total_orders.saturating_add(1);
        self.total_spent += order.total;
    }
}

/// Customer row to insert when a checkout email has not been seen before.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewCustomer {
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub stripe_customer_id: Option<String>,
}

impl NewCustomer {
    /// `None` when the session carries no email to key the customer on.
    pub fn from_session(session: &CheckoutSession) -> Option<Self> {
        let details = session.customer_details.as_ref()?;
        let email = non_empty(details.email.as_ref())?.clone();
        let name = non_empty(details.name.as_ref())
            .or_else(|| session.shipping_details.as_ref().and_then(|s| non_empty(s.name.as_ref())))
            .cloned();
        Some(Self {
            email,
            name,
            phone: details.phone.clone(),
            stripe_customer_id: session.customer.clone(),
        })
    }
}
