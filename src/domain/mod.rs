//! Domain layer
pub mod aggregates;
pub mod checkout;
pub mod dashboard;
pub mod events;
pub mod shipping;
pub mod value_objects;
