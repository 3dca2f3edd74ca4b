pub mod auth;
pub mod backup;
pub mod customers;
pub mod metrics;
pub mod slots;
pub mod stats;
pub mod status;
