//! Read-side projections over the slot collection. Everything here is a
//! pure function of the current slots; nothing is cached.

pub mod activity;
pub mod customers;
pub mod summary;
pub mod types;
