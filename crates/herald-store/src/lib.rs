//! # herald-store
//!
//! Persistent account state for Herald (MySQL-backed).

pub mod store;

pub use store::MySqlUserStore;
