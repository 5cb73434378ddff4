//! # herald-feed
//!
//! Social feed API client for Herald.

pub mod twitter;
