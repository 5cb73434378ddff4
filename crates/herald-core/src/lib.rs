//! # herald-core
//!
//! Core types, traits, configuration, and error handling for the Herald bot.

pub mod config;
pub mod error;
pub mod message;
pub mod notification;
pub mod post;
pub mod traits;
