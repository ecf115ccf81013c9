//! Core domain + application logic for the weather/time chat bot.
//!
//! This crate is intentionally framework-agnostic. The chat platform and the
//! weather provider live behind ports (traits) implemented in adapter crates
//! or constructed by the binary.

pub mod command;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod timezone;
pub mod weather;

pub use errors::{Error, Result};
