//! Core types for Lumera.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod id;
pub mod money;
pub mod status;

pub use contact::{Email, EmailError};
pub use id::*;
pub use money::{CurrencyCode, ExchangeRate, Money};
pub use status::*;
