//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `config`: deployment configuration for payload generation
//! - `request`: validated payment request and its newtypes
//! - `error`: error types for the bridge

pub mod config;
pub mod error;
pub mod request;

pub use config::{InitiationMethod, PayloadConfig, ReferencePolicy};
pub use error::PixError;
pub use request::{AdditionalData, Amount, PaymentRequest, PixKey, Reference, RequestInput};
