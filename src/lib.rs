//! DePix Bridge Library
//! # Overview
//!
//! This library turns payment requests into Pix "copy and paste" codes: EMV
//! merchant-presented QR payloads with a CRC-16 trailer, optionally rendered
//! as QR images. It ships a CSV batch driver with both a sync and an async
//! strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (PaymentRequest, PayloadConfig, PixError, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::tlv`] - Field encoding
//!   - [`core::crc`] - Checksum engine
//!   - [`core::sanitizer`] - Input normalization
//!   - [`core::payload`] - Payload assembly and verification
//!   - [`core::generator`] - Codes, payment URIs and images
//! - [`render`] - QR image rendering
//! - [`io`] - CSV input and output
//! - [`strategy`] - Batch processing strategies
//! - [`logging`] - Tracing subscriber setup
//!
//! # Payload Layout
//!
//! Fields are emitted in this order, each as `tag + two-digit length + value`:
//!
//! - `00` payload format indicator, `01` point of initiation (optional)
//! - `26` merchant account (domain identifier and routing key)
//! - `52` category code, `53` currency, `54` amount (fixed-amount codes only)
//! - `58` country, `59` merchant name, `60` merchant city
//! - `62` additional data with the transaction reference (optional)
//! - `63` CRC-16 over everything before its four hex digits

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod render;
pub mod strategy;
pub mod types;

pub use core::{build_payload, verify_payload, GeneratedCode, PaymentCodeGenerator, Payload, PayloadBuilder};
pub use io::write_codes_csv;
pub use types::{
    AdditionalData, Amount, InitiationMethod, PaymentRequest, PayloadConfig, PixError, PixKey,
    Reference, ReferencePolicy, RequestInput,
};
