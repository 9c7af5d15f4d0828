//! Core business logic module
//!
//! This module contains the payload generation components:
//! - `tlv` - Tag-length-value field encoding and parsing
//! - `crc` - CRC-16/CCITT-FALSE checksum
//! - `sanitizer` - Normalization of routing keys, references and merchant text
//! - `payload` - Payload assembly and verification
//! - `validation` - Raw request fields to `PaymentRequest`
//! - `generator` - Payload, payment URI and QR image for one request

pub mod crc;
pub mod generator;
pub mod payload;
pub mod sanitizer;
pub mod tlv;
pub mod validation;

pub use generator::{GeneratedCode, PaymentCodeGenerator};
pub use payload::{build_payload, verify_payload, Payload, PayloadBuilder};
pub use validation::validate_request;
