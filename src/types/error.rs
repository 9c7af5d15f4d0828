//! Error types for the DePix bridge
//!
//! This module defines every error that can surface while turning a payment
//! request into a Pix code. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Input Validation Errors**: missing or non-ASCII routing key, malformed, negative or out-of-range amount
//! - **Encoding Errors**: a field value that does not fit the two-digit length prefix
//! - **Verification Errors**: malformed TLV text, checksum mismatch
//! - **Rendering Errors**: the QR encoder rejected the payload
//! - **File I/O and CSV Errors**: raised by the batch driver

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the DePix bridge
///
/// Each variant includes the context needed to explain the rejection to
/// whoever supplied the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PixError {
    /// The routing key is absent, or empty once normalized
    #[error("pix_key is required")]
    MissingPixKey,

    /// The routing key contains characters outside ASCII
    #[error("Invalid pix_key '{key}': only ASCII characters are allowed")]
    InvalidPixKey {
        /// The normalized key
        key: String,
    },

    /// Amount text is not a decimal number
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The rejected amount text
        amount: String,
    },

    /// Amount is below zero
    #[error("Amount {amount} must not be negative")]
    NegativeAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Amount is positive but rounds to zero cents
    #[error("Amount {amount} is below the smallest unit 0.01")]
    AmountTooSmall {
        /// The rejected amount
        amount: Decimal,
    },

    /// Amount cannot be held with two decimal places
    #[error("Amount {amount} is too large")]
    AmountTooLarge {
        /// The rejected amount
        amount: Decimal,
    },

    /// A field value does not fit the two-digit length prefix
    ///
    /// The payload schema encodes every length as exactly two decimal digits,
    /// so values longer than 99 characters are rejected instead of wrapped.
    #[error("Value for tag {tag} is too long for length encoding: {length} characters (max 99)")]
    ValueTooLong {
        /// Tag of the offending field
        tag: String,
        /// Character count of the offending value
        length: usize,
    },

    /// A tag that is not exactly two ASCII digits
    #[error("Invalid tag '{tag}': expected two ASCII digits")]
    InvalidTag {
        /// The rejected tag
        tag: String,
    },

    /// TLV text could not be parsed
    #[error("Malformed payload at position {position}: {reason}")]
    MalformedPayload {
        /// Character offset where parsing stopped
        position: usize,
        /// What the reader expected to find
        reason: String,
    },

    /// The trailing checksum does not match the payload body
    #[error("Checksum mismatch: expected {expected}, found {actual}")]
    ChecksumMismatch {
        /// Checksum computed over the payload body
        expected: String,
        /// Checksum carried by the payload
        actual: String,
    },

    /// The QR collaborator could not render the payload
    #[error("QR render error: {message}")]
    RenderError {
        /// Description of the rendering failure
        message: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing or writing error
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for PixError {
    fn from(error: std::io::Error) -> Self {
        PixError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for PixError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        PixError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl PixError {
    /// Whether the error was caused by caller-supplied input
    ///
    /// Validation errors are reported back to the caller and never retried.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PixError::MissingPixKey
                | PixError::InvalidPixKey { .. }
                | PixError::InvalidAmount { .. }
                | PixError::NegativeAmount { .. }
                | PixError::AmountTooSmall { .. }
                | PixError::AmountTooLarge { .. }
        )
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str) -> Self {
        PixError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create a ValueTooLong error
    pub fn value_too_long(tag: &str, length: usize) -> Self {
        PixError::ValueTooLong {
            tag: tag.to_string(),
            length,
        }
    }

    /// Create an InvalidTag error
    pub fn invalid_tag(tag: &str) -> Self {
        PixError::InvalidTag {
            tag: tag.to_string(),
        }
    }

    /// Create a MalformedPayload error
    pub fn malformed(position: usize, reason: &str) -> Self {
        PixError::MalformedPayload {
            position,
            reason: reason.to_string(),
        }
    }

    /// Create a RenderError
    pub fn render(message: impl std::fmt::Display) -> Self {
        PixError::RenderError {
            message: message.to_string(),
        }
    }
}
