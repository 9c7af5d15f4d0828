//! Payment request types
//!
//! The newtypes in this module can only be built through the input
//! sanitizer, so a `PaymentRequest` handed to the payload builder always
//! carries normalized values.

use crate::core::sanitizer::{normalize_pix_key, normalize_reference, REFERENCE_FALLBACK};
use crate::types::PixError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Normalized routing key (phone, email, document number or random key)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixKey(String);

impl PixKey {
    /// Normalize a raw routing key
    ///
    /// # Errors
    ///
    /// Returns `MissingPixKey` when nothing is left after normalization and
    /// `InvalidPixKey` when the key is not pure ASCII. Field lengths count
    /// characters while scanners count bytes, so only ASCII keeps them equal.
    pub fn new(raw: &str) -> Result<Self, PixError> {
        let key = normalize_pix_key(raw);
        if key.is_empty() {
            return Err(PixError::MissingPixKey);
        }
        if !key.is_ascii() {
            return Err(PixError::InvalidPixKey { key });
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PixKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized transaction reference (tag `62.05`)
///
/// Never empty, at most 25 characters from `[0-9A-Z./_-]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference(String);

impl Reference {
    pub fn new(raw: &str) -> Self {
        Self(normalize_reference(raw))
    }

    /// The reference used when a caller supplies none
    pub fn fallback() -> Self {
        Self(REFERENCE_FALLBACK.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strictly positive amount with two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// Round `value` to cents and wrap it
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` below zero, `AmountTooSmall` when the
    /// value rounds to `0.00` and `AmountTooLarge` when it cannot carry two
    /// decimal places.
    pub fn new(value: Decimal) -> Result<Self, PixError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PixError::NegativeAmount { amount: value });
        }
        let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if cents.is_zero() {
            return Err(PixError::AmountTooSmall { amount: value });
        }
        // rescale silently keeps fewer places when the mantissa would overflow
        cents.rescale(2);
        if cents.scale() != 2 {
            return Err(PixError::AmountTooLarge { amount: value });
        }
        Ok(Self(cents))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PixError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Renders with exactly two decimal digits, e.g. `10.50`
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Additional-data template (tag `62`) variant chosen per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdditionalData {
    /// Template not emitted
    Omit,
    /// Template carries the caller's reference
    Reference(Reference),
    /// Template carries the fallback reference
    Fallback,
}

impl AdditionalData {
    /// The reference that ends up in the payload, if any
    pub fn reference(&self) -> Option<Reference> {
        match self {
            AdditionalData::Omit => None,
            AdditionalData::Reference(reference) => Some(reference.clone()),
            AdditionalData::Fallback => Some(Reference::fallback()),
        }
    }
}

/// A validated payment request, ready for the payload builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub pix_key: PixKey,
    /// `None` requests an open amount; the amount field is left out
    pub amount: Option<Amount>,
    pub additional_data: AdditionalData,
    /// Overrides the configured merchant name
    pub merchant_name: Option<String>,
    /// Overrides the configured merchant city
    pub merchant_city: Option<String>,
}

impl PaymentRequest {
    pub fn new(pix_key: PixKey, amount: Option<Amount>, additional_data: AdditionalData) -> Self {
        Self {
            pix_key,
            amount,
            additional_data,
            merchant_name: None,
            merchant_city: None,
        }
    }

    pub fn with_merchant(mut self, name: impl Into<String>, city: impl Into<String>) -> Self {
        self.merchant_name = Some(name.into());
        self.merchant_city = Some(city.into());
        self
    }
}

/// Raw request fields exactly as received from a caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestInput<'a> {
    pub pix_key: Option<&'a str>,
    pub amount: Option<&'a str>,
    pub description: Option<&'a str>,
    pub merchant_name: Option<&'a str>,
    pub merchant_city: Option<&'a str>,
}
