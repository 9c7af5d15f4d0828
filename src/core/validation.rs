//! Caller-side validation of raw request fields
//!
//! Rejections happen here, before the payload builder runs, and carry a
//! human-readable reason through `PixError`.

use crate::types::{
    AdditionalData, Amount, PaymentRequest, PayloadConfig, PixError, PixKey, Reference,
    ReferencePolicy, RequestInput,
};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse amount text
///
/// Blank text and zero mean an open amount and yield `Ok(None)`.
///
/// # Errors
///
/// `InvalidAmount` for non-numeric text, `NegativeAmount` below zero,
/// `AmountTooSmall` when the value rounds to `0.00` and `AmountTooLarge`
/// when it has no room for cents.
pub fn parse_amount(raw: Option<&str>) -> Result<Option<Amount>, PixError> {
    let text = match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return Ok(None),
    };

    let value = Decimal::from_str(text).map_err(|_| PixError::invalid_amount(text))?;
    if value.is_zero() {
        return Ok(None);
    }
    Amount::new(value).map(Some)
}

/// Turn raw request fields into a `PaymentRequest`
///
/// A non-blank description becomes the transaction reference; otherwise
/// `config.missing_reference` decides whether the additional-data template
/// is omitted or carries the fallback.
pub fn validate_request(
    input: &RequestInput<'_>,
    config: &PayloadConfig,
) -> Result<PaymentRequest, PixError> {
    let pix_key = PixKey::new(input.pix_key.unwrap_or_default())?;
    let amount = parse_amount(input.amount)?;

    let additional_data = match input.description.map(str::trim) {
        Some(text) if !text.is_empty() => AdditionalData::Reference(Reference::new(text)),
        _ => match config.missing_reference {
            ReferencePolicy::Omit => AdditionalData::Omit,
            ReferencePolicy::Fallback => AdditionalData::Fallback,
        },
    };

    Ok(PaymentRequest {
        pix_key,
        amount,
        additional_data,
        merchant_name: non_blank(input.merchant_name),
        merchant_city: non_blank(input.merchant_city),
    })
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
