//! Payload builder
//!
//! Assembles the merchant-presented payload in the fixed field order of the
//! schema and closes it with the CRC field:
//!
//! ```text
//! 00 format indicator | 01 initiation (per config) | 26 { 00 gui, 01 key }
//! 52 mcc | 53 currency | 54 amount (only when fixed) | 58 country
//! 59 name | 60 city | 62 { 05 reference } (per request) | 63 crc
//! ```
//!
//! Building is deterministic: identical inputs give byte-identical payloads.

use crate::core::crc::checksum;
use crate::core::sanitizer::normalize_merchant_text;
use crate::core::tlv::{self, encode_into, tags};
use crate::types::{
    AdditionalData, Amount, PaymentRequest, PayloadConfig, PixError, PixKey, Reference,
};
use std::fmt;

/// Value of the payload-format-indicator field
pub const PAYLOAD_FORMAT_VERSION: &str = "01";

/// Maximum merchant name length (tag `59`)
pub const MERCHANT_NAME_MAX_LEN: usize = 25;

/// Maximum merchant city length (tag `60`)
pub const MERCHANT_CITY_MAX_LEN: usize = 15;

/// Tag and length of the trailing CRC field
const CRC_HEADER: &str = "6304";

/// A finished payload, checksum included
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Payload(String);

impl Payload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything the checksum covers, up to and including `6304`
    pub fn body(&self) -> &str {
        &self.0[..self.0.len() - 4]
    }

    /// The trailing four hexadecimal digits
    pub fn checksum(&self) -> &str {
        &self.0[self.0.len() - 4..]
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Payload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Builds payloads for one deployment configuration
#[derive(Debug, Clone, Copy)]
pub struct PayloadBuilder<'a> {
    config: &'a PayloadConfig,
}

impl<'a> PayloadBuilder<'a> {
    pub fn new(config: &'a PayloadConfig) -> Self {
        Self { config }
    }

    /// Build the payload for `request`
    ///
    /// # Errors
    ///
    /// Returns `ValueTooLong` when a field value exceeds 99 characters, for
    /// instance a routing key long enough to overflow the merchant-account
    /// template. No other failure is possible.
    pub fn build(&self, request: &PaymentRequest) -> Result<Payload, PixError> {
        let config = self.config;
        let mut body = String::with_capacity(160);

        encode_into(&mut body, tags::PAYLOAD_FORMAT_INDICATOR, PAYLOAD_FORMAT_VERSION)?;

        if let Some(method) = config.initiation.value() {
            encode_into(&mut body, tags::POINT_OF_INITIATION_METHOD, method)?;
        }

        let account_info = merchant_account_info(&config.gui, &request.pix_key)?;
        encode_into(&mut body, tags::MERCHANT_ACCOUNT_INFO, &account_info)?;

        encode_into(&mut body, tags::MERCHANT_CATEGORY_CODE, &config.merchant_category_code)?;
        encode_into(&mut body, tags::TRANSACTION_CURRENCY, &config.currency)?;

        if let Some(amount) = request.amount {
            encode_into(&mut body, tags::TRANSACTION_AMOUNT, &amount.to_string())?;
        }

        encode_into(&mut body, tags::COUNTRY_CODE, &config.country_code)?;

        let name = merchant_text(
            request.merchant_name.as_deref(),
            &config.merchant_name,
            MERCHANT_NAME_MAX_LEN,
        );
        let city = merchant_text(
            request.merchant_city.as_deref(),
            &config.merchant_city,
            MERCHANT_CITY_MAX_LEN,
        );
        encode_into(&mut body, tags::MERCHANT_NAME, &name)?;
        encode_into(&mut body, tags::MERCHANT_CITY, &city)?;

        if let Some(additional) = additional_data(&request.additional_data)? {
            encode_into(&mut body, tags::ADDITIONAL_DATA, &additional)?;
        }

        body.push_str(CRC_HEADER);
        let crc = checksum(&body);
        body.push_str(&crc);

        tracing::trace!(payload = %body, "built payload");
        Ok(Payload(body))
    }
}

/// Request text wins unless nothing printable survives normalization
fn merchant_text(requested: Option<&str>, configured: &str, max_len: usize) -> String {
    requested
        .map(|text| normalize_merchant_text(text, max_len))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| normalize_merchant_text(configured, max_len))
}

fn merchant_account_info(gui: &str, key: &PixKey) -> Result<String, PixError> {
    let mut info = String::new();
    encode_into(&mut info, tags::MAI_GUI, gui)?;
    encode_into(&mut info, tags::MAI_KEY, key.as_str())?;
    Ok(info)
}

fn additional_data(data: &AdditionalData) -> Result<Option<String>, PixError> {
    data.reference()
        .map(|reference| tlv::encode(tags::ADF_REFERENCE, reference.as_str()))
        .transpose()
}

/// Build a payload with the default configuration
///
/// `reference` of `None` omits the additional-data template; `name` and
/// `city` of `None` fall back to `DEPX` and `BRASIL`.
pub fn build_payload(
    pix_key: &PixKey,
    amount: Option<Amount>,
    reference: Option<&str>,
    name: Option<&str>,
    city: Option<&str>,
) -> Result<Payload, PixError> {
    let config = PayloadConfig::default();
    let additional_data = match reference {
        Some(text) => AdditionalData::Reference(Reference::new(text)),
        None => AdditionalData::Omit,
    };
    let request = PaymentRequest {
        pix_key: pix_key.clone(),
        amount,
        additional_data,
        merchant_name: name.map(str::to_string),
        merchant_city: city.map(str::to_string),
    };
    PayloadBuilder::new(&config).build(&request)
}

/// Check that `text` ends in a `6304` CRC field whose digits match the body
///
/// # Errors
///
/// `MalformedPayload` when the text does not parse as fields or lacks the
/// CRC trailer, `ChecksumMismatch` when the digits are wrong.
pub fn verify_payload(text: &str) -> Result<(), PixError> {
    let fields = tlv::parse(text)?;
    match fields.last() {
        Some(last) if last.tag == tags::CRC && last.value.len() == 4 => {}
        _ => {
            return Err(PixError::malformed(
                text.chars().count(),
                "payload does not end with a CRC field",
            ))
        }
    }

    let split = text.len() - 4;
    let expected = checksum(&text[..split]);
    let actual = text[split..].to_ascii_uppercase();
    if expected != actual {
        return Err(PixError::ChecksumMismatch { expected, actual });
    }
    Ok(())
}
