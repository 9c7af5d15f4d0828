//! Tag-length-value encoding for EMV merchant-presented payloads
//!
//! A field is its two-digit tag, the two-digit decimal character count of
//! its value, then the value verbatim. Sub-templates are fields whose value
//! is itself a concatenation of fields. No escaping is performed.
//!
//! The reader in this module is the inverse of [`encode`] and is used to
//! verify finished payloads.

use crate::types::PixError;

/// Largest value length representable by the two-digit length prefix
pub const MAX_VALUE_LEN: usize = 99;

/// Tags of the payload schema
pub mod tags {
    pub const PAYLOAD_FORMAT_INDICATOR: &str = "00";
    pub const POINT_OF_INITIATION_METHOD: &str = "01";
    pub const MERCHANT_ACCOUNT_INFO: &str = "26";
    pub const MERCHANT_CATEGORY_CODE: &str = "52";
    pub const TRANSACTION_CURRENCY: &str = "53";
    pub const TRANSACTION_AMOUNT: &str = "54";
    pub const COUNTRY_CODE: &str = "58";
    pub const MERCHANT_NAME: &str = "59";
    pub const MERCHANT_CITY: &str = "60";
    pub const ADDITIONAL_DATA: &str = "62";
    pub const CRC: &str = "63";

    /// Sub-field of [`MERCHANT_ACCOUNT_INFO`]: arrangement identifier
    pub const MAI_GUI: &str = "00";
    /// Sub-field of [`MERCHANT_ACCOUNT_INFO`]: routing key
    pub const MAI_KEY: &str = "01";
    /// Sub-field of [`ADDITIONAL_DATA`]: transaction reference
    pub const ADF_REFERENCE: &str = "05";
}

/// One decoded field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvField {
    pub tag: String,
    pub value: String,
}

impl TlvField {
    pub fn new(tag: &str, value: &str) -> Self {
        Self {
            tag: tag.to_string(),
            value: value.to_string(),
        }
    }

    /// Parse the value as a sub-template
    pub fn children(&self) -> Result<Vec<TlvField>, PixError> {
        parse(&self.value)
    }
}

fn check_tag(tag: &str) -> Result<(), PixError> {
    if tag.len() == 2 && tag.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(PixError::invalid_tag(tag))
    }
}

/// Append one encoded field to `out`
///
/// # Errors
///
/// `InvalidTag` when `tag` is not two ASCII digits, `ValueTooLong` when
/// `value` has more than [`MAX_VALUE_LEN`] characters. `out` is untouched on
/// error.
pub fn encode_into(out: &mut String, tag: &str, value: &str) -> Result<(), PixError> {
    check_tag(tag)?;
    let length = value.chars().count();
    if length > MAX_VALUE_LEN {
        return Err(PixError::value_too_long(tag, length));
    }

    out.reserve(4 + value.len());
    out.push_str(tag);
    out.push_str(&format!("{:02}", length));
    out.push_str(value);
    Ok(())
}

/// Encode one field
///
/// ```
/// use depix_bridge::core::tlv::encode;
///
/// assert_eq!(encode("58", "BR").unwrap(), "5802BR");
/// ```
pub fn encode(tag: &str, value: &str) -> Result<String, PixError> {
    let mut out = String::new();
    encode_into(&mut out, tag, value)?;
    Ok(out)
}

/// Parse concatenated fields
///
/// Positions in errors are character offsets into `input`.
pub fn parse(input: &str) -> Result<Vec<TlvField>, PixError> {
    let chars: Vec<char> = input.chars().collect();
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if chars.len() - pos < 4 {
            return Err(PixError::malformed(pos, "truncated field header"));
        }
        let tag: String = chars[pos..pos + 2].iter().collect();
        check_tag(&tag).map_err(|_| PixError::malformed(pos, "tag is not two digits"))?;

        let length = match (chars[pos + 2].to_digit(10), chars[pos + 3].to_digit(10)) {
            (Some(tens), Some(units)) => (tens * 10 + units) as usize,
            _ => return Err(PixError::malformed(pos + 2, "length is not two digits")),
        };

        let start = pos + 4;
        let end = start + length;
        if end > chars.len() {
            return Err(PixError::malformed(start, "value runs past end of input"));
        }

        fields.push(TlvField {
            tag,
            value: chars[start..end].iter().collect(),
        });
        pos = end;
    }

    Ok(fields)
}
