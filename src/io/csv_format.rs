//! CSV format handling for payment requests and generated codes
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to validated payment requests
//! - Result serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::core::generator::GeneratedCode;
use crate::core::validation::validate_request;
use crate::types::{PaymentRequest, PayloadConfig, PixError, RequestInput};
use serde::Deserialize;
use std::io::Write;

/// Header written before any result row
pub const OUTPUT_HEADER: [&str; 4] = ["row", "pix_code", "payment_uri", "qr_code_data_url"];

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns:
/// pix_key, amount, description, merchant_name, merchant_city.
/// Every column but `pix_key` may be missing or empty.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct CsvRecord {
    #[serde(default)]
    pub pix_key: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub merchant_city: Option<String>,
}

impl CsvRecord {
    pub fn as_input(&self) -> RequestInput<'_> {
        RequestInput {
            pix_key: self.pix_key.as_deref(),
            amount: self.amount.as_deref(),
            description: self.description.as_deref(),
            merchant_name: self.merchant_name.as_deref(),
            merchant_city: self.merchant_city.as_deref(),
        }
    }
}

/// A value tagged with its 1-based data row number in the input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<T> {
    pub number: u64,
    pub item: T,
}

impl<T> Row<T> {
    pub fn new(number: u64, item: T) -> Self {
        Self { number, item }
    }
}

/// Convert a CsvRecord to a validated PaymentRequest
pub fn convert_csv_record(
    csv_record: &CsvRecord,
    config: &PayloadConfig,
) -> Result<PaymentRequest, PixError> {
    validate_request(&csv_record.as_input(), config)
}

/// Write generated codes in CSV format
///
/// Rows are written in ascending row number so output order matches input
/// order regardless of how the codes were produced.
pub fn write_codes_csv(rows: &[Row<GeneratedCode>], output: &mut dyn Write) -> Result<(), PixError> {
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(OUTPUT_HEADER)?;

    let mut sorted: Vec<&Row<GeneratedCode>> = rows.iter().collect();
    sorted.sort_by_key(|row| row.number);

    for row in sorted {
        writer.write_record([
            row.number.to_string().as_str(),
            row.item.pix_code.as_str(),
            row.item.payment_uri.as_str(),
            row.item.qr_code_data_url.as_deref().unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
