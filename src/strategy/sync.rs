//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates batch generation by coordinating
//! between the SyncReader (for CSV input) and the PaymentCodeGenerator.
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Validation and generation to `PaymentCodeGenerator`
//! - CSV output to `csv_format::write_codes_csv` (format handling)
//!
//! Records are read one at a time; only the generated codes are retained
//! until the output is written.

use crate::core::generator::PaymentCodeGenerator;
use crate::io::csv_format::write_codes_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{generate_row, ProcessingStrategy};
use crate::types::PixError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use depix_bridge::core::generator::PaymentCodeGenerator;
/// use depix_bridge::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use depix_bridge::types::PayloadConfig;
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let generator = Arc::new(PaymentCodeGenerator::new(PayloadConfig::default()));
/// let strategy = SyncProcessingStrategy::new(generator);
/// let mut output = std::io::stdout();
///
/// strategy.process(Path::new("requests.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    generator: Arc<PaymentCodeGenerator>,
}

impl SyncProcessingStrategy {
    pub fn new(generator: Arc<PaymentCodeGenerator>) -> Self {
        Self { generator }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), PixError> {
        let reader = SyncReader::new(input_path)?;

        let mut codes = Vec::new();
        let mut rejected = 0usize;

        for result in reader {
            match result {
                Ok(row) => match generate_row(&self.generator, row) {
                    Some(code) => codes.push(code),
                    None => rejected += 1,
                },
                Err(e) => {
                    rejected += 1;
                    tracing::warn!(error = %e, "CSV parse error");
                }
            }
        }

        tracing::info!(generated = codes.len(), rejected, "sync batch complete");

        write_codes_csv(&codes, output)
    }
}
