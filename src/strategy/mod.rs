//! Processing strategy module for batch code generation
//!
//! This module defines the Strategy pattern for the complete batch pipeline,
//! encompassing CSV parsing, request validation and payment code generation.
//! This allows different processing implementations (synchronous, asynchronous
//! batch) to be selected at runtime.

use crate::cli::StrategyType;
use crate::core::generator::{GeneratedCode, PaymentCodeGenerator};
use crate::io::csv_format::{convert_csv_record, CsvRecord, Row};
use crate::types::PixError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for batch code generation
///
/// Each strategy reads payment requests from a CSV file, generates a code for
/// every valid row and writes the codes, in input order, to the output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process requests from input file and write generated codes to output
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - A fatal I/O error occurs during reading or writing
    /// - Output cannot be written
    ///
    /// Rows that fail parsing or validation are logged and skipped; they never
    /// cause this method to return an error.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), PixError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` is only consulted by the async strategy.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    generator: Arc<PaymentCodeGenerator>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(generator)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, generator))
        }
    }
}

/// Validate one CSV row and generate its code
///
/// Rejected rows are logged with their row number and yield `None`.
pub(crate) fn generate_row(
    generator: &PaymentCodeGenerator,
    row: Row<CsvRecord>,
) -> Option<Row<GeneratedCode>> {
    let result = convert_csv_record(&row.item, generator.config())
        .and_then(|request| generator.generate(&request));

    match result {
        Ok(code) => Some(Row::new(row.number, code)),
        Err(e) => {
            tracing::warn!(row = row.number, error = %e, "rejected payment request");
            None
        }
    }
}
