//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. Requests are read in batches and every row of a
//! batch is generated on its own tokio task.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── Arc<PaymentCodeGenerator> (shared by every row task)
//! ```
//!
//! Rows carry their input row number, so the writer restores input order no
//! matter which task finishes first.

use crate::core::generator::PaymentCodeGenerator;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_codes_csv;
use crate::strategy::{generate_row, ProcessingStrategy};
use crate::types::PixError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
///
/// Controls how many rows are read per batch and the number of worker
/// threads that generate them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of rows per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid max_concurrent_batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Batches are processed one after another; within a batch, rows are
/// generated concurrently across the runtime's worker threads.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    generator: Arc<PaymentCodeGenerator>,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, generator: Arc<PaymentCodeGenerator>) -> Self {
        Self { config, generator }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), PixError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| PixError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| PixError::IoError {
                    message: format!("Failed to open file '{}': {}", input_path.display(), e),
                })?;

            // csv-async reads through the futures-io traits
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut codes = Vec::new();

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                let tasks: Vec<_> = batch
                    .into_iter()
                    .map(|row| {
                        let generator = Arc::clone(&self.generator);
                        tokio::spawn(async move { generate_row(&generator, row) })
                    })
                    .collect();

                for task in tasks {
                    match task.await {
                        Ok(Some(code)) => codes.push(code),
                        Ok(None) => {}
                        Err(e) => tracing::error!(error = %e, "generation task failed"),
                    }
                }
            }

            let rejected = reader.rows_read().saturating_sub(codes.len() as u64);
            tracing::info!(generated = codes.len(), rejected, "async batch complete");

            write_codes_csv(&codes, output)
        })
    }
}
