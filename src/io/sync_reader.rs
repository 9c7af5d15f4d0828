//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over payment request rows from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<Row<CsvRecord>, PixError>` for each data row:
//!
//! ```no_run
//! use depix_bridge::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("requests.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(row) => println!("row {}: {:?}", row.number, row.item),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row parsing errors are yielded as Err variants in the iterator
//! - Row numbers advance for failed rows too, so they always match the file

use crate::io::csv_format::{CsvRecord, Row};
use crate::types::PixError;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Maintains streaming behavior with constant memory usage.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    row_num: u64,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (optional trailing columns)
    /// - Use an 8KB buffer for efficient I/O
    pub fn new(path: &Path) -> Result<Self, PixError> {
        let file = File::open(path).map_err(|e| PixError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self { reader, row_num: 0 })
    }
}

impl Iterator for SyncReader {
    type Item = Result<Row<CsvRecord>, PixError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.reader.deserialize::<CsvRecord>().next()?;
        self.row_num += 1;

        Some(
            result
                .map(|record| Row::new(self.row_num, record))
                .map_err(PixError::from),
        )
    }
}
