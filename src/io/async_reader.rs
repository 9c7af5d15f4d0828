//! Asynchronous CSV reader with batch interface
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - Batch reading so the async strategy can fan a batch out to tasks
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of Row<CsvRecord>
//! ```

use crate::io::csv_format::{CsvRecord, Row};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
///
/// Maintains streaming behavior with constant memory usage per batch.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    row_num: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            row_num: 0,
        }
    }

    /// Read up to `batch_size` rows
    ///
    /// Rows that fail to parse are logged and skipped; they still consume a
    /// row number. Returns an empty vector at end of input.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<Row<CsvRecord>> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(record)) => {
                    self.row_num += 1;
                    batch.push(Row::new(self.row_num, record));
                }
                Some(Err(e)) => {
                    self.row_num += 1;
                    tracing::warn!(row = self.row_num, error = %e, "CSV parse error");
                }
                None => break,
            }
        }

        batch
    }

    /// Data rows consumed so far, including rows that failed to parse
    pub fn rows_read(&self) -> u64 {
        self.row_num
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::Cursor;

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let csv_content = "pix_key,amount,description\n\
                           a,1,x\n\
                           b,2,y\n\
                           c,3,z\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(2).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].number, 1);
        assert_eq!(batch[0].item.pix_key.as_deref(), Some("a"));
        assert_eq!(batch[1].number, 2);

        let batch = reader.read_batch(2).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].number, 3);
        assert_eq!(batch[0].item.description.as_deref(), Some("z"));

        assert!(reader.read_batch(2).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_counts_unparseable_rows() {
        let csv_content: &[u8] = b"pix_key,amount\na,1\n\xff\xfe,2\nb,3\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content));

        let batch = reader.read_batch(10).await;
        let numbers: Vec<u64> = batch.iter().map(|row| row.number).collect();
        assert_eq!(numbers, [1, 3]);
        assert_eq!(reader.rows_read(), 3);
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let mut reader = AsyncReader::new(Cursor::new("pix_key,amount\n".as_bytes()));
        assert!(reader.read_batch(10).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_missing_optional_fields() {
        let csv_content = "pix_key,amount,description\na\nb,,\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(10).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].item.amount, None);
        assert_eq!(batch[1].item.amount, None);
        assert_eq!(batch[1].item.description, None);
    }

    #[tokio::test]
    async fn test_async_reader_whitespace_handling() {
        let csv_content = "pix_key,amount\n  11999999999  ,  7.5  \n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(10).await;
        assert_eq!(batch[0].item.pix_key.as_deref(), Some("11999999999"));
        assert_eq!(batch[0].item.amount.as_deref(), Some("7.5"));
    }
}
