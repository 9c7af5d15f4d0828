//! End-to-end integration tests
//!
//! These tests validate the complete batch pipeline using predefined CSV
//! fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Generates a code for every valid row
//! 3. Writes the output CSV to a temporary file
//! 4. Compares actual output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Happy path scenarios
//! - Open-amount requests
//! - Per-row merchant name and city, including accented text
//! - Rejected rows (missing or non-ASCII keys, malformed, negative or oversized amounts, oversized keys)
//! - Routing key normalization
//! - Amount rounding
//!
//! Each test is run twice: once with the synchronous strategy and once with
//! the async strategy.

#[cfg(test)]
mod tests {
    use base64::Engine;
    use depix_bridge::cli::StrategyType;
    use depix_bridge::core::generator::PaymentCodeGenerator;
    use depix_bridge::render::{QrFormat, QrRenderer};
    use depix_bridge::strategy::{create_strategy, BatchConfig};
    use depix_bridge::types::PayloadConfig;
    use depix_bridge::verify_payload;
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    fn generator() -> Arc<PaymentCodeGenerator> {
        Arc::new(PaymentCodeGenerator::new(PayloadConfig::default()))
    }

    /// Run a test fixture by processing input.csv and comparing with expected.csv
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - Input or expected files cannot be read
    /// - Output doesn't match expected
    fn run_test_fixture(fixture_name: &str, strategy_type: StrategyType) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        // Small batches so the async strategy crosses batch boundaries
        let strategy = create_strategy(strategy_type, Some(BatchConfig::new(2, 2)), generator());

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        strategy
            .process(Path::new(&input_path), &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to process requests: {}", e));

        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));

        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, actual_output, expected_output
        );
    }

    /// End-to-end test for all fixtures with both strategies
    #[rstest]
    #[case("happy_path")]
    #[case("open_amounts")]
    #[case("merchant_columns")]
    #[case("invalid_rows")]
    #[case("key_normalization")]
    #[case("amount_rounding")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, strategy);
    }

    /// Every generated code in every fixture carries a valid checksum
    #[rstest]
    fn test_fixture_codes_verify(
        #[values(
            "happy_path",
            "open_amounts",
            "merchant_columns",
            "invalid_rows",
            "key_normalization",
            "amount_rounding"
        )]
        fixture: &str,
    ) {
        let expected = fs::read_to_string(format!("tests/fixtures/{}/expected.csv", fixture)).unwrap();
        let mut reader = csv::Reader::from_reader(expected.as_bytes());
        for record in reader.records() {
            let record = record.unwrap();
            verify_payload(&record[1]).unwrap();
        }
    }

    #[rstest]
    fn test_batch_with_qr_images(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy_type: StrategyType,
    ) {
        let generator = Arc::new(
            PaymentCodeGenerator::new(PayloadConfig::default())
                .with_renderer(QrRenderer::new(QrFormat::Svg)),
        );
        let strategy = create_strategy(strategy_type, None, generator);

        let mut output = Vec::new();
        strategy
            .process(Path::new("tests/fixtures/happy_path/input.csv"), &mut output)
            .unwrap();

        let mut reader = csv::Reader::from_reader(output.as_slice());
        let mut rows = 0;
        for record in reader.records() {
            let record = record.unwrap();
            let data_url = &record[3];
            let encoded = data_url
                .strip_prefix("data:image/svg+xml;base64,")
                .unwrap_or_else(|| panic!("unexpected data URL: {}", data_url));
            let svg = base64::engine::general_purpose::STANDARD.decode(encoded).unwrap();
            assert!(String::from_utf8(svg).unwrap().contains("<svg"));
            rows += 1;
        }
        assert_eq!(rows, 4);
    }
}
