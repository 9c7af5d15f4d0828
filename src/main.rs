//! DePix bridge CLI
//!
//! Command-line interface for generating Pix copy-and-paste codes.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- batch requests.csv > codes.csv
//! cargo run -- batch --strategy sync --qr png requests.csv > codes.csv
//! cargo run -- --merchant-name "Loja" --merchant-city "Recife" batch requests.csv
//! cargo run -- generate --pix-key 11999999999 --amount 10.50 --description "Order 42"
//! cargo run -- generate --pix-key 11999999999 --qr png --qr-out code.png
//! ```
//!
//! `batch` writes one CSV row per valid request to stdout. `generate` prints
//! a single code as JSON. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, invalid single request, unwritable output, etc.)

use depix_bridge::cli::{self, BatchArgs, Command, GenerateArgs, StrategyType};
use depix_bridge::core::generator::PaymentCodeGenerator;
use depix_bridge::core::validation::validate_request;
use depix_bridge::logging;
use depix_bridge::render::{QrFormat, QrRenderer};
use depix_bridge::strategy;
use depix_bridge::types::{PayloadConfig, PixError};
use std::io::Write;
use std::process;
use std::sync::Arc;

fn main() {
    let args = cli::parse_args();

    if let Err(e) = logging::init_logging(args.log_format, &args.log_level) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let config = args.to_payload_config();
    let result = match &args.command {
        Command::Batch(batch) => run_batch(batch, config),
        Command::Generate(generate) => run_generate(generate, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn build_generator(config: PayloadConfig, qr: Option<QrFormat>) -> PaymentCodeGenerator {
    let generator = PaymentCodeGenerator::new(config);
    match qr {
        Some(format) => generator.with_renderer(QrRenderer::new(format)),
        None => generator,
    }
}

fn run_batch(args: &BatchArgs, config: PayloadConfig) -> Result<(), PixError> {
    let generator = Arc::new(build_generator(config, args.qr));
    let batch_config = match args.strategy {
        StrategyType::Async => Some(args.to_batch_config()),
        StrategyType::Sync => None,
    };
    let strategy = strategy::create_strategy(args.strategy, batch_config, generator);

    let mut output = std::io::stdout();
    strategy.process(&args.input_file, &mut output)
}

fn run_generate(args: &GenerateArgs, config: PayloadConfig) -> Result<(), PixError> {
    let generator = build_generator(config, args.qr);
    let request = validate_request(&args.as_input(), generator.config())?;
    let (code, image) = generator.generate_with_image(&request)?;

    if let (Some(path), Some(image)) = (&args.qr_out, image) {
        std::fs::write(path, &image.bytes).map_err(|e| PixError::IoError {
            message: format!("Failed to write '{}': {}", path.display(), e),
        })?;
        tracing::info!(path = %path.display(), bytes = image.bytes.len(), "wrote QR image");
    }

    let json = serde_json::to_string_pretty(&code).map_err(|e| PixError::IoError {
        message: e.to_string(),
    })?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    Ok(())
}
