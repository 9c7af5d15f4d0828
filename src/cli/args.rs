use crate::logging::LogFormat;
pub use crate::render::QrFormat;
use crate::strategy::BatchConfig;
use crate::types::{InitiationMethod, PayloadConfig, ReferencePolicy, RequestInput};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Generate Pix copy-and-paste codes and QR images
#[derive(Parser, Debug)]
#[command(name = "depix-bridge")]
#[command(about = "Generate Pix copy-and-paste codes and QR images", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Merchant name used when a request does not carry one
    #[arg(long = "merchant-name", value_name = "NAME", global = true)]
    pub merchant_name: Option<String>,

    /// Merchant city used when a request does not carry one
    #[arg(long = "merchant-city", value_name = "CITY", global = true)]
    pub merchant_city: Option<String>,

    /// Point-of-initiation mode written into every payload
    #[arg(long = "initiation", value_name = "MODE", default_value = "dynamic", global = true)]
    pub initiation: InitiationMethod,

    /// What to emit for requests without a description
    #[arg(
        long = "missing-reference",
        value_name = "POLICY",
        default_value = "fallback",
        global = true
    )]
    pub missing_reference: ReferencePolicy,

    /// Log filter, overridden by RUST_LOG
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "human", global = true)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate codes for every row of a CSV file and write them to stdout
    Batch(BatchArgs),
    /// Generate a single code and print it as JSON
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input CSV file path containing payment requests
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Parsing strategy to use for processing requests
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Parsing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of rows per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of rows per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Embed a QR image data URL in every output row
    #[arg(long = "qr", value_name = "FORMAT")]
    pub qr: Option<QrFormat>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Routing key (phone, e-mail, tax id or random key)
    #[arg(long = "pix-key", value_name = "KEY")]
    pub pix_key: String,

    /// Fixed amount; omit for an open-amount code
    #[arg(long = "amount", value_name = "AMOUNT")]
    pub amount: Option<String>,

    /// Transaction reference shown to the payer
    #[arg(long = "description", value_name = "TEXT")]
    pub description: Option<String>,

    /// Render a QR image in this format
    #[arg(long = "qr", value_name = "FORMAT")]
    pub qr: Option<QrFormat>,

    /// Write the raw QR image bytes to this file
    #[arg(long = "qr-out", value_name = "FILE", requires = "qr")]
    pub qr_out: Option<PathBuf>,
}

/// Available parsing strategies for CSV processing
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Build the payload configuration from the global flags
    pub fn to_payload_config(&self) -> PayloadConfig {
        let mut config = PayloadConfig::default()
            .with_initiation(self.initiation)
            .with_missing_reference(self.missing_reference);
        if let Some(name) = &self.merchant_name {
            config.merchant_name = name.clone();
        }
        if let Some(city) = &self.merchant_city {
            config.merchant_city = city.clone();
        }
        config
    }
}

impl BatchArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are replaced by
    /// the defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }
}

impl GenerateArgs {
    pub fn as_input(&self) -> RequestInput<'_> {
        RequestInput {
            pix_key: Some(self.pix_key.as_str()),
            amount: self.amount.as_deref(),
            description: self.description.as_deref(),
            ..RequestInput::default()
        }
    }
}
