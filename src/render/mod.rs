//! Rendering of finished payloads into scannable QR images
//!
//! The renderer is a collaborator of the core: it receives the payload text
//! and returns image bytes in a single exchange, with no streaming or retry.
//!
//! - `qr` - QR matrix encoding (qrcodegen) and PNG/SVG output

pub mod qr;

pub use qr::{QrRenderer, RenderedQr};

use crate::types::PixError;
use clap::ValueEnum;

/// Image formats the QR renderer can produce
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum QrFormat {
    Png,
    Svg,
}

/// Converts payload text into an image
pub trait Renderer: Send + Sync {
    /// Render `payload` as an image
    fn render(&self, payload: &str) -> Result<RenderedQr, PixError>;
}
