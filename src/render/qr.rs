//! QR code rendering
//!
//! The payload is encoded into a QR matrix with `qrcodegen`, then drawn as a
//! grayscale PNG (via `image`) or as an SVG path document. Both outputs keep
//! a quiet zone of `margin` modules around the symbol.

use super::{QrFormat, Renderer};
use crate::types::PixError;
use base64::Engine;
use image::{GrayImage, ImageFormat, Luma};
use qrcodegen::{QrCode, QrCodeEcc};
use std::fmt::Write as _;
use std::io::Cursor;

/// Default image side length in pixels
pub const DEFAULT_WIDTH: u32 = 512;

/// Default quiet zone in modules
pub const DEFAULT_MARGIN: u32 = 8;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Image bytes produced by a renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQr {
    pub format: QrFormat,
    pub bytes: Vec<u8>,
}

impl RenderedQr {
    pub fn mime_type(&self) -> &'static str {
        match self.format {
            QrFormat::Png => "image/png",
            QrFormat::Svg => "image/svg+xml",
        }
    }

    /// `data:` URL embedding the image as base64
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// QR renderer settings
#[derive(Debug, Clone, Copy)]
pub struct QrRenderer {
    pub format: QrFormat,
    /// Side length of the PNG in pixels (raised to one pixel per module if smaller)
    pub width: u32,
    /// Quiet zone around the symbol, in modules
    pub margin: u32,
    pub ecc: QrCodeEcc,
}

impl Default for QrRenderer {
    fn default() -> Self {
        Self {
            format: QrFormat::Png,
            width: DEFAULT_WIDTH,
            margin: DEFAULT_MARGIN,
            ecc: QrCodeEcc::Medium,
        }
    }
}

impl QrRenderer {
    pub fn new(format: QrFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Encode `payload` into a QR matrix
    pub fn encode(&self, payload: &str) -> Result<QrCode, PixError> {
        QrCode::encode_text(payload, self.ecc).map_err(PixError::render)
    }

    fn render_png(&self, qr: &QrCode) -> Result<Vec<u8>, PixError> {
        let margin = self.margin as i64;
        let modules = qr.size() as i64 + 2 * margin;
        let side = self.width.max(modules as u32);
        let scale = |pixel: u32| pixel as i64 * modules / side as i64 - margin;

        let image = GrayImage::from_fn(side, side, |x, y| {
            let (mx, my) = (scale(x), scale(y));
            if qr.get_module(mx as i32, my as i32) {
                DARK
            } else {
                LIGHT
            }
        });

        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(PixError::render)?;
        Ok(bytes)
    }

    fn render_svg(&self, qr: &QrCode) -> String {
        let border = self.margin as i32;
        let dimension = qr.size() + border * 2;

        let mut path = String::new();
        for y in 0..qr.size() {
            for x in 0..qr.size() {
                if qr.get_module(x, y) {
                    if !path.is_empty() {
                        path.push(' ');
                    }
                    let _ = write!(path, "M{},{}h1v1h-1z", x + border, y + border);
                }
            }
        }

        format!(
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" ",
                "width=\"{width}\" height=\"{width}\" viewBox=\"0 0 {dim} {dim}\" ",
                "stroke=\"none\" shape-rendering=\"crispEdges\">\n",
                "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n",
                "\t<path d=\"{path}\" fill=\"#000000\"/>\n",
                "</svg>\n"
            ),
            width = self.width,
            dim = dimension,
            path = path
        )
    }
}

impl Renderer for QrRenderer {
    fn render(&self, payload: &str) -> Result<RenderedQr, PixError> {
        let qr = self.encode(payload)?;
        let bytes = match self.format {
            QrFormat::Png => self.render_png(&qr)?,
            QrFormat::Svg => self.render_svg(&qr).into_bytes(),
        };
        Ok(RenderedQr {
            format: self.format,
            bytes,
        })
    }
}
