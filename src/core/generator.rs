//! Payment code generation
//!
//! Combines the payload builder with the optional QR renderer and produces
//! everything a caller hands back to a payer: the copy-and-paste code, a
//! `pix://` payment URI and, when a renderer is configured, the QR image as a
//! `data:` URL.

use crate::core::payload::{Payload, PayloadBuilder};
use crate::core::validation::validate_request;
use crate::render::{RenderedQr, Renderer};
use crate::types::{PaymentRequest, PayloadConfig, PixError, RequestInput};
use serde::Serialize;

/// Output for one payment request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedCode {
    /// Copy-and-paste payload
    pub pix_code: String,
    pub payment_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_data_url: Option<String>,
}

/// Builds payloads and renders them for one deployment
pub struct PaymentCodeGenerator {
    config: PayloadConfig,
    renderer: Option<Box<dyn Renderer>>,
}

impl std::fmt::Debug for PaymentCodeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentCodeGenerator")
            .field("config", &self.config)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

impl PaymentCodeGenerator {
    /// Generator that emits codes without images
    pub fn new(config: PayloadConfig) -> Self {
        Self {
            config,
            renderer: None,
        }
    }

    /// Attach a renderer; every generated code then carries a data URL
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn config(&self) -> &PayloadConfig {
        &self.config
    }

    /// Build the payload for an already validated request
    pub fn payload(&self, request: &PaymentRequest) -> Result<Payload, PixError> {
        PayloadBuilder::new(&self.config).build(request)
    }

    /// Render a payload with the configured renderer, if any
    pub fn render(&self, payload: &Payload) -> Result<Option<RenderedQr>, PixError> {
        self.renderer
            .as_ref()
            .map(|renderer| renderer.render(payload.as_str()))
            .transpose()
    }

    /// Generate the code for a validated request
    pub fn generate(&self, request: &PaymentRequest) -> Result<GeneratedCode, PixError> {
        self.generate_with_image(request).map(|(code, _)| code)
    }

    /// Generate the code and also hand back the rendered image, if any
    pub fn generate_with_image(
        &self,
        request: &PaymentRequest,
    ) -> Result<(GeneratedCode, Option<RenderedQr>), PixError> {
        let payload = self.payload(request)?;
        let image = self.render(&payload)?;
        let qr_code_data_url = image.as_ref().map(RenderedQr::to_data_url);

        tracing::debug!(
            pix_key = %request.pix_key,
            fixed_amount = request.amount.is_some(),
            checksum = payload.checksum(),
            "generated payment code"
        );

        let code = GeneratedCode {
            payment_uri: payment_uri(request),
            pix_code: payload.into_string(),
            qr_code_data_url,
        };
        Ok((code, image))
    }

    /// Validate raw input and generate its code
    pub fn generate_from_input(&self, input: &RequestInput<'_>) -> Result<GeneratedCode, PixError> {
        let request = validate_request(input, &self.config)?;
        self.generate(&request)
    }
}

/// `pix://` URI for a request
///
/// The `amount` parameter is left out for open-amount requests and the
/// `description` parameter when the request carries no reference.
pub fn payment_uri(request: &PaymentRequest) -> String {
    let mut params = Vec::new();
    if let Some(amount) = request.amount {
        params.push(format!("amount={}", amount));
    }
    if let Some(reference) = request.additional_data.reference() {
        params.push(format!("description={}", reference));
    }

    if params.is_empty() {
        format!("pix://{}", request.pix_key)
    } else {
        format!("pix://{}?{}", request.pix_key, params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::QrFormat;
    use crate::core::payload::verify_payload;
    use crate::render::QrRenderer;
    use crate::types::{AdditionalData, Amount, PixKey, Reference};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn request(amount: Option<i64>, additional_data: AdditionalData) -> PaymentRequest {
        PaymentRequest::new(
            PixKey::new("11999999999").unwrap(),
            amount.map(|cents| Amount::new(Decimal::new(cents, 2)).unwrap()),
            additional_data,
        )
    }

    #[rstest]
    #[case::fixed_with_reference(
        Some(1050),
        AdditionalData::Reference(Reference::new("Order 42")),
        "pix://11999999999?amount=10.50&description=ORDER42"
    )]
    #[case::fixed_with_fallback(
        Some(100),
        AdditionalData::Fallback,
        "pix://11999999999?amount=1.00&description=DEPX"
    )]
    #[case::open_amount(None, AdditionalData::Fallback, "pix://11999999999?description=DEPX")]
    #[case::bare(None, AdditionalData::Omit, "pix://11999999999")]
    fn test_payment_uri(
        #[case] amount: Option<i64>,
        #[case] additional_data: AdditionalData,
        #[case] expected: &str,
    ) {
        assert_eq!(payment_uri(&request(amount, additional_data)), expected);
    }

    #[test]
    fn test_generate_without_renderer() {
        let generator = PaymentCodeGenerator::new(PayloadConfig::default());
        let code = generator
            .generate(&request(Some(1050), AdditionalData::Fallback))
            .unwrap();

        assert_eq!(
            code.pix_code,
            "00020101021226330014BR.GOV.BCB.PIX011111999999999520400005303986540510.505802BR5904DEPX6006BRASIL62080504DEPX6304D9CA"
        );
        assert_eq!(code.qr_code_data_url, None);
        verify_payload(&code.pix_code).unwrap();
    }

    #[test]
    fn test_generate_with_renderer() {
        let generator = PaymentCodeGenerator::new(PayloadConfig::default())
            .with_renderer(QrRenderer::new(QrFormat::Svg));
        let code = generator
            .generate(&request(None, AdditionalData::Omit))
            .unwrap();

        let url = code.qr_code_data_url.unwrap();
        assert!(url.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_generate_with_image_matches_data_url() {
        let generator = PaymentCodeGenerator::new(PayloadConfig::default())
            .with_renderer(QrRenderer::new(QrFormat::Png));
        let (code, image) = generator
            .generate_with_image(&request(Some(100), AdditionalData::Fallback))
            .unwrap();

        let image = image.unwrap();
        assert_eq!(code.qr_code_data_url, Some(image.to_data_url()));
        assert_eq!(image.mime_type(), "image/png");
    }

    #[test]
    fn test_generate_from_input_rejects_invalid() {
        let generator = PaymentCodeGenerator::new(PayloadConfig::default());
        let input = RequestInput {
            pix_key: Some("11999999999"),
            amount: Some("-3"),
            ..RequestInput::default()
        };
        let result = generator.generate_from_input(&input);
        assert!(matches!(result, Err(PixError::NegativeAmount { .. })));
    }

    #[test]
    fn test_generated_code_json_shape() {
        let code = GeneratedCode {
            pix_code: "000201".to_string(),
            payment_uri: "pix://k".to_string(),
            qr_code_data_url: None,
        };
        assert_eq!(
            serde_json::to_string(&code).unwrap(),
            r#"{"pix_code":"000201","payment_uri":"pix://k"}"#
        );
    }
}
