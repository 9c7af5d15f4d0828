//! Deployment configuration for payload generation
//!
//! Values that identify the payment network, the currency and the merchant
//! defaults are grouped here so the builder can serve another currency or
//! domain without code changes.

use clap::ValueEnum;

/// Point-of-initiation mode carried in tag `01`
///
/// The three modes are distinct wire formats. A deployment picks one and keeps
/// it; scanners that expect one of them may reject the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InitiationMethod {
    /// Tag `01` is not emitted
    Omitted,
    /// Reusable code (`"11"`)
    Static,
    /// One-time, amount-bound code (`"12"`)
    #[default]
    Dynamic,
}

impl InitiationMethod {
    /// Value written into tag `01`, or `None` when the field is omitted
    pub fn value(self) -> Option<&'static str> {
        match self {
            InitiationMethod::Omitted => None,
            InitiationMethod::Static => Some("11"),
            InitiationMethod::Dynamic => Some("12"),
        }
    }
}

/// What a driver does with a request that carries no description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReferencePolicy {
    /// Leave the additional-data template out
    Omit,
    /// Emit the additional-data template with the fallback reference
    #[default]
    Fallback,
}

/// Fixed payload fields and merchant defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadConfig {
    /// Globally unique identifier of the payment arrangement (tag `26.00`)
    pub gui: String,
    /// Merchant category code (tag `52`)
    pub merchant_category_code: String,
    /// ISO 4217 numeric currency code (tag `53`)
    pub currency: String,
    /// ISO 3166-1 alpha-2 country code (tag `58`)
    pub country_code: String,
    /// Merchant name used when a request does not name one
    pub merchant_name: String,
    /// Merchant city used when a request does not name one
    pub merchant_city: String,
    /// Point-of-initiation mode for every payload of this deployment
    pub initiation: InitiationMethod,
    /// Additional-data behaviour for requests without a description
    pub missing_reference: ReferencePolicy,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            gui: "BR.GOV.BCB.PIX".to_string(),
            merchant_category_code: "0000".to_string(),
            currency: "986".to_string(),
            country_code: "BR".to_string(),
            merchant_name: "DEPX".to_string(),
            merchant_city: "BRASIL".to_string(),
            initiation: InitiationMethod::Dynamic,
            missing_reference: ReferencePolicy::Fallback,
        }
    }
}

impl PayloadConfig {
    /// Replace the merchant defaults, keeping every other field
    pub fn with_merchant(mut self, name: impl Into<String>, city: impl Into<String>) -> Self {
        self.merchant_name = name.into();
        self.merchant_city = city.into();
        self
    }

    /// Replace the point-of-initiation mode
    pub fn with_initiation(mut self, initiation: InitiationMethod) -> Self {
        self.initiation = initiation;
        self
    }

    /// Replace the policy for requests without a description
    pub fn with_missing_reference(mut self, policy: ReferencePolicy) -> Self {
        self.missing_reference = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::omitted(InitiationMethod::Omitted, None)]
    #[case::static_code(InitiationMethod::Static, Some("11"))]
    #[case::dynamic_code(InitiationMethod::Dynamic, Some("12"))]
    fn test_initiation_value(#[case] method: InitiationMethod, #[case] expected: Option<&str>) {
        assert_eq!(method.value(), expected);
    }

    #[test]
    fn test_default_config() {
        let config = PayloadConfig::default();
        assert_eq!(config.gui, "BR.GOV.BCB.PIX");
        assert_eq!(config.currency, "986");
        assert_eq!(config.country_code, "BR");
        assert_eq!(config.merchant_name, "DEPX");
        assert_eq!(config.merchant_city, "BRASIL");
        assert_eq!(config.initiation, InitiationMethod::Dynamic);
        assert_eq!(config.missing_reference, ReferencePolicy::Fallback);
    }

    #[test]
    fn test_builders_keep_other_fields() {
        let config = PayloadConfig::default()
            .with_merchant("Shop", "SP")
            .with_initiation(InitiationMethod::Static)
            .with_missing_reference(ReferencePolicy::Omit);

        assert_eq!(config.merchant_name, "Shop");
        assert_eq!(config.merchant_city, "SP");
        assert_eq!(config.initiation, InitiationMethod::Static);
        assert_eq!(config.missing_reference, ReferencePolicy::Omit);
        assert_eq!(config.gui, "BR.GOV.BCB.PIX");
    }
}
