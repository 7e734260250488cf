//! Configuration for the cleaning pipeline.
//!
//! Parsing conventions (delimiter, quoting, missing-value markers) and the
//! outlier fence live here so that the pipeline operations themselves stay
//! free of hidden knobs.

use serde::{Deserialize, Serialize};

/// Tokens read as missing values, in addition to empty fields.
pub const DEFAULT_MISSING_MARKERS: [&str; 10] = [
    "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Multiplier applied to the IQR to build the outlier fences.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Maximum upload size accepted by the loader (500 MB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 500 * 1024 * 1024;

/// Configuration for the cleaning pipeline.
///
/// Use [`ExplorerConfig::builder()`] to create a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use columbus::ExplorerConfig;
///
/// let config = ExplorerConfig::builder()
///     .delimiter(b';')
///     .iqr_multiplier(3.0)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Field separator.
    /// Default: `,`
    pub delimiter: u8,

    /// Quote character; `None` disables quoting.
    /// Default: `"`
    pub quote_char: Option<u8>,

    /// Text tokens treated as missing values after trimming whitespace.
    /// Empty and whitespace-only fields are always missing.
    pub missing_markers: Vec<String>,

    /// Multiplier `k` for the fences `Q1 - k*IQR` and `Q3 + k*IQR`.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Largest input accepted by the loader, in bytes.
    /// Default: 500 MB
    pub max_input_bytes: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote_char: Some(b'"'),
            missing_markers: DEFAULT_MISSING_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl ExplorerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if matches!(self.delimiter, b'\n' | b'\r') {
            return Err(ConfigValidationError::InvalidDelimiter(self.delimiter));
        }

        if self.quote_char == Some(self.delimiter) {
            return Err(ConfigValidationError::DelimiterIsQuote(self.delimiter));
        }

        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(ConfigValidationError::InvalidIqrMultiplier(
                self.iqr_multiplier,
            ));
        }

        if self.max_input_bytes == 0 {
            return Err(ConfigValidationError::InvalidMaxInputBytes);
        }

        Ok(())
    }

    /// Whether a raw field value stands for a missing value.
    pub fn is_missing(&self, value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty() || self.missing_markers.iter().any(|m| m == trimmed)
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid delimiter: byte {0:#04x} is a line terminator")]
    InvalidDelimiter(u8),

    #[error("Delimiter {0:#04x} is also the quote character")]
    DelimiterIsQuote(u8),

    #[error("Invalid IQR multiplier: {0} (must be finite and non-negative)")]
    InvalidIqrMultiplier(f64),

    #[error("Invalid max input size: must be at least 1 byte")]
    InvalidMaxInputBytes,
}

/// Builder for [`ExplorerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ExplorerConfigBuilder {
    delimiter: Option<u8>,
    quote_char: Option<Option<u8>>,
    missing_markers: Option<Vec<String>>,
    iqr_multiplier: Option<f64>,
    max_input_bytes: Option<u64>,
}

impl ExplorerConfigBuilder {
    /// Set the field separator.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Set the quote character, or `None` to read fields verbatim.
    pub fn quote_char(mut self, quote_char: Option<u8>) -> Self {
        self.quote_char = Some(quote_char);
        self
    }

    /// Replace the missing-value markers.
    pub fn missing_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    /// Set the IQR multiplier used by the outlier filter.
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Set the largest accepted input size in bytes.
    pub fn max_input_bytes(mut self, max: u64) -> Self {
        self.max_input_bytes = Some(max);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ExplorerConfig` or an error if validation fails.
    pub fn build(self) -> Result<ExplorerConfig, ConfigValidationError> {
        let defaults = ExplorerConfig::default();
        let config = ExplorerConfig {
            delimiter: self.delimiter.unwrap_or(defaults.delimiter),
            quote_char: self.quote_char.unwrap_or(defaults.quote_char),
            missing_markers: self.missing_markers.unwrap_or(defaults.missing_markers),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            max_input_bytes: self.max_input_bytes.unwrap_or(defaults.max_input_bytes),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExplorerConfig::default();
        assert_eq!(config.delimiter, b',');
        assert_eq!(config.quote_char, Some(b'"'));
        assert_eq!(config.iqr_multiplier, 1.5);
        assert_eq!(config.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
        assert!(config.missing_markers.iter().any(|m| m == "NA"));
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = ExplorerConfig::builder().build().unwrap();
        assert_eq!(config, ExplorerConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ExplorerConfig::builder()
            .delimiter(b';')
            .quote_char(None)
            .missing_markers(["-", "?"])
            .iqr_multiplier(3.0)
            .max_input_bytes(1024)
            .build()
            .unwrap();

        assert_eq!(config.delimiter, b';');
        assert_eq!(config.quote_char, None);
        assert_eq!(config.missing_markers, vec!["-".to_string(), "?".to_string()]);
        assert_eq!(config.iqr_multiplier, 3.0);
        assert_eq!(config.max_input_bytes, 1024);
    }

    #[test]
    fn test_validation_line_terminator_delimiter() {
        let result = ExplorerConfig::builder().delimiter(b'\n').build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidDelimiter(b'\n')
        ));
    }

    #[test]
    fn test_validation_delimiter_equals_quote() {
        let result = ExplorerConfig::builder().delimiter(b'"').build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::DelimiterIsQuote(b'"')
        ));
    }

    #[test]
    fn test_validation_negative_multiplier() {
        let result = ExplorerConfig::builder().iqr_multiplier(-1.0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidIqrMultiplier(_)
        ));

        let result = ExplorerConfig::builder().iqr_multiplier(f64::NAN).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_zero_input_limit() {
        let result = ExplorerConfig::builder().max_input_bytes(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidMaxInputBytes
        ));
    }

    #[test]
    fn test_is_missing() {
        let config = ExplorerConfig::default();
        assert!(config.is_missing(""));
        assert!(config.is_missing("   "));
        assert!(config.is_missing(" NA "));
        assert!(config.is_missing("#N/A"));
        assert!(!config.is_missing("na"));
        assert!(!config.is_missing("0"));
    }

    #[test]
    fn test_config_from_json() {
        // Simulate JSON that might come from a frontend
        let json = r#"{
            "delimiter": 9,
            "quote_char": null,
            "missing_markers": ["?"],
            "iqr_multiplier": 2.0,
            "max_input_bytes": 2048
        }"#;

        let config: ExplorerConfig =
            serde_json::from_str(json).expect("Should deserialize from frontend JSON");

        assert_eq!(config.delimiter, b'\t');
        assert_eq!(config.quote_char, None);
        assert_eq!(config.missing_markers, vec!["?".to_string()]);
        assert_eq!(config.iqr_multiplier, 2.0);
        assert!(config.validate().is_ok());
    }
}
