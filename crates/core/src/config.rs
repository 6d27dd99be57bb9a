//! Rendering configuration for previews and print documents.
//!
//! Only presentation parameters live here. The page size, expiry offset,
//! facility name and identifier format are fixed and are not configurable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::symbology::SymbolOptions;

/// Default location of the renderer script loaded by print documents.
pub const DEFAULT_RENDERER_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/jsbarcode@3.11.5/dist/JsBarcode.all.min.js";

/// Default `<title>` of generated documents.
pub const DEFAULT_DOCUMENT_TITLE: &str = "Medical Archive Labels";

/// Errors that can occur when loading or validating a [`LabelConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON deserialization failed.
    #[error("invalid config JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field value is out of its valid range.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Dotted path of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Presentation settings shared by the preview and the print document.
///
/// Every field has a default, so an empty JSON object is a valid config.
///
/// # Example
/// ```
/// let cfg = archive_labels_core::LabelConfig::from_json(
///     r#"{ "print_symbol": { "width": 1.5 } }"#,
/// ).unwrap();
/// assert_eq!(cfg.print_symbol.module_width, 1.5);
/// assert_eq!(cfg.preview_symbol.module_width, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Symbol options for on-screen preview surfaces.
    pub preview_symbol: SymbolOptions,
    /// Symbol options used inside the print document.
    pub print_symbol: SymbolOptions,
    /// Script the print document loads its own renderer from.
    pub renderer_script_url: String,
    /// Title of generated documents.
    pub document_title: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            preview_symbol: SymbolOptions::preview(),
            print_symbol: SymbolOptions::print(),
            renderer_script_url: DEFAULT_RENDERER_SCRIPT_URL.to_string(),
            document_title: DEFAULT_DOCUMENT_TITLE.to_string(),
        }
    }
}

impl LabelConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: LabelConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_symbol("preview_symbol", &self.preview_symbol)?;
        validate_symbol("print_symbol", &self.print_symbol)?;
        if self.renderer_script_url.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "renderer_script_url".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

fn validate_symbol(name: &str, opts: &SymbolOptions) -> Result<(), ConfigError> {
    if !(opts.module_width.is_finite() && opts.module_width > 0.0) {
        return Err(ConfigError::InvalidField {
            field: format!("{name}.width"),
            reason: format!("must be a positive number, got {}", opts.module_width),
        });
    }
    if opts.height == 0 {
        return Err(ConfigError::InvalidField {
            field: format!("{name}.height"),
            reason: "must be greater than 0".into(),
        });
    }
    Ok(())
}
