//! Conversion and delivery settings.

use std::path::Path;

use ecow::EcoString;
use serde::Deserialize;

use crate::Result;

/// The default location the extracted images are published under.
pub const DEFAULT_ASSET_BASE: &str = "https://content.creditloan.com/wp-content/uploads/";

/// The default body of a delivered message.
pub const DEFAULT_MESSAGE_BODY: &str = "Your converted, sanitized HTML is attached! :)";

/// Features for the conversion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConvertFeat {
    /// The URL prefix of every emitted `<img src>`.
    pub asset_base: EcoString,
    /// Joins the rendered top-level elements.
    pub line_separator: EcoString,
    /// Runs the output cleanup pass.
    pub sanitize: bool,
}

impl Default for ConvertFeat {
    fn default() -> Self {
        Self {
            asset_base: DEFAULT_ASSET_BASE.into(),
            line_separator: "\r".into(),
            sanitize: true,
        }
    }
}

/// Settings for handing a conversion over to a transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Who receives the message.
    pub recipient: Option<EcoString>,
    /// The plain-text body of the message.
    pub body: EcoString,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            recipient: None,
            body: DEFAULT_MESSAGE_BODY.into(),
        }
    }
}

/// The content of a configuration file.
///
/// ```toml
/// [convert]
/// asset_base = "https://cdn.example.com/uploads/"
///
/// [delivery]
/// recipient = "me@example.com"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion features.
    pub convert: ConvertFeat,
    /// Delivery settings.
    pub delivery: DeliveryConfig,
}

impl Config {
    /// Parses a configuration from TOML.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read config {}: {err}", path.display()))?;
        Self::from_toml(&content)
    }
}
