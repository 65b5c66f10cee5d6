//! Parsing and discovery defaults
//!
//! Priority: explicit arguments → ENV vars → built-in defaults.
//!
//! - `IMAGE_SEQUENCE_PADDING_STYLE`: `%`, `#`, `@`, `<UDIM>` or a style name
//! - `IMAGE_SEQUENCE_CASE_SENSITIVE`: `1`/`0`/`true`/`false`

use serde::{Deserialize, Serialize};

use crate::error::{Result, SequenceError};
use crate::padding::PaddingStyle;

pub const ENV_PADDING_STYLE: &str = "IMAGE_SEQUENCE_PADDING_STYLE";
pub const ENV_CASE_SENSITIVE: &str = "IMAGE_SEQUENCE_CASE_SENSITIVE";

/// Defaults applied when a path does not decide for itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Style adopted when the frame token is a bare digit run.
    pub padding_style: PaddingStyle,
    /// Match file names case-sensitively during discovery.
    pub case_sensitive: bool,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            padding_style: PaddingStyle::Printf,
            case_sensitive: true,
        }
    }
}

impl SequenceConfig {
    /// Defaults overridden by environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(style) = lookup(ENV_PADDING_STYLE) {
            config.padding_style = PaddingStyle::from_token(style.trim())?;
        }

        if let Some(flag) = lookup(ENV_CASE_SENSITIVE) {
            config.case_sensitive = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(SequenceError::InvalidConfig(format!(
                        "{}={} is not a boolean",
                        ENV_CASE_SENSITIVE, other
                    )));
                }
            };
        }

        Ok(config)
    }

    /// Same defaults with a different padding style.
    pub fn with_padding_style(mut self, style: PaddingStyle) -> Self {
        self.padding_style = style;
        self
    }
}
