//! Page-level carousel settings.
//!
//! Settings are plain TOML, every key optional:
//!
//! ```toml
//! block_name = "carousel-hero"
//! autoplay_interval_ms = 6000
//! visibility_threshold = 0.5
//! viewport_width = 1280.0
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default time between autoplay advances.
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 6000;

/// Default share of a slide that must be in view for it to count as shown.
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.5;

/// Settings shared by every carousel on a page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Block class name; also the prefix of carousel ids and child classes.
    pub block_name: String,
    /// Milliseconds between autoplay advances.
    pub autoplay_interval_ms: u64,
    /// Intersection ratio at which a slide counts as the visible one.
    pub visibility_threshold: f64,
    /// Width of the slide viewport, in layout units.
    pub viewport_width: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            block_name: "carousel-hero".to_string(),
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            viewport_width: 1280.0,
        }
    }
}

impl CarouselConfig {
    /// Parse and validate settings from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<()> {
        if self.block_name.trim().is_empty() {
            return Err(Error::invalid_setting("block_name", "must not be empty"));
        }
        if self.autoplay_interval_ms == 0 {
            return Err(Error::invalid_setting(
                "autoplay_interval_ms",
                "must be greater than zero",
            ));
        }
        if !(self.visibility_threshold > 0.0 && self.visibility_threshold <= 1.0) {
            return Err(Error::invalid_setting(
                "visibility_threshold",
                format!("{} is outside (0, 1]", self.visibility_threshold),
            ));
        }
        if !(self.viewport_width.is_finite() && self.viewport_width > 0.0) {
            return Err(Error::invalid_setting(
                "viewport_width",
                "must be a positive number",
            ));
        }
        Ok(())
    }

    /// The autoplay interval as a duration.
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    /// Class name for a child part, e.g. `carousel-hero-slide`.
    pub fn class(&self, part: &str) -> String {
        format!("{}-{}", self.block_name, part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CarouselConfig::default();
        assert_eq!(config.autoplay_interval(), Duration::from_millis(6000));
        assert_eq!(config.visibility_threshold, 0.5);
        assert_eq!(config.class("slide"), "carousel-hero-slide");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CarouselConfig::from_toml_str("autoplay_interval_ms = 4000").unwrap();
        assert_eq!(config.autoplay_interval_ms, 4000);
        assert_eq!(config.block_name, "carousel-hero");
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = CarouselConfig::from_toml_str("visibility_threshold = 1.5").unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { ref setting, .. } if setting == "visibility_threshold"));
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(CarouselConfig::from_toml_str("autoplay_interval_ms = 0").is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            CarouselConfig::from_toml_str("autoplay_interval_ms = \"soon\""),
            Err(Error::ConfigParse(_))
        ));
    }
}
