//! Calendar settings, loadable from TOML.

use serde::Deserialize;

use crate::chinese::fmt::Script;
use crate::error::ConfigError;

/// Settings for [`crate::Calendar`].
///
/// Every field has a default, so an empty TOML document is a valid config:
///
/// ```toml
/// script = "traditional"
/// cache_capacity = 500
/// utc_offset_minutes = 480
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    /// Script used for day, month, solar term and holiday names.
    #[serde(default)]
    pub script: Script,

    /// Maximum number of anni kept by the calendar cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Offset of the civil time zone from UTC, in minutes.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            script: Script::default(),
            cache_capacity: default_cache_capacity(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

fn default_cache_capacity() -> usize {
    500
}
fn default_utc_offset_minutes() -> i32 {
    480
}

impl CalendarConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity < 2 {
            return Err(ConfigError::CacheCapacity {
                capacity: self.cache_capacity,
            });
        }
        if !(-720..=840).contains(&self.utc_offset_minutes) {
            return Err(ConfigError::UtcOffset {
                minutes: self.utc_offset_minutes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = CalendarConfig::from_toml("").unwrap();
        assert_eq!(CalendarConfig::default(), config);
        assert_eq!(Script::Simplified, config.script);
        assert_eq!(500, config.cache_capacity);
        assert_eq!(480, config.utc_offset_minutes);
    }

    #[test]
    fn full_document() {
        let config = CalendarConfig::from_toml(
            r#"
            script = "traditional"
            cache_capacity = 16
            utc_offset_minutes = 540
            "#,
        )
        .unwrap();
        assert_eq!(Script::Traditional, config.script);
        assert_eq!(16, config.cache_capacity);
        assert_eq!(540, config.utc_offset_minutes);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = CalendarConfig::from_toml("timezone = 8").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err:?}");
    }

    #[test]
    fn unknown_script_is_rejected() {
        let err = CalendarConfig::from_toml(r#"script = "cyrillic""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err:?}");
    }

    #[test]
    fn out_of_range_values() {
        assert_eq!(
            Err(ConfigError::CacheCapacity { capacity: 1 }),
            CalendarConfig::from_toml("cache_capacity = 1")
        );
        assert_eq!(
            Err(ConfigError::UtcOffset { minutes: -800 }),
            CalendarConfig::from_toml("utc_offset_minutes = -800")
        );
    }
}
