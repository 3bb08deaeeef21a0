//! Configuration error types
//!
//! The simulation itself never fails: degenerate numbers are handled by
//! policy. Everything that can go wrong happens while turning external
//! configuration into a runnable level, and is reported here before a
//! [`GameState`](crate::sim::GameState) is ever built.

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// Settings or level JSON could not be parsed.
    Parse(serde_json::Error),

    /// A level has no planets; the play area would be empty.
    NoPlanets,

    /// A planet has a radius or gravity factor that is not usable.
    InvalidPlanet {
        index: usize,
        reason: &'static str,
    },

    /// An asteroid spawn sector ends before it starts.
    InvalidSector { index: usize, start: f32, end: f32 },

    /// A colour string is not `#RRGGBB`.
    InvalidColor { value: String },

    /// A numeric setting is negative, zero where it must be positive, or not finite.
    InvalidSetting {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },

    /// The viewport has no area.
    DegenerateViewport { width: f32, height: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "failed to parse configuration: {e}"),
            ConfigError::NoPlanets => write!(f, "level defines no planets"),
            ConfigError::InvalidPlanet { index, reason } => {
                write!(f, "planet #{index} is invalid: {reason}")
            }
            ConfigError::InvalidSector { index, start, end } => write!(
                f,
                "spawn sector #{index} is inverted (start {start}° > end {end}°)"
            ),
            ConfigError::InvalidColor { value } => {
                write!(f, "colour {value:?} is not in #RRGGBB form")
            }
            ConfigError::InvalidSetting {
                name,
                value,
                expected,
            } => write!(f, "setting `{name}` = {value} (expected {expected})"),
            ConfigError::DegenerateViewport { width, height } => {
                write!(f, "viewport {width}x{height} has no area")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Reject non-finite or out-of-range numeric settings.
pub(crate) fn check_setting(
    name: &'static str,
    value: f32,
    allow_zero: bool,
) -> Result<(), ConfigError> {
    let ok = value.is_finite() && if allow_zero { value >= 0.0 } else { value > 0.0 };
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidSetting {
            name,
            value,
            expected: if allow_zero {
                "a finite value >= 0"
            } else {
                "a finite value > 0"
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_setting() {
        assert!(check_setting("fuel_seconds", 0.0, true).is_ok());
        assert!(check_setting("speed_regulator", 0.0, false).is_err());
        assert!(check_setting("speed_regulator", f32::NAN, false).is_err());
        assert!(check_setting("fuel_seconds", -1.0, true).is_err());
    }

    #[test]
    fn test_display_mentions_setting_name() {
        let err = check_setting("mode2_thrust_multiplier", -0.5, false).unwrap_err();
        assert!(err.to_string().contains("mode2_thrust_multiplier"));
    }

    #[test]
    fn test_parse_error_has_source() {
        use std::error::Error;
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ConfigError::from(json_err);
        assert!(err.source().is_some());
    }
}
