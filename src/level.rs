//! Level layouts
//!
//! Levels are authored in normalized units: planet `x` and `radius_factor`
//! are fractions of the world width, and `y` is measured from the vertical
//! centre of the world in the same width-relative units (0.5 = centre).
//! This keeps layouts stable across aspect ratios.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, check_setting};
use crate::parse_hex_color;

/// Asteroid colour used when levels don't tint their asteroids.
/// Stands in for the host theme's default asteroid tint.
pub const DEFAULT_ASTEROID_COLOR: u32 = 0x6B6B7B;

/// A planet as authored in a level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetConfig {
    pub x: f32,
    pub y: f32,
    pub radius_factor: f32,
    pub gravity_factor: f32,
    pub color: String,
}

/// Angular range (degrees) asteroids may arrive from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnSector {
    pub start: f32,
    pub end: f32,
}

impl SpawnSector {
    pub const FULL_CIRCLE: SpawnSector = SpawnSector {
        start: 0.0,
        end: 360.0,
    };
}

/// Everything the simulation needs from a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub id: u32,
    #[serde(default)]
    pub title: String,
    /// Baseline pollution present for the whole run (0..=1)
    #[serde(default)]
    pub global_pollution: f32,
    pub planets: Vec<PlanetConfig>,
    /// Empty means asteroids may come from any direction
    #[serde(default)]
    pub asteroid_spawn_sectors: Vec<SpawnSector>,
    /// Tint for this level's asteroids
    #[serde(default)]
    pub asteroid_color: Option<String>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        builtin_levels().swap_remove(0)
    }
}

impl LevelConfig {
    /// Check the layout before a run is built from it
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.planets.is_empty() {
            return Err(ConfigError::NoPlanets);
        }
        for (index, planet) in self.planets.iter().enumerate() {
            if !(planet.x.is_finite() && planet.y.is_finite()) {
                return Err(ConfigError::InvalidPlanet {
                    index,
                    reason: "position is not finite",
                });
            }
            if !(planet.radius_factor.is_finite() && planet.radius_factor > 0.0) {
                return Err(ConfigError::InvalidPlanet {
                    index,
                    reason: "radius must be positive",
                });
            }
            if !(planet.gravity_factor.is_finite() && planet.gravity_factor >= 0.0) {
                return Err(ConfigError::InvalidPlanet {
                    index,
                    reason: "gravity factor must be >= 0",
                });
            }
            parse_color(&planet.color)?;
        }
        for (index, sector) in self.asteroid_spawn_sectors.iter().enumerate() {
            if !(sector.start.is_finite() && sector.end.is_finite()) || sector.start > sector.end {
                return Err(ConfigError::InvalidSector {
                    index,
                    start: sector.start,
                    end: sector.end,
                });
            }
        }
        check_setting("global_pollution", self.global_pollution, true)?;
        if let Some(color) = &self.asteroid_color {
            parse_color(color)?;
        }
        Ok(())
    }

    /// Spawn sectors, falling back to the full circle
    pub fn spawn_sectors(&self) -> &[SpawnSector] {
        if self.asteroid_spawn_sectors.is_empty() {
            std::slice::from_ref(&SpawnSector::FULL_CIRCLE)
        } else {
            &self.asteroid_spawn_sectors
        }
    }

    pub fn asteroid_color(&self) -> u32 {
        self.asteroid_color
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(DEFAULT_ASTEROID_COLOR)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }
}

pub(crate) fn parse_color(value: &str) -> Result<u32, ConfigError> {
    parse_hex_color(value).ok_or_else(|| ConfigError::InvalidColor {
        value: value.to_string(),
    })
}

fn planet(x: f32, y: f32, radius_factor: f32, gravity_factor: f32, color: &str) -> PlanetConfig {
    PlanetConfig {
        x,
        y,
        radius_factor,
        gravity_factor,
        color: color.to_string(),
    }
}

/// The stock level catalog
pub fn builtin_levels() -> Vec<LevelConfig> {
    let usual_sectors = vec![
        SpawnSector {
            start: -160.0,
            end: -20.0,
        },
        SpawnSector {
            start: 110.0,
            end: 250.0,
        },
    ];

    vec![
        LevelConfig {
            id: 1,
            title: "Calm Belt".to_string(),
            global_pollution: 0.0,
            planets: vec![planet(0.5, 0.5, 0.1, 1.0, "#4A4E69")],
            asteroid_spawn_sectors: usual_sectors.clone(),
            asteroid_color: Some("#525F7F".to_string()),
        },
        LevelConfig {
            id: 2,
            title: "Double Trouble".to_string(),
            global_pollution: 0.0,
            planets: vec![
                planet(0.5, 0.40, 0.1, 1.0, "#4A694E"),
                planet(0.4, 1.0, 0.075, 0.75, "#3A593E"),
            ],
            asteroid_spawn_sectors: vec![
                SpawnSector {
                    start: -170.0,
                    end: 10.0,
                },
                SpawnSector {
                    start: 100.0,
                    end: 170.0,
                },
            ],
            asteroid_color: Some("#586454".to_string()),
        },
        LevelConfig {
            id: 3,
            title: "Dust Cloud".to_string(),
            global_pollution: 0.4,
            planets: vec![planet(0.5, 0.5, 0.1, 1.0, "#4E3A59")],
            asteroid_spawn_sectors: usual_sectors.clone(),
            asteroid_color: Some("#645464".to_string()),
        },
        LevelConfig {
            id: 4,
            title: "Red Giant".to_string(),
            global_pollution: 1.0,
            planets: vec![planet(0.5, 0.5, 0.1, 1.0, "#59423A")],
            asteroid_spawn_sectors: usual_sectors,
            asteroid_color: Some("#645A54".to_string()),
        },
    ]
}

/// Look up a stock level by id
pub fn builtin_level(id: u32) -> Option<LevelConfig> {
    builtin_levels().into_iter().find(|l| l.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_validate() {
        for level in builtin_levels() {
            assert!(level.validate().is_ok(), "level {} invalid", level.id);
        }
        assert_eq!(builtin_level(2).map(|l| l.planets.len()), Some(2));
        assert!(builtin_level(99).is_none());
    }

    #[test]
    fn test_empty_sectors_fall_back_to_full_circle() {
        let mut level = LevelConfig::default();
        level.asteroid_spawn_sectors.clear();
        assert_eq!(level.spawn_sectors(), &[SpawnSector::FULL_CIRCLE]);
    }

    #[test]
    fn test_rejects_level_without_planets() {
        let json = r#"{ "id": 9, "planets": [] }"#;
        assert!(matches!(
            LevelConfig::from_json(json),
            Err(ConfigError::NoPlanets)
        ));
    }

    #[test]
    fn test_rejects_inverted_sector_and_bad_color() {
        let level = LevelConfig {
            asteroid_spawn_sectors: vec![SpawnSector {
                start: 90.0,
                end: 10.0,
            }],
            ..Default::default()
        };
        assert!(matches!(
            level.validate(),
            Err(ConfigError::InvalidSector { index: 0, .. })
        ));

        let mut level = LevelConfig::default();
        level.planets[0].color = "blue".to_string();
        assert!(matches!(level.validate(), Err(ConfigError::InvalidColor { .. })));
    }

    #[test]
    fn test_asteroid_color_fallback() {
        let mut level = LevelConfig::default();
        assert_eq!(level.asteroid_color(), 0x525F7F);
        level.asteroid_color = None;
        assert_eq!(level.asteroid_color(), DEFAULT_ASTEROID_COLOR);
    }
}
