//! Simulation settings read from a JSON file.
//!
//! Every field is optional. Missing values fall back to [`SimulationConfig::default`],
//! and an empty `bodies` list selects the built-in demo scene.
//!
//! ```json
//! {
//!   "time_delta": 0.02,
//!   "ticks": 120,
//!   "log_level": "debug",
//!   "bodies": [
//!     { "name": "sun", "kind": "circle", "fill": "#ffcc00" },
//!     { "name": "planet", "parent": 0, "radius": 80, "speed": 1.5 }
//!   ]
//! }
//! ```

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use orbit::OrbiterKind;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Time advanced by each tick
    pub time_delta: f64,

    /// Number of ticks to run before reporting
    pub ticks: u32,

    /// One of off, error, warn, info, debug, trace
    pub log_level: String,

    /// Scene description, parents listed before their children
    pub bodies: Vec<BodyConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_delta: 0.016,
            ticks: 60,
            log_level: "info".to_string(),
            bodies: Vec::new(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).with_context(|| "Invalid simulation config JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| anyhow!("Unknown log level '{}'", self.log_level))
    }
}

/// One orbiter in the starting scene.
#[derive(Clone, Debug, Deserialize)]
pub struct BodyConfig {
    #[serde(default)]
    pub name: Option<String>,

    /// Index of an earlier body; absent for roots
    #[serde(default)]
    pub parent: Option<usize>,

    #[serde(default)]
    pub radius: f64,

    #[serde(default)]
    pub angle: f64,

    #[serde(default)]
    pub speed: f64,

    /// circle, square or triangle
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Hex color, with or without the leading '#'
    #[serde(default = "default_fill")]
    pub fill: String,
}

fn default_kind() -> String {
    OrbiterKind::default().to_string()
}

fn default_fill() -> String {
    "#ffffff".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SimulationConfig::from_json("{}").unwrap();

        assert_eq!(config.time_delta, 0.016);
        assert_eq!(config.ticks, 60);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
        assert!(config.bodies.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = SimulationConfig::from_json(
            r##"{
                "time_delta": 0.5,
                "ticks": 4,
                "log_level": "trace",
                "bodies": [
                    { "name": "sun", "fill": "#ffcc00" },
                    { "parent": 0, "radius": 12.5, "angle": 1.0, "speed": -2.0, "kind": "square" }
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(config.time_delta, 0.5);
        assert_eq!(config.ticks, 4);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Trace);
        assert_eq!(config.bodies.len(), 2);

        let sun = &config.bodies[0];
        assert_eq!(sun.name.as_deref(), Some("sun"));
        assert_eq!(sun.parent, None);
        assert_eq!(sun.kind, "circle");
        assert_eq!(sun.fill, "#ffcc00");

        let planet = &config.bodies[1];
        assert_eq!(planet.parent, Some(0));
        assert_eq!(planet.radius, 12.5);
        assert_eq!(planet.angle, 1.0);
        assert_eq!(planet.speed, -2.0);
        assert_eq!(planet.kind, "square");
        assert_eq!(planet.fill, "#ffffff");
    }

    #[test]
    fn test_invalid_log_level() {
        let config = SimulationConfig::from_json(r#"{ "log_level": "loud" }"#).unwrap();
        assert!(config.level_filter().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(SimulationConfig::from_json("{ ticks: 3 }").is_err());
        assert!(SimulationConfig::from_json(r#"{ "ticks": -1 }"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = SimulationConfig::load(Path::new("/nonexistent/orbit.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
