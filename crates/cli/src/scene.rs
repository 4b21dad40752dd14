//! Builds an [`OrbitalSystem`] from the configured bodies.

use crate::config::BodyConfig;
use anyhow::{anyhow, bail, Context, Result};
use orbit::{OrbitalSystem, OrbiterId, OrbiterKind};
use palette::Srgb;
use std::str::FromStr;

/// A built system plus the display name of each body, in config order.
pub struct Scene {
    pub system: OrbitalSystem,
    pub bodies: Vec<(String, OrbiterId)>,
}

impl Scene {
    pub fn build(bodies: &[BodyConfig]) -> Result<Self> {
        let mut system = OrbitalSystem::new();
        let mut built: Vec<(String, OrbiterId)> = Vec::with_capacity(bodies.len());

        for (index, body) in bodies.iter().enumerate() {
            let parent = match body.parent {
                Some(parent) if parent < index => Some(built[parent].1),
                Some(parent) => bail!(
                    "Body {} refers to parent {}, which is not listed before it",
                    index,
                    parent
                ),
                None => None,
            };
            let kind = OrbiterKind::from_str(&body.kind)
                .map_err(|_| anyhow!("Unknown shape kind '{}' for body {}", body.kind, index))?;
            let fill = parse_fill(&body.fill)
                .with_context(|| format!("Invalid fill for body {}", index))?;

            let id =
                system.create_orbiter(parent, body.radius, body.angle, body.speed, kind, fill)?;
            let name = body.name.clone().unwrap_or_else(|| format!("body{}", index));
            built.push((name, id));
        }

        log::info!("Built scene with {} bodies", built.len());
        Ok(Self {
            system,
            bodies: built,
        })
    }

    /// Display name for an orbiter, if it came from this scene.
    pub fn name_of(&self, id: OrbiterId) -> Option<&str> {
        self.bodies
            .iter()
            .find(|(_, body)| *body == id)
            .map(|(name, _)| name.as_str())
    }
}

pub fn parse_fill(value: &str) -> Result<Srgb> {
    let rgb = palette::Srgb::<u8>::from_str(value.trim())
        .map_err(|e| anyhow!("'{}' is not a hex color: {}", value, e))?;
    Ok(rgb.into_format())
}

/// A sun with four planets, two of them with a moon.
pub fn demo_bodies() -> Vec<BodyConfig> {
    fn body(
        name: &str,
        parent: Option<usize>,
        radius: f64,
        speed: f64,
        kind: &str,
        fill: &str,
    ) -> BodyConfig {
        BodyConfig {
            name: Some(name.to_string()),
            parent,
            radius,
            angle: 0.0,
            speed,
            kind: kind.to_string(),
            fill: fill.to_string(),
        }
    }

    vec![
        body("sun", None, 0.0, 0.0, "circle", "#ffcc00"),
        body("mercury", Some(0), 60.0, 4.15, "circle", "#b1adad"),
        body("venus", Some(0), 110.0, 1.62, "square", "#e6c229"),
        body("earth", Some(0), 160.0, 1.0, "circle", "#2f6ee6"),
        body("moon", Some(3), 25.0, 13.4, "triangle", "#cccccc"),
        body("mars", Some(0), 230.0, 0.53, "square", "#c1440e"),
        body("phobos", Some(5), 15.0, 20.0, "triangle", "#8a7f76"),
    ]
}
