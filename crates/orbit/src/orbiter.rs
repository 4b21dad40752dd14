use crate::OrbiterId;
use palette::Srgb;
use strum_macros::{Display, EnumIter, EnumString};

/// The shape drawn for an orbiter.
///
/// Pure data for the renderer, nothing in the orbit math depends on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OrbiterKind {
    Circle,
    Square,
    Triangle,
}

impl Default for OrbiterKind {
    fn default() -> Self {
        Self::Circle
    }
}

/// A body revolving around its parent at a fixed radius.
///
/// Orbiters live inside an [`OrbitalSystem`](crate::OrbitalSystem), which owns
/// them and records the parent/child links. Only the angle changes after
/// creation.
#[derive(Clone, Debug)]
pub struct Orbiter {
    /// Distance from the parent's origin
    orbit_radius: f64,

    /// Current angle in radians, never wrapped
    orbit_angle: f64,

    /// Radians per unit of time
    orbit_speed: f64,

    kind: OrbiterKind,
    fill: Srgb,

    /// Lookup-only link to the parent; `None` for roots
    parent: Option<OrbiterId>,

    /// Owned children in registration order
    children: Vec<OrbiterId>,
}

impl Orbiter {
    pub(crate) fn new(
        parent: Option<OrbiterId>,
        orbit_radius: f64,
        orbit_angle: f64,
        orbit_speed: f64,
        kind: OrbiterKind,
        fill: Srgb,
    ) -> Self {
        Self {
            orbit_radius,
            orbit_angle,
            orbit_speed,
            kind,
            fill,
            parent,
            children: Vec::new(),
        }
    }

    pub(crate) fn push_child(&mut self, child: OrbiterId) {
        self.children.push(child);
    }

    pub fn orbit_radius(&self) -> f64 {
        self.orbit_radius
    }

    pub fn orbit_angle(&self) -> f64 {
        self.orbit_angle
    }

    pub fn orbit_speed(&self) -> f64 {
        self.orbit_speed
    }

    pub fn kind(&self) -> OrbiterKind {
        self.kind
    }

    pub fn fill(&self) -> Srgb {
        self.fill
    }

    pub fn parent(&self) -> Option<OrbiterId> {
        self.parent
    }

    pub fn children(&self) -> &[OrbiterId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Advances the angle by `time_delta * orbit_speed`.
    ///
    /// Only this orbiter moves; children are ticked separately.
    pub fn update_rotation(&mut self, time_delta: f64) {
        self.orbit_angle += time_delta * self.orbit_speed;
    }
}
