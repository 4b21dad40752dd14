//! # Orbital System
//!
//! A tree of orbiters, each revolving around its parent at a fixed radius and
//! angular speed. The system owns every orbiter in a slot map; parents and
//! children refer to each other through [`OrbiterId`] keys, so the tree has no
//! ownership cycles and cannot be reparented.
//!
//! ## Per-frame flow
//!
//! 1. Build the tree top-down with [`OrbitalSystem::create_orbiter`].
//! 2. Each tick, advance the angles with [`OrbitalSystem::tick`] (or
//!    [`OrbitalSystem::update_rotation`] for single nodes).
//! 3. Each render, read back world transforms with [`OrbitalSystem::matrix`]
//!    or the ready-made [`OrbitalSystem::placements`].
//!
//! World transforms are not cached. Every call walks the ancestor chain again.

pub mod orbiter;

pub use orbiter::{Orbiter, OrbiterKind};

use glam::DVec2;
use log::{debug, trace};
use matrix::{Matrix, MatrixError};
use palette::Srgb;
use slotmap::SlotMap;
use std::fmt::{self, Display};

slotmap::new_key_type! {
    /// Identifies an orbiter within its [`OrbitalSystem`].
    pub struct OrbiterId;
}

impl OrbiterId {
    pub fn as_u64(self) -> u64 {
        self.0.as_ffi()
    }
}

impl Display for OrbiterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

/// Error type for orbital system operations.
#[derive(Debug)]
pub enum OrbitError {
    /// The key does not belong to this system
    UnknownOrbiter(OrbiterId),
    Matrix(MatrixError),
}

impl Display for OrbitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOrbiter(id) => write!(f, "Unknown orbiter: {}", id),
            Self::Matrix(err) => write!(f, "Matrix error: {}", err),
        }
    }
}

impl std::error::Error for OrbitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownOrbiter(_) => None,
            Self::Matrix(err) => Some(err),
        }
    }
}

impl From<MatrixError> for OrbitError {
    fn from(err: MatrixError) -> Self {
        Self::Matrix(err)
    }
}

/// Everything a renderer needs to draw one orbiter for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub id: OrbiterId,
    pub kind: OrbiterKind,
    pub fill: Srgb,
    /// World position of the orbiter's origin
    pub position: DVec2,
    /// Current orbit angle in radians
    pub rotation: f64,
}

/// Owns a forest of orbiters.
#[derive(Debug, Default)]
pub struct OrbitalSystem {
    nodes: SlotMap<OrbiterId, Orbiter>,

    /// Parentless orbiters in creation order
    roots: Vec<OrbiterId>,
}

impl OrbitalSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an orbiter and registers it at the end of its parent's
    /// children. Passing `None` creates a new root.
    pub fn create_orbiter(
        &mut self,
        parent: Option<OrbiterId>,
        orbit_radius: f64,
        orbit_angle: f64,
        orbit_speed: f64,
        kind: OrbiterKind,
        fill: Srgb,
    ) -> Result<OrbiterId, OrbitError> {
        if let Some(parent_id) = parent {
            if !self.nodes.contains_key(parent_id) {
                return Err(OrbitError::UnknownOrbiter(parent_id));
            }
        }

        let orbiter = Orbiter::new(parent, orbit_radius, orbit_angle, orbit_speed, kind, fill);
        let id = self.nodes.insert(orbiter);

        match parent.and_then(|parent_id| self.nodes.get_mut(parent_id)) {
            Some(parent_node) => parent_node.push_child(id),
            None => self.roots.push(id),
        }

        debug!(
            "Created {} orbiter {} (parent: {:?}, radius: {}, speed: {})",
            kind,
            id,
            parent.map(|p| p.as_u64()),
            orbit_radius,
            orbit_speed
        );
        Ok(id)
    }

    pub fn get(&self, id: OrbiterId) -> Option<&Orbiter> {
        self.nodes.get(id)
    }

    /// Mutable access is limited to what [`Orbiter`] exposes, which keeps the
    /// tree links out of reach.
    pub fn get_mut(&mut self, id: OrbiterId) -> Option<&mut Orbiter> {
        self.nodes.get_mut(id)
    }

    pub fn roots(&self) -> &[OrbiterId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of ancestors above `id`. Roots have depth 0.
    pub fn depth(&self, id: OrbiterId) -> Result<usize, OrbitError> {
        let mut current = self.orbiter(id)?.parent();
        let mut depth = 0;
        while let Some(parent_id) = current {
            depth += 1;
            current = self.orbiter(parent_id)?.parent();
        }
        Ok(depth)
    }

    /// Advances one orbiter's angle by `time_delta * orbit_speed`.
    pub fn update_rotation(&mut self, id: OrbiterId, time_delta: f64) -> Result<(), OrbitError> {
        self.nodes
            .get_mut(id)
            .ok_or(OrbitError::UnknownOrbiter(id))?
            .update_rotation(time_delta);
        Ok(())
    }

    /// Advances every orbiter once. Siblings never read each other, so the
    /// order does not matter.
    pub fn tick(&mut self, time_delta: f64) {
        for orbiter in self.nodes.values_mut() {
            orbiter.update_rotation(time_delta);
        }
        trace!("Ticked {} orbiters by {}", self.nodes.len(), time_delta);
    }

    /// Computes the world transform of `id`.
    ///
    /// Roots sit at the world origin and get the 3x3 identity. For any other
    /// orbiter the transform is its rotation applied to a radius offset along
    /// the local x axis, plus a correction carrying the parent's world
    /// position in the translation column:
    ///
    /// ```text
    /// R(angle) . [[1, 0, r], [0, 1, 0], [0, 0, 1]]  +  [[0, 0, px], [0, 0, py], [0, 0, 0]]
    /// ```
    ///
    /// The parent contributes only its position, not its orientation.
    pub fn matrix(&self, id: OrbiterId) -> Result<Matrix, OrbitError> {
        let orbiter = self.orbiter(id)?;
        let Some(parent_id) = orbiter.parent() else {
            return Ok(Matrix::identity(3));
        };

        let rotation = Matrix::rotation_h2d(orbiter.orbit_angle());
        let offset = Matrix::from([
            [1.0, 0.0, orbiter.orbit_radius()],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        let relative = rotation.dot(&offset)?;

        let parent_position = self.matrix(parent_id)?.project_h2d(0.0, 0.0)?;
        let correction = Matrix::from([
            [0.0, 0.0, parent_position.x],
            [0.0, 0.0, parent_position.y],
            [0.0, 0.0, 0.0],
        ]);

        let world = relative.plus(&correction)?;
        trace!("World transform of {}:\n{}", id, world);
        Ok(world)
    }

    /// World position of the orbiter's origin.
    pub fn world_position(&self, id: OrbiterId) -> Result<DVec2, OrbitError> {
        Ok(self.matrix(id)?.project_h2d(0.0, 0.0)?)
    }

    /// Pre-order walk over every orbiter: roots in creation order, children in
    /// registration order. Parents always come before their children, which
    /// makes this a valid paint order.
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            system: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Snapshot of every orbiter for the current frame, in depth-first order.
    pub fn placements(&self) -> Result<Vec<Placement>, OrbitError> {
        self.depth_first()
            .map(|(id, orbiter)| {
                Ok(Placement {
                    id,
                    kind: orbiter.kind(),
                    fill: orbiter.fill(),
                    position: self.world_position(id)?,
                    rotation: orbiter.orbit_angle(),
                })
            })
            .collect()
    }

    fn orbiter(&self, id: OrbiterId) -> Result<&Orbiter, OrbitError> {
        self.nodes.get(id).ok_or(OrbitError::UnknownOrbiter(id))
    }
}

/// Iterator returned by [`OrbitalSystem::depth_first`].
pub struct DepthFirst<'a> {
    system: &'a OrbitalSystem,
    stack: Vec<OrbiterId>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (OrbiterId, &'a Orbiter);

    fn next(&mut self) -> Option<Self::Item> {
        let system = self.system;
        loop {
            let id = self.stack.pop()?;
            // Keys only come from the system itself, but skip rather than panic
            let Some(orbiter) = system.nodes.get(id) else {
                continue;
            };
            self.stack.extend(orbiter.children().iter().rev());
            return Some((id, orbiter));
        }
    }
}
