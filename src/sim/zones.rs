//! Environmental zones and debris attractors

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A patch of ground whose health responds to nearby trees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentZone {
    pub id: u32,
    pub pos: Vec3,
    pub radius: f32,
    /// 0..=100
    pub health: f32,
}

impl EnvironmentZone {
    pub fn new(id: u32, pos: Vec3, radius: f32) -> Self {
        Self {
            id,
            pos,
            radius,
            health: ZONE_START_HEALTH,
        }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        self.pos.distance(p) <= self.radius
    }

    /// Move health by (trees × clean rate − decay) × dt, clamped
    pub fn update(&mut self, nearby_trees: usize, dt: f32) {
        let rate = nearby_trees as f32 * ZONE_CLEAN_RATE - ZONE_DECAY_RATE;
        self.health = (self.health + rate * dt).clamp(0.0, ZONE_MAX_HEALTH);
    }
}

/// Default world layout: four zones around the origin
pub fn default_zones() -> Vec<EnvironmentZone> {
    [(30.0, 30.0), (-30.0, 30.0), (30.0, -30.0), (-30.0, -30.0)]
        .iter()
        .enumerate()
        .map(|(i, &(x, z))| EnvironmentZone::new(i as u32 + 1, Vec3::new(x, 0.0, z), 15.0))
        .collect()
}

/// What kind of field pulls debris in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttractorKind {
    /// Static node where debris drifts and collects
    DebrisNode,
    /// A placed recycler building (id)
    Recycler(u32),
}

/// Localized attraction field with a capture core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attractor {
    pub kind: AttractorKind,
    pub pos: Vec3,
    /// Debris inside this radius is captured
    pub inner_radius: f32,
    /// Pull starts at this radius and grows toward the core
    pub outer_radius: f32,
}

impl Attractor {
    pub fn node(pos: Vec3, outer_radius: f32) -> Self {
        Self {
            kind: AttractorKind::DebrisNode,
            pos,
            inner_radius: ATTRACTOR_INNER_RADIUS,
            outer_radius,
        }
    }

    /// Velocity change for an entity at `p`: zero outside the range, linear falloff inside
    pub fn pull(&self, p: Vec3, strength: f32, dt: f32) -> Vec3 {
        let to_center = self.pos - p;
        let dist = to_center.length();
        if dist >= self.outer_radius || dist <= f32::EPSILON {
            return Vec3::ZERO;
        }
        let falloff = 1.0 - dist / self.outer_radius;
        to_center / dist * strength * falloff * dt
    }

    pub fn captures(&self, p: Vec3) -> bool {
        self.pos.distance(p) < self.inner_radius
    }
}

/// Default debris nodes
pub fn default_nodes() -> Vec<Attractor> {
    vec![
        Attractor::node(Vec3::new(0.0, 0.0, -45.0), 12.0),
        Attractor::node(Vec3::new(45.0, 0.0, 15.0), 12.0),
        Attractor::node(Vec3::new(-45.0, 0.0, 15.0), 12.0),
    ]
}
