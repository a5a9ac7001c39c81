//! Pooled entity types and the player body

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::ResourceKind;
use crate::player_radius;

/// What a piece of debris is made of (decides its reward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DebrisKind {
    #[default]
    Plastic,
    Metal,
    Organic,
}

impl DebrisKind {
    pub const ALL: [DebrisKind; 3] = [DebrisKind::Plastic, DebrisKind::Metal, DebrisKind::Organic];

    /// Resource granted when this debris is absorbed or captured
    pub fn resource(&self) -> ResourceKind {
        match self {
            DebrisKind::Plastic => ResourceKind::Plastic,
            DebrisKind::Metal => ResourceKind::Metal,
            DebrisKind::Organic => ResourceKind::Organic,
        }
    }

    /// Chance that passive absorption yields one unit of `resource()`
    pub fn reward_chance(&self) -> f64 {
        match self {
            DebrisKind::Plastic => 0.6,
            DebrisKind::Metal => 0.5,
            DebrisKind::Organic => 0.7,
        }
    }

    /// Chance of a bonus seed on absorption
    pub fn seed_chance(&self) -> f64 {
        match self {
            DebrisKind::Organic => 0.2,
            _ => 0.0,
        }
    }

    /// RGB tint for the renderer
    pub fn tint(&self) -> u32 {
        match self {
            DebrisKind::Plastic => 0x4fc3f7,
            DebrisKind::Metal => 0xb0bec5,
            DebrisKind::Organic => 0x81c784,
        }
    }
}

/// A piece of floating debris
#[derive(Debug, Clone, Default)]
pub struct Debris {
    pub pos: Vec3,
    pub vel: Vec3,
    pub radius: f32,
    pub mass: f32,
    pub kind: DebrisKind,
    pub tint: u32,
    /// Attached to the scene (true only while active)
    pub visible: bool,
    /// Held by the player's tractor beam
    pub carried: bool,
}

impl Debris {
    /// Pool reset: back to rest, hidden
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn advance(&mut self, dt: f32, drag: f32) {
        self.pos += self.vel * dt;
        self.vel *= (1.0 - drag * dt).max(0.0);
    }
}

/// A short-lived visual particle
#[derive(Debug, Clone, Default)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Seconds left before release
    pub life: f32,
    pub tint: u32,
    pub visible: bool,
}

impl Particle {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Step kinematics; returns true once expired
    pub fn advance(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        self.vel *= 0.96;
        self.life -= dt;
        self.life <= 0.0
    }
}

/// The player's gravity body
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Unit vector on the ground plane, last direction of travel
    pub facing: Vec3,
    /// Debris currently held, if any
    pub carrying: Option<super::EntityId>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            facing: Vec3::Z,
            carrying: None,
        }
    }
}

impl Player {
    /// Collision radius for the given mass
    pub fn radius(&self, mass: f32) -> f32 {
        player_radius(mass)
    }

    /// Accelerate along `dir` (ground plane), apply drag, integrate
    pub fn steer(&mut self, dir: Vec3, accel: f32, drag: f32, dt: f32) {
        let dir = dir.normalize_or_zero();
        if dir != Vec3::ZERO {
            self.facing = dir;
        }
        self.vel += dir * accel * dt;
        self.vel *= (1.0 - drag * dt).max(0.0);
        self.pos += self.vel * dt;
    }

    /// Where build mode drops a structure
    pub fn build_point(&self, offset: f32) -> Vec3 {
        let p = self.pos + self.facing * offset;
        Vec3::new(p.x, 0.0, p.z)
    }
}

/// Mass gain for absorbing `debris_mass` at the given transfer fraction
#[inline]
pub fn absorbed_mass(debris_mass: f32, transfer: f32) -> f32 {
    debris_mass * transfer
}
