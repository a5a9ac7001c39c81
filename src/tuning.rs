//! Data-driven game balance
//!
//! Every knob has a default, so a tuning file only needs the fields it
//! overrides.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawning ===
    /// Spawn interval at difficulty 1 (seconds)
    pub spawn_base_interval: f32,
    /// Spawn interval never drops below this
    pub spawn_min_interval: f32,
    /// No spawns while this many debris are active
    pub max_debris: usize,
    /// Spawn annulus around the player
    pub spawn_inner_radius: f32,
    pub spawn_outer_radius: f32,
    /// Vertical spread of spawned debris
    pub spawn_height: f32,
    /// Initial speed toward the player
    pub debris_approach_speed: f32,
    /// Random velocity added on top
    pub debris_jitter: f32,
    /// Debris radius range before difficulty scaling
    pub debris_min_radius: f32,
    pub debris_max_radius: f32,
    /// Debris mass per unit radius
    pub debris_density: f32,
    pub debris_drag: f32,
    /// Debris this far from the player is recycled into the pool
    pub despawn_distance: f32,

    // === Absorption ===
    /// Share of debris mass the player gains
    pub absorb_transfer: f32,
    /// Player mass must be at least debris radius × this
    pub absorb_radius_factor: f32,
    /// Score per unit of mass gained
    pub absorb_score_per_mass: f32,
    /// Impulse applied on bumping heavy debris
    pub knockback: f32,

    // === Player ===
    pub player_accel: f32,
    pub player_drag: f32,
    pub boost_multiplier: f32,
    /// Extra oxygen per second while boosting
    pub boost_oxygen_cost: f32,
    /// Baseline oxygen drain per second
    pub oxygen_drain_rate: f32,
    /// Tractor beam reach beyond the player's radius
    pub grab_range: f32,

    // === Zones ===
    pub attractor_strength: f32,

    // === Particles ===
    pub particle_burst: usize,
    pub particle_lifetime: f32,
    pub particle_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_base_interval: 2.0,
            spawn_min_interval: 0.3,
            max_debris: 60,
            spawn_inner_radius: 20.0,
            spawn_outer_radius: 40.0,
            spawn_height: 2.0,
            debris_approach_speed: 2.0,
            debris_jitter: 1.0,
            debris_min_radius: 0.3,
            debris_max_radius: 1.0,
            debris_density: 4.0,
            debris_drag: 0.2,
            despawn_distance: 90.0,

            absorb_transfer: 0.5,
            absorb_radius_factor: 0.8,
            absorb_score_per_mass: 10.0,
            knockback: 6.0,

            player_accel: 14.0,
            player_drag: 2.5,
            boost_multiplier: 2.0,
            boost_oxygen_cost: 2.0,
            oxygen_drain_rate: 0.5,
            grab_range: 3.0,

            attractor_strength: 6.0,

            particle_burst: 8,
            particle_lifetime: 0.8,
            particle_speed: 4.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Seconds between spawns at the given difficulty
    pub fn spawn_interval(&self, difficulty: f32) -> f32 {
        (self.spawn_base_interval / difficulty.max(1.0)).max(self.spawn_min_interval)
    }

    /// Radius multiplier for spawned debris
    pub fn debris_scale(&self, difficulty: f32) -> f32 {
        1.0 + (difficulty - 1.0).max(0.0) * 0.5
    }
}
