//! Gravity Garden - an absorb-and-grow gravity arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, progression, goals, buildings)
//! - `platform`: Browser/native platform abstraction (input, storage)
//! - `tuning`: Data-driven game balance
//! - `leaderboard`: Persisted top-10 runs
//! - `settings`: Player preferences

pub mod error;
pub mod leaderboard;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{BuildError, StorageError};
pub use leaderboard::Leaderboard;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Largest simulation step; longer frames (tab stalls) are clamped to this
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Nominal frame time used for the first frame and headless runs
    pub const NOMINAL_DT: f32 = 1.0 / 60.0;

    /// Mass breakpoints; crossing the n-th one puts the player in tier n + 2
    pub const TIER_THRESHOLDS: [f32; 8] = [3.0, 8.0, 18.0, 35.0, 60.0, 100.0, 150.0, 250.0];
    /// Highest reachable tier (the 250 breakpoint is the singularity mark)
    pub const MAX_TIER: u32 = 8;

    /// Mass at run start, and the floor a recycle can never go below
    pub const STARTING_MASS: f32 = 1.0;
    /// Share of current mass removed by a recycle
    pub const RECYCLE_FRACTION: f32 = 0.25;
    /// Score per unit of mass recycled
    pub const RECYCLE_POINTS_PER_MASS: u64 = 10;

    /// Difficulty weights
    pub const DIFFICULTY_MASS_WEIGHT: f32 = 0.7;
    pub const DIFFICULTY_TIME_WEIGHT: f32 = 0.3;
    /// Time term saturates after this many minutes
    pub const DIFFICULTY_TIME_CAP_MINUTES: f32 = 5.0;

    /// Flat score bonus for unlocking an achievement
    pub const ACHIEVEMENT_BONUS: u64 = 250;
    /// Seconds between completing a mission and picking the next one
    pub const MISSION_RESELECT_DELAY: f32 = 2.0;

    /// Oxygen cap
    pub const OXYGEN_MAX: f32 = 100.0;

    /// Minimum distance between any two buildings
    pub const BUILDING_MIN_SPACING: f32 = 5.0;
    /// Distance ahead of the player where build mode places structures
    pub const BUILD_PLACEMENT_OFFSET: f32 = 3.0;

    /// Zone health bounds and rates (per second)
    pub const ZONE_MAX_HEALTH: f32 = 100.0;
    pub const ZONE_START_HEALTH: f32 = 50.0;
    pub const ZONE_DECAY_RATE: f32 = 1.0;
    pub const ZONE_CLEAN_RATE: f32 = 2.0;

    /// Capture radius shared by recyclers and debris nodes
    pub const ATTRACTOR_INNER_RADIUS: f32 = 1.5;

    /// Pool pre-warm sizes
    pub const DEBRIS_POOL_SIZE: usize = 64;
    pub const PARTICLE_POOL_SIZE: usize = 128;
}

/// Player collision radius for a given mass (1.0 at starting mass)
#[inline]
pub fn player_radius(mass: f32) -> f32 {
    0.5 + 0.5 * mass.max(0.0).cbrt()
}

/// Lift a planar movement vector onto the XZ ground plane
#[inline]
pub fn ground_vec(v: Vec2) -> Vec3 {
    Vec3::new(v.x, 0.0, v.y)
}

/// Point on the XZ plane at `radius` and `angle` around `center`
#[inline]
pub fn point_on_ring(center: Vec3, radius: f32, angle: f32) -> Vec3 {
    center + Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}
