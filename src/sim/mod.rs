//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (pool acquisition order)
//! - No rendering or platform dependencies

pub mod achievements;
pub mod buildings;
pub mod collision;
pub mod entities;
pub mod goals;
pub mod ledger;
pub mod missions;
pub mod pool;
pub mod progression;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod zones;

pub use achievements::{ACHIEVEMENTS, Achievement, AchievementBook};
pub use buildings::{Building, BuildingConfig, BuildingKind, BuildingSet, validate_placement};
pub use collision::{Contact, can_absorb, check_contact};
pub use entities::{Debris, DebrisKind, Particle, Player};
pub use goals::{GoalContext, RunStats};
pub use ledger::{ResourceChange, ResourceKind, ResourceLedger};
pub use missions::{MISSIONS, Mission, MissionTracker};
pub use pool::{EntityId, Pool};
pub use progression::{Progression, TierChange, difficulty_for, tier_for_mass};
pub use spawner::Spawner;
pub use state::{GameEvent, GamePhase, GameState, HudSnapshot};
pub use tick::{TickInput, tick};
pub use zones::{Attractor, AttractorKind, EnvironmentZone};
