//! Read-only view handed to mission and achievement predicates

use super::ledger::{ResourceKind, ResourceLedger};
use super::progression::Progression;
use super::zones::EnvironmentZone;

/// Per-run counters (reset on restart)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    /// Debris absorbed by the player
    pub absorbed: u32,
    /// Debris captured by recyclers or debris nodes
    pub captured: u32,
    /// Bumps against debris too heavy to absorb
    pub collisions: u32,
    pub recycles: u32,
    pub buildings_placed: u32,
    pub trees_planted: u32,
    /// Sum of every positive resource credit (oxygen excluded)
    pub resources_collected: f32,
}

/// Everything a goal predicate may look at
#[derive(Debug, Clone, Copy)]
pub struct GoalContext<'a> {
    pub progression: &'a Progression,
    pub stats: &'a RunStats,
    pub ledger: &'a ResourceLedger,
    pub zones: &'a [EnvironmentZone],
}

impl GoalContext<'_> {
    pub fn mass(&self) -> f32 {
        self.progression.mass()
    }

    pub fn tier(&self) -> u32 {
        self.progression.tier()
    }

    pub fn resource(&self, kind: ResourceKind) -> f32 {
        self.ledger.get(kind)
    }

    /// Healthiest zone, 0 when there are none
    pub fn best_zone_health(&self) -> f32 {
        self.zones.iter().map(|z| z.health).fold(0.0, f32::max)
    }
}

/// Predicate over the goal context
pub type GoalPredicate = fn(&GoalContext) -> bool;
