//! Mission catalog and the single-active-mission tracker
//!
//! The catalog is ordered by difficulty. The current mission is always the
//! first entry that is not completed and whose tier requirement is met, so
//! selection is a pure function of (completed set, tier).

use super::goals::{GoalContext, GoalPredicate};
use crate::consts::MISSION_RESELECT_DELAY;

/// Immutable mission template
#[derive(Debug)]
pub struct Mission {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tier_required: u32,
    pub reward: u64,
    pub completed_when: GoalPredicate,
}

fn five_absorbed(c: &GoalContext) -> bool {
    c.stats.absorbed >= 5
}
fn mass_8(c: &GoalContext) -> bool {
    c.mass() >= 8.0
}
fn recycled_once(c: &GoalContext) -> bool {
    c.stats.recycles >= 1
}
fn planted_tree(c: &GoalContext) -> bool {
    c.stats.trees_planted >= 1
}
fn three_buildings(c: &GoalContext) -> bool {
    c.stats.buildings_placed >= 3
}
fn mass_35(c: &GoalContext) -> bool {
    c.mass() >= 35.0
}
fn clean_zone(c: &GoalContext) -> bool {
    c.best_zone_health() >= 90.0
}
fn fifty_resources(c: &GoalContext) -> bool {
    c.stats.resources_collected >= 50.0
}
fn ten_minutes(c: &GoalContext) -> bool {
    c.progression.elapsed() >= 600.0
}
fn singularity(c: &GoalContext) -> bool {
    c.mass() >= 250.0
}

/// The fixed mission catalog, easiest first
pub static MISSIONS: &[Mission] = &[
    Mission {
        id: "first_bite",
        title: "First Bite",
        description: "Absorb 5 pieces of debris",
        tier_required: 1,
        reward: 100,
        completed_when: five_absorbed,
    },
    Mission {
        id: "growing_pains",
        title: "Growing Pains",
        description: "Reach a mass of 8",
        tier_required: 1,
        reward: 200,
        completed_when: mass_8,
    },
    Mission {
        id: "reduce_reuse",
        title: "Reduce, Reuse",
        description: "Recycle some of your mass",
        tier_required: 2,
        reward: 250,
        completed_when: recycled_once,
    },
    Mission {
        id: "green_thumb",
        title: "Green Thumb",
        description: "Plant a tree",
        tier_required: 2,
        reward: 300,
        completed_when: planted_tree,
    },
    Mission {
        id: "infrastructure",
        title: "Infrastructure",
        description: "Place 3 buildings",
        tier_required: 3,
        reward: 500,
        completed_when: three_buildings,
    },
    Mission {
        id: "heavyweight",
        title: "Heavyweight",
        description: "Reach a mass of 35",
        tier_required: 4,
        reward: 800,
        completed_when: mass_35,
    },
    Mission {
        id: "clean_air",
        title: "Clean Air",
        description: "Restore any zone to 90% health",
        tier_required: 4,
        reward: 1000,
        completed_when: clean_zone,
    },
    Mission {
        id: "scrap_baron",
        title: "Scrap Baron",
        description: "Collect 50 resources",
        tier_required: 5,
        reward: 1200,
        completed_when: fifty_resources,
    },
    Mission {
        id: "survivor",
        title: "Survivor",
        description: "Keep going for 10 minutes",
        tier_required: 5,
        reward: 1500,
        completed_when: ten_minutes,
    },
    Mission {
        id: "singularity",
        title: "Singularity",
        description: "Reach a mass of 250",
        tier_required: 6,
        reward: 5000,
        completed_when: singularity,
    },
];

/// Index of the first eligible mission in `catalog`
pub fn select_mission(catalog: &[Mission], completed: &[&str], tier: u32) -> Option<usize> {
    catalog
        .iter()
        .position(|m| m.tier_required <= tier && !completed.contains(&m.id))
}

/// Tracks the active mission and the completed set for one run
#[derive(Debug, Clone)]
pub struct MissionTracker {
    catalog: &'static [Mission],
    completed: Vec<&'static str>,
    current: Option<usize>,
    /// Countdown before the next mission is picked
    reselect_in: Option<f32>,
}

impl Default for MissionTracker {
    fn default() -> Self {
        Self::new(MISSIONS)
    }
}

impl MissionTracker {
    pub fn new(catalog: &'static [Mission]) -> Self {
        Self {
            catalog,
            completed: Vec::new(),
            current: None,
            reselect_in: None,
        }
    }

    pub fn current(&self) -> Option<&'static Mission> {
        self.current.map(|i| &self.catalog[i])
    }

    pub fn completed(&self) -> &[&'static str] {
        &self.completed
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains(&id)
    }

    /// True while waiting out the post-completion delay
    pub fn is_between_missions(&self) -> bool {
        self.reselect_in.is_some()
    }

    /// Pick a mission if none is active. Returns the newly started one.
    pub fn select(&mut self, tier: u32) -> Option<&'static Mission> {
        if self.current.is_some() || self.reselect_in.is_some() {
            return None;
        }
        self.current = select_mission(self.catalog, &self.completed, tier);
        self.current()
    }

    /// Tick the reselect delay, then (re)select. Returns a newly started mission.
    pub fn update(&mut self, dt: f32, tier: u32) -> Option<&'static Mission> {
        if let Some(remaining) = self.reselect_in.as_mut() {
            *remaining -= dt;
            if *remaining > 0.0 {
                return None;
            }
            self.reselect_in = None;
        }
        self.select(tier)
    }

    /// Complete the active mission if its predicate holds. The caller awards the reward.
    pub fn check(&mut self, ctx: &GoalContext) -> Option<&'static Mission> {
        let mission = self.current()?;
        if !(mission.completed_when)(ctx) {
            return None;
        }
        self.completed.push(mission.id);
        self.current = None;
        self.reselect_in = Some(MISSION_RESELECT_DELAY);
        Some(mission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::goals::RunStats;
    use crate::sim::ledger::ResourceLedger;
    use crate::sim::progression::Progression;

    #[test]
    fn test_selection_is_first_eligible() {
        assert_eq!(select_mission(MISSIONS, &[], 1), Some(0));
        assert_eq!(select_mission(MISSIONS, &["first_bite"], 1), Some(1));
        // Tier-2 missions are locked at tier 1
        assert_eq!(select_mission(MISSIONS, &["first_bite", "growing_pains"], 1), None);
        assert_eq!(select_mission(MISSIONS, &["first_bite", "growing_pains"], 2), Some(2));
    }

    #[test]
    fn test_selection_is_deterministic() {
        let completed = ["first_bite", "reduce_reuse"];
        let first = select_mission(MISSIONS, &completed, 3);
        for _ in 0..10 {
            assert_eq!(select_mission(MISSIONS, &completed, 3), first);
        }
        assert_eq!(first, Some(1));
    }

    #[test]
    fn test_catalog_ids_unique() {
        for (i, a) in MISSIONS.iter().enumerate() {
            for b in &MISSIONS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_complete_then_reselect_after_delay() {
        let progression = Progression::new();
        let ledger = ResourceLedger::default();
        let mut stats = RunStats::default();
        let mut tracker = MissionTracker::default();

        let started = tracker.update(0.0, 1).unwrap();
        assert_eq!(started.id, "first_bite");

        let ctx = GoalContext {
            progression: &progression,
            stats: &stats,
            ledger: &ledger,
            zones: &[],
        };
        assert!(tracker.check(&ctx).is_none());

        stats.absorbed = 5;
        let ctx = GoalContext {
            progression: &progression,
            stats: &stats,
            ledger: &ledger,
            zones: &[],
        };
        let done = tracker.check(&ctx).unwrap();
        assert_eq!(done.reward, 100);
        assert!(tracker.current().is_none());
        assert!(tracker.is_completed("first_bite"));

        // Still waiting
        assert!(tracker.update(1.5, 1).is_none());
        assert!(tracker.current().is_none());
        // Delay elapsed
        let next = tracker.update(0.6, 1).unwrap();
        assert_eq!(next.id, "growing_pains");
    }

    #[test]
    fn test_locked_mission_starts_after_tier_up() {
        let mut tracker = MissionTracker::default();
        tracker.completed = vec!["first_bite", "growing_pains"];
        assert!(tracker.update(0.016, 1).is_none());
        assert_eq!(tracker.update(0.016, 2).map(|m| m.id), Some("reduce_reuse"));
        // Selecting again doesn't restart it
        assert!(tracker.update(0.016, 2).is_none());
    }
}
