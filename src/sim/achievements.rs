//! One-shot achievements
//!
//! Unlock flags live for the whole session: a restart keeps them.

use super::goals::{GoalContext, GoalPredicate};
use super::ledger::ResourceKind;

/// Achievement template
#[derive(Debug)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub unlock_when: GoalPredicate,
}

fn first_absorb(c: &GoalContext) -> bool {
    c.stats.absorbed >= 1
}
fn tier_3(c: &GoalContext) -> bool {
    c.tier() >= 3
}
fn tier_5(c: &GoalContext) -> bool {
    c.tier() >= 5
}
fn tier_8(c: &GoalContext) -> bool {
    c.tier() >= 8
}
fn five_recycles(c: &GoalContext) -> bool {
    c.stats.recycles >= 5
}
fn five_trees(c: &GoalContext) -> bool {
    c.stats.trees_planted >= 5
}
fn score_10k(c: &GoalContext) -> bool {
    c.progression.score >= 10_000
}
fn five_minutes(c: &GoalContext) -> bool {
    c.progression.elapsed() >= 300.0
}
fn zone_restored(c: &GoalContext) -> bool {
    c.best_zone_health() >= crate::consts::ZONE_MAX_HEALTH
}
fn metal_hoard(c: &GoalContext) -> bool {
    c.resource(ResourceKind::Metal) >= 50.0
}
fn ten_captures(c: &GoalContext) -> bool {
    c.stats.captured >= 10
}

pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "snack_time",
        title: "Snack Time",
        description: "Absorb your first debris",
        unlock_when: first_absorb,
    },
    Achievement {
        id: "gaining_weight",
        title: "Gaining Weight",
        description: "Reach tier 3",
        unlock_when: tier_3,
    },
    Achievement {
        id: "gravity_well",
        title: "Gravity Well",
        description: "Reach tier 5",
        unlock_when: tier_5,
    },
    Achievement {
        id: "event_horizon",
        title: "Event Horizon",
        description: "Reach the final tier",
        unlock_when: tier_8,
    },
    Achievement {
        id: "circular_economy",
        title: "Circular Economy",
        description: "Recycle 5 times in one run",
        unlock_when: five_recycles,
    },
    Achievement {
        id: "arborist",
        title: "Arborist",
        description: "Plant 5 trees in one run",
        unlock_when: five_trees,
    },
    Achievement {
        id: "five_digits",
        title: "Five Digits",
        description: "Score 10,000 points",
        unlock_when: score_10k,
    },
    Achievement {
        id: "marathon",
        title: "Marathon",
        description: "Play for 5 minutes",
        unlock_when: five_minutes,
    },
    Achievement {
        id: "restoration",
        title: "Restoration",
        description: "Bring a zone back to full health",
        unlock_when: zone_restored,
    },
    Achievement {
        id: "tinkerer",
        title: "Tinkerer",
        description: "Hold 50 metal at once",
        unlock_when: metal_hoard,
    },
    Achievement {
        id: "collector",
        title: "Collector",
        description: "Let zones capture 10 pieces of debris",
        unlock_when: ten_captures,
    },
];

/// Unlock state for every achievement in the catalog
#[derive(Debug, Clone)]
pub struct AchievementBook {
    catalog: &'static [Achievement],
    unlocked: Vec<bool>,
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self::new(ACHIEVEMENTS)
    }
}

impl AchievementBook {
    pub fn new(catalog: &'static [Achievement]) -> Self {
        Self {
            catalog,
            unlocked: vec![false; catalog.len()],
        }
    }

    /// Test every locked predicate; returns the batch unlocked by this call
    pub fn evaluate(&mut self, ctx: &GoalContext) -> Vec<&'static Achievement> {
        let mut newly = Vec::new();
        for (def, unlocked) in self.catalog.iter().zip(self.unlocked.iter_mut()) {
            if !*unlocked && (def.unlock_when)(ctx) {
                *unlocked = true;
                newly.push(def);
            }
        }
        newly
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.iter().any(|(def, unlocked)| unlocked && def.id == id)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.iter().filter(|&&u| u).count()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// (definition, unlocked) pairs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&'static Achievement, bool)> + '_ {
        self.catalog.iter().zip(self.unlocked.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::goals::RunStats;
    use crate::sim::ledger::ResourceLedger;
    use crate::sim::progression::Progression;

    #[test]
    fn test_unlocks_exactly_once() {
        let progression = Progression::with_mass(9.0);
        let ledger = ResourceLedger::default();
        let stats = RunStats {
            absorbed: 1,
            ..Default::default()
        };
        let ctx = GoalContext {
            progression: &progression,
            stats: &stats,
            ledger: &ledger,
            zones: &[],
        };
        let mut book = AchievementBook::default();

        let first: Vec<_> = book.evaluate(&ctx).iter().map(|a| a.id).collect();
        assert_eq!(first, vec!["snack_time", "gaining_weight"]);
        assert!(book.evaluate(&ctx).is_empty());
        assert_eq!(book.unlocked_count(), 2);
        assert!(book.is_unlocked("gaining_weight"));
        assert!(!book.is_unlocked("gravity_well"));
    }

    #[test]
    fn test_nothing_unlocked_at_start() {
        let progression = Progression::new();
        let ledger = ResourceLedger::starting();
        let stats = RunStats::default();
        let ctx = GoalContext {
            progression: &progression,
            stats: &stats,
            ledger: &ledger,
            zones: &[],
        };
        let mut book = AchievementBook::default();
        assert!(book.evaluate(&ctx).is_empty());
        assert_eq!(book.len(), ACHIEVEMENTS.len());
    }
}
