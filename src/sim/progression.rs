//! Mass, tier, score and difficulty
//!
//! Tier is never stored independently of mass: every mutation recomputes it
//! through [`tier_for_mass`]. Difficulty is likewise a pure function of
//! (mass, tier, elapsed) refreshed once per frame.

use crate::consts::*;

/// Tier for a given mass (1-based, step function of [`TIER_THRESHOLDS`])
pub fn tier_for_mass(mass: f32) -> u32 {
    let crossed = TIER_THRESHOLDS.iter().filter(|&&t| mass >= t).count() as u32;
    (1 + crossed).min(MAX_TIER)
}

/// Mass needed to reach the next tier, or None at max tier
pub fn next_tier_mass(tier: u32) -> Option<f32> {
    if tier >= MAX_TIER {
        return None;
    }
    TIER_THRESHOLDS.get(tier.saturating_sub(1) as usize).copied()
}

/// Difficulty multiplier: `1 + (mass*tier/100)*0.7 + min(t/60, 5)*0.3`
pub fn difficulty_for(mass: f32, tier: u32, elapsed_secs: f32) -> f32 {
    let mass_term = (mass * tier as f32 / 100.0) * DIFFICULTY_MASS_WEIGHT;
    let time_term = (elapsed_secs / 60.0).min(DIFFICULTY_TIME_CAP_MINUTES) * DIFFICULTY_TIME_WEIGHT;
    1.0 + mass_term + time_term
}

/// Outcome of a mass change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierChange {
    pub from: u32,
    pub to: u32,
}

impl TierChange {
    pub fn tier_up(&self) -> bool {
        self.to > self.from
    }
}

/// Run progression (reset on restart)
#[derive(Debug, Clone)]
pub struct Progression {
    mass: f32,
    tier: u32,
    pub score: u64,
    difficulty: f32,
    elapsed: f32,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    pub fn new() -> Self {
        Self {
            mass: STARTING_MASS,
            tier: tier_for_mass(STARTING_MASS),
            score: 0,
            difficulty: difficulty_for(STARTING_MASS, tier_for_mass(STARTING_MASS), 0.0),
            elapsed: 0.0,
        }
    }

    /// Start from an arbitrary mass (tests, debug)
    pub fn with_mass(mass: f32) -> Self {
        let mut p = Self::new();
        p.mass = mass.max(0.0);
        p.tier = tier_for_mass(p.mass);
        p.refresh_difficulty();
        p
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn tier(&self) -> u32 {
        self.tier
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Fraction of the way to the next tier (1.0 at max tier)
    pub fn tier_progress(&self) -> f32 {
        let Some(next) = next_tier_mass(self.tier) else {
            return 1.0;
        };
        let base = if self.tier <= 1 {
            0.0
        } else {
            TIER_THRESHOLDS[(self.tier - 2) as usize]
        };
        ((self.mass - base) / (next - base)).clamp(0.0, 1.0)
    }

    /// Add mass; negative or non-finite amounts are ignored
    pub fn add_mass(&mut self, amount: f32) -> TierChange {
        let from = self.tier;
        if amount.is_finite() && amount > 0.0 {
            self.mass += amount;
            self.tier = tier_for_mass(self.mass);
        }
        TierChange { from, to: self.tier }
    }

    /// Trade a quarter of current mass for score. Returns points awarded (0 = nothing to recycle).
    pub fn recycle(&mut self) -> u64 {
        if self.mass <= STARTING_MASS {
            return 0;
        }
        let removed = (self.mass * RECYCLE_FRACTION).floor();
        self.mass = (self.mass - removed).max(STARTING_MASS);
        self.tier = tier_for_mass(self.mass);
        let points = removed as u64 * RECYCLE_POINTS_PER_MASS;
        self.add_score(points);
        points
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Advance the clock and recompute difficulty
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.elapsed += dt;
        }
        self.refresh_difficulty();
    }

    pub fn refresh_difficulty(&mut self) {
        self.difficulty = difficulty_for(self.mass, self.tier, self.elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tier_breakpoints() {
        assert_eq!(tier_for_mass(2.9), 1);
        assert_eq!(tier_for_mass(3.0), 2);
        assert_eq!(tier_for_mass(8.0), 3);
        assert_eq!(tier_for_mass(17.9), 3);
        assert_eq!(tier_for_mass(18.0), 4);
        assert_eq!(tier_for_mass(150.0), 8);
        assert_eq!(tier_for_mass(250.0), 8);
        assert_eq!(tier_for_mass(0.0), 1);
    }

    #[test]
    fn test_recycle_ten() {
        let mut p = Progression::with_mass(10.0);
        let points = p.recycle();
        assert_eq!(points, 20);
        assert_eq!(p.mass(), 8.0);
        assert_eq!(p.tier(), 3);
        assert_eq!(p.score, 20);
    }

    #[test]
    fn test_recycle_score_saturates() {
        let mut p = Progression::with_mass(10.0);
        p.score = u64::MAX - 5;
        assert_eq!(p.recycle(), 20);
        assert_eq!(p.score, u64::MAX);
    }

    #[test]
    fn test_recycle_at_floor_is_noop() {
        let mut p = Progression::new();
        assert_eq!(p.recycle(), 0);
        assert_eq!(p.mass(), 1.0);
        assert_eq!(p.score, 0);
    }

    #[test]
    fn test_recycle_small_mass_keeps_floor() {
        // 1.5 * 0.25 floors to 0: nothing removed, no points
        let mut p = Progression::with_mass(1.5);
        assert_eq!(p.recycle(), 0);
        assert_eq!(p.mass(), 1.5);
    }

    #[test]
    fn test_add_mass_signals_tier_up() {
        let mut p = Progression::new();
        let change = p.add_mass(2.0);
        assert!(change.tier_up());
        assert_eq!(change, TierChange { from: 1, to: 2 });
        let change = p.add_mass(1.0);
        assert!(!change.tier_up());
    }

    #[test]
    fn test_add_mass_ignores_bad_amounts() {
        let mut p = Progression::new();
        p.add_mass(-5.0);
        p.add_mass(f32::NAN);
        assert_eq!(p.mass(), 1.0);
    }

    #[test]
    fn test_difficulty_baseline() {
        assert_eq!(difficulty_for(0.0, 1, 0.0), 1.0);
    }

    #[test]
    fn test_difficulty_time_saturates() {
        let at_cap = difficulty_for(0.0, 1, 300.0);
        assert!((at_cap - 2.5).abs() < 1e-6);
        assert_eq!(at_cap, difficulty_for(0.0, 1, 10_000.0));
    }

    #[test]
    fn test_difficulty_mass_term() {
        // 1 + (50*5/100)*0.7 = 2.75
        assert!((difficulty_for(50.0, 5, 0.0) - 2.75).abs() < 1e-5);
    }

    #[test]
    fn test_advance_refreshes_difficulty() {
        let mut p = Progression::new();
        let before = p.difficulty();
        p.advance(60.0);
        assert!((p.difficulty() - (before + 0.3)).abs() < 1e-5);
        assert_eq!(p.elapsed(), 60.0);
    }

    #[test]
    fn test_tier_progress() {
        let p = Progression::with_mass(5.5);
        // Tier 2 spans 3..8
        assert!((p.tier_progress() - 0.5).abs() < 1e-6);
        assert_eq!(Progression::with_mass(400.0).tier_progress(), 1.0);
    }

    proptest! {
        #[test]
        fn tier_is_monotonic(a in 0.0f32..500.0, b in 0.0f32..500.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(tier_for_mass(lo) <= tier_for_mass(hi));
        }

        #[test]
        fn recycle_never_drops_below_floor(mass in 0.0f32..1000.0) {
            let mut p = Progression::with_mass(mass);
            let before = p.mass();
            p.recycle();
            prop_assert!(p.mass() >= STARTING_MASS.min(before));
            prop_assert_eq!(p.tier(), tier_for_mass(p.mass()));
        }
    }
}
