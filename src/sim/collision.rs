//! Player/debris contact tests and reward rolls
//!
//! Contact is a plain sphere overlap. What happens on contact depends on
//! whether the player is heavy enough for the debris: absorb it, or bounce
//! off it with no mass transfer.

use glam::Vec3;
use rand::Rng;

use super::entities::{Debris, DebrisKind};
use super::ledger::ResourceKind;
use crate::tuning::Tuning;

/// Outcome of a player/debris overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Debris is swallowed
    Absorb,
    /// Debris is too big; `impulse` is applied to the player
    Bounce { impulse: Vec3 },
}

/// Absorption rule: player mass must reach `radius × factor`
#[inline]
pub fn can_absorb(player_mass: f32, debris_radius: f32, radius_factor: f32) -> bool {
    player_mass >= debris_radius * radius_factor
}

#[inline]
pub fn spheres_overlap(a: Vec3, ra: f32, b: Vec3, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Test one piece of debris against the player
pub fn check_contact(
    player_pos: Vec3,
    player_radius: f32,
    player_mass: f32,
    debris: &Debris,
    tuning: &Tuning,
) -> Option<Contact> {
    if debris.carried || !spheres_overlap(player_pos, player_radius, debris.pos, debris.radius) {
        return None;
    }
    if can_absorb(player_mass, debris.radius, tuning.absorb_radius_factor) {
        Some(Contact::Absorb)
    } else {
        let away = (player_pos - debris.pos).normalize_or(Vec3::X);
        Some(Contact::Bounce {
            impulse: away * tuning.knockback,
        })
    }
}

/// Resources granted by passive absorption (probabilistic)
pub fn roll_reward(kind: DebrisKind, rng: &mut impl Rng) -> Vec<(ResourceKind, f32)> {
    let mut reward = Vec::with_capacity(2);
    if rng.random_bool(kind.reward_chance()) {
        reward.push((kind.resource(), 1.0));
    }
    let seed_chance = kind.seed_chance();
    if seed_chance > 0.0 && rng.random_bool(seed_chance) {
        reward.push((ResourceKind::Seeds, 1.0));
    }
    reward
}

/// Resources granted when a recycler or node captures debris
pub fn capture_reward(kind: DebrisKind) -> [(ResourceKind, f32); 2] {
    [(kind.resource(), 2.0), (ResourceKind::Seeds, 0.5)]
}
