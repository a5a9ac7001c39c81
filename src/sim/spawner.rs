//! Timed debris spawning around the player

use glam::Vec3;
use rand::Rng;

use super::entities::{Debris, DebrisKind};
use super::pool::{EntityId, Pool};
use crate::point_on_ring;
use crate::tuning::Tuning;

/// Uniform sample in [lo, hi) that tolerates lo == hi
#[inline]
fn lerp_rand(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * rng.random::<f32>()
}

/// Spawn clock; the interval shrinks as difficulty rises
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    timer: f32,
}

impl Spawner {
    /// Advance the clock. Returns true when a spawn is due.
    pub fn update(&mut self, dt: f32, difficulty: f32, tuning: &Tuning) -> bool {
        self.timer += dt;
        let interval = tuning.spawn_interval(difficulty);
        if self.timer >= interval {
            self.timer -= interval;
            // Don't bank more than one spawn after a stall
            self.timer = self.timer.min(interval);
            true
        } else {
            false
        }
    }
}

/// Place one debris on the spawn annulus around `player_pos`.
/// Returns None when the active cap is reached.
pub fn spawn_debris(
    pool: &mut Pool<Debris>,
    rng: &mut impl Rng,
    player_pos: Vec3,
    difficulty: f32,
    tuning: &Tuning,
) -> Option<EntityId> {
    if pool.active_count() >= tuning.max_debris {
        return None;
    }

    let angle = lerp_rand(rng, 0.0, std::f32::consts::TAU);
    let dist = lerp_rand(rng, tuning.spawn_inner_radius, tuning.spawn_outer_radius);
    let mut pos = point_on_ring(player_pos, dist, angle);
    pos.y += lerp_rand(rng, -tuning.spawn_height, tuning.spawn_height);

    let toward = (player_pos - pos).normalize_or_zero() * tuning.debris_approach_speed;
    let j = tuning.debris_jitter;
    let jitter = Vec3::new(
        lerp_rand(rng, -j, j),
        lerp_rand(rng, -j, j) * 0.25,
        lerp_rand(rng, -j, j),
    );

    let radius = lerp_rand(rng, tuning.debris_min_radius, tuning.debris_max_radius)
        * tuning.debris_scale(difficulty);
    let kind = DebrisKind::ALL[rng.random_range(0..DebrisKind::ALL.len())];

    let id = pool.acquire();
    if let Some(d) = pool.get_mut(id) {
        d.pos = pos;
        d.vel = toward + jitter;
        d.radius = radius;
        d.mass = radius * tuning.debris_density;
        d.kind = kind;
        d.tint = kind.tint();
        d.visible = true;
        d.carried = false;
    }
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn debris_pool() -> Pool<Debris> {
        Pool::new(4, Debris::default, Debris::reset)
    }

    #[test]
    fn test_spawn_lands_on_annulus() {
        let tuning = Tuning::default();
        let mut pool = debris_pool();
        let mut rng = Pcg32::seed_from_u64(7);
        let player = Vec3::new(10.0, 0.0, -5.0);

        for _ in 0..50 {
            let id = spawn_debris(&mut pool, &mut rng, player, 1.0, &tuning).unwrap();
            let d = pool.get(id).unwrap();
            let planar = Vec3::new(d.pos.x - player.x, 0.0, d.pos.z - player.z).length();
            assert!(planar >= tuning.spawn_inner_radius - 1e-3);
            assert!(planar <= tuning.spawn_outer_radius + 1e-3);
            assert!(d.visible);
            assert!(d.radius >= tuning.debris_min_radius && d.radius <= tuning.debris_max_radius);
            // Heading roughly at the player
            let to_player = (player - d.pos).normalize();
            assert!(d.vel.dot(to_player) > 0.0);
        }
    }

    #[test]
    fn test_spawn_respects_cap() {
        let tuning = Tuning {
            max_debris: 3,
            ..Default::default()
        };
        let mut pool = debris_pool();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..3 {
            assert!(spawn_debris(&mut pool, &mut rng, Vec3::ZERO, 1.0, &tuning).is_some());
        }
        assert!(spawn_debris(&mut pool, &mut rng, Vec3::ZERO, 1.0, &tuning).is_none());
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn test_size_scales_with_difficulty() {
        let tuning = Tuning {
            debris_min_radius: 0.5,
            debris_max_radius: 0.5,
            ..Default::default()
        };
        let mut pool = debris_pool();
        let mut rng = Pcg32::seed_from_u64(3);
        let easy = spawn_debris(&mut pool, &mut rng, Vec3::ZERO, 1.0, &tuning).unwrap();
        let hard = spawn_debris(&mut pool, &mut rng, Vec3::ZERO, 3.0, &tuning).unwrap();
        assert_eq!(pool.get(easy).unwrap().radius, 0.5);
        assert_eq!(pool.get(hard).unwrap().radius, 1.0);
        assert_eq!(pool.get(hard).unwrap().mass, 4.0);
    }

    #[test]
    fn test_spawner_interval() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::default();
        assert!(!spawner.update(1.0, 1.0, &tuning));
        assert!(spawner.update(1.0, 1.0, &tuning));
        // Difficulty 2 halves the interval
        assert!(!spawner.update(0.5, 2.0, &tuning));
        assert!(spawner.update(0.5, 2.0, &tuning));
    }
}
