//! Game state and the side effects of gameplay actions
//!
//! Everything one run owns lives in [`GameState`]. The frame loop in
//! `tick.rs` decides *when* things happen; the methods here decide *what*
//! happens, and queue a [`GameEvent`] for anything the presentation layer
//! should announce.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::achievements::AchievementBook;
use super::buildings::{BuildingKind, BuildingSet};
use super::collision::{capture_reward, roll_reward};
use super::entities::{Debris, DebrisKind, Particle, Player, absorbed_mass};
use super::goals::{GoalContext, RunStats};
use super::ledger::{ResourceChange, ResourceKind, ResourceLedger};
use super::missions::{Mission, MissionTracker};
use super::pool::{EntityId, Pool};
use super::progression::{Progression, TierChange};
use super::spawner::{Spawner, spawn_debris};
use super::zones::{Attractor, AttractorKind, EnvironmentZone, default_nodes, default_zones};
use crate::consts::*;
use crate::error::BuildError;
use crate::leaderboard::LeaderboardEntry;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    Menu,
    /// Active gameplay
    Playing,
    /// Frame loop keeps running, simulation doesn't
    Paused,
    /// Run ended (quit or out of oxygen)
    GameOver,
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    TierUp { from: u32, to: u32 },
    AchievementUnlocked { id: &'static str, title: &'static str },
    MissionStarted { id: &'static str, title: &'static str },
    MissionComplete { id: &'static str, title: &'static str, reward: u64 },
    Absorbed { kind: DebrisKind, mass_gained: f32 },
    Collided { impulse: f32 },
    Captured { kind: DebrisKind, by: AttractorKind },
    Recycled { points: u64 },
    ResourceChanged(ResourceChange),
    BuildingPlaced { id: u32, kind: BuildingKind },
    BuildFailed(BuildError),
    OxygenDepleted,
    GameOver { score: u64, mass: f32, tier: u32, time: f32 },
}

/// Read-only per-frame summary for HUDs
#[derive(Debug, Clone, Serialize)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub mass: f32,
    pub tier: u32,
    pub tier_progress: f32,
    pub score: u64,
    pub difficulty: f32,
    pub elapsed: f32,
    pub mission: Option<&'static str>,
    pub achievements_unlocked: usize,
    pub resources: Vec<(ResourceKind, f32)>,
    pub debris: usize,
    pub buildings: usize,
    pub build_mode: Option<BuildingKind>,
}

/// Complete state of one session (a run plus session-wide achievements)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub progression: Progression,
    pub ledger: ResourceLedger,
    pub stats: RunStats,
    pub missions: MissionTracker,
    /// Survives restarts
    pub achievements: AchievementBook,
    pub player: Player,
    pub debris: Pool<Debris>,
    pub particles: Pool<Particle>,
    pub buildings: BuildingSet,
    pub zones: Vec<EnvironmentZone>,
    /// Static debris nodes (recyclers are added on top each frame)
    pub nodes: Vec<Attractor>,
    pub spawner: Spawner,
    /// Building kind selected for placement
    pub build_mode: Option<BuildingKind>,
    /// Particle budget from settings
    pub max_particles: usize,
    events: Vec<GameEvent>,
}

impl GameState {
    /// New session at the title screen
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self::with_pools(
            seed,
            tuning,
            Pool::new(DEBRIS_POOL_SIZE, Debris::default, Debris::reset),
            Pool::new(PARTICLE_POOL_SIZE, Particle::default, Particle::reset),
        )
    }

    /// Fresh run state around existing entity pools
    fn with_pools(
        seed: u64,
        tuning: Tuning,
        debris: Pool<Debris>,
        particles: Pool<Particle>,
    ) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Menu,
            progression: Progression::new(),
            ledger: ResourceLedger::starting(),
            stats: RunStats::default(),
            missions: MissionTracker::default(),
            achievements: AchievementBook::default(),
            player: Player::default(),
            debris,
            particles,
            buildings: BuildingSet::default(),
            zones: default_zones(),
            nodes: default_nodes(),
            spawner: Spawner::default(),
            build_mode: None,
            max_particles: PARTICLE_POOL_SIZE,
            events: Vec::new(),
        }
    }

    // === Phase transitions ===

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from != to {
            self.phase = to;
            log::info!("Phase {:?} -> {:?}", from, to);
            self.events.push(GameEvent::PhaseChanged { from, to });
        }
    }

    /// Menu -> Playing. Picks the first mission.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Menu {
            return;
        }
        self.set_phase(GamePhase::Playing);
        self.start_next_mission(0.0);
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.set_phase(GamePhase::Paused),
            GamePhase::Paused => self.set_phase(GamePhase::Playing),
            _ => {}
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.set_phase(GamePhase::Playing);
        }
    }

    /// End the run from Playing or Paused
    pub fn quit(&mut self) {
        if matches!(self.phase, GamePhase::Playing | GamePhase::Paused) {
            self.end_run();
        }
    }

    fn end_run(&mut self) {
        self.set_phase(GamePhase::GameOver);
        self.events.push(GameEvent::GameOver {
            score: self.progression.score,
            mass: self.progression.mass(),
            tier: self.progression.tier(),
            time: self.progression.elapsed(),
        });
        log::info!(
            "Run over: score {} mass {:.1} tier {} after {:.0}s",
            self.progression.score,
            self.progression.mass(),
            self.progression.tier(),
            self.progression.elapsed()
        );
    }

    /// Fresh run straight into Playing. Achievements, tuning and settings carry
    /// over; pooled entities are released back to their pools, not dropped.
    pub fn restart(&mut self, seed: u64) {
        let achievements = std::mem::take(&mut self.achievements);
        let tuning = std::mem::take(&mut self.tuning);
        let max_particles = self.max_particles;
        let from = self.phase;

        let mut debris =
            std::mem::replace(&mut self.debris, Pool::new(0, Debris::default, Debris::reset));
        let mut particles = std::mem::replace(
            &mut self.particles,
            Pool::new(0, Particle::default, Particle::reset),
        );
        debris.release_all();
        particles.release_all();

        *self = Self::with_pools(seed, tuning, debris, particles);
        self.achievements = achievements;
        self.max_particles = max_particles;
        self.phase = from;
        log::info!("Restarted with seed {}", seed);

        self.set_phase(GamePhase::Playing);
        self.start_next_mission(0.0);
    }

    /// Seed for the next restart, drawn from the run RNG
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    // === Progression ===

    /// Add mass and run every side effect: tier-up, achievements, mission check
    pub fn add_mass(&mut self, amount: f32) -> TierChange {
        let change = self.progression.add_mass(amount);
        if change.tier_up() {
            log::info!("Tier up {} -> {}", change.from, change.to);
            self.events.push(GameEvent::TierUp {
                from: change.from,
                to: change.to,
            });
        }
        self.evaluate_goals();
        change
    }

    /// Trade mass for score. Returns points awarded (0 = no-op).
    pub fn recycle(&mut self) -> u64 {
        let points = self.progression.recycle();
        if points > 0 {
            self.stats.recycles += 1;
            self.events.push(GameEvent::Recycled { points });
            log::debug!("Recycled for {} points", points);
            self.evaluate_goals();
        }
        points
    }

    /// Test achievements and the current mission against the current state
    pub fn evaluate_goals(&mut self) {
        let ctx = GoalContext {
            progression: &self.progression,
            stats: &self.stats,
            ledger: &self.ledger,
            zones: &self.zones,
        };
        let unlocked = self.achievements.evaluate(&ctx);
        let completed = self.missions.check(&ctx);

        for a in unlocked {
            self.progression.add_score(ACHIEVEMENT_BONUS);
            log::info!("Achievement unlocked: {}", a.title);
            self.events.push(GameEvent::AchievementUnlocked {
                id: a.id,
                title: a.title,
            });
        }
        if let Some(m) = completed {
            self.progression.add_score(m.reward);
            log::info!("Mission complete: {} (+{})", m.title, m.reward);
            self.events.push(GameEvent::MissionComplete {
                id: m.id,
                title: m.title,
                reward: m.reward,
            });
        }
    }

    /// Advance the mission reselect delay and start the next mission if one is due
    pub fn start_next_mission(&mut self, dt: f32) {
        if let Some(m) = self.missions.update(dt, self.progression.tier()) {
            log::info!("Mission started: {}", m.title);
            self.events.push(GameEvent::MissionStarted {
                id: m.id,
                title: m.title,
            });
        }
    }

    // === Resources ===

    /// Credit a resource and count it toward run totals
    pub fn grant(&mut self, kind: ResourceKind, amount: f32) {
        let credited = self.ledger.add(kind, amount);
        if credited > 0.0 && kind != ResourceKind::Oxygen {
            self.stats.resources_collected += credited;
        }
    }

    /// Credit a resource by name; unknown names are logged and ignored
    pub fn grant_named(&mut self, name: &str, amount: f32) -> bool {
        let Some(kind) = ResourceKind::from_name(name) else {
            log::warn!("Ignoring grant of unknown resource '{}'", name);
            return false;
        };
        self.grant(kind, amount);
        true
    }

    /// Forward ledger change notifications into the event queue
    pub fn flush_resource_changes(&mut self) {
        for change in self.ledger.take_changes() {
            self.events.push(GameEvent::ResourceChanged(change));
        }
    }

    // === Debris ===

    /// Player swallows a piece of debris
    pub fn absorb_debris(&mut self, id: EntityId) {
        let Some(d) = self.debris.get(id) else {
            return;
        };
        let (kind, mass, pos, tint) = (d.kind, d.mass, d.pos, d.tint);
        self.release_debris(id);

        for (res, amount) in roll_reward(kind, &mut self.rng) {
            self.grant(res, amount);
        }
        let gained = absorbed_mass(mass, self.tuning.absorb_transfer);
        self.stats.absorbed += 1;
        self.progression
            .add_score((gained * self.tuning.absorb_score_per_mass).round() as u64);
        self.events.push(GameEvent::Absorbed {
            kind,
            mass_gained: gained,
        });
        self.emit_particles(pos, tint);
        self.add_mass(gained);
    }

    /// A recycler or debris node swallows a piece of debris
    pub fn capture_debris(&mut self, id: EntityId, by: AttractorKind) {
        let Some(d) = self.debris.get(id) else {
            return;
        };
        let (kind, pos, tint) = (d.kind, d.pos, d.tint);
        self.release_debris(id);

        for (res, amount) in capture_reward(kind) {
            self.grant(res, amount);
        }
        self.stats.captured += 1;
        self.events.push(GameEvent::Captured { kind, by });
        self.emit_particles(pos, tint);
    }

    /// Spawn one debris around the player, unless the cap is reached
    pub fn spawn_debris(&mut self) -> Option<EntityId> {
        spawn_debris(
            &mut self.debris,
            &mut self.rng,
            self.player.pos,
            self.progression.difficulty(),
            &self.tuning,
        )
    }

    /// Return debris to the pool, dropping it from the tractor beam if held
    pub fn release_debris(&mut self, id: EntityId) -> bool {
        if self.player.carrying == Some(id) {
            self.player.carrying = None;
        }
        self.debris.release(id)
    }

    /// Grab the nearest free debris in reach, or drop what's held
    pub fn toggle_grab(&mut self) {
        if let Some(id) = self.player.carrying.take() {
            let vel = self.player.vel;
            if let Some(d) = self.debris.get_mut(id) {
                d.carried = false;
                d.vel = vel;
            }
            return;
        }

        let reach = self.player_radius() + self.tuning.grab_range;
        let origin = self.player.pos;
        let nearest = self
            .debris
            .iter_active()
            .filter(|(_, d)| !d.carried)
            .map(|(id, d)| (id, d.pos.distance(origin) - d.radius))
            .filter(|&(_, dist)| dist <= reach)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id);

        if let Some(id) = nearest {
            if let Some(d) = self.debris.get_mut(id) {
                d.carried = true;
            }
            self.player.carrying = Some(id);
        }
    }

    /// Debris nodes plus one attractor per recycler
    pub fn attractors(&self) -> Vec<Attractor> {
        let mut all = self.nodes.clone();
        all.extend(
            self.buildings
                .of_kind(BuildingKind::Recycler)
                .map(|b| Attractor {
                    kind: AttractorKind::Recycler(b.id),
                    pos: b.pos,
                    inner_radius: ATTRACTOR_INNER_RADIUS,
                    outer_radius: b.config().radius,
                }),
        );
        all
    }

    // === Particles ===

    /// Burst of particles at `pos`, within the particle budget
    pub fn emit_particles(&mut self, pos: Vec3, tint: u32) {
        let room = self.max_particles.saturating_sub(self.particles.active_count());
        let count = self.tuning.particle_burst.min(room);
        for _ in 0..count {
            let dir = Vec3::new(
                self.rng.random::<f32>() * 2.0 - 1.0,
                self.rng.random::<f32>() * 2.0 - 1.0,
                self.rng.random::<f32>() * 2.0 - 1.0,
            )
            .normalize_or(Vec3::Y);
            let id = self.particles.acquire();
            if let Some(p) = self.particles.get_mut(id) {
                p.pos = pos;
                p.vel = dir * self.tuning.particle_speed;
                p.life = self.tuning.particle_lifetime;
                p.tint = tint;
                p.visible = true;
            }
        }
    }

    // === Buildings ===

    /// Place a building ahead of the player. Nothing is charged on failure.
    pub fn place_building(&mut self, kind: BuildingKind) -> Result<u32, BuildError> {
        let pos = self.player.build_point(BUILD_PLACEMENT_OFFSET);
        match self.buildings.place(kind, pos, &mut self.ledger) {
            Ok(b) => {
                let id = b.id;
                self.stats.buildings_placed += 1;
                if kind == BuildingKind::Tree {
                    self.stats.trees_planted += 1;
                }
                log::info!("Placed {} #{} at ({:.1}, {:.1})", kind.as_str(), id, pos.x, pos.z);
                self.events.push(GameEvent::BuildingPlaced { id, kind });
                self.evaluate_goals();
                Ok(id)
            }
            Err(e) => {
                log::debug!("Can't place {}: {}", kind.as_str(), e);
                self.events.push(GameEvent::BuildFailed(e.clone()));
                Err(e)
            }
        }
    }

    /// Place by name; unknown names are logged and ignored
    pub fn place_building_named(&mut self, name: &str) -> Result<u32, BuildError> {
        let kind = BuildingKind::parse(name).inspect_err(|e| log::warn!("{}", e))?;
        self.place_building(kind)
    }

    // === Presentation boundary ===

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn player_radius(&self) -> f32 {
        self.player.radius(self.progression.mass())
    }

    pub fn current_mission(&self) -> Option<&'static Mission> {
        self.missions.current()
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            phase: self.phase,
            mass: self.progression.mass(),
            tier: self.progression.tier(),
            tier_progress: self.progression.tier_progress(),
            score: self.progression.score,
            difficulty: self.progression.difficulty(),
            elapsed: self.progression.elapsed(),
            mission: self.current_mission().map(|m| m.title),
            achievements_unlocked: self.achievements.unlocked_count(),
            resources: self.ledger.balances().collect(),
            debris: self.debris.active_count(),
            buildings: self.buildings.len(),
            build_mode: self.build_mode,
        }
    }

    /// Leaderboard record for the current run
    pub fn leaderboard_entry(&self, name: &str, date: &str) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            score: self.progression.score,
            mass: self.progression.mass(),
            tier: self.progression.tier(),
            time: self.progression.elapsed(),
            date: date.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> GameState {
        let mut state = GameState::new(1234);
        state.start();
        state.take_events();
        state
    }

    /// Drop a debris of the given radius/mass at `pos`
    fn place_debris(state: &mut GameState, pos: Vec3, radius: f32, mass: f32) -> EntityId {
        let id = state.debris.acquire();
        let d = state.debris.get_mut(id).unwrap();
        d.pos = pos;
        d.radius = radius;
        d.mass = mass;
        d.kind = DebrisKind::Plastic;
        d.visible = true;
        id
    }

    #[test]
    fn test_start_selects_first_mission() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        state.start();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.current_mission().map(|m| m.id), Some("first_bite"));
        let events = state.take_events();
        assert!(events.contains(&GameEvent::MissionStarted {
            id: "first_bite",
            title: "First Bite"
        }));
    }

    #[test]
    fn test_absorb_adds_half_mass_and_tiers_up() {
        let mut state = playing();
        let id = place_debris(&mut state, Vec3::ZERO, 1.0, 4.0);
        state.absorb_debris(id);

        assert_eq!(state.progression.mass(), 3.0);
        assert_eq!(state.progression.tier(), 2);
        assert!(!state.debris.is_active(id));
        assert_eq!(state.stats.absorbed, 1);
        let events = state.take_events();
        assert!(events.contains(&GameEvent::TierUp { from: 1, to: 2 }));
        assert!(events.contains(&GameEvent::AchievementUnlocked {
            id: "snack_time",
            title: "Snack Time"
        }));
    }

    #[test]
    fn test_achievement_bonus_awarded_once() {
        let mut state = playing();
        let id = place_debris(&mut state, Vec3::ZERO, 0.1, 0.2);
        state.absorb_debris(id);
        let score_after_first = state.progression.score;
        assert!(score_after_first >= ACHIEVEMENT_BONUS);

        let id = place_debris(&mut state, Vec3::ZERO, 0.1, 0.2);
        state.absorb_debris(id);
        let unlocks = state
            .take_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::AchievementUnlocked { .. }))
            .count();
        assert_eq!(unlocks, 1);
        assert!(state.progression.score < score_after_first + ACHIEVEMENT_BONUS);
    }

    #[test]
    fn test_recycle_records_stats() {
        let mut state = playing();
        state.add_mass(9.0);
        let points = state.recycle();
        assert_eq!(points, 20);
        assert_eq!(state.stats.recycles, 1);
        // 8 -> removes 2 -> 6
        assert_eq!(state.recycle(), 20);
        assert_eq!(state.progression.mass(), 6.0);
        assert_eq!(state.stats.recycles, 2);

        let mut fresh = playing();
        assert_eq!(fresh.recycle(), 0);
        assert_eq!(fresh.stats.recycles, 0);
    }

    #[test]
    fn test_place_building_success_and_spacing() {
        let mut state = playing();
        state.grant(ResourceKind::Organic, 4.0);
        state.grant(ResourceKind::Seeds, 3.0);

        let id = state.place_building(BuildingKind::Tree).unwrap();
        assert_eq!(state.stats.trees_planted, 1);
        assert_eq!(state.ledger.get(ResourceKind::Seeds), 3.0);

        // Same spot again: too close, nothing charged
        let err = state.place_building(BuildingKind::Tree).unwrap_err();
        assert!(matches!(err, BuildError::TooClose { neighbor, .. } if neighbor == id));
        assert_eq!(state.ledger.get(ResourceKind::Seeds), 3.0);
        assert_eq!(state.ledger.get(ResourceKind::Organic), 2.0);
    }

    #[test]
    fn test_unknown_building_name_is_ignored() {
        let mut state = playing();
        let before = state.buildings.len();
        assert!(state.place_building_named("space_elevator").is_err());
        assert_eq!(state.buildings.len(), before);
    }

    #[test]
    fn test_restart_keeps_achievements() {
        let mut state = playing();
        let id = place_debris(&mut state, Vec3::ZERO, 0.5, 1.0);
        state.absorb_debris(id);
        assert!(state.achievements.is_unlocked("snack_time"));

        state.restart(99);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.progression.mass(), STARTING_MASS);
        assert_eq!(state.progression.score, 0);
        assert_eq!(state.stats, RunStats::default());
        assert_eq!(state.debris.active_count(), 0);
        assert!(state.achievements.is_unlocked("snack_time"));
        assert_eq!(state.current_mission().map(|m| m.id), Some("first_bite"));

        // Re-absorbing doesn't re-award it
        let id = place_debris(&mut state, Vec3::ZERO, 0.5, 1.0);
        state.take_events();
        state.absorb_debris(id);
        assert!(
            !state
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::AchievementUnlocked { id: "snack_time", .. }))
        );
    }

    #[test]
    fn test_unknown_resource_name_is_ignored() {
        let mut state = playing();
        state.ledger.take_changes();
        let before: Vec<_> = state.ledger.balances().collect();
        assert!(!state.grant_named("stardust", 5.0));
        assert_eq!(state.ledger.balances().collect::<Vec<_>>(), before);
        assert!(state.ledger.take_changes().is_empty());

        assert!(state.grant_named("metal", 2.0));
        assert_eq!(state.ledger.get(ResourceKind::Metal), 2.0);
        assert_eq!(state.stats.resources_collected, 2.0);
    }

    #[test]
    fn test_restart_recycles_pooled_entities() {
        let mut state = playing();
        for _ in 0..DEBRIS_POOL_SIZE + 6 {
            state.debris.acquire();
        }
        let held = state.debris.active_ids()[0];
        state.player.carrying = Some(held);
        state.emit_particles(Vec3::ZERO, 0);
        let debris_capacity = state.debris.capacity();
        let particle_capacity = state.particles.capacity();
        assert!(debris_capacity > DEBRIS_POOL_SIZE);

        state.restart(2);
        assert_eq!(state.debris.capacity(), debris_capacity);
        assert_eq!(state.particles.capacity(), particle_capacity);
        assert_eq!(state.debris.active_count(), 0);
        assert_eq!(state.particles.active_count(), 0);
        assert_eq!(state.player.carrying, None);
        assert!(state.debris.get(held).is_none());
    }

    #[test]
    fn test_grab_and_drop() {
        let mut state = playing();
        let id = place_debris(&mut state, Vec3::new(2.5, 0.0, 0.0), 0.5, 2.0);
        state.toggle_grab();
        assert_eq!(state.player.carrying, Some(id));
        assert!(state.debris.get(id).unwrap().carried);

        state.toggle_grab();
        assert_eq!(state.player.carrying, None);
        assert!(!state.debris.get(id).unwrap().carried);
    }

    #[test]
    fn test_capture_pays_and_clears_carry() {
        let mut state = playing();
        let id = place_debris(&mut state, Vec3::new(1.0, 0.0, 0.0), 0.5, 2.0);
        state.toggle_grab();
        state.capture_debris(id, AttractorKind::DebrisNode);
        assert_eq!(state.player.carrying, None);
        assert_eq!(state.ledger.get(ResourceKind::Plastic), 2.0);
        assert_eq!(state.stats.captured, 1);
    }

    #[test]
    fn test_particle_budget() {
        let mut state = playing();
        state.max_particles = 3;
        state.emit_particles(Vec3::ZERO, 0);
        state.emit_particles(Vec3::ZERO, 0);
        assert_eq!(state.particles.active_count(), 3);
    }

    #[test]
    fn test_attractors_include_recyclers() {
        let mut state = playing();
        state.grant(ResourceKind::Metal, 10.0);
        state.grant(ResourceKind::Plastic, 5.0);
        let id = state.place_building(BuildingKind::Recycler).unwrap();
        let attractors = state.attractors();
        assert_eq!(attractors.len(), state.nodes.len() + 1);
        assert!(attractors.iter().any(|a| a.kind == AttractorKind::Recycler(id)));
    }

    #[test]
    fn test_leaderboard_entry() {
        let mut state = playing();
        state.add_mass(2.0);
        let entry = state.leaderboard_entry("Ada", "2026-01-01");
        assert_eq!(entry.mass, 3.0);
        assert_eq!(entry.tier, 2);
        assert_eq!(entry.name, "Ada");
    }
}
