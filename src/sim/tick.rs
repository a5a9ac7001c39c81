//! Per-frame simulation step
//!
//! One call per display frame. All mutation for the frame happens here,
//! synchronously, in a fixed order: phase commands, player actions, movement,
//! oxygen, buildings and zones, spawning, debris motion and capture, player
//! collisions, particles, goals.

use glam::{Vec2, Vec3};

use super::buildings::BuildingKind;
use super::collision::{Contact, check_contact};
use super::ledger::ResourceKind;
use super::pool::EntityId;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::ground_vec;

/// Input commands for a single frame, sampled once at the frame boundary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Planar movement (x = right, y = forward); normalized by the sim
    pub movement: Vec2,
    /// Held: faster movement, extra oxygen drain
    pub boost: bool,
    /// Trade mass for score
    pub recycle: bool,
    /// Grab nearest debris / drop held debris
    pub grab: bool,
    /// Enter build mode with this building selected
    pub select_building: Option<BuildingKind>,
    /// Place the selected building
    pub place: bool,
    /// Leave build mode
    pub cancel_build: bool,
    pub start: bool,
    /// Toggle pause
    pub pause: bool,
    pub resume: bool,
    pub restart: bool,
    pub quit: bool,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };

    // Session commands work in every phase
    if input.restart {
        let seed = state.next_seed();
        state.restart(seed);
    }
    if input.start {
        state.start();
    }
    if input.quit {
        state.quit();
    }
    if input.pause {
        state.toggle_pause();
    }
    if input.resume {
        state.resume();
    }

    // Don't simulate outside of play
    if state.phase != GamePhase::Playing {
        return;
    }

    state.progression.advance(dt);

    handle_actions(state, input);
    move_player(state, input, dt);
    update_environment(state, dt);

    if state.spawner.update(dt, state.progression.difficulty(), &state.tuning) {
        state.spawn_debris();
    }

    update_debris(state, dt);
    resolve_player_contacts(state);
    update_particles(state, dt);

    state.start_next_mission(dt);
    state.evaluate_goals();
    state.flush_resource_changes();

    if state.ledger.oxygen() <= 0.0 {
        log::info!("Out of oxygen");
        state.push_event(GameEvent::OxygenDepleted);
        state.quit();
    }
}

/// Recycle, grab, and build-mode commands
fn handle_actions(state: &mut GameState, input: &TickInput) {
    if let Some(kind) = input.select_building {
        state.build_mode = Some(kind);
    }
    if input.cancel_build {
        state.build_mode = None;
    }
    if input.place
        && let Some(kind) = state.build_mode
        && state.place_building(kind).is_ok()
    {
        state.build_mode = None;
    }
    if input.recycle {
        state.recycle();
    }
    if input.grab {
        state.toggle_grab();
    }
}

fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let t = &state.tuning;
    let moving = input.movement != Vec2::ZERO;
    let boosting = input.boost && moving;
    let accel = if boosting {
        t.player_accel * t.boost_multiplier
    } else {
        t.player_accel
    };
    let drag = t.player_drag;
    let drain = t.oxygen_drain_rate + if boosting { t.boost_oxygen_cost } else { 0.0 };

    state.player.steer(ground_vec(input.movement), accel, drag, dt);
    state.ledger.drain_oxygen(dt, drain);
}

/// Passive building output and zone health
fn update_environment(state: &mut GameState, dt: f32) {
    let oxygen = state.buildings.oxygen_rate() * dt;
    if oxygen > 0.0 {
        state.grant(ResourceKind::Oxygen, oxygen);
    }

    let debris_positions: Vec<Vec3> = state.debris.iter_active().map(|(_, d)| d.pos).collect();
    let seeds = state.buildings.seed_rate(debris_positions.iter().copied()) * dt;
    if seeds > 0.0 {
        state.grant(ResourceKind::Seeds, seeds);
    }

    for zone in state.zones.iter_mut() {
        let trees = state.buildings.trees_near(zone.pos, zone.radius);
        zone.update(trees, dt);
    }
}

/// Move debris: follow the tractor beam or drift under attractor pull; capture and despawn
fn update_debris(state: &mut GameState, dt: f32) {
    let attractors = state.attractors();
    let player_pos = state.player.pos;
    let player_vel = state.player.vel;
    let hold_offset = state.player.facing * -(state.player_radius() + 0.5);
    let strength = state.tuning.attractor_strength;
    let drag = state.tuning.debris_drag;
    let despawn = state.tuning.despawn_distance;

    let ids: Vec<EntityId> = state.debris.active_ids().to_vec();
    let mut captured = Vec::new();
    let mut far = Vec::new();

    for id in ids {
        let Some(d) = state.debris.get_mut(id) else {
            continue;
        };
        if d.carried {
            let target = player_pos + hold_offset * (1.0 + d.radius);
            d.pos = d.pos.lerp(target, (dt * 8.0).min(1.0));
            d.vel = player_vel;
        } else {
            for a in &attractors {
                d.vel += a.pull(d.pos, strength, dt);
            }
            d.advance(dt, drag);
        }

        if let Some(a) = attractors.iter().find(|a| a.captures(d.pos)) {
            captured.push((id, a.kind));
        } else if d.pos.distance(player_pos) > despawn {
            far.push(id);
        }
    }

    for (id, by) in captured {
        state.capture_debris(id, by);
    }
    for id in far {
        state.release_debris(id);
    }
}

/// Absorb or bounce off every overlapping debris
fn resolve_player_contacts(state: &mut GameState) {
    let ids: Vec<EntityId> = state.debris.active_ids().to_vec();
    for id in ids {
        let player_pos = state.player.pos;
        let radius = state.player_radius();
        let mass = state.progression.mass();
        let Some(d) = state.debris.get(id) else {
            continue;
        };
        match check_contact(player_pos, radius, mass, d, &state.tuning) {
            Some(Contact::Absorb) => state.absorb_debris(id),
            Some(Contact::Bounce { impulse }) => {
                state.player.vel += impulse;
                let reach = radius + d.radius + 0.01;
                let dir = impulse.normalize_or(Vec3::X);
                if let Some(d) = state.debris.get_mut(id) {
                    // Separate so the bump doesn't repeat next frame
                    d.pos = player_pos - dir * reach;
                    d.vel -= impulse * 0.5;
                }
                state.stats.collisions += 1;
                state.push_event(GameEvent::Collided {
                    impulse: impulse.length(),
                });
            }
            None => {}
        }
    }
}

fn update_particles(state: &mut GameState, dt: f32) {
    let ids: Vec<EntityId> = state.particles.active_ids().to_vec();
    for id in ids {
        let expired = state
            .particles
            .get_mut(id)
            .map(|p| p.advance(dt))
            .unwrap_or(false);
        if expired {
            state.particles.release(id);
        }
    }
}
