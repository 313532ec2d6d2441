//! Fire control system.
//!
//! Turns aim and fire intents into solver calls and projectile spawns,
//! tracks the reload and spotter cooldowns, maintains target selection and
//! computes the advisory lead for a selected mobile target.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use mortar_core::components::{Health, MobileUnit, Projectile, Target};
use mortar_core::config::{MissionConfig, MortarSettings};
use mortar_core::constants::{GRAVITY, MUZZLE_HEIGHT, TIMER_EPSILON};
use mortar_core::enums::*;
use mortar_core::events::SimEvent;
use mortar_core::types::{Position, Velocity};

use crate::ballistics;
use crate::engagement::FireControlState;
use crate::registry::AmmoInventory;
use crate::scoring::{self, ScoreState};
use crate::world_setup;

/// Count down reload and spotter cooldowns by elapsed time and drop a
/// selection whose target is gone.
pub fn run(world: &World, state: &mut FireControlState, dt: f64) {
    state.reload_remaining_secs = count_down(state.reload_remaining_secs, dt);
    state.spotter_cooldown_secs = count_down(state.spotter_cooldown_secs, dt);

    if let Some(selected) = state.selected_target {
        if !is_engageable(world, selected) {
            state.selected_target = None;
        }
    }
    if let Some(round) = state.last_fired {
        if !world.contains(round) {
            state.last_fired = None;
        }
    }
}

/// Remaining time after `dt`, snapped to zero once it is within rounding of done.
fn count_down(remaining: f64, dt: f64) -> f64 {
    let left = remaining - dt;
    if left <= TIMER_EPSILON {
        0.0
    } else {
        left
    }
}

/// Arm the spotter for the next shot if it is off cooldown.
pub fn request_spotter(
    state: &mut FireControlState,
    settings: &MortarSettings,
    events: &mut Vec<SimEvent>,
) -> bool {
    if state.spotter_armed || state.spotter_cooldown_secs > 0.0 {
        return false;
    }
    state.spotter_armed = true;
    state.spotter_cooldown_secs = settings.spotter_cooldown_secs;
    events.push(SimEvent::SpotterArmed {
        cooldown_secs: settings.spotter_cooldown_secs,
    });
    true
}

/// A single fire intent.
#[derive(Debug, Clone, Copy)]
pub struct FireRequest {
    pub ammo: AmmoKind,
    pub origin: Position,
    pub now: f64,
    pub run_active: bool,
}

/// Fire one round, atomically.
///
/// Either every effect happens (one round consumed, projectile spawned,
/// reload restarted, spotter consumed) or none does and the rejection is
/// reported as an event. Requests during reload are dropped, not queued.
#[allow(clippy::too_many_arguments)]
pub fn fire(
    world: &mut World,
    state: &mut FireControlState,
    inventory: &mut AmmoInventory,
    score: &mut ScoreState,
    mission: &MissionConfig,
    rng: &mut ChaCha8Rng,
    request: FireRequest,
    events: &mut Vec<SimEvent>,
) -> Result<Entity, FireRejection> {
    let ammo = request.ammo;
    let rejection = if !request.run_active {
        Some(FireRejection::NotActive)
    } else if !state.reloaded() {
        Some(FireRejection::Cooldown)
    } else if !inventory.try_consume(ammo) {
        Some(FireRejection::NoAmmo)
    } else {
        None
    };
    if let Some(reason) = rejection {
        events.push(SimEvent::FireRejected { ammo, reason });
        return Err(reason);
    }

    let settings = &mission.mortar;
    let spotter_used = state.spotter_armed;
    let dispersion = state.dispersion_m(settings);
    let ground_origin = request.origin.on_ground();
    let muzzle = Position::new(ground_origin.x, MUZZLE_HEIGHT, ground_origin.z);
    let impact = ballistics::compute_impact_point(
        ground_origin,
        state.bearing_deg,
        state.range_m,
        dispersion,
        rng,
    );
    let range_error_m = ground_origin.ground_distance_to(&impact) - state.range_m;

    let (velocity, flight_time_secs) = match settings.flight_mode {
        FlightMode::Physics => {
            let range = muzzle.ground_distance_to(&impact);
            let bearing = if range > 0.0 {
                muzzle.bearing_deg_to(&impact)
            } else {
                state.bearing_deg
            };
            let angle = ballistics::compute_launch_angle(
                range,
                settings.launch_speed,
                GRAVITY,
                state.elevation,
            );
            let v = ballistics::launch_velocity(bearing, angle, settings.launch_speed);
            (v, 2.0 * v.y / GRAVITY)
        }
        FlightMode::KinematicArc => {
            let t = state.arc_flight_time_secs(settings);
            let v = (impact.as_dvec3() - muzzle.as_dvec3()) / t.max(f64::EPSILON);
            (v, t)
        }
    };

    let shot_id = state.next_shot_id;
    state.next_shot_id += 1;
    let projectile = Projectile {
        id: shot_id,
        ammo,
        origin: muzzle,
        aimed_impact: impact,
        flight_time: match settings.flight_mode {
            FlightMode::Physics => None,
            FlightMode::KinematicArc => Some(flight_time_secs),
        },
        spawned_at: request.now,
        mode: settings.flight_mode,
        phase: ProjectilePhase::Launched,
        pending: None,
    };
    let entity = world_setup::spawn_projectile(world, projectile, muzzle, Velocity::from(velocity));

    state.reload_remaining_secs = settings.reload_secs;
    state.spotter_armed = false;
    state.last_fired = Some(entity);

    debug!(
        shot_id,
        ?ammo,
        bearing = state.bearing_deg,
        range = state.range_m,
        range_error_m,
        spotter_used,
        "round fired"
    );
    events.push(SimEvent::AmmoChanged {
        ammo,
        count: inventory.count(ammo),
    });
    events.push(SimEvent::Fired {
        shot_id,
        ammo,
        aimed_impact: impact,
        flight_time_secs,
        range_error_m,
        spotter_used,
    });
    scoring::record_round_fired(score, ammo, &mission.hidden_bonus, events);

    Ok(entity)
}

fn is_engageable(world: &World, entity: Entity) -> bool {
    world
        .get::<&Health>(entity)
        .map(|h| !h.destroyed)
        .unwrap_or(false)
        && world.get::<&Target>(entity).is_ok()
}

/// Every live damageable target, in a stable order.
pub fn candidates(world: &World) -> Vec<Entity> {
    let mut list: Vec<Entity> = world
        .query::<(&Target, &Health)>()
        .iter()
        .filter(|(_, (_, health))| !health.destroyed)
        .map(|(entity, _)| entity)
        .collect();
    list.sort_by_key(|e| e.to_bits());
    list
}

/// Nearest live target by ground distance from `origin`.
pub fn select_nearest(world: &World, origin: Position) -> Option<Entity> {
    candidates(world)
        .into_iter()
        .filter_map(|e| world.get::<&Position>(e).ok().map(|p| (e, origin.ground_distance_to(&p))))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(e, _)| e)
}

/// Step through the candidate list from `current`, wrapping at both ends.
pub fn cycle_target(world: &World, current: Option<Entity>, direction: CycleDirection) -> Option<Entity> {
    let list = candidates(world);
    if list.is_empty() {
        return None;
    }
    let n = list.len();
    let index = match current.and_then(|c| list.iter().position(|&e| e == c)) {
        Some(i) => match direction {
            CycleDirection::Next => (i + 1) % n,
            CycleDirection::Previous => (i + n - 1) % n,
        },
        None => match direction {
            CycleDirection::Next => 0,
            CycleDirection::Previous => n - 1,
        },
    };
    Some(list[index])
}

/// Advisory range lead for the selected target, if it is a mobile unit.
pub fn target_lead(
    world: &World,
    state: &FireControlState,
    origin: Position,
    settings: &MortarSettings,
) -> Option<f64> {
    let target = state.selected_target?;
    let mut query = world
        .query_one::<(&Position, &Velocity, &MobileUnit)>(target)
        .ok()?;
    let (pos, vel, _) = query.get()?;
    Some(ballistics::compute_lead(
        vel.ground(),
        pos.ground() - origin.ground(),
        state.flight_time_secs(settings),
    ))
}
