//! Timed speed multipliers on mobile units.
//!
//! Two channels per unit, slow and speed buff. Each is overwritten by a new
//! application (last applied wins, no stacking) and the two compose
//! multiplicatively with base speed.

use hecs::World;
use tracing::debug;

use mortar_core::components::{MobileUnit, SpeedModifiers};
use mortar_core::enums::StatusKind;
use mortar_core::events::SimEvent;

use crate::registry::MobileRegistry;

/// Set the slow channel to `1 - percent` until `now + duration`.
pub fn apply_slow(mods: &mut SpeedModifiers, percent: f64, duration_secs: f64, now: f64) {
    mods.slow_multiplier = (1.0 - percent).clamp(0.0, 1.0);
    mods.slow_expires_at = Some(now + duration_secs.max(0.0));
}

/// Set the buff channel to `1 + percent` until `now + duration`.
pub fn apply_speed_buff(mods: &mut SpeedModifiers, percent: f64, duration_secs: f64, now: f64) {
    mods.buff_multiplier = 1.0 + percent.max(0.0);
    mods.buff_expires_at = Some(now + duration_secs.max(0.0));
}

/// Reset channels whose deadline has passed. Each expiry happens once.
pub fn expire(mods: &mut SpeedModifiers, now: f64) -> Vec<StatusKind> {
    let mut expired = Vec::new();
    if mods.slow_expires_at.is_some_and(|t| now >= t) {
        mods.slow_multiplier = 1.0;
        mods.slow_expires_at = None;
        expired.push(StatusKind::Slow);
    }
    if mods.buff_expires_at.is_some_and(|t| now >= t) {
        mods.buff_multiplier = 1.0;
        mods.buff_expires_at = None;
        expired.push(StatusKind::SpeedBuff);
    }
    expired
}

/// Combined multiplier on base speed.
pub fn speed_multiplier(mods: &SpeedModifiers) -> f64 {
    mods.slow_multiplier * mods.buff_multiplier
}

/// Expire due status effects on every mobile unit.
pub fn run(world: &mut World, now: f64) {
    for (entity, mods) in world.query_mut::<&mut SpeedModifiers>() {
        for kind in expire(mods, now) {
            debug!(entity = entity.to_bits().get(), ?kind, "status expired");
        }
    }
}

/// Speed up every registered mobile unit, e.g. after a wrong quiz answer.
pub fn apply_global_speed_buff(
    world: &mut World,
    registry: &mut MobileRegistry,
    percent: f64,
    duration_secs: f64,
    now: f64,
    events: &mut Vec<SimEvent>,
) {
    for entity in registry.alive(world) {
        let Ok((_unit, mods)) = world.query_one_mut::<(&MobileUnit, &mut SpeedModifiers)>(entity)
        else {
            continue;
        };
        apply_speed_buff(mods, percent, duration_secs, now);
        events.push(SimEvent::StatusApplied {
            entity_id: entity.to_bits().get(),
            kind: StatusKind::SpeedBuff,
            multiplier: mods.buff_multiplier,
            duration_secs,
        });
    }
}
