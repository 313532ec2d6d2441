//! Mobile-unit movement and base breach.
//!
//! Units walk toward the emplacement at base speed times their status
//! multipliers. A unit that reaches the breach radius damages the base and is
//! removed, leaving the registry before anything else can count it.

use hecs::{Entity, World};
use tracing::info;

use mortar_core::components::{Health, MobileUnit, SpeedModifiers};
use mortar_core::constants::BASE_BREACH_RADIUS;
use mortar_core::types::{bearing_direction, Position, Velocity};

use crate::registry::MobileRegistry;
use crate::systems::status_effects;

/// Move every mobile unit one step. Returns how many breached the base.
pub fn run(world: &mut World, registry: &mut MobileRegistry, emplacement: Position, dt: f64) -> u32 {
    let mut breached: Vec<Entity> = Vec::new();

    for (entity, (pos, vel, unit, mods, health)) in world.query_mut::<(
        &mut Position,
        &mut Velocity,
        &mut MobileUnit,
        &SpeedModifiers,
        &Health,
    )>() {
        if health.destroyed {
            continue;
        }
        if unit.base_speed <= 0.0 {
            *vel = Velocity::default();
            continue;
        }
        if pos.ground_distance_to(&emplacement) > f64::EPSILON {
            unit.heading_deg = pos.bearing_deg_to(&emplacement);
        }
        let speed = unit.base_speed * status_effects::speed_multiplier(mods);
        let v = bearing_direction(unit.heading_deg) * speed;
        *vel = Velocity::from(v);
        *pos = Position::from(pos.as_dvec3() + v * dt);

        if pos.ground_distance_to(&emplacement) <= BASE_BREACH_RADIUS {
            breached.push(entity);
        }
    }

    for &entity in &breached {
        registry.unregister(entity);
        let _ = world.despawn(entity);
        info!(entity = entity.to_bits().get(), "unit breached the base");
    }
    breached.len() as u32
}
