//! Cleanup system: removes destroyed targets and detonated rounds.

use hecs::{Entity, World};

use mortar_core::components::{Health, Projectile};
use mortar_core::enums::ProjectilePhase;

/// Despawn everything queued this tick plus any destroyed or detonated
/// leftovers. The buffer is reused across ticks.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for (entity, health) in world.query_mut::<&Health>() {
        if health.destroyed {
            despawn_buffer.push(entity);
        }
    }

    for (entity, proj) in world.query_mut::<&Projectile>() {
        if proj.phase == ProjectilePhase::Detonated {
            despawn_buffer.push(entity);
        }
    }

    despawn_buffer.sort_by_key(|e| e.to_bits());
    despawn_buffer.dedup();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
