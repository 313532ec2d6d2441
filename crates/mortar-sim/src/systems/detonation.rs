//! Detonation resolution.
//!
//! For every round with a pending trigger: emit the detonation with its
//! captured position, apply the ammo's area effects to each distinct entity in
//! the blast once, fire destruction signals, report the impact result, and
//! only then queue the round for despawn.

use hecs::{Entity, World};
use tracing::{debug, info};

use mortar_core::components::*;
use mortar_core::enums::*;
use mortar_core::events::SimEvent;
use mortar_core::types::Position;

use crate::engagement::FireControlState;
use crate::registry::MobileRegistry;
use crate::scoring::{self, ScoreState};
use crate::systems::{damage, fire_control, status_effects};

/// Resolve every armed round. Returns the entities destroyed this tick.
pub fn run(
    world: &mut World,
    registry: &mut MobileRegistry,
    score: &mut ScoreState,
    fire_control: &mut FireControlState,
    now: f64,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> Vec<Entity> {
    let mut armed: Vec<(Entity, u32, AmmoKind, DetonationCause, Position)> = world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, proj)| proj.phase != ProjectilePhase::Detonated)
        .filter_map(|(entity, proj)| {
            proj.pending
                .map(|(cause, position)| (entity, proj.id, proj.ammo, cause, position))
        })
        .collect();
    armed.sort_by_key(|&(_, shot_id, ..)| shot_id);

    let mut destroyed_total = Vec::new();
    for (round, shot_id, ammo, cause, position) in armed {
        if let Ok(proj) = world.query_one_mut::<&mut Projectile>(round) {
            proj.phase = ProjectilePhase::Detonated;
        }
        debug!(shot_id, ?ammo, ?cause, x = position.x, z = position.z, "detonation");
        events.push(SimEvent::Detonated {
            shot_id,
            ammo,
            position,
            cause,
        });

        let miss_distance_m = reference_distance(world, fire_control.selected_target, position);
        let hits = area_query(world, position, ammo.blast_radius());

        let mut affected = false;
        let mut destroyed = Vec::new();
        for &entity in &hits {
            if let Some((percent, duration)) = ammo.slow_effect() {
                if let Ok((_unit, mods)) =
                    world.query_one_mut::<(&MobileUnit, &mut SpeedModifiers)>(entity)
                {
                    status_effects::apply_slow(mods, percent, duration, now);
                    affected = true;
                    events.push(SimEvent::StatusApplied {
                        entity_id: entity.to_bits().get(),
                        kind: StatusKind::Slow,
                        multiplier: mods.slow_multiplier,
                        duration_secs: duration,
                    });
                }
            }

            let amount = ammo.direct_damage();
            if amount > 0.0 {
                if let Ok(health) = world.query_one_mut::<&mut Health>(entity) {
                    affected = true;
                    if damage::apply_damage(health, amount) {
                        destroyed.push(entity);
                    }
                }
            }
        }

        for &entity in &destroyed {
            on_destroyed(world, entity, registry, score, events);
        }

        let outcome = if !destroyed.is_empty() {
            ImpactOutcome::Destroyed
        } else if affected {
            ImpactOutcome::Hit
        } else {
            ImpactOutcome::Miss
        };
        events.push(SimEvent::ImpactResult {
            shot_id,
            outcome,
            miss_distance_m,
        });

        despawn_buffer.push(round);
        if fire_control.last_fired == Some(round) {
            fire_control.last_fired = None;
        }
        destroyed_total.extend(destroyed);
    }
    destroyed_total
}

/// Distinct live entities with any hit sphere overlapping the blast, in a
/// stable order.
pub fn area_query(world: &World, center: Position, radius: f64) -> Vec<Entity> {
    let c = center.as_dvec3();
    let mut found: Vec<Entity> = Vec::new();
    for (entity, (pos, hit, health)) in world
        .query::<(&Position, &HitSpheres, Option<&Health>)>()
        .iter()
    {
        if health.is_some_and(|h| h.destroyed) {
            continue;
        }
        let overlaps = hit
            .spheres
            .iter()
            .filter(|s| c.distance(pos.as_dvec3() + s.offset.as_dvec3()) <= radius + s.radius)
            .count();
        // Several spheres of one entity may overlap; the entity counts once.
        if overlaps > 0 && !found.contains(&entity) {
            found.push(entity);
        }
    }
    found.sort_by_key(|e| e.to_bits());
    found
}

/// Ground distance from an impact to the selected target, or to the nearest
/// live target when nothing is selected.
fn reference_distance(world: &World, selected: Option<Entity>, impact: Position) -> Option<f64> {
    if let Some(pos) = selected.and_then(|e| world.get::<&Position>(e).ok().map(|p| *p)) {
        return Some(impact.ground_distance_to(&pos));
    }
    fire_control::candidates(world)
        .into_iter()
        .filter_map(|e| world.get::<&Position>(e).ok().map(|p| impact.ground_distance_to(&p)))
        .min_by(f64::total_cmp)
}

/// Destruction signal: unregister first, then score and notify. Runs once per
/// entity because `apply_damage` reports the kill only once.
fn on_destroyed(
    world: &mut World,
    entity: Entity,
    registry: &mut MobileRegistry,
    score: &mut ScoreState,
    events: &mut Vec<SimEvent>,
) {
    registry.unregister(entity);

    let position = world.get::<&Position>(entity).map(|p| *p).unwrap_or_default();
    let kind = world
        .get::<&Target>(entity)
        .map(|t| t.kind)
        .unwrap_or(EntityKind::Prop);
    let points = world.get::<&PointValue>(entity).map(|p| p.points).unwrap_or(0);

    score.entities_destroyed += 1;
    info!(entity = entity.to_bits().get(), ?kind, points, "target destroyed");
    events.push(SimEvent::Destroyed {
        entity_id: entity.to_bits().get(),
        kind,
        position,
        points,
    });
    if points > 0 {
        scoring::add_score(score, points, Some(position), events);
    }
}
