//! Projectile flight system.
//!
//! Advances every round in flight by one step in its own flight mode, then
//! records the first detonation trigger it meets: ground or solid contact,
//! trigger-volume overlap, arc completion or lifetime expiry. Later triggers
//! in the same tick are ignored, so a round detonates exactly once.

use hecs::{Entity, World};
use tracing::debug;

use mortar_core::components::{HitSpheres, Projectile, TriggerVolume};
use mortar_core::constants::GRAVITY;
use mortar_core::enums::{ContactKind, DetonationCause, FlightMode, ProjectilePhase};
use mortar_core::types::{Position, Velocity};

use crate::ballistics;

/// Advance rounds to `now` (end of this step) and detect contacts.
pub fn run(world: &mut World, now: f64, dt: f64, max_lifetime_secs: f64) {
    integrate(world, now, dt, max_lifetime_secs);
    detect_contacts(world);
}

fn integrate(world: &mut World, now: f64, dt: f64, max_lifetime_secs: f64) {
    for (_entity, (proj, pos, vel)) in
        world.query_mut::<(&mut Projectile, &mut Position, &mut Velocity)>()
    {
        if proj.phase == ProjectilePhase::Detonated || proj.pending.is_some() {
            continue;
        }
        proj.phase = ProjectilePhase::InFlight;

        match proj.mode {
            FlightMode::Physics => {
                let prev = *pos;
                vel.y -= GRAVITY * dt;
                *pos = Position::from(pos.as_dvec3() + vel.as_dvec3() * dt);
                if pos.y <= 0.0 && vel.y < 0.0 {
                    let drop = prev.y - pos.y;
                    let frac = if drop > 0.0 {
                        (prev.y / drop).clamp(0.0, 1.0)
                    } else {
                        1.0
                    };
                    let mut ground = prev.as_dvec3().lerp(pos.as_dvec3(), frac);
                    ground.y = 0.0;
                    *pos = Position::from(ground);
                    proj.pending = Some((DetonationCause::Collision, *pos));
                }
            }
            FlightMode::KinematicArc => {
                let flight_time = proj.flight_time.unwrap_or(dt).max(f64::EPSILON);
                let frac = (now - proj.spawned_at) / flight_time;
                let next = ballistics::kinematic_arc_position(proj.origin, proj.aimed_impact, frac);
                *vel = Velocity::from((next.as_dvec3() - pos.as_dvec3()) / dt);
                *pos = next;
                if frac >= 1.0 {
                    proj.pending = Some((DetonationCause::ArcComplete, proj.aimed_impact));
                }
            }
        }

        if proj.pending.is_none() && now - proj.spawned_at >= max_lifetime_secs {
            debug!(shot_id = proj.id, "round exceeded lifetime");
            proj.pending = Some((DetonationCause::Lifetime, *pos));
        }
    }
}

fn detect_contacts(world: &mut World) {
    let flying: Vec<(Entity, Position)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (proj, _))| proj.phase == ProjectilePhase::InFlight && proj.pending.is_none())
        .map(|(entity, (_, pos))| (entity, *pos))
        .collect();
    if flying.is_empty() {
        return;
    }

    let mut contacts = Vec::new();
    for &(round, round_pos) in &flying {
        let round_v = round_pos.as_dvec3();
        let solid_hit = world
            .query::<(&Position, &HitSpheres)>()
            .iter()
            .any(|(_, (pos, hit))| {
                hit.solid
                    && hit.spheres.iter().any(|s| {
                        round_v.distance(pos.as_dvec3() + s.offset.as_dvec3()) <= s.radius
                    })
            });
        if solid_hit {
            contacts.push((round, ContactKind::Collision, round_pos));
        }
        let trigger_hit = world
            .query::<(&Position, &TriggerVolume)>()
            .iter()
            .any(|(_, (pos, trigger))| round_v.distance(pos.as_dvec3()) <= trigger.radius);
        if trigger_hit {
            contacts.push((round, ContactKind::Trigger, round_pos));
        }
    }

    for (round, kind, position) in contacts {
        note_contact(world, round, kind, position);
    }
}

/// Record a contact against a round. Only the first trigger counts.
///
/// Returns true when this contact armed the detonation.
pub fn note_contact(world: &mut World, round: Entity, kind: ContactKind, position: Position) -> bool {
    let Ok(proj) = world.query_one_mut::<&mut Projectile>(round) else {
        return false;
    };
    if proj.phase == ProjectilePhase::Detonated || proj.pending.is_some() {
        return false;
    }
    let cause = match kind {
        ContactKind::Collision => DetonationCause::Collision,
        ContactKind::Trigger => DetonationCause::Trigger,
    };
    proj.pending = Some((cause, position));
    true
}
