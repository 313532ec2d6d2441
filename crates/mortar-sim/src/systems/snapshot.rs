//! Builds the per-tick snapshot from world and engagement state.
//!
//! Read-only over the world.

use hecs::World;

use mortar_core::components::*;
use mortar_core::config::MissionConfig;
use mortar_core::enums::*;
use mortar_core::events::SimEvent;
use mortar_core::state::*;
use mortar_core::types::{Position, SimTime, Velocity};

use crate::engagement::FireControlState;
use crate::registry::AmmoInventory;
use crate::scoring::ScoreState;
use crate::systems::fire_control;
use crate::systems::mission_clock::MissionClock;
use crate::systems::status_effects;

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    outcome: Option<MissionOutcome>,
    clock: &MissionClock,
    mission: &MissionConfig,
    fire_control: &FireControlState,
    inventory: &AmmoInventory,
    score: &ScoreState,
    scenario: ScenarioView,
    mobile_units_alive: u32,
    emplacement: Position,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        outcome,
        time_remaining_secs: clock.time_remaining_secs,
        base_hp: clock.base_hp,
        aim: build_aim(world, fire_control, mission, emplacement),
        ammo: inventory.view(),
        score: score.view(),
        targets: build_targets(world, fire_control),
        projectile: build_projectile(world, fire_control),
        scenario,
        mobile_units_alive,
        events,
    }
}

fn build_aim(
    world: &World,
    fc: &FireControlState,
    mission: &MissionConfig,
    emplacement: Position,
) -> AimView {
    let settings = &mission.mortar;
    AimView {
        position: emplacement,
        bearing_deg: fc.bearing_deg,
        range_m: fc.range_m,
        elevation: fc.elevation,
        launch_angle_deg: fc.launch_angle_deg(settings),
        flight_time_secs: fc.flight_time_secs(settings),
        dispersion_m: fc.dispersion_m(settings),
        reload_remaining_secs: fc.reload_remaining_secs,
        spotter_cooldown_secs: fc.spotter_cooldown_secs,
        spotter_armed: fc.spotter_armed,
        selected_target: fc.selected_target.map(|e| e.to_bits().get()),
        lead_m: fire_control::target_lead(world, fc, emplacement, settings),
    }
}

/// Build TargetView list from every live damageable entity.
fn build_targets(world: &World, fc: &FireControlState) -> Vec<TargetView> {
    let mut targets: Vec<(u64, TargetView)> = world
        .query::<(
            &Target,
            &Position,
            &Health,
            Option<&Velocity>,
            Option<&SpeedModifiers>,
        )>()
        .iter()
        .filter(|(_, (_, _, health, _, _))| !health.destroyed)
        .map(|(entity, (target, pos, health, vel, mods))| {
            let id = entity.to_bits().get();
            let view = TargetView {
                entity_id: id,
                kind: target.kind,
                template: target.template.clone(),
                position: *pos,
                velocity: vel.copied().unwrap_or_default(),
                current_hp: health.current_hp,
                max_hp: health.max_hp,
                speed_multiplier: mods.map(status_effects::speed_multiplier).unwrap_or(1.0),
                selected: fc.selected_target == Some(entity),
            };
            (id, view)
        })
        .collect();
    targets.sort_by_key(|(id, _)| *id);
    targets.into_iter().map(|(_, view)| view).collect()
}

/// The outstanding round, for camera follow.
fn build_projectile(world: &World, fc: &FireControlState) -> Option<ProjectileView> {
    let round = fc.last_fired?;
    let mut query = world
        .query_one::<(&Projectile, &Position, &Velocity)>(round)
        .ok()?;
    let (proj, pos, vel) = query.get()?;
    if proj.phase == ProjectilePhase::Detonated {
        return None;
    }
    Some(ProjectileView {
        shot_id: proj.id,
        ammo: proj.ammo,
        position: *pos,
        velocity: *vel,
        aimed_impact: proj.aimed_impact,
    })
}
