//! Static scenario director.
//!
//! Phase sequence Objective 1..K, then the final base. Each wait is polled
//! state advanced once per tick: "until the objective is destroyed" has no
//! timeout, the pacing gap counts down elapsed time. Every poll first checks
//! that the run is still active and cancels the sequence for good if not.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use mortar_core::components::Health;
use mortar_core::config::MissionConfig;
use mortar_core::constants::FINAL_BASE_HP_MULTIPLIER;
use mortar_core::enums::EntityKind;
use mortar_core::events::SimEvent;
use mortar_core::types::Position;

use crate::catalog::AssetCatalog;
use crate::registry::MobileRegistry;
use crate::scenario;
use crate::world_setup::{self, SpawnOverrides};

#[derive(Debug, Clone, PartialEq)]
pub enum DirectorStage {
    /// Spawn phase `index` on the next poll. `index == objective_count` is the final base.
    Spawn { index: u32 },
    AwaitObjective { index: u32, objective: Entity },
    Pacing { next_index: u32, remaining_secs: f64 },
    AwaitFinalBase { base: Entity },
    Complete,
    /// The run ended while the sequence was still going.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ScenarioDirector {
    pub stage: DirectorStage,
    pub objective_count: u32,
    pub objectives_cleared: u32,
    pub label: String,
}

/// What the director reports back to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorSignal {
    Continue,
    FinalBaseDestroyed,
}

impl ScenarioDirector {
    pub fn new(objective_count: u32) -> Self {
        Self {
            stage: DirectorStage::Spawn { index: 0 },
            objective_count,
            objectives_cleared: 0,
            label: String::new(),
        }
    }

    /// A director with nothing to do, for missions without a static scenario.
    pub fn idle() -> Self {
        Self {
            stage: DirectorStage::Complete,
            objective_count: 0,
            objectives_cleared: 0,
            label: String::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.stage, DirectorStage::Complete | DirectorStage::Cancelled)
    }

    /// Drop any pending wait. Nothing is spawned afterwards.
    pub fn cancel(&mut self) {
        if !self.is_finished() {
            self.stage = DirectorStage::Cancelled;
        }
    }
}

/// Placement frame and randomness shared by every spawn.
pub struct DirectorContext<'a> {
    pub catalog: &'a AssetCatalog,
    pub mission: &'a MissionConfig,
    pub rng: &'a mut ChaCha8Rng,
    pub registry: &'a mut MobileRegistry,
    pub emplacement: Position,
    pub forward_bearing_deg: f64,
}

/// Poll the director once.
pub fn run(
    director: &mut ScenarioDirector,
    world: &mut World,
    ctx: &mut DirectorContext<'_>,
    dt: f64,
    run_active: bool,
    events: &mut Vec<SimEvent>,
) -> DirectorSignal {
    if director.is_finished() {
        return DirectorSignal::Continue;
    }
    if !run_active {
        info!(stage = ?director.stage, "run ended, scenario cancelled");
        director.stage = DirectorStage::Cancelled;
        return DirectorSignal::Continue;
    }

    match director.stage.clone() {
        DirectorStage::Spawn { index } => spawn_phase(director, world, ctx, index, events),
        DirectorStage::AwaitObjective { index, objective } => {
            if is_destroyed(world, objective) {
                director.objectives_cleared += 1;
                let gap = ctx.mission.static_scenario.secs_between_objectives * ctx.mission.pacing_scale();
                debug!(objective = index + 1, gap, "objective cleared");
                director.stage = DirectorStage::Pacing {
                    next_index: index + 1,
                    remaining_secs: gap,
                };
            }
        }
        DirectorStage::Pacing {
            next_index,
            remaining_secs,
        } => {
            let remaining_secs = remaining_secs - dt;
            if remaining_secs <= 0.0 {
                spawn_phase(director, world, ctx, next_index, events);
            } else {
                director.stage = DirectorStage::Pacing {
                    next_index,
                    remaining_secs,
                };
            }
        }
        DirectorStage::AwaitFinalBase { base } => {
            if is_destroyed(world, base) {
                info!("final base destroyed");
                director.stage = DirectorStage::Complete;
                director.label = "Complete".to_string();
                return DirectorSignal::FinalBaseDestroyed;
            }
        }
        DirectorStage::Complete | DirectorStage::Cancelled => {}
    }
    DirectorSignal::Continue
}

/// An objective released by despawn counts as destroyed.
fn is_destroyed(world: &World, entity: Entity) -> bool {
    world
        .get::<&Health>(entity)
        .map(|h| h.destroyed)
        .unwrap_or(true)
}

fn spawn_phase(
    director: &mut ScenarioDirector,
    world: &mut World,
    ctx: &mut DirectorContext<'_>,
    index: u32,
    events: &mut Vec<SimEvent>,
) {
    if index < director.objective_count {
        let label = format!("Objective {}", index + 1);
        info!(phase = %label, "scenario phase started");
        events.push(SimEvent::PhaseStarted {
            label: label.clone(),
        });
        director.label = label;

        let spawned = spawn_objective(world, ctx, index);
        director.stage = match spawned {
            Some(objective) => DirectorStage::AwaitObjective { index, objective },
            // Missing content: skip the phase and keep the sequence moving.
            None => DirectorStage::Pacing {
                next_index: index + 1,
                remaining_secs: 0.0,
            },
        };
    } else {
        let label = "Final Base".to_string();
        info!(phase = %label, "scenario phase started");
        events.push(SimEvent::PhaseStarted {
            label: label.clone(),
        });
        director.label = label;

        director.stage = match spawn_final_base(world, ctx) {
            Some(base) => DirectorStage::AwaitFinalBase { base },
            None => DirectorStage::Complete,
        };
    }
}

fn spawn_objective(world: &mut World, ctx: &mut DirectorContext<'_>, index: u32) -> Option<Entity> {
    let mission = ctx.mission;
    let s = &mission.static_scenario;
    let pos = scenario::objective_placement(
        index,
        s,
        mission.mortar.range_max_m,
        ctx.emplacement,
        ctx.forward_bearing_deg,
    );
    let objective = world_setup::spawn_from_template(
        world,
        ctx.catalog,
        &s.objective_template,
        pos,
        SpawnOverrides {
            kind: Some(EntityKind::Objective),
            max_hp: Some(s.objective_hp),
            points: Some(s.points_per_objective),
            ..Default::default()
        },
    )?;

    spawn_props(world, ctx, pos);
    Some(objective)
}

fn spawn_final_base(world: &mut World, ctx: &mut DirectorContext<'_>) -> Option<Entity> {
    let mission = ctx.mission;
    let s = &mission.static_scenario;
    let pos = scenario::final_base_placement(
        s,
        mission.mortar.range_max_m,
        ctx.emplacement,
        ctx.forward_bearing_deg,
    );
    let base = world_setup::spawn_from_template(
        world,
        ctx.catalog,
        &s.objective_template,
        pos,
        SpawnOverrides {
            kind: Some(EntityKind::FinalBase),
            max_hp: Some(s.objective_hp * FINAL_BASE_HP_MULTIPLIER),
            points: Some(s.points_for_final_base),
            ..Default::default()
        },
    )?;

    for post in scenario::escort_positions(pos, ctx.forward_bearing_deg) {
        let escort = world_setup::spawn_from_template(
            world,
            ctx.catalog,
            &s.escort_template,
            post,
            SpawnOverrides {
                kind: Some(EntityKind::MobileUnit),
                max_hp: Some(mission.enemy.max_hp),
                points: Some(mission.enemy.points_on_destroyed),
                base_speed: Some(0.0),
                heading_deg: post.bearing_deg_to(&ctx.emplacement),
            },
        );
        if let Some(escort) = escort {
            ctx.registry.register(escort);
        }
    }
    spawn_props(world, ctx, pos);
    Some(base)
}

/// Scatter the configured number of destructible props around a phase target.
fn spawn_props(world: &mut World, ctx: &mut DirectorContext<'_>, center: Position) {
    let mission = ctx.mission;
    let s = &mission.static_scenario;
    if s.prop_templates.is_empty() {
        return;
    }
    let props = ctx.rng.gen_range(s.prop_count_min..=s.prop_count_max);
    for _ in 0..props {
        let template = &s.prop_templates[ctx.rng.gen_range(0..s.prop_templates.len())];
        let at = scenario::scatter_point(center, s.prop_radius_m, ctx.rng);
        let points = scenario::prop_points(template, s, ctx.rng);
        world_setup::spawn_from_template(
            world,
            ctx.catalog,
            template,
            at,
            SpawnOverrides {
                kind: Some(EntityKind::Prop),
                points: Some(points),
                ..Default::default()
            },
        );
    }
}
