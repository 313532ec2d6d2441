//! Timeline spawning system: spawns scheduled waves when mission time
//! reaches them, each wave exactly once.

use hecs::World;
use tracing::info;

use mortar_core::config::MissionConfig;
use mortar_core::constants::LANE_ANGLE_DEG;
use mortar_core::enums::EntityKind;
use mortar_core::events::SimEvent;
use mortar_core::types::Position;

use crate::catalog::AssetCatalog;
use crate::registry::MobileRegistry;
use crate::scenario;
use crate::world_setup::{self, SpawnOverrides};

/// Approach lane relative to the emplacement's forward axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    pub fn angle_offset_deg(self) -> f64 {
        match self {
            Lane::Left => -LANE_ANGLE_DEG,
            Lane::Right => LANE_ANGLE_DEG,
        }
    }
}

#[derive(Debug, Clone)]
pub enum WaveGroup {
    /// A stationary objective at the head of the lane.
    StaticTarget { lane: Lane },
    /// Mobile units abreast, walking toward the emplacement.
    Squad { lane: Lane, count: u32 },
    /// Multiply the walking pace of units spawned from here on.
    PaceIncrease { factor: f64 },
}

/// A single wave definition.
#[derive(Debug, Clone)]
pub struct WaveEntry {
    /// Mission time at which this wave spawns (seconds).
    pub spawn_at_secs: f64,
    pub label: String,
    pub groups: Vec<WaveGroup>,
    /// Whether this wave has already been spawned.
    pub spawned: bool,
}

impl WaveEntry {
    pub fn new(spawn_at_secs: f64, label: &str, groups: Vec<WaveGroup>) -> Self {
        Self {
            spawn_at_secs,
            label: label.to_string(),
            groups,
            spawned: false,
        }
    }
}

/// The complete wave schedule for a mission.
#[derive(Debug, Clone, Default)]
pub struct WaveSchedule {
    pub waves: Vec<WaveEntry>,
    /// Current pace multiplier on patrol speed.
    pub pace: f64,
}

impl WaveSchedule {
    /// Total mobile units across all waves.
    pub fn total_units(&self) -> u32 {
        self.waves
            .iter()
            .flat_map(|w| w.groups.iter())
            .map(|g| match g {
                WaveGroup::Squad { count, .. } => *count,
                _ => 0,
            })
            .sum()
    }

    /// Label of the latest wave already spawned.
    pub fn current_label(&self) -> Option<&str> {
        self.waves
            .iter()
            .rev()
            .find(|w| w.spawned)
            .map(|w| w.label.as_str())
    }
}

/// Check schedule and spawn any due waves.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    catalog: &AssetCatalog,
    schedule: &mut WaveSchedule,
    mission: &MissionConfig,
    registry: &mut MobileRegistry,
    emplacement: Position,
    forward_bearing_deg: f64,
    elapsed_secs: f64,
    run_active: bool,
    events: &mut Vec<SimEvent>,
) {
    if !run_active {
        return;
    }
    let range_max = mission.mortar.range_max_m;

    for wave in &mut schedule.waves {
        if wave.spawned || elapsed_secs < wave.spawn_at_secs {
            continue;
        }
        wave.spawned = true;
        info!(wave = %wave.label, at = elapsed_secs, "wave spawned");
        events.push(SimEvent::PhaseStarted {
            label: wave.label.clone(),
        });

        for group in &wave.groups {
            match *group {
                WaveGroup::StaticTarget { lane } => {
                    let pos = scenario::lane_position(lane, 0, 1, range_max, emplacement, forward_bearing_deg);
                    let s = &mission.static_scenario;
                    world_setup::spawn_from_template(
                        world,
                        catalog,
                        &s.objective_template,
                        pos,
                        SpawnOverrides {
                            kind: Some(EntityKind::Objective),
                            max_hp: Some(s.objective_hp),
                            points: Some(s.points_per_objective),
                            ..Default::default()
                        },
                    );
                }
                WaveGroup::Squad { lane, count } => {
                    for member in 0..count {
                        let pos = scenario::lane_position(
                            lane,
                            member,
                            count,
                            range_max,
                            emplacement,
                            forward_bearing_deg,
                        );
                        let spawned = world_setup::spawn_from_template(
                            world,
                            catalog,
                            &mission.enemy.unit_template,
                            pos,
                            SpawnOverrides {
                                kind: Some(EntityKind::MobileUnit),
                                max_hp: Some(mission.enemy.max_hp),
                                points: Some(mission.enemy.points_on_destroyed),
                                base_speed: Some(mission.enemy.patrol_speed_mps * schedule.pace),
                                heading_deg: pos.bearing_deg_to(&emplacement),
                            },
                        );
                        if let Some(unit) = spawned {
                            registry.register(unit);
                        }
                    }
                }
                WaveGroup::PaceIncrease { factor } => {
                    schedule.pace *= factor;
                }
            }
        }
    }
}
