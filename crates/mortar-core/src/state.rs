//! Game state snapshot: the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub outcome: Option<MissionOutcome>,
    pub time_remaining_secs: f64,
    pub base_hp: u32,
    pub aim: AimView,
    pub ammo: AmmoView,
    pub score: ScoreView,
    pub targets: Vec<TargetView>,
    /// Most recently fired round while it is still in flight (camera follow).
    pub projectile: Option<ProjectileView>,
    pub scenario: ScenarioView,
    pub mobile_units_alive: u32,
    pub events: Vec<SimEvent>,
}

/// Mortar aim and fire-control state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AimView {
    pub position: Position,
    /// Compass bearing (degrees, [0, 360)).
    pub bearing_deg: f64,
    pub range_m: f64,
    pub elevation: ElevationSolution,
    /// Launch elevation for the current range and solution (degrees).
    pub launch_angle_deg: f64,
    /// Predicted flight time at the current range (seconds).
    pub flight_time_secs: f64,
    /// Dispersion radius the next shot will use (meters).
    pub dispersion_m: f64,
    pub reload_remaining_secs: f64,
    pub spotter_cooldown_secs: f64,
    pub spotter_armed: bool,
    pub selected_target: Option<u64>,
    /// Advisory range lead for the selected mobile target (meters). Never applied automatically.
    pub lead_m: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmmoView {
    pub standard: u32,
    pub heavy: u32,
    pub marking: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub total: u64,
    pub streak: u32,
    pub bonus_awarded: bool,
    pub rounds_fired: u32,
    pub entities_destroyed: u32,
}

/// A damageable entity visible to the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub entity_id: u64,
    pub kind: EntityKind,
    pub template: String,
    pub position: Position,
    pub velocity: Velocity,
    pub current_hp: f64,
    pub max_hp: f64,
    pub speed_multiplier: f64,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub shot_id: u32,
    pub ammo: AmmoKind,
    pub position: Position,
    pub velocity: Velocity,
    pub aimed_impact: Position,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioView {
    pub mode: ScenarioMode,
    /// Human-readable label of the current phase or wave.
    pub label: String,
    /// Objectives destroyed so far in static mode.
    pub objectives_cleared: u32,
    pub objectives_total: u32,
}
