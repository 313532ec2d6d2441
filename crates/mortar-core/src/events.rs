//! Events emitted by the simulation for HUD, audio and VFX feedback.
//!
//! Events are appended to an ordered per-tick bus and drained into the
//! snapshot, so listeners observe them in the order they happened.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Round launched.
    Fired {
        shot_id: u32,
        ammo: AmmoKind,
        aimed_impact: Position,
        flight_time_secs: f64,
        /// Ground distance of the aimed impact minus the requested range.
        range_error_m: f64,
        spotter_used: bool,
    },
    /// Fire request dropped.
    FireRejected { ammo: AmmoKind, reason: FireRejection },
    /// Spotter armed for the next shot.
    SpotterArmed { cooldown_secs: f64 },
    /// Round detonated. The position is captured here, before the projectile is removed.
    Detonated {
        shot_id: u32,
        ammo: AmmoKind,
        position: Position,
        cause: DetonationCause,
    },
    /// Per-shot result for HUD feedback.
    ImpactResult {
        shot_id: u32,
        outcome: ImpactOutcome,
        /// Ground distance from the impact to the reference target, if any exists.
        miss_distance_m: Option<f64>,
    },
    /// A damageable entity reached zero HP. Fires once per entity.
    Destroyed {
        entity_id: u64,
        kind: EntityKind,
        position: Position,
        points: u32,
    },
    /// A timed status effect was applied to a mobile unit.
    StatusApplied {
        entity_id: u64,
        kind: StatusKind,
        multiplier: f64,
        duration_secs: f64,
    },
    ScoreChanged { total: u64 },
    /// Transient score popup, optionally anchored in the world.
    ScoreDelta {
        points: u32,
        position: Option<Position>,
    },
    StreakChanged { streak: u32 },
    AmmoChanged { ammo: AmmoKind, count: u32 },
    /// One-off bonus for repeated use of a round type.
    BonusAwarded { points: u32 },
    /// Quiz answer evaluated.
    AnswerEvaluated { correct: bool },
    /// Scenario phase entered (e.g. "Objective 2", "Final Base").
    PhaseStarted { label: String },
    /// A mobile unit reached the emplacement.
    BaseBreached { remaining_hp: u32 },
    MissionEnded { outcome: MissionOutcome },
}
