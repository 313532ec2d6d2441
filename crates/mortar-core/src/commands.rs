//! Player commands sent from the host to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.
//! Each command is one input edge: a single `Fire` can never launch two rounds.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Aiming ---
    /// Incremental aim input. Bearing wraps; range moves in coarse or fine steps.
    AdjustAim {
        bearing_delta_deg: f64,
        range_steps: i32,
        fine: bool,
    },
    /// Absolute aim, e.g. from a rig that reports its own yaw/elevation.
    SetAim { bearing_deg: f64, range_m: f64 },
    /// Choose the high or low ballistic root.
    SetElevationSolution { solution: ElevationSolution },

    // --- Firing ---
    /// Fire one round of the given kind.
    Fire { ammo: AmmoKind },
    /// Arm the spotter for the next shot, if its cooldown has elapsed.
    RequestSpotter,

    // --- Target selection ---
    SelectNearestTarget,
    CycleTarget { direction: CycleDirection },
    ClearTarget,

    // --- Quiz ---
    /// Advance the quiz deck to its next question.
    NextQuestion,
    /// Answer the current question with a letter A-D.
    SubmitAnswer { choice: char },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal). Reported to hosts that pace the tick loop.
    SetTimeScale { scale: f64 },
    /// Start a new mission.
    StartMission,
    /// Return to the main menu from mission complete.
    ReturnToMenu,
    Pause,
    Resume,
}
