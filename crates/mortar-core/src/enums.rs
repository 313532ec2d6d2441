//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Round type loaded into the mortar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AmmoKind {
    /// High-explosive round. The base ammunition kind.
    #[default]
    Standard,
    /// Heavier high-explosive round with a wider blast.
    Heavy,
    /// Marking/smoke round: no damage, slows mobile units in the cloud.
    Marking,
}

impl AmmoKind {
    pub const ALL: [AmmoKind; 3] = [AmmoKind::Standard, AmmoKind::Heavy, AmmoKind::Marking];

    /// Area-effect radius at detonation (meters).
    pub fn blast_radius(self) -> f64 {
        match self {
            AmmoKind::Standard => crate::constants::STANDARD_RADIUS,
            AmmoKind::Heavy => crate::constants::HEAVY_RADIUS,
            AmmoKind::Marking => crate::constants::MARKING_RADIUS,
        }
    }

    /// Direct damage dealt to each damageable entity in the blast.
    pub fn direct_damage(self) -> f64 {
        match self {
            AmmoKind::Standard => crate::constants::STANDARD_DAMAGE,
            AmmoKind::Heavy => crate::constants::HEAVY_DAMAGE,
            AmmoKind::Marking => 0.0,
        }
    }

    /// Slow applied to mobile units in the blast: (fraction, duration secs).
    pub fn slow_effect(self) -> Option<(f64, f64)> {
        match self {
            AmmoKind::Marking => Some((
                crate::constants::MARKING_SLOW_PERCENT,
                crate::constants::MARKING_SLOW_SECS,
            )),
            _ => None,
        }
    }
}

/// Which root of the ballistic equation to fire on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElevationSolution {
    /// Plunging fire above 45°.
    #[default]
    High,
    /// Flat fire below 45°.
    Low,
}

/// How a projectile moves between launch and detonation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightMode {
    /// Initial velocity from the launch angle, gravity integrated every tick.
    #[default]
    Physics,
    /// Parametric lerp from origin to impact with a sine height bump.
    KinematicArc,
}

/// Projectile lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectilePhase {
    /// Spawned this tick, not yet integrated.
    #[default]
    Launched,
    InFlight,
    /// Terminal. The entity is despawned once area effects resolve.
    Detonated,
}

/// What set a projectile off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetonationCause {
    /// Contact with a solid collider or the ground.
    Collision,
    /// Overlap with a trigger volume.
    Trigger,
    /// Kinematic arc reached its aimed impact point.
    ArcComplete,
    /// Exceeded the maximum lifetime without contact.
    Lifetime,
}

/// Kind of contact reported against a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Collision,
    Trigger,
}

/// Timed speed multiplier channel on a mobile unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Slow,
    SpeedBuff,
}

/// Role of a spawned entity in the scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Objective,
    FinalBase,
    MobileUnit,
    Prop,
}

/// Outcome of a detonation for HUD feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactOutcome {
    Hit,
    Miss,
    Destroyed,
}

/// Why a fire request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireRejection {
    /// Reload cooldown has not elapsed.
    Cooldown,
    /// No rounds of the requested kind. Correct quiz answers are the only resupply.
    NoAmmo,
    /// The run is not active.
    NotActive,
}

/// Direction for stepping through the target candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleDirection {
    Next,
    Previous,
}

/// Scenario selection from the mission config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioMode {
    /// Phase-gated objective sequence ending in a final base.
    #[default]
    Static,
    /// Time-scheduled waves of static targets and patrol squads.
    Timeline,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    MissionComplete,
}

/// Terminal result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionOutcome {
    Won,
    Lost,
}
