//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Marks the player's mortar emplacement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FiringPosition {
    /// Compass bearing of the emplacement's forward axis (degrees).
    pub forward_bearing_deg: f64,
}

/// Hit points of anything that can be damaged and destroyed.
///
/// Invariant: `0 <= current_hp <= max_hp`. `destroyed` latches the first time
/// `current_hp` reaches zero so the destruction signal fires once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub max_hp: f64,
    pub current_hp: f64,
    pub destroyed: bool,
}

/// Scenario role and catalog template of a spawned entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub kind: EntityKind,
    pub template: String,
}

/// Points awarded when the entity is destroyed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointValue {
    pub points: u32,
}

/// A single collision sphere, offset from the owning entity's position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HitSphere {
    pub offset: Position,
    pub radius: f64,
}

/// Collision geometry. One entity may own several spheres, so an area query
/// can report the same entity more than once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitSpheres {
    pub spheres: Vec<HitSphere>,
    /// Solid colliders stop projectiles; non-solid ones only count for area queries.
    pub solid: bool,
}

/// Non-solid volume that detonates a projectile on overlap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TriggerVolume {
    pub radius: f64,
}

/// Mobility capability: walks along a heading at base speed times modifiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MobileUnit {
    /// Unmodified ground speed (m/s). Zero for stationary escorts.
    pub base_speed: f64,
    /// Compass heading of travel (degrees).
    pub heading_deg: f64,
}

/// Two independent timed multiplier channels applied to a mobile unit's speed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeedModifiers {
    /// In [0, 1]. 1 when no slow is active.
    pub slow_multiplier: f64,
    /// Elapsed-time deadline of the active slow, if any.
    pub slow_expires_at: Option<f64>,
    /// >= 1 while a wrong-answer buff is active.
    pub buff_multiplier: f64,
    pub buff_expires_at: Option<f64>,
}

impl Default for SpeedModifiers {
    fn default() -> Self {
        Self {
            slow_multiplier: 1.0,
            slow_expires_at: None,
            buff_multiplier: 1.0,
            buff_expires_at: None,
        }
    }
}

/// In-flight mortar round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Monotonic shot number.
    pub id: u32,
    pub ammo: AmmoKind,
    pub origin: Position,
    /// Aimed impact point including dispersion.
    pub aimed_impact: Position,
    /// Fixed flight time for kinematic arcs; `None` when gravity drives the flight.
    pub flight_time: Option<f64>,
    /// Elapsed simulation time at spawn.
    pub spawned_at: f64,
    pub mode: FlightMode,
    pub phase: ProjectilePhase,
    /// First detonation trigger observed this tick. Later triggers are ignored.
    pub pending: Option<(DetonationCause, Position)>,
}
