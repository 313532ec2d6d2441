//! Simulation constants and tuning parameters.
//!
//! Values that a mission designer may want to change live in
//! [`crate::config::MissionConfig`]; these are the fixed rules of the model.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Gravitational acceleration (m/s²), acting along -y.
pub const GRAVITY: f64 = 9.81;

/// Smallest launch speed the solver will divide by.
pub const MIN_LAUNCH_SPEED: f64 = 1e-3;

/// Floor for the max-range denominator in the flight-time model.
pub const MIN_RANGE_DENOMINATOR: f64 = 0.01;

/// Fastest the simulation may run relative to real time.
pub const MAX_TIME_SCALE: f64 = 4.0;

/// Remaining cooldown below this counts as elapsed.
pub const TIMER_EPSILON: f64 = 1e-9;

// --- Ammunition ---

/// Standard round blast radius (meters).
pub const STANDARD_RADIUS: f64 = 4.0;

/// Standard round direct damage.
pub const STANDARD_DAMAGE: f64 = 100.0;

/// Heavy round blast radius (meters).
pub const HEAVY_RADIUS: f64 = 5.5;

/// Heavy round direct damage.
pub const HEAVY_DAMAGE: f64 = 120.0;

/// Marking round cloud radius (meters).
pub const MARKING_RADIUS: f64 = 4.0;

/// Slow fraction applied by a marking cloud (0.3 = -30% speed).
pub const MARKING_SLOW_PERCENT: f64 = 0.3;

/// Duration of the marking slow (seconds).
pub const MARKING_SLOW_SECS: f64 = 7.0;

// --- Projectile ---

/// Force-detonate rounds that have not hit anything after this long (seconds).
pub const PROJECTILE_MAX_LIFETIME: f64 = 10.0;

/// Peak height of the kinematic arc's sine bump (meters).
pub const KINEMATIC_ARC_HEIGHT: f64 = 3.0;

/// Muzzle height above the emplacement (meters).
pub const MUZZLE_HEIGHT: f64 = 0.0;

// --- Fire control ---

/// Initial desired range when a mission starts (meters), capped to max range.
pub const INITIAL_RANGE_M: f64 = 20.0;

// --- Scenario ---

/// Mission length the pacing gaps were authored against (seconds).
pub const BASELINE_MISSION_SECS: f64 = 480.0;

/// Closest an objective may be placed (meters).
pub const MIN_SPAWN_DISTANCE: f64 = 10.0;

/// Farthest an objective may be placed, as a fraction of max range.
pub const MAX_SPAWN_RANGE_FRACTION: f64 = 0.98;

/// Extra range fraction added for the final base beyond the last objective.
pub const FINAL_BASE_EXTRA_FRACTION: f64 = 0.05;

/// HP multiplier for the final base over a regular objective.
pub const FINAL_BASE_HP_MULTIPLIER: f64 = 2.0;

/// Stationary escorts spawned around the final base.
pub const FINAL_BASE_ESCORTS: u32 = 2;

/// Escort distance from the final base (meters).
pub const ESCORT_OFFSET_M: f64 = 10.0;

/// Angular spacing between escorts (degrees).
pub const ESCORT_SPREAD_DEG: f64 = 40.0;

/// Props are placed between this fraction of the scatter radius and the full radius.
pub const PROP_INNER_RADIUS_FRACTION: f64 = 0.5;

// --- Timeline mode ---

/// Lane offset from the emplacement's forward axis (degrees).
pub const LANE_ANGLE_DEG: f64 = 25.0;

/// Lane spawn distance as a fraction of max range.
pub const LANE_RANGE_FRACTION: f64 = 0.9;

/// Lateral spacing between squad members (meters).
pub const SQUAD_SPACING_M: f64 = 1.5;

/// Distance from the emplacement at which a mobile unit breaches the base (meters).
pub const BASE_BREACH_RADIUS: f64 = 2.0;
