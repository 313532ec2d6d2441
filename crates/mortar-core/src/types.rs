//! Fundamental geometric and simulation types.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// 3D position in simulation space (meters, Cartesian).
/// x = East, y = Up, z = North. The ground plane is y = 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3D velocity in simulation space (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Range to another position in meters (3D distance).
    pub fn range_to(&self, other: &Position) -> f64 {
        self.as_dvec3().distance(other.as_dvec3())
    }

    /// Distance on the ground plane (ignoring height).
    pub fn ground_distance_to(&self, other: &Position) -> f64 {
        self.ground().distance(other.ground())
    }

    /// Bearing to another position in degrees (0 = North, clockwise), in [0, 360).
    pub fn bearing_deg_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        dx.atan2(dz).to_degrees().rem_euclid(360.0)
    }

    /// Same position projected onto the ground plane.
    pub fn on_ground(&self) -> Position {
        Position::new(self.x, 0.0, self.z)
    }

    /// Ground-plane coordinates as (east, north).
    pub fn ground(&self) -> DVec2 {
        DVec2::new(self.x, self.z)
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Position::new(v.x, v.y, v.z)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Speed magnitude (m/s).
    pub fn speed(&self) -> f64 {
        self.as_dvec3().length()
    }

    /// Velocity projected onto the ground plane as (east, north).
    pub fn ground(&self) -> DVec2 {
        DVec2::new(self.x, self.z)
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Velocity {
    fn from(v: DVec3) -> Self {
        Velocity::new(v.x, v.y, v.z)
    }
}

/// Unit ground direction for a compass bearing in degrees.
pub fn bearing_direction(bearing_deg: f64) -> DVec3 {
    let rad = bearing_deg.to_radians();
    DVec3::new(rad.sin(), 0.0, rad.cos())
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.advance_by(self.dt());
    }

    /// Advance by one tick covering `dt` simulated seconds (time-scaled).
    pub fn advance_by(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
