//! Mortar fire-control state: aim, cooldowns, spotter and target selection.
//!
//! Stored on `SimulationEngine`, NOT as ECS entities. The per-tick logic that
//! reads and writes it lives in `systems::fire_control`.

use hecs::Entity;

use mortar_core::config::MortarSettings;
use mortar_core::constants::{GRAVITY, INITIAL_RANGE_M};
use mortar_core::enums::{ElevationSolution, FlightMode};

use crate::ballistics;

#[derive(Debug, Clone)]
pub struct FireControlState {
    /// Compass bearing in [0, 360).
    pub bearing_deg: f64,
    /// Desired range in [0, range_max].
    pub range_m: f64,
    pub elevation: ElevationSolution,
    pub reload_remaining_secs: f64,
    pub spotter_cooldown_secs: f64,
    /// Reduced dispersion on the next successful shot.
    pub spotter_armed: bool,
    pub selected_target: Option<Entity>,
    /// Most recently fired round while it is still in flight.
    pub last_fired: Option<Entity>,
    pub next_shot_id: u32,
}

impl FireControlState {
    pub fn new(settings: &MortarSettings, forward_bearing_deg: f64) -> Self {
        Self {
            bearing_deg: forward_bearing_deg.rem_euclid(360.0),
            range_m: INITIAL_RANGE_M.min(settings.range_max_m),
            elevation: ElevationSolution::default(),
            reload_remaining_secs: 0.0,
            spotter_cooldown_secs: 0.0,
            spotter_armed: false,
            selected_target: None,
            last_fired: None,
            next_shot_id: 1,
        }
    }

    /// Incremental aim: bearing wraps, range moves in whole coarse or fine steps.
    pub fn adjust(&mut self, bearing_delta_deg: f64, range_steps: i32, fine: bool, settings: &MortarSettings) {
        let step = if fine {
            settings.fine_step_m
        } else {
            settings.coarse_step_m
        };
        self.bearing_deg = (self.bearing_deg + bearing_delta_deg).rem_euclid(360.0);
        self.range_m = (self.range_m + f64::from(range_steps) * step).clamp(0.0, settings.range_max_m);
    }

    pub fn set(&mut self, bearing_deg: f64, range_m: f64, settings: &MortarSettings) {
        if bearing_deg.is_finite() {
            self.bearing_deg = bearing_deg.rem_euclid(360.0);
        }
        if range_m.is_finite() {
            self.range_m = range_m.clamp(0.0, settings.range_max_m);
        }
    }

    /// Dispersion radius the next shot would use.
    pub fn dispersion_m(&self, settings: &MortarSettings) -> f64 {
        if self.spotter_armed {
            settings.spotter_spread_m
        } else {
            settings.base_spread_m
        }
    }

    /// Flight time of a round fired at the current aim, in the configured
    /// flight mode.
    pub fn flight_time_secs(&self, settings: &MortarSettings) -> f64 {
        match settings.flight_mode {
            FlightMode::Physics => ballistics::ballistic_flight_time(
                self.range_m,
                settings.launch_speed,
                GRAVITY,
                self.elevation,
            ),
            FlightMode::KinematicArc => self.arc_flight_time_secs(settings),
        }
    }

    /// Fixed flight time of the kinematic arc, linear in the fraction of max range.
    pub fn arc_flight_time_secs(&self, settings: &MortarSettings) -> f64 {
        ballistics::compute_flight_time(
            self.range_m,
            settings.range_max_m,
            settings.flight_time_min,
            settings.flight_time_max,
        )
    }

    pub fn launch_angle_deg(&self, settings: &MortarSettings) -> f64 {
        ballistics::compute_launch_angle(self.range_m, settings.launch_speed, GRAVITY, self.elevation)
    }

    pub fn reloaded(&self) -> bool {
        self.reload_remaining_secs <= 0.0
    }
}
