//! Mission configuration record.
//!
//! Loaded once at mission start. Every section carries `#[serde(default)]`, so a
//! partial file only overrides what it names. Anything that cannot be read at
//! all falls back to [`MissionConfig::default`] with a warning.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::enums::{AmmoKind, FlightMode, ScenarioMode};
use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub mission_id: String,
    /// Mission length (seconds). Also scales the scenario pacing gaps.
    pub timer_secs: f64,
    /// Breaches the base can absorb before the mission is lost.
    pub base_hp: u32,
    pub mortar: MortarSettings,
    pub streak_rewards: StreakRewards,
    pub enemy: EnemySettings,
    pub scenario_mode: ScenarioMode,
    pub static_scenario: StaticScenarioSettings,
    pub starting_ammo: AmmoLoadout,
    pub hidden_bonus: HiddenBonus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MortarSettings {
    pub range_max_m: f64,
    pub reload_secs: f64,
    pub coarse_step_m: f64,
    pub fine_step_m: f64,
    /// Dispersion radius of a normal shot (meters).
    pub base_spread_m: f64,
    /// Dispersion radius of a spotter-assisted shot (meters).
    pub spotter_spread_m: f64,
    pub spotter_cooldown_secs: f64,
    pub flight_time_min: f64,
    pub flight_time_max: f64,
    pub launch_speed: f64,
    pub flight_mode: FlightMode,
    pub max_lifetime_secs: f64,
}

/// Streak thresholds. A reward repeats every N correct answers; 0 disables it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakRewards {
    pub marking_at: u32,
    pub heavy_at: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySettings {
    /// Catalog template for patrol squad members.
    pub unit_template: String,
    pub patrol_speed_mps: f64,
    /// Fractional speed increase applied to every unit on a wrong answer.
    pub speed_buff_on_wrong_answer: f64,
    pub speed_buff_duration_secs: f64,
    pub max_hp: f64,
    pub points_on_destroyed: u32,
}

/// Inclusive point range for a spawned prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRange {
    pub min: u32,
    pub max: u32,
}

impl PointRange {
    /// A range is only honored when it is ordered and not all zero.
    pub fn is_usable(&self) -> bool {
        self.max >= self.min && self.max > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticScenarioSettings {
    pub objective_count: u32,
    /// Fraction of max range for the first objective.
    pub distance_min_factor: f64,
    /// Fraction of max range for the last objective.
    pub distance_max_factor: f64,
    /// Left/right placement offset from the forward axis (degrees).
    pub angle_spread_deg: f64,
    /// Gap between objectives at the baseline mission length (seconds).
    pub secs_between_objectives: f64,
    pub objective_template: String,
    pub objective_hp: f64,
    pub escort_template: String,
    pub points_per_objective: u32,
    pub points_for_final_base: u32,
    pub prop_count_min: u32,
    pub prop_count_max: u32,
    pub prop_radius_m: f64,
    pub prop_templates: Vec<String>,
    /// Flat fallback when no range applies.
    pub points_per_prop: u32,
    /// Global fallback range for props without a per-template range.
    pub prop_points: PointRange,
    pub prop_point_ranges: BTreeMap<String, PointRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmmoLoadout {
    pub standard: u32,
    pub heavy: u32,
    pub marking: u32,
}

/// One-off score bonus for using a particular round often enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HiddenBonus {
    pub ammo: AmmoKind,
    pub uses_required: u32,
    pub points: u32,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            mission_id: "M3_RutLui_121946".to_string(),
            timer_secs: 420.0,
            base_hp: 4,
            mortar: MortarSettings::default(),
            streak_rewards: StreakRewards::default(),
            enemy: EnemySettings::default(),
            scenario_mode: ScenarioMode::default(),
            static_scenario: StaticScenarioSettings::default(),
            starting_ammo: AmmoLoadout::default(),
            hidden_bonus: HiddenBonus::default(),
        }
    }
}

impl Default for MortarSettings {
    fn default() -> Self {
        Self {
            range_max_m: 40.0,
            reload_secs: 2.0,
            coarse_step_m: 20.0,
            fine_step_m: 5.0,
            base_spread_m: 2.5,
            spotter_spread_m: 1.0,
            spotter_cooldown_secs: 20.0,
            flight_time_min: 1.2,
            flight_time_max: 2.4,
            launch_speed: 45.0,
            flight_mode: FlightMode::default(),
            max_lifetime_secs: crate::constants::PROJECTILE_MAX_LIFETIME,
        }
    }
}

impl Default for StreakRewards {
    fn default() -> Self {
        Self {
            marking_at: 3,
            heavy_at: 5,
        }
    }
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            unit_template: "soldier".to_string(),
            patrol_speed_mps: 1.7,
            speed_buff_on_wrong_answer: 0.1,
            speed_buff_duration_secs: 10.0,
            max_hp: 50.0,
            points_on_destroyed: 25,
        }
    }
}

impl Default for StaticScenarioSettings {
    fn default() -> Self {
        Self {
            objective_count: 3,
            distance_min_factor: 0.6,
            distance_max_factor: 0.9,
            angle_spread_deg: 25.0,
            secs_between_objectives: 10.0,
            objective_template: "bunker".to_string(),
            objective_hp: 100.0,
            escort_template: "tank".to_string(),
            points_per_objective: 50,
            points_for_final_base: 200,
            prop_count_min: 1,
            prop_count_max: 3,
            prop_radius_m: 10.0,
            prop_templates: vec![
                "crate".to_string(),
                "barrel".to_string(),
                "sandbags".to_string(),
            ],
            points_per_prop: 10,
            prop_points: PointRange { min: 0, max: 0 },
            prop_point_ranges: BTreeMap::new(),
        }
    }
}

impl Default for AmmoLoadout {
    fn default() -> Self {
        Self {
            standard: 10,
            heavy: 0,
            marking: 0,
        }
    }
}

impl Default for HiddenBonus {
    fn default() -> Self {
        Self {
            ammo: AmmoKind::Marking,
            uses_required: 5,
            points: 2000,
        }
    }
}

impl MissionConfig {
    /// Parse a mission config from JSON text.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: MissionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config.sanitized())
    }

    /// Read and parse a mission config file.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Load a mission config, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "mission config unavailable, using defaults");
                Self::default()
            }
        }
    }

    /// Reject configs that cannot describe a playable mission.
    fn validate(&self) -> ConfigResult<()> {
        if !self.mortar.range_max_m.is_finite() || self.mortar.range_max_m <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "mortar.range_max_m must be positive, got {}",
                self.mortar.range_max_m
            )));
        }
        if !self.timer_secs.is_finite() || self.timer_secs <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "timer_secs must be positive, got {}",
                self.timer_secs
            )));
        }
        Ok(())
    }

    /// Clamp out-of-order or negative tuning values.
    pub fn sanitized(mut self) -> Self {
        let defaults = MissionConfig::default();
        if !is_positive(self.timer_secs) {
            warn!(value = self.timer_secs, "timer_secs unusable, using default");
            self.timer_secs = defaults.timer_secs;
        }

        let m = &mut self.mortar;
        if !is_positive(m.range_max_m) {
            warn!(value = m.range_max_m, "mortar.range_max_m unusable, using default");
            m.range_max_m = defaults.mortar.range_max_m;
        }
        if !is_positive(m.launch_speed) {
            warn!(value = m.launch_speed, "mortar.launch_speed unusable, using default");
            m.launch_speed = defaults.mortar.launch_speed;
        }
        m.reload_secs = m.reload_secs.max(0.0);
        m.coarse_step_m = m.coarse_step_m.max(0.0);
        m.fine_step_m = m.fine_step_m.max(0.0);
        m.base_spread_m = m.base_spread_m.max(0.0);
        m.spotter_spread_m = m.spotter_spread_m.max(0.0);
        m.spotter_cooldown_secs = m.spotter_cooldown_secs.max(0.0);
        m.flight_time_min = m.flight_time_min.max(0.0);
        m.flight_time_max = m.flight_time_max.max(m.flight_time_min);
        m.max_lifetime_secs = m.max_lifetime_secs.max(crate::constants::DT);

        let s = &mut self.static_scenario;
        if s.distance_min_factor.is_nan() {
            s.distance_min_factor = defaults.static_scenario.distance_min_factor;
        }
        if s.distance_max_factor.is_nan() {
            s.distance_max_factor = defaults.static_scenario.distance_max_factor;
        }
        s.distance_min_factor = s.distance_min_factor.clamp(0.0, 1.0);
        s.distance_max_factor = s.distance_max_factor.clamp(s.distance_min_factor, 1.0);
        s.secs_between_objectives = s.secs_between_objectives.max(0.0);
        s.prop_count_max = s.prop_count_max.max(s.prop_count_min);
        s.prop_radius_m = s.prop_radius_m.max(0.0);
        s.objective_hp = s.objective_hp.max(1.0);

        let e = &mut self.enemy;
        e.patrol_speed_mps = e.patrol_speed_mps.max(0.0);
        e.speed_buff_duration_secs = e.speed_buff_duration_secs.max(0.0);
        e.max_hp = e.max_hp.max(1.0);
        self
    }

    /// Ratio of this mission's length to the length pacing was authored for.
    pub fn pacing_scale(&self) -> f64 {
        self.timer_secs / crate::constants::BASELINE_MISSION_SECS
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
