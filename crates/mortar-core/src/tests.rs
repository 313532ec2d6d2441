#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::commands::PlayerCommand;
    use crate::config::{MissionConfig, PointRange};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::state::GameStateSnapshot;
    use crate::types::{bearing_direction, Position, SimTime, Velocity};

    /// Commands travel as a tagged union; the tag must survive a round trip.
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::AdjustAim {
                bearing_delta_deg: -2.0,
                range_steps: 1,
                fine: true,
            },
            PlayerCommand::Fire {
                ammo: AmmoKind::Marking,
            },
            PlayerCommand::CycleTarget {
                direction: CycleDirection::Previous,
            },
            PlayerCommand::SubmitAnswer { choice: 'c' },
            PlayerCommand::StartMission,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            assert!(json.contains("\"type\""), "missing tag in {json}");
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.phase, back.phase);
        assert!(
            json.len() < 2048,
            "Empty snapshot should be <2KB, was {} bytes",
            json.len()
        );
    }

    // ---- Geometry ----

    #[test]
    fn test_ground_distance_ignores_height() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 50.0, 4.0);
        assert!((a.ground_distance_to(&b) - 5.0).abs() < 1e-10);
        assert!(a.range_to(&b) > 50.0);
    }

    #[test]
    fn test_bearing_convention() {
        let origin = Position::new(0.0, 0.0, 0.0);
        let north = Position::new(0.0, 0.0, 100.0);
        let east = Position::new(100.0, 0.0, 0.0);
        let west = Position::new(-100.0, 0.0, 0.0);
        assert!(origin.bearing_deg_to(&north).abs() < 1e-10);
        assert!((origin.bearing_deg_to(&east) - 90.0).abs() < 1e-10);
        assert!((origin.bearing_deg_to(&west) - 270.0).abs() < 1e-10);

        let dir = bearing_direction(90.0);
        assert!((dir.x - 1.0).abs() < 1e-12);
        assert!(dir.y.abs() < 1e-12);
        assert!(dir.z.abs() < 1e-12);
    }

    #[test]
    fn test_velocity_ground_projection() {
        let v = Velocity::new(3.0, -20.0, 4.0);
        assert!((v.ground().length() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..30 {
            time.advance();
        }
        assert_eq!(time.tick, 30);
        // 30 ticks at 30Hz = 1 second
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }

    // ---- Mission config ----

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config =
            MissionConfig::from_json_str(r#"{ "timer_secs": 240, "mortar": { "range_max_m": 60 } }"#)
                .unwrap();
        assert_eq!(config.timer_secs, 240.0);
        assert_eq!(config.mortar.range_max_m, 60.0);
        assert_eq!(config.mortar.reload_secs, 2.0);
        assert_eq!(config.streak_rewards.marking_at, 3);
        assert!((config.pacing_scale() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_corrupt_config_is_parse_error() {
        let err = MissionConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_impossible_config_is_invalid() {
        let err = MissionConfig::from_json_str(r#"{ "mortar": { "range_max_m": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = MissionConfig::load_or_default(Path::new("/nonexistent/mission.json"));
        assert_eq!(config, MissionConfig::default());
    }

    #[test]
    fn test_sanitize_orders_ranges() {
        let mut config = MissionConfig::default();
        config.mortar.flight_time_min = 3.0;
        config.mortar.flight_time_max = 1.0;
        config.static_scenario.prop_count_min = 4;
        config.static_scenario.prop_count_max = 2;
        config.mortar.base_spread_m = -1.0;
        let config = config.sanitized();
        assert_eq!(config.mortar.flight_time_max, 3.0);
        assert_eq!(config.static_scenario.prop_count_max, 4);
        assert_eq!(config.mortar.base_spread_m, 0.0);
    }

    #[test]
    fn test_sanitize_replaces_unusable_range_timer_and_speed() {
        let mut config = MissionConfig::default();
        config.mortar.range_max_m = -5.0;
        config.mortar.launch_speed = 0.0;
        config.timer_secs = f64::NAN;
        config.static_scenario.distance_min_factor = f64::NAN;

        let config = config.sanitized();
        let defaults = MissionConfig::default();
        assert_eq!(config.mortar.range_max_m, defaults.mortar.range_max_m);
        assert_eq!(config.mortar.launch_speed, defaults.mortar.launch_speed);
        assert_eq!(config.timer_secs, defaults.timer_secs);
        assert_eq!(
            config.static_scenario.distance_min_factor,
            defaults.static_scenario.distance_min_factor
        );

        let mut infinite = MissionConfig::default();
        infinite.mortar.range_max_m = f64::INFINITY;
        assert_eq!(infinite.sanitized().mortar.range_max_m, defaults.mortar.range_max_m);
    }

    #[test]
    fn test_point_range_usability() {
        assert!(PointRange { min: 5, max: 15 }.is_usable());
        assert!(PointRange { min: 7, max: 7 }.is_usable());
        assert!(!PointRange { min: 0, max: 0 }.is_usable());
        assert!(!PointRange { min: 10, max: 5 }.is_usable());
    }

    #[test]
    fn test_ammo_kind_effects() {
        assert_eq!(AmmoKind::Standard.blast_radius(), 4.0);
        assert_eq!(AmmoKind::Heavy.direct_damage(), 120.0);
        assert_eq!(AmmoKind::Marking.direct_damage(), 0.0);
        assert_eq!(AmmoKind::Marking.slow_effect(), Some((0.3, 7.0)));
        assert_eq!(AmmoKind::Standard.slow_effect(), None);
    }

    #[test]
    fn test_enemy_template_defaults_when_omitted() {
        let config =
            MissionConfig::from_json_str(r#"{"enemy": {"patrol_speed_mps": 2.5}}"#).unwrap();
        assert_eq!(config.enemy.unit_template, "soldier");
        assert_eq!(config.enemy.patrol_speed_mps, 2.5);
    }
}
