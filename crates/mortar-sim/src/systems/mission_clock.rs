//! Mission clock and base integrity.

use mortar_core::config::MissionConfig;
use mortar_core::enums::MissionOutcome;

#[derive(Debug, Clone, Default)]
pub struct MissionClock {
    pub time_remaining_secs: f64,
    pub base_hp: u32,
}

impl MissionClock {
    pub fn new(mission: &MissionConfig) -> Self {
        Self {
            time_remaining_secs: mission.timer_secs,
            base_hp: mission.base_hp,
        }
    }
}

/// Count the clock down. At zero the run is won if the base still stands.
pub fn run(clock: &mut MissionClock, dt: f64) -> Option<MissionOutcome> {
    if clock.time_remaining_secs <= 0.0 {
        return None;
    }
    clock.time_remaining_secs = (clock.time_remaining_secs - dt).max(0.0);
    if clock.time_remaining_secs > 0.0 {
        return None;
    }
    Some(if clock.base_hp > 0 {
        MissionOutcome::Won
    } else {
        MissionOutcome::Lost
    })
}

/// Take breaches off the base. Losing the last point loses the run.
pub fn damage_base(clock: &mut MissionClock, breaches: u32) -> Option<MissionOutcome> {
    if breaches == 0 {
        return None;
    }
    clock.base_hp = clock.base_hp.saturating_sub(breaches);
    (clock.base_hp == 0).then_some(MissionOutcome::Lost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortar_core::constants::DT;

    #[test]
    fn timeout_wins_with_base_standing() {
        let mut clock = MissionClock {
            time_remaining_secs: 2.0 * DT,
            base_hp: 1,
        };
        assert_eq!(run(&mut clock, DT), None);
        assert_eq!(run(&mut clock, DT), Some(MissionOutcome::Won));
        assert_eq!(run(&mut clock, DT), None, "timeout reported once");
    }

    #[test]
    fn last_breach_loses() {
        let mut clock = MissionClock {
            time_remaining_secs: 60.0,
            base_hp: 2,
        };
        assert_eq!(damage_base(&mut clock, 1), None);
        assert_eq!(damage_base(&mut clock, 1), Some(MissionOutcome::Lost));
        assert_eq!(clock.base_hp, 0);
    }
}
