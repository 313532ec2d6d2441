//! Scenario geometry and the timeline wave schedule.
//!
//! Placement rules shared by the static director and the timeline spawner:
//! spawn distance from weapon range, left/center/right angle cycling, escort
//! rings, prop scatter and prop point values.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use mortar_core::config::{PointRange, StaticScenarioSettings};
use mortar_core::constants::*;
use mortar_core::types::{bearing_direction, Position};

use crate::systems::wave_spawner::{Lane, WaveEntry, WaveGroup, WaveSchedule};

/// Spawn distance for a fraction of max range, kept inside
/// [`MIN_SPAWN_DISTANCE`, 0.98 × range_max].
pub fn spawn_distance(range_max_m: f64, factor: f64) -> f64 {
    let hi = range_max_m * MAX_SPAWN_RANGE_FRACTION;
    let lo = MIN_SPAWN_DISTANCE.min(hi);
    (range_max_m * factor).clamp(lo, hi)
}

/// Left, center, right offset from the forward axis, cycling by phase index.
pub fn phase_angle_offset(index: u32, angle_spread_deg: f64) -> f64 {
    match index % 3 {
        0 => -angle_spread_deg,
        1 => 0.0,
        _ => angle_spread_deg,
    }
}

/// Ground point at `distance` along `bearing_deg` from `origin`.
pub fn point_at(origin: Position, bearing_deg: f64, distance: f64) -> Position {
    Position::from(origin.on_ground().as_dvec3() + bearing_direction(bearing_deg) * distance)
}

/// Where objective `index` (0-based) of the static sequence goes.
///
/// Distance interpolates from the min to the max factor across the sequence.
pub fn objective_placement(
    index: u32,
    settings: &StaticScenarioSettings,
    range_max_m: f64,
    origin: Position,
    forward_bearing_deg: f64,
) -> Position {
    let t = if settings.objective_count > 1 {
        f64::from(index) / f64::from(settings.objective_count - 1)
    } else {
        0.0
    };
    let factor = settings.distance_min_factor
        + (settings.distance_max_factor - settings.distance_min_factor) * t;
    let distance = spawn_distance(range_max_m, factor);
    let bearing = forward_bearing_deg + phase_angle_offset(index, settings.angle_spread_deg);
    point_at(origin, bearing, distance)
}

/// The final base sits just beyond the last objective, on the lane its phase
/// index selects.
pub fn final_base_placement(
    settings: &StaticScenarioSettings,
    range_max_m: f64,
    origin: Position,
    forward_bearing_deg: f64,
) -> Position {
    let factor = (settings.distance_max_factor + FINAL_BASE_EXTRA_FRACTION)
        .clamp(0.1, MAX_SPAWN_RANGE_FRACTION);
    let distance = spawn_distance(range_max_m, factor);
    let offset = phase_angle_offset(settings.objective_count, settings.angle_spread_deg);
    point_at(origin, forward_bearing_deg + offset, distance)
}

/// Escort posts fanned around the final base.
pub fn escort_positions(base: Position, forward_bearing_deg: f64) -> Vec<Position> {
    (0..FINAL_BASE_ESCORTS)
        .map(|k| {
            let offset = f64::from(k) * ESCORT_SPREAD_DEG - ESCORT_SPREAD_DEG / 2.0;
            point_at(base, forward_bearing_deg + offset, ESCORT_OFFSET_M)
        })
        .collect()
}

/// Random ground point in the annulus [0.5 r, r] around `center`.
pub fn scatter_point(center: Position, radius: f64, rng: &mut ChaCha8Rng) -> Position {
    let bearing: f64 = rng.gen_range(0.0..360.0);
    let distance = radius * rng.gen_range(PROP_INNER_RADIUS_FRACTION..=1.0);
    point_at(center, bearing, distance)
}

/// Point value for a prop: its template's range if configured, else the
/// global range, else the flat value.
pub fn prop_points(template: &str, settings: &StaticScenarioSettings, rng: &mut ChaCha8Rng) -> u32 {
    let draw = |range: &PointRange, rng: &mut ChaCha8Rng| rng.gen_range(range.min..=range.max);
    match settings.prop_point_ranges.get(template) {
        Some(range) if range.is_usable() => draw(range, rng),
        _ if settings.prop_points.is_usable() => draw(&settings.prop_points, rng),
        _ => settings.points_per_prop,
    }
}

/// Spawn point of squad member `member` of `count` on a lane.
///
/// Members stand abreast, `SQUAD_SPACING_M` apart, perpendicular to the lane.
pub fn lane_position(
    lane: Lane,
    member: u32,
    count: u32,
    range_max_m: f64,
    origin: Position,
    forward_bearing_deg: f64,
) -> Position {
    let bearing = forward_bearing_deg + lane.angle_offset_deg();
    let head = point_at(origin, bearing, range_max_m * LANE_RANGE_FRACTION);
    let lateral = (f64::from(member) - f64::from(count.saturating_sub(1)) / 2.0) * SQUAD_SPACING_M;
    point_at(head, bearing + 90.0, lateral)
}

/// Default timeline: alternating lanes, squads growing, one pace step.
pub fn build_timeline() -> WaveSchedule {
    WaveSchedule {
        waves: vec![
            // t=0: a static target on the left lane
            WaveEntry::new(0.0, "Wave 1", vec![WaveGroup::StaticTarget { lane: Lane::Left }]),
            // t=30s: first patrol
            WaveEntry::new(
                30.0,
                "Wave 2",
                vec![WaveGroup::Squad {
                    lane: Lane::Left,
                    count: 2,
                }],
            ),
            // t=90s: right lane opens
            WaveEntry::new(
                90.0,
                "Wave 3",
                vec![
                    WaveGroup::StaticTarget { lane: Lane::Right },
                    WaveGroup::Squad {
                        lane: Lane::Right,
                        count: 2,
                    },
                ],
            ),
            // t=150s: both lanes
            WaveEntry::new(
                150.0,
                "Wave 4",
                vec![
                    WaveGroup::Squad {
                        lane: Lane::Left,
                        count: 2,
                    },
                    WaveGroup::Squad {
                        lane: Lane::Right,
                        count: 1,
                    },
                ],
            ),
            // t=210s: everything walks 10% faster from here on
            WaveEntry::new(
                210.0,
                "Wave 5",
                vec![
                    WaveGroup::PaceIncrease { factor: 1.1 },
                    WaveGroup::Squad {
                        lane: Lane::Left,
                        count: 2,
                    },
                ],
            ),
            // t=300s: last push
            WaveEntry::new(
                300.0,
                "Wave 6",
                vec![
                    WaveGroup::StaticTarget { lane: Lane::Left },
                    WaveGroup::Squad {
                        lane: Lane::Left,
                        count: 1,
                    },
                ],
            ),
        ],
        pace: 1.0,
    }
}
