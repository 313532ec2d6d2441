//! Ballistics solver for the mortar.
//!
//! Pure functions: flight-time model, launch angle for the high or low root
//! of the drag-free range equation and its time of flight, impact point with
//! disk dispersion, launch velocity, kinematic arc interpolation and advisory
//! lead.
//!
//! None of these panic. Degenerate inputs (zero launch speed, zero max range,
//! out-of-reach targets) are clamped at the boundary.

use glam::{DVec2, DVec3};
use rand::Rng;

use mortar_core::constants::{KINEMATIC_ARC_HEIGHT, MIN_LAUNCH_SPEED, MIN_RANGE_DENOMINATOR};
use mortar_core::enums::ElevationSolution;
use mortar_core::types::{bearing_direction, Position};

/// Flight time by linear interpolation over the fraction of max range.
///
/// The fraction is clamped to [0, 1], so requests past max range take `t_max`.
pub fn compute_flight_time(desired_range_m: f64, range_max_m: f64, t_min: f64, t_max: f64) -> f64 {
    let fraction = (desired_range_m / range_max_m.max(MIN_RANGE_DENOMINATOR)).clamp(0.0, 1.0);
    t_min + (t_max - t_min) * fraction
}

/// Launch elevation (degrees) that lands a drag-free round at `desired_range_m`.
///
/// `s = R·g / v²` is clamped to [0, 1]: targets beyond reach converge on the
/// 45° maximum-range solution. The high root is the complement of the low root.
pub fn compute_launch_angle(
    desired_range_m: f64,
    launch_speed: f64,
    gravity: f64,
    solution: ElevationSolution,
) -> f64 {
    let speed = if launch_speed > 0.0 {
        launch_speed
    } else {
        MIN_LAUNCH_SPEED
    };
    let s = (desired_range_m * gravity / (speed * speed)).clamp(0.0, 1.0);
    let theta_low = 0.5 * s.asin().to_degrees();
    match solution {
        ElevationSolution::Low => theta_low,
        ElevationSolution::High => 90.0 - theta_low,
    }
}

/// Drag-free time of flight on the launch angle that reaches `desired_range_m`.
pub fn ballistic_flight_time(
    desired_range_m: f64,
    launch_speed: f64,
    gravity: f64,
    solution: ElevationSolution,
) -> f64 {
    let speed = if launch_speed > 0.0 {
        launch_speed
    } else {
        MIN_LAUNCH_SPEED
    };
    let angle = compute_launch_angle(desired_range_m, speed, gravity, solution);
    2.0 * speed * angle.to_radians().sin() / gravity.max(f64::EPSILON)
}

/// Aimed impact point: `range_m` along `bearing_deg` from `origin`, offset by a
/// point drawn uniformly from a ground-plane disk of radius `dispersion_m`.
///
/// With zero dispersion no random draw is made and the ideal point is exact.
pub fn compute_impact_point<R: Rng>(
    origin: Position,
    bearing_deg: f64,
    range_m: f64,
    dispersion_m: f64,
    rng: &mut R,
) -> Position {
    let ideal = origin.as_dvec3() + bearing_direction(bearing_deg) * range_m;
    if dispersion_m <= 0.0 {
        return Position::from(ideal);
    }
    let offset = sample_disk(rng, dispersion_m);
    Position::from(ideal + DVec3::new(offset.x, 0.0, offset.y))
}

/// Uniform sample over a disk of the given radius.
///
/// Uses `r = R·sqrt(u)` so density is constant over area rather than
/// bunching at the center.
pub fn sample_disk<R: Rng>(rng: &mut R, radius: f64) -> DVec2 {
    let u: f64 = rng.gen();
    let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let r = radius * u.sqrt();
    DVec2::new(r * angle.sin(), r * angle.cos())
}

/// Initial velocity for a round fired along `bearing_deg` at `elevation_deg`.
pub fn launch_velocity(bearing_deg: f64, elevation_deg: f64, launch_speed: f64) -> DVec3 {
    let elev = elevation_deg.to_radians();
    let horizontal = bearing_direction(bearing_deg) * (launch_speed * elev.cos());
    horizontal + DVec3::new(0.0, launch_speed * elev.sin(), 0.0)
}

/// Position on the kinematic arc at `fraction` ∈ [0, 1] of the flight.
pub fn kinematic_arc_position(origin: Position, impact: Position, fraction: f64) -> Position {
    let t = fraction.clamp(0.0, 1.0);
    let mut pos = origin.as_dvec3().lerp(impact.as_dvec3(), t);
    pos.y += (t * std::f64::consts::PI).sin() * KINEMATIC_ARC_HEIGHT;
    Position::from(pos)
}

/// Advisory range lead for a moving target (meters).
///
/// The target's ground velocity projected onto the radial direction from the
/// mortar, times the current flight time. Positive means the target is opening.
pub fn compute_lead(target_ground_velocity: DVec2, radial: DVec2, flight_time_secs: f64) -> f64 {
    let radial_unit = radial.normalize_or_zero();
    target_ground_velocity.dot(radial_unit) * flight_time_secs
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortar_core::constants::GRAVITY;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn flight_time_interpolates_and_clamps() {
        assert!((compute_flight_time(0.0, 40.0, 1.2, 2.4) - 1.2).abs() < 1e-12);
        assert!((compute_flight_time(20.0, 40.0, 1.2, 2.4) - 1.8).abs() < 1e-12);
        assert!((compute_flight_time(400.0, 40.0, 1.2, 2.4) - 2.4).abs() < 1e-12);
        assert!((compute_flight_time(-5.0, 40.0, 1.2, 2.4) - 1.2).abs() < 1e-12);
    }

    #[test]
    fn flight_time_survives_zero_max_range() {
        let t = compute_flight_time(10.0, 0.0, 1.0, 2.0);
        assert!(t.is_finite());
        assert!((t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_range_gives_flat_and_vertical() {
        let low = compute_launch_angle(0.0, 45.0, GRAVITY, ElevationSolution::Low);
        let high = compute_launch_angle(0.0, 45.0, GRAVITY, ElevationSolution::High);
        assert!(low.abs() < 1e-12);
        assert!((high - 90.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_reach_converges_to_45() {
        // v²/g ≈ 206 m for 45 m/s; ask for far beyond it.
        let low = compute_launch_angle(1000.0, 45.0, GRAVITY, ElevationSolution::Low);
        let high = compute_launch_angle(1000.0, 45.0, GRAVITY, ElevationSolution::High);
        assert!((low - 45.0).abs() < 1e-9);
        assert!((high - 45.0).abs() < 1e-9);
    }

    #[test]
    fn zero_launch_speed_does_not_divide_by_zero() {
        let angle = compute_launch_angle(10.0, 0.0, GRAVITY, ElevationSolution::High);
        assert!(angle.is_finite());
        assert!((angle - 45.0).abs() < 1e-9);
    }

    #[test]
    fn ballistic_time_follows_vertical_launch_speed() {
        let high = ballistic_flight_time(0.0, 45.0, GRAVITY, ElevationSolution::High);
        assert!((high - 2.0 * 45.0 / GRAVITY).abs() < 1e-9);
        assert!(ballistic_flight_time(0.0, 45.0, GRAVITY, ElevationSolution::Low).abs() < 1e-12);

        let angle = compute_launch_angle(20.0, 45.0, GRAVITY, ElevationSolution::High);
        let v = launch_velocity(0.0, angle, 45.0);
        let t = ballistic_flight_time(20.0, 45.0, GRAVITY, ElevationSolution::High);
        assert!((t - 2.0 * v.y / GRAVITY).abs() < 1e-9);
        // Horizontal travel over that time lands on the requested range.
        assert!((v.z * t - 20.0).abs() < 1e-6);
    }

    #[test]
    fn zero_dispersion_is_exact() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let origin = Position::new(5.0, 0.0, -3.0);
        let impact = compute_impact_point(origin, 0.0, 20.0, 0.0, &mut rng);
        assert_eq!(impact, Position::new(5.0, 0.0, 17.0));

        let east = compute_impact_point(origin, 90.0, 10.0, 0.0, &mut rng);
        assert!((east.x - 15.0).abs() < 1e-12);
        assert!((east.z + 3.0).abs() < 1e-12);
    }

    #[test]
    fn launch_velocity_matches_angle() {
        let v = launch_velocity(0.0, 45.0, 10.0);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - v.z).abs() < 1e-12);
        assert!((v.length() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn arc_starts_and_ends_on_endpoints() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(0.0, 0.0, 30.0);
        assert_eq!(kinematic_arc_position(a, b, 0.0), a);
        let end = kinematic_arc_position(a, b, 1.0);
        assert!((end.z - 30.0).abs() < 1e-12);
        assert!(end.y.abs() < 1e-9);
        let mid = kinematic_arc_position(a, b, 0.5);
        assert!((mid.y - KINEMATIC_ARC_HEIGHT).abs() < 1e-12);
    }

    #[test]
    fn lead_is_radial_component_only() {
        // Target moving purely across the line of fire has no range lead.
        let lead = compute_lead(DVec2::new(2.0, 0.0), DVec2::new(0.0, 25.0), 2.0);
        assert!(lead.abs() < 1e-12);
        // Moving directly away at 1.5 m/s for 2 s.
        let lead = compute_lead(DVec2::new(0.0, 1.5), DVec2::new(0.0, 25.0), 2.0);
        assert!((lead - 3.0).abs() < 1e-12);
        // Coincident target: no direction, no lead.
        assert_eq!(compute_lead(DVec2::new(1.0, 1.0), DVec2::ZERO, 2.0), 0.0);
    }
}
