//! Damageable capability shared by objectives, mobile units and props.

use mortar_core::components::Health;

/// Apply direct damage. Returns true only on the call that destroys the entity.
///
/// Negative or non-finite amounts are ignored. HP never leaves [0, max_hp],
/// and an already destroyed entity takes no further damage.
pub fn apply_damage(health: &mut Health, amount: f64) -> bool {
    if health.destroyed || !amount.is_finite() || amount <= 0.0 {
        return false;
    }
    health.current_hp = (health.current_hp - amount).clamp(0.0, health.max_hp);
    if health.current_hp <= 0.0 {
        health.destroyed = true;
        return true;
    }
    false
}
