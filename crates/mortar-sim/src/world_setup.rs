//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the firing position, catalog-driven targets and projectiles with
//! the appropriate component bundles.

use hecs::{Entity, EntityBuilder, World};

use mortar_core::components::*;
use mortar_core::enums::EntityKind;
use mortar_core::types::{bearing_direction, Position, Velocity};

use crate::catalog::AssetCatalog;

/// Per-spawn overrides of catalog template values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnOverrides {
    pub kind: Option<EntityKind>,
    pub max_hp: Option<f64>,
    pub points: Option<u32>,
    pub base_speed: Option<f64>,
    /// Compass heading for mobile units.
    pub heading_deg: f64,
}

/// Set up the initial mission world: the mortar emplacement at the origin.
pub fn setup_mission(world: &mut World, forward_bearing_deg: f64) -> Entity {
    world.spawn((
        FiringPosition {
            forward_bearing_deg,
        },
        Position::new(0.0, 0.0, 0.0),
    ))
}

/// Spawn a damageable entity from a catalog template.
///
/// Returns `None`, after a warning, when the template name is unknown.
pub fn spawn_from_template(
    world: &mut World,
    catalog: &AssetCatalog,
    template_name: &str,
    position: Position,
    overrides: SpawnOverrides,
) -> Option<Entity> {
    let template = catalog.resolve(template_name)?;
    let kind = overrides.kind.unwrap_or(template.kind);
    let max_hp = overrides.max_hp.unwrap_or(template.max_hp).max(1.0);

    let mut builder = EntityBuilder::new();
    builder.add(position.on_ground());
    builder.add(Target {
        kind,
        template: template_name.to_string(),
    });
    builder.add(Health {
        max_hp,
        current_hp: max_hp,
        destroyed: false,
    });
    builder.add(PointValue {
        points: overrides.points.unwrap_or(template.points),
    });
    builder.add(HitSpheres {
        spheres: template.hit_spheres.clone(),
        solid: template.solid,
    });
    if let Some(radius) = template.trigger_radius {
        builder.add(TriggerVolume { radius });
    }
    if kind == EntityKind::MobileUnit {
        let base_speed = overrides.base_speed.unwrap_or(template.base_speed).max(0.0);
        builder.add(MobileUnit {
            base_speed,
            heading_deg: overrides.heading_deg,
        });
        let v = bearing_direction(overrides.heading_deg) * base_speed;
        builder.add(Velocity::from(v));
        builder.add(SpeedModifiers::default());
    }
    Some(world.spawn(builder.build()))
}

/// Spawn a round in flight.
pub fn spawn_projectile(
    world: &mut World,
    projectile: Projectile,
    position: Position,
    velocity: Velocity,
) -> Entity {
    world.spawn((projectile, position, velocity))
}
