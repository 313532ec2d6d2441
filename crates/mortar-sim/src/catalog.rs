//! Asset catalog: named templates for everything the scenario can spawn.
//!
//! Scenario content refers to templates by name. A name the catalog does not
//! know is skipped with a warning rather than aborting the mission.

use std::collections::BTreeMap;

use tracing::warn;

use mortar_core::components::HitSphere;
use mortar_core::enums::EntityKind;
use mortar_core::types::Position;

/// Spawnable entity template.
#[derive(Debug, Clone)]
pub struct EntityTemplate {
    pub kind: EntityKind,
    pub max_hp: f64,
    pub hit_spheres: Vec<HitSphere>,
    /// Solid colliders stop rounds in flight.
    pub solid: bool,
    /// Non-solid proximity volume that sets rounds off on overlap.
    pub trigger_radius: Option<f64>,
    /// Unmodified ground speed for mobile templates (m/s).
    pub base_speed: f64,
    /// Points awarded on destruction unless the spawner overrides them.
    pub points: u32,
}

#[derive(Debug, Clone)]
pub struct AssetCatalog {
    templates: BTreeMap<String, EntityTemplate>,
}

fn sphere(height: f64, radius: f64) -> HitSphere {
    HitSphere {
        offset: Position::new(0.0, height, 0.0),
        radius,
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.insert(
            "bunker",
            EntityTemplate {
                kind: EntityKind::Objective,
                max_hp: 100.0,
                hit_spheres: vec![sphere(1.0, 2.0)],
                solid: true,
                trigger_radius: None,
                base_speed: 0.0,
                points: 50,
            },
        );
        catalog.insert(
            "tank",
            EntityTemplate {
                kind: EntityKind::MobileUnit,
                max_hp: 50.0,
                // Hull and turret.
                hit_spheres: vec![sphere(0.8, 1.6), sphere(1.9, 0.9)],
                solid: true,
                trigger_radius: None,
                base_speed: 0.0,
                points: 25,
            },
        );
        catalog.insert(
            "soldier",
            EntityTemplate {
                kind: EntityKind::MobileUnit,
                max_hp: 50.0,
                hit_spheres: vec![sphere(0.9, 0.5)],
                solid: false,
                trigger_radius: Some(0.8),
                base_speed: 1.7,
                points: 25,
            },
        );
        for (name, hp, radius) in [("crate", 20.0, 0.6), ("barrel", 10.0, 0.5), ("sandbags", 40.0, 1.0)] {
            catalog.insert(
                name,
                EntityTemplate {
                    kind: EntityKind::Prop,
                    max_hp: hp,
                    hit_spheres: vec![sphere(radius * 0.5, radius)],
                    solid: true,
                    trigger_radius: None,
                    base_speed: 0.0,
                    points: 10,
                },
            );
        }
        catalog
    }
}

impl AssetCatalog {
    pub fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, template: EntityTemplate) {
        self.templates.insert(name.into(), template);
    }

    pub fn get(&self, name: &str) -> Option<&EntityTemplate> {
        self.templates.get(name)
    }

    /// Look up a template, warning when the name is unknown.
    pub fn resolve(&self, name: &str) -> Option<&EntityTemplate> {
        let template = self.templates.get(name);
        if template.is_none() {
            warn!(template = name, "unknown asset template, skipping spawn");
        }
        template
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}
