//! Registries shared by several systems: the live mobile-unit list and the
//! ammunition inventory.
//!
//! Stored on `SimulationEngine`, NOT as ECS entities.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use mortar_core::components::Health;
use mortar_core::config::AmmoLoadout;
use mortar_core::enums::AmmoKind;
use mortar_core::state::AmmoView;

/// Weak handles to every registered mobile unit.
///
/// Entities may be despawned behind the registry's back; each query prunes
/// handles that no longer resolve or whose unit has been destroyed.
#[derive(Debug, Clone, Default)]
pub struct MobileRegistry {
    units: Vec<Entity>,
}

impl MobileRegistry {
    pub fn register(&mut self, entity: Entity) {
        if !self.units.contains(&entity) {
            self.units.push(entity);
        }
    }

    pub fn unregister(&mut self, entity: Entity) {
        self.units.retain(|&e| e != entity);
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }

    /// Drop handles to despawned or destroyed units.
    pub fn prune(&mut self, world: &World) {
        self.units.retain(|&e| match world.get::<&Health>(e) {
            Ok(health) => !health.destroyed,
            Err(_) => world.contains(e),
        });
    }

    /// Live units, in registration order.
    pub fn alive(&mut self, world: &World) -> Vec<Entity> {
        self.prune(world);
        self.units.clone()
    }

    pub fn alive_count(&mut self, world: &World) -> usize {
        self.prune(world);
        self.units.len()
    }
}

/// Round counts per ammunition kind.
#[derive(Debug, Clone, Default)]
pub struct AmmoInventory {
    counts: BTreeMap<AmmoKind, u32>,
}

impl AmmoInventory {
    pub fn from_loadout(loadout: &AmmoLoadout) -> Self {
        let mut counts = BTreeMap::new();
        counts.insert(AmmoKind::Standard, loadout.standard);
        counts.insert(AmmoKind::Heavy, loadout.heavy);
        counts.insert(AmmoKind::Marking, loadout.marking);
        Self { counts }
    }

    pub fn count(&self, kind: AmmoKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Remove one round. Returns false, leaving the count untouched, when empty.
    pub fn try_consume(&mut self, kind: AmmoKind) -> bool {
        match self.counts.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Add rounds and return the new count.
    pub fn add(&mut self, kind: AmmoKind, amount: u32) -> u32 {
        let count = self.counts.entry(kind).or_insert(0);
        *count = count.saturating_add(amount);
        *count
    }

    pub fn view(&self) -> AmmoView {
        AmmoView {
            standard: self.count(AmmoKind::Standard),
            heavy: self.count(AmmoKind::Heavy),
            marking: self.count(AmmoKind::Marking),
        }
    }
}
