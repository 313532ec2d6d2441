//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` plus the engine state they
//! need. Tick-to-tick state lives in components or on the engine.

pub mod cleanup;
pub mod damage;
pub mod detonation;
pub mod director;
pub mod fire_control;
pub mod mission_clock;
pub mod movement;
pub mod projectile;
pub mod snapshot;
pub mod status_effects;
pub mod wave_spawner;
