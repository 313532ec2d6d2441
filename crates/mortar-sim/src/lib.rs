//! Engagement-resolution engine for the mortar simulation.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the host.

pub mod ballistics;
pub mod catalog;
pub mod engagement;
pub mod engine;
pub mod registry;
pub mod scenario;
pub mod scoring;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use mortar_core as core;
pub use mortar_quiz as quiz;
