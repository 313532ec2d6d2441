//! Simulation engine, the session root of a mortar engagement.
//!
//! `SimulationEngine` owns the hecs ECS world and every piece of run state,
//! processes player commands, runs all systems in a fixed order, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use mortar_core::commands::PlayerCommand;
use mortar_core::config::MissionConfig;
use mortar_core::constants::MAX_TIME_SCALE;
use mortar_core::enums::*;
use mortar_core::events::SimEvent;
use mortar_core::state::{GameStateSnapshot, ScenarioView};
use mortar_core::types::{Position, SimTime};
use mortar_quiz::{QuizDeck, QuizQuestion};

use crate::catalog::AssetCatalog;
use crate::engagement::FireControlState;
use crate::registry::{AmmoInventory, MobileRegistry};
use crate::scenario;
use crate::scoring::{self, ScoreState};
use crate::systems;
use crate::systems::director::{DirectorContext, DirectorSignal, ScenarioDirector};
use crate::systems::fire_control::FireRequest;
use crate::systems::mission_clock::MissionClock;
use crate::systems::wave_spawner::WaveSchedule;
use crate::world_setup;

/// Compass bearing of the emplacement's forward axis.
const FORWARD_BEARING_DEG: f64 = 0.0;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub mission: MissionConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            mission: MissionConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    outcome: Option<MissionOutcome>,
    time_scale: f64,
    rng: ChaCha8Rng,
    mission: MissionConfig,
    catalog: AssetCatalog,
    quiz: QuizDeck,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,

    fire_control: FireControlState,
    inventory: AmmoInventory,
    score: ScoreState,
    registry: MobileRegistry,
    director: ScenarioDirector,
    wave_schedule: WaveSchedule,
    clock: MissionClock,
    emplacement: Position,
    scenario_enabled: bool,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let mission = config.mission.sanitized();
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            outcome: None,
            time_scale: clamp_time_scale(config.time_scale).unwrap_or(1.0),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            catalog: AssetCatalog::default(),
            quiz: QuizDeck::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            fire_control: FireControlState::new(&mission.mortar, FORWARD_BEARING_DEG),
            inventory: AmmoInventory::from_loadout(&mission.starting_ammo),
            score: ScoreState::default(),
            registry: MobileRegistry::default(),
            director: ScenarioDirector::idle(),
            wave_schedule: WaveSchedule::default(),
            clock: MissionClock::new(&mission),
            emplacement: Position::default(),
            scenario_enabled: true,
            mission,
        }
    }

    /// Use this quiz deck for `NextQuestion` / `SubmitAnswer`.
    pub fn with_quiz(mut self, quiz: QuizDeck) -> Self {
        self.quiz = quiz;
        self
    }

    /// Replace the default asset catalog.
    pub fn with_catalog(mut self, catalog: AssetCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        // A zero time scale holds the clock like a pause.
        if self.phase == GamePhase::Active && self.time_scale > 0.0 {
            let dt = self.time.dt() * self.time_scale;
            self.run_systems(dt);
            self.time.advance_by(dt);
        }

        let mobile_units_alive = self.registry.alive_count(&self.world) as u32;
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.outcome,
            &self.clock,
            &self.mission,
            &self.fire_control,
            &self.inventory,
            &self.score,
            self.scenario_view(),
            mobile_units_alive,
            self.emplacement,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<MissionOutcome> {
        self.outcome
    }

    /// True while the mission is running and undecided.
    pub fn is_run_active(&self) -> bool {
        self.phase == GamePhase::Active && self.outcome.is_none()
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn mission(&self) -> &MissionConfig {
        &self.mission
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn inventory(&self) -> &AmmoInventory {
        &self.inventory
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.quiz.current()
    }

    /// The most recently fired round while it is still in flight.
    pub fn outstanding_projectile(&self) -> Option<Entity> {
        self.fire_control.last_fired
    }

    /// Report a contact from a host-side physics pass. Takes effect in the
    /// next tick's detonation step; only the first contact per round counts.
    pub fn report_contact(&mut self, round: Entity, kind: ContactKind, position: Position) -> bool {
        systems::projectile::note_contact(&mut self.world, round, kind, position)
    }

    /// Get a mutable reference to the ECS world (for tests that script damage).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Start missions without any scripted spawns (for tests that place their own targets).
    #[cfg(test)]
    pub fn set_scenario_enabled(&mut self, enabled: bool) {
        self.scenario_enabled = enabled;
    }

    #[cfg(test)]
    pub fn director(&self) -> &ScenarioDirector {
        &self.director
    }

    /// Spawn a catalog entity at a fixed position (for tests).
    #[cfg(test)]
    pub fn spawn_test_target(
        &mut self,
        template: &str,
        position: Position,
        overrides: world_setup::SpawnOverrides,
    ) -> Option<Entity> {
        let entity = world_setup::spawn_from_template(
            &mut self.world,
            &self.catalog,
            template,
            position,
            overrides,
        )?;
        if self
            .world
            .get::<&mortar_core::components::MobileUnit>(entity)
            .is_ok()
        {
            self.registry.register(entity);
        }
        Some(entity)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMission => {
                if self.phase == GamePhase::MainMenu {
                    self.start_mission();
                }
            }
            PlayerCommand::ReturnToMenu => {
                if self.phase == GamePhase::MissionComplete {
                    self.reset_world();
                    self.phase = GamePhase::MainMenu;
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => match clamp_time_scale(scale) {
                Some(scale) => self.time_scale = scale,
                None => warn!(scale, "time scale ignored"),
            },
            PlayerCommand::AdjustAim {
                bearing_delta_deg,
                range_steps,
                fine,
            } => {
                if self.is_run_active() {
                    self.fire_control
                        .adjust(bearing_delta_deg, range_steps, fine, &self.mission.mortar);
                }
            }
            PlayerCommand::SetAim {
                bearing_deg,
                range_m,
            } => {
                if self.is_run_active() {
                    self.fire_control
                        .set(bearing_deg, range_m, &self.mission.mortar);
                }
            }
            PlayerCommand::SetElevationSolution { solution } => {
                self.fire_control.elevation = solution;
            }
            PlayerCommand::Fire { ammo } => {
                let request = FireRequest {
                    ammo,
                    origin: self.emplacement,
                    now: self.time.elapsed_secs,
                    run_active: self.is_run_active(),
                };
                let result = systems::fire_control::fire(
                    &mut self.world,
                    &mut self.fire_control,
                    &mut self.inventory,
                    &mut self.score,
                    &self.mission,
                    &mut self.rng,
                    request,
                    &mut self.events,
                );
                if let Err(reason) = result {
                    debug!(?ammo, ?reason, tick = self.time.tick, "fire command dropped");
                }
            }
            PlayerCommand::RequestSpotter => {
                if self.is_run_active() {
                    systems::fire_control::request_spotter(
                        &mut self.fire_control,
                        &self.mission.mortar,
                        &mut self.events,
                    );
                }
            }
            PlayerCommand::SelectNearestTarget => {
                self.fire_control.selected_target =
                    systems::fire_control::select_nearest(&self.world, self.emplacement);
            }
            PlayerCommand::CycleTarget { direction } => {
                self.fire_control.selected_target = systems::fire_control::cycle_target(
                    &self.world,
                    self.fire_control.selected_target,
                    direction,
                );
            }
            PlayerCommand::ClearTarget => {
                self.fire_control.selected_target = None;
            }
            PlayerCommand::NextQuestion => match self.quiz.next_question() {
                Ok(question) => debug!(prompt = %question.prompt, "next question"),
                Err(err) => warn!(error = %err, "no question available"),
            },
            PlayerCommand::SubmitAnswer { choice } => {
                if !self.is_run_active() {
                    debug!(%choice, "answer ignored outside an active run");
                    return;
                }
                match self.quiz.submit_answer(choice) {
                    Ok(correct) => self.apply_answer(correct),
                    Err(err) => warn!(error = %err, %choice, "answer rejected"),
                }
            }
        }
    }

    fn reset_world(&mut self) {
        self.world.clear();
        self.despawn_buffer.clear();
        self.registry.clear();
        self.director = ScenarioDirector::idle();
        self.wave_schedule = WaveSchedule::default();
    }

    fn start_mission(&mut self) {
        self.reset_world();
        let emplacement = world_setup::setup_mission(&mut self.world, FORWARD_BEARING_DEG);
        self.emplacement = self
            .world
            .get::<&Position>(emplacement)
            .map(|p| *p)
            .unwrap_or_default();

        self.fire_control = FireControlState::new(&self.mission.mortar, FORWARD_BEARING_DEG);
        self.inventory = AmmoInventory::from_loadout(&self.mission.starting_ammo);
        self.score = ScoreState::default();
        self.clock = MissionClock::new(&self.mission);
        self.outcome = None;
        self.time = SimTime::default();

        if self.scenario_enabled {
            match self.mission.scenario_mode {
                ScenarioMode::Static => {
                    self.director =
                        ScenarioDirector::new(self.mission.static_scenario.objective_count);
                }
                ScenarioMode::Timeline => {
                    self.wave_schedule = scenario::build_timeline();
                }
            }
        }

        self.phase = GamePhase::Active;
        info!(
            mission = %self.mission.mission_id,
            mode = ?self.mission.scenario_mode,
            timer = self.mission.timer_secs,
            "mission started"
        );
    }

    /// Correct answers feed the streak economy; wrong ones also speed up
    /// every registered mobile unit.
    fn apply_answer(&mut self, correct: bool) {
        self.events.push(SimEvent::AnswerEvaluated { correct });
        scoring::apply_answer(
            correct,
            &mut self.score,
            &mut self.inventory,
            &self.mission.streak_rewards,
            &mut self.events,
        );
        info!(correct, streak = self.score.streak, "answer evaluated");
        if !correct {
            systems::status_effects::apply_global_speed_buff(
                &mut self.world,
                &mut self.registry,
                self.mission.enemy.speed_buff_on_wrong_answer,
                self.mission.enemy.speed_buff_duration_secs,
                self.time.elapsed_secs,
                &mut self.events,
            );
        }
    }

    /// Terminal: the run becomes inactive and every pending wait is dropped.
    fn end_run(&mut self, outcome: MissionOutcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        self.phase = GamePhase::MissionComplete;
        self.director.cancel();
        info!(?outcome, score = self.score.total, "mission ended");
        self.events.push(SimEvent::MissionEnded { outcome });
    }

    fn scenario_view(&self) -> ScenarioView {
        match self.mission.scenario_mode {
            ScenarioMode::Static => ScenarioView {
                mode: ScenarioMode::Static,
                label: self.director.label.clone(),
                objectives_cleared: self.director.objectives_cleared,
                objectives_total: self.director.objective_count,
            },
            ScenarioMode::Timeline => ScenarioView {
                mode: ScenarioMode::Timeline,
                label: self
                    .wave_schedule
                    .current_label()
                    .unwrap_or_default()
                    .to_string(),
                objectives_cleared: 0,
                objectives_total: 0,
            },
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let now = self.time.elapsed_secs;

        // 1. Status-effect expiry
        systems::status_effects::run(&mut self.world, now);
        // 2. Fire control cooldowns
        systems::fire_control::run(&self.world, &mut self.fire_control, dt);
        // 3. Scenario director or timeline
        let run_active = self.is_run_active();
        match self.mission.scenario_mode {
            ScenarioMode::Static => {
                let mut ctx = DirectorContext {
                    catalog: &self.catalog,
                    mission: &self.mission,
                    rng: &mut self.rng,
                    registry: &mut self.registry,
                    emplacement: self.emplacement,
                    forward_bearing_deg: FORWARD_BEARING_DEG,
                };
                let signal = systems::director::run(
                    &mut self.director,
                    &mut self.world,
                    &mut ctx,
                    dt,
                    run_active,
                    &mut self.events,
                );
                if signal == DirectorSignal::FinalBaseDestroyed {
                    self.end_run(MissionOutcome::Won);
                }
            }
            ScenarioMode::Timeline => {
                systems::wave_spawner::run(
                    &mut self.world,
                    &self.catalog,
                    &mut self.wave_schedule,
                    &self.mission,
                    &mut self.registry,
                    self.emplacement,
                    FORWARD_BEARING_DEG,
                    now,
                    run_active,
                    &mut self.events,
                );
            }
        }
        // 4. Movement and base breach
        let breaches =
            systems::movement::run(&mut self.world, &mut self.registry, self.emplacement, dt);
        if breaches > 0 {
            let lost = systems::mission_clock::damage_base(&mut self.clock, breaches);
            self.events.push(SimEvent::BaseBreached {
                remaining_hp: self.clock.base_hp,
            });
            if let Some(outcome) = lost {
                self.end_run(outcome);
            }
        }

        if self.is_run_active() {
            // 5. Projectile flight
            systems::projectile::run(
                &mut self.world,
                now + dt,
                dt,
                self.mission.mortar.max_lifetime_secs,
            );
            // 6. Detonation, damage, status and scoring
            systems::detonation::run(
                &mut self.world,
                &mut self.registry,
                &mut self.score,
                &mut self.fire_control,
                now,
                &mut self.events,
                &mut self.despawn_buffer,
            );
            // 7. Mission clock
            if let Some(outcome) = systems::mission_clock::run(&mut self.clock, dt) {
                self.end_run(outcome);
            }
        }
        // 8. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}

/// Finite scales are clamped to [0, MAX_TIME_SCALE]; anything else is rejected.
fn clamp_time_scale(scale: f64) -> Option<f64> {
    scale.is_finite().then(|| scale.clamp(0.0, MAX_TIME_SCALE))
}
