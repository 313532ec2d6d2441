//! mission-runner: headless driver for the mortar engagement simulation.
//!
//! Usage:
//!   mission-runner run [--config mission.json] [--quiz questions.csv] [--seed N] [--seconds N] [--json]
//!   mission-runner catalog

use std::path::{Path, PathBuf};
use std::process;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mortar_core::commands::PlayerCommand;
use mortar_core::config::MissionConfig;
use mortar_core::constants::TICK_RATE;
use mortar_core::enums::{AmmoKind, EntityKind, GamePhase};
use mortar_core::events::SimEvent;
use mortar_core::state::GameStateSnapshot;
use mortar_quiz::QuizDeck;
use mortar_sim::catalog::AssetCatalog;
use mortar_sim::{SimConfig, SimulationEngine};

/// Seconds between scripted quiz answers.
const ANSWER_INTERVAL_SECS: u64 = 12;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "catalog" => cmd_catalog(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "mission-runner: headless mortar engagement driver\n\
         \n\
         Commands:\n\
         \n\
         run       Play one mission with a scripted gunner\n\
         \n\
           --config <path>    Mission config JSON (defaults on any error)\n\
           --quiz <path>      Quiz questions CSV\n\
           --seed <N>         RNG seed (default: 42)\n\
           --seconds <N>      Stop after N simulated seconds (default: mission timer)\n\
           --json             Print the final snapshot as JSON\n\
         \n\
         catalog   List the built-in entity templates\n\
         \n\
         Examples:\n\
         \n\
           mission-runner run --seed 7 --seconds 120\n\
           mission-runner run --config missions/m3.json --quiz data/quiz.csv --json\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_or_exit<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    let raw = flag_value(args, flag)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            eprintln!("Invalid value for {flag}: {raw}");
            process::exit(1);
        }
    }
}

fn load_quiz(path: &Path) -> QuizDeck {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let deck = QuizDeck::from_csv(&text);
            info!(path = %path.display(), questions = deck.len(), "quiz loaded");
            deck
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "quiz unavailable, running without questions");
            QuizDeck::default()
        }
    }
}

fn cmd_catalog() {
    let catalog = AssetCatalog::default();
    for name in catalog.names() {
        if let Some(t) = catalog.get(name) {
            println!(
                "{name:<10} kind={:?} hp={} spheres={} solid={} speed={} points={}",
                t.kind,
                t.max_hp,
                t.hit_spheres.len(),
                t.solid,
                t.base_speed,
                t.points
            );
        }
    }
}

fn cmd_run(args: &[String]) {
    let mission = match flag_value(args, "--config") {
        Some(path) => MissionConfig::load_or_default(&PathBuf::from(path)),
        None => MissionConfig::default(),
    };
    let quiz = flag_value(args, "--quiz")
        .map(|path| load_quiz(&PathBuf::from(path)))
        .unwrap_or_default();
    let seed: u64 = parse_or_exit(args, "--seed").unwrap_or(42);
    let seconds: f64 = parse_or_exit(args, "--seconds").unwrap_or(mission.timer_secs);
    let json = args.iter().any(|a| a == "--json");

    let has_quiz = !quiz.is_empty();
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        mission,
        ..Default::default()
    })
    .with_quiz(quiz);

    engine.queue_command(PlayerCommand::StartMission);
    let max_ticks = (seconds.max(0.0) * f64::from(TICK_RATE)).ceil() as u64;
    let answer_every = ANSWER_INTERVAL_SECS * u64::from(TICK_RATE);

    let mut snapshot = engine.tick();
    log_events(&snapshot);
    for tick in 1..=max_ticks {
        if snapshot.phase != GamePhase::Active {
            break;
        }
        script_gunner(&mut engine, &snapshot);
        if has_quiz {
            match tick % answer_every {
                0 => engine.queue_command(PlayerCommand::NextQuestion),
                1 => script_answer(&mut engine, tick / answer_every),
                _ => {}
            }
        }
        snapshot = engine.tick();
        log_events(&snapshot);
    }

    info!(
        phase = ?snapshot.phase,
        outcome = ?snapshot.outcome,
        score = snapshot.score.total,
        rounds = snapshot.score.rounds_fired,
        destroyed = snapshot.score.entities_destroyed,
        "run finished"
    );
    if json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("Failed to serialize snapshot: {err}");
                process::exit(1);
            }
        }
    }
}

/// Lay the tube on the selected target and fire whenever the tube is ready.
fn script_gunner(engine: &mut SimulationEngine, snapshot: &GameStateSnapshot) {
    let aim = &snapshot.aim;
    let Some(target) = aim
        .selected_target
        .and_then(|id| snapshot.targets.iter().find(|t| t.entity_id == id))
    else {
        if !snapshot.targets.is_empty() {
            engine.queue_command(PlayerCommand::SelectNearestTarget);
        }
        return;
    };

    let range = aim.position.ground_distance_to(&target.position) + aim.lead_m.unwrap_or(0.0);
    engine.queue_command(PlayerCommand::SetAim {
        bearing_deg: aim.position.bearing_deg_to(&target.position),
        range_m: range,
    });

    if snapshot.projectile.is_some() || aim.reload_remaining_secs > 0.0 {
        return;
    }
    if aim.spotter_cooldown_secs <= 0.0 && target.kind != EntityKind::Prop {
        engine.queue_command(PlayerCommand::RequestSpotter);
    }
    let ammo = if target.kind == EntityKind::MobileUnit && snapshot.ammo.marking > 0 {
        AmmoKind::Marking
    } else if target.kind == EntityKind::FinalBase && snapshot.ammo.heavy > 0 {
        AmmoKind::Heavy
    } else {
        AmmoKind::Standard
    };
    engine.queue_command(PlayerCommand::Fire { ammo });
}

/// Answer the current question: mostly right, every fourth one wrong.
fn script_answer(engine: &mut SimulationEngine, round: u64) {
    let correct = engine
        .current_question()
        .map(|q| q.correct)
        .unwrap_or('A');
    let choice = if round % 4 == 0 {
        wrong_letter(correct)
    } else {
        correct
    };
    engine.queue_command(PlayerCommand::SubmitAnswer { choice });
}

fn wrong_letter(correct: char) -> char {
    if correct == 'A' {
        'B'
    } else {
        'A'
    }
}

fn log_events(snapshot: &GameStateSnapshot) {
    for event in &snapshot.events {
        match event {
            SimEvent::Fired {
                shot_id,
                ammo,
                range_error_m,
                ..
            } => info!(shot_id, ?ammo, range_error_m, "fired"),
            SimEvent::ImpactResult {
                shot_id,
                outcome,
                miss_distance_m,
            } => info!(shot_id, ?outcome, miss = ?miss_distance_m, "impact"),
            SimEvent::PhaseStarted { label } => info!(%label, "phase"),
            SimEvent::MissionEnded { outcome } => info!(?outcome, "mission ended"),
            other => tracing::debug!(event = ?other, "event"),
        }
    }
}
