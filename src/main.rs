//! Headless demo runner
//!
//! Runs one of the three sessions with the real frame clock and scripted
//! input, logging events and the final score. Stands in for the launcher
//! shell; rendering and audio go to the null boundary implementations.
//!
//! Usage: arcade-core [forest|meteor|traffic] [tuning.json] [seconds]

use std::process::ExitCode;

use glam::Vec2;

use arcade_core::games::{ForestGame, MeteorGame, TrafficGame};
use arcade_core::games::forest::ForestSprites;
use arcade_core::games::meteor::MeteorSprites;
use arcade_core::games::traffic::TrafficSprites;
use arcade_core::input::{InputAggregator, KeyboardState};
use arcade_core::platform::{AudioPlayer, NullAudio, NullRenderer, PlaceholderAssets};
use arcade_core::sim::{GameEvent, GamePhase};
use arcade_core::tuning::{ForestTuning, MeteorTuning, TrafficTuning, from_json_or_default};
use arcade_core::Clock;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let game = args.get(1).map(String::as_str).unwrap_or("forest");
    let tuning_json = args.get(2).map(|path| match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not read {path}: {e}; using default tuning");
            String::new()
        }
    });
    let seconds: f32 = args
        .get(3)
        .and_then(|s| s.parse().ok())
        .unwrap_or(10.0);
    let seed = 0xa7c4de;
    let json = tuning_json.as_deref().unwrap_or("{}");

    match game {
        "forest" => run_forest(from_json_or_default(json), seed, seconds),
        "meteor" => run_meteor(from_json_or_default(json), seed, seconds),
        "traffic" => run_traffic(from_json_or_default(json), seed, seconds),
        other => {
            log::error!("Unknown game '{other}' (expected forest, meteor or traffic)");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

/// Map tick events onto the audio boundary and the log
fn handle_events(events: &[GameEvent], audio: &mut NullAudio) {
    use arcade_core::platform::ClipId;
    for event in events {
        match event {
            GameEvent::ProjectileFired => audio.play_once(ClipId(0)),
            GameEvent::HostileDestroyed => audio.play_once(ClipId(1)),
            GameEvent::PickupCollected => audio.play_once(ClipId(2)),
            GameEvent::PlayerHit => log::info!("player hit"),
            GameEvent::SessionEnded { score } => log::info!("session ended, score {score}"),
        }
    }
}

fn run_forest(tuning: ForestTuning, seed: u64, seconds: f32) {
    let assets = PlaceholderAssets;
    let mut game = ForestGame::new(seed, tuning.clone(), ForestSprites::load(&assets));
    let mut agg = InputAggregator::new(tuning.fire_cooldown, tuning.jump_cooldown);
    let mut clock = Clock::new(tuning.target_hz);
    let mut renderer = NullRenderer::default();
    let mut audio = NullAudio;
    let mut time = 0.0f32;

    log::info!("forest demo: {seconds}s at {} Hz", tuning.target_hz);
    while time < seconds && game.phase == GamePhase::Playing {
        let dt = clock.tick();
        time += dt;
        // Script: run right, fire constantly, hop once a second
        let keyboard = KeyboardState {
            right: true,
            fire: true,
            jump: time.fract() < 0.1,
            ..Default::default()
        };
        let input = agg.poll(time, &keyboard, None, None);
        let events = game.tick(&input, dt);
        handle_events(&events, &mut audio);
        game.draw(&mut renderer);
    }
    log::info!("forest demo done: score {}, {} draws", game.score, renderer.draws);
}

fn run_meteor(tuning: MeteorTuning, seed: u64, seconds: f32) {
    let assets = PlaceholderAssets;
    let mut game = MeteorGame::new(seed, tuning.clone(), MeteorSprites::load(&assets));
    let mut agg = InputAggregator::new(tuning.laser_cooldown, 0.2);
    let mut clock = Clock::new(tuning.target_hz);
    let mut renderer = NullRenderer::default();
    let mut audio = NullAudio;
    let mut time = 0.0f32;

    log::info!("meteor demo: {seconds}s at {} Hz", tuning.target_hz);
    while time < seconds && game.phase == GamePhase::Playing {
        let dt = clock.tick();
        time += dt;
        // Script: sweep left and right along the bottom, firing
        let keyboard = KeyboardState {
            left: (time as i64) % 2 == 0,
            right: (time as i64) % 2 == 1,
            down: true,
            fire: true,
            ..Default::default()
        };
        let input = agg.poll(time, &keyboard, None, None);
        let events = game.tick(&input, dt);
        handle_events(&events, &mut audio);
        game.draw(&mut renderer);
    }
    log::info!("meteor demo done: survived {}s", game.score());
}

fn run_traffic(tuning: TrafficTuning, seed: u64, seconds: f32) {
    let assets = PlaceholderAssets;
    let mut game = TrafficGame::new(
        seed,
        tuning.clone(),
        TrafficSprites::load(&assets),
        Vec::new(),
    );
    let mut agg = InputAggregator::new(0.3, 0.2);
    let mut clock = Clock::new(tuning.target_hz);
    let mut renderer = NullRenderer::default();
    let mut audio = NullAudio;
    let mut time = 0.0f32;

    log::info!("traffic demo: {seconds}s at {} Hz", tuning.target_hz);
    while time < seconds && game.phase == GamePhase::Playing {
        let dt = clock.tick();
        time += dt;
        // Script: wander in a square
        let dir = match (time as i64) % 4 {
            0 => Vec2::new(1.0, 0.0),
            1 => Vec2::new(0.0, -1.0),
            2 => Vec2::new(-1.0, 0.0),
            _ => Vec2::new(0.0, 1.0),
        };
        let keyboard = KeyboardState {
            right: dir.x > 0.0,
            left: dir.x < 0.0,
            up: dir.y < 0.0,
            down: dir.y > 0.0,
            ..Default::default()
        };
        let input = agg.poll(time, &keyboard, None, None);
        let events = game.tick(&input, dt);
        handle_events(&events, &mut audio);
        game.draw(&mut renderer);
    }
    log::info!("traffic demo done: score {}", game.score);
}
