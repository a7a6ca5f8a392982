//! Headless demo driver
//!
//! Exercises the simulation core without a renderer: a small autopilot
//! chases the formation and fires, the loop ticks at a fixed rate, and the
//! outcome is logged. An optional first argument seeds the run.

use std::path::Path;

use log::{info, warn};

use star_siege::Config;
use star_siege::highscores::ScoreHistory;
use star_siege::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

const TICK_RATE: f64 = 100.0;
const RUN_SECONDS: f64 = 180.0;
const SCORES_PATH: &str = "scores.json";

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);
    info!("seed {seed}");

    let mut state = GameState::new(Config::default(), seed, 0.0);
    state.history = ScoreHistory::load_or_default(Path::new(SCORES_PATH));

    let mut input = TickInput {
        start: true,
        ..Default::default()
    };

    let total_frames = (TICK_RATE * RUN_SECONDS) as u64;
    let mut finished = false;
    for frame in 0..total_frames {
        let now = frame as f64 / TICK_RATE;
        tick(&mut state, &input, now);

        for event in state.take_events() {
            match event {
                GameEvent::LevelStarted(level) => info!("level {level}"),
                GameEvent::LifeLost { remaining } => info!("hit, {remaining} lives left"),
                GameEvent::GameOver { score } => info!("game over with {score:.0} points"),
                GameEvent::ScoreRecorded(record) => {
                    info!(
                        "recorded {} pts for {} after {:.1}s",
                        record.score, record.name, record.elapsed_seconds
                    );
                    if let Err(err) = state.history.save(Path::new(SCORES_PATH)) {
                        warn!("could not save score history: {err}");
                    }
                    finished = true;
                }
                _ => {}
            }
        }
        if finished {
            break;
        }

        input = autopilot(&state, frame);
    }

    info!(
        "done: level {}, score {:.0}, high score {}",
        state.stats.level,
        state.stats.score,
        state.history.high_score()
    );
}

/// Chase the formation's center of mass and keep firing
fn autopilot(state: &GameState, frame: u64) -> TickInput {
    if state.phase == GamePhase::GameOver {
        return TickInput {
            confirm_name: Some("Autopilot".to_string()),
            ..Default::default()
        };
    }

    let player_x = state.player.rect.center().x;
    let alive: Vec<f32> = state
        .formation
        .members
        .iter()
        .filter(|m| m.alive)
        .map(|m| m.rect.center().x)
        .collect();
    let target_x = if alive.is_empty() {
        player_x
    } else {
        alive.iter().sum::<f32>() / alive.len() as f32
    };

    TickInput {
        move_left: target_x < player_x - 5.0,
        move_right: target_x > player_x + 5.0,
        fire: frame.is_multiple_of(3),
        ..Default::default()
    }
}
