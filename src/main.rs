//! Space Signal headless runner
//!
//! Plays one scripted session of a mode with the autopilot and logs what
//! happens. Usage: `space-signal [mode] [seed] [seconds] [tuning.json]`.
//! `RUST_LOG` controls verbosity.

use std::path::Path;

use space_signal::assets::{AssetRegistry, SequentialLoader};
use space_signal::audio::{AudioManager, LogBackend};
use space_signal::consts::*;
use space_signal::renderer::{CommandBuffer, render_scene};
use space_signal::settings::SETTINGS_FILE;
use space_signal::sim::{GameEvent, GameState, ModeKind, TickInput, autopilot_input, tick};
use space_signal::{Settings, Tuning};

/// Frame length of the simulated display
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_SECONDS: f32 = 60.0;

/// Game instance: state plus the services injected into it
struct Game {
    state: GameState,
    audio: AudioManager<LogBackend>,
    assets: AssetRegistry,
    frame: CommandBuffer,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    fn new(kind: ModeKind, seed: u64, tuning: &Tuning, settings: &Settings) -> Self {
        Self {
            state: GameState::new(kind, seed, tuning),
            audio: AudioManager::with_settings(LogBackend, settings),
            assets: AssetRegistry::load(&mut SequentialLoader::default()),
            frame: CommandBuffer::default(),
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.input = autopilot_input(&self.state);
            tick(&mut self.state, &self.input, SIM_DT, &mut self.audio);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in &self.state.world.events {
                log_event(event);
            }
        }
    }

    fn render(&mut self) {
        self.frame.clear();
        render_scene(&self.state, &self.assets, &mut self.frame);
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::WaveAdvanced { wave } => log::info!("Wave {wave}"),
        GameEvent::PlayerHit { health } => log::info!("Player hit, health {health}"),
        GameEvent::BossExploding { level } => log::info!("Boss level {level} exploding"),
        GameEvent::TimeUp => log::info!("Time up"),
        GameEvent::GameOver | GameEvent::Victory => {}
        other => log::debug!("{other:?}"),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = Settings::load_or_default(Path::new(SETTINGS_FILE));

    let kind = match args.first() {
        Some(name) => ModeKind::from_name(name).unwrap_or_else(|| {
            log::warn!("Unknown mode '{name}', using {}", settings.preferred_mode.display_name());
            settings.preferred_mode
        }),
        None => settings.preferred_mode,
    };
    let seed = args
        .get(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let seconds = args
        .get(2)
        .and_then(|s| s.parse::<f32>().ok())
        .filter(|s| *s > 0.0)
        .unwrap_or(DEFAULT_SECONDS);
    let tuning = match args.get(3) {
        Some(path) => Tuning::load_or_default(Path::new(path)),
        None => Tuning::default(),
    };

    log::info!("Space Signal (headless) starting...");
    log::info!("{}: {}", kind.display_name(), kind.description());

    let mut game = Game::new(kind, seed, &tuning, &settings);
    let frames = (seconds / FRAME_DT).ceil() as u64;
    for _ in 0..frames {
        game.update(FRAME_DT);
        game.render();
        if game.state.is_over() {
            break;
        }
    }

    let state = &game.state;
    println!(
        "mode={} seed={} score={} wave={} phase={:?} time={:.1}s draws={}{}",
        kind.as_str(),
        seed,
        state.score(),
        state.wave(),
        state.phase,
        state.world.elapsed,
        game.frame.draws.len(),
        state
            .victory_message()
            .map(|m| format!(" message=\"{m}\""))
            .unwrap_or_default()
    );
}
