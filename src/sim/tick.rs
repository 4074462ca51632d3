//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. The order
//! within a tick is fixed: player, mode entities, collision resolution,
//! compaction, then the game-over / victory check. Collision always sees the
//! post-motion positions of the same tick.

use super::entity::Entity;
use super::state::{GameEvent, GamePhase, GameState};
use crate::audio::AudioSink;

/// Logical actions for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    /// Fire held (lane modes)
    pub fire: bool,
    /// Flap pressed this tick (Flappy)
    pub flap: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// -1, 0 or 1 along x
    pub fn horizontal(&self) -> f32 {
        (self.move_right as i8 - self.move_left as i8) as f32
    }

    /// -1, 0 or 1 along y (up is positive)
    pub fn vertical(&self) -> f32 {
        (self.move_up as i8 - self.move_down as i8) as f32
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, audio: &mut dyn AudioSink) {
    // Terminal phases ignore input
    if state.phase.is_terminal() {
        return;
    }

    if input.pause {
        state.phase = match state.phase {
            GamePhase::Paused => GamePhase::Running,
            _ => GamePhase::Paused,
        };
        log::debug!("Phase -> {:?}", state.phase);
    }
    if state.phase == GamePhase::Paused {
        return;
    }

    let GameState {
        phase,
        time_ticks,
        world,
        mode,
        kind,
        ..
    } = state;

    world.events.clear();
    *time_ticks += 1;
    world.elapsed += dt;

    // Player
    world.player.tick_cooldown(dt);
    mode.control_player(world, input, dt, audio);
    for bullet in &mut world.bullets {
        bullet.update(dt);
    }

    // Mode entities, then collisions against their new positions
    mode.advance(world, dt, audio);
    mode.resolve(world, audio);

    world.compact();
    mode.compact();

    if let Some(outcome) = mode.outcome(world) {
        *phase = outcome;
        match outcome {
            GamePhase::Victory => {
                world.events.push(GameEvent::Victory);
                log::info!(
                    "{} victory: score {}, wave {}",
                    kind.display_name(),
                    world.score,
                    world.wave
                );
            }
            _ => {
                if !world.player.is_alive() {
                    audio.play_explosion();
                }
                world.events.push(GameEvent::GameOver);
                log::info!(
                    "{} game over: score {}, wave {}",
                    kind.display_name(),
                    world.score,
                    world.wave
                );
            }
        }
    }
}
