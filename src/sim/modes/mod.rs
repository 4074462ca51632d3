//! Game modes
//!
//! The set of modes is closed, so each one is a variant of [`ModeState`] and
//! every per-tick hook is an exhaustive match. Modes own their auxiliary
//! state; everything shared (player, collections, score, wave, RNG) is
//! borrowed from the [`World`] for the duration of a call.

pub mod arcade;
pub mod asteroid_dodger;
pub mod boss_rush;
pub mod flappy;

use serde::{Deserialize, Serialize};

use self::arcade::ArcadeMode;
use self::asteroid_dodger::AsteroidDodgerMode;
use self::boss_rush::BossRushMode;
use self::flappy::FlappyMode;
use super::state::{GamePhase, World};
use super::tick::TickInput;
use crate::audio::AudioSink;
use crate::tuning::Tuning;

/// Selectable game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModeKind {
    #[default]
    Classic,
    Survival,
    TimeAttack,
    BossRush,
    AsteroidDodger,
    Flappy,
}

/// How player input maps onto movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlScheme {
    /// Left/right along the bottom lane, fire upward
    Lane,
    /// 8-directional acceleration with friction
    Free,
    /// Gravity plus an upward impulse
    Flap,
}

impl ModeKind {
    pub const ALL: [ModeKind; 6] = [
        ModeKind::Classic,
        ModeKind::Survival,
        ModeKind::TimeAttack,
        ModeKind::BossRush,
        ModeKind::AsteroidDodger,
        ModeKind::Flappy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeKind::Classic => "classic",
            ModeKind::Survival => "survival",
            ModeKind::TimeAttack => "time_attack",
            ModeKind::BossRush => "boss_rush",
            ModeKind::AsteroidDodger => "asteroid_dodger",
            ModeKind::Flappy => "flappy",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModeKind::Classic => "Classic",
            ModeKind::Survival => "Survival",
            ModeKind::TimeAttack => "Time Attack",
            ModeKind::BossRush => "Boss Rush",
            ModeKind::AsteroidDodger => "Asteroid Dodger",
            ModeKind::Flappy => "Flappy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModeKind::Classic => "Endless waves, steadily harder",
            ModeKind::Survival => "Tougher enemies, stronger guns",
            ModeKind::TimeAttack => "Score as much as you can in 60 seconds",
            ModeKind::BossRush => "Ten bosses back to back",
            ModeKind::AsteroidDodger => "Fly free and dodge everything",
            ModeKind::Flappy => "Flap through the gaps",
        }
    }

    /// Parse a mode name; unknown names yield `None`
    pub fn from_name(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "classic" => Some(ModeKind::Classic),
            "survival" => Some(ModeKind::Survival),
            "timeattack" => Some(ModeKind::TimeAttack),
            "bossrush" | "boss" => Some(ModeKind::BossRush),
            "asteroiddodger" | "asteroids" | "asteroid" => Some(ModeKind::AsteroidDodger),
            "flappy" => Some(ModeKind::Flappy),
            _ => None,
        }
    }

    pub fn control_scheme(&self) -> ControlScheme {
        match self {
            ModeKind::Classic | ModeKind::Survival | ModeKind::TimeAttack | ModeKind::BossRush => {
                ControlScheme::Lane
            }
            ModeKind::AsteroidDodger => ControlScheme::Free,
            ModeKind::Flappy => ControlScheme::Flap,
        }
    }
}

/// Per-mode rule set and auxiliary state
#[derive(Debug, Clone)]
pub enum ModeState {
    Arcade(ArcadeMode),
    BossRush(BossRushMode),
    AsteroidDodger(AsteroidDodgerMode),
    Flappy(FlappyMode),
}

impl ModeState {
    pub fn new(kind: ModeKind, tuning: &Tuning, world: &mut World) -> Self {
        match kind {
            ModeKind::Classic | ModeKind::Survival | ModeKind::TimeAttack => {
                let rules = tuning.arcade(kind).cloned().unwrap_or_default();
                ModeState::Arcade(ArcadeMode::new(kind, rules))
            }
            ModeKind::BossRush => {
                ModeState::BossRush(BossRushMode::new(tuning.boss_rush.clone(), world))
            }
            ModeKind::AsteroidDodger => ModeState::AsteroidDodger(AsteroidDodgerMode::new(
                tuning.asteroid.clone(),
                world,
            )),
            ModeKind::Flappy => ModeState::Flappy(FlappyMode::new(tuning.flappy.clone(), world)),
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            ModeState::Arcade(m) => m.kind,
            ModeState::BossRush(_) => ModeKind::BossRush,
            ModeState::AsteroidDodger(_) => ModeKind::AsteroidDodger,
            ModeState::Flappy(_) => ModeKind::Flappy,
        }
    }

    /// Player movement and firing for this tick
    pub fn control_player(
        &mut self,
        world: &mut World,
        input: &TickInput,
        dt: f32,
        audio: &mut dyn AudioSink,
    ) {
        match self {
            ModeState::Arcade(m) => {
                let rules = &m.rules;
                drive_lane(
                    world,
                    input,
                    dt,
                    rules.bullet_speed_scale,
                    rules.bullet_damage_scale,
                    audio,
                )
            }
            ModeState::BossRush(_) => drive_lane(world, input, dt, 1.0, 1.0, audio),
            ModeState::AsteroidDodger(m) => m.control_player(world, input, dt),
            ModeState::Flappy(m) => m.control_player(world, input, dt, audio),
        }
    }

    /// Spawning and entity motion
    pub fn advance(&mut self, world: &mut World, dt: f32, audio: &mut dyn AudioSink) {
        match self {
            ModeState::Arcade(m) => m.advance(world, dt, audio),
            ModeState::BossRush(m) => m.advance(world, dt, audio),
            ModeState::AsteroidDodger(m) => m.advance(world, dt),
            ModeState::Flappy(m) => m.advance(world, dt),
        }
    }

    /// Collision resolution against post-motion positions
    pub fn resolve(&mut self, world: &mut World, audio: &mut dyn AudioSink) {
        match self {
            ModeState::Arcade(m) => m.resolve(world, audio),
            ModeState::BossRush(m) => m.resolve(world, audio),
            ModeState::AsteroidDodger(m) => m.resolve(world, audio),
            ModeState::Flappy(m) => m.resolve(world, audio),
        }
    }

    /// Drop dead mode-owned entities
    pub fn compact(&mut self) {
        match self {
            ModeState::Arcade(_) => {}
            ModeState::BossRush(m) => m.compact(),
            ModeState::AsteroidDodger(m) => m.compact(),
            ModeState::Flappy(m) => m.compact(),
        }
    }

    /// Terminal phase reached this tick, if any
    pub fn outcome(&self, world: &World) -> Option<GamePhase> {
        match self {
            ModeState::Arcade(m) => m.outcome(world),
            ModeState::BossRush(m) => m.outcome(world),
            ModeState::AsteroidDodger(m) => m.outcome(world),
            ModeState::Flappy(m) => m.outcome(world),
        }
    }

    pub fn victory_message(&self, world: &World) -> Option<String> {
        match self {
            ModeState::Arcade(_) => None,
            ModeState::BossRush(m) => m.victory_message(),
            ModeState::AsteroidDodger(m) => m.victory_message(world),
            ModeState::Flappy(m) => m.victory_message(),
        }
    }

    pub fn hud_lines(&self, world: &World) -> Vec<String> {
        let mut lines = base_hud(world);
        match self {
            ModeState::Arcade(m) => m.extend_hud(&mut lines),
            ModeState::BossRush(m) => m.extend_hud(&mut lines),
            ModeState::AsteroidDodger(m) => m.extend_hud(&mut lines),
            ModeState::Flappy(m) => m.extend_hud(&mut lines),
        }
        lines
    }
}

/// Lane movement plus the fire button
fn drive_lane(
    world: &mut World,
    input: &TickInput,
    dt: f32,
    speed_scale: f32,
    damage_scale: f32,
    audio: &mut dyn AudioSink,
) {
    world.player.move_lane(input.horizontal(), dt);
    if input.fire && world.player.can_fire() {
        let volley = world.player.volley(speed_scale, damage_scale);
        world.bullets.extend(volley);
        world.player.reset_fire_timer();
        audio.play_shoot();
    }
}

fn base_hud(world: &World) -> Vec<String> {
    vec![
        format!("Score: {}", world.score),
        format!("Wave: {}", world.wave),
        format!("Health: {}", world.player.health),
        format!("Bullets: {}", world.player.bullet_level),
    ]
}
