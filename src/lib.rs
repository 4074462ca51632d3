//! Space Signal - a multi-mode arcade shoot-'em-up
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, game modes)
//! - `renderer`: Render-sink interface and scene emission
//! - `assets`: Texture handles with placeholder fallback
//! - `audio`: Fire-and-forget sound triggers
//! - `tuning`: Data-driven game balance
//! - `settings`: User preferences

pub mod assets;
pub mod audio;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// Screen space is y-up with the origin in the bottom-left corner.
/// Entity positions are the bottom-left corner of their bounding box.
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 250.0;
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    pub const PLAYER_START_Y: f32 = 50.0;
    pub const PLAYER_MAX_HEALTH: u32 = 3;
    /// Seconds between shots
    pub const PLAYER_FIRE_COOLDOWN: f32 = 0.2;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 100.0;
    pub const ENEMY_WIDTH: f32 = 32.0;
    pub const ENEMY_HEIGHT: f32 = 32.0;
    pub const SCOUT_HEALTH: f32 = 5.0;
    pub const SCOUT_SPEED_FACTOR: f32 = 1.8;
    pub const SCOUT_AMPLITUDE: f32 = 100.0;
    pub const SCOUT_FREQUENCY: f32 = 2.0;
    pub const BOMBER_HEALTH: f32 = 20.0;
    pub const BOMBER_SPEED: f32 = 60.0;
    pub const BOMBER_TRIGGER_RADIUS: f32 = 80.0;
    pub const BOMBER_EXPLOSION_DURATION: f32 = 0.5;
    pub const BOMBER_EXPLOSION_DAMAGE: u32 = 1;
    /// Damage applied to an enemy on body contact (exceeds any health)
    pub const RAM_DAMAGE: f32 = 999.0;

    /// Player projectiles
    pub const BULLET_SPEED: f32 = 400.0;
    pub const BULLET_WIDTH: f32 = 8.0;
    pub const BULLET_HEIGHT: f32 = 16.0;
    pub const BULLET_BASE_DAMAGE: f32 = 10.0;

    /// Upgrades
    pub const UPGRADE_FALL_SPEED: f32 = 80.0;
    pub const UPGRADE_SIZE: f32 = 32.0;
    pub const UPGRADE_DROP_CHANCE: f64 = 0.3;

    /// Boss
    pub const BOSS_WIDTH: f32 = 100.0;
    pub const BOSS_HEIGHT: f32 = 70.0;
    pub const BOSS_SPEED: f32 = 150.0;
    pub const BOSS_TOP_MARGIN: f32 = 80.0;
    pub const BOSS_BULLET_WIDTH: f32 = 12.0;
    pub const BOSS_BULLET_HEIGHT: f32 = 20.0;
    pub const BOSS_BULLET_SPEED: f32 = 180.0;
    /// Horizontal spread of the level 2 fan
    pub const BOSS_FAN_SPREAD: f32 = 100.0;
    pub const BOSS_EXPLOSION_DURATION: f32 = 1.5;
    pub const BOSS_MAX_PARTICLES: usize = 50;
}
