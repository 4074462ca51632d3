//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each collection)
//! - No rendering or platform dependencies; audio is an injected sink

pub mod autopilot;
pub mod boss;
pub mod collision;
pub mod entity;
pub mod modes;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod upgrade;

pub use autopilot::autopilot_input;
pub use boss::{Boss, BossMotion, BossPhase};
pub use collision::Rect;
pub use entity::{Bullet, BulletOwner, Enemy, EnemyKind, Entity, Particle, Player, Upgrade};
pub use modes::{ControlScheme, ModeKind, ModeState};
pub use spawn::{DifficultyCurve, Formation, IntervalRule, SpawnScheduler};
pub use state::{GameEvent, GamePhase, GameState, World};
pub use tick::{TickInput, tick};
pub use upgrade::UpgradeKind;
