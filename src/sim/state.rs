//! Game state and core simulation types
//!
//! `World` holds everything every mode shares: the player, the shared entity
//! collections, score, wave and the seeded RNG. Mode-specific state lives in
//! [`ModeState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{self, Bullet, Enemy, Entity, Particle, Player, Upgrade};
use super::modes::asteroid_dodger::PowerUpKind;
use super::modes::{ModeKind, ModeState};
use super::upgrade::UpgradeKind;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended by player death or the clock
    GameOver,
    /// Mode-specific win condition reached
    Victory,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Events emitted during a tick, drained by the caller for effects and logs
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemyKilled { pos: Vec2 },
    PlayerHit { health: u32 },
    BomberDetonated { pos: Vec2 },
    UpgradeDropped { kind: UpgradeKind, pos: Vec2 },
    UpgradeCollected { kind: UpgradeKind, applied: bool },
    WaveAdvanced { wave: u32 },
    BossSpawned { level: u32 },
    BossExploding { level: u32 },
    BossDefeated { level: u32 },
    AsteroidDestroyed { pos: Vec2, shielded: bool },
    CloseCall { combo: u32 },
    PowerUpCollected { kind: PowerUpKind },
    ObstaclePassed { passed: u32 },
    TimeUp,
    GameOver,
    Victory,
}

/// Shared simulation state for all modes
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub upgrades: Vec<Upgrade>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub score: u64,
    pub wave: u32,
    /// Seconds of unpaused play
    pub elapsed: f32,
    pub rng: Pcg32,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    pub fn new(seed: u64) -> Self {
        Self {
            player: Player::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            upgrades: Vec::new(),
            particles: Vec::new(),
            score: 0,
            wave: 1,
            elapsed: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_score(&mut self, amount: u64) {
        self.score = self.score.saturating_add(amount);
    }

    pub fn advance_wave(&mut self) {
        self.wave += 1;
        log::debug!("Wave {}", self.wave);
        self.events.push(GameEvent::WaveAdvanced { wave: self.wave });
    }

    /// Spawn a fading particle burst at `pos`
    pub fn spawn_burst(&mut self, pos: Vec2, count: usize, speed: f32) {
        use rand::Rng;
        for _ in 0..count {
            let vel = Vec2::new(
                self.rng.random_range(-speed..=speed),
                self.rng.random_range(-speed..=speed),
            );
            let life = self.rng.random_range(0.3..=0.7);
            self.particles.push(Particle::new(pos, vel, life));
        }
    }

    /// End-of-tick removal pass over every shared collection
    pub fn compact(&mut self) {
        entity::compact(&mut self.bullets);
        entity::compact(&mut self.enemies);
        entity::compact(&mut self.upgrades);
        self.particles.retain(|p| !p.is_finished());
    }

    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_alive())
    }
}

/// Complete game state for one run of one mode
#[derive(Debug, Clone)]
pub struct GameState {
    pub kind: ModeKind,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub world: World,
    pub mode: ModeState,
}

impl GameState {
    /// Create a new game state with the given mode and seed
    pub fn new(kind: ModeKind, seed: u64, tuning: &Tuning) -> Self {
        let mut world = World::new(seed);
        let mode = ModeState::new(kind, tuning, &mut world);
        log::info!("Starting {} (seed {})", kind.display_name(), seed);
        Self {
            kind,
            seed,
            phase: GamePhase::Running,
            time_ticks: 0,
            world,
            mode,
        }
    }

    pub fn score(&self) -> u64 {
        self.world.score
    }

    pub fn wave(&self) -> u32 {
        self.world.wave
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn victory_message(&self) -> Option<String> {
        self.mode.victory_message(&self.world)
    }

    pub fn hud_lines(&self) -> Vec<String> {
        let mut lines = self.mode.hud_lines(&self.world);
        if self.phase == GamePhase::Paused {
            lines.push("PAUSED".to_string());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_defaults() {
        let world = World::new(1);
        assert_eq!(world.score, 0);
        assert_eq!(world.wave, 1);
        assert!(world.player.is_alive());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut world = World::new(1);
        let a = world.next_entity_id();
        let b = world.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_advance_wave_emits_event() {
        let mut world = World::new(1);
        world.advance_wave();
        assert_eq!(world.wave, 2);
        assert_eq!(world.events, vec![GameEvent::WaveAdvanced { wave: 2 }]);
    }

    #[test]
    fn test_every_mode_starts_running() {
        let tuning = Tuning::default();
        for kind in ModeKind::ALL {
            let state = GameState::new(kind, 42, &tuning);
            assert_eq!(state.phase, GamePhase::Running);
            assert_eq!(state.kind, kind);
            assert!(state.victory_message().is_none());
            assert!(!state.hud_lines().is_empty());
        }
    }
}
