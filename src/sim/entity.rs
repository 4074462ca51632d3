//! Entities and their motion rules
//!
//! Every actor is a plain struct owned by exactly one collection. Destruction
//! only ever flips `alive` from true to false; the owning collection drops the
//! entity in the end-of-tick compaction pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::upgrade::UpgradeKind;
use crate::consts::*;

/// Capability set shared by every simulated actor
pub trait Entity {
    /// Axis-aligned bounding box derived from position and size
    fn bounds(&self) -> Rect;
    /// Whether the entity still takes part in the simulation
    fn is_alive(&self) -> bool;
}

/// Drop every entity that is no longer alive (deferred removal pass)
pub fn compact<T: Entity>(entities: &mut Vec<T>) {
    entities.retain(|e| e.is_alive());
}

/// Pure motion rules, kept free of entity state so they can be tested alone
pub mod motion {
    use glam::Vec2;

    /// `position += velocity * dt`
    #[inline]
    pub fn linear(pos: Vec2, vel: Vec2, dt: f32) -> Vec2 {
        pos + vel * dt
    }

    /// `base + amplitude * sin(phase * frequency)`
    #[inline]
    pub fn oscillate(base: f32, amplitude: f32, frequency: f32, phase: f32) -> f32 {
        base + amplitude * (phase * frequency).sin()
    }
}

/// True once a point has left the playfield rectangle
#[inline]
pub fn outside_screen(pos: Vec2) -> bool {
    pos.x < 0.0 || pos.x > SCREEN_WIDTH || pos.y < 0.0 || pos.y > SCREEN_HEIGHT
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Boss,
}

/// A projectile moving in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub damage: f32,
    pub owner: BulletOwner,
    /// Visual scale-in for player bullets (never used for collision)
    pub scale: f32,
    alive: bool,
}

impl Bullet {
    pub fn player(pos: Vec2, vel: Vec2, damage: f32) -> Self {
        Self {
            pos,
            vel,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            damage,
            owner: BulletOwner::Player,
            scale: 0.5,
            alive: true,
        }
    }

    pub fn boss(pos: Vec2, vel: Vec2, damage: f32) -> Self {
        Self {
            pos,
            vel,
            size: Vec2::new(BOSS_BULLET_WIDTH, BOSS_BULLET_HEIGHT),
            damage,
            owner: BulletOwner::Boss,
            scale: 1.0,
            alive: true,
        }
    }

    /// Move, then die in the same tick if the bullet left the screen
    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.pos = motion::linear(self.pos, self.vel, dt);
        if self.scale < 1.0 {
            self.scale = (self.scale + dt * 2.0).min(1.0);
        }
        if outside_screen(self.pos) {
            self.alive = false;
        }
    }

    pub fn destroy(&mut self) {
        self.alive = false;
    }
}

impl Entity for Bullet {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    /// Seconds since the last shot
    pub fire_timer: f32,
    /// Volley width, 1..=3
    pub bullet_level: u8,
    pub damage_multiplier: f32,
    alive: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::new(
            SCREEN_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
            PLAYER_START_Y,
        ))
    }
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            fire_timer: 0.0,
            bullet_level: 1,
            damage_multiplier: 1.0,
            alive: true,
        }
    }

    pub fn size() -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Self::size() / 2.0
    }

    /// Advance the fire cooldown
    pub fn tick_cooldown(&mut self, dt: f32) {
        if self.alive {
            self.fire_timer += dt;
        }
    }

    /// Horizontal lane movement; `direction` is -1, 0 or 1
    pub fn move_lane(&mut self, direction: f32, dt: f32) {
        if !self.alive {
            return;
        }
        self.pos.x += direction * PLAYER_SPEED * dt;
        self.clamp_to_screen();
    }

    pub fn clamp_to_screen(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, SCREEN_WIDTH - PLAYER_WIDTH);
        self.pos.y = self.pos.y.clamp(0.0, SCREEN_HEIGHT - PLAYER_HEIGHT);
    }

    pub fn can_fire(&self) -> bool {
        self.alive && self.fire_timer >= PLAYER_FIRE_COOLDOWN
    }

    pub fn reset_fire_timer(&mut self) {
        self.fire_timer = 0.0;
    }

    /// Apply damage; returns true if this hit killed the player
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.alive = false;
            return true;
        }
        false
    }

    pub fn heal(&mut self, amount: u32) {
        if self.alive {
            self.health = (self.health + amount).min(self.max_health);
        }
    }

    /// Instant death (Flappy floor and obstacle hits)
    pub fn kill(&mut self) {
        self.health = 0;
        self.alive = false;
    }

    /// Bullets for one trigger pull at the current bullet level
    pub fn volley(&self, speed_scale: f32, damage_scale: f32) -> Vec<Bullet> {
        let center_x = self.pos.x + PLAYER_WIDTH / 2.0;
        let top = self.pos.y + PLAYER_HEIGHT;
        let x = center_x - BULLET_WIDTH / 2.0;
        let damage = BULLET_BASE_DAMAGE * self.damage_multiplier * damage_scale;
        let speed = BULLET_SPEED * speed_scale;

        let shots: &[(f32, f32)] = match self.bullet_level {
            0 | 1 => &[(0.0, 0.0)],
            2 => &[(-10.0, 0.0), (10.0, 0.0)],
            _ => &[(0.0, 0.0), (-15.0, -50.0), (15.0, 50.0)],
        };

        shots
            .iter()
            .map(|&(offset, vx)| {
                Bullet::player(
                    Vec2::new(x + offset, top),
                    Vec2::new(vx * speed_scale, speed),
                    damage,
                )
            })
            .collect()
    }
}

impl Entity for Player {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Self::size())
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Bomber detonation sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BomberState {
    Approaching,
    Exploding { timer: f32 },
    Destroyed,
}

/// Enemy variants and their per-variant motion state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Straight down at constant speed
    Normal,
    /// Zigzag around `base_x`; `phase` accumulates forever
    Scout { base_x: f32, phase: f32 },
    /// Descends until close to the player, then detonates
    Bomber { state: BomberState },
}

/// Something an enemy did during its update that the game mode reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyEvent {
    Detonated { center: Vec2 },
}

/// A descending hostile ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub health: f32,
    pub speed: f32,
    alive: bool,
}

impl Enemy {
    pub fn normal(id: u32, pos: Vec2, health: f32) -> Self {
        Self {
            id,
            kind: EnemyKind::Normal,
            pos,
            health,
            speed: ENEMY_SPEED,
            alive: true,
        }
    }

    pub fn scout(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            kind: EnemyKind::Scout {
                base_x: pos.x,
                phase: 0.0,
            },
            pos,
            health: SCOUT_HEALTH,
            speed: ENEMY_SPEED * SCOUT_SPEED_FACTOR,
            alive: true,
        }
    }

    pub fn bomber(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            kind: EnemyKind::Bomber {
                state: BomberState::Approaching,
            },
            pos,
            health: BOMBER_HEALTH,
            speed: BOMBER_SPEED,
            alive: true,
        }
    }

    pub fn size() -> Vec2 {
        Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Self::size() / 2.0
    }

    pub fn is_exploding(&self) -> bool {
        matches!(
            self.kind,
            EnemyKind::Bomber {
                state: BomberState::Exploding { .. }
            }
        )
    }

    /// Alive and not in a damage-immune detonation
    pub fn is_targetable(&self) -> bool {
        self.alive && !self.is_exploding()
    }

    /// Advance the motion rule and evaluate removal conditions
    pub fn update(&mut self, dt: f32, player_center: Vec2) -> Option<EnemyEvent> {
        if !self.alive {
            return None;
        }

        let mut event = None;
        match &mut self.kind {
            EnemyKind::Normal => {
                self.pos.y -= self.speed * dt;
            }
            EnemyKind::Scout { base_x, phase } => {
                *phase += dt;
                self.pos.x =
                    motion::oscillate(*base_x, SCOUT_AMPLITUDE, SCOUT_FREQUENCY, *phase);
                self.pos.y -= self.speed * dt;
            }
            EnemyKind::Bomber { state } => match state {
                BomberState::Approaching => {
                    self.pos.y -= self.speed * dt;
                    let center = self.pos + Self::size() / 2.0;
                    if center.distance(player_center) < BOMBER_TRIGGER_RADIUS {
                        *state = BomberState::Exploding { timer: 0.0 };
                        event = Some(EnemyEvent::Detonated { center });
                    }
                }
                BomberState::Exploding { timer } => {
                    *timer += dt;
                    if *timer >= BOMBER_EXPLOSION_DURATION {
                        *state = BomberState::Destroyed;
                        self.alive = false;
                    }
                    return None;
                }
                BomberState::Destroyed => {
                    self.alive = false;
                    return None;
                }
            },
        }

        if self.pos.y < -ENEMY_HEIGHT && !self.is_exploding() {
            self.alive = false;
        }
        event
    }

    /// Subtract health; returns true if this hit destroyed the enemy
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_targetable() {
            return false;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.alive = false;
            if let EnemyKind::Bomber { state } = &mut self.kind {
                *state = BomberState::Destroyed;
            }
            return true;
        }
        false
    }

    /// Body-contact kill: damage always exceeds the remaining health
    pub fn force_kill(&mut self) -> bool {
        let amount = RAM_DAMAGE.max(self.health + 1.0);
        self.take_damage(amount)
    }
}

impl Entity for Enemy {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Self::size())
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// A falling upgrade pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Upgrade {
    pub id: u32,
    pub pos: Vec2,
    pub kind: UpgradeKind,
    alive: bool,
}

impl Upgrade {
    pub fn new(id: u32, pos: Vec2, kind: UpgradeKind) -> Self {
        Self {
            id,
            pos,
            kind,
            alive: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.pos.y -= UPGRADE_FALL_SPEED * dt;
        if self.pos.y < -UPGRADE_SIZE {
            self.alive = false;
        }
    }

    pub fn collect(&mut self) {
        self.alive = false;
    }
}

impl Entity for Upgrade {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(UPGRADE_SIZE))
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// A cosmetic explosion particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, lifetime: f32) -> Self {
        Self {
            pos,
            vel,
            life: lifetime,
            max_life: lifetime,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos = motion::linear(self.pos, self.vel, dt);
        self.vel *= 0.98;
        self.life -= dt;
    }

    pub fn is_finished(&self) -> bool {
        self.life <= 0.0
    }

    /// Remaining life in 0..=1, for fading
    pub fn fade(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}
