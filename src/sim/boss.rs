//! Boss encounter controller
//!
//! Alive → Exploding → Destroyed. Level drives size, health, speed, fire
//! rate, bullet damage and the attack pattern.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entity::{Bullet, Entity, Particle};
use crate::audio::AudioSink;
use crate::consts::*;

/// Vertical clearance between the boss and the top edge
const HOME_OFFSET: f32 = BOSS_TOP_MARGIN;
/// Ping-pong direction flip interval
const FLIP_INTERVAL: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BossPhase {
    Alive,
    /// Damage-immune death animation
    Exploding { timer: f32 },
    Destroyed,
}

/// Horizontal movement rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BossMotion {
    /// Reverse at an edge or every two seconds, whichever comes first
    PingPong,
    /// Sinusoidal sweep across the screen with a slight vertical bob
    #[default]
    Sinusoidal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub level: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub motion: BossMotion,
    pub phase: BossPhase,
    /// Seconds until the next volley
    pub fire_timer: f32,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    direction: f32,
    motion_timer: f32,
    explosion_origin: Vec2,
    pending_burst: bool,
}

impl Boss {
    pub fn new(level: u32, motion: BossMotion, rng: &mut impl Rng) -> Self {
        let level = level.max(1);
        let scale = 1.0 + level as f32 * 0.15;
        let size = Vec2::new(BOSS_WIDTH * scale, BOSS_HEIGHT * scale);
        let max_health = 100.0 + level as f32 * 50.0;
        Self {
            level,
            pos: Self::home(size),
            size,
            health: max_health,
            max_health,
            speed: BOSS_SPEED * (1.0 + level as f32 * 0.1),
            motion,
            phase: BossPhase::Alive,
            fire_timer: rng.random_range(1.0..=3.0),
            bullets: Vec::new(),
            particles: Vec::new(),
            direction: 1.0,
            motion_timer: 0.0,
            explosion_origin: Vec2::ZERO,
            pending_burst: false,
        }
    }

    fn home(size: Vec2) -> Vec2 {
        Vec2::new(
            SCREEN_WIDTH / 2.0 - size.x / 2.0,
            SCREEN_HEIGHT - size.y - HOME_OFFSET,
        )
    }

    pub fn fire_cooldown(&self) -> f32 {
        (2.0 - self.level as f32 * 0.2).max(0.5)
    }

    pub fn bullet_damage(&self) -> f32 {
        10.0 + self.level as f32 * 5.0
    }

    pub fn is_targetable(&self) -> bool {
        self.phase == BossPhase::Alive
    }

    pub fn is_exploding(&self) -> bool {
        matches!(self.phase, BossPhase::Exploding { .. })
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == BossPhase::Destroyed
    }

    /// Health as a fraction of max, for the HUD bar
    pub fn health_fraction(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Subtract health; returns true when this hit started the explosion
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_targetable() {
            return false;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.start_explosion();
            return true;
        }
        false
    }

    fn start_explosion(&mut self) {
        self.phase = BossPhase::Exploding { timer: 0.0 };
        self.explosion_origin = self.pos + self.size / 2.0;
        self.bullets.clear();
        self.pending_burst = true;
    }

    pub fn update(&mut self, dt: f32, rng: &mut impl Rng, audio: &mut dyn AudioSink) {
        match self.phase {
            BossPhase::Alive => {
                self.step_motion(dt);
                self.fire_timer -= dt;
                if self.fire_timer <= 0.0 {
                    self.fire();
                    audio.play_shoot();
                    self.fire_timer = self.fire_cooldown();
                }
                for bullet in &mut self.bullets {
                    bullet.update(dt);
                }
                self.bullets.retain(|b| b.is_alive());
            }
            BossPhase::Exploding { timer } => self.step_explosion(timer + dt, dt, rng),
            BossPhase::Destroyed => {}
        }
    }

    fn step_motion(&mut self, dt: f32) {
        self.motion_timer += dt;
        let max_x = SCREEN_WIDTH - self.size.x;
        match self.motion {
            BossMotion::PingPong => {
                let mut flip = false;
                if self.motion_timer > FLIP_INTERVAL {
                    flip = true;
                    self.motion_timer = 0.0;
                }
                if (self.pos.x <= 0.0 && self.direction < 0.0)
                    || (self.pos.x >= max_x && self.direction > 0.0)
                {
                    flip = true;
                }
                if flip {
                    self.direction = -self.direction;
                }
                self.pos.x += self.speed * self.direction * dt;
            }
            BossMotion::Sinusoidal => {
                let amplitude = max_x / 2.0;
                let frequency = 0.5 + self.level as f32 * 0.1;
                self.pos.x = amplitude + amplitude * (self.motion_timer * frequency).sin();
                let bob = (self.motion_timer * frequency * 0.7).sin() * 10.0;
                self.pos.y = Self::home(self.size).y + bob;
            }
        }
        self.pos.x = self.pos.x.clamp(0.0, max_x.max(0.0));
        self.pos.y = self.pos.y.clamp(0.0, SCREEN_HEIGHT - self.size.y);
    }

    fn step_explosion(&mut self, timer: f32, dt: f32, rng: &mut impl Rng) {
        if std::mem::take(&mut self.pending_burst) {
            self.spawn_burst(rng);
        }
        for particle in &mut self.particles {
            particle.update(dt);
        }
        self.particles.retain(|p| !p.is_finished());

        if timer < BOSS_EXPLOSION_DURATION * 0.7
            && self.particles.len() < BOSS_MAX_PARTICLES
            && rng.random_bool(0.2)
        {
            let spread = self.size * 0.2;
            let pos = self.explosion_origin
                + Vec2::new(
                    rng.random_range(-spread.x..=spread.x),
                    rng.random_range(-spread.y..=spread.y),
                );
            let vel = Vec2::new(
                rng.random_range(-150.0..=150.0),
                rng.random_range(-150.0..=150.0),
            );
            self.particles
                .push(Particle::new(pos, vel, rng.random_range(0.3..=0.8)));
        }

        self.phase = if timer >= BOSS_EXPLOSION_DURATION {
            BossPhase::Destroyed
        } else {
            BossPhase::Exploding { timer }
        };
    }

    fn spawn_burst(&mut self, rng: &mut impl Rng) {
        let count = 30 + self.level as usize * 5;
        let spread = self.size * 0.3;
        for _ in 0..count {
            let pos = self.explosion_origin
                + Vec2::new(
                    rng.random_range(-spread.x..=spread.x),
                    rng.random_range(-spread.y..=spread.y),
                );
            let vel = Vec2::new(
                rng.random_range(-300.0..=300.0),
                rng.random_range(-300.0..=300.0),
            );
            self.particles
                .push(Particle::new(pos, vel, rng.random_range(0.6..=1.2)));
        }
    }

    /// Bullet velocities for one volley at the current level
    pub fn pattern(&self) -> Vec<Vec2> {
        let speed = BOSS_BULLET_SPEED;
        match self.level {
            1 => vec![Vec2::new(0.0, -speed)],
            2 => (-1..=1)
                .map(|i| Vec2::new(i as f32 * BOSS_FAN_SPREAD, -speed))
                .collect(),
            3 => [-30.0_f32, -15.0, 0.0, 15.0, 30.0]
                .iter()
                .map(|deg| {
                    let rad = deg.to_radians();
                    Vec2::new(rad.sin() * 200.0, -rad.cos() * speed)
                })
                .collect(),
            level => {
                let count = 1 + level / 2;
                (0..count)
                    .map(|i| {
                        let deg = 360.0 / count as f32 * i as f32 + self.motion_timer * 100.0;
                        let rad = deg.to_radians();
                        Vec2::new(rad.sin() * 150.0, -rad.cos() * speed)
                    })
                    .collect()
            }
        }
    }

    /// Shared spawn point of every volley, centred under the boss
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + self.size.x / 2.0 - BOSS_BULLET_WIDTH / 2.0,
            self.pos.y - BOSS_BULLET_HEIGHT,
        )
    }

    fn fire(&mut self) {
        let origin = self.muzzle();
        let damage = self.bullet_damage();
        let volley: Vec<Bullet> = self
            .pattern()
            .into_iter()
            .map(|vel| Bullet::boss(origin, vel, damage))
            .collect();
        self.bullets.extend(volley);
    }
}

impl Entity for Boss {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    fn is_alive(&self) -> bool {
        !self.is_destroyed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn boss(level: u32) -> Boss {
        let mut rng = Pcg32::seed_from_u64(level as u64);
        Boss::new(level, BossMotion::Sinusoidal, &mut rng)
    }

    #[test]
    fn test_level_scaling() {
        let b = boss(2);
        assert_eq!(b.max_health, 200.0);
        assert!((b.size.x - 130.0).abs() < 1e-4);
        assert!((b.speed - 180.0).abs() < 1e-4);
        assert_eq!(b.bullet_damage(), 20.0);
        assert!((b.fire_cooldown() - 1.6).abs() < 1e-6);
        assert_eq!(boss(10).fire_cooldown(), 0.5);
        assert!(b.fire_timer >= 1.0 && b.fire_timer <= 3.0);
    }

    #[test]
    fn test_level_two_fan() {
        let b = boss(2);
        let xs: Vec<f32> = b.pattern().iter().map(|v| v.x).collect();
        assert_eq!(xs, vec![-100.0, 0.0, 100.0]);
        assert!(b.pattern().iter().all(|v| v.y == -BOSS_BULLET_SPEED));
    }

    #[test]
    fn test_pattern_sizes() {
        assert_eq!(boss(1).pattern().len(), 1);
        assert_eq!(boss(3).pattern().len(), 5);
        assert_eq!(boss(4).pattern().len(), 3);
        assert_eq!(boss(9).pattern().len(), 5);
    }

    #[test]
    fn test_volley_shares_muzzle() {
        let mut b = boss(3);
        b.fire_timer = 0.0;
        let mut rng = Pcg32::seed_from_u64(1);
        b.update(1.0 / 60.0, &mut rng, &mut NullAudio);
        assert_eq!(b.bullets.len(), 5);
        let first = b.bullets[0].pos.x - b.bullets[0].vel.x / 60.0;
        let last = b.bullets[4].pos.x - b.bullets[4].vel.x / 60.0;
        assert!((first - last).abs() < 1e-3);
        assert!((b.fire_timer - b.fire_cooldown()).abs() < 1e-6);
    }

    #[test]
    fn test_spiral_rotates_with_motion_timer() {
        let mut b = boss(6);
        let before = b.pattern();
        b.motion_timer += 0.3;
        let after = b.pattern();
        assert_eq!(before.len(), after.len());
        assert_ne!(before[0], after[0]);
    }

    #[test]
    fn test_motion_stays_on_screen() {
        let mut rng = Pcg32::seed_from_u64(8);
        for motion in [BossMotion::PingPong, BossMotion::Sinusoidal] {
            let mut b = Boss::new(5, motion, &mut rng);
            b.fire_timer = f32::MAX;
            for _ in 0..2000 {
                b.update(1.0 / 60.0, &mut rng, &mut NullAudio);
                assert!(b.pos.x >= 0.0 && b.pos.x + b.size.x <= SCREEN_WIDTH + 1e-3);
            }
        }
    }

    #[test]
    fn test_explosion_sequence() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut b = boss(1);
        b.fire_timer = 0.0;
        b.update(1.0 / 60.0, &mut rng, &mut NullAudio);
        assert!(!b.bullets.is_empty());

        assert!(b.take_damage(1000.0));
        assert!(b.is_exploding());
        assert!(b.bullets.is_empty());
        assert!(!b.take_damage(10.0));

        b.update(1.0 / 60.0, &mut rng, &mut NullAudio);
        assert!(b.particles.len() >= 35);
        assert!(b.bullets.is_empty());

        for _ in 0..100 {
            b.update(1.0 / 60.0, &mut rng, &mut NullAudio);
        }
        assert!(b.is_destroyed());
        assert!(!b.is_alive());
    }

    proptest! {
        #[test]
        fn prop_health_frozen_while_exploding(
            hits in proptest::collection::vec(0.0f32..500.0, 1..20)
        ) {
            let mut b = boss(2);
            b.take_damage(b.max_health + 1.0);
            let frozen = b.health;
            prop_assert!(frozen <= 0.0);
            for dmg in hits {
                prop_assert!(!b.take_damage(dmg));
                prop_assert_eq!(b.health, frozen);
            }
        }
    }
}
