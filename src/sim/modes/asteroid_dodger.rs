//! Asteroid Dodger
//!
//! Free 8-directional flight with acceleration and friction. Asteroids come
//! from every edge at an exponentially rising rate. Flying close to an
//! asteroid without touching it builds a combo; shield, slow motion and score
//! multiplier power-ups drift on screen for a few seconds.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::audio::AudioSink;
use crate::consts::*;
use crate::sim::collision::Rect;
use crate::sim::entity::{Entity, motion};
use crate::sim::spawn::SpawnScheduler;
use crate::sim::state::{GameEvent, GamePhase, World};
use crate::sim::tick::TickInput;
use crate::tuning::AsteroidTuning;

/// Homing acceleration toward the player (px/s²)
const HOMING_ACCEL: f32 = 50.0;
const HOMING_MAX_SPEED: f32 = 250.0;
const BOUNCING_SPEEDUP: f32 = 1.3;
/// Distance outside the screen at which asteroids spawn
const SPAWN_OFFSET: f32 = 50.0;
/// Distance outside the screen at which non-bouncing asteroids despawn
const DESPAWN_MARGIN: f32 = 100.0;
const POWER_UP_SIZE: f32 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidKind {
    Straight,
    /// Straight with a decorative rotation
    Spinning,
    Homing,
    Bouncing,
}

impl AsteroidKind {
    /// Kind for a uniform roll in `0..1`; later waves favour the nastier kinds
    pub fn from_roll(roll: f32, wave: u32) -> Self {
        let wf = (wave as f32 * 0.1).clamp(0.0, 0.6);
        if roll < 0.3 + wf {
            AsteroidKind::Homing
        } else if roll < 0.55 + wf {
            AsteroidKind::Bouncing
        } else if roll < 0.75 + wf {
            AsteroidKind::Spinning
        } else {
            AsteroidKind::Straight
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub kind: AsteroidKind,
    /// Degrees, cosmetic
    pub rotation: f32,
    pub rotation_speed: f32,
    pub age: f32,
    /// Already scored as a close call
    pub close_call: bool,
    alive: bool,
}

impl Asteroid {
    pub fn new(pos: Vec2, vel: Vec2, size: f32, kind: AsteroidKind) -> Self {
        Self {
            pos,
            vel,
            size,
            kind,
            rotation: 0.0,
            rotation_speed: 0.0,
            age: 0.0,
            close_call: false,
            alive: true,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// `dt` is already scaled by slow motion
    pub fn update(&mut self, dt: f32, player_center: Vec2, bouncing_lifetime: f32) {
        if !self.alive {
            return;
        }
        self.age += dt;

        match self.kind {
            AsteroidKind::Straight => {
                self.pos = motion::linear(self.pos, self.vel, dt);
            }
            AsteroidKind::Spinning => {
                self.pos = motion::linear(self.pos, self.vel, dt);
                self.rotation = (self.rotation + self.rotation_speed * dt).rem_euclid(360.0);
            }
            AsteroidKind::Homing => {
                let dir = (player_center - self.center()).normalize_or_zero();
                self.vel = (self.vel + dir * HOMING_ACCEL * dt).clamp_length_max(HOMING_MAX_SPEED);
                self.pos = motion::linear(self.pos, self.vel, dt);
            }
            AsteroidKind::Bouncing => {
                self.pos = motion::linear(self.pos, self.vel, dt);
                // Only reflect when heading further out, so off-screen spawns can enter
                let max = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) - Vec2::splat(self.size);
                if (self.pos.x <= 0.0 && self.vel.x < 0.0)
                    || (self.pos.x >= max.x && self.vel.x > 0.0)
                {
                    self.vel.x = -self.vel.x;
                }
                if (self.pos.y <= 0.0 && self.vel.y < 0.0)
                    || (self.pos.y >= max.y && self.vel.y > 0.0)
                {
                    self.vel.y = -self.vel.y;
                }
                if self.age >= bouncing_lifetime {
                    self.alive = false;
                }
                return;
            }
        }

        if self.pos.x < -DESPAWN_MARGIN
            || self.pos.x > SCREEN_WIDTH + DESPAWN_MARGIN
            || self.pos.y < -DESPAWN_MARGIN
            || self.pos.y > SCREEN_HEIGHT + DESPAWN_MARGIN
        {
            self.alive = false;
        }
    }

    pub fn destroy(&mut self) {
        self.alive = false;
    }
}

impl Entity for Asteroid {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(self.size))
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    SlowMotion,
    ScoreMultiplier,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::SlowMotion,
        PowerUpKind::ScoreMultiplier,
    ];
}

/// A bobbing power-up that expires if not collected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    /// Rest position; the hitbox bobs around it
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub lifetime: f32,
    bob_timer: f32,
    alive: bool,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind, lifetime: f32) -> Self {
        Self {
            pos,
            kind,
            lifetime,
            bob_timer: 0.0,
            alive: true,
        }
    }

    pub fn bob_offset(&self) -> f32 {
        self.bob_timer.sin() * 8.0
    }

    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.bob_timer += dt * 3.0;
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.alive = false;
        }
    }

    pub fn collect(&mut self) {
        self.alive = false;
    }
}

impl Entity for PowerUp {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(
            self.pos + Vec2::new(0.0, self.bob_offset()),
            Vec2::splat(POWER_UP_SIZE),
        )
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Active shield: absorbs up to `charges` asteroids before `timer` runs out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shield {
    pub timer: f32,
    pub charges: u32,
}

#[derive(Debug, Clone)]
pub struct AsteroidDodgerMode {
    pub tuning: AsteroidTuning,
    pub scheduler: SpawnScheduler,
    pub asteroids: Vec<Asteroid>,
    pub power_ups: Vec<PowerUp>,
    /// Player velocity (free flight)
    pub velocity: Vec2,
    pub current_speed: f32,
    pub combo: u32,
    pub combo_timer: f32,
    pub multiplier: f32,
    pub shield: Option<Shield>,
    pub slow_motion_timer: f32,
    wave_timer: f32,
    power_up_timer: f32,
}

impl AsteroidDodgerMode {
    pub fn new(tuning: AsteroidTuning, world: &mut World) -> Self {
        world.player.pos = Vec2::new(
            SCREEN_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
            SCREEN_HEIGHT / 2.0 - PLAYER_HEIGHT / 2.0,
        );
        Self {
            scheduler: SpawnScheduler::new(tuning.curve(), tuning.interval_rule()),
            current_speed: tuning.base_speed,
            tuning,
            asteroids: Vec::new(),
            power_ups: Vec::new(),
            velocity: Vec2::ZERO,
            combo: 0,
            combo_timer: 0.0,
            multiplier: 1.0,
            shield: None,
            slow_motion_timer: 0.0,
            wave_timer: 0.0,
            power_up_timer: 0.0,
        }
    }

    /// Global scale for asteroid motion and the spawn timer
    pub fn time_scale(&self) -> f32 {
        if self.slow_motion_timer > 0.0 {
            self.tuning.slow_motion_scale
        } else {
            1.0
        }
    }

    pub fn control_player(&mut self, world: &mut World, input: &TickInput, dt: f32) {
        if !world.player.is_alive() {
            return;
        }
        let t = &self.tuning;
        let accel = Vec2::new(input.horizontal(), input.vertical()) * t.player_accel;
        self.velocity = (self.velocity + accel * dt).clamp_length_max(t.player_max_speed);
        self.velocity *= t.player_friction.powf(dt * 60.0);
        world.player.pos = motion::linear(world.player.pos, self.velocity, dt);
        world.player.clamp_to_screen();
    }

    fn tick_timers(&mut self, dt: f32) {
        if let Some(shield) = self.shield.as_mut() {
            shield.timer -= dt;
            if shield.timer <= 0.0 {
                self.shield = None;
            }
        }
        self.slow_motion_timer = (self.slow_motion_timer - dt).max(0.0);

        if self.combo > 0 || self.multiplier > 1.0 {
            self.combo_timer -= dt;
            if self.combo_timer <= 0.0 {
                self.combo = 0;
                self.combo_timer = 0.0;
                self.multiplier = 1.0;
            }
        }
    }

    pub fn advance(&mut self, world: &mut World, dt: f32) {
        self.tick_timers(dt);
        let time_scale = self.time_scale();

        let spawn_due = self.scheduler.advance(dt, time_scale);
        let target =
            self.tuning.base_speed + self.tuning.speed_per_second * self.scheduler.elapsed();
        self.current_speed += (target - self.current_speed) * self.tuning.speed_lerp;
        if spawn_due {
            self.spawn_asteroid(world);
        }

        self.wave_timer += dt;
        if self.wave_timer >= self.tuning.wave_period {
            self.wave_timer -= self.tuning.wave_period;
            world.advance_wave();
        }

        let player_center = world.player.center();
        let scaled = dt * time_scale;
        for asteroid in &mut self.asteroids {
            asteroid.update(scaled, player_center, self.tuning.bouncing_lifetime);
        }

        self.power_up_timer += dt;
        if self.power_up_timer >= self.tuning.powerup_interval
            && world.rng.random_bool(self.tuning.powerup_chance)
        {
            self.spawn_power_up(world);
            self.power_up_timer = 0.0;
        }
        for power_up in &mut self.power_ups {
            power_up.update(dt);
        }
        for particle in &mut world.particles {
            particle.update(dt);
        }
    }

    fn spawn_asteroid(&mut self, world: &mut World) {
        let rng = &mut world.rng;
        let speed = self.current_speed;
        let jitter = rng.random_range(-SPAWN_OFFSET..=SPAWN_OFFSET);
        let (pos, vel) = match rng.random_range(0..4) {
            0 => (
                Vec2::new(rng.random_range(0.0..=SCREEN_WIDTH), SCREEN_HEIGHT + SPAWN_OFFSET),
                Vec2::new(jitter, -speed),
            ),
            1 => (
                Vec2::new(SCREEN_WIDTH + SPAWN_OFFSET, rng.random_range(0.0..=SCREEN_HEIGHT)),
                Vec2::new(-speed, jitter),
            ),
            2 => (
                Vec2::new(rng.random_range(0.0..=SCREEN_WIDTH), -SPAWN_OFFSET),
                Vec2::new(jitter, speed),
            ),
            _ => (
                Vec2::new(-SPAWN_OFFSET, rng.random_range(0.0..=SCREEN_HEIGHT)),
                Vec2::new(speed, jitter),
            ),
        };

        let wave = world.wave as f32;
        let kind = AsteroidKind::from_roll(rng.random::<f32>(), world.wave);
        let size = rng.random_range((30.0 + 3.0 * wave)..=(60.0 + 5.0 * wave));
        let mut asteroid = Asteroid::new(pos, vel, size, kind);
        asteroid.rotation = rng.random_range(0.0..360.0);
        asteroid.rotation_speed = rng.random_range(-180.0..=180.0);
        if kind == AsteroidKind::Bouncing {
            asteroid.vel *= BOUNCING_SPEEDUP;
        }
        self.asteroids.push(asteroid);
    }

    fn spawn_power_up(&mut self, world: &mut World) {
        let rng = &mut world.rng;
        let pos = Vec2::new(
            rng.random_range(50.0..=SCREEN_WIDTH - 50.0),
            rng.random_range(50.0..=SCREEN_HEIGHT - 50.0),
        );
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        self.power_ups
            .push(PowerUp::new(pos, kind, self.tuning.powerup_lifetime));
    }

    pub fn resolve(&mut self, world: &mut World, audio: &mut dyn AudioSink) {
        let player_box = world.player.bounds();
        let player_center = world.player.center();

        for asteroid in self.asteroids.iter_mut().filter(|a| a.is_alive()) {
            if !world.player.is_alive() {
                break;
            }
            if player_box.overlaps(&asteroid.bounds()) {
                asteroid.destroy();
                audio.play_explosion();
                let center = asteroid.center();
                world.spawn_burst(center, 10, 150.0);

                if let Some(shield) = self.shield.as_mut().filter(|s| s.charges > 0) {
                    shield.charges -= 1;
                    if shield.charges == 0 {
                        self.shield = None;
                    }
                    world.add_score((self.tuning.shield_score * self.multiplier) as u64);
                    world.events.push(GameEvent::AsteroidDestroyed {
                        pos: center,
                        shielded: true,
                    });
                } else {
                    world.player.take_damage(1);
                    self.combo = 0;
                    self.combo_timer = 0.0;
                    self.multiplier = 1.0;
                    world.events.push(GameEvent::AsteroidDestroyed {
                        pos: center,
                        shielded: false,
                    });
                    world.events.push(GameEvent::PlayerHit {
                        health: world.player.health,
                    });
                }
                continue;
            }

            if !asteroid.close_call {
                let distance = asteroid.center().distance(player_center);
                if distance > self.tuning.close_call_min && distance < self.tuning.close_call_max {
                    asteroid.close_call = true;
                    self.combo += 1;
                    self.combo_timer = self.tuning.combo_timeout;
                    self.multiplier = 1.0 + self.combo as f32 * 0.1;
                    world.add_score((self.tuning.close_call_score * self.multiplier) as u64);
                    world.events.push(GameEvent::CloseCall { combo: self.combo });
                }
            }
        }

        for power_up in self.power_ups.iter_mut().filter(|p| p.is_alive()) {
            if !world.player.is_alive() || !player_box.overlaps(&power_up.bounds()) {
                continue;
            }
            power_up.collect();
            audio.play_powerup();
            world.events.push(GameEvent::PowerUpCollected { kind: power_up.kind });
            match power_up.kind {
                PowerUpKind::Shield => {
                    self.shield = Some(Shield {
                        timer: self.tuning.shield_duration,
                        charges: self.tuning.shield_charges,
                    })
                }
                PowerUpKind::SlowMotion => {
                    self.slow_motion_timer = self.tuning.slow_motion_duration
                }
                PowerUpKind::ScoreMultiplier => {
                    self.multiplier += 1.0;
                    self.combo_timer = self.tuning.combo_timeout;
                }
            }
            log::debug!("Power-up collected: {:?}", power_up.kind);
        }
    }

    pub fn compact(&mut self) {
        self.asteroids.retain(|a| a.is_alive());
        self.power_ups.retain(|p| p.is_alive());
    }

    fn survived_all_waves(&self, world: &World) -> bool {
        world.wave >= self.tuning.victory_wave
    }

    pub fn outcome(&self, world: &World) -> Option<GamePhase> {
        if !world.player.is_alive() {
            Some(GamePhase::GameOver)
        } else if self.survived_all_waves(world) {
            Some(GamePhase::Victory)
        } else {
            None
        }
    }

    pub fn victory_message(&self, world: &World) -> Option<String> {
        self.survived_all_waves(world)
            .then(|| format!("INCREDIBLE! You survived {} waves!", world.wave))
    }

    pub fn extend_hud(&self, lines: &mut Vec<String>) {
        if self.combo > 0 {
            lines.push(format!("COMBO x{}", self.combo));
        }
        if self.combo > 0 || self.multiplier > 1.0 {
            lines.push(format!("Multiplier: x{:.1}", self.multiplier));
        }
        if let Some(shield) = self.shield {
            lines.push(format!("SHIELD: {}s ({})", shield.timer as u32, shield.charges));
        }
        if self.slow_motion_timer > 0.0 {
            lines.push(format!("SLOW-MO: {}s", self.slow_motion_timer as u32));
        }
        lines.push(format!("HELL: x{:.1}", self.scheduler.difficulty()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CountingAudio;

    fn start() -> (World, AsteroidDodgerMode) {
        let mut world = World::new(33);
        let mode = AsteroidDodgerMode::new(AsteroidTuning::default(), &mut world);
        (world, mode)
    }

    /// An asteroid whose centre sits at `offset` from the player's centre
    fn asteroid_near(world: &World, offset: Vec2, kind: AsteroidKind) -> Asteroid {
        let size = 30.0;
        let pos = world.player.center() + offset - Vec2::splat(size / 2.0);
        Asteroid::new(pos, Vec2::ZERO, size, kind)
    }

    #[test]
    fn test_difficulty_after_fifteen_seconds() {
        let (mut world, mut mode) = start();
        for _ in 0..901 {
            mode.advance(&mut world, SIM_DT);
        }
        let d = mode.scheduler.difficulty();
        assert!((d - 1.08_f32.powf(15.0)).abs() < 0.02, "got {d}");
        assert_eq!(world.wave, 2);
    }

    #[test]
    fn test_interval_reaches_floor() {
        let (mut world, mut mode) = start();
        for _ in 0..(45 * 60) {
            mode.advance(&mut world, SIM_DT);
            mode.asteroids.clear();
        }
        assert_eq!(mode.scheduler.interval(), 0.08);
    }

    #[test]
    fn test_kind_weights_shift_with_wave() {
        assert_eq!(AsteroidKind::from_roll(0.9, 1), AsteroidKind::Straight);
        assert_eq!(AsteroidKind::from_roll(0.9, 3), AsteroidKind::Spinning);
        assert_eq!(AsteroidKind::from_roll(0.8, 6), AsteroidKind::Homing);
        assert_eq!(AsteroidKind::from_roll(0.99, 9), AsteroidKind::Bouncing);
    }

    #[test]
    fn test_hit_without_shield_costs_health_and_combo() {
        let (mut world, mut mode) = start();
        mode.combo = 4;
        mode.multiplier = 1.4;
        let a = asteroid_near(&world, Vec2::ZERO, AsteroidKind::Straight);
        mode.asteroids.push(a);
        let mut audio = CountingAudio::default();
        mode.resolve(&mut world, &mut audio);
        assert_eq!(world.player.health, PLAYER_MAX_HEALTH - 1);
        assert_eq!(mode.combo, 0);
        assert_eq!(mode.multiplier, 1.0);
        assert!(!mode.asteroids[0].is_alive());
        assert_eq!(audio.explosion, 1);
    }

    #[test]
    fn test_shield_absorbs_limited_hits() {
        let (mut world, mut mode) = start();
        mode.shield = Some(Shield {
            timer: 5.0,
            charges: 2,
        });
        for expected_score in [50, 100] {
            let a = asteroid_near(&world, Vec2::ZERO, AsteroidKind::Straight);
            mode.asteroids.push(a);
            mode.resolve(&mut world, &mut CountingAudio::default());
            assert_eq!(world.score, expected_score);
            assert_eq!(world.player.health, PLAYER_MAX_HEALTH);
        }
        assert!(mode.shield.is_none());

        let a = asteroid_near(&world, Vec2::ZERO, AsteroidKind::Straight);
        mode.asteroids.push(a);
        mode.resolve(&mut world, &mut CountingAudio::default());
        assert_eq!(world.player.health, PLAYER_MAX_HEALTH - 1);
    }

    #[test]
    fn test_close_call_counts_once_per_asteroid() {
        let (mut world, mut mode) = start();
        let a = asteroid_near(&world, Vec2::new(65.0, 0.0), AsteroidKind::Straight);
        mode.asteroids.push(a);
        mode.resolve(&mut world, &mut CountingAudio::default());
        mode.resolve(&mut world, &mut CountingAudio::default());
        assert_eq!(mode.combo, 1);
        assert!((mode.multiplier - 1.1).abs() < 1e-6);
        assert_eq!(world.score, 5);
        assert_eq!(world.player.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_far_asteroid_is_not_a_close_call() {
        let (mut world, mut mode) = start();
        let a = asteroid_near(&world, Vec2::new(0.0, 90.0), AsteroidKind::Straight);
        mode.asteroids.push(a);
        mode.resolve(&mut world, &mut CountingAudio::default());
        assert_eq!(mode.combo, 0);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_combo_times_out() {
        let (_, mut mode) = start();
        mode.combo = 2;
        mode.multiplier = 1.2;
        mode.combo_timer = 0.1;
        mode.tick_timers(0.2);
        assert_eq!(mode.combo, 0);
        assert_eq!(mode.multiplier, 1.0);
    }

    #[test]
    fn test_slow_motion_halves_asteroid_motion() {
        let (mut world, mut mode) = start();
        let mut a = Asteroid::new(
            Vec2::new(100.0, 400.0),
            Vec2::new(0.0, -120.0),
            30.0,
            AsteroidKind::Straight,
        );
        a.close_call = true;
        mode.asteroids.push(a);
        mode.slow_motion_timer = 2.0;
        mode.advance(&mut world, 0.1);
        let moved = 400.0 - mode.asteroids[0].pos.y;
        assert!((moved - 6.0).abs() < 1e-3, "moved {moved}");
    }

    #[test]
    fn test_power_up_effects() {
        let (mut world, mut mode) = start();
        let mut audio = CountingAudio::default();
        for kind in PowerUpKind::ALL {
            mode.power_ups.push(PowerUp::new(world.player.pos, kind, 10.0));
        }
        mode.resolve(&mut world, &mut audio);
        assert_eq!(audio.powerup, 3);
        assert!(mode.shield.is_some());
        assert!(mode.slow_motion_timer > 0.0);
        assert_eq!(mode.multiplier, 2.0);
        assert_eq!(mode.time_scale(), 0.5);
    }

    #[test]
    fn test_power_up_expires() {
        let mut p = PowerUp::new(Vec2::new(100.0, 100.0), PowerUpKind::Shield, 10.0);
        for _ in 0..601 {
            p.update(SIM_DT);
        }
        assert!(!p.is_alive());
    }

    #[test]
    fn test_bouncing_reflects_only_outward() {
        let mut entering = Asteroid::new(
            Vec2::new(-40.0, 200.0),
            Vec2::new(100.0, 0.0),
            30.0,
            AsteroidKind::Bouncing,
        );
        entering.update(0.01, Vec2::ZERO, 12.0);
        assert!(entering.vel.x > 0.0);

        let mut leaving = Asteroid::new(
            Vec2::new(0.5, 200.0),
            Vec2::new(-100.0, 0.0),
            30.0,
            AsteroidKind::Bouncing,
        );
        leaving.update(0.01, Vec2::ZERO, 12.0);
        assert!(leaving.vel.x > 0.0);

        leaving.update(12.0, Vec2::ZERO, 12.0);
        assert!(!leaving.is_alive());
    }

    #[test]
    fn test_homing_speed_is_clamped() {
        let mut a = Asteroid::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(240.0, 0.0),
            30.0,
            AsteroidKind::Homing,
        );
        for _ in 0..120 {
            a.update(SIM_DT, Vec2::new(600.0, 0.0), 12.0);
        }
        assert!(a.vel.length() <= HOMING_MAX_SPEED + 1e-3);
    }

    #[test]
    fn test_free_flight_accelerates_and_clamps() {
        let (mut world, mut mode) = start();
        let input = TickInput {
            move_right: true,
            move_up: true,
            ..Default::default()
        };
        let start_pos = world.player.pos;
        for _ in 0..60 {
            mode.control_player(&mut world, &input, SIM_DT);
        }
        assert!(world.player.pos.x > start_pos.x);
        assert!(world.player.pos.y > start_pos.y);
        assert!(mode.velocity.length() <= 400.0);
    }

    #[test]
    fn test_victory_at_wave_ten() {
        let (mut world, mode) = start();
        world.wave = 10;
        assert_eq!(mode.outcome(&world), Some(GamePhase::Victory));
        assert!(mode.victory_message(&world).is_some());
    }
}
