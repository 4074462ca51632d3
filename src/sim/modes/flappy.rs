//! Flappy: gravity, a flap impulse, and scrolling walls with a gap

use glam::Vec2;
use rand::Rng;

use crate::audio::AudioSink;
use crate::consts::*;
use crate::sim::collision::Rect;
use crate::sim::entity::{Entity, motion};
use crate::sim::state::{GameEvent, GamePhase, World};
use crate::sim::tick::TickInput;
use crate::sim::upgrade::{self, UpgradeKind};
use crate::tuning::FlappyTuning;

const PICKUP_SIZE: f32 = 30.0;
const PICKUP_BOB: f32 = 5.0;
const PICKUP_DESPAWN_X: f32 = -40.0;
const PICKUP_MARGIN: f32 = 80.0;
const OBSTACLE_DESPAWN_X: f32 = -70.0;

/// A wall pair scrolling left; the player must pass through the gap
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Vertical centre of the gap
    pub gap_y: f32,
    pub gap: f32,
    pub width: f32,
    pub passed: bool,
    alive: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_y: f32, gap: f32, width: f32) -> Self {
        Self {
            x,
            gap_y,
            gap,
            width,
            passed: false,
            alive: true,
        }
    }

    pub fn top(&self) -> Rect {
        Rect::new(self.x, self.gap_y + self.gap / 2.0, self.width, SCREEN_HEIGHT)
    }

    pub fn bottom(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_y - self.gap / 2.0)
    }

    pub fn blocks(&self, rect: &Rect) -> bool {
        self.top().overlaps(rect) || self.bottom().overlaps(rect)
    }

    pub fn update(&mut self, dt: f32, speed: f32) {
        self.x -= speed * dt;
        if self.x < OBSTACLE_DESPAWN_X {
            self.alive = false;
        }
    }
}

impl Entity for Obstacle {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, SCREEN_HEIGHT)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Upgrade drifting left with the walls
#[derive(Debug, Clone)]
pub struct Pickup {
    pub pos: Vec2,
    pub kind: UpgradeKind,
    bob_timer: f32,
    alive: bool,
}

impl Pickup {
    pub fn new(pos: Vec2, kind: UpgradeKind) -> Self {
        Self {
            pos,
            kind,
            bob_timer: 0.0,
            alive: true,
        }
    }

    pub fn update(&mut self, dt: f32, speed: f32) {
        self.pos.x -= speed * dt;
        self.bob_timer += dt * 3.0;
        if self.pos.x < PICKUP_DESPAWN_X {
            self.alive = false;
        }
    }

    pub fn collect(&mut self) {
        self.alive = false;
    }
}

impl Entity for Pickup {
    fn bounds(&self) -> Rect {
        let y = motion::oscillate(self.pos.y, PICKUP_BOB, 1.0, self.bob_timer);
        Rect::new(self.pos.x, y, PICKUP_SIZE, PICKUP_SIZE)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

#[derive(Debug, Clone)]
pub struct FlappyMode {
    pub tuning: FlappyTuning,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    pub velocity_y: f32,
    pub passed: u32,
    spawn_timer: f32,
    spawn_interval: f32,
    pickup_timer: f32,
}

impl FlappyMode {
    pub fn new(tuning: FlappyTuning, world: &mut World) -> Self {
        world.player.pos = Vec2::new(tuning.player_x, SCREEN_HEIGHT / 2.0);
        Self {
            spawn_interval: tuning.first_interval,
            tuning,
            obstacles: Vec::new(),
            pickups: Vec::new(),
            velocity_y: 0.0,
            passed: 0,
            spawn_timer: 0.0,
            pickup_timer: 0.0,
        }
    }

    /// Scroll speed, rising with every wall passed
    pub fn speed(&self) -> f32 {
        self.tuning.base_speed + self.tuning.speed_per_pass * self.passed as f32
    }

    pub fn control_player(
        &mut self,
        world: &mut World,
        input: &TickInput,
        dt: f32,
        audio: &mut dyn AudioSink,
    ) {
        let player = &mut world.player;
        if !player.is_alive() {
            return;
        }
        if input.flap {
            self.velocity_y = self.tuning.flap_strength;
            audio.play_shoot();
        }
        self.velocity_y += self.tuning.gravity * dt;
        player.pos.y += self.velocity_y * dt;

        let ceiling = SCREEN_HEIGHT - PLAYER_HEIGHT;
        if player.pos.y >= ceiling {
            player.pos.y = ceiling;
            self.velocity_y = 0.0;
        }
        if player.pos.y <= 0.0 {
            player.pos.y = 0.0;
            self.velocity_y = 0.0;
        }
    }

    pub fn advance(&mut self, world: &mut World, dt: f32) {
        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval {
            self.spawn_obstacle(world);
            self.spawn_timer = 0.0;
            self.spawn_interval = world
                .rng
                .random_range(self.tuning.interval_min..=self.tuning.interval_max);
        }

        let speed = self.speed();
        let player_x = world.player.pos.x;
        for obstacle in &mut self.obstacles {
            obstacle.update(dt, speed);
            if !obstacle.passed && obstacle.x + obstacle.width < player_x {
                obstacle.passed = true;
                self.passed += 1;
                world.add_score(self.tuning.pass_score);
                world.events.push(GameEvent::ObstaclePassed {
                    passed: self.passed,
                });
                let per_wave = self.tuning.passes_per_wave;
                if per_wave > 0 && self.passed % per_wave == 0 {
                    world.advance_wave();
                }
            }
        }

        self.pickup_timer += dt;
        if self.pickup_timer >= self.tuning.pickup_interval
            && world.rng.random_bool(self.tuning.pickup_chance)
        {
            self.spawn_pickup(world);
            self.pickup_timer = 0.0;
        }
        for pickup in &mut self.pickups {
            pickup.update(dt, speed);
        }
        for particle in &mut world.particles {
            particle.update(dt);
        }
    }

    fn spawn_obstacle(&mut self, world: &mut World) {
        let t = &self.tuning;
        let gap = world.rng.random_range(t.gap_min..=t.gap_max);
        let gap_y = world
            .rng
            .random_range(t.gap_margin..=SCREEN_HEIGHT - t.gap_margin);
        self.obstacles
            .push(Obstacle::new(SCREEN_WIDTH, gap_y, gap, t.obstacle_width));
    }

    fn spawn_pickup(&mut self, world: &mut World) {
        let y = world
            .rng
            .random_range(PICKUP_MARGIN..=SCREEN_HEIGHT - PICKUP_MARGIN);
        let kind = if world.rng.random_bool(0.5) {
            UpgradeKind::Health
        } else {
            UpgradeKind::Damage
        };
        self.pickups.push(Pickup::new(Vec2::new(SCREEN_WIDTH, y), kind));
    }

    pub fn resolve(&mut self, world: &mut World, audio: &mut dyn AudioSink) {
        if !world.player.is_alive() {
            return;
        }
        let player_box = world.player.bounds();

        let crashed = world.player.pos.y <= 0.0
            || self
                .obstacles
                .iter()
                .any(|o| o.is_alive() && o.blocks(&player_box));
        if crashed {
            world.player.kill();
            world.events.push(GameEvent::PlayerHit { health: 0 });
            return;
        }

        for pickup in self.pickups.iter_mut().filter(|p| p.is_alive()) {
            if !player_box.overlaps(&pickup.bounds()) {
                continue;
            }
            pickup.collect();
            let applied = upgrade::apply(pickup.kind, &mut world.player);
            world.add_score(self.tuning.pickup_score);
            audio.play_powerup();
            world.events.push(GameEvent::UpgradeCollected {
                kind: pickup.kind,
                applied,
            });
        }
    }

    pub fn compact(&mut self) {
        self.obstacles.retain(|o| o.is_alive());
        self.pickups.retain(|p| p.is_alive());
    }

    fn cleared(&self) -> bool {
        self.passed >= self.tuning.victory_passes
    }

    pub fn outcome(&self, world: &World) -> Option<GamePhase> {
        if !world.player.is_alive() {
            Some(GamePhase::GameOver)
        } else if self.cleared() {
            Some(GamePhase::Victory)
        } else {
            None
        }
    }

    pub fn victory_message(&self) -> Option<String> {
        self.cleared()
            .then(|| format!("AMAZING! You passed {} obstacles!", self.passed))
    }

    pub fn extend_hud(&self, lines: &mut Vec<String>) {
        lines.push(format!(
            "Passed: {}/{}",
            self.passed, self.tuning.victory_passes
        ));
        lines.push(format!("Speed: {:.0}", self.speed()));
        // Pickups only score in this mode
        lines.push(format!("Pickups: +{} score", self.tuning.pickup_score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CountingAudio;

    fn start() -> (World, FlappyMode) {
        let mut world = World::new(9);
        let mode = FlappyMode::new(FlappyTuning::default(), &mut world);
        (world, mode)
    }

    #[test]
    fn test_player_starts_mid_screen() {
        let (world, _) = start();
        assert_eq!(world.player.pos, Vec2::new(100.0, SCREEN_HEIGHT / 2.0));
    }

    #[test]
    fn test_gravity_pulls_down_and_flap_lifts() {
        let (mut world, mut mode) = start();
        let mut audio = CountingAudio::default();
        let y0 = world.player.pos.y;
        mode.control_player(&mut world, &TickInput::default(), 0.1, &mut audio);
        assert!(world.player.pos.y < y0);

        let y1 = world.player.pos.y;
        let flap = TickInput {
            flap: true,
            ..Default::default()
        };
        mode.control_player(&mut world, &flap, 0.1, &mut audio);
        assert!(world.player.pos.y > y1);
        assert_eq!(audio.shoot, 1);
    }

    #[test]
    fn test_ceiling_clamps_without_death() {
        let (mut world, mut mode) = start();
        world.player.pos.y = SCREEN_HEIGHT - PLAYER_HEIGHT - 1.0;
        mode.velocity_y = 500.0;
        mode.control_player(&mut world, &TickInput::default(), 0.1, &mut CountingAudio::default());
        assert_eq!(world.player.pos.y, SCREEN_HEIGHT - PLAYER_HEIGHT);
        assert_eq!(mode.velocity_y, 0.0);
        mode.resolve(&mut world, &mut CountingAudio::default());
        assert!(world.player.is_alive());
    }

    #[test]
    fn test_floor_is_fatal() {
        let (mut world, mut mode) = start();
        world.player.pos.y = 1.0;
        mode.velocity_y = -500.0;
        mode.control_player(&mut world, &TickInput::default(), 0.1, &mut CountingAudio::default());
        mode.resolve(&mut world, &mut CountingAudio::default());
        assert!(!world.player.is_alive());
        assert_eq!(mode.outcome(&world), Some(GamePhase::GameOver));
    }

    #[test]
    fn test_wall_collision_is_fatal() {
        let (mut world, mut mode) = start();
        // Gap well above the player
        mode.obstacles
            .push(Obstacle::new(world.player.pos.x, 400.0, 120.0, 60.0));
        mode.resolve(&mut world, &mut CountingAudio::default());
        assert!(!world.player.is_alive());
    }

    #[test]
    fn test_flying_through_the_gap_is_safe() {
        let (mut world, mut mode) = start();
        let gap_y = world.player.center().y;
        mode.obstacles
            .push(Obstacle::new(world.player.pos.x, gap_y, 150.0, 60.0));
        mode.resolve(&mut world, &mut CountingAudio::default());
        assert!(world.player.is_alive());
    }

    #[test]
    fn test_passing_scores_and_speeds_up() {
        let (mut world, mut mode) = start();
        let before = mode.speed();
        mode.obstacles.push(Obstacle::new(30.0, 240.0, 150.0, 60.0));
        mode.advance(&mut world, SIM_DT);
        assert_eq!(mode.passed, 1);
        assert_eq!(world.score, 10);
        assert!(mode.speed() > before);

        mode.advance(&mut world, SIM_DT);
        assert_eq!(mode.passed, 1);
    }

    #[test]
    fn test_wave_every_five_passes() {
        let (mut world, mut mode) = start();
        for _ in 0..5 {
            mode.obstacles.push(Obstacle::new(0.0, 240.0, 150.0, 60.0));
        }
        mode.advance(&mut world, SIM_DT);
        assert_eq!(mode.passed, 5);
        assert_eq!(world.wave, 2);
    }

    #[test]
    fn test_obstacles_spawn_and_scroll_off() {
        let (mut world, mut mode) = start();
        mode.advance(&mut world, 2.0);
        assert_eq!(mode.obstacles.len(), 1);
        for _ in 0..(5 * 60) {
            mode.advance(&mut world, SIM_DT);
        }
        assert!(!mode.obstacles[0].is_alive());
        mode.compact();
        assert!(mode.obstacles.iter().all(|o| o.x >= OBSTACLE_DESPAWN_X));
    }

    #[test]
    fn test_pickup_heals_and_scores() {
        let (mut world, mut mode) = start();
        world.player.take_damage(1);
        let mut audio = CountingAudio::default();
        mode.pickups
            .push(Pickup::new(world.player.pos, UpgradeKind::Health));
        mode.resolve(&mut world, &mut audio);
        assert_eq!(world.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(world.score, 20);
        assert_eq!(audio.powerup, 1);
    }

    #[test]
    fn test_hud_says_pickups_only_score() {
        let (_, mode) = start();
        let mut lines = Vec::new();
        mode.extend_hud(&mut lines);
        assert_eq!(lines.last().map(String::as_str), Some("Pickups: +20 score"));
    }

    #[test]
    fn test_victory_after_fifty_passes() {
        let (world, mut mode) = start();
        mode.passed = 50;
        assert_eq!(mode.outcome(&world), Some(GamePhase::Victory));
        assert_eq!(
            mode.victory_message().as_deref(),
            Some("AMAZING! You passed 50 obstacles!")
        );
    }
}
