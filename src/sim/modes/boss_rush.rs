//! Boss Rush: one live boss at a time, levels 1 through 10

use crate::audio::AudioSink;
use crate::sim::boss::Boss;
use crate::sim::collision;
use crate::sim::entity::Entity;
use crate::sim::state::{GameEvent, GamePhase, World};
use crate::tuning::BossRushTuning;

#[derive(Debug, Clone)]
pub struct BossRushMode {
    pub tuning: BossRushTuning,
    pub boss: Boss,
    /// Level of the current (or, after victory, the next) boss
    pub level: u32,
    victory: bool,
}

impl BossRushMode {
    pub fn new(tuning: BossRushTuning, world: &mut World) -> Self {
        let level = tuning.start_level.max(1);
        let boss = Boss::new(level, tuning.motion, &mut world.rng);
        log::info!("Boss level {level} spawned");
        world.events.push(GameEvent::BossSpawned { level });
        Self {
            tuning,
            boss,
            level,
            victory: false,
        }
    }

    pub fn is_victory(&self) -> bool {
        self.victory
    }

    pub fn advance(&mut self, world: &mut World, dt: f32, audio: &mut dyn AudioSink) {
        if self.victory {
            return;
        }
        self.boss.update(dt, &mut world.rng, audio);

        if self.boss.is_destroyed() {
            let defeated = self.level;
            world.add_score(self.tuning.score_per_level * defeated as u64);
            world.events.push(GameEvent::BossDefeated { level: defeated });
            log::info!("Boss level {defeated} defeated");

            self.level += 1;
            if self.level > self.tuning.max_level {
                self.victory = true;
            } else {
                world.advance_wave();
                self.boss = Boss::new(self.level, self.tuning.motion, &mut world.rng);
                world.events.push(GameEvent::BossSpawned { level: self.level });
                log::info!("Boss level {} spawned", self.level);
            }
        }

        for particle in &mut world.particles {
            particle.update(dt);
        }
    }

    pub fn resolve(&mut self, world: &mut World, audio: &mut dyn AudioSink) {
        if !self.boss.is_targetable() {
            return;
        }

        let hits = collision::boss_bullets_vs_player(&mut self.boss.bullets, &mut world.player);
        if hits > 0 {
            world.events.push(GameEvent::PlayerHit {
                health: world.player.health,
            });
        }

        let result = collision::bullets_vs_boss(&mut world.bullets, &mut self.boss);
        if result.defeated {
            audio.play_explosion();
            world.events.push(GameEvent::BossExploding { level: self.level });
        }
    }

    pub fn compact(&mut self) {
        self.boss.bullets.retain(|b| b.is_alive());
    }

    pub fn outcome(&self, world: &World) -> Option<GamePhase> {
        if !world.player.is_alive() {
            Some(GamePhase::GameOver)
        } else if self.victory {
            Some(GamePhase::Victory)
        } else {
            None
        }
    }

    pub fn victory_message(&self) -> Option<String> {
        self.victory
            .then(|| "VICTORY! You defeated all bosses!".to_string())
    }

    pub fn extend_hud(&self, lines: &mut Vec<String>) {
        lines.push(format!("Boss Level: {}", self.level.min(self.tuning.max_level)));
        if self.boss.is_exploding() {
            lines.push("BOSS EXPLODING!".to_string());
        } else if self.boss.is_targetable() {
            lines.push(format!(
                "Boss HP: {:.0}/{:.0} ({:.0}%)",
                self.boss.health.max(0.0),
                self.boss.max_health,
                self.boss.health_fraction() * 100.0
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CountingAudio;
    use crate::consts::SIM_DT;
    use crate::sim::entity::Bullet;
    use glam::Vec2;

    fn start(tuning: BossRushTuning) -> (World, BossRushMode) {
        let mut world = World::new(21);
        let mode = BossRushMode::new(tuning, &mut world);
        (world, mode)
    }

    fn kill_boss(world: &mut World, mode: &mut BossRushMode, audio: &mut CountingAudio) {
        let target = mode.boss.pos + mode.boss.size / 2.0;
        world
            .bullets
            .push(Bullet::player(target, Vec2::ZERO, mode.boss.max_health + 1.0));
        mode.resolve(world, audio);
        assert!(mode.boss.is_exploding());
        for _ in 0..120 {
            mode.advance(world, SIM_DT, audio);
        }
    }

    #[test]
    fn test_destroyed_boss_awards_level_score_and_advances() {
        let (mut world, mut mode) = start(BossRushTuning::default());
        let mut audio = CountingAudio::default();
        kill_boss(&mut world, &mut mode, &mut audio);
        assert_eq!(world.score, 100);
        assert_eq!(mode.level, 2);
        assert_eq!(mode.boss.level, 2);
        assert!(mode.boss.is_targetable());
        assert_eq!(audio.explosion, 1);
    }

    #[test]
    fn test_victory_after_max_level() {
        let tuning = BossRushTuning {
            start_level: 2,
            max_level: 2,
            ..BossRushTuning::default()
        };
        let (mut world, mut mode) = start(tuning);
        kill_boss(&mut world, &mut mode, &mut CountingAudio::default());
        assert!(mode.is_victory());
        assert_eq!(world.score, 200);
        assert_eq!(mode.outcome(&world), Some(GamePhase::Victory));
        assert!(mode.victory_message().is_some());
    }

    #[test]
    fn test_exploding_boss_ignores_bullets() {
        let (mut world, mut mode) = start(BossRushTuning::default());
        let mut audio = CountingAudio::default();
        mode.boss.take_damage(mode.boss.max_health);
        let target = mode.boss.pos + mode.boss.size / 2.0;
        world.bullets.push(Bullet::player(target, Vec2::ZERO, 50.0));
        mode.resolve(&mut world, &mut audio);
        assert!(world.bullets[0].is_alive());
        assert_eq!(audio.explosion, 0);
    }

    #[test]
    fn test_boss_bullet_kills_player() {
        let (mut world, mut mode) = start(BossRushTuning::default());
        let pos = world.player.pos;
        let damage = mode.boss.bullet_damage();
        mode.boss.bullets.push(Bullet::boss(pos, Vec2::ZERO, damage));
        mode.resolve(&mut world, &mut CountingAudio::default());
        assert!(!world.player.is_alive());
        assert_eq!(mode.outcome(&world), Some(GamePhase::GameOver));
    }
}
