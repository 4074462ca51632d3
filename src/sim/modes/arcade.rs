//! Classic, Survival and TimeAttack
//!
//! The three arcade modes share one rule engine and differ only in their
//! [`ArcadeRules`] (kill score, wave threshold, interval formula, enemy
//! health, bullet scaling and the optional clock).

use glam::Vec2;

use super::ModeKind;
use crate::audio::AudioSink;
use crate::consts::*;
use crate::sim::collision;
use crate::sim::entity::{Enemy, EnemyEvent, Entity, Upgrade};
use crate::sim::spawn::{self, SpawnKind, SpawnScheduler};
use crate::sim::state::{GameEvent, GamePhase, World};
use crate::tuning::ArcadeRules;

#[derive(Debug, Clone)]
pub struct ArcadeMode {
    pub kind: ModeKind,
    pub rules: ArcadeRules,
    pub scheduler: SpawnScheduler,
    /// Remaining clock in seconds (TimeAttack only)
    pub time_left: Option<f32>,
}

/// True when going from `before` to `after` crossed a multiple of `step`
fn crossed_multiple(before: u64, after: u64, step: u64) -> bool {
    step > 0 && after / step > before / step
}

impl ArcadeMode {
    pub fn new(kind: ModeKind, rules: ArcadeRules) -> Self {
        let mut scheduler = SpawnScheduler::new(rules.curve(), rules.interval_rule());
        if rules.starting_difficulty_bonus > 0.0 {
            scheduler.add_difficulty(rules.starting_difficulty_bonus);
        }
        Self {
            kind,
            time_left: rules.time_limit,
            rules,
            scheduler,
        }
    }

    pub fn is_time_up(&self) -> bool {
        matches!(self.time_left, Some(t) if t <= 0.0)
    }

    pub fn advance(&mut self, world: &mut World, dt: f32, audio: &mut dyn AudioSink) {
        if let Some(t) = self.time_left.as_mut() {
            let was_running = *t > 0.0;
            *t = (*t - dt).max(0.0);
            if was_running && *t <= 0.0 {
                world.events.push(GameEvent::TimeUp);
            }
        }

        if self.scheduler.advance(dt, 1.0) {
            self.spawn_batch(world);
        }

        let player_center = world.player.center();
        let mut detonations = Vec::new();
        for enemy in &mut world.enemies {
            if let Some(EnemyEvent::Detonated { center }) = enemy.update(dt, player_center) {
                detonations.push(center);
            }
        }
        // Detonation only starts inside the trigger radius, so every blast hits
        for center in detonations {
            audio.play_explosion();
            world.events.push(GameEvent::BomberDetonated { pos: center });
            world.player.take_damage(BOMBER_EXPLOSION_DAMAGE);
            world.events.push(GameEvent::PlayerHit {
                health: world.player.health,
            });
        }

        for upgrade in &mut world.upgrades {
            upgrade.update(dt);
        }
        for particle in &mut world.particles {
            particle.update(dt);
        }
    }

    fn spawn_batch(&mut self, world: &mut World) {
        let count = self.scheduler.batch_size();
        let formation = self.scheduler.pick_formation(count, &mut world.rng);
        let slots = spawn::formation_slots(formation, count, &mut world.rng);
        for pos in slots {
            let kind = self.scheduler.pick_enemy_kind(&mut world.rng);
            let id = world.next_entity_id();
            let enemy = match kind {
                SpawnKind::Normal => Enemy::normal(id, pos, self.rules.normal_health(world.wave)),
                SpawnKind::Scout => Enemy::scout(id, pos),
                SpawnKind::Bomber => Enemy::bomber(id, pos),
            };
            world.enemies.push(enemy);
        }
        log::debug!(
            "Spawned {count} enemies in {formation:?} (difficulty {:.2})",
            self.scheduler.difficulty()
        );
    }

    pub fn resolve(&mut self, world: &mut World, audio: &mut dyn AudioSink) {
        let kills = collision::bullets_vs_enemies(&mut world.bullets, &mut world.enemies);
        for kill in kills {
            audio.play_explosion();
            self.award_kill(world, kill.pos);
        }

        let rams = collision::player_vs_enemies(&mut world.player, &mut world.enemies);
        if rams > 0 {
            audio.play_explosion();
            world.events.push(GameEvent::PlayerHit {
                health: world.player.health,
            });
        }

        let pickups = collision::player_vs_upgrades(&mut world.player, &mut world.upgrades);
        for pickup in pickups {
            if pickup.applied {
                audio.play_powerup();
            }
            world.events.push(GameEvent::UpgradeCollected {
                kind: pickup.kind,
                applied: pickup.applied,
            });
        }
    }

    fn award_kill(&mut self, world: &mut World, pos: Vec2) {
        world.events.push(GameEvent::EnemyKilled { pos });
        world.spawn_burst(pos + Enemy::size() / 2.0, 8, 120.0);

        let before = world.score;
        world.add_score(self.rules.kill_score);

        let chance = self.rules.upgrade_drop_chance;
        if let Some(kind) = collision::roll_upgrade_drop(&world.player, chance, &mut world.rng) {
            let id = world.next_entity_id();
            world.upgrades.push(Upgrade::new(id, pos, kind));
            world.events.push(GameEvent::UpgradeDropped { kind, pos });
        }

        if crossed_multiple(before, world.score, self.rules.wave_score_step) {
            world.advance_wave();
            self.scheduler.add_difficulty(self.rules.difficulty_per_wave);
        }
    }

    pub fn outcome(&self, world: &World) -> Option<GamePhase> {
        if !world.player.is_alive() || self.is_time_up() {
            Some(GamePhase::GameOver)
        } else {
            None
        }
    }

    pub fn extend_hud(&self, lines: &mut Vec<String>) {
        if let Some(t) = self.time_left {
            lines.push(format!("Time: {}s", t.ceil() as u32));
        }
        lines.push(format!("Difficulty: {:.1}", self.scheduler.difficulty()));
    }
}
