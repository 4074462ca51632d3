//! Collision detection and response
//!
//! Everything collides as an axis-aligned rectangle. Overlap is inclusive:
//! rectangles that merely touch along an edge count as colliding.
//!
//! Each resolver walks both collections in insertion order and only flips
//! `alive` flags; nothing is removed until the end-of-tick compaction, so
//! indices stay valid for the whole pass.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::entity::{Bullet, Enemy, Entity, Player, Upgrade};
use super::upgrade::{self, UpgradeKind};

/// Axis-aligned rectangle (bottom-left corner plus size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Inclusive AABB overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.x + other.w
            && other.x <= self.x + self.w
            && self.y <= other.y + other.h
            && other.y <= self.y + self.h
    }
}

/// An enemy destroyed by a player bullet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kill {
    pub enemy_id: u32,
    /// Enemy position at the moment of death (upgrade drop point)
    pub pos: Vec2,
}

/// Player bullets against enemies
///
/// Each bullet hits at most one enemy: the first live, targetable enemy in
/// collection order. Bullets are consumed on any hit, killing or not.
pub fn bullets_vs_enemies(bullets: &mut [Bullet], enemies: &mut [Enemy]) -> Vec<Kill> {
    let mut kills = Vec::new();
    for bullet in bullets.iter_mut().filter(|b| b.is_alive()) {
        let bullet_box = bullet.bounds();
        for enemy in enemies.iter_mut() {
            if !enemy.is_targetable() || !bullet_box.overlaps(&enemy.bounds()) {
                continue;
            }
            bullet.destroy();
            if enemy.take_damage(bullet.damage) {
                kills.push(Kill {
                    enemy_id: enemy.id,
                    pos: enemy.pos,
                });
            }
            break;
        }
    }
    kills
}

/// Player body against enemies
///
/// Every overlapping enemy costs the player one health and is destroyed
/// outright. Returns the number of collisions; these never score.
pub fn player_vs_enemies(player: &mut Player, enemies: &mut [Enemy]) -> u32 {
    if !player.is_alive() {
        return 0;
    }
    let mut hits = 0;
    let player_box = player.bounds();
    for enemy in enemies.iter_mut() {
        if !enemy.is_targetable() || !player_box.overlaps(&enemy.bounds()) {
            continue;
        }
        hits += 1;
        player.take_damage(1);
        enemy.force_kill();
        if !player.is_alive() {
            break;
        }
    }
    hits
}

/// Outcome of player bullets striking a boss
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BossHits {
    pub hits: u32,
    /// The boss entered its death explosion during this pass
    pub defeated: bool,
}

/// Player bullets against the boss; ignored while the boss is exploding
pub fn bullets_vs_boss(bullets: &mut [Bullet], boss: &mut Boss) -> BossHits {
    let mut result = BossHits::default();
    for bullet in bullets.iter_mut().filter(|b| b.is_alive()) {
        if !boss.is_targetable() {
            break;
        }
        if bullet.bounds().overlaps(&boss.bounds()) {
            bullet.destroy();
            result.hits += 1;
            if boss.take_damage(bullet.damage) {
                result.defeated = true;
            }
        }
    }
    result
}

/// Boss bullets against the player; damage is rounded to whole health points
pub fn boss_bullets_vs_player(bullets: &mut [Bullet], player: &mut Player) -> u32 {
    let mut hits = 0;
    for bullet in bullets.iter_mut().filter(|b| b.is_alive()) {
        if !player.is_alive() {
            break;
        }
        if bullet.bounds().overlaps(&player.bounds()) {
            bullet.destroy();
            hits += 1;
            player.take_damage(bullet.damage.round().max(0.0) as u32);
        }
    }
    hits
}

/// An upgrade the player touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    pub kind: UpgradeKind,
    /// False when the upgrade was already at its limit (collected as a no-op)
    pub applied: bool,
}

/// Player body against falling upgrades
pub fn player_vs_upgrades(player: &mut Player, upgrades: &mut [Upgrade]) -> Vec<Pickup> {
    let mut pickups = Vec::new();
    if !player.is_alive() {
        return pickups;
    }
    let player_box = player.bounds();
    for item in upgrades.iter_mut().filter(|u| u.is_alive()) {
        if player_box.overlaps(&item.bounds()) {
            item.collect();
            pickups.push(Pickup {
                kind: item.kind,
                applied: upgrade::apply(item.kind, player),
            });
        }
    }
    pickups
}

/// Roll for an upgrade drop at a kill site
///
/// Only kinds that would currently change the player are candidates.
pub fn roll_upgrade_drop(
    player: &Player,
    chance: f64,
    rng: &mut impl Rng,
) -> Option<UpgradeKind> {
    if !rng.random_bool(chance.clamp(0.0, 1.0)) {
        return None;
    }
    upgrade::pick_valid(player, rng)
}
