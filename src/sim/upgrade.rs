//! Upgrade validity and application policy
//!
//! An upgrade kind is only offered while it would still change the player.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Player;

/// Highest volley width
pub const MAX_BULLET_LEVEL: u8 = 3;
/// Damage multiplier ceiling
pub const MAX_DAMAGE_MULTIPLIER: f32 = 3.0;
/// Multiplier gained per damage upgrade
pub const DAMAGE_STEP: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    BulletLevel,
    Health,
    Damage,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 3] = [
        UpgradeKind::BulletLevel,
        UpgradeKind::Health,
        UpgradeKind::Damage,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::BulletLevel => "bullet",
            UpgradeKind::Health => "health",
            UpgradeKind::Damage => "damage",
        }
    }

    /// Parse a kind name; unknown names yield `None`
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bullet" | "bullet_level" | "bulletlevel" => Some(UpgradeKind::BulletLevel),
            "health" => Some(UpgradeKind::Health),
            "damage" => Some(UpgradeKind::Damage),
            _ => None,
        }
    }

    /// Whether applying this kind would change the player
    pub fn is_valid_for(&self, player: &Player) -> bool {
        match self {
            UpgradeKind::BulletLevel => player.bullet_level < MAX_BULLET_LEVEL,
            UpgradeKind::Health => player.health < player.max_health,
            UpgradeKind::Damage => player.damage_multiplier < MAX_DAMAGE_MULTIPLIER,
        }
    }
}

/// Kinds that would currently change the player, in declaration order
pub fn valid_kinds(player: &Player) -> Vec<UpgradeKind> {
    UpgradeKind::ALL
        .into_iter()
        .filter(|k| k.is_valid_for(player))
        .collect()
}

/// Uniformly pick a valid kind, or `None` when the player is maxed out
pub fn pick_valid(player: &Player, rng: &mut impl Rng) -> Option<UpgradeKind> {
    let kinds = valid_kinds(player);
    if kinds.is_empty() {
        return None;
    }
    Some(kinds[rng.random_range(0..kinds.len())])
}

/// Apply an upgrade; returns false if it was already at its limit
pub fn apply(kind: UpgradeKind, player: &mut Player) -> bool {
    if !kind.is_valid_for(player) {
        return false;
    }
    match kind {
        UpgradeKind::BulletLevel => player.bullet_level += 1,
        UpgradeKind::Health => player.heal(1),
        UpgradeKind::Damage => {
            player.damage_multiplier =
                (player.damage_multiplier + DAMAGE_STEP).min(MAX_DAMAGE_MULTIPLIER)
        }
    }
    log::debug!("Applied upgrade: {}", kind.name());
    true
}
