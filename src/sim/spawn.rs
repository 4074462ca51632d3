//! Spawn scheduler
//!
//! Pure time-driven state: the scheduler decides when a batch is due, how
//! large it is, how it is laid out and what each slot becomes. The owning
//! mode inserts the resulting entities into the shared collections.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the difficulty scalar grows with elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DifficultyCurve {
    /// `1 + elapsed / period`
    Linear { period: f32 },
    /// `(1 + growth_rate) ^ elapsed`
    Exponential { growth_rate: f32 },
}

impl DifficultyCurve {
    pub fn at(&self, elapsed: f32) -> f32 {
        match *self {
            DifficultyCurve::Linear { period } => 1.0 + elapsed / period.max(f32::EPSILON),
            DifficultyCurve::Exponential { growth_rate } => (1.0 + growth_rate).powf(elapsed),
        }
    }
}

/// Spawn interval as a clamped, decreasing function of difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IntervalRule {
    /// `clamp(base - slope * difficulty, min, max)`
    Linear {
        base: f32,
        slope: f32,
        min: f32,
        max: f32,
    },
    /// `clamp(base / difficulty, min, max)`
    Inverse { base: f32, min: f32, max: f32 },
}

impl IntervalRule {
    pub fn interval(&self, difficulty: f32) -> f32 {
        match *self {
            IntervalRule::Linear {
                base,
                slope,
                min,
                max,
            } => (base - slope * difficulty).clamp(min, max),
            IntervalRule::Inverse { base, min, max } => {
                (base / difficulty.max(f32::EPSILON)).clamp(min, max)
            }
        }
    }
}

/// Named spatial layouts for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formation {
    SimplePair,
    V,
    Circle,
    ZigZag,
    Diagonal,
    RandomCluster,
}

impl Formation {
    /// Formations drawn for batches larger than a pair
    pub const LARGE: [Formation; 5] = [
        Formation::V,
        Formation::Circle,
        Formation::ZigZag,
        Formation::Diagonal,
        Formation::RandomCluster,
    ];
}

/// Enemy variant chosen for one formation slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    Normal,
    Scout,
    Bomber,
}

/// Weighted draw over `(item, weight)` pairs using cumulative thresholds
///
/// Weights need not sum to one. Returns `None` for an empty or weightless table.
pub fn weighted_pick<T: Copy>(rng: &mut impl Rng, table: &[(T, f32)]) -> Option<T> {
    let total: f32 = table.iter().map(|(_, w)| w.max(0.0)).sum();
    if total <= 0.0 {
        return None;
    }
    let roll = rng.random::<f32>() * total;
    let mut acc = 0.0;
    for &(item, weight) in table {
        acc += weight.max(0.0);
        if roll < acc {
            return Some(item);
        }
    }
    table.iter().rev().find(|(_, w)| *w > 0.0).map(|(item, _)| *item)
}

/// Time-driven batch scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    curve: DifficultyCurve,
    interval_rule: IntervalRule,
    elapsed: f32,
    /// Difficulty added on top of the curve (wave advances, mode bonus)
    bonus: f32,
    difficulty: f32,
    timer: f32,
}

impl SpawnScheduler {
    pub fn new(curve: DifficultyCurve, interval_rule: IntervalRule) -> Self {
        Self {
            curve,
            interval_rule,
            elapsed: 0.0,
            bonus: 0.0,
            difficulty: curve.at(0.0),
            timer: 0.0,
        }
    }

    /// Advance clocks; returns true when a batch is due
    ///
    /// `time_scale` only slows the spawn timer, not the difficulty clock.
    pub fn advance(&mut self, dt: f32, time_scale: f32) -> bool {
        self.elapsed += dt;
        self.difficulty = self
            .difficulty
            .max(self.curve.at(self.elapsed) + self.bonus);
        self.timer += dt * time_scale;
        if self.timer >= self.interval() {
            self.timer = 0.0;
            return true;
        }
        false
    }

    /// Permanently raise difficulty (wave advance)
    pub fn add_difficulty(&mut self, amount: f32) {
        self.bonus += amount;
        self.difficulty += amount;
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn interval(&self) -> f32 {
        self.interval_rule.interval(self.difficulty)
    }

    /// Batch size tiers keyed by difficulty
    pub fn batch_size(&self) -> usize {
        let d = self.difficulty;
        if d < 2.0 {
            2
        } else if d < 3.0 {
            3
        } else if d < 4.0 {
            4
        } else if d < 5.0 {
            6
        } else {
            8 + ((d - 5.0) * 2.0).floor() as usize
        }
    }

    pub fn pick_formation(&self, count: usize, rng: &mut impl Rng) -> Formation {
        if count <= 2 {
            return Formation::SimplePair;
        }
        Formation::LARGE[rng.random_range(0..Formation::LARGE.len())]
    }

    /// Enemy kind weights shift toward bombers once difficulty reaches 2
    pub fn pick_enemy_kind(&self, rng: &mut impl Rng) -> SpawnKind {
        let table: &[(SpawnKind, f32)] = if self.difficulty < 2.0 {
            &[(SpawnKind::Normal, 0.8), (SpawnKind::Scout, 0.2)]
        } else {
            &[
                (SpawnKind::Normal, 0.4),
                (SpawnKind::Scout, 0.3),
                (SpawnKind::Bomber, 0.3),
            ]
        };
        weighted_pick(rng, table).unwrap_or(SpawnKind::Normal)
    }
}

/// Spawn positions for a batch, all at or above the top edge
///
/// x is clamped so every enemy starts fully inside the playfield width.
pub fn formation_slots(formation: Formation, count: usize, rng: &mut impl Rng) -> Vec<Vec2> {
    let w = SCREEN_WIDTH;
    let top = SCREEN_HEIGHT;
    let center_x = w / 2.0;
    let mut slots = Vec::with_capacity(count);

    match formation {
        Formation::SimplePair => {
            if count == 1 {
                slots.push(Vec2::new(rng.random_range(0.0..=w), top));
            } else {
                let spacing = w / 3.0;
                slots.push(Vec2::new(center_x - spacing, top));
                slots.push(Vec2::new(center_x + spacing, top));
            }
        }
        Formation::V => {
            slots.push(Vec2::new(center_x, top));
            let mut rank = 1.0;
            while slots.len() < count {
                let y = top + 30.0 * rank;
                slots.push(Vec2::new(center_x - 50.0 * rank, y));
                if slots.len() < count {
                    slots.push(Vec2::new(center_x + 50.0 * rank, y));
                }
                rank += 1.0;
            }
        }
        Formation::Circle => {
            let radius = 100.0_f32.min(w / 4.0);
            for i in 0..count {
                let angle = i as f32 * TAU / count as f32;
                slots.push(Vec2::new(
                    center_x + radius * angle.cos(),
                    top + radius * angle.sin(),
                ));
            }
        }
        Formation::ZigZag => {
            let spacing = w / (count as f32 + 1.0);
            for i in 0..count {
                let y = if i % 2 == 0 { top } else { top + 40.0 };
                slots.push(Vec2::new((i as f32 + 1.0) * spacing, y));
            }
        }
        Formation::Diagonal => {
            let from_left = rng.random_bool(0.5);
            let spacing = w / (count as f32 + 1.0);
            for i in 0..count {
                let offset = i as f32 * spacing;
                let x = if from_left { offset } else { w - offset };
                slots.push(Vec2::new(x, top + i as f32 * 40.0));
            }
        }
        Formation::RandomCluster => {
            for _ in 0..count {
                slots.push(Vec2::new(
                    rng.random_range(0.0..=w),
                    top + rng.random_range(0.0..=100.0),
                ));
            }
        }
    }

    for slot in &mut slots {
        slot.x = slot.x.clamp(0.0, w - ENEMY_WIDTH);
        slot.y = slot.y.max(top);
    }
    slots
}
