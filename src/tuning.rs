//! Data-driven game balance
//!
//! Every per-mode constant lives here so a JSON file can rebalance a mode
//! without touching the simulation. `Tuning::default()` is the shipped game.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::SCREEN_HEIGHT;
use crate::error::{Error, Result};
use crate::sim::boss::BossMotion;
use crate::sim::modes::ModeKind;
use crate::sim::spawn::{DifficultyCurve, IntervalRule};

/// Rules shared by Classic, Survival and TimeAttack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeRules {
    /// Score per enemy kill
    pub kill_score: u64,
    /// Wave advances each time the score crosses a multiple of this
    pub wave_score_step: u64,
    pub interval_base: f32,
    pub interval_slope: f32,
    pub interval_min: f32,
    pub interval_max: f32,
    /// Seconds for the difficulty scalar to grow by one
    pub difficulty_period: f32,
    pub starting_difficulty_bonus: f32,
    pub difficulty_per_wave: f32,
    pub normal_health_base: f32,
    pub normal_health_per_wave: f32,
    pub bullet_speed_scale: f32,
    pub bullet_damage_scale: f32,
    pub upgrade_drop_chance: f64,
    /// Countdown that ends the run (TimeAttack)
    pub time_limit: Option<f32>,
}

impl Default for ArcadeRules {
    fn default() -> Self {
        Self::classic()
    }
}

impl ArcadeRules {
    pub fn classic() -> Self {
        Self {
            kill_score: 10,
            wave_score_step: 100,
            interval_base: 2.0,
            interval_slope: 0.1,
            interval_min: 0.5,
            interval_max: 2.0,
            difficulty_period: 30.0,
            starting_difficulty_bonus: 0.0,
            difficulty_per_wave: 0.5,
            normal_health_base: 10.0,
            normal_health_per_wave: 5.0,
            bullet_speed_scale: 1.0,
            bullet_damage_scale: 1.0,
            upgrade_drop_chance: crate::consts::UPGRADE_DROP_CHANCE,
            time_limit: None,
        }
    }

    pub fn survival() -> Self {
        Self {
            kill_score: 15,
            wave_score_step: 150,
            interval_slope: 0.15,
            interval_min: 0.3,
            starting_difficulty_bonus: 0.5,
            normal_health_base: 15.0,
            normal_health_per_wave: 7.0,
            bullet_speed_scale: 1.2,
            bullet_damage_scale: 1.5,
            ..Self::classic()
        }
    }

    pub fn time_attack() -> Self {
        Self {
            kill_score: 20,
            interval_slope: 0.12,
            interval_min: 0.4,
            normal_health_base: 8.0,
            normal_health_per_wave: 4.0,
            bullet_speed_scale: 0.8,
            time_limit: Some(60.0),
            ..Self::classic()
        }
    }

    pub fn curve(&self) -> DifficultyCurve {
        DifficultyCurve::Linear {
            period: self.difficulty_period,
        }
    }

    pub fn interval_rule(&self) -> IntervalRule {
        IntervalRule::Linear {
            base: self.interval_base,
            slope: self.interval_slope,
            min: self.interval_min,
            max: self.interval_max,
        }
    }

    /// Health of a Normal enemy spawned during `wave`
    pub fn normal_health(&self, wave: u32) -> f32 {
        self.normal_health_base + self.normal_health_per_wave * wave as f32
    }

    fn validate(&self, section: &str) -> Result<()> {
        ensure_positive(section, "interval_min", self.interval_min)?;
        ensure_range(section, "interval", self.interval_min, self.interval_max)?;
        ensure_positive(section, "difficulty_period", self.difficulty_period)?;
        ensure(self.wave_score_step > 0, || {
            format!("{section}.wave_score_step must be positive")
        })?;
        ensure_chance(section, "upgrade_drop_chance", self.upgrade_drop_chance)?;
        if let Some(limit) = self.time_limit {
            ensure_positive(section, "time_limit", limit)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossRushTuning {
    pub start_level: u32,
    pub max_level: u32,
    /// Score per boss is `score_per_level * level`
    pub score_per_level: u64,
    pub motion: BossMotion,
}

impl Default for BossRushTuning {
    fn default() -> Self {
        Self {
            start_level: 1,
            max_level: 10,
            score_per_level: 100,
            motion: BossMotion::Sinusoidal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidTuning {
    pub growth_rate: f32,
    pub interval_base: f32,
    pub interval_min: f32,
    pub interval_max: f32,
    pub base_speed: f32,
    pub speed_per_second: f32,
    /// Per-tick lerp factor toward the target speed
    pub speed_lerp: f32,
    pub wave_period: f32,
    pub victory_wave: u32,
    pub player_accel: f32,
    pub player_max_speed: f32,
    /// Velocity retained per 1/60 s
    pub player_friction: f32,
    pub shield_duration: f32,
    pub shield_charges: u32,
    pub shield_score: f32,
    pub slow_motion_duration: f32,
    pub slow_motion_scale: f32,
    pub combo_timeout: f32,
    pub close_call_min: f32,
    pub close_call_max: f32,
    pub close_call_score: f32,
    pub powerup_interval: f32,
    pub powerup_chance: f64,
    pub powerup_lifetime: f32,
    pub bouncing_lifetime: f32,
}

impl Default for AsteroidTuning {
    fn default() -> Self {
        Self {
            growth_rate: 0.08,
            interval_base: 1.5,
            interval_min: 0.08,
            interval_max: 0.3,
            base_speed: 150.0,
            speed_per_second: 8.0,
            speed_lerp: 0.05,
            wave_period: 15.0,
            victory_wave: 10,
            player_accel: 800.0,
            player_max_speed: 400.0,
            player_friction: 0.92,
            shield_duration: 5.0,
            shield_charges: 3,
            shield_score: 50.0,
            slow_motion_duration: 3.0,
            slow_motion_scale: 0.5,
            combo_timeout: 3.0,
            close_call_min: 50.0,
            close_call_max: 80.0,
            close_call_score: 5.0,
            powerup_interval: 8.0,
            powerup_chance: 0.5,
            powerup_lifetime: 10.0,
            bouncing_lifetime: 12.0,
        }
    }
}

impl AsteroidTuning {
    pub fn curve(&self) -> DifficultyCurve {
        DifficultyCurve::Exponential {
            growth_rate: self.growth_rate,
        }
    }

    pub fn interval_rule(&self) -> IntervalRule {
        IntervalRule::Inverse {
            base: self.interval_base,
            min: self.interval_min,
            max: self.interval_max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlappyTuning {
    pub gravity: f32,
    pub flap_strength: f32,
    pub player_x: f32,
    pub obstacle_width: f32,
    pub first_interval: f32,
    pub interval_min: f32,
    pub interval_max: f32,
    pub gap_min: f32,
    pub gap_max: f32,
    /// Gap centre keeps this far from the floor and ceiling
    pub gap_margin: f32,
    pub base_speed: f32,
    pub speed_per_pass: f32,
    pub pass_score: u64,
    pub passes_per_wave: u32,
    pub victory_passes: u32,
    pub pickup_interval: f32,
    pub pickup_chance: f64,
    pub pickup_score: u64,
}

impl Default for FlappyTuning {
    fn default() -> Self {
        Self {
            gravity: -800.0,
            flap_strength: 350.0,
            player_x: 100.0,
            obstacle_width: 60.0,
            first_interval: 2.0,
            interval_min: 1.5,
            interval_max: 2.5,
            gap_min: 120.0,
            gap_max: 180.0,
            gap_margin: 100.0,
            base_speed: 200.0,
            speed_per_pass: 5.0,
            pass_score: 10,
            passes_per_wave: 5,
            victory_passes: 50,
            pickup_interval: 5.0,
            pickup_chance: 0.3,
            pickup_score: 20,
        }
    }
}

/// Balance for every mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    #[serde(default = "ArcadeRules::classic")]
    pub classic: ArcadeRules,
    #[serde(default = "ArcadeRules::survival")]
    pub survival: ArcadeRules,
    #[serde(default = "ArcadeRules::time_attack")]
    pub time_attack: ArcadeRules,
    pub boss_rush: BossRushTuning,
    pub asteroid: AsteroidTuning,
    pub flappy: FlappyTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            classic: ArcadeRules::classic(),
            survival: ArcadeRules::survival(),
            time_attack: ArcadeRules::time_attack(),
            boss_rush: BossRushTuning::default(),
            asteroid: AsteroidTuning::default(),
            flappy: FlappyTuning::default(),
        }
    }
}

impl Tuning {
    /// Arcade rules for an arcade mode, `None` for the others
    pub fn arcade(&self, kind: ModeKind) -> Option<&ArcadeRules> {
        match kind {
            ModeKind::Classic => Some(&self.classic),
            ModeKind::Survival => Some(&self.survival),
            ModeKind::TimeAttack => Some(&self.time_attack),
            ModeKind::BossRush | ModeKind::AsteroidDodger | ModeKind::Flappy => None,
        }
    }

    /// Parse a partial override and validate the result
    ///
    /// The document is merged field by field over the shipped balance, so a
    /// missing field keeps the default of its own section (a partial
    /// `survival` block keeps Survival's values, not Classic's).
    pub fn from_json(json: &str) -> Result<Self> {
        let parse_error = |source: serde_json::Error| Error::Parse {
            what: "tuning",
            source,
        };
        let patch: Value = serde_json::from_str(json).map_err(parse_error)?;
        let mut merged = serde_json::to_value(Self::default()).map_err(parse_error)?;
        merge(&mut merged, patch);
        let tuning: Self = serde_json::from_value(merged).map_err(parse_error)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the modes cannot run with (inverted ranges, zero periods)
    pub fn validate(&self) -> Result<()> {
        self.classic.validate("classic")?;
        self.survival.validate("survival")?;
        self.time_attack.validate("time_attack")?;

        let b = &self.boss_rush;
        ensure(b.start_level >= 1 && b.start_level <= b.max_level, || {
            format!(
                "boss_rush.start_level {} must be in 1..={}",
                b.start_level, b.max_level
            )
        })?;

        let a = &self.asteroid;
        ensure_positive("asteroid", "interval_min", a.interval_min)?;
        ensure_range("asteroid", "interval", a.interval_min, a.interval_max)?;
        ensure_positive("asteroid", "wave_period", a.wave_period)?;
        ensure_positive("asteroid", "powerup_interval", a.powerup_interval)?;
        ensure_positive("asteroid", "slow_motion_scale", a.slow_motion_scale)?;
        ensure_range("asteroid", "close_call", a.close_call_min, a.close_call_max)?;
        ensure_chance("asteroid", "powerup_chance", a.powerup_chance)?;

        let f = &self.flappy;
        ensure_positive("flappy", "interval_min", f.interval_min)?;
        ensure_range("flappy", "interval", f.interval_min, f.interval_max)?;
        ensure_range("flappy", "gap", f.gap_min, f.gap_max)?;
        ensure_range(
            "flappy",
            "gap_margin",
            f.gap_margin,
            SCREEN_HEIGHT - f.gap_margin,
        )?;
        ensure_positive("flappy", "pickup_interval", f.pickup_interval)?;
        ensure_chance("flappy", "pickup_chance", f.pickup_chance)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load tuning, falling back to the shipped balance on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("{err}; using default tuning");
                Self::default()
            }
        }
    }
}

/// Overlay `patch` onto `base`, recursing into objects
fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn ensure(ok: bool, reason: impl FnOnce() -> String) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::Invalid {
            what: "tuning",
            reason: reason(),
        })
    }
}

// Comparisons are written so that NaN fails them

fn ensure_positive(section: &str, name: &str, value: f32) -> Result<()> {
    ensure(value > 0.0, || {
        format!("{section}.{name} must be positive, got {value}")
    })
}

fn ensure_range(section: &str, name: &str, min: f32, max: f32) -> Result<()> {
    ensure(min <= max, || {
        format!("{section}.{name}: min {min} exceeds max {max}")
    })
}

fn ensure_chance(section: &str, name: &str, value: f64) -> Result<()> {
    ensure((0.0..=1.0).contains(&value), || {
        format!("{section}.{name} must be within 0..=1, got {value}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arcade_table() {
        let t = Tuning::default();
        let scores: Vec<u64> = [ModeKind::Classic, ModeKind::Survival, ModeKind::TimeAttack]
            .iter()
            .filter_map(|k| t.arcade(*k))
            .map(|r| r.kill_score)
            .collect();
        assert_eq!(scores, vec![10, 15, 20]);
        assert_eq!(t.survival.wave_score_step, 150);
        assert_eq!(t.time_attack.time_limit, Some(60.0));
        assert!(t.arcade(ModeKind::Flappy).is_none());
    }

    #[test]
    fn test_normal_health_formula() {
        let t = Tuning::default();
        assert_eq!(t.classic.normal_health(1), 15.0);
        assert_eq!(t.survival.normal_health(2), 29.0);
        assert_eq!(t.time_attack.normal_health(3), 20.0);
    }

    #[test]
    fn test_interval_bounds() {
        let rule = ArcadeRules::survival().interval_rule();
        assert_eq!(rule.interval(0.0), 2.0);
        assert_eq!(rule.interval(100.0), 0.3);
    }

    #[test]
    fn test_partial_json_overrides_one_section() {
        let t = Tuning::from_json(r#"{ "flappy": { "gravity": -600.0 } }"#).unwrap();
        assert_eq!(t.flappy.gravity, -600.0);
        assert_eq!(t.flappy.flap_strength, 350.0);
        assert_eq!(t.classic, ArcadeRules::classic());
    }

    #[test]
    fn test_partial_arcade_override_keeps_section_defaults() {
        let t = Tuning::from_json(r#"{ "classic": { "kill_score": 5 } }"#).unwrap();
        assert_eq!(t.classic.kill_score, 5);
        assert_eq!(
            t.classic,
            ArcadeRules {
                kill_score: 5,
                ..ArcadeRules::classic()
            }
        );
        assert_eq!(t.survival, ArcadeRules::survival());
        assert_eq!(t.time_attack, ArcadeRules::time_attack());
        assert_eq!(t.flappy, FlappyTuning::default());

        let t = Tuning::from_json(r#"{ "survival": { "interval_min": 0.4 } }"#).unwrap();
        assert_eq!(t.survival.interval_min, 0.4);
        assert_eq!(t.survival.kill_score, 15);
        assert_eq!(t.survival.bullet_damage_scale, 1.5);
    }

    #[test]
    fn test_time_limit_can_be_set_and_cleared() {
        let t = Tuning::from_json(
            r#"{ "classic": { "time_limit": 30.0 }, "time_attack": { "time_limit": null } }"#,
        )
        .unwrap();
        assert_eq!(t.classic.time_limit, Some(30.0));
        assert_eq!(t.time_attack.time_limit, None);
    }

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad = [
            r#"{ "flappy": { "interval_min": 3.0, "interval_max": 2.0 } }"#,
            r#"{ "flappy": { "gap_min": 200.0, "gap_max": 150.0 } }"#,
            r#"{ "flappy": { "gap_margin": 300.0 } }"#,
            r#"{ "flappy": { "pickup_chance": 1.5 } }"#,
            r#"{ "asteroid": { "interval_min": 0.5, "interval_max": 0.3 } }"#,
            r#"{ "asteroid": { "wave_period": 0.0 } }"#,
            r#"{ "classic": { "difficulty_period": -1.0 } }"#,
            r#"{ "survival": { "wave_score_step": 0 } }"#,
            r#"{ "time_attack": { "time_limit": 0.0 } }"#,
            r#"{ "boss_rush": { "start_level": 11 } }"#,
        ];
        for json in bad {
            let err = Tuning::from_json(json).unwrap_err();
            assert!(matches!(err, Error::Invalid { what: "tuning", .. }), "{json}");
        }
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "space_signal_tuning_test_{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "flappy": { "gap_min": 200.0, "gap_max": 150.0 } }"#).unwrap();
        let loaded = Tuning::load(&path);
        let fallback = Tuning::load_or_default(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(loaded, Err(Error::Invalid { .. })));
        assert_eq!(fallback, Tuning::default());
    }

    #[test]
    fn test_unreadable_file_falls_back() {
        let t = Tuning::load_or_default(Path::new("/no/such/tuning.json"));
        assert_eq!(t, Tuning::default());
    }
}
