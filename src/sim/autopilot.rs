//! Scripted play for demo / headless runs
//!
//! Reads the state and produces the same logical actions a player would.
//! Deterministic: no RNG, no hidden state.

use glam::Vec2;

use super::entity::{BulletOwner, Entity};
use super::modes::ModeState;
use super::modes::asteroid_dodger::AsteroidDodgerMode;
use super::modes::flappy::FlappyMode;
use super::state::{GameState, World};
use super::tick::TickInput;
use crate::consts::*;

/// Horizontal distance treated as "lined up"
const DEADBAND: f32 = 4.0;
/// Boss bullets closer than this (and below this height) are dodged
const DODGE_RANGE: f32 = 60.0;
const DODGE_HEIGHT: f32 = 220.0;
/// Asteroids inside this radius push the ship away
const THREAT_RADIUS: f32 = 160.0;

/// Choose the input for the next tick
pub fn autopilot_input(state: &GameState) -> TickInput {
    if state.is_over() {
        return TickInput::default();
    }
    let world = &state.world;
    match &state.mode {
        ModeState::Arcade(_) => lane(world, lowest_enemy_x(world), &[]),
        ModeState::BossRush(m) => {
            let target = m
                .boss
                .is_targetable()
                .then(|| m.boss.pos.x + m.boss.size.x / 2.0);
            let threats: Vec<Vec2> = m
                .boss
                .bullets
                .iter()
                .filter(|b| b.is_alive() && b.owner == BulletOwner::Boss)
                .map(|b| b.pos)
                .collect();
            lane(world, target, &threats)
        }
        ModeState::AsteroidDodger(m) => free(world, m),
        ModeState::Flappy(m) => flap(world, m),
    }
}

fn lowest_enemy_x(world: &World) -> Option<f32> {
    world
        .live_enemies()
        .filter(|e| e.is_targetable())
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|e| e.center().x)
}

fn steer(input: &mut TickInput, from: f32, to: f32) {
    if to < from - DEADBAND {
        input.move_left = true;
    } else if to > from + DEADBAND {
        input.move_right = true;
    }
}

/// Track a target column, sidestep incoming fire, always shoot
fn lane(world: &World, target_x: Option<f32>, threats: &[Vec2]) -> TickInput {
    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };
    let center = world.player.center();

    let incoming = threats
        .iter()
        .filter(|p| p.y < DODGE_HEIGHT && (p.x - center.x).abs() < DODGE_RANGE)
        .min_by(|a, b| a.y.total_cmp(&b.y));
    if let Some(bullet) = incoming {
        // Run away from the bullet, toward the roomier side if it is dead centre
        let roomier_left = bullet.x == center.x && center.x > SCREEN_WIDTH / 2.0;
        let away = if bullet.x > center.x || roomier_left {
            -1.0
        } else {
            1.0
        };
        input.move_left = away < 0.0;
        input.move_right = away > 0.0;
        return input;
    }

    if let Some(x) = target_x {
        steer(&mut input, center.x, x);
    }
    input
}

/// Inverse-square repulsion from nearby asteroids, weak pull to mid-screen,
/// and a detour to grab power-ups when nothing is close
fn free(world: &World, mode: &AsteroidDodgerMode) -> TickInput {
    let center = world.player.center();
    let mut push = Vec2::ZERO;
    for asteroid in mode.asteroids.iter().filter(|a| a.is_alive()) {
        let offset = center - asteroid.center();
        let d = offset.length().max(1.0);
        if d < THREAT_RADIUS + asteroid.size / 2.0 {
            push += offset / (d * d) * 1000.0;
        }
    }

    let mut desired = if push.length_squared() > 0.01 {
        push
    } else if let Some(p) = mode.power_ups.iter().find(|p| p.is_alive()) {
        p.bounds().center() - center
    } else {
        Vec2::ZERO
    };
    let home = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) / 2.0;
    desired += (home - center) * 0.01;

    TickInput {
        move_left: desired.x < -0.5,
        move_right: desired.x > 0.5,
        move_up: desired.y > 0.5,
        move_down: desired.y < -0.5,
        ..Default::default()
    }
}

/// Keep the ship's centre just under the next gap's centre and flap to climb
fn flap(world: &World, mode: &FlappyMode) -> TickInput {
    let player_x = world.player.pos.x;
    let target_y = mode
        .obstacles
        .iter()
        .filter(|o| o.is_alive() && o.x + o.width >= player_x)
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|o| o.gap_y)
        .unwrap_or(SCREEN_HEIGHT / 2.0);

    let y = world.player.center().y;
    TickInput {
        flap: y < target_y - 10.0 && mode.velocity_y <= 0.0,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::sim::entity::{Bullet, Enemy};
    use crate::sim::modes::ModeKind;
    use crate::sim::state::GamePhase;
    use crate::sim::tick::tick;
    use crate::tuning::Tuning;

    #[test]
    fn test_lane_tracks_lowest_enemy() {
        let mut state = GameState::new(ModeKind::Classic, 1, &Tuning::default());
        let id = state.world.next_entity_id();
        state
            .world
            .enemies
            .push(Enemy::normal(id, Vec2::new(20.0, 200.0), 10.0));
        let id = state.world.next_entity_id();
        state
            .world
            .enemies
            .push(Enemy::normal(id, Vec2::new(500.0, 400.0), 10.0));
        let input = autopilot_input(&state);
        assert!(input.fire);
        assert!(input.move_left);
        assert!(!input.move_right);
    }

    #[test]
    fn test_boss_rush_dodges_incoming_bullet() {
        let mut state = GameState::new(ModeKind::BossRush, 1, &Tuning::default());
        let center = state.world.player.center();
        if let ModeState::BossRush(m) = &mut state.mode {
            m.boss
                .bullets
                .push(Bullet::boss(center + Vec2::new(10.0, 60.0), Vec2::new(0.0, -200.0), 1.0));
        }
        let input = autopilot_input(&state);
        assert!(input.move_left);
    }

    #[test]
    fn test_flap_climbs_toward_gap() {
        let mut state = GameState::new(ModeKind::Flappy, 1, &Tuning::default());
        state.world.player.pos.y = 50.0;
        assert!(autopilot_input(&state).flap);
        state.world.player.pos.y = 400.0;
        assert!(!autopilot_input(&state).flap);
    }

    #[test]
    fn test_game_over_yields_idle_input() {
        let mut state = GameState::new(ModeKind::Classic, 1, &Tuning::default());
        state.phase = GamePhase::GameOver;
        assert_eq!(autopilot_input(&state), TickInput::default());
    }

    #[test]
    fn test_autopilot_plays_every_mode() {
        for kind in ModeKind::ALL {
            let mut state = GameState::new(kind, 2024, &Tuning::default());
            for _ in 0..(20 * 60) {
                let input = autopilot_input(&state);
                tick(&mut state, &input, SIM_DT, &mut NullAudio);
                if state.is_over() {
                    break;
                }
            }
            assert!(state.time_ticks > 0, "{kind:?}");
        }
    }
}
