//! Scene emission: game state in, draw commands out

use glam::Vec2;

use super::{Color, DrawCommand, RenderSink, TextCommand, WHITE};
use crate::assets::{AssetRegistry, TextureHandle, TextureKey};
use crate::consts::*;
use crate::sim::collision::Rect;
use crate::sim::entity::{BomberState, Bullet, BulletOwner, EnemyKind, Entity, Particle, Player};
use crate::sim::modes::ModeState;
use crate::sim::modes::asteroid_dodger::PowerUpKind;
use crate::sim::state::{GamePhase, GameState};
use crate::sim::upgrade::UpgradeKind;

const HUD_LINE_HEIGHT: f32 = 18.0;
const HUD_MARGIN: f32 = 10.0;
const BOSS_BAR_HEIGHT: f32 = 6.0;

/// Health colour: green (full) -> yellow -> red (empty)
pub fn health_color(fraction: f32) -> Color {
    let t = fraction.clamp(0.0, 1.0);
    if t > 0.5 {
        let u = (t - 0.5) / 0.5;
        [1.0 - u, 1.0, 0.2, 1.0]
    } else {
        let u = t / 0.5;
        [1.0, u, 0.2, 1.0]
    }
}

fn upgrade_color(kind: UpgradeKind) -> Color {
    match kind {
        UpgradeKind::BulletLevel => [0.3, 0.6, 1.0, 1.0],
        UpgradeKind::Health => [0.2, 1.0, 0.3, 1.0],
        UpgradeKind::Damage => [1.0, 0.5, 0.1, 1.0],
    }
}

fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Shield => [0.3, 0.8, 1.0, 1.0],
        PowerUpKind::SlowMotion => [0.7, 0.4, 1.0, 1.0],
        PowerUpKind::ScoreMultiplier => [1.0, 0.85, 0.1, 1.0],
    }
}

fn quad(texture: TextureHandle, rect: Rect) -> DrawCommand {
    DrawCommand::new(texture, Vec2::new(rect.x, rect.y), Vec2::new(rect.w, rect.h))
}

fn draw_particles(sink: &mut dyn RenderSink, texture: TextureHandle, particles: &[Particle]) {
    for p in particles.iter().filter(|p| !p.is_finished()) {
        let fade = p.fade();
        sink.draw(
            DrawCommand::new(texture, p.pos, Vec2::splat(4.0 * fade + 1.0))
                .tinted([1.0, 0.6, 0.2, fade]),
        );
    }
}

fn draw_bullets(sink: &mut dyn RenderSink, assets: &AssetRegistry, bullets: &[Bullet]) {
    for b in bullets.iter().filter(|b| b.is_alive()) {
        let (key, size) = match b.owner {
            BulletOwner::Player => (TextureKey::Bullet, b.size * b.scale),
            BulletOwner::Boss => (TextureKey::BossBullet, b.size),
        };
        sink.draw(DrawCommand::new(assets.get(key), b.pos, size));
    }
}

fn draw_player(sink: &mut dyn RenderSink, assets: &AssetRegistry, player: &Player, shielded: bool) {
    if !player.is_alive() {
        return;
    }
    let tint = if shielded { [0.5, 0.9, 1.0, 1.0] } else { WHITE };
    let texture = assets.get(TextureKey::Player);
    sink.draw(DrawCommand::new(texture, player.pos, Player::size()).tinted(tint));
}

/// Emit one frame: world entities, mode entities, player, then HUD
pub fn render_scene(state: &GameState, assets: &AssetRegistry, sink: &mut dyn RenderSink) {
    let world = &state.world;
    let particle = assets.get(TextureKey::Particle);

    draw_particles(sink, particle, &world.particles);

    for upgrade in world.upgrades.iter().filter(|u| u.is_alive()) {
        let texture = assets.get(TextureKey::Upgrade);
        sink.draw(quad(texture, upgrade.bounds()).tinted(upgrade_color(upgrade.kind)));
    }

    for enemy in world.live_enemies() {
        let (key, tint) = match enemy.kind {
            EnemyKind::Normal => (TextureKey::Enemy, WHITE),
            EnemyKind::Scout { .. } => (TextureKey::Scout, WHITE),
            EnemyKind::Bomber {
                state: BomberState::Exploding { .. },
            } => (TextureKey::Bomber, [1.0, 0.3, 0.3, 1.0]),
            EnemyKind::Bomber { .. } => (TextureKey::Bomber, WHITE),
        };
        sink.draw(quad(assets.get(key), enemy.bounds()).tinted(tint));
    }

    draw_bullets(sink, assets, &world.bullets);

    let mut shielded = false;
    match &state.mode {
        ModeState::Arcade(_) => {}
        ModeState::BossRush(m) => {
            let boss = &m.boss;
            draw_particles(sink, particle, &boss.particles);
            if boss.is_targetable() {
                sink.draw(quad(assets.get(TextureKey::Boss), boss.bounds()));
                let bar = Rect::new(
                    boss.pos.x,
                    boss.pos.y + boss.size.y + 4.0,
                    boss.size.x * boss.health_fraction(),
                    BOSS_BAR_HEIGHT,
                );
                let tint = health_color(boss.health_fraction());
                sink.draw(quad(TextureHandle::PLACEHOLDER, bar).tinted(tint));
            }
            draw_bullets(sink, assets, &boss.bullets);
        }
        ModeState::AsteroidDodger(m) => {
            shielded = m.shield.is_some();
            let texture = assets.get(TextureKey::Asteroid);
            for a in m.asteroids.iter().filter(|a| a.is_alive()) {
                sink.draw(quad(texture, a.bounds()).rotated(a.rotation));
            }
            let texture = assets.get(TextureKey::PowerUp);
            for p in m.power_ups.iter().filter(|p| p.is_alive()) {
                // Blink during the last two seconds
                let blink_off = p.lifetime < 2.0 && (p.lifetime * 8.0) as i32 % 2 == 0;
                let alpha = if blink_off { 0.4 } else { 1.0 };
                let mut tint = power_up_color(p.kind);
                tint[3] = alpha;
                sink.draw(quad(texture, p.bounds()).tinted(tint));
            }
        }
        ModeState::Flappy(m) => {
            let texture = assets.get(TextureKey::Obstacle);
            for o in m.obstacles.iter().filter(|o| o.is_alive()) {
                sink.draw(quad(texture, o.top()).tinted([0.8, 0.2, 0.2, 1.0]));
                sink.draw(quad(texture, o.bottom()).tinted([0.8, 0.2, 0.2, 1.0]));
            }
            let texture = assets.get(TextureKey::Upgrade);
            for p in m.pickups.iter().filter(|p| p.is_alive()) {
                sink.draw(quad(texture, p.bounds()).tinted(upgrade_color(p.kind)));
            }
        }
    }

    draw_player(sink, assets, &world.player, shielded);
    render_hud(state, sink);
}

fn render_hud(state: &GameState, sink: &mut dyn RenderSink) {
    for (i, line) in state.hud_lines().into_iter().enumerate() {
        sink.text(TextCommand {
            text: line,
            pos: Vec2::new(
                HUD_MARGIN,
                SCREEN_HEIGHT - HUD_MARGIN - HUD_LINE_HEIGHT * (i as f32 + 1.0),
            ),
            color: WHITE,
        });
    }

    let banner = match state.phase {
        GamePhase::GameOver => Some(("GAME OVER".to_string(), [1.0, 0.3, 0.3, 1.0])),
        GamePhase::Victory => Some((
            state.victory_message().unwrap_or_else(|| "VICTORY!".to_string()),
            [1.0, 0.9, 0.2, 1.0],
        )),
        GamePhase::Running | GamePhase::Paused => None,
    };
    if let Some((text, color)) = banner {
        sink.text(TextCommand {
            text,
            pos: Vec2::new(SCREEN_WIDTH / 2.0 - 100.0, SCREEN_HEIGHT / 2.0),
            color,
        });
        sink.text(TextCommand {
            text: format!("Final score: {}", state.score()),
            pos: Vec2::new(SCREEN_WIDTH / 2.0 - 100.0, SCREEN_HEIGHT / 2.0 - HUD_LINE_HEIGHT * 1.5),
            color: WHITE,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SequentialLoader;
    use crate::renderer::CommandBuffer;
    use crate::sim::entity::Enemy;
    use crate::sim::modes::ModeKind;
    use crate::tuning::Tuning;

    fn frame(state: &GameState) -> CommandBuffer {
        let assets = AssetRegistry::load(&mut SequentialLoader::default());
        let mut buffer = CommandBuffer::default();
        render_scene(state, &assets, &mut buffer);
        buffer
    }

    #[test]
    fn test_player_and_hud_always_drawn() {
        for kind in ModeKind::ALL {
            let state = GameState::new(kind, 1, &Tuning::default());
            let buffer = frame(&state);
            assert!(!buffer.draws.is_empty(), "{kind:?}");
            assert_eq!(buffer.texts.len(), state.hud_lines().len());
            assert!(buffer.texts[0].text.starts_with("Score"));
        }
    }

    #[test]
    fn test_dead_entities_are_not_drawn() {
        let mut state = GameState::new(ModeKind::Classic, 1, &Tuning::default());
        let id = state.world.next_entity_id();
        state.world.enemies.push(Enemy::normal(id, Vec2::new(100.0, 300.0), 10.0));
        let before = frame(&state).draws.len();
        state.world.enemies[0].force_kill();
        assert_eq!(frame(&state).draws.len(), before - 1);
    }

    #[test]
    fn test_boss_has_health_bar() {
        let state = GameState::new(ModeKind::BossRush, 1, &Tuning::default());
        let buffer = frame(&state);
        // Boss, bar, player
        assert_eq!(buffer.draws.len(), 3);
        assert_eq!(buffer.draws[1].texture, TextureHandle::PLACEHOLDER);
    }

    #[test]
    fn test_game_over_banner() {
        let mut state = GameState::new(ModeKind::Classic, 1, &Tuning::default());
        state.phase = GamePhase::GameOver;
        let buffer = frame(&state);
        assert!(buffer.texts.iter().any(|t| t.text == "GAME OVER"));
    }

    #[test]
    fn test_health_color_gradient() {
        assert_eq!(health_color(1.0), [0.0, 1.0, 0.2, 1.0]);
        assert_eq!(health_color(0.0), [1.0, 0.0, 0.2, 1.0]);
        assert_eq!(health_color(0.5), [1.0, 1.0, 0.2, 1.0]);
    }
}
