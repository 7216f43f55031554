//! Turns the current game into draw commands.
//!
//! Layout follows the 800×600 playfield; the renderer decides how that maps
//! onto an actual surface.

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::{BulletOwner, EnemyKind, Explosion, ExplosionKind, Side};
use crate::error::GameError;
use crate::game::{Game, Phase};
use crate::interfaces::{
    ExplosionColor, Image, Renderer, Text, BLUE, GREEN, PURPLE, RED, WHITE,
};
use crate::round::Round;

/// Draw one complete frame and present it.
pub fn draw<R: Renderer + ?Sized>(game: &Game, now: u64, renderer: &mut R) -> Result<(), GameError> {
    match (game.phase(), game.round()) {
        (Phase::Playing, Some(round)) => draw_round(round, now, renderer),
        (Phase::RoundWon { .. }, Some(round)) => draw_results(round, true, renderer),
        (Phase::GameOver { .. }, Some(round)) => draw_results(round, false, renderer),
        _ => draw_menu(renderer),
    }
    renderer.present()
}

// ── Main menu ─────────────────────────────────────────────────────────────────

fn draw_menu<R: Renderer + ?Sized>(renderer: &mut R) {
    renderer.draw_text(&Text::new(50, "Space Invaders", WHITE, 164, 155));
    renderer.draw_text(&Text::new(25, "Press any key to continue", WHITE, 201, 225));

    let legend = [
        (EnemyKind::Octopus, "   =   10 pts", GREEN, 270),
        (EnemyKind::Crab, "   =  20 pts", BLUE, 320),
        (EnemyKind::Squid, "   =  30 pts", PURPLE, 370),
    ];
    for (kind, label, color, y) in legend {
        renderer.blit(Image::Enemy { kind, frame: 0 }, 318, y);
        renderer.draw_text(&Text::new(25, label, color, 368, y));
    }
    renderer.blit(Image::Mystery, 299, 420);
    renderer.draw_text(&Text::new(25, "   =  ?????", RED, 368, 420));
}

// ── End-of-round screens ──────────────────────────────────────────────────────

fn draw_results<R: Renderer + ?Sized>(round: &Round, won: bool, renderer: &mut R) {
    let banner = if won {
        Text::new(50, "Enemies Destroyed!", WHITE, 100, 270)
    } else {
        Text::new(50, "Game Over!", WHITE, 250, 270)
    };
    renderer.draw_text(&banner);
    renderer.draw_text(&Text::new(30, "Player Score:", WHITE, 100, 400));
    renderer.draw_text(&Text::new(30, round.score.human.to_string(), GREEN, 100, 450));
    renderer.draw_text(&Text::new(30, "AI Score:", WHITE, 500, 400));
    renderer.draw_text(&Text::new(30, round.score.ai.to_string(), GREEN, 500, 450));
}

// ── Playing ───────────────────────────────────────────────────────────────────

fn draw_round<R: Renderer + ?Sized>(round: &Round, now: u64, renderer: &mut R) {
    draw_hud(round, renderer);
    renderer.draw_line((SCREEN_WIDTH / 2, 0), (SCREEN_WIDTH / 2, SCREEN_HEIGHT), WHITE);

    for unit in round.formation.units() {
        let image = Image::Enemy {
            kind: unit.kind(),
            frame: unit.frame,
        };
        renderer.blit(image, unit.x, unit.y);
    }

    for side in Side::ALL {
        if let Some(ship) = round.ships[side] {
            let image = match side {
                Side::Human => Image::Ship,
                Side::Ai => Image::Other,
            };
            renderer.blit(image, ship.x, ship.y);
        }
    }

    for bullet in round.pools.player_bullets.iter().chain(&round.pools.enemy_bullets) {
        let image = match bullet.owner {
            BulletOwner::Player => Image::Laser,
            BulletOwner::Enemy => Image::EnemyLaser,
        };
        renderer.blit(image, bullet.x, bullet.y);
    }

    if round.mystery.is_crossing(now) {
        renderer.blit(Image::Mystery, round.mystery.x, round.mystery.y);
    }

    for explosion in &round.pools.explosions {
        draw_explosion(explosion, now, renderer);
    }
}

fn draw_hud<R: Renderer + ?Sized>(round: &Round, renderer: &mut R) {
    for side in Side::ALL {
        // each side's HUD sits over its own half
        let left = match side {
            Side::Human => 0,
            Side::Ai => SCREEN_WIDTH / 2,
        };
        let points = round.score.of(side).to_string();
        renderer.draw_text(&Text::new(20, "Score", WHITE, left + 5, 5));
        renderer.draw_text(&Text::new(20, points, GREEN, left + 85, 5));
        renderer.draw_text(&Text::new(20, "Lives ", WHITE, left + 240, 5));
        for token in round.lives[side].tokens() {
            renderer.blit(Image::Life, token.x, token.y);
        }
    }
}

/// Explosions blink through fixed phases keyed on their age.
fn draw_explosion<R: Renderer + ?Sized>(explosion: &Explosion, now: u64, renderer: &mut R) {
    let passed = explosion.elapsed(now);
    match explosion.kind {
        ExplosionKind::Enemy { row } => {
            let color = ExplosionColor::for_kind(EnemyKind::from_row(row));
            if passed <= 100 {
                renderer.blit(Image::Explosion { color, large: false }, explosion.x, explosion.y);
            } else if passed <= 200 {
                renderer.blit(
                    Image::Explosion { color, large: true },
                    explosion.x - 6,
                    explosion.y - 6,
                );
            }
        }
        ExplosionKind::Mystery { points } => {
            if passed <= 200 || (400 < passed && passed <= 600) {
                renderer.draw_text(&Text::new(20, points.to_string(), WHITE, explosion.x, explosion.y));
            }
        }
        ExplosionKind::Ship { side } => {
            if 300 < passed && passed <= 600 {
                let image = match side {
                    Side::Human => Image::Ship,
                    Side::Ai => Image::Other,
                };
                renderer.blit(image, explosion.x, explosion.y);
            }
        }
    }
}
