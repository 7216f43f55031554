//! The world of a single round and its per-tick advance.

use rand::Rng;
use tracing::debug;

use crate::ai;
use crate::collision::{self, CollisionReport};
use crate::config::{
    side_config, Mode, ENEMY_DEFAULT_POSITION, ENEMY_FIRE_INTERVAL,
    HUMAN_BULLET_CAP, MUSIC_NOTES, RESPAWN_DELAY,
};
use crate::entities::{Bullet, Explosion, Lives, MysteryShip, Score, Ship, Side, SideMap};
use crate::formation::EnemyFormation;
use crate::interfaces::{AudioPlayer, Control, Cue, InputSnapshot};

/// The mutable collections every component shares during a tick.
#[derive(Clone, Debug, Default)]
pub struct Pools {
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub explosions: Vec<Explosion>,
}

/// Background march: one note per formation move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Music {
    pub timer: u64,
    pub index: u8,
}

impl Music {
    pub fn new(now: u64) -> Self {
        Self { timer: now, index: 0 }
    }

    pub fn update(&mut self, now: u64, interval: u64, audio: &mut dyn AudioPlayer) {
        if now.saturating_sub(self.timer) > interval {
            audio.play(Cue::Note(self.index));
            self.index = (self.index + 1) % MUSIC_NOTES;
            self.timer += interval;
        }
    }
}

#[derive(Clone, Debug)]
pub struct Round {
    pub formation: EnemyFormation,
    pub ships: SideMap<Option<Ship>>,
    pub lives: SideMap<Lives>,
    /// When each side's ship was destroyed, while a respawn is owed.
    pub pending_respawn: SideMap<Option<u64>>,
    pub pools: Pools,
    pub mystery: MysteryShip,
    pub score: Score,
    pub enemy_fire_timer: u64,
    pub music: Music,
}

impl Round {
    /// A fresh round carrying over `score`.
    pub fn new(now: u64, score: Score) -> Self {
        Self {
            formation: EnemyFormation::new(ENEMY_DEFAULT_POSITION, now),
            ships: SideMap::from_fn(|side| Some(Ship::new(side))),
            lives: SideMap::from_fn(Lives::full),
            pending_respawn: SideMap::default(),
            pools: Pools::default(),
            mystery: MysteryShip::new(now),
            score,
            enemy_fire_timer: now,
            music: Music::new(now),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn is_eliminated(&self, side: Side) -> bool {
        self.lives[side].is_empty()
    }

    pub fn both_eliminated(&self) -> bool {
        Side::ALL.iter().all(|&side| self.is_eliminated(side))
    }

    pub fn total_lives(&self) -> usize {
        Side::ALL.iter().map(|&side| self.lives[side].count()).sum()
    }

    /// No enemies left and every explosion has finished animating.
    pub fn is_cleared(&self) -> bool {
        self.formation.is_empty() && self.pools.explosions.is_empty()
    }

    // ── Ship lifecycle ───────────────────────────────────────────────────────

    /// Blow up `side`'s ship and take one life.  A respawn is owed while lives
    /// remain.  Returns `false` when there was no ship to hit.
    pub fn destroy_ship(&mut self, side: Side, now: u64, audio: &mut dyn AudioPlayer) -> bool {
        let Some(ship) = self.ships[side].take() else {
            return false;
        };
        self.lives[side].lose_one();
        audio.play(Cue::ShipExplosion);
        self.pools.explosions.push(Explosion::ship(&ship, now));

        let remaining = self.lives[side].count();
        self.pending_respawn[side] = (remaining > 0).then_some(now);
        debug!(?side, remaining, "ship destroyed");
        true
    }

    /// Remove `side` from the round outright: no ship, no lives, no respawn.
    pub fn eliminate(&mut self, side: Side) -> bool {
        let had_anything = self.ships[side].is_some() || !self.lives[side].is_empty();
        self.ships[side] = None;
        self.lives[side].clear();
        self.pending_respawn[side] = None;
        if had_anything {
            debug!(?side, "side eliminated");
        }
        had_anything
    }

    fn respawn_ships(&mut self, now: u64) {
        for side in Side::ALL {
            let Some(destroyed_at) = self.pending_respawn[side] else {
                continue;
            };
            if now.saturating_sub(destroyed_at) > RESPAWN_DELAY {
                self.ships[side] = Some(Ship::new(side));
                self.pending_respawn[side] = None;
                debug!(?side, "ship respawned");
            }
        }
    }

    // ── Firing ───────────────────────────────────────────────────────────────

    /// Fire from `side`'s ship if the shared player-bullet pool allows it.
    ///
    /// The human may keep `HUMAN_BULLET_CAP` bullets in flight; the AI only
    /// fires into an empty pool.
    pub fn try_fire(&mut self, side: Side, audio: &mut dyn AudioPlayer) -> bool {
        let Some(ship) = self.ships[side] else {
            return false;
        };
        let in_flight = self.pools.player_bullets.len();
        let allowed = match side {
            Side::Human => in_flight < HUMAN_BULLET_CAP,
            Side::Ai => in_flight == 0,
        };
        if !allowed {
            return false;
        }
        let (x, y) = ship.muzzle();
        self.pools.player_bullets.push(Bullet::player(x, y));
        audio.play(side_config(side).fire_cue);
        true
    }

    fn enemies_fire(&mut self, now: u64, rng: &mut impl Rng) {
        if now.saturating_sub(self.enemy_fire_timer) <= ENEMY_FIRE_INTERVAL {
            return;
        }
        if let Some(shooter) = self.formation.pick_random_shooter(rng) {
            self.pools
                .enemy_bullets
                .push(Bullet::enemy(shooter.x + 14, shooter.y + 20));
            self.enemy_fire_timer = now;
        }
    }

    // ── Tick ─────────────────────────────────────────────────────────────────

    /// Advance the round by one tick.
    pub fn advance(
        &mut self,
        now: u64,
        input: &InputSnapshot,
        mode: Mode,
        rng: &mut impl Rng,
        audio: &mut dyn AudioPlayer,
    ) -> CollisionReport {
        self.music.update(now, self.formation.move_interval(), audio);

        // 1. Firing: the AI takes any chance it gets, the human fires on key-down
        self.try_fire(Side::Ai, audio);
        for _ in 0..input.presses(Control::Fire) {
            self.try_fire(Side::Human, audio);
        }

        // 2. Formation march
        self.formation.update(now);

        // 3. Ships, bullets and the mystery ship
        if let Some(ship) = self.ships.human.as_mut() {
            ship.steer(input.is_held(Control::Left), input.is_held(Control::Right));
        }
        self.pools.player_bullets.retain_mut(Bullet::advance);
        self.pools.enemy_bullets.retain_mut(Bullet::advance);
        self.mystery.update(now, audio);

        // 4. Opponent AI
        if let Some(ship) = self.ships.ai.as_mut() {
            let steering = ai::steer(
                ship,
                &self.formation,
                &self.pools.enemy_bullets,
                mode.left_wall(),
            );
            ship.x += steering.dx;
            ship.drift = steering.drift;
        }

        // 5. Expire finished explosions
        self.pools.explosions.retain(|e| !e.is_expired(now));

        // 6. Collisions
        let report = collision::resolve(self, now, rng, audio);

        // 7. Respawns and enemy fire
        self.respawn_ships(now);
        self.enemies_fire(now, rng);

        report
    }
}
