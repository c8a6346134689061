//! Side-scrolling shooter/platformer
//!
//! The player runs and double-jumps along the ground, firing projectiles at
//! hostiles that walk in from the edges. Health pool with an invincibility
//! window after each hit.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::KILL_SCORE;
use crate::flash_visible;
use crate::input::InputFrame;
use crate::platform::{AssetProvider, Renderer, Sprite};
use crate::sim::{
    DamageModel, EntityKind, EntityStore, GameEvent, GamePhase, PlatformerParams, PlayerState,
    Rect, SpawnTimer, edge_hostile, first_hostile_touching, integrate_platformer, knockback,
    projectiles_vs_hostiles, try_jump,
};
use crate::tuning::ForestTuning;

/// Sprites the forest session places and collides
pub struct ForestSprites {
    pub player: Sprite,
    pub projectile: Sprite,
    pub hostile: Sprite,
}

impl ForestSprites {
    pub fn load(assets: &dyn AssetProvider) -> Self {
        Self {
            player: assets.sprite("player"),
            projectile: assets.sprite("projectile"),
            hostile: assets.sprite("monster"),
        }
    }
}

/// One forest session
pub struct ForestGame {
    tuning: ForestTuning,
    sprites: ForestSprites,
    seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub player: PlayerState,
    pub store: EntityStore,
    pub score: u64,
    /// Session time in seconds, reset on restart
    pub time: f32,
    hostile_timer: SpawnTimer,
}

impl ForestGame {
    pub fn new(seed: u64, tuning: ForestTuning, sprites: ForestSprites) -> Self {
        let player = PlayerState::new(
            Vec2::new(tuning.field_width / 2.0, tuning.field_height / 2.0),
            sprites.player.size,
            tuning.player_health,
        );
        let hostile_timer = SpawnTimer::new(tuning.hostile_interval);
        Self {
            tuning,
            sprites,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            player,
            store: EntityStore::new(),
            score: 0,
            time: 0.0,
            hostile_timer,
        }
    }

    /// GameOver -> Playing: entity lists emptied, score and timers reset.
    /// Idempotent; a second call in a row changes nothing.
    pub fn restart(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.store.clear();
        self.player = PlayerState::new(
            Vec2::new(
                self.tuning.field_width / 2.0,
                self.tuning.field_height / 2.0,
            ),
            self.sprites.player.size,
            self.tuning.player_health,
        );
        self.score = 0;
        self.time = 0.0;
        self.hostile_timer.reset(0.0);
        self.phase = GamePhase::Playing;
        log::info!("forest session restarted");
    }

    fn physics_params(&self) -> PlatformerParams {
        PlatformerParams {
            gravity: self.tuning.gravity,
            move_speed: self.tuning.player_speed,
            ground_y: self.tuning.field_height,
            field: self.field(),
        }
    }

    fn field(&self) -> Rect {
        Rect::new(
            Vec2::new(
                self.tuning.field_width / 2.0,
                self.tuning.field_height / 2.0,
            ),
            Vec2::new(self.tuning.field_width, self.tuning.field_height),
        )
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &InputFrame, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if self.phase == GamePhase::GameOver {
            if input.restart {
                self.restart();
            }
            return events;
        }

        self.time += dt;
        self.player.tick_invincibility(dt);
        self.player.update_facing(input.move_dir.x);

        if input.jump {
            try_jump(&mut self.player, self.tuning.jump_impulse);
        }
        let params = self.physics_params();
        integrate_platformer(&mut self.player, input.move_dir.x, dt, &params);

        if self.hostile_timer.fire(self.time) {
            let req = edge_hostile(
                &mut self.rng,
                self.tuning.field_width,
                self.tuning.field_height,
                self.sprites.hostile.size,
                self.player.pos.x,
                self.tuning.hostile_speed,
            );
            self.store
                .spawn(req.kind, req.pos, req.vel, self.sprites.hostile.size);
        }

        if input.fire {
            let dir = self.player.facing.sign();
            self.store.spawn(
                EntityKind::Projectile,
                self.player.pos,
                Vec2::new(dir * self.tuning.projectile_speed, 0.0),
                self.sprites.projectile.size,
            );
            events.push(GameEvent::ProjectileFired);
        }

        self.advance_entities(dt);

        for _event in projectiles_vs_hostiles(&mut self.store, true) {
            self.score += KILL_SCORE;
            events.push(GameEvent::HostileDestroyed);
        }

        self.resolve_player_contact(&mut events);

        self.store.sweep();
        events
    }

    /// Move projectiles and hostiles; cull what left the playfield
    fn advance_entities(&mut self, dt: f32) {
        let field = self.field();
        for id in self.store.ids_of(EntityKind::Projectile) {
            let Some(p) = self.store.get_mut(id) else { continue };
            p.pos += p.vel * dt;
            let b = p.bounds();
            if b.right() < field.left() || b.left() > field.right() {
                self.store.remove(id);
            }
        }
        for id in self.store.ids_of(EntityKind::Hostile) {
            let Some(h) = self.store.get_mut(id) else { continue };
            h.pos += h.vel * dt;
            // Hostiles keep walking until well past the far edge
            let b = h.bounds();
            if b.right() < field.left() - b.size.x || b.left() > field.right() + b.size.x {
                self.store.remove(id);
            }
        }
    }

    /// Hostile contact rule; skipped entirely while the window is open
    fn resolve_player_contact(&mut self, events: &mut Vec<GameEvent>) {
        if self.player.invincible() {
            return;
        }
        let bounds = self.player.bounds();
        let Some(hostile_id) = first_hostile_touching(&self.store, &bounds) else {
            return;
        };
        match self.tuning.damage_model {
            DamageModel::HealthPool => {
                let hostile_center = self
                    .store
                    .get(hostile_id)
                    .map(|h| h.pos)
                    .unwrap_or(self.player.pos);
                self.player.take_hit(self.tuning.invincibility);
                self.player.pos += knockback(self.player.pos, hostile_center);
                self.player.pos = self.player.bounds().clamped_center(&self.field());
                events.push(GameEvent::PlayerHit);
                log::debug!("player hit, health {}", self.player.health);
                if self.player.health == 0 {
                    self.end_session(events);
                }
            }
            DamageModel::Instadeath => self.end_session(events),
        }
    }

    fn end_session(&mut self, events: &mut Vec<GameEvent>) {
        self.phase = GamePhase::GameOver;
        events.push(GameEvent::SessionEnded { score: self.score });
        log::info!("forest session over, score {}", self.score);
    }

    /// Hand this frame's sprites to the renderer, player drawn last.
    /// While invincible the player blinks at 10 Hz.
    pub fn draw(&self, r: &mut dyn Renderer) {
        for h in self.store.each_alive(EntityKind::Hostile) {
            r.draw(self.sprites.hostile.id, h.pos);
        }
        for p in self.store.each_alive(EntityKind::Projectile) {
            r.draw(self.sprites.projectile.id, p.pos);
        }
        if !self.player.invincible() || flash_visible(self.time) {
            r.draw(self.sprites.player.id, self.player.pos);
        }
    }
}
