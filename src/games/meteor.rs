//! Asteroid shooter
//!
//! The ship steers with the stick (or follows the mouse when no pad is
//! present), lasers fly straight up, meteors drift down with a slight random
//! skew. Any meteor contact ends the run; score is survival time in seconds.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::input::InputFrame;
use crate::platform::{AssetProvider, Renderer, Sprite};
use crate::sim::{
    EntityKind, EntityStore, GameEvent, GamePhase, Rect, SpawnTimer, any_hostile_mask_hit,
    projectiles_vs_hostiles, sky_hostile,
};
use crate::tuning::MeteorTuning;

pub struct MeteorSprites {
    pub ship: Sprite,
    pub laser: Sprite,
    pub meteor: Sprite,
}

impl MeteorSprites {
    pub fn load(assets: &dyn AssetProvider) -> Self {
        Self {
            ship: assets.sprite("ship"),
            laser: assets.sprite("laser"),
            meteor: assets.sprite("meteor"),
        }
    }
}

/// One meteor-shooter session
pub struct MeteorGame {
    tuning: MeteorTuning,
    sprites: MeteorSprites,
    seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub ship_pos: Vec2,
    pub store: EntityStore,
    /// Survival time in seconds; the score
    pub survival: f32,
    meteor_timer: SpawnTimer,
}

impl MeteorGame {
    pub fn new(seed: u64, tuning: MeteorTuning, sprites: MeteorSprites) -> Self {
        let ship_pos = Vec2::new(tuning.window_width / 2.0, tuning.window_height / 2.0);
        let meteor_timer = SpawnTimer::new(tuning.meteor_interval);
        Self {
            tuning,
            sprites,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            ship_pos,
            store: EntityStore::new(),
            survival: 0.0,
            meteor_timer,
        }
    }

    pub fn score(&self) -> u64 {
        self.survival as u64
    }

    /// GameOver -> Playing: ship re-centered, lists cleared, timers reset
    pub fn restart(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.store.clear();
        self.ship_pos = Vec2::new(
            self.tuning.window_width / 2.0,
            self.tuning.window_height / 2.0,
        );
        self.survival = 0.0;
        self.meteor_timer.reset(0.0);
        self.phase = GamePhase::Playing;
        log::info!("meteor session restarted");
    }

    fn window(&self) -> Rect {
        Rect::new(
            Vec2::new(
                self.tuning.window_width / 2.0,
                self.tuning.window_height / 2.0,
            ),
            Vec2::new(self.tuning.window_width, self.tuning.window_height),
        )
    }

    fn ship_bounds(&self) -> Rect {
        Rect::new(self.ship_pos, self.sprites.ship.size)
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

        self.survival += dt;

        // Stick steers the ship; with no stick input the pointer drags it
        if input.move_dir != Vec2::ZERO {
            self.ship_pos += input.move_dir * self.tuning.ship_speed * dt;
        } else if let Some(pointer) = input.pointer {
            self.ship_pos = pointer;
        }
        self.ship_pos = self.ship_bounds().clamped_center(&self.window());

        if self.meteor_timer.fire(self.survival) {
            let req = sky_hostile(
                &mut self.rng,
                self.tuning.window_width,
                self.tuning.meteor_speed,
            );
            self.store
                .spawn(req.kind, req.pos, req.vel, self.sprites.meteor.size);
        }

        if input.fire {
            let muzzle = Vec2::new(
                self.ship_pos.x,
                self.ship_bounds().top() - self.sprites.laser.size.y / 2.0,
            );
            self.store.spawn(
                EntityKind::Projectile,
                muzzle,
                Vec2::new(0.0, -self.tuning.laser_speed),
                self.sprites.laser.size,
            );
            events.push(GameEvent::ProjectileFired);
        }

        self.advance_entities(dt);

        for _event in projectiles_vs_hostiles(&mut self.store, true) {
            events.push(GameEvent::HostileDestroyed);
        }

        // Instant death on contact: rect prefilter, then pixel masks
        if any_hostile_mask_hit(
            &self.store,
            &self.ship_bounds(),
            &self.sprites.ship.mask,
            &self.sprites.meteor.mask,
        ) {
            self.phase = GamePhase::GameOver;
            events.push(GameEvent::SessionEnded { score: self.score() });
            log::info!("meteor session over, survived {}s", self.score());
        }

        self.store.sweep();
        events
    }

    /// Lasers leave through the top, meteors through the bottom
    fn advance_entities(&mut self, dt: f32) {
        let height = self.tuning.window_height;
        for id in self.store.ids_of(EntityKind::Projectile) {
            let Some(laser) = self.store.get_mut(id) else { continue };
            laser.pos += laser.vel * dt;
            if laser.bounds().bottom() < 0.0 {
                self.store.remove(id);
            }
        }
        for id in self.store.ids_of(EntityKind::Hostile) {
            let Some(meteor) = self.store.get_mut(id) else { continue };
            meteor.pos += meteor.vel * dt;
            if meteor.bounds().top() > height {
                self.store.remove(id);
            }
        }
    }

    pub fn draw(&self, r: &mut dyn Renderer) {
        for laser in self.store.each_alive(EntityKind::Projectile) {
            r.draw(self.sprites.laser.id, laser.pos);
        }
        for meteor in self.store.each_alive(EntityKind::Hostile) {
            r.draw(self.sprites.meteor.id, meteor.pos);
        }
        r.draw(self.sprites.ship.id, self.ship_pos);
    }
}
