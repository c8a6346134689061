//! Top-down driving/collectible game
//!
//! The player walks an 8-way grid world collecting bottles while vehicles
//! sweep across fixed lanes. Static props block movement (axis-separated
//! snap); vehicle contact ends the session immediately.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::input::InputFrame;
use crate::platform::{AssetProvider, Renderer, Sprite, depth_key};
use crate::sim::{
    Axis, AxisOutcome, EntityKind, EntityStore, GameEvent, GamePhase, Obstacle, Rect, RecentLanes,
    SpawnTimer, collect_pickups, collectible_position, lane_vehicle, resolve_axis,
};
use crate::tuning::TrafficTuning;

pub struct TrafficSprites {
    pub player: Sprite,
    pub vehicle: Sprite,
    pub collectible: Sprite,
}

impl TrafficSprites {
    pub fn load(assets: &dyn AssetProvider) -> Self {
        Self {
            player: assets.sprite("player"),
            vehicle: assets.sprite("car"),
            collectible: assets.sprite("bottle"),
        }
    }
}

/// One traffic session
pub struct TrafficGame {
    tuning: TrafficTuning,
    sprites: TrafficSprites,
    /// Static prop rectangles, world layout data from the host
    props: Vec<Rect>,
    seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub player_pos: Vec2,
    pub store: EntityStore,
    pub score: u64,
    pub time: f32,
    vehicle_timer: SpawnTimer,
    collectible_timer: SpawnTimer,
    recent_lanes: RecentLanes,
}

impl TrafficGame {
    pub fn new(seed: u64, tuning: TrafficTuning, sprites: TrafficSprites, props: Vec<Rect>) -> Self {
        let mut game = Self {
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            player_pos: tuning.player_start,
            store: EntityStore::new(),
            score: 0,
            time: 0.0,
            vehicle_timer: SpawnTimer::new(tuning.vehicle_interval),
            collectible_timer: SpawnTimer::new(tuning.collectible_interval),
            recent_lanes: RecentLanes::default(),
            tuning,
            sprites,
            props,
            seed,
        };
        game.seed_world();
        game
    }

    /// Register props as entities and make the initial collectible pass
    fn seed_world(&mut self) {
        for prop in self.props.clone() {
            self.store.spawn(
                EntityKind::StaticObstacle,
                prop.center,
                Vec2::ZERO,
                prop.size,
            );
        }
        for _ in 0..self.tuning.initial_collectible_attempts {
            self.try_spawn_collectible();
        }
    }

    /// GameOver -> Playing: world reseeded from the session seed, score and
    /// timers reset. Idempotent.
    pub fn restart(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.store.clear();
        self.player_pos = self.tuning.player_start;
        self.score = 0;
        self.time = 0.0;
        self.vehicle_timer.reset(0.0);
        self.collectible_timer.reset(0.0);
        self.recent_lanes.clear();
        self.phase = GamePhase::Playing;
        self.seed_world();
        log::info!("traffic session restarted");
    }

    fn area(&self) -> Rect {
        let size = self.tuning.area_max - self.tuning.area_min;
        Rect::new(self.tuning.area_min + size / 2.0, size)
    }

    /// Player hitbox: sprite rect with the top half shaved off
    fn player_hitbox(&self) -> Rect {
        Rect::new(self.player_pos, self.sprites.player.size)
            .inflate(0.0, -self.sprites.player.size.y / 2.0)
    }

    /// Blockers for axis resolution: props snap, vehicles kill
    fn obstacles(&self) -> Vec<Obstacle> {
        let mut list: Vec<Obstacle> = self
            .store
            .each_alive(EntityKind::StaticObstacle)
            .map(|prop| Obstacle {
                bounds: prop.bounds(),
                fatal: false,
            })
            .collect();
        list.extend(self.store.each_alive(EntityKind::Hostile).map(|car| {
            Obstacle {
                // Vehicle hitbox is shaved like the player's
                bounds: car.bounds().inflate(0.0, -car.size.y / 2.0),
                fatal: true,
            }
        }));
        list
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

        if self.move_player(input.move_dir, dt) == AxisOutcome::Fatal {
            self.phase = GamePhase::GameOver;
            events.push(GameEvent::SessionEnded { score: self.score });
            log::info!("traffic session over, score {}", self.score);
            return events;
        }

        if self.vehicle_timer.fire(self.time) {
            let req = lane_vehicle(
                &mut self.rng,
                &self.tuning.lanes,
                &mut self.recent_lanes,
                self.tuning.vehicle_speed,
            );
            if let Some(req) = req {
                self.store
                    .spawn(req.kind, req.pos, req.vel, self.sprites.vehicle.size);
            }
        }
        if self.collectible_timer.fire(self.time) {
            self.try_spawn_collectible();
        }

        self.advance_vehicles(dt);

        // Pickups: rect prefilter then masks; each collected bottle is
        // replaced immediately to keep a steady count. The full sprite rect
        // is used here, not the movement hitbox.
        let bounds = Rect::new(self.player_pos, self.sprites.player.size);
        let collected = collect_pickups(
            &mut self.store,
            0,
            &bounds,
            &self.sprites.player.mask,
            &self.sprites.collectible.mask,
        );
        for _event in collected {
            self.score += 1;
            events.push(GameEvent::PickupCollected);
            self.try_spawn_collectible();
        }

        self.store.sweep();
        events
    }

    /// Axis-separated movement: x first, resolve; then y, resolve; then the
    /// playable-area clamp. Each axis's snap touches only that component.
    fn move_player(&mut self, dir: Vec2, dt: f32) -> AxisOutcome {
        let obstacles = self.obstacles();
        let speed = self.tuning.player_speed;

        self.player_pos.x += dir.x * speed * dt;
        let mut hitbox = self.player_hitbox();
        if resolve_axis(&mut hitbox, dir.x, Axis::X, &obstacles) == AxisOutcome::Fatal {
            return AxisOutcome::Fatal;
        }
        self.player_pos.x = hitbox.center.x;

        self.player_pos.y += dir.y * speed * dt;
        let mut hitbox = self.player_hitbox();
        if resolve_axis(&mut hitbox, dir.y, Axis::Y, &obstacles) == AxisOutcome::Fatal {
            return AxisOutcome::Fatal;
        }
        self.player_pos.y = hitbox.center.y;

        let full = Rect::new(self.player_pos, self.sprites.player.size);
        self.player_pos = full.clamped_center(&self.area());
        AxisOutcome::Clear
    }

    fn advance_vehicles(&mut self, dt: f32) {
        let (despawn_left, despawn_right) = self.tuning.vehicle_despawn_x;
        for id in self.store.ids_of(EntityKind::Hostile) {
            let Some(car) = self.store.get_mut(id) else { continue };
            car.pos += car.vel * dt;
            if car.pos.x <= despawn_left || car.pos.x >= despawn_right {
                self.store.remove(id);
            }
        }
    }

    /// One placement attempt; rejected candidates are silently dropped
    fn try_spawn_collectible(&mut self) {
        let area = self.area();
        let existing: Vec<Vec2> = self
            .store
            .each_alive(EntityKind::Collectible)
            .map(|c| c.pos)
            .collect();
        let pos = collectible_position(
            &mut self.rng,
            &area,
            &existing,
            self.tuning.collectible_min_distance,
            self.tuning.collectible_cap,
            existing.len(),
        );
        if let Some(pos) = pos {
            self.store.spawn(
                EntityKind::Collectible,
                pos,
                Vec2::ZERO,
                self.sprites.collectible.size,
            );
        }
    }

    /// Painter's algorithm: ascending center y, lower entities drawn on top
    pub fn draw(&self, r: &mut dyn Renderer) {
        let mut order: Vec<(f32, crate::platform::SpriteId, Vec2)> = self
            .store
            .iter_alive()
            .filter_map(|e| {
                let sprite = match e.kind {
                    EntityKind::Hostile => &self.sprites.vehicle,
                    EntityKind::Collectible => &self.sprites.collectible,
                    _ => return None,
                };
                Some((depth_key(e.pos), sprite.id, e.pos))
            })
            .collect();
        order.push((
            depth_key(self.player_pos),
            self.sprites.player.id,
            self.player_pos,
        ));
        order.sort_by(|a, b| a.0.total_cmp(&b.0));
        for (_, id, pos) in order {
            r.draw(id, pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{NullRenderer, PlaceholderAssets};

    fn game_with_props(props: Vec<Rect>) -> TrafficGame {
        TrafficGame::new(
            5,
            TrafficTuning::default(),
            TrafficSprites::load(&PlaceholderAssets),
            props,
        )
    }

    fn game() -> TrafficGame {
        game_with_props(Vec::new())
    }

    fn idle() -> InputFrame {
        InputFrame::default()
    }

    #[test]
    fn test_initial_collectible_seeding() {
        let g = game();
        let live = g.store.count(EntityKind::Collectible);
        // 20 attempts, some may be rejected by the distance rule
        assert!(live > 0 && live <= 20);
    }

    #[test]
    fn test_collectible_cap_holds_under_spam() {
        // Distance rule off and no initial seeding, so the cap alone
        // limits placement and the final count is exact
        let tuning = TrafficTuning {
            collectible_min_distance: 0.0,
            initial_collectible_attempts: 0,
            ..Default::default()
        };
        let mut g = TrafficGame::new(
            5,
            tuning,
            TrafficSprites::load(&PlaceholderAssets),
            Vec::new(),
        );
        for _ in 0..100 {
            g.try_spawn_collectible();
        }
        assert_eq!(g.store.count(EntityKind::Collectible), 20);
    }

    #[test]
    fn test_prop_blocks_movement_with_axis_snap() {
        let start = TrafficTuning::default().player_start;
        // Wall just right of the spawn point
        let wall = Rect::new(start + Vec2::new(60.0, 0.0), Vec2::new(20.0, 200.0));
        let mut g = game_with_props(vec![wall]);
        let input = InputFrame {
            move_dir: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        for _ in 0..60 {
            g.tick(&input, 1.0 / 60.0);
        }
        assert_eq!(g.phase, GamePhase::Playing);
        assert_eq!(g.player_hitbox().right(), wall.left());
        assert_eq!(g.player_pos.y, start.y);
    }

    #[test]
    fn test_vehicle_contact_ends_session() {
        let mut g = game();
        g.store.spawn(
            EntityKind::Hostile,
            g.player_pos,
            Vec2::ZERO,
            Vec2::new(100.0, 60.0),
        );
        let events = g.tick(&idle(), 1.0 / 60.0);
        assert_eq!(g.phase, GamePhase::GameOver);
        assert!(matches!(events.last(), Some(GameEvent::SessionEnded { .. })));
    }

    #[test]
    fn test_pickup_scores_and_respawns() {
        // No initial seeding, so the only bottle is the one placed here
        let tuning = TrafficTuning {
            initial_collectible_attempts: 0,
            ..Default::default()
        };
        let mut g = TrafficGame::new(
            5,
            tuning,
            TrafficSprites::load(&PlaceholderAssets),
            Vec::new(),
        );
        g.store.spawn(
            EntityKind::Collectible,
            g.player_pos,
            Vec2::ZERO,
            Vec2::new(64.0, 64.0),
        );
        let events = g.tick(&idle(), 1.0 / 60.0);
        assert!(events.contains(&GameEvent::PickupCollected));
        assert_eq!(g.score, 1);
        // The collected one died; a replacement was attempted
        assert!(g.store.count(EntityKind::Collectible) <= 1);
    }

    #[test]
    fn test_player_clamped_to_playable_area() {
        let mut g = game();
        let input = InputFrame {
            move_dir: Vec2::new(0.0, 1.0),
            ..Default::default()
        };
        for _ in 0..600 {
            g.tick(&input, 1.0 / 30.0);
            if g.phase == GamePhase::GameOver {
                return; // a vehicle got there first; clamp already exercised
            }
        }
        let bounds = Rect::new(g.player_pos, g.sprites.player.size);
        assert!(bounds.bottom() <= 3500.0);
    }

    #[test]
    fn test_vehicles_despawn_outside_range() {
        let mut g = game();
        g.store.spawn(
            EntityKind::Hostile,
            Vec2::new(3350.0, 2000.0),
            Vec2::new(300.0, 0.0),
            Vec2::new(100.0, 60.0),
        );
        g.advance_vehicles(1.0 / 3.0); // crosses x = 3400
        assert_eq!(g.store.count(EntityKind::Hostile), 0);
    }

    #[test]
    fn test_restart_reseeds_identically() {
        let mut g = game();
        for _ in 0..120 {
            g.tick(&idle(), 1.0 / 60.0);
        }
        g.phase = GamePhase::GameOver;
        g.restart();
        let once: Vec<Vec2> = g
            .store
            .each_alive(EntityKind::Collectible)
            .map(|c| c.pos)
            .collect();
        g.restart();
        let twice: Vec<Vec2> = g
            .store
            .each_alive(EntityKind::Collectible)
            .map(|c| c.pos)
            .collect();
        assert_eq!(once, twice);
        assert_eq!(g.score, 0);
        assert_eq!(g.player_pos, TrafficTuning::default().player_start);
    }

    #[test]
    fn test_draw_order_is_back_to_front() {
        let g = game();
        let mut r = NullRenderer::default();
        g.draw(&mut r);
        // Player plus every live collectible
        assert_eq!(r.draws, 1 + g.store.count(EntityKind::Collectible));
        // Emitted back to front: center y never decreases
        for pair in r.calls.windows(2) {
            assert!(pair[0].1.y <= pair[1].1.y);
        }
    }
}
