//! Data-driven per-game balance
//!
//! Each game keeps its own constants; the originals were tuned per game with
//! no shared intent (fire cooldown 0.3 vs 0.4, deadzone always 0.2), so the
//! values stay separate instead of being unified. A host may override any
//! struct from a JSON document; invalid or missing JSON falls back to the
//! defaults with a warning.

use glam::Vec2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::sim::DamageModel;

/// Deserialize a tuning struct from JSON, defaulting on any failure
pub fn from_json_or_default<T: DeserializeOwned + Default>(json: &str) -> T {
    match serde_json::from_str(json) {
        Ok(t) => t,
        Err(e) => {
            log::warn!("Invalid tuning JSON ({e}); using defaults");
            T::default()
        }
    }
}

/// Side-scrolling shooter/platformer balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestTuning {
    pub field_width: f32,
    pub field_height: f32,
    /// Frame rate cap for the session loop
    pub target_hz: u32,
    pub player_speed: f32,
    pub player_health: u32,
    /// Seconds of invincibility after a hit
    pub invincibility: f32,
    pub gravity: f32,
    /// Upward jump impulse (negative is up)
    pub jump_impulse: f32,
    pub jump_cooldown: f32,
    pub fire_cooldown: f32,
    pub projectile_speed: f32,
    pub hostile_speed: f32,
    /// Seconds between hostile spawns
    pub hostile_interval: f32,
    pub damage_model: DamageModel,
}

impl Default for ForestTuning {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 480.0,
            target_hz: 60,
            player_speed: 300.0,
            player_health: 3,
            invincibility: 1.0,
            gravity: 800.0,
            jump_impulse: -400.0,
            jump_cooldown: 0.2,
            fire_cooldown: 0.3,
            projectile_speed: 400.0,
            hostile_speed: 100.0,
            hostile_interval: 2.0,
            damage_model: DamageModel::HealthPool,
        }
    }
}

/// Asteroid shooter balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteorTuning {
    pub window_width: f32,
    pub window_height: f32,
    pub target_hz: u32,
    pub ship_speed: f32,
    pub laser_speed: f32,
    pub laser_cooldown: f32,
    pub meteor_speed: f32,
    /// Seconds between meteor spawns
    pub meteor_interval: f32,
    pub damage_model: DamageModel,
}

impl Default for MeteorTuning {
    fn default() -> Self {
        Self {
            window_width: 1280.0,
            window_height: 720.0,
            target_hz: 120,
            ship_speed: 800.0,
            laser_speed: 300.0,
            laser_cooldown: 0.4,
            meteor_speed: 200.0,
            meteor_interval: 0.5,
            damage_model: DamageModel::Instadeath,
        }
    }
}

/// Top-down driving/collectible balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficTuning {
    /// Playable area, world coordinates (min x, min y, max x, max y)
    pub area_min: Vec2,
    pub area_max: Vec2,
    pub target_hz: u32,
    pub player_start: Vec2,
    pub player_speed: f32,
    pub vehicle_speed: f32,
    /// Seconds between vehicle spawn attempts
    pub vehicle_interval: f32,
    /// Vehicles despawn outside this x range
    pub vehicle_despawn_x: (f32, f32),
    /// Fixed lane start positions; left-edge lanes drive right
    pub lanes: Vec<Vec2>,
    pub collectible_interval: f32,
    pub collectible_cap: usize,
    /// Minimum Chebyshev distance between collectibles
    pub collectible_min_distance: f32,
    /// Placement attempts made when a session starts
    pub initial_collectible_attempts: usize,
    pub damage_model: DamageModel,
}

impl Default for TrafficTuning {
    fn default() -> Self {
        Self {
            area_min: Vec2::new(640.0, 1180.0),
            area_max: Vec2::new(2560.0, 3500.0),
            target_hz: 60,
            player_start: Vec2::new(2062.0, 3274.0),
            player_speed: 200.0,
            vehicle_speed: 300.0,
            vehicle_interval: 0.12,
            vehicle_despawn_x: (-200.0, 3400.0),
            lanes: vec![
                Vec2::new(-150.0, 1500.0),
                Vec2::new(3320.0, 1800.0),
                Vec2::new(-150.0, 2100.0),
                Vec2::new(3320.0, 2400.0),
                Vec2::new(-150.0, 2700.0),
                Vec2::new(3320.0, 3000.0),
            ],
            collectible_interval: 3.0,
            collectible_cap: 20,
            collectible_min_distance: 100.0,
            initial_collectible_attempts: 20,
            damage_model: DamageModel::Instadeath,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_overrides_single_field() {
        let t: ForestTuning = from_json_or_default(r#"{"player_speed": 250.0}"#);
        assert_eq!(t.player_speed, 250.0);
        assert_eq!(t.player_health, 3);
    }

    #[test]
    fn test_invalid_json_falls_back_to_defaults() {
        let t: MeteorTuning = from_json_or_default("not json");
        assert_eq!(t.laser_cooldown, 0.4);
    }

    #[test]
    fn test_per_game_constants_stay_separate() {
        assert_eq!(ForestTuning::default().fire_cooldown, 0.3);
        assert_eq!(MeteorTuning::default().laser_cooldown, 0.4);
        assert_eq!(
            TrafficTuning::default().damage_model,
            DamageModel::Instadeath
        );
    }
}
