//! Config.rs
//!
//! Gameplay tuning. [`GameConfig`] is a Bevy resource holding every constant
//! the simulation reads. The compiled defaults below are authoritative; at
//! startup [`load_game_config`] overlays `assets/game.toml` on top of them.
//! Keys missing from the file keep their default, so a config file only needs
//! the values being tuned.
//!
//! All per-frame quantities (acceleration, velocities, rotation speeds) are in
//! world units per fixed tick. The simulation runs at [`TICK_HZ`] ticks per
//! second.

use crate::objects::error::{GameError, GameResult};
use crate::objects::themes::{Theme, default_themes};
use bevy::prelude::*;
use log::{info, warn};
use serde::Deserialize;
use std::io::ErrorKind;

pub const CONFIG_PATH: &str = "assets/game.toml";

pub const TICK_HZ: f64 = 60.0;

// movement
pub const ACCELERATION: f32 = 0.01;
pub const FRICTION: f32 = 0.96;
pub const CAMERA_EASE: f32 = 0.05;
pub const CAMERA_HEIGHT: f32 = 20.0;

// harvest star spawning
pub const SPAWN_THRESHOLD: f32 = 0.05;
pub const SPAWN_LEVEL_FACTOR: f32 = 0.01;
pub const SPAWN_DISTANCE: f32 = 35.0;
pub const SPAWN_SPEED_BASE: f32 = 0.1;
pub const SPAWN_SPEED_PER_LEVEL: f32 = 0.05;
pub const MASS_BONUS_WEIGHT: f32 = 0.05;
pub const SPEED_BONUS_WEIGHT: f32 = 0.10;

// harvest star physics and rewards
pub const NORMAL_FORCE: f32 = 0.1;
pub const BONUS_FORCE: f32 = 0.3;
pub const MASS_REWARD: f32 = 0.25;
pub const MASS_BONUS_MULTIPLIER: f32 = 5.0;
pub const HORIZON_FACTOR: f32 = 1.3;
pub const MASS_RADIUS_CONSTANT: f32 = 1.2;
pub const DESPAWN_DISTANCE: f32 = 100.0;

// timed effects, in ticks
pub const BOOST_MULTIPLIER: f32 = 3.0;
pub const BOOST_TICKS: u64 = 300; // 5 s
pub const PICKUP_BANNER_TICKS: u64 = 90; // 1.5 s
pub const LEVEL_BANNER_TICKS: u64 = 120; // 2 s

// background
pub const PLANET_NEAR_MIN: f32 = 50.0;
pub const PLANET_NEAR_MAX: f32 = 100.0;
pub const PLANET_DESPAWN_DISTANCE: f32 = 150.0;
pub const PLANET_RADIUS_MIN: f32 = 2.0;
pub const PLANET_RADIUS_MAX: f32 = 6.0;
pub const PLANET_DEPTH_NEAR: f32 = -30.0;
pub const PLANET_DEPTH_FAR: f32 = -50.0;
pub const PLANET_MAX_SPIN: f32 = 0.01;
pub const PLANET_RING_CHANCE: f64 = 0.4;
pub const PLANET_HUE_JITTER: f32 = 12.0; // degrees, one standard deviation
pub const STARS_PER_LAYER: u32 = 400;
pub const STAR_LAYER_FAR_FRACTION: f32 = 0.95;
pub const STAR_LAYER_NEAR_FRACTION: f32 = 0.85;
pub const MAX_THEME_PLANETS: u32 = 64;

/// Which horizon decides that a harvest star has been swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionRule {
    /// `horizon_factor * player_scale`
    #[default]
    Scale,
    /// `mass_radius_constant * mass / 2`
    Mass,
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Movement ─────────────────────────────────────────────────────────────
    pub acceleration: f32,
    pub friction: f32,
    pub camera_ease: f32,

    // ── Spawning ─────────────────────────────────────────────────────────────
    pub spawn_threshold: f32,
    pub spawn_level_factor: f32,
    pub spawn_distance: f32,
    pub spawn_speed_base: f32,
    pub spawn_speed_per_level: f32,
    pub mass_bonus_weight: f32,
    pub speed_bonus_weight: f32,

    // ── Harvest physics and rewards ──────────────────────────────────────────
    pub normal_force: f32,
    pub bonus_force: f32,
    pub mass_reward: f32,
    pub mass_bonus_multiplier: f32,
    pub collection: CollectionRule,
    pub horizon_factor: f32,
    pub mass_radius_constant: f32,
    pub despawn_distance: f32,

    // ── Timed effects ────────────────────────────────────────────────────────
    pub boost_multiplier: f32,
    pub boost_ticks: u64,
    pub pickup_banner_ticks: u64,
    pub level_banner_ticks: u64,

    // ── Background ───────────────────────────────────────────────────────────
    pub planet_near_min: f32,
    pub planet_near_max: f32,
    pub planet_despawn_distance: f32,
    pub planet_radius_min: f32,
    pub planet_radius_max: f32,
    pub planet_depth_near: f32,
    pub planet_depth_far: f32,
    pub planet_max_spin: f32,
    pub planet_ring_chance: f64,
    pub planet_hue_jitter: f32,
    pub stars_per_layer: u32,
    pub star_layer_far_fraction: f32,
    pub star_layer_near_fraction: f32,

    // ── Sectors ──────────────────────────────────────────────────────────────
    pub themes: Vec<Theme>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            friction: FRICTION,
            camera_ease: CAMERA_EASE,
            spawn_threshold: SPAWN_THRESHOLD,
            spawn_level_factor: SPAWN_LEVEL_FACTOR,
            spawn_distance: SPAWN_DISTANCE,
            spawn_speed_base: SPAWN_SPEED_BASE,
            spawn_speed_per_level: SPAWN_SPEED_PER_LEVEL,
            mass_bonus_weight: MASS_BONUS_WEIGHT,
            speed_bonus_weight: SPEED_BONUS_WEIGHT,
            normal_force: NORMAL_FORCE,
            bonus_force: BONUS_FORCE,
            mass_reward: MASS_REWARD,
            mass_bonus_multiplier: MASS_BONUS_MULTIPLIER,
            collection: CollectionRule::default(),
            horizon_factor: HORIZON_FACTOR,
            mass_radius_constant: MASS_RADIUS_CONSTANT,
            despawn_distance: DESPAWN_DISTANCE,
            boost_multiplier: BOOST_MULTIPLIER,
            boost_ticks: BOOST_TICKS,
            pickup_banner_ticks: PICKUP_BANNER_TICKS,
            level_banner_ticks: LEVEL_BANNER_TICKS,
            planet_near_min: PLANET_NEAR_MIN,
            planet_near_max: PLANET_NEAR_MAX,
            planet_despawn_distance: PLANET_DESPAWN_DISTANCE,
            planet_radius_min: PLANET_RADIUS_MIN,
            planet_radius_max: PLANET_RADIUS_MAX,
            planet_depth_near: PLANET_DEPTH_NEAR,
            planet_depth_far: PLANET_DEPTH_FAR,
            planet_max_spin: PLANET_MAX_SPIN,
            planet_ring_chance: PLANET_RING_CHANCE,
            planet_hue_jitter: PLANET_HUE_JITTER,
            stars_per_layer: STARS_PER_LAYER,
            star_layer_far_fraction: STAR_LAYER_FAR_FRACTION,
            star_layer_near_fraction: STAR_LAYER_NEAR_FRACTION,
            themes: default_themes(),
        }
    }
}

fn require(ok: bool, name: &'static str, value: f32, expected: &'static str) -> GameResult<()> {
    if ok {
        Ok(())
    } else {
        Err(GameError::InvalidSetting {
            name,
            value,
            expected,
        })
    }
}

impl GameConfig {
    pub fn from_toml(contents: &str, path: &str) -> GameResult<Self> {
        let config: GameConfig = toml::from_str(contents).map_err(|source| GameError::ConfigParse {
            path: path.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> GameResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&contents, path)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> GameResult<()> {
        require(
            self.friction > 0.0 && self.friction <= 1.0,
            "friction",
            self.friction,
            "a value in (0, 1]",
        )?;
        require(
            self.camera_ease > 0.0 && self.camera_ease <= 1.0,
            "camera_ease",
            self.camera_ease,
            "a value in (0, 1]",
        )?;
        require(
            self.spawn_distance > 0.0,
            "spawn_distance",
            self.spawn_distance,
            "a positive distance",
        )?;
        require(
            self.despawn_distance > self.spawn_distance,
            "despawn_distance",
            self.despawn_distance,
            "a distance beyond spawn_distance",
        )?;
        require(
            self.mass_bonus_weight >= 0.0,
            "mass_bonus_weight",
            self.mass_bonus_weight,
            "a non-negative weight",
        )?;
        require(
            self.speed_bonus_weight >= 0.0,
            "speed_bonus_weight",
            self.speed_bonus_weight,
            "a non-negative weight",
        )?;
        require(
            self.mass_bonus_weight + self.speed_bonus_weight <= 1.0,
            "speed_bonus_weight",
            self.speed_bonus_weight,
            "bonus weights summing to at most 1",
        )?;
        require(
            self.planet_near_min > 0.0 && self.planet_near_min < self.planet_near_max,
            "planet_near_min",
            self.planet_near_min,
            "a positive distance below planet_near_max",
        )?;
        require(
            self.planet_near_max <= self.planet_despawn_distance,
            "planet_near_max",
            self.planet_near_max,
            "a distance within planet_despawn_distance",
        )?;
        require(
            self.planet_radius_min > 0.0 && self.planet_radius_min < self.planet_radius_max,
            "planet_radius_min",
            self.planet_radius_min,
            "a positive radius below planet_radius_max",
        )?;
        require(
            self.boost_multiplier >= 1.0,
            "boost_multiplier",
            self.boost_multiplier,
            "a multiplier of at least 1",
        )?;
        if self.themes.is_empty() {
            return Err(GameError::EmptyThemeTable);
        }
        for theme in &self.themes {
            require(
                theme.planet_count <= MAX_THEME_PLANETS,
                "planet_count",
                theme.planet_count as f32,
                "at most 64 planets per theme",
            )?;
        }
        Ok(())
    }
}

/// Startup system: overwrite the [`GameConfig`] resource from
/// `assets/game.toml` when that file is present and valid.
///
/// A missing file is normal. Parse or validation failures are logged and the
/// compiled defaults stay in place.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match GameConfig::from_file(CONFIG_PATH) {
        Ok(loaded) => {
            *config = loaded;
            info!("loaded game config from {CONFIG_PATH}");
        }
        Err(GameError::ConfigRead { source, .. }) if source.kind() == ErrorKind::NotFound => {
            info!("no {CONFIG_PATH} found; using compiled defaults");
        }
        Err(e) => {
            warn!("{e}; using compiled defaults");
        }
    }
}
