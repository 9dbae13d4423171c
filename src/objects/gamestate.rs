//! Gamestate.rs
//!
//! This module defines the overall game state: the level being played, the
//! black hole's mass (the score) and the mass needed to clear the level.

use crate::objects::config::GameConfig;
use crate::objects::movables::player_scale;
use bevy::prelude::*;

pub const FIRST_GOAL: f32 = 10.0;
pub const STARTING_MASS: f32 = 1.0;

/// GameState struct: Resource
///
/// 1. level - 1-based level counter, never capped
/// 2. mass - grows with every collected star, resets to 1.0 on level up
/// 3. goal - mass at which the current level is cleared
/// 4. frame - fixed ticks since startup; the clock every timed effect reads
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameState {
    pub level: u32,
    pub mass: f32,
    pub goal: f32,
    pub frame: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            level: 1,
            mass: STARTING_MASS,
            goal: FIRST_GOAL,
            frame: 0,
        }
    }

    /// Level 1 has a fixed goal; every later level needs `10 + 5 * level`.
    pub fn goal_for_level(level: u32) -> f32 {
        if level <= 1 {
            FIRST_GOAL
        } else {
            10.0 + level as f32 * 5.0
        }
    }

    pub fn tick(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    /// Add collected mass. Negative rewards are ignored so mass never shrinks
    /// within a level. Returns whether the goal is now met.
    pub fn absorb(&mut self, reward: f32) -> bool {
        self.mass += reward.max(0.0);
        self.goal_reached()
    }

    pub fn goal_reached(&self) -> bool {
        self.mass >= self.goal
    }

    pub fn advance_level(&mut self) {
        self.level += 1;
        self.mass = STARTING_MASS;
        self.goal = Self::goal_for_level(self.level);
    }

    pub fn player_scale(&self) -> f32 {
        player_scale(self.mass)
    }

    /// Per-tick probability of a new harvest star; rises with the level.
    pub fn spawn_chance(&self, config: &GameConfig) -> f32 {
        (config.spawn_threshold + self.level as f32 * config.spawn_level_factor).clamp(0.0, 1.0)
    }
}

/// SectorState struct: Resource
///
/// Which level the planet field and disc tint were last built for. When it
/// differs from `GameState::level` the sector is rebuilt.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SectorState {
    pub built_for: Option<u32>,
    pub name: String,
}

impl SectorState {
    pub fn is_current(&self, level: u32) -> bool {
        self.built_for == Some(level)
    }
}
