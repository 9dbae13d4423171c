use crate::objects::config::{CollectionRule, GameConfig};
use bevy::prelude::*;

/// Anything with a circular capture area in the play plane.
pub trait CollisionDetection {
    fn get_position(&self) -> Vec2;
    fn get_radius(&self) -> f32;

    fn distance_to(&self, point: Vec2) -> f32 {
        self.get_position().distance(point)
    }

    /// Strict overlap: a point on the edge is outside.
    fn contains(&self, point: Vec2) -> bool {
        self.distance_to(point) < self.get_radius()
    }
}

/// The capture circle around the black hole for the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventHorizon {
    pub center: Vec2,
    pub radius: f32,
}

impl EventHorizon {
    pub fn for_player(config: &GameConfig, center: Vec2, scale: f32, mass: f32) -> Self {
        EventHorizon {
            center,
            radius: collection_radius(config, scale, mass),
        }
    }
}

impl CollisionDetection for EventHorizon {
    fn get_position(&self) -> Vec2 {
        self.center
    }

    fn get_radius(&self) -> f32 {
        self.radius
    }
}

pub fn collection_radius(config: &GameConfig, scale: f32, mass: f32) -> f32 {
    match config.collection {
        CollectionRule::Scale => config.horizon_factor * scale,
        CollectionRule::Mass => config.mass_radius_constant * mass / 2.0,
    }
}
