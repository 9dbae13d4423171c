//! Movables.rs
//!
//! Everything that moves under the simulation's own integrator: the black
//! hole the player steers and the harvest stars it pulls in. All quantities
//! are per fixed tick, velocity is applied before position, and nothing here
//! touches the ECS beyond the component definitions, so the maths can be
//! tested directly.

use crate::objects::config::GameConfig;
use crate::objects::traits::collisions::{CollisionDetection, EventHorizon};
use bevy::math::FloatPow;
use bevy::prelude::*;
use rand::Rng;

/// Player struct: Component
///
/// The black hole. Its position and uniform scale live on the entity's
/// `Transform`; the planar velocity lives here.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct Player {
    pub velocity: Vec2,
}

/// Directional keys held during the current tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Arrow keys, with WASD as aliases.
    pub fn from_input(keys: &ButtonInput<KeyCode>) -> Self {
        HeldKeys {
            up: keys.any_pressed([KeyCode::ArrowUp, KeyCode::KeyW]),
            down: keys.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS]),
            left: keys.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]),
            right: keys.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]),
        }
    }
}

impl Player {
    /// One tick of steering: accelerate along every held axis, damp by
    /// `friction`, then move. Unbounded; the player may drift forever.
    pub fn integrate(
        &mut self,
        position: &mut Vec3,
        keys: HeldKeys,
        acceleration: f32,
        friction: f32,
    ) {
        if keys.up {
            self.velocity.y += acceleration;
        }
        if keys.down {
            self.velocity.y -= acceleration;
        }
        if keys.left {
            self.velocity.x -= acceleration;
        }
        if keys.right {
            self.velocity.x += acceleration;
        }

        self.velocity *= friction;
        position.x += self.velocity.x;
        position.y += self.velocity.y;
    }
}

/// First-order low-pass toward `target`: moves `fraction` of the remaining gap.
pub fn ease_toward(current: Vec2, target: Vec2, fraction: f32) -> Vec2 {
    current + (target - current) * fraction
}

pub fn player_scale(mass: f32) -> f32 {
    1.0 + mass * 0.05
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarvestKind {
    Normal,
    MassBonus,
    SpeedBonus,
}

/// HarvestProfile struct
///
/// The per-kind parameters, resolved once when a star spawns so the update
/// loop never branches on kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarvestProfile {
    /// numerator of the inverse-square pull
    pub force: f32,
    pub reward: f32,
    pub boosts: bool,
    pub banner: Option<&'static str>,
}

impl HarvestKind {
    pub const ALL: [HarvestKind; 3] = [
        HarvestKind::Normal,
        HarvestKind::MassBonus,
        HarvestKind::SpeedBonus,
    ];

    /// Weighted pick from a uniform `roll` in [0, 1).
    pub fn from_roll(roll: f32, config: &GameConfig) -> Self {
        if roll < config.mass_bonus_weight {
            HarvestKind::MassBonus
        } else if roll < config.mass_bonus_weight + config.speed_bonus_weight {
            HarvestKind::SpeedBonus
        } else {
            HarvestKind::Normal
        }
    }

    pub fn profile(&self, config: &GameConfig) -> HarvestProfile {
        match self {
            HarvestKind::Normal => HarvestProfile {
                force: config.normal_force,
                reward: config.mass_reward,
                boosts: false,
                banner: None,
            },
            HarvestKind::MassBonus => HarvestProfile {
                force: config.bonus_force,
                reward: config.mass_reward * config.mass_bonus_multiplier,
                boosts: false,
                banner: Some("MASSIVE COLLISION!"),
            },
            HarvestKind::SpeedBonus => HarvestProfile {
                force: config.bonus_force,
                reward: config.mass_reward,
                boosts: true,
                banner: Some("SINGULARITY ACCELERATED!"),
            },
        }
    }

    pub fn color(&self) -> Color {
        match self {
            HarvestKind::Normal => Color::WHITE,
            HarvestKind::MassBonus => Color::srgb(1.0, 0.0, 0.0),
            HarvestKind::SpeedBonus => Color::srgb(0.0, 1.0, 1.0),
        }
    }

    /// bonus stars carry a translucent halo
    pub fn has_halo(&self) -> bool {
        *self != HarvestKind::Normal
    }
}

/// What a star's tick decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarFate {
    Drifting,
    Collected,
    Despawned,
}

/// HarvestStar struct: Component
///
/// A collectible drifting toward the player. Position is the entity's
/// `Transform::translation` (z stays 0).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HarvestStar {
    pub kind: HarvestKind,
    pub profile: HarvestProfile,
    pub velocity: Vec3,
}

impl HarvestStar {
    pub fn new(kind: HarvestKind, config: &GameConfig, velocity: Vec3) -> Self {
        HarvestStar {
            kind,
            profile: kind.profile(config),
            velocity,
        }
    }

    /// One tick of gravity toward `horizon.center`.
    ///
    /// The distance used for both terminal checks is the one measured before
    /// the move. A star sitting exactly on the singularity is collected
    /// without applying any force.
    pub fn pull(
        &mut self,
        position: &mut Vec3,
        horizon: &EventHorizon,
        despawn_distance: f32,
    ) -> StarFate {
        let before = position.truncate();
        let diff = horizon.center - before;
        let distance = diff.length();

        if distance <= f32::EPSILON {
            return StarFate::Collected;
        }

        let force = self.profile.force / distance.squared();
        self.velocity += (diff / distance * force).extend(0.0);
        *position += self.velocity;

        if horizon.contains(before) {
            StarFate::Collected
        } else if distance > despawn_distance {
            StarFate::Despawned
        } else {
            StarFate::Drifting
        }
    }
}

/// Initial state of a new star: `distance` from `center` along `angle`, moving
/// tangentially (counter-clockwise) at `speed`.
pub fn spawn_placement(center: Vec2, angle: f32, distance: f32, speed: f32) -> (Vec3, Vec3) {
    let (sin, cos) = angle.sin_cos();
    let position = Vec3::new(center.x + cos * distance, center.y + sin * distance, 0.0);
    let velocity = Vec3::new(-sin, cos, 0.0) * speed;
    (position, velocity)
}

pub fn spawn_speed(level: u32, config: &GameConfig) -> f32 {
    config.spawn_speed_base + level as f32 * config.spawn_speed_per_level
}

/// Roll a complete new star around `center` for the given level.
pub fn roll_star<R: Rng + ?Sized>(
    rng: &mut R,
    center: Vec2,
    level: u32,
    config: &GameConfig,
) -> (HarvestStar, Vec3) {
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    let kind = HarvestKind::from_roll(rng.random::<f32>(), config);
    let (position, velocity) = spawn_placement(
        center,
        angle,
        config.spawn_distance,
        spawn_speed(level, config),
    );
    (HarvestStar::new(kind, config, velocity), position)
}
