//! Background.rs
//!
//! Purely cosmetic decoration: the themed planets drifting behind the play
//! plane and the two parallax star layers. Nothing here feeds back into
//! gameplay.
//!
//! Planets never grow without bound. Once one falls farther than
//! `planet_despawn_distance` behind the player (measured in the play plane)
//! it is moved to a fresh spot inside the near band, which is what makes
//! space feel endless.

use crate::objects::config::GameConfig;
use crate::objects::gauss::{Gauss, GameRng, uniform};
use crate::objects::movables::Player;
use crate::objects::scene::SceneAssets;
use crate::objects::themes::Theme;
use bevy::color::{Alpha, Hsla, Hue};
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::PrimitiveTopology;
use log::debug;
use rand::Rng;

/// half width of the square each star layer is scattered over
const STAR_LAYER_EXTENT: f32 = 600.0;
const STAR_LAYER_FAR_DEPTH: f32 = -400.0;
const STAR_LAYER_NEAR_DEPTH: f32 = -200.0;

/// Planet struct: Component
///
/// Rotation about Y applied every tick, in radians.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Planet {
    pub spin: f32,
}

/// StarLayer struct: Component
///
/// One point cloud of background stars, kept at `player * fraction`. Higher
/// fractions follow the player more closely and so appear farther away.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct StarLayer {
    pub fraction: f32,
}

/// Everything random about a planet, rolled before anything is spawned.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetSpec {
    pub radius: f32,
    pub color: Color,
    pub ringed: bool,
    pub translation: Vec3,
    pub spin: f32,
}

/// Random point in the annulus `[min, max)` around `center`.
pub fn band_position<R: Rng + ?Sized>(rng: &mut R, center: Vec2, min: f32, max: f32) -> Vec2 {
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    let distance = uniform(rng, min, max);
    center + Vec2::from_angle(angle) * distance
}

/// Theme color with a small Gaussian hue shift so planets of one sector are
/// related but not identical.
pub fn jittered_color<R: Rng + ?Sized>(rng: &mut R, theme: &Theme, jitter: f32) -> Color {
    let base = Hsla::from(theme.srgba());
    match Gauss::clamped(0.0, jitter, -3.0 * jitter, 3.0 * jitter) {
        Some(gauss) => Color::from(base.rotate_hue(gauss.sample(rng))),
        None => Color::from(base),
    }
}

pub fn roll_planet<R: Rng + ?Sized>(
    rng: &mut R,
    theme: &Theme,
    config: &GameConfig,
    center: Vec2,
) -> PlanetSpec {
    let radius = uniform(rng, config.planet_radius_min, config.planet_radius_max);
    let color = jittered_color(rng, theme, config.planet_hue_jitter);
    let ringed = rng.random_bool(config.planet_ring_chance.clamp(0.0, 1.0));
    let xy = band_position(rng, center, config.planet_near_min, config.planet_near_max);
    let depth = uniform(rng, config.planet_depth_far, config.planet_depth_near);
    let spin = rng.random::<f32>() * config.planet_max_spin;

    PlanetSpec {
        radius,
        color,
        ringed,
        translation: xy.extend(depth),
        spin,
    }
}

/// Moves a planet that fell too far behind back into the near band, keeping
/// its depth. Returns whether it moved.
pub fn recycle_planet<R: Rng + ?Sized>(
    rng: &mut R,
    translation: &mut Vec3,
    player: Vec2,
    config: &GameConfig,
) -> bool {
    if translation.truncate().distance(player) <= config.planet_despawn_distance {
        return false;
    }

    let xy = band_position(rng, player, config.planet_near_min, config.planet_near_max);
    translation.x = xy.x;
    translation.y = xy.y;
    true
}

pub fn create_planet(
    commands: &mut Commands,
    materials: &mut Assets<StandardMaterial>,
    assets: &SceneAssets,
    planet: PlanetSpec,
) {
    let surface = materials.add(StandardMaterial {
        base_color: planet.color,
        emissive: planet.color.to_linear() * 0.1,
        perceptual_roughness: 0.8,
        metallic: 0.2,
        ..default()
    });

    let mut entity = commands.spawn((
        Mesh3d(assets.sphere.clone()),
        MeshMaterial3d(surface),
        Transform::from_translation(planet.translation).with_scale(Vec3::splat(planet.radius)),
        Planet { spin: planet.spin },
    ));

    if planet.ringed {
        let ring = materials.add(StandardMaterial {
            base_color: planet.color.with_alpha(0.6),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });
        entity.with_child((
            Mesh3d(assets.ring.clone()),
            MeshMaterial3d(ring),
            Transform::from_rotation(Quat::from_rotation_x(1.2)),
        ));
    }
}

pub fn clear_planets(commands: &mut Commands, planets: &Query<Entity, With<Planet>>) {
    for entity in planets {
        commands.entity(entity).despawn();
    }
}

pub fn update_planets(
    mut planets: Query<(&Planet, &mut Transform), Without<Player>>,
    player: Query<&Transform, With<Player>>,
    config: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
) {
    let Ok(player) = player.single() else {
        return;
    };
    let center = player.translation.truncate();

    for (planet, mut transform) in &mut planets {
        transform.rotate_y(planet.spin);
        if recycle_planet(&mut rng.0, &mut transform.translation, center, &config) {
            debug!("planet recycled to {:?}", transform.translation);
        }
    }
}

fn star_layer_mesh<R: Rng + ?Sized>(rng: &mut R, count: u32) -> Mesh {
    let positions: Vec<[f32; 3]> = (0..count)
        .map(|_| {
            [
                uniform(&mut *rng, -STAR_LAYER_EXTENT, STAR_LAYER_EXTENT),
                uniform(&mut *rng, -STAR_LAYER_EXTENT, STAR_LAYER_EXTENT),
                0.0,
            ]
        })
        .collect();
    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];

    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
}

pub fn setup_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
) {
    let layers = [
        (config.star_layer_far_fraction, STAR_LAYER_FAR_DEPTH, 0.5),
        (config.star_layer_near_fraction, STAR_LAYER_NEAR_DEPTH, 0.9),
    ];

    for (fraction, depth, brightness) in layers {
        let mesh = meshes.add(star_layer_mesh(&mut rng.0, config.stars_per_layer));
        let material = materials.add(StandardMaterial {
            base_color: Color::srgb(brightness, brightness, brightness),
            unlit: true,
            ..default()
        });
        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_xyz(0.0, 0.0, depth),
            StarLayer { fraction },
        ));
    }
}

pub fn update_starfield(
    mut layers: Query<(&StarLayer, &mut Transform), Without<Player>>,
    player: Query<&Transform, With<Player>>,
) {
    let Ok(player) = player.single() else {
        return;
    };

    for (layer, mut transform) in &mut layers {
        transform.translation.x = player.translation.x * layer.fraction;
        transform.translation.y = player.translation.y * layer.fraction;
    }
}
