use bevy::color::Alpha;
use bevy::prelude::*;
use log::{debug, info};
use rand::Rng;

use crate::objects::background::{
    Planet, clear_planets, create_planet, roll_planet, setup_starfield, update_planets,
    update_starfield,
};
use crate::objects::clocks::{Notification, SpeedBoost};
use crate::objects::config::{CAMERA_HEIGHT, GameConfig, TICK_HZ, load_game_config};
use crate::objects::gamestate::{GameState, SectorState};
use crate::objects::gauss::GameRng;
use crate::objects::hud::{setup_hud, sync_hud};
use crate::objects::movables::{
    HarvestStar, HeldKeys, Player, StarFate, ease_toward, roll_star,
};
use crate::objects::scene::{SceneAssets, setup_scene_assets};
use crate::objects::themes::{planets_for_level, theme_index};
use crate::objects::traits::collisions::EventHorizon;

/// rendered radius of a harvest star
const STAR_RADIUS: f32 = 0.2;
const BLACK_HOLE_RADIUS: f32 = 1.5;
const LEVEL_BANNER: &str = "SECTOR CLEARED";

/// MainCamera struct: Component
#[derive(Component)]
pub struct MainCamera;

/// AccretionDisc struct: Component
///
/// The ring around the black hole; its material takes the sector's color.
#[derive(Component)]
pub struct AccretionDisc;

pub struct BlackHoleHarvest;

impl Plugin for BlackHoleHarvest {
    fn build(&self, app: &mut App) {
        app.insert_resource(GameConfig::default());
        app.insert_resource(GameState::new());
        app.init_resource::<SectorState>();
        app.init_resource::<SpeedBoost>();
        app.init_resource::<Notification>();
        app.init_resource::<GameRng>();
        app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ));
        app.add_systems(
            Startup,
            (
                load_game_config,
                setup_scene_assets,
                setup_objects,
                setup_starfield,
                setup_hud,
            )
                .chain(),
        );
        // one fixed tick is one simulation frame; the order below is the frame
        app.add_systems(
            FixedUpdate,
            (
                tick_clocks,
                steer_player,
                follow_camera,
                spawn_harvest_stars,
                update_harvest_stars,
                advance_level,
                refresh_sector,
                update_planets,
            )
                .chain(),
        );
        app.add_systems(Update, (update_starfield, sync_hud));
    }
}

fn setup_objects(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    assets: Res<SceneAssets>,
) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            far: 3000.0,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, CAMERA_HEIGHT),
        MainCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 3000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 5.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let core = materials.add(StandardMaterial {
        base_color: Color::BLACK,
        unlit: true,
        ..default()
    });
    let disc = materials.add(StandardMaterial {
        base_color: Color::srgba_u8(0x00, 0xd2, 0xff, 0xb3),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    let disc_mesh = meshes.add(Torus {
        minor_radius: 0.02,
        major_radius: 2.2,
    });

    commands
        .spawn((Player::default(), Transform::default(), Visibility::default()))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(assets.sphere.clone()),
                MeshMaterial3d(core),
                Transform::from_scale(Vec3::splat(BLACK_HOLE_RADIUS)),
            ));
            parent.spawn((
                Mesh3d(disc_mesh),
                MeshMaterial3d(disc),
                Transform::from_rotation(Quat::from_rotation_x(std::f32::consts::PI / 2.1)),
                AccretionDisc,
            ));
        });
}

pub fn tick_clocks(
    mut state: ResMut<GameState>,
    mut boost: ResMut<SpeedBoost>,
    mut notification: ResMut<Notification>,
) {
    let now = state.tick();
    if boost.expire(now) {
        info!("speed boost expired at tick {now}");
    }
    notification.expire(now);
}

pub fn steer_player(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    boost: Res<SpeedBoost>,
    mut players: Query<(&mut Player, &mut Transform)>,
) {
    let Ok((mut player, mut transform)) = players.single_mut() else {
        return;
    };

    player.integrate(
        &mut transform.translation,
        HeldKeys::from_input(&keys),
        boost.acceleration(config.acceleration),
        config.friction,
    );
}

pub fn follow_camera(
    config: Res<GameConfig>,
    players: Query<&Transform, With<Player>>,
    mut cameras: Query<&mut Transform, (With<MainCamera>, Without<Player>)>,
) {
    let (Ok(player), Ok(mut camera)) = (players.single(), cameras.single_mut()) else {
        return;
    };

    let eased = ease_toward(
        camera.translation.truncate(),
        player.translation.truncate(),
        config.camera_ease,
    );
    camera.translation.x = eased.x;
    camera.translation.y = eased.y;
}

pub fn spawn_star(
    commands: &mut Commands,
    assets: &SceneAssets,
    star: HarvestStar,
    position: Vec3,
) {
    let mut entity = commands.spawn((
        Mesh3d(assets.sphere.clone()),
        MeshMaterial3d(assets.star_material(star.kind)),
        Transform::from_translation(position).with_scale(Vec3::splat(STAR_RADIUS)),
        star,
    ));

    if star.kind.has_halo() {
        entity.with_child((
            Mesh3d(assets.sphere.clone()),
            MeshMaterial3d(assets.halo_material(star.kind)),
            Transform::from_scale(Vec3::splat(2.0)),
        ));
    }
}

pub fn spawn_harvest_stars(
    mut commands: Commands,
    state: Res<GameState>,
    config: Res<GameConfig>,
    assets: Res<SceneAssets>,
    mut rng: ResMut<GameRng>,
    players: Query<&Transform, With<Player>>,
) {
    let Ok(player) = players.single() else {
        return;
    };

    if rng.0.random::<f32>() >= state.spawn_chance(&config) {
        return;
    }

    let (star, position) = roll_star(
        &mut rng.0,
        player.translation.truncate(),
        state.level,
        &config,
    );
    debug!("spawned {:?} star at {position:?}", star.kind);
    spawn_star(&mut commands, &assets, star, position);
}

pub fn update_harvest_stars(
    mut commands: Commands,
    mut stars: Query<(Entity, &mut HarvestStar, &mut Transform), Without<Player>>,
    mut players: Query<&mut Transform, With<Player>>,
    mut state: ResMut<GameState>,
    mut boost: ResMut<SpeedBoost>,
    mut notification: ResMut<Notification>,
    config: Res<GameConfig>,
) {
    let Ok(mut player) = players.single_mut() else {
        return;
    };

    for (entity, mut star, mut transform) in &mut stars {
        // the horizon grows as stars are swallowed within the same tick
        let horizon = EventHorizon::for_player(
            &config,
            player.translation.truncate(),
            player.scale.x,
            state.mass,
        );

        match star.pull(&mut transform.translation, &horizon, config.despawn_distance) {
            StarFate::Drifting => {}
            StarFate::Despawned => {
                commands.entity(entity).despawn();
            }
            StarFate::Collected => {
                let profile = star.profile;
                let reached = state.absorb(profile.reward);
                let now = state.frame;

                if profile.boosts {
                    let extended = boost.is_active();
                    boost.trigger(now, config.boost_ticks, config.boost_multiplier);
                    if extended {
                        info!("speed boost extended to tick {}", now + config.boost_ticks);
                    } else {
                        info!("speed boost active until tick {}", now + config.boost_ticks);
                    }
                }
                if let Some(text) = profile.banner {
                    notification.show(text, now, config.pickup_banner_ticks);
                }

                player.scale = Vec3::splat(state.player_scale());
                debug!(
                    "collected {:?} star, mass {:.2}/{:.2}",
                    star.kind, state.mass, state.goal
                );
                commands.entity(entity).despawn();
                // the rest wait for the next tick, pulled toward the reset player
                if reached {
                    info!("goal of level {} reached", state.level);
                    break;
                }
            }
        }
    }
}

pub fn advance_level(
    mut state: ResMut<GameState>,
    config: Res<GameConfig>,
    mut notification: ResMut<Notification>,
    mut players: Query<(&mut Player, &mut Transform)>,
) {
    if !state.goal_reached() {
        return;
    }

    state.advance_level();
    if let Ok((mut player, mut transform)) = players.single_mut() {
        player.velocity = Vec2::ZERO;
        transform.translation = Vec3::ZERO;
        transform.scale = Vec3::ONE;
    }
    notification.show(LEVEL_BANNER, state.frame, config.level_banner_ticks);
    info!("entering level {} with goal {:.2}", state.level, state.goal);
}

/// Rebuilds the planet field and tints the accretion disc whenever the
/// level differs from the one the sector was last built for.
pub fn refresh_sector(
    mut commands: Commands,
    mut sector: ResMut<SectorState>,
    state: Res<GameState>,
    config: Res<GameConfig>,
    assets: Res<SceneAssets>,
    mut rng: ResMut<GameRng>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    planets: Query<Entity, With<Planet>>,
    players: Query<&Transform, With<Player>>,
    discs: Query<&MeshMaterial3d<StandardMaterial>, With<AccretionDisc>>,
) {
    if sector.is_current(state.level) {
        return;
    }

    let index = theme_index(state.level, config.themes.len());
    let Some(theme) = config.themes.get(index) else {
        return;
    };
    let center = players
        .single()
        .map(|player| player.translation.truncate())
        .unwrap_or(Vec2::ZERO);

    clear_planets(&mut commands, &planets);
    let count = planets_for_level(theme, state.level, config.themes.len());
    for _ in 0..count {
        let planet = roll_planet(&mut rng.0, theme, &config, center);
        create_planet(&mut commands, &mut materials, &assets, planet);
    }

    for disc in &discs {
        if let Some(material) = materials.get_mut(&disc.0) {
            material.base_color = theme.bevy_color().with_alpha(0.7);
            material.emissive = theme.bevy_color().to_linear() * 2.0;
        }
    }

    sector.built_for = Some(state.level);
    sector.name = theme.banner();
    info!(
        "sector {} built with {count} planets for level {}",
        sector.name, state.level
    );
}
