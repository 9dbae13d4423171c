//! Headless tests for the per-tick game loop.
//!
//! These use [`MinimalPlugins`] with the simulation systems registered in
//! `Update`, so every `app.update()` is exactly one simulation tick. No
//! window, renderer or asset server is created; asset stores are plain
//! resources and the shared scene handles are defaults.

use bevy::prelude::*;
use black_hole_harvest::objects::background::{
    Planet, StarLayer, setup_starfield, update_planets, update_starfield,
};
use black_hole_harvest::objects::clocks::{Notification, SpeedBoost};
use black_hole_harvest::objects::config::{CAMERA_HEIGHT, GameConfig};
use black_hole_harvest::objects::gamestate::{GameState, SectorState};
use black_hole_harvest::objects::gauss::GameRng;
use black_hole_harvest::objects::hud::{Banner, HudField, setup_hud, sync_hud};
use black_hole_harvest::objects::movables::{HarvestKind, HarvestStar, Player};
use black_hole_harvest::objects::plugins::{
    MainCamera, advance_level, follow_camera, refresh_sector, spawn_harvest_stars, steer_player,
    tick_clocks, update_harvest_stars,
};
use black_hole_harvest::objects::scene::SceneAssets;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Config with spawning switched off so only hand-placed stars exist.
fn quiet_config() -> GameConfig {
    GameConfig {
        spawn_threshold: 0.0,
        spawn_level_factor: 0.0,
        ..Default::default()
    }
}

fn test_app(config: GameConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.init_resource::<Assets<Mesh>>();
    app.init_resource::<Assets<StandardMaterial>>();
    app.init_resource::<ButtonInput<KeyCode>>();
    app.insert_resource(config);
    app.insert_resource(GameState::new());
    app.init_resource::<SectorState>();
    app.init_resource::<SpeedBoost>();
    app.init_resource::<Notification>();
    app.insert_resource(GameRng::seeded(42));
    app.insert_resource(SceneAssets::default());
    app.add_systems(
        Update,
        (
            tick_clocks,
            steer_player,
            spawn_harvest_stars,
            update_harvest_stars,
            advance_level,
            refresh_sector,
            update_planets,
        )
            .chain(),
    );
    app.world_mut().spawn((Player::default(), Transform::default()));
    app
}

/// App running only the per-frame display systems: camera follow, starfield
/// parallax and the HUD.
fn display_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.init_resource::<Assets<Mesh>>();
    app.init_resource::<Assets<StandardMaterial>>();
    app.insert_resource(GameConfig::default());
    app.insert_resource(GameState::new());
    app.init_resource::<SectorState>();
    app.init_resource::<Notification>();
    app.insert_resource(GameRng::seeded(7));
    app.add_systems(Startup, (setup_starfield, setup_hud));
    app.add_systems(Update, (follow_camera, update_starfield, sync_hud));
    app.world_mut().spawn((Player::default(), Transform::default()));
    app.world_mut()
        .spawn((MainCamera, Transform::from_xyz(0.0, 0.0, CAMERA_HEIGHT)));
    app
}

fn place_star(app: &mut App, kind: HarvestKind, position: Vec3) {
    let config = app.world().resource::<GameConfig>().clone();
    app.world_mut().spawn((
        HarvestStar::new(kind, &config, Vec3::ZERO),
        Transform::from_translation(position),
    ));
}

fn count<C: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query::<&C>();
    query.iter(world).count()
}

fn player_transform(app: &mut App) -> Transform {
    let world = app.world_mut();
    let mut query = world.query_filtered::<&Transform, With<Player>>();
    *query.iter(world).next().expect("player exists")
}

fn set_player_translation(app: &mut App, translation: Vec3) {
    let world = app.world_mut();
    let mut query = world.query_filtered::<&mut Transform, With<Player>>();
    for mut transform in query.iter_mut(world) {
        transform.translation = translation;
    }
}

fn planet_translations(app: &mut App) -> Vec<Vec3> {
    let world = app.world_mut();
    let mut query = world.query_filtered::<&Transform, With<Planet>>();
    query.iter(world).map(|t| t.translation).collect()
}

fn camera_translation(app: &mut App) -> Vec3 {
    let world = app.world_mut();
    let mut query = world.query_filtered::<&Transform, With<MainCamera>>();
    query.iter(world).next().expect("camera exists").translation
}

fn banner(app: &mut App) -> (String, Visibility) {
    let world = app.world_mut();
    let mut query = world.query_filtered::<(&Text, &Visibility), With<Banner>>();
    let (text, visibility) = query.iter(world).next().expect("banner exists");
    (text.0.clone(), *visibility)
}

fn hud_value(app: &mut App, field: HudField) -> String {
    let world = app.world_mut();
    let mut query = world.query::<(&TextSpan, &HudField)>();
    query
        .iter(world)
        .find(|(_, f)| **f == field)
        .map(|(span, _)| span.0.clone())
        .expect("readout exists")
}

fn game_state(app: &App) -> GameState {
    app.world().resource::<GameState>().clone()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// A normal star dropped from rest is swallowed for the default reward and
/// the black hole grows to match.
#[test]
fn normal_star_is_collected_for_default_reward() {
    let mut app = test_app(quiet_config());
    place_star(&mut app, HarvestKind::Normal, Vec3::new(5.0, 0.0, 0.0));

    let mut ticks = 0;
    while count::<HarvestStar>(&mut app) > 0 {
        app.update();
        ticks += 1;
        assert!(ticks < 1000, "star was never collected");
    }

    let state = game_state(&app);
    assert_eq!(state.level, 1);
    assert!((state.mass - 1.25).abs() < 1e-6, "mass = {}", state.mass);

    let scale = player_transform(&mut app).scale;
    assert!((scale.x - (1.0 + state.mass * 0.05)).abs() < 1e-6);
    assert_eq!(scale.x, scale.y);
}

/// A collected star is gone on the next tick and pays out only once.
#[test]
fn collection_happens_once() {
    let mut app = test_app(quiet_config());
    place_star(&mut app, HarvestKind::Normal, Vec3::new(1.0, 0.0, 0.0));

    app.update();
    assert_eq!(count::<HarvestStar>(&mut app), 0);
    let after_first = game_state(&app).mass;

    for _ in 0..5 {
        app.update();
    }
    assert_eq!(game_state(&app).mass, after_first);
}

/// Stars beyond the despawn distance vanish without touching the score.
#[test]
fn distant_star_despawns_without_reward() {
    let config = quiet_config();
    let far = config.despawn_distance + 5.0;
    let mut app = test_app(config);
    place_star(&mut app, HarvestKind::MassBonus, Vec3::new(0.0, far, 0.0));

    app.update();

    assert_eq!(count::<HarvestStar>(&mut app), 0);
    assert_eq!(game_state(&app).mass, 1.0);
}

/// The first tick builds the level 1 sector from the first theme.
#[test]
fn first_tick_builds_first_sector() {
    let mut app = test_app(quiet_config());
    app.update();

    let sector = app.world().resource::<SectorState>().clone();
    assert_eq!(sector.built_for, Some(1));
    assert_eq!(sector.name, "VERIDIAN SYSTEM");
    assert_eq!(count::<Planet>(&mut app), 3);
}

/// Crossing the goal advances the level, resets the player and rebuilds the
/// sector with the next theme.
#[test]
fn reaching_goal_advances_level() {
    let mut app = test_app(quiet_config());
    app.update();

    app.world_mut().resource_mut::<GameState>().mass = 9.9;
    set_player_translation(&mut app, Vec3::new(12.0, -3.0, 0.0));
    place_star(&mut app, HarvestKind::Normal, Vec3::new(12.5, -3.0, 0.0));
    app.update();

    let state = game_state(&app);
    assert_eq!(state.level, 2);
    assert_eq!(state.mass, 1.0);
    assert_eq!(state.goal, 20.0);

    let player = player_transform(&mut app);
    assert_eq!(player.translation, Vec3::ZERO);
    assert_eq!(player.scale, Vec3::ONE);

    let notification = app.world().resource::<Notification>();
    assert!(notification.is_visible());
    assert_eq!(notification.text, "SECTOR CLEARED");

    let sector = app.world().resource::<SectorState>().clone();
    assert_eq!(sector.built_for, Some(2));
    assert_eq!(sector.name, "IRON CORE NEBULA");
    assert_eq!(count::<Planet>(&mut app), 4);
}

/// Stars still in the loop when the goal is met wait for the next tick and
/// pay into the new level.
#[test]
fn stars_after_the_goal_count_toward_the_next_level() {
    let mut app = test_app(quiet_config());
    app.update();

    app.world_mut().resource_mut::<GameState>().mass = 9.9;
    place_star(&mut app, HarvestKind::Normal, Vec3::new(1.0, 0.0, 0.0));
    place_star(&mut app, HarvestKind::Normal, Vec3::new(-1.0, 0.0, 0.0));
    app.update();

    let state = game_state(&app);
    assert_eq!(state.level, 2);
    assert_eq!(state.mass, 1.0);
    assert_eq!(count::<HarvestStar>(&mut app), 1);

    app.update();
    let state = game_state(&app);
    assert_eq!(state.level, 2);
    assert!((state.mass - 1.25).abs() < 1e-6, "mass = {}", state.mass);
    assert_eq!(count::<HarvestStar>(&mut app), 0);
}

/// Mass never drops while a level is in progress.
#[test]
fn mass_is_monotonic_within_a_level() {
    let config = GameConfig {
        spawn_threshold: 1.0,
        ..Default::default()
    };
    let mut app = test_app(config);

    let mut last = game_state(&app);
    for _ in 0..600 {
        app.update();
        let now = game_state(&app);
        if now.level == last.level {
            assert!(now.mass >= last.mass);
        } else {
            assert_eq!(now.mass, 1.0);
        }
        last = now;
    }
}

/// Holding a direction key moves the black hole along that axis only.
#[test]
fn held_arrow_key_moves_player() {
    let mut app = test_app(quiet_config());
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::ArrowRight);

    for _ in 0..10 {
        app.update();
    }

    let player = player_transform(&mut app);
    assert!(player.translation.x > 0.0);
    assert_eq!(player.translation.y, 0.0);
    assert_eq!(player.translation.z, 0.0);
}

/// A second speed pickup before the first boost ends extends it; the boost
/// ends once, relative to the latest pickup.
#[test]
fn second_speed_pickup_extends_boost() {
    let config = quiet_config();
    let boost_ticks = config.boost_ticks;
    let mut app = test_app(config);

    place_star(&mut app, HarvestKind::SpeedBonus, Vec3::new(1.0, 0.0, 0.0));
    app.update();
    let first = game_state(&app).frame;
    assert!(app.world().resource::<SpeedBoost>().is_active());

    for _ in 0..100 {
        app.update();
    }
    place_star(&mut app, HarvestKind::SpeedBonus, Vec3::new(0.0, 1.0, 0.0));
    app.update();
    let second = game_state(&app).frame;
    assert_eq!(second, first + 101);

    while game_state(&app).frame < first + boost_ticks {
        app.update();
    }
    assert!(
        app.world().resource::<SpeedBoost>().is_active(),
        "the first pickup's expiry must have been replaced"
    );

    while game_state(&app).frame < second + boost_ticks {
        app.update();
    }
    let boost = app.world().resource::<SpeedBoost>();
    assert!(!boost.is_active());
    assert_eq!(boost.acceleration(0.01), 0.01);
}

/// When the player flies far away the planets follow into the near band.
#[test]
fn planets_are_recycled_around_a_moved_player() {
    let config = quiet_config();
    let (near_min, near_max) = (config.planet_near_min, config.planet_near_max);
    let mut app = test_app(config);
    app.update();

    let player = Vec3::new(1000.0, 400.0, 0.0);
    set_player_translation(&mut app, player);
    app.update();

    let planets = planet_translations(&mut app);
    assert_eq!(planets.len(), 3);
    for planet in planets {
        let d = planet.truncate().distance(player.truncate());
        assert!(d >= near_min - 1e-3 && d <= near_max + 1e-3, "distance {d}");
    }
}

/// With the spawn chance forced to 1 a star appears every tick on the
/// spawn ring.
#[test]
fn certain_spawn_chance_spawns_every_tick() {
    let config = GameConfig {
        spawn_threshold: 1.0,
        ..Default::default()
    };
    let mut app = test_app(config);

    for _ in 0..5 {
        app.update();
    }
    assert_eq!(count::<HarvestStar>(&mut app), 5);
}

/// The camera closes a fixed fraction of the gap in x and y and keeps its
/// height.
#[test]
fn camera_eases_toward_player_at_fixed_height() {
    let mut app = display_app();
    set_player_translation(&mut app, Vec3::new(10.0, -20.0, 0.0));

    app.update();
    let camera = camera_translation(&mut app);
    assert!((camera.x - 0.5).abs() < 1e-6);
    assert!((camera.y + 1.0).abs() < 1e-6);
    assert_eq!(camera.z, CAMERA_HEIGHT);

    app.update();
    let camera = camera_translation(&mut app);
    assert!((camera.x - 0.975).abs() < 1e-5);
    assert!((camera.y + 1.95).abs() < 1e-5);
    assert_eq!(camera.z, CAMERA_HEIGHT);
}

/// Each star layer sits at the player's planar position scaled by its
/// fraction, at its own fixed depth.
#[test]
fn star_layers_follow_player_by_fraction() {
    let mut app = display_app();
    app.update();

    let player = Vec3::new(100.0, -40.0, 0.0);
    set_player_translation(&mut app, player);
    app.update();

    let world = app.world_mut();
    let mut query = world.query::<(&StarLayer, &Transform)>();
    let mut layers: Vec<(f32, Vec3)> = query
        .iter(world)
        .map(|(layer, transform)| (layer.fraction, transform.translation))
        .collect();
    layers.sort_by(|a, b| a.0.total_cmp(&b.0));

    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].0, 0.85);
    assert_eq!(layers[1].0, 0.95);
    for (fraction, translation) in layers {
        assert!((translation.x - player.x * fraction).abs() < 1e-4);
        assert!((translation.y - player.y * fraction).abs() < 1e-4);
    }
}

/// The readouts show the live game state.
#[test]
fn hud_readouts_track_game_state() {
    let mut app = display_app();
    {
        let mut state = app.world_mut().resource_mut::<GameState>();
        state.level = 3;
        state.mass = 4.5;
        state.goal = 25.0;
    }
    app.world_mut().resource_mut::<SectorState>().name = "FROZEN EXPANSE".to_string();
    app.update();

    assert_eq!(hud_value(&mut app, HudField::Sector), "FROZEN EXPANSE");
    assert_eq!(hud_value(&mut app, HudField::Level), "3");
    assert_eq!(hud_value(&mut app, HudField::Mass), "4.50");
    assert_eq!(hud_value(&mut app, HudField::Goal), "25.00");

    app.world_mut().resource_mut::<GameState>().mass = 7.25;
    app.update();
    assert_eq!(hud_value(&mut app, HudField::Mass), "7.25");
}

/// The banner is shown only while a notification is active.
#[test]
fn banner_visible_only_while_notification_is_active() {
    let mut app = display_app();
    app.update();
    assert_eq!(banner(&mut app).1, Visibility::Hidden);

    app.world_mut()
        .resource_mut::<Notification>()
        .show("MASSIVE COLLISION!", 0, 90);
    app.update();
    let (text, visibility) = banner(&mut app);
    assert_eq!(text, "MASSIVE COLLISION!");
    assert_eq!(visibility, Visibility::Visible);

    app.world_mut().resource_mut::<Notification>().expire(90);
    app.update();
    assert_eq!(banner(&mut app).1, Visibility::Hidden);
}
