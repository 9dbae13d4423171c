use bevy::prelude::*;
use black_hole_harvest::objects;

/// Main Entry Point
///
/// simply starts up the event loop (App::new()...run())
/// and chains plugins. The body of this code all
/// exists as the `objects::BlackHoleHarvest` plugin.
/// See plugins.rs in the objects subdirectory
fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Black Hole Harvest".into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(objects::BlackHoleHarvest)
        .run();
}
