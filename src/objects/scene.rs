//! Scene.rs
//!
//! Mesh and material handles shared by every star and planet. Building them
//! once at startup means spawning a harvest star only needs `Commands`.

use crate::objects::movables::HarvestKind;
use bevy::color::Alpha;
use bevy::prelude::*;

/// SceneAssets struct: Resource
///
/// - sphere = unit sphere, scaled per entity
/// - ring = unit-space torus used as a planet ornament
/// - stars / halos = one material per harvest kind, indexed by [`HarvestKind`]
#[derive(Resource, Default, Clone)]
pub struct SceneAssets {
    pub sphere: Handle<Mesh>,
    pub ring: Handle<Mesh>,
    pub stars: [Handle<StandardMaterial>; 3],
    pub halos: [Handle<StandardMaterial>; 3],
}

fn slot(kind: HarvestKind) -> usize {
    match kind {
        HarvestKind::Normal => 0,
        HarvestKind::MassBonus => 1,
        HarvestKind::SpeedBonus => 2,
    }
}

impl SceneAssets {
    pub fn star_material(&self, kind: HarvestKind) -> Handle<StandardMaterial> {
        self.stars[slot(kind)].clone()
    }

    pub fn halo_material(&self, kind: HarvestKind) -> Handle<StandardMaterial> {
        self.halos[slot(kind)].clone()
    }
}

pub fn setup_scene_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let sphere = meshes.add(Sphere::new(1.0));
    let ring = meshes.add(Torus {
        minor_radius: 0.05,
        major_radius: 1.6,
    });

    let stars = HarvestKind::ALL.map(|kind| {
        materials.add(StandardMaterial {
            base_color: kind.color().with_alpha(0.9),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })
    });
    let halos = HarvestKind::ALL.map(|kind| {
        materials.add(StandardMaterial {
            base_color: kind.color().with_alpha(0.3),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })
    });

    commands.insert_resource(SceneAssets {
        sphere,
        ring,
        stars,
        halos,
    });
}
