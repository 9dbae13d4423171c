//! Hud.rs
//!
//! The on-screen readouts: sector name, level, mass and goal in the corners,
//! plus the banner used for pickups and level clears.

use crate::objects::clocks::Notification;
use crate::objects::gamestate::{GameState, SectorState};
use bevy::prelude::*;

/// HudField enum: Component
///
/// Tags the `TextSpan` child holding one readout value.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Sector,
    Level,
    Mass,
    Goal,
}

impl HudField {
    pub fn render(&self, state: &GameState, sector: &SectorState) -> String {
        match self {
            HudField::Sector => sector.name.clone(),
            HudField::Level => state.level.to_string(),
            HudField::Mass => format!("{:.2}", state.mass),
            HudField::Goal => format!("{:.2}", state.goal),
        }
    }
}

/// Banner struct: Component
///
/// The centered notification text; hidden while no notification is active.
#[derive(Component)]
pub struct Banner;

fn readout(label: &str, field: HudField, top: f32, left: bool) -> impl Bundle {
    let mut node = Node {
        position_type: PositionType::Absolute,
        top: px(top),
        ..default()
    };
    if left {
        node.left = px(10);
    } else {
        node.right = px(10);
    }

    (
        Text::new(label),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::linear_rgba(0.6, 0.8, 1.0, 0.8)),
        node,
        children![(
            TextSpan::default(),
            TextFont {
                font_size: 20.0,
                ..default()
            },
            TextColor(Color::WHITE),
            field,
        )],
    )
}

pub fn setup_hud(mut commands: Commands) {
    commands.spawn(readout("SECTOR: ", HudField::Sector, 10.0, true));
    commands.spawn(readout("LEVEL: ", HudField::Level, 36.0, true));
    commands.spawn(readout("MASS: ", HudField::Mass, 10.0, false));
    commands.spawn(readout("GOAL: ", HudField::Goal, 36.0, false));

    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_child((
            Text::default(),
            TextFont {
                font_size: 36.0,
                ..default()
            },
            TextColor(Color::WHITE),
            TextLayout::new_with_justify(Justify::Center),
            Visibility::Hidden,
            Banner,
        ));
}

pub fn sync_hud(
    state: Res<GameState>,
    sector: Res<SectorState>,
    notification: Res<Notification>,
    mut fields: Query<(&mut TextSpan, &HudField)>,
    mut banner: Query<(&mut Text, &mut Visibility), With<Banner>>,
) {
    if state.is_changed() || sector.is_changed() {
        for (mut span, field) in &mut fields {
            // TextSpan derefs to its String
            **span = field.render(&state, &sector);
        }
    }

    if notification.is_changed() {
        for (mut text, mut visibility) in &mut banner {
            **text = notification.text.clone();
            *visibility = if notification.is_visible() {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
        }
    }
}
