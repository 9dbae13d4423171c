//! Themes.rs
//!
//! The sector themes a run cycles through. Each level picks its theme by
//! `(level - 1) mod theme_count`, so the table repeats indefinitely.

use bevy::color::Srgba;
use bevy::prelude::*;
use serde::Deserialize;

/// Theme struct
///
/// Immutable description of one sector: the display name, the tint used for
/// the planets and the accretion disc, and the base number of planets.
/// `color` is a packed 0xRRGGBB value so the TOML config can write it as hex.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Theme {
    pub name: String,
    pub color: u32,
    pub planet_count: u32,
}

impl Theme {
    pub fn new(name: &str, color: u32, planet_count: u32) -> Self {
        Theme {
            name: name.to_string(),
            color,
            planet_count,
        }
    }

    pub fn srgba(&self) -> Srgba {
        let [_, r, g, b] = self.color.to_be_bytes();
        Srgba::rgb_u8(r, g, b)
    }

    pub fn bevy_color(&self) -> Color {
        Color::from(self.srgba())
    }

    /// name as shown on the HUD
    pub fn banner(&self) -> String {
        self.name.to_uppercase()
    }
}

pub fn default_themes() -> Vec<Theme> {
    vec![
        Theme::new("Veridian System", 0x22ff88, 3),
        Theme::new("Iron Core Nebula", 0xff4422, 4),
        Theme::new("Frozen Expanse", 0x2288ff, 5),
        Theme::new("The Gilded Void", 0xffcc22, 6),
        Theme::new("Obsidian Realm", 0xaa22ff, 8),
    ]
}

/// Index into the theme table for a 1-based level.
///
/// Levels below 1 are treated as level 1. An empty table is rejected by
/// config validation, so `count` is never zero here; 0 is returned if it is.
pub fn theme_index(level: u32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (level.max(1) as usize - 1) % count
}

/// How many full passes over the theme table have completed before `level`.
pub fn theme_cycle(level: u32, count: usize) -> u32 {
    if count == 0 {
        return 0;
    }
    ((level.max(1) as usize - 1) / count) as u32
}

/// Planets to generate for `level`: the theme's count plus one per completed
/// cycle through the table, so revisited sectors grow denser.
pub fn planets_for_level(theme: &Theme, level: u32, count: usize) -> u32 {
    theme
        .planet_count
        .saturating_add(theme_cycle(level, count))
}
