//! Clocks.rs
//!
//! the clocks module holds the timed effects. Nothing here schedules a
//! callback: each effect stores the tick at which it ends and is checked
//! against `GameState::frame` once per tick, so a re-trigger simply
//! overwrites the expiry and only the latest one can fire.

use bevy::prelude::*;

/// SpeedBoost struct: Resource
///
/// Multiplies the player's acceleration while active. Triggering again
/// before expiry extends it from the new tick instead of stacking.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SpeedBoost {
    multiplier: f32,
    expires_at: Option<u64>,
}

impl Default for SpeedBoost {
    fn default() -> Self {
        SpeedBoost {
            multiplier: 1.0,
            expires_at: None,
        }
    }
}

impl SpeedBoost {
    pub fn trigger(&mut self, now: u64, duration: u64, multiplier: f32) {
        self.multiplier = multiplier;
        self.expires_at = Some(now + duration);
    }

    /// Reverts to the baseline once the expiry tick is reached.
    /// Returns true only on the tick the revert happens.
    pub fn expire(&mut self, now: u64) -> bool {
        match self.expires_at {
            Some(at) if now >= at => {
                self.multiplier = 1.0;
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.expires_at.is_some()
    }

    pub fn acceleration(&self, baseline: f32) -> f32 {
        baseline * self.multiplier
    }
}

/// Notification struct: Resource
///
/// The banner text in the middle of the screen. A newer message replaces the
/// one on display together with its expiry.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Notification {
    pub text: String,
    expires_at: Option<u64>,
}

impl Notification {
    pub fn show(&mut self, text: &str, now: u64, duration: u64) {
        self.text = text.to_string();
        self.expires_at = Some(now + duration);
    }

    pub fn expire(&mut self, now: u64) -> bool {
        match self.expires_at {
            Some(at) if now >= at => {
                self.expires_at = None;
                self.text.clear();
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.expires_at.is_some()
    }
}
