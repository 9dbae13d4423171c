//! Black Hole Harvest
//!
//! A small arcade game: steer a growing black hole through themed sectors and
//! swallow the harvest stars its gravity pulls in. All of the game lives in
//! the [`objects::BlackHoleHarvest`] plugin.

pub mod objects;
