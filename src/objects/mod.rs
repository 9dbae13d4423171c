pub mod background;
pub mod clocks;
pub mod config;
pub mod error;
pub mod gamestate;
pub mod gauss;
pub mod hud;
pub mod movables;
pub mod plugins;
pub mod scene;
pub mod themes;
pub mod traits;

pub use self::plugins::BlackHoleHarvest;
