use bevy::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// GameRng struct: Resource
///
/// The single random source for spawning and procedural placement. Seedable
/// so headless tests replay exactly.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl Default for GameRng {
    fn default() -> Self {
        GameRng(StdRng::from_os_rng())
    }
}

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        GameRng(StdRng::seed_from_u64(seed))
    }
}

/// Uniform draw in `[low, high)`; degenerate ranges return `low`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    low + rng.random::<f32>() * (high - low)
}

/// Normal distribution whose samples are clamped to `[lower, upper]`.
pub struct Gauss {
    distribution: Normal<f32>,
    lower: f32,
    upper: f32,
}

impl Gauss {
    /// `None` when `std` is not a positive finite number or the bounds are
    /// inverted.
    pub fn clamped(mean: f32, std: f32, lower: f32, upper: f32) -> Option<Gauss> {
        if !(std > 0.0 && std.is_finite()) || !(lower <= upper) {
            return None;
        }

        Normal::new(mean, std).ok().map(|distribution| Gauss {
            distribution,
            lower,
            upper,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.distribution.sample(rng).clamp(self.lower, self.upper)
    }
}
