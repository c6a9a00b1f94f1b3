//! # Noise Source Module
//!
//! Terrain generation only needs one thing from noise: a deterministic value in
//! `[-1, 1]` for a 2D coordinate. The [`NoiseSource`] trait captures that, and
//! [`CoherentNoise`] adapts any `noise` crate generator to it.

use noise::{NoiseFn, OpenSimplex};

/// A deterministic 2D coherent-noise function.
pub trait NoiseSource {
    /// Samples the noise at `(x, y)`.
    ///
    /// # Returns
    /// A value in `[-1, 1]`. The same input always yields the same output.
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<S: NoiseSource + ?Sized> NoiseSource for &S {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

/// Adapts a seeded `noise::NoiseFn` to [`NoiseSource`].
///
/// Generators are allowed to overshoot `[-1, 1]` slightly, so samples are clamped.
#[derive(Clone, Debug)]
pub struct CoherentNoise<N> {
    /// The wrapped generator.
    noise: N,
    /// The seed the generator was created with.
    seed: u32,
}

/// The default terrain noise.
pub type SimplexNoise = CoherentNoise<OpenSimplex>;

impl SimplexNoise {
    /// Creates an OpenSimplex noise source for `seed`.
    pub fn new(seed: u32) -> Self {
        CoherentNoise::from_fn(OpenSimplex::new(seed), seed)
    }
}

impl<N: NoiseFn<f64, 2>> CoherentNoise<N> {
    /// Wraps an already seeded generator.
    pub fn from_fn(noise: N, seed: u32) -> Self {
        CoherentNoise { noise, seed }
    }

    /// The seed this source was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl<N: NoiseFn<f64, 2>> NoiseSource for CoherentNoise<N> {
    #[inline]
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.noise.get([x, y]).clamp(-1.0, 1.0)
    }
}
