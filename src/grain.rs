//! Paper grain.
//!
//! A [`GrainField`] is smooth value noise over a square lattice: each
//! lattice point gets a level from an FNV-1a hash of its coordinates and the
//! field seed, and points in between blend the four surrounding levels with
//! a smoothstep. Sampling is a pure function of `(seed, x, y)`, so grain
//! never draws from a stamp's random stream.

use crate::stamp::seed::fnv1a;

/// Seeded value-noise field in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrainField {
    seed: u32,
    /// Lattice points per unit of input.
    frequency: f32,
}

impl GrainField {
    pub fn new(seed: u32, frequency: f32) -> Self {
        Self { seed, frequency }
    }

    /// Level of the lattice point `(ix, iy)`.
    fn level(&self, ix: i32, iy: i32) -> f32 {
        let mut key = [0u8; 12];
        key[..4].copy_from_slice(&self.seed.to_le_bytes());
        key[4..8].copy_from_slice(&ix.to_le_bytes());
        key[8..].copy_from_slice(&iy.to_le_bytes());
        fnv1a(&key) as f32 / u32::MAX as f32
    }

    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let (x, y) = (x * self.frequency, y * self.frequency);
        let (x0, y0) = (x.floor(), y.floor());
        let (ix, iy) = (x0 as i32, y0 as i32);
        let tx = smoothstep(x - x0);
        let ty = smoothstep(y - y0);

        let top = lerp(self.level(ix, iy), self.level(ix + 1, iy), tx);
        let bottom = lerp(self.level(ix, iy + 1), self.level(ix + 1, iy + 1), tx);
        lerp(top, bottom, ty)
    }

    /// Whether `(x, y)` gets a speck: the field rises above `threshold`.
    pub fn speck(&self, x: f32, y: f32, threshold: f32) -> bool {
        self.sample(x, y) > threshold
    }
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
