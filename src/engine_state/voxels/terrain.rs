//! # Terrain Generation Module
//!
//! Fills a [`VoxelGrid`] from 2D noise using a heightmap: every `(x, z)` column gets a
//! single contiguous run of solid blocks from the floor up to a noise-derived height.
//! There are no caves or overhangs.
//!
//! ## Algorithm
//!
//! 1. Sample noise at `(world_x / smooth_factor, world_z / smooth_factor)`
//! 2. Normalize the sample from `[-1, 1]` to `[0, 1]`
//! 3. Scale by the chunk height and floor it, clamping into `[0, chunk_height - 1]`
//! 4. Fill the column from that height down to 0 with `BlockKind::Grass`
//! 5. Flood the water level with `BlockKind::Water` if it is still empty

use log::debug;
use web_time::Instant;

use crate::config::WorldConfig;

use super::{block::BlockKind, grid::VoxelGrid, noise_source::NoiseSource};

/// Generates chunk terrain from an owned noise source.
///
/// The generator is configured once and never changes afterwards, so the same chunk
/// offset always produces the same grid.
#[derive(Clone, Debug)]
pub struct TerrainGenerator<N> {
    /// The noise the heightmap is derived from
    noise: N,
    /// Extent of a chunk along x and z
    chunk_size: usize,
    /// Extent of a chunk along y
    chunk_height: usize,
    /// Divisor applied to world coordinates before sampling
    smooth_factor: f64,
    /// Level flooded with water, if any
    water_level: Option<usize>,
}

impl<N: NoiseSource> TerrainGenerator<N> {
    /// Creates a generator that samples `noise` with the dimensions in `config`.
    pub fn new(noise: N, config: &WorldConfig) -> Self {
        TerrainGenerator {
            noise,
            chunk_size: config.chunk_size,
            chunk_height: config.chunk_height,
            smooth_factor: config.smooth_factor,
            water_level: config.water_level,
        }
    }

    /// Creates an empty grid with this generator's chunk dimensions.
    pub fn empty_grid(&self) -> VoxelGrid {
        VoxelGrid::new(self.chunk_size, self.chunk_height)
    }

    /// Generates the grid of the chunk at chunk-grid offset `(chunk_x, chunk_z)`.
    pub fn generate_chunk(&self, chunk_x: i32, chunk_z: i32) -> VoxelGrid {
        let mut grid = self.empty_grid();
        self.generate(&mut grid, chunk_x, chunk_z);
        grid
    }

    /// Computes the terrain height of the column at absolute block coordinates.
    ///
    /// # Returns
    /// The y index of the topmost solid block, always within `[0, chunk_height - 1]`.
    pub fn column_height(&self, world_x: i64, world_z: i64) -> usize {
        let sample = self.noise.sample(
            world_x as f64 / self.smooth_factor,
            world_z as f64 / self.smooth_factor,
        );
        let normalized = (sample + 1.0) * 0.5;
        let height = (normalized * self.chunk_height as f64).floor();

        // A sample of exactly 1.0 lands one past the top.
        (height.max(0.0) as usize).min(self.chunk_height.saturating_sub(1))
    }

    /// Fills `grid` with the terrain of the chunk at `(chunk_x, chunk_z)`.
    ///
    /// The grid is reset to `BlockKind::Empty` first, so generation is always wholesale.
    /// Columns are generated over the grid's own extent.
    pub fn generate(&self, grid: &mut VoxelGrid, chunk_x: i32, chunk_z: i32) {
        let start = Instant::now();
        grid.fill(BlockKind::Empty);

        let origin_x = chunk_x as i64 * self.chunk_size as i64;
        let origin_z = chunk_z as i64 * self.chunk_size as i64;

        for i in 0..grid.size() as i32 {
            for k in 0..grid.size() as i32 {
                let height = self.column_height(origin_x + i as i64, origin_z + k as i64);

                for j in (0..=height as i32).rev() {
                    grid.set(i, j, k, BlockKind::Grass);
                }

                if let Some(level) = self.water_level {
                    let level = level as i32;
                    if grid.get(i, level, k) == BlockKind::Empty {
                        grid.set(i, level, k, BlockKind::Water);
                    }
                }
            }
        }

        debug!(
            "Generated chunk ({}, {}) terrain in {:?}: {} solid, {} water",
            chunk_x,
            chunk_z,
            start.elapsed(),
            grid.count(BlockKind::Grass),
            grid.count(BlockKind::Water),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::noise_source::SimplexNoise;

    /// Noise that returns the same value everywhere.
    struct Flat(f64);

    impl NoiseSource for Flat {
        fn sample(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    fn config() -> WorldConfig {
        WorldConfig::default()
    }

    #[test]
    fn generation_is_deterministic() {
        let a = TerrainGenerator::new(SimplexNoise::new(0), &config());
        let b = TerrainGenerator::new(SimplexNoise::new(0), &config());
        for (x, z) in [(0, 0), (3, -2), (-7, 11)] {
            assert_eq!(a.generate_chunk(x, z), b.generate_chunk(x, z));
        }
    }

    #[test]
    fn regenerating_into_a_used_grid_matches_a_fresh_one() {
        let generator = TerrainGenerator::new(SimplexNoise::new(5), &config());
        let mut grid = generator.generate_chunk(4, 4);
        generator.generate(&mut grid, 0, 0);
        assert_eq!(grid, generator.generate_chunk(0, 0));
    }

    #[test]
    fn columns_are_contiguous_from_the_floor() {
        let generator = TerrainGenerator::new(SimplexNoise::new(1), &config());
        let grid = generator.generate_chunk(2, 1);
        for i in 0..16 {
            for k in 0..16 {
                let height = generator.column_height(32 + i as i64, 16 + k as i64) as i32;
                for j in 0..16 {
                    let kind = grid.get(i, j, k);
                    if j <= height {
                        assert_eq!(kind, BlockKind::Grass);
                    } else if j == 3 {
                        assert_eq!(kind, BlockKind::Water);
                    } else {
                        assert_eq!(kind, BlockKind::Empty);
                    }
                }
            }
        }
    }

    #[test]
    fn extreme_samples_stay_inside_the_chunk() {
        let top = TerrainGenerator::new(Flat(1.0), &config());
        assert_eq!(top.column_height(0, 0), 15);
        let grid = top.generate_chunk(0, 0);
        assert_eq!(grid.count(BlockKind::Grass), grid.volume());

        let bottom = TerrainGenerator::new(Flat(-1.0), &config());
        assert_eq!(bottom.column_height(0, 0), 0);
        let grid = bottom.generate_chunk(0, 0);
        assert_eq!(grid.count(BlockKind::Grass), 16 * 16);
        assert_eq!(grid.count(BlockKind::Water), 16 * 16);
    }

    #[test]
    fn water_only_fills_empty_cells() {
        // (0.5 + 1) / 2 * 16 = 12, well above the water level.
        let high = TerrainGenerator::new(Flat(0.5), &config());
        assert_eq!(high.generate_chunk(0, 0).count(BlockKind::Water), 0);

        let dry = WorldConfig {
            water_level: None,
            ..config()
        };
        let low = TerrainGenerator::new(Flat(-1.0), &dry);
        assert_eq!(low.generate_chunk(0, 0).count(BlockKind::Water), 0);
    }

    #[test]
    fn neighboring_chunks_sample_adjacent_coordinates() {
        let generator = TerrainGenerator::new(SimplexNoise::new(9), &config());
        let east = generator.generate_chunk(1, 0);
        let height = generator.column_height(16, 0) as i32;
        assert_eq!(east.get(0, height, 0), BlockKind::Grass);
        assert_ne!(east.get(0, height + 1, 0), BlockKind::Grass);
    }
}
