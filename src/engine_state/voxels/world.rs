//! # World Module
//!
//! The `World` is the session-level owner of everything generation needs: the
//! configuration, the seeded noise source, and the chunk built from them. Creating a
//! world is the one place noise gets seeded.
//!
//! Only a single chunk exists. Chunks have no neighbors, so faces on the chunk's
//! outer walls are always part of its mesh.

use log::info;
use web_time::Instant;

use crate::config::{ConfigError, WorldConfig};
use crate::engine_state::rendering::renderer::Renderer;

use super::{chunk::Chunk, noise_source::SimplexNoise, terrain::TerrainGenerator};

/// A single-chunk voxel world.
#[derive(Debug)]
pub struct World {
    /// The parameters the world was created with
    config: WorldConfig,
    /// The generator, holding the session's noise source
    generator: TerrainGenerator<SimplexNoise>,
    /// The world's only chunk, at `config.origin`
    chunk: Chunk,
}

impl World {
    /// Creates a world from `config`, generating and meshing its chunk.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if the configuration cannot be generated from.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let start = Instant::now();

        let generator = TerrainGenerator::new(SimplexNoise::new(config.seed), &config);
        let [x, z] = config.origin;
        let chunk = Chunk::new(x, z, &generator);

        info!(
            "World with seed {} ready in {:?}: chunk ({}, {}) has {} terrain and {} water faces",
            config.seed,
            start.elapsed(),
            x,
            z,
            chunk.stats().terrain_faces,
            chunk.stats().water_faces,
        );

        Ok(World {
            config,
            generator,
            chunk,
        })
    }

    /// The configuration the world was created with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The terrain generator, including its noise source.
    pub fn generator(&self) -> &TerrainGenerator<SimplexNoise> {
        &self.generator
    }

    /// The world's chunk.
    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    /// The world's chunk, for rebuilding its mesh.
    pub fn chunk_mut(&mut self) -> &mut Chunk {
        &mut self.chunk
    }

    /// Uploads the chunk's meshes. See [`Chunk::upload`].
    pub fn upload<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> bool {
        self.chunk.upload(renderer)
    }

    /// Draws the chunk.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        self.chunk.render(renderer);
    }

    /// Releases the chunk's GPU resources.
    pub fn unload<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.chunk.unload(renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_is_rejected() {
        let config = WorldConfig {
            chunk_size: 0,
            ..WorldConfig::default()
        };
        assert!(World::new(config).is_err());
    }

    #[test]
    fn same_config_same_world() {
        let a = World::new(WorldConfig::default()).unwrap();
        let b = World::new(WorldConfig::default()).unwrap();
        assert_eq!(a.chunk().grid(), b.chunk().grid());
        assert_eq!(a.chunk().stats(), b.chunk().stats());
    }

    #[test]
    fn chunk_sits_at_the_configured_origin() {
        let config = WorldConfig {
            origin: [2, -5],
            ..WorldConfig::default()
        };
        let world = World::new(config).unwrap();
        assert_eq!(world.chunk().position(), cgmath::Point2::new(2, -5));
        assert_eq!(
            world.chunk().grid(),
            &world.generator().generate_chunk(2, -5)
        );
    }
}
