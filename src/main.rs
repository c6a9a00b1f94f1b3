//! # Voxel Terrain Entry Point
//!
//! Generates a world and pushes one frame of it through a headless renderer.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- [config.json]
//! ```

fn main() {
    if let Err(err) = voxel_terrain::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
