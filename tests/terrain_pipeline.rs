//! End-to-end checks of generation, meshing and the mesh lifecycle, driven through the
//! public API with an in-memory renderer.

use voxel_terrain::{
    BlockKind, BlockSide, Chunk, MeshBuilder, MeshState, NoiseSource, RecordingRenderer,
    SimplexNoise, TerrainGenerator, VoxelGrid, World, WorldConfig,
};

fn default_world() -> World {
    World::new(WorldConfig::default()).unwrap()
}

/// Counts visible faces the slow way: every solid block side whose neighbor is not
/// solid, plus one face per water block.
fn brute_force_faces(grid: &VoxelGrid) -> (usize, usize) {
    let mut terrain = 0;
    let mut water = 0;
    for (position, kind) in grid.iter() {
        let (i, j, k) = (position.x as i32, position.y as i32, position.z as i32);
        match kind {
            BlockKind::Water => water += 1,
            BlockKind::Grass => {
                for side in BlockSide::all() {
                    let step = side.offset();
                    if grid.get(i + step.x, j + step.y, k + step.z) != BlockKind::Grass {
                        terrain += 1;
                    }
                }
            }
            _ => {}
        }
    }
    (terrain, water)
}

#[test]
fn origin_column_follows_the_noise() {
    let world = default_world();
    let grid = world.chunk().grid();

    let sample = SimplexNoise::new(0).sample(0.0, 0.0);
    let expected = ((((sample + 1.0) / 2.0) * 16.0).floor() as i32).clamp(0, 15);

    for j in 0..16 {
        let kind = grid.get(0, j, 0);
        if j <= expected {
            assert_eq!(kind, BlockKind::Grass, "y = {j}");
        } else if j == 3 {
            assert_eq!(kind, BlockKind::Water, "y = {j}");
        } else {
            assert_eq!(kind, BlockKind::Empty, "y = {j}");
        }
    }
}

#[test]
fn same_seed_gives_same_world() {
    let a = default_world();
    let b = default_world();
    assert_eq!(a.chunk().grid(), b.chunk().grid());
    assert_eq!(a.chunk().stats(), b.chunk().stats());
    assert_eq!(a.chunk().terrain().vertices(), b.chunk().terrain().vertices());
    assert_eq!(a.chunk().terrain().indices(), b.chunk().terrain().indices());
}

#[test]
fn different_seeds_give_different_terrain() {
    let config = WorldConfig::default();
    let a = TerrainGenerator::new(SimplexNoise::new(1), &config).generate_chunk(0, 0);
    let b = TerrainGenerator::new(SimplexNoise::new(2), &config).generate_chunk(0, 0);
    assert_ne!(a, b);
}

#[test]
fn generated_chunk_matches_brute_force_face_count() {
    let world = default_world();
    let chunk = world.chunk();
    let (terrain, water) = brute_force_faces(chunk.grid());

    assert_eq!(chunk.stats().terrain_faces, terrain);
    assert_eq!(chunk.stats().water_faces, water);
    assert_eq!(chunk.terrain().vertices().len(), terrain * 4);
    assert_eq!(chunk.terrain().indices().len(), terrain * 6);
    assert_eq!(chunk.water().indices().len(), water * 6);
}

#[test]
fn random_grids_match_brute_force_face_count() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    for _ in 0..20 {
        let size = rng.usize(1..8);
        let height = rng.usize(1..8);
        let mut grid = VoxelGrid::new(size, height);
        for i in 0..size as i32 {
            for j in 0..height as i32 {
                for k in 0..size as i32 {
                    let kind = match rng.u8(0..10) {
                        0..=4 => BlockKind::Grass,
                        5 => BlockKind::Water,
                        _ => BlockKind::Empty,
                    };
                    grid.set(i, j, k, kind);
                }
            }
        }

        let chunk = Chunk::from_grid(cgmath::Point2::new(0, 0), grid);
        let (terrain, water) = brute_force_faces(chunk.grid());
        assert_eq!(chunk.stats().terrain_faces, terrain, "{size}x{height}");
        assert_eq!(chunk.stats().water_faces, water, "{size}x{height}");
    }
}

#[test]
fn indices_stay_within_their_vertex_buffer() {
    let world = default_world();
    for mesh in [world.chunk().terrain(), world.chunk().water()] {
        let vertex_count = mesh.vertices().len() as u32;
        assert!(mesh.indices().iter().all(|&index| index < vertex_count));
        assert_eq!(mesh.indices().len() % 6, 0);
    }
}

#[test]
fn vertices_stay_within_the_chunk_bounds() {
    let world = default_world();
    for vertex in world.chunk().terrain().vertices() {
        let p = vertex.position();
        for c in [p.x, p.y, p.z] {
            assert!((-0.5..=15.5).contains(&c), "vertex at {p:?}");
        }
    }
}

#[test]
fn out_of_range_queries_are_void() {
    let world = default_world();
    let grid = world.chunk().grid();
    for (i, j, k) in [(-1, 0, 0), (0, -1, 0), (0, 0, -1), (16, 0, 0), (0, 16, 0), (0, 0, 16)] {
        assert_eq!(grid.get(i, j, k), BlockKind::Void);
    }
    assert_eq!(grid.get(i32::MIN, i32::MAX, 0), BlockKind::Void);
}

#[test]
fn world_lifecycle_through_a_renderer() {
    let mut world = default_world();
    let mut renderer = RecordingRenderer::new();

    // Nothing uploaded yet, so nothing is drawn.
    world.render(&mut renderer);
    assert!(renderer.draw_calls().is_empty());

    let terrain_indices = world.chunk().terrain().indices().len() as u32;
    assert!(world.upload(&mut renderer));
    assert_eq!(world.chunk().terrain().state(), MeshState::Uploaded);
    assert!(world.chunk().terrain().vertices().is_empty());

    world.render(&mut renderer);
    let draws = renderer.take_draw_calls();
    assert!(!draws.is_empty());
    assert_eq!(draws[0].index_count, terrain_indices);

    // A second upload has nothing new to send.
    let created = renderer.created_resources();
    assert!(world.upload(&mut renderer));
    assert_eq!(renderer.created_resources(), created);

    world.unload(&mut renderer);
    assert_eq!(renderer.live_resources(), 0);
    world.render(&mut renderer);
    assert!(renderer.draw_calls().is_empty());
}

#[test]
fn rebuild_keeps_counts_and_replaces_the_resource() {
    let mut world = default_world();
    let mut renderer = RecordingRenderer::new();
    let before = world.chunk().stats();
    world.upload(&mut renderer);

    let after = world.chunk_mut().rebuild_mesh(&MeshBuilder::new());
    assert_eq!(before, after);
    assert_eq!(world.chunk().terrain().state(), MeshState::Built);

    // Stale geometry is not drawn until it is uploaded again.
    world.render(&mut renderer);
    assert!(renderer.take_draw_calls().is_empty());

    let live = renderer.live_resources();
    world.upload(&mut renderer);
    assert_eq!(renderer.live_resources(), live);
    world.render(&mut renderer);
    assert!(!renderer.take_draw_calls().is_empty());
    world.unload(&mut renderer);
}

#[test]
fn failed_upload_draws_nothing_and_can_be_retried() {
    let mut world = default_world();
    let mut renderer = RecordingRenderer::new();
    renderer.set_fail_index_upload(true);

    assert!(!world.upload(&mut renderer));
    assert_eq!(renderer.live_resources(), 0);
    world.render(&mut renderer);
    assert!(renderer.draw_calls().is_empty());

    renderer.set_fail_index_upload(false);
    assert!(world.upload(&mut renderer));
    world.render(&mut renderer);
    assert!(!renderer.draw_calls().is_empty());
    world.unload(&mut renderer);
}

#[test]
fn config_file_round_trips_into_a_world() {
    let config = WorldConfig::from_json(r#"{ "seed": 9, "chunk_size": 8, "water_level": null }"#)
        .unwrap();
    let world = World::new(config).unwrap();
    let grid = world.chunk().grid();
    assert_eq!(grid.size(), 8);
    assert_eq!(grid.height(), 16);
    assert_eq!(grid.count(BlockKind::Water), 0);
    // Every column has at least its floor block.
    assert!(grid.count(BlockKind::Grass) >= 8 * 8);
}
