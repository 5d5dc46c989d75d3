use std::path::PathBuf;

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    classify::{classify_heightmap, log_grid, TileGrid},
    generation::{perlin_terrain, NoiseSettings},
    meshing::{TileMesh, TileMeshError},
    render::{SceneTarget, TileLayer},
};

#[derive(Resource, Clone, Debug)]
pub struct MapSettings {
    pub tileset: PathBuf,
    pub tile_size: UVec2,
    /// Map size in tiles lives in `noise.size`.
    pub noise: NoiseSettings,
    /// Where the top-left corner of the map sits in world space.
    pub origin: Vec2,
    pub regenerate_key: KeyCode,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            tileset: PathBuf::from("assets/TileSet.png"),
            tile_size: UVec2::new(16, 16),
            noise: NoiseSettings::default(),
            // Top-left corner of a 512x512 window
            origin: Vec2::new(-256., 256.),
            regenerate_key: KeyCode::E,
        }
    }
}

#[derive(Resource)]
pub struct MapRng {
    pub seed: u64,
    pub rng: StdRng,
}

impl MapRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

pub struct TileMapPlugin {
    pub seed: u64,
}

impl Plugin for TileMapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapSettings>()
            .insert_resource(MapRng::new(self.seed))
            .init_resource::<TileMesh>()
            .init_resource::<TileLayer>()
            .add_startup_system(setup_tile_map)
            .add_system(regenerate_on_key)
            .add_system(draw_tile_map.after(regenerate_on_key));
    }
}

/// Generates a fresh height field, classifies it and rebuilds `tile_mesh`.
pub fn generate_map(
    settings: &MapSettings,
    rng: &mut impl Rng,
    tile_mesh: &mut TileMesh,
) -> Result<TileGrid, TileMeshError> {
    let terrain = perlin_terrain(&settings.noise, rng);
    let (min, max) = terrain.min_max();
    debug!("height field spans {min:.2}..{max:.2}");

    let grid = classify_heightmap(&terrain);
    log_grid(&grid);

    tile_mesh.build_grid(&settings.tileset, settings.tile_size, &grid)?;
    Ok(grid)
}

fn regenerate(settings: &MapSettings, map_rng: &mut MapRng, tile_mesh: &mut TileMesh) {
    match generate_map(settings, &mut map_rng.rng, tile_mesh) {
        Ok(grid) => info!("generated {}x{} tile map", grid.width, grid.height),
        Err(err) => error!("keeping previous tile map: {err}"),
    }
}

fn setup_tile_map(
    mut commands: Commands,
    settings: Res<MapSettings>,
    mut map_rng: ResMut<MapRng>,
    mut tile_mesh: ResMut<TileMesh>,
) {
    commands.spawn(Camera2dBundle::default());

    info!("tile map seed {}", map_rng.seed);
    tile_mesh.set_position(settings.origin);
    regenerate(&settings, &mut map_rng, &mut tile_mesh);
}

fn regenerate_on_key(
    keys: Res<Input<KeyCode>>,
    settings: Res<MapSettings>,
    mut map_rng: ResMut<MapRng>,
    mut tile_mesh: ResMut<TileMesh>,
) {
    if keys.just_pressed(settings.regenerate_key) {
        regenerate(&settings, &mut map_rng, &mut tile_mesh);
    }
}

/// Draws the [`TileMesh`] resource through a [`SceneTarget`].
pub fn draw_tile_map(
    mut commands: Commands,
    tile_mesh: Res<TileMesh>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut images: ResMut<Assets<Image>>,
    mut layer: ResMut<TileLayer>,
) {
    let mut target = SceneTarget {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
        images: &mut images,
        layer: &mut layer,
    };
    tile_mesh.draw(&mut target, &Transform::IDENTITY);
}
