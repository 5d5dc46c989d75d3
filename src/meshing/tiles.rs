use std::path::{Path, PathBuf};

use bevy::prelude::*;
use thiserror::Error;

use super::{Atlas, TileBatch, TileVertex};
use crate::{classify::TileGrid, render::DrawTarget};

#[derive(Debug, Error)]
pub enum TileMeshError {
    #[error("{width}x{height} tile grid given {actual} tile indices")]
    GridSizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
    #[error("failed to load tileset {}", .path.display())]
    AtlasLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("tileset is {atlas_width}px wide, no room for {tile_width}x{tile_height} tiles")]
    DegenerateAtlas {
        atlas_width: u32,
        tile_width: u32,
        tile_height: u32,
    },
}

/// A tile grid batched into a single quad list sampling one atlas.
///
/// The mesh carries its own transform, composed with the caller's transform
/// on every [`draw`](Self::draw).
#[derive(Default, Resource)]
pub struct TileMesh {
    vertices: Vec<TileVertex>,
    atlas: Option<Atlas>,
    revision: u64,
    transform: Transform,
}

impl TileMesh {
    /// Replaces the mesh with one quad per cell of a `width` x `height` grid.
    ///
    /// `tiles` is row-major with x varying fastest. Tile indices are not range
    /// checked: an index past the end of the atlas yields texture coordinates
    /// outside of it. On error the previous mesh is left untouched.
    pub fn build(
        &mut self,
        tileset: impl AsRef<Path>,
        tile_size: UVec2,
        tiles: &[u32],
        width: u32,
        height: u32,
    ) -> Result<(), TileMeshError> {
        let cell_count = (width as usize).checked_mul(height as usize);
        if cell_count != Some(tiles.len()) {
            return Err(TileMeshError::GridSizeMismatch {
                width,
                height,
                actual: tiles.len(),
            });
        }

        let path = tileset.as_ref();
        let atlas = Atlas::load(path).map_err(|source| TileMeshError::AtlasLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let columns = atlas
            .columns(tile_size)
            .ok_or(TileMeshError::DegenerateAtlas {
                atlas_width: atlas.size().x,
                tile_width: tile_size.x,
                tile_height: tile_size.y,
            })?;

        let vertices = quad_list(columns, tile_size, tiles, width, height);

        debug!(
            "built {width}x{height} tile mesh from {} ({columns} atlas columns)",
            path.display()
        );

        self.vertices = vertices;
        self.atlas = Some(atlas);
        self.revision += 1;

        Ok(())
    }

    pub fn build_grid(
        &mut self,
        tileset: impl AsRef<Path>,
        tile_size: UVec2,
        grid: &TileGrid,
    ) -> Result<(), TileMeshError> {
        self.build(tileset, tile_size, &grid.tiles, grid.width, grid.height)
    }

    /// Hands the batch to `target` under `transform * self.transform()`.
    ///
    /// Does nothing until the first successful build.
    pub fn draw<T: DrawTarget + ?Sized>(&self, target: &mut T, transform: &Transform) {
        let Some(batch) = self.batch() else {
            return;
        };
        let transform = transform.mul_transform(self.transform);
        target.draw_batch(&batch, &transform);
    }

    pub fn batch(&self) -> Option<TileBatch<'_>> {
        self.atlas.as_ref().map(|atlas| TileBatch {
            vertices: &self.vertices,
            atlas,
            revision: self.revision,
        })
    }

    pub fn vertices(&self) -> &[TileVertex] {
        &self.vertices
    }

    pub fn atlas(&self) -> Option<&Atlas> {
        self.atlas.as_ref()
    }

    pub fn is_built(&self) -> bool {
        self.atlas.is_some()
    }

    /// Number of successful builds so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The mesh's own transform.
    ///
    /// It is applied in bevy's y-up world space to the mesh produced by
    /// [`TileBatch::to_render_mesh`], not to the y-down vertices: a positive
    /// y offset moves the map up on screen and a positive angle turns it
    /// counter-clockwise.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn position(&self) -> Vec2 {
        self.transform.translation.truncate()
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.transform.translation = position.extend(self.transform.translation.z);
    }

    /// Offset in world space, y up.
    pub fn translate(&mut self, offset: Vec2) {
        self.transform.translation += offset.extend(0.);
    }

    /// Rotation about the screen axis in radians, counter-clockwise on screen.
    pub fn rotation(&self) -> f32 {
        self.transform.rotation.to_euler(EulerRot::ZYX).0
    }

    pub fn set_rotation(&mut self, angle: f32) {
        self.transform.rotation = Quat::from_rotation_z(angle);
    }

    pub fn rotate(&mut self, angle: f32) {
        self.transform.rotate_z(angle);
    }

    pub fn scale(&self) -> Vec2 {
        self.transform.scale.truncate()
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.transform.scale = scale.extend(1.);
    }

    pub fn scale_by(&mut self, factor: Vec2) {
        self.transform.scale *= factor.extend(1.);
    }
}

fn quad_list(
    columns: u32,
    tile_size: UVec2,
    tiles: &[u32],
    width: u32,
    height: u32,
) -> Vec<TileVertex> {
    let mut vertices = Vec::with_capacity(tiles.len() * 4);
    let size = tile_size.as_vec2();

    for j in 0..height {
        for i in 0..width {
            let n = tiles[(i + j * width) as usize];
            // Float cell coordinates so stray indices can't overflow
            let cell = Vec2::new(i as f32, j as f32);
            let atlas_cell = Vec2::new((n % columns) as f32, (n / columns) as f32);

            for corner in [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y] {
                vertices.push(TileVertex {
                    position: (cell + corner) * size,
                    tex_coords: (atlas_cell + corner) * size,
                });
            }
        }
    }

    vertices
}
