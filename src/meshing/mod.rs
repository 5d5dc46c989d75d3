mod atlas;
mod tiles;

pub use atlas::Atlas;
pub use tiles::{TileMesh, TileMeshError};

use bevy::{
    prelude::*,
    render::{mesh::Indices, render_resource::PrimitiveTopology},
};

/// One corner of a tile quad. Both fields are in pixels, y pointing down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileVertex {
    pub position: Vec2,
    pub tex_coords: Vec2,
}

/// Borrowed view of a built [`TileMesh`], valid for a single draw.
///
/// Vertices form a quad list: every four consecutive vertices are one tile in
/// the order top-left, top-right, bottom-right, bottom-left.
#[derive(Clone, Copy)]
pub struct TileBatch<'a> {
    pub vertices: &'a [TileVertex],
    pub atlas: &'a Atlas,
    /// Changes whenever the mesh is rebuilt.
    pub revision: u64,
}

impl TileBatch<'_> {
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Triangulates the quads into an engine mesh with y up and normalised UVs.
    pub fn to_render_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);

        let atlas_size = self.atlas.size().as_vec2();

        mesh.insert_attribute(
            Mesh::ATTRIBUTE_POSITION,
            self.vertices
                .iter()
                .map(|v| [v.position.x, -v.position.y, 0.])
                .collect::<Vec<_>>(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0., 0., 1.]; self.vertices.len()]);
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_UV_0,
            self.vertices
                .iter()
                .map(|v| (v.tex_coords / atlas_size).to_array())
                .collect::<Vec<_>>(),
        );

        let mut triangles = Vec::with_capacity(self.quad_count() * 6);
        for quad in 0..self.quad_count() as u32 {
            let [tl, tr, br, bl] = [0, 1, 2, 3].map(|corner| quad * 4 + corner);
            // Counter-clockwise once y is flipped
            triangles.extend([tl, br, tr]);
            triangles.extend([tl, bl, br]);
        }

        mesh.set_indices(Some(Indices::U32(triangles)));

        mesh
    }
}
