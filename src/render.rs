//! Submitting tile batches to a renderer.

use bevy::{
    prelude::*,
    sprite::{MaterialMesh2dBundle, Mesh2dHandle},
};

use crate::meshing::TileBatch;

/// Anything a [`TileMesh`](crate::meshing::TileMesh) can be drawn onto.
pub trait DrawTarget {
    fn draw_batch(&mut self, batch: &TileBatch, transform: &Transform);
}

/// The entity showing the tile map and the revision it was last uploaded from.
#[derive(Resource, Default)]
pub struct TileLayer {
    entity: Option<Entity>,
    revision: Option<u64>,
}

impl TileLayer {
    pub fn entity(&self) -> Option<Entity> {
        self.entity
    }
}

/// Draws batches into the bevy world as a single 2D mesh entity.
///
/// Mesh and texture assets are only re-uploaded when the batch revision
/// changes; the transform is refreshed on every draw.
pub struct SceneTarget<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<ColorMaterial>,
    pub images: &'a mut Assets<Image>,
    pub layer: &'a mut TileLayer,
}

impl DrawTarget for SceneTarget<'_, '_, '_> {
    fn draw_batch(&mut self, batch: &TileBatch, transform: &Transform) {
        let live_entity = self
            .layer
            .entity
            .filter(|&entity| self.commands.get_entity(entity).is_some());

        match live_entity {
            Some(entity) if self.layer.revision == Some(batch.revision) => {
                self.commands.entity(entity).insert(*transform);
            }
            _ => {
                let mesh = Mesh2dHandle(self.meshes.add(batch.to_render_mesh()));
                let texture = self.images.add(batch.atlas.image().clone());
                let material = self.materials.add(ColorMaterial::from(texture));

                let entity = match live_entity {
                    Some(entity) => {
                        self.commands
                            .entity(entity)
                            .insert((mesh, material, *transform));
                        entity
                    }
                    None => self
                        .commands
                        .spawn(MaterialMesh2dBundle {
                            mesh,
                            material,
                            transform: *transform,
                            ..default()
                        })
                        .id(),
                };

                debug!(
                    "uploaded tile batch revision {} ({} quads)",
                    batch.revision,
                    batch.quad_count()
                );
                self.layer.entity = Some(entity);
                self.layer.revision = Some(batch.revision);
            }
        }
    }
}
