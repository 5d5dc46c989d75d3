use std::path::Path;

use bevy::{
    prelude::{Image, UVec2},
    render::texture::ImageSampler,
};
use image::DynamicImage;

/// Tileset image the tile quads sample from.
pub struct Atlas {
    image: Image,
    size: UVec2,
}

impl Atlas {
    pub fn load(path: &Path) -> Result<Self, image::ImageError> {
        let dyn_img = image::open(path)?;
        Ok(Self::from_dynamic(dyn_img))
    }

    pub fn from_dynamic(dyn_img: DynamicImage) -> Self {
        let size = UVec2::new(dyn_img.width(), dyn_img.height());

        let mut image = Image::from_dynamic(dyn_img, true);
        // Pixel art tiles bleed into their neighbours with linear filtering
        image.sampler_descriptor = ImageSampler::nearest();

        Self { image, size }
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Pixel size of the whole atlas.
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Number of whole tiles per atlas row, `None` when no tile fits.
    pub fn columns(&self, tile_size: UVec2) -> Option<u32> {
        if tile_size.x == 0 || tile_size.y == 0 {
            return None;
        }
        match self.size.x / tile_size.x {
            0 => None,
            columns => Some(columns),
        }
    }
}
