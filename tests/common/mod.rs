use std::path::PathBuf;

use image::RgbaImage;

/// Writes a blank atlas png of the given pixel size into the temp dir.
pub fn write_atlas(name: &str, width: u32, height: u32) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "tile_map_it_{}_{name}.png",
        std::process::id()
    ));
    RgbaImage::new(width, height)
        .save(&path)
        .expect("atlas fixture should be writable");
    path
}
