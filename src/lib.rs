pub mod app;
pub mod classify;
pub mod generation;
mod heightmap;
pub mod meshing;
pub mod render;

pub use heightmap::HeightMap;
