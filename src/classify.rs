//! Height to tile-index classification.
//!
//! Heights are bucketed into half-open bands `(previous, upper]`. The first band
//! has no lower bound and the last has no upper bound, so every height lands in
//! exactly one band.

use bevy::log::trace;

use crate::HeightMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Water1,
    Water2,
    Desert1,
    Desert2,
    Desert3,
    Forest1,
    Forest2,
    Forest3,
    DeepForest1,
    DeepForest2,
    DeepForest3,
    Snow1,
    Snow2,
    Snow3,
}

impl TileKind {
    /// Cell of this kind in the tileset atlas.
    pub const fn index(self) -> u32 {
        match self {
            TileKind::Forest1 => 0,
            TileKind::Forest2 => 1,
            TileKind::Forest3 => 2,
            TileKind::Snow1 => 4,
            TileKind::Snow2 => 5,
            TileKind::Snow3 => 6,
            TileKind::Water1 => 7,
            TileKind::Water2 => 8,
            TileKind::Desert1 => 9,
            TileKind::Desert2 => 10,
            TileKind::Desert3 => 12,
            TileKind::DeepForest1 => 13,
            TileKind::DeepForest2 => 14,
            TileKind::DeepForest3 => 15,
        }
    }
}

/// Inclusive upper bound of each band, lowest first.
///
/// Bounds are `f64` so a height is compared against the exact decimal bound;
/// several of them round upward as `f32`.
pub const BANDS: [(f64, TileKind); 13] = [
    (-0.30, TileKind::Water1),
    (-0.20, TileKind::Water2),
    (-0.10, TileKind::Desert1),
    (-0.05, TileKind::Desert2),
    (0.00, TileKind::Desert3),
    (0.20, TileKind::Forest1),
    (0.25, TileKind::Forest2),
    (0.30, TileKind::Forest3),
    (0.50, TileKind::DeepForest1),
    (0.55, TileKind::DeepForest2),
    (0.60, TileKind::DeepForest3),
    (0.80, TileKind::Snow1),
    (0.85, TileKind::Snow2),
];

/// Everything above the last bound in [`BANDS`].
pub const TOP_BAND: TileKind = TileKind::Snow3;

pub fn classify_height(h: f32) -> TileKind {
    let h = f64::from(h);
    BANDS
        .iter()
        .find(|(upper, _)| h <= *upper)
        .map_or(TOP_BAND, |&(_, kind)| kind)
}

/// Flat grid of tile indices, cell `(x, y)` stored at `x + y * width`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<u32>,
}

impl TileGrid {
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        // chunks() rejects a zero chunk size
        self.tiles.chunks(self.width.max(1) as usize)
    }
}

pub fn classify_heightmap(terrain: &HeightMap) -> TileGrid {
    let (width, height) = terrain.dim();

    let mut tiles = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            tiles.push(classify_height(terrain.height_at(x, y)).index());
        }
    }

    TileGrid {
        width: width as u32,
        height: height as u32,
        tiles,
    }
}

/// Dumps the grid one row per line at trace level.
pub fn log_grid(grid: &TileGrid) {
    for row in grid.rows() {
        let line = row
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join("\t");
        trace!("{line}");
    }
}
