use std::time::{SystemTime, UNIX_EPOCH};

use bevy::prelude::*;
use tile_map::app::TileMapPlugin;

fn main() {
    // An explicit seed on the command line reproduces a map
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(time_seed);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Tile Map".into(),
                resolution: (512., 512.).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugin(TileMapPlugin { seed })
        .run();
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}
