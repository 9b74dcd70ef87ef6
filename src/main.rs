//! Standalone viewer binary.
//!
//! Usage: `floret [TERRAIN] [FLOWER]`
//!
//! With no arguments the built-in procedural scene is shown. `TERRAIN`
//! and `FLOWER` are glTF/GLB model paths; the flower template falls back
//! to the built-in sprig when omitted.

use std::path::{Path, PathBuf};

use floret::{Options, Viewer};

/// Preset consulted at startup when present. Absence is not an error.
const DEFAULT_PRESET: &str = "assets/presets/default.toml";

/// Load the default preset if one exists, falling back to defaults.
fn startup_options() -> Options {
    let path = Path::new(DEFAULT_PRESET);
    if !path.exists() {
        return Options::default();
    }
    match Options::load(path) {
        Ok(options) => {
            log::info!("loaded preset {DEFAULT_PRESET}");
            options
        }
        Err(e) => {
            log::warn!("ignoring {DEFAULT_PRESET}: {e}");
            Options::default()
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let terrain = args.next().map(PathBuf::from);
    let flower = args.next().map(PathBuf::from);

    let mut builder = Viewer::builder().with_options(startup_options());
    if let Some(terrain) = terrain {
        builder = builder.with_terrain(terrain);
    }
    if let Some(flower) = flower {
        builder = builder.with_flower(flower);
    }

    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
