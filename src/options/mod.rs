//! Centralized scene/simulation options with TOML preset support.
//!
//! All tweakable settings (display toggles, lighting, camera, growth,
//! keybindings) are consolidated here. Options serialize to/from TOML for
//! presets stored in `assets/presets/`.

mod camera;
mod display;
mod growth;
mod lighting;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use growth::GrowthOptions;
pub use lighting::LightingOptions;
use serde::{Deserialize, Serialize};

use crate::error::FloretError;
use crate::input::KeyBindings;

/// Top-level options container. Every sub-struct carries
/// `#[serde(default)]` so a partial TOML file (say, only a `[growth]`
/// table) fills the rest from defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Display toggles and flower template selection.
    pub display: DisplayOptions,
    /// Sun direction, colors, and specular terms.
    pub lighting: LightingOptions,
    /// Projection and orbit control speeds.
    pub camera: CameraOptions,
    /// Growth simulation parameters.
    pub growth: GrowthOptions,
    /// Key-to-command map.
    pub keybindings: KeyBindings,
}

impl Options {
    /// Read options from a TOML file, defaulting any absent field.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, FloretError> {
        let content = std::fs::read_to_string(path).map_err(FloretError::Io)?;
        toml::from_str(&content)
            .map_err(|e| FloretError::OptionsParse(e.to_string()))
    }

    /// Write options to `path` as pretty-printed TOML.
    ///
    /// # Errors
    /// Returns an error when serialization fails or the file cannot be
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), FloretError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FloretError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(FloretError::Io)?;
        }
        std::fs::write(path, content).map_err(FloretError::Io)
    }

    /// Names of the presets in `dir` (the stems of its `.toml` files).
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[growth]
population = 64
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.growth.population, 64);
        // Everything else should be default
        assert_eq!(opts.growth.decay, 0.9);
        assert_eq!(opts.lighting.ambient, 0.3);
        assert_eq!(opts.camera.fovy, 70.0);
    }

    #[test]
    fn keybinding_lookup() {
        use crate::engine::FloretCommand;
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("Space"),
            Some(FloretCommand::TogglePlayback)
        );
        assert_eq!(
            opts.keybindings.lookup("KeyQ"),
            Some(FloretCommand::RecenterCamera)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir().join("floret-preset-test");
        let _ = std::fs::remove_dir_all(&dir);

        let mut small = Options::default();
        small.growth.population = 12;
        small.save(&dir.join("small.toml")).unwrap();
        Options::default().save(&dir.join("default.toml")).unwrap();

        assert_eq!(
            Options::list_presets(&dir),
            vec!["default".to_owned(), "small".to_owned()]
        );

        let loaded = Options::load(&dir.join("small.toml")).unwrap();
        assert_eq!(loaded.growth.population, 12);
        assert_eq!(loaded.camera.fovy, 70.0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn listing_a_missing_directory_is_empty() {
        let names =
            Options::list_presets(Path::new("/no/such/preset/directory"));
        assert!(names.is_empty());
    }
}
