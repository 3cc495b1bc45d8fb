//! Game configuration.
//!
//! Settings load from a JSON file next to the binary. A missing or
//! malformed file logs a warning and falls back to defaults so the game
//! always starts; individual missing fields keep their default values.

use log::warn;
use serde::Deserialize;

/// Path the settings loader checks at startup.
pub const SETTINGS_PATH: &str = "settings.json";

/// Tunable game parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Cells per chunk along X
    pub chunk_width: u32,
    /// Cells per chunk along Y
    pub chunk_height: u32,
    /// Cells per chunk along Z
    pub chunk_depth: u32,
    /// Chunks tiled along X
    pub world_chunks_x: i32,
    /// Chunks tiled along Z
    pub world_chunks_z: i32,
    /// Terrain generation method: heightfield, solid, scatter, or empty
    pub terrain_method: String,
    /// Seed shared by the terrain generators
    pub terrain_seed: u32,
    /// Radius in cells of the sphere carved out by each shot
    pub carve_radius: f32,
    /// Camera movement speed in cells per second
    pub camera_speed: f32,
    /// Mouse look sensitivity multiplier
    pub camera_sensitivity: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            chunk_width: 16,
            chunk_height: 16,
            chunk_depth: 16,
            world_chunks_x: 4,
            world_chunks_z: 4,
            terrain_method: String::from("heightfield"),
            terrain_seed: 7,
            carve_radius: 2.5,
            camera_speed: 12.0,
            camera_sensitivity: 1.0,
        }
    }
}

impl GameSettings {
    /// Loads settings from `path`, falling back to defaults when the file
    /// is absent or malformed.
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!("Failed to parse '{}' ({}), using defaults", path, err);
                    Self::default()
                }
            },
            Err(_) => {
                warn!("No settings file at '{}', using defaults", path);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_playable_arena() {
        let settings = GameSettings::default();
        assert!(settings.chunk_width > 0 && settings.chunk_height > 0 && settings.chunk_depth > 0);
        assert!(settings.world_chunks_x > 0 && settings.world_chunks_z > 0);
        assert!(settings.carve_radius > 0.0);
    }

    #[test]
    fn partial_files_keep_defaults_for_missing_fields() {
        let settings: GameSettings =
            serde_json::from_str(r#"{ "chunk_width": 8, "terrain_method": "solid" }"#).unwrap();
        assert_eq!(settings.chunk_width, 8);
        assert_eq!(settings.terrain_method, "solid");
        assert_eq!(settings.chunk_height, GameSettings::default().chunk_height);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = GameSettings::load_or_default("no-such-settings.json");
        assert_eq!(settings.chunk_width, GameSettings::default().chunk_width);
        assert_eq!(settings.terrain_method, "heightfield");
    }
}
