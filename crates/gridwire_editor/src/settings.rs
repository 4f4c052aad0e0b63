// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor preferences, persisted as RON.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Editor preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Lower zoom clamp
    pub min_zoom: f32,
    /// Upper zoom clamp
    pub max_zoom: f32,
    /// Save assets automatically when the window gains focus
    pub auto_save: bool,
    /// Resize corner icon color (RGBA)
    pub resize_icon_color: [u8; 4],
    /// Resize corner icon color while hovered (RGBA)
    pub resize_icon_hover_color: [u8; 4],
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 5.0,
            auto_save: true,
            resize_icon_color: [255, 255, 255, 160],
            resize_icon_hover_color: [255, 255, 255, 255],
        }
    }
}

impl EditorSettings {
    /// Load settings from a RON file, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => ron::from_str(&text).unwrap_or_else(|err| {
                tracing::warn!("malformed settings file {}: {err}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to a RON file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Resize icon color as an egui color
    pub fn resize_icon_color(&self, hovered: bool) -> egui::Color32 {
        let [r, g, b, a] = if hovered {
            self.resize_icon_hover_color
        } else {
            self.resize_icon_color
        };
        egui::Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

/// Error when saving settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("RON error: {0}")]
    Ron(#[from] ron::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EditorSettings::default();
        assert!(settings.min_zoom < settings.max_zoom);
        assert!(settings.min_zoom > 0.0);
    }

    #[test]
    fn test_ron_round_trip() {
        let settings = EditorSettings {
            min_zoom: 0.25,
            ..EditorSettings::default()
        };
        let text = ron::ser::to_string_pretty(&settings, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: EditorSettings = ron::from_str(&text).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let settings = EditorSettings::load(Path::new("/nonexistent/gridwire_settings.ron"));
        assert_eq!(settings, EditorSettings::default());
    }
}
