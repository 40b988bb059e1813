//! Render and camera settings loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::{CameraSettings, RenderConfig};

/// Everything needed to set up a render besides the scene itself.
///
/// Missing fields fall back to their defaults, so `{}` is a valid settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub render: RenderConfig,
    pub camera: CameraSettings,
}

impl SceneSettings {
    pub fn from_json_str(json: &str) -> RenderResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.render.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&json)?;
        log::debug!("Loaded scene settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Point3};

    #[test]
    fn test_empty_json_gives_defaults() {
        let settings = SceneSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, SceneSettings::default());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "render": { "width": 64, "height": 32, "background": [0.5, 0.7, 1.0] },
            "camera": { "look_from": [0.0, 1.0, 3.0], "vfov": 40.0 }
        }"#;
        let settings = SceneSettings::from_json_str(json).unwrap();

        assert_eq!(settings.render.width, 64);
        assert_eq!(settings.render.height, 32);
        assert_eq!(settings.render.background, Color::new(0.5, 0.7, 1.0));
        assert_eq!(
            settings.render.samples_per_pixel,
            RenderConfig::default().samples_per_pixel
        );
        assert_eq!(settings.camera.look_from, Point3::new(0.0, 1.0, 3.0));
        assert_eq!(settings.camera.vfov, 40.0);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let err = SceneSettings::from_json_str(r#"{ "render": { "width": 0 } }"#).unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfig(_)));

        let err = SceneSettings::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, RenderError::Json(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = SceneSettings::default();
        settings.render.seed = 99;
        let json = settings.to_json().unwrap();
        assert_eq!(SceneSettings::from_json_str(&json).unwrap(), settings);
    }

    #[test]
    fn test_missing_file() {
        let err = SceneSettings::from_json_file("/nonexistent/ember/scene.json").unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
