//! Routing preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::route_config::RouteConfig;
use crate::settings::Settings;

/// A named, saved set of filter settings.
///
/// Presets are TOML files. The `settings` table holds the same flat keys
/// the host uses, so a preset can be applied to a filter as-is.
///
/// # TOML Format
///
/// ```toml
/// name = "Swap L/R"
/// description = "Exchange the front pair"
///
/// [settings]
/// "route 0" = 1
/// "route 1" = 0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Filter settings (user values only).
    #[serde(default)]
    pub settings: Settings,
}

impl Preset {
    /// Create a new preset with no settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            settings: Settings::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Store every route of `routes` in the preset.
    pub fn with_routes(mut self, routes: &RouteConfig) -> Self {
        routes.write_to(&mut self.settings);
        self
    }

    /// Replace the preset's settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Typed routes held by this preset (identity for anything unset).
    pub fn routes(&self) -> RouteConfig {
        RouteConfig::from_settings(&self.settings)
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_new() {
        let preset = Preset::new("Test Preset");
        assert_eq!(preset.name, "Test Preset");
        assert!(preset.description.is_none());
        assert!(preset.settings.is_empty());
        assert_eq!(preset.routes(), RouteConfig::default());
    }

    #[test]
    fn test_preset_from_toml() {
        let toml = r#"
name = "Swap"
description = "Exchange the front pair"

[settings]
"route 0" = 1
"route 1" = 0
"route 2" = -1
"#;

        let preset = Preset::from_toml(toml).unwrap();
        assert_eq!(preset.name, "Swap");
        assert_eq!(
            preset.description,
            Some("Exchange the front pair".to_string())
        );
        assert_eq!(preset.routes().routes, [1, 0, -1, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_preset_without_settings_table() {
        let preset = Preset::from_toml(r#"name = "Bare""#).unwrap();
        assert!(preset.settings.is_empty());
    }

    #[test]
    fn test_preset_to_toml() {
        let preset = Preset::new("Mono Left")
            .with_description("Left channel on both outputs")
            .with_routes(&RouteConfig::default().with_route(1, 0));

        let toml = preset.to_toml().unwrap();
        assert!(toml.contains("name = \"Mono Left\""));
        assert!(toml.contains("[settings]"));
        assert!(toml.contains("route 1"));
        assert_eq!(Preset::from_toml(&toml).unwrap().routes().route(1), Some(0));
    }

    #[test]
    fn test_preset_roundtrip() {
        let original = Preset::new("Roundtrip")
            .with_routes(&RouteConfig::default().with_route(0, 7).with_route(7, -1));
        let restored = Preset::from_toml(&original.to_toml().unwrap()).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_preset_with_settings() {
        let mut settings = Settings::new();
        settings.set_int("route 0", -1);
        let preset = Preset::new("Muted Left").with_settings(settings.clone());
        assert_eq!(preset.settings, settings);
        assert_eq!(preset.routes().route(0), Some(-1));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(matches!(
            Preset::from_toml("name = "),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
