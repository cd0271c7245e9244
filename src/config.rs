//! Engine configuration.
//!
//! The model is resolved once, when the engine is built. Parsing from YAML or
//! JSON needs the `serde-spec` feature.

use std::path::Path;

use crate::chip::Model;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-spec", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-spec", serde(default))]
pub struct VdpConfig {
    /// Which console's video path to build
    pub model: Model,
    /// Frames the demo binary renders
    pub frames: u32,
}

impl VdpConfig {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    #[cfg(feature = "serde-spec")]
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    #[cfg(feature = "serde-spec")]
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = std::fs::read_to_string(path)?;
        Self::parse(&extension, &text)
    }

    #[cfg(feature = "serde-spec")]
    fn parse(extension: &str, text: &str) -> Result<Self, ConfigError> {
        match extension {
            "yaml" | "yml" => Self::from_yaml_str(text),
            "json" => Self::from_json_str(text),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    #[cfg(not(feature = "serde-spec"))]
    fn parse(extension: &str, _text: &str) -> Result<Self, ConfigError> {
        Err(ConfigError::UnsupportedFormat(format!(
            "{extension} (built without the serde-spec feature)"
        )))
    }
}

impl Default for VdpConfig {
    fn default() -> Self {
        Self {
            model: Model::PcEngine,
            frames: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_single_chip() {
        let config = VdpConfig::default();
        assert_eq!(config.model, Model::PcEngine);
        assert!(!config.model.dual_chip());
        assert!(VdpConfig::new(Model::SuperGrafx).model.dual_chip());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = VdpConfig::load(Path::new("/nonexistent/supervdp.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[cfg(feature = "serde-spec")]
    #[test]
    fn parses_yaml_and_json() {
        let yaml = VdpConfig::from_yaml_str("model: super-grafx\nframes: 3\n").unwrap();
        assert_eq!(yaml, VdpConfig { model: Model::SuperGrafx, frames: 3 });
        let json = VdpConfig::from_json_str(r#"{"model":"pc-engine"}"#).unwrap();
        assert_eq!(json, VdpConfig::default());
    }

    #[cfg(feature = "serde-spec")]
    #[test]
    fn rejects_unknown_extension() {
        let err = VdpConfig::parse("toml", "").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
