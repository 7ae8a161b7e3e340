use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::form::{FormOptions, Language, Style, VisualStyle, Voice};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub default_style: Option<String>,
    pub default_language: Option<String>,
    pub default_voice: Option<String>,
    pub default_visual_style: Option<String>,
    pub account_name: Option<String>,
    pub account_email: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Form options to pre-select, falling back per field when the stored
    /// value is absent or no longer a known variant.
    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            style: self
                .default_style
                .as_deref()
                .and_then(Style::from_str)
                .unwrap_or_default(),
            language: self
                .default_language
                .as_deref()
                .and_then(Language::from_str)
                .unwrap_or_default(),
            voice: self
                .default_voice
                .as_deref()
                .and_then(Voice::from_str)
                .unwrap_or_default(),
            visual_style: self
                .default_visual_style
                .as_deref()
                .and_then(VisualStyle::from_str)
                .unwrap_or_default(),
        }
    }

    pub fn account_name(&self) -> &str {
        self.account_name.as_deref().unwrap_or("Jane Doe")
    }

    pub fn account_email(&self) -> &str {
        self.account_email.as_deref().unwrap_or("jane.doe@example.com")
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("scivid").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            default_style: Some("advanced".to_string()),
            default_language: Some("vi".to_string()),
            default_voice: None,
            default_visual_style: Some("cartoon".to_string()),
            account_name: Some("Ada".to_string()),
            account_email: None,
        };
        config.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.default_style.as_deref(), Some("advanced"));
        assert_eq!(loaded.account_name(), "Ada");
        assert_eq!(loaded.account_email(), "jane.doe@example.com");

        let options = loaded.form_options();
        assert_eq!(options.style, Style::Advanced);
        assert_eq!(options.language, Language::Vietnamese);
        assert_eq!(options.voice, Voice::Joanna);
        assert_eq!(options.visual_style, VisualStyle::Cartoon);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = Config::load_from(&dir.path().join("absent.json")).expect("load");
        assert_eq!(loaded.form_options(), FormOptions::default());
    }

    #[test]
    fn test_unknown_variant_falls_back() {
        let config = Config {
            default_style: Some("baroque".to_string()),
            ..Config::new()
        };
        assert_eq!(config.form_options().style, Style::Simple);
    }
}
