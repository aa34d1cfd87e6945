//! Plugin configuration.
//!
//! Read from the `plugins.image` section of the host's configuration file.
//! Every field is optional:
//!
//! ```json
//! {
//!   "plugins": {
//!     "image": { "mode": "production", "downloadName": "photo.jpg" }
//!   }
//! }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_DOWNLOAD_NAME;

/// Environment variable overriding the configured [`BuildMode`].
pub const MODE_ENV_VAR: &str = "IMAGE_PLUGIN_ENV";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn is_dev(self) -> bool {
        self == Self::Development
    }

    /// Picks the mode from the environment override, then `configured`, then `fallback`.
    pub fn resolve(configured: Option<BuildMode>, fallback: BuildMode) -> Self {
        Self::resolve_with(std::env::var(MODE_ENV_VAR).ok().as_deref(), configured, fallback)
    }

    pub fn resolve_with(
        env_value: Option<&str>,
        configured: Option<BuildMode>,
        fallback: BuildMode,
    ) -> Self {
        if let Some(raw) = env_value {
            match Self::parse(raw) {
                Some(mode) => return mode,
                None => tracing::warn!("ignoring unrecognised {MODE_ENV_VAR}={raw:?}"),
            }
        }
        configured.unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImagePluginConfig {
    /// Forces development or production asset resolution.
    pub mode: Option<BuildMode>,
    /// Sample image path, relative to the asset root.
    pub sample_image: String,
    pub download_name: String,
    pub dialog_title: String,
    pub share_title: String,
    pub share_dialog_title: String,
    /// Development asset directory. Defaults to `<cwd>/public`.
    pub public_dir: Option<PathBuf>,
}

impl Default for ImagePluginConfig {
    fn default() -> Self {
        Self {
            mode: None,
            sample_image: "images/sample.jpg".to_string(),
            download_name: DEFAULT_DOWNLOAD_NAME.to_string(),
            dialog_title: "Save Image".to_string(),
            share_title: "Sample image".to_string(),
            share_dialog_title: "Save or share image".to_string(),
            public_dir: None,
        }
    }
}

impl ImagePluginConfig {
    /// Sample locator as served by the web layer: always rooted.
    pub fn web_sample_src(&self) -> String {
        format!("/{}", self.sample_image.trim_start_matches('/'))
    }

    /// Sample locator for `mode`: rooted in development, relative in production.
    pub fn sample_src(&self, mode: BuildMode) -> String {
        match mode {
            BuildMode::Development => self.web_sample_src(),
            BuildMode::Production => self.sample_image.trim_start_matches('/').to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_wins() {
        let mode = BuildMode::resolve_with(
            Some("production"),
            Some(BuildMode::Development),
            BuildMode::Development,
        );
        assert_eq!(mode, BuildMode::Production);
    }

    #[test]
    fn test_invalid_env_is_ignored() {
        let mode = BuildMode::resolve_with(Some("staging"), None, BuildMode::Development);
        assert_eq!(mode, BuildMode::Development);
        let mode =
            BuildMode::resolve_with(None, Some(BuildMode::Production), BuildMode::Development);
        assert_eq!(mode, BuildMode::Production);
    }

    #[test]
    fn test_sample_src_per_mode() {
        let config = ImagePluginConfig::default();
        assert_eq!(config.sample_src(BuildMode::Development), "/images/sample.jpg");
        assert_eq!(config.sample_src(BuildMode::Production), "images/sample.jpg");
    }

    #[test]
    fn test_partial_config() {
        let raw = r#"{ "mode": "production", "downloadName": "photo.jpg" }"#;
        let config: ImagePluginConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.mode, Some(BuildMode::Production));
        assert_eq!(config.download_name, "photo.jpg");
        assert_eq!(config.dialog_title, "Save Image");
    }
}
