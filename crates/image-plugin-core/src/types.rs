//! Values exchanged between adapters and their consumers.

use serde::{Deserialize, Serialize};

/// Locator of the bundled sample image when nothing better is known.
pub const DEFAULT_SAMPLE_SRC: &str = "/images/sample.jpg";

/// File name suggested for downloads and save dialogs.
pub const DEFAULT_DOWNLOAD_NAME: &str = "sample-image.jpg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleImageResult {
    pub src: String,
}

impl SampleImageResult {
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into() }
    }
}

impl Default for SampleImageResult {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_SRC)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveImageOptions {
    pub src: String,
}

impl SaveImageOptions {
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into() }
    }

    /// True for any `http`-prefixed `src`, scheme well-formed or not.
    pub fn is_remote(&self) -> bool {
        self.src
            .trim_start()
            .get(..4)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("http"))
    }

    /// Last path segment of `src`, or the default download name.
    pub fn file_name(&self) -> &str {
        self.src
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_DOWNLOAD_NAME)
    }
}

/// Result of a save attempt as seen by the privileged side.
///
/// `error` is only set on failure and `file_path` only on a successful
/// desktop save. A failure with neither is a user cancellation (or a silent
/// failure the adapter cannot describe).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl SaveOutcome {
    pub fn saved(file_path: impl Into<String>) -> Self {
        Self {
            success: true,
            error: None,
            file_path: Some(file_path.into()),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            file_path: None,
        }
    }

    pub fn cancelled() -> Self {
        Self::default()
    }
}

/// Narrowed save result handed to less-trusted consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub success: bool,
}

impl SaveResponse {
    pub const SUCCESS: Self = Self { success: true };
    pub const FAILURE: Self = Self { success: false };
}

impl From<SaveOutcome> for SaveResponse {
    fn from(outcome: SaveOutcome) -> Self {
        Self {
            success: outcome.success,
        }
    }
}

impl From<bool> for SaveResponse {
    fn from(success: bool) -> Self {
        Self { success }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_detection() {
        assert!(SaveImageOptions::new("http://example.com/a.jpg").is_remote());
        assert!(SaveImageOptions::new("HTTPS://example.com/a.jpg").is_remote());
        assert!(SaveImageOptions::new("http:/example.com/a.jpg").is_remote());
        assert!(SaveImageOptions::new("http:example.com/a.jpg").is_remote());
        assert!(SaveImageOptions::new("httpfoo/a.jpg").is_remote());
        assert!(!SaveImageOptions::new("/images/sample.jpg").is_remote());
        assert!(!SaveImageOptions::new("images/http.jpg").is_remote());
    }

    #[test]
    fn test_file_name_from_tail_segment() {
        assert_eq!(SaveImageOptions::new("/images/sample.jpg").file_name(), "sample.jpg");
        assert_eq!(SaveImageOptions::new("photo.png").file_name(), "photo.png");
        assert_eq!(SaveImageOptions::new("/images/").file_name(), DEFAULT_DOWNLOAD_NAME);
    }

    #[test]
    fn test_outcome_wire_shape() {
        let saved = serde_json::to_value(SaveOutcome::saved("/tmp/out.jpg")).unwrap();
        assert_eq!(saved, serde_json::json!({ "success": true, "filePath": "/tmp/out.jpg" }));

        let cancelled = serde_json::to_value(SaveOutcome::cancelled()).unwrap();
        assert_eq!(cancelled, serde_json::json!({ "success": false }));
    }

    #[test]
    fn test_narrowing_drops_detail() {
        let response = SaveResponse::from(SaveOutcome::failed("File not found"));
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value, serde_json::json!({ "success": false }));
    }
}
