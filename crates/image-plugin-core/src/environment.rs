//! Runtime environment model used to pick an adapter.

use serde::{Deserialize, Serialize};

/// Operating system reported by a native mobile shell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeOs {
    Android,
    Ios,
    #[serde(untagged)]
    Other(String),
}

impl NativeOs {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "android" => Self::Android,
            "ios" => Self::Ios,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether the native filesystem + share flow is available.
    pub fn supports_share(&self) -> bool {
        matches!(self, Self::Android | Self::Ios)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for NativeOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed set of environments an adapter can be selected for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnvironmentKind {
    DesktopHost,
    MobileNative(NativeOs),
    PlainWeb,
}

impl EnvironmentKind {
    /// Classifies the environment. A desktop bridge wins over a native shell.
    pub fn detect(probe: &impl EnvironmentProbe) -> Self {
        let kind = if probe.has_desktop_bridge() {
            Self::DesktopHost
        } else if let Some(os) = probe.native_os() {
            Self::MobileNative(os)
        } else {
            Self::PlainWeb
        };
        tracing::debug!(kind = kind.name(), "image plugin environment detected");
        kind
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DesktopHost => "desktop-host",
            Self::MobileNative(_) => "mobile-native",
            Self::PlainWeb => "plain-web",
        }
    }
}

/// Read-only view of the environment signals the selector consumes.
pub trait EnvironmentProbe {
    /// True when the desktop host exposes its bridge to this context.
    fn has_desktop_bridge(&self) -> bool;

    /// OS name when running inside a native mobile shell.
    fn native_os(&self) -> Option<NativeOs>;
}

/// Global the host injects into webviews to describe the environment.
pub const MARKER_GLOBAL: &str = "__IMAGE_PLUGIN__";

/// Environment signals as plain data.
///
/// Serves as a fixed probe in tests and as the payload of [`MARKER_GLOBAL`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentMarker {
    pub desktop_bridge: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_os: Option<NativeOs>,
}

impl EnvironmentMarker {
    pub fn desktop() -> Self {
        Self {
            desktop_bridge: true,
            native_os: None,
        }
    }

    pub fn native(os: NativeOs) -> Self {
        Self {
            desktop_bridge: false,
            native_os: Some(os),
        }
    }

    pub fn web() -> Self {
        Self::default()
    }

    /// Script assigning this marker to [`MARKER_GLOBAL`].
    pub fn init_script(&self) -> Result<String, serde_json::Error> {
        let value = serde_json::to_string(self)?;
        Ok(format!("globalThis.{MARKER_GLOBAL} = Object.freeze({value});"))
    }
}

impl EnvironmentProbe for EnvironmentMarker {
    fn has_desktop_bridge(&self) -> bool {
        self.desktop_bridge
    }

    fn native_os(&self) -> Option<NativeOs> {
        self.native_os.clone()
    }
}
