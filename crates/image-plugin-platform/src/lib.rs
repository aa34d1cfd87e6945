//! Image plugin adapters for every supported runtime environment.
//!
//! # Adapters
//!
//! - **Desktop host**: [`DesktopImageHandler`] runs with OS access and is
//!   reached from less-trusted code through [`DesktopImageProxy`] over an
//!   [`ImageChannel`].
//! - **Mobile native**: [`MobileImageAdapter`] writes to the app cache and opens
//!   the share sheet on Android/iOS, falling back to a browser download.
//! - **Plain web**: [`PlainWebAdapter`] triggers a browser download.
//!
//! # Usage
//!
//! ```ignore
//! use image_plugin_platform::{get_image_plugin, PlatformProbe};
//!
//! let plugin = get_image_plugin(&PlatformProbe::current(), &bindings);
//! let sample = plugin.get_sample_image().await;
//! plugin.save_image(&SaveImageOptions::new(sample.src)).await;
//! ```

use image_plugin_core::{EnvironmentProbe, NativeOs};

pub mod desktop;
pub mod mobile;
pub mod proxy;
pub mod selector;
pub mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod browser;

/// Platform identifier for runtime detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    MacOS,
    Windows,
    Android,
    Ios,
    Wasm,
    Unknown,
}

impl Platform {
    /// Returns the current platform at compile time.
    pub const fn current() -> Self {
        #[cfg(target_os = "linux")]
        {
            Platform::Linux
        }
        #[cfg(target_os = "macos")]
        {
            Platform::MacOS
        }
        #[cfg(target_os = "windows")]
        {
            Platform::Windows
        }
        #[cfg(target_os = "android")]
        {
            Platform::Android
        }
        #[cfg(target_os = "ios")]
        {
            Platform::Ios
        }
        #[cfg(all(
            target_arch = "wasm32",
            not(any(
                target_os = "linux",
                target_os = "android",
                target_os = "macos",
                target_os = "windows",
                target_os = "ios"
            ))
        ))]
        {
            Platform::Wasm
        }
        #[cfg(not(any(
            target_os = "linux",
            target_os = "android",
            target_os = "macos",
            target_os = "windows",
            target_os = "ios",
            target_arch = "wasm32"
        )))]
        {
            Platform::Unknown
        }
    }

    /// Returns a human-readable name for the platform.
    pub const fn name(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOS => "macos",
            Platform::Windows => "windows",
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Wasm => "wasm",
            Platform::Unknown => "unknown",
        }
    }

    pub const fn is_desktop(&self) -> bool {
        matches!(self, Platform::Linux | Platform::MacOS | Platform::Windows)
    }

    pub fn native_os(&self) -> Option<NativeOs> {
        match self {
            Platform::Android => Some(NativeOs::Android),
            Platform::Ios => Some(NativeOs::Ios),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Probe answering from the compile-time platform of a host process.
///
/// A host process on a desktop OS owns the desktop bridge; on Android/iOS it
/// runs inside the native shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProbe {
    pub platform: Platform,
}

impl PlatformProbe {
    pub const fn current() -> Self {
        Self {
            platform: Platform::current(),
        }
    }
}

impl EnvironmentProbe for PlatformProbe {
    fn has_desktop_bridge(&self) -> bool {
        self.platform.is_desktop()
    }

    fn native_os(&self) -> Option<NativeOs> {
        self.platform.native_os()
    }
}

pub use desktop::{
    AssetRoots, DesktopHost, DesktopImageHandler, SaveDialogRequest, IMAGE_EXTENSIONS,
};
pub use mobile::{MobileImageAdapter, NativeShell, ShareRequest};
pub use proxy::{DesktopImageProxy, ImageChannel, LocalChannel};
pub use selector::{
    get_image_plugin, select_image_plugin, BoundAdapter, ImagePluginAdapter, PluginBindings,
};
pub use web::{Downloader, PlainWebAdapter, UnsupportedDownloader};

// Re-export core contracts
pub use image_plugin_core::{
    EnvironmentKind, ImageError, ImageFuture, ImagePlugin, ImagePluginConfig, ImageResult,
    SampleImageResult, SaveImageOptions, SaveOutcome, SaveResponse,
};
