//! # Image plugin
//!
//! Displays a bundled sample image and saves it to a user-chosen destination
//! on desktop, Android/iOS and the plain web, behind one [`ImagePlugin`]
//! interface.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! // Host process
//! tauri::Builder::default().plugin(image_plugin::plugin::init());
//!
//! // Webview (`web` feature, wasm32)
//! use image_plugin::prelude::*;
//!
//! let viewer = ImageViewer::new(image_plugin::browser::image_plugin(Default::default()));
//! viewer.mount().await;
//! viewer.save().await;
//! ```
//!
//! # Module Organization
//!
//! - [`prelude`] - `use image_plugin::prelude::*`
//! - [`ImageViewer`] - consumer state around a selected adapter
//! - [`plugin`] - Tauri plugin (`tauri` feature)
//! - [`browser`] - webview bindings (`web` feature, wasm32)

mod viewer;

pub use viewer::{ImageViewer, SaveAttempt};

// Core types
pub use image_plugin_core::{
    BuildMode, EnvironmentKind, EnvironmentMarker, EnvironmentProbe, ImageError, ImageFuture,
    ImagePlugin, ImagePluginConfig, ImageResult, NativeOs, SampleImageResult, SaveImageOptions,
    SaveOutcome, SaveResponse,
};

// Adapters and selection
pub use image_plugin_platform::{
    get_image_plugin, select_image_plugin, DesktopImageProxy, ImagePluginAdapter,
    MobileImageAdapter, PlainWebAdapter, Platform, PlatformProbe, PluginBindings,
};

#[cfg(feature = "tauri")]
pub mod plugin {
    pub use tauri_plugin_image::{init, HostImagePlugin, ImagePluginExt, ImagePluginState};
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use image_plugin_platform::browser;

pub mod prelude {
    pub use crate::{
        get_image_plugin, ImageError, ImagePlugin, ImagePluginConfig, ImageResult, ImageViewer,
        SampleImageResult, SaveAttempt, SaveImageOptions, SaveResponse,
    };

    #[cfg(feature = "tauri")]
    pub use tauri_plugin_image::ImagePluginExt;
}
