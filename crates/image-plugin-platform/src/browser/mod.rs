//! Bindings for code running inside a webview or a plain browser page.

mod anchor;
mod invoke;
mod native;
mod probe;

pub use anchor::AnchorDownloader;
pub use invoke::{invoke, InvokeChannel};
pub use native::InvokeNativeShell;
pub use probe::BrowserProbe;

use image_plugin_core::ImagePluginConfig;

use crate::selector::{get_image_plugin, BoundAdapter, PluginBindings};

/// Browser-side [`PluginBindings`].
#[derive(Debug, Clone, Default)]
pub struct BrowserBindings {
    config: ImagePluginConfig,
}

impl BrowserBindings {
    pub fn new(config: ImagePluginConfig) -> Self {
        Self { config }
    }
}

impl PluginBindings for BrowserBindings {
    type Channel = InvokeChannel;
    type Native = InvokeNativeShell;
    type Downloader = AnchorDownloader;

    fn config(&self) -> &ImagePluginConfig {
        &self.config
    }

    fn desktop_channel(&self) -> InvokeChannel {
        InvokeChannel
    }

    fn native_shell(&self) -> InvokeNativeShell {
        InvokeNativeShell
    }

    fn downloader(&self) -> AnchorDownloader {
        AnchorDownloader
    }
}

/// Probes the current page and returns the matching adapter.
pub fn image_plugin(config: ImagePluginConfig) -> BoundAdapter<BrowserBindings> {
    get_image_plugin(&BrowserProbe, &BrowserBindings::new(config))
}
