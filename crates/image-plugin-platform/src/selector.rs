//! Adapter selection.
//!
//! Selection is a pure function of an [`EnvironmentKind`] and a set of
//! [`PluginBindings`]; nothing is cached, so every call re-reads the probe.

use image_plugin_core::{
    EnvironmentKind, EnvironmentProbe, ImageFuture, ImagePlugin, ImagePluginConfig,
    SampleImageResult, SaveImageOptions, SaveResponse,
};

use crate::mobile::{MobileImageAdapter, NativeShell};
use crate::proxy::{DesktopImageProxy, ImageChannel};
use crate::web::{Downloader, PlainWebAdapter};

/// Environment services an adapter may be built from.
pub trait PluginBindings {
    type Channel: ImageChannel;
    type Native: NativeShell;
    type Downloader: Downloader;

    fn config(&self) -> &ImagePluginConfig;

    /// Channel to the privileged desktop handler.
    fn desktop_channel(&self) -> Self::Channel;

    fn native_shell(&self) -> Self::Native;

    fn downloader(&self) -> Self::Downloader;
}

/// One adapter per [`EnvironmentKind`].
#[derive(Debug, Clone)]
pub enum ImagePluginAdapter<C, N, D> {
    DesktopHost(DesktopImageProxy<C>),
    MobileNative(MobileImageAdapter<N, D>),
    PlainWeb(PlainWebAdapter<D>),
}

/// Adapter type produced for a given set of bindings.
pub type BoundAdapter<B> = ImagePluginAdapter<
    <B as PluginBindings>::Channel,
    <B as PluginBindings>::Native,
    <B as PluginBindings>::Downloader,
>;

impl<C, N, D> ImagePluginAdapter<C, N, D> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::DesktopHost(_) => "desktop-host",
            Self::MobileNative(_) => "mobile-native",
            Self::PlainWeb(_) => "plain-web",
        }
    }
}

impl<C, N, D> ImagePlugin for ImagePluginAdapter<C, N, D>
where
    C: ImageChannel,
    N: NativeShell,
    D: Downloader,
{
    fn get_sample_image(&self) -> ImageFuture<'_, SampleImageResult> {
        match self {
            Self::DesktopHost(adapter) => adapter.get_sample_image(),
            Self::MobileNative(adapter) => adapter.get_sample_image(),
            Self::PlainWeb(adapter) => adapter.get_sample_image(),
        }
    }

    fn save_image<'a>(&'a self, options: &'a SaveImageOptions) -> ImageFuture<'a, SaveResponse> {
        match self {
            Self::DesktopHost(adapter) => adapter.save_image(options),
            Self::MobileNative(adapter) => adapter.save_image(options),
            Self::PlainWeb(adapter) => adapter.save_image(options),
        }
    }
}

/// Builds the adapter for `kind`.
pub fn select_image_plugin<B: PluginBindings>(
    kind: EnvironmentKind,
    bindings: &B,
) -> BoundAdapter<B> {
    tracing::debug!("selecting {} image adapter", kind.name());
    let config = bindings.config();
    match kind {
        EnvironmentKind::DesktopHost => {
            ImagePluginAdapter::DesktopHost(DesktopImageProxy::new(bindings.desktop_channel()))
        }
        EnvironmentKind::MobileNative(os) => {
            let shell = bindings.native_shell();
            let adapter = MobileImageAdapter::new(os, shell, bindings.downloader(), config);
            ImagePluginAdapter::MobileNative(adapter)
        }
        EnvironmentKind::PlainWeb => {
            ImagePluginAdapter::PlainWeb(PlainWebAdapter::new(bindings.downloader(), config))
        }
    }
}

/// Probes the environment and builds the matching adapter.
pub fn get_image_plugin<B: PluginBindings>(
    probe: &impl EnvironmentProbe,
    bindings: &B,
) -> BoundAdapter<B> {
    select_image_plugin(EnvironmentKind::detect(probe), bindings)
}
