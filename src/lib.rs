use std::path::PathBuf;
use std::sync::Arc;

use image_plugin_core::{BuildMode, EnvironmentMarker, EnvironmentProbe};
use image_plugin_platform::{
    get_image_plugin, AssetRoots, BoundAdapter, DesktopImageHandler, LocalChannel,
    PlatformProbe, PluginBindings, SaveDialogRequest, UnsupportedDownloader,
};
use tauri::plugin::{Builder, TauriPlugin};
use tauri::{AppHandle, Manager, Runtime};

mod commands;
mod desktop;
mod mobile;

pub use commands::{get_sample, save_image, share_file, write_cache_file};
pub use desktop::TauriDesktopHost;
pub use mobile::TauriNativeShell;

pub use image_plugin_platform::{
    ImageError, ImagePlugin, ImagePluginConfig, ImageResult, SampleImageResult,
    SaveImageOptions, SaveResponse,
};

/// Privileged handler as managed by the plugin.
pub type HostImageHandler<R> = DesktopImageHandler<TauriDesktopHost<R>>;

/// Adapter returned by [`ImagePluginExt::image_plugin`].
pub type HostImagePlugin<R> = BoundAdapter<HostBindings<R>>;

/// Plugin state shared by the commands.
pub struct ImagePluginState<R: Runtime> {
    handler: Arc<HostImageHandler<R>>,
    shell: TauriNativeShell<R>,
    config: ImagePluginConfig,
}

impl<R: Runtime> ImagePluginState<R> {
    pub fn handler(&self) -> &HostImageHandler<R> {
        &self.handler
    }

    pub fn shell(&self) -> &TauriNativeShell<R> {
        &self.shell
    }

    pub fn config(&self) -> &ImagePluginConfig {
        &self.config
    }

    pub fn bindings(&self) -> HostBindings<R> {
        HostBindings {
            handler: Arc::clone(&self.handler),
            shell: self.shell.clone(),
            config: self.config.clone(),
        }
    }
}

/// Bindings for Rust code running in the host process.
///
/// Desktop calls go through an in-process channel to the managed handler.
/// There is no document in the host process, so browser downloads are
/// unavailable.
pub struct HostBindings<R: Runtime> {
    handler: Arc<HostImageHandler<R>>,
    shell: TauriNativeShell<R>,
    config: ImagePluginConfig,
}

impl<R: Runtime> PluginBindings for HostBindings<R> {
    type Channel = LocalChannel<TauriDesktopHost<R>>;
    type Native = TauriNativeShell<R>;
    type Downloader = UnsupportedDownloader;

    fn config(&self) -> &ImagePluginConfig {
        &self.config
    }

    fn desktop_channel(&self) -> Self::Channel {
        LocalChannel::new(Arc::clone(&self.handler))
    }

    fn native_shell(&self) -> Self::Native {
        self.shell.clone()
    }

    fn downloader(&self) -> Self::Downloader {
        UnsupportedDownloader
    }
}

/// Access to the image plugin from any Tauri manager.
pub trait ImagePluginExt<R: Runtime> {
    /// Selects the adapter for the platform this process runs on.
    fn image_plugin(&self) -> ImageResult<HostImagePlugin<R>>;
}

impl<R: Runtime, T: Manager<R>> ImagePluginExt<R> for T {
    fn image_plugin(&self) -> ImageResult<HostImagePlugin<R>> {
        let state = self
            .try_state::<ImagePluginState<R>>()
            .ok_or(ImageError::NotInitialized)?;
        Ok(get_image_plugin(&PlatformProbe::current(), &state.bindings()))
    }
}

/// Bytes of a frontend asset embedded in the app binary.
pub(crate) fn embedded_asset<R: Runtime>(app: &AppHandle<R>, src: &str) -> Option<Vec<u8>> {
    let key = format!("/{}", src.trim_start_matches('/'));
    app.asset_resolver()
        .get(key)
        .map(|asset| asset.bytes().to_vec())
}

fn marker_script() -> String {
    let probe = PlatformProbe::current();
    let marker = EnvironmentMarker {
        desktop_bridge: probe.has_desktop_bridge(),
        native_os: probe.native_os(),
    };
    marker.init_script().unwrap_or_else(|err| {
        tracing::error!("failed to build environment marker: {err}");
        String::new()
    })
}

#[cfg(not(any(target_os = "android", target_os = "ios")))]
fn downloads_dir() -> Option<PathBuf> {
    dirs::download_dir()
}

#[cfg(any(target_os = "android", target_os = "ios"))]
fn downloads_dir() -> Option<PathBuf> {
    None
}

/// Initializes the image plugin.
pub fn init<R: Runtime>() -> TauriPlugin<R, Option<ImagePluginConfig>> {
    Builder::<R, Option<ImagePluginConfig>>::new("image")
        .js_init_script(marker_script())
        .setup(|app, api| {
            let config = api.config().clone().unwrap_or_default();
            let fallback = if tauri::is_dev() {
                BuildMode::Development
            } else {
                BuildMode::Production
            };
            let mode = BuildMode::resolve(config.mode, fallback);

            let working_dir = std::env::current_dir()?;
            let resource_dir = app.path().resource_dir().unwrap_or_else(|err| {
                tracing::warn!("no resource directory, using working directory: {err}");
                working_dir.clone()
            });
            let roots = AssetRoots::new(&config, mode, working_dir, resource_dir);
            let dialog = SaveDialogRequest::from_config(&config, downloads_dir());
            let host = TauriDesktopHost::new(app.clone());
            let handler = Arc::new(DesktopImageHandler::new(host, &config, roots, dialog));

            #[cfg(any(target_os = "android", target_os = "ios"))]
            let shell = {
                let handle = match mobile::register_mobile_plugin(api) {
                    Ok(handle) => Some(handle),
                    Err(err) => {
                        tracing::error!("image plugin mobile registration failed: {err}");
                        None
                    }
                };
                TauriNativeShell::new(app.clone(), handle)
            };
            #[cfg(not(any(target_os = "android", target_os = "ios")))]
            let shell = TauriNativeShell::new(app.clone());

            tracing::info!(
                mode = ?mode,
                platform = %PlatformProbe::current().platform,
                "image plugin initialized"
            );
            app.manage(ImagePluginState {
                handler,
                shell,
                config,
            });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_sample,
            commands::save_image,
            commands::write_cache_file,
            commands::share_file,
        ])
        .build()
}
