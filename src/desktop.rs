//! [`DesktopHost`] backed by Tauri windows and the native save dialog.

use std::future::Future;
use std::path::PathBuf;

use image_plugin_platform::{DesktopHost, ImageResult, SaveDialogRequest};
use tauri::{AppHandle, Manager, Runtime, WebviewWindow};

pub struct TauriDesktopHost<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriDesktopHost<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> std::fmt::Debug for TauriDesktopHost<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TauriDesktopHost").finish_non_exhaustive()
    }
}

impl<R: Runtime> DesktopHost for TauriDesktopHost<R> {
    type Window = WebviewWindow<R>;

    fn focused_window(&self) -> Option<WebviewWindow<R>> {
        self.app
            .webview_windows()
            .into_values()
            .find(|window| window.is_focused().unwrap_or(false))
    }

    fn bundled_asset(&self, src: &str) -> Option<Vec<u8>> {
        crate::embedded_asset(&self.app, src)
    }

    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    fn pick_save_path(
        &self,
        window: &WebviewWindow<R>,
        request: &SaveDialogRequest,
    ) -> impl Future<Output = ImageResult<Option<PathBuf>>> + Send {
        let mut dialog = rfd::AsyncFileDialog::new()
            .set_title(&request.title)
            .set_file_name(&request.file_name)
            .add_filter(&request.filter_name, request.extensions);
        if let Some(directory) = &request.directory {
            dialog = dialog.set_directory(directory);
        }
        let pending = dialog.set_parent(window).save_file();

        async move { Ok(pending.await.map(|handle| handle.path().to_path_buf())) }
    }

    #[cfg(any(target_os = "android", target_os = "ios"))]
    fn pick_save_path(
        &self,
        _window: &WebviewWindow<R>,
        _request: &SaveDialogRequest,
    ) -> impl Future<Output = ImageResult<Option<PathBuf>>> + Send {
        std::future::ready(Err(image_plugin_platform::ImageError::PlatformNotSupported))
    }
}
