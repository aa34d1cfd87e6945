//! Native shell services: bundled assets, the app cache and the share sheet.

use std::path::PathBuf;

use image_plugin_platform::{ImageError, ImageFuture, ImageResult, NativeShell, ShareRequest};
use tauri::{AppHandle, Manager, Runtime};

#[cfg(any(target_os = "android", target_os = "ios"))]
use tauri::plugin::PluginHandle;

#[cfg(target_os = "ios")]
tauri::ios_plugin_binding!(init_plugin_image);

/// Registers the Kotlin or Swift plugin serving the `share` call.
#[cfg(any(target_os = "android", target_os = "ios"))]
pub(crate) fn register_mobile_plugin<R: Runtime, C: serde::de::DeserializeOwned>(
    api: tauri::plugin::PluginApi<R, C>,
) -> Result<PluginHandle<R>, Box<dyn std::error::Error>> {
    #[cfg(target_os = "android")]
    let handle = api.register_android_plugin("app.tauri.image", "ImagePlugin")?;
    #[cfg(target_os = "ios")]
    let handle = api.register_ios_plugin(init_plugin_image)?;
    Ok(handle)
}

pub struct TauriNativeShell<R: Runtime> {
    app: AppHandle<R>,
    #[cfg(any(target_os = "android", target_os = "ios"))]
    handle: Option<PluginHandle<R>>,
}

impl<R: Runtime> Clone for TauriNativeShell<R> {
    fn clone(&self) -> Self {
        Self {
            app: self.app.clone(),
            #[cfg(any(target_os = "android", target_os = "ios"))]
            handle: self.handle.clone(),
        }
    }
}

impl<R: Runtime> std::fmt::Debug for TauriNativeShell<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TauriNativeShell").finish_non_exhaustive()
    }
}

impl<R: Runtime> TauriNativeShell<R> {
    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }

    #[cfg(any(target_os = "android", target_os = "ios"))]
    pub fn new(app: AppHandle<R>, handle: Option<PluginHandle<R>>) -> Self {
        Self { app, handle }
    }

    /// Bytes of the bundled asset at `src`, or `None` if it is not bundled.
    pub fn asset_bytes(&self, src: &str) -> Option<Vec<u8>> {
        crate::embedded_asset(&self.app, src)
    }

    /// Writes `bytes` to `<app cache>/<file_name>`.
    pub fn cache_file(&self, file_name: &str, bytes: &[u8]) -> ImageResult<PathBuf> {
        let name = std::path::Path::new(file_name)
            .file_name()
            .ok_or_else(|| ImageError::Io(format!("invalid cache file name {file_name:?}")))?;
        let dir = self
            .app
            .path()
            .app_cache_dir()
            .map_err(|err| ImageError::Io(err.to_string()))?;
        std::fs::create_dir_all(&dir)?;

        let path = dir.join(name);
        std::fs::write(&path, bytes)?;
        tracing::debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    #[cfg(any(target_os = "android", target_os = "ios"))]
    pub fn open_share_sheet(&self, request: &ShareRequest) -> ImageResult<()> {
        let handle = self.handle.as_ref().ok_or(ImageError::NotInitialized)?;
        handle
            .run_mobile_plugin::<serde_json::Value>("share", request)
            .map(|_| ())
            .map_err(|err| ImageError::Share(err.to_string()))
    }

    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    pub fn open_share_sheet(&self, _request: &ShareRequest) -> ImageResult<()> {
        Err(ImageError::PlatformNotSupported)
    }
}

pub(crate) fn file_uri(path: &std::path::Path) -> String {
    format!("file://{}", path.display())
}

impl<R: Runtime> NativeShell for TauriNativeShell<R> {
    fn read_asset<'a>(&'a self, src: &'a str) -> ImageFuture<'a, ImageResult<Option<Vec<u8>>>> {
        let bytes = self.asset_bytes(src);
        Box::pin(async move { Ok(bytes) })
    }

    fn write_cache_file<'a>(
        &'a self,
        file_name: &'a str,
        bytes: &'a [u8],
    ) -> ImageFuture<'a, ImageResult<String>> {
        let uri = self.cache_file(file_name, bytes).map(|path| file_uri(&path));
        Box::pin(async move { uri })
    }

    fn share<'a>(&'a self, request: &'a ShareRequest) -> ImageFuture<'a, ImageResult<()>> {
        let result = self.open_share_sheet(request);
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_uri() {
        let path = std::env::temp_dir().join("sample.jpg");
        let uri = file_uri(&path);
        assert!(uri.starts_with("file://"));
        assert!(uri.ends_with("sample.jpg"));
    }
}
