//! IPC commands, invoked from the webview as `plugin:image|<command>`.

use image_plugin_core::{ImageChannelOp, ImageEnvelope, ImageRequest, ImageResponse};
use image_plugin_platform::ShareRequest;
use tauri::{command, Runtime, State};

use crate::mobile::file_uri;
use crate::ImagePluginState;

async fn serve<R: Runtime>(
    state: &ImagePluginState<R>,
    op: ImageChannelOp,
    request: ImageEnvelope<ImageRequest>,
) -> Result<ImageEnvelope<ImageResponse>, String> {
    state
        .handler()
        .serve(op, request)
        .await
        .map_err(|e| e.to_string())
}

/// `image-plugin-get-sample`: sample locator for the resolved build mode.
#[command]
pub async fn get_sample<R: Runtime>(
    state: State<'_, ImagePluginState<R>>,
    request: ImageEnvelope<ImageRequest>,
) -> Result<ImageEnvelope<ImageResponse>, String> {
    serve(&state, ImageChannelOp::GetSample, request).await
}

/// `image-plugin-save-image`: runs the desktop save flow. Failures come back
/// inside the outcome.
#[command]
pub async fn save_image<R: Runtime>(
    state: State<'_, ImagePluginState<R>>,
    request: ImageEnvelope<ImageRequest>,
) -> Result<ImageEnvelope<ImageResponse>, String> {
    serve(&state, ImageChannelOp::SaveImage, request).await
}

/// Writes bytes into the app cache and returns a `file://` URI for them.
#[command]
pub async fn write_cache_file<R: Runtime>(
    state: State<'_, ImagePluginState<R>>,
    file_name: String,
    bytes: Vec<u8>,
) -> Result<String, String> {
    state
        .shell()
        .cache_file(&file_name, &bytes)
        .map(|path| file_uri(&path))
        .map_err(|e| e.to_string())
}

#[command]
pub async fn share_file<R: Runtime>(
    state: State<'_, ImagePluginState<R>>,
    request: ShareRequest,
) -> Result<(), String> {
    state
        .shell()
        .open_share_sheet(&request)
        .map_err(|e| e.to_string())
}
