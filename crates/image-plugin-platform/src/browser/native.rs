use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use image_plugin_core::{ImageError, ImageFuture, ImageResult};

use super::invoke::invoke;
use crate::mobile::{NativeShell, ShareRequest};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CacheFileArgs<'a> {
    file_name: &'a str,
    bytes: &'a [u8],
}

#[derive(Serialize)]
struct ShareArgs<'a> {
    request: &'a ShareRequest,
}

fn js_error(err: wasm_bindgen::JsValue) -> ImageError {
    ImageError::AssetUnavailable(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

async fn fetch_bytes(src: &str) -> ImageResult<Option<Vec<u8>>> {
    let window = web_sys::window().ok_or(ImageError::PlatformNotSupported)?;
    let response: Response = JsFuture::from(window.fetch_with_str(src))
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;
    if !response.ok() {
        tracing::warn!("fetching {src} returned status {}", response.status());
        return Ok(None);
    }

    let buffer = JsFuture::from(response.array_buffer().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    Ok(Some(js_sys::Uint8Array::new(&buffer).to_vec()))
}

/// [`NativeShell`] backed by `fetch` and the host plugin's mobile commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvokeNativeShell;

impl NativeShell for InvokeNativeShell {
    fn read_asset<'a>(&'a self, src: &'a str) -> ImageFuture<'a, ImageResult<Option<Vec<u8>>>> {
        Box::pin(fetch_bytes(src))
    }

    fn write_cache_file<'a>(
        &'a self,
        file_name: &'a str,
        bytes: &'a [u8],
    ) -> ImageFuture<'a, ImageResult<String>> {
        Box::pin(async move {
            let args = CacheFileArgs { file_name, bytes };
            invoke("write_cache_file", &args).await
        })
    }

    fn share<'a>(&'a self, request: &'a ShareRequest) -> ImageFuture<'a, ImageResult<()>> {
        Box::pin(async move {
            let args = ShareArgs { request };
            invoke::<_, ()>("share_file", &args)
                .await
                .map_err(|err| ImageError::Share(err.to_string()))
        })
    }
}
