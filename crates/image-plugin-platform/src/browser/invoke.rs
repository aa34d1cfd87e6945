use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use image_plugin_core::{
    ImageEnvelope, ImageError, ImageFuture, ImageRequest, ImageResponse, ImageResult,
};

use crate::proxy::ImageChannel;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI_INTERNALS__"], js_name = invoke, catch)]
    async fn tauri_invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

pub(crate) fn to_js<T: Serialize>(value: &T) -> ImageResult<JsValue> {
    let json = serde_json::to_string(value)?;
    js_sys::JSON::parse(&json).map_err(|err| ImageError::Serialization(format!("{err:?}")))
}

pub(crate) fn from_js<T: DeserializeOwned>(value: &JsValue) -> ImageResult<T> {
    if value.is_undefined() {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }
    let json = js_sys::JSON::stringify(value)
        .map_err(|err| ImageError::Serialization(format!("{err:?}")))?
        .as_string()
        .ok_or_else(|| ImageError::Serialization("value has no JSON form".into()))?;
    Ok(serde_json::from_str(&json)?)
}

/// Calls `plugin:image|<command>` on the host.
pub async fn invoke<A, T>(command: &str, args: &A) -> ImageResult<T>
where
    A: Serialize,
    T: DeserializeOwned,
{
    let cmd = format!("plugin:image|{command}");
    let value = tauri_invoke(&cmd, to_js(args)?)
        .await
        .map_err(|err| {
            ImageError::Channel(err.as_string().unwrap_or_else(|| format!("{err:?}")))
        })?;
    from_js(&value)
}

#[derive(Serialize)]
struct ChannelArgs {
    request: ImageEnvelope<ImageRequest>,
}

/// [`ImageChannel`] over the host's IPC bridge.
///
/// Each operation goes to its own command as a versioned envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvokeChannel;

impl InvokeChannel {
    async fn send(&self, request: ImageRequest) -> ImageResult<ImageResponse> {
        let op = request.op();
        let args = ChannelArgs {
            request: ImageEnvelope::new(request),
        };
        let response: ImageEnvelope<ImageResponse> = invoke(op.command(), &args).await?;
        response.open()?.expect_op(op)
    }
}

impl ImageChannel for InvokeChannel {
    fn invoke(&self, request: ImageRequest) -> ImageFuture<'_, ImageResult<ImageResponse>> {
        Box::pin(self.send(request))
    }
}
