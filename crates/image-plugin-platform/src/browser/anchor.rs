use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use image_plugin_core::{ImageError, ImageResult};

use crate::web::Downloader;

/// Downloads through a hidden `<a download>` element.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorDownloader;

impl Downloader for AnchorDownloader {
    fn trigger_download(&self, href: &str, file_name: &str) -> ImageResult<()> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ImageError::Download("no document".into()))?;
        let body = document
            .body()
            .ok_or_else(|| ImageError::Download("document has no body".into()))?;

        let anchor = document
            .create_element("a")
            .map_err(|err| ImageError::Download(format!("{err:?}")))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| ImageError::Download("created element is not an anchor".into()))?;
        anchor.set_href(href);
        anchor.set_download(file_name);
        if let Err(err) = anchor.set_attribute("style", "display: none") {
            tracing::warn!("could not hide download anchor: {err:?}");
        }

        body.append_child(&anchor)
            .map_err(|err| ImageError::Download(format!("{err:?}")))?;
        anchor.click();
        if let Err(err) = body.remove_child(&anchor) {
            tracing::warn!("download anchor left in document: {err:?}");
        }
        Ok(())
    }
}
