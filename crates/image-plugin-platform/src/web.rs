//! Browser download adapter.

use image_plugin_core::{
    ImageError, ImageFuture, ImagePlugin, ImagePluginConfig, ImageResult, SampleImageResult,
    SaveImageOptions, SaveResponse,
};

/// Triggers a browser download of `href` saved as `file_name`.
///
/// One call must produce exactly one download action.
pub trait Downloader {
    fn trigger_download(&self, href: &str, file_name: &str) -> ImageResult<()>;
}

impl<D: Downloader + ?Sized> Downloader for &D {
    fn trigger_download(&self, href: &str, file_name: &str) -> ImageResult<()> {
        (**self).trigger_download(href, file_name)
    }
}

/// Downloader for contexts without a document to attach a link to.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedDownloader;

impl Downloader for UnsupportedDownloader {
    fn trigger_download(&self, _href: &str, _file_name: &str) -> ImageResult<()> {
        Err(ImageError::PlatformNotSupported)
    }
}

/// Runs the anchor download, collapsing any failure to `{ success: false }`.
pub(crate) fn download_as_response(
    downloader: &impl Downloader,
    src: &str,
    file_name: &str,
) -> SaveResponse {
    match downloader.trigger_download(src, file_name) {
        Ok(()) => SaveResponse::SUCCESS,
        Err(err) => {
            tracing::error!("failed to save image: {err}");
            SaveResponse::FAILURE
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlainWebAdapter<D> {
    downloader: D,
    sample_src: String,
    download_name: String,
}

impl<D: Downloader> PlainWebAdapter<D> {
    pub fn new(downloader: D, config: &ImagePluginConfig) -> Self {
        Self {
            downloader,
            sample_src: config.web_sample_src(),
            download_name: config.download_name.clone(),
        }
    }

    pub fn downloader(&self) -> &D {
        &self.downloader
    }
}

impl<D: Downloader> ImagePlugin for PlainWebAdapter<D> {
    fn get_sample_image(&self) -> ImageFuture<'_, SampleImageResult> {
        let sample = SampleImageResult::new(self.sample_src.clone());
        Box::pin(async move { sample })
    }

    fn save_image<'a>(&'a self, options: &'a SaveImageOptions) -> ImageFuture<'a, SaveResponse> {
        Box::pin(async move {
            download_as_response(&self.downloader, &options.src, &self.download_name)
        })
    }
}
