//! Adapter for native mobile shells.
//!
//! On Android and iOS the image is copied into the app cache and handed to
//! the native share sheet. Any other shell falls back to a browser download.

use serde::{Deserialize, Serialize};

use image_plugin_core::{
    ImageError, ImageFuture, ImagePlugin, ImagePluginConfig, ImageResult, NativeOs,
    SampleImageResult, SaveImageOptions, SaveResponse,
};

use crate::web::{download_as_response, Downloader};

/// Payload for the native share surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub title: String,
    pub url: String,
    pub dialog_title: String,
}

/// Device services of a native mobile shell.
pub trait NativeShell {
    /// Reads the bundled asset at `src`. `None` when the asset has no content.
    fn read_asset<'a>(&'a self, src: &'a str) -> ImageFuture<'a, ImageResult<Option<Vec<u8>>>>;

    /// Writes `bytes` to a cache-scoped file and returns its URI.
    fn write_cache_file<'a>(
        &'a self,
        file_name: &'a str,
        bytes: &'a [u8],
    ) -> ImageFuture<'a, ImageResult<String>>;

    /// Opens the native share sheet.
    fn share<'a>(&'a self, request: &'a ShareRequest) -> ImageFuture<'a, ImageResult<()>>;
}

#[derive(Debug, Clone)]
pub struct MobileImageAdapter<N, D> {
    os: NativeOs,
    shell: N,
    downloader: D,
    sample_src: String,
    download_name: String,
    share_title: String,
    share_dialog_title: String,
}

impl<N: NativeShell, D: Downloader> MobileImageAdapter<N, D> {
    pub fn new(os: NativeOs, shell: N, downloader: D, config: &ImagePluginConfig) -> Self {
        Self {
            os,
            shell,
            downloader,
            sample_src: config.web_sample_src(),
            download_name: config.download_name.clone(),
            share_title: config.share_title.clone(),
            share_dialog_title: config.share_dialog_title.clone(),
        }
    }

    pub fn os(&self) -> &NativeOs {
        &self.os
    }

    pub fn shell(&self) -> &N {
        &self.shell
    }

    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    async fn share_natively(&self, options: &SaveImageOptions) -> ImageResult<()> {
        let file_name = options.file_name();

        let bytes = match self.shell.read_asset(&options.src).await? {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Err(ImageError::AssetUnavailable(options.src.clone())),
        };

        let uri = self.shell.write_cache_file(file_name, &bytes).await?;
        tracing::debug!("cached {} bytes at {uri}", bytes.len());

        let request = ShareRequest {
            title: self.share_title.clone(),
            url: uri,
            dialog_title: self.share_dialog_title.clone(),
        };
        self.shell.share(&request).await
    }
}

impl<N: NativeShell, D: Downloader> ImagePlugin for MobileImageAdapter<N, D> {
    fn get_sample_image(&self) -> ImageFuture<'_, SampleImageResult> {
        let sample = SampleImageResult::new(self.sample_src.clone());
        Box::pin(async move { sample })
    }

    fn save_image<'a>(&'a self, options: &'a SaveImageOptions) -> ImageFuture<'a, SaveResponse> {
        Box::pin(async move {
            if !self.os.supports_share() {
                tracing::debug!("no share sheet on {}, downloading instead", self.os);
                return download_as_response(&self.downloader, &options.src, &self.download_name);
            }

            match self.share_natively(options).await {
                Ok(()) => SaveResponse::SUCCESS,
                Err(err) => {
                    tracing::error!("failed to save image: {err}");
                    SaveResponse::FAILURE
                }
            }
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::web::tests::RecordingDownloader;
    use std::cell::RefCell;

    /// In-memory native shell.
    #[derive(Default)]
    pub(crate) struct FakeShell {
        pub asset: Option<Vec<u8>>,
        pub share_error: Option<ImageError>,
        pub cached: RefCell<Vec<(String, Vec<u8>)>>,
        pub shared: RefCell<Vec<ShareRequest>>,
    }

    impl FakeShell {
        pub(crate) fn with_asset(bytes: &[u8]) -> Self {
            Self {
                asset: Some(bytes.to_vec()),
                ..Self::default()
            }
        }
    }

    impl NativeShell for FakeShell {
        fn read_asset<'a>(
            &'a self,
            _src: &'a str,
        ) -> ImageFuture<'a, ImageResult<Option<Vec<u8>>>> {
            let asset = self.asset.clone();
            Box::pin(async move { Ok(asset) })
        }

        fn write_cache_file<'a>(
            &'a self,
            file_name: &'a str,
            bytes: &'a [u8],
        ) -> ImageFuture<'a, ImageResult<String>> {
            self.cached
                .borrow_mut()
                .push((file_name.to_string(), bytes.to_vec()));
            let uri = format!("file:///cache/{file_name}");
            Box::pin(async move { Ok(uri) })
        }

        fn share<'a>(&'a self, request: &'a ShareRequest) -> ImageFuture<'a, ImageResult<()>> {
            self.shared.borrow_mut().push(request.clone());
            let result = match &self.share_error {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            };
            Box::pin(async move { result })
        }
    }

    fn adapter(
        os: NativeOs,
        shell: FakeShell,
    ) -> MobileImageAdapter<FakeShell, RecordingDownloader> {
        MobileImageAdapter::new(
            os,
            shell,
            RecordingDownloader::default(),
            &ImagePluginConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_sample_path_is_fixed() {
        for os in [NativeOs::Android, NativeOs::Ios, NativeOs::Other("web".into())] {
            let adapter = adapter(os, FakeShell::default());
            assert_eq!(adapter.get_sample_image().await.src, "/images/sample.jpg");
        }
    }

    #[tokio::test]
    async fn test_share_flow_on_android() {
        let adapter = adapter(NativeOs::Android, FakeShell::with_asset(b"jpeg"));

        let response = adapter
            .save_image(&SaveImageOptions::new("/images/sample.jpg"))
            .await;

        assert_eq!(response, SaveResponse::SUCCESS);
        assert_eq!(
            adapter.shell().cached.borrow().as_slice(),
            &[("sample.jpg".to_string(), b"jpeg".to_vec())]
        );
        let shared = adapter.shell().shared.borrow();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].url, "file:///cache/sample.jpg");
        assert!(adapter.downloader().downloads.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_missing_bytes_fail_without_side_effects() {
        for shell in [FakeShell::default(), FakeShell::with_asset(b"")] {
            let adapter = adapter(NativeOs::Ios, shell);

            let response = adapter
                .save_image(&SaveImageOptions::new("/images/sample.jpg"))
                .await;

            assert_eq!(response, SaveResponse::FAILURE);
            assert!(adapter.shell().cached.borrow().is_empty());
            assert!(adapter.shell().shared.borrow().is_empty());
        }
    }

    #[test]
    fn test_share_request_matches_native_args() {
        let request = ShareRequest {
            title: "Sample image".into(),
            url: "file:///cache/sample.jpg".into(),
            dialog_title: "Save or share image".into(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "title": "Sample image",
                "url": "file:///cache/sample.jpg",
                "dialogTitle": "Save or share image"
            })
        );
    }

    #[tokio::test]
    async fn test_share_error_is_failure() {
        let mut shell = FakeShell::with_asset(b"jpeg");
        shell.share_error = Some(ImageError::Share("dismissed".into()));
        let adapter = adapter(NativeOs::Android, shell);

        let response = adapter
            .save_image(&SaveImageOptions::new("/images/sample.jpg"))
            .await;

        assert_eq!(response, SaveResponse::FAILURE);
    }

    #[tokio::test]
    async fn test_unsupported_shell_downloads() {
        let adapter = adapter(NativeOs::Other("electron".into()), FakeShell::with_asset(b"jpeg"));

        let response = adapter
            .save_image(&SaveImageOptions::new("/images/sample.jpg"))
            .await;

        assert_eq!(response, SaveResponse::SUCCESS);
        assert_eq!(adapter.downloader().downloads.borrow().len(), 1);
        assert!(adapter.shell().shared.borrow().is_empty());
    }
}
