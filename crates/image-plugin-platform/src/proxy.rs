//! Unprivileged half of the desktop adapter and the channel it talks over.

use std::sync::Arc;

use image_plugin_core::{
    ImageEnvelope, ImageError, ImageFuture, ImagePlugin, ImageRequest, ImageResponse,
    ImageResult, SampleImageResult, SaveImageOptions, SaveResponse,
};

use crate::desktop::{DesktopHost, DesktopImageHandler};

/// Request/response transport to the privileged handler.
pub trait ImageChannel {
    fn invoke(&self, request: ImageRequest) -> ImageFuture<'_, ImageResult<ImageResponse>>;
}

impl<C: ImageChannel + ?Sized> ImageChannel for Arc<C> {
    fn invoke(&self, request: ImageRequest) -> ImageFuture<'_, ImageResult<ImageResponse>> {
        (**self).invoke(request)
    }
}

/// In-process channel to a [`DesktopImageHandler`].
///
/// Messages are serialized on the way in and out, so only plain data ever
/// reaches the handler or comes back from it.
#[derive(Debug)]
pub struct LocalChannel<H> {
    handler: Arc<DesktopImageHandler<H>>,
}

impl<H> Clone for LocalChannel<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H: DesktopHost> LocalChannel<H> {
    pub fn new(handler: Arc<DesktopImageHandler<H>>) -> Self {
        Self { handler }
    }

    async fn round_trip(&self, request: ImageRequest) -> ImageResult<ImageResponse> {
        let op = request.op();
        let wire = serde_json::to_string(&ImageEnvelope::new(request))?;
        let envelope = serde_json::from_str::<ImageEnvelope<ImageRequest>>(&wire)?;
        let response = self.handler.serve(op, envelope).await?;

        let wire = serde_json::to_string(&response)?;
        serde_json::from_str::<ImageEnvelope<ImageResponse>>(&wire)?
            .open()?
            .expect_op(op)
    }
}

impl<H: DesktopHost> ImageChannel for LocalChannel<H> {
    fn invoke(&self, request: ImageRequest) -> ImageFuture<'_, ImageResult<ImageResponse>> {
        Box::pin(self.round_trip(request))
    }
}

/// Forwards calls to the privileged handler and narrows what comes back.
#[derive(Debug, Clone)]
pub struct DesktopImageProxy<C> {
    channel: C,
}

impl<C: ImageChannel> DesktopImageProxy<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    async fn fetch_sample(&self) -> ImageResult<SampleImageResult> {
        self.channel
            .invoke(ImageRequest::GetSample)
            .await?
            .into_sample()
    }

    async fn forward_save(&self, options: &SaveImageOptions) -> ImageResult<SaveResponse> {
        tracing::debug!("forwarding save for {:?}", options.src);
        let outcome = self
            .channel
            .invoke(ImageRequest::SaveImage(options.clone()))
            .await?
            .into_outcome()?;
        Ok(SaveResponse::from(outcome))
    }
}

impl<C: ImageChannel> ImagePlugin for DesktopImageProxy<C> {
    fn get_sample_image(&self) -> ImageFuture<'_, SampleImageResult> {
        Box::pin(async move {
            self.fetch_sample().await.unwrap_or_else(|err| {
                tracing::warn!("sample lookup over channel failed, using default: {err}");
                SampleImageResult::default()
            })
        })
    }

    fn save_image<'a>(&'a self, options: &'a SaveImageOptions) -> ImageFuture<'a, SaveResponse> {
        Box::pin(async move {
            self.forward_save(options).await.unwrap_or_else(|err: ImageError| {
                tracing::error!("save over channel failed: {err}");
                SaveResponse::FAILURE
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::tests::{handler, temp_dir};
    use image_plugin_core::{BuildMode, SaveOutcome};
    use std::cell::RefCell;

    /// Channel replaying a fixed response.
    struct CannedChannel {
        response: ImageResult<ImageResponse>,
        seen: RefCell<Vec<ImageRequest>>,
    }

    impl CannedChannel {
        fn new(response: ImageResult<ImageResponse>) -> Self {
            Self {
                response,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl ImageChannel for CannedChannel {
        fn invoke(&self, request: ImageRequest) -> ImageFuture<'_, ImageResult<ImageResponse>> {
            self.seen.borrow_mut().push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    #[tokio::test]
    async fn test_proxy_narrows_every_outcome() {
        let outcomes = [
            SaveOutcome::saved("/home/user/Downloads/sample-image.jpg"),
            SaveOutcome::failed("File not found"),
            SaveOutcome::cancelled(),
        ];

        for outcome in outcomes {
            let expected = outcome.success;
            let proxy =
                DesktopImageProxy::new(CannedChannel::new(Ok(ImageResponse::SaveImage(outcome))));

            let response = proxy
                .save_image(&SaveImageOptions::new("/images/sample.jpg"))
                .await;

            let value = serde_json::to_value(response).unwrap();
            let fields: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
            assert_eq!(fields, vec!["success".to_string()]);
            assert_eq!(response.success, expected);
        }
    }

    #[tokio::test]
    async fn test_proxy_forwards_request_verbatim() {
        let channel = CannedChannel::new(Ok(ImageResponse::SaveImage(SaveOutcome::cancelled())));
        let proxy = DesktopImageProxy::new(channel);

        proxy
            .save_image(&SaveImageOptions::new("/images/sample.jpg"))
            .await;

        assert_eq!(
            proxy.channel().seen.borrow().as_slice(),
            &[ImageRequest::SaveImage(SaveImageOptions::new("/images/sample.jpg"))]
        );
    }

    #[tokio::test]
    async fn test_channel_failures_become_data() {
        let proxy = DesktopImageProxy::new(CannedChannel::new(Err(ImageError::Channel(
            "bridge closed".into(),
        ))));

        let sample = proxy.get_sample_image().await;
        assert!(!sample.src.is_empty());

        let response = proxy
            .save_image(&SaveImageOptions::new("/images/sample.jpg"))
            .await;
        assert_eq!(response, SaveResponse::FAILURE);
    }

    #[tokio::test]
    async fn test_mismatched_response_is_failure() {
        let proxy = DesktopImageProxy::new(CannedChannel::new(Ok(ImageResponse::GetSample(
            SampleImageResult::default(),
        ))));

        let response = proxy
            .save_image(&SaveImageOptions::new("/images/sample.jpg"))
            .await;
        assert!(!response.success);
    }

    #[tokio::test]
    async fn test_local_channel_end_to_end() {
        let dir = temp_dir("local_channel");
        std::fs::create_dir_all(dir.join("public/images")).unwrap();
        std::fs::write(dir.join("public/images/sample.jpg"), b"jpeg").unwrap();
        let destination = dir.join("copy.jpg");
        let handler = Arc::new(handler(
            &dir,
            BuildMode::Development,
            true,
            Some(destination.clone()),
        ));
        let proxy = DesktopImageProxy::new(LocalChannel::new(handler));

        let sample = proxy.get_sample_image().await;
        assert_eq!(sample.src, "/images/sample.jpg");
        assert_eq!(proxy.get_sample_image().await, sample);

        let response = proxy.save_image(&SaveImageOptions::new(sample.src)).await;
        assert_eq!(response, SaveResponse::SUCCESS);
        assert!(destination.exists());
    }
}
