//! Types and traits shared by every image plugin adapter.

use std::future::Future;
use std::pin::Pin;

pub mod channel;
pub mod config;
pub mod environment;
pub mod error;
pub mod types;

pub use channel::{
    ImageChannelOp, ImageEnvelope, ImageRequest, ImageResponse, CHANNEL_SCHEMA_VERSION,
};
pub use config::{BuildMode, ImagePluginConfig, MODE_ENV_VAR};
pub use environment::{
    EnvironmentKind, EnvironmentMarker, EnvironmentProbe, NativeOs, MARKER_GLOBAL,
};
pub use error::{ImageError, ImageResult};
pub use types::{
    SampleImageResult, SaveImageOptions, SaveOutcome, SaveResponse, DEFAULT_DOWNLOAD_NAME,
    DEFAULT_SAMPLE_SRC,
};

/// Boxed future returned by adapter operations.
pub type ImageFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Capability interface satisfied by every adapter.
///
/// Neither operation returns an error: failures are reported as data through
/// [`SaveResponse`], and the sample lookup falls back to a default locator.
pub trait ImagePlugin {
    /// Returns a locator for the bundled sample image.
    fn get_sample_image(&self) -> ImageFuture<'_, SampleImageResult>;

    /// Hands the image at `options.src` off to a user-controlled destination.
    fn save_image<'a>(&'a self, options: &'a SaveImageOptions) -> ImageFuture<'a, SaveResponse>;
}

impl<P: ImagePlugin + ?Sized> ImagePlugin for &P {
    fn get_sample_image(&self) -> ImageFuture<'_, SampleImageResult> {
        (**self).get_sample_image()
    }

    fn save_image<'a>(&'a self, options: &'a SaveImageOptions) -> ImageFuture<'a, SaveResponse> {
        (**self).save_image(options)
    }
}

impl<P: ImagePlugin + ?Sized> ImagePlugin for Box<P> {
    fn get_sample_image(&self) -> ImageFuture<'_, SampleImageResult> {
        (**self).get_sample_image()
    }

    fn save_image<'a>(&'a self, options: &'a SaveImageOptions) -> ImageFuture<'a, SaveResponse> {
        (**self).save_image(options)
    }
}
