//! Request/response schema for the restricted desktop channel.
//!
//! The channel only knows two operations. Payloads are plain serializable
//! values; nothing live (handles, callbacks) can cross it.

use serde::{Deserialize, Serialize};

use crate::error::{ImageError, ImageResult};
use crate::types::{SampleImageResult, SaveImageOptions, SaveOutcome};

/// Version of the request/response schema below.
pub const CHANNEL_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageChannelOp {
    GetSample,
    SaveImage,
}

impl ImageChannelOp {
    pub const ALL: [ImageChannelOp; 2] = [ImageChannelOp::GetSample, ImageChannelOp::SaveImage];

    /// Channel name used on the wire.
    pub const fn channel(self) -> &'static str {
        match self {
            Self::GetSample => "image-plugin-get-sample",
            Self::SaveImage => "image-plugin-save-image",
        }
    }

    /// Name of the Tauri command that serves this operation.
    pub const fn command(self) -> &'static str {
        match self {
            Self::GetSample => "get_sample",
            Self::SaveImage => "save_image",
        }
    }

    pub fn from_channel(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.channel() == name)
    }
}

impl std::fmt::Display for ImageChannelOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.channel())
    }
}

/// Request sent to the privileged handler, tagged with its channel name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "payload")]
pub enum ImageRequest {
    #[serde(rename = "image-plugin-get-sample")]
    GetSample,
    #[serde(rename = "image-plugin-save-image")]
    SaveImage(SaveImageOptions),
}

impl ImageRequest {
    pub fn op(&self) -> ImageChannelOp {
        match self {
            Self::GetSample => ImageChannelOp::GetSample,
            Self::SaveImage(_) => ImageChannelOp::SaveImage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "payload")]
pub enum ImageResponse {
    #[serde(rename = "image-plugin-get-sample")]
    GetSample(SampleImageResult),
    #[serde(rename = "image-plugin-save-image")]
    SaveImage(SaveOutcome),
}

impl ImageResponse {
    pub fn op(&self) -> ImageChannelOp {
        match self {
            Self::GetSample(_) => ImageChannelOp::GetSample,
            Self::SaveImage(_) => ImageChannelOp::SaveImage,
        }
    }

    /// Fails unless this response answers `expected`.
    pub fn expect_op(self, expected: ImageChannelOp) -> ImageResult<Self> {
        if self.op() == expected {
            Ok(self)
        } else {
            Err(mismatch(expected, self.op()))
        }
    }

    pub fn into_sample(self) -> ImageResult<SampleImageResult> {
        match self {
            Self::GetSample(sample) => Ok(sample),
            other => Err(mismatch(ImageChannelOp::GetSample, other.op())),
        }
    }

    pub fn into_outcome(self) -> ImageResult<SaveOutcome> {
        match self {
            Self::SaveImage(outcome) => Ok(outcome),
            other => Err(mismatch(ImageChannelOp::SaveImage, other.op())),
        }
    }
}

fn mismatch(expected: ImageChannelOp, actual: ImageChannelOp) -> ImageError {
    ImageError::Protocol(format!("expected {expected} response, got {actual}"))
}

/// Versioned wrapper around a channel message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEnvelope<T> {
    pub version: u32,
    pub message: T,
}

impl<T> ImageEnvelope<T> {
    pub fn new(message: T) -> Self {
        Self {
            version: CHANNEL_SCHEMA_VERSION,
            message,
        }
    }

    /// Unwraps the message, rejecting envelopes from another schema version.
    pub fn open(self) -> ImageResult<T> {
        if self.version != CHANNEL_SCHEMA_VERSION {
            return Err(ImageError::Protocol(format!(
                "unsupported channel schema version {} (expected {})",
                self.version, CHANNEL_SCHEMA_VERSION
            )));
        }
        Ok(self.message)
    }
}
