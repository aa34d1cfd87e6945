//! Privileged half of the desktop adapter.
//!
//! [`DesktopImageHandler`] runs in the host process with filesystem access.
//! Window lookup and the native save dialog are delegated to a
//! [`DesktopHost`], which keeps the save flow itself host-agnostic.

use std::future::Future;
use std::path::{Path, PathBuf};

use image_plugin_core::{
    BuildMode, ImageChannelOp, ImageEnvelope, ImageError, ImagePluginConfig, ImageRequest,
    ImageResponse, ImageResult, SampleImageResult, SaveImageOptions, SaveOutcome,
};

/// Extensions accepted by the save dialog filter.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png", "jpeg"];

/// Parameters for the native save dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveDialogRequest {
    pub title: String,
    pub directory: Option<PathBuf>,
    pub file_name: String,
    pub filter_name: String,
    pub extensions: &'static [&'static str],
}

impl SaveDialogRequest {
    pub fn from_config(config: &ImagePluginConfig, downloads_dir: Option<PathBuf>) -> Self {
        Self {
            title: config.dialog_title.clone(),
            directory: downloads_dir,
            file_name: config.download_name.clone(),
            filter_name: "Images".to_string(),
            extensions: IMAGE_EXTENSIONS,
        }
    }

    /// Full default path shown by the dialog.
    pub fn default_path(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.join(&self.file_name),
            None => PathBuf::from(&self.file_name),
        }
    }
}

/// Windowing and dialog services of the desktop host.
pub trait DesktopHost: Send + Sync {
    type Window: Send + Sync;

    /// Returns the currently focused top-level window, if any.
    fn focused_window(&self) -> Option<Self::Window>;

    /// Shows a save dialog attached to `window`.
    ///
    /// Resolves to `None` when the user dismisses the dialog.
    fn pick_save_path(
        &self,
        window: &Self::Window,
        request: &SaveDialogRequest,
    ) -> impl Future<Output = ImageResult<Option<PathBuf>>> + Send;

    /// Bytes of `src` as embedded in the host binary, when it has no copy on
    /// disk.
    fn bundled_asset(&self, _src: &str) -> Option<Vec<u8>> {
        None
    }
}

/// Directories used to turn an image locator into an on-disk path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRoots {
    pub mode: BuildMode,
    /// Development asset directory (`<cwd>/public` by default).
    pub public_dir: PathBuf,
    /// Secondary development root.
    pub working_dir: PathBuf,
    /// Packaged resources directory used in production.
    pub resource_dir: PathBuf,
}

impl AssetRoots {
    pub fn new(
        config: &ImagePluginConfig,
        mode: BuildMode,
        working_dir: PathBuf,
        resource_dir: PathBuf,
    ) -> Self {
        let public_dir = config
            .public_dir
            .clone()
            .unwrap_or_else(|| working_dir.join("public"));
        Self {
            mode,
            public_dir,
            working_dir,
            resource_dir,
        }
    }

    /// Resolves `src` to a path. The result may not exist.
    pub fn resolve(&self, src: &str) -> PathBuf {
        let clean = src.strip_prefix('/').unwrap_or(src);
        match self.mode {
            BuildMode::Development => {
                let primary = self.public_dir.join(clean);
                if primary.exists() {
                    return primary;
                }
                let alternative = self.working_dir.join(clean);
                if alternative.exists() {
                    alternative
                } else {
                    primary
                }
            }
            BuildMode::Production => self.resource_dir.join(clean),
        }
    }
}

/// Host-side implementation of the image operations.
#[derive(Debug)]
pub struct DesktopImageHandler<H> {
    host: H,
    roots: AssetRoots,
    sample_src: String,
    dialog: SaveDialogRequest,
}

impl<H: DesktopHost> DesktopImageHandler<H> {
    pub fn new(
        host: H,
        config: &ImagePluginConfig,
        roots: AssetRoots,
        dialog: SaveDialogRequest,
    ) -> Self {
        Self {
            sample_src: config.sample_src(roots.mode),
            host,
            roots,
            dialog,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn roots(&self) -> &AssetRoots {
        &self.roots
    }

    /// Sample locator for the configured build mode. No I/O.
    pub fn get_sample_image(&self) -> SampleImageResult {
        SampleImageResult::new(self.sample_src.clone())
    }

    /// Runs the full save flow, reporting every failure as data.
    pub async fn save_image(&self, options: &SaveImageOptions) -> SaveOutcome {
        match self.try_save(options).await {
            Ok(destination) => {
                tracing::info!("image saved to {}", destination.display());
                SaveOutcome::saved(destination.to_string_lossy())
            }
            Err(ImageError::Cancelled) => {
                tracing::debug!("save dialog dismissed");
                SaveOutcome::cancelled()
            }
            Err(err) => {
                tracing::error!("failed to save image {:?}: {}", options.src, err);
                err.into()
            }
        }
    }

    async fn try_save(&self, options: &SaveImageOptions) -> ImageResult<PathBuf> {
        let window = self
            .host
            .focused_window()
            .ok_or(ImageError::NoFocusedWindow)?;

        // Remote sources are rejected before any dialog is shown.
        if options.is_remote() {
            return Err(ImageError::ExternalUrl);
        }

        let destination = self
            .host
            .pick_save_path(&window, &self.dialog)
            .await?
            .ok_or(ImageError::Cancelled)?;

        let source = self.roots.resolve(&options.src);
        if source.exists() {
            copy_file(&source, &destination)?;
        } else if let Some(bytes) = self.host.bundled_asset(&options.src) {
            tracing::debug!("{} not on disk, writing embedded asset", source.display());
            std::fs::write(&destination, bytes)?;
        } else {
            tracing::error!("file not found: {}", source.display());
            return Err(ImageError::FileNotFound);
        }
        Ok(destination)
    }

    /// Serves one channel request.
    pub async fn dispatch(&self, request: ImageRequest) -> ImageResponse {
        match request {
            ImageRequest::GetSample => ImageResponse::GetSample(self.get_sample_image()),
            ImageRequest::SaveImage(options) => {
                ImageResponse::SaveImage(self.save_image(&options).await)
            }
        }
    }

    /// Serves one enveloped request arriving on the `expected` channel.
    ///
    /// Envelopes from another schema version, or carrying another
    /// operation, are rejected before the handler runs.
    pub async fn serve(
        &self,
        expected: ImageChannelOp,
        envelope: ImageEnvelope<ImageRequest>,
    ) -> ImageResult<ImageEnvelope<ImageResponse>> {
        let request = envelope.open()?;
        if request.op() != expected {
            return Err(ImageError::Protocol(format!(
                "{} request sent to the {expected} channel",
                request.op()
            )));
        }
        Ok(ImageEnvelope::new(self.dispatch(request).await))
    }
}

fn copy_file(source: &Path, destination: &Path) -> ImageResult<()> {
    std::fs::copy(source, destination)?;
    Ok(())
}
