//! Consumer-side state around a selected adapter.

use std::cell::{Cell, RefCell};

use image_plugin_core::{ImagePlugin, SampleImageResult, SaveImageOptions, SaveResponse};

const SAVED_MESSAGE: &str = "Image saved successfully!";
const FAILED_MESSAGE: &str = "Failed to save image: An error occurred";

/// What a call to [`ImageViewer::save`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAttempt {
    /// Another save is still in flight.
    Busy,
    /// No image has been loaded yet.
    NoImage,
    Saved,
    Failed,
}

/// Holds the displayed image and the save status for one view.
///
/// At most one save is in flight at a time.
pub struct ImageViewer<P> {
    plugin: P,
    image: RefCell<Option<SampleImageResult>>,
    saving: Cell<bool>,
    last_result: Cell<Option<SaveResponse>>,
}

impl<P: ImagePlugin> ImageViewer<P> {
    pub fn new(plugin: P) -> Self {
        Self {
            plugin,
            image: RefCell::new(None),
            saving: Cell::new(false),
            last_result: Cell::new(None),
        }
    }

    pub fn plugin(&self) -> &P {
        &self.plugin
    }

    /// Loads the sample image. Later calls keep the first result.
    pub async fn mount(&self) -> SampleImageResult {
        if let Some(image) = self.image() {
            return image;
        }
        let image = self.plugin.get_sample_image().await;
        tracing::debug!("displaying {}", image.src);
        self.image.replace(Some(image.clone()));
        image
    }

    pub fn image(&self) -> Option<SampleImageResult> {
        self.image.borrow().clone()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.get()
    }

    /// Whether the save action should be enabled.
    pub fn can_save(&self) -> bool {
        !self.is_saving() && self.image.borrow().as_ref().is_some_and(|i| !i.src.is_empty())
    }

    pub fn last_result(&self) -> Option<SaveResponse> {
        self.last_result.get()
    }

    /// Status line for the last completed save.
    pub fn message(&self) -> Option<&'static str> {
        self.last_result
            .get()
            .map(|result| if result.success { SAVED_MESSAGE } else { FAILED_MESSAGE })
    }

    pub async fn save(&self) -> SaveAttempt {
        if self.saving.get() {
            return SaveAttempt::Busy;
        }
        let src = match self.image() {
            Some(image) if !image.src.is_empty() => image.src,
            _ => return SaveAttempt::NoImage,
        };

        let _saving = SavingGuard::start(&self.saving);
        self.last_result.set(None);
        let response = self.plugin.save_image(&SaveImageOptions::new(src)).await;
        self.last_result.set(Some(response));

        if response.success {
            SaveAttempt::Saved
        } else {
            SaveAttempt::Failed
        }
    }
}

/// Holds the busy flag for the lifetime of one save, including a save whose
/// future is dropped before it completes.
struct SavingGuard<'a>(&'a Cell<bool>);

impl<'a> SavingGuard<'a> {
    fn start(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use image_plugin_core::ImageFuture;
    use tokio::sync::oneshot;

    /// Plugin whose saves wait for a signal.
    struct GatedPlugin {
        gate: RefCell<Option<oneshot::Receiver<bool>>>,
        saves: Cell<usize>,
    }

    impl GatedPlugin {
        fn new() -> (Self, oneshot::Sender<bool>) {
            let (tx, rx) = oneshot::channel();
            let plugin = Self {
                gate: RefCell::new(Some(rx)),
                saves: Cell::new(0),
            };
            (plugin, tx)
        }
    }

    impl ImagePlugin for GatedPlugin {
        fn get_sample_image(&self) -> ImageFuture<'_, SampleImageResult> {
            Box::pin(async { SampleImageResult::new("/images/sample.jpg") })
        }

        fn save_image<'a>(
            &'a self,
            _options: &'a SaveImageOptions,
        ) -> ImageFuture<'a, SaveResponse> {
            self.saves.set(self.saves.get() + 1);
            let gate = self.gate.borrow_mut().take();
            Box::pin(async move {
                match gate {
                    Some(rx) => SaveResponse::from(rx.await.unwrap_or(false)),
                    None => SaveResponse::SUCCESS,
                }
            })
        }
    }

    #[tokio::test]
    async fn test_save_requires_image() {
        let (plugin, _tx) = GatedPlugin::new();
        let viewer = ImageViewer::new(plugin);

        assert!(!viewer.can_save());
        assert_eq!(viewer.save().await, SaveAttempt::NoImage);
        assert_eq!(viewer.plugin().saves.get(), 0);
    }

    #[tokio::test]
    async fn test_mount_keeps_first_image() {
        let (plugin, _tx) = GatedPlugin::new();
        let viewer = ImageViewer::new(plugin);

        let first = viewer.mount().await;
        assert_eq!(first.src, "/images/sample.jpg");
        assert_eq!(viewer.mount().await, first);
        assert!(viewer.can_save());
    }

    #[tokio::test]
    async fn test_concurrent_save_is_rejected() {
        let (plugin, tx) = GatedPlugin::new();
        let viewer = ImageViewer::new(plugin);
        viewer.mount().await;

        let mut pending = viewer.save().boxed_local();
        assert!(futures::poll!(&mut pending).is_pending());
        assert!(viewer.is_saving());
        assert!(!viewer.can_save());

        assert_eq!(viewer.save().await, SaveAttempt::Busy);
        assert_eq!(viewer.plugin().saves.get(), 1);

        tx.send(true).unwrap();
        assert_eq!(pending.await, SaveAttempt::Saved);
        assert!(!viewer.is_saving());
        assert_eq!(viewer.message(), Some(SAVED_MESSAGE));
    }

    #[tokio::test]
    async fn test_abandoned_save_releases_busy_flag() {
        let (plugin, _tx) = GatedPlugin::new();
        let viewer = ImageViewer::new(plugin);
        viewer.mount().await;

        let mut pending = viewer.save().boxed_local();
        assert!(futures::poll!(&mut pending).is_pending());
        assert!(viewer.is_saving());
        drop(pending);

        assert!(!viewer.is_saving());
        assert!(viewer.can_save());
        assert_eq!(viewer.save().await, SaveAttempt::Saved);
        assert_eq!(viewer.plugin().saves.get(), 2);
    }

    #[tokio::test]
    async fn test_failed_save_sets_message() {
        let (plugin, tx) = GatedPlugin::new();
        let viewer = ImageViewer::new(plugin);
        viewer.mount().await;

        tx.send(false).unwrap();
        assert_eq!(viewer.save().await, SaveAttempt::Failed);
        assert_eq!(viewer.last_result(), Some(SaveResponse::FAILURE));
        assert_eq!(viewer.message(), Some(FAILED_MESSAGE));
    }
}
