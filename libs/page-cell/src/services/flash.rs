use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use shared_config::AppConfig;

use crate::document::{Document, SharedDocument};

/// Fades out and removes every flash banner present at page load.
pub struct FlashDismisser<D: Document> {
    document: SharedDocument<D>,
    dismiss_after: Duration,
    fade: Duration,
}

impl<D: Document> FlashDismisser<D> {
    pub fn new(document: SharedDocument<D>, config: &AppConfig) -> Self {
        Self {
            document,
            dismiss_after: config.flash_dismiss_after,
            fade: config.flash_fade,
        }
    }

    pub fn spawn(self) -> JoinHandle<usize> {
        tokio::spawn(async move { self.run().await })
    }

    /// Returns how many banners were removed.
    #[instrument(skip(self))]
    pub async fn run(self) -> usize {
        // Only banners rendered with the page are scheduled.
        let flashes = self.document.lock().await.flash_messages();
        if flashes.is_empty() {
            return 0;
        }

        tokio::time::sleep(self.dismiss_after).await;
        {
            let mut document = self.document.lock().await;
            for flash in &flashes {
                document.fade_out(*flash, self.fade);
            }
        }

        tokio::time::sleep(self.fade).await;
        let mut document = self.document.lock().await;
        for flash in &flashes {
            document.remove_flash(*flash);
        }

        debug!("Dismissed {} flash messages", flashes.len());
        flashes.len()
    }
}
