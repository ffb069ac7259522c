use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::{MediaResult, MediaRevision, MediaSource};

/// Polls a media source and publishes a new revision whenever its
/// modification time changes.
///
/// The streamer never reads the revision; subscribers decide what an update means.
pub struct MediaWatcher {
    source: Arc<dyn MediaSource>,
    interval: Duration,
    last_modified: Option<i64>,
    tx: watch::Sender<MediaRevision>,
}

impl MediaWatcher {
    pub fn new(source: Arc<dyn MediaSource>) -> Self {
        Self::with_interval(source, Duration::from_secs(1))
    }

    pub fn with_interval(source: Arc<dyn MediaSource>, interval: Duration) -> Self {
        let (tx, _rx) = watch::channel(MediaRevision::default());
        Self {
            source,
            interval,
            last_modified: None,
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<MediaRevision> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> MediaRevision {
        *self.tx.borrow()
    }

    /// Record the current modification time without announcing it
    pub async fn prime(&mut self) -> MediaResult<()> {
        let head = self.source.head().await?;
        self.last_modified = head.last_modified;
        self.tx.send_if_modified(|rev| {
            rev.last_modified = head.last_modified;
            false
        });
        Ok(())
    }

    /// Run one poll; returns true when a change was published
    pub async fn poll_once(&mut self) -> MediaResult<bool> {
        let head = self.source.head().await?;
        if head.last_modified == self.last_modified {
            return Ok(false);
        }

        self.last_modified = head.last_modified;
        self.tx.send_modify(|rev| {
            rev.revision += 1;
            rev.last_modified = head.last_modified;
        });
        info!(source = %self.source.describe(), revision = self.current().revision, "media file has been updated");
        Ok(true)
    }

    /// Poll forever on the configured interval
    pub async fn run(mut self) {
        if let Err(e) = self.prime().await {
            warn!(source = %self.source.describe(), "media not readable yet: {}", e);
        }

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(source = %self.source.describe(), "watching media with interval: {:?}", self.interval);

        loop {
            ticker.tick().await;
            match self.poll_once().await {
                Ok(true) => {}
                Ok(false) => debug!("media unchanged"),
                Err(e) => warn!(source = %self.source.describe(), "media poll failed: {}", e),
            }
        }
    }

    /// Spawn [`MediaWatcher::run`] on the current runtime
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ByteStream, MediaHead, RangeWindow};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicI64, Ordering};

    struct Clocked {
        modified: AtomicI64,
    }

    #[async_trait]
    impl MediaSource for Clocked {
        async fn head(&self) -> MediaResult<MediaHead> {
            Ok(MediaHead {
                size_bytes: 1,
                last_modified: Some(self.modified.load(Ordering::SeqCst)),
            })
        }

        async fn open(&self, _window: &RangeWindow) -> MediaResult<ByteStream> {
            Ok(Box::pin(futures_util::stream::empty::<Result<bytes::Bytes, std::io::Error>>()))
        }

        fn describe(&self) -> String {
            "clocked".to_string()
        }
    }

    #[tokio::test]
    async fn publishes_only_on_change() {
        let source = Arc::new(Clocked { modified: AtomicI64::new(100) });
        let mut watcher = MediaWatcher::new(source.clone());
        let mut rx = watcher.subscribe();

        watcher.prime().await.unwrap();
        assert!(!rx.has_changed().unwrap());
        assert_eq!(rx.borrow().last_modified, Some(100));
        assert!(!watcher.poll_once().await.unwrap());
        assert_eq!(watcher.current().revision, 0);

        source.modified.store(200, Ordering::SeqCst);
        assert!(watcher.poll_once().await.unwrap());
        assert!(rx.has_changed().unwrap());
        let rev = *rx.borrow_and_update();
        assert_eq!(rev, MediaRevision { revision: 1, last_modified: Some(200) });

        assert!(!watcher.poll_once().await.unwrap());
    }
}
