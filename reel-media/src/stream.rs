//! Response body plumbing: idle-read timeout and release tracking.

use std::io;
use std::time::Duration;

use futures_util::StreamExt;
use tracing::{debug, warn};

use crate::{ByteStream, RangeWindow};

/// Tracks how much of a window reached the client.
///
/// Dropped together with the body; a drop before the last byte means the
/// client went away, which is a normal cancellation.
#[derive(Debug)]
pub struct DeliveryGuard {
    source: String,
    window: RangeWindow,
    sent: u64,
    finished: bool,
}

impl DeliveryGuard {
    pub fn new(source: String, window: RangeWindow) -> Self {
        Self {
            source,
            window,
            sent: 0,
            finished: false,
        }
    }

    pub fn record(&mut self, bytes: usize) {
        self.sent += bytes as u64;
    }

    /// Mark the body as ended, successfully or not
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }
}

impl Drop for DeliveryGuard {
    fn drop(&mut self) {
        if self.finished {
            debug!(
                source = %self.source,
                range = %self.window.content_range(),
                sent = self.sent,
                "range delivered"
            );
        } else {
            debug!(
                source = %self.source,
                range = %self.window.content_range(),
                sent = self.sent,
                expected = self.window.content_length(),
                "client disconnected before range was delivered"
            );
        }
    }
}

/// Wrap `inner` so it ends with `ErrorKind::TimedOut` when a single read
/// stalls longer than `idle`, and so `guard` observes delivery.
///
/// Dropping the returned stream drops `inner`, which releases the file.
pub fn guarded(inner: ByteStream, idle: Option<Duration>, guard: DeliveryGuard) -> ByteStream {
    Box::pin(async_stream::stream! {
        let mut inner = inner;
        let mut guard = guard;
        loop {
            let next = match idle {
                Some(idle) => match tokio::time::timeout(idle, inner.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        warn!(
                            source = %guard.source,
                            range = %guard.window.content_range(),
                            sent = guard.sent(),
                            "media read stalled for {:?}, aborting body",
                            idle
                        );
                        guard.finish();
                        yield Err(io::Error::new(io::ErrorKind::TimedOut, "media read timed out"));
                        break;
                    }
                },
                None => inner.next().await,
            };

            match next {
                Some(Ok(chunk)) => {
                    guard.record(chunk.len());
                    yield Ok(chunk);
                }
                Some(Err(e)) => {
                    warn!(source = %guard.source, error = %e, "media read failed mid-stream");
                    guard.finish();
                    yield Err(e);
                    break;
                }
                None => {
                    guard.finish();
                    break;
                }
            }
        }
    })
}
