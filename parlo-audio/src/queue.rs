//! Bounded frame queue between the capture callback and the normalizer
//!
//! The capture side pushes without blocking and drops frames when the queue
//! is full; the consumer drains with a per-frame timeout, so a stalled
//! producer truncates the recording instead of hanging the interaction.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::warn;

use crate::frame::Frame;

/// Default queue capacity in frames.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Create a bounded frame queue with the given capacity.
pub fn frame_queue(capacity: usize) -> (FrameSender, FrameReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let dropped = Arc::new(AtomicUsize::new(0));
    (
        FrameSender {
            tx,
            dropped: dropped.clone(),
        },
        FrameReceiver { rx, dropped },
    )
}

/// Producer half, used from the capture callback.
#[derive(Clone)]
pub struct FrameSender {
    tx: mpsc::Sender<Frame>,
    dropped: Arc<AtomicUsize>,
}

impl FrameSender {
    /// Push a frame without blocking.
    ///
    /// Returns `false` if the frame was dropped (queue full or receiver
    /// gone). Wait-free, safe to call from the audio callback thread.
    pub fn push(&self, frame: Frame) -> bool {
        match self.tx.try_send(frame) {
            Ok(()) => true,
            Err(_) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Frames dropped so far because the queue was not drained promptly.
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Consumer half, drained once per stop signal.
pub struct FrameReceiver {
    rx: mpsc::Receiver<Frame>,
    dropped: Arc<AtomicUsize>,
}

impl FrameReceiver {
    /// Receive the next frame, waiting at most `wait`.
    ///
    /// Returns `None` when the timeout elapses or all senders are gone.
    pub async fn recv_timeout(&mut self, wait: Duration) -> Option<Frame> {
        match timeout(wait, self.rx.recv()).await {
            Ok(frame) => frame,
            Err(_) => None,
        }
    }

    /// Drain every buffered frame, waiting at most `frame_timeout` for each.
    ///
    /// A timeout yields however many frames arrived, silently truncating the
    /// recording (logged at warn, not surfaced as an error).
    pub async fn drain(&mut self, frame_timeout: Duration) -> Vec<Frame> {
        let mut frames = Vec::new();

        loop {
            match timeout(frame_timeout, self.rx.recv()).await {
                Ok(Some(frame)) => frames.push(frame),
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        collected = frames.len(),
                        "frame drain timed out, truncating recording"
                    );
                    break;
                }
            }
        }

        let dropped = self.dropped.load(Ordering::Relaxed);
        if dropped > 0 {
            warn!(dropped, "capture queue overflowed during recording");
        }

        frames
    }
}
