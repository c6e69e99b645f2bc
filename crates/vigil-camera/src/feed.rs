use crate::{CaptureError, FrameSource, RawFrame};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

struct Slot {
    frame: Option<RawFrame>,
    closed: bool,
}

struct Shared {
    slot: Mutex<Slot>,
    notify: Notify,
}

/// Producer half of a keep-only-latest frame handoff.
///
/// Submitting a frame while a previous one is still undelivered replaces it;
/// the replaced frame is dropped immediately, which runs its release hook and
/// returns the buffer to the source pool. This is the drop-oldest
/// backpressure policy: the consumer only ever sees the most recent frame.
pub struct FrameFeed {
    shared: Arc<Shared>,
}

impl FrameFeed {
    pub fn submit(&self, frame: RawFrame) {
        let mut slot = self.shared.slot.lock().unwrap_or_else(|e| e.into_inner());
        if slot.frame.is_some() {
            log::trace!("analysis is behind, dropping undelivered frame");
        }
        // Old frame (if any) is released here by its Drop impl.
        slot.frame = Some(frame);
        drop(slot);
        self.shared.notify.notify_one();
    }
}

impl Drop for FrameFeed {
    fn drop(&mut self) {
        let mut slot = self.shared.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.closed = true;
        drop(slot);
        self.shared.notify.notify_one();
    }
}

/// Consumer half of the handoff; yields frames in submission order.
pub struct LatestFrameSource {
    shared: Arc<Shared>,
}

impl FrameSource for LatestFrameSource {
    async fn next_frame(&mut self) -> Result<RawFrame, CaptureError> {
        loop {
            {
                let mut slot = self.shared.slot.lock().unwrap_or_else(|e| e.into_inner());
                if let Some(frame) = slot.frame.take() {
                    return Ok(frame);
                }
                if slot.closed {
                    return Err(CaptureError::Closed);
                }
            }
            self.shared.notify.notified().await;
        }
    }
}

/// Create a connected feed/source pair with a one-frame slot.
pub fn latest_frame_channel() -> (FrameFeed, LatestFrameSource) {
    let shared = Arc::new(Shared {
        slot: Mutex::new(Slot {
            frame: None,
            closed: false,
        }),
        notify: Notify::new(),
    });
    (
        FrameFeed {
            shared: Arc::clone(&shared),
        },
        LatestFrameSource { shared },
    )
}
