use crate::{CaptureError, RawFrame};

/// Async source of camera frames.
///
/// Implementations deliver frames one at a time; the caller owns each
/// `RawFrame` until it is dropped. A source signals end of stream with
/// `CaptureError::Closed`.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    /// Receive the next frame from the source.
    async fn next_frame(&mut self) -> Result<RawFrame, CaptureError>;
}
