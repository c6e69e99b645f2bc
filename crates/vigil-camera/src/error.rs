use std::fmt;

#[derive(Debug)]
pub enum CaptureError {
    /// Malformed plane layout. Not recoverable for the frame; skip it.
    Format(String),
    /// The frame feed was dropped and no frame is pending.
    Closed,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Format(msg) => write!(f, "format error: {msg}"),
            CaptureError::Closed => write!(f, "frame source closed"),
        }
    }
}

impl std::error::Error for CaptureError {}
