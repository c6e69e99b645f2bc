//! Session assembly for the vigil pipeline.
//!
//! Couples a frame source to an active scorer: frames are converted to NV21,
//! decoded to RGB, normalized into tensors, optionally buffered into the
//! temporal window, and dispatched for scoring. The resulting verdicts go to
//! a fire-and-forget presenter.

pub mod config;
pub mod error;
pub mod session;

pub use config::{
    DEFAULT_JPEG_QUALITY, DEFAULT_SEQUENCE_LENGTH, DEFAULT_THRESHOLD, SessionConfig,
};
pub use error::SessionError;
pub use session::{Presenter, Session, Verdict, run_session};
