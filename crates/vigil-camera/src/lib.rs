//! Capture-side types for the vigil pipeline.
//!
//! Defines the planar `RawFrame` with its mandatory release hook, the
//! YUV420 -> NV21 pixel conversion, and a keep-only-latest handoff between a
//! capture worker and the analysis loop.

pub mod convert;
pub mod error;
pub mod feed;
pub mod frame;
pub mod traits;

pub use convert::yuv420_to_nv21;
pub use error::CaptureError;
pub use feed::{FrameFeed, LatestFrameSource, latest_frame_channel};
pub use frame::{Plane, RawFrame};
pub use traits::FrameSource;
