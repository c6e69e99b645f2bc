//! Inference layer of the vigil pipeline.
//!
//! Holds the scorer seam (a loaded model with declared input/output shapes),
//! the name-keyed registry scorers are loaded into, the bounded temporal
//! window for sequence models, and the shape-adaptive dispatcher that turns
//! frame tensors into a single confidence scalar.

pub mod backends;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod scorer;
pub mod testing;
pub mod window;

pub use error::InferError;
pub use registry::ScorerRegistry;
pub use scorer::{ModelProvider, ModelSource, Scorer};
pub use window::TemporalWindow;

#[cfg(feature = "onnx")]
pub use backends::OnnxProvider;
