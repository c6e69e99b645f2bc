//! Shared foundation for the vigil workspace.
//!
//! Provides the flat `Tensor<T>` container used across the frame pipeline
//! and a small `log`-backed stdout logger.

pub mod logging;
pub mod tensor;

pub use logging::{StdoutLogger, init_stdout_logger};
pub use tensor::{Tensor, TensorError};
