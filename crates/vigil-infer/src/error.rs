use std::fmt;
use vigil_base::TensorError;

#[derive(Debug)]
pub enum InferError {
    /// The model provider could not produce a usable engine. Fatal to
    /// session start.
    Load(String),
    /// No scorer was loaded under the requested name. Fatal to session start.
    NotFound(String),
    /// The scorer declares a tensor rank the dispatcher cannot handle.
    /// Fatal to session start; it would recur on every frame.
    UnsupportedShape(String),
    /// A frame tensor does not match the declared shape. Recoverable: skip
    /// the frame and continue.
    Frame(String),
    Runtime(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::Load(msg) => write!(f, "load error: {msg}"),
            InferError::NotFound(name) => write!(f, "no scorer loaded under '{name}'"),
            InferError::UnsupportedShape(msg) => write!(f, "unsupported shape: {msg}"),
            InferError::Frame(msg) => write!(f, "frame shape error: {msg}"),
            InferError::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<TensorError> for InferError {
    fn from(err: TensorError) -> Self {
        InferError::Runtime(err.to_string())
    }
}
