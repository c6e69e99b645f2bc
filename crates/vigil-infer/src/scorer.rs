use crate::InferError;
use std::path::PathBuf;
use vigil_base::Tensor;

/// Where the serialized model graph comes from.
pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}

/// A loaded scoring engine.
///
/// Shapes are discovered from the loaded model's metadata once at load time
/// and stay fixed for the scorer's lifetime. The engine is released when the
/// scorer is dropped, exactly once, at session teardown.
pub trait Scorer: Send {
    /// Declared input tensor shape, e.g. `[1, 128, 128, 3]` or
    /// `[1, 8, 128, 128, 3]`.
    fn input_shape(&self) -> &[usize];

    /// Declared output tensor shape, e.g. `[1, 1]` or `[1]`.
    fn output_shape(&self) -> &[usize];

    /// Score one input tensor. Blocking; the single slow step of the
    /// pipeline.
    fn run(&mut self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferError>;
}

/// External collaborator that turns model bytes into a loaded scorer.
pub trait ModelProvider {
    /// Load the model behind `name` from `source`.
    ///
    /// # Errors
    ///
    /// Returns `InferError::Load` if the bytes are not a valid model
    /// (corrupt format, unsupported op set).
    fn load(&self, name: &str, source: ModelSource) -> Result<Box<dyn Scorer>, InferError>;
}
