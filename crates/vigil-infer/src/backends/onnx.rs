use crate::{InferError, ModelProvider, ModelSource, Scorer};
use ndarray::ArrayD;
use ort::inputs;
use ort::session::Session as OrtSession;
use ort::value::{TensorRef, ValueType};
use vigil_base::Tensor;

/// Model provider backed by ONNX Runtime on CPU.
pub struct OnnxProvider;

impl ModelProvider for OnnxProvider {
    fn load(&self, name: &str, source: ModelSource) -> Result<Box<dyn Scorer>, InferError> {
        let builder = OrtSession::builder()
            .map_err(|e| InferError::Load(format!("failed to create session builder: {e}")))?;

        let session = match source {
            ModelSource::File(path) => builder
                .commit_from_file(path)
                .map_err(|e| InferError::Load(format!("failed to load '{name}' from file: {e}")))?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(&bytes).map_err(|e| {
                InferError::Load(format!("failed to load '{name}' from memory: {e}"))
            })?,
        };

        let input = session
            .inputs()
            .first()
            .ok_or_else(|| InferError::Load(format!("model '{name}' declares no inputs")))?;
        let input_name = input.name().to_string();
        let input_shape = declared_dims(input.input_type())
            .ok_or_else(|| InferError::Load(format!("model '{name}' input is not a tensor")))?;

        let output = session
            .outputs()
            .first()
            .ok_or_else(|| InferError::Load(format!("model '{name}' declares no outputs")))?;
        let output_name = output.name().to_string();
        let output_shape = declared_dims(output.output_type())
            .ok_or_else(|| InferError::Load(format!("model '{name}' output is not a tensor")))?;

        Ok(Box::new(OnnxScorer {
            session,
            input_name,
            output_name,
            input_shape,
            output_shape,
        }))
    }
}

/// Dimensions of a declared tensor type; dynamic axes collapse to 1.
fn declared_dims(value_type: &ValueType) -> Option<Vec<usize>> {
    match value_type {
        ValueType::Tensor { shape, .. } => Some(
            shape
                .iter()
                .map(|&dim| if dim > 0 { dim as usize } else { 1 })
                .collect(),
        ),
        _ => None,
    }
}

struct OnnxScorer {
    session: OrtSession,
    input_name: String,
    output_name: String,
    input_shape: Vec<usize>,
    output_shape: Vec<usize>,
}

impl Scorer for OnnxScorer {
    fn input_shape(&self) -> &[usize] {
        &self.input_shape
    }

    fn output_shape(&self) -> &[usize] {
        &self.output_shape
    }

    fn run(&mut self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferError> {
        let array = ArrayD::from_shape_vec(input.shape.clone(), input.data.clone())
            .map_err(|e| InferError::Runtime(format!("failed to build input array: {e}")))?;
        let tensor_ref = TensorRef::from_array_view(array.view())
            .map_err(|e| InferError::Runtime(format!("failed to create tensor ref: {e}")))?;

        let outputs = self
            .session
            .run(inputs![self.input_name.as_str() => tensor_ref])
            .map_err(|e| InferError::Runtime(format!("inference failed: {e}")))?;

        let value = &outputs[self.output_name.as_str()];
        let array = value
            .try_extract_array::<f32>()
            .map_err(|e| InferError::Runtime(format!("output is not f32: {e}")))?;

        let shape = array.shape().to_vec();
        let data = array.iter().copied().collect();
        Ok(Tensor::new(shape, data)?)
    }
}
