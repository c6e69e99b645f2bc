//! Shape-adaptive dispatch.
//!
//! Scorers are heterogeneous: single-frame CNNs declare rank-4 input
//! `[1, H, W, C]`, temporal models declare rank-5 `[1, T, H, W, C]`, and
//! either may emit a rank-1 or rank-2 output. Shapes come from loaded model
//! metadata, so dispatch branches on rank rather than on model name; a new
//! model of an existing shape family needs no new code here.

use crate::{InferError, Scorer, TemporalWindow};
use std::sync::Arc;
use vigil_base::Tensor;

/// Run one inference pass for the current frame.
///
/// `frame` is the normalized `[H, W, 3]` tensor for the newest frame;
/// `window` holds the recent temporal context (the newest frame is expected
/// to have been pushed already when the scorer is temporal).
///
/// Returns `Ok(None)` while a rank-5 scorer is still warming up (the window
/// is not full yet). That is expected behavior, not a fault.
///
/// # Errors
///
/// `InferError::UnsupportedShape` for input ranks other than 4/5 or output
/// ranks other than 1/2; `InferError::Frame` when the frame tensors do not
/// match the declared shape.
pub fn run(
    scorer: &mut dyn Scorer,
    frame: &Tensor<f32>,
    window: &TemporalWindow,
) -> Result<Option<f32>, InferError> {
    let declared = scorer.input_shape().to_vec();
    let input = match declared.len() {
        4 => single_frame_input(frame, &declared)?,
        5 => {
            if !window.is_full() {
                return Ok(None);
            }
            stacked_input(&window.snapshot(), &declared)?
        }
        rank => {
            return Err(InferError::UnsupportedShape(format!(
                "input rank {rank} (expected 4 or 5), shape {declared:?}"
            )));
        }
    };

    let output = scorer.run(&input)?;
    decode_output(&output).map(Some)
}

/// Build a `[1, H, W, C]` input from one frame tensor.
///
/// Channel 0 is always taken from the frame; channels 1 and 2 only when the
/// scorer declares more than 1 / more than 2 channels, so grayscale models
/// degrade gracefully. Declared channels beyond 3 stay zero.
fn single_frame_input(frame: &Tensor<f32>, declared: &[usize]) -> Result<Tensor<f32>, InferError> {
    let (height, width, channels) = (declared[1], declared[2], declared[3]);
    if channels == 0 {
        return Err(InferError::UnsupportedShape(format!(
            "declared channel count is zero, shape {declared:?}"
        )));
    }
    if frame.shape != [height, width, 3] {
        return Err(InferError::Frame(format!(
            "frame tensor {:?} does not match declared [{height}, {width}, 3]",
            frame.shape
        )));
    }

    let mut input = Tensor::zeros(vec![1, height, width, channels])?;
    for pixel in 0..height * width {
        let src = pixel * 3;
        let dst = pixel * channels;
        input.data[dst] = frame.data[src];
        if channels > 1 {
            input.data[dst + 1] = frame.data[src + 1];
        }
        if channels > 2 {
            input.data[dst + 2] = frame.data[src + 2];
        }
    }
    Ok(input)
}

/// Stack a full window along the time axis into `[1, T, H, W, C]`.
fn stacked_input(
    frames: &[Arc<Tensor<f32>>],
    declared: &[usize],
) -> Result<Tensor<f32>, InferError> {
    let (steps, height, width, channels) = (declared[1], declared[2], declared[3], declared[4]);
    if frames.len() != steps {
        return Err(InferError::Frame(format!(
            "window holds {} frames, scorer wants {steps}",
            frames.len()
        )));
    }

    let frame_shape = [height, width, channels];
    let mut data = Vec::with_capacity(steps * height * width * channels);
    for frame in frames {
        if frame.shape != frame_shape {
            return Err(InferError::Frame(format!(
                "frame tensor {:?} does not match declared {frame_shape:?}",
                frame.shape
            )));
        }
        data.extend_from_slice(&frame.data);
    }

    Ok(Tensor::new(vec![1, steps, height, width, channels], data)?)
}

/// Collapse the scorer output to a single confidence scalar.
fn decode_output(output: &Tensor<f32>) -> Result<f32, InferError> {
    match output.rank() {
        // [batch, 1]: element [0][0]. [1]: element [0]. Same flat offset.
        1 | 2 => output.data.first().copied().ok_or_else(|| {
            InferError::Runtime(format!("scorer produced an empty {:?} output", output.shape))
        }),
        rank => Err(InferError::UnsupportedShape(format!(
            "output rank {rank} (expected 1 or 2), shape {:?}",
            output.shape
        ))),
    }
}
