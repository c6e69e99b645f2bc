use crate::{SessionConfig, SessionError};
use std::sync::Arc;
use vigil_camera::{CaptureError, FrameSource, RawFrame, yuv420_to_nv21};
use vigil_image::{build_frame_tensor, decode_nv21};
use vigil_infer::{InferError, Scorer, ScorerRegistry, TemporalWindow, dispatch};

/// Result of scoring one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Verdict {
    pub score: f32,
    pub flagged: bool,
}

/// Display-side collaborator. Fire and forget; implementations decide how to
/// render a verdict and must not reach back into pipeline state.
pub trait Presenter {
    fn present(&self, verdict: Verdict);
}

/// One camera-to-confidence classification session.
///
/// Owns the active scorer exclusively; the engine is released exactly once
/// when the session is dropped, after the drive loop has stopped handing it
/// frames.
pub struct Session {
    scorer: Box<dyn Scorer>,
    window: TemporalWindow,
    temporal: bool,
    target_width: u32,
    target_height: u32,
    jpeg_quality: u8,
    threshold: f32,
}

impl Session {
    /// Select and validate the configured scorer, deriving frame geometry
    /// from its declared input shape.
    ///
    /// Setup failures are fatal: a session is never started against a
    /// scorer known to be unusable.
    ///
    /// # Errors
    ///
    /// `InferError::NotFound` (via `SessionError::Infer`) for an unknown
    /// model name and `InferError::UnsupportedShape` when the scorer
    /// declares an input rank outside {4, 5}, an output rank outside
    /// {1, 2}, an empty time axis, or zero input channels.
    pub fn start(config: &SessionConfig, registry: &mut ScorerRegistry) -> Result<Self, SessionError> {
        let scorer = registry.select(config.model())?;

        let input_shape = scorer.input_shape();
        let (temporal, steps, target_height, target_width, channels) = match input_shape.len() {
            4 => (
                false,
                config.sequence_length(),
                input_shape[1],
                input_shape[2],
                input_shape[3],
            ),
            5 => (
                true,
                input_shape[1],
                input_shape[2],
                input_shape[3],
                input_shape[4],
            ),
            rank => {
                return Err(InferError::UnsupportedShape(format!(
                    "model '{}' declares input rank {rank} (expected 4 or 5)",
                    config.model()
                ))
                .into());
            }
        };
        if temporal && steps == 0 {
            return Err(InferError::UnsupportedShape(format!(
                "model '{}' declares an empty time axis",
                config.model()
            ))
            .into());
        }
        if channels == 0 {
            // Would fail on every frame; refuse to start instead.
            return Err(InferError::UnsupportedShape(format!(
                "model '{}' declares zero input channels",
                config.model()
            ))
            .into());
        }

        let output_rank = scorer.output_shape().len();
        if !matches!(output_rank, 1 | 2) {
            return Err(InferError::UnsupportedShape(format!(
                "model '{}' declares output rank {output_rank} (expected 1 or 2)",
                config.model()
            ))
            .into());
        }

        log::info!(
            "session started with '{}': input {:?}, output {:?}, target {}x{}",
            config.model(),
            input_shape,
            scorer.output_shape(),
            target_width,
            target_height
        );

        Ok(Self {
            scorer,
            window: TemporalWindow::new(steps.max(1)),
            temporal,
            target_width: target_width as u32,
            target_height: target_height as u32,
            jpeg_quality: config.jpeg_quality(),
            threshold: config.threshold(),
        })
    }

    /// Whether the active scorer needs multi-frame context.
    pub fn is_temporal(&self) -> bool {
        self.temporal
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// The frame-handler boundary.
    ///
    /// Takes ownership of the frame, so its release hook runs on every exit
    /// path, including errors. Per-frame failures are logged and swallowed;
    /// the stream continues with the next frame. `None` also covers the
    /// expected warm-up of a temporal scorer.
    pub fn process_frame(&mut self, frame: RawFrame) -> Option<Verdict> {
        let result = self.analyze(&frame);
        drop(frame);

        match result {
            Ok(Some(score)) => Some(Verdict {
                score,
                flagged: score > self.threshold,
            }),
            Ok(None) => None,
            Err(err) => {
                log::warn!("dropping frame: {err}");
                None
            }
        }
    }

    fn analyze(&mut self, frame: &RawFrame) -> Result<Option<f32>, SessionError> {
        let nv21 = yuv420_to_nv21(frame)?;
        let raster = decode_nv21(&nv21, frame.width(), frame.height(), self.jpeg_quality)?;
        let tensor = Arc::new(build_frame_tensor(
            &raster,
            self.target_width,
            self.target_height,
        )?);

        if self.temporal {
            self.window.push(Arc::clone(&tensor));
        }

        Ok(dispatch::run(self.scorer.as_mut(), &tensor, &self.window)?)
    }
}

/// Drive a session from a frame source until the source closes.
///
/// Strictly serial: one frame is fully analyzed before the next is
/// requested, so the source's keep-only-latest slot is the only queue in
/// front of the pipeline. The caller drops the session, and with it the
/// scorer, only after this loop has returned.
pub async fn run_session(
    session: &mut Session,
    mut source: impl FrameSource,
    presenter: &impl Presenter,
) {
    loop {
        let frame = match source.next_frame().await {
            Ok(frame) => frame,
            Err(CaptureError::Closed) => break,
            Err(err) => {
                log::warn!("capture error, skipping frame: {err}");
                continue;
            }
        };
        if let Some(verdict) = session.process_frame(frame) {
            presenter.present(verdict);
        }
    }
    log::info!("frame source closed, session loop stopped");
}
