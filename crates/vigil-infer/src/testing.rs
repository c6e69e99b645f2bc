//! Test doubles for the scorer seam.
//!
//! Used by this crate's tests and by downstream session tests; no real
//! inference engine is required to exercise the pipeline.

use crate::{InferError, ModelProvider, ModelSource, Scorer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vigil_base::Tensor;

/// Scorer that returns a fixed output and records every input it was run on.
pub struct StubScorer {
    input_shape: Vec<usize>,
    output_shape: Vec<usize>,
    output: Vec<f32>,
    calls: Arc<Mutex<Vec<Tensor<f32>>>>,
}

impl StubScorer {
    pub fn new(input_shape: Vec<usize>, output_shape: Vec<usize>, output: Vec<f32>) -> Self {
        Self {
            input_shape,
            output_shape,
            output,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the recorded inputs; stays valid after the scorer moves
    /// into a registry or session.
    pub fn calls(&self) -> Arc<Mutex<Vec<Tensor<f32>>>> {
        Arc::clone(&self.calls)
    }
}

impl Scorer for StubScorer {
    fn input_shape(&self) -> &[usize] {
        &self.input_shape
    }

    fn output_shape(&self) -> &[usize] {
        &self.output_shape
    }

    fn run(&mut self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(input.clone());
        Ok(Tensor::new(self.output_shape.clone(), self.output.clone())?)
    }
}

type ScorerFactory = dyn Fn() -> StubScorer + Send + Sync;

/// Provider that builds stub scorers from a factory closure.
pub struct StubProvider {
    factory: Box<ScorerFactory>,
    loads: AtomicUsize,
    fail: bool,
}

impl StubProvider {
    pub fn new(factory: impl Fn() -> StubScorer + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            loads: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// Provider that rejects every load, as a corrupt model file would.
    pub fn failing() -> Self {
        Self {
            factory: Box::new(|| StubScorer::new(vec![1], vec![1], vec![0.0])),
            loads: AtomicUsize::new(0),
            fail: true,
        }
    }

    /// Number of load calls observed.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ModelProvider for StubProvider {
    fn load(&self, name: &str, _source: ModelSource) -> Result<Box<dyn Scorer>, InferError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(InferError::Load(format!("stub provider rejects '{name}'")));
        }
        Ok(Box::new((self.factory)()))
    }
}
