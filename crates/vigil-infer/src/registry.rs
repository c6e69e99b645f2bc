use crate::{InferError, ModelProvider, ModelSource, Scorer};
use std::collections::HashMap;

/// Name-keyed collection of independently loaded scorers.
///
/// Scorers are loaded once at session start; `select` transfers exclusive
/// ownership of one scorer to the session, which holds it for the session's
/// lifetime and releases it at teardown by dropping it.
pub struct ScorerRegistry {
    scorers: HashMap<String, Box<dyn Scorer>>,
}

impl ScorerRegistry {
    pub fn new() -> Self {
        Self {
            scorers: HashMap::new(),
        }
    }

    /// Load a model through the provider and register it under `name`.
    ///
    /// # Errors
    ///
    /// Returns `InferError::Load` if the provider rejects the model or the
    /// loaded scorer declares an empty input or output shape.
    pub fn load(
        &mut self,
        name: &str,
        source: ModelSource,
        provider: &dyn ModelProvider,
    ) -> Result<(), InferError> {
        let scorer = provider.load(name, source)?;
        if scorer.input_shape().is_empty() || scorer.output_shape().is_empty() {
            return Err(InferError::Load(format!(
                "model '{name}' declares an empty tensor shape"
            )));
        }
        log::debug!(
            "loaded scorer '{}': input {:?}, output {:?}",
            name,
            scorer.input_shape(),
            scorer.output_shape()
        );
        self.scorers.insert(name.to_string(), scorer);
        Ok(())
    }

    /// Take the scorer registered under `name` out of the registry.
    ///
    /// # Errors
    ///
    /// Returns `InferError::NotFound` for unknown names.
    pub fn select(&mut self, name: &str) -> Result<Box<dyn Scorer>, InferError> {
        self.scorers
            .remove(name)
            .ok_or_else(|| InferError::NotFound(name.to_string()))
    }

    /// Names of the scorers currently registered.
    pub fn names(&self) -> Vec<&str> {
        self.scorers.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.scorers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scorers.is_empty()
    }
}

impl Default for ScorerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
