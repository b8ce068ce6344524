//! Builder para `PipelineExecutor`.
//!
//! ```ignore
//! let executor = PipelineExecutor::builder()
//!     .add_step(WindowedAverageStep::new())
//!     .add_step(TopicRemapStep::new())
//!     .build()?;
//! ```
use std::sync::{Arc, Mutex};

use crate::cache::StepCache;
use crate::engine::PipelineExecutor;
use crate::errors::RelayError;
use crate::event::EventStore;
use crate::step::ProcessingStep;

#[derive(Debug)]
pub struct ExecutorBuilder<E: EventStore> {
    steps: Vec<Box<dyn ProcessingStep>>,
    cache: Option<Arc<StepCache>>,
    event_store: E,
}

impl<E: EventStore> ExecutorBuilder<E> {
    pub(crate) fn new(event_store: E) -> Self {
        Self { steps: Vec::new(),
               cache: None,
               event_store }
    }

    /// Añade un step al final del pipeline.
    pub fn add_step<S: ProcessingStep + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Añade un step ya boxeado (útil cuando la lista se arma dinámicamente).
    pub fn add_boxed_step(mut self, step: Box<dyn ProcessingStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Usa una cache existente en lugar de crear una nueva.
    pub fn with_cache(mut self, cache: Arc<StepCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Result<PipelineExecutor<E>, RelayError> {
        if self.steps.is_empty() {
            return Err(RelayError::EmptyPipeline);
        }
        Ok(PipelineExecutor { steps: self.steps,
                              cache: self.cache.unwrap_or_default(),
                              journal: Mutex::new(self.event_store) })
    }
}
