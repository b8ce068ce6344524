//! Implementación del `PipelineExecutor`: despacho secuencial, lotes en
//! paralelo y journal de resultados.

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::cache::StepCache;
use crate::engine::ExecutorBuilder;
use crate::event::{EventStore, InMemoryEventStore, RelayEvent, RelayEventKind};
use crate::model::PipelineMessage;
use crate::step::{ProcessingStep, StepOutcome};

/// Resultado de despachar un mensaje a través de todo el pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    /// El último step emitió un mensaje listo para republicar.
    Published(PipelineMessage),
    /// Algún step terminó con `Done(None)`; no hay salida en este ciclo.
    Suppressed { step: String },
    /// Algún step reportó error (o emitió un envelope inválido).
    Failed { step: String, message: PipelineMessage, reason: String },
}

impl DispatchResult {
    pub fn published(&self) -> Option<&PipelineMessage> {
        match self {
            DispatchResult::Published(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Executor secuencial con cache compartida y journal de resultados.
///
/// Puede despacharse desde varios hilos a la vez (`&self`). La corrección de
/// los steps con estado depende de que cada uno serialice su propio
/// read-modify-write en la cache (ver `StepCache::update_or_default`).
#[derive(Debug)]
pub struct PipelineExecutor<E = InMemoryEventStore>
    where E: EventStore
{
    pub(crate) steps: Vec<Box<dyn ProcessingStep>>,
    pub(crate) cache: Arc<StepCache>,
    pub(crate) journal: Mutex<E>,
}

impl PipelineExecutor<InMemoryEventStore> {
    /// Crea un builder con journal en memoria.
    #[inline]
    pub fn builder() -> ExecutorBuilder<InMemoryEventStore> {
        ExecutorBuilder::new(InMemoryEventStore::default())
    }

    /// Crea un builder cuyo journal en memoria retiene como máximo
    /// `capacity` eventos. Es el que conviene a procesos de larga vida.
    #[inline]
    pub fn bounded_builder(capacity: usize) -> ExecutorBuilder<InMemoryEventStore> {
        ExecutorBuilder::new(InMemoryEventStore::bounded(capacity))
    }
}

impl<E: EventStore> PipelineExecutor<E> {
    /// Crea un builder con el journal proporcionado.
    #[inline]
    pub fn builder_with_store(event_store: E) -> ExecutorBuilder<E> {
        ExecutorBuilder::new(event_store)
    }

    pub fn cache(&self) -> &Arc<StepCache> {
        &self.cache
    }

    pub fn steps(&self) -> &[Box<dyn ProcessingStep>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Copia de los eventos que el journal retiene.
    pub fn events(&self) -> Vec<RelayEvent> {
        self.journal().list()
    }

    fn journal(&self) -> MutexGuard<'_, E> {
        // un panic dentro de un append no deja el journal inconsistente
        self.journal.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Ejecuta `message` a través de todos los steps en orden.
    pub fn dispatch(&self, message: PipelineMessage) -> DispatchResult {
        let mut current = message;
        for step in self.steps.iter() {
            let outcome = step.execute(&self.cache, current);
            let kind = match &outcome {
                StepOutcome::Done(Some(msg)) => RelayEventKind::StepEmitted { topic: msg.topic().to_string() },
                StepOutcome::Done(None) => RelayEventKind::StepEmpty,
                StepOutcome::Error { error, .. } => RelayEventKind::StepFailed { reason: error.to_string() },
            };
            self.journal().append_kind(step.id(), step.name(), kind);

            match outcome {
                StepOutcome::Done(Some(next)) => {
                    if !next.is_valid_outbound() {
                        warn!("step {} emitted an invalid envelope (topic={:?})", step.name(), next.topic());
                        return DispatchResult::Failed { step: step.name().to_string(),
                                                        message: next,
                                                        reason: "emitted envelope has empty topic or absent payload".into() };
                    }
                    debug!("step {} emitted on {}", step.name(), next.topic());
                    current = next;
                }
                StepOutcome::Done(None) => {
                    debug!("step {} produced no output this cycle", step.name());
                    return DispatchResult::Suppressed { step: step.name().to_string() };
                }
                StepOutcome::Error { message, error } => {
                    warn!("step {} failed on {}: {}", step.name(), message.topic(), error);
                    return DispatchResult::Failed { step: step.name().to_string(),
                                                    message,
                                                    reason: error.to_string() };
                }
            }
        }
        info!("publishing on {}", current.topic());
        DispatchResult::Published(current)
    }

    /// Despacha varios mensajes en paralelo. El orden del resultado coincide
    /// con el de la entrada; el orden de ejecución entre mensajes no está
    /// garantizado.
    pub fn dispatch_batch(&self, messages: Vec<PipelineMessage>) -> Vec<DispatchResult> {
        messages.into_par_iter().map(|m| self.dispatch(m)).collect()
    }
}
