use std::collections::VecDeque;

use chrono::Utc;

use super::{RelayEvent, RelayEventKind};
use crate::step::StepId;

/// Almacenamiento de eventos append-only.
pub trait EventStore: Send {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, step_id: StepId, step_name: &str, kind: RelayEventKind) -> RelayEvent;
    /// Lista los eventos retenidos (orden ascendente por seq).
    fn list(&self) -> Vec<RelayEvent>;
    /// Lista los eventos de un step.
    fn list_for(&self, step_id: StepId) -> Vec<RelayEvent> {
        self.list().into_iter().filter(|e| e.step_id == step_id).collect()
    }
}

/// Journal en memoria. Sin capacidad retiene todo; con capacidad `n` sólo
/// los `n` eventos más recientes (`seq` sigue creciendo aunque se descarten
/// los antiguos).
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    inner: VecDeque<RelayEvent>,
    next_seq: u64,
    capacity: Option<usize>,
}

impl InMemoryEventStore {
    /// Journal que retiene como máximo `capacity` eventos.
    pub fn bounded(capacity: usize) -> Self {
        Self { inner: VecDeque::with_capacity(capacity.min(1024)),
               next_seq: 0,
               capacity: Some(capacity) }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, step_id: StepId, step_name: &str, kind: RelayEventKind) -> RelayEvent {
        let ev = RelayEvent { seq: self.next_seq,
                              step_id,
                              step_name: step_name.to_string(),
                              kind,
                              ts: Utc::now() };
        self.next_seq += 1;
        match self.capacity {
            Some(0) => return ev,
            Some(cap) => {
                while self.inner.len() >= cap {
                    self.inner.pop_front();
                }
            }
            None => {}
        }
        self.inner.push_back(ev.clone());
        ev
    }

    fn list(&self) -> Vec<RelayEvent> {
        self.inner.iter().cloned().collect()
    }
}
