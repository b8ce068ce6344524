//! Envelope de mensaje del pipeline.
//!
//! Un `MessageEnvelope` es el valor que fluye entre steps: topic, descriptor
//! del canal de origen, payload binario y flag `retained`. Es un tipo valor;
//! los steps nunca lo mutan, sino que construyen uno nuevo con
//! `with_topic` / `with_payload`.
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::TopicDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    topic: String,
    descriptor: Arc<TopicDescriptor>,
    payload: Option<Vec<u8>>, // None = ausente; Some(vec![]) = vacío pero presente
    retained: bool,
}

impl MessageEnvelope {
    pub fn new(topic: impl Into<String>, descriptor: Arc<TopicDescriptor>, payload: Option<Vec<u8>>, retained: bool) -> Self {
        Self { topic: topic.into(),
               descriptor,
               payload,
               retained }
    }

    /// Copia el envelope sustituyendo el topic.
    pub fn with_topic(&self, topic: impl Into<String>) -> Self {
        Self { topic: topic.into(),
               ..self.clone() }
    }

    /// Copia el envelope sustituyendo el payload.
    pub fn with_payload(&self, payload: Vec<u8>) -> Self {
        Self { payload: Some(payload),
               ..self.clone() }
    }

    /// Copia el envelope sustituyendo topic y payload a la vez.
    pub fn with_topic_and_payload(&self, topic: impl Into<String>, payload: Vec<u8>) -> Self {
        Self { topic: topic.into(),
               descriptor: Arc::clone(&self.descriptor),
               payload: Some(payload),
               retained: self.retained }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn descriptor(&self) -> &Arc<TopicDescriptor> {
        &self.descriptor
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    pub fn is_retained(&self) -> bool {
        self.retained
    }

    /// Invariante de salida: topic no vacío y payload presente.
    pub fn is_valid_outbound(&self) -> bool {
        !self.topic.is_empty() && self.payload.is_some()
    }
}
