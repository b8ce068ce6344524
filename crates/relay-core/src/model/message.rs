//! Formas de mensaje que circulan por el pipeline.
//!
//! Hoy sólo existe el envelope MQTT. El enum es `#[non_exhaustive]`: los steps
//! definidos fuera de este crate deben conservar un brazo comodín que reporte
//! `StepError::TypeMismatch`, de modo que añadir una forma nueva no rompa
//! silenciosamente a los steps existentes.
use serde::{Deserialize, Serialize};

use super::MessageEnvelope;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PipelineMessage {
    Mqtt(MessageEnvelope),
}

impl PipelineMessage {
    /// Nombre estable de la forma, usado en mensajes de error.
    pub fn shape(&self) -> &'static str {
        match self {
            PipelineMessage::Mqtt(_) => "mqtt",
        }
    }

    pub fn as_mqtt(&self) -> Option<&MessageEnvelope> {
        match self {
            PipelineMessage::Mqtt(env) => Some(env),
        }
    }

    pub fn into_mqtt(self) -> Option<MessageEnvelope> {
        match self {
            PipelineMessage::Mqtt(env) => Some(env),
        }
    }

    pub fn topic(&self) -> &str {
        match self {
            PipelineMessage::Mqtt(env) => env.topic(),
        }
    }

    pub fn is_valid_outbound(&self) -> bool {
        match self {
            PipelineMessage::Mqtt(env) => env.is_valid_outbound(),
        }
    }
}

impl From<MessageEnvelope> for PipelineMessage {
    fn from(env: MessageEnvelope) -> Self {
        PipelineMessage::Mqtt(env)
    }
}
