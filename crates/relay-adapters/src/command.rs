//! Estructura de comando inyectado fuera de banda.
//!
//! Se usa como forma de payload: el relay envuelve el texto original del
//! comando junto a un tipo y una marca de tiempo (ms desde epoch) y lo
//! serializa a JSON antes de reenviarlo.
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Tipo por defecto de los comandos envueltos por el relay.
pub const DEFAULT_COMMAND_TYPE: &str = "demo_command_data_structure";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: i64,
    pub original_message: String,
}

impl CommandEnvelope {
    /// Reconstrucción explícita (p. ej. al deserializar).
    pub fn new(kind: impl Into<String>, timestamp: i64, original_message: impl Into<String>) -> Self {
        Self { kind: kind.into(),
               timestamp,
               original_message: original_message.into() }
    }

    /// Decodifica el payload como texto (UTF-8 con reemplazo) y sella la hora actual.
    pub fn from_payload(payload: &[u8]) -> Self {
        Self::from_message(String::from_utf8_lossy(payload))
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new(DEFAULT_COMMAND_TYPE, Utc::now().timestamp_millis(), message)
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
