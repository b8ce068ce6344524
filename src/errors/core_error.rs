use relay_core::{RelayError, StepError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error del pipeline: {0}")]
    Relay(#[from] RelayError),
    #[error("Error de step: {0}")]
    Step(#[from] StepError),
    #[error("Error de serialización: {0}")]
    Json(#[from] serde_json::Error),
}
