//! Errores específicos del core.
//!
//! Todos los errores de step son locales y no fatales: se reportan como
//! `StepOutcome::Error` y el pipeline sigue vivo. Sólo `RelayError` puede
//! impedir la construcción de un executor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error reportado por un step junto al mensaje que lo provocó.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum StepError {
    /// El step recibió una forma de mensaje que no entiende.
    #[error("wrong pipeline message for {step}: found shape `{found}`")]
    TypeMismatch { step: String, found: String },
    /// Falta el payload (u otro dato obligatorio) en el mensaje de entrada.
    #[error("missing data: {0}")]
    MissingData(String),
    /// El payload no tiene el formato que el step necesita.
    #[error("{0}")]
    Format(String),
    /// Parámetros de construcción inválidos.
    #[error("invalid step configuration: {0}")]
    InvalidConfiguration(String),
    #[error("step cache: {0}")]
    Cache(#[from] CacheError),
}

/// Errores de acceso al `StepCache`.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CacheError {
    /// La entrada existe pero guarda un valor de otro tipo.
    #[error("cache entry `{key}` does not hold a `{expected}`")]
    TypeMismatch { key: String, expected: String },
}

/// Errores del executor de referencia.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum RelayError {
    #[error("pipeline has no steps")]
    EmptyPipeline,
    #[error("internal: {0}")]
    Internal(String),
}
