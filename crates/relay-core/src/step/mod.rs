//! Definiciones relacionadas a Steps.
//!
//! Un step es la unidad de transformación del pipeline: recibe un
//! `PipelineMessage`, puede leer/escribir su porción de la `StepCache` y
//! devuelve exactamente un `StepOutcome`. Este módulo define:
//! - `ProcessingStep`: contrato usado por el executor.
//! - `StepId`: identidad por instancia (namespace en la cache).
//! - `StepOutcome`: protocolo de finalización de tres resultados.
//! - `StepListener`: adaptador estilo callback sobre `StepOutcome`.

pub mod definition;
mod id;
pub mod listener;
mod outcome;

pub use definition::ProcessingStep;
pub use id::StepId;
pub use listener::StepListener;
pub use outcome::{OutcomeKind, StepOutcome};
