use crate::errors::StepError;
use crate::model::PipelineMessage;

/// Resultado de ejecutar un step.
///
/// - `Done(Some(msg))`: transformación correcta, `msg` sigue por el pipeline.
/// - `Done(None)`: transformación correcta sin salida en este ciclo
///   (p. ej. el agregador todavía está acumulando).
/// - `Error`: la transformación falló; lleva el mensaje culpable y el motivo.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum StepOutcome {
    Done(Option<PipelineMessage>),
    Error { message: PipelineMessage, error: StepError },
}

/// Discriminante sin datos de `StepOutcome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Emitted,
    Empty,
    Failed,
}

impl StepOutcome {
    pub fn emit(message: impl Into<PipelineMessage>) -> Self {
        StepOutcome::Done(Some(message.into()))
    }

    pub fn empty() -> Self {
        StepOutcome::Done(None)
    }

    pub fn error(message: impl Into<PipelineMessage>, error: StepError) -> Self {
        StepOutcome::Error { message: message.into(),
                             error }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            StepOutcome::Done(Some(_)) => OutcomeKind::Emitted,
            StepOutcome::Done(None) => OutcomeKind::Empty,
            StepOutcome::Error { .. } => OutcomeKind::Failed,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, StepOutcome::Done(None))
    }

    /// Mensaje emitido, si lo hay.
    pub fn emitted(&self) -> Option<&PipelineMessage> {
        match self {
            StepOutcome::Done(Some(msg)) => Some(msg),
            _ => None,
        }
    }

    /// Motivo legible del error, si lo hay.
    pub fn reason(&self) -> Option<String> {
        match self {
            StepOutcome::Error { error, .. } => Some(error.to_string()),
            _ => None,
        }
    }
}
