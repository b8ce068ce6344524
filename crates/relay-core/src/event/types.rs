//! Tipos de evento del journal y estructura `RelayEvent`.
//!
//! Rol en el relay:
//! - El executor registra un evento por cada invocación de step.
//! - Un evento por invocación permite verificar que cada step reportó
//!   exactamente un resultado.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::step::{OutcomeKind, StepId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayEventKind {
    /// El step emitió un mensaje hacia el siguiente stage.
    StepEmitted { topic: String },
    /// El step terminó sin salida (acumulando).
    StepEmpty,
    /// El step reportó error; el mensaje se descarta.
    StepFailed { reason: String },
}

impl RelayEventKind {
    pub fn outcome_kind(&self) -> OutcomeKind {
        match self {
            RelayEventKind::StepEmitted { .. } => OutcomeKind::Emitted,
            RelayEventKind::StepEmpty => OutcomeKind::Empty,
            RelayEventKind::StepFailed { .. } => OutcomeKind::Failed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayEvent {
    pub seq: u64, // asignado por el store (orden append)
    pub step_id: StepId,
    pub step_name: String,
    pub kind: RelayEventKind,
    pub ts: DateTime<Utc>,
}
