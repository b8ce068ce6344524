//! Adaptador callback sobre `StepOutcome`.
//!
//! Algunos executors prefieren recibir el resultado vía callbacks
//! (`on_step_done` / `on_step_error`). `StepOutcome::notify` consume el
//! resultado, así que el listener se invoca exactamente una vez. Si no hay
//! listener el resultado se registra en el log y se descarta.
use log::{debug, error};

use super::{ProcessingStep, StepOutcome};
use crate::model::PipelineMessage;

pub trait StepListener {
    fn on_step_done(&mut self, step: &dyn ProcessingStep, message: Option<PipelineMessage>);
    fn on_step_error(&mut self, step: &dyn ProcessingStep, message: PipelineMessage, reason: String);
}

impl StepOutcome {
    /// Entrega el resultado a `listener`, o lo registra si no hay listener.
    pub fn notify(self, step: &dyn ProcessingStep, listener: Option<&mut dyn StepListener>) {
        match (self, listener) {
            (StepOutcome::Done(message), Some(l)) => l.on_step_done(step, message),
            (StepOutcome::Error { message, error }, Some(l)) => l.on_step_error(step, message, error.to_string()),
            (StepOutcome::Done(message), None) => {
                debug!("step {} finished without listener (emitted={}); outcome dropped",
                       step.name(),
                       message.is_some());
            }
            (StepOutcome::Error { message, error }, None) => {
                error!("step {} failed without listener on topic {}: {}", step.name(), message.topic(), error);
            }
        }
    }
}
