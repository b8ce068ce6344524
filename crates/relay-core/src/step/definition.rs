use std::fmt::Debug;

use super::{StepId, StepOutcome};
use crate::cache::StepCache;
use crate::model::PipelineMessage;

/// Trait que define un step de procesamiento.
///
/// Reglas del contrato:
/// - `execute` es síncrono y no bloquea en IO.
/// - Devuelve exactamente un `StepOutcome` por invocación.
/// - El mensaje se recibe por valor; el step no conserva referencias a él.
///   Todo estado entre llamadas vive en la `StepCache`, bajo `self.id()`.
/// - Una forma de mensaje desconocida o un payload ausente se reportan como
///   `StepOutcome::Error`, nunca con panic.
pub trait ProcessingStep: Send + Sync + Debug {
    /// Identidad estable de esta instancia.
    fn id(&self) -> StepId;

    /// Nombre amigable, usado en logs y errores.
    fn name(&self) -> &str;

    fn execute(&self, cache: &StepCache, message: PipelineMessage) -> StepOutcome;
}
