//! WindowedAverageStep (Transform con estado en cache)
//!
//! - Interpreta cada payload como número decimal y lo acumula en la
//!   `StepCache` bajo `(self.id, "value_list")`.
//! - Cuando la lista llega a `window_size` emite la media en
//!   `"{topic}/average"`, vacía la lista y vuelve a acumular.
//! - Payloads no numéricos se reportan como error y no cuentan para la
//!   ventana.

use log::{debug, warn};
use relay_core::constants::{AVERAGE_TOPIC_SUFFIX, DEFAULT_WINDOW_SIZE, TOPIC_SEPARATOR};
use relay_core::{CacheError, PipelineMessage, ProcessingStep, StepCache, StepError, StepId, StepOutcome};

use crate::numeric::{format_decimal, parse_numeric};

const VALUE_LIST_KEY: &str = "value_list";
const NOT_NUMERIC: &str = "payload is not numeric";

#[derive(Debug, Clone)]
pub struct WindowedAverageStep {
    id: StepId,
    window_size: usize,
}

impl WindowedAverageStep {
    pub fn new() -> Self {
        Self { id: StepId::new(),
               window_size: DEFAULT_WINDOW_SIZE }
    }

    /// Ventana distinta a la por defecto. Debe ser al menos 1.
    pub fn with_window_size(window_size: usize) -> Result<Self, StepError> {
        if window_size == 0 {
            return Err(StepError::InvalidConfiguration("window size must be at least 1".into()));
        }
        Ok(Self { id: StepId::new(),
                  window_size })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Valores acumulados actualmente (0 si la lista aún no existe).
    pub fn buffered(&self, cache: &StepCache) -> Result<usize, CacheError> {
        Ok(cache.get_cloned::<Vec<f64>>(self.id, VALUE_LIST_KEY)?
                .map(|values| values.len())
                .unwrap_or(0))
    }

    /// Añade `value` a la ventana; devuelve la media si la ventana se completó.
    fn accumulate(&self, cache: &StepCache, value: f64) -> Result<Option<f64>, CacheError> {
        let window_size = self.window_size;
        cache.update_or_default::<Vec<f64>, _, _>(self.id, VALUE_LIST_KEY, |values| {
                 values.push(value);
                 debug!("cached list size: {}", values.len());
                 if values.len() < window_size {
                     return None;
                 }
                 let sum: f64 = values.iter().sum();
                 let average = sum / values.len() as f64;
                 values.clear();
                 Some(average)
             })
    }
}

impl Default for WindowedAverageStep {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for WindowedAverageStep {
    fn id(&self) -> StepId {
        self.id
    }

    fn name(&self) -> &str {
        "windowed_average"
    }

    fn execute(&self, cache: &StepCache, message: PipelineMessage) -> StepOutcome {
        let env = match message {
            PipelineMessage::Mqtt(env) => env,
            other => {
                let found = other.shape().to_string();
                return StepOutcome::error(other,
                                          StepError::TypeMismatch { step: self.name().to_string(),
                                                                    found });
            }
        };

        let value = match env.payload().map(parse_numeric) {
            Some(Some(value)) => value,
            Some(None) => return StepOutcome::error(env, StepError::Format(NOT_NUMERIC.into())),
            None => {
                warn!("{}: message on {} has no payload, skipping", self.name(), env.topic());
                return StepOutcome::error(env, StepError::MissingData("payload".into()));
            }
        };

        match self.accumulate(cache, value) {
            Ok(None) => StepOutcome::empty(),
            Ok(Some(average)) => {
                let topic = format!("{}{}{}", env.topic(), TOPIC_SEPARATOR, AVERAGE_TOPIC_SUFFIX);
                StepOutcome::emit(env.with_topic_and_payload(topic, format_decimal(average).into_bytes()))
            }
            Err(e) => StepOutcome::error(env, e.into()),
        }
    }
}
