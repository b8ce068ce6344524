//! TopicRemapStep (Transform sin estado)
//!
//! Reescribe el topic como `"{prefix}/{topic}"`. Descriptor, payload y flag
//! `retained` pasan sin cambios. Nunca devuelve `Done(None)`.

use log::warn;
use relay_core::constants::{DEFAULT_REMAP_PREFIX, TOPIC_SEPARATOR};
use relay_core::{PipelineMessage, ProcessingStep, StepCache, StepError, StepId, StepOutcome};

#[derive(Debug, Clone)]
pub struct TopicRemapStep {
    id: StepId,
    prefix: String,
}

impl TopicRemapStep {
    pub fn new() -> Self {
        Self { id: StepId::new(),
               prefix: DEFAULT_REMAP_PREFIX.to_string() }
    }

    /// Prefijo distinto a `pipeline`. No puede ser vacío.
    pub fn with_prefix(prefix: impl Into<String>) -> Result<Self, StepError> {
        let prefix = prefix.into();
        let trimmed = prefix.trim_end_matches(TOPIC_SEPARATOR);
        if trimmed.is_empty() {
            return Err(StepError::InvalidConfiguration("remap prefix must not be empty".into()));
        }
        Ok(Self { id: StepId::new(),
                  prefix: trimmed.to_string() })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for TopicRemapStep {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for TopicRemapStep {
    fn id(&self) -> StepId {
        self.id
    }

    fn name(&self) -> &str {
        "topic_remap"
    }

    fn execute(&self, _cache: &StepCache, message: PipelineMessage) -> StepOutcome {
        let env = match message {
            PipelineMessage::Mqtt(env) => env,
            other => {
                let found = other.shape().to_string();
                return StepOutcome::error(other,
                                          StepError::TypeMismatch { step: self.name().to_string(),
                                                                    found });
            }
        };

        if env.payload().is_none() {
            warn!("{}: message on {} has no payload, skipping", self.name(), env.topic());
            return StepOutcome::error(env, StepError::MissingData("payload".into()));
        }

        let topic = format!("{}{}{}", self.prefix, TOPIC_SEPARATOR, env.topic());
        StepOutcome::emit(env.with_topic(topic))
    }
}
