//! relay-core: motor de steps del relay de telemetría (envelope, cache,
//! protocolo de finalización y executor de referencia).
pub mod cache;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod model;
pub mod step;

pub use cache::StepCache;
pub use engine::{DispatchResult, PipelineExecutor};
pub use errors::{CacheError, RelayError, StepError};
pub use event::{EventStore, InMemoryEventStore, RelayEvent, RelayEventKind};
pub use model::{MessageEnvelope, PipelineMessage, TopicDescriptor, TopicKind, TopicTemplate};
pub use step::{OutcomeKind, ProcessingStep, StepId, StepListener, StepOutcome};
