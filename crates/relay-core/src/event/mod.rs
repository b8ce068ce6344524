//! Journal de resultados de steps y trait EventStore.

mod store;
mod types;

pub use store::{EventStore, InMemoryEventStore};
pub use types::{RelayEvent, RelayEventKind};
