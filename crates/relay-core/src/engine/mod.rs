//! Executor de referencia para pipelines lineales de steps.
//!
//! El orden y la política de encadenamiento pertenecen al executor externo;
//! éste es el mínimo que usa el binario del relay: steps en orden, la salida
//! de uno es la entrada del siguiente, y el primer `Done(None)` o `Error`
//! corta la cadena para ese mensaje.

pub mod builder;
pub mod core;

pub use builder::ExecutorBuilder;
pub use self::core::{DispatchResult, PipelineExecutor};
