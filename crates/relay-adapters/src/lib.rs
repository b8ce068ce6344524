//! relay-adapters: steps concretos del relay de telemetría.
//!
//! Este crate provee:
//! - `WindowedAverageStep`: acumula payloads numéricos en la `StepCache` y
//!   emite su media cada `window_size` mensajes.
//! - `TopicRemapStep`: reescribe el topic con un prefijo fijo y deja pasar el
//!   payload tal cual.
//! - `CommandEnvelope`: forma de payload para comandos inyectados fuera de
//!   banda (no es un step).
//!
//! Nota: el core sólo conoce `PipelineMessage` y `StepCache`; la
//! interpretación del payload (texto decimal UTF-8) vive aquí.

pub mod command;
pub mod numeric;
pub mod steps;

pub use command::CommandEnvelope;
pub use steps::{TopicRemapStep, WindowedAverageStep};
