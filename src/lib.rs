//! twin-relay
//!
//! Este crate arma el relay de telemetría sobre `relay-core` y
//! `relay-adapters`:
//! - `config`: configuración desde entorno / `.env`.
//! - `errors`: errores de aplicación.
//! - `relay`: resolución de canales y despacho a los pipelines.

pub mod config;
pub mod errors;
pub mod relay;

pub use config::RelayConfig;
pub use errors::CoreError;
pub use relay::{PublishedMessage, Relay};
