//! Cache compartida entre invocaciones de steps.
//!
//! Una única instancia por pipeline, compartida por todos los steps. Cada step
//! direcciona sus entradas con su propio `StepId`, de modo que no colisiona
//! con las claves de otros steps.

mod store;

pub use store::{CacheKey, StepCache};
