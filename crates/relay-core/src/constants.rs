//! Constantes del motor de pasos.
//!
//! Valores estáticos compartidos por el core y los adaptadores. Los steps
//! concretos pueden sobreescribir algunos de ellos en construcción, pero los
//! defaults aquí definidos forman parte del contrato observable (nombres de
//! topics emitidos, tamaño de ventana).

/// Tamaño de ventana por defecto del agregador de promedios.
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Prefijo por defecto para los topics remapeados dentro del pipeline.
pub const DEFAULT_REMAP_PREFIX: &str = "pipeline";

/// Sufijo que se añade al topic de origen cuando se publica un agregado.
pub const AVERAGE_TOPIC_SUFFIX: &str = "average";

/// Separador de niveles en los topics del bus.
pub const TOPIC_SEPARATOR: char = '/';

/// Eventos retenidos por el journal en memoria de los executors del relay.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 1024;
