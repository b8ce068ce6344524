pub mod core_error;

pub use core_error::CoreError;
