pub mod error;
pub mod model;
pub mod loader;
pub mod gapfilling;
pub mod surface;

pub mod config;
pub mod statistics;
pub mod stream;
pub mod export;
pub mod pipeline;

pub use error::{ReconstructionError, Result};
