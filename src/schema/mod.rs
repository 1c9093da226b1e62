//! Schema module - Configuration, identity and export types for linear pipelines.

mod config;
mod export;
mod key;

pub use config::*;
pub use export::*;
pub use key::*;
