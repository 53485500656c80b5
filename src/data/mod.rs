//! Static data providers: the food catalog and the optimization presets.
//!
//! Both ship with built-in tables and can be overridden from JSON files.
//! They are read-only for the process lifetime and are always passed into
//! the pipeline explicitly, so tests can substitute synthetic data.

pub mod catalog;
pub mod presets;

pub use catalog::*;
pub use presets::*;
