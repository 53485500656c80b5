//! Input/output helpers.
//!
//! - request JSON decode (`request`)
//! - result JSON export (`export`)

pub mod export;
pub mod request;

pub use export::*;
pub use request::*;
