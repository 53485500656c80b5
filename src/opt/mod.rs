//! Optimization model assembly.
//!
//! Responsibilities:
//!
//! - derive the target and weight vectors from a request plus presets
//!   (`targets`)
//! - build the per-food design matrix from the catalog (`design`)
//! - solve the bounded weighted least-squares problem behind a swappable
//!   strategy seam (`solver`)

pub mod design;
pub mod solver;
pub mod targets;

pub use design::*;
pub use solver::*;
pub use targets::*;
