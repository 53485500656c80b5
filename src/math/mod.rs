//! Mathematical utilities: bounded least squares and vector similarity.

pub mod bvls;
pub mod similarity;

pub use bvls::*;
pub use similarity::*;
