//! Numerical core: design matrices and model evaluation.

pub mod design;
pub mod evaluate;

pub use design::*;
pub use evaluate::*;
