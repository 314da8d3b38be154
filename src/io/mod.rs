//! Input/output helpers.
//!
//! - coefficient stores (`store`)
//! - result exports (CSV/JSON) (`export`)
//! - reference spectra for validation (`reference`)

pub mod export;
pub mod reference;
pub mod store;

pub use export::*;
pub use reference::*;
pub use store::*;
