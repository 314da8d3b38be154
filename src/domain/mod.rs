//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - model/proxy configuration enums (`ModelKind`, `ProxyIndex`, `SpectrumKind`)
//! - the validated proxy input (`ProxyInput`)
//! - coefficient tables as delivered by a store (`CoefficientTable`)
//! - labeled evaluation outputs (`SpectrumResult`, `Spectra`)

pub mod proxy;
pub mod spectrum;
pub mod table;
pub mod types;

pub use proxy::*;
pub use spectrum::*;
pub use table::*;
pub use types::*;
