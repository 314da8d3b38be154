//! `euv-spam` library crate.
//!
//! Empirical models of the solar EUV spectrum driven by a single proxy index
//! (F10.7 or Lyman-alpha). The binary (`euvspam`) is a thin wrapper around this
//! library so that:
//!
//! - models are testable without spawning processes
//! - models are reusable from other crates with injected coefficient tables

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
