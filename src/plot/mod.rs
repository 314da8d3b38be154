//! Terminal plots.

pub mod ascii;

pub use ascii::render_spectrum_plot;
