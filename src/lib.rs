//! Core library for the typedframes column-access static analyzer.
//!
//! The binary (`main.rs`) and the Python extension module (`pyffi`,
//! feature `python`) are both thin front-ends over [`pipeline`].

pub mod config;
pub mod diagnostics;
pub mod index;
pub mod interpreter;
pub mod lattice;
pub mod pipeline;
pub mod recognizers;
pub mod schema;
pub mod source;
pub mod suppress;

#[cfg(feature = "python")]
pub mod pyffi;

#[cfg(feature = "docgen")]
pub mod docgen;
