//! Core library for the libreg-tools command line application.
//!
//! Two independent pieces live here: an ASCII normaliser for text and CSV
//! files under [`libreg::tools::normalize`], and a mirror of the public
//! library register spreadsheet under [`libreg::tools::sync`]. Network, page
//! parsing, hash bookkeeping and spreadsheet adapters live under
//! [`libreg::tools::io`] so the orchestration can be exercised without a
//! real server.

pub mod libreg;

pub use libreg::tools::{Result, ToolError, error, io, model, normalize, sync};
