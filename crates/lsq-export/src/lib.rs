//! Public page discovery and blog export for lsq.
//!
//! This crate walks an outline graph directory, picks the pages flagged
//! `public:: true`, runs them through the [`lsq_page`] pipeline and writes
//! the resulting markdown (plus referenced image assets) into a blog
//! directory.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use lsq_export::{ExportOptions, Exporter};
//!
//! let exporter = Exporter::new(
//!     PathBuf::from("graph"),
//!     PathBuf::from("blog/content"),
//!     ExportOptions::default(),
//! );
//! let summary = exporter.export()?;
//! println!("exported {} pages", summary.exported);
//! # Ok::<(), lsq_export::ExportError>(())
//! ```

mod error;
mod exporter;
mod scanner;

pub use error::ExportError;
pub use exporter::{ExportOptions, ExportSummary, ExportedPage, Exporter};
