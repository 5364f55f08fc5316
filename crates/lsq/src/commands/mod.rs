//! CLI command implementations.

pub(crate) mod export;

pub(crate) use export::ExportArgs;
