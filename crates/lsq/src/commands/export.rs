//! `lsq export` command implementation.

use std::path::PathBuf;

use clap::Args;
use lsq_config::{CliSettings, Config};
use lsq_export::{ExportOptions, Exporter};
use lsq_page::parse_unquoted_properties;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Root of the outline graph (contains pages/ and journals/).
    #[arg(short, long, env = "LSQ_GRAPH_DIR")]
    graph_dir: Option<PathBuf>,

    /// Blog directory that public pages are written into.
    #[arg(short, long, env = "LSQ_BLOG_DIR")]
    blog_dir: Option<PathBuf>,

    /// Comma-separated properties written unquoted in frontmatter (e.g. "date,public,slug").
    #[arg(short, long)]
    unquoted_properties: Option<String>,

    /// URL prefix for rewritten relative image links (overrides config).
    #[arg(long)]
    image_prefix: Option<String>,

    /// Directory, relative to the blog directory, that images are copied into.
    #[arg(long)]
    asset_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover lsq.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ExportArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            graph_dir: self.graph_dir.clone(),
            blog_dir: self.blog_dir.clone(),
            unquoted_properties: self
                .unquoted_properties
                .as_deref()
                .map(parse_unquoted_properties),
            image_prefix: self.image_prefix.clone(),
            asset_dir: self.asset_dir.clone(),
        }
    }

    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        let export = &config.export;
        let (graph_dir, blog_dir) = export.require_dirs()?;

        output.info(&format!("Graph: {}", graph_dir.display()));
        output.info(&format!("Blog: {}", blog_dir.display()));

        let options = ExportOptions {
            image_prefix: export.image_prefix.clone(),
            unquoted_properties: export.unquoted_properties.clone(),
            asset_dir: export.asset_output_dir(),
        };
        tracing::debug!(?options, config = ?config.config_path, "Starting export");
        let exporter = Exporter::new(graph_dir.to_path_buf(), blog_dir.to_path_buf(), options);
        let summary = exporter.export()?;

        if summary.assets_missing > 0 {
            output.warning(&format!(
                "{} referenced asset(s) were not found",
                summary.assets_missing
            ));
        }
        output.success(&format!(
            "Exported {} of {} pages ({} assets copied)",
            summary.exported, summary.scanned, summary.assets_copied
        ));
        Ok(())
    }
}
