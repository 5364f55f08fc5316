//! Blog export of public pages.
//!
//! For every public page in the graph:
//! 1. Parse and run it through [`transform_page`]
//! 2. Render frontmatter and body
//! 3. Write the result under the blog directory (temp file + rename)
//! 4. Copy referenced relative assets, if an asset directory is set

use std::collections::HashSet;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use lsq_page::{Page, render_page, transform_page};
use tempfile::Builder;

use crate::ExportError;
use crate::scanner::Scanner;

/// Export settings independent of the graph and blog locations.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// URL prefix that relative image links are rewritten to.
    pub image_prefix: String,
    /// Attribute names written unquoted in frontmatter.
    pub unquoted_properties: Vec<String>,
    /// Directory that referenced assets are copied into. `None` disables copying.
    pub asset_dir: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            image_prefix: "/images".to_owned(),
            unquoted_properties: Vec::new(),
            asset_dir: None,
        }
    }
}

/// Counters for a finished export.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Markdown files found in the graph.
    pub scanned: usize,
    /// Public pages written to the blog.
    pub exported: usize,
    /// Pages skipped because they are not public.
    pub skipped: usize,
    /// Asset files copied.
    pub assets_copied: usize,
    /// Asset references whose file did not exist.
    pub assets_missing: usize,
}

/// Result of exporting a single page.
#[derive(Debug)]
pub struct ExportedPage {
    /// Source page file.
    pub source: PathBuf,
    /// Written blog file.
    pub destination: PathBuf,
    /// Relative asset URLs as they appeared in the page.
    pub assets: Vec<String>,
}

/// Exports public outline pages as blog markdown.
///
/// Pages are processed one at a time, in path order. The first I/O failure
/// aborts the export.
pub struct Exporter {
    graph_dir: PathBuf,
    blog_dir: PathBuf,
    options: ExportOptions,
}

impl Exporter {
    #[must_use]
    pub fn new(graph_dir: PathBuf, blog_dir: PathBuf, options: ExportOptions) -> Self {
        Self {
            graph_dir,
            blog_dir,
            options,
        }
    }

    /// Export every public page in the graph.
    pub fn export(&self) -> Result<ExportSummary, ExportError> {
        let files = Scanner::new(self.graph_dir.clone()).scan()?;
        let mut summary = ExportSummary {
            scanned: files.len(),
            ..ExportSummary::default()
        };
        tracing::debug!(count = files.len(), graph = %self.graph_dir.display(), "Scanned graph");

        for file in &files {
            let Some(exported) = self.export_file(file)? else {
                summary.skipped += 1;
                continue;
            };
            summary.exported += 1;

            if let Some(asset_dir) = &self.options.asset_dir {
                let (copied, missing) = copy_assets(file, &exported.assets, asset_dir)?;
                summary.assets_copied += copied;
                summary.assets_missing += missing;
            }
        }

        Ok(summary)
    }

    /// Export a single page file.
    ///
    /// Returns `None` when the page is not public.
    pub fn export_file(&self, path: &Path) -> Result<Option<ExportedPage>, ExportError> {
        let bytes = fs::read(path).map_err(|source| ExportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);

        let source_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let page = Page::parse(source_name, &content);
        if !page.is_public() {
            tracing::debug!(path = %path.display(), "Skipping non-public page");
            return Ok(None);
        }

        tracing::info!(path = %path.display(), "Exporting page");
        let page = transform_page(page, &self.options.image_prefix);
        let rendered =
            render_page(&page, &self.options.unquoted_properties).map_err(|source| {
                ExportError::Render {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

        let filename = page
            .filename()
            .unwrap_or_else(|| Path::new(page.source_name()));
        let destination = self.blog_dir.join(filename);
        write_atomic(&destination, &rendered)?;

        Ok(Some(ExportedPage {
            source: path.to_path_buf(),
            destination,
            assets: page.assets().to_vec(),
        }))
    }
}

/// Write `content` to `dest` so the file only appears once complete.
///
/// The file gets the same mode as a newly created file (`0o666` reduced by
/// the umask) instead of the temp file's owner-only mode.
fn write_atomic(dest: &Path, content: &str) -> Result<(), ExportError> {
    let dir = dest.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_error = |source| ExportError::Write {
        path: dest.to_path_buf(),
        source,
    };
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(write_error)?;
    tmp.write_all(content.as_bytes()).map_err(write_error)?;
    tmp.persist(dest).map_err(|e| write_error(e.error))?;
    Ok(())
}

/// Copy a page's relative assets into `asset_dir`.
///
/// Asset URLs are resolved against the page's directory. Missing files are
/// logged and counted, not treated as errors. Returns `(copied, missing)`.
fn copy_assets(
    page_path: &Path,
    assets: &[String],
    asset_dir: &Path,
) -> Result<(usize, usize), ExportError> {
    let page_dir = page_path.parent().unwrap_or(Path::new("."));
    let mut seen = HashSet::new();
    let mut copied = 0;
    let mut missing = 0;

    for asset in assets {
        if !seen.insert(asset.as_str()) {
            continue;
        }

        let from = page_dir.join(asset);
        if !from.is_file() {
            tracing::warn!(page = %page_path.display(), asset = %asset, "Asset not found");
            missing += 1;
            continue;
        }

        let name = asset.rsplit('/').next().unwrap_or(asset);
        let to = asset_dir.join(name);
        fs::create_dir_all(asset_dir).map_err(|source| ExportError::CreateDir {
            path: asset_dir.to_path_buf(),
            source,
        })?;
        fs::copy(&from, &to).map_err(|source| ExportError::CopyAsset {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;
        tracing::debug!(from = %from.display(), to = %to.display(), "Copied asset");
        copied += 1;
    }

    Ok((copied, missing))
}
