//! Page discovery by filesystem walking.
//!
//! The scanner only finds candidate page files. Reading them and deciding
//! whether they are public happens in the exporter.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ExportError;

/// Discovers markdown page files under a graph directory.
pub(crate) struct Scanner {
    graph_dir: PathBuf,
}

impl Scanner {
    pub fn new(graph_dir: PathBuf) -> Self {
        Self { graph_dir }
    }

    /// Walk the graph and return every `.md` file, sorted by path.
    ///
    /// Hidden files and directories (leading `.`) are skipped.
    pub fn scan(&self) -> Result<Vec<PathBuf>, ExportError> {
        if !self.graph_dir.is_dir() {
            return Err(ExportError::GraphNotFound(self.graph_dir.clone()));
        }
        let mut files = Vec::new();
        scan_directory(&self.graph_dir, &mut files)?;
        files.sort();
        Ok(files)
    }
}

fn scan_directory(dir_path: &Path, files: &mut Vec<PathBuf>) -> Result<(), ExportError> {
    let read_error = |source| ExportError::Read {
        path: dir_path.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir_path).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let is_dir = entry.file_type().map_err(read_error)?.is_dir();
        if is_dir {
            scan_directory(&path, files)?;
        } else if path.extension().is_some_and(|e| e == "md") {
            files.push(path);
        }
    }
    Ok(())
}
