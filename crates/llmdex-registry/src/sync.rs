//! Refreshing the persisted registry copy from the remote source.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use reqwest::Url;
use tracing::info;

use crate::document::RegistryDocument;
use crate::error::{Error, Result};
use crate::loader;

/// Outcome of writing a registry document to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub path: PathBuf,
    pub providers: usize,
    pub models: usize,
    /// Whether an existing file was overwritten.
    pub replaced: bool,
}

/// Fetch the remote document and atomically replace the copy at `path`.
///
/// The body must parse as a registry document before anything is written.
/// On any failure the existing file is left untouched.
pub async fn sync_local(url: &Url, path: &Path) -> Result<SyncReport> {
    let document = loader::fetch_remote(url).await?;
    persist(&document, path)
}

/// Write `document` to `path` via a temporary file and a rename.
///
/// Permissions of an existing destination are carried over to the new file.
pub fn persist(document: &RegistryDocument, path: &Path) -> Result<SyncReport> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let json = document.to_json_pretty()?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(json.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| Error::io(tmp.path(), e))?;

    let replaced = match std::fs::metadata(path) {
        Ok(meta) => {
            std::fs::set_permissions(tmp.path(), meta.permissions())
                .map_err(|e| Error::io(tmp.path(), e))?;
            true
        }
        Err(err) if err.kind() == ErrorKind::NotFound => false,
        Err(err) => return Err(Error::io(path, err)),
    };

    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;

    let report = SyncReport {
        path: path.to_path_buf(),
        providers: document.providers.len(),
        models: document.model_count(),
        replaced,
    };
    info!(
        path = %report.path.display(),
        providers = report.providers,
        models = report.models,
        replaced = report.replaced,
        "registry document written"
    );
    Ok(report)
}
