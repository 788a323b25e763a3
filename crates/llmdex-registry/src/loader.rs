//! Resolution of registry documents from disk and over HTTP.

use std::io::ErrorKind;
use std::path::Path;

use reqwest::Url;
use tracing::debug;

use crate::document::RegistryDocument;
use crate::error::{Error, Result};

/// Read the persisted document at `path`.
///
/// A missing file is `Ok(None)`, not an error. Malformed content is always
/// surfaced as [`Error::Parse`].
pub fn load_local(path: &Path) -> Result<Option<RegistryDocument>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no local registry document");
            return Ok(None);
        }
        Err(err) => return Err(Error::io(path, err)),
    };

    let document = RegistryDocument::from_slice(&bytes, &path.display().to_string())?;
    debug!(
        path = %path.display(),
        providers = document.providers.len(),
        "loaded local registry document"
    );
    Ok(Some(document))
}

/// Fetch the document at `url` with a single GET. No retries.
pub async fn fetch_remote(url: &Url) -> Result<RegistryDocument> {
    debug!(%url, "fetching registry document");

    let response = reqwest::get(url.clone()).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    let document = RegistryDocument::from_slice(&body, url.as_str())?;
    debug!(
        %url,
        providers = document.providers.len(),
        "fetched registry document"
    );
    Ok(document)
}
