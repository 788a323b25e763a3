//! Registry location configuration.

use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::source::DocumentSource;

/// Default file name of the persisted registry copy.
pub const REGISTRY_FILENAME: &str = "registry.json";

/// Published registry document, used unless a URL is set explicitly.
pub const DEFAULT_REMOTE_URL: &str =
    "https://raw.githubusercontent.com/mwolting/llmdex/main/registry.json";

/// [`DEFAULT_REMOTE_URL`] as a parsed URL.
pub fn default_remote_url() -> Url {
    Url::parse(DEFAULT_REMOTE_URL).expect("DEFAULT_REMOTE_URL is a valid url")
}

/// Where the registry is persisted and where it is fetched from.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub local_path: PathBuf,
    pub remote_url: Url,
}

impl RegistryConfig {
    /// Config for `local_path`, fetching from [`DEFAULT_REMOTE_URL`].
    pub fn new(local_path: impl Into<PathBuf>) -> Self {
        Self {
            local_path: local_path.into(),
            remote_url: default_remote_url(),
        }
    }

    /// Override the remote URL.
    pub fn with_remote_url(mut self, url: Url) -> Self {
        self.remote_url = url;
        self
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    pub fn remote_url(&self) -> &Url {
        &self.remote_url
    }

    pub fn local_source(&self) -> DocumentSource {
        DocumentSource::LocalFile(self.local_path.clone())
    }

    pub fn remote_source(&self) -> DocumentSource {
        DocumentSource::Remote(self.remote_url.clone())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(REGISTRY_FILENAME)
    }
}
