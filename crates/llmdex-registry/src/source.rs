//! Registry document sources.

use std::path::PathBuf;

use reqwest::Url;

use crate::document::RegistryDocument;
use crate::error::Result;
use crate::loader;

/// Where a registry document comes from. Chosen at construction time.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// A document supplied by the caller, used verbatim.
    InMemory(RegistryDocument),
    /// A persisted copy on disk.
    LocalFile(PathBuf),
    /// A remote copy fetched over HTTP(S).
    Remote(Url),
}

impl DocumentSource {
    /// Resolve the source.
    ///
    /// `Ok(None)` means there is nothing to load (no local copy), which is
    /// distinct from a corrupt or unreachable source.
    pub async fn load(&self) -> Result<Option<RegistryDocument>> {
        match self {
            DocumentSource::InMemory(document) => Ok(Some(document.clone())),
            DocumentSource::LocalFile(path) => loader::load_local(path),
            DocumentSource::Remote(url) => loader::fetch_remote(url).await.map(Some),
        }
    }

    /// Stable label used in logs.
    pub fn kind(&self) -> &str {
        match self {
            DocumentSource::InMemory(_) => "in_memory",
            DocumentSource::LocalFile(_) => "local_file",
            DocumentSource::Remote(_) => "remote",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DocumentSource;
    use crate::config::RegistryConfig;
    use crate::document::{Provider, RegistryDocument};
    use crate::error::Error;

    #[tokio::test]
    async fn in_memory_source_is_used_verbatim() {
        let document = RegistryDocument {
            providers: vec![Provider::new("ollama")],
            ..Default::default()
        };
        let source = DocumentSource::InMemory(document.clone());

        assert_eq!(source.load().await.expect("load"), Some(document));
        assert_eq!(source.kind(), "in_memory");
    }

    #[tokio::test]
    async fn local_source_distinguishes_missing_from_corrupt() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = RegistryConfig::new(dir.path().join("registry.json"));
        let source = config.local_source();

        assert_eq!(source.load().await.expect("load"), None);

        std::fs::write(config.local_path(), "{]").expect("write");
        assert!(matches!(source.load().await, Err(Error::Parse { .. })));
    }

    #[test]
    fn debug_output_names_the_source() {
        let source = RegistryConfig::new("/srv/registry.json").local_source();
        assert_eq!(format!("{source:?}"), r#"LocalFile("/srv/registry.json")"#);
    }
}
