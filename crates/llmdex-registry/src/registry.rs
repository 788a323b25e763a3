//! The registry handle: owns the current document and answers lookups.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::RegistryConfig;
use crate::document::{Model, Provider, RegistryDocument};
use crate::error::{Error, Result};
use crate::loader;
use crate::source::DocumentSource;
use crate::sync::{self, SyncReport};

/// Read-only view over a registry document.
///
/// The document is held as an immutable snapshot. Reloading builds a new
/// document first and swaps it in whole, so lookups never see a partially
/// updated registry and a failed reload keeps the previous snapshot.
///
/// A registry may be *documentless* when nothing could be loaded. In that
/// state [`list_providers`](Self::list_providers) is empty and every
/// id-keyed lookup fails with [`Error::ProviderNotFound`].
///
/// # Example
///
/// ```ignore
/// use llmdex_registry::{Registry, RegistryConfig};
///
/// let registry = Registry::new(RegistryConfig::new("registry.json"));
/// for provider in registry.list_providers() {
///     println!("{}", provider.id);
/// }
/// let models = registry.provider_models("openai")?;
/// ```
pub struct Registry {
    config: RegistryConfig,
    document: RwLock<Option<Arc<RegistryDocument>>>,
}

impl Registry {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Construct from the local copy.
    ///
    /// Never fails: a missing local copy, and also a corrupt or unreadable
    /// one, yields a documentless registry with a warning. Use
    /// [`open`](Self::open) to surface load errors instead.
    pub fn new(config: RegistryConfig) -> Self {
        let document = match loader::load_local(config.local_path()) {
            Ok(document) => document,
            Err(err) => {
                warn!(
                    path = %config.local_path().display(),
                    error = %err,
                    "ignoring unusable local registry document"
                );
                None
            }
        };
        Self::from_resolved(config, document)
    }

    /// Construct from the local copy, failing on a corrupt or unreadable
    /// file. A missing file still yields a documentless registry.
    pub fn open(config: RegistryConfig) -> Result<Self> {
        let document = loader::load_local(config.local_path())?;
        Ok(Self::from_resolved(config, document))
    }

    /// Construct around an explicitly supplied document, used verbatim.
    pub fn with_document(config: RegistryConfig, document: RegistryDocument) -> Self {
        Self::from_resolved(config, Some(document))
    }

    /// Construct from the remote source in `config`, which is
    /// [`DEFAULT_REMOTE_URL`](crate::config::DEFAULT_REMOTE_URL) unless
    /// overridden.
    ///
    /// Fails when the request fails or the body is not a valid document.
    /// The local copy is neither read nor written.
    pub async fn fetch(config: RegistryConfig) -> Result<Self> {
        let source = config.remote_source();
        Self::from_source(config, &source).await
    }

    /// Construct from an arbitrary source.
    pub async fn from_source(config: RegistryConfig, source: &DocumentSource) -> Result<Self> {
        let document = source.load().await?;
        Ok(Self::from_resolved(config, document))
    }

    fn from_resolved(config: RegistryConfig, document: Option<RegistryDocument>) -> Self {
        if document.is_none() {
            warn!(
                path = %config.local_path().display(),
                "registry is uninitialized: no document could be resolved"
            );
        }
        Self {
            config,
            document: RwLock::new(document.map(Arc::new)),
        }
    }

    // -----------------------------------------------------------------------
    // Snapshot management
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The current document, if any.
    pub fn snapshot(&self) -> Option<Arc<RegistryDocument>> {
        self.document.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.document.read().is_some()
    }

    /// Replace the current document wholesale.
    pub fn replace(&self, document: RegistryDocument) {
        info!(providers = document.providers.len(), "registry document replaced");
        *self.document.write() = Some(Arc::new(document));
    }

    /// Re-read the local copy.
    ///
    /// Returns `false` and keeps the current document when the file is
    /// missing. Errors also leave the current document in place.
    pub fn reload_local(&self) -> Result<bool> {
        match loader::load_local(self.config.local_path())? {
            Some(document) => {
                self.replace(document);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Fetch the configured remote document and swap it in.
    pub async fn refresh(&self) -> Result<()> {
        let url = self.config.remote_url();
        let document = loader::fetch_remote(url).await?;
        self.replace(document);
        Ok(())
    }

    /// Fetch the configured remote document, persist it to the local path,
    /// and swap it in.
    pub async fn sync(&self) -> Result<SyncReport> {
        let url = self.config.remote_url();
        let document = loader::fetch_remote(url).await?;
        let report = sync::persist(&document, self.config.local_path())?;
        self.replace(document);
        Ok(report)
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// All providers in document order. Empty when documentless.
    pub fn list_providers(&self) -> Vec<Provider> {
        match self.snapshot() {
            Some(document) => document.providers.clone(),
            None => Vec::new(),
        }
    }

    /// The provider entry with the given id.
    pub fn provider(&self, provider_id: &str) -> Result<Provider> {
        self.with_provider(provider_id, Provider::clone)
    }

    /// Models of a provider; empty when the provider declares none.
    pub fn provider_models(&self, provider_id: &str) -> Result<Vec<Model>> {
        self.with_provider(provider_id, |p| p.models().to_vec())
    }

    /// Website of a provider, if it has one.
    pub fn provider_website(&self, provider_id: &str) -> Result<Option<String>> {
        self.with_provider(provider_id, |p| p.website().map(str::to_owned))
    }

    /// The opaque `api_config.auth` object of a provider, if it has one.
    pub fn provider_auth(&self, provider_id: &str) -> Result<Option<Value>> {
        self.with_provider(provider_id, |p| p.auth().cloned())
    }

    fn with_provider<T>(&self, provider_id: &str, f: impl FnOnce(&Provider) -> T) -> Result<T> {
        let guard = self.document.read();
        guard
            .as_deref()
            .and_then(|document| document.provider(provider_id))
            .map(f)
            .ok_or_else(|| Error::ProviderNotFound(provider_id.to_string()))
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let providers = self.document.read().as_ref().map(|d| d.providers.len());
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("providers", &providers)
            .finish()
    }
}
