//! # llmdex-registry
//!
//! Loader and read-only accessor for the llmdex registry: a JSON document
//! describing LLM providers, their models, websites, and auth configuration.
//!
//! This crate lets you:
//!
//! - **Resolve a document** from an in-memory value, a persisted local copy,
//!   or a remote URL ([`DocumentSource`]).
//! - **Query it** through a [`Registry`] handle: list providers, a
//!   provider's models, website, or auth configuration.
//! - **Sync** the persisted copy from the remote source ([`sync_local`]).
//!
//! # Quick start
//!
//! ```ignore
//! use llmdex_registry::{Registry, RegistryConfig};
//!
//! let config = RegistryConfig::new("registry.json")
//!     .with_remote_url("https://example.com/registry.json".parse()?);
//!
//! // Use the local copy if there is one...
//! let registry = Registry::new(config.clone());
//!
//! // ...or fetch a fresh one.
//! let registry = Registry::fetch(config).await?;
//!
//! let models = registry.provider_models("openai")?;
//! let website = registry.provider_website("openai")?;
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod loader;
pub mod registry;
pub mod source;
pub mod sync;

pub use config::{DEFAULT_REMOTE_URL, REGISTRY_FILENAME, RegistryConfig, default_remote_url};
pub use document::{ApiConfig, Model, Provider, RegistryDocument};
pub use error::{Error, Result};
pub use loader::{fetch_remote, load_local};
pub use registry::Registry;
pub use reqwest::Url;
pub use source::DocumentSource;
pub use sync::{SyncReport, persist, sync_local};
