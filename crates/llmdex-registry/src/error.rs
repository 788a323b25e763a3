use std::path::PathBuf;

/// Errors produced while loading or querying the registry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No provider with the given id exists in the loaded document.
    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    /// The same provider id appears more than once in a parsed document.
    #[error("duplicate provider id in registry document: {0}")]
    DuplicateProvider(String),

    /// The content was not a well-formed registry document.
    #[error("failed to parse registry document from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Transport failure while talking to the remote source.
    #[error("failed to fetch registry document: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote source answered with a non-success status.
    #[error("registry fetch from {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Reading or writing the persisted copy failed.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            origin: origin.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
