use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use llmdex_registry::REGISTRY_FILENAME;

const APP_QUALIFIER: &str = "dev";
const APP_ORGANIZATION: &str = "llmdex";
const APP_NAME: &str = "llmdex";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not resolve user data directory")]
    MissingUserDataDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// App-local user data directory (holds the persisted registry copy).
pub fn user_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
        .ok_or(Error::MissingUserDataDir)?;
    Ok(dirs.data_local_dir().to_path_buf())
}

pub fn ensure_user_data_dir() -> Result<PathBuf> {
    let dir = user_data_dir()?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Default location of the persisted registry copy.
pub fn registry_path() -> Result<PathBuf> {
    Ok(registry_path_in(&ensure_user_data_dir()?))
}

/// The registry file inside `dir`.
pub fn registry_path_in(dir: &Path) -> PathBuf {
    dir.join(REGISTRY_FILENAME)
}

/// Resolve the registry path, preferring an explicit override.
///
/// The parent directory of an override is created if missing.
pub fn resolve_registry_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                ensure_dir(parent)?;
            }
            Ok(path.to_path_buf())
        }
        None => registry_path(),
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::resolve_registry_path;

    #[test]
    fn explicit_path_wins_and_parent_is_created() {
        let dir = tempfile::tempdir().expect("tempdir");
        let explicit = dir.path().join("cache/nested/registry.json");

        let resolved = resolve_registry_path(Some(&explicit)).expect("resolve");

        assert_eq!(resolved, explicit);
        assert!(dir.path().join("cache/nested").is_dir());
    }

    #[test]
    fn default_path_uses_registry_file_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = super::registry_path_in(dir.path());

        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some(llmdex_registry::REGISTRY_FILENAME)
        );
    }

    #[test]
    fn bare_file_name_needs_no_directory() {
        let resolved =
            resolve_registry_path(Some(std::path::Path::new("registry.json"))).expect("resolve");
        assert_eq!(resolved, std::path::PathBuf::from("registry.json"));
    }
}
