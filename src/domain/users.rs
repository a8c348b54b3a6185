use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::Error;

/// Maps GitHub logins to the names people use in chat.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    names: HashMap<String, String>,
}

impl UserDirectory {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    /// Load the mapping from a JSON object file. A missing file is an empty mapping.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            warn!(path = %path.display(), "users file not found; logins will be used as-is");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| Error::UsersRead {
            path: path.to_path_buf(),
            source,
        })?;
        let names = serde_json::from_str(&raw).map_err(|source| Error::UsersParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { names })
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("prnotify").join("users.json"))
    }

    pub fn resolve<'a>(&'a self, login: &'a str) -> &'a str {
        self.names.get(login).map(String::as_str).unwrap_or(login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_login_passes_through() {
        let users = UserDirectory::new(HashMap::from([("alice".into(), "alice.s".into())]));
        assert_eq!(users.resolve("bob"), "bob");
        assert_eq!(users.resolve("alice"), "alice.s");
    }

    #[test]
    fn missing_file_is_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let users = UserDirectory::load(&dir.path().join("users.json")).unwrap();
        assert_eq!(users.resolve("carol"), "carol");
    }

    #[test]
    fn loads_mapping_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, r#"{"octo-dave": "dave"}"#).unwrap();
        let users = UserDirectory::load(&path).unwrap();
        assert_eq!(users.resolve("octo-dave"), "dave");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            UserDirectory::load(&path),
            Err(Error::UsersParse { .. })
        ));
    }
}
