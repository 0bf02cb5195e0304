use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::{LedgerError, Result};

use super::KeyValueStore;

const DOCUMENT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed store keeping one JSON document per key.
///
/// Key `budgetTransactions` lives at `<root>/budgetTransactions.json`. Writes
/// are staged to a sibling temp file and renamed into place, so a failed write
/// never truncates the previous document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Opens (and creates if needed) the data directory at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!(root = %root.display(), "opened json file store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the document path for `key`, rejecting keys that could escape the root.
    pub fn document_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-'));
        if !valid {
            return Err(LedgerError::validation(format!(
                "store key `{key}` may only contain ASCII letters, digits, `_` and `-`"
            )));
        }
        Ok(self.root.join(format!("{key}.{DOCUMENT_EXTENSION}")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.document_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        tracing::debug!(key, bytes = data.len(), "read document");
        Ok(Some(data))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.document_path(key)?;
        let tmp = tmp_path(&path);
        write_staged(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(key, bytes = value.len(), "wrote document");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_staged(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert!(store.get("savingsGoal").unwrap().is_none());
    }

    #[test]
    fn set_replaces_document_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.set("savingsGoal", "100").unwrap();
        store.set("savingsGoal", "250").unwrap();

        assert_eq!(store.get("savingsGoal").unwrap().as_deref(), Some("250"));
        assert!(dir.path().join("savingsGoal.json").exists());
        assert!(!dir.path().join("savingsGoal.json.tmp").exists());
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        let err = store.set("../escape", "1").unwrap_err();
        assert!(err.is_validation(), "unexpected error: {err:?}");
    }

    #[test]
    fn failed_write_preserves_previous_document() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.set("theme", "\"light\"").unwrap();

        // A directory at the staging path makes File::create fail.
        fs::create_dir_all(dir.path().join("theme.json.tmp")).unwrap();
        assert!(store.set("theme", "\"dark\"").is_err());
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("\"light\""));
    }
}
