use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::{LedgerError, Result},
};

use super::{StateKey, StorageBackend};

const TMP_SUFFIX: &str = "tmp";

/// Stores each state blob as its own file inside a data directory.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(PathResolver::data_dir);
        ensure_dir(&root).map_err(|err| persistence_error("create data directory", &root, err))?;
        Ok(Self { root })
    }

    pub fn path_for(&self, key: StateKey) -> PathBuf {
        let file_name = match key {
            StateKey::BusinessName => format!("{}.txt", key.as_str()),
            _ => format!("{}.json", key.as_str()),
        };
        self.root.join(file_name)
    }
}

impl StorageBackend for JsonStorage {
    fn read(&self, key: StateKey) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(key = %key, path = %path.display(), "no persisted state");
                Ok(None)
            }
            Err(err) => Err(persistence_error("read", &path, err)),
        }
    }

    fn write(&self, key: StateKey, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value).map_err(|err| persistence_error("write", &tmp, err))?;
        fs::rename(&tmp, &path).map_err(|err| persistence_error("replace", &path, err))?;
        debug!(key = %key, bytes = value.len(), "state persisted");
        Ok(())
    }
}

fn persistence_error(action: &str, path: &Path, err: impl std::fmt::Display) -> LedgerError {
    LedgerError::Persistence(format!("failed to {action} `{}`: {err}", path.display()))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
