use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{AroundClientError, AroundClientResult};
use crate::ports::TokenStore;

/// Нормализует сырое значение токена: пробелы по краям отбрасываются,
/// пустая строка означает отсутствие токена.
pub fn parse_token(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[derive(Debug, Clone, Default)]
/// Хранилище токена в памяти. Клоны разделяют одно значение.
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    /// Пустое хранилище.
    pub fn new() -> Self {
        Self::default()
    }

    /// Хранилище с заранее сохранённым токеном.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    fn slot(&self) -> AroundClientResult<std::sync::MutexGuard<'_, Option<String>>> {
        self.token
            .lock()
            .map_err(|_| AroundClientError::Storage("token mutex poisoned".to_string()))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> AroundClientResult<Option<String>> {
        Ok(self.slot()?.as_deref().and_then(parse_token))
    }

    fn save(&self, token: &str) -> AroundClientResult<()> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> AroundClientResult<()> {
        *self.slot()? = None;
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Хранилище токена в файле (используется CLI).
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Хранилище поверх файла `path`. Файл создаётся при первом `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Путь к файлу токена.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, err: io::Error) -> AroundClientError {
        AroundClientError::Storage(format!(
            "failed to {action} {}: {err}",
            self.path.display()
        ))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> AroundClientResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(parse_token(&raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.storage_error("read", err)),
        }
    }

    fn save(&self, token: &str) -> AroundClientResult<()> {
        fs::write(&self.path, token).map_err(|err| self.storage_error("write", err))
    }

    fn clear(&self) -> AroundClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.storage_error("remove", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn parse_token_trims_and_returns_value() {
        let token = parse_token("  abc.def.ghi  ");
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_token_rejects_blank() {
        assert!(parse_token("   ").is_none());
    }

    #[test]
    fn memory_store_clones_share_token() {
        let store = MemoryTokenStore::new();
        let observer = store.clone();

        store.save("jwt-1").expect("save must succeed");
        assert_eq!(observer.load().expect("load").as_deref(), Some("jwt-1"));

        store.clear().expect("clear must succeed");
        assert!(observer.load().expect("load").is_none());
    }

    #[test]
    fn file_store_round_trip_and_missing_file() {
        let dir = TempDir::new().expect("temp dir must be created");
        let store = FileTokenStore::new(dir.path().join(".around_token"));
        assert!(store.load().expect("missing file is not an error").is_none());

        store.save("jwt-file").expect("save must succeed");
        assert_eq!(store.load().expect("load").as_deref(), Some("jwt-file"));

        store.clear().expect("clear must succeed");
        assert!(store.load().expect("load").is_none());
        store.clear().expect("clearing twice is fine");
    }
}
