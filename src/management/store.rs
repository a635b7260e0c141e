//! Persistence backends for the [`Credential`].
//!
//! [`TokenManager`](super::TokenManager) talks to an [`AuthorizationStore`]
//! only; which backend is used is decided once at construction.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::{
    config,
    error::{Result, SdkError},
    types::Credential,
};

const KEY_ACCESS_TOKEN: &str = "access_token";
const KEY_REFRESH_TOKEN: &str = "refresh_token";
const KEY_CATALOG: &str = "catalog";
const KEYS: [&str; 3] = [KEY_ACCESS_TOKEN, KEY_REFRESH_TOKEN, KEY_CATALOG];

/// Where the authorization survives between calls (or processes).
///
/// `load` on an empty store yields the all-`None` credential.
#[async_trait]
pub trait AuthorizationStore: Send + Sync {
    async fn load(&self) -> Result<Credential>;
    async fn save(&self, credential: &Credential) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// Keeps nothing: the credential lives only inside the `TokenManager`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransientStore;

#[async_trait]
impl AuthorizationStore for TransientStore {
    async fn load(&self) -> Result<Credential> {
        Ok(Credential::default())
    }

    async fn save(&self, _credential: &Credential) -> Result<()> {
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }
}

/// Key/value store living in process memory.
///
/// Clones share the same map, so a clone kept by the caller can inspect what
/// the SDK persisted.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: Arc<DashMap<&'static str, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| v.value().clone())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn set(&self, key: &'static str, value: &Option<String>) {
        match value {
            Some(value) => {
                self.values.insert(key, value.clone());
            }
            None => {
                self.values.remove(key);
            }
        }
    }
}

#[async_trait]
impl AuthorizationStore for MemoryStore {
    async fn load(&self) -> Result<Credential> {
        Ok(Credential {
            access_token: self.get(KEY_ACCESS_TOKEN),
            refresh_token: self.get(KEY_REFRESH_TOKEN),
            catalog: self.get(KEY_CATALOG),
        })
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        self.set(KEY_ACCESS_TOKEN, &credential.access_token);
        self.set(KEY_REFRESH_TOKEN, &credential.refresh_token);
        self.set(KEY_CATALOG, &credential.catalog);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        for key in KEYS {
            self.values.remove(key);
        }
        Ok(())
    }
}

/// Stores the credential as a JSON document.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `rhapcli/auth.json` in the local data directory.
    pub fn default_location() -> Self {
        Self::new(config::data_dir().join("auth.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AuthorizationStore for FileStore {
    async fn load(&self) -> Result<Credential> {
        if !self.path.is_file() {
            debug!("No stored authorization at {}", self.path.display());
            return Ok(Credential::default());
        }

        let content = async_fs::read_to_string(&self.path)
            .await
            .map_err(|e| store_error("read", &self.path, e))?;
        serde_json::from_str(&content).map_err(|e| store_error("parse", &self.path, e))
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        let json = serde_json::to_string_pretty(credential)
            .map_err(|e| store_error("serialize", &self.path, e))?;
        write_private(&self.path, json).await
    }

    async fn clear(&self) -> Result<()> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_error("remove", &self.path, e)),
        }
    }
}

/// Stores the credential as `key=value` lines in a shared preferences file.
///
/// Lines belonging to other keys are preserved on save and clear.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `rhapcli/preferences` in the user configuration directory.
    pub fn default_location() -> Self {
        Self::new(config::preferences_dir().join("preferences"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_lines(&self) -> Result<Vec<(String, String)>> {
        if !self.path.is_file() {
            return Ok(Vec::new());
        }

        let content = async_fs::read_to_string(&self.path)
            .await
            .map_err(|e| store_error("read", &self.path, e))?;

        Ok(content
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect())
    }

    async fn write_lines(&self, lines: &[(String, String)]) -> Result<()> {
        let content: String = lines
            .iter()
            .map(|(k, v)| format!("{k}={v}\n"))
            .collect();
        write_private(&self.path, content).await
    }
}

#[async_trait]
impl AuthorizationStore for PreferencesStore {
    async fn load(&self) -> Result<Credential> {
        let lines = self.read_lines().await?;
        let lookup = |key: &str| {
            lines
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .filter(|v| !v.is_empty())
        };

        Ok(Credential {
            access_token: lookup(KEY_ACCESS_TOKEN),
            refresh_token: lookup(KEY_REFRESH_TOKEN),
            catalog: lookup(KEY_CATALOG),
        })
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        let mut lines: Vec<_> = self
            .read_lines()
            .await?
            .into_iter()
            .filter(|(k, _)| !KEYS.contains(&k.as_str()))
            .collect();

        let values = [
            (KEY_ACCESS_TOKEN, &credential.access_token),
            (KEY_REFRESH_TOKEN, &credential.refresh_token),
            (KEY_CATALOG, &credential.catalog),
        ];
        for (key, value) in values {
            if let Some(value) = value {
                lines.push((key.to_string(), value.clone()));
            }
        }

        self.write_lines(&lines).await
    }

    async fn clear(&self) -> Result<()> {
        if !self.path.is_file() {
            return Ok(());
        }

        let lines: Vec<_> = self
            .read_lines()
            .await?
            .into_iter()
            .filter(|(k, _)| !KEYS.contains(&k.as_str()))
            .collect();
        self.write_lines(&lines).await
    }
}

/// Writes `content` to `path`, creating parent directories. On unix the
/// file is created with mode 0600, and an existing file is narrowed to it.
async fn write_private(path: &Path, content: String) -> Result<()> {
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| store_error("create directory for", path, e))?;
    }

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options
        .open(path)
        .await
        .map_err(|e| store_error("open", path, e))?;
    file.write_all(content.as_bytes())
        .await
        .map_err(|e| store_error("write", path, e))?;
    file.flush()
        .await
        .map_err(|e| store_error("write", path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        async_fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .await
            .map_err(|e| store_error("restrict", path, e))?;
    }

    Ok(())
}

fn store_error(action: &str, path: &Path, err: impl std::fmt::Display) -> SdkError {
    SdkError::Store(format!("cannot {action} {}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Credential {
        Credential {
            access_token: Some("access".into()),
            refresh_token: Some("refresh".into()),
            catalog: Some("US".into()),
        }
    }

    async fn assert_round_trip(store: &dyn AuthorizationStore) {
        assert_eq!(store.load().await.unwrap(), Credential::default());

        store.save(&sample()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), sample());

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), Credential::default());

        // clearing twice is fine
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn transient_store_never_remembers() {
        let store = TransientStore;
        store.save(&sample()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Credential::default());
    }

    #[tokio::test]
    async fn memory_store_round_trip() {
        assert_round_trip(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn memory_store_clones_share_values() {
        let store = MemoryStore::new();
        let observer = store.clone();
        store.save(&sample()).await.unwrap();
        assert_eq!(observer.get("catalog").as_deref(), Some("US"));
    }

    #[tokio::test]
    async fn memory_store_drops_absent_fields() {
        let store = MemoryStore::new();
        store.save(&sample()).await.unwrap();
        store
            .save(&Credential {
                catalog: None,
                ..sample()
            })
            .await
            .unwrap();
        assert_eq!(store.get("catalog"), None);
    }

    #[tokio::test]
    async fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested/auth.json"));
        assert_round_trip(&store).await;
    }

    #[tokio::test]
    async fn file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, SdkError::Store(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("auth.json"));
        store.save(&sample()).await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn existing_readable_files_are_narrowed() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences");
        std::fs::write(&path, "theme=dark\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = PreferencesStore::new(&path);
        store.save(&sample()).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().await.unwrap(), sample());
    }

    #[tokio::test]
    async fn preferences_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::new(dir.path().join("preferences"));
        assert_round_trip(&store).await;
    }

    #[tokio::test]
    async fn preferences_store_keeps_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences");
        std::fs::write(&path, "theme=dark\naccess_token=old\n").unwrap();

        let store = PreferencesStore::new(&path);
        assert_eq!(store.load().await.unwrap().access_token.as_deref(), Some("old"));

        store.save(&sample()).await.unwrap();
        store.clear().await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "theme=dark\n");
    }
}
