//! Persisting the node tree (never the generated text) to a key/value store.

use crate::{ProgramNode, ResourceLimits, RootNode, TesseraError, TesseraResult};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Opaque blob storage keyed by string. Each call is atomic: a reader never
/// observes a partially written blob.
pub trait BlobStore {
    fn get(&self, key: &str) -> TesseraResult<Option<String>>;
    fn set(&mut self, key: &str, blob: &str) -> TesseraResult<()>;
    /// Removing an absent key is not an error
    fn remove(&mut self, key: &str) -> TesseraResult<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> TesseraResult<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, blob: &str) -> TesseraResult<()> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> TesseraResult<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

/// One file per key inside a directory. Writes go to a temporary file that
/// is renamed over the target.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> TesseraResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(TesseraError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> TesseraResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, blob: &str) -> TesseraResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> TesseraResult<()> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Where the current tree is stored
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: "tessera.program".to_string(),
        }
    }
}

/// Result of reading the stored tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Restored(RootNode),
    NotFound,
}

/// Serialize a tree into an opaque blob
pub fn save(tree: &RootNode) -> TesseraResult<String> {
    Ok(serde_json::to_string(&ProgramNode::Root(tree.clone()))?)
}

/// Deserialize a blob produced by [`save`]
pub fn load(blob: &str, limits: &ResourceLimits) -> TesseraResult<RootNode> {
    if blob.len() > limits.max_blob_bytes {
        return Err(TesseraError::limit_exceeded(
            "max_blob_bytes",
            limits.max_blob_bytes,
            blob.len(),
            "The stored program is too large; clear it and rebuild",
        ));
    }
    serde_json::from_str::<ProgramNode>(blob)?.into_root()
}

/// A store bound to its well-known key
#[derive(Debug, Clone)]
pub struct Persistence<S: BlobStore> {
    store: S,
    config: StoreConfig,
    limits: ResourceLimits,
}

impl<S: BlobStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, StoreConfig::default(), ResourceLimits::default())
    }

    pub fn with_config(store: S, config: StoreConfig, limits: ResourceLimits) -> Self {
        Self {
            store,
            config,
            limits,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn key(&self) -> &str {
        &self.config.key
    }

    /// Store the tree. A blob that [`load`] would refuse is never written.
    pub fn save(&mut self, tree: &RootNode) -> TesseraResult<()> {
        let blob = save(tree)?;
        if blob.len() > self.limits.max_blob_bytes {
            return Err(TesseraError::limit_exceeded(
                "max_blob_bytes",
                self.limits.max_blob_bytes,
                blob.len(),
                "Remove blocks or shorten text values before saving",
            ));
        }
        debug!(key = %self.config.key, bytes = blob.len(), "saving tree");
        self.store.set(&self.config.key, &blob)
    }

    pub fn load(&self) -> TesseraResult<LoadOutcome> {
        match self.store.get(&self.config.key)? {
            Some(blob) => {
                debug!(key = %self.config.key, bytes = blob.len(), "loading tree");
                Ok(LoadOutcome::Restored(load(&blob, &self.limits)?))
            }
            None => {
                debug!(key = %self.config.key, "no stored tree");
                Ok(LoadOutcome::NotFound)
            }
        }
    }

    pub fn clear(&mut self) -> TesseraResult<()> {
        debug!(key = %self.config.key, "clearing stored tree");
        self.store.remove(&self.config.key)
    }
}
