use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use parking_lot::RwLock;

use super::DataSource;
use crate::error::{Result, VolumeError};

/// Where volume bytes come from, addressed by identifier.
///
/// Implementations are called from the loader thread.
pub trait VolumeSource: Send + Sync {
    /// Raw wire-format bytes of volume `id`
    fn fetch(&self, id: &str) -> Result<DataSource>;
}

/// Reject identifiers that could escape the source root
fn check_identifier(id: &str) -> Result<()> {
    if id.is_empty() || id.contains('/') || id.contains('\\') || id.contains("..") {
        return Err(VolumeError::InvalidIdentifier(id.to_string()));
    }
    Ok(())
}

/// Volumes stored as `<root>/<id>.<extension>` files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    extension: String,
}

impl DirectorySource {
    pub const DEFAULT_EXTENSION: &'static str = "vol";

    pub fn new<P>(root: P) -> DirectorySource
    where
        P: AsRef<Path>,
    {
        DirectorySource {
            root: root.as_ref().to_path_buf(),
            extension: Self::DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: &str) -> DirectorySource {
        self.extension = extension.to_string();
        self
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, id: &str) -> Result<PathBuf> {
        check_identifier(id)?;
        Ok(self.root.join(format!("{id}.{}", self.extension)))
    }
}

impl VolumeSource for DirectorySource {
    fn fetch(&self, id: &str) -> Result<DataSource> {
        let path = self.path_of(id)?;
        log::debug!("Fetching {id} from {}", path.display());
        match DataSource::from_file(&path) {
            Err(VolumeError::NotFound(_)) => Err(VolumeError::NotFound(id.to_string())),
            res => res,
        }
    }
}

/// Volumes held in memory, useful for embedding hosts and tests.
#[derive(Debug, Default)]
pub struct MemorySource {
    volumes: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemorySource {
    pub fn new() -> MemorySource {
        Self::default()
    }

    pub fn insert(&self, id: &str, bytes: Vec<u8>) {
        self.volumes.write().insert(id.to_string(), bytes);
    }

    pub fn remove(&self, id: &str) -> Option<Vec<u8>> {
        self.volumes.write().remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.volumes.read().contains_key(id)
    }
}

impl VolumeSource for MemorySource {
    fn fetch(&self, id: &str) -> Result<DataSource> {
        check_identifier(id)?;
        let volumes = self.volumes.read();
        let bytes = volumes
            .get(id)
            .ok_or_else(|| VolumeError::NotFound(id.to_string()))?;
        Ok(DataSource::from_vec(bytes.clone()))
    }
}
