use std::{fs::File, path::Path};

use memmap::{Mmap, MmapOptions};

use crate::error::{Result, VolumeError};

/// Raw bytes of one volume response.
///
/// Either owned, or a read-only memory map of a file.
pub enum DataSource {
    Vec(Vec<u8>),
    Mmap(Mmap),
}

impl DataSource {
    pub fn get_slice(&self) -> &[u8] {
        match self {
            DataSource::Vec(v) => v.as_slice(),
            DataSource::Mmap(m) => &m[..],
        }
    }

    pub fn len(&self) -> usize {
        self.get_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_vec(vec: Vec<u8>) -> DataSource {
        DataSource::Vec(vec)
    }

    /// Memory map file at `path`.
    pub fn from_file<P>(path: P) -> Result<DataSource>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(VolumeError::NotFound(path.display().to_string()));
        }

        let file = File::open(path)?;

        // Zero length files cannot be mapped
        if file.metadata()?.len() == 0 {
            return Ok(DataSource::Vec(Vec::new()));
        }

        // Safety: map is read-only, file is expected not to be truncated while mapped
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(DataSource::Mmap(mmap))
    }
}

impl std::fmt::Debug for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            DataSource::Vec(_) => "Vec",
            DataSource::Mmap(_) => "Mmap",
        };
        f.debug_struct("DataSource")
            .field("kind", &kind)
            .field("len", &self.len())
            .finish()
    }
}

impl From<Vec<u8>> for DataSource {
    fn from(vec: Vec<u8>) -> Self {
        DataSource::Vec(vec)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn vec_source() {
        let ds = DataSource::from(vec![1u8, 2, 3]);
        assert_eq!(ds.get_slice(), &[1, 2, 3]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn missing_file() {
        let res = DataSource::from_file("this/file/does/not/exist.vol");
        assert!(matches!(res, Err(VolumeError::NotFound(_))));
    }

    #[test]
    fn mapped_file() {
        let path = std::env::temp_dir().join(format!("raymarch_ds_{}.bin", std::process::id()));
        std::fs::write(&path, [9u8, 8, 7, 6]).unwrap();

        let ds = DataSource::from_file(&path).unwrap();
        assert_eq!(ds.get_slice(), &[9, 8, 7, 6]);

        drop(ds);
        std::fs::remove_file(&path).unwrap();
    }
}
