//! Turning resource paths into bytes.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::Instant,
};

use crate::error::{AssetError, Result};

/// Capability the parsers use to follow file references (`mtllib`, `map_Kd`).
pub trait ResourceResolver {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;
}

impl<R: ResourceResolver + ?Sized> ResourceResolver for &R {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        (**self).read_bytes(path)
    }
}

/// Reads from the filesystem. Relative paths are joined onto `root` when set,
/// otherwise they resolve against the working directory.
#[derive(Clone, Debug, Default)]
pub struct FsResolver {
    root: Option<PathBuf>,
}

impl FsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ResourceResolver for FsResolver {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let full = self.resolve(path);
        let start = Instant::now();
        let bytes = std::fs::read(&full).map_err(|source| AssetError::Io {
            path: full.clone(),
            source,
        })?;
        log::info!(
            "Loading file {} took {:.3} ms ({} bytes)",
            full.display(),
            start.elapsed().as_secs_f64() * 1e3,
            bytes.len()
        );
        Ok(bytes)
    }
}

/// In-memory file table keyed by path.
#[derive(Clone, Debug, Default)]
pub struct MemoryResolver {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }
}

impl ResourceResolver for MemoryResolver {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| AssetError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such in-memory file"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_resolver_round_trip() {
        let res = MemoryResolver::new().with_file("a.mtl", "Kd 1 0 0");
        assert_eq!(res.read_bytes(Path::new("a.mtl")).unwrap(), b"Kd 1 0 0");
    }

    #[test]
    fn missing_file_is_io_error() {
        let res = MemoryResolver::new();
        let err = res.read_bytes(Path::new("missing.obj")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
        assert!(err.to_string().contains("missing.obj"));
    }

    #[test]
    fn fs_resolver_joins_relative_paths_onto_root() {
        let res = FsResolver::with_root("assets");
        assert_eq!(res.resolve(Path::new("cube.obj")), Path::new("assets/cube.obj"));
        let abs = std::env::temp_dir().join("cube.obj");
        assert_eq!(res.resolve(&abs), abs);
    }

    #[test]
    fn fs_resolver_reports_missing_files() {
        let res = FsResolver::new();
        let path = std::env::temp_dir().join("meshview-definitely-missing.obj");
        assert!(matches!(res.read_bytes(&path), Err(AssetError::Io { .. })));
    }
}
