//! Mock system implementation for testing

use super::System;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory implementation of System trait for testing
///
/// `MockSystem` provides an in-memory filesystem for fast, isolated unit
/// tests without side effects.
///
/// # Example
/// ```
/// use gitslice::system::{MockSystem, System};
/// use std::path::Path;
///
/// let system = MockSystem::new()
///     .with_current_dir("/work")
///     .with_file("/work/file.txt", b"hello");
///
/// assert!(system.exists(Path::new("/work/file.txt")));
/// assert!(system.is_dir(Path::new("/work")));
/// ```
#[derive(Clone)]
pub struct MockSystem {
    state: Arc<RwLock<MockSystemState>>,
}

struct MockSystemState {
    current_dir: PathBuf,
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
}

impl MockSystem {
    /// Create a new `MockSystem` with default state
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockSystemState {
                current_dir: PathBuf::from("/"),
                files: HashMap::new(),
                dirs: HashSet::from([PathBuf::from("/")]),
            })),
        }
    }

    /// Set the current working directory (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_current_dir<P: AsRef<Path>>(self, dir: P) -> Self {
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            let dir = dir.as_ref().to_path_buf();
            Self::insert_dir_chain(&mut state.dirs, &dir);
            state.current_dir = dir;
        }
        self
    }

    /// Add a directory and its parents (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_dir<P: AsRef<Path>>(self, path: P) -> Self {
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            Self::insert_dir_chain(&mut state.dirs, path.as_ref());
        }
        self
    }

    /// Add a file with contents, creating parent directories (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &[u8]) -> Self {
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            let path = path.as_ref().to_path_buf();
            if let Some(parent) = path.parent() {
                Self::insert_dir_chain(&mut state.dirs, parent);
            }
            state.files.insert(path, contents.to_vec());
        }
        self
    }

    fn insert_dir_chain(dirs: &mut HashSet<PathBuf>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            dirs.insert(current.clone());
        }
    }
}

impl Default for MockSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for MockSystem {
    fn current_dir(&self) -> io::Result<PathBuf> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        Ok(state.current_dir.clone())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.dirs.contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        Self::insert_dir_chain(&mut state.dirs, path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        if !state.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory does not exist: {}", path.display()),
            ));
        }
        state.dirs.retain(|d| !d.starts_with(path));
        state.files.retain(|f, _| !f.starts_with(path));
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());

        if let Some(contents) = state.files.remove(from) {
            state.files.insert(to.to_path_buf(), contents);
            return Ok(());
        }

        if !state.dirs.contains(from) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Path does not exist: {}", from.display()),
            ));
        }

        // Move the directory and everything below it
        let moved_dirs: Vec<PathBuf> = state
            .dirs
            .iter()
            .filter(|d| d.starts_with(from))
            .cloned()
            .collect();
        for dir in moved_dirs {
            state.dirs.remove(&dir);
            if let Ok(rest) = dir.strip_prefix(from) {
                state.dirs.insert(to.join(rest));
            }
        }

        let moved_files: Vec<PathBuf> = state
            .files
            .keys()
            .filter(|f| f.starts_with(from))
            .cloned()
            .collect();
        for file in moved_files {
            if let Some(contents) = state.files.remove(&file)
                && let Ok(rest) = file.strip_prefix(from)
            {
                state.files.insert(to.join(rest), contents);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;

    #[test]
    fn test_current_dir() {
        let system = MockSystem::new().with_current_dir("/work");

        assert_eq!(system.current_dir().unwrap(), PathBuf::from("/work"));
        assert!(system.is_dir(Path::new("/work")));
    }

    #[test]
    fn test_file_and_dir_queries() {
        let system = MockSystem::new().with_file("/work/a/file.txt", b"x");

        assert!(system.exists(Path::new("/work/a/file.txt")));
        assert!(system.is_file(Path::new("/work/a/file.txt")));
        assert!(system.is_dir(Path::new("/work/a")));
        assert!(!system.is_dir(Path::new("/work/a/file.txt")));
        assert!(!system.exists(Path::new("/work/b")));
    }

    #[test]
    fn test_remove_dir_all() {
        let system = MockSystem::new()
            .with_file("/work/out/a.txt", b"a")
            .with_file("/work/out/sub/b.txt", b"b");

        system.remove_dir_all(Path::new("/work/out")).unwrap();
        assert!(!system.exists(Path::new("/work/out")));
        assert!(!system.exists(Path::new("/work/out/sub/b.txt")));
        assert!(system.exists(Path::new("/work")));
    }

    #[test]
    fn test_rename_directory_moves_children() {
        let system = MockSystem::new()
            .with_file("/stage/sub/a.txt", b"a")
            .with_dir("/stage/sub/nested");

        system
            .rename(Path::new("/stage/sub"), Path::new("/out"))
            .unwrap();

        assert!(!system.exists(Path::new("/stage/sub")));
        assert!(system.is_file(Path::new("/out/a.txt")));
        assert!(system.is_dir(Path::new("/out/nested")));
    }

    #[test]
    fn test_rename_missing_source_fails() {
        let system = MockSystem::new();
        assert!(
            system
                .rename(Path::new("/missing"), Path::new("/out"))
                .is_err()
        );
    }
}
