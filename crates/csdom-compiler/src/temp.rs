//! Caller-owned registry of temporary files created during compilation.

use std::fs;
use std::path::{Path, PathBuf};

/// A collection of on-disk temp files with an opt-in preserve flag.
///
/// The batch compiler materializes sources through the collection owned
/// by the request and deletes them when the call finishes. Setting
/// `keep_files` before the call preserves everything; individual entries
/// (such as the output assembly) can also be registered as kept.
/// Dropping the collection performs a final best-effort [`delete`](Self::delete).
#[derive(Debug, Default)]
pub struct TempFileCollection {
    dir: Option<PathBuf>,
    base: Option<String>,
    keep_files: bool,
    entries: Vec<Entry>,
}

#[derive(Debug)]
struct Entry {
    path: PathBuf,
    keep: bool,
}

impl TempFileCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place temp files under `dir` instead of the system temp directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            base: None,
            keep_files: false,
            entries: Vec::new(),
        }
    }

    pub fn keep_files(&self) -> bool {
        self.keep_files
    }

    /// When set, [`delete`](Self::delete) leaves every file in place.
    pub fn set_keep_files(&mut self, keep: bool) {
        self.keep_files = keep;
    }

    /// The shared base path new names derive from. The random base name is
    /// chosen once, on first use.
    pub fn base_path(&mut self) -> PathBuf {
        let base = self
            .base
            .get_or_insert_with(|| format!("csdom{:08x}", rand::random::<u32>()));
        match &self.dir {
            Some(dir) => dir.join(base.as_str()),
            None => std::env::temp_dir().join(base.as_str()),
        }
    }

    /// Allocate `<base>.<extension>` and register it.
    ///
    /// `keep` marks the entry as surviving [`delete`](Self::delete)
    /// independently of the collection-wide flag. The file itself is not
    /// created.
    pub fn add_extension(&mut self, extension: &str, keep: bool) -> PathBuf {
        let mut name = self.base_path().into_os_string();
        name.push(".");
        name.push(extension);
        let path = PathBuf::from(name);
        self.entries.push(Entry {
            path: path.clone(),
            keep,
        });
        path
    }

    /// Register a file whose name was chosen elsewhere.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, keep: bool) {
        self.entries.push(Entry {
            path: path.into(),
            keep,
        });
    }

    /// Remove every non-kept file from disk, best effort.
    ///
    /// Does nothing when `keep_files` is set. Individual removal failures
    /// are discarded; deletion never reports an error.
    pub fn delete(&mut self) {
        if self.keep_files {
            return;
        }
        self.entries.retain(|entry| {
            if entry.keep {
                return true;
            }
            let _ = fs::remove_file(&entry.path);
            false
        });
    }

    /// Registered paths, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> + '_ {
        self.entries.iter().map(|entry| entry.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for TempFileCollection {
    fn drop(&mut self) {
        self.delete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_add_extension() {
        let dir = TempDir::new().unwrap();
        let mut temp = TempFileCollection::with_dir(dir.path());
        let first = temp.add_extension("0.cs", false);
        let second = temp.add_extension("1.cs", false);
        let base = temp.base_path();

        assert!(first.to_string_lossy().starts_with(&*base.to_string_lossy()));
        assert!(first.to_string_lossy().ends_with(".0.cs"));
        assert!(second.to_string_lossy().ends_with(".1.cs"));
        assert_eq!(temp.len(), 2);
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();
        let mut temp = TempFileCollection::with_dir(dir.path());
        let path = temp.add_extension("0.cs", false);
        fs::write(&path, "class C {}").unwrap();

        temp.delete();
        assert!(!path.exists());
        assert!(temp.is_empty());
    }

    #[test]
    fn test_delete_spares_kept() {
        let dir = TempDir::new().unwrap();
        let mut temp = TempFileCollection::with_dir(dir.path());
        let kept = temp.add_extension("dll", true);
        let discarded = temp.add_extension("0.cs", false);
        fs::write(&kept, "artifact").unwrap();
        fs::write(&discarded, "source").unwrap();

        temp.delete();
        assert!(kept.exists());
        assert!(!discarded.exists());
        assert_eq!(temp.len(), 1);
    }

    #[test]
    fn test_keep_files() {
        let dir = TempDir::new().unwrap();
        let mut temp = TempFileCollection::with_dir(dir.path());
        temp.set_keep_files(true);
        let path = temp.add_extension("0.cs", false);
        fs::write(&path, "class C {}").unwrap();

        temp.delete();
        assert!(path.exists());
        assert_eq!(temp.len(), 1);
    }

    #[test]
    fn test_delete_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut temp = TempFileCollection::with_dir(dir.path());
        temp.add_extension("0.cs", false);

        temp.delete();
        assert!(temp.is_empty());
    }

    #[test]
    fn test_add_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chosen.cs");
        fs::write(&path, "class C {}").unwrap();

        let mut temp = TempFileCollection::new();
        temp.add_file(&path, false);
        assert_eq!(temp.iter().collect::<Vec<_>>(), vec![path.as_path()]);

        temp.delete();
        assert!(!path.exists());
    }
}
