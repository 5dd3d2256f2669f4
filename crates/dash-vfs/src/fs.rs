use std::fs;
use std::io;
use std::time::UNIX_EPOCH;

use dash_core::ModStamp;

use crate::path::VfsPath;

/// File system abstraction for Dash.
///
/// The trait is intentionally small so it can be implemented for different
/// backends (local disk, in-memory trees, a host IDE's virtual file system).
pub trait FileSystem: Send + Sync {
    /// Reads the file contents as UTF-8 text.
    fn read_to_string(&self, path: &VfsPath) -> io::Result<String>;

    /// Returns whether a path exists.
    fn exists(&self, path: &VfsPath) -> bool;

    /// Returns whether a path exists and is a directory.
    fn is_directory(&self, path: &VfsPath) -> bool;

    /// Returns the modification stamp for a file, or `None` when the path is
    /// absent or has no meaningful stamp (e.g. directories).
    fn mod_stamp(&self, path: &VfsPath) -> Option<ModStamp>;

    /// Lists directory entries.
    fn read_dir(&self, path: &VfsPath) -> io::Result<Vec<VfsPath>>;

    /// Re-syncs any cached state for `path` with the backing store.
    ///
    /// Backends without a stale-cache problem keep the default no-op.
    fn refresh(&self, _path: &VfsPath) {}
}

/// Local OS file system implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read_to_string(&self, path: &VfsPath) -> io::Result<String> {
        fs::read_to_string(path.as_std_path())
    }

    fn exists(&self, path: &VfsPath) -> bool {
        path.as_std_path().exists()
    }

    fn is_directory(&self, path: &VfsPath) -> bool {
        path.as_std_path().is_dir()
    }

    fn mod_stamp(&self, path: &VfsPath) -> Option<ModStamp> {
        let metadata = fs::metadata(path.as_std_path()).ok()?;
        if metadata.is_dir() {
            return None;
        }
        let mtime = metadata.modified().ok()?;
        let millis = mtime.duration_since(UNIX_EPOCH).ok()?.as_millis();
        Some(ModStamp::new(millis as u64))
    }

    fn read_dir(&self, path: &VfsPath) -> io::Result<Vec<VfsPath>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(path.as_std_path())? {
            let entry = entry?;
            out.push(VfsPath::from_std_path(&entry.path()));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_fs_reads_real_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pubspec.yaml"), "name: demo\n").unwrap();

        let fs = LocalFs::new();
        let root = VfsPath::from_std_path(dir.path());
        let pubspec = root.join("pubspec.yaml");

        assert!(fs.exists(&pubspec));
        assert!(!fs.is_directory(&pubspec));
        assert!(fs.is_directory(&root));
        assert_eq!(fs.read_to_string(&pubspec).unwrap(), "name: demo\n");
        assert!(fs.mod_stamp(&pubspec).is_some());
        assert_eq!(fs.mod_stamp(&root), None);

        let entries = fs.read_dir(&root).unwrap();
        assert_eq!(entries, vec![pubspec]);
    }

    #[test]
    fn local_fs_missing_paths_are_absent() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFs::new();
        let missing = VfsPath::from_std_path(dir.path()).join("nope");

        assert!(!fs.exists(&missing));
        assert!(!fs.is_directory(&missing));
        assert_eq!(fs.mod_stamp(&missing), None);
        assert!(fs.read_to_string(&missing).is_err());
    }
}
