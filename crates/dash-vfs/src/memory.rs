use std::collections::BTreeMap;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use dash_core::ModStamp;

use crate::fs::FileSystem;
use crate::path::VfsPath;

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File { text: String, stamp: ModStamp },
}

/// In-memory [`FileSystem`] for tests.
///
/// Entries added through [`MemoryFs::stage_file`] model a stale host cache:
/// they stay invisible until [`FileSystem::refresh`] runs on the entry itself
/// or an ancestor directory, mirroring hosts whose directory listings lag the
/// backing store.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: Mutex<BTreeMap<VfsPath, Node>>,
    staged: Mutex<BTreeMap<VfsPath, Node>>,
    next_stamp: AtomicU64,
    refreshes: AtomicU64,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory (and any missing ancestors).
    pub fn add_dir(&self, path: &str) -> VfsPath {
        let path = VfsPath::new(path);
        let mut nodes = self.lock_nodes();
        insert_with_ancestors(&mut nodes, path.clone(), Node::Dir);
        path
    }

    /// Adds a file with a freshly allocated stamp.
    pub fn add_file(&self, path: &str, text: &str) -> VfsPath {
        let stamp = ModStamp::new(self.next_stamp.fetch_add(1, Ordering::Relaxed) + 1);
        self.add_file_with_stamp(path, text, stamp)
    }

    /// Adds or replaces a file with an explicit stamp.
    ///
    /// Tests use this to change contents without moving the stamp (stale
    /// cache) or to move the stamp without changing contents.
    pub fn add_file_with_stamp(&self, path: &str, text: &str, stamp: ModStamp) -> VfsPath {
        let path = VfsPath::new(path);
        let mut nodes = self.lock_nodes();
        insert_with_ancestors(
            &mut nodes,
            path.clone(),
            Node::File {
                text: text.to_owned(),
                stamp,
            },
        );
        path
    }

    /// Stages a file that only becomes visible after a `refresh` of the file
    /// or one of its ancestors.
    pub fn stage_file(&self, path: &str, text: &str) -> VfsPath {
        let stamp = ModStamp::new(self.next_stamp.fetch_add(1, Ordering::Relaxed) + 1);
        let path = VfsPath::new(path);
        lock(&self.staged).insert(
            path.clone(),
            Node::File {
                text: text.to_owned(),
                stamp,
            },
        );
        path
    }

    /// Removes a path and everything below it.
    pub fn remove(&self, path: &VfsPath) {
        self.lock_nodes()
            .retain(|existing, _| !existing.starts_with(path));
    }

    /// Number of `refresh` calls observed, for assertions.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::Relaxed)
    }

    fn lock_nodes(&self) -> std::sync::MutexGuard<'_, BTreeMap<VfsPath, Node>> {
        lock(&self.nodes)
    }
}

fn lock(mutex: &Mutex<BTreeMap<VfsPath, Node>>) -> std::sync::MutexGuard<'_, BTreeMap<VfsPath, Node>> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::error!(
                target: "dash.vfs",
                "mutex poisoned; continuing with recovered guard"
            );
            poisoned.into_inner()
        }
    }
}

fn insert_with_ancestors(nodes: &mut BTreeMap<VfsPath, Node>, path: VfsPath, node: Node) {
    let mut ancestor = path.parent();
    while let Some(dir) = ancestor {
        if dir.is_root() {
            break;
        }
        ancestor = dir.parent();
        nodes.entry(dir).or_insert(Node::Dir);
    }
    nodes.insert(path, node);
}

impl FileSystem for MemoryFs {
    fn read_to_string(&self, path: &VfsPath) -> io::Result<String> {
        match self.lock_nodes().get(path) {
            Some(Node::File { text, .. }) => Ok(text.clone()),
            Some(Node::Dir) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file: {path}"),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {path}"),
            )),
        }
    }

    fn exists(&self, path: &VfsPath) -> bool {
        path.is_root() || self.lock_nodes().contains_key(path)
    }

    fn is_directory(&self, path: &VfsPath) -> bool {
        path.is_root() || matches!(self.lock_nodes().get(path), Some(Node::Dir))
    }

    fn mod_stamp(&self, path: &VfsPath) -> Option<ModStamp> {
        match self.lock_nodes().get(path) {
            Some(Node::File { stamp, .. }) => Some(*stamp),
            _ => None,
        }
    }

    fn read_dir(&self, path: &VfsPath) -> io::Result<Vec<VfsPath>> {
        if !self.is_directory(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {path}"),
            ));
        }
        Ok(self
            .lock_nodes()
            .keys()
            .filter(|entry| entry.parent().as_ref() == Some(path))
            .cloned()
            .collect())
    }

    fn refresh(&self, path: &VfsPath) {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
        let promoted: Vec<(VfsPath, Node)> = {
            let mut staged = lock(&self.staged);
            let keys: Vec<VfsPath> = staged
                .keys()
                .filter(|entry| entry.starts_with(path))
                .cloned()
                .collect();
            keys.into_iter()
                .filter_map(|key| staged.remove(&key).map(|node| (key, node)))
                .collect()
        };
        let mut nodes = self.lock_nodes();
        for (key, node) in promoted {
            insert_with_ancestors(&mut nodes, key, node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn files_and_directories_resolve() {
        let fs = MemoryFs::new();
        fs.add_file("/pkg/pubspec.yaml", "name: demo\n");

        let root = VfsPath::new("/pkg");
        let pubspec = root.join("pubspec.yaml");
        assert!(fs.is_directory(&root));
        assert!(fs.exists(&pubspec));
        assert!(!fs.is_directory(&pubspec));
        assert_eq!(fs.read_to_string(&pubspec).unwrap(), "name: demo\n");
        assert_eq!(fs.read_dir(&root).unwrap(), vec![pubspec]);
    }

    #[test]
    fn stamps_are_per_file_and_settable() {
        let fs = MemoryFs::new();
        let a = fs.add_file("/pkg/a", "");
        let b = fs.add_file_with_stamp("/pkg/b", "", ModStamp::new(99));

        assert_ne!(fs.mod_stamp(&a), None);
        assert_eq!(fs.mod_stamp(&b), Some(ModStamp::new(99)));
        assert_eq!(fs.mod_stamp(&VfsPath::new("/pkg")), None);
    }

    #[test]
    fn staged_files_appear_only_after_refresh() {
        let fs = MemoryFs::new();
        fs.add_dir("/pkg");
        let staged = fs.stage_file("/pkg/pubspec.yaml", "name: demo\n");

        assert!(!fs.exists(&staged));
        fs.refresh(&VfsPath::new("/other"));
        assert!(!fs.exists(&staged));

        fs.refresh(&VfsPath::new("/pkg"));
        assert!(fs.exists(&staged));
        assert_eq!(fs.refresh_count(), 2);
    }
}
