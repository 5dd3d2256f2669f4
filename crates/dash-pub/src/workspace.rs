use std::collections::BTreeSet;

use dash_vfs::{FileSystem, VfsPath};

use crate::pub_root::PubRoot;

/// Stand-in for the host project: the ordered set of content roots the host
/// has configured, plus its disposal flag.
///
/// Lookups against a disposed workspace come back empty; disposal is the one
/// host state that short-circuits everything.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    content_roots: Vec<VfsPath>,
    disposed: bool,
}

impl Workspace {
    pub fn new(content_roots: Vec<VfsPath>) -> Self {
        Self {
            content_roots,
            disposed: false,
        }
    }

    pub fn content_roots(&self) -> &[VfsPath] {
        &self.content_roots
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// The innermost content root containing `file`, if any.
    pub fn content_root_for(&self, file: &VfsPath) -> Option<&VfsPath> {
        if self.disposed {
            return None;
        }
        self.content_roots
            .iter()
            .filter(|root| file.starts_with(root))
            .max_by_key(|root| root.as_str().len())
    }
}

impl PubRoot {
    /// Returns the pub root for the content root containing `file`.
    ///
    /// Unlike [`PubRoot::for_path`] this never ascends past the workspace's
    /// content roots.
    pub fn for_descendant(
        fs: &dyn FileSystem,
        workspace: &Workspace,
        file: &VfsPath,
    ) -> Option<PubRoot> {
        let content_root = workspace.content_root_for(file)?;
        Self::for_directory(fs, content_root)
    }
}

/// Every pub root visible through the workspace's content roots, in content
/// root order, followed by `example/` sub-roots of those packages.
pub fn pub_roots(fs: &dyn FileSystem, workspace: &Workspace) -> Vec<PubRoot> {
    if workspace.is_disposed() {
        return Vec::new();
    }

    let mut seen = BTreeSet::new();
    let mut roots = Vec::new();
    let mut push = |roots: &mut Vec<PubRoot>, root: PubRoot| {
        if seen.insert(root.root().clone()) {
            roots.push(root);
        }
    };

    for content_root in workspace.content_roots() {
        let Some(root) = PubRoot::for_directory(fs, content_root) else {
            continue;
        };
        let example = root.example_dir(fs);
        push(&mut roots, root);
        if let Some(example) = example {
            if let Some(example_root) = PubRoot::for_directory(fs, &example) {
                push(&mut roots, example_root);
            }
        }
    }
    roots
}
