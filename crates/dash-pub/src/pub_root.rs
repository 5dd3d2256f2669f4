use std::fmt;

use dash_core::{ModStamp, StampCell};
use dash_vfs::{FileSystem, VfsPath};

use crate::packages::{parse_dot_packages, parse_package_config, PackageMap};
use crate::pubspec::PubspecInfo;

/// The manifest file whose presence defines a pub root.
pub const PUBSPEC_NAME: &str = "pubspec.yaml";

/// Directory markers treated as test locations by [`PubRoot::has_tests`].
const TEST_DIR_MARKERS: [&str; 4] = ["/test/", "/integration_test/", "/test_driver/", "/testing/"];

/// A snapshot of the root directory of a pub package.
///
/// That is, a directory containing (at a minimum) a `pubspec.yaml` file; the
/// constructors only succeed when the manifest exists and is a regular file.
///
/// The one piece of mutable state, the cached pubspec info behind
/// [`PubRoot::declares_flutter`], lives in a [`StampCell`] and assumes
/// single-threaded access.
#[derive(Debug, Clone)]
pub struct PubRoot {
    root: VfsPath,
    pubspec: VfsPath,
    pubspec_info: StampCell<PubspecInfo>,
}

impl PubRoot {
    fn new(root: VfsPath, pubspec: VfsPath) -> Self {
        Self {
            root,
            pubspec,
            pubspec_info: StampCell::new(),
        }
    }

    /// Returns the first pub root at or above the given path.
    ///
    /// A directory is considered itself; for a file the ascent starts at its
    /// parent. Returns `None` when the filesystem root is reached without
    /// finding a manifest.
    pub fn for_path(fs: &dyn FileSystem, path: &VfsPath) -> Option<PubRoot> {
        let mut dir = if fs.is_directory(path) {
            Some(path.clone())
        } else {
            path.parent()
        };
        while let Some(candidate) = dir {
            if let Some(root) = Self::for_directory(fs, &candidate) {
                return Some(root);
            }
            dir = candidate.parent();
        }
        None
    }

    /// Returns the pub root for a directory, provided it contains a
    /// `pubspec.yaml` file.
    ///
    /// The existence checks go through whatever the backend has cached;
    /// nothing is refreshed.
    pub fn for_directory(fs: &dyn FileSystem, dir: &VfsPath) -> Option<PubRoot> {
        // The filesystem root is the one normalized path that still ends with
        // a slash; like other trailing-slash placeholders it is never a root.
        if dir.is_root() || !fs.is_directory(dir) {
            return None;
        }

        let pubspec = dir.join(PUBSPEC_NAME);
        if !fs.exists(&pubspec) || fs.is_directory(&pubspec) {
            return None;
        }

        Some(PubRoot::new(dir.clone(), pubspec))
    }

    /// Like [`PubRoot::for_directory`], but re-syncs the backend's view of
    /// the directory first, guarding against stale cached listings.
    pub fn for_directory_with_refresh(fs: &dyn FileSystem, dir: &VfsPath) -> Option<PubRoot> {
        fs.refresh(dir);
        Self::for_directory(fs, dir)
    }

    /// Re-resolves this root and returns an up-to-date snapshot, or `None` if
    /// the directory or manifest is no longer there.
    pub fn refresh(&self, fs: &dyn FileSystem) -> Option<PubRoot> {
        Self::for_directory_with_refresh(fs, &self.root)
    }

    /// Whether `file` names a `pubspec.yaml` regular file.
    pub fn is_pubspec(fs: &dyn FileSystem, file: &VfsPath) -> bool {
        fs.exists(file) && !fs.is_directory(file) && file.name() == PUBSPEC_NAME
    }

    pub fn root(&self) -> &VfsPath {
        &self.root
    }

    pub fn path(&self) -> &str {
        self.root.as_str()
    }

    pub fn pubspec(&self) -> &VfsPath {
        &self.pubspec
    }

    /// The relative path of a file or directory within this root.
    ///
    /// `None` for the root directory itself and for paths outside the root.
    pub fn relative_path<'a>(&self, file: &'a VfsPath) -> Option<&'a str> {
        let rest = file.as_str().strip_prefix(self.root.as_str())?;
        let rest = rest.strip_prefix('/')?;
        if rest.is_empty() {
            return None;
        }
        Some(rest)
    }

    /// Whether `dir` is a directory that contains tests.
    ///
    /// True for the root itself (test runs there look in `test/`), and for
    /// any directory whose absolute path contains one of the recognized test
    /// markers. The markers match against the whole path as substrings, so a
    /// marker segment anywhere above `dir` counts too, including segments
    /// outside this root; that looseness is long-standing behavior that
    /// callers rely on.
    pub fn has_tests(&self, fs: &dyn FileSystem, dir: &VfsPath) -> bool {
        if !fs.is_directory(dir) {
            return false;
        }
        if *dir == self.root {
            return true;
        }

        let path = format!("{}/", dir.as_str());
        TEST_DIR_MARKERS
            .iter()
            .any(|marker| path.contains(marker))
    }

    /// Whether this root is an ancestor of the given file.
    pub fn contains(&self, file: &VfsPath) -> bool {
        let mut dir = file.parent();
        while let Some(candidate) = dir {
            if candidate == self.root {
                return true;
            }
            dir = candidate.parent();
        }
        false
    }

    /// Whether the pubspec declares a Flutter dependency.
    ///
    /// The parsed answer is cached and re-derived only when the manifest's
    /// modification stamp moves.
    pub fn declares_flutter(&self, fs: &dyn FileSystem) -> bool {
        self.pubspec_info(fs).flutter
    }

    /// Parsed facts about this root's pubspec, cached per manifest stamp.
    pub fn pubspec_info(&self, fs: &dyn FileSystem) -> PubspecInfo {
        let stamp = fs.mod_stamp(&self.pubspec).unwrap_or(ModStamp::new(0));
        self.pubspec_info
            .get_or_update(stamp, || PubspecInfo::read(fs, &self.pubspec))
    }

    /// `.dart_tool/package_config.json`, if present.
    pub fn package_config_file(&self, fs: &dyn FileSystem) -> Option<VfsPath> {
        let tools = self.root.join(".dart_tool");
        if !fs.is_directory(&tools) {
            return None;
        }
        let config = tools.join("package_config.json");
        (fs.exists(&config) && !fs.is_directory(&config)).then_some(config)
    }

    /// The legacy `.packages` file, if present. Obsolete since Flutter 2.0.
    pub fn packages_file(&self, fs: &dyn FileSystem) -> Option<VfsPath> {
        let packages = self.root.join(".packages");
        (fs.exists(&packages) && !fs.is_directory(&packages)).then_some(packages)
    }

    /// The package-name to root-URI map from whichever package config is
    /// present, preferring `.dart_tool/package_config.json`.
    pub fn packages_map(&self, fs: &dyn FileSystem) -> Option<PackageMap> {
        if let Some(config) = self.package_config_file(fs) {
            return parse_package_config(&read_or_absent(fs, &config)?);
        }

        let packages = self.packages_file(fs)?;
        Some(parse_dot_packages(&read_or_absent(fs, &packages)?))
    }

    /// Whether the package config is up to date with respect to the pubspec.
    pub fn has_up_to_date_packages(&self, fs: &dyn FileSystem) -> bool {
        let config = match self
            .package_config_file(fs)
            .or_else(|| self.packages_file(fs))
        {
            Some(config) => config,
            None => return false,
        };
        match (fs.mod_stamp(&self.pubspec), fs.mod_stamp(&config)) {
            (Some(pubspec), Some(config)) => pubspec < config,
            _ => false,
        }
    }

    /// The `lib` subdirectory, if it exists.
    pub fn lib_dir(&self, fs: &dyn FileSystem) -> Option<VfsPath> {
        let lib = self.root.join("lib");
        fs.is_directory(&lib).then_some(lib)
    }

    /// `lib/main.dart`, if it exists.
    pub fn lib_main(&self, fs: &dyn FileSystem) -> Option<VfsPath> {
        let main = self.lib_dir(fs)?.join("main.dart");
        (fs.exists(&main) && !fs.is_directory(&main)).then_some(main)
    }

    /// A file in `lib` worth opening: `lib/main.dart` when present, otherwise
    /// the first entry of `lib`.
    pub fn file_to_open(&self, fs: &dyn FileSystem) -> Option<VfsPath> {
        if let Some(main) = self.lib_main(fs) {
            return Some(main);
        }
        let lib = self.lib_dir(fs)?;
        fs.read_dir(&lib).ok()?.into_iter().next()
    }

    /// The `example` subdirectory, if it exists.
    pub fn example_dir(&self, fs: &dyn FileSystem) -> Option<VfsPath> {
        self.existing_child(fs, "example")
    }

    /// `example/lib/main.dart`, if it exists.
    pub fn example_lib_main(&self, fs: &dyn FileSystem) -> Option<VfsPath> {
        let main = self.root.join("example/lib/main.dart");
        (fs.exists(&main) && !fs.is_directory(&main)).then_some(main)
    }

    /// The `integration_test` subdirectory, if it exists.
    pub fn integration_test_dir(&self, fs: &dyn FileSystem) -> Option<VfsPath> {
        self.existing_child(fs, "integration_test")
    }

    /// The `android` subdirectory (or the hidden `.android` of a module).
    pub fn android_dir(&self, fs: &dyn FileSystem) -> Option<VfsPath> {
        self.existing_child(fs, "android")
            .or_else(|| self.existing_child(fs, ".android"))
    }

    /// The `ios` subdirectory (or the hidden `.ios` of a module).
    pub fn ios_dir(&self, fs: &dyn FileSystem) -> Option<VfsPath> {
        self.existing_child(fs, "ios")
            .or_else(|| self.existing_child(fs, ".ios"))
    }

    /// Whether the directory content looks like a Flutter module.
    pub fn is_flutter_module(&self, fs: &dyn FileSystem) -> bool {
        self.existing_child(fs, ".android").is_some()
    }

    /// A Flutter module without an editable `android` directory.
    pub fn is_non_editable_flutter_module(&self, fs: &dyn FileSystem) -> bool {
        self.is_flutter_module(fs) && self.existing_child(fs, "android").is_none()
    }

    fn existing_child(&self, fs: &dyn FileSystem, name: &str) -> Option<VfsPath> {
        let child = self.root.join(name);
        fs.exists(&child).then_some(child)
    }
}

impl PartialEq for PubRoot {
    fn eq(&self, other: &Self) -> bool {
        // Snapshot identity is the pair of paths; the pubspec cache is not
        // part of it.
        self.root == other.root && self.pubspec == other.pubspec
    }
}

impl Eq for PubRoot {}

impl fmt::Display for PubRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PubRoot({})", self.root.name())
    }
}

fn read_or_absent(fs: &dyn FileSystem, file: &VfsPath) -> Option<String> {
    match fs.read_to_string(file) {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::debug!(target: "dash.pub", path = %file, error = %err, "read failed");
            None
        }
    }
}
