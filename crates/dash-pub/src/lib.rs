//! Pub package root discovery for Dash.
//!
//! A pub root is a directory containing a `pubspec.yaml` manifest. This crate
//! locates roots through the injected [`dash_vfs::FileSystem`] capability and
//! answers derived questions about them: relative paths, test directories,
//! well-known subdirectories, the package config map, and whether the
//! manifest declares Flutter (cached against the manifest's modification
//! stamp).
//!
//! Absence is the dominant failure mode throughout: missing files, missing
//! fields, and malformed manifests yield `None`/defaults rather than errors.

mod packages;
mod pub_root;
mod pubspec;
mod workspace;

pub use packages::{parse_dot_packages, parse_package_config, PackageMap};
pub use pub_root::{PubRoot, PUBSPEC_NAME};
pub use pubspec::PubspecInfo;
pub use workspace::{pub_roots, Workspace};
