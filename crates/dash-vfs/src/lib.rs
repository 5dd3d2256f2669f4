//! Filesystem capability layer for Dash.
//!
//! Locator logic never touches `std::fs` directly; it goes through the small
//! [`FileSystem`] trait so the same code runs against the real disk
//! ([`LocalFs`]), the in-memory tree used by tests ([`MemoryFs`]), or a host
//! IDE's virtual file system.

mod fs;
mod memory;
mod path;

pub use fs::{FileSystem, LocalFs};
pub use memory::MemoryFs;
pub use path::VfsPath;
