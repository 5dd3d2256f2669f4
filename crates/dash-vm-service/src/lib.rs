//! Typed read-only views over Dart VM service protocol JSON documents.
//!
//! The VM service returns plain JSON objects; this crate wraps them in
//! borrowed views with presence-checked accessors instead of raw key lookups.
//! Views never own or mutate the underlying document, and several views can
//! share one document. Malformed wire data degrades to absent values (or the
//! [`InstanceKind::Unknown`] sentinel), never to a panic or error.

mod element;
mod instance;
mod isolate;
mod kind;
mod refs;

pub use element::{Element, ElementList, JsonObject};
pub use instance::InstanceRef;
pub use isolate::IsolateGroupRef;
pub use kind::InstanceKind;
pub use refs::{ClassRef, ContextRef, FuncRef, Parameter};
