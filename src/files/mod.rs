//! Mapping request paths onto files.
//!
//! - **`resolver`**: traversal check, root join and case-insensitive lookup
//! - **`index`**: directory listing used by the lookup, optionally cached

pub mod index;
pub mod resolver;

pub use index::NameIndex;
pub use resolver::{PathResolver, ResolveError, ResolvedTarget};
