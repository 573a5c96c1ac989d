//! In-memory hierarchical file store.
//!
//! A tree of named directories and files held entirely in process memory.
//! Every directory keeps its children in an open-addressed [`HashTable`]
//! keyed by name.
//!
//! # Architecture
//!
//! The crate is layered, leaves first:
//! - [`HashTable`]: linear-probing map with backward-shift deletion
//! - [`RamFs`]: node arena and node lifecycle ([`RamFs::mknode`])
//! - Path resolution ([`RamFs::resolve`]) with one level of pending creation
//! - Operations on paths: create, read, write, delete, recursive delete, find
//!
//! # Examples
//!
//! ```
//! use ramfs_core::RamFs;
//!
//! let mut fs = RamFs::new();
//! fs.create_dir("/x").unwrap();
//! fs.create("/x/y").unwrap();
//! fs.write("/x/y", "hello").unwrap();
//!
//! assert_eq!(fs.read("/x/y").unwrap(), b"hello");
//! assert_eq!(fs.find("y"), vec!["/x/y"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod builder;
mod config;
mod error;
mod fs;
mod map;
mod node;
mod ops;
mod resolve;
mod search;

pub mod hash;

pub use builder::RamFsBuilder;
pub use config::{
    DEFAULT_MAX_CHILDREN, FsConfig, FsConfigBuilder, MAX_DEPTH, MAX_NAME_LENGTH,
    MAX_PATH_COMPONENTS,
};
pub use error::{FsError, Result};
pub use fs::RamFs;
pub use map::{BASE_CAPACITY, HashTable};
pub use node::{Node, NodeId, NodeInfo, NodeKind, Payload};
pub use resolve::Resolution;
