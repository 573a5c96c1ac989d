//! Builder pattern for constructing populated filesystems.
//!
//! Provides a fluent API for laying out directories and files up front,
//! typically in tests and benchmarks.
//!
//! # Examples
//!
//! ```
//! use ramfs_core::RamFsBuilder;
//!
//! let fs = RamFsBuilder::new()
//!     .add_dir("/etc")
//!     .add_file("/etc/hosts", "127.0.0.1 localhost")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(fs.read("/etc/hosts").unwrap(), b"127.0.0.1 localhost");
//! ```

use crate::config::FsConfig;
use crate::error::{FsError, Result};
use crate::fs::RamFs;
use crate::node::{NodeKind, Payload};

/// Builder for constructing a [`RamFs`].
///
/// Errors from individual additions are collected and the first one is
/// returned by [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use ramfs_core::{FsConfig, RamFsBuilder};
///
/// let config = FsConfig::builder().max_children(1).build().unwrap();
/// let result = RamFsBuilder::with_config(config)
///     .add_file("/a", "")
///     .add_file("/b", "")
///     .build();
///
/// assert!(result.unwrap_err().is_limit_exceeded());
/// ```
#[derive(Debug, Default)]
pub struct RamFsBuilder {
    fs: RamFs,
    errors: Vec<FsError>,
}

impl RamFsBuilder {
    /// Creates a builder for a filesystem with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fs: RamFs::new(),
            errors: Vec::new(),
        }
    }

    /// Creates a builder for a filesystem with the given limits.
    ///
    /// An invalid configuration is reported by [`build`](Self::build).
    #[must_use]
    pub fn with_config(config: FsConfig) -> Self {
        match RamFs::with_config(config) {
            Ok(fs) => Self {
                fs,
                errors: Vec::new(),
            },
            Err(e) => Self {
                fs: RamFs::new(),
                errors: vec![e],
            },
        }
    }

    /// Adds an empty directory. Its parent must already exist.
    #[must_use]
    pub fn add_dir(mut self, path: &str) -> Self {
        if let Err(e) = self.fs.create_dir(path) {
            self.errors.push(e);
        }
        self
    }

    /// Adds a file with the given content. Its parent must already exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::RamFsBuilder;
    ///
    /// let result = RamFsBuilder::new()
    ///     .add_file("/missing/file", "x")
    ///     .build();
    ///
    /// assert!(result.unwrap_err().is_not_found());
    /// ```
    #[must_use]
    pub fn add_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        let payload = Payload::File(content.into());
        if let Err(e) = self.fs.create_node(path, NodeKind::File, Some(payload)) {
            self.errors.push(e);
        }
        self
    }

    /// Adds several files at once.
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::RamFsBuilder;
    ///
    /// let fs = RamFsBuilder::new()
    ///     .add_files([("/one", "1"), ("/two", "2")])
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(fs.node_count(), 3);
    /// ```
    #[must_use]
    pub fn add_files<P, C>(self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<str>,
        C: Into<Vec<u8>>,
    {
        files
            .into_iter()
            .fold(self, |builder, (path, content)| {
                builder.add_file(path.as_ref(), content)
            })
    }

    /// Consumes the builder and returns the filesystem.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered while adding nodes.
    pub fn build(self) -> Result<RamFs> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        Ok(self.fs)
    }
}
