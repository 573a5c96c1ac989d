//! Error types for filesystem operations.
//!
//! Every failure is an ordinary, recoverable outcome returned to the caller.
//! Variants carry the path (or name) that was being operated on so the
//! command layer can report it, while tests can still match on the exact kind.
//!
//! # Examples
//!
//! ```
//! use ramfs_core::{FsError, RamFs};
//!
//! let fs = RamFs::new();
//! let err = fs.read("/missing").unwrap_err();
//!
//! assert!(err.is_not_found());
//! assert_eq!(err.to_string(), "No such file or directory: /missing");
//! ```

use thiserror::Error;

/// Errors that can occur during filesystem operations.
///
/// All error variants include contextual information and implement
/// `is_xxx()` methods for easy error classification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    /// Path does not resolve to an existing node.
    #[error("No such file or directory: {path}")]
    NotFound {
        /// The path that was not found
        path: String,
    },

    /// Creation target collides with an existing sibling.
    #[error("Already exists: {path}")]
    AlreadyExists {
        /// The path that already exists
        path: String,
    },

    /// Operation requires a file but the path names a directory.
    #[error("Not a file: {path}")]
    NotAFile {
        /// The path of the directory
        path: String,
    },

    /// Operation requires a directory but the node is a file.
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// The path of the file
        path: String,
    },

    /// Non-recursive delete of a directory that still has children.
    #[error("Directory not empty: {path} ({children} children)")]
    DirectoryNotEmpty {
        /// The directory path
        path: String,
        /// Number of children still present
        children: usize,
    },

    /// Node name exceeds the configured length limit.
    #[error("Name too long: {len} bytes (limit {max})")]
    NameTooLong {
        /// Length of the rejected name in bytes
        len: usize,
        /// Configured maximum length
        max: usize,
    },

    /// Path has too many components or the new node would be too deep.
    #[error("Path too deep (limit {max}): {path}")]
    PathTooDeep {
        /// The offending path
        path: String,
        /// Configured maximum depth
        max: usize,
    },

    /// Parent directory already holds the maximum number of children.
    #[error("Too many children in {path} (limit {max})")]
    TooManyChildren {
        /// The full directory path
        path: String,
        /// Configured maximum number of children
        max: usize,
    },

    /// Path or node name is malformed.
    #[error("Invalid path {path}: {reason}")]
    InvalidPath {
        /// The invalid path
        path: String,
        /// Why the path was rejected
        reason: &'static str,
    },

    /// Attempt to remove the root directory.
    #[error("Cannot delete the root directory")]
    CannotDeleteRoot,

    /// Filesystem limits are out of range.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration problem
        message: String,
    },
}

impl FsError {
    /// Returns `true` if this is a not-found error.
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::FsError;
    ///
    /// let error = FsError::NotFound {
    ///     path: "/test".to_string(),
    /// };
    ///
    /// assert!(error.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is an already-exists error.
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Returns `true` if the operation hit the wrong node kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::FsError;
    ///
    /// let error = FsError::NotAFile {
    ///     path: "/dir".to_string(),
    /// };
    ///
    /// assert!(error.is_kind_mismatch());
    /// ```
    #[must_use]
    pub const fn is_kind_mismatch(&self) -> bool {
        matches!(self, Self::NotAFile { .. } | Self::NotADirectory { .. })
    }

    /// Returns `true` if this is a directory-not-empty error.
    #[must_use]
    pub const fn is_directory_not_empty(&self) -> bool {
        matches!(self, Self::DirectoryNotEmpty { .. })
    }

    /// Returns `true` if a configured limit rejected the operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::FsError;
    ///
    /// let error = FsError::NameTooLong { len: 300, max: 255 };
    /// assert!(error.is_limit_exceeded());
    /// ```
    #[must_use]
    pub const fn is_limit_exceeded(&self) -> bool {
        matches!(
            self,
            Self::NameTooLong { .. } | Self::PathTooDeep { .. } | Self::TooManyChildren { .. }
        )
    }

    /// Returns `true` if this is an invalid path error.
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }

    /// Returns `true` if a file operation hit a directory.
    #[must_use]
    pub const fn is_not_a_file(&self) -> bool {
        matches!(self, Self::NotAFile { .. })
    }

    /// Returns `true` if a directory operation hit a file.
    #[must_use]
    pub const fn is_not_a_directory(&self) -> bool {
        matches!(self, Self::NotADirectory { .. })
    }

    /// Returns `true` if a name is longer than the limit.
    #[must_use]
    pub const fn is_name_too_long(&self) -> bool {
        matches!(self, Self::NameTooLong { .. })
    }

    /// Returns `true` if a path or node is nested too deeply.
    #[must_use]
    pub const fn is_path_too_deep(&self) -> bool {
        matches!(self, Self::PathTooDeep { .. })
    }

    /// Returns `true` if a directory is full.
    #[must_use]
    pub const fn is_too_many_children(&self) -> bool {
        matches!(self, Self::TooManyChildren { .. })
    }

    /// Returns `true` if the root was the target of a delete.
    #[must_use]
    pub const fn is_cannot_delete_root(&self) -> bool {
        matches!(self, Self::CannotDeleteRoot)
    }

    /// Returns `true` if a configuration was rejected.
    #[must_use]
    pub const fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

/// Type alias for filesystem operation results.
///
/// # Examples
///
/// ```
/// use ramfs_core::{Result, RamFs};
///
/// fn touch(fs: &mut RamFs, path: &str) -> Result<()> {
///     fs.create(path)
/// }
///
/// let mut fs = RamFs::new();
/// assert!(touch(&mut fs, "/a").is_ok());
/// assert!(touch(&mut fs, "/a").is_err());
/// ```
pub type Result<T> = std::result::Result<T, FsError>;
