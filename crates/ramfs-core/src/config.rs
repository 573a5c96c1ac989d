//! Filesystem limits.
//!
//! The tree enforces three structural bounds: how long a node name may be,
//! how deep a node may sit below root, and how many children one directory
//! may hold. The first two have hard ceilings of 255 (depth is stored in a
//! byte); the children bound is a tunable with a default of 1024.
//!
//! # Examples
//!
//! ```
//! use ramfs_core::FsConfig;
//!
//! // Use default limits
//! let config = FsConfig::default();
//! assert_eq!(config.max_children, 1024);
//!
//! // Tighten them
//! let small = FsConfig::builder()
//!     .max_children(8)
//!     .max_depth(16)
//!     .build()
//!     .unwrap();
//! assert_eq!(small.max_children, 8);
//! ```

use crate::error::{FsError, Result};
use serde::Deserialize;

/// Hard ceiling on node name length, in bytes.
pub const MAX_NAME_LENGTH: usize = 255;

/// Hard ceiling on node depth below root.
pub const MAX_DEPTH: usize = 255;

/// Maximum number of non-empty components a path may contain.
pub const MAX_PATH_COMPONENTS: usize = 255;

/// Default maximum number of children per directory.
pub const DEFAULT_MAX_CHILDREN: usize = 1024;

/// Structural limits for a filesystem instance.
///
/// Deserializable so the command shell can load it from a TOML file;
/// missing fields fall back to their defaults.
///
/// # Examples
///
/// ```
/// use ramfs_core::FsConfig;
///
/// let config = FsConfig {
///     max_children: 64,
///     ..Default::default()
/// };
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FsConfig {
    /// Maximum number of children a single directory may hold.
    ///
    /// Default: 1024
    pub max_children: usize,

    /// Maximum node name length in bytes (at most 255).
    ///
    /// Default: 255
    pub max_name_len: usize,

    /// Maximum node depth below root (at most 255).
    ///
    /// Default: 255
    pub max_depth: usize,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            max_children: DEFAULT_MAX_CHILDREN,
            max_name_len: MAX_NAME_LENGTH,
            max_depth: MAX_DEPTH,
        }
    }
}

impl FsConfig {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::FsConfig;
    ///
    /// let config = FsConfig::builder().max_name_len(32).build().unwrap();
    /// assert_eq!(config.max_name_len, 32);
    /// ```
    #[must_use]
    pub fn builder() -> FsConfigBuilder {
        FsConfigBuilder::new()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::InvalidConfig`] if:
    /// - Any limit is zero
    /// - `max_name_len` exceeds 255
    /// - `max_depth` exceeds 255
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::FsConfig;
    ///
    /// let config = FsConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// let mut invalid = FsConfig::default();
    /// invalid.max_children = 0;
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.max_children == 0 {
            return Err(invalid("max_children must be greater than zero"));
        }

        if self.max_name_len == 0 || self.max_name_len > MAX_NAME_LENGTH {
            return Err(invalid(format!(
                "max_name_len must be between 1 and {MAX_NAME_LENGTH}, got {}",
                self.max_name_len
            )));
        }

        if self.max_depth == 0 || self.max_depth > MAX_DEPTH {
            return Err(invalid(format!(
                "max_depth must be between 1 and {MAX_DEPTH}, got {}",
                self.max_depth
            )));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> FsError {
    FsError::InvalidConfig {
        message: message.into(),
    }
}

/// Builder for [`FsConfig`].
///
/// # Examples
///
/// ```
/// use ramfs_core::FsConfig;
///
/// let config = FsConfig::builder()
///     .max_children(100)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_children, 100);
/// assert_eq!(config.max_depth, 255);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FsConfigBuilder {
    config: FsConfig,
}

impl FsConfigBuilder {
    /// Creates a builder seeded with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of children per directory.
    #[must_use]
    pub const fn max_children(mut self, max_children: usize) -> Self {
        self.config.max_children = max_children;
        self
    }

    /// Sets the maximum node name length.
    #[must_use]
    pub const fn max_name_len(mut self, max_name_len: usize) -> Self {
        self.config.max_name_len = max_name_len;
        self
    }

    /// Sets the maximum node depth.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::InvalidConfig`] if any limit is out of range.
    pub fn build(self) -> Result<FsConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
