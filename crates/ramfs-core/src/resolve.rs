//! Path resolution.
//!
//! A path is split on `/` with empty components skipped, so `//a//b/` and
//! `a/b` name the same node. Resolution walks existing directories and allows
//! exactly one missing component, the last one, which becomes the name of a
//! node that can be created under the last directory reached.

use crate::config::MAX_PATH_COMPONENTS;
use crate::error::{FsError, Result};
use crate::fs::RamFs;
use crate::node::NodeId;

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Every component exists; this is the node the path names.
    Existing(NodeId),
    /// All but the last component exist. The last one is free under `parent`.
    Pending {
        /// Directory that would hold the new node
        parent: NodeId,
        /// Name of the missing final component
        name: String,
    },
}

impl Resolution {
    /// Returns the existing node, if the path fully resolved.
    #[must_use]
    pub const fn existing(&self) -> Option<NodeId> {
        match self {
            Self::Existing(id) => Some(*id),
            Self::Pending { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Cursor<'p> {
    resolved: NodeId,
    pending_name: Option<&'p str>,
}

impl RamFs {
    /// Resolves `path` against the root.
    ///
    /// An empty path or `/` resolves to the root.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if a component other than the last is missing
    /// - [`FsError::InvalidPath`] if the path descends through a file
    /// - [`FsError::PathTooDeep`] if the path has more than 255 components
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::{RamFs, Resolution};
    ///
    /// let mut fs = RamFs::new();
    /// fs.create_dir("/a").unwrap();
    ///
    /// assert!(matches!(fs.resolve("//a/").unwrap(), Resolution::Existing(_)));
    /// assert!(matches!(
    ///     fs.resolve("/a/b").unwrap(),
    ///     Resolution::Pending { ref name, .. } if name == "b"
    /// ));
    /// assert!(fs.resolve("/a/b/c").unwrap_err().is_not_found());
    /// ```
    pub fn resolve(&self, path: &str) -> Result<Resolution> {
        let components = || path.split('/').filter(|component| !component.is_empty());

        if components().count() > MAX_PATH_COMPONENTS {
            tracing::debug!(path, "resolve failed: too many components");
            return Err(FsError::PathTooDeep {
                path: path.to_string(),
                max: MAX_PATH_COMPONENTS,
            });
        }

        let start = Cursor {
            resolved: self.root(),
            pending_name: None,
        };
        let cursor = components().try_fold(start, |cursor, component| {
            self.step(path, cursor, component)
        })?;

        Ok(match cursor.pending_name {
            None => Resolution::Existing(cursor.resolved),
            Some(name) => Resolution::Pending {
                parent: cursor.resolved,
                name: name.to_string(),
            },
        })
    }

    fn step<'p>(&self, path: &str, cursor: Cursor<'p>, component: &'p str) -> Result<Cursor<'p>> {
        if cursor.pending_name.is_some() {
            tracing::debug!(path, "resolve failed: more than one missing component");
            return Err(FsError::NotFound {
                path: path.to_string(),
            });
        }

        let children = self
            .node(cursor.resolved)
            .ok_or_else(|| FsError::NotFound {
                path: path.to_string(),
            })?
            .children()
            .ok_or_else(|| {
                tracing::debug!(path, "resolve failed: cannot descend into a file");
                FsError::InvalidPath {
                    path: path.to_string(),
                    reason: "cannot descend into a file",
                }
            })?;

        Ok(match children.get(component.as_bytes()) {
            Some(&child) => Cursor {
                resolved: child,
                pending_name: None,
            },
            None => Cursor {
                resolved: cursor.resolved,
                pending_name: Some(component),
            },
        })
    }

    /// Resolves `path` to a node that must already exist.
    pub(crate) fn lookup(&self, path: &str) -> Result<NodeId> {
        self.resolve(path)?.existing().ok_or_else(|| {
            tracing::debug!(path, "lookup failed: no such node");
            FsError::NotFound {
                path: path.to_string(),
            }
        })
    }
}
