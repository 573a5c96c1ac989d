//! The filesystem tree: node construction, removal and path reconstruction.
//!
//! [`RamFs`] owns every node through a generational arena. Path-based
//! operations live in sibling modules (`resolve`, `ops`, `search`) as further
//! `impl RamFs` blocks; this module holds the node lifecycle they build on.
//!
//! # Examples
//!
//! ```
//! use ramfs_core::{NodeKind, RamFs};
//!
//! let mut fs = RamFs::new();
//! let root = fs.root();
//!
//! let docs = fs.mknode(Some(root), Some("docs"), NodeKind::Directory, None).unwrap();
//! let readme = fs.mknode(Some(docs), Some("readme"), NodeKind::File, None).unwrap();
//!
//! assert_eq!(fs.path_of(docs).as_deref(), Some("/docs/"));
//! assert_eq!(fs.path_of(readme).as_deref(), Some("/docs/readme"));
//! assert_eq!(fs.node_count(), 3);
//! ```

use crate::config::FsConfig;
use crate::error::{FsError, Result};
use crate::node::{Node, NodeArena, NodeId, NodeKind, Payload};
use std::mem;

/// An in-memory hierarchical filesystem.
///
/// Holds exactly one root directory for its whole lifetime. All other nodes
/// are reachable from the root through directory child tables.
#[derive(Debug)]
pub struct RamFs {
    pub(crate) arena: NodeArena,
    root: NodeId,
    config: FsConfig,
}

impl RamFs {
    /// Creates an empty filesystem with default limits.
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::RamFs;
    ///
    /// let fs = RamFs::new();
    /// assert_eq!(fs.node_count(), 1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_valid_config(FsConfig::default())
    }

    /// Creates an empty filesystem with the given limits.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::InvalidConfig`] if the limits are out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::{FsConfig, RamFs};
    ///
    /// let config = FsConfig::builder().max_children(2).build().unwrap();
    /// let mut fs = RamFs::with_config(config).unwrap();
    ///
    /// fs.create("/a").unwrap();
    /// fs.create("/b").unwrap();
    /// assert!(fs.create("/c").unwrap_err().is_limit_exceeded());
    /// ```
    pub fn with_config(config: FsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: FsConfig) -> Self {
        let mut arena = NodeArena::default();
        let root = arena.insert(Node::root());
        Self {
            arena,
            root,
            config,
        }
    }

    /// Returns the root directory.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the active limits.
    #[must_use]
    pub const fn config(&self) -> &FsConfig {
        &self.config
    }

    /// Returns the node behind `id`, or `None` if it has been removed.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    /// Number of live nodes, root included.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Constructs a node under `parent` and registers it in the parent's
    /// child table.
    ///
    /// Checks run in a fixed order and the first failure wins:
    ///
    /// 1. `parent` is a file: [`FsError::NotADirectory`]
    /// 2. `name` is missing, empty or contains `/`: [`FsError::InvalidPath`]
    /// 3. `name` exceeds `max_name_len`: [`FsError::NameTooLong`]
    /// 4. the new depth exceeds `max_depth`: [`FsError::PathTooDeep`]
    /// 5. `parent` already holds `max_children`: [`FsError::TooManyChildren`]
    /// 6. `payload` does not fit `kind`: [`FsError::InvalidPath`]
    /// 7. a sibling has the same name: [`FsError::AlreadyExists`]
    ///
    /// Without a `payload`, directories start with an empty child table and
    /// files with empty content. A directory payload must be empty.
    ///
    /// The root is created with the filesystem, so `parent: None` is always
    /// rejected with [`FsError::InvalidPath`].
    ///
    /// # Errors
    ///
    /// See the list above. A stale `parent` yields [`FsError::NotFound`].
    pub fn mknode(
        &mut self,
        parent: Option<NodeId>,
        name: Option<&str>,
        kind: NodeKind,
        payload: Option<Payload>,
    ) -> Result<NodeId> {
        let Some(parent) = parent else {
            return Err(Self::reject_root(name, kind));
        };

        let parent_node = self.arena.get(parent).ok_or_else(|| FsError::NotFound {
            path: parent.to_string(),
        })?;
        let Some(siblings) = parent_node.children() else {
            let path = self.display_path(parent);
            tracing::debug!(%path, "mknode rejected: files can't have children");
            return Err(FsError::NotADirectory { path });
        };

        let name = match name {
            Some(name) if !name.is_empty() && !name.contains('/') => name,
            _ => {
                tracing::debug!(?name, "mknode rejected: bad name");
                return Err(FsError::InvalidPath {
                    path: self.child_path(parent, name.unwrap_or_default()),
                    reason: "name must be non-empty and contain no '/'",
                });
            }
        };

        if name.len() > self.config.max_name_len {
            tracing::debug!(len = name.len(), "mknode rejected: name too long");
            return Err(FsError::NameTooLong {
                len: name.len(),
                max: self.config.max_name_len,
            });
        }

        let Some(depth) = parent_node
            .depth()
            .checked_add(1)
            .filter(|&d| usize::from(d) <= self.config.max_depth)
        else {
            let path = self.child_path(parent, name);
            tracing::debug!(%path, "mknode rejected: depth overflow");
            return Err(FsError::PathTooDeep {
                path,
                max: self.config.max_depth,
            });
        };

        if siblings.len() >= self.config.max_children {
            let path = self.display_path(parent);
            tracing::debug!(%path, "mknode rejected: too many children");
            return Err(FsError::TooManyChildren {
                path,
                max: self.config.max_children,
            });
        }

        let payload = match payload {
            None => Payload::empty(kind),
            Some(payload) if payload.kind() != kind => {
                return Err(FsError::InvalidPath {
                    path: self.child_path(parent, name),
                    reason: "payload does not match node kind",
                });
            }
            Some(Payload::Directory(children)) if !children.is_empty() => {
                return Err(FsError::InvalidPath {
                    path: self.child_path(parent, name),
                    reason: "directory payload must be empty",
                });
            }
            Some(payload) => payload,
        };

        let id = self.arena.insert(Node {
            name: Some(name.to_owned()),
            parent: Some(parent),
            depth,
            payload,
        });

        let registered = self
            .arena
            .children_mut(parent)
            .is_some_and(|children| children.set_if_absent(name.as_bytes(), id));
        if !registered {
            self.arena.remove(id);
            let path = self.child_path(parent, name);
            tracing::debug!(%path, "mknode rejected: name already exists");
            return Err(FsError::AlreadyExists { path });
        }

        tracing::trace!(%id, name, %kind, depth, "allocated node");
        Ok(id)
    }

    fn reject_root(name: Option<&str>, kind: NodeKind) -> FsError {
        let reason = match (name, kind) {
            (Some(_), _) => "root cannot be named",
            (None, NodeKind::File) => "root must be a directory",
            (None, NodeKind::Directory) => "filesystem already has a root",
        };
        tracing::debug!(reason, "mknode rejected");
        FsError::InvalidPath {
            path: "/".to_string(),
            reason,
        }
    }

    /// Reconstructs the absolute path of a node from its parent links.
    ///
    /// Directories end with `/` and the root is `/`. Returns `None` if the
    /// node has been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::RamFs;
    ///
    /// let mut fs = RamFs::new();
    /// fs.create_dir("/a").unwrap();
    /// fs.create("/a/b").unwrap();
    ///
    /// assert_eq!(fs.path_of(fs.root()).as_deref(), Some("/"));
    /// assert_eq!(fs.stat("/a/b").unwrap().path, "/a/b");
    /// ```
    #[must_use]
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        let node = self.arena.get(id)?;

        let mut names = Vec::with_capacity(usize::from(node.depth()));
        let mut current = Some(node);
        while let Some(node) = current {
            if let Some(name) = node.name() {
                names.push(name);
            }
            current = node.parent().and_then(|p| self.arena.get(p));
        }

        let mut path = String::from("/");
        for name in names.iter().rev() {
            path.push_str(name);
            path.push('/');
        }
        if node.is_file() {
            path.pop();
        }
        Some(path)
    }

    fn display_path(&self, id: NodeId) -> String {
        self.path_of(id).unwrap_or_else(|| id.to_string())
    }

    fn child_path(&self, parent: NodeId, name: &str) -> String {
        let mut path = self.display_path(parent);
        path.push_str(name);
        path
    }

    /// Removes every node below root, keeping the root itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::RamFs;
    ///
    /// let mut fs = RamFs::new();
    /// fs.create_dir("/a").unwrap();
    /// fs.create("/a/b").unwrap();
    ///
    /// fs.clear();
    /// assert_eq!(fs.node_count(), 1);
    /// assert!(fs.read("/a/b").unwrap_err().is_not_found());
    /// ```
    pub fn clear(&mut self) {
        let children = self
            .arena
            .children_mut(self.root)
            .map(mem::take)
            .unwrap_or_default();

        let freed: usize = children
            .into_values()
            .map(|child| self.free_subtree(child))
            .sum();
        tracing::debug!(freed, "cleared filesystem");
    }

    /// Removes a single node and unregisters it from its parent.
    pub(crate) fn unlink(&mut self, id: NodeId) -> Option<Node> {
        let node = self.arena.remove(id)?;
        if let (Some(parent), Some(name)) = (node.parent(), node.name())
            && let Some(siblings) = self.arena.children_mut(parent)
        {
            siblings.delete(name.as_bytes());
        }
        tracing::trace!(%id, "removed node");
        Some(node)
    }

    /// Removes a node and its whole subtree, then unregisters it from its
    /// parent. Returns the number of nodes freed.
    pub(crate) fn unlink_recursive(&mut self, id: NodeId) -> usize {
        let Some(node) = self.arena.get(id) else {
            return 0;
        };
        let parent = node.parent();
        let name = node.name().map(str::to_owned);

        let freed = self.free_subtree(id);

        if let (Some(parent), Some(name)) = (parent, name)
            && let Some(siblings) = self.arena.children_mut(parent)
        {
            siblings.delete(name.as_bytes());
        }
        freed
    }

    // Post-order: the child table is taken whole, so children are freed
    // without touching it entry by entry.
    fn free_subtree(&mut self, id: NodeId) -> usize {
        let children = self.arena.children_mut(id).map(mem::take);

        let mut freed = children.map_or(0, |children| {
            children
                .into_values()
                .map(|child| self.free_subtree(child))
                .sum::<usize>()
        });

        if self.arena.remove(id).is_some() {
            tracing::trace!(%id, "removed node");
            freed += 1;
        }
        freed
    }
}

impl Default for RamFs {
    fn default() -> Self {
        Self::new()
    }
}
