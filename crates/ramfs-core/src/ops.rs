//! Path-based operations: create, read, write, delete and stat.
//!
//! # Examples
//!
//! ```
//! use ramfs_core::RamFs;
//!
//! let mut fs = RamFs::new();
//! fs.create_dir("/notes").unwrap();
//! fs.create("/notes/todo").unwrap();
//!
//! assert_eq!(fs.write("/notes/todo", "buy milk").unwrap(), 8);
//! assert_eq!(fs.read("/notes/todo").unwrap(), b"buy milk");
//!
//! assert!(fs.delete("/notes").unwrap_err().is_directory_not_empty());
//! fs.delete_recursive("/notes").unwrap();
//! assert!(fs.read("/notes/todo").unwrap_err().is_not_found());
//! ```

use crate::error::{FsError, Result};
use crate::fs::RamFs;
use crate::map::HashTable;
use crate::node::{Node, NodeId, NodeInfo, NodeKind, Payload};
use crate::resolve::Resolution;

impl RamFs {
    /// Creates an empty file at `path`.
    ///
    /// The parent directory must exist and the name must be free.
    ///
    /// # Errors
    ///
    /// - [`FsError::AlreadyExists`] if `path` already names a node
    /// - [`FsError::NotFound`] if the parent directory does not exist
    /// - Any rejection from [`RamFs::mknode`]
    pub fn create(&mut self, path: &str) -> Result<()> {
        self.create_node(path, NodeKind::File, None).map(|_| ())
    }

    /// Creates an empty directory at `path`.
    ///
    /// # Errors
    ///
    /// Same as [`RamFs::create`].
    pub fn create_dir(&mut self, path: &str) -> Result<()> {
        self.create_node(path, NodeKind::Directory, None)
            .map(|_| ())
    }

    pub(crate) fn create_node(
        &mut self,
        path: &str,
        kind: NodeKind,
        payload: Option<Payload>,
    ) -> Result<NodeId> {
        match self.resolve(path)? {
            Resolution::Pending { parent, name } => {
                self.mknode(Some(parent), Some(&name), kind, payload)
            }
            Resolution::Existing(_) => {
                tracing::debug!(path, %kind, "create rejected: path exists");
                Err(FsError::AlreadyExists {
                    path: path.to_string(),
                })
            }
        }
    }

    /// Returns the content of the file at `path`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if nothing exists at `path`
    /// - [`FsError::NotAFile`] if `path` names a directory
    pub fn read(&self, path: &str) -> Result<&[u8]> {
        let id = self.lookup(path)?;
        self.node(id)
            .and_then(Node::content)
            .ok_or_else(|| {
                tracing::debug!(path, "read rejected: not a file");
                FsError::NotAFile {
                    path: path.to_string(),
                }
            })
    }

    /// Replaces the content of the file at `path` and returns the number of
    /// bytes written.
    ///
    /// The previous content is discarded, never appended to.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if nothing exists at `path`
    /// - [`FsError::NotAFile`] if `path` names a directory
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::RamFs;
    ///
    /// let mut fs = RamFs::new();
    /// fs.create("/f").unwrap();
    ///
    /// fs.write("/f", "hello").unwrap();
    /// assert_eq!(fs.write("/f", "hi").unwrap(), 2);
    /// assert_eq!(fs.read("/f").unwrap(), b"hi");
    /// ```
    pub fn write(&mut self, path: &str, content: impl Into<Vec<u8>>) -> Result<usize> {
        let id = self.lookup(path)?;
        match self.arena.get_mut(id).map(|node| &mut node.payload) {
            Some(Payload::File(buffer)) => {
                *buffer = content.into();
                buffer.shrink_to_fit();
                Ok(buffer.len())
            }
            _ => {
                tracing::debug!(path, "write rejected: not a file");
                Err(FsError::NotAFile {
                    path: path.to_string(),
                })
            }
        }
    }

    /// Removes the file or empty directory at `path`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if nothing exists at `path`
    /// - [`FsError::CannotDeleteRoot`] if `path` names the root
    /// - [`FsError::DirectoryNotEmpty`] if the directory still has children
    pub fn delete(&mut self, path: &str) -> Result<()> {
        let id = self.lookup(path)?;
        if id == self.root() {
            tracing::debug!(path, "delete rejected: root");
            return Err(FsError::CannotDeleteRoot);
        }

        let children = self
            .node(id)
            .and_then(Node::children)
            .map_or(0, HashTable::len);
        if children > 0 {
            tracing::debug!(path, children, "delete rejected: directory not empty");
            return Err(FsError::DirectoryNotEmpty {
                path: path.to_string(),
                children,
            });
        }

        self.unlink(id);
        Ok(())
    }

    /// Removes the node at `path` together with everything below it.
    ///
    /// Called on the root, this is a no-op: the root and its children stay.
    /// Use [`RamFs::clear`] to empty the whole tree.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if nothing exists at `path`
    pub fn delete_recursive(&mut self, path: &str) -> Result<()> {
        let id = self.lookup(path)?;
        if id == self.root() {
            tracing::debug!(path, "recursive delete of root ignored");
            return Ok(());
        }

        let freed = self.unlink_recursive(id);
        tracing::debug!(path, freed, "deleted subtree");
        Ok(())
    }

    /// Returns metadata for the node at `path`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if nothing exists at `path`
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::{NodeKind, RamFs};
    ///
    /// let mut fs = RamFs::new();
    /// fs.create_dir("/d").unwrap();
    /// fs.create("/d/f").unwrap();
    ///
    /// let info = fs.stat("/d").unwrap();
    /// assert_eq!(info.kind, NodeKind::Directory);
    /// assert_eq!(info.path, "/d/");
    /// assert_eq!(info.size, 1);
    /// ```
    pub fn stat(&self, path: &str) -> Result<NodeInfo> {
        let id = self.lookup(path)?;
        let not_found = || FsError::NotFound {
            path: path.to_string(),
        };
        let node = self.node(id).ok_or_else(not_found)?;

        let size = match &node.payload {
            Payload::Directory(children) => children.len(),
            Payload::File(content) => content.len(),
        };

        Ok(NodeInfo {
            name: node.name().map(str::to_owned),
            path: self.path_of(id).ok_or_else(not_found)?,
            kind: node.kind(),
            depth: node.depth(),
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_read_empty() {
        let mut fs = RamFs::new();
        fs.create("/f").unwrap();
        assert_eq!(fs.read("/f").unwrap(), b"");
    }

    #[test]
    fn test_create_existing() {
        let mut fs = RamFs::new();
        fs.create("/f").unwrap();

        assert!(fs.create("/f").unwrap_err().is_already_exists());
        assert!(fs.create_dir("/f").unwrap_err().is_already_exists());
        assert!(fs.create_dir("/").unwrap_err().is_already_exists());
    }

    #[test]
    fn test_create_one_level_at_a_time() {
        let mut fs = RamFs::new();
        assert!(fs.create("/a/b").unwrap_err().is_not_found());

        fs.create_dir("/a").unwrap();
        fs.create("/a/b").unwrap();
        assert_eq!(fs.node_count(), 3);
    }

    #[test]
    fn test_create_under_file() {
        let mut fs = RamFs::new();
        fs.create("/f").unwrap();
        assert!(fs.create("/f/x").unwrap_err().is_invalid_path());
    }

    #[test]
    fn test_read_directory() {
        let mut fs = RamFs::new();
        fs.create_dir("/d").unwrap();

        assert_eq!(
            fs.read("/d").unwrap_err(),
            FsError::NotAFile {
                path: "/d".to_string()
            }
        );
        assert!(fs.read("/").unwrap_err().is_kind_mismatch());
    }

    #[test]
    fn test_write_replaces_content() {
        let mut fs = RamFs::new();
        fs.create("/f").unwrap();

        assert_eq!(fs.write("/f", "hello").unwrap(), 5);
        assert_eq!(fs.read("/f").unwrap(), b"hello");

        assert_eq!(fs.write("/f", "hi").unwrap(), 2);
        assert_eq!(fs.read("/f").unwrap(), b"hi");

        assert_eq!(fs.write("/f", "").unwrap(), 0);
        assert_eq!(fs.read("/f").unwrap(), b"");
    }

    #[test]
    fn test_write_errors() {
        let mut fs = RamFs::new();
        fs.create_dir("/d").unwrap();

        assert!(fs.write("/d", "x").unwrap_err().is_kind_mismatch());
        assert!(fs.write("/missing", "x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_file_and_empty_dir() {
        let mut fs = RamFs::new();
        fs.create_dir("/d").unwrap();
        fs.create("/d/f").unwrap();

        let err = fs.delete("/d").unwrap_err();
        assert_eq!(
            err,
            FsError::DirectoryNotEmpty {
                path: "/d".to_string(),
                children: 1
            }
        );

        fs.delete("/d/f").unwrap();
        fs.delete("/d").unwrap();
        assert_eq!(fs.node_count(), 1);
        assert!(fs.delete("/d").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_root() {
        let mut fs = RamFs::new();
        assert_eq!(fs.delete("/").unwrap_err(), FsError::CannotDeleteRoot);
        assert_eq!(fs.delete("").unwrap_err(), FsError::CannotDeleteRoot);
    }

    #[test]
    fn test_delete_recursive() {
        let mut fs = RamFs::new();
        fs.create_dir("/a").unwrap();
        fs.create_dir("/a/b").unwrap();
        fs.create("/a/b/c").unwrap();
        fs.create("/keep").unwrap();

        fs.delete_recursive("/a").unwrap();
        assert!(fs.read("/a/b/c").unwrap_err().is_not_found());
        assert!(fs.stat("/a").unwrap_err().is_not_found());
        assert_eq!(fs.node_count(), 2);

        // The name is free again
        fs.create("/a").unwrap();
    }

    #[test]
    fn test_delete_recursive_root_is_noop() {
        let mut fs = RamFs::new();
        fs.create("/f").unwrap();

        fs.delete_recursive("/").unwrap();
        fs.delete_recursive("").unwrap();
        assert_eq!(fs.node_count(), 2);
        assert!(fs.read("/f").is_ok());
    }

    #[test]
    fn test_stat() {
        let mut fs = RamFs::new();
        fs.create_dir("/d").unwrap();
        fs.create("/d/f").unwrap();
        fs.write("/d/f", "abc").unwrap();

        let info = fs.stat("/d/f").unwrap();
        assert_eq!(
            info,
            NodeInfo {
                name: Some("f".to_string()),
                path: "/d/f".to_string(),
                kind: NodeKind::File,
                depth: 2,
                size: 3,
            }
        );

        let root = fs.stat("/").unwrap();
        assert_eq!(root.name, None);
        assert_eq!(root.path, "/");
        assert_eq!(root.size, 1);
    }
}
