//! Directory and file nodes, and the arena that stores them.
//!
//! Nodes live in a generational arena owned by [`RamFs`](crate::RamFs).
//! A directory's [`HashTable`] maps child names to [`NodeId`]s; that mapping
//! is the only owning edge in the tree. The `parent` link is a plain id used
//! for path reconstruction and for unregistering a node from its parent on
//! removal.

use crate::map::HashTable;
use std::fmt;

/// Handle to a node in a filesystem.
///
/// Ids carry a generation, so an id kept across the removal of its node
/// never aliases a node created later in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Whether a node is a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Holds named children
    Directory,
    /// Holds a byte buffer
    File,
}

impl NodeKind {
    /// Returns the lowercase name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node contents: a child table for directories, bytes for files.
#[derive(Debug)]
pub enum Payload {
    /// Child name to child node
    Directory(HashTable<NodeId>),
    /// File content
    File(Vec<u8>),
}

impl Payload {
    /// Empty payload for a node of `kind`.
    #[must_use]
    pub fn empty(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Directory => Self::Directory(HashTable::new()),
            NodeKind::File => Self::File(Vec::new()),
        }
    }

    /// Kind of node this payload belongs to.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Directory(_) => NodeKind::Directory,
            Self::File(_) => NodeKind::File,
        }
    }
}

/// A directory or file in the tree.
#[derive(Debug)]
pub struct Node {
    pub(crate) name: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: u8,
    pub(crate) payload: Payload,
}

impl Node {
    pub(crate) fn root() -> Self {
        Self {
            name: None,
            parent: None,
            depth: 0,
            payload: Payload::empty(NodeKind::Directory),
        }
    }

    /// Node name, `None` for the root.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parent directory, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Distance from root (root is 0).
    #[must_use]
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Node kind.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.payload.kind()
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.payload, Payload::Directory(_))
    }

    /// Returns `true` for files.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.payload, Payload::File(_))
    }

    /// Child table of a directory.
    #[must_use]
    pub const fn children(&self) -> Option<&HashTable<NodeId>> {
        match &self.payload {
            Payload::Directory(children) => Some(children),
            Payload::File(_) => None,
        }
    }

    /// Content of a file.
    #[must_use]
    pub fn content(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::File(content) => Some(content),
            Payload::Directory(_) => None,
        }
    }
}

/// Snapshot of a node's metadata.
///
/// `size` is the number of children for a directory and the content length
/// in bytes for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    /// Node name, `None` for the root
    pub name: Option<String>,
    /// Absolute path; directories end with `/`
    pub path: String,
    /// Node kind
    pub kind: NodeKind,
    /// Distance from root
    pub depth: u8,
    /// Child count or content length
    pub size: usize,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Slot storage for nodes with id reuse.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: usize,
}

impl NodeArena {
    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }

        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node> {
        let slot = self
            .slots
            .get_mut(id.index)
            .filter(|s| s.generation == id.generation)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(node)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    /// Child table of directory `id`.
    pub(crate) fn children_mut(&mut self, id: NodeId) -> Option<&mut HashTable<NodeId>> {
        match self.get_mut(id).map(|n| &mut n.payload) {
            Some(Payload::Directory(children)) => Some(children),
            _ => None,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.live
    }
}
