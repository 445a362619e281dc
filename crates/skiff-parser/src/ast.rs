//! Arena-allocated AST for Skiff documents.
//!
//! Nodes live in a flat `Vec` inside [`Ast`] and refer to each other by
//! [`NodeId`] index. Ownership flows strictly parent -> children through the
//! `children` list; the `parent` field is a plain index used only for upward
//! lookup, so the ownership graph is always a tree.

use serde::Serialize;

/// Index of a node in the [`Ast`] arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The construct a node represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    /// The document root, spanning every line.
    Program,
    Class,
    Actor,
    Function,
    Variable,
    /// A `while`/`if`/`else`/`for` control block.
    Block,
}

/// A single AST node.
///
/// Invariants maintained by the parser:
/// - `start_line <= line <= end_line`
/// - every child's span is contained in its parent's span
/// - children are ordered by ascending `start_line`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeData {
    pub kind: NodeKind,
    /// Declared name; empty for `Program` and `Block` nodes.
    pub name: String,
    /// The 0-based line of the declaration itself.
    pub line: usize,
    /// First line of the node's span (inclusive).
    pub start_line: usize,
    /// Last line of the node's span (inclusive).
    pub end_line: usize,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

/// The parsed document tree. Node 0 is always the `Program` root.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ast {
    nodes: Vec<NodeData>,
}

impl Ast {
    /// Create an arena holding only a `Program` root spanning `0..=last_line`.
    pub(crate) fn with_root(last_line: usize) -> Self {
        Ast {
            nodes: vec![NodeData {
                kind: NodeKind::Program,
                name: String::new(),
                line: 0,
                start_line: 0,
                end_line: last_line,
                children: Vec::new(),
                parent: None,
            }],
        }
    }

    /// The `Program` root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    /// The node's children, in source order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// The node's parent, `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node under `parent` and return its id.
    pub(crate) fn push(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        name: impl Into<String>,
        line: usize,
        start_line: usize,
        end_line: usize,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            name: name.into(),
            line,
            start_line,
            end_line,
            children: Vec::new(),
            parent: Some(parent),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// All node ids reachable from `id`, preorder, `id` first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            out.push(cur);
            for &child in self.nodes[cur.index()].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }
}
