use crate::metadata::{keys, Metadata};
use crate::tree::ParsedResource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Index of a node in its graph's node table
pub type NodeId = usize;

/// A named node in a project graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Display name, as first spelled in the source
    pub name: String,
    /// File this node maps to, if any
    pub file_path: Option<String>,
    /// Child node ids, in first-linked order, without duplicates
    pub children: Vec<NodeId>,
    /// Compiled content of `file_path`, filled by the project compiler
    pub parsed_content: Option<ParsedResource>,
    pub metadata: Metadata,
}

impl GraphNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_path: None,
            children: Vec::new(),
            parsed_content: None,
            metadata: Metadata::new(),
        }
    }

    /// Whether this node was synthesized for an undeclared reference
    pub fn is_placeholder(&self) -> bool {
        self.metadata
            .get(keys::PLACEHOLDER)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

/// A rooted graph (possibly a forest) over a single owning node table
///
/// Deserializing rebuilds the name index, so `find` and `get` work on a
/// graph read back from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GraphTable")]
pub struct ProjectGraph {
    /// Owning node table; every edge and root is an index into it
    pub nodes: Vec<GraphNode>,
    /// Root node ids, in table order
    pub roots: Vec<NodeId>,
    pub metadata: Metadata,
    #[serde(skip)]
    index: HashMap<String, NodeId>,
}

/// Serialized shape of a graph, without the name index
#[derive(Deserialize)]
struct GraphTable {
    nodes: Vec<GraphNode>,
    roots: Vec<NodeId>,
    #[serde(default)]
    metadata: Metadata,
}

impl From<GraphTable> for ProjectGraph {
    fn from(table: GraphTable) -> Self {
        let mut graph = ProjectGraph {
            nodes: table.nodes,
            roots: table.roots,
            metadata: table.metadata,
            index: HashMap::new(),
        };
        graph.reindex();
        graph
    }
}

/// Case-insensitive identity key for a node name
pub(crate) fn identity_key(name: &str) -> String {
    name.to_lowercase()
}

impl ProjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look a node up by name, ignoring case
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.index.get(&identity_key(name)).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut GraphNode> {
        self.nodes.get_mut(id)
    }

    /// Look a node up by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&GraphNode> {
        self.find(name).and_then(|id| self.nodes.get(id))
    }

    /// Return the id for `name`, registering a new node on first sight
    pub(crate) fn get_or_insert(&mut self, name: &str) -> NodeId {
        let key = identity_key(name);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(GraphNode::new(name));
        self.index.insert(key, id);
        id
    }

    /// Register a placeholder node for a name that was never declared
    pub(crate) fn insert_placeholder(&mut self, name: &str) -> NodeId {
        let id = self.get_or_insert(name);
        let metadata = &mut self.nodes[id].metadata;
        metadata.insert(keys::PLACEHOLDER.into(), true.into());
        id
    }

    /// Append `child` to `parent` unless it is already linked
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId) -> bool {
        let children = &mut self.nodes[parent].children;
        if children.contains(&child) {
            return false;
        }
        children.push(child);
        true
    }

    /// Recompute roots: every node that is nobody's child, or every node
    /// when that set is empty (each node sits on a cycle or under one)
    pub(crate) fn infer_roots(&mut self) {
        let mut is_child = vec![false; self.nodes.len()];
        for node in &self.nodes {
            for &child in &node.children {
                is_child[child] = true;
            }
        }

        let roots: Vec<NodeId> = (0..self.nodes.len()).filter(|&id| !is_child[id]).collect();
        self.roots = if roots.is_empty() {
            (0..self.nodes.len()).collect()
        } else {
            roots
        };
    }

    /// Root nodes, in table order
    pub fn root_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.roots.iter().filter_map(|&id| self.nodes.get(id))
    }

    /// Children of a node, in link order
    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = &GraphNode> {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|n| n.children.iter())
            .filter_map(|&child| self.nodes.get(child))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rebuild the name index from the node table
    pub fn reindex(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(id, node)| (identity_key(&node.name), id))
            .collect();
    }
}
