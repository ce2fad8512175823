use std::collections::HashSet;

use log::debug;

use crate::error::GraphError;
use crate::node_table::{Nid, NodeTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    User,
    Account,
}

/// Simple undirected bipartite graph over User and Account nodes.
///
/// Mutation is additive only: nodes and edges can be inserted but never
/// removed. A node's kind is fixed on first insertion; inserting the same
/// identifier with the other kind is an error, as is any edge whose endpoints
/// share a kind. The interner doubles as the membership index used by the
/// set-intersection passes.
#[derive(Debug)]
pub struct BipartiteGraph {
    nodes: NodeTable,
    kinds: Vec<NodeKind>,
    adjacency: Vec<HashSet<Nid>>,
    edge_count: usize,
}

impl BipartiteGraph {
    pub fn new() -> Self {
        Self {
            nodes: NodeTable::new(),
            kinds: Vec::new(),
            adjacency: Vec::new(),
            edge_count: 0,
        }
    }

    /// Inserts a node, or returns the existing id if the identifier is
    /// already present with the same kind.
    pub fn add_node(&mut self, name: &str, kind: NodeKind) -> Result<Nid, GraphError> {
        if let Some(id) = self.nodes.id(name) {
            let existing = self.kinds[id as usize];
            if existing != kind {
                return Err(GraphError::KindConflict(format!(
                    "{} already present as {:?}, cannot re-add as {:?}",
                    name, existing, kind
                )));
            }
            return Ok(id);
        }

        let id = self.nodes.get_or_create_id(name);
        self.kinds.push(kind);
        self.adjacency.push(HashSet::new());
        Ok(id)
    }

    /// Inserts the undirected edge between a User and an Account, in either
    /// argument order. Returns false if the edge was already present.
    pub fn add_edge(&mut self, a: Nid, b: Nid) -> Result<bool, GraphError> {
        let ka = self.kind(a)?;
        let kb = self.kind(b)?;
        if ka == kb {
            return Err(GraphError::NotBipartite(format!(
                "edge between two {:?} nodes: {} -- {}",
                ka,
                self.name(a)?,
                self.name(b)?
            )));
        }

        if !self.adjacency[a as usize].insert(b) {
            return Ok(false);
        }
        self.adjacency[b as usize].insert(a);
        self.edge_count += 1;
        Ok(true)
    }

    pub fn node_id(&self, name: &str) -> Option<Nid> {
        self.nodes.id(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.has(name)
    }

    pub fn name(&self, id: Nid) -> Result<&str, GraphError> {
        self.nodes.name(id).ok_or(GraphError::UnknownNode(id))
    }

    pub fn kind(&self, id: Nid) -> Result<NodeKind, GraphError> {
        self.kinds
            .get(id as usize)
            .copied()
            .ok_or(GraphError::UnknownNode(id))
    }

    pub fn neighbors(&self, id: Nid) -> Result<&HashSet<Nid>, GraphError> {
        self.adjacency
            .get(id as usize)
            .ok_or(GraphError::UnknownNode(id))
    }

    /// Number of distinct nodes this node is connected to.
    pub fn degree(&self, id: Nid) -> Result<usize, GraphError> {
        Ok(self.neighbors(id)?.len())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = Nid> + '_ {
        self.kinds
            .iter()
            .enumerate()
            .filter(move |(_, k)| **k == kind)
            .map(|(i, _)| i as Nid)
    }

    pub fn count_of_kind(&self, kind: NodeKind) -> usize {
        self.kinds.iter().filter(|k| **k == kind).count()
    }

    pub fn contains_edge(&self, a: Nid, b: Nid) -> bool {
        self.adjacency
            .get(a as usize)
            .map(|set| set.contains(&b))
            .unwrap_or(false)
    }

    /// Full scan of the edge set, confirming every edge joins a User to an
    /// Account and adjacency is symmetric. `add_edge` enforces this on
    /// insertion; exporters call this once more before writing anything.
    pub fn validate(&self) -> Result<(), GraphError> {
        for (i, neighbors) in self.adjacency.iter().enumerate() {
            let id = i as Nid;
            for &other in neighbors {
                if self.kind(id)? == self.kind(other)? {
                    return Err(GraphError::NotBipartite(format!(
                        "edge between two {:?} nodes: {} -- {}",
                        self.kind(id)?,
                        self.name(id)?,
                        self.name(other)?
                    )));
                }
                if !self.adjacency[other as usize].contains(&id) {
                    return Err(GraphError::NotBipartite(format!(
                        "asymmetric adjacency between {} and {}",
                        self.name(id)?,
                        self.name(other)?
                    )));
                }
            }
        }
        debug!(
            "validated graph: {} nodes, {} edges",
            self.node_count(),
            self.edge_count
        );
        Ok(())
    }
}

impl Default for BipartiteGraph {
    fn default() -> Self {
        Self::new()
    }
}
