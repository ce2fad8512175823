mod error;
mod graph;
mod node_table;

pub use error::GraphError;
pub use graph::{BipartiteGraph, NodeKind};
pub use node_table::{NodeTable, Nid};
