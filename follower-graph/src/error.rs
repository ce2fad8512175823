use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum GraphError {
    KindConflict(String),
    NotBipartite(String),
    UnknownNode(u64),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::KindConflict(msg) => write!(f, "Node kind conflict: {}", msg),
            Self::NotBipartite(msg) => write!(f, "Bipartite invariant violated: {}", msg),
            Self::UnknownNode(id) => write!(f, "Unknown node id: {}", id),
        }
    }
}

impl Error for GraphError {}
