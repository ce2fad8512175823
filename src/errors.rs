use std::error::Error;
use std::fmt;

use follower_graph::GraphError;

#[derive(Debug)]
pub enum PipelineError {
    /// Settings could not be loaded or deserialized.
    Config(config::ConfigError),
    /// A follower-list file is missing, malformed, or unreadable.
    Data(String),
    /// A big account's unseen-follower pool is smaller than the configured
    /// sample size and short samples are not allowed.
    Sampling(String),
    /// Bipartite invariant or node-kind violation; signals a builder bug.
    Graph(GraphError),
    Io(std::io::Error),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "Config error: {}", err),
            Self::Data(msg) => write!(f, "Data error: {}", msg),
            Self::Sampling(msg) => write!(f, "Sampling error: {}", msg),
            Self::Graph(err) => write!(f, "Graph invariant error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl Error for PipelineError {}

impl From<config::ConfigError> for PipelineError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<GraphError> for PipelineError {
    fn from(err: GraphError) -> Self {
        Self::Graph(err)
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
