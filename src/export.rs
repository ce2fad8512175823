use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use follower_graph::{BipartiteGraph, GraphError, Nid, NodeKind};
use log::info;

use crate::errors::PipelineError;

/// The user-by-account rectangle of the graph's adjacency matrix in
/// compressed-sparse-row form. The square form's user-user and
/// account-account blocks are structurally zero and never materialized.
pub struct BiadjacencyMatrix {
    /// User identifiers, one per matrix row.
    pub row_names: Vec<String>,
    /// Account identifiers, one per matrix column.
    pub col_names: Vec<String>,
    /// Row-start offsets into `indices`; length is row count + 1.
    pub pointers: Vec<usize>,
    /// Column indices of nonzero entries, row-major, ascending within a row.
    pub indices: Vec<usize>,
    /// All ones; the graph is unweighted.
    pub values: Vec<u64>,
}

/// Partitions the node set by kind, fixes a lexicographic row/column order
/// (stable across runs), and extracts the rectangular biadjacency matrix.
pub fn extract(graph: &BipartiteGraph) -> Result<BiadjacencyMatrix, PipelineError> {
    graph.validate()?;

    let mut users = Vec::new();
    for id in graph.nodes_of_kind(NodeKind::User) {
        users.push((graph.name(id)?.to_string(), id));
    }
    users.sort_by(|a, b| a.0.cmp(&b.0));

    let mut accounts = Vec::new();
    for id in graph.nodes_of_kind(NodeKind::Account) {
        accounts.push((graph.name(id)?.to_string(), id));
    }
    accounts.sort_by(|a, b| a.0.cmp(&b.0));

    let col_of: HashMap<Nid, usize> = accounts
        .iter()
        .enumerate()
        .map(|(col, (_, id))| (*id, col))
        .collect();

    let mut pointers = Vec::with_capacity(users.len() + 1);
    pointers.push(0);
    let mut indices = Vec::new();
    for (_, user) in &users {
        // Every neighbor of a user is an account per the validated invariant.
        let mut cols = Vec::new();
        for account in graph.neighbors(*user)? {
            let col = col_of
                .get(account)
                .copied()
                .ok_or(PipelineError::Graph(GraphError::UnknownNode(*account)))?;
            cols.push(col);
        }
        cols.sort_unstable();
        indices.extend(cols);
        pointers.push(indices.len());
    }
    let values = vec![1u64; indices.len()];

    Ok(BiadjacencyMatrix {
        row_names: users.into_iter().map(|(name, _)| name).collect(),
        col_names: accounts.into_iter().map(|(name, _)| name).collect(),
        pointers,
        indices,
        values,
    })
}

/// Writes the five flat text artifacts, keyed by country tag and run id.
/// If any write fails, files already written for this run are removed so a
/// failed run leaves no partial artifact set behind.
pub fn write_matrix(
    matrix: &BiadjacencyMatrix,
    out_dir: &Path,
    tag: &str,
    run: &str,
) -> Result<Vec<PathBuf>, PipelineError> {
    fs::create_dir_all(out_dir)?;

    let files = [
        (format!("{}-indices-{}.txt", tag, run), join_lines(&matrix.indices)),
        (format!("{}-pointers-{}.txt", tag, run), join_lines(&matrix.pointers)),
        (format!("{}-values-{}.txt", tag, run), join_lines(&matrix.values)),
        (format!("{}-rownames-{}.txt", tag, run), join_lines(&matrix.row_names)),
        (format!("{}-colnames-{}.txt", tag, run), join_lines(&matrix.col_names)),
    ];

    let mut written = Vec::new();
    for (name, content) in files {
        let path = out_dir.join(name);
        if let Err(e) = fs::write(&path, content) {
            for p in &written {
                let _ = fs::remove_file(p);
            }
            return Err(PipelineError::Io(e));
        }
        written.push(path);
    }

    info!(
        "Wrote {} users x {} accounts matrix ({} nonzero) to {}",
        matrix.row_names.len(),
        matrix.col_names.len(),
        matrix.indices.len(),
        out_dir.display()
    );
    Ok(written)
}

fn join_lines<T: Display>(items: &[T]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&item.to_string());
        out.push('\n');
    }
    out
}
