use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::errors::PipelineError;

const FOLLOWER_COLUMN: &str = "follower_id";

/// The seam to the (out-of-scope) follower-acquisition collaborator: given an
/// account identifier, return its deduplicated follower identifiers as a
/// finite sequence. Pagination, credential rotation and retries all live
/// behind this trait.
pub trait FollowerSource {
    /// Account identifiers available from this source, in a deterministic
    /// order.
    fn list(&self) -> Result<Vec<String>, PipelineError>;

    /// Follower identifiers of one account, deduplicated, in first-seen
    /// order. An empty list is not an error.
    fn followers(&self, account: &str) -> Result<Vec<String>, PipelineError>;
}

/// Directory of per-account follower files: `<account>.csv`, a header row
/// naming the `follower_id` column, one follower identifier per line.
pub struct FollowerDir {
    dir: PathBuf,
}

impl FollowerDir {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn file_for(&self, account: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", account))
    }
}

impl FollowerSource for FollowerDir {
    fn list(&self) -> Result<Vec<String>, PipelineError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            PipelineError::Data(format!("cannot read directory {}: {}", self.dir.display(), e))
        })?;

        let mut accounts = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                accounts.push(stem.to_string());
            }
        }
        accounts.sort_unstable();
        Ok(accounts)
    }

    fn followers(&self, account: &str) -> Result<Vec<String>, PipelineError> {
        let path = self.file_for(account);
        let file = File::open(&path).map_err(|e| {
            PipelineError::Data(format!("cannot open {}: {}", path.display(), e))
        })?;
        let mut lines = BufReader::new(file).lines();

        let header = match lines.next() {
            Some(line) => line?,
            // A zero-byte file has no header and no followers.
            None => return Ok(Vec::new()),
        };
        let column = header
            .split(',')
            .position(|field| field.trim() == FOLLOWER_COLUMN)
            .ok_or_else(|| {
                PipelineError::Data(format!(
                    "{}: header has no '{}' column",
                    path.display(),
                    FOLLOWER_COLUMN
                ))
            })?;

        let mut seen = HashSet::new();
        let mut followers = Vec::new();
        for line in lines {
            let line = line?;
            let id = match line.split(',').nth(column) {
                Some(field) => field.trim(),
                None => {
                    return Err(PipelineError::Data(format!(
                        "{}: row with too few columns: {:?}",
                        path.display(),
                        line
                    )))
                }
            };
            if id.is_empty() {
                continue;
            }
            if seen.insert(id.to_string()) {
                followers.push(id.to_string());
            }
        }
        Ok(followers)
    }
}
