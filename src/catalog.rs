use log::{debug, info};

use crate::errors::PipelineError;
use crate::source::FollowerSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Small,
    Big,
}

/// One account as seen by the catalog scan. Derived once from the full
/// listing and immutable afterwards.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub name: String,
    pub follower_count: usize,
    pub tier: Tier,
}

/// The full account listing with near-isolated accounts dropped, sorted by
/// ascending follower count and partitioned into size tiers.
///
/// Accounts with `follower_count <= min_followers` are excluded from every
/// later stage: they add little statistical signal and leaving them out keeps
/// the graph connected.
pub struct AccountCatalog {
    records: Vec<AccountRecord>,
}

impl AccountCatalog {
    pub fn scan(
        source: &dyn FollowerSource,
        min_followers: usize,
        big_threshold: usize,
    ) -> Result<Self, PipelineError> {
        let accounts = source.list()?;
        let total = accounts.len();
        info!("Counting followers for {} account files", total);

        let mut records = Vec::new();
        for (i, name) in accounts.into_iter().enumerate() {
            if (i + 1) % 10 == 0 {
                debug!("\t {}/{}", i + 1, total);
            }
            let n = source.followers(&name)?.len();
            if n <= min_followers {
                continue;
            }
            let tier = if n >= big_threshold { Tier::Big } else { Tier::Small };
            records.push(AccountRecord {
                name,
                follower_count: n,
                tier,
            });
        }

        // Ascending follower count; name breaks ties deterministically.
        records.sort_by(|a, b| {
            a.follower_count
                .cmp(&b.follower_count)
                .then_with(|| a.name.cmp(&b.name))
        });

        let catalog = Self { records };
        info!(
            "Catalog: {} accounts kept ({} small, {} big)",
            catalog.records.len(),
            catalog.small().count(),
            catalog.big().count()
        );
        Ok(catalog)
    }

    pub fn small(&self) -> impl Iterator<Item = &AccountRecord> {
        self.records.iter().filter(|r| r.tier == Tier::Small)
    }

    pub fn big(&self) -> impl Iterator<Item = &AccountRecord> {
        self.records.iter().filter(|r| r.tier == Tier::Big)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
