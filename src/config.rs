use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Tuning constants of the graph construction. The defaults are the values
/// used by the original media/politician follower study; override them in
/// `config/local` or with `FM_`-prefixed environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Accounts with at most this many followers are excluded entirely.
    pub min_followers: usize,
    /// Accounts at or above this follower count go to the sampling tier.
    pub big_account_threshold: usize,
    /// Users must follow more than this many small accounts to be carried
    /// into the combined graph.
    pub engagement_threshold: usize,
    /// Unseen followers sampled per big account.
    pub sample_size: usize,
    /// Minimum follower count for augmentation-tier accounts.
    pub augment_min_followers: usize,
    /// When a big account has fewer unseen followers than `sample_size`,
    /// take them all instead of failing the run.
    pub allow_short_sample: bool,
    /// Pin the sampling RNG for reproducible runs.
    #[serde(default)]
    pub sample_seed: Option<u64>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut s = Config::builder();

        s = s
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        s = s.set_default("min_followers", 250)?;
        s = s.set_default("big_account_threshold", 100_000)?;
        s = s.set_default("engagement_threshold", 10)?;
        s = s.set_default("sample_size", 400)?;
        s = s.set_default("augment_min_followers", 250)?;
        s = s.set_default("allow_short_sample", false)?;

        // Add in settings from environment
        s = s.add_source(Environment::with_prefix("FM"));

        let config = s.build()?;
        config.try_deserialize()
    }
}
