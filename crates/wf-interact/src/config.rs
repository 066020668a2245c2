//! Configuration for the interaction layer.

use wf_mechanics::DEFAULT_MAX_CHAIN_DEPTH;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Hard ceiling for encoded tokens, in characters.
    pub token_limit: usize,
    /// Maximum number of autocomplete suggestions.
    pub autocomplete_limit: usize,
    /// Maximum depth of chained oracle rolls.
    pub max_chain_depth: usize,
    /// RNG seed; `None` seeds the dice from the operating system.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            token_limit: 100,
            autocomplete_limit: 25,
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Set the token length ceiling.
    pub fn with_token_limit(mut self, limit: usize) -> Self {
        self.token_limit = limit;
        self
    }

    /// Set the autocomplete limit (at least 1).
    pub fn with_autocomplete_limit(mut self, limit: usize) -> Self {
        self.autocomplete_limit = limit.max(1);
        self
    }

    /// Set the chained roll depth limit.
    pub fn with_max_chain_depth(mut self, depth: usize) -> Self {
        self.max_chain_depth = depth;
        self
    }

    /// Set the RNG seed for reproducible rolls.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
