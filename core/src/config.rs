use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::ExecutionPolicy;

pub const DEFAULT_SHARD_COUNT: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Shards in the relevance accumulator used by parallel ranking.
    pub shard_count: usize,
    /// Policy used by operations that take no explicit policy.
    pub execution: ExecutionPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { shard_count: DEFAULT_SHARD_COUNT, execution: ExecutionPolicy::Sequential }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.shard_count == 0 {
            return Err(SearchError::invalid("shard_count must be positive"));
        }
        Ok(())
    }
}
