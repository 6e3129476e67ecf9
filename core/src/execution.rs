use serde::{Deserialize, Serialize};

/// How independent sub-computations of a call are fanned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    /// Fan out on the global rayon pool.
    Parallel,
}

impl ExecutionPolicy {
    pub fn is_parallel(self) -> bool { self == ExecutionPolicy::Parallel }
}
