//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Horizons and limits used when evaluating a request.
///
/// Missing fields in a serialized config fall back to [`EngineConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Days searched before the requested start.
    pub lookback_days: u32,
    /// Days searched after the requested end (the request length is added on top).
    pub lookforward_days: u32,
    /// Upper bound on suggestions returned with a rejection.
    pub max_suggestions: usize,
}

impl EngineConfig {
    pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;
    pub const DEFAULT_LOOKFORWARD_DAYS: u32 = 180;
    pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookback_days: Self::DEFAULT_LOOKBACK_DAYS,
            lookforward_days: Self::DEFAULT_LOOKFORWARD_DAYS,
            max_suggestions: Self::DEFAULT_MAX_SUGGESTIONS,
        }
    }
}
