use serde::{Deserialize, Serialize};

/// Connection settings for the remote inference endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// URL receiving `{"prompt", "context"}` POSTs.
    pub endpoint_url: String,
    /// Whole-request timeout in seconds. An unresponsive endpoint fails the
    /// turn instead of hanging it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

impl InferenceConfig {
    /// Config for `endpoint_url` with the default timeout.
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
