use crate::config::default_base_url;

use serde::{Deserialize, Serialize};

/// Studio backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the backend REST API, including the version prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}
