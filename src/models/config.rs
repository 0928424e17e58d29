use serde::{Deserialize, Serialize};

/// Server-wide configuration shared with handlers through app data.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Secret used to verify bearer tokens.
    pub secret: String,
}
