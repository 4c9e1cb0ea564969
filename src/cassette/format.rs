//! On-disk cassette format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session: every port call made while recording, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable session name.
    pub name: String,
    /// When the recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Recorded interactions.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Global sequence number across all ports.
    pub seq: u64,
    /// Port name, e.g. `"translator"`.
    pub port: String,
    /// Method name, e.g. `"translate"`.
    pub method: String,
    /// Serialized request.
    pub input: serde_json::Value,
    /// Serialized `{"Ok": ..}` or `{"Err": ".."}` result.
    pub output: serde_json::Value,
}
