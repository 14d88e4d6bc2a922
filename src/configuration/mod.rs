pub mod server_list;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::ice_transport::ice_server::RTCIceServer;

/// RTCConstraints is the legacy `{ mandatory, optional }` constraint set.
/// It is handed to the transport engine untouched; the session never
/// interprets individual keys.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RTCConstraints {
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub mandatory: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<Map<String, Value>>,
}

impl RTCConstraints {
    pub fn is_empty(&self) -> bool {
        self.mandatory.is_empty() && self.optional.is_empty()
    }

    /// with_mandatory adds or replaces a mandatory constraint
    pub fn with_mandatory(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.mandatory.insert(key.into(), value.into());
        self
    }

    /// with_optional appends a single-key optional constraint
    pub fn with_optional(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut entry = Map::new();
        entry.insert(key.into(), value.into());
        self.optional.push(entry);
        self
    }
}

/// RTCConfiguration is what the transport engine is constructed with:
/// the resolved ICE server list plus the engine constraints.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RTCConfiguration {
    /// Defines a slice describing servers available to be used by
    /// ICE, such as STUN and TURN servers.
    pub ice_servers: Vec<RTCIceServer>,

    /// Engine-specific tuning, passed through verbatim.
    pub constraints: RTCConstraints,
}

impl RTCConfiguration {
    pub(crate) fn validate(&self) -> Result<()> {
        for ice_server in &self.ice_servers {
            ice_server.validate()?;
        }
        Ok(())
    }
}
