use serde::{Deserialize, Serialize};

use super::{RTCConfiguration, RTCConstraints};
use crate::error::Result;
use crate::ice_transport::ice_server::RTCIceServer;

/// TurnServer is a TURN relay as it appears in user agent configuration.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnServer {
    pub urls: Vec<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl From<&TurnServer> for RTCIceServer {
    fn from(server: &TurnServer) -> Self {
        RTCIceServer {
            urls: server.urls.clone(),
            username: server.username.clone(),
            credential: server.password.clone(),
        }
    }
}

/// ServerListConfig is the ambient server list of the user agent, used
/// whenever a session does not bring its own.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerListConfig {
    pub stun_servers: Vec<String>,
    pub turn_servers: Vec<TurnServer>,
}

impl ServerListConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// MediaHandlerOptions are the per-session options. Any server list left
/// as `None` falls back to the ambient [`ServerListConfig`].
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaHandlerOptions {
    #[serde(rename = "RTCConstraints")]
    pub rtc_constraints: RTCConstraints,
    pub stun_servers: Option<Vec<String>>,
    pub turn_servers: Option<Vec<TurnServer>>,
}

impl MediaHandlerOptions {
    /// ice_servers resolves the server list: all STUN urls share one entry,
    /// each TURN server gets its own entry carrying its credentials.
    pub fn ice_servers(&self, ambient: &ServerListConfig) -> Vec<RTCIceServer> {
        let stun_servers = self
            .stun_servers
            .as_ref()
            .unwrap_or(&ambient.stun_servers);
        let turn_servers = self
            .turn_servers
            .as_ref()
            .unwrap_or(&ambient.turn_servers);

        let mut servers = Vec::with_capacity(turn_servers.len() + 1);
        if !stun_servers.is_empty() {
            servers.push(RTCIceServer {
                urls: stun_servers.clone(),
                ..Default::default()
            });
        }
        servers.extend(turn_servers.iter().map(RTCIceServer::from));

        servers
    }

    /// configuration builds the engine configuration for these options
    pub fn configuration(&self, ambient: &ServerListConfig) -> RTCConfiguration {
        RTCConfiguration {
            ice_servers: self.ice_servers(ambient),
            constraints: self.rtc_constraints.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ambient() -> ServerListConfig {
        ServerListConfig {
            stun_servers: vec!["stun:stun.ambient.example.org".to_owned()],
            turn_servers: vec![TurnServer {
                urls: vec!["turn:turn.ambient.example.org".to_owned()],
                username: "alice".to_owned(),
                password: "secret".to_owned(),
            }],
        }
    }

    #[test]
    fn test_ice_servers_fall_back_to_ambient() {
        let servers = MediaHandlerOptions::default().ice_servers(&ambient());

        assert_eq!(
            servers,
            vec![
                RTCIceServer {
                    urls: vec!["stun:stun.ambient.example.org".to_owned()],
                    ..Default::default()
                },
                RTCIceServer {
                    urls: vec!["turn:turn.ambient.example.org".to_owned()],
                    username: "alice".to_owned(),
                    credential: "secret".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_ice_servers_explicit_override() {
        let options = MediaHandlerOptions {
            stun_servers: Some(vec![
                "stun:a.example.org".to_owned(),
                "stun:b.example.org".to_owned(),
            ]),
            turn_servers: Some(vec![]),
            ..Default::default()
        };

        let servers = options.ice_servers(&ambient());
        assert_eq!(servers.len(), 1);
        assert_eq!(
            servers[0].urls,
            vec!["stun:a.example.org".to_owned(), "stun:b.example.org".to_owned()]
        );
    }

    #[test]
    fn test_ice_servers_empty_stun_list_is_omitted() {
        let options = MediaHandlerOptions {
            stun_servers: Some(vec![]),
            ..Default::default()
        };

        let servers = options.ice_servers(&ambient());
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].username, "alice");
    }

    #[test]
    fn test_server_list_from_json() {
        let config = ServerListConfig::from_json(
            r#"{
                "stun_servers": ["stun:stun.ambient.example.org"],
                "turn_servers": [
                    {"urls": ["turn:turn.ambient.example.org"], "username": "alice", "password": "secret"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config, ambient());

        assert!(ServerListConfig::from_json("{\"stun_servers\": 1}").is_err());
        assert_eq!(
            ServerListConfig::from_json("{}").unwrap(),
            ServerListConfig::default()
        );
    }

    #[test]
    fn test_options_json() {
        let options: MediaHandlerOptions = serde_json::from_str(
            r#"{"RTCConstraints": {"optional": [{"DtlsSrtpKeyAgreement": true}]}, "stun_servers": ["stun:x.example.org"]}"#,
        )
        .unwrap();

        assert_eq!(
            options.rtc_constraints,
            RTCConstraints::default().with_optional("DtlsSrtpKeyAgreement", true)
        );
        assert_eq!(options.stun_servers, Some(vec!["stun:x.example.org".to_owned()]));
        assert_eq!(options.turn_servers, None);

        let config = options.configuration(&ServerListConfig::default());
        assert_eq!(config.ice_servers.len(), 1);
        assert_eq!(config.constraints, options.rtc_constraints);
    }
}
