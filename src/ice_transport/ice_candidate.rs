use std::fmt;

use serde::{Deserialize, Serialize};

/// RTCIceCandidate is a local candidate as reported by the transport engine
/// while gathering. The candidate line is opaque to the session; it is only
/// logged, the engine appends it to the local description itself.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RTCIceCandidate {
    pub candidate: String,
    pub sdp_mid: Option<String>,
    #[serde(rename = "sdpMLineIndex")]
    pub sdp_mline_index: Option<u16>,
    pub username_fragment: Option<String>,
}

impl RTCIceCandidate {
    pub fn new(candidate: impl Into<String>) -> Self {
        RTCIceCandidate {
            candidate: candidate.into(),
            ..Default::default()
        }
    }
}

impl fmt::Display for RTCIceCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.candidate)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ice_candidate_json() {
        let c = RTCIceCandidate {
            candidate: "candidate:1 1 udp 2130706431 10.0.0.1 5000 typ host".to_owned(),
            sdp_mid: Some("0".to_owned()),
            sdp_mline_index: Some(0),
            username_fragment: None,
        };

        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(
            json,
            r#"{"candidate":"candidate:1 1 udp 2130706431 10.0.0.1 5000 typ host","sdpMid":"0","sdpMLineIndex":0,"usernameFragment":null}"#
        );

        let parsed: RTCIceCandidate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, c);
        assert_eq!(
            parsed.to_string(),
            "candidate:1 1 udp 2130706431 10.0.0.1 5000 typ host"
        );
    }
}
