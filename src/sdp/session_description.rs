use serde::{Deserialize, Serialize};

use super::sdp_type::RTCSdpType;

/// RTCSessionDescription pairs an SDP body with its role in the exchange.
/// The body is never parsed here; it belongs to the transport engine.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RTCSessionDescription {
    #[serde(rename = "type")]
    pub sdp_type: RTCSdpType,

    pub sdp: String,
}

impl RTCSessionDescription {
    /// new builds a description of any type, e.g. from a signaling message
    pub fn new(sdp_type: RTCSdpType, sdp: impl Into<String>) -> Self {
        RTCSessionDescription {
            sdp_type,
            sdp: sdp.into(),
        }
    }

    pub fn offer(sdp: impl Into<String>) -> Self {
        Self::new(RTCSdpType::Offer, sdp)
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self::new(RTCSdpType::Answer, sdp)
    }

    pub fn pranswer(sdp: impl Into<String>) -> Self {
        Self::new(RTCSdpType::Pranswer, sdp)
    }
}
