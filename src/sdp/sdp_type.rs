use std::fmt;

use serde::{Deserialize, Serialize};

/// RTCSdpType describes the role of a session description in an
/// offer/answer exchange.
///
/// [W3C]: https://w3c.github.io/webrtc-pc/#dom-rtcsessiondescription-type
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum RTCSdpType {
    #[default]
    Unspecified = 0,

    #[serde(rename = "offer")]
    Offer,

    /// A provisional answer, may be followed by a final one.
    #[serde(rename = "pranswer")]
    Pranswer,

    #[serde(rename = "answer")]
    Answer,

    /// Cancels the current negotiation and returns to the last stable
    /// state.
    #[serde(rename = "rollback")]
    Rollback,
}

const SDP_TYPE_OFFER_STR: &str = "offer";
const SDP_TYPE_PRANSWER_STR: &str = "pranswer";
const SDP_TYPE_ANSWER_STR: &str = "answer";
const SDP_TYPE_ROLLBACK_STR: &str = "rollback";

impl From<&str> for RTCSdpType {
    fn from(raw: &str) -> Self {
        match raw {
            SDP_TYPE_OFFER_STR => RTCSdpType::Offer,
            SDP_TYPE_PRANSWER_STR => RTCSdpType::Pranswer,
            SDP_TYPE_ANSWER_STR => RTCSdpType::Answer,
            SDP_TYPE_ROLLBACK_STR => RTCSdpType::Rollback,
            _ => RTCSdpType::Unspecified,
        }
    }
}

impl fmt::Display for RTCSdpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCSdpType::Offer => SDP_TYPE_OFFER_STR,
            RTCSdpType::Pranswer => SDP_TYPE_PRANSWER_STR,
            RTCSdpType::Answer => SDP_TYPE_ANSWER_STR,
            RTCSdpType::Rollback => SDP_TYPE_ROLLBACK_STR,
            RTCSdpType::Unspecified => crate::UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sdp_type_round_trip_through_str() {
        for sdp_type in [
            RTCSdpType::Offer,
            RTCSdpType::Pranswer,
            RTCSdpType::Answer,
            RTCSdpType::Rollback,
        ] {
            assert_eq!(RTCSdpType::from(sdp_type.to_string().as_str()), sdp_type);
        }

        assert_eq!(RTCSdpType::from("OFFER"), RTCSdpType::Unspecified);
        assert_eq!(RTCSdpType::Unspecified.to_string(), crate::UNSPECIFIED_STR);
    }
}
