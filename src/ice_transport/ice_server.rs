use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

const SCHEME_STUN: &str = "stun";
const SCHEME_STUNS: &str = "stuns";
const SCHEME_TURN: &str = "turn";
const SCHEME_TURNS: &str = "turns";

/// RTCIceServer describes a single STUN and TURN server that can be used by
/// the transport engine to gather candidates.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RTCIceServer {
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub credential: String,
}

impl RTCIceServer {
    pub(crate) fn validate(&self) -> Result<()> {
        self.urls()?;
        Ok(())
    }

    /// urls parses every configured url. TURN urls are only accepted when
    /// both a username and a credential are present.
    pub(crate) fn urls(&self) -> Result<Vec<Url>> {
        let mut urls = vec![];

        for url_str in &self.urls {
            let url = Url::parse(url_str)?;
            match url.scheme() {
                SCHEME_STUN | SCHEME_STUNS => {}
                SCHEME_TURN | SCHEME_TURNS => {
                    // https://www.w3.org/TR/webrtc/#set-the-configuration (step #11.3.2)
                    if self.username.is_empty() || self.credential.is_empty() {
                        return Err(Error::ErrNoTurnCredentials);
                    }
                }
                _ => return Err(Error::ErrInvalidIceServerUrl(url_str.clone())),
            }

            urls.push(url);
        }

        Ok(urls)
    }
}
