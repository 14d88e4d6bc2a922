//! Local media streams and the collaborator that acquires them.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// MediaStream is a handle to captured local media. The session owns the
/// stream once acquired and stops it on teardown.
pub trait MediaStream: Send + Sync {
    fn id(&self) -> String;

    /// stop releases the capture devices backing this stream.
    fn stop(&self);
}

/// MediaStreamConstraints selects which capture devices get_user_media
/// should open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaStreamConstraints {
    pub audio: bool,
    pub video: bool,
}

impl Default for MediaStreamConstraints {
    fn default() -> Self {
        MediaStreamConstraints {
            audio: true,
            video: true,
        }
    }
}

impl MediaStreamConstraints {
    pub fn audio_only() -> Self {
        MediaStreamConstraints {
            audio: true,
            video: false,
        }
    }
}

/// UserMediaProvider requests access to local capture devices.
/// Failures such as a denied permission or a missing device are terminal
/// for the call.
#[async_trait]
pub trait UserMediaProvider: Send + Sync {
    async fn get_user_media(
        &self,
        constraints: &MediaStreamConstraints,
    ) -> Result<Arc<dyn MediaStream>>;
}
