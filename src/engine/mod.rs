//! The transport engine seam.
//!
//! A [`TransportEngine`] is the peer-to-peer stack a session negotiates on
//! behalf of: it generates descriptions, gathers candidates and runs
//! connectivity checks. The session never reaches into it beyond this
//! trait. Everything the engine observes asynchronously is pushed back as
//! an [`EngineEvent`] through the [`EngineEventSender`] it was created with.

pub mod peer_connection_state;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::configuration::{RTCConfiguration, RTCConstraints};
use crate::error::Result;
use crate::ice_transport::ice_candidate::RTCIceCandidate;
use crate::ice_transport::ice_connection_state::RTCIceConnectionState;
use crate::ice_transport::ice_gathering_state::RTCIceGatheringState;
use crate::media_stream::MediaStream;
use crate::sdp::session_description::RTCSessionDescription;
use peer_connection_state::RTCPeerConnectionState;

/// EngineEvent is everything a transport engine reports on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A freshly gathered local candidate, or `None` once gathering for
    /// the current local description is over.
    IceCandidate(Option<RTCIceCandidate>),
    IceConnectionStateChange(RTCIceConnectionState),
    PeerConnectionStateChange(RTCPeerConnectionState),
    /// A remote stream was added; carries the stream id.
    StreamAdded(String),
    /// A remote stream was removed; carries the stream id.
    StreamRemoved(String),
}

pub type EngineEventSender = mpsc::UnboundedSender<EngineEvent>;
pub(crate) type EngineEventReceiver = mpsc::UnboundedReceiver<EngineEvent>;

#[async_trait]
pub trait TransportEngine: Send + Sync {
    async fn create_offer(&self) -> Result<RTCSessionDescription>;

    async fn create_answer(&self, constraints: &RTCConstraints) -> Result<RTCSessionDescription>;

    async fn set_local_description(&self, desc: RTCSessionDescription) -> Result<()>;

    async fn set_remote_description(&self, desc: RTCSessionDescription) -> Result<()>;

    /// local_description returns the currently installed local description
    /// including every candidate gathered so far.
    async fn local_description(&self) -> Option<RTCSessionDescription>;

    /// add_stream attaches a local stream. Attachment is all-or-nothing:
    /// on error nothing of the stream is left on the engine.
    fn add_stream(
        &self,
        stream: Arc<dyn MediaStream>,
        constraints: Option<&RTCConstraints>,
    ) -> Result<()>;

    async fn close(&self) -> Result<()>;

    fn ice_gathering_state(&self) -> RTCIceGatheringState;

    fn ice_connection_state(&self) -> RTCIceConnectionState;
}

/// TransportEngineFactory creates the single engine a session owns for its
/// whole lifetime.
pub trait TransportEngineFactory: Send + Sync {
    fn new_engine(
        &self,
        configuration: &RTCConfiguration,
        events: EngineEventSender,
    ) -> Result<Arc<dyn TransportEngine>>;
}

impl<F> TransportEngineFactory for F
where
    F: Fn(&RTCConfiguration, EngineEventSender) -> Result<Arc<dyn TransportEngine>> + Send + Sync,
{
    fn new_engine(
        &self,
        configuration: &RTCConfiguration,
        events: EngineEventSender,
    ) -> Result<Arc<dyn TransportEngine>> {
        self(configuration, events)
    }
}

pub(crate) fn event_channel() -> (EngineEventSender, EngineEventReceiver) {
    mpsc::unbounded_channel()
}
