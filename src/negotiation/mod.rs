
pub mod completion_latch;
pub(crate) mod driver;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, error, trace, warn};
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};

use crate::configuration::{RTCConfiguration, RTCConstraints};
use crate::engine::{event_channel, EngineEvent, TransportEngine, TransportEngineFactory};
use crate::error::{Error, Result};
use crate::ice_transport::ice_connection_state::RTCIceConnectionState;
use crate::ice_transport::ice_gathering_state::RTCIceGatheringState;
use crate::media_stream::{MediaStream, MediaStreamConstraints, UserMediaProvider};
use crate::sdp::sdp_type::RTCSdpType;
use crate::sdp::session_description::RTCSessionDescription;
use completion_latch::CompletionLatch;
use driver::{DriverMessage, DriverSender, SessionDriver};

/// NegotiationSession drives SDP offer/answer for one media session on top
/// of a [`TransportEngine`] it exclusively owns.
///
/// A locally generated description is only handed out once ICE gathering
/// is over, so the returned SDP carries every local candidate. Offer and
/// answer requests on one session must be serialized by the caller.
pub struct NegotiationSession {
    pub(crate) internal: Arc<SessionInternal>,
}

pub(crate) struct SessionInternal {
    pub(crate) id: String,
    pub(crate) engine: Arc<dyn TransportEngine>,
    pub(crate) answer_constraints: RTCConstraints,
    pub(crate) user_media: Option<Arc<dyn UserMediaProvider>>,
    pub(crate) local_media: Mutex<Option<Arc<dyn MediaStream>>>,
    pub(crate) latch: Mutex<CompletionLatch>,
    pub(crate) is_closed: AtomicBool,
    pub(crate) driver_tx: DriverSender,
}

impl NegotiationSession {
    /// new creates the engine through `factory` and starts the session
    /// driver. Must be called from within a tokio runtime.
    pub(crate) fn new(
        id: String,
        factory: &dyn TransportEngineFactory,
        configuration: RTCConfiguration,
        user_media: Option<Arc<dyn UserMediaProvider>>,
    ) -> Result<Self> {
        configuration.validate()?;

        let (events_tx, events_rx) = event_channel();
        let engine = factory.new_engine(&configuration, events_tx)?;
        let (driver_tx, driver_rx) = mpsc::unbounded_channel();

        let internal = Arc::new(SessionInternal {
            id,
            engine,
            answer_constraints: configuration.constraints,
            user_media,
            local_media: Mutex::new(None),
            latch: Mutex::new(CompletionLatch::new()),
            is_closed: AtomicBool::new(false),
            driver_tx,
        });

        let driver = SessionDriver::new(Arc::downgrade(&internal), events_rx, driver_rx);
        tokio::spawn(driver.event_loop());

        debug!(
            "[{}] session created with {} ice server(s)",
            internal.id,
            configuration.ice_servers.len()
        );

        Ok(NegotiationSession { internal })
    }

    pub fn id(&self) -> &str {
        &self.internal.id
    }

    /// create_offer generates an offer, installs it as the local description
    /// and resolves with the local SDP once ICE gathering completed.
    ///
    /// If the engine never signals completion the returned future never
    /// resolves; callers impose their own deadline and close the session.
    pub async fn create_offer(&self) -> Result<String> {
        self.internal.ensure_open()?;

        let offer = match self.internal.engine.create_offer().await {
            Ok(offer) => offer,
            Err(err) => {
                error!("[{}] unable to create offer: {}", self.internal.id, err);
                return Err(err);
            }
        };

        self.complete_local_description(offer).await
    }

    /// create_answer is create_offer's counterpart for an applied remote
    /// offer, using the answer constraints the session was configured with.
    pub async fn create_answer(&self) -> Result<String> {
        let constraints = self.internal.answer_constraints.clone();
        self.create_answer_with(&constraints).await
    }

    /// create_answer_with overrides the configured answer constraints.
    pub async fn create_answer_with(&self, constraints: &RTCConstraints) -> Result<String> {
        self.internal.ensure_open()?;

        let answer = match self.internal.engine.create_answer(constraints).await {
            Ok(answer) => answer,
            Err(err) => {
                error!("[{}] unable to create answer: {}", self.internal.id, err);
                return Err(err);
            }
        };

        self.complete_local_description(answer).await
    }

    /// set_local_description installs a generated description. A failure is
    /// logged and returned; no completion is awaited for it.
    pub async fn set_local_description(&self, desc: RTCSessionDescription) -> Result<()> {
        self.internal.ensure_open()?;

        if let Err(err) = self.internal.engine.set_local_description(desc).await {
            error!(
                "[{}] unable to set local description: {}",
                self.internal.id, err
            );
            return Err(err);
        }

        Ok(())
    }

    /// on_message applies a remote description received from signaling.
    /// Engine failures are returned verbatim and never retried.
    pub async fn on_message(&self, sdp_type: RTCSdpType, body: impl Into<String>) -> Result<()> {
        self.internal.ensure_open()?;

        let desc = RTCSessionDescription::new(sdp_type, body);
        trace!("[{}] applying remote {}", self.internal.id, desc.sdp_type);

        self.internal.engine.set_remote_description(desc).await
    }

    /// add_stream attaches a local stream so subsequent offers and answers
    /// include it.
    pub fn add_stream(
        &self,
        stream: Arc<dyn MediaStream>,
        constraints: Option<&RTCConstraints>,
    ) -> Result<()> {
        self.internal.ensure_open()?;

        let stream_id = stream.id();
        if let Err(err) = self.internal.engine.add_stream(stream, constraints) {
            error!(
                "[{}] error adding stream {}: {}",
                self.internal.id, stream_id, err
            );
            return Err(err);
        }

        debug!("[{}] local stream {} attached", self.internal.id, stream_id);
        Ok(())
    }

    /// get_user_media acquires local capture devices. On success the stream
    /// becomes the session's local media and is stopped on close. The cause
    /// of a failure is only logged.
    pub async fn get_user_media(
        &self,
        constraints: &MediaStreamConstraints,
    ) -> Result<Arc<dyn MediaStream>> {
        self.internal.ensure_open()?;

        let provider = self
            .internal
            .user_media
            .as_ref()
            .ok_or(Error::ErrNoUserMediaProvider)?;

        debug!("[{}] requesting access to local media", self.internal.id);

        match provider.get_user_media(constraints).await {
            Ok(stream) => {
                debug!(
                    "[{}] got local media stream {}",
                    self.internal.id,
                    stream.id()
                );
                *self.internal.local_media.lock() = Some(Arc::clone(&stream));
                Ok(stream)
            }
            Err(err) => {
                error!("[{}] unable to get user media: {}", self.internal.id, err);
                Err(Error::ErrGetUserMedia)
            }
        }
    }

    /// close tears down the engine, then stops the local media. Calling it
    /// again is a no-op. A negotiation still waiting for gathering resolves
    /// with [`Error::ErrSessionClosed`].
    pub async fn close(&self) -> Result<()> {
        if self.internal.is_closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        debug!("[{}] closing PeerConnection", self.internal.id);

        if self.internal.latch.lock().disarm() {
            trace!("[{}] pending negotiation abandoned", self.internal.id);
        }
        let _ = self.internal.driver_tx.send(DriverMessage::Shutdown);

        let result = self.internal.engine.close().await;
        if let Err(err) = &result {
            warn!(
                "[{}] failed to close transport engine: {}",
                self.internal.id, err
            );
        }

        let local_media = self.internal.local_media.lock().clone();
        if let Some(stream) = local_media {
            stream.stop();
        }

        result
    }

    pub fn is_closed(&self) -> bool {
        self.internal.is_closed.load(Ordering::SeqCst)
    }

    /// local_description returns the engine's current local description,
    /// which may still be missing candidates while gathering runs.
    pub async fn local_description(&self) -> Option<RTCSessionDescription> {
        self.internal.engine.local_description().await
    }

    pub fn local_media(&self) -> Option<Arc<dyn MediaStream>> {
        self.internal.local_media.lock().clone()
    }

    pub fn ice_gathering_state(&self) -> RTCIceGatheringState {
        self.internal.engine.ice_gathering_state()
    }

    pub fn ice_connection_state(&self) -> RTCIceConnectionState {
        self.internal.engine.ice_connection_state()
    }

    async fn complete_local_description(&self, desc: RTCSessionDescription) -> Result<String> {
        // armed before the install so end-of-candidates raised during it is kept
        let (round, gathered) = self.internal.arm_completion_latch()?;

        if let Err(err) = self.set_local_description(desc).await {
            self.internal.disarm_round(round);
            return Err(err);
        }

        self.internal.check_gathering_complete(round);

        if gathered.await.is_err() {
            return Err(if self.is_closed() {
                Error::ErrSessionClosed
            } else {
                Error::ErrNegotiationSuperseded
            });
        }

        // read after the latch fired so late candidates are included
        let local = self
            .internal
            .engine
            .local_description()
            .await
            .ok_or(Error::ErrNoLocalDescription)?;

        Ok(local.sdp)
    }
}

impl SessionInternal {
    fn ensure_open(&self) -> Result<()> {
        if self.is_closed.load(Ordering::SeqCst) {
            return Err(Error::ErrSessionClosed);
        }
        Ok(())
    }

    /// arm_completion_latch starts a new negotiation round and returns its
    /// number with the receiver resolved when the latch fires. Fails once
    /// the session is closed.
    fn arm_completion_latch(&self) -> Result<(u64, oneshot::Receiver<()>)> {
        let (done_tx, done_rx) = oneshot::channel();

        let mut latch = self.latch.lock();
        // checked under the latch lock, close disarms under the same lock
        self.ensure_open()?;

        let (round, replaced) = latch.arm(Box::new(move || {
            let _ = done_tx.send(());
        }));
        drop(latch);

        if replaced {
            warn!(
                "[{}] negotiation round {} superseded an unfinished round",
                self.id, round
            );
        }
        trace!("[{}] completion latch armed for round {}", self.id, round);

        Ok((round, done_rx))
    }

    /// disarm_round drops the callback of `round` unless a newer round
    /// already replaced it.
    fn disarm_round(&self, round: u64) {
        let mut latch = self.latch.lock();
        if latch.round() == round && latch.disarm() {
            trace!("[{}] completion latch for round {} disarmed", self.id, round);
        }
    }

    /// check_gathering_complete runs after the local description of `round`
    /// is installed. If gathering is already complete on a connected engine
    /// the trigger is posted to the driver instead of firing in place.
    fn check_gathering_complete(&self, round: u64) {
        if self.engine.ice_gathering_state().is_complete()
            && self.engine.ice_connection_state() == RTCIceConnectionState::Connected
        {
            trace!(
                "[{}] gathering already complete, deferring round {}",
                self.id,
                round
            );
            let _ = self
                .driver_tx
                .send(DriverMessage::GatheringAlreadyComplete { round });
        }
    }

    fn trigger_completion(&self, reason: &str) {
        if self.latch.lock().trigger() {
            debug!("[{}] ICE gathering completed ({})", self.id, reason);
        } else {
            trace!("[{}] ignoring completion signal ({})", self.id, reason);
        }
    }

    pub(crate) fn handle_gathering_already_complete(&self, round: u64) {
        let current = self.latch.lock().round();
        if current != round {
            trace!(
                "[{}] stale completion check for round {} (current {})",
                self.id,
                round,
                current
            );
            return;
        }
        self.trigger_completion("already complete");
    }

    pub(crate) fn handle_engine_event(&self, event: EngineEvent) {
        match event {
            EngineEvent::IceCandidate(Some(candidate)) => {
                debug!("[{}] ICE candidate received: {}", self.id, candidate);
            }
            EngineEvent::IceCandidate(None) => {
                self.trigger_completion("end of candidates");
            }
            EngineEvent::IceConnectionStateChange(state) => {
                debug!(
                    "[{}] ICE connection state changed to \"{}\"",
                    self.id, state
                );
                // a disconnect is only reported, the session stays up
                if self.engine.ice_gathering_state().is_complete()
                    && self.engine.ice_connection_state() != RTCIceConnectionState::Closed
                {
                    self.trigger_completion("ice connection state change");
                }
            }
            EngineEvent::PeerConnectionStateChange(state) => {
                debug!(
                    "[{}] PeerConnection state changed to \"{}\"",
                    self.id, state
                );
            }
            EngineEvent::StreamAdded(stream_id) => {
                debug!("[{}] stream added: {}", self.id, stream_id);
            }
            EngineEvent::StreamRemoved(stream_id) => {
                debug!("[{}] stream removed: {}", self.id, stream_id);
            }
        }
    }
}
