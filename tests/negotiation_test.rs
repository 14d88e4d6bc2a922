//! Integration tests for NegotiationSession over a loopback engine

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;
use webrtc_media_handler::configuration::server_list::{
    MediaHandlerOptions, ServerListConfig, TurnServer,
};
use webrtc_media_handler::configuration::{RTCConfiguration, RTCConstraints};
use webrtc_media_handler::engine::{
    EngineEvent, EngineEventSender, TransportEngine,
};
use webrtc_media_handler::ice_transport::ice_candidate::RTCIceCandidate;
use webrtc_media_handler::ice_transport::ice_connection_state::RTCIceConnectionState;
use webrtc_media_handler::ice_transport::ice_gathering_state::RTCIceGatheringState;
use webrtc_media_handler::media_stream::MediaStream;
use webrtc_media_handler::sdp::sdp_type::RTCSdpType;
use webrtc_media_handler::sdp::session_description::RTCSessionDescription;
use webrtc_media_handler::{Error, Result, SessionBuilder};

const OFFER_SDP: &str = "v=0\r\no=- 7 2 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\nm=video 9 UDP/TLS/RTP/SAVPF 96\r\n";

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Default)]
struct LoopbackState {
    local: Option<RTCSessionDescription>,
    remote: Option<RTCSessionDescription>,
    gathering: RTCIceGatheringState,
    connection: RTCIceConnectionState,
}

/// LoopbackEngine gathers a single host candidate on request.
struct LoopbackEngine {
    configuration: RTCConfiguration,
    events: EngineEventSender,
    state: Mutex<LoopbackState>,
    installed: Notify,
}

impl LoopbackEngine {
    fn gather_host_candidate(&self, addr: &str) {
        let line = format!("candidate:1 1 udp 2130706431 {addr} 50000 typ host");
        {
            let mut state = self.state.lock();
            state.gathering = RTCIceGatheringState::Gathering;
            if let Some(local) = state.local.as_mut() {
                local.sdp.push_str(&format!("a={line}\r\n"));
            }
        }
        let _ = self
            .events
            .send(EngineEvent::IceCandidate(Some(RTCIceCandidate::new(line))));

        self.state.lock().gathering = RTCIceGatheringState::Complete;
        let _ = self.events.send(EngineEvent::IceCandidate(None));
    }
}

#[async_trait]
impl TransportEngine for LoopbackEngine {
    async fn create_offer(&self) -> Result<RTCSessionDescription> {
        Ok(RTCSessionDescription::offer(OFFER_SDP))
    }

    async fn create_answer(&self, _constraints: &RTCConstraints) -> Result<RTCSessionDescription> {
        Err(Error::Engine("answer not supported".to_owned()))
    }

    async fn set_local_description(&self, desc: RTCSessionDescription) -> Result<()> {
        self.state.lock().local = Some(desc);
        self.installed.notify_one();
        Ok(())
    }

    async fn set_remote_description(&self, desc: RTCSessionDescription) -> Result<()> {
        self.state.lock().remote = Some(desc);
        Ok(())
    }

    async fn local_description(&self) -> Option<RTCSessionDescription> {
        self.state.lock().local.clone()
    }

    fn add_stream(
        &self,
        _stream: Arc<dyn MediaStream>,
        _constraints: Option<&RTCConstraints>,
    ) -> Result<()> {
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.state.lock().connection = RTCIceConnectionState::Closed;
        Ok(())
    }

    fn ice_gathering_state(&self) -> RTCIceGatheringState {
        self.state.lock().gathering
    }

    fn ice_connection_state(&self) -> RTCIceConnectionState {
        self.state.lock().connection
    }
}

type EngineSlot = Arc<Mutex<Option<Arc<LoopbackEngine>>>>;

fn loopback_factory() -> (
    impl Fn(&RTCConfiguration, EngineEventSender) -> Result<Arc<dyn TransportEngine>> + Send + Sync,
    EngineSlot,
) {
    let slot: EngineSlot = Arc::new(Mutex::new(None));
    let created = Arc::clone(&slot);

    let factory = move |configuration: &RTCConfiguration,
                        events: EngineEventSender|
          -> Result<Arc<dyn TransportEngine>> {
        let engine = Arc::new(LoopbackEngine {
            configuration: configuration.clone(),
            events,
            state: Mutex::new(LoopbackState::default()),
            installed: Notify::new(),
        });
        *created.lock() = Some(Arc::clone(&engine));
        Ok(engine as Arc<dyn TransportEngine>)
    };

    (factory, slot)
}

fn ambient_servers() -> ServerListConfig {
    ServerListConfig::from_json(
        r#"{
            "stun_servers": ["stun:stun.example.org:3478", "stun:stun2.example.org"],
            "turn_servers": [
                {"urls": ["turn:turn.example.org?transport=udp"], "username": "alice", "password": "s3cret"}
            ]
        }"#,
    )
    .expect("ambient server list")
}

#[tokio::test]
async fn test_offer_end_to_end() -> anyhow::Result<()> {
    init_log();

    let (factory, slot) = loopback_factory();
    let session = Arc::new(
        SessionBuilder::new("e2e", factory)
            .with_server_list(ambient_servers())
            .build()?,
    );
    let engine = slot.lock().clone().expect("engine created");

    let offering = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.create_offer().await })
    };

    engine.installed.notified().await;
    engine.gather_host_candidate("127.0.0.1");

    let sdp = tokio::time::timeout(Duration::from_secs(1), offering).await???;
    assert!(sdp.starts_with(OFFER_SDP));
    assert!(sdp.contains("typ host"));

    session.on_message(RTCSdpType::Answer, "v=0\r\n").await?;
    assert_eq!(
        engine.state.lock().remote.as_ref().map(|d| d.sdp_type),
        Some(RTCSdpType::Answer)
    );

    session.close().await?;
    session.close().await?;
    assert_eq!(
        session.ice_connection_state(),
        RTCIceConnectionState::Closed
    );

    Ok(())
}

#[tokio::test]
async fn test_ambient_servers_used_without_options() -> anyhow::Result<()> {
    init_log();

    let (factory, slot) = loopback_factory();
    let _session = SessionBuilder::new("ambient", factory)
        .with_server_list(ambient_servers())
        .build()?;

    let engine = slot.lock().clone().expect("engine created");
    let servers = &engine.configuration.ice_servers;
    assert_eq!(servers.len(), 2);
    assert_eq!(
        servers[0].urls,
        vec![
            "stun:stun.example.org:3478".to_owned(),
            "stun:stun2.example.org".to_owned()
        ]
    );
    assert_eq!(servers[1].username, "alice");
    assert_eq!(servers[1].credential, "s3cret");

    Ok(())
}

#[tokio::test]
async fn test_explicit_servers_override_ambient() -> anyhow::Result<()> {
    init_log();

    let (factory, slot) = loopback_factory();
    let constraints = RTCConstraints::default().with_mandatory("DtlsSrtpKeyAgreement", true);
    let _session = SessionBuilder::new("explicit", factory)
        .with_server_list(ambient_servers())
        .with_options(MediaHandlerOptions {
            rtc_constraints: constraints.clone(),
            stun_servers: Some(vec![]),
            turn_servers: Some(vec![TurnServer {
                urls: vec!["turns:relay.example.com:5349".to_owned()],
                username: "bob".to_owned(),
                password: "pw".to_owned(),
            }]),
        })
        .build()?;

    let engine = slot.lock().clone().expect("engine created");
    let configuration = &engine.configuration;
    assert_eq!(configuration.constraints, constraints);
    assert_eq!(configuration.ice_servers.len(), 1);
    assert_eq!(
        configuration.ice_servers[0].urls,
        vec!["turns:relay.example.com:5349".to_owned()]
    );

    Ok(())
}

#[tokio::test]
async fn test_invalid_turn_server_rejected_at_build() {
    init_log();

    let (factory, slot) = loopback_factory();
    let result = SessionBuilder::new("invalid", factory)
        .with_server_list(ServerListConfig {
            stun_servers: vec![],
            turn_servers: vec![TurnServer {
                urls: vec!["turn:turn.example.org".to_owned()],
                username: "carol".to_owned(),
                password: String::new(),
            }],
        })
        .build();

    assert!(matches!(result, Err(Error::ErrNoTurnCredentials)));
    assert!(slot.lock().is_none());
}

#[tokio::test]
async fn test_answer_failure_surfaces_engine_cause() -> anyhow::Result<()> {
    init_log();

    let (factory, _slot) = loopback_factory();
    let session = SessionBuilder::new("answer", factory).build()?;

    session.on_message(RTCSdpType::Offer, OFFER_SDP).await?;
    let result = session.create_answer().await;
    assert_eq!(
        result,
        Err(Error::Engine("answer not supported".to_owned()))
    );

    session.close().await?;
    Ok(())
}
