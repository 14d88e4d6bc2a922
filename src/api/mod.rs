use std::sync::Arc;

use crate::configuration::server_list::{MediaHandlerOptions, ServerListConfig};
use crate::engine::TransportEngineFactory;
use crate::error::Result;
use crate::media_stream::UserMediaProvider;
use crate::negotiation::NegotiationSession;

/// SessionBuilder assembles a [`NegotiationSession`] from a transport
/// engine factory, the user agent's ambient server list and per-session
/// options.
pub struct SessionBuilder {
    id: String,
    factory: Arc<dyn TransportEngineFactory>,
    server_list: Option<ServerListConfig>,
    options: Option<MediaHandlerOptions>,
    user_media: Option<Arc<dyn UserMediaProvider>>,
}

impl SessionBuilder {
    pub fn new<F>(id: impl Into<String>, factory: F) -> Self
    where
        F: TransportEngineFactory + 'static,
    {
        Self::with_factory(id, Arc::new(factory))
    }

    /// with_factory shares one engine factory between many sessions
    pub fn with_factory(id: impl Into<String>, factory: Arc<dyn TransportEngineFactory>) -> Self {
        SessionBuilder {
            id: id.into(),
            factory,
            server_list: None,
            options: None,
            user_media: None,
        }
    }

    /// with_server_list sets the ambient STUN/TURN servers used when the
    /// options do not name their own.
    pub fn with_server_list(mut self, server_list: ServerListConfig) -> Self {
        self.server_list = Some(server_list);
        self
    }

    pub fn with_options(mut self, options: MediaHandlerOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_user_media(mut self, provider: Arc<dyn UserMediaProvider>) -> Self {
        self.user_media = Some(provider);
        self
    }

    /// build resolves the ICE server list, creates the engine and starts the
    /// session driver. Must be called from within a tokio runtime.
    pub fn build(self) -> Result<NegotiationSession> {
        let server_list = self.server_list.unwrap_or_default();
        let options = self.options.unwrap_or_default();
        let configuration = options.configuration(&server_list);

        NegotiationSession::new(
            self.id,
            self.factory.as_ref(),
            configuration,
            self.user_media,
        )
    }
}
