#![warn(rust_2018_idioms)]

pub mod api;
pub mod configuration;
pub mod engine;
pub mod error;
pub mod ice_transport;
pub mod media_stream;
pub mod negotiation;
pub mod sdp;

pub use api::SessionBuilder;
pub use error::{Error, Result};
pub use negotiation::NegotiationSession;

pub(crate) const UNSPECIFIED_STR: &str = "Unspecified";
