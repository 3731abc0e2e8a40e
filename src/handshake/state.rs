use super::error::HandshakeStep;
use crate::models::{DiscoveryResult, SamlAssertion};

/// Where a handshake stands. Each state carries what the next step consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeState {
    Unauthenticated,
    TokenObtained { session_token: String },
    SessionEstablished { sso_page: String },
    AssertionExtracted(SamlAssertion),
    SsoCompleted,
    Discovering,
    Done(DiscoveryResult),
}

impl HandshakeState {
    /// The step that moves this state forward, or `None` once done.
    pub fn next_step(&self) -> Option<HandshakeStep> {
        match self {
            Self::Unauthenticated => Some(HandshakeStep::Authenticate),
            Self::TokenObtained { .. } => Some(HandshakeStep::EstablishSession),
            Self::SessionEstablished { .. } => Some(HandshakeStep::ExtractAssertion),
            Self::AssertionExtracted(_) => Some(HandshakeStep::ServiceProviderSso),
            Self::SsoCompleted => Some(HandshakeStep::FinalRedirect),
            Self::Discovering => Some(HandshakeStep::ListFiles),
            Self::Done(_) => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}
