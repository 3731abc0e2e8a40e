use std::fmt;
use thiserror::Error;

/// The six steps of the login and discovery handshake, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeStep {
    Authenticate,
    EstablishSession,
    ExtractAssertion,
    ServiceProviderSso,
    FinalRedirect,
    ListFiles,
}

impl HandshakeStep {
    pub fn number(&self) -> u8 {
        match self {
            Self::Authenticate => 1,
            Self::EstablishSession => 2,
            Self::ExtractAssertion => 3,
            Self::ServiceProviderSso => 4,
            Self::FinalRedirect => 5,
            Self::ListFiles => 6,
        }
    }
}

impl fmt::Display for HandshakeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authenticate => "identity provider authentication",
            Self::EstablishSession => "session cookie redirect",
            Self::ExtractAssertion => "SAML assertion extraction",
            Self::ServiceProviderSso => "service provider SSO",
            Self::FinalRedirect => "post-login redirect",
            Self::ListFiles => "file listing",
        };
        f.write_str(name)
    }
}

/// Failure categories a scheduler can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AuthenticationFailure,
    SessionEstablishmentFailure,
    SsoFailure,
    DiscoveryFailure,
}

#[derive(Debug, Error)]
pub enum HandshakeError {
    #[error("identity provider rejected the login (HTTP {status})")]
    Authentication { status: u16, body: String },

    #[error("identity provider response has no session token: {0}")]
    InvalidAuthResponse(String),

    #[error("session cookie redirect failed (HTTP {status})")]
    SessionEstablishment { status: u16, body: String },

    #[error("service provider SSO failed (HTTP {status})")]
    Sso { status: u16, body: String },

    #[error("file listing {url} could not be fetched (HTTP {status})")]
    Discovery { url: String, status: u16 },

    #[error("{step} request failed: {message}")]
    Transport { step: HandshakeStep, message: String },
}

impl HandshakeError {
    /// The step at which the handshake stopped.
    pub fn step(&self) -> HandshakeStep {
        match self {
            Self::Authentication { .. } | Self::InvalidAuthResponse(_) => {
                HandshakeStep::Authenticate
            }
            Self::SessionEstablishment { .. } => HandshakeStep::EstablishSession,
            Self::Sso { .. } => HandshakeStep::ServiceProviderSso,
            Self::Discovery { .. } => HandshakeStep::ListFiles,
            Self::Transport { step, .. } => *step,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.step() {
            HandshakeStep::Authenticate => ErrorKind::AuthenticationFailure,
            HandshakeStep::EstablishSession | HandshakeStep::ExtractAssertion => {
                ErrorKind::SessionEstablishmentFailure
            }
            HandshakeStep::ServiceProviderSso | HandshakeStep::FinalRedirect => {
                ErrorKind::SsoFailure
            }
            HandshakeStep::ListFiles => ErrorKind::DiscoveryFailure,
        }
    }
}
