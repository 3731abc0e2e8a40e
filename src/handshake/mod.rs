//! Login and file discovery for the Rapid7 Open Data portal.
//!
//! The portal has no API key. Reaching the file listing takes six requests:
//!
//! 1. POST the credentials to the identity provider and receive a session token.
//! 2. Trade the token for IdP session cookies; the reply is an auto-post SAML form.
//! 3. Pull `SAMLResponse` and `RelayState` out of that form.
//! 4. POST them to the service provider's SSO endpoint.
//! 5. Follow the post-login redirect so the portal links the session.
//! 6. GET the listing page and harvest the file links.
//!
//! Step 1 runs on a cookie-less client; steps 2 to 6 share one cookie-carrying session.
//! [`Handshake::discover_files`] consumes the handshake, so a session is never reused.

mod endpoints;
mod error;
mod payload;
mod state;

// Re-export public API
pub use endpoints::Endpoints;
pub use error::{ErrorKind, HandshakeError, HandshakeStep};
pub use payload::{auth_payload, parse_session_token, session_cookie_redirect_url};
pub use state::HandshakeState;

use crate::config::Credentials;
use crate::constants::IDP_HEADERS;
use crate::errors::AppResult;
use crate::markup::{harvest_links, harvest_saml_fields};
use crate::models::{DiscoveryResult, ListKind, SamlAssertion};
use crate::session::{HttpRequest, HttpResponse, ReqwestTransport, RequestBody, Transport};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Longest slice of a response body written to the log on failure.
const BODY_EXCERPT_CHARS: usize = 512;

pub struct Handshake<T: Transport> {
    credentials: Credentials,
    idp: T,
    session: T,
    endpoints: Endpoints,
}

impl Handshake<ReqwestTransport> {
    /// Builds a handshake over fresh reqwest clients with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if either client cannot be built.
    pub fn connect(credentials: Credentials, timeout: Duration) -> AppResult<Self> {
        let idp = ReqwestTransport::stateless(timeout)?;
        let session = ReqwestTransport::with_cookie_store(timeout)?;
        Ok(Self::new(credentials, idp, session))
    }
}

impl<T: Transport> Handshake<T> {
    /// `idp` carries the login request only; `session` carries everything after it.
    pub fn new(credentials: Credentials, idp: T, session: T) -> Self {
        Self {
            credentials,
            idp,
            session,
            endpoints: Endpoints::default(),
        }
    }

    /// Overrides the portal base used for the listing page and the harvested links.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.endpoints.base_url = base_url.into();
        self
    }

    /// Sends the session requests to `endpoints` instead of the live portal.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.endpoints.base_url
    }

    /// Runs the whole handshake and returns the files listed for `kind`.
    ///
    /// # Errors
    ///
    /// Returns the [`HandshakeError`] of the first step that failed. No request is made
    /// after a failure.
    pub async fn discover_files(self, kind: ListKind) -> Result<DiscoveryResult, HandshakeError> {
        info!(listing = kind.display_name(), "Starting portal handshake");

        let mut state = HandshakeState::Unauthenticated;
        loop {
            state = match state {
                HandshakeState::Done(result) => {
                    info!(
                        listing = kind.display_name(),
                        files_found = result.urls().count(),
                        "File discovery completed"
                    );
                    return Ok(result);
                }
                other => self.advance(other, kind).await?,
            };
        }
    }

    /// Performs the single step that follows `state`.
    pub async fn advance(
        &self,
        state: HandshakeState,
        kind: ListKind,
    ) -> Result<HandshakeState, HandshakeError> {
        if let Some(step) = state.next_step() {
            debug!(step = %step, number = step.number(), "Handshake step");
        }

        match state {
            HandshakeState::Unauthenticated => {
                let session_token = self.authenticate().await?;
                Ok(HandshakeState::TokenObtained { session_token })
            }
            HandshakeState::TokenObtained { session_token } => {
                let sso_page = self.establish_session(&session_token).await?;
                Ok(HandshakeState::SessionEstablished { sso_page })
            }
            HandshakeState::SessionEstablished { sso_page } => {
                let assertion = harvest_saml_fields(&sso_page);
                if assertion.saml_response.is_empty() {
                    warn!("No SAMLResponse field found on the SSO page");
                }
                Ok(HandshakeState::AssertionExtracted(assertion))
            }
            HandshakeState::AssertionExtracted(assertion) => {
                self.service_provider_sso(&assertion).await?;
                Ok(HandshakeState::SsoCompleted)
            }
            HandshakeState::SsoCompleted => {
                self.final_redirect().await;
                Ok(HandshakeState::Discovering)
            }
            HandshakeState::Discovering => {
                let result = self.list_files(kind).await?;
                Ok(HandshakeState::Done(result))
            }
            done @ HandshakeState::Done(_) => Ok(done),
        }
    }

    async fn authenticate(&self) -> Result<String, HandshakeError> {
        let step = HandshakeStep::Authenticate;
        let payload = auth_payload(&self.credentials.username, &self.credentials.password);
        let request = IDP_HEADERS.iter().fold(
            HttpRequest::post(&self.credentials.auth_url, RequestBody::Raw(payload)),
            |request, (name, value)| request.header(*name, *value),
        );

        let response = send(&self.idp, step, request).await?;
        if !response.is_ok() {
            log_failure(step, &response, "Failed login");
            return Err(HandshakeError::Authentication {
                status: response.status,
                body: response.body,
            });
        }

        parse_session_token(&response.body).map_err(|reason| {
            error!(step = %step, reason = %reason, "Unusable login response");
            HandshakeError::InvalidAuthResponse(reason)
        })
    }

    async fn establish_session(&self, session_token: &str) -> Result<String, HandshakeError> {
        let step = HandshakeStep::EstablishSession;
        let request = HttpRequest::get(self.endpoints.session_cookie_redirect_url(session_token));

        let response = send(&self.session, step, request).await?;
        if !response.is_ok() {
            log_failure(step, &response, "Unable to do cookie redirect");
            return Err(HandshakeError::SessionEstablishment {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response.body)
    }

    async fn service_provider_sso(&self, assertion: &SamlAssertion) -> Result<(), HandshakeError> {
        let step = HandshakeStep::ServiceProviderSso;
        let request = HttpRequest::post(
            self.endpoints.sso.as_str(),
            RequestBody::Form(assertion.form_fields()),
        );

        let response = send(&self.session, step, request).await?;
        if !response.is_ok() {
            log_failure(step, &response, "SSO failure");
            return Err(HandshakeError::Sso {
                status: response.status,
                body: response.body,
            });
        }
        Ok(())
    }

    /// The portal's own login chain makes this call; its outcome does not gate discovery.
    async fn final_redirect(&self) {
        match self
            .session
            .send(HttpRequest::get(self.endpoints.post_login_redirect.as_str()))
            .await
        {
            Ok(response) => debug!(status = response.status, "Post-login redirect done"),
            Err(e) => warn!(error = %e, "Post-login redirect failed, continuing"),
        }
    }

    async fn list_files(&self, kind: ListKind) -> Result<DiscoveryResult, HandshakeError> {
        let step = HandshakeStep::ListFiles;
        let url = kind.listing_url(&self.endpoints.base_url);

        let response = send(&self.session, step, HttpRequest::get(url.as_str())).await?;
        if !response.is_ok() {
            log_failure(step, &response, "Bad request for file listing");
            return Err(HandshakeError::Discovery {
                url,
                status: response.status,
            });
        }

        Ok(harvest_links(&response.body, &self.endpoints.base_url))
    }
}

async fn send<T: Transport>(
    transport: &T,
    step: HandshakeStep,
    request: HttpRequest,
) -> Result<HttpResponse, HandshakeError> {
    transport.send(request).await.map_err(|e| {
        error!(step = %step, error = %e, "Request failed");
        HandshakeError::Transport {
            step,
            message: e.to_string(),
        }
    })
}

fn log_failure(step: HandshakeStep, response: &HttpResponse, message: &str) {
    let excerpt: String = response.body.chars().take(BODY_EXCERPT_CHARS).collect();
    error!(
        step = %step,
        status = response.status,
        body = %excerpt,
        "{message}"
    );
}
