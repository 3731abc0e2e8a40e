//! Common test utilities for integration tests

use sonar_opendata::config::Credentials;
use sonar_opendata::errors::{AppError, AppResult};
use sonar_opendata::session::{HttpRequest, HttpResponse, Transport};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport that replays canned responses in order and records every request.
///
/// Clones share the same script and request log.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct ScriptedTransport {
    inner: Arc<Mutex<Script>>,
}

#[derive(Default)]
struct Script {
    responses: VecDeque<AppResult<HttpResponse>>,
    requests: Vec<HttpRequest>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new(responses: &[(u16, &str)]) -> Self {
        let transport = Self::default();
        for (status, body) in responses {
            transport.push(*status, body);
        }
        transport
    }

    pub fn push(&self, status: u16, body: &str) {
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Queues a request that never gets a response (connection refused, timeout, ...).
    pub fn push_failure(&self, message: &str) {
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back(Err(AppError::NetworkError(message.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> AppResult<HttpResponse> {
        let mut script = self.inner.lock().unwrap();
        script.requests.push(request);
        script
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(AppError::NetworkError("no scripted response".to_string())))
    }
}

#[allow(dead_code)]
pub fn test_credentials() -> Credentials {
    Credentials::new(
        "analyst@example.com",
        r#"s3cr"et"#,
        "https://rapid7ipimseu.okta-emea.com/api/v1/authn",
    )
}

/// Identity-provider login response
#[allow(dead_code)]
pub const AUTH_RESPONSE: &str = r#"{"expiresAt":"2024-06-01T12:00:00.000Z","status":"SUCCESS","sessionToken":"tok123","_embedded":{"user":{"id":"00u1"}}}"#;

/// Auto-post page returned by the session cookie redirect
#[allow(dead_code)]
pub const SSO_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body onload="document.forms[0].submit()">
  <form id="appForm" action="https://insight.rapid7.com/saml/SSO" method="POST">
    <input name="SAMLResponse" type="hidden" value="PHNhbWxwOlJlc3BvbnNlIC8+"/>
    <input name="RelayState" type="hidden" value="https://insight.rapid7.com/login"/>
  </form>
</body>
</html>"#;

/// Cookie redirect page without any SAML inputs
#[allow(dead_code)]
pub const EMPTY_SSO_PAGE: &str = "<html><body><p>Redirecting...</p></body></html>";

/// Forward DNS listing page
#[allow(dead_code)]
pub const FDNS_LISTING: &str = r#"<html><body><table>
  <tr><th>Name</th><th>Size</th></tr>
  <tr><td><a href="/sonar.fdns_v2/2024-05-31-1717113962-fdns_any.json.gz">fdns_any</a></td><td>32 GB</td></tr>
  <tr><td><a href="/sonar.fdns_v2/2024-05-31-1717113962-fdns_a.json.gz">fdns_a</a></td><td>20 GB</td></tr>
  <tr><td><a href="/sonar.fdns_v2/2024-05-31-1717113962-fdns_aaaa.json.gz">fdns_aaaa</a></td><td>2 GB</td></tr>
  <tr><td><a href="/sonar.fdns_v2/2024-05-24-1716508836-fdns_any.json.gz">older fdns_any</a></td><td>32 GB</td></tr>
</table></body></html>"#;

/// Listing page with one anchor per category
#[allow(dead_code)]
pub const FULL_LISTING: &str = r#"<html><body>
  <a href="/sonar.fdns_v2/x-fdns_any.json.gz">any</a>
  <a href="/sonar.fdns_v2/x-fdns_a.json.gz">a</a>
  <a href="/sonar.fdns_v2/x-fdns_aaaa.json.gz">aaaa</a>
  <a href="/sonar.rdns_v2/x-rdns.json.gz">rdns</a>
</body></html>"#;

/// Reverse DNS listing page
#[allow(dead_code)]
pub const RDNS_LISTING: &str = r#"<html><body>
  <a href="/sonar.rdns_v2/2024-05-29-1716941170-rdns.json.gz">rdns</a>
  <a href="/sonar.rdns_v2/2024-05-22-1716336369-rdns.json.gz">older rdns</a>
</body></html>"#;
