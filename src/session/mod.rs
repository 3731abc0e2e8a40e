//! HTTP plumbing for the handshake.
//!
//! The orchestrator only talks to the [`Transport`] trait. [`ReqwestTransport`] is the
//! production implementation; built with [`ReqwestTransport::with_cookie_store`] it is the
//! session that carries cookies from host to host across redirects.

mod transport;

// Re-export public API
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, RequestBody, Transport,
};
