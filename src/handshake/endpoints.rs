use crate::constants::{
    BASE_URL, POST_LOGIN_REDIRECT_URL, SAML_APP_REDIRECT_URL, SESSION_COOKIE_REDIRECT_URL, SSO_URL,
};

/// Where the session requests of the handshake go.
///
/// The login URL is not here; it comes from the credentials. [`Endpoints::default`]
/// points at the live portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub session_cookie_redirect: String,
    pub saml_app_redirect: String,
    pub sso: String,
    pub post_login_redirect: String,
    /// Portal base for the listing page and the harvested links.
    pub base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            session_cookie_redirect: SESSION_COOKIE_REDIRECT_URL.to_string(),
            saml_app_redirect: SAML_APP_REDIRECT_URL.to_string(),
            sso: SSO_URL.to_string(),
            post_login_redirect: POST_LOGIN_REDIRECT_URL.to_string(),
            base_url: BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// The redirect that trades a session token for IdP session cookies.
    ///
    /// The token and the SAML app redirect are inserted verbatim.
    pub fn session_cookie_redirect_url(&self, session_token: &str) -> String {
        format!(
            "{}?checkAccountSetupComplete=true&token={session_token}&redirectUrl={}",
            self.session_cookie_redirect, self.saml_app_redirect
        )
    }
}
