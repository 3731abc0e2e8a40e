use super::Endpoints;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct AuthnResponse {
    #[serde(rename = "sessionToken")]
    session_token: Option<String>,
}

/// Builds the identity-provider login body.
///
/// The IdP rejects bodies whose key order or option flags differ from the sign-in
/// widget's, so the document is assembled by hand. Only the two string values are
/// escaped.
pub fn auth_payload(username: &str, password: &str) -> String {
    format!(
        r#"{{"username":{},"password":{},"options":{{"warnBeforePasswordExpired":true,"multiOptionalFactorEnroll":true}}}}"#,
        json_string(username),
        json_string(password),
    )
}

fn json_string(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

/// Reads the session token from the identity-provider login response.
pub fn parse_session_token(body: &str) -> Result<String, String> {
    let response: AuthnResponse =
        serde_json::from_str(body).map_err(|e| format!("not a JSON login response: {e}"))?;
    response
        .session_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| "sessionToken is missing".to_string())
}

/// The live portal's cookie redirect for `session_token`.
pub fn session_cookie_redirect_url(session_token: &str) -> String {
    Endpoints::default().session_cookie_redirect_url(session_token)
}
