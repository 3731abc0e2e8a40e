// Open Data portal
pub const BASE_URL: &str = "https://opendata.rapid7.com";
pub const FDNS_PATH: &str = "/sonar.fdns_v2/";
pub const RDNS_PATH: &str = "/sonar.rdns_v2/";

// Identity provider and service provider endpoints.
// These are lifted from the portal's login page JS and change whenever the portal does.
pub const SESSION_COOKIE_REDIRECT_URL: &str =
    "https://rapid7ipimseu.okta-emea.com/login/sessionCookieRedirect";
pub const SAML_APP_REDIRECT_URL: &str =
    "https://rapid7ipimseu.okta-emea.com/home/template_saml_2_0/0oatgdg8ruitg9ZTr0i6/3079";
pub const SSO_URL: &str = "https://insight.rapid7.com/saml/SSO";
pub const POST_LOGIN_REDIRECT_URL: &str = "https://insight.rapid7.com/redirect/doRedirect";

/// Headers that make the login look like it came from the embedded sign-in widget.
pub const IDP_HEADERS: &[(&str, &str)] = &[
    ("Accept", "application/json"),
    ("Content-Type", "application/json"),
    ("X-Okta-User-Agent-Extended", "okta-signin-widget-2.6.0"),
    ("Host", "rapid7ipimseu.okta-emea.com"),
    ("Origin", "https://insight.rapid7.com"),
];

// SSO form fields
pub const SAML_RESPONSE_FIELD: &str = "SAMLResponse";
pub const RELAY_STATE_FIELD: &str = "RelayState";

// Listing file suffixes
pub const FDNS_ANY_SUFFIX: &str = "fdns_any.json.gz";
pub const FDNS_A_SUFFIX: &str = "fdns_a.json.gz";
pub const FDNS_AAAA_SUFFIX: &str = "fdns_aaaa.json.gz";
pub const RDNS_SUFFIX: &str = "rdns.json.gz";

// Configuration
pub const DEFAULT_CONFIG_FILE: &str = "connector.toml";
pub const RAPID7_SECTION: &str = "Rapid7";
pub const AUTH_URL_KEY: &str = "rapid7.auth_url";
pub const USERNAME_KEY: &str = "rapid7.username";
pub const PASSWORD_KEY: &str = "rapid7.password";
pub const REQUEST_TIMEOUT_KEY: &str = "rapid7.request_timeout_secs";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

// Job names
pub const RDNS_JOB_NAME: &str = "get_data_by_cidr_rdns";
pub const FDNS_JOB_NAME: &str = "get_data_by_cidr_dns";

// List kind aliases
pub const RDNS_ALIASES: &[&str] = &["rdns", "reverse", "reverse-dns"];
pub const FDNS_ALIASES: &[&str] = &["dns", "fdns", "forward", "forward-dns"];
