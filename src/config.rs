use crate::constants::*;
use crate::errors::{AppError, AppResult};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use toml::{Table, Value};
use tracing::warn;
use url::Url;

/// A type that can be read out of a setting.
///
/// `fallback` is the zero value handed back when the setting is missing or unreadable.
pub trait SettingValue: Sized {
    const TYPE_NAME: &'static str;

    fn from_value(value: &Value) -> Option<Self>;

    fn fallback() -> Self;
}

impl SettingValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Datetime(d) => Some(d.to_string()),
            Value::Array(_) | Value::Table(_) => None,
        }
    }

    fn fallback() -> Self {
        String::new()
    }
}

impl SettingValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            Value::Integer(1) => Some(true),
            Value::Integer(0) => Some(false),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "1" | "yes" | "true" | "on" => Some(true),
                "0" | "no" | "false" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    fn fallback() -> Self {
        false
    }
}

impl SettingValue for u64 {
    const TYPE_NAME: &'static str = "unsigned integer";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => u64::try_from(*i).ok(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn fallback() -> Self {
        0
    }
}

/// Sectioned key/value settings read from a TOML file.
///
/// Each top-level table is a section. Keys containing dots may be written quoted
/// (`"rapid7.username" = "..."`) or as TOML dotted keys (`rapid7.username = "..."`).
#[derive(Debug, Clone, Default)]
pub struct Settings {
    sections: Table,
}

impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// The file must be TOML, so string values are quoted: an INI line such as
    /// `rapid7.auth_url = https://...` becomes `"rapid7.auth_url" = "https://..."`.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read and `ParseError` if it is not valid TOML.
    /// Missing sections or keys are not errors; see [`Settings::get_setting`].
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!(
                "Could not read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        let sections: Table = toml::from_str(contents)
            .map_err(|e| AppError::ParseError(format!("Failed to parse config: {e}")))?;
        Ok(Self { sections })
    }

    /// Reads `key` from `section` as `T`.
    ///
    /// Never fails: a missing section, a missing key, or a value that is not a `T`
    /// logs a warning and yields `T::fallback()` (`""`, `false` or `0`).
    pub fn get_setting<T: SettingValue>(&self, section: &str, key: &str) -> T {
        let Some(table) = self.sections.get(section).and_then(Value::as_table) else {
            warn!(section, "Section does not exist in config file");
            return T::fallback();
        };
        let Some(value) = lookup(table, key) else {
            warn!(section, key, "Key does not exist in config file");
            return T::fallback();
        };
        match T::from_value(value) {
            Some(parsed) => parsed,
            None => {
                warn!(
                    section,
                    key,
                    expected = T::TYPE_NAME,
                    "Unexpected value type in config file"
                );
                T::fallback()
            }
        }
    }

    /// Like [`Settings::get_setting`] but silent about absent settings.
    pub fn get_optional<T: SettingValue>(&self, section: &str, key: &str) -> Option<T> {
        let value = self
            .sections
            .get(section)
            .and_then(Value::as_table)
            .and_then(|table| lookup(table, key))?;
        let parsed = T::from_value(value);
        if parsed.is_none() {
            warn!(
                section,
                key,
                expected = T::TYPE_NAME,
                "Unexpected value type in config file"
            );
        }
        parsed
    }

    /// Per-request timeout for every handshake call.
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .get_optional::<u64>(RAPID7_SECTION, REQUEST_TIMEOUT_KEY)
            .filter(|&secs| secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }
}

fn lookup<'a>(table: &'a Table, key: &str) -> Option<&'a Value> {
    if let Some(value) = table.get(key) {
        return Some(value);
    }
    let mut parts = key.split('.');
    let mut current = table.get(parts.next()?)?;
    for part in parts {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

/// Login details for the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub auth_url: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        auth_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            auth_url: auth_url.into(),
        }
    }

    /// Reads the `[Rapid7]` section. Missing keys come back empty (with a warning).
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            auth_url: settings.get_setting(RAPID7_SECTION, AUTH_URL_KEY),
            username: settings.get_setting(RAPID7_SECTION, USERNAME_KEY),
            password: settings.get_setting(RAPID7_SECTION, PASSWORD_KEY),
        }
    }

    /// Checks the credentials are usable before any request is made.
    ///
    /// # Errors
    ///
    /// Returns `UrlError` if the auth URL does not parse and `InvalidInput` if the
    /// username is empty.
    pub fn validate(&self) -> AppResult<()> {
        Url::parse(&self.auth_url)?;
        if self.username.is_empty() {
            return Err(AppError::InvalidInput(format!(
                "{USERNAME_KEY} is not set in the [{RAPID7_SECTION}] section"
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("auth_url", &self.auth_url)
            .finish()
    }
}
