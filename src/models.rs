use crate::constants::*;

/// Which Sonar listing page to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    ReverseDns,
    ForwardDns,
}

impl ListKind {
    /// Returns a human-readable name for the list kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ReverseDns => "Reverse DNS",
            Self::ForwardDns => "Forward DNS",
        }
    }

    /// Returns the listing path under [`BASE_URL`].
    pub fn listing_path(&self) -> &'static str {
        match self {
            Self::ReverseDns => RDNS_PATH,
            Self::ForwardDns => FDNS_PATH,
        }
    }

    /// Returns the full listing page URL for the given base.
    pub fn listing_url(&self, base_url: &str) -> String {
        format!("{base_url}{}", self.listing_path())
    }

    /// Returns the default job name tracking this kind of import.
    pub fn job_name(&self) -> &'static str {
        match self {
            Self::ReverseDns => RDNS_JOB_NAME,
            Self::ForwardDns => FDNS_JOB_NAME,
        }
    }

    /// Returns the file categories a job of this kind consumes, in download order.
    pub fn categories(&self) -> &'static [FileCategory] {
        match self {
            Self::ReverseDns => &[FileCategory::Rdns],
            Self::ForwardDns => &[
                FileCategory::FdnsAny,
                FileCategory::FdnsA,
                FileCategory::FdnsAaaa,
            ],
        }
    }

    /// Returns the discovered URLs relevant to this kind, skipping unset ones.
    pub fn files<'a>(&self, result: &'a DiscoveryResult) -> Vec<(FileCategory, &'a str)> {
        self.categories()
            .iter()
            .filter_map(|&category| result.get(category).map(|url| (category, url)))
            .collect()
    }
}

impl From<&str> for ListKind {
    fn from(value: &str) -> Self {
        let lower = value.trim().to_lowercase();

        if RDNS_ALIASES.contains(&lower.as_str()) {
            Self::ReverseDns
        } else if FDNS_ALIASES.contains(&lower.as_str()) {
            Self::ForwardDns
        } else {
            // Default silently to ForwardDns; anything that is not reverse DNS reads the forward listing.
            Self::ForwardDns
        }
    }
}

/// Kind of dataset file, recognised by the suffix of its link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    FdnsAny,
    FdnsA,
    FdnsAaaa,
    Rdns,
}

impl FileCategory {
    /// Order in which suffixes are tested against an href.
    pub const PRIORITY: [FileCategory; 4] = [
        FileCategory::FdnsAny,
        FileCategory::FdnsA,
        FileCategory::FdnsAaaa,
        FileCategory::Rdns,
    ];

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::FdnsAny => FDNS_ANY_SUFFIX,
            Self::FdnsA => FDNS_A_SUFFIX,
            Self::FdnsAaaa => FDNS_AAAA_SUFFIX,
            Self::Rdns => RDNS_SUFFIX,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FdnsAny => "any",
            Self::FdnsA => "a",
            Self::FdnsAaaa => "aaaa",
            Self::Rdns => "rdns",
        }
    }

    /// Returns the category whose suffix `href` ends with, testing in [`Self::PRIORITY`] order.
    pub fn classify(href: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|category| href.ends_with(category.suffix()))
    }
}

/// Absolute URLs of the files found on a listing page.
///
/// Each field is write-once: the first URL recorded for a category sticks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryResult {
    any: Option<String>,
    a: Option<String>,
    aaaa: Option<String>,
    rdns: Option<String>,
}

impl DiscoveryResult {
    pub fn any_url(&self) -> Option<&str> {
        self.any.as_deref()
    }

    pub fn a_url(&self) -> Option<&str> {
        self.a.as_deref()
    }

    pub fn aaaa_url(&self) -> Option<&str> {
        self.aaaa.as_deref()
    }

    pub fn rdns_url(&self) -> Option<&str> {
        self.rdns.as_deref()
    }

    pub fn get(&self, category: FileCategory) -> Option<&str> {
        match category {
            FileCategory::FdnsAny => self.any_url(),
            FileCategory::FdnsA => self.a_url(),
            FileCategory::FdnsAaaa => self.aaaa_url(),
            FileCategory::Rdns => self.rdns_url(),
        }
    }

    /// Records `url` for `category` unless a URL is already set.
    ///
    /// Returns `true` when the value was stored.
    pub fn record(&mut self, category: FileCategory, url: String) -> bool {
        let slot = match category {
            FileCategory::FdnsAny => &mut self.any,
            FileCategory::FdnsA => &mut self.a,
            FileCategory::FdnsAaaa => &mut self.aaaa,
            FileCategory::Rdns => &mut self.rdns,
        };
        if slot.is_some() || url.is_empty() {
            return false;
        }
        *slot = Some(url);
        true
    }

    /// Iterates over every populated category in priority order.
    pub fn urls(&self) -> impl Iterator<Item = (FileCategory, &str)> {
        FileCategory::PRIORITY
            .into_iter()
            .filter_map(move |category| self.get(category).map(|url| (category, url)))
    }

    pub fn is_empty(&self) -> bool {
        self.urls().next().is_none()
    }
}

/// Hidden form fields the identity provider hands back for the service provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SamlAssertion {
    pub saml_response: String,
    pub relay_state: String,
}

impl SamlAssertion {
    /// Form body for the service provider's SSO endpoint.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            (RELAY_STATE_FIELD.to_string(), self.relay_state.clone()),
            (SAML_RESPONSE_FIELD.to_string(), self.saml_response.clone()),
        ]
    }
}
