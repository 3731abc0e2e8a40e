use super::scan::{attributes, scan_start_tags, StartTagHandler};
use crate::constants::{RELAY_STATE_FIELD, SAML_RESPONSE_FIELD};
use crate::models::SamlAssertion;
use html5ever::tokenizer::Tag;

#[derive(Debug, Clone, Copy)]
enum SamlField {
    Response,
    RelayState,
}

/// Pulls the `SAMLResponse` and `RelayState` hidden inputs out of the IdP's auto-post page.
///
/// Within an input, `value` is only captured when it comes after the matching `name`.
/// The first capture of each field is kept.
#[derive(Debug, Clone, Default)]
pub struct SamlFieldHarvester {
    assertion: SamlAssertion,
}

impl SamlFieldHarvester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans the input start tags of an HTML document.
    pub fn feed(&mut self, html: &str) {
        scan_start_tags(html, self);
    }

    fn handle_input<'a>(&mut self, attrs: impl Iterator<Item = (&'a str, &'a str)>) {
        let mut awaiting: Option<SamlField> = None;

        for (name, value) in attrs {
            match name {
                "name" if value == SAML_RESPONSE_FIELD && self.assertion.saml_response.is_empty() => {
                    awaiting = Some(SamlField::Response);
                }
                "name" if value == RELAY_STATE_FIELD && self.assertion.relay_state.is_empty() => {
                    awaiting = Some(SamlField::RelayState);
                }
                "value" => {
                    if let Some(field) = awaiting {
                        let slot = self.slot_mut(field);
                        if slot.is_empty() {
                            *slot = value.to_string();
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn slot_mut(&mut self, field: SamlField) -> &mut String {
        match field {
            SamlField::Response => &mut self.assertion.saml_response,
            SamlField::RelayState => &mut self.assertion.relay_state,
        }
    }

    pub fn finish(self) -> SamlAssertion {
        self.assertion
    }
}

impl StartTagHandler for SamlFieldHarvester {
    fn start_tag(&mut self, tag: &Tag) {
        if &*tag.name == "input" {
            self.handle_input(attributes(tag));
        }
    }
}

/// Extracts the SAML hidden form fields from an HTML document.
///
/// Fields that are not present come back as empty strings.
pub fn harvest_saml_fields(html: &str) -> SamlAssertion {
    let mut harvester = SamlFieldHarvester::new();
    harvester.feed(html);
    harvester.finish()
}
