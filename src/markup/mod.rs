//! HTML extraction for the login and listing pages.
//!
//! Both extractors tokenize the page in a single pass and look only at start tags and
//! their attributes, in source order. No document tree is built.
//! Every call works on fresh state, so nothing found in one document leaks into the next.

mod links;
mod saml;
mod scan;

// Re-export public API
pub use links::{harvest_links, LinkHarvester};
pub use saml::{harvest_saml_fields, SamlFieldHarvester};
