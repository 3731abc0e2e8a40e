use super::scan::{attributes, scan_start_tags, StartTagHandler};
use crate::models::{DiscoveryResult, FileCategory};
use html5ever::tokenizer::Tag;
use tracing::debug;

/// Collects the first link per [`FileCategory`] from listing pages.
///
/// Hrefs are prefixed with the base URL as-is, without any path resolution.
#[derive(Debug, Clone)]
pub struct LinkHarvester {
    base_url: String,
    result: DiscoveryResult,
}

impl LinkHarvester {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            result: DiscoveryResult::default(),
        }
    }

    /// Scans the anchor start tags of an HTML document.
    pub fn feed(&mut self, html: &str) {
        scan_start_tags(html, self);
    }

    fn handle_href(&mut self, href: &str) {
        let Some(category) = FileCategory::classify(href) else {
            return;
        };
        let url = format!("{}{href}", self.base_url);
        if self.result.record(category, url) {
            debug!(category = category.label(), href, "Found listing file");
        }
    }

    pub fn finish(self) -> DiscoveryResult {
        self.result
    }
}

impl StartTagHandler for LinkHarvester {
    fn start_tag(&mut self, tag: &Tag) {
        if &*tag.name != "a" {
            return;
        }
        for (name, value) in attributes(tag) {
            if name == "href" {
                self.handle_href(value);
            }
        }
    }
}

/// Extracts the first link of each file category from a listing page.
pub fn harvest_links(html: &str, base_url: &str) -> DiscoveryResult {
    let mut harvester = LinkHarvester::new(base_url);
    harvester.feed(html);
    harvester.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://opendata.rapid7.com";

    #[test]
    fn test_all_categories_found() {
        let html = r#"
            <html><body><table>
              <tr><td><a href="/sonar.fdns_v2/2024-05-31-1717113962-fdns_any.json.gz">any</a></td></tr>
              <tr><td><a href="/sonar.fdns_v2/2024-05-31-1717113962-fdns_a.json.gz">a</a></td></tr>
              <tr><td><a href="/sonar.fdns_v2/2024-05-31-1717113962-fdns_aaaa.json.gz">aaaa</a></td></tr>
              <tr><td><a href="/sonar.rdns_v2/2024-05-29-1716941170-rdns.json.gz">rdns</a></td></tr>
            </table></body></html>
        "#;

        let result = harvest_links(html, BASE);
        assert_eq!(
            result.any_url(),
            Some("https://opendata.rapid7.com/sonar.fdns_v2/2024-05-31-1717113962-fdns_any.json.gz")
        );
        assert_eq!(
            result.a_url(),
            Some("https://opendata.rapid7.com/sonar.fdns_v2/2024-05-31-1717113962-fdns_a.json.gz")
        );
        assert_eq!(
            result.aaaa_url(),
            Some("https://opendata.rapid7.com/sonar.fdns_v2/2024-05-31-1717113962-fdns_aaaa.json.gz")
        );
        assert_eq!(
            result.rdns_url(),
            Some("https://opendata.rapid7.com/sonar.rdns_v2/2024-05-29-1716941170-rdns.json.gz")
        );
    }

    #[test]
    fn test_first_match_wins() {
        let html = r#"
            <a href="/sonar.rdns_v2/newest-rdns.json.gz">1</a>
            <a href="/sonar.rdns_v2/older-rdns.json.gz">2</a>
            <a href="/sonar.rdns_v2/oldest-rdns.json.gz">3</a>
        "#;

        let result = harvest_links(html, BASE);
        assert_eq!(
            result.rdns_url(),
            Some("https://opendata.rapid7.com/sonar.rdns_v2/newest-rdns.json.gz")
        );
    }

    #[test]
    fn test_fdns_any_only_populates_any() {
        let html = r#"<a href="/sonar.fdns_v2/x-fdns_any.json.gz">any</a>"#;

        let result = harvest_links(html, BASE);
        assert!(result.any_url().is_some());
        assert_eq!(result.a_url(), None);
        assert_eq!(result.aaaa_url(), None);
        assert_eq!(result.rdns_url(), None);
    }

    #[test]
    fn test_second_any_does_not_spill_into_other_categories() {
        let html = r#"
            <a href="/x-fdns_any.json.gz">first</a>
            <a href="/y-fdns_any.json.gz">second</a>
        "#;

        let result = harvest_links(html, BASE);
        assert_eq!(
            result.any_url(),
            Some("https://opendata.rapid7.com/x-fdns_any.json.gz")
        );
        assert_eq!(result.a_url(), None);
        assert_eq!(result.aaaa_url(), None);
    }

    #[test]
    fn test_non_matching_links_are_ignored() {
        let html = r#"
            <a href="/sonar.fdns_v2/">parent</a>
            <a href="/sonar.fdns_v2/x-fdns_a.json.gz.sha1">checksum</a>
            <a name="anchor-without-href">nothing</a>
            <link href="/style-rdns.json.gz">
        "#;

        let result = harvest_links(html, BASE);
        assert!(result.is_empty());
    }

    #[test]
    fn test_base_url_is_prefixed_verbatim() {
        let html = r#"<a href="files/z-rdns.json.gz">relative</a>"#;

        let result = harvest_links(html, "http://127.0.0.1:9000/");
        assert_eq!(
            result.rdns_url(),
            Some("http://127.0.0.1:9000/files/z-rdns.json.gz")
        );
    }

    #[test]
    fn test_fresh_state_per_document() {
        let first = harvest_links(r#"<a href="/one-rdns.json.gz">1</a>"#, BASE);
        let second = harvest_links(r#"<a href="/two-rdns.json.gz">2</a>"#, BASE);
        assert_eq!(
            first.rdns_url(),
            Some("https://opendata.rapid7.com/one-rdns.json.gz")
        );
        assert_eq!(
            second.rdns_url(),
            Some("https://opendata.rapid7.com/two-rdns.json.gz")
        );
    }

    #[test]
    fn test_feeding_twice_keeps_first_documents_links() {
        let mut harvester = LinkHarvester::new(BASE);
        harvester.feed(r#"<a href="/one-rdns.json.gz">1</a>"#);
        harvester.feed(
            r#"<a href="/two-rdns.json.gz">2</a><a href="/two-fdns_a.json.gz">a</a>"#,
        );
        let result = harvester.finish();
        assert_eq!(
            result.rdns_url(),
            Some("https://opendata.rapid7.com/one-rdns.json.gz")
        );
        assert_eq!(
            result.a_url(),
            Some("https://opendata.rapid7.com/two-fdns_a.json.gz")
        );
    }

    #[test]
    fn test_links_inside_noscript_are_found() {
        let html = r#"
            <html><head><noscript><a href="/sonar.rdns_v2/x-rdns.json.gz">rdns</a></noscript></head>
            <body><form><noscript><a href="/sonar.fdns_v2/x-fdns_a.json.gz">a</a></noscript></form></body></html>
        "#;

        let result = harvest_links(html, BASE);
        assert_eq!(
            result.rdns_url(),
            Some("https://opendata.rapid7.com/sonar.rdns_v2/x-rdns.json.gz")
        );
        assert_eq!(
            result.a_url(),
            Some("https://opendata.rapid7.com/sonar.fdns_v2/x-fdns_a.json.gz")
        );
    }

    #[test]
    fn test_malformed_markup_yields_empty_result() {
        let result = harvest_links("<<<a href=>>> <a href", BASE);
        assert!(result.is_empty());
    }
}
