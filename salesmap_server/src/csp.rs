//! Content-Security-Policy header manipulation.
//!
//! The map page pulls raster tiles from a third-party tile server and carries a small amount of
//! inline styling, so its response needs extra CSP sources on top of whatever policy is already
//! set (by a reverse proxy, typically). These helpers parse a policy header into a directive map,
//! merge additional sources in without duplicating or dropping anything, and render the result
//! back out.
use std::collections::BTreeMap;

/// Directive name → source list. A `BTreeMap` keeps the rendered header deterministic.
pub type CspPolicy = BTreeMap<String, Vec<String>>;

/// Parse a `Content-Security-Policy` header value. Empty or whitespace-only input yields an
/// empty policy. Unknown directives are kept verbatim; this code has no opinion on CSP semantics.
pub fn parse_csp(header: &str) -> CspPolicy {
    let mut policy = CspPolicy::new();
    for directive in header.split(';') {
        let mut parts = directive.split_whitespace();
        let Some(name) = parts.next() else {
            continue;
        };
        let sources = parts.map(String::from).collect::<Vec<String>>();
        policy.insert(name.to_ascii_lowercase(), sources);
    }
    policy
}

/// Merge `additions` into `policy`. Sources already present in a directive are not duplicated;
/// directives missing from `policy` are created.
pub fn merge_csp(policy: &mut CspPolicy, additions: &CspPolicy) {
    for (directive, sources) in additions {
        let existing = policy.entry(directive.clone()).or_default();
        for source in sources {
            if !existing.contains(source) {
                existing.push(source.clone());
            }
        }
    }
}

/// Render a policy back into a header value.
pub fn render_csp(policy: &CspPolicy) -> String {
    policy
        .iter()
        .map(|(directive, sources)| {
            if sources.is_empty() {
                directive.clone()
            } else {
                format!("{directive} {}", sources.join(" "))
            }
        })
        .collect::<Vec<String>>()
        .join("; ")
}

/// The sources the map page needs: tiles from the configured tile server, plus inline style and
/// script for the embedded Leaflet bootstrap.
pub fn map_page_additions(tile_domain: &str) -> CspPolicy {
    let mut additions = CspPolicy::new();
    additions.insert("img-src".to_string(), vec![tile_domain.to_string()]);
    additions.insert("style-src".to_string(), vec!["'unsafe-inline'".to_string()]);
    additions.insert("script-src".to_string(), vec!["'unsafe-inline'".to_string()]);
    additions
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_a_typical_policy() {
        let policy = parse_csp("default-src 'self'; img-src 'self' data:; style-src 'self'");
        assert_eq!(policy.len(), 3);
        assert_eq!(policy["default-src"], vec!["'self'"]);
        assert_eq!(policy["img-src"], vec!["'self'", "data:"]);
    }

    #[test]
    fn parse_empty_header() {
        assert!(parse_csp("").is_empty());
        assert!(parse_csp("   ").is_empty());
    }

    #[test]
    fn merge_preserves_unrelated_directives() {
        let mut policy = parse_csp("default-src 'self'; img-src 'self'");
        merge_csp(&mut policy, &map_page_additions("https://*.tile.openstreetmap.org"));
        assert_eq!(policy["default-src"], vec!["'self'"]);
        assert_eq!(policy["img-src"], vec!["'self'", "https://*.tile.openstreetmap.org"]);
        assert_eq!(policy["style-src"], vec!["'unsafe-inline'"]);
    }

    #[test]
    fn merge_does_not_duplicate_sources() {
        let mut policy = parse_csp("img-src https://*.tile.openstreetmap.org");
        merge_csp(&mut policy, &map_page_additions("https://*.tile.openstreetmap.org"));
        assert_eq!(policy["img-src"], vec!["https://*.tile.openstreetmap.org"]);
    }

    #[test]
    fn merge_into_empty_policy_creates_the_header() {
        let mut policy = CspPolicy::new();
        merge_csp(&mut policy, &map_page_additions("https://tiles.example.com"));
        let rendered = render_csp(&policy);
        assert_eq!(rendered, "img-src https://tiles.example.com; script-src 'unsafe-inline'; style-src 'unsafe-inline'");
    }

    #[test]
    fn round_trip_is_stable() {
        let header = "default-src 'self'; img-src 'self' data:";
        let rendered = render_csp(&parse_csp(header));
        assert_eq!(parse_csp(&rendered), parse_csp(header));
    }
}
