//! URI matching and iframe trust evaluation.
//!
//! A fill only auto-submits credentials into a frame whose URL the saved
//! login would match on its own; anything else is flagged untrusted so the
//! executor can warn instead of silently filling a phishing frame.

pub mod domain;

use std::collections::HashSet;

use regex::RegexBuilder;

use crate::models::{LoginUriView, LoginView, UriMatchStrategy};
use domain::{extract_domain, extract_host};

/// Supplies user-configured equivalent-domain classes
/// ("apple.com"/"icloud.com" style groupings).
pub trait EquivalentDomainsSource {
    /// All domains equivalent to `domain`, the domain itself included when it
    /// belongs to a class. An empty set means no grouping applies.
    fn equivalent_domains(&self, domain: &str) -> HashSet<String>;
}

/// A source with no equivalence classes configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEquivalentDomains;

impl EquivalentDomainsSource for NoEquivalentDomains {
    fn equivalent_domains(&self, _domain: &str) -> HashSet<String> {
        HashSet::new()
    }
}

/// Equivalence classes held as plain data, for callers that pass the user's
/// configured groupings over a serialization boundary.
#[derive(Debug, Clone, Default)]
pub struct EquivalentDomainClasses {
    classes: Vec<Vec<String>>,
}

impl EquivalentDomainClasses {
    pub fn new(classes: Vec<Vec<String>>) -> Self {
        Self { classes }
    }
}

impl EquivalentDomainsSource for EquivalentDomainClasses {
    fn equivalent_domains(&self, domain: &str) -> HashSet<String> {
        self.classes
            .iter()
            .filter(|class| class.iter().any(|d| d == domain))
            .flatten()
            .cloned()
            .collect()
    }
}

fn uri_matches(
    uri: &LoginUriView,
    url: &str,
    default_strategy: UriMatchStrategy,
    equivalent_domains: &dyn EquivalentDomainsSource,
) -> bool {
    let Some(saved_uri) = uri.uri.as_deref().filter(|u| !u.is_empty()) else {
        return false;
    };
    match uri.match_strategy.unwrap_or(default_strategy) {
        UriMatchStrategy::Domain => {
            let url_domain = extract_domain(url);
            if url_domain.is_empty() {
                return false;
            }
            let saved_domain = extract_domain(saved_uri);
            if saved_domain.is_empty() {
                return false;
            }
            if saved_domain == url_domain {
                return true;
            }
            equivalent_domains
                .equivalent_domains(&url_domain)
                .contains(&saved_domain)
        }
        UriMatchStrategy::Host => {
            let url_host = extract_host(url);
            !url_host.is_empty() && url_host == extract_host(saved_uri)
        }
        UriMatchStrategy::StartsWith => url.starts_with(saved_uri),
        UriMatchStrategy::Exact => url == saved_uri,
        UriMatchStrategy::RegularExpression => {
            match RegexBuilder::new(saved_uri).case_insensitive(true).build() {
                Ok(re) => re.is_match(url),
                Err(err) => {
                    log::warn!("ignoring malformed uri match regex '{saved_uri}': {err}");
                    false
                }
            }
        }
        UriMatchStrategy::Never => false,
    }
}

/// True when any of the login's saved URIs matches `url` under its
/// configured (or the default) match strategy.
pub fn login_matches_url(
    login: &LoginView,
    url: &str,
    default_strategy: UriMatchStrategy,
    equivalent_domains: &dyn EquivalentDomainsSource,
) -> bool {
    login
        .uris
        .iter()
        .any(|uri| uri_matches(uri, url, default_strategy, equivalent_domains))
}

/// Decides whether `page_url` (the frame the fields were collected from) is
/// an untrusted iframe relative to `tab_url` (the top-level tab).
///
/// The top frame is always trusted. A subframe is trusted only when the
/// login's own URIs match the frame URL, so a login saved for
/// `accounts.example.com` embedded in `example.com` stays fillable while a
/// foreign frame does not.
pub fn in_untrusted_iframe(
    page_url: &str,
    tab_url: &str,
    login: &LoginView,
    default_strategy: UriMatchStrategy,
    equivalent_domains: &dyn EquivalentDomainsSource,
) -> bool {
    if page_url == tab_url {
        return false;
    }
    !login_matches_url(login, page_url, default_strategy, equivalent_domains)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_with(uri: &str, strategy: Option<UriMatchStrategy>) -> LoginView {
        LoginView {
            uris: vec![LoginUriView {
                uri: Some(uri.to_string()),
                match_strategy: strategy,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn domain_strategy_matches_subdomains() {
        let login = login_with("https://example.com", None);
        assert!(login_matches_url(
            &login,
            "https://accounts.example.com/signin",
            UriMatchStrategy::Domain,
            &NoEquivalentDomains,
        ));
        assert!(!login_matches_url(
            &login,
            "https://another-example.com",
            UriMatchStrategy::Domain,
            &NoEquivalentDomains,
        ));
    }

    #[test]
    fn domain_strategy_honors_equivalent_domains() {
        let login = login_with("https://apple.com", None);
        let classes = EquivalentDomainClasses::new(vec![vec![
            "apple.com".to_string(),
            "icloud.com".to_string(),
        ]]);
        assert!(login_matches_url(
            &login,
            "https://www.icloud.com",
            UriMatchStrategy::Domain,
            &classes,
        ));
        assert!(!login_matches_url(
            &login,
            "https://www.icloud.com",
            UriMatchStrategy::Domain,
            &NoEquivalentDomains,
        ));
    }

    #[test]
    fn host_strategy_distinguishes_ports() {
        let login = login_with("https://example.com:8443", Some(UriMatchStrategy::Host));
        assert!(login_matches_url(
            &login,
            "https://example.com:8443/admin",
            UriMatchStrategy::Domain,
            &NoEquivalentDomains,
        ));
        assert!(!login_matches_url(
            &login,
            "https://example.com/admin",
            UriMatchStrategy::Domain,
            &NoEquivalentDomains,
        ));
    }

    #[test]
    fn exact_and_starts_with_strategies() {
        let login = login_with(
            "https://example.com/login",
            Some(UriMatchStrategy::StartsWith),
        );
        assert!(login_matches_url(
            &login,
            "https://example.com/login?next=1",
            UriMatchStrategy::Domain,
            &NoEquivalentDomains,
        ));

        let login = login_with("https://example.com/login", Some(UriMatchStrategy::Exact));
        assert!(!login_matches_url(
            &login,
            "https://example.com/login?next=1",
            UriMatchStrategy::Domain,
            &NoEquivalentDomains,
        ));
    }

    #[test]
    fn malformed_regex_never_matches() {
        let login = login_with("[unclosed", Some(UriMatchStrategy::RegularExpression));
        assert!(!login_matches_url(
            &login,
            "https://example.com",
            UriMatchStrategy::Domain,
            &NoEquivalentDomains,
        ));
    }

    #[test]
    fn never_strategy_blocks_even_exact_url() {
        let login = login_with("https://example.com", Some(UriMatchStrategy::Never));
        assert!(!login_matches_url(
            &login,
            "https://example.com",
            UriMatchStrategy::Domain,
            &NoEquivalentDomains,
        ));
    }

    #[test]
    fn top_frame_is_always_trusted() {
        let login = login_with("https://unrelated.net", None);
        assert!(!in_untrusted_iframe(
            "https://example.com/login",
            "https://example.com/login",
            &login,
            UriMatchStrategy::Domain,
            &NoEquivalentDomains,
        ));
    }

    #[test]
    fn foreign_subframe_is_untrusted() {
        let login = login_with("https://example.com", None);
        assert!(in_untrusted_iframe(
            "https://evil.test/frame",
            "https://example.com/login",
            &login,
            UriMatchStrategy::Domain,
            &NoEquivalentDomains,
        ));
        assert!(!in_untrusted_iframe(
            "https://accounts.example.com/frame",
            "https://example.com/login",
            &login,
            UriMatchStrategy::Domain,
            &NoEquivalentDomains,
        ));
    }
}
