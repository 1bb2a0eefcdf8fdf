//! Decrypted vault item views consumed by the script generators.
//!
//! These are read-only projections handed in by the vault layer. Decryption,
//! storage, and item lifecycle are the caller's concern.

use serde::{Deserialize, Serialize};

/// Policy for deciding whether a saved URI matches a page or tab URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum UriMatchStrategy {
    /// Registrable domains match, or both domains share a configured
    /// equivalence class.
    #[default]
    Domain,
    /// Hosts (including port) match exactly.
    Host,
    /// Target URL starts with the saved URI.
    StartsWith,
    /// Full string equality.
    Exact,
    /// Saved URI is a regular expression tested against the target URL.
    RegularExpression,
    /// Never matches; excluded from saved-URL reporting as well.
    Never,
}

/// One saved URI on a login item, with an optional per-URI match override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUriView {
    pub uri: Option<String>,
    /// Per-URI strategy; `None` falls back to the caller's default.
    #[serde(rename = "match")]
    pub match_strategy: Option<UriMatchStrategy>,
}

/// Decrypted login item attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginView {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Time-based one-time-code secret, resolved to a code by a collaborator.
    pub totp: Option<String>,
    pub uris: Vec<LoginUriView>,
}

/// Decrypted payment card attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardView {
    pub cardholder_name: Option<String>,
    pub brand: Option<String>,
    pub number: Option<String>,
    /// Stringified month integer with no zero padding ("1" for January).
    pub exp_month: Option<String>,
    /// User-entered year string, expected to be 2 or 4 digits.
    pub exp_year: Option<String>,
    pub code: Option<String>,
}

/// Decrypted identity attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityView {
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub username: Option<String>,
}

/// A decrypted vault item restricted to the fillable variants.
///
/// Other vault item types (secure notes, SSH keys, ...) are not fillable and
/// deserialize to a JSON `type` tag this enum rejects; the JSON entry points
/// report that as "nothing to autofill" rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum CipherView {
    Login(LoginView),
    Card(CardView),
    Identity(IdentityView),
}

impl LoginView {
    /// Saved URIs eligible for reporting to the executor, excluding any the
    /// user marked as never-match.
    pub fn reportable_uris(&self) -> Vec<String> {
        self.uris
            .iter()
            .filter(|u| u.match_strategy != Some(UriMatchStrategy::Never))
            .filter_map(|u| u.uri.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cipher_view_rejects_unfillable_types() {
        let json = r#"{"type": "secureNote", "data": {}}"#;
        assert!(serde_json::from_str::<CipherView>(json).is_err());
    }

    #[test]
    fn login_uri_match_strategy_round_trips() {
        let uri = LoginUriView {
            uri: Some("https://example.com".to_string()),
            match_strategy: Some(UriMatchStrategy::Never),
        };
        let json = serde_json::to_string(&uri).expect("serialize");
        assert!(json.contains("\"match\":\"never\""));
    }

    #[test]
    fn reportable_uris_skips_never_match_entries() {
        let login = LoginView {
            uris: vec![
                LoginUriView {
                    uri: Some("https://a.com".to_string()),
                    match_strategy: None,
                },
                LoginUriView {
                    uri: Some("https://b.com".to_string()),
                    match_strategy: Some(UriMatchStrategy::Never),
                },
            ],
            ..Default::default()
        };
        assert_eq!(login.reportable_uris(), vec!["https://a.com".to_string()]);
    }
}
