//! Attribute matching primitives.
//!
//! Keywords come in four forms, tried in this order: `regex=<pattern>`
//! (case-insensitive), `csv=<a,b,c>` (any entry equals the attribute),
//! `<attr>=<keyword>` prefix forms pinning a keyword to one attribute kind,
//! and bare literals (case-insensitive equality). A malformed regex never
//! aborts a fill: it logs and counts as no match.

use regex::RegexBuilder;

use crate::models::{AutofillField, FILL_MATCH_ATTRIBUTES, FUZZY_MATCH_ATTRIBUTES};

/// Returns true when `keyword` matches the attribute value `property`.
///
/// The property value is trimmed and stripped of embedded newlines before
/// comparison. Bare keywords compare by case-insensitive equality; use
/// [`fuzzy_match`] for containment semantics.
pub fn field_property_is_match(property: &str, keyword: &str) -> bool {
    let property = property.replace(['\r', '\n'], "");
    let property = property.trim();

    if let Some(pattern) = keyword.strip_prefix("regex=") {
        return match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(re) => re.is_match(property),
            Err(err) => {
                log::warn!("ignoring malformed keyword regex '{pattern}': {err}");
                false
            }
        };
    }

    if let Some(list) = keyword.strip_prefix("csv=") {
        return list
            .split(',')
            .any(|entry| entry.trim().eq_ignore_ascii_case(property));
    }

    keyword.eq_ignore_ascii_case(property)
}

/// Matches a `<prefix>=<keyword>` form against one attribute kind.
///
/// `id=user` matches only the element id, `name=user` only the name
/// attribute, and so on. The remainder after the prefix is evaluated with
/// the full [`field_property_is_match`] grammar, so `id=regex=^usr` works.
pub fn field_property_is_prefix_match(property: &str, keyword: &str, prefix: &str) -> bool {
    match keyword.strip_prefix(prefix).and_then(|k| k.strip_prefix('=')) {
        Some(rest) => field_property_is_match(property, rest),
        None => false,
    }
}

/// Finds the first keyword in `names` that matches any attribute of `field`.
///
/// Keyword order wins over attribute order: each keyword is tried against
/// every attribute before the next keyword is considered, so earlier (more
/// specific) keywords take priority.
pub fn find_matching_field_index(field: &AutofillField, names: &[String]) -> Option<usize> {
    for (i, name) in names.iter().enumerate() {
        if name.contains('=') {
            for attr in FILL_MATCH_ATTRIBUTES {
                if let Some(value) = field.attribute(*attr) {
                    if field_property_is_prefix_match(value, name, attr.keyword_prefix()) {
                        return Some(i);
                    }
                }
            }
        }
        for attr in FILL_MATCH_ATTRIBUTES {
            if let Some(value) = field.attribute(*attr) {
                if field_property_is_match(value, name) {
                    return Some(i);
                }
            }
        }
    }
    None
}

/// Containment match: true when any option occurs as a substring of the
/// trimmed, lowercased `value`.
pub fn fuzzy_match(options: &[String], value: &str) -> bool {
    if options.is_empty() || value.is_empty() {
        return false;
    }
    let value = value.replace(['\r', '\n'], "").trim().to_lowercase();
    if value.is_empty() {
        return false;
    }
    options.iter().any(|option| value.contains(option.as_str()))
}

/// Fuzzy-matches `names` against the wider attribute set, labels above the
/// element and `data-*` values included.
pub fn field_is_fuzzy_match(field: &AutofillField, names: &[String]) -> bool {
    FUZZY_MATCH_ATTRIBUTES.iter().any(|attr| {
        field
            .attribute(*attr)
            .is_some_and(|value| fuzzy_match(names, value))
    })
}

/// Slot matching for card and identity compilers.
///
/// `value` is reduced to its alphanumeric characters; each option is reduced
/// by dropping hyphens. Options listed in `contains_options` may match as a
/// substring, all others require equality. An empty `contains_options` means
/// every option may match by containment.
pub fn is_field_match(value: &str, options: &[String], contains_options: &[String]) -> bool {
    let value: String = value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    for option in options {
        let check_contains = contains_options.is_empty() || contains_options.contains(option);
        let option = option.to_lowercase().replace('-', "");
        if value == option || (check_contains && value.contains(&option)) {
            return true;
        }
    }
    false
}

/// Splits an attribute value into words at camelCase boundaries and
/// non-alphanumeric separators.
fn attribute_words(value: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in value.chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() && prev_lower && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = c.is_lowercase();
            current.extend(c.to_lowercase());
        } else {
            prev_lower = false;
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Detects site-search boxes by whole-word comparison so that short
/// keywords like "go" cannot fire on substrings.
pub fn is_search_field(field: &AutofillField, search_names: &[String]) -> bool {
    let candidates = [
        field.field_type.as_deref(),
        field.html_name.as_deref(),
        field.html_id.as_deref(),
        field.placeholder.as_deref(),
    ];
    candidates.iter().flatten().any(|value| {
        attribute_words(value)
            .iter()
            .any(|word| search_names.contains(word))
    })
}

/// True when the field's input type is never an autofill target, or the
/// field is a search box.
pub fn is_excluded_field_type(
    field: &AutofillField,
    excluded_types: &[String],
    search_names: &[String],
) -> bool {
    if excluded_types.iter().any(|t| t == field.type_str()) {
        return true;
    }
    is_search_field(field, search_names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AutofillField;

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn field_with_id_and_name(id: &str, name: &str) -> AutofillField {
        AutofillField {
            opid: "__0".to_string(),
            html_id: Some(id.to_string()),
            html_name: Some(name.to_string()),
            viewable: true,
            ..Default::default()
        }
    }

    #[test]
    fn literal_keyword_requires_equality() {
        assert!(field_property_is_match("Email", "email"));
        assert!(!field_property_is_match("email address", "email"));
    }

    #[test]
    fn property_value_is_trimmed_and_newline_stripped() {
        assert!(field_property_is_match("  user\nname ", "username"));
    }

    #[test]
    fn regex_keyword_matches_case_insensitively() {
        assert!(field_property_is_match("LoginEmail", "regex=^login"));
        assert!(!field_property_is_match("email", "regex=^login"));
    }

    #[test]
    fn malformed_regex_is_no_match() {
        assert!(!field_property_is_match("anything", "regex=[unclosed"));
    }

    #[test]
    fn csv_keyword_matches_any_entry() {
        assert!(field_property_is_match("otp", "csv=code, otp ,pin"));
        assert!(!field_property_is_match("otpcode", "csv=code,otp,pin"));
    }

    #[test]
    fn prefix_keyword_pins_to_one_attribute() {
        let field = field_with_id_and_name("user", "something-else");
        assert_eq!(
            find_matching_field_index(&field, &owned(&["id=user"])),
            Some(0)
        );
        assert_eq!(find_matching_field_index(&field, &owned(&["name=user"])), None);
    }

    #[test]
    fn earlier_keyword_wins_over_earlier_attribute() {
        // "login" only matches htmlName, "email" matches htmlID; the keyword
        // that comes first in the list decides.
        let field = field_with_id_and_name("email", "login");
        assert_eq!(
            find_matching_field_index(&field, &owned(&["login", "email"])),
            Some(0)
        );
        assert_eq!(
            find_matching_field_index(&field, &owned(&["email", "login"])),
            Some(0)
        );
    }

    #[test]
    fn fuzzy_match_is_containment() {
        assert!(fuzzy_match(&owned(&["user"]), "new-user-field"));
        assert!(!fuzzy_match(&owned(&["user"]), "shopping-cart"));
        assert!(!fuzzy_match(&owned(&["user"]), "   "));
    }

    #[test]
    fn is_field_match_distinguishes_equality_from_containment() {
        let options = owned(&["cc-name", "name"]);
        let contains = owned(&["cc-name"]);
        assert!(is_field_match("cc_name_on_card", &options, &contains));
        assert!(is_field_match("Name", &options, &contains));
        // "name" is equality-only here, so a longer value must not match it.
        assert!(!is_field_match("hostname", &options, &contains));
    }

    #[test]
    fn search_detection_splits_camel_case() {
        let names = owned(&["search", "query", "find", "go"]);
        let field = field_with_id_and_name("siteSearchBox", "q");
        assert!(is_search_field(&field, &names));

        // "go" inside "category" must not fire.
        let field = field_with_id_and_name("category", "cargo-type");
        assert!(!is_search_field(&field, &names));
    }
}
