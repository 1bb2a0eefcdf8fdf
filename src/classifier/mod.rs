//! Field classification: deciding which collected page fields are password,
//! username, or one-time-code inputs before any script is compiled.

use serde::{Deserialize, Serialize};

use crate::keywords::KeywordTables;
use crate::matcher::{
    field_is_fuzzy_match, find_matching_field_index, is_excluded_field_type,
};
use crate::models::{AutofillField, AutofillPageDetails, FormInfo};

/// One form on the page together with its classified login fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub form: FormInfo,
    pub username: Option<AutofillField>,
    pub password: AutofillField,
    pub passwords: Vec<AutofillField>,
}

/// Outcome of password-change inference over a form's password values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: Option<String>,
    pub new_password: String,
}

/// True when an attribute value looks like it names a password input.
///
/// Whitespace, `_` and `-` are stripped before the check, so "PASSWORD-LESS"
/// and "passwordless" are rejected by the same exclusion entry.
pub fn value_is_like_password(value: &str, tables: &KeywordTables) -> bool {
    let cleaned: String = value
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .collect();
    if !cleaned.contains("password") {
        return false;
    }
    !tables
        .password_field_exclude_list
        .iter()
        .any(|excluded| cleaned.contains(excluded.as_str()))
}

/// True when id, name, or placeholder carries an ignore-list substring
/// (search boxes, captchas) that takes the field out of login autofill.
pub fn field_has_disqualifying_attribute_value(
    field: &AutofillField,
    tables: &KeywordTables,
) -> bool {
    let checked = [
        field.html_id.as_deref(),
        field.html_name.as_deref(),
        field.placeholder.as_deref(),
    ];
    checked.iter().flatten().any(|value| {
        let cleaned: String = value
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect();
        tables
            .field_ignore_list
            .iter()
            .any(|ignored| cleaned.contains(ignored.as_str()))
    })
}

/// Collects the page's password fields in document order.
///
/// `type=password` inputs qualify directly; `type=text` inputs qualify only
/// when an attribute looks like a password name and `fill_new_password` is
/// set. One-time-code fields are never password fields even when rendered as
/// `type=password`.
pub fn load_password_fields<'a>(
    page_details: &'a AutofillPageDetails,
    can_be_hidden: bool,
    can_be_read_only: bool,
    must_be_empty: bool,
    fill_new_password: bool,
    tables: &KeywordTables,
) -> Vec<&'a AutofillField> {
    let all_totp_names = tables.all_totp_field_names();
    page_details
        .fields
        .iter()
        .filter(|f| {
            if f.is_span_only() {
                return false;
            }
            let is_password = f.type_str() == "password";
            if !is_password
                && is_excluded_field_type(f, &tables.excluded_field_types, &tables.search_field_names)
            {
                return false;
            }
            let is_like_password = || {
                f.type_str() == "text"
                    && [f.html_id.as_deref(), f.html_name.as_deref(), f.placeholder.as_deref()]
                        .iter()
                        .flatten()
                        .any(|value| value_is_like_password(value, tables))
            };
            if !is_password && !is_like_password() {
                return false;
            }
            if field_has_disqualifying_attribute_value(f, tables) {
                return false;
            }
            if field_is_fuzzy_match(f, &all_totp_names) {
                return false;
            }
            !f.disabled
                && (can_be_read_only || !f.readonly)
                && (is_password || fill_new_password)
                && (can_be_hidden || f.viewable)
                && (!must_be_empty || f.value_is_empty())
        })
        .collect()
}

/// Locates the username input belonging to `password_field`.
///
/// Only fields earlier in document order are considered, restricted to the
/// password's form unless `without_form` is set. The first eligible field is
/// kept as the fallback answer; a field that matches a username keyword wins
/// outright and ends the scan.
pub fn find_username_field<'a>(
    page_details: &'a AutofillPageDetails,
    password_field: &AutofillField,
    can_be_hidden: bool,
    can_be_read_only: bool,
    without_form: bool,
    tables: &KeywordTables,
) -> Option<&'a AutofillField> {
    let mut username_field: Option<&AutofillField> = None;
    for f in &page_details.fields {
        if f.element_number >= password_field.element_number {
            break;
        }
        if f.is_span_only() {
            continue;
        }
        let eligible = !f.disabled
            && (can_be_read_only || !f.readonly)
            && (without_form || f.form == password_field.form)
            && (can_be_hidden || f.viewable)
            && f.type_is_one_of(&["text", "email", "tel"]);
        if !eligible {
            continue;
        }
        if find_matching_field_index(f, &tables.username_field_names).is_some() {
            return Some(f);
        }
        if username_field.is_none() {
            username_field = Some(f);
        }
    }
    username_field
}

/// Locates the one-time-code input belonging to `password_field`.
///
/// A candidate must carry a TOTP hint (fuzzy keyword or the `one-time-code`
/// autocomplete value) and must not look like a recovery-code field. An
/// exact keyword or autocomplete hit ends the scan.
pub fn find_totp_field<'a>(
    page_details: &'a AutofillPageDetails,
    password_field: &AutofillField,
    can_be_hidden: bool,
    can_be_read_only: bool,
    without_form: bool,
    tables: &KeywordTables,
) -> Option<&'a AutofillField> {
    let all_totp_names = tables.all_totp_field_names();
    let mut totp_field: Option<&AutofillField> = None;
    for f in &page_details.fields {
        if f.is_span_only() {
            continue;
        }
        let has_autocomplete_hint = f.auto_complete_type.as_deref() == Some("one-time-code");
        let eligible = !field_has_disqualifying_attribute_value(f, tables)
            && !f.disabled
            && (can_be_read_only || !f.readonly)
            && (without_form || f.form == password_field.form)
            && (can_be_hidden || f.viewable)
            && f.type_is_one_of(&["text", "number"])
            && !field_is_fuzzy_match(f, &tables.recovery_code_field_names)
            && (field_is_fuzzy_match(f, &all_totp_names) || has_autocomplete_hint);
        if !eligible {
            continue;
        }
        totp_field = Some(f);
        if find_matching_field_index(f, &tables.totp_field_names).is_some() || has_autocomplete_hint
        {
            break;
        }
    }
    totp_field
}

/// Groups the page's password fields by owning form and pairs each group
/// with its username field, relaxing visibility constraints when the strict
/// pass finds nothing.
pub fn forms_with_password_fields(
    page_details: &AutofillPageDetails,
    tables: &KeywordTables,
) -> Vec<FormData> {
    let password_fields = load_password_fields(page_details, true, true, false, false, tables);
    if password_fields.is_empty() {
        return Vec::new();
    }

    let mut form_keys: Vec<&String> = page_details.forms.keys().collect();
    form_keys.sort();

    let mut form_data = Vec::new();
    for form_key in form_keys {
        let form_passwords: Vec<&AutofillField> = password_fields
            .iter()
            .copied()
            .filter(|pf| pf.form.as_ref() == Some(form_key))
            .collect();
        let Some(first_password) = form_passwords.first() else {
            continue;
        };
        let username = find_username_field(page_details, first_password, false, false, false, tables)
            .or_else(|| {
                find_username_field(page_details, first_password, true, true, false, tables)
            });
        form_data.push(FormData {
            form: page_details.forms[form_key].clone(),
            username: username.cloned(),
            password: (*first_password).clone(),
            passwords: form_passwords.into_iter().cloned().collect(),
        });
    }
    form_data
}

/// Infers current/new password values from a form's password inputs, given
/// in document order.
///
/// Two equal values mean a registration or reset form with a confirmation
/// input. Three values mean a change form: the repeated value is the new
/// password and the odd one out is the current password.
pub fn infer_password_change(values: &[&str]) -> Option<PasswordChange> {
    match values {
        [a, b] if a == b && !a.is_empty() => Some(PasswordChange {
            current_password: None,
            new_password: (*a).to_string(),
        }),
        [a, b, c] if !b.is_empty() => {
            let new_password = (*b).to_string();
            if a != b && b == c {
                Some(PasswordChange {
                    current_password: Some((*a).to_string()),
                    new_password,
                })
            } else if b != c && a == b {
                Some(PasswordChange {
                    current_password: Some((*c).to_string()),
                    new_password,
                })
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AutofillField;
    use std::collections::HashMap;

    fn page(fields: Vec<AutofillField>) -> AutofillPageDetails {
        AutofillPageDetails {
            url: "https://example.com/login".to_string(),
            fields,
            forms: HashMap::new(),
        }
    }

    fn text_field(opid: &str, element_number: usize, id: &str) -> AutofillField {
        AutofillField {
            opid: opid.to_string(),
            element_number,
            viewable: true,
            html_id: Some(id.to_string()),
            field_type: Some("text".to_string()),
            ..Default::default()
        }
    }

    fn password_field(opid: &str, element_number: usize) -> AutofillField {
        AutofillField {
            opid: opid.to_string(),
            element_number,
            viewable: true,
            html_id: Some("pass".to_string()),
            field_type: Some("password".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn like_password_respects_exclusions() {
        let tables = KeywordTables::default();
        assert!(value_is_like_password("login_password", &tables));
        assert!(value_is_like_password("Pass Word", &tables));
        assert!(!value_is_like_password("username", &tables));
        assert!(!value_is_like_password("password-less-signin", &tables));
        assert!(!value_is_like_password("forgot_password_link", &tables));
    }

    #[test]
    fn text_password_fields_need_fill_new_password() {
        let tables = KeywordTables::default();
        let mut f = text_field("__0", 0, "new-password-input");
        f.html_name = Some("newPassword".to_string());
        let details = page(vec![f]);
        assert!(load_password_fields(&details, false, false, false, false, &tables).is_empty());
        assert_eq!(
            load_password_fields(&details, false, false, false, true, &tables).len(),
            1
        );
    }

    #[test]
    fn captcha_fields_are_disqualified() {
        let tables = KeywordTables::default();
        let mut f = password_field("__0", 0);
        f.html_id = Some("captcha-password".to_string());
        let details = page(vec![f]);
        assert!(load_password_fields(&details, true, true, false, false, &tables).is_empty());
    }

    #[test]
    fn username_keyword_match_beats_first_eligible_field() {
        let tables = KeywordTables::default();
        let details = page(vec![
            text_field("__0", 0, "search-other"),
            text_field("__1", 1, "username"),
            password_field("__2", 2),
        ]);
        let found = find_username_field(&details, &details.fields[2], false, false, true, &tables);
        assert_eq!(found.map(|f| f.opid.as_str()), Some("__1"));
    }

    #[test]
    fn username_scan_stops_at_password_position() {
        let tables = KeywordTables::default();
        let details = page(vec![
            password_field("__0", 0),
            text_field("__1", 1, "username"),
        ]);
        let found = find_username_field(&details, &details.fields[0], true, true, true, &tables);
        assert!(found.is_none());
    }

    #[test]
    fn totp_field_requires_a_totp_hint() {
        let tables = KeywordTables::default();
        let mut plain = text_field("__0", 0, "comment");
        plain.field_type = Some("number".to_string());
        let mut totp = text_field("__1", 1, "totpcode");
        totp.field_type = Some("number".to_string());
        let pwd = password_field("__2", 2);
        let details = page(vec![plain, totp, pwd.clone()]);
        let found = find_totp_field(&details, &pwd, false, false, true, &tables);
        assert_eq!(found.map(|f| f.opid.as_str()), Some("__1"));
    }

    #[test]
    fn recovery_code_fields_are_not_totp_targets() {
        let tables = KeywordTables::default();
        let mut recovery = text_field("__0", 0, "recovery-code");
        recovery.field_type = Some("text".to_string());
        let pwd = password_field("__1", 1);
        let details = page(vec![recovery, pwd.clone()]);
        assert!(find_totp_field(&details, &pwd, false, false, true, &tables).is_none());
    }

    #[test]
    fn autocomplete_hint_marks_totp_field() {
        let tables = KeywordTables::default();
        let mut f = text_field("__0", 0, "unlabeled");
        f.auto_complete_type = Some("one-time-code".to_string());
        let pwd = password_field("__1", 1);
        let details = page(vec![f, pwd.clone()]);
        let found = find_totp_field(&details, &pwd, false, false, true, &tables);
        assert_eq!(found.map(|f| f.opid.as_str()), Some("__0"));
    }

    #[test]
    fn password_change_with_three_fields() {
        assert_eq!(
            infer_password_change(&["old", "new", "new"]),
            Some(PasswordChange {
                current_password: Some("old".to_string()),
                new_password: "new".to_string(),
            })
        );
        assert_eq!(
            infer_password_change(&["new", "new", "old"]),
            Some(PasswordChange {
                current_password: Some("old".to_string()),
                new_password: "new".to_string(),
            })
        );
        assert_eq!(infer_password_change(&["a", "b", "c"]), None);
    }

    #[test]
    fn password_change_with_confirmation_pair() {
        assert_eq!(
            infer_password_change(&["new", "new"]),
            Some(PasswordChange {
                current_password: None,
                new_password: "new".to_string(),
            })
        );
        assert_eq!(infer_password_change(&["a", "b"]), None);
        assert_eq!(infer_password_change(&["", ""]), None);
    }
}
