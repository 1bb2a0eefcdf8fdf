use std::collections::HashMap;

use super::*;
use crate::models::{CardView, FillActionKind, FormInfo, LoginUriView, LoginView, SelectInfo};
use crate::trust::NoEquivalentDomains;

struct FixedTotp(&'static str);

impl TotpCodeProvider for FixedTotp {
    fn code_for(&self, _secret: &str) -> Option<String> {
        Some(self.0.to_string())
    }
}

fn field(opid: &str, element_number: usize, field_type: &str, id: &str) -> AutofillField {
    AutofillField {
        opid: opid.to_string(),
        element_number,
        viewable: true,
        html_id: Some(id.to_string()),
        field_type: Some(field_type.to_string()),
        tag_name: Some("input".to_string()),
        form: Some("__form__0".to_string()),
        ..Default::default()
    }
}

fn login_page(fields: Vec<AutofillField>) -> AutofillPageDetails {
    let mut forms = HashMap::new();
    forms.insert(
        "__form__0".to_string(),
        FormInfo {
            html_id: Some("login-form".to_string()),
            ..Default::default()
        },
    );
    AutofillPageDetails {
        url: "https://example.com/login".to_string(),
        fields,
        forms,
    }
}

fn login_cipher(username: &str, password: &str) -> CipherView {
    CipherView::Login(LoginView {
        username: Some(username.to_string()),
        password: Some(password.to_string()),
        totp: None,
        uris: vec![LoginUriView {
            uri: Some("https://example.com".to_string()),
            match_strategy: None,
        }],
    })
}

fn options_for(tab_url: &str) -> GenerateFillScriptOptions {
    GenerateFillScriptOptions {
        tab_url: tab_url.to_string(),
        allow_totp_autofill: true,
        ..Default::default()
    }
}

fn fill_values(script: &FillScript) -> Vec<(String, String)> {
    script
        .script
        .iter()
        .filter(|a| a.action == FillActionKind::FillByOpid)
        .map(|a| (a.opid.clone(), a.value.clone().unwrap_or_default()))
        .collect()
}

#[test]
fn login_form_fills_username_then_password_and_focuses_password() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    let page = login_page(vec![
        field("__0", 0, "text", "username"),
        field("__1", 1, "password", "password"),
    ]);
    let script = generator
        .generate_fill_script(
            &page,
            &login_cipher("jdoe", "hunter2"),
            &options_for("https://example.com/login"),
        )
        .expect("script generated");

    assert_eq!(
        fill_values(&script),
        vec![
            ("__0".to_string(), "jdoe".to_string()),
            ("__1".to_string(), "hunter2".to_string()),
        ]
    );
    let last = script.script.last().expect("trailing action");
    assert_eq!(last.action, FillActionKind::FocusByOpid);
    assert_eq!(last.opid, "__1");
    assert!(!script.untrusted_iframe);
    assert_eq!(script.saved_urls, vec!["https://example.com".to_string()]);
}

#[test]
fn no_action_targets_the_same_opid_twice() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    // Two password fields in the same form resolve to the same username
    // field; it must be filled exactly once.
    let page = login_page(vec![
        field("__0", 0, "text", "username"),
        field("__1", 1, "password", "password"),
        field("__2", 2, "password", "confirm-password"),
    ]);
    let script = generator
        .generate_fill_script(
            &page,
            &login_cipher("jdoe", "hunter2"),
            &options_for("https://example.com/login"),
        )
        .expect("script generated");

    let mut fill_opids: Vec<&str> = script
        .script
        .iter()
        .filter(|a| a.action == FillActionKind::FillByOpid)
        .map(|a| a.opid.as_str())
        .collect();
    assert_eq!(fill_opids.len(), 3);
    fill_opids.sort_unstable();
    fill_opids.dedup();
    assert_eq!(fill_opids.len(), 3);
}

#[test]
fn compilation_is_idempotent_across_calls() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    let page = login_page(vec![
        field("__0", 0, "text", "email"),
        field("__1", 1, "password", "password"),
    ]);
    let cipher = login_cipher("jdoe@example.com", "hunter2");
    let options = options_for("https://example.com/login");

    let first = generator.generate_fill_script(&page, &cipher, &options);
    let second = generator.generate_fill_script(&page, &cipher, &options);
    assert_eq!(first, second);
}

#[test]
fn totp_code_is_distributed_across_per_digit_inputs() {
    let keywords = KeywordTables::default();
    let totp = FixedTotp("492039");
    let generator = FillScriptGenerator::new(&keywords, &totp, &NoEquivalentDomains);

    let mut fields = Vec::new();
    for i in 0..6 {
        let mut f = field(&format!("__{i}"), i, "number", &format!("otp-digit-{i}"));
        f.auto_complete_type = Some("one-time-code".to_string());
        fields.push(f);
    }
    let page = login_page(fields);
    let cipher = CipherView::Login(LoginView {
        totp: Some("JBSWY3DPEHPK3PXP".to_string()),
        ..Default::default()
    });
    let script = generator
        .generate_fill_script(&page, &cipher, &options_for("https://example.com/login"))
        .expect("script generated");

    let values: Vec<String> = fill_values(&script).into_iter().map(|(_, v)| v).collect();
    assert_eq!(values, vec!["4", "9", "2", "0", "3", "9"]);
}

#[test]
fn totp_code_fills_single_input_whole() {
    let keywords = KeywordTables::default();
    let totp = FixedTotp("492039");
    let generator = FillScriptGenerator::new(&keywords, &totp, &NoEquivalentDomains);

    let page = login_page(vec![field("__0", 0, "text", "totpcode")]);
    let cipher = CipherView::Login(LoginView {
        totp: Some("JBSWY3DPEHPK3PXP".to_string()),
        ..Default::default()
    });
    let script = generator
        .generate_fill_script(&page, &cipher, &options_for("https://example.com/login"))
        .expect("script generated");

    assert_eq!(
        fill_values(&script),
        vec![("__0".to_string(), "492039".to_string())]
    );
}

#[test]
fn username_only_page_respects_skip_flag() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    let page = login_page(vec![field("__0", 0, "email", "email")]);
    let cipher = login_cipher("jdoe@example.com", "hunter2");

    let options = options_for("https://example.com/login");
    let script = generator
        .generate_fill_script(&page, &cipher, &options)
        .expect("username-only fill");
    assert_eq!(
        fill_values(&script),
        vec![("__0".to_string(), "jdoe@example.com".to_string())]
    );

    let skipping = GenerateFillScriptOptions {
        skip_username_only_fill: true,
        ..options
    };
    assert!(generator.generate_fill_script(&page, &cipher, &skipping).is_none());
}

#[test]
fn foreign_frame_is_flagged_but_script_still_produced() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    let mut page = login_page(vec![
        field("__0", 0, "text", "username"),
        field("__1", 1, "password", "password"),
    ]);
    page.url = "https://evil.test/frame".to_string();
    let script = generator
        .generate_fill_script(
            &page,
            &login_cipher("jdoe", "hunter2"),
            &options_for("https://example.com/login"),
        )
        .expect("script generated");

    assert!(script.untrusted_iframe);
    assert_eq!(fill_values(&script).len(), 2);
}

#[test]
fn card_combined_expiry_follows_placeholder_format() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    let mut exp = field("__0", 0, "text", "card-expiration");
    exp.placeholder = Some("mm/yyyy".to_string());
    let page = login_page(vec![exp]);
    let cipher = CipherView::Card(CardView {
        exp_month: Some("3".to_string()),
        exp_year: Some("2024".to_string()),
        ..Default::default()
    });
    let script = generator
        .generate_fill_script(&page, &cipher, &options_for("https://example.com/checkout"))
        .expect("script generated");

    assert_eq!(
        fill_values(&script),
        vec![("__0".to_string(), "03/2024".to_string())]
    );
}

#[test]
fn card_combined_expiry_defaults_to_iso_order() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    let page = login_page(vec![field("__0", 0, "text", "card-expiration")]);
    let cipher = CipherView::Card(CardView {
        exp_month: Some("3".to_string()),
        exp_year: Some("24".to_string()),
        ..Default::default()
    });
    let script = generator
        .generate_fill_script(&page, &cipher, &options_for("https://example.com/checkout"))
        .expect("script generated");

    assert_eq!(
        fill_values(&script),
        vec![("__0".to_string(), "2024-03".to_string())]
    );
}

#[test]
fn card_month_resolves_thirteen_option_select() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    let mut month_options = vec![(Some("Month".to_string()), Some(String::new()))];
    for m in 1..=12u32 {
        month_options.push((Some(format!("{m:02}")), Some(m.to_string())));
    }
    let mut month = field("__0", 0, "select-one", "cc-exp-month");
    month.select_info = Some(SelectInfo {
        options: month_options,
    });
    let page = login_page(vec![month]);
    let cipher = CipherView::Card(CardView {
        exp_month: Some("3".to_string()),
        ..Default::default()
    });
    let script = generator
        .generate_fill_script(&page, &cipher, &options_for("https://example.com/checkout"))
        .expect("script generated");

    // Leading placeholder shifts real months to indexes 1..=12, so month 3
    // resolves to the option carrying value "3".
    assert_eq!(
        fill_values(&script),
        vec![("__0".to_string(), "3".to_string())]
    );
}

#[test]
fn card_year_select_matches_two_digit_options() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    let mut year = field("__0", 0, "select-one", "cc-exp-year");
    year.select_info = Some(SelectInfo {
        options: (24..=30)
            .map(|y| (Some(format!("20{y}")), Some(y.to_string())))
            .collect(),
    });
    let page = login_page(vec![year]);
    let cipher = CipherView::Card(CardView {
        exp_year: Some("2026".to_string()),
        ..Default::default()
    });
    let script = generator
        .generate_fill_script(&page, &cipher, &options_for("https://example.com/checkout"))
        .expect("script generated");

    assert_eq!(
        fill_values(&script),
        vec![("__0".to_string(), "26".to_string())]
    );
}

#[test]
fn identity_fills_composite_name_and_iso_state() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    let page = login_page(vec![
        field("__0", 0, "text", "full-name"),
        field("__1", 1, "text", "address-state"),
        field("__2", 2, "text", "address-country"),
    ]);
    let cipher = CipherView::Identity(crate::models::IdentityView {
        first_name: Some("Jane".to_string()),
        middle_name: Some("Q".to_string()),
        last_name: Some("Doe".to_string()),
        state: Some("New York".to_string()),
        country: Some("United States".to_string()),
        ..Default::default()
    });
    let script = generator
        .generate_fill_script(&page, &cipher, &options_for("https://example.com/account"))
        .expect("script generated");

    assert_eq!(
        fill_values(&script),
        vec![
            ("__0".to_string(), "Jane Q Doe".to_string()),
            ("__1".to_string(), "NY".to_string()),
            ("__2".to_string(), "US".to_string()),
        ]
    );
}

#[test]
fn identity_short_region_passes_through() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    let page = login_page(vec![field("__0", 0, "text", "address-state")]);
    let cipher = CipherView::Identity(crate::models::IdentityView {
        state: Some("NY".to_string()),
        ..Default::default()
    });
    let script = generator
        .generate_fill_script(&page, &cipher, &options_for("https://example.com/account"))
        .expect("script generated");

    assert_eq!(
        fill_values(&script),
        vec![("__0".to_string(), "NY".to_string())]
    );
}

#[test]
fn select_without_matching_option_produces_no_action() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    let mut country = field("__0", 0, "select-one", "address-country");
    country.select_info = Some(SelectInfo {
        options: vec![
            (Some("Germany".to_string()), Some("DE".to_string())),
            (Some("France".to_string()), Some("FR".to_string())),
        ],
    });
    let page = login_page(vec![country]);
    let cipher = CipherView::Identity(crate::models::IdentityView {
        country: Some("Narnia".to_string()),
        ..Default::default()
    });
    assert!(generator
        .generate_fill_script(&page, &cipher, &options_for("https://example.com/account"))
        .is_none());
}

#[test]
fn card_field_claims_at_most_one_slot() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    // __0 reads like a cardholder field by id and like a number field by
    // name; it must take only the cardholder slot so the real number input
    // still receives its fill.
    let mut holder = field("__0", 0, "text", "cardholder");
    holder.html_name = Some("cc-number".to_string());
    let number = field("__1", 1, "text", "cc-number");
    let page = login_page(vec![holder, number]);
    let cipher = CipherView::Card(CardView {
        cardholder_name: Some("Jane Doe".to_string()),
        number: Some("4111111111111111".to_string()),
        ..Default::default()
    });
    let script = generator
        .generate_fill_script(&page, &cipher, &options_for("https://example.com/checkout"))
        .expect("script generated");

    assert_eq!(
        fill_values(&script),
        vec![
            ("__0".to_string(), "Jane Doe".to_string()),
            ("__1".to_string(), "4111111111111111".to_string()),
        ]
    );
}

#[test]
fn card_slots_skip_search_fields() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    let mut search = field("__0", 0, "text", "site-search-box");
    search.html_name = Some("cardholder".to_string());
    let page = login_page(vec![search]);
    let cipher = CipherView::Card(CardView {
        cardholder_name: Some("Jane Doe".to_string()),
        ..Default::default()
    });
    assert!(generator
        .generate_fill_script(&page, &cipher, &options_for("https://example.com/checkout"))
        .is_none());
}

#[test]
fn identity_field_claims_at_most_one_slot() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    let mut city = field("__0", 0, "text", "address-city");
    city.html_name = Some("address-country".to_string());
    let country = field("__1", 1, "text", "address-country");
    let page = login_page(vec![city, country]);
    let cipher = CipherView::Identity(crate::models::IdentityView {
        city: Some("Berlin".to_string()),
        country: Some("DE".to_string()),
        ..Default::default()
    });
    let script = generator
        .generate_fill_script(&page, &cipher, &options_for("https://example.com/account"))
        .expect("script generated");

    assert_eq!(
        fill_values(&script),
        vec![
            ("__0".to_string(), "Berlin".to_string()),
            ("__1".to_string(), "DE".to_string()),
        ]
    );
}

#[test]
fn identity_slots_skip_search_fields() {
    let keywords = KeywordTables::default();
    let generator = FillScriptGenerator::new(&keywords, &NoTotpCodes, &NoEquivalentDomains);

    let mut search = field("__0", 0, "text", "site-search-box");
    search.html_name = Some("first-name".to_string());
    let page = login_page(vec![search]);
    let cipher = CipherView::Identity(crate::models::IdentityView {
        first_name: Some("Jane".to_string()),
        ..Default::default()
    });
    assert!(generator
        .generate_fill_script(&page, &cipher, &options_for("https://example.com/account"))
        .is_none());
}

#[test]
fn json_entry_point_compiles_a_login_script() {
    let input = serde_json::json!({
        "pageDetails": {
            "url": "https://example.com/login",
            "fields": [
                {"opid": "__0", "elementNumber": 0, "viewable": true,
                 "htmlID": "username", "type": "text", "tagName": "input"},
                {"opid": "__1", "elementNumber": 1, "viewable": true,
                 "htmlID": "current-password", "type": "password", "tagName": "input"}
            ],
            "forms": {}
        },
        "cipher": {
            "type": "login",
            "data": {
                "username": "jdoe",
                "password": "hunter2",
                "uris": [{"uri": "https://example.com"}]
            }
        },
        "options": {"tabUrl": "https://example.com/login"}
    });
    let output = generate_fill_script_json(&input.to_string()).unwrap();
    let output: serde_json::Value = serde_json::from_str(&output).unwrap();
    let actions = output["script"]["script"].as_array().unwrap();
    assert!(!actions.is_empty());
    assert!(actions
        .iter()
        .any(|a| a["action"] == "fill_by_opid" && a["value"] == "hunter2"));
}

#[test]
fn json_entry_point_treats_unfillable_items_as_empty() {
    let input = serde_json::json!({
        "pageDetails": {"url": "https://example.com", "fields": [], "forms": {}},
        "cipher": {"type": "secureNote", "data": {"note": "not for forms"}}
    });
    let output = generate_fill_script_json(&input.to_string()).unwrap();
    let output: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(output["script"].is_null());
}
