//! Login fill compilation: usernames, passwords, and one-time codes.

use super::{has_value, FillScriptGenerator};
use crate::classifier::{find_totp_field, find_username_field, load_password_fields};
use crate::matcher::field_is_fuzzy_match;
use crate::models::{
    AutofillField, AutofillPageDetails, FillScript, FilledFields, GenerateFillScriptOptions,
    LoginView,
};
use crate::trust::in_untrusted_iframe;

impl FillScriptGenerator<'_> {
    pub(super) fn generate_login_fill_script(
        &self,
        script: &mut FillScript,
        page_details: &AutofillPageDetails,
        filled_fields: &mut FilledFields,
        login: &LoginView,
        options: &GenerateFillScriptOptions,
    ) {
        script.saved_urls = login.reportable_uris();
        script.untrusted_iframe = in_untrusted_iframe(
            &page_details.url,
            &options.tab_url,
            login,
            options.default_uri_match,
            self.equivalent_domains,
        );

        let mut usernames: Vec<&AutofillField> = Vec::new();
        let mut passwords: Vec<&AutofillField> = Vec::new();
        let mut totps: Vec<&AutofillField> = Vec::new();

        // Strict pass first; fall back to hidden/readonly fields only when
        // the caller permits it.
        let mut password_fields = load_password_fields(
            page_details,
            false,
            false,
            options.only_empty_fields,
            options.fill_new_password,
            self.keywords,
        );
        if password_fields.is_empty() && !options.only_visible_fields {
            password_fields = load_password_fields(
                page_details,
                true,
                true,
                options.only_empty_fields,
                options.fill_new_password,
                self.keywords,
            );
        }

        let mut form_keys: Vec<&String> = page_details.forms.keys().collect();
        form_keys.sort();
        for form_key in form_keys {
            for password_field in password_fields
                .iter()
                .copied()
                .filter(|f| f.form.as_ref() == Some(form_key))
            {
                passwords.push(password_field);
                if has_value(login.username.as_deref()) {
                    if let Some(username) =
                        self.locate_username(page_details, password_field, false, options)
                    {
                        usernames.push(username);
                    }
                }
                if options.allow_totp_autofill && has_value(login.totp.as_deref()) {
                    if let Some(totp) =
                        self.locate_totp(page_details, password_field, false, options)
                    {
                        totps.push(totp);
                    }
                }
            }
        }

        if !password_fields.is_empty() && passwords.is_empty() {
            // No form owns the password fields; fall back to the first one on
            // the page and search the whole document for its companions.
            let password_field = password_fields[0];
            passwords.push(password_field);
            if password_field.element_number > 0 {
                if has_value(login.username.as_deref()) {
                    if let Some(username) =
                        self.locate_username(page_details, password_field, true, options)
                    {
                        usernames.push(username);
                    }
                }
                if options.allow_totp_autofill && has_value(login.totp.as_deref()) {
                    if let Some(totp) = self.locate_totp(page_details, password_field, true, options)
                    {
                        totps.push(totp);
                    }
                }
            }
        }

        if password_fields.is_empty() {
            // No password fields at all; fuzzy-fill username and TOTP inputs.
            let all_totp_names = self.keywords.all_totp_field_names();
            for field in &page_details.fields {
                if field.is_span_only() || !field.viewable {
                    continue;
                }
                if !options.skip_username_only_fill
                    && field.type_is_one_of(&["text", "email", "tel"])
                    && field_is_fuzzy_match(field, &self.keywords.username_field_names)
                {
                    usernames.push(field);
                }
                if options.allow_totp_autofill
                    && has_value(login.totp.as_deref())
                    && field.type_is_one_of(&["text", "number"])
                    && !field_is_fuzzy_match(field, &self.keywords.recovery_code_field_names)
                    && (field_is_fuzzy_match(field, &all_totp_names)
                        || field.auto_complete_type.as_deref() == Some("one-time-code"))
                {
                    totps.push(field);
                }
            }
        }

        if let Some(username_value) = login.username.as_deref().filter(|v| !v.is_empty()) {
            for username in usernames.iter().copied() {
                if filled_fields.insert(username) {
                    script.fill_by_opid(username, username_value);
                }
            }
        }
        if let Some(password_value) = login.password.as_deref().filter(|v| !v.is_empty()) {
            for password in passwords.iter().copied() {
                if filled_fields.insert(password) {
                    script.fill_by_opid(password, password_value);
                }
            }
        }
        if options.allow_totp_autofill && !totps.is_empty() {
            if let Some(secret) = login.totp.as_deref().filter(|v| !v.is_empty()) {
                if let Some(code) = self.totp.code_for(secret) {
                    let digits: Vec<char> = code.chars().collect();
                    // Per-digit inputs: one field per code character.
                    let distribute = digits.len() == totps.len();
                    for (i, totp) in totps.iter().copied().enumerate() {
                        if !filled_fields.insert(totp) {
                            continue;
                        }
                        let value = if distribute {
                            digits[i].to_string()
                        } else {
                            code.clone()
                        };
                        script.fill_by_opid(totp, &value);
                    }
                }
            }
        }

        script.append_focus_action(filled_fields);
    }

    fn locate_username<'p>(
        &self,
        page_details: &'p AutofillPageDetails,
        password_field: &AutofillField,
        without_form: bool,
        options: &GenerateFillScriptOptions,
    ) -> Option<&'p AutofillField> {
        find_username_field(
            page_details,
            password_field,
            false,
            false,
            without_form,
            self.keywords,
        )
        .or_else(|| {
            if options.only_visible_fields {
                return None;
            }
            find_username_field(
                page_details,
                password_field,
                true,
                true,
                without_form,
                self.keywords,
            )
        })
    }

    fn locate_totp<'p>(
        &self,
        page_details: &'p AutofillPageDetails,
        password_field: &AutofillField,
        without_form: bool,
        options: &GenerateFillScriptOptions,
    ) -> Option<&'p AutofillField> {
        find_totp_field(
            page_details,
            password_field,
            false,
            false,
            without_form,
            self.keywords,
        )
        .or_else(|| {
            if options.only_visible_fields {
                return None;
            }
            find_totp_field(
                page_details,
                password_field,
                true,
                true,
                without_form,
                self.keywords,
            )
        })
    }
}
