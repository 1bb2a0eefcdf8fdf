//! Fill-script compilation: turning a classified page and a vault item into
//! an ordered action sequence.

mod card;
mod identity;
pub mod iso;
mod login;
#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::error::AutofillResult;
use crate::keywords::KeywordTables;
use crate::models::{
    AutofillField, AutofillPageDetails, CipherView, FillScript, FilledFields,
    GenerateFillScriptOptions,
};
use crate::trust::{EquivalentDomainClasses, EquivalentDomainsSource};

/// Resolves a stored TOTP secret to the current code.
///
/// Compilation is synchronous; callers that compute codes asynchronously
/// resolve them before invoking the generator.
pub trait TotpCodeProvider {
    /// Current code for `secret`, or `None` when the secret cannot be
    /// resolved (malformed, or code generation unavailable).
    fn code_for(&self, secret: &str) -> Option<String>;
}

/// Provider for callers without TOTP support; every lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTotpCodes;

impl TotpCodeProvider for NoTotpCodes {
    fn code_for(&self, _secret: &str) -> Option<String> {
        None
    }
}

/// Provider wrapping a code the platform already resolved, used by the
/// serialization entry points where code generation happened upstream.
#[derive(Debug, Clone, Default)]
pub struct ResolvedTotpCode(pub Option<String>);

impl TotpCodeProvider for ResolvedTotpCode {
    fn code_for(&self, _secret: &str) -> Option<String> {
        self.0.clone()
    }
}

/// Compiles fill scripts for login, card, and identity items.
///
/// Holds only borrowed configuration and collaborators; all per-call state
/// lives on the stack of [`FillScriptGenerator::generate_fill_script`], so a
/// generator is freely shared across calls and frames.
pub struct FillScriptGenerator<'a> {
    keywords: &'a KeywordTables,
    totp: &'a dyn TotpCodeProvider,
    equivalent_domains: &'a dyn EquivalentDomainsSource,
}

impl<'a> FillScriptGenerator<'a> {
    pub fn new(
        keywords: &'a KeywordTables,
        totp: &'a dyn TotpCodeProvider,
        equivalent_domains: &'a dyn EquivalentDomainsSource,
    ) -> Self {
        Self {
            keywords,
            totp,
            equivalent_domains,
        }
    }

    /// Compiles a fill script for one frame's collected fields.
    ///
    /// Returns `None` when the item offers nothing the page can accept. The
    /// returned script never targets the same opid twice.
    pub fn generate_fill_script(
        &self,
        page_details: &AutofillPageDetails,
        cipher: &CipherView,
        options: &GenerateFillScriptOptions,
    ) -> Option<FillScript> {
        let mut script = FillScript::default();
        let mut filled_fields = FilledFields::new();
        match cipher {
            CipherView::Login(login) => {
                self.generate_login_fill_script(
                    &mut script,
                    page_details,
                    &mut filled_fields,
                    login,
                    options,
                );
            }
            CipherView::Card(card) => {
                self.generate_card_fill_script(&mut script, page_details, &mut filled_fields, card);
            }
            CipherView::Identity(identity) => {
                self.generate_identity_fill_script(
                    &mut script,
                    page_details,
                    &mut filled_fields,
                    identity,
                );
            }
        }
        if script.script.is_empty() {
            log::debug!("no fillable fields for item on {}", page_details.url);
            return None;
        }
        Some(script)
    }

    /// Emits the fill for one slot, resolving select elements by matching the
    /// value against option text or option value. A select with no matching
    /// option produces no action at all.
    fn make_script_action_with_value(
        &self,
        script: &mut FillScript,
        data_value: Option<&str>,
        field: Option<&AutofillField>,
        filled_fields: &mut FilledFields,
    ) {
        let (Some(value), Some(field)) = (data_value, field) else {
            return;
        };
        if value.is_empty() {
            return;
        }

        let mut fill_value = value.to_string();
        if let Some(select_info) = &field.select_info {
            let matched = select_info.options.iter().find(|(text, option_value)| {
                let text_matches = text
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase() == value.to_lowercase());
                let value_matches = option_value
                    .as_deref()
                    .is_some_and(|v| v.to_lowercase() == value.to_lowercase());
                text_matches || value_matches
            });
            match matched {
                Some((_, Some(option_value))) => fill_value = option_value.clone(),
                Some((_, None)) => {}
                None => return,
            }
        }

        if filled_fields.insert(field) {
            script.fill_by_opid(field, &fill_value);
        }
    }
}

fn has_value(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Cipher payload at the serialization boundary. Vault item types with no
/// fill support (secure notes, SSH keys, ...) deserialize to `Unfillable`
/// and compile to no script instead of failing the request.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CipherPayload {
    Fillable(CipherView),
    Unfillable(serde::de::IgnoredAny),
}

/// One compile request as passed over the JSON boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillScriptInput {
    pub page_details: AutofillPageDetails,
    pub cipher: CipherPayload,
    #[serde(default)]
    pub options: GenerateFillScriptOptions,
    /// Current TOTP code, resolved by the platform before the call.
    #[serde(default)]
    pub totp_code: Option<String>,
    /// User-configured equivalent-domain classes.
    #[serde(default)]
    pub equivalent_domains: Vec<Vec<String>>,
}

/// Compile result as returned over the JSON boundary; `script` is null when
/// the item offers nothing the page can accept.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillScriptOutput {
    pub script: Option<FillScript>,
}

/// JSON convenience wrapper around [`FillScriptGenerator::generate_fill_script`]
/// with the default keyword tables.
pub fn generate_fill_script_json(input_json: &str) -> AutofillResult<String> {
    let input: FillScriptInput = serde_json::from_str(input_json)?;
    let keywords = KeywordTables::default();
    let totp = ResolvedTotpCode(input.totp_code);
    let equivalent_domains = EquivalentDomainClasses::new(input.equivalent_domains);
    let generator = FillScriptGenerator::new(&keywords, &totp, &equivalent_domains);
    let script = match &input.cipher {
        CipherPayload::Fillable(cipher) => {
            generator.generate_fill_script(&input.page_details, cipher, &input.options)
        }
        CipherPayload::Unfillable(_) => {
            log::debug!("vault item type has no fill support");
            None
        }
    };
    Ok(serde_json::to_string(&FillScriptOutput { script })?)
}
