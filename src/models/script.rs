//! Fill script output model and per-call compile state.

use serde::{Deserialize, Serialize};

use super::field::AutofillField;
use super::cipher::UriMatchStrategy;

/// UI action kinds replayed by the page-script executor, in script order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillActionKind {
    ClickOnOpid,
    FocusByOpid,
    FillByOpid,
}

/// One action triple: `(kind, opid, value?)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillAction {
    pub action: FillActionKind,
    pub opid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Executor pacing hints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScriptProperties {
    /// Milliseconds to wait between actions; `None` means no delay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_between_operations: Option<u32>,
}

/// Ordered action sequence targeting one frame, plus the trust verdict the
/// caller needs before replaying it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FillScript {
    pub script: Vec<FillAction>,
    pub properties: ScriptProperties,
    pub saved_urls: Vec<String>,
    /// True when the frame's reported URL could not be verified against the
    /// item's saved URIs. The caller decides whether to refuse or warn; the
    /// script itself is still produced.
    pub untrusted_iframe: bool,
}

impl FillScript {
    /// Append the click/focus/fill triple for one field.
    ///
    /// Span-rendered custom fields receive only the fill action since they
    /// are not real inputs. Duplicate-opid suppression is the job of
    /// [`FilledFields`], not this method.
    pub fn fill_by_opid(&mut self, field: &AutofillField, value: &str) {
        if !field.is_span_only() {
            self.script.push(FillAction {
                action: FillActionKind::ClickOnOpid,
                opid: field.opid.clone(),
                value: None,
            });
            self.script.push(FillAction {
                action: FillActionKind::FocusByOpid,
                opid: field.opid.clone(),
                value: None,
            });
        }
        self.script.push(FillAction {
            action: FillActionKind::FillByOpid,
            opid: field.opid.clone(),
            value: Some(value.to_string()),
        });
    }

    /// Append a trailing focus action on the last viewable password field
    /// that was filled, or the last viewable filled field if no password
    /// field was touched.
    pub fn append_focus_action(&mut self, filled_fields: &FilledFields) {
        let mut last_field: Option<&AutofillField> = None;
        let mut last_password_field: Option<&AutofillField> = None;

        for field in filled_fields.iter() {
            if !field.viewable {
                continue;
            }
            last_field = Some(field);
            if field.type_str() == "password" {
                last_password_field = Some(field);
            }
        }

        if let Some(field) = last_password_field.or(last_field) {
            self.script.push(FillAction {
                action: FillActionKind::FocusByOpid,
                opid: field.opid.clone(),
                value: None,
            });
        }
    }
}

/// Scratch set of fields already claimed by an action during one compile
/// call, keyed by opid and kept in fill order.
///
/// Owned exclusively by the top-level compile function for the duration of a
/// single call; it must never be shared across calls or frames. Guarding
/// every fill through [`FilledFields::insert`] is what enforces the
/// no-duplicate-opid invariant on the emitted script.
#[derive(Debug, Default)]
pub struct FilledFields {
    fields: Vec<AutofillField>,
}

impl FilledFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, opid: &str) -> bool {
        self.fields.iter().any(|f| f.opid == opid)
    }

    /// Claim a field. Returns false (and records nothing) if an action
    /// already targets this opid.
    pub fn insert(&mut self, field: &AutofillField) -> bool {
        if self.contains(&field.opid) {
            return false;
        }
        self.fields.push(field.clone());
        true
    }

    /// Fields in the order they were claimed.
    pub fn iter(&self) -> impl Iterator<Item = &AutofillField> {
        self.fields.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Caller flags controlling one compile call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateFillScriptOptions {
    /// Suppress the username-only fuzzy fallback on pages without password
    /// fields.
    pub skip_username_only_fill: bool,
    /// Only treat password fields with empty values as fillable.
    pub only_empty_fields: bool,
    /// Never relax the hidden/readonly gating to a second pass.
    pub only_visible_fields: bool,
    /// Allow filling fields hinted `autocomplete="new-password"`.
    pub fill_new_password: bool,
    /// Attempt TOTP field detection and code generation.
    pub allow_totp_autofill: bool,
    /// URL of the top-level tab, compared against each frame's reported URL.
    pub tab_url: String,
    /// URI match strategy applied when a saved URI has no per-URI override.
    pub default_uri_match: UriMatchStrategy,
}
