//! Page snapshot types produced by the content-script collector.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Option entries of a `<select>` element, as `(text, value)` pairs in
/// document order. Either half may be absent for malformed markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectInfo {
    #[serde(default)]
    pub options: Vec<(Option<String>, Option<String>)>,
}

/// Metadata for one input element collected from the page.
///
/// This is an immutable snapshot owned by the caller; the engine only ever
/// borrows it. Field keys mirror the collector's JSON payload, including the
/// historical `label-left` style label keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutofillField {
    /// Opaque position identifier, stable only within one page snapshot.
    pub opid: String,
    /// 0-based document-order index of the element.
    pub element_number: usize,
    pub viewable: bool,
    pub disabled: bool,
    pub readonly: bool,
    #[serde(rename = "htmlID")]
    pub html_id: Option<String>,
    pub html_name: Option<String>,
    #[serde(rename = "label-left")]
    pub label_left: Option<String>,
    #[serde(rename = "label-right")]
    pub label_right: Option<String>,
    #[serde(rename = "label-tag")]
    pub label_tag: Option<String>,
    #[serde(rename = "label-aria")]
    pub label_aria: Option<String>,
    #[serde(rename = "label-top")]
    pub label_top: Option<String>,
    pub placeholder: Option<String>,
    /// Declared `type` attribute of the input element.
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub tag_name: Option<String>,
    /// Current value of the element at collection time.
    pub value: Option<String>,
    pub max_length: Option<usize>,
    /// Browser-declared autocomplete hint (e.g. `new-password`, `one-time-code`).
    pub auto_complete_type: Option<String>,
    /// Space-joined `data-*` attribute values collected from the element.
    pub dataset_values: Option<String>,
    pub select_info: Option<SelectInfo>,
    /// Key of the owning form in [`AutofillPageDetails::forms`], if any.
    pub form: Option<String>,
}

/// Field properties the matchers inspect, enumerated so every property list
/// is a statically-checked const slice rather than ad hoc string lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAttribute {
    HtmlId,
    HtmlName,
    LabelLeft,
    LabelRight,
    LabelTag,
    LabelAria,
    LabelTop,
    Placeholder,
    AutoCompleteType,
    DatasetValues,
}

/// Property priority used by exact keyword matching, in contract order.
pub const FILL_MATCH_ATTRIBUTES: &[FieldAttribute] = &[
    FieldAttribute::HtmlId,
    FieldAttribute::HtmlName,
    FieldAttribute::LabelLeft,
    FieldAttribute::LabelRight,
    FieldAttribute::LabelTag,
    FieldAttribute::LabelAria,
    FieldAttribute::Placeholder,
];

/// Wider attribute set inspected by fuzzy (substring) matching.
pub const FUZZY_MATCH_ATTRIBUTES: &[FieldAttribute] = &[
    FieldAttribute::HtmlId,
    FieldAttribute::HtmlName,
    FieldAttribute::LabelTag,
    FieldAttribute::Placeholder,
    FieldAttribute::LabelLeft,
    FieldAttribute::LabelRight,
    FieldAttribute::LabelTop,
    FieldAttribute::LabelAria,
    FieldAttribute::DatasetValues,
];

impl FieldAttribute {
    /// Prefix under which this attribute participates in `prefix=value`
    /// keyword syntax (e.g. `id=user-login` only tests the HTML id).
    pub fn keyword_prefix(self) -> &'static str {
        match self {
            FieldAttribute::HtmlId => "id",
            FieldAttribute::HtmlName => "name",
            FieldAttribute::LabelLeft
            | FieldAttribute::LabelRight
            | FieldAttribute::LabelTag
            | FieldAttribute::LabelAria
            | FieldAttribute::LabelTop => "label",
            FieldAttribute::Placeholder => "placeholder",
            FieldAttribute::AutoCompleteType => "autocomplete",
            FieldAttribute::DatasetValues => "data",
        }
    }
}

impl AutofillField {
    /// Read one attribute's text, if present.
    pub fn attribute(&self, attr: FieldAttribute) -> Option<&str> {
        let value = match attr {
            FieldAttribute::HtmlId => &self.html_id,
            FieldAttribute::HtmlName => &self.html_name,
            FieldAttribute::LabelLeft => &self.label_left,
            FieldAttribute::LabelRight => &self.label_right,
            FieldAttribute::LabelTag => &self.label_tag,
            FieldAttribute::LabelAria => &self.label_aria,
            FieldAttribute::LabelTop => &self.label_top,
            FieldAttribute::Placeholder => &self.placeholder,
            FieldAttribute::AutoCompleteType => &self.auto_complete_type,
            FieldAttribute::DatasetValues => &self.dataset_values,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    /// Declared input type, or empty string when the collector omitted it.
    pub fn type_str(&self) -> &str {
        self.field_type.as_deref().unwrap_or("")
    }

    /// True if the declared type equals any of the given types.
    pub fn type_is_one_of(&self, types: &[&str]) -> bool {
        types.contains(&self.type_str())
    }

    /// Custom (user-defined) cipher fields are rendered as `span` elements
    /// and must be ignored by all structural matching.
    pub fn is_span_only(&self) -> bool {
        self.tag_name.as_deref() == Some("span")
    }

    /// True if the current value is empty or whitespace.
    pub fn value_is_empty(&self) -> bool {
        self.value
            .as_deref()
            .map(|v| v.trim().is_empty())
            .unwrap_or(true)
    }
}

/// Metadata for one `<form>` element on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInfo {
    pub opid: Option<String>,
    #[serde(rename = "htmlID")]
    pub html_id: Option<String>,
    pub html_name: Option<String>,
    pub html_action: Option<String>,
    pub html_method: Option<String>,
}

/// One frame's structural snapshot: its reported URL, every candidate input
/// field in document order, and the forms they belong to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutofillPageDetails {
    pub url: String,
    pub fields: Vec<AutofillField>,
    pub forms: HashMap<String, FormInfo>,
}
