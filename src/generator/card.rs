//! Card fill compilation, including expiry normalization for the many
//! shapes expiration inputs take in the wild.

use chrono::{Datelike, Utc};

use super::FillScriptGenerator;
use crate::matcher::{is_excluded_field_type, is_field_match};
use crate::models::{
    AutofillField, AutofillPageDetails, CardView, FillScript, FilledFields,
    FUZZY_MATCH_ATTRIBUTES,
};

#[derive(Default)]
struct CardSlots<'p> {
    cardholder_name: Option<&'p AutofillField>,
    number: Option<&'p AutofillField>,
    exp: Option<&'p AutofillField>,
    exp_month: Option<&'p AutofillField>,
    exp_year: Option<&'p AutofillField>,
    code: Option<&'p AutofillField>,
    brand: Option<&'p AutofillField>,
}

impl FillScriptGenerator<'_> {
    pub(super) fn generate_card_fill_script(
        &self,
        script: &mut FillScript,
        page_details: &AutofillPageDetails,
        filled_fields: &mut FilledFields,
        card: &CardView,
    ) {
        let slots = self.locate_card_slots(page_details);

        self.make_script_action_with_value(
            script,
            card.cardholder_name.as_deref(),
            slots.cardholder_name,
            filled_fields,
        );
        self.make_script_action_with_value(
            script,
            card.number.as_deref(),
            slots.number,
            filled_fields,
        );
        self.make_script_action_with_value(script, card.code.as_deref(), slots.code, filled_fields);
        self.make_script_action_with_value(
            script,
            card.brand.as_deref(),
            slots.brand,
            filled_fields,
        );

        if let (Some(field), Some(month)) = (
            slots.exp_month,
            card.exp_month.as_deref().filter(|v| !v.is_empty()),
        ) {
            let value = resolve_expiry_month(field, month);
            if filled_fields.insert(field) {
                script.fill_by_opid(field, &value);
            }
        }

        if let (Some(field), Some(year)) = (
            slots.exp_year,
            card.exp_year.as_deref().filter(|v| !v.is_empty()),
        ) {
            let value = resolve_expiry_year(field, year);
            if filled_fields.insert(field) {
                script.fill_by_opid(field, &value);
            }
        }

        if let (Some(field), Some(month), Some(year)) = (
            slots.exp,
            card.exp_month.as_deref().filter(|v| !v.is_empty()),
            card.exp_year.as_deref().filter(|v| !v.is_empty()),
        ) {
            let exp = self.format_combined_expiry(field, month, year);
            self.make_script_action_with_value(script, Some(&exp), Some(field), filled_fields);
        }
    }

    fn locate_card_slots<'p>(&self, page_details: &'p AutofillPageDetails) -> CardSlots<'p> {
        let mut slots = CardSlots::default();
        let k = self.keywords;
        for field in &page_details.fields {
            if field.is_span_only() || !field.viewable {
                continue;
            }
            if is_excluded_field_type(field, &k.excluded_field_types, &k.search_field_names) {
                continue;
            }
            for attr in FUZZY_MATCH_ATTRIBUTES {
                let Some(value) = field.attribute(*attr) else {
                    continue;
                };
                // A field claims at most one slot; once assigned its
                // remaining attributes must not be tested.
                if slots.cardholder_name.is_none()
                    && is_field_match(value, &k.card_holder.names, &k.card_holder.contains)
                {
                    slots.cardholder_name = Some(field);
                } else if slots.number.is_none()
                    && is_field_match(value, &k.card_number.names, &k.card_number.contains)
                {
                    slots.number = Some(field);
                } else if slots.exp.is_none()
                    && is_field_match(value, &k.card_expiry.names, &k.card_expiry.contains)
                {
                    slots.exp = Some(field);
                } else if slots.exp_month.is_none()
                    && is_field_match(
                        value,
                        &k.card_expiry_month.names,
                        &k.card_expiry_month.contains,
                    )
                {
                    slots.exp_month = Some(field);
                } else if slots.exp_year.is_none()
                    && is_field_match(
                        value,
                        &k.card_expiry_year.names,
                        &k.card_expiry_year.contains,
                    )
                {
                    slots.exp_year = Some(field);
                } else if slots.code.is_none()
                    && is_field_match(value, &k.card_code.names, &k.card_code.contains)
                {
                    slots.code = Some(field);
                } else if slots.brand.is_none()
                    && is_field_match(value, &k.card_brand.names, &k.card_brand.contains)
                {
                    slots.brand = Some(field);
                } else {
                    continue;
                }
                break;
            }
        }
        slots
    }

    /// Formats "month + year" for a single combined expiry input by probing
    /// its attributes for a recognizable pattern ("mm/yy", "yyyy-mm", ...).
    ///
    /// Longer year forms are probed before shorter ones within each
    /// delimiter, so a "mm/yyyy" placeholder yields a four-digit year
    /// instead of a false hit on its "mm/yy" prefix. With no recognizable
    /// pattern the ISO-like `yyyy-mm` form is used.
    fn format_combined_expiry(&self, field: &AutofillField, month: &str, year: &str) -> String {
        let full_month = format!("{month:0>2}");
        let (full_year, part_year) = normalize_expiry_year(year);

        let k = self.keywords;
        for i in 0..k.expiry_month_abbr.len() {
            let m = &k.expiry_month_abbr[i];
            let ys = &k.expiry_year_abbr_short[i];
            let yl = &k.expiry_year_abbr_long[i];

            for delimiter in ["/", "-", ""] {
                if field_attrs_contain(field, &format!("{m}{delimiter}{yl}")) {
                    return format!("{full_month}{delimiter}{full_year}");
                }
                if field_attrs_contain(field, &format!("{yl}{delimiter}{m}")) {
                    return format!("{full_year}{delimiter}{full_month}");
                }
                if let Some(part_year) = &part_year {
                    if field_attrs_contain(field, &format!("{m}{delimiter}{ys}")) {
                        return format!("{full_month}{delimiter}{part_year}");
                    }
                    if field_attrs_contain(field, &format!("{ys}{delimiter}{m}")) {
                        return format!("{part_year}{delimiter}{full_month}");
                    }
                }
            }
        }

        format!("{full_year}-{full_month}")
    }
}

/// Month value for a dedicated expiry-month input.
///
/// Selects with 12 options are assumed to list January..December; with 13
/// options one of them is a placeholder, leading unless the option texts say
/// otherwise. Text inputs hinting at a two-digit format get zero padding.
fn resolve_expiry_month(field: &AutofillField, month: &str) -> String {
    let mut value = month.to_string();
    if let Some(select_info) = &field.select_info {
        let options = &select_info.options;
        if let Ok(m) = month.parse::<usize>() {
            let index = match options.len() {
                12 => m.checked_sub(1),
                13 => {
                    // A 13th option is a placeholder; whether it leads or
                    // trails decides how far the real months are shifted.
                    let trailing_placeholder = options
                        .first()
                        .is_some_and(|(text, _)| text.as_deref().is_some_and(|t| !t.is_empty()))
                        && options
                            .get(12)
                            .is_some_and(|(text, _)| text.as_deref().map_or(true, |t| t.is_empty()));
                    if trailing_placeholder {
                        m.checked_sub(1)
                    } else {
                        Some(m)
                    }
                }
                _ => None,
            };
            if let Some((text, val)) = index.and_then(|i| options.get(i)) {
                if let Some(v) = val {
                    value = v.clone();
                } else if let Some(t) = text {
                    value = t.clone();
                }
            }
        }
    } else if (field_attrs_contain(field, "mm") || field.max_length == Some(2)) && value.len() == 1
    {
        value = format!("0{value}");
    }
    value
}

/// Year value for a dedicated expiry-year input, converting between two- and
/// four-digit forms to suit the element.
fn resolve_expiry_year(field: &AutofillField, year: &str) -> String {
    let mut value = year.to_string();
    if let Some(select_info) = &field.select_info {
        for (text, val) in &select_info.options {
            let val_str = val.as_deref();
            let text_matches = text.as_deref() == Some(year);
            let value_matches = val_str == Some(year);
            let short_long_match = val_str.is_some_and(|v| v.len() == 2)
                && year.len() == 4
                && val_str == year.get(2..);
            // "Exp: 2026" style labels used as option values.
            let colon_match = val_str.is_some_and(|v| {
                v.find(':')
                    .and_then(|i| v.get(i + 2..))
                    .is_some_and(|tail| {
                        let tail = tail.trim();
                        !tail.is_empty() && tail == year
                    })
            });
            if text_matches || value_matches || short_long_match || colon_match {
                if let Some(v) = val {
                    value = v.clone();
                }
                break;
            }
        }
    } else if field_attrs_contain(field, "yyyy") || field.max_length == Some(4) {
        if value.len() == 2 {
            value = format!("{}{value}", current_century());
        }
    } else if (field_attrs_contain(field, "yy") || field.max_length == Some(2)) && value.len() == 4
    {
        if let Some(tail) = value.get(2..) {
            value = tail.to_string();
        }
    }
    value
}

fn normalize_expiry_year(year: &str) -> (String, Option<String>) {
    match (year.len(), year.get(2..)) {
        (2, _) => (
            format!("{}{year}", current_century()),
            Some(year.to_string()),
        ),
        (4, Some(tail)) => (year.to_string(), Some(tail.to_string())),
        _ => (year.to_string(), None),
    }
}

/// Two-digit century prefix ("20" until 2100) for expanding short years.
fn current_century() -> i32 {
    Utc::now().year() / 100
}

/// Probes the field's visible attributes, spaces removed, for a substring.
fn field_attrs_contain(field: &AutofillField, needle: &str) -> bool {
    FUZZY_MATCH_ATTRIBUTES.iter().any(|attr| {
        field
            .attribute(*attr)
            .is_some_and(|value| value.replace(' ', "").to_lowercase().contains(needle))
    })
}
