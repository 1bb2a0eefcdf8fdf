//! Identity fill compilation: personal, address, and contact slots.

use super::{has_value, iso, FillScriptGenerator};
use crate::matcher::{is_excluded_field_type, is_field_match};
use crate::models::{
    AutofillField, AutofillPageDetails, FillScript, FilledFields, IdentityView,
    FUZZY_MATCH_ATTRIBUTES,
};

#[derive(Default)]
struct IdentitySlots<'p> {
    name: Option<&'p AutofillField>,
    first_name: Option<&'p AutofillField>,
    middle_name: Option<&'p AutofillField>,
    last_name: Option<&'p AutofillField>,
    title: Option<&'p AutofillField>,
    email: Option<&'p AutofillField>,
    address: Option<&'p AutofillField>,
    address1: Option<&'p AutofillField>,
    address2: Option<&'p AutofillField>,
    address3: Option<&'p AutofillField>,
    postal_code: Option<&'p AutofillField>,
    city: Option<&'p AutofillField>,
    state: Option<&'p AutofillField>,
    country: Option<&'p AutofillField>,
    phone: Option<&'p AutofillField>,
    username: Option<&'p AutofillField>,
    company: Option<&'p AutofillField>,
}

impl FillScriptGenerator<'_> {
    pub(super) fn generate_identity_fill_script(
        &self,
        script: &mut FillScript,
        page_details: &AutofillPageDetails,
        filled_fields: &mut FilledFields,
        identity: &IdentityView,
    ) {
        let slots = self.locate_identity_slots(page_details);

        let simple_slots = [
            (identity.title.as_deref(), slots.title),
            (identity.first_name.as_deref(), slots.first_name),
            (identity.middle_name.as_deref(), slots.middle_name),
            (identity.last_name.as_deref(), slots.last_name),
            (identity.address1.as_deref(), slots.address1),
            (identity.address2.as_deref(), slots.address2),
            (identity.address3.as_deref(), slots.address3),
            (identity.city.as_deref(), slots.city),
            (identity.postal_code.as_deref(), slots.postal_code),
            (identity.company.as_deref(), slots.company),
            (identity.email.as_deref(), slots.email),
            (identity.phone.as_deref(), slots.phone),
            (identity.username.as_deref(), slots.username),
        ];
        for (value, field) in simple_slots {
            self.make_script_action_with_value(script, value, field, filled_fields);
        }

        if slots.name.is_some()
            && (has_value(identity.first_name.as_deref()) || has_value(identity.last_name.as_deref()))
        {
            let full_name = [
                identity.first_name.as_deref(),
                identity.middle_name.as_deref(),
                identity.last_name.as_deref(),
            ]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
            self.make_script_action_with_value(script, Some(&full_name), slots.name, filled_fields);
        }

        if slots.address.is_some() && has_value(identity.address1.as_deref()) {
            let address = [
                identity.address1.as_deref(),
                identity.address2.as_deref(),
                identity.address3.as_deref(),
            ]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
            self.make_script_action_with_value(script, Some(&address), slots.address, filled_fields);
        }

        // Spelled-out region and country names become the codes select
        // elements expect; short values pass through untouched.
        if let Some(state) = identity.state.as_deref().filter(|v| !v.is_empty()) {
            let value = if state.len() > 2 {
                iso::region_code(state)
            } else {
                None
            };
            self.make_script_action_with_value(
                script,
                Some(value.unwrap_or(state)),
                slots.state,
                filled_fields,
            );
        }
        if let Some(country) = identity.country.as_deref().filter(|v| !v.is_empty()) {
            let value = if country.len() > 2 {
                iso::country_code(country)
            } else {
                None
            };
            self.make_script_action_with_value(
                script,
                Some(value.unwrap_or(country)),
                slots.country,
                filled_fields,
            );
        }
    }

    fn locate_identity_slots<'p>(&self, page_details: &'p AutofillPageDetails) -> IdentitySlots<'p> {
        let mut slots = IdentitySlots::default();
        let k = self.keywords;
        let excluded_types = k.excluded_identity_field_types();
        for field in &page_details.fields {
            if field.is_span_only() || !field.viewable {
                continue;
            }
            if is_excluded_field_type(field, &excluded_types, &k.search_field_names) {
                continue;
            }
            if field
                .auto_complete_type
                .as_deref()
                .is_some_and(|hint| k.excluded_identity_autocomplete_types.iter().any(|t| t == hint))
            {
                continue;
            }
            for attr in FUZZY_MATCH_ATTRIBUTES {
                let Some(value) = field.attribute(*attr) else {
                    continue;
                };
                // A field claims at most one slot; once assigned its
                // remaining attributes must not be tested.
                if slots.title.is_none()
                    && is_field_match(value, &k.identity_title.names, &k.identity_title.contains)
                {
                    slots.title = Some(field);
                } else if slots.name.is_none()
                    && is_field_match(value, &k.identity_full_name.names, &k.identity_full_name.contains)
                {
                    slots.name = Some(field);
                } else if slots.first_name.is_none()
                    && is_field_match(value, &k.identity_first_name.names, &k.identity_first_name.contains)
                {
                    slots.first_name = Some(field);
                } else if slots.middle_name.is_none()
                    && is_field_match(value, &k.identity_middle_name.names, &k.identity_middle_name.contains)
                {
                    slots.middle_name = Some(field);
                } else if slots.last_name.is_none()
                    && is_field_match(value, &k.identity_last_name.names, &k.identity_last_name.contains)
                {
                    slots.last_name = Some(field);
                } else if slots.email.is_none()
                    && is_field_match(value, &k.identity_email.names, &k.identity_email.contains)
                {
                    slots.email = Some(field);
                } else if slots.address.is_none()
                    && is_field_match(value, &k.identity_address.names, &k.identity_address.contains)
                {
                    slots.address = Some(field);
                } else if slots.address1.is_none()
                    && is_field_match(value, &k.identity_address1.names, &k.identity_address1.contains)
                {
                    slots.address1 = Some(field);
                } else if slots.address2.is_none()
                    && is_field_match(value, &k.identity_address2.names, &k.identity_address2.contains)
                {
                    slots.address2 = Some(field);
                } else if slots.address3.is_none()
                    && is_field_match(value, &k.identity_address3.names, &k.identity_address3.contains)
                {
                    slots.address3 = Some(field);
                } else if slots.postal_code.is_none()
                    && is_field_match(value, &k.identity_postal_code.names, &k.identity_postal_code.contains)
                {
                    slots.postal_code = Some(field);
                } else if slots.city.is_none()
                    && is_field_match(value, &k.identity_city.names, &k.identity_city.contains)
                {
                    slots.city = Some(field);
                } else if slots.state.is_none()
                    && is_field_match(value, &k.identity_state.names, &k.identity_state.contains)
                {
                    slots.state = Some(field);
                } else if slots.country.is_none()
                    && is_field_match(value, &k.identity_country.names, &k.identity_country.contains)
                {
                    slots.country = Some(field);
                } else if slots.phone.is_none()
                    && is_field_match(value, &k.identity_phone.names, &k.identity_phone.contains)
                {
                    slots.phone = Some(field);
                } else if slots.username.is_none()
                    && is_field_match(value, &k.identity_username.names, &k.identity_username.contains)
                {
                    slots.username = Some(field);
                } else if slots.company.is_none()
                    && is_field_match(value, &k.identity_company.names, &k.identity_company.contains)
                {
                    slots.company = Some(field);
                } else {
                    continue;
                }
                break;
            }
        }
        slots
    }
}
