//! Curated keyword tables driving field classification and slot matching.
//!
//! The lists are versioned configuration data: the matching algorithms take a
//! [`KeywordTables`] reference instead of reaching for globals, so the tables
//! can be tested, trimmed, or extended independently of the algorithms. The
//! defaults below are the accumulated site-compatibility knowledge of the
//! original lists; ordering within each list is part of the contract
//! (first-match-wins).

/// Username keywords, ordered by how specific they are.
static USERNAME_FIELD_NAMES: &[&str] = &[
    // English
    "username",
    "user name",
    "email",
    "email address",
    "e-mail",
    "e-mail address",
    "userid",
    "user id",
    "customer id",
    "login id",
    "login",
    // German
    "benutzername",
    "benutzer name",
    "email adresse",
    "e-mail adresse",
    "benutzerid",
    "benutzer id",
];

/// Unambiguous one-time-code keywords.
static TOTP_FIELD_NAMES: &[&str] = &[
    "totp",
    "totpcode",
    "2facode",
    "approvals_code",
    "mfacode",
    "otc-code",
    "otp-code",
    "otpcode",
    "onetimecode",
    "onetimepassword",
    "second-factor-code",
    "verification-code",
];

/// Keywords that often mean a one-time-code field but also appear on
/// unrelated inputs; only consulted together with the specific list.
static AMBIGUOUS_TOTP_FIELD_NAMES: &[&str] = &["code", "pin", "otc", "otp", "2fa", "mfa"];

/// Keywords identifying backup/recovery-code fields, which must never be
/// filled with a live TOTP value.
static RECOVERY_CODE_FIELD_NAMES: &[&str] = &["backup", "recovery"];

/// Single words marking an input as a site-search box.
static SEARCH_FIELD_NAMES: &[&str] = &["search", "query", "find", "go"];

/// Substrings that disqualify a field from login autofill entirely.
/// Compared against id/name/placeholder with whitespace, `_`, `-` removed.
static FIELD_IGNORE_LIST: &[&str] = &["search", "captcha", "smsverification"];

/// Substrings that veto the "looks like a password field" heuristic even
/// though the attribute contains "password".
static PASSWORD_FIELD_EXCLUDE_LIST: &[&str] = &["passwordless", "captcha", "forgot"];

/// Input types that are never autofill targets.
static EXCLUDED_FIELD_TYPES: &[&str] = &[
    "radio", "checkbox", "hidden", "file", "button", "image", "reset", "search",
];

/// Autocomplete hints excluding a field from identity fills.
static EXCLUDED_IDENTITY_AUTOCOMPLETE_TYPES: &[&str] =
    &["current-password", "new-password", "one-time-code", "cc-number"];

// Card slot keywords. The second list of each pair names the keywords that
// may also match by containment; all others require cleaned equality.
static CARD_HOLDER_FIELD_NAMES: &[&str] = &[
    "cc-name",
    "card-name",
    "cardholder-name",
    "cardholder",
    "name",
    "nom",
];
static CARD_HOLDER_FIELD_NAME_VALUES: &[&str] = &[
    "cc-name",
    "card-name",
    "cardholder-name",
    "cardholder",
    "tbName",
];
static CARD_NUMBER_FIELD_NAMES: &[&str] = &[
    "cc-number",
    "cc-num",
    "card-number",
    "card-num",
    "number",
    "cc",
    "cc-no",
    "card-no",
    "credit-card",
    "numero-carte",
    "carte",
    "carte-credit",
    "num-carte",
    "cb-num",
];
static CARD_NUMBER_FIELD_NAME_VALUES: &[&str] = &[
    "cc-number",
    "cc-num",
    "card-number",
    "card-num",
    "cc-no",
    "card-no",
    "numero-carte",
    "num-carte",
    "cb-num",
];
static CARD_EXPIRY_FIELD_NAMES: &[&str] = &[
    "cc-exp",
    "card-exp",
    "cc-expiration",
    "card-expiration",
    "cc-ex",
    "card-ex",
    "card-expire",
    "card-expiry",
    "validite",
    "expiration",
    "expiry",
    "mm-yy",
    "mm-yyyy",
    "yy-mm",
    "yyyy-mm",
    "expiration-date",
    "payment-card-expiration",
    "payment-cc-date",
];
static CARD_EXPIRY_FIELD_NAME_VALUES: &[&str] = &[
    "mm-yy",
    "mm-yyyy",
    "yy-mm",
    "yyyy-mm",
    "expiration-date",
    "payment-card-expiration",
];
static EXPIRY_MONTH_FIELD_NAMES: &[&str] = &[
    "exp-month",
    "cc-exp-month",
    "cc-month",
    "card-month",
    "cc-mo",
    "card-mo",
    "exp-mo",
    "card-exp-mo",
    "cc-exp-mo",
    "card-expiration-month",
    "expiration-month",
    "cc-mm",
    "cc-m",
    "card-mm",
    "card-m",
    "card-exp-mm",
    "cc-exp-mm",
    "exp-mm",
    "exp-m",
    "expire-month",
    "expire-mo",
    "expiry-month",
    "expiry-mo",
    "card-expire-month",
    "card-expire-mo",
    "card-expiry-month",
    "card-expiry-mo",
    "mois-validite",
    "mois-expiration",
    "m-validite",
    "m-expiration",
    "expiry-date-field-month",
    "expiration-date-month",
    "expiration-date-mm",
    "exp-mon",
    "validity-mo",
    "exp-date-mo",
    "cb-date-mois",
    "date-m",
];
static EXPIRY_YEAR_FIELD_NAMES: &[&str] = &[
    "exp-year",
    "cc-exp-year",
    "cc-year",
    "card-year",
    "cc-yr",
    "card-yr",
    "exp-yr",
    "card-exp-yr",
    "cc-exp-yr",
    "card-expiration-year",
    "expiration-year",
    "cc-yy",
    "cc-y",
    "card-yy",
    "card-y",
    "card-exp-yy",
    "cc-exp-yy",
    "exp-yy",
    "exp-y",
    "cc-yyyy",
    "card-yyyy",
    "card-exp-yyyy",
    "cc-exp-yyyy",
    "expire-year",
    "expire-yr",
    "expiry-year",
    "expiry-yr",
    "card-expire-year",
    "card-expire-yr",
    "card-expiry-year",
    "card-expiry-yr",
    "an-validite",
    "an-expiration",
    "annee-validite",
    "annee-expiration",
    "expiry-date-field-year",
    "expiration-date-year",
    "cb-date-ann",
    "expiration-date-yy",
    "expiration-date-yyyy",
    "validity-year",
    "exp-date-year",
    "date-y",
];
static CVV_FIELD_NAMES: &[&str] = &[
    "cvv",
    "cvc",
    "cvv2",
    "cc-csc",
    "cc-cvv",
    "card-csc",
    "card-cvv",
    "cvd",
    "cid",
    "cvc2",
    "cnv",
    "cvn2",
    "cc-code",
    "card-code",
    "code-securite",
    "security-code",
    "crypto",
    "card-verif",
    "verification-code",
    "csc",
    "ccv",
];
static CARD_BRAND_FIELD_NAMES: &[&str] =
    &["cc-type", "card-type", "card-brand", "cc-brand", "cb-type"];

// Identity slot keywords.
static FULL_NAME_FIELD_NAMES: &[&str] = &["name", "full-name", "your-name"];
static FULL_NAME_FIELD_NAME_VALUES: &[&str] = &["full-name", "your-name"];
static TITLE_FIELD_NAMES: &[&str] = &["honorific-prefix", "prefix", "title"];
static FIRST_NAME_FIELD_NAMES: &[&str] = &[
    // English
    "f-name",
    "first-name",
    "given-name",
    "first-n",
    // German
    "vorname",
];
static MIDDLE_NAME_FIELD_NAMES: &[&str] = &[
    "m-name",
    "middle-name",
    "additional-name",
    "middle-initial",
    "middle-n",
    "middle-i",
];
static LAST_NAME_FIELD_NAMES: &[&str] = &[
    // English
    "l-name",
    "last-name",
    "s-name",
    "surname",
    "family-name",
    "family-n",
    "last-n",
    // German
    "nachname",
    "familienname",
];
static EMAIL_FIELD_NAMES: &[&str] = &["e-mail", "email-address"];
static ADDRESS_FIELD_NAMES: &[&str] = &[
    "address",
    "street-address",
    "addr",
    "street",
    "mailing-addr",
    "billing-addr",
    "mail-addr",
    "bill-addr",
];
static ADDRESS_FIELD_NAME_VALUES: &[&str] =
    &["mailing-addr", "billing-addr", "mail-addr", "bill-addr"];
static ADDRESS1_FIELD_NAMES: &[&str] = &["address-1", "address-line-1", "addr-1", "street-1"];
static ADDRESS2_FIELD_NAMES: &[&str] = &["address-2", "address-line-2", "addr-2", "street-2"];
static ADDRESS3_FIELD_NAMES: &[&str] = &["address-3", "address-line-3", "addr-3", "street-3"];
static POSTAL_CODE_FIELD_NAMES: &[&str] = &[
    "postal",
    "zip",
    "zip2",
    "zip-code",
    "postal-code",
    "post-code",
    "address-zip",
    "address-postal",
    "address-code",
    "address-postal-code",
    "address-zip-code",
];
static CITY_FIELD_NAMES: &[&str] =
    &["city", "town", "address-level-2", "address-city", "address-town"];
static STATE_FIELD_NAMES: &[&str] = &[
    "state",
    "province",
    "provence",
    "address-level-1",
    "address-state",
    "address-province",
];
static COUNTRY_FIELD_NAMES: &[&str] = &[
    "country",
    "country-code",
    "country-name",
    "address-country",
    "address-country-name",
    "address-country-code",
];
static PHONE_FIELD_NAMES: &[&str] =
    &["phone", "mobile", "mobile-phone", "tel", "telephone", "phone-number"];
static IDENTITY_USERNAME_FIELD_NAMES: &[&str] = &["user-name", "user-id", "screen-name"];
static COMPANY_FIELD_NAMES: &[&str] =
    &["company", "company-name", "organization", "organization-name"];

// Each index represents a language family. These three slices must stay the
// same length: 0 English, 1 Danish, 2 German/Dutch, 3 French/Spanish/Italian,
// 4 Russian, 5 Portuguese.
static MONTH_ABBR: &[&str] = &["mm", "mm", "mm", "mm", "mm", "mm"];
static YEAR_ABBR_SHORT: &[&str] = &["yy", "åå", "jj", "aa", "гг", "rr"];
static YEAR_ABBR_LONG: &[&str] = &["yyyy", "åååå", "jjjj", "aa", "гггг", "rrrr"];

/// A keyword list paired with the subset of entries that may also match by
/// containment (everything else requires cleaned equality).
#[derive(Debug, Clone, Default)]
pub struct SlotKeywords {
    pub names: Vec<String>,
    pub contains: Vec<String>,
}

impl SlotKeywords {
    fn new(names: &[&str], contains: &[&str]) -> Self {
        Self {
            names: to_owned(names),
            contains: to_owned(contains),
        }
    }

    /// All entries may match by containment.
    fn contains_all(names: &[&str]) -> Self {
        Self {
            names: to_owned(names),
            contains: to_owned(names),
        }
    }
}

/// The complete keyword configuration for one compile call.
#[derive(Debug, Clone)]
pub struct KeywordTables {
    pub username_field_names: Vec<String>,
    pub totp_field_names: Vec<String>,
    pub ambiguous_totp_field_names: Vec<String>,
    pub recovery_code_field_names: Vec<String>,
    pub search_field_names: Vec<String>,
    pub field_ignore_list: Vec<String>,
    pub password_field_exclude_list: Vec<String>,
    pub excluded_field_types: Vec<String>,
    pub excluded_identity_autocomplete_types: Vec<String>,

    pub card_holder: SlotKeywords,
    pub card_number: SlotKeywords,
    pub card_expiry: SlotKeywords,
    pub card_expiry_month: SlotKeywords,
    pub card_expiry_year: SlotKeywords,
    pub card_code: SlotKeywords,
    pub card_brand: SlotKeywords,

    pub identity_full_name: SlotKeywords,
    pub identity_title: SlotKeywords,
    pub identity_first_name: SlotKeywords,
    pub identity_middle_name: SlotKeywords,
    pub identity_last_name: SlotKeywords,
    pub identity_email: SlotKeywords,
    pub identity_address: SlotKeywords,
    pub identity_address1: SlotKeywords,
    pub identity_address2: SlotKeywords,
    pub identity_address3: SlotKeywords,
    pub identity_postal_code: SlotKeywords,
    pub identity_city: SlotKeywords,
    pub identity_state: SlotKeywords,
    pub identity_country: SlotKeywords,
    pub identity_phone: SlotKeywords,
    pub identity_username: SlotKeywords,
    pub identity_company: SlotKeywords,

    pub expiry_month_abbr: Vec<String>,
    pub expiry_year_abbr_short: Vec<String>,
    pub expiry_year_abbr_long: Vec<String>,
}

fn to_owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            username_field_names: to_owned(USERNAME_FIELD_NAMES),
            totp_field_names: to_owned(TOTP_FIELD_NAMES),
            ambiguous_totp_field_names: to_owned(AMBIGUOUS_TOTP_FIELD_NAMES),
            recovery_code_field_names: to_owned(RECOVERY_CODE_FIELD_NAMES),
            search_field_names: to_owned(SEARCH_FIELD_NAMES),
            field_ignore_list: to_owned(FIELD_IGNORE_LIST),
            password_field_exclude_list: to_owned(PASSWORD_FIELD_EXCLUDE_LIST),
            excluded_field_types: to_owned(EXCLUDED_FIELD_TYPES),
            excluded_identity_autocomplete_types: to_owned(EXCLUDED_IDENTITY_AUTOCOMPLETE_TYPES),

            card_holder: SlotKeywords::new(CARD_HOLDER_FIELD_NAMES, CARD_HOLDER_FIELD_NAME_VALUES),
            card_number: SlotKeywords::new(CARD_NUMBER_FIELD_NAMES, CARD_NUMBER_FIELD_NAME_VALUES),
            card_expiry: SlotKeywords::new(CARD_EXPIRY_FIELD_NAMES, CARD_EXPIRY_FIELD_NAME_VALUES),
            card_expiry_month: SlotKeywords::contains_all(EXPIRY_MONTH_FIELD_NAMES),
            card_expiry_year: SlotKeywords::contains_all(EXPIRY_YEAR_FIELD_NAMES),
            card_code: SlotKeywords::contains_all(CVV_FIELD_NAMES),
            card_brand: SlotKeywords::contains_all(CARD_BRAND_FIELD_NAMES),

            identity_full_name: SlotKeywords::new(
                FULL_NAME_FIELD_NAMES,
                FULL_NAME_FIELD_NAME_VALUES,
            ),
            identity_title: SlotKeywords::contains_all(TITLE_FIELD_NAMES),
            identity_first_name: SlotKeywords::contains_all(FIRST_NAME_FIELD_NAMES),
            identity_middle_name: SlotKeywords::contains_all(MIDDLE_NAME_FIELD_NAMES),
            identity_last_name: SlotKeywords::contains_all(LAST_NAME_FIELD_NAMES),
            identity_email: SlotKeywords::contains_all(EMAIL_FIELD_NAMES),
            identity_address: SlotKeywords::new(ADDRESS_FIELD_NAMES, ADDRESS_FIELD_NAME_VALUES),
            identity_address1: SlotKeywords::contains_all(ADDRESS1_FIELD_NAMES),
            identity_address2: SlotKeywords::contains_all(ADDRESS2_FIELD_NAMES),
            identity_address3: SlotKeywords::contains_all(ADDRESS3_FIELD_NAMES),
            identity_postal_code: SlotKeywords::contains_all(POSTAL_CODE_FIELD_NAMES),
            identity_city: SlotKeywords::contains_all(CITY_FIELD_NAMES),
            identity_state: SlotKeywords::contains_all(STATE_FIELD_NAMES),
            identity_country: SlotKeywords::contains_all(COUNTRY_FIELD_NAMES),
            identity_phone: SlotKeywords::contains_all(PHONE_FIELD_NAMES),
            identity_username: SlotKeywords::contains_all(IDENTITY_USERNAME_FIELD_NAMES),
            identity_company: SlotKeywords::contains_all(COMPANY_FIELD_NAMES),

            expiry_month_abbr: to_owned(MONTH_ABBR),
            expiry_year_abbr_short: to_owned(YEAR_ABBR_SHORT),
            expiry_year_abbr_long: to_owned(YEAR_ABBR_LONG),
        }
    }
}

impl KeywordTables {
    /// The combined specific + ambiguous one-time-code keyword list used by
    /// fuzzy TOTP detection.
    pub fn all_totp_field_names(&self) -> Vec<String> {
        let mut names = self.totp_field_names.clone();
        names.extend(self.ambiguous_totp_field_names.iter().cloned());
        names
    }

    /// Input types excluded from identity fills (password fields included).
    pub fn excluded_identity_field_types(&self) -> Vec<String> {
        let mut types = vec!["password".to_string()];
        types.extend(self.excluded_field_types.iter().cloned());
        types
    }
}
