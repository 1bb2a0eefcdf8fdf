//! Data model shared by the matcher, classifier, and script generators.
//!
//! Everything here is a per-request snapshot: the caller builds one
//! [`AutofillPageDetails`] per frame and one decrypted [`CipherView`], calls
//! the generator, and discards all of it once the [`FillScript`] is returned.
//! Nothing in this module is retained across calls.

mod cipher;
mod field;
mod script;

pub use cipher::{CardView, CipherView, IdentityView, LoginUriView, LoginView, UriMatchStrategy};
pub use field::{
    AutofillField, AutofillPageDetails, FieldAttribute, FormInfo, SelectInfo, FILL_MATCH_ATTRIBUTES,
    FUZZY_MATCH_ATTRIBUTES,
};
pub use script::{
    FillAction, FillActionKind, FillScript, FilledFields, GenerateFillScriptOptions,
    ScriptProperties,
};
