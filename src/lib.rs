//! Autofill Core Library
//!
//! Cross-platform fill-script compilation for credential autofill:
//! - **matcher**: keyword grammars (`regex=`, `csv=`, prefix forms) over
//!   collected field attributes
//! - **classifier**: password, username, and one-time-code field detection
//! - **trust**: URI match strategies and iframe trust evaluation
//! - **generator**: login, card, and identity fill-script compilers
//!
//! The library is pure computation over collected page snapshots. Each
//! platform (browser, iOS, Android, .NET) collects fields, decrypts vault
//! items, and replays the returned scripts; this crate only decides what to
//! fill where.
//!
//! # Example (conceptual)
//! ```ignore
//! let keywords = KeywordTables::default();
//! let generator = FillScriptGenerator::new(&keywords, &totp, &equivalent_domains);
//! if let Some(script) = generator.generate_fill_script(&page_details, &cipher, &options) {
//!     if !script.untrusted_iframe {
//!         replay(script);
//!     }
//! }
//! ```

pub mod classifier;
pub mod error;
pub mod generator;
pub mod keywords;
pub mod matcher;
pub mod models;
pub mod trust;

pub use classifier::{
    find_totp_field, find_username_field, forms_with_password_fields, infer_password_change,
    load_password_fields, FormData, PasswordChange,
};
pub use error::{AutofillError, AutofillResult};
pub use generator::{
    generate_fill_script_json, CipherPayload, FillScriptGenerator, FillScriptInput,
    FillScriptOutput, NoTotpCodes, ResolvedTotpCode, TotpCodeProvider,
};
pub use keywords::{KeywordTables, SlotKeywords};
pub use models::{
    AutofillField, AutofillPageDetails, CardView, CipherView, FillAction, FillActionKind,
    FillScript, GenerateFillScriptOptions, IdentityView, LoginUriView, LoginView,
    UriMatchStrategy,
};
pub use trust::{
    in_untrusted_iframe, login_matches_url, EquivalentDomainClasses, EquivalentDomainsSource,
    NoEquivalentDomains,
};

// WASM bindings
#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::*;
