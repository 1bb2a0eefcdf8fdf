//! WASM bindings for browser extension.

use wasm_bindgen::prelude::*;

use crate::generator::{
    CipherPayload, FillScriptGenerator, FillScriptInput, FillScriptOutput, ResolvedTotpCode,
};
use crate::keywords::KeywordTables;
use crate::trust::EquivalentDomainClasses;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}

/// Initialize panic hook for better error messages.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Fill Script WASM Bindings
// ═══════════════════════════════════════════════════════════════════════════════

/// Compile a fill script for one frame.
///
/// Takes a JsValue (FillScriptInput) and returns a JsValue (FillScriptOutput).
#[wasm_bindgen(js_name = generateFillScript)]
pub fn generate_fill_script_js(input: JsValue) -> Result<JsValue, JsValue> {
    let input: FillScriptInput = serde_wasm_bindgen::from_value(input)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse input: {}", e)))?;

    let keywords = KeywordTables::default();
    let totp = ResolvedTotpCode(input.totp_code);
    let equivalent_domains = EquivalentDomainClasses::new(input.equivalent_domains);
    let generator = FillScriptGenerator::new(&keywords, &totp, &equivalent_domains);
    let script = match &input.cipher {
        CipherPayload::Fillable(cipher) => {
            generator.generate_fill_script(&input.page_details, cipher, &input.options)
        }
        CipherPayload::Unfillable(_) => None,
    };

    serde_wasm_bindgen::to_value(&FillScriptOutput { script })
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize output: {}", e)))
}

/// Compile a fill script using JSON strings (alternative API).
///
/// Takes a JSON string and returns a JSON string.
#[wasm_bindgen(js_name = generateFillScriptJson)]
pub fn generate_fill_script_json_js(input_json: &str) -> Result<String, JsValue> {
    crate::generator::generate_fill_script_json(input_json)
        .map_err(|e| JsValue::from_str(&format!("Fill script generation failed: {}", e)))
}
