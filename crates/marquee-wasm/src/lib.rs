//! wasm-bindgen adapter for marquee-core.
//!
//! The JS host builds a manifest from the DOM, constructs a `MarqueeStage`,
//! and calls `step(dt, events)` from its requestAnimationFrame callback. The
//! returned value is the Outputs JSON (ops plus events); applying the ops to
//! the document is entirely the host's job.

use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use marquee_core::{Config, Inputs, Orchestrator, StageManifest};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

#[wasm_bindgen]
pub struct MarqueeStage {
    core: Orchestrator,
}

#[wasm_bindgen]
impl MarqueeStage {
    /// Create a stage. `config` may be undefined/null for defaults; the
    /// manifest is required (an empty object gives an inert stage).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, manifest: JsValue) -> Result<MarqueeStage, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let manifest: StageManifest = if jsvalue_is_undefined_or_null(&manifest) {
            StageManifest::default()
        } else {
            swb::from_value(manifest).map_err(|e| JsError::new(&format!("manifest error: {e}")))?
        };
        let core = Orchestrator::new(cfg, &manifest)
            .map_err(|e| JsError::new(&format!("manifest error: {e}")))?;
        Ok(MarqueeStage { core })
    }

    /// Advance by dt (seconds) with the events collected since last frame.
    /// `events` is an array of UiEvent JSON objects or undefined/null.
    /// Returns Outputs JSON: `{ ops: [...], events: [...] }`.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32, events: JsValue) -> Result<JsValue, JsError> {
        let inputs: Inputs = if jsvalue_is_undefined_or_null(&events) {
            Inputs::default()
        } else {
            Inputs {
                events: swb::from_value(events)
                    .map_err(|e| JsError::new(&format!("events error: {e}")))?,
            }
        };
        let out = self.core.step(dt, inputs);
        swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Host-side navigation cancellation (pageshow after a bfcache restore).
    #[wasm_bindgen(js_name = cancel_transition)]
    pub fn cancel_transition(&mut self) {
        self.core.cancel_transition();
    }

    /// True while a page transition is armed or committed.
    #[wasm_bindgen(js_name = transition_in_flight)]
    pub fn transition_in_flight(&self) -> bool {
        self.core.transition_in_flight()
    }

    /// Active testimonial index, or undefined without a slider.
    #[wasm_bindgen(js_name = active_slide)]
    pub fn active_slide(&self) -> Option<u32> {
        self.core.active_slide().map(|i| i as u32)
    }

    /// Active filter category, or undefined without a filter.
    #[wasm_bindgen(js_name = active_category)]
    pub fn active_category(&self) -> Option<String> {
        self.core.active_category().map(|c| c.to_string())
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
