//! Big Question core crate.
//!
//! A single-session, client-only guided sequence of themed screens ending in
//! a yes/no proposal whose "No" button actively evades selection. The whole
//! app boots through `start_app()`; the shared copy (landing phrase, the
//! proposal prompt, the five discouragement captions, ambient glyphs) lives
//! here so both the app modules and the native tests reach it.

use wasm_bindgen::prelude::*;

pub mod app;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Shared copy. The discouragement captions are ordered: index n-1 is shown on
// the n-th "No" attempt, with the last entry the steady state from the fifth
// attempt on.
// -----------------------------------------------------------------------------

/// Typed out character by character on the landing screen.
pub const LANDING_PHRASE: &str = "Let's play a trivia game 😌";

/// Default heading of the proposal screen.
pub const PROPOSAL_PROMPT: &str = "Will you be my girlfriend?";

/// Rotating captions for repeated negative choices.
pub const DISCOURAGEMENTS: [&str; 5] = [
    "Be serious.",
    "Why are you like this?",
    "You don't mean that.",
    "The universe says yes.",
    "Just press yes.",
];

/// Faint background caption latched after the fifth negative attempt.
pub const FAINT_CAPTION: &str = "Just press yes.";

/// Greeting shown when the same browsing session reloads the page.
pub const RETURN_VISIT_MSG: &str = "My Heart I need you to lock in 🥺";

/// Glyph pool for the ambient motion layer, cycled in order.
pub const AMBIENT_GLYPHS: [&str; 8] = ["💜", "✨", "💕", "🦋", "💗", "⭐", "💜", "✨"];

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    app::start()
}
