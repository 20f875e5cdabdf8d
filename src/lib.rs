//! Valentine card engine, compiled to WASM.
//!
//! The page's bridge script calls two exports:
//!
//! * `init_card(config_json, surfaces, viewport_width, viewport_height, seed)`
//!   once at load, and
//! * `handle_action(path, query)` for every user action afterwards.
//!
//! Both return a JSON patch batch (`{"ops":[...],"diagnostics":[...],"error":..}`)
//! for the bridge to apply to the DOM. Uses `matchit` for action routing.

use wasm_bindgen::prelude::*;

pub mod card;
pub mod error;
pub mod patch;
pub mod routes;

use crate::card::surface::Viewport;
use crate::patch::PatchBatch;

/// Boot the card and return the batch that populates the page.
///
/// # Arguments
/// * `config_json`: the page's card config as JSON
/// * `surfaces`: comma-separated element ids present on the page (empty = all)
/// * `viewport_width`, `viewport_height`: `innerWidth` / `innerHeight`
/// * `seed`: seed for decoration placement and button dodging
#[wasm_bindgen]
pub fn init_card(
    config_json: &str,
    surfaces: &str,
    viewport_width: f64,
    viewport_height: f64,
    seed: u32,
) -> String {
    let viewport = Viewport { width: viewport_width, height: viewport_height };
    routes::card::init(config_json, surfaces, viewport, u64::from(seed)).to_json()
}

/// Route a user action and return the resulting patch batch as JSON.
///
/// # Arguments
/// * `path`: action path (e.g., "/card/question/2")
/// * `query`: query string (e.g., "?target=noBtn1&w=80&h=40")
#[wasm_bindgen]
pub fn handle_action(path: &str, query: &str) -> String {
    dispatch(path, query).to_json()
}

fn dispatch(path: &str, query: &str) -> PatchBatch {
    let mut router = matchit::Router::new();

    router.insert("/card/dodge", "dodge").ok();
    router.insert("/card/question/{n}", "question").ok();
    router.insert("/card/celebrate", "celebrate").ok();
    router.insert("/card/love", "love").ok();
    router.insert("/card/love/reset", "love_reset").ok();
    router.insert("/card/music/toggle", "music_toggle").ok();
    router.insert("/card/music/autoplay", "music_autoplay").ok();

    match router.at(path) {
        Ok(matched) => match *matched.value {
            "dodge" => routes::card::handle_dodge(query),
            "question" => routes::card::handle_question(matched.params.get("n").unwrap_or("")),
            "celebrate" => routes::card::handle_celebrate(),
            "love" => routes::card::handle_love(query),
            "love_reset" => routes::card::handle_love_reset(),
            "music_toggle" => routes::card::handle_music_toggle(query),
            "music_autoplay" => routes::card::handle_music_autoplay(query),
            _ => not_found(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> PatchBatch {
    PatchBatch::failed("404 — action not found")
}


#[cfg(all(test, target_arch = "wasm32"))]
mod web_tests {
    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn boots_and_routes_through_the_exports() {
        card::state::clear_card();
        let boot: serde_json::Value =
            serde_json::from_str(&init_card("{}", "", 800.0, 600.0, 11)).unwrap();
        assert!(boot["error"].is_null());

        let json = handle_action("/card/question/2", "");
        assert!(json.contains(r#""id":"question2","visible":true"#));
        assert!(handle_action("/card/unknown", "").contains("404"));
        card::state::clear_card();
    }
}
