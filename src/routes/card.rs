//! `/card/*` action handlers: the card's whole external command surface.
//!
//! Each handler borrows the booted card, lets it write to a fresh
//! `PatchDocument`, and returns the recorded batch.

use std::cell::RefCell;

use tracing::{info, warn};

use crate::card::config::CardConfig;
use crate::card::dodge::ControlSize;
use crate::card::music::AutoplayOutcome;
use crate::card::state::{self, Card};
use crate::card::surface::{Document, SurfaceId, Viewport};
use crate::error::CardError;
use crate::patch::{PageLayout, PatchBatch, PatchDocument};
use crate::routes::util::{get_param, get_parsed, parse_query};

/// What the bridge told us about the page: which surfaces exist and the last
/// known viewport.
struct Page {
    layout: PageLayout,
    viewport: Viewport,
}

thread_local! {
    static PAGE: RefCell<Page> = RefCell::new(Page {
        layout: PageLayout::complete(),
        viewport: Viewport::default(),
    });
}

/// Build the page's document, run `f` against the booted card, and package
/// the result. Ops recorded before a failure are still returned. Surfaces
/// `f` could not write land in the batch diagnostics.
fn run<F>(viewport: Option<Viewport>, paused: bool, f: F) -> PatchBatch
where
    F: FnOnce(&mut Card, &mut dyn Document) -> Result<Vec<CardError>, CardError>,
{
    PAGE.with(|p| {
        let mut page = p.borrow_mut();
        if let Some(v) = viewport {
            page.viewport = v;
        }
        let mut doc = PatchDocument::new(&page.layout, page.viewport, paused);
        let outcome = state::with_card_mut(|card| f(card, &mut doc)).and_then(|r| r);
        let mut batch = PatchBatch { ops: doc.into_ops(), ..PatchBatch::default() };
        match outcome {
            Ok(failures) => {
                batch.diagnostics = failures.iter().map(ToString::to_string).collect();
            }
            Err(e) => {
                warn!("{}", e);
                batch.error = Some(e.to_string());
            }
        }
        batch
    })
}

/// Finite pixel value for `key`. Absent is `Ok(None)`; garbage, NaN and
/// infinities are rejected.
fn finite_param(
    params: &[(String, String)],
    key: &'static str,
) -> Result<Option<f64>, CardError> {
    match get_param(params, key) {
        None => Ok(None),
        Some(_) => get_parsed::<f64>(params, key)
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or(CardError::BadParam(key)),
    }
}

/// Viewport from `vw`/`vh` query params. Either may be missing.
fn query_viewport(params: &[(String, String)]) -> Result<Option<Viewport>, CardError> {
    let width = finite_param(params, "vw")?;
    let height = finite_param(params, "vh")?;
    if width.is_none() && height.is_none() {
        return Ok(None);
    }
    let current = PAGE.with(|p| p.borrow().viewport);
    Ok(Some(Viewport {
        width: width.unwrap_or(current.width),
        height: height.unwrap_or(current.height),
    }))
}

/// Rendered size of the dodging button from `w`/`h`. Missing sides count as 0.
fn control_size(params: &[(String, String)]) -> Result<ControlSize, CardError> {
    Ok(ControlSize {
        width: finite_param(params, "w")?.unwrap_or(0.0),
        height: finite_param(params, "h")?.unwrap_or(0.0),
    })
}

// ── init ───────────────────────────────────────────────────────────

/// Parse the config, boot the card and populate the page.
///
/// A config that fails to parse falls back to the stock card; the parse
/// error is reported as a diagnostic and the page still renders.
pub fn init(config_json: &str, surfaces: &str, viewport: Viewport, seed: u64) -> PatchBatch {
    let mut diagnostics = Vec::new();
    let config = match CardConfig::from_json(config_json) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}", e);
            diagnostics.push(e.to_string());
            CardConfig::default()
        }
    };

    PAGE.with(|p| {
        let mut page = p.borrow_mut();
        page.layout = PageLayout::parse(surfaces);
        page.viewport = viewport;

        let mut doc = PatchDocument::new(&page.layout, viewport, true);
        let (card, boot_diagnostics) = Card::boot(config, &mut doc, seed);
        diagnostics.extend(boot_diagnostics);
        info!(decorations = card.decorations(), "Card ready");
        state::replace_card(card);

        PatchBatch { ops: doc.into_ops(), diagnostics, error: None }
    })
}

// ── /card/dodge ────────────────────────────────────────────────────

/// Handle /card/dodge?target={id}&w={px}&h={px}&vw={px}&vh={px}
pub fn handle_dodge(query: &str) -> PatchBatch {
    let params = parse_query(query);
    let target = match get_param(&params, "target") {
        Some(t) if !t.is_empty() => t,
        _ => return PatchBatch::failed(CardError::BadParam("target")),
    };
    let Some(target) = SurfaceId::parse(target) else {
        return PatchBatch::failed(CardError::NotDodgeable(target.to_string()));
    };
    let size = match control_size(&params) {
        Ok(size) => size,
        Err(e) => return PatchBatch::failed(e),
    };
    let viewport = match query_viewport(&params) {
        Ok(viewport) => viewport,
        Err(e) => return PatchBatch::failed(e),
    };
    run(viewport, true, |card, doc| card.dodge(doc, target, size).map(|_| Vec::new()))
}

// ── /card/question/{n} ─────────────────────────────────────────────

/// Handle /card/question/{n}
pub fn handle_question(number: &str) -> PatchBatch {
    let Ok(n) = number.parse::<u32>() else {
        return PatchBatch::failed(CardError::BadParam("question"));
    };
    run(None, true, |card, doc| card.advance(doc, n).map(|()| Vec::new()))
}

// ── /card/celebrate ────────────────────────────────────────────────

/// Handle /card/celebrate
pub fn handle_celebrate() -> PatchBatch {
    run(None, true, |card, doc| card.celebrate(doc).map(|done| done.failures))
}

// ── /card/love ─────────────────────────────────────────────────────

/// Handle /card/love?value={n}&vw={px}
pub fn handle_love(query: &str) -> PatchBatch {
    let params = parse_query(query);
    let Some(value) = get_parsed::<i64>(&params, "value") else {
        return PatchBatch::failed(CardError::BadParam("value"));
    };
    let viewport = match query_viewport(&params) {
        Ok(viewport) => viewport,
        Err(e) => return PatchBatch::failed(e),
    };
    run(viewport, true, |card, doc| Ok(card.love_input(doc, value).failures))
}

/// Handle /card/love/reset. Fired on both DOMContentLoaded and load.
pub fn handle_love_reset() -> PatchBatch {
    run(None, true, |card, doc| Ok(card.love_reset(doc)))
}

// ── /card/music/* ──────────────────────────────────────────────────

/// Handle /card/music/toggle?paused={bool}
pub fn handle_music_toggle(query: &str) -> PatchBatch {
    let params = parse_query(query);
    let Some(paused) = get_parsed::<bool>(&params, "paused") else {
        return PatchBatch::failed(CardError::BadParam("paused"));
    };
    run(None, paused, |card, doc| card.toggle_music(doc).map(|_| Vec::new()))
}

/// Handle /card/music/autoplay?outcome={started|rejected}
pub fn handle_music_autoplay(query: &str) -> PatchBatch {
    let params = parse_query(query);
    let Some(outcome) = get_param(&params, "outcome").and_then(AutoplayOutcome::parse) else {
        return PatchBatch::failed(CardError::BadParam("outcome"));
    };
    let paused = outcome == AutoplayOutcome::Rejected;
    run(None, paused, |card, doc| {
        card.autoplay_settled(doc, outcome).map(|()| Vec::new())
    })
}
