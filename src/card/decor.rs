//! Floating hearts and bears, plus the celebration burst.
//!
//! Each unit gets three independent uniform draws: horizontal position,
//! animation delay, animation duration. Units are append-only.

use serde::Serialize;
use tracing::{debug, warn};

use crate::card::config::FloatingEmojis;
use crate::card::surface::Document;
use crate::error::CardError;

/// Units spawned by one explosion burst.
pub const BURST_SIZE: usize = 50;

/// Horizontal position range, in `vw`.
const LEFT_VW: (f64, f64) = (0.0, 100.0);
/// Animation delay range, in seconds.
const DELAY_S: (f64, f64) = (0.0, 5.0);
/// Animation cycle range, in seconds.
const DURATION_S: (f64, f64) = (10.0, 30.0);

/// Source of uniform draws. Seedable so tests are deterministic.
pub trait RandomSource {
    /// Uniform in `[lo, hi)`. Returns `lo` when the range is empty.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;
    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;
}

impl RandomSource for fastrand::Rng {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        lo + self.f64() * (hi - lo)
    }

    fn index(&mut self, len: usize) -> usize {
        self.usize(0..len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorationKind {
    Heart,
    Bear,
}

impl DecorationKind {
    /// CSS class driving the float animation.
    pub fn class(self) -> &'static str {
        match self {
            DecorationKind::Heart => "heart",
            DecorationKind::Bear => "bear",
        }
    }
}

/// One floating glyph. Carries only placement, no identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecorationUnit {
    pub kind: DecorationKind,
    pub symbol: String,
    /// `left`, in vw.
    pub left_vw: f64,
    /// `animation-delay`, in seconds.
    pub delay_s: f64,
    /// `animation-duration`, in seconds.
    pub duration_s: f64,
}

impl DecorationUnit {
    /// Place `symbol` with fresh draws.
    pub fn place(kind: DecorationKind, symbol: &str, rng: &mut dyn RandomSource) -> Self {
        let left_vw = rng.uniform(LEFT_VW.0, LEFT_VW.1);
        let delay_s = rng.uniform(DELAY_S.0, DELAY_S.1);
        let duration_s = rng.uniform(DURATION_S.0, DURATION_S.1);
        Self { kind, symbol: symbol.to_string(), left_vw, delay_s, duration_s }
    }

    /// Inline style declarations for the unit.
    pub fn style(&self) -> [(&'static str, String); 3] {
        [
            ("left", format!("{}vw", self.left_vw)),
            ("animation-delay", format!("{}s", self.delay_s)),
            ("animation-duration", format!("{}s", self.duration_s)),
        ]
    }
}

/// One unit per configured heart, then one per bear.
pub fn floating_units(emojis: &FloatingEmojis, rng: &mut dyn RandomSource) -> Vec<DecorationUnit> {
    let hearts = emojis.hearts.iter().map(|s| (DecorationKind::Heart, s));
    let bears = emojis.bears.iter().map(|s| (DecorationKind::Bear, s));
    hearts
        .chain(bears)
        .map(|(kind, symbol)| DecorationUnit::place(kind, symbol, rng))
        .collect()
}

/// [`BURST_SIZE`] hearts picked uniformly from `hearts`. Empty when there are none.
pub fn burst_units(hearts: &[String], rng: &mut dyn RandomSource) -> Vec<DecorationUnit> {
    if hearts.is_empty() {
        warn!("No heart emojis configured, skipping explosion");
        return Vec::new();
    }
    (0..BURST_SIZE)
        .map(|_| {
            let symbol = &hearts[rng.index(hearts.len())];
            DecorationUnit::place(DecorationKind::Heart, symbol, rng)
        })
        .collect()
}

/// Append `units` to the decoration container. Returns how many landed.
pub fn append_all(doc: &mut dyn Document, units: &[DecorationUnit]) -> Result<usize, CardError> {
    for unit in units {
        doc.append_decoration(unit)?;
    }
    debug!(count = units.len(), "Decorations appended");
    Ok(units.len())
}
