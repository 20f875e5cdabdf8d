//! Love meter: a slider that keeps growing past its nominal maximum.

use tracing::debug;

use crate::card::config::LoveMessages;
use crate::card::surface::{try_write, Document, SurfaceId};
use crate::error::CardError;

/// Slider minimum and starting value.
pub const MIN: i64 = 100;
/// Value at which the overflow fraction reaches 1.
pub const NOMINAL_MAX: i64 = 10_000;
/// Share of the viewport width the slider may grow by at `NOMINAL_MAX`.
const GROWTH_SHARE: f64 = 0.8;
const SUPER_LOVE_CLASS: &str = "super-love";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoveTier {
    /// 100 < value ≤ 1000
    Normal,
    /// 1000 < value < 5000
    High,
    /// value ≥ 5000
    Extreme,
}

impl LoveTier {
    /// Tier for a value above the minimum. `None` at or below it.
    pub fn for_value(value: i64) -> Option<LoveTier> {
        match value {
            v if v >= 5000 => Some(LoveTier::Extreme),
            v if v > 1000 => Some(LoveTier::High),
            v if v > MIN => Some(LoveTier::Normal),
            _ => None,
        }
    }

    pub fn message(self, messages: &LoveMessages) -> &str {
        match self {
            LoveTier::Normal => &messages.normal,
            LoveTier::High => &messages.high,
            LoveTier::Extreme => &messages.extreme,
        }
    }
}

/// Fraction of the nominal range used above the minimum. Exceeds 1 past the max.
pub fn overflow_fraction(value: i64) -> f64 {
    (value - MIN) as f64 / (NOMINAL_MAX - MIN) as f64
}

/// Result of one slider input.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterUpdate {
    pub tier: Option<LoveTier>,
    /// Surfaces that could not be written.
    pub failures: Vec<CardError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoveMeter {
    value: i64,
}

impl Default for LoveMeter {
    fn default() -> Self {
        Self { value: MIN }
    }
}

impl LoveMeter {
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn tier(&self) -> Option<LoveTier> {
        LoveTier::for_value(self.value)
    }

    /// Back to 100 with the extra message hidden. Safe to run any number of
    /// times. Returns the surfaces that could not be written.
    pub fn reset(&mut self, doc: &mut dyn Document) -> Vec<CardError> {
        self.value = MIN;
        let text = MIN.to_string();
        let mut failures = Vec::new();
        try_write(doc, SurfaceId::LoveMeter, &mut failures, |slider| {
            slider.set_value(&text);
            slider.set_style_property("width", "100%");
        });
        try_write(doc, SurfaceId::LoveValue, &mut failures, |readout| readout.set_text(&text));
        try_write(doc, SurfaceId::ExtraLove, &mut failures, |extra| {
            extra.set_visible(false);
            extra.set_class(SUPER_LOVE_CLASS, false);
        });
        failures
    }

    /// Handle a slider input event. Values under the minimum are floored.
    ///
    /// Each surface is written on its own; a missing one does not stop the
    /// others from following the new value.
    pub fn input(
        &mut self,
        doc: &mut dyn Document,
        raw: i64,
        messages: &LoveMessages,
    ) -> MeterUpdate {
        self.value = raw.max(MIN);
        let viewport_width = doc.viewport().width;
        let mut failures = Vec::new();

        let readout = self.value.to_string();
        try_write(doc, SurfaceId::LoveValue, &mut failures, |s| s.set_text(&readout));

        let tier = self.tier();
        match tier {
            Some(tier) => {
                let extra_px = overflow_fraction(self.value) * viewport_width * GROWTH_SHARE;
                let width = format!("calc(100% + {}px)", extra_px);
                try_write(doc, SurfaceId::LoveMeter, &mut failures, |slider| {
                    slider.set_style_property("width", &width);
                    slider.set_style_property("transition", "width 0.3s");
                });
                try_write(doc, SurfaceId::ExtraLove, &mut failures, |extra| {
                    extra.set_visible(true);
                    extra.set_class(SUPER_LOVE_CLASS, tier == LoveTier::Extreme);
                    extra.set_text(tier.message(messages));
                });
            }
            None => {
                try_write(doc, SurfaceId::ExtraLove, &mut failures, |extra| {
                    extra.set_visible(false);
                    extra.set_class(SUPER_LOVE_CLASS, false);
                });
                try_write(doc, SurfaceId::LoveMeter, &mut failures, |slider| {
                    slider.set_style_property("width", "100%");
                });
            }
        }
        debug!(value = self.value, ?tier, "Love meter moved");
        MeterUpdate { tier, failures }
    }
}
