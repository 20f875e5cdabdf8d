//! Patch recorder: the `Document` the engine sees inside the browser.
//!
//! Rust never touches the DOM. Each bridge call builds a `PatchDocument`,
//! lets the engine write to it, and hands the recorded operations back as one
//! JSON batch. The bridge applies the whole batch in a single synchronous
//! pass, so a hide-then-reveal never shows up as two frames.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::card::decor::DecorationUnit;
use crate::card::surface::{Document, Playback, Surface, SurfaceId, Viewport};
use crate::error::CardError;

/// Markup id of the `<audio>` element in the surfaces list.
pub const PLAYBACK_ID: &str = "bgMusic";

/// One DOM mutation for the bridge to apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOp {
    Title { text: String },
    Text { id: SurfaceId, text: String },
    Visible { id: SurfaceId, visible: bool },
    Style { id: SurfaceId, property: String, value: String },
    Class { id: SurfaceId, class: String, on: bool },
    Value { id: SurfaceId, value: String },
    Append { class: &'static str, symbol: String, style: Vec<(&'static str, String)> },
    Source { url: String, volume: f64 },
    Play,
    Pause,
}

/// What the response to one bridge call looks like.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatchBatch {
    pub ops: Vec<PatchOp>,
    /// Operator-facing warnings; the bridge sends them to the console.
    pub diagnostics: Vec<String>,
    pub error: Option<String>,
}

impl PatchBatch {
    pub fn failed(error: impl ToString) -> Self {
        Self { error: Some(error.to_string()), ..Self::default() }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"ops":[],"diagnostics":[],"error":"serialization failed"}"#.to_string()
        })
    }
}

/// Which surfaces the page actually has. Reported once by the bridge at init.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    present: BTreeSet<SurfaceId>,
    playback: bool,
}

impl PageLayout {
    /// Every known surface plus the audio element.
    pub fn complete() -> Self {
        Self { present: SurfaceId::ALL.into_iter().collect(), playback: true }
    }

    /// Parse a comma-separated id list. Empty means "everything is there";
    /// unknown ids are ignored. `root` is always present.
    pub fn parse(list: &str) -> Self {
        if list.trim().is_empty() {
            return Self::complete();
        }
        let mut layout = Self { present: BTreeSet::from([SurfaceId::Root]), playback: false };
        for id in list.split(',').map(str::trim) {
            if id == PLAYBACK_ID {
                layout.playback = true;
            } else if let Some(surface) = SurfaceId::parse(id) {
                layout.present.insert(surface);
            }
        }
        layout
    }

    pub fn has(&self, id: SurfaceId) -> bool {
        self.present.contains(&id)
    }
}

/// Recording document for a single bridge call.
#[derive(Debug)]
pub struct PatchDocument<'a> {
    layout: &'a PageLayout,
    viewport: Viewport,
    paused: bool,
    ops: Vec<PatchOp>,
}

impl<'a> PatchDocument<'a> {
    /// `paused` is the audio element's current state as seen by the bridge.
    pub fn new(layout: &'a PageLayout, viewport: Viewport, paused: bool) -> Self {
        Self { layout, viewport, paused, ops: Vec::new() }
    }

    pub fn into_ops(self) -> Vec<PatchOp> {
        self.ops
    }
}

struct PatchSurface<'a> {
    id: SurfaceId,
    ops: &'a mut Vec<PatchOp>,
}

impl Surface for PatchSurface<'_> {
    fn set_text(&mut self, text: &str) {
        self.ops.push(PatchOp::Text { id: self.id, text: text.to_string() });
    }

    fn set_visible(&mut self, visible: bool) {
        self.ops.push(PatchOp::Visible { id: self.id, visible });
    }

    fn set_style_property(&mut self, property: &str, value: &str) {
        self.ops.push(PatchOp::Style {
            id: self.id,
            property: property.to_string(),
            value: value.to_string(),
        });
    }

    fn set_class(&mut self, class: &str, on: bool) {
        self.ops.push(PatchOp::Class { id: self.id, class: class.to_string(), on });
    }

    fn set_value(&mut self, value: &str) {
        self.ops.push(PatchOp::Value { id: self.id, value: value.to_string() });
    }
}

struct PatchPlayback<'a> {
    paused: &'a mut bool,
    ops: &'a mut Vec<PatchOp>,
}

impl Playback for PatchPlayback<'_> {
    fn is_paused(&self) -> bool {
        *self.paused
    }

    fn play(&mut self) {
        *self.paused = false;
        self.ops.push(PatchOp::Play);
    }

    fn pause(&mut self) {
        *self.paused = true;
        self.ops.push(PatchOp::Pause);
    }

    fn bind(&mut self, url: &str, volume: f64) {
        self.ops.push(PatchOp::Source { url: url.to_string(), volume });
    }
}

impl Document for PatchDocument<'_> {
    fn surface(&mut self, id: SurfaceId) -> Result<Box<dyn Surface + '_>, CardError> {
        if !self.layout.has(id) {
            return Err(CardError::MissingSurface(id));
        }
        Ok(Box::new(PatchSurface { id, ops: &mut self.ops }))
    }

    fn set_title(&mut self, title: &str) {
        self.ops.push(PatchOp::Title { text: title.to_string() });
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn append_decoration(&mut self, unit: &DecorationUnit) -> Result<(), CardError> {
        if !self.layout.has(SurfaceId::FloatingElements) {
            return Err(CardError::MissingSurface(SurfaceId::FloatingElements));
        }
        self.ops.push(PatchOp::Append {
            class: unit.kind.class(),
            symbol: unit.symbol.clone(),
            style: unit.style().into(),
        });
        Ok(())
    }

    fn playback(&mut self) -> Result<Box<dyn Playback + '_>, CardError> {
        if !self.layout.playback {
            return Err(CardError::MissingPlayback);
        }
        Ok(Box::new(PatchPlayback { paused: &mut self.paused, ops: &mut self.ops }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_parsing() {
        let layout = PageLayout::parse("question1, noBtn1,bgMusic,bogus");
        assert!(layout.has(SurfaceId::Question1));
        assert!(layout.has(SurfaceId::NoBtn1));
        assert!(layout.has(SurfaceId::Root));
        assert!(!layout.has(SurfaceId::Question2));
        assert!(layout.playback);
        assert_eq!(PageLayout::parse(""), PageLayout::complete());
    }

    #[test]
    fn records_surface_writes_in_order() {
        let layout = PageLayout::complete();
        let mut doc = PatchDocument::new(&layout, Viewport::default(), true);
        doc.surface(SurfaceId::Question1).unwrap().set_visible(false);
        doc.surface(SurfaceId::Question2).unwrap().set_visible(true);
        doc.set_title("hi");

        assert_eq!(
            doc.into_ops(),
            vec![
                PatchOp::Visible { id: SurfaceId::Question1, visible: false },
                PatchOp::Visible { id: SurfaceId::Question2, visible: true },
                PatchOp::Title { text: "hi".to_string() },
            ]
        );
    }

    #[test]
    fn absent_surface_is_refused() {
        let layout = PageLayout::parse("question1");
        let mut doc = PatchDocument::new(&layout, Viewport::default(), true);
        assert!(matches!(
            doc.surface(SurfaceId::NoBtn3),
            Err(CardError::MissingSurface(SurfaceId::NoBtn3))
        ));
        assert!(matches!(doc.playback(), Err(CardError::MissingPlayback)));
        assert!(doc.into_ops().is_empty());
    }

    #[test]
    fn playback_tracks_paused_within_a_call() {
        let layout = PageLayout::complete();
        let mut doc = PatchDocument::new(&layout, Viewport::default(), true);
        {
            let mut audio = doc.playback().unwrap();
            assert!(audio.is_paused());
            audio.play();
            assert!(!audio.is_paused());
        }
        assert_eq!(doc.into_ops(), vec![PatchOp::Play]);
    }

    #[test]
    fn batch_json_shape() {
        let batch = PatchBatch {
            ops: vec![
                PatchOp::Text { id: SurfaceId::LoveValue, text: "150".to_string() },
                PatchOp::Class {
                    id: SurfaceId::ExtraLove,
                    class: "super-love".to_string(),
                    on: true,
                },
                PatchOp::Play,
            ],
            diagnostics: vec!["Invalid color for textColor! Using default.".to_string()],
            error: None,
        };
        let json: serde_json::Value = serde_json::from_str(&batch.to_json()).unwrap();
        assert_eq!(json["ops"][0]["op"], "text");
        assert_eq!(json["ops"][0]["id"], "loveValue");
        assert_eq!(json["ops"][1]["class"], "super-love");
        assert_eq!(json["ops"][2]["op"], "play");
        assert_eq!(json["diagnostics"][0], "Invalid color for textColor! Using default.");
        assert!(json["error"].is_null());
    }

    #[test]
    fn failed_batch_carries_message() {
        let json = PatchBatch::failed(CardError::NotInitialized).to_json();
        assert!(json.contains("card not initialized"));
    }

    #[test]
    fn serialized_batch_stays_within_json() {
        let batch = PatchBatch::failed("say \"hi\"");
        let json: serde_json::Value = serde_json::from_str(&batch.to_json()).unwrap();
        assert_eq!(json["error"], "say \"hi\"");
        assert!(json["ops"].as_array().unwrap().is_empty());
    }
}
