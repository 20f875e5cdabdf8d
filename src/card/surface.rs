//! Named page surfaces and the document abstraction the engine writes to.
//!
//! The engine never talks to the DOM. It asks a [`Document`] for a surface by
//! id and calls `set_text` / `set_visible` / `set_style_property` on it. In the
//! browser the document is a patch recorder (see `crate::patch`); in tests it
//! is an in-memory page.

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::error;

use crate::card::decor::DecorationUnit;
use crate::error::CardError;

/// Every element id the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurfaceId {
    /// `<html>` element, carrier of the theme custom properties.
    Root,
    ValentineTitle,
    Question1,
    Question1Text,
    YesBtn1,
    NoBtn1,
    SecretAnswerBtn,
    Question2,
    Question2Text,
    StartText,
    NextBtn,
    LoveMeter,
    LoveValue,
    ExtraLove,
    Question3,
    Question3Text,
    YesBtn3,
    NoBtn3,
    Celebration,
    CelebrationTitle,
    CelebrationMessage,
    CelebrationEmojis,
    FloatingElements,
    MusicControls,
    MusicToggle,
}

impl SurfaceId {
    pub const ALL: [SurfaceId; 25] = [
        SurfaceId::Root,
        SurfaceId::ValentineTitle,
        SurfaceId::Question1,
        SurfaceId::Question1Text,
        SurfaceId::YesBtn1,
        SurfaceId::NoBtn1,
        SurfaceId::SecretAnswerBtn,
        SurfaceId::Question2,
        SurfaceId::Question2Text,
        SurfaceId::StartText,
        SurfaceId::NextBtn,
        SurfaceId::LoveMeter,
        SurfaceId::LoveValue,
        SurfaceId::ExtraLove,
        SurfaceId::Question3,
        SurfaceId::Question3Text,
        SurfaceId::YesBtn3,
        SurfaceId::NoBtn3,
        SurfaceId::Celebration,
        SurfaceId::CelebrationTitle,
        SurfaceId::CelebrationMessage,
        SurfaceId::CelebrationEmojis,
        SurfaceId::FloatingElements,
        SurfaceId::MusicControls,
        SurfaceId::MusicToggle,
    ];

    /// Sections toggled by the question flow. Exactly one is visible at a time.
    pub const SECTIONS: [SurfaceId; 4] = [
        SurfaceId::Question1,
        SurfaceId::Question2,
        SurfaceId::Question3,
        SurfaceId::Celebration,
    ];

    /// The element id used in the page markup.
    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceId::Root => "root",
            SurfaceId::ValentineTitle => "valentineTitle",
            SurfaceId::Question1 => "question1",
            SurfaceId::Question1Text => "question1Text",
            SurfaceId::YesBtn1 => "yesBtn1",
            SurfaceId::NoBtn1 => "noBtn1",
            SurfaceId::SecretAnswerBtn => "secretAnswerBtn",
            SurfaceId::Question2 => "question2",
            SurfaceId::Question2Text => "question2Text",
            SurfaceId::StartText => "startText",
            SurfaceId::NextBtn => "nextBtn",
            SurfaceId::LoveMeter => "loveMeter",
            SurfaceId::LoveValue => "loveValue",
            SurfaceId::ExtraLove => "extraLove",
            SurfaceId::Question3 => "question3",
            SurfaceId::Question3Text => "question3Text",
            SurfaceId::YesBtn3 => "yesBtn3",
            SurfaceId::NoBtn3 => "noBtn3",
            SurfaceId::Celebration => "celebration",
            SurfaceId::CelebrationTitle => "celebrationTitle",
            SurfaceId::CelebrationMessage => "celebrationMessage",
            SurfaceId::CelebrationEmojis => "celebrationEmojis",
            SurfaceId::FloatingElements => "floatingElements",
            SurfaceId::MusicControls => "musicControls",
            SurfaceId::MusicToggle => "musicToggle",
        }
    }

    /// Look up a surface by its markup id.
    pub fn parse(id: &str) -> Option<SurfaceId> {
        SurfaceId::ALL.iter().copied().find(|s| s.as_str() == id)
    }

    /// Section container for question `n` (1-based).
    pub fn question_section(n: u32) -> Option<SurfaceId> {
        match n {
            1 => Some(SurfaceId::Question1),
            2 => Some(SurfaceId::Question2),
            3 => Some(SurfaceId::Question3),
            _ => None,
        }
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SurfaceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1280.0, height: 720.0 }
    }
}

/// Write capability for one page element.
pub trait Surface {
    fn set_text(&mut self, text: &str);
    fn set_visible(&mut self, visible: bool);
    fn set_style_property(&mut self, property: &str, value: &str);
    /// Add (`on = true`) or remove a CSS class.
    fn set_class(&mut self, class: &str, on: bool);
    /// Form control value (the slider's `value` attribute).
    fn set_value(&mut self, value: &str);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn set_text(&mut self, text: &str) {
        (**self).set_text(text)
    }
    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible)
    }
    fn set_style_property(&mut self, property: &str, value: &str) {
        (**self).set_style_property(property, value)
    }
    fn set_class(&mut self, class: &str, on: bool) {
        (**self).set_class(class, on)
    }
    fn set_value(&mut self, value: &str) {
        (**self).set_value(value)
    }
}

/// The `<audio>` element. Its own paused flag is the only playing state.
pub trait Playback {
    fn is_paused(&self) -> bool;
    /// Request playback. Whether it actually starts is reported later.
    fn play(&mut self);
    fn pause(&mut self);
    /// Point the source at `url`, set the volume and reload.
    fn bind(&mut self, url: &str, volume: f64);
}

impl<P: Playback + ?Sized> Playback for &mut P {
    fn is_paused(&self) -> bool {
        (**self).is_paused()
    }
    fn play(&mut self) {
        (**self).play()
    }
    fn pause(&mut self) {
        (**self).pause()
    }
    fn bind(&mut self, url: &str, volume: f64) {
        (**self).bind(url, volume)
    }
}

/// The page as the engine sees it.
pub trait Document {
    /// Look up a surface. Absence is an integration defect.
    fn surface(&mut self, id: SurfaceId) -> Result<Box<dyn Surface + '_>, CardError>;
    fn set_title(&mut self, title: &str);
    fn viewport(&self) -> Viewport;
    /// Append one unit to the floating decoration container.
    fn append_decoration(&mut self, unit: &DecorationUnit) -> Result<(), CardError>;
    fn playback(&mut self) -> Result<Box<dyn Playback + '_>, CardError>;
}

/// Apply `write` to surface `id`. A missing surface is logged and pushed onto
/// `failures`; the caller carries on with the rest of the page.
pub fn try_write<F>(
    doc: &mut dyn Document,
    id: SurfaceId,
    failures: &mut Vec<CardError>,
    write: F,
) where
    F: FnOnce(&mut dyn Surface),
{
    match doc.surface(id) {
        Ok(mut surface) => write(&mut *surface),
        Err(e) => {
            error!("{}", e);
            failures.push(e);
        }
    }
}
