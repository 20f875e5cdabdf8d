//! In-memory page for engine tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::card::decor::DecorationUnit;
use crate::card::surface::{Document, Playback, Surface, SurfaceId, Viewport};
use crate::error::CardError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub text: String,
    pub visible: bool,
    pub style: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub value: String,
}

impl Surface for Element {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
    fn set_style_property(&mut self, property: &str, value: &str) {
        self.style.insert(property.to_string(), value.to_string());
    }
    fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }
    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Audio {
    pub src: Option<String>,
    pub volume: f64,
    pub paused: bool,
    pub loads: usize,
    pub play_requests: usize,
}

impl Default for Audio {
    fn default() -> Self {
        Self { src: None, volume: 1.0, paused: true, loads: 0, play_requests: 0 }
    }
}

impl Playback for Audio {
    fn is_paused(&self) -> bool {
        self.paused
    }
    fn play(&mut self) {
        self.play_requests += 1;
        self.paused = false;
    }
    fn pause(&mut self) {
        self.paused = true;
    }
    fn bind(&mut self, url: &str, volume: f64) {
        self.src = Some(url.to_string());
        self.volume = volume;
        self.loads += 1;
    }
}

/// Page with every surface present and the markup's initial visibility.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    pub elements: BTreeMap<SurfaceId, Element>,
    pub title: String,
    pub viewport: Viewport,
    pub decorations: Vec<DecorationUnit>,
    pub audio: Option<Audio>,
}

impl MemoryDocument {
    pub fn full() -> Self {
        let elements = SurfaceId::ALL
            .iter()
            .map(|&id| {
                let hidden_at_start = matches!(
                    id,
                    SurfaceId::Question2
                        | SurfaceId::Question3
                        | SurfaceId::Celebration
                        | SurfaceId::ExtraLove
                );
                (id, Element { visible: !hidden_at_start, ..Element::default() })
            })
            .collect();
        Self {
            elements,
            title: String::new(),
            viewport: Viewport { width: 1000.0, height: 800.0 },
            decorations: Vec::new(),
            audio: Some(Audio::default()),
        }
    }

    pub fn without(mut self, id: SurfaceId) -> Self {
        self.elements.remove(&id);
        self
    }

    pub fn el(&self, id: SurfaceId) -> &Element {
        &self.elements[&id]
    }

    /// Sections currently shown.
    pub fn visible_sections(&self) -> Vec<SurfaceId> {
        SurfaceId::SECTIONS
            .iter()
            .copied()
            .filter(|id| self.elements.get(id).is_some_and(|e| e.visible))
            .collect()
    }
}

impl Document for MemoryDocument {
    fn surface(&mut self, id: SurfaceId) -> Result<Box<dyn Surface + '_>, CardError> {
        match self.elements.get_mut(&id) {
            Some(el) => Ok(Box::new(el)),
            None => Err(CardError::MissingSurface(id)),
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn append_decoration(&mut self, unit: &DecorationUnit) -> Result<(), CardError> {
        if !self.elements.contains_key(&SurfaceId::FloatingElements) {
            return Err(CardError::MissingSurface(SurfaceId::FloatingElements));
        }
        self.decorations.push(unit.clone());
        Ok(())
    }

    fn playback(&mut self) -> Result<Box<dyn Playback + '_>, CardError> {
        match self.audio.as_mut() {
            Some(audio) => Ok(Box::new(audio)),
            None => Err(CardError::MissingPlayback),
        }
    }
}
