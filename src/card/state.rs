//! Card engine state and its global container.
//!
//! Uses `thread_local!` + `RefCell` for safe mutable access in single-threaded
//! WASM. The page keeps the module alive, so the card lives for as long as the
//! page is open.

use std::cell::RefCell;

use tracing::{debug, error};

use crate::card::celebrate::{self, Celebration};
use crate::card::config::CardConfig;
use crate::card::decor;
use crate::card::dodge::{self, ControlSize, Position};
use crate::card::flow::{QuestionFlow, Stage};
use crate::card::meter::{LoveMeter, MeterUpdate};
use crate::card::music::{self, AutoplayOutcome};
use crate::card::project;
use crate::card::surface::{Document, SurfaceId};
use crate::card::validate;
use crate::error::CardError;

/// Everything that changes while the page is open, plus the validated config.
#[derive(Debug, Clone)]
pub struct Card {
    config: CardConfig,
    flow: QuestionFlow,
    meter: LoveMeter,
    rng: fastrand::Rng,
    decorations: usize,
}

impl Card {
    /// Validate `config` and bring the page up.
    ///
    /// Returns the card and the operator diagnostics: config warnings first,
    /// then any integration defects hit while populating the page. Nothing
    /// here aborts; a missing surface only costs that surface.
    pub fn boot(mut config: CardConfig, doc: &mut dyn Document, seed: u64) -> (Card, Vec<String>) {
        let warnings = validate::validate(&mut config);
        warnings.report();
        let mut diagnostics = warnings.warnings;

        let mut card = Card {
            config,
            flow: QuestionFlow::new(),
            meter: LoveMeter::default(),
            rng: fastrand::Rng::with_seed(seed),
            decorations: 0,
        };

        for failure in project::project(doc, &card.config) {
            diagnostics.push(failure.to_string());
        }

        let units = decor::floating_units(&card.config.floating_emojis, &mut card.rng);
        match decor::append_all(doc, &units) {
            Ok(n) => card.decorations += n,
            Err(e) => {
                error!("{}", e);
                diagnostics.push(e.to_string());
            }
        }

        for failure in card.meter.reset(doc) {
            diagnostics.push(failure.to_string());
        }

        if let Err(e) = music::setup(doc, &card.config.music) {
            error!("{}", e);
            diagnostics.push(e.to_string());
        }

        (card, diagnostics)
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.flow.stage()
    }

    pub fn love_value(&self) -> i64 {
        self.meter.value()
    }

    /// Decoration units appended so far.
    pub fn decorations(&self) -> usize {
        self.decorations
    }

    pub fn advance(&mut self, doc: &mut dyn Document, question: u32) -> Result<(), CardError> {
        self.flow.show_question(doc, question)
    }

    pub fn celebrate(&mut self, doc: &mut dyn Document) -> Result<Celebration, CardError> {
        let run = celebrate::celebrate(doc, &mut self.flow, &self.config, &mut self.rng)?;
        self.decorations += run.appended;
        Ok(run)
    }

    pub fn dodge(
        &mut self,
        doc: &mut dyn Document,
        target: SurfaceId,
        size: ControlSize,
    ) -> Result<Position, CardError> {
        dodge::dodge(doc, target, size, &mut self.rng)
    }

    pub fn love_input(&mut self, doc: &mut dyn Document, value: i64) -> MeterUpdate {
        self.meter.input(doc, value, &self.config.love_messages)
    }

    /// Returns the surfaces that could not be written.
    pub fn love_reset(&mut self, doc: &mut dyn Document) -> Vec<CardError> {
        self.meter.reset(doc)
    }

    /// Toggle playback. A no-op when music is disabled.
    pub fn toggle_music(&mut self, doc: &mut dyn Document) -> Result<bool, CardError> {
        if !self.config.music.enabled {
            debug!("Music toggle ignored, music disabled");
            return Ok(false);
        }
        music::toggle(doc, &self.config.music)
    }

    pub fn autoplay_settled(
        &mut self,
        doc: &mut dyn Document,
        outcome: AutoplayOutcome,
    ) -> Result<(), CardError> {
        if !self.config.music.enabled {
            return Ok(());
        }
        music::autoplay_settled(doc, &self.config.music, outcome)
    }
}

thread_local! {
    static CARD: RefCell<Option<Card>> = const { RefCell::new(None) };
}

/// Execute a closure with read access to the card, if booted.
pub fn with_card<F, R>(f: F) -> Result<R, CardError>
where
    F: FnOnce(&Card) -> R,
{
    CARD.with(|c| c.borrow().as_ref().map(f).ok_or(CardError::NotInitialized))
}

/// Execute a closure with mutable access to the card, if booted.
pub fn with_card_mut<F, R>(f: F) -> Result<R, CardError>
where
    F: FnOnce(&mut Card) -> R,
{
    CARD.with(|c| c.borrow_mut().as_mut().map(f).ok_or(CardError::NotInitialized))
}

/// Install a freshly booted card, replacing any previous one.
pub fn replace_card(card: Card) {
    CARD.with(|c| {
        *c.borrow_mut() = Some(card);
    });
}

/// Drop the card (tests).
pub fn clear_card() {
    CARD.with(|c| {
        *c.borrow_mut() = None;
    });
}
