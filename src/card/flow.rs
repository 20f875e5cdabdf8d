//! Question flow: Q1 → Q2 → Q3 → Celebration.
//!
//! Forward only, one stage at a time. Repeating the current stage is a
//! no-op in effect. The "No" buttons never reach this module; they dodge.

use std::fmt;

use tracing::{error, info};

use crate::card::surface::{Document, SurfaceId};
use crate::error::CardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Stage {
    #[default]
    First,
    Second,
    Third,
    Celebration,
}

impl Stage {
    /// Stage showing question `n` (1-based).
    pub fn question(n: u32) -> Option<Stage> {
        match n {
            1 => Some(Stage::First),
            2 => Some(Stage::Second),
            3 => Some(Stage::Third),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::First => Some(Stage::Second),
            Stage::Second => Some(Stage::Third),
            Stage::Third => Some(Stage::Celebration),
            Stage::Celebration => None,
        }
    }

    /// Section container shown while in this stage.
    pub fn section(self) -> SurfaceId {
        match self {
            Stage::First => SurfaceId::Question1,
            Stage::Second => SurfaceId::Question2,
            Stage::Third => SurfaceId::Question3,
            Stage::Celebration => SurfaceId::Celebration,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::First => f.write_str("question 1"),
            Stage::Second => f.write_str("question 2"),
            Stage::Third => f.write_str("question 3"),
            Stage::Celebration => f.write_str("celebration"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionFlow {
    stage: Stage,
}

impl QuestionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether moving to `to` is allowed from the current stage.
    fn check(&self, to: Stage) -> Result<(), CardError> {
        if self.stage == to || self.stage.next() == Some(to) {
            Ok(())
        } else {
            Err(CardError::InvalidTransition {
                from: self.stage.to_string(),
                to: to.to_string(),
            })
        }
    }

    /// Show question `n`, hiding every other section.
    pub fn show_question(&mut self, doc: &mut dyn Document, n: u32) -> Result<(), CardError> {
        let to = Stage::question(n).ok_or(CardError::InvalidQuestion(n))?;
        self.move_to(doc, to)
    }

    /// Hide every question and show the celebration section.
    pub fn enter_celebration(&mut self, doc: &mut dyn Document) -> Result<(), CardError> {
        self.move_to(doc, Stage::Celebration)
    }

    fn move_to(&mut self, doc: &mut dyn Document, to: Stage) -> Result<(), CardError> {
        self.check(to)?;
        reveal_only(doc, to.section())?;
        if self.stage != to {
            info!(from = %self.stage, to = %to, "Question flow advanced");
        }
        self.stage = to;
        Ok(())
    }
}

/// Hide all sections, then show `target`. Checks `target` exists first so
/// the page is never left with nothing on screen.
fn reveal_only(doc: &mut dyn Document, target: SurfaceId) -> Result<(), CardError> {
    doc.surface(target)?;
    for id in SurfaceId::SECTIONS {
        if id == target {
            continue;
        }
        match doc.surface(id) {
            Ok(mut section) => section.set_visible(false),
            Err(e) => error!("{}", e),
        }
    }
    doc.surface(target)?.set_visible(true);
    Ok(())
}
