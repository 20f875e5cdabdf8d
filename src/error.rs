//! Error types for the card engine.

use thiserror::Error;

use crate::card::surface::SurfaceId;

/// Everything that can go wrong while driving the card.
///
/// Configuration defects are never errors: the validator repairs them and
/// reports warnings instead. What is left here are integration defects
/// (page markup and engine disagree) and rejected actions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CardError {
    /// A surface the engine writes to is not on the page.
    #[error("Element with id \"{0}\" not found")]
    MissingSurface(SurfaceId),

    /// The page has no playback resource to bind music to.
    #[error("Playback resource not found")]
    MissingPlayback,

    /// The config JSON could not be parsed.
    #[error("Invalid card config JSON: {0}")]
    Config(String),

    /// Only questions 1 to 3 exist.
    #[error("No question numbered {0}")]
    InvalidQuestion(u32),

    /// The flow only moves forward, one stage at a time.
    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// The dodge target is not one of the evasive buttons.
    #[error("Element \"{0}\" does not dodge")]
    NotDodgeable(String),

    /// An action parameter was absent or malformed.
    #[error("Missing or invalid {0} parameter")]
    BadParam(&'static str),

    /// An action arrived before `init_card`.
    #[error("card not initialized")]
    NotInitialized,
}
