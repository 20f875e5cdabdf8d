//! Card engine: config validation, text projection, the question flow and
//! the interactive widgets. Everything writes through the `Document` trait, so
//! none of it depends on a real DOM.

pub mod celebrate;
pub mod config;
pub mod decor;
pub mod dodge;
pub mod flow;
pub mod meter;
pub mod music;
pub mod project;
pub mod state;
pub mod surface;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;
