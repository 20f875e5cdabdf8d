//! One-shot projection of validated config text onto the page.

use crate::card::config::CardConfig;
use crate::card::surface::{try_write, Document, SurfaceId};
use crate::error::CardError;

/// Static text surfaces and where their text comes from.
fn text_bindings(config: &CardConfig) -> [(SurfaceId, String); 11] {
    let q = &config.questions;
    [
        (SurfaceId::ValentineTitle, config.headline()),
        (SurfaceId::Question1Text, q.first.text.clone()),
        (SurfaceId::YesBtn1, q.first.yes_btn.clone()),
        (SurfaceId::NoBtn1, q.first.no_btn.clone()),
        (SurfaceId::SecretAnswerBtn, q.first.secret_answer.clone()),
        (SurfaceId::Question2Text, q.second.text.clone()),
        (SurfaceId::StartText, q.second.start_text.clone()),
        (SurfaceId::NextBtn, q.second.next_btn.clone()),
        (SurfaceId::Question3Text, q.third.text.clone()),
        (SurfaceId::YesBtn3, q.third.yes_btn.clone()),
        (SurfaceId::NoBtn3, q.third.no_btn.clone()),
    ]
}

/// Theme custom properties set on the root element.
fn theme_properties(config: &CardConfig) -> Vec<(&'static str, String)> {
    let anim = &config.animations;
    let mut props: Vec<(&'static str, String)> = config
        .colors
        .css_properties()
        .iter()
        .map(|(name, value)| (*name, value.to_string()))
        .collect();
    props.push(("--float-duration", anim.float_duration.clone()));
    props.push(("--float-distance", anim.float_distance.clone()));
    props.push(("--bounce-speed", anim.bounce_speed.clone()));
    props.push(("--heart-explosion-size", anim.heart_explosion_size.to_string()));
    props
}

/// Write title, theme and static text. A missing surface is skipped and
/// reported; the rest still populate.
pub fn project(doc: &mut dyn Document, config: &CardConfig) -> Vec<CardError> {
    let mut failures = Vec::new();

    doc.set_title(&config.page_title);

    try_write(doc, SurfaceId::Root, &mut failures, |root| {
        for (name, value) in theme_properties(config) {
            root.set_style_property(name, &value);
        }
    });

    for (id, text) in text_bindings(config) {
        try_write(doc, id, &mut failures, |surface| surface.set_text(&text));
    }

    failures
}
