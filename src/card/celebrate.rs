//! The final "Yes!": celebration section, its text, and the heart burst.

use tracing::{error, info};

use crate::card::config::CardConfig;
use crate::card::decor::{self, RandomSource};
use crate::card::flow::QuestionFlow;
use crate::card::surface::{try_write, Document, SurfaceId};
use crate::error::CardError;

/// What one celebration run did to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Celebration {
    /// Burst units appended.
    pub appended: usize,
    /// Surfaces that could not be written. The rest of the effect still ran.
    pub failures: Vec<CardError>,
}

/// Run the celebration.
///
/// Only a rejected transition aborts. Once the section is shown, every text
/// and the burst are attempted independently. Replaying it re-runs the whole
/// effect, burst included.
pub fn celebrate(
    doc: &mut dyn Document,
    flow: &mut QuestionFlow,
    config: &CardConfig,
    rng: &mut dyn RandomSource,
) -> Result<Celebration, CardError> {
    flow.enter_celebration(doc)?;

    let mut failures = Vec::new();
    let text = &config.celebration;
    let texts = [
        (SurfaceId::CelebrationTitle, &text.title),
        (SurfaceId::CelebrationMessage, &text.message),
        (SurfaceId::CelebrationEmojis, &text.emojis),
    ];
    for (id, value) in texts {
        try_write(doc, id, &mut failures, |surface| surface.set_text(value));
    }

    let burst = decor::burst_units(&config.floating_emojis.hearts, rng);
    let appended = match decor::append_all(doc, &burst) {
        Ok(n) => n,
        Err(e) => {
            error!("{}", e);
            failures.push(e);
            0
        }
    };
    info!(burst = appended, "Celebration!");
    Ok(Celebration { appended, failures })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::decor::BURST_SIZE;
    use crate::card::flow::Stage;
    use crate::card::testing::MemoryDocument;

    fn at_third_question(doc: &mut MemoryDocument) -> QuestionFlow {
        let mut flow = QuestionFlow::new();
        flow.show_question(doc, 2).unwrap();
        flow.show_question(doc, 3).unwrap();
        flow
    }

    #[test]
    fn reveals_celebration_and_bursts_fifty_hearts() {
        let mut doc = MemoryDocument::full();
        let config = CardConfig::default();
        let mut rng = fastrand::Rng::with_seed(2);
        let mut flow = at_third_question(&mut doc);
        let before = doc.decorations.len();

        let run = celebrate(&mut doc, &mut flow, &config, &mut rng).unwrap();

        assert_eq!(run.appended, BURST_SIZE);
        assert!(run.failures.is_empty());
        assert_eq!(doc.decorations.len(), before + 50);
        assert_eq!(flow.stage(), Stage::Celebration);
        assert_eq!(doc.visible_sections(), vec![SurfaceId::Celebration]);
        assert_eq!(doc.el(SurfaceId::CelebrationTitle).text, config.celebration.title);
        assert_eq!(doc.el(SurfaceId::CelebrationMessage).text, config.celebration.message);
        assert_eq!(doc.el(SurfaceId::CelebrationEmojis).text, config.celebration.emojis);
    }

    #[test]
    fn replay_runs_the_burst_again() {
        let mut doc = MemoryDocument::full();
        let config = CardConfig::default();
        let mut rng = fastrand::Rng::with_seed(2);
        let mut flow = at_third_question(&mut doc);

        celebrate(&mut doc, &mut flow, &config, &mut rng).unwrap();
        celebrate(&mut doc, &mut flow, &config, &mut rng).unwrap();
        assert_eq!(doc.decorations.len(), 2 * BURST_SIZE);
    }

    #[test]
    fn not_reachable_from_first_question() {
        let mut doc = MemoryDocument::full();
        let config = CardConfig::default();
        let mut rng = fastrand::Rng::with_seed(2);
        let mut flow = QuestionFlow::new();

        assert!(celebrate(&mut doc, &mut flow, &config, &mut rng).is_err());
        assert!(doc.decorations.is_empty());
        assert_eq!(doc.visible_sections(), vec![SurfaceId::Question1]);
    }

    #[test]
    fn missing_title_still_writes_the_rest() {
        let mut doc = MemoryDocument::full().without(SurfaceId::CelebrationTitle);
        let config = CardConfig::default();
        let mut rng = fastrand::Rng::with_seed(8);
        let mut flow = at_third_question(&mut doc);
        let before = doc.decorations.len();

        let run = celebrate(&mut doc, &mut flow, &config, &mut rng).unwrap();

        assert_eq!(run.failures, vec![CardError::MissingSurface(SurfaceId::CelebrationTitle)]);
        assert_eq!(run.appended, BURST_SIZE);
        assert_eq!(doc.decorations.len(), before + BURST_SIZE);
        assert_eq!(flow.stage(), Stage::Celebration);
        assert_eq!(doc.el(SurfaceId::CelebrationMessage).text, config.celebration.message);
        assert_eq!(doc.el(SurfaceId::CelebrationEmojis).text, config.celebration.emojis);
    }

    #[test]
    fn missing_decoration_container_keeps_the_text() {
        let mut doc = MemoryDocument::full().without(SurfaceId::FloatingElements);
        let config = CardConfig::default();
        let mut rng = fastrand::Rng::with_seed(8);
        let mut flow = at_third_question(&mut doc);

        let run = celebrate(&mut doc, &mut flow, &config, &mut rng).unwrap();

        assert_eq!(run.appended, 0);
        assert_eq!(run.failures, vec![CardError::MissingSurface(SurfaceId::FloatingElements)]);
        assert_eq!(doc.el(SurfaceId::CelebrationTitle).text, config.celebration.title);
    }
}
