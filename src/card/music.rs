//! Background music toggle.
//!
//! The audio element's paused flag is the only playing state; nothing here
//! keeps a copy of it. Autoplay may be blocked by the browser, in which case
//! the bridge reports back and the button falls back to its start label.

use tracing::{debug, info};

use crate::card::config::MusicSettings;
use crate::card::surface::{Document, SurfaceId};
use crate::error::CardError;

/// What became of an autoplay attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayOutcome {
    Started,
    Rejected,
}

impl AutoplayOutcome {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "started" => Some(AutoplayOutcome::Started),
            "rejected" => Some(AutoplayOutcome::Rejected),
            _ => None,
        }
    }
}

/// Set up playback. Returns whether an autoplay attempt was made.
///
/// Disabled music hides the controls and touches nothing else.
pub fn setup(doc: &mut dyn Document, music: &MusicSettings) -> Result<bool, CardError> {
    if !music.enabled {
        doc.surface(SurfaceId::MusicControls)?
            .set_style_property("display", "none");
        debug!("Music disabled");
        return Ok(false);
    }

    {
        let mut audio = doc.playback()?;
        audio.bind(&music.music_url, music.volume_or_default());
        if music.autoplay {
            audio.play();
        }
    }

    // The stop label waits for the autoplay outcome.
    if !music.autoplay {
        doc.surface(SurfaceId::MusicToggle)?.set_text(&music.start_text);
    }
    Ok(music.autoplay)
}

/// Apply the deferred autoplay result.
pub fn autoplay_settled(
    doc: &mut dyn Document,
    music: &MusicSettings,
    outcome: AutoplayOutcome,
) -> Result<(), CardError> {
    let label = match outcome {
        AutoplayOutcome::Started => &music.stop_text,
        AutoplayOutcome::Rejected => {
            info!("Autoplay prevented by browser");
            &music.start_text
        }
    };
    doc.surface(SurfaceId::MusicToggle)?.set_text(label);
    Ok(())
}

/// Flip between playing and paused. Returns `true` when now playing.
pub fn toggle(doc: &mut dyn Document, music: &MusicSettings) -> Result<bool, CardError> {
    let playing = {
        let mut audio = doc.playback()?;
        if audio.is_paused() {
            audio.play();
            true
        } else {
            audio.pause();
            false
        }
    };
    let label = if playing { &music.stop_text } else { &music.start_text };
    doc.surface(SurfaceId::MusicToggle)?.set_text(label);
    Ok(playing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::testing::{Audio, MemoryDocument};

    fn enabled(autoplay: bool) -> MusicSettings {
        MusicSettings {
            enabled: true,
            autoplay,
            music_url: "https://cdn.example/song.mp3".to_string(),
            volume: Some(0.3),
            ..MusicSettings::default()
        }
    }

    #[test]
    fn disabled_hides_controls_and_binds_nothing() {
        let mut doc = MemoryDocument::full();
        let attempted = setup(&mut doc, &MusicSettings::default()).unwrap();

        assert!(!attempted);
        assert_eq!(doc.el(SurfaceId::MusicControls).style["display"], "none");
        assert_eq!(doc.audio, Some(Audio::default()));
    }

    #[test]
    fn enabled_binds_source_and_volume() {
        let mut doc = MemoryDocument::full();
        setup(&mut doc, &enabled(false)).unwrap();

        let audio = doc.audio.as_ref().unwrap();
        assert_eq!(audio.src.as_deref(), Some("https://cdn.example/song.mp3"));
        assert_eq!(audio.volume, 0.3);
        assert_eq!(audio.loads, 1);
        assert_eq!(audio.play_requests, 0);
        assert_eq!(doc.el(SurfaceId::MusicToggle).text, enabled(false).start_text);
    }

    #[test]
    fn unset_volume_plays_at_half() {
        let mut doc = MemoryDocument::full();
        let mut music = enabled(false);
        music.volume = None;
        setup(&mut doc, &music).unwrap();
        assert_eq!(doc.audio.as_ref().unwrap().volume, 0.5);
    }

    #[test]
    fn autoplay_rejection_falls_back_to_start_label() {
        let mut doc = MemoryDocument::full();
        let music = enabled(true);
        assert!(setup(&mut doc, &music).unwrap());
        assert_eq!(doc.audio.as_ref().unwrap().play_requests, 1);

        // Browser refused; the element is still paused
        doc.audio.as_mut().unwrap().paused = true;
        autoplay_settled(&mut doc, &music, AutoplayOutcome::Rejected).unwrap();
        assert_eq!(doc.el(SurfaceId::MusicToggle).text, music.start_text);

        // The user's click is the retry
        assert!(toggle(&mut doc, &music).unwrap());
        assert_eq!(doc.el(SurfaceId::MusicToggle).text, music.stop_text);
    }

    #[test]
    fn autoplay_success_shows_stop_label() {
        let mut doc = MemoryDocument::full();
        let music = enabled(true);
        setup(&mut doc, &music).unwrap();
        autoplay_settled(&mut doc, &music, AutoplayOutcome::Started).unwrap();
        assert_eq!(doc.el(SurfaceId::MusicToggle).text, music.stop_text);
    }

    #[test]
    fn toggle_follows_the_element_state() {
        let mut doc = MemoryDocument::full();
        let music = enabled(false);
        setup(&mut doc, &music).unwrap();

        assert!(toggle(&mut doc, &music).unwrap());
        assert!(!doc.audio.as_ref().unwrap().paused);
        assert!(!toggle(&mut doc, &music).unwrap());
        assert!(doc.audio.as_ref().unwrap().paused);
        assert_eq!(doc.el(SurfaceId::MusicToggle).text, music.start_text);
    }

    #[test]
    fn missing_audio_element_is_reported() {
        let mut doc = MemoryDocument::full();
        doc.audio = None;
        assert_eq!(setup(&mut doc, &enabled(false)), Err(CardError::MissingPlayback));
    }

    #[test]
    fn outcome_parsing() {
        assert_eq!(AutoplayOutcome::parse("started"), Some(AutoplayOutcome::Started));
        assert_eq!(AutoplayOutcome::parse("rejected"), Some(AutoplayOutcome::Rejected));
        assert_eq!(AutoplayOutcome::parse("maybe"), None);
    }
}
