//! Card configuration, the single customization surface of the page.
//!
//! Deserialized from the page's JSON config (camelCase keys). Every section
//! is optional; whatever is missing falls back to the stock card below.

use serde::{Deserialize, Serialize};

use crate::error::CardError;

// ── Stock values ───────────────────────────────────────────────────

pub mod defaults {
    pub const VALENTINE_NAME: &str = "my love";
    pub const TITLE_SUFFIX: &str = "my love...";

    pub const BACKGROUND_START: &str = "#ffafbd";
    pub const BACKGROUND_END: &str = "#ffc3a0";
    pub const BUTTON_BACKGROUND: &str = "#ff6b6b";
    pub const BUTTON_HOVER: &str = "#ff8787";
    pub const TEXT_COLOR: &str = "#ff4757";

    /// Shortest float cycle allowed, in seconds.
    pub const MIN_FLOAT_SECONDS: f64 = 5.0;
    pub const MIN_FLOAT_DURATION: &str = "5s";
    pub const EXPLOSION_SIZE: f64 = 1.5;
    pub const EXPLOSION_SIZE_RANGE: (f64, f64) = (1.0, 3.0);
    pub const VOLUME: f64 = 0.5;
}

// ── Model ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardConfig {
    pub valentine_name: String,
    pub page_title: String,
    pub floating_emojis: FloatingEmojis,
    pub questions: Questions,
    pub love_messages: LoveMessages,
    pub celebration: CelebrationText,
    pub colors: Palette,
    pub animations: Animations,
    pub music: MusicSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingEmojis {
    pub hearts: Vec<String>,
    pub bears: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Questions {
    pub first: FirstQuestion,
    pub second: SecondQuestion,
    pub third: ThirdQuestion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FirstQuestion {
    pub text: String,
    pub yes_btn: String,
    pub no_btn: String,
    /// Revealed when hovering the "No" button.
    pub secret_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecondQuestion {
    pub text: String,
    /// Label in front of the love meter readout.
    pub start_text: String,
    pub next_btn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThirdQuestion {
    pub text: String,
    pub yes_btn: String,
    pub no_btn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoveMessages {
    pub extreme: String,
    pub high: String,
    pub normal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationText {
    pub title: String,
    pub message: String,
    pub emojis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    pub background_start: String,
    pub background_end: String,
    pub button_background: String,
    pub button_hover: String,
    pub text_color: String,
}

impl Palette {
    /// Every slot as `(name, value, stock default)`, in declaration order.
    pub fn slots_mut(&mut self) -> [(&'static str, &mut String, &'static str); 5] {
        [
            ("backgroundStart", &mut self.background_start, defaults::BACKGROUND_START),
            ("backgroundEnd", &mut self.background_end, defaults::BACKGROUND_END),
            ("buttonBackground", &mut self.button_background, defaults::BUTTON_BACKGROUND),
            ("buttonHover", &mut self.button_hover, defaults::BUTTON_HOVER),
            ("textColor", &mut self.text_color, defaults::TEXT_COLOR),
        ]
    }

    /// Slots paired with the CSS custom property they feed.
    pub fn css_properties(&self) -> [(&'static str, &str); 5] {
        [
            ("--background-start", self.background_start.as_str()),
            ("--background-end", self.background_end.as_str()),
            ("--button-background", self.button_background.as_str()),
            ("--button-hover", self.button_hover.as_str()),
            ("--text-color", self.text_color.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Animations {
    /// CSS time, e.g. `"15s"`.
    pub float_duration: String,
    /// CSS length, e.g. `"50px"`.
    pub float_distance: String,
    pub bounce_speed: String,
    pub heart_explosion_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MusicSettings {
    pub enabled: bool,
    pub autoplay: bool,
    pub music_url: String,
    pub start_text: String,
    pub stop_text: String,
    /// `None` until the validator resolves it.
    pub volume: Option<f64>,
}

impl MusicSettings {
    pub fn volume_or_default(&self) -> f64 {
        self.volume.unwrap_or(defaults::VOLUME)
    }
}

impl CardConfig {
    /// Parse the page config. Missing keys take stock values.
    pub fn from_json(json: &str) -> Result<Self, CardError> {
        serde_json::from_str(json).map_err(|e| CardError::Config(e.to_string()))
    }

    /// Heading shown above the first question.
    pub fn headline(&self) -> String {
        format!("{}, {}", self.valentine_name, defaults::TITLE_SUFFIX)
    }
}

// ── Stock card ─────────────────────────────────────────────────────

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            valentine_name: "Sweetheart".to_string(),
            page_title: "Will you be my Valentine? \u{1F49D}".to_string(),
            floating_emojis: FloatingEmojis::default(),
            questions: Questions::default(),
            love_messages: LoveMessages::default(),
            celebration: CelebrationText::default(),
            colors: Palette::default(),
            animations: Animations::default(),
            music: MusicSettings::default(),
        }
    }
}

impl Default for FloatingEmojis {
    fn default() -> Self {
        Self {
            hearts: ["\u{2764}\u{FE0F}", "\u{1F496}", "\u{1F49D}", "\u{1F497}", "\u{1F493}"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            bears: ["\u{1F9F8}", "\u{1F43B}"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for FirstQuestion {
    fn default() -> Self {
        Self {
            text: "Do you like me?".to_string(),
            yes_btn: "Yes".to_string(),
            no_btn: "No".to_string(),
            secret_answer: "I don't like you, I love you! \u{2764}\u{FE0F}".to_string(),
        }
    }
}

impl Default for SecondQuestion {
    fn default() -> Self {
        Self {
            text: "How much do you love me?".to_string(),
            start_text: "This much!".to_string(),
            next_btn: "Next \u{2764}\u{FE0F}".to_string(),
        }
    }
}

impl Default for ThirdQuestion {
    fn default() -> Self {
        Self {
            text: "Will you be my Valentine? \u{1F339}".to_string(),
            yes_btn: "Yes!".to_string(),
            no_btn: "No".to_string(),
        }
    }
}

impl Default for LoveMessages {
    fn default() -> Self {
        Self {
            extreme: "WOOOOW You love me that much?? \u{1F970}\u{1F680}\u{1F49D}".to_string(),
            high: "To infinity and beyond! \u{1F680}\u{1F49D}".to_string(),
            normal: "And beyond! \u{1F970}".to_string(),
        }
    }
}

impl Default for CelebrationText {
    fn default() -> Self {
        Self {
            title: "Yay! I'm the luckiest person in the world! \u{1F389}\u{1F49D}".to_string(),
            message: "Now come get your gift, a big warm hug and a huge kiss!".to_string(),
            emojis: "\u{1F381}\u{1F496}\u{1F917}\u{1F49D}\u{1F48B}\u{2764}\u{FE0F}\u{1F495}"
                .to_string(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background_start: defaults::BACKGROUND_START.to_string(),
            background_end: defaults::BACKGROUND_END.to_string(),
            button_background: defaults::BUTTON_BACKGROUND.to_string(),
            button_hover: defaults::BUTTON_HOVER.to_string(),
            text_color: defaults::TEXT_COLOR.to_string(),
        }
    }
}

impl Default for Animations {
    fn default() -> Self {
        Self {
            float_duration: "15s".to_string(),
            float_distance: "50px".to_string(),
            bounce_speed: "0.5s".to_string(),
            heart_explosion_size: defaults::EXPLOSION_SIZE,
        }
    }
}

impl Default for MusicSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            autoplay: false,
            music_url: String::new(),
            start_text: "\u{1F3B5} Play Music".to_string(),
            stop_text: "\u{1F507} Stop Music".to_string(),
            volume: None,
        }
    }
}
