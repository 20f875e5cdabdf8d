//! Config validation. Repairs bad values in place and reports what it did.
//!
//! Never fails: every defect has a stock replacement. Warnings go to the
//! operator (log + patch diagnostics), never to the person opening the card.

use tracing::warn;

use crate::card::config::{defaults, CardConfig};

/// Warnings collected during one validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub warnings: Vec<String>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    fn push(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Emit the whole batch on the log channel.
    pub fn report(&self) {
        if self.is_empty() {
            return;
        }
        warn!(count = self.warnings.len(), "Configuration warnings");
        for warning in &self.warnings {
            warn!("- {}", warning);
        }
    }
}

/// `#` followed by exactly 3 or 6 hex digits.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => {
            (digits.len() == 3 || digits.len() == 6)
                && digits.bytes().all(|b| b.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Leading float of a CSS quantity: `"15s"` → 15, `"2.5e1s"` → 25, `"s"` → None.
///
/// Accepts an optional sign, digits with an optional fraction and an optional
/// exponent. Anything after that is a unit and ignored.
pub fn leading_number(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

/// Validate and repair `config`, returning the warnings.
pub fn validate(config: &mut CardConfig) -> Diagnostics {
    let mut diagnostics = Diagnostics::default();

    if config.valentine_name.trim().is_empty() {
        diagnostics.push("Valentine's name is not set! Using default.");
        config.valentine_name = defaults::VALENTINE_NAME.to_string();
    }

    for (slot, value, fallback) in config.colors.slots_mut() {
        if !is_hex_color(value) {
            diagnostics.push(format!("Invalid color for {}! Using default.", slot));
            *value = fallback.to_string();
        }
    }

    let too_short = leading_number(&config.animations.float_duration)
        .is_none_or(|secs| secs < defaults::MIN_FLOAT_SECONDS);
    if too_short {
        diagnostics.push("Float duration too short! Setting to 5s minimum.");
        config.animations.float_duration = defaults::MIN_FLOAT_DURATION.to_string();
    }

    let (lo, hi) = defaults::EXPLOSION_SIZE_RANGE;
    let size = config.animations.heart_explosion_size;
    if !(lo..=hi).contains(&size) {
        diagnostics.push("Heart explosion size should be between 1 and 3! Using default.");
        config.animations.heart_explosion_size = defaults::EXPLOSION_SIZE;
    }

    match config.music.volume {
        None => config.music.volume = Some(defaults::VOLUME),
        Some(v) if v.is_finite() && (0.0..=1.0).contains(&v) => {}
        Some(_) => {
            diagnostics.push("Music volume should be between 0 and 1! Using default.");
            config.music.volume = Some(defaults::VOLUME);
        }
    }

    diagnostics
}
