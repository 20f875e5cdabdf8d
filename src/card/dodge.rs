//! The "No" buttons: clicking one moves it somewhere random instead.

use tracing::debug;

use crate::card::decor::RandomSource;
use crate::card::surface::{Document, SurfaceId, Viewport};
use crate::error::CardError;

/// Buttons allowed to run away.
pub const DODGERS: [SurfaceId; 2] = [SurfaceId::NoBtn1, SurfaceId::NoBtn3];

/// Rendered size of the control, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSize {
    pub width: f64,
    pub height: f64,
}

/// Top-left corner picked for the control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

/// Uniform position keeping the control inside the viewport.
pub fn pick_position(
    viewport: Viewport,
    size: ControlSize,
    rng: &mut dyn RandomSource,
) -> Position {
    let span_x = (viewport.width - size.width).max(0.0);
    let span_y = (viewport.height - size.height).max(0.0);
    Position {
        left: rng.uniform(0.0, span_x),
        top: rng.uniform(0.0, span_y),
    }
}

/// Move `target` to a fresh fixed position. Flow state is untouched.
pub fn dodge(
    doc: &mut dyn Document,
    target: SurfaceId,
    size: ControlSize,
    rng: &mut dyn RandomSource,
) -> Result<Position, CardError> {
    if !DODGERS.contains(&target) {
        return Err(CardError::NotDodgeable(target.to_string()));
    }
    let pos = pick_position(doc.viewport(), size, rng);
    let mut button = doc.surface(target)?;
    button.set_style_property("position", "fixed");
    button.set_style_property("left", &format!("{}px", pos.left));
    button.set_style_property("top", &format!("{}px", pos.top));
    debug!(button = %target, left = pos.left, top = pos.top, "Button dodged");
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::testing::MemoryDocument;

    const BUTTON: ControlSize = ControlSize { width: 80.0, height: 40.0 };

    #[test]
    fn two_dodges_both_stay_on_screen() {
        let mut doc = MemoryDocument::full();
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..2 {
            let pos = dodge(&mut doc, SurfaceId::NoBtn1, BUTTON, &mut rng).unwrap();
            assert!((0.0..1000.0 - 80.0).contains(&pos.left));
            assert!((0.0..800.0 - 40.0).contains(&pos.top));
            let style = &doc.el(SurfaceId::NoBtn1).style;
            assert_eq!(style["position"], "fixed");
            assert_eq!(style["left"], format!("{}px", pos.left));
            assert_eq!(style["top"], format!("{}px", pos.top));
        }
    }

    #[test]
    fn many_dodges_respect_bounds() {
        let mut rng = fastrand::Rng::with_seed(99);
        let viewport = Viewport { width: 375.0, height: 667.0 };
        for _ in 0..1000 {
            let pos = pick_position(viewport, BUTTON, &mut rng);
            assert!(pos.left >= 0.0 && pos.left < 295.0);
            assert!(pos.top >= 0.0 && pos.top < 627.0);
        }
    }

    #[test]
    fn oversized_control_pins_to_corner() {
        let mut rng = fastrand::Rng::with_seed(1);
        let tiny = Viewport { width: 50.0, height: 20.0 };
        let pos = pick_position(tiny, BUTTON, &mut rng);
        assert_eq!(pos, Position { left: 0.0, top: 0.0 });
    }

    #[test]
    fn only_no_buttons_dodge() {
        let mut doc = MemoryDocument::full();
        let mut rng = fastrand::Rng::with_seed(3);
        let err = dodge(&mut doc, SurfaceId::YesBtn1, BUTTON, &mut rng).unwrap_err();
        assert_eq!(err, CardError::NotDodgeable("yesBtn1".to_string()));
        assert!(doc.el(SurfaceId::YesBtn1).style.is_empty());
    }

    #[test]
    fn third_question_no_button_dodges_too() {
        let mut doc = MemoryDocument::full();
        let mut rng = fastrand::Rng::with_seed(5);
        dodge(&mut doc, SurfaceId::NoBtn3, BUTTON, &mut rng).unwrap();
        assert_eq!(doc.el(SurfaceId::NoBtn3).style["position"], "fixed");
    }
}
