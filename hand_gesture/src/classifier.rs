//! Fist / palm classification.
//!
//! Both predicates compare vertical coordinates only; `y` grows downward, so
//! "tip below knuckle" means `tip.y > knuckle.y`.
//!
//! * **Fist** — index and middle tips both below their own PIP *and* MCP.
//!   Ring and pinky are not consulted.
//! * **Palm** — all four long fingertips above their PIP.
//!
//! The fist test runs first and wins if both somehow hold.  A set that is not
//! exactly 21 finite joints is never classified.

use crate::landmarks::{Finger, HandJoint, LandmarkSet};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureSymbol {
    #[default]
    None,
    Fist,
    Palm,
}

impl GestureSymbol {
    pub fn name(self) -> &'static str {
        match self {
            GestureSymbol::None => "none",
            GestureSymbol::Fist => "fist",
            GestureSymbol::Palm => "palm",
        }
    }
}

/// Classify one hand.  `None` (no hand this tick) and any malformed set map
/// to [`GestureSymbol::None`].
pub fn classify(landmarks: Option<&LandmarkSet>) -> GestureSymbol {
    let Some(set) = landmarks else { return GestureSymbol::None };
    if !set.is_well_formed() {
        return GestureSymbol::None;
    }

    match is_fist(set) {
        Some(true)  => GestureSymbol::Fist,
        Some(false) if is_palm(set) == Some(true) => GestureSymbol::Palm,
        _ => GestureSymbol::None,
    }
}

/// `Some(true)` when index and middle are curled; `None` when a required
/// joint is missing or not finite.
pub fn is_fist(set: &LandmarkSet) -> Option<bool> {
    let mut curled = true;
    for finger in [Finger::Index, Finger::Middle] {
        let tip = finite_y(set, finger.tip())?;
        let pip = finite_y(set, finger.pip())?;
        let mcp = finite_y(set, finger.mcp())?;
        curled &= tip > pip && tip > mcp;
    }
    Some(curled)
}

/// `Some(true)` when all four long fingers are extended; `None` when a
/// required joint is missing or not finite.
pub fn is_palm(set: &LandmarkSet) -> Option<bool> {
    let mut extended = true;
    for finger in Finger::ALL {
        let tip = finite_y(set, finger.tip())?;
        let pip = finite_y(set, finger.pip())?;
        extended &= tip < pip;
    }
    Some(extended)
}

fn finite_y(set: &LandmarkSet, joint: HandJoint) -> Option<f32> {
    set.y(joint).filter(|y| y.is_finite())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
