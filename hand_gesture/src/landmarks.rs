//! Hand landmark geometry.
//!
//! Coordinates are normalized to the camera image: `x` grows to the right,
//! `y` grows *downward*, both nominally in `0.0..=1.0`.  Joint order follows
//! the MediaPipe hand model (wrist first, then thumb, index, middle, ring,
//! pinky, four joints each).

/// Number of joints in a complete hand.
pub const JOINT_COUNT: usize = 21;

// ════════════════════════════════════════════════════════════════════════════
// HandJoint
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum HandJoint {
    Wrist          = 0,
    ThumbCmc       = 1,
    ThumbMcp       = 2,
    ThumbIp        = 3,
    ThumbTip       = 4,
    IndexMcp       = 5,
    IndexPip       = 6,
    IndexDip       = 7,
    IndexTip       = 8,
    MiddleMcp      = 9,
    MiddlePip      = 10,
    MiddleDip      = 11,
    MiddleTip      = 12,
    RingMcp        = 13,
    RingPip        = 14,
    RingDip        = 15,
    RingTip        = 16,
    PinkyMcp       = 17,
    PinkyPip       = 18,
    PinkyDip       = 19,
    PinkyTip       = 20,
}

impl HandJoint {
    pub fn index(self) -> usize { self as usize }
}

// ════════════════════════════════════════════════════════════════════════════
// Finger
// ════════════════════════════════════════════════════════════════════════════

/// The four long fingers.  The thumb bends sideways and takes no part in
/// fist/palm detection, so it has no entry here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger { Index, Middle, Ring, Pinky }

impl Finger {
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// Knuckle at the base of the finger.
    pub fn mcp(self) -> HandJoint {
        match self {
            Finger::Index  => HandJoint::IndexMcp,
            Finger::Middle => HandJoint::MiddleMcp,
            Finger::Ring   => HandJoint::RingMcp,
            Finger::Pinky  => HandJoint::PinkyMcp,
        }
    }

    /// Middle knuckle.
    pub fn pip(self) -> HandJoint {
        match self {
            Finger::Index  => HandJoint::IndexPip,
            Finger::Middle => HandJoint::MiddlePip,
            Finger::Ring   => HandJoint::RingPip,
            Finger::Pinky  => HandJoint::PinkyPip,
        }
    }

    pub fn dip(self) -> HandJoint {
        match self {
            Finger::Index  => HandJoint::IndexDip,
            Finger::Middle => HandJoint::MiddleDip,
            Finger::Ring   => HandJoint::RingDip,
            Finger::Pinky  => HandJoint::PinkyDip,
        }
    }

    pub fn tip(self) -> HandJoint {
        match self {
            Finger::Index  => HandJoint::IndexTip,
            Finger::Middle => HandJoint::MiddleTip,
            Finger::Ring   => HandJoint::RingTip,
            Finger::Pinky  => HandJoint::PinkyTip,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Landmark / LandmarkSet
// ════════════════════════════════════════════════════════════════════════════

/// A single normalized joint position.  `z` is relative depth and is carried
/// through for display only.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Landmark { x, y, z: 0.0 }
    }
}

/// One detected hand in one frame.
///
/// A well-formed set holds exactly [`JOINT_COUNT`] points.  Shorter sets are
/// still representable so that a detector glitch reaches the classifier as a
/// set with missing joints rather than as an error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkSet {
    points: Vec<Landmark>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Landmark>) -> Self {
        LandmarkSet { points }
    }

    pub fn from_xy(points: &[(f32, f32)]) -> Self {
        LandmarkSet::new(points.iter().map(|&(x, y)| Landmark::new(x, y)).collect())
    }

    pub fn get(&self, joint: HandJoint) -> Option<Landmark> {
        self.points.get(joint.index()).copied()
    }

    /// Vertical coordinate of `joint`, or `None` if the joint is missing.
    pub fn y(&self, joint: HandJoint) -> Option<f32> {
        self.get(joint).map(|p| p.y)
    }

    pub fn len(&self) -> usize { self.points.len() }

    /// Exactly [`JOINT_COUNT`] joints.
    pub fn is_complete(&self) -> bool { self.points.len() == JOINT_COUNT }

    /// Complete, and every coordinate is a finite number.
    pub fn is_well_formed(&self) -> bool {
        self.is_complete()
            && self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
    }

    pub fn points(&self) -> &[Landmark] { &self.points }

    /// Overwrite one joint; extends the set with default points if needed.
    pub fn set(&mut self, joint: HandJoint, point: Landmark) {
        let i = joint.index();
        if self.points.len() <= i {
            self.points.resize(i + 1, Landmark::default());
        }
        self.points[i] = point;
    }

    // ── Canonical poses ───────────────────────────────────────────────────
    //
    // Used by the keyboard simulator and by tests.  The wrist sits at the
    // bottom of the frame and the fingers point up.

    /// Every long finger straight up: tip above DIP above PIP above MCP.
    pub fn palm() -> Self {
        let mut set = LandmarkSet::base_hand();
        for (i, finger) in Finger::ALL.into_iter().enumerate() {
            let x = 0.38 + 0.08 * i as f32;
            set.set(finger.mcp(), Landmark::new(x, 0.60));
            set.set(finger.pip(), Landmark::new(x, 0.48));
            set.set(finger.dip(), Landmark::new(x, 0.40));
            set.set(finger.tip(), Landmark::new(x, 0.33));
        }
        set
    }

    /// Every long finger curled: tip folded back below its PIP and MCP.
    pub fn fist() -> Self {
        let mut set = LandmarkSet::base_hand();
        for (i, finger) in Finger::ALL.into_iter().enumerate() {
            let x = 0.40 + 0.06 * i as f32;
            set.set(finger.mcp(), Landmark::new(x, 0.60));
            set.set(finger.pip(), Landmark::new(x, 0.56));
            set.set(finger.dip(), Landmark::new(x, 0.62));
            set.set(finger.tip(), Landmark::new(x, 0.66));
        }
        set
    }

    fn base_hand() -> Self {
        let mut set = LandmarkSet::new(vec![Landmark::default(); JOINT_COUNT]);
        set.set(HandJoint::Wrist,    Landmark::new(0.50, 0.85));
        set.set(HandJoint::ThumbCmc, Landmark::new(0.42, 0.80));
        set.set(HandJoint::ThumbMcp, Landmark::new(0.36, 0.74));
        set.set(HandJoint::ThumbIp,  Landmark::new(0.32, 0.68));
        set.set(HandJoint::ThumbTip, Landmark::new(0.30, 0.63));
        set
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_indices_follow_mediapipe_order() {
        assert_eq!(HandJoint::Wrist.index(), 0);
        assert_eq!(HandJoint::IndexTip.index(), 8);
        assert_eq!(HandJoint::MiddlePip.index(), 10);
        assert_eq!(HandJoint::PinkyTip.index(), JOINT_COUNT - 1);
    }

    #[test]
    fn finger_joints_are_consecutive() {
        for finger in Finger::ALL {
            let mcp = finger.mcp().index();
            assert_eq!(finger.pip().index(), mcp + 1);
            assert_eq!(finger.dip().index(), mcp + 2);
            assert_eq!(finger.tip().index(), mcp + 3);
        }
    }

    #[test]
    fn missing_joint_reads_as_none() {
        let short = LandmarkSet::from_xy(&[(0.5, 0.5); 9]);
        assert!(!short.is_complete());
        assert!(short.y(HandJoint::IndexTip).is_some());
        assert!(short.y(HandJoint::MiddleTip).is_none());
    }

    #[test]
    fn set_extends_short_sets() {
        let mut s = LandmarkSet::default();
        s.set(HandJoint::IndexPip, Landmark::new(0.1, 0.2));
        assert_eq!(s.len(), 7);
        assert_eq!(s.y(HandJoint::IndexPip), Some(0.2));
    }

    #[test]
    fn canonical_poses_are_well_formed() {
        assert!(LandmarkSet::palm().is_well_formed());
        assert!(LandmarkSet::fist().is_well_formed());
    }

    #[test]
    fn extra_joints_are_not_complete() {
        let mut points = LandmarkSet::fist().points().to_vec();
        points.push(Landmark::new(0.5, 0.5));
        assert!(!LandmarkSet::new(points).is_complete());
    }

    #[test]
    fn non_finite_coordinate_is_not_well_formed() {
        let mut set = LandmarkSet::palm();
        set.set(HandJoint::Wrist, Landmark::new(f32::INFINITY, 0.85));
        assert!(set.is_complete());
        assert!(!set.is_well_formed());
    }
}
