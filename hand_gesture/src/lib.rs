//! # hand_gesture
//!
//! Turns one hand's landmark geometry into a discrete [`GestureSymbol`].
//!
//! The crate is split in three layers:
//!
//! * [`landmarks`] — the 21-joint [`LandmarkSet`] and its joint enumeration.
//! * [`classifier`] — the pure fist/palm classifier.
//! * [`source`] — anything that can be polled once per tick for the most
//!   recent hand, including a worker-thread reader for the JSON-lines
//!   protocol spoken by the detector helper process.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_gesture::{classify, GestureSymbol, LandmarkSet};
//!
//! assert_eq!(classify(Some(&LandmarkSet::fist())), GestureSymbol::Fist);
//! assert_eq!(classify(Some(&LandmarkSet::palm())), GestureSymbol::Palm);
//! assert_eq!(classify(None), GestureSymbol::None);
//! ```

pub mod landmarks;
pub mod classifier;
pub mod source;

pub use landmarks::{Finger, HandJoint, Landmark, LandmarkSet, JOINT_COUNT};
pub use classifier::{classify, is_fist, is_palm, GestureSymbol};
pub use source::{
    parse_frame, spawn_process_source, spawn_reader_source, ChannelSource, Frame, FrameError,
    LandmarkSource, NoHands, ProcessSource, SourceError, DEFAULT_STALE_AFTER,
};
