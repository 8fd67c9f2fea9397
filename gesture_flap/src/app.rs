//! Top-level run loop.
//!
//! One pass of the loop is one simulation tick:
//!
//! 1. drain the landmark source (always, so its snapshot stays current),
//! 2. poll the window for keys,
//! 3. classify the hand (a held simulation key replaces the camera hand),
//! 4. `Simulation::tick` with exactly one [`TICK`] of simulated time,
//! 5. render.
//!
//! The loop is generic over [`Frontend`] so it can be driven headless in tests.

use hand_gesture::{
    classify, spawn_process_source, GestureSymbol, LandmarkSet, LandmarkSource, NoHands,
};
use flap_sim::{FrameInput, KeyInput, SimEvent, Simulation, TICK};

use crate::config::AppConfig;
use crate::error::StartupError;
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// Frontend seam
// ════════════════════════════════════════════════════════════════════════════

/// A hand pose produced from the keyboard instead of the camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPose { Fist, Palm }

impl SimPose {
    pub fn landmarks(self) -> LandmarkSet {
        match self {
            SimPose::Fist => LandmarkSet::fist(),
            SimPose::Palm => LandmarkSet::palm(),
        }
    }
}

/// What the player did since the previous poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub quit:    bool,
    pub flap:    bool,
    pub restart: bool,
    /// Held simulation key, if any.
    pub pose:    Option<SimPose>,
}

impl Controls {
    pub fn keys(&self) -> KeyInput {
        KeyInput { flap: self.flap, restart: self.restart }
    }
}

/// The gesture overlay for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hud {
    pub gesture: GestureSymbol,
    pub hand:    Option<LandmarkSet>,
}

pub trait Frontend {
    fn poll_controls(&mut self) -> Controls;
    fn render(&mut self, sim: &Simulation, hud: &Hud);
}

// ════════════════════════════════════════════════════════════════════════════
// Loop
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks:      u64,
    pub runs:       u32,
    pub best_score: u32,
}

/// Drive `sim` until the frontend asks to quit or `max_ticks` have run.
pub fn run_loop<F, S>(
    frontend:  &mut F,
    source:    &mut S,
    sim:       &mut Simulation,
    max_ticks: Option<u64>,
) -> LoopStats
where
    F: Frontend + ?Sized,
    S: LandmarkSource + ?Sized,
{
    let mut stats = LoopStats::default();
    let mut shown = GestureSymbol::None;

    while max_ticks.map_or(true, |max| stats.ticks < max) {
        let camera = source.poll();
        let controls = frontend.poll_controls();
        if controls.quit {
            tracing::debug!(ticks = stats.ticks, "quit requested");
            break;
        }

        let hand = match controls.pose {
            Some(pose) => Some(pose.landmarks()),
            None       => camera,
        };
        let gesture = classify(hand.as_ref());
        if gesture != shown {
            tracing::debug!(gesture = gesture.name(), simulated = controls.pose.is_some(), "gesture changed");
            shown = gesture;
        }

        let report = sim.tick(FrameInput { gesture, keys: controls.keys() }, TICK);
        for event in &report.events {
            record(event, &mut stats);
        }
        stats.ticks += 1;

        frontend.render(sim, &Hud { gesture, hand });
    }

    stats
}

fn record(event: &SimEvent, stats: &mut LoopStats) {
    match *event {
        SimEvent::Started => {
            stats.runs += 1;
            tracing::info!(run = stats.runs, "run started");
        }
        SimEvent::Scored { score } => {
            stats.best_score = stats.best_score.max(score);
            tracing::debug!(score, "scored");
        }
        SimEvent::SpeedUp { speed } => tracing::info!(speed, "obstacles speed up"),
        SimEvent::Restarted         => tracing::info!("restarted"),
        SimEvent::Flapped           => tracing::trace!("flap"),
        SimEvent::Dived             => tracing::trace!("dive"),
        // Logged by the simulation itself.
        SimEvent::Spawned { .. } | SimEvent::GameOver { .. } => {}
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the application entry point
// ════════════════════════════════════════════════════════════════════════════

/// Open the window, start the landmark helper if one is configured, and play
/// until the window is closed.
pub fn run(cfg: &AppConfig) -> Result<LoopStats, StartupError> {
    let mut vis = Visualizer::new(cfg.window_scale, cfg.show_gesture_hud)?;

    let mut source: Box<dyn LandmarkSource> = if cfg.camera_enabled() {
        Box::new(spawn_process_source(&cfg.landmark_command, cfg.stale_after())?)
    } else {
        tracing::info!("no landmark command configured; keyboard simulation only");
        Box::new(NoHands)
    };

    let mut sim = match cfg.seed {
        Some(seed) => {
            tracing::info!(seed, "seeded obstacle generator");
            Simulation::with_seed(seed)
        }
        None => Simulation::new(),
    };

    let stats = run_loop(&mut vis, source.as_mut(), &mut sim, None);
    tracing::info!(
        ticks = stats.ticks,
        runs = stats.runs,
        best_score = stats.best_score,
        "session ended"
    );
    Ok(stats)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::time::Duration;

    use flap_sim::SessionState;
    use hand_gesture::{ChannelSource, Frame};

    /// Replays a fixed list of controls, then quits.
    #[derive(Default)]
    struct Scripted {
        script: VecDeque<Controls>,
        frames: Vec<(SessionState, u32, GestureSymbol)>,
    }

    impl Scripted {
        fn new(script: impl IntoIterator<Item = Controls>) -> Self {
            Scripted { script: script.into_iter().collect(), frames: Vec::new() }
        }
    }

    impl Frontend for Scripted {
        fn poll_controls(&mut self) -> Controls {
            self.script.pop_front().unwrap_or(Controls { quit: true, ..Controls::default() })
        }

        fn render(&mut self, sim: &Simulation, hud: &Hud) {
            self.frames.push((sim.state(), sim.score(), hud.gesture));
        }
    }

    /// Counts polls and always reports the same hand.
    struct Fixed {
        hand:  Option<LandmarkSet>,
        polls: usize,
    }

    impl LandmarkSource for Fixed {
        fn poll(&mut self) -> Option<LandmarkSet> {
            self.polls += 1;
            self.hand.clone()
        }
    }

    fn idle() -> Controls { Controls::default() }
    fn held(pose: SimPose) -> Controls { Controls { pose: Some(pose), ..Controls::default() } }

    #[test]
    fn quit_before_first_tick_renders_nothing() {
        let mut fe = Scripted::default();
        let stats = run_loop(&mut fe, &mut NoHands, &mut Simulation::with_seed(1), None);
        assert_eq!(stats.ticks, 0);
        assert!(fe.frames.is_empty());
    }

    #[test]
    fn held_fist_key_starts_one_run() {
        let mut fe = Scripted::new([held(SimPose::Fist); 3]);
        let mut sim = Simulation::with_seed(1);
        let stats = run_loop(&mut fe, &mut NoHands, &mut sim, None);
        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.runs, 1);
        assert!(fe.frames.iter().all(|f| f.0 == SessionState::Running && f.2 == GestureSymbol::Fist));
    }

    #[test]
    fn space_starts_without_a_hand() {
        let mut fe = Scripted::new([Controls { flap: true, ..Controls::default() }, idle()]);
        let mut sim = Simulation::with_seed(1);
        run_loop(&mut fe, &mut NoHands, &mut sim, None);
        assert_eq!(sim.state(), SessionState::Running);
        assert_eq!(fe.frames[0].2, GestureSymbol::None);
    }

    #[test]
    fn simulated_pose_overrides_camera_but_source_is_still_drained() {
        let mut src = Fixed { hand: Some(LandmarkSet::palm()), polls: 0 };
        let mut fe = Scripted::new([held(SimPose::Fist), idle()]);
        run_loop(&mut fe, &mut src, &mut Simulation::with_seed(1), None);
        assert_eq!(src.polls, 3);
        assert_eq!(fe.frames[0].2, GestureSymbol::Fist);
        assert_eq!(fe.frames[1].2, GestureSymbol::Palm);
    }

    #[test]
    fn camera_fist_starts_the_game() {
        let (tx, mut src) = ChannelSource::channel(Duration::from_secs(60));
        tx.send(Frame::now(Some(LandmarkSet::fist()))).unwrap();
        let mut fe = Scripted::new([idle(), idle()]);
        let mut sim = Simulation::with_seed(1);
        let stats = run_loop(&mut fe, &mut src, &mut sim, None);
        assert_eq!(stats.runs, 1);
        assert_eq!(sim.state(), SessionState::Running);
    }

    #[test]
    fn max_ticks_bounds_the_loop() {
        let mut fe = Scripted::new(std::iter::repeat(idle()).take(100));
        let stats = run_loop(&mut fe, &mut NoHands, &mut Simulation::with_seed(1), Some(10));
        assert_eq!(stats.ticks, 10);
        assert_eq!(fe.frames.len(), 10);
    }

    #[test]
    fn space_restarts_from_game_over() {
        let space = Controls { flap: true, ..Controls::default() };
        let mut script = vec![space];
        script.extend(std::iter::repeat(idle()).take(200));
        script.extend([space, space]);
        let mut fe = Scripted::new(script);
        let mut sim = Simulation::with_seed(8);
        let stats = run_loop(&mut fe, &mut NoHands, &mut sim, None);

        let n = fe.frames.len();
        assert_eq!(fe.frames[n - 3].0, SessionState::GameOver);
        assert_eq!(fe.frames[n - 2].0, SessionState::NotStarted);
        assert_eq!(fe.frames[n - 1].0, SessionState::Running);
        assert_eq!(stats.runs, 2);
    }

    #[test]
    fn untouched_game_falls_to_game_over_and_restarts_by_key() {
        let mut script = vec![Controls { flap: true, ..Controls::default() }];
        script.extend(std::iter::repeat(idle()).take(200));
        script.push(Controls { restart: true, ..Controls::default() });
        let mut fe = Scripted::new(script);
        let mut sim = Simulation::with_seed(4);
        let stats = run_loop(&mut fe, &mut NoHands, &mut sim, None);

        assert!(fe.frames.iter().any(|f| f.0 == SessionState::GameOver));
        assert_eq!(sim.state(), SessionState::NotStarted);
        assert_eq!(stats.runs, 1);
        assert_eq!(stats.best_score, 0);
    }
}
