//! The game state machine.
//!
//! `Simulation` owns the [`GameSession`], the [`Flyer`], and the obstacle
//! list, and advances all of them once per [`tick`](Simulation::tick):
//!
//! ```text
//!   NotStarted ──Flap──▶ Running ──collision──▶ GameOver
//!        ▲                                          │
//!        └──────────────────Restart─────────────────┘
//! ```
//!
//! Input is resolved and applied first, then (only while Running) the spawn
//! timer, gravity, ceiling clamp, obstacle motion, scoring, clean-up and
//! collision run in that order.

use std::time::Duration;

use hand_gesture::GestureSymbol;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::consts::*;
use crate::entity::{Flyer, Obstacle};
use crate::input::{aggregate, KeyInput, TickInput};
use crate::session::{GameSession, SessionState};
use crate::timer::SpawnTimer;

// ════════════════════════════════════════════════════════════════════════════
// Per-tick input and output
// ════════════════════════════════════════════════════════════════════════════

/// Everything the simulation consumes in one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub gesture: GestureSymbol,
    pub keys:    KeyInput,
}

impl FrameInput {
    pub fn gesture(gesture: GestureSymbol) -> Self {
        FrameInput { gesture, keys: KeyInput::default() }
    }

    pub fn keys(keys: KeyInput) -> Self {
        FrameInput { gesture: GestureSymbol::None, keys }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision { Ground, Obstacle }

/// Something that happened during a tick, in the order it happened.
#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    Started,
    Flapped,
    Dived,
    Spawned  { gap_top: f32 },
    Scored   { score: u32 },
    SpeedUp  { speed: f32 },
    GameOver { cause: Collision, score: u32 },
    Restarted,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub input:  TickInput,
    pub events: Vec<SimEvent>,
}

// ════════════════════════════════════════════════════════════════════════════
// Simulation
// ════════════════════════════════════════════════════════════════════════════

pub struct Simulation {
    session:     GameSession,
    flyer:       Flyer,
    obstacles:   Vec<Obstacle>,
    spawn_timer: SpawnTimer,
    rng:         StdRng,
}

impl Simulation {
    /// A simulation whose gap positions are drawn from OS entropy.
    pub fn new() -> Self {
        Simulation::from_rng(StdRng::from_entropy())
    }

    /// A reproducible simulation: equal seeds and inputs give equal sessions.
    pub fn with_seed(seed: u64) -> Self {
        Simulation::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Simulation {
            session:     GameSession::default(),
            flyer:       Flyer::spawn(),
            obstacles:   Vec::new(),
            spawn_timer: SpawnTimer::new(SPAWN_INTERVAL),
            rng,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn session(&self)   -> &GameSession   { &self.session }
    pub fn state(&self)     -> SessionState   { self.session.state }
    pub fn score(&self)     -> u32            { self.session.score }
    pub fn flyer(&self)     -> &Flyer         { &self.flyer }
    pub fn obstacles(&self) -> &[Obstacle]    { &self.obstacles }
    pub fn spawn_timer(&self) -> &SpawnTimer  { &self.spawn_timer }

    /// Place an obstacle directly, bypassing the spawn timer.  For scripted
    /// scenarios and replays.
    pub fn push_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Return to NotStarted with a fresh flyer, no obstacles, zero score and
    /// base speed.  The gesture edge state survives so a fist held through
    /// the restart does not also start the next run.
    pub fn restart(&mut self) {
        let last_gesture = self.session.last_gesture;
        self.session = GameSession { last_gesture, ..GameSession::default() };
        self.flyer = Flyer::spawn();
        self.obstacles.clear();
        self.spawn_timer.reset();
    }

    // ── tick ──────────────────────────────────────────────────────────────

    /// Advance one tick.  `dt` is the simulated time this tick represents and
    /// only drives the spawn timer; motion is per tick.
    pub fn tick(&mut self, frame: FrameInput, dt: Duration) -> TickReport {
        let mut events = Vec::new();

        let (input, last) = aggregate(
            self.session.state,
            frame.gesture,
            self.session.last_gesture,
            frame.keys,
        );
        self.session.last_gesture = last;
        self.apply_input(input, &mut events);

        if self.session.state == SessionState::Running {
            self.step(dt, &mut events);
        }

        TickReport { input, events }
    }

    fn apply_input(&mut self, input: TickInput, events: &mut Vec<SimEvent>) {
        match input {
            TickInput::None => {}
            TickInput::Restart => {
                self.restart();
                events.push(SimEvent::Restarted);
            }
            TickInput::Flap => {
                if self.session.state == SessionState::NotStarted {
                    self.session.state = SessionState::Running;
                    events.push(SimEvent::Started);
                }
                self.flyer.flap();
                events.push(SimEvent::Flapped);
            }
            TickInput::Dive => {
                self.flyer.dive();
                events.push(SimEvent::Dived);
            }
        }
    }

    fn step(&mut self, dt: Duration, events: &mut Vec<SimEvent>) {
        for _ in 0..self.spawn_timer.advance(dt) {
            let gap_top = self.spawn_pair();
            tracing::debug!(gap_top, pairs = self.obstacles.len(), "obstacle spawned");
            events.push(SimEvent::Spawned { gap_top });
        }

        self.flyer.fall();
        self.flyer.clamp_to_ceiling();

        let speed = self.session.obstacle_speed;
        let flyer_left = self.flyer.bounds().left();
        for obstacle in &mut self.obstacles {
            obstacle.advance(speed);
            if !obstacle.passed() && obstacle.center_x() < flyer_left {
                obstacle.mark_passed();
                self.session.score += 1;
                events.push(SimEvent::Scored { score: self.session.score });
                if self.session.score % SPEED_INCREASE_INTERVAL == 0 {
                    self.session.obstacle_speed -= SPEED_STEP;
                    events.push(SimEvent::SpeedUp { speed: self.session.obstacle_speed });
                }
            }
        }

        self.obstacles.retain(|o| !o.is_off_screen());

        if let Some(cause) = self.collision() {
            self.session.state = SessionState::GameOver;
            tracing::info!(?cause, score = self.session.score, "game over");
            events.push(SimEvent::GameOver { cause, score: self.session.score });
        }
    }

    fn collision(&self) -> Option<Collision> {
        let bounds = self.flyer.bounds();
        if bounds.bottom() >= SCREEN_HEIGHT {
            return Some(Collision::Ground);
        }
        if self.obstacles.iter().any(|o| o.collides(&bounds)) {
            return Some(Collision::Obstacle);
        }
        None
    }

    /// Append one pair at the right edge with a uniformly drawn gap.
    fn spawn_pair(&mut self) -> f32 {
        let max_top = SCREEN_HEIGHT as u32 - GAP as u32 - MIN_SEGMENT_HEIGHT;
        let gap_top = self.rng.gen_range(MIN_SEGMENT_HEIGHT..=max_top) as f32;
        self.obstacles.push(Obstacle::new(SCREEN_WIDTH, gap_top));
        gap_top
    }
}

impl Default for Simulation {
    fn default() -> Self { Simulation::new() }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn idle() -> FrameInput { FrameInput::default() }
    fn flap() -> FrameInput { FrameInput::keys(KeyInput::flap()) }

    fn started() -> Simulation {
        let mut sim = Simulation::with_seed(7);
        sim.tick(flap(), TICK);
        sim
    }

    #[test]
    fn nothing_moves_before_start() {
        let mut sim = Simulation::with_seed(1);
        let before = sim.flyer().clone();
        for _ in 0..400 {
            sim.tick(idle(), TICK);
        }
        assert_eq!(sim.state(), SessionState::NotStarted);
        assert_eq!(sim.flyer(), &before);
        assert!(sim.obstacles().is_empty());
        assert_eq!(sim.spawn_timer().elapsed(), Duration::ZERO);
    }

    #[test]
    fn first_flap_starts_and_moves_same_tick() {
        let mut sim = Simulation::with_seed(1);
        let report = sim.tick(flap(), TICK);
        assert_eq!(report.input, TickInput::Flap);
        assert_eq!(report.events[..2], [SimEvent::Started, SimEvent::Flapped]);
        assert_eq!(sim.state(), SessionState::Running);
        assert_eq!(sim.flyer().velocity, FLAP_STRENGTH + GRAVITY);
        assert_eq!(sim.flyer().y, 352.0 - 9.0);
    }

    #[test]
    fn palm_dive_overrides_velocity() {
        let mut sim = started();
        let report = sim.tick(FrameInput::gesture(GestureSymbol::Palm), TICK);
        assert_eq!(report.input, TickInput::Dive);
        assert_eq!(sim.flyer().velocity, DIVE_STRENGTH + GRAVITY);
    }

    #[test]
    fn ceiling_stops_the_flyer() {
        let mut sim = started();
        for _ in 0..60 {
            sim.tick(flap(), TICK);
            assert!(sim.flyer().y >= 0.0);
        }
        assert_eq!(sim.flyer().y, 0.0);
        assert_eq!(sim.state(), SessionState::Running);
    }

    #[test]
    fn falling_to_the_ground_ends_the_run() {
        let mut sim = started();
        let mut cause = None;
        for _ in 0..200 {
            for e in sim.tick(idle(), TICK).events {
                if let SimEvent::GameOver { cause: c, .. } = e { cause = Some(c); }
            }
            if sim.state() == SessionState::GameOver { break; }
        }
        assert_eq!(cause, Some(Collision::Ground));
        assert!(sim.flyer().bounds().bottom() >= SCREEN_HEIGHT);
    }

    #[test]
    fn spawns_after_two_and_a_half_seconds_of_play() {
        let mut sim = started();
        // The starting tick already counted one TICK.
        for _ in 0..148 {
            sim.tick(flap_every(&sim), TICK);
        }
        assert!(sim.obstacles().is_empty());
        let report = sim.tick(flap_every(&sim), TICK);
        assert!(report.events.iter().any(|e| matches!(e, SimEvent::Spawned { .. })));
        let o = &sim.obstacles()[0];
        assert!((MIN_SEGMENT_HEIGHT as f32..=490.0).contains(&o.gap_top));
        assert_eq!(o.gap_bottom - o.gap_top, GAP);
    }

    /// Keep the flyer mid-screen: flap whenever it sinks below its spawn row.
    fn flap_every(sim: &Simulation) -> FrameInput {
        if sim.flyer().y > 352.0 { flap() } else { idle() }
    }

    #[test]
    fn same_seed_same_gaps() {
        let gaps = |seed| {
            let mut sim = Simulation::with_seed(seed);
            (0..5).map(|_| sim.spawn_pair()).collect::<Vec<_>>()
        };
        assert_eq!(gaps(42), gaps(42));
        assert!(gaps(42).iter().all(|g| (100.0..=490.0).contains(g)));
    }

    #[test]
    fn scoring_marks_passed_once() {
        let mut sim = started();
        // Gap around the flyer so the pair can be passed safely.
        let flyer_y = sim.flyer().y;
        sim.push_obstacle(Obstacle::new(100.0, flyer_y - 50.0));
        let mut scored = 0;
        for _ in 0..10 {
            let frame = flap_every(&sim);
            scored += sim.tick(frame, TICK).events.iter()
                .filter(|e| matches!(e, SimEvent::Scored { .. }))
                .count();
        }
        assert_eq!(scored, 1);
        assert_eq!(sim.score(), 1);
        assert!(sim.obstacles().iter().all(|o| o.passed()));
    }

    #[test]
    fn obstacles_are_dropped_off_screen() {
        let mut sim = started();
        let flyer_y = sim.flyer().y;
        sim.push_obstacle(Obstacle::new(-75.0, flyer_y - 50.0));
        sim.tick(flap_every(&sim), TICK);
        assert!(sim.obstacles().is_empty());
    }

    #[test]
    fn collision_ends_on_that_tick_and_freezes() {
        let mut sim = started();
        sim.push_obstacle(Obstacle::new(110.0, 100.0));
        let report = sim.tick(idle(), TICK);
        assert!(matches!(
            report.events.last(),
            Some(SimEvent::GameOver { cause: Collision::Obstacle, .. })
        ));
        assert_eq!(sim.state(), SessionState::GameOver);

        let flyer = sim.flyer().clone();
        let obstacles = sim.obstacles().to_vec();
        for _ in 0..30 {
            sim.tick(FrameInput::gesture(GestureSymbol::Palm), TICK);
        }
        assert_eq!(sim.flyer(), &flyer);
        assert_eq!(sim.obstacles(), &obstacles[..]);
    }

    #[test]
    fn restart_resets_everything_but_the_edge_state() {
        let mut sim = started();
        sim.push_obstacle(Obstacle::new(110.0, 100.0));
        sim.tick(idle(), TICK);
        assert_eq!(sim.state(), SessionState::GameOver);

        let report = sim.tick(FrameInput::gesture(GestureSymbol::Fist), TICK);
        assert_eq!(report.events, [SimEvent::Restarted]);
        assert_eq!(sim.state(), SessionState::NotStarted);
        assert_eq!(sim.score(), 0);
        assert!(sim.obstacles().is_empty());
        assert_eq!(sim.session().obstacle_speed, BASE_OBSTACLE_SPEED);
        assert_eq!(sim.flyer(), &Flyer::spawn());

        // Still holding the fist: no start.
        sim.tick(FrameInput::gesture(GestureSymbol::Fist), TICK);
        assert_eq!(sim.state(), SessionState::NotStarted);
    }
}
