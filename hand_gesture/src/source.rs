//! Landmark sources.
//!
//! The game polls a [`LandmarkSource`] exactly once per tick.  Camera-backed
//! sources run on their own thread and hand frames over a `mpsc` channel;
//! [`ChannelSource::poll`] never blocks, keeps only the newest frame, and
//! reports no hand once that frame is older than `stale_after`.  The tick
//! rate therefore never waits on the camera.
//!
//! ## Wire protocol
//!
//! The detector helper process writes one JSON object per line:
//!
//! ```text
//! READY
//! {"hands":[{"score":0.93,"landmarks":[{"x":0.51,"y":0.84,"z":0.0}, …21 entries…]}]}
//! {"hands":[]}
//! {"hands":[],"error":"camera frame unreadable"}
//! ```
//!
//! Only the first hand is used.  Unparseable lines are skipped.

use std::io::{BufRead, BufReader, ErrorKind};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use serde::Deserialize;
use thiserror::Error;

use crate::landmarks::{Landmark, LandmarkSet};

/// How old a frame may be before the hand counts as gone.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_millis(250);

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can report the most recent hand, once per tick.
pub trait LandmarkSource {
    fn poll(&mut self) -> Option<LandmarkSet>;
}

/// A source that never sees a hand.  Used when the camera is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHands;

impl LandmarkSource for NoHands {
    fn poll(&mut self) -> Option<LandmarkSet> { None }
}

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("malformed landmark frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("detector reported: {0}")]
    Detector(String),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("landmark command is empty")]
    EmptyCommand,
    #[error("failed to start landmark process `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("landmark process `{0}` has no stdout")]
    NoStdout(String),
}

// ════════════════════════════════════════════════════════════════════════════
// Wire format
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    score: Option<f32>,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionResult {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse one protocol line into the first detected hand, if any.
pub fn parse_frame(line: &str) -> Result<Option<LandmarkSet>, FrameError> {
    let result: DetectionResult = serde_json::from_str(line)?;
    if let Some(error) = result.error {
        return Err(FrameError::Detector(error));
    }
    let Some(hand) = result.hands.into_iter().next() else { return Ok(None) };

    if let Some(score) = hand.score {
        tracing::trace!(score, joints = hand.landmarks.len(), "hand detected");
    }
    let points = hand.landmarks
        .into_iter()
        .map(|lm| Landmark { x: lm.x, y: lm.y, z: lm.z })
        .collect();
    Ok(Some(LandmarkSet::new(points)))
}

// ════════════════════════════════════════════════════════════════════════════
// ChannelSource — latest snapshot from a worker thread
// ════════════════════════════════════════════════════════════════════════════

/// One frame as observed by a worker, stamped on arrival.
#[derive(Clone, Debug)]
pub struct Frame {
    pub hand: Option<LandmarkSet>,
    pub at:   Instant,
}

impl Frame {
    pub fn now(hand: Option<LandmarkSet>) -> Self {
        Frame { hand, at: Instant::now() }
    }
}

pub struct ChannelSource {
    rx:           Receiver<Frame>,
    latest:       Option<Frame>,
    stale_after:  Duration,
    disconnected: bool,
}

impl ChannelSource {
    pub fn new(rx: Receiver<Frame>, stale_after: Duration) -> Self {
        ChannelSource { rx, latest: None, stale_after, disconnected: false }
    }

    /// A connected sender/source pair.
    pub fn channel(stale_after: Duration) -> (Sender<Frame>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, ChannelSource::new(rx, stale_after))
    }

    /// True once the worker has hung up.
    pub fn is_disconnected(&self) -> bool { self.disconnected }

    /// Drain pending frames and return the newest hand if it is fresh at `now`.
    pub fn poll_at(&mut self, now: Instant) -> Option<LandmarkSet> {
        loop {
            match self.rx.try_recv() {
                Ok(frame) => self.latest = Some(frame),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        tracing::warn!("landmark source disconnected; gestures disabled");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }

        let frame = self.latest.as_ref()?;
        let age = now.saturating_duration_since(frame.at);
        if age > self.stale_after {
            tracing::debug!(age_ms = age.as_millis() as u64, "landmark frame stale");
            return None;
        }
        frame.hand.clone()
    }
}

impl LandmarkSource for ChannelSource {
    fn poll(&mut self) -> Option<LandmarkSet> {
        self.poll_at(Instant::now())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Reader / process workers
// ════════════════════════════════════════════════════════════════════════════

/// Read protocol lines from `reader` on a worker thread.
pub fn spawn_reader_source<R>(reader: R, stale_after: Duration) -> ChannelSource
where
    R: BufRead + Send + 'static,
{
    let (tx, source) = ChannelSource::channel(stale_after);
    thread::spawn(move || pump_lines(reader, tx));
    source
}

fn pump_lines<R: BufRead>(mut reader: R, tx: Sender<Frame>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(error = %e, "landmark stream read failed");
                return;
            }
        }

        // Bad bytes only spoil their own line.
        let line = String::from_utf8_lossy(&buf);
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "READY" {
            continue;
        }

        let hand = match parse_frame(trimmed) {
            Ok(hand) => hand,
            Err(FrameError::Detector(msg)) => {
                tracing::warn!(%msg, "detector error");
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "skipping landmark line");
                continue;
            }
        };
        if tx.send(Frame::now(hand)).is_err() { return; }
    }
    tracing::info!("landmark stream ended");
}

/// A [`ChannelSource`] fed by a child process's stdout.  The child is killed
/// when this is dropped.
pub struct ProcessSource {
    child:  Child,
    source: ChannelSource,
}

/// Start the detector helper `command[0] command[1..]` and read its stdout.
pub fn spawn_process_source(
    command: &[String],
    stale_after: Duration,
) -> Result<ProcessSource, SourceError> {
    let (program, args) = command.split_first().ok_or(SourceError::EmptyCommand)?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| SourceError::Spawn { program: program.clone(), source })?;

    let Some(stdout) = child.stdout.take() else {
        let _ = child.kill();
        return Err(SourceError::NoStdout(program.clone()));
    };

    tracing::info!(%program, pid = child.id(), "landmark process started");
    let source = spawn_reader_source(BufReader::new(stdout), stale_after);
    Ok(ProcessSource { child, source })
}

impl LandmarkSource for ProcessSource {
    fn poll(&mut self) -> Option<LandmarkSet> { self.source.poll() }
}

impl Drop for ProcessSource {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
