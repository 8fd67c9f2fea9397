//! Software-rendered frontend using `minifb`.
//!
//! Layout (one pixel per world unit before window scaling):
//!
//! ```text
//! ┌──────────────────────────────┐
//! │            SCORE   ┌───────┐ │
//! │                    │ hand  │ │
//! │  ██     ██         └───────┘ │
//! │  ██     ██                   │
//! │      ▶                       │
//! │  ██     ██                   │
//! │  ██     ██                   │
//! │ gesture        key legend    │
//! └──────────────────────────────┘
//! ```
//!
//! All drawing goes through [`Canvas`], which clips every primitive, so the
//! scene can be rendered and inspected without a window.

use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

use flap_sim::consts::{FLYER_HEIGHT, FLYER_WIDTH, OBSTACLE_WIDTH};
use flap_sim::{SessionState, Simulation, SCREEN_HEIGHT, SCREEN_WIDTH, TICK};
use hand_gesture::{GestureSymbol, LandmarkSet};

use crate::app::{Controls, Frontend, Hud, SimPose};
use crate::error::StartupError;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:        usize = SCREEN_WIDTH as usize;
pub const WIN_H:        usize = SCREEN_HEIGHT as usize;
const INSET_SIZE:       i32   = 110;
const INSET_X:          i32   = WIN_W as i32 - INSET_SIZE - 10;
const INSET_Y:          i32   = 10;
const SKY_COLOR:        u32   = 0xFF70C5CE;
const PIPE_COLOR:       u32   = 0xFF5EBD3E;
const PIPE_EDGE:        u32   = 0xFF2E6B1F;
const FLYER_COLOR:      u32   = 0xFFF7D51D;
const BEAK_COLOR:       u32   = 0xFFF0782C;
const TEXT_COLOR:       u32   = 0xFFFFFFFF;
const SHADOW_COLOR:     u32   = 0xFF203040;
const INSET_BG:         u32   = 0xFF16213E;
const BONE_COLOR:       u32   = 0xFFAADDFF;
const TIP_COLOR:        u32   = 0xFFFFD700;

/// MediaPipe joint chains, wrist outwards.
const BONES: [&[usize]; 6] = [
    &[0, 1, 2, 3, 4],
    &[0, 5, 6, 7, 8],
    &[9, 10, 11, 12],
    &[13, 14, 15, 16],
    &[0, 17, 18, 19, 20],
    &[5, 9, 13, 17],
];
const TIPS: [usize; 5] = [4, 8, 12, 16, 20];

// ════════════════════════════════════════════════════════════════════════════
// Canvas
// ════════════════════════════════════════════════════════════════════════════

/// An ARGB framebuffer with clipped drawing primitives.
pub struct Canvas {
    buf: Vec<u32>,
    w:   usize,
    h:   usize,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Canvas { buf: vec![SKY_COLOR; w * h], w, h }
    }

    pub fn pixels(&self) -> &[u32] { &self.buf }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.w && y < self.h).then(|| self.buf[y * self.w + x])
    }

    pub fn clear(&mut self, color: u32) { self.buf.fill(color); }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = (x.saturating_add(w)).clamp(0, self.w as i32) as usize;
        let y1 = (y.saturating_add(h)).clamp(0, self.h as i32) as usize;
        for row in y0..y1 {
            self.buf[row * self.w + x0.min(x1)..row * self.w + x1].fill(color);
        }
    }

    pub fn draw_border(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        if w <= 0 || h <= 0 { return; }
        self.fill_rect(x,         y,         w, 1, color);
        self.fill_rect(x,         y + h - 1, w, 1, color);
        self.fill_rect(x,         y,         1, h, color);
        self.fill_rect(x + w - 1, y,         1, h, color);
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.buf[y as usize * self.w + x as usize] = color;
        }
    }

    /// Straight line, one pixel per step along the longer axis.
    pub fn draw_line(&mut self, (x0, y0): (i32, i32), (x1, y1): (i32, i32), color: u32) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = x0 as f32 + (x1 - x0) as f32 * t;
            let y = y0 as f32 + (y1 - y0) as f32 * t;
            self.set_pixel(x.round() as i32, y.round() as i32, color);
        }
    }

    /// Mix every pixel toward `color`.
    pub fn shade(&mut self, color: u32, t: f32) {
        for px in &mut self.buf {
            *px = blend(*px, color, t);
        }
    }

    /// Bitmap text, each font pixel drawn as a `px`×`px` block.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, px: i32, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            for (row, &bits) in char_glyph(ch).iter().enumerate() {
                for col in 0..3 {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * px, y + row as i32 * px, px, px, color);
                    }
                }
            }
            cx += 4 * px;
            if cx >= self.w as i32 { break; }
        }
    }

    /// Horizontally centred text with a one-block drop shadow.
    pub fn draw_banner(&mut self, text: &str, y: i32, px: i32, color: u32) {
        let x = (self.w as i32 - text_width(text, px)) / 2;
        self.draw_text(text, x + px / 2, y + px / 2, px, SHADOW_COLOR);
        self.draw_text(text, x, y, px, color);
    }
}

pub fn text_width(text: &str, px: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { n * 4 * px - px }
}

// ════════════════════════════════════════════════════════════════════════════
// Scene
// ════════════════════════════════════════════════════════════════════════════

/// Draw one complete frame of `sim` into `canvas`.
pub fn draw_scene(canvas: &mut Canvas, sim: &Simulation, hud: &Hud, show_hud: bool) {
    canvas.clear(SKY_COLOR);

    for o in sim.obstacles() {
        for b in [o.top_bounds(), o.bottom_bounds()] {
            let (x, y, w, h) = (b.x as i32, b.y as i32, b.w as i32, b.h as i32);
            canvas.fill_rect(x, y, w, h, PIPE_COLOR);
            canvas.draw_border(x, y, w, h, PIPE_EDGE);
        }
    }

    draw_flyer(canvas, sim);

    canvas.draw_banner(&sim.score().to_string(), 24, 8, TEXT_COLOR);

    match sim.state() {
        SessionState::NotStarted => {
            canvas.draw_banner("FIST OR SPACE TO START", WIN_H as i32 / 2 + 60, 4, TEXT_COLOR);
        }
        SessionState::Running => {}
        SessionState::GameOver => {
            canvas.shade(0xFF000000, 0.45);
            canvas.draw_banner("GAME OVER", WIN_H as i32 / 2 - 80, 8, 0xFFFF5555);
            canvas.draw_banner(&format!("SCORE {}", sim.score()), WIN_H as i32 / 2, 5, TEXT_COLOR);
            canvas.draw_banner("FIST OR SPACE TO RESTART", WIN_H as i32 / 2 + 50, 4, TEXT_COLOR);
        }
    }

    if show_hud {
        draw_hud(canvas, hud);
    }

    canvas.draw_text(
        "SPACE=FLAP F=FIST P=PALM R=RESTART Q=QUIT",
        10, WIN_H as i32 - 16, 2, 0xFF203040,
    );
}

fn draw_flyer(canvas: &mut Canvas, sim: &Simulation) {
    let f = sim.flyer();
    let (x, y) = (f.x as i32, f.y as i32);
    let (w, h) = (FLYER_WIDTH as i32, FLYER_HEIGHT as i32);
    canvas.fill_rect(x, y, w, h, FLYER_COLOR);
    canvas.draw_border(x, y, w, h, SHADOW_COLOR);
    // eye
    canvas.fill_rect(x + w - 16, y + 6, 8, 8, TEXT_COLOR);
    canvas.fill_rect(x + w - 12, y + 8, 4, 4, SHADOW_COLOR);
    // beak
    canvas.fill_rect(x + w - 6, y + h / 2, 10, 6, BEAK_COLOR);
}

fn gesture_color(g: GestureSymbol) -> u32 {
    match g {
        GestureSymbol::None => 0xFF888888,
        GestureSymbol::Fist => 0xFFFF8844,
        GestureSymbol::Palm => 0xFF44DDFF,
    }
}

fn draw_hud(canvas: &mut Canvas, hud: &Hud) {
    canvas.fill_rect(INSET_X, INSET_Y, INSET_SIZE, INSET_SIZE, INSET_BG);
    canvas.draw_border(INSET_X, INSET_Y, INSET_SIZE, INSET_SIZE, gesture_color(hud.gesture));
    if let Some(hand) = &hud.hand {
        draw_hand(canvas, hand);
    }
    canvas.draw_text(
        hud.gesture.name(),
        INSET_X + 6, INSET_Y + INSET_SIZE + 6, 3,
        gesture_color(hud.gesture),
    );
}

/// Hand skeleton in the inset.  Normalised coordinates map onto the inset
/// square; joints outside [0, 1] are clipped.
fn draw_hand(canvas: &mut Canvas, hand: &LandmarkSet) {
    let to_inset = |i: usize| {
        hand.points().get(i).filter(|p| p.x.is_finite() && p.y.is_finite()).map(|p| {
            let x = INSET_X + (p.x.clamp(0.0, 1.0) * (INSET_SIZE - 1) as f32) as i32;
            let y = INSET_Y + (p.y.clamp(0.0, 1.0) * (INSET_SIZE - 1) as f32) as i32;
            (x, y)
        })
    };

    for chain in BONES {
        for pair in chain.windows(2) {
            if let (Some(a), Some(b)) = (to_inset(pair[0]), to_inset(pair[1])) {
                canvas.draw_line(a, b, BONE_COLOR);
            }
        }
    }
    for tip in TIPS {
        if let Some((x, y)) = to_inset(tip) {
            canvas.fill_rect(x - 1, y - 1, 3, 3, TIP_COLOR);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:   Window,
    canvas:   Canvas,
    show_hud: bool,
}

pub fn window_scale(scale: u8) -> Scale {
    match scale {
        1 => Scale::X1,
        2 => Scale::X2,
        4 => Scale::X4,
        other => {
            tracing::warn!(scale = other, "unsupported window scale; using 1");
            Scale::X1
        }
    }
}

impl Visualizer {
    pub fn new(scale: u8, show_hud: bool) -> Result<Self, StartupError> {
        let mut window = Window::new(
            "Gesture Flap",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                scale:  window_scale(scale),
                ..WindowOptions::default()
            },
        ).map_err(StartupError::Window)?;

        window.limit_update_rate(Some(TICK));

        Ok(Visualizer { window, canvas: Canvas::new(WIN_W, WIN_H), show_hud })
    }
}

impl Frontend for Visualizer {
    fn poll_controls(&mut self) -> Controls {
        if !self.window.is_open() {
            return Controls { quit: true, ..Controls::default() };
        }

        let window = &self.window;
        // Discrete actions fire on first press only; poses count while held.
        let pressed = |k: Key| window.is_key_pressed(k, KeyRepeat::No);

        let pose = if window.is_key_down(Key::F) {
            Some(SimPose::Fist)
        } else if window.is_key_down(Key::P) {
            Some(SimPose::Palm)
        } else {
            None
        };

        Controls {
            quit:    pressed(Key::Escape) || pressed(Key::Q),
            flap:    pressed(Key::Space),
            restart: pressed(Key::R),
            pose,
        }
    }

    fn render(&mut self, sim: &Simulation, hud: &Hud) {
        draw_scene(&mut self.canvas, sim, hud, self.show_hud);
        if let Err(e) = self.window.update_with_buffer(self.canvas.pixels(), WIN_W, WIN_H) {
            tracing::warn!(error = %e, "frame not presented");
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000],
    }
}

/// Linear mix of two ARGB colors; `t` = 0.0 is all `a`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |shift: u32| {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        ((ca * (1.0 - t) + cb * t) as u32) << shift
    };
    0xFF000000 | mix(16) | mix(8) | mix(0)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
