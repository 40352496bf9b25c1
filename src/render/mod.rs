//! Terminal renderer: draws a [`View`] as pixel art plus a text overlay.

pub mod faces;
pub mod pixels;

use crossterm::{cursor, queue, style};
use std::f64::consts::PI;
use std::io::{self, Write};
use std::time::Duration;

use crate::coin::Side;
use crate::session::{AppMode, MAX_TARGET_FLIPS, MIN_TARGET_FLIPS, Outcome};
use crate::spin::{self, Tween};
use crate::table::{SETTLE_DELAY, View};

use faces::SIZE;
use pixels::{PixelBuf, Rgb};

// ── Colors ──────────────────────────────────────────────────────────────────

const FELT_TOP: Rgb = Rgb::hex(0x4A0404);
const FELT_BOT: Rgb = Rgb::hex(0x21140E);
const LAMP: Rgb = Rgb(255, 220, 150);
const SHADOW: Rgb = Rgb(0, 0, 0);
const PARCHMENT: Rgb = Rgb::hex(0xE8D9B0);
const GOLD_BRIGHT: Rgb = Rgb::hex(0xFBBF24);
const SLATE: Rgb = Rgb::hex(0xCBD5E1);
const SLATE_DIM: Rgb = Rgb::hex(0x64748B);
const STONE: Rgb = Rgb::hex(0x78716C);
const BLOOD: Rgb = Rgb::hex(0xB91C1C);
const INK: Rgb = Rgb(12, 6, 4);

// ── Layout ──────────────────────────────────────────────────────────────────

/// A block of terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub w: u16,
    pub h: u16,
}

impl CellRect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.col && col < self.col + self.w && row >= self.row && row < self.row + self.h
    }
}

/// One line of overlay text.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub row: u16,
    pub text: String,
    pub color: Rgb,
}

fn centered(row: u16, text: impl Into<String>, color: Rgb) -> Line {
    Line {
        row,
        text: text.into(),
        color,
    }
}

fn side_color(side: Side) -> Rgb {
    match side {
        Side::Heads => GOLD_BRIGHT,
        Side::Tails => SLATE,
    }
}

/// `3 ━━━━●────── 28`
pub fn slider(value: u32, width: usize) -> String {
    let span = (MAX_TARGET_FLIPS - MIN_TARGET_FLIPS) as usize;
    let pos = (value.saturating_sub(MIN_TARGET_FLIPS) as usize * width.saturating_sub(1)) / span;
    let track: String = (0..width)
        .map(|i| match i.cmp(&pos) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect();
    format!("{MIN_TARGET_FLIPS} {track} {MAX_TARGET_FLIPS}")
}

/// Text for the current mode. Pure, so screens can be checked without a terminal.
pub fn overlay(view: &View, rows: u16) -> Vec<Line> {
    let mut lines = Vec::new();
    let bottom = rows.saturating_sub(1);
    let mid = rows / 2;

    match view.mode {
        AppMode::FreePlay | AppMode::GameActive => {
            if let (AppMode::GameActive, Some(session)) = (view.mode, view.session) {
                let t = session.tally();
                let mark = |side: Side, n: u32| {
                    if session.chosen_side() == side {
                        format!("▸ {side}: {n} ◂")
                    } else {
                        format!("{side}: {n}")
                    }
                };
                lines.push(centered(
                    1,
                    format!(
                        "FLIP {} / {}",
                        session.current_flips(),
                        session.target_flips()
                    ),
                    PARCHMENT,
                ));
                lines.push(centered(
                    2,
                    format!("{}     {}", mark(Side::Heads, t.heads), mark(Side::Tails, t.tails)),
                    side_color(session.chosen_side()),
                ));
            } else {
                let s = view.lifetime;
                lines.push(centered(
                    1,
                    format!("TOTAL {}     HEADS {}     TAILS {}", s.total(), s.heads, s.tails),
                    STONE,
                ));
            }

            // The verdict of the last flip stays hidden while the coin is in the air.
            if !view.is_animating {
                if let Some(side) = view.last_result {
                    let spaced: String = side
                        .label()
                        .chars()
                        .flat_map(|c| [c, ' '])
                        .collect();
                    lines.push(centered(bottom.saturating_sub(6), spaced.trim_end(), side_color(side)));
                }
                let phrase_applies =
                    view.last_result.is_some() || view.mode == AppMode::GameActive;
                if phrase_applies && !view.flavor_text.is_empty() {
                    lines.push(centered(
                        bottom.saturating_sub(4),
                        format!("« {} »", view.flavor_text),
                        PARCHMENT,
                    ));
                }
                if view.mode == AppMode::FreePlay {
                    if view.last_result.is_none() {
                        lines.push(centered(
                            bottom.saturating_sub(5),
                            "[ CLICK THE COIN OR PRESS SPACE TO DECIDE ]",
                            PARCHMENT,
                        ));
                        lines.push(centered(
                            bottom.saturating_sub(3),
                            "- press G to play the Game of Fate -",
                            STONE,
                        ));
                    } else {
                        lines.push(centered(
                            bottom.saturating_sub(2),
                            "- G: try your luck in the Game of Fate -",
                            STONE,
                        ));
                    }
                }
            }

            let keys = match view.mode {
                AppMode::GameActive => "SPACE/CLICK flip   Y yield",
                _ => "SPACE/CLICK flip   G game of fate   Q quit",
            };
            lines.push(centered(bottom, keys, SLATE_DIM));
        }
        AppMode::Setup => {
            let d = view.draft;
            let top = mid.saturating_sub(6);
            let choice = |side: Side| {
                if d.chosen_side == side {
                    format!("[ {side} ]")
                } else {
                    format!("  {side}  ")
                }
            };
            lines.push(centered(top, "GAME OF FATE", PARCHMENT));
            lines.push(centered(top + 1, "════════════", STONE));
            lines.push(centered(top + 3, "CHOOSE YOUR ALLIANCE", STONE));
            lines.push(centered(
                top + 4,
                format!("{}    {}", choice(Side::Heads), choice(Side::Tails)),
                side_color(d.chosen_side),
            ));
            lines.push(centered(
                top + 6,
                format!("FATE'S DURATION ({} FLIPS)", d.target_flips()),
                STONE,
            ));
            lines.push(centered(top + 7, slider(d.target_flips(), 26), GOLD_BRIGHT));
            lines.push(centered(top + 9, "ENTER  BEGIN", PARCHMENT));
            lines.push(centered(top + 11, "[ FLEE - YOU WILL RETURN ]", STONE));
            lines.push(centered(
                bottom,
                "←/→ side   ↑/↓ flips   ENTER begin   ESC flee",
                SLATE_DIM,
            ));
        }
        AppMode::GameResult => {
            if let Some(card) = &view.result {
                let top = mid.saturating_sub(6);
                let color = match card.outcome {
                    Outcome::Victory => GOLD_BRIGHT,
                    Outcome::Defeat | Outcome::Stalemate => BLOOD,
                };
                lines.push(centered(top, card.outcome.headline(), color));
                let mut row = top + 2;
                let quote: Vec<&str> = card.quote.lines().collect();
                for (i, part) in quote.iter().enumerate() {
                    let open = if i == 0 { "\"" } else { "" };
                    let close = if i + 1 == quote.len() { "\"" } else { "" };
                    lines.push(centered(row, format!("{open}{part}{close}"), PARCHMENT));
                    row += 1;
                }
                row += 1;
                lines.push(centered(
                    row,
                    format!("HEADS {}     TAILS {}", card.tally.heads, card.tally.tails),
                    SLATE,
                ));
                lines.push(centered(row + 2, "ENTER  TEMPT FATE AGAIN", PARCHMENT));
                lines.push(centered(row + 3, "[ FLEE - YOU WILL RETURN ]", STONE));
            }
            lines.push(centered(bottom, "ENTER tempt fate again   ESC flee", SLATE_DIM));
        }
    }
    lines
}

// ── Screen ──────────────────────────────────────────────────────────────────

pub struct Screen {
    buf: PixelBuf,
    cols: u16,
    rows: u16,
    spin: Tween,
    coin_cells: Option<CellRect>,
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
            cols,
            rows,
            spin: Tween::new(0.0, SETTLE_DELAY),
            coin_cells: None,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.buf.resize(cols as usize, rows as usize * 2);
    }

    /// Whether a click at this cell lands on the coin.
    pub fn hits_coin(&self, col: u16, row: u16) -> bool {
        self.coin_cells.is_some_and(|r| r.contains(col, row))
    }

    fn scale(&self) -> i32 {
        let pw = self.buf.width() as f64;
        let ph = self.buf.height() as f64;
        ((ph * 0.45).min(pw * 0.5) / SIZE as f64).floor().max(1.0) as i32
    }

    pub fn draw(&mut self, view: &View, now: Duration, out: &mut impl Write) -> io::Result<()> {
        self.draw_table();
        let angle = self.spin.follow(view.rotation, now);
        match view.mode {
            AppMode::FreePlay | AppMode::GameActive => {
                let lift = if view.is_animating {
                    (PI * self.spin.progress(now)).sin()
                } else {
                    0.0
                };
                self.draw_coin(view, angle, lift);
            }
            AppMode::Setup | AppMode::GameResult => {
                self.coin_cells = None;
                self.darken();
            }
        }
        self.buf.render(out)?;

        for line in overlay(view, self.rows) {
            let width = line.text.chars().count() as u16;
            let col = self.cols.saturating_sub(width) / 2;
            queue!(
                out,
                cursor::MoveTo(col, line.row),
                style::SetBackgroundColor(INK.term()),
                style::SetForegroundColor(line.color.term()),
                style::Print(&line.text),
                style::ResetColor
            )?;
        }
        out.flush()
    }

    fn draw_table(&mut self) {
        let (pw, ph) = (self.buf.width(), self.buf.height());
        for y in 0..ph {
            let base = Rgb::lerp(FELT_TOP, FELT_BOT, y as f64 / ph.max(1) as f64);
            for x in 0..pw {
                // Faint wood grain.
                let grain = (x + y * 3) % 11 == 0 || (x * 7 + y) % 23 == 0;
                let c = if grain { base.dim(0.85) } else { base };
                self.buf.set(x as i32, y as i32, c);
            }
        }
        let s = self.scale() as f64;
        self.buf.glow(
            pw as f64 / 2.0,
            ph as f64 * 0.42,
            SIZE as f64 * s * 1.1,
            SIZE as f64 * s * 1.1,
            LAMP,
            0.25,
        );
    }

    fn darken(&mut self) {
        for y in 0..self.buf.height() {
            for x in 0..self.buf.width() {
                let c = self.buf.get(x, y);
                self.buf.set(x as i32, y as i32, c.dim(0.45));
            }
        }
    }

    fn draw_coin(&mut self, view: &View, angle: f64, lift: f64) {
        let s = self.scale();
        let size = SIZE as i32 * s;
        let cx = self.buf.width() as i32 / 2;
        let rest_y = (self.buf.height() as f64 * 0.42) as i32;
        let cy = rest_y - (lift * size as f64 * 0.8) as i32;

        // Shadow shrinks while the coin is up.
        self.buf.glow(
            cx as f64,
            (rest_y + size / 2 + 3) as f64,
            size as f64 * 0.5 * (1.0 - lift * 0.5),
            3.0,
            SHADOW,
            0.7 * (1.0 - lift * 0.6),
        );

        let rad = angle.to_radians();
        let squash = rad.cos().abs();
        let heads_up = spin::facing_heads(angle);
        let (side, face) = if heads_up {
            (Side::Heads, view.faces.heads)
        } else {
            (Side::Tails, view.faces.tails)
        };
        let pal = faces::palette(side);
        let face_h = ((size as f64 * squash).round() as i32).max(1);
        let rim = (rad.sin().abs() * s as f64 * 1.5).round() as i32;
        let left = cx - size / 2;
        let top = cy - face_h / 2;

        // Rim first, offset downward, so the face sits on top of it.
        for layer in (1..=rim).rev() {
            for dy in 0..face_h {
                let sy = (dy * SIZE as i32 / face_h) as usize;
                for dx in 0..size {
                    let sx = (dx / s) as usize;
                    if faces::in_disc(sx, sy) {
                        let c = if (sx + sy + layer as usize) % 2 == 0 {
                            pal.ridge
                        } else {
                            pal.groove
                        };
                        self.buf.set(left + dx, top + dy + layer, c);
                    }
                }
            }
        }

        let light = 0.7 + 0.3 * squash;
        for dy in 0..face_h {
            let sy = (dy * SIZE as i32 / face_h) as usize;
            for dx in 0..size {
                let sx = (dx / s) as usize;
                if !faces::in_disc(sx, sy) {
                    continue;
                }
                let c = if faces::is_feature(face, sx, sy) {
                    pal.feature
                } else {
                    pal.body
                };
                self.buf.set(left + dx, top + dy, c.dim(light));
            }
        }

        self.coin_cells = Some(CellRect {
            col: left.max(0) as u16,
            row: ((rest_y - size / 2).max(0) / 2) as u16,
            w: size as u16,
            h: (size / 2).max(1) as u16,
        });
    }
}
