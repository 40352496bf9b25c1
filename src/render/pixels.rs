//! Truecolor pixel buffer drawn with half-block characters: two pixels per cell.

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(v: u32) -> Rgb {
        Rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
        Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }

    pub fn dim(self, k: f64) -> Rgb {
        Rgb::lerp(Rgb(0, 0, 0), self, k)
    }

    pub fn term(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

pub struct PixelBuf {
    w: usize,
    h: usize, // terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![Rgb(0, 0, 0); w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, Rgb(0, 0, 0));
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    /// Mixes `c` over what is already there.
    pub fn blend(&mut self, x: i32, y: i32, c: Rgb, alpha: f64) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            let idx = y as usize * self.w + x as usize;
            self.px[idx] = Rgb::lerp(self.px[idx], c, alpha);
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Soft-edged ellipse, used for shadows and lamp glow.
    pub fn glow(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, c: Rgb, strength: f64) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let (x0, x1) = ((cx - rx).floor() as i32, (cx + rx).ceil() as i32);
        let (y0, y1) = ((cy - ry).floor() as i32, (cy + ry).ceil() as i32);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = (x as f64 + 0.5 - cx) / rx;
                let dy = (y as f64 + 0.5 - cy) / ry;
                let d = dx * dx + dy * dy;
                if d < 1.0 {
                    self.blend(x, y, c, strength * (1.0 - d));
                }
            }
        }
    }

    /// Queues the frame; the caller flushes once any text overlay is on top.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(bot.term()))?;
                    bg = Some(bot);
                }
                if top == bot {
                    queue!(out, style::Print(' '))?;
                    continue;
                }
                if fg != Some(top) {
                    queue!(out, style::SetForegroundColor(top.term()))?;
                    fg = Some(top);
                }
                queue!(out, style::Print('\u{2580}'))?; // ▀
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                fg = None;
                bg = None;
            }
        }
        queue!(out, style::ResetColor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut buf = PixelBuf::new(4, 4);
        buf.set(-1, 0, Rgb(1, 1, 1));
        buf.set(4, 4, Rgb(1, 1, 1));
        buf.fill_rect(2, 2, 10, 10, Rgb(9, 9, 9));
        assert_eq!(buf.get(0, 0), Rgb(0, 0, 0));
        assert_eq!(buf.get(3, 3), Rgb(9, 9, 9));
    }

    #[test]
    fn hex_and_lerp() {
        assert_eq!(Rgb::hex(0xF59E0B), Rgb(0xF5, 0x9E, 0x0B));
        assert_eq!(Rgb::lerp(Rgb(0, 0, 0), Rgb(200, 100, 50), 0.5), Rgb(100, 50, 25));
        assert_eq!(Rgb(10, 20, 30).dim(0.0), Rgb(0, 0, 0));
    }

    #[test]
    fn renders_half_blocks() {
        let mut buf = PixelBuf::new(2, 2);
        buf.set(0, 0, Rgb(255, 0, 0));
        let mut out = Vec::new();
        buf.render(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('\u{2580}'));
        assert!(text.contains(' '));
    }
}
