//! Software rasteriser: [`DrawList`] → packed ARGB framebuffer.
//!
//! Everything is drawn with per-pixel alpha blending straight into the
//! buffer; there are no intermediate layers. Primitives are clipped to the
//! canvas, so off-screen geometry is harmless.

use crate::draw::{DrawCmd, DrawList, Point};
use crate::font;
use crate::theme::Rgb;

pub struct Canvas {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { width, height, buf: vec![0xFF00_0000; width * height] }
    }

    pub fn width(&self) -> usize { self.width }

    pub fn height(&self) -> usize { self.height }

    /// Row-major `0xAARRGGBB` pixels, `width * height` long.
    pub fn buffer(&self) -> &[u32] { &self.buf }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| Rgb::from_argb(self.buf[y * self.width + x]))
    }

    /// Paint `list` in order over the current contents.
    pub fn render(&mut self, list: &DrawList) {
        for (_, cmd) in list.iter() {
            self.draw(cmd);
        }
    }

    pub fn draw(&mut self, cmd: &DrawCmd) {
        match cmd {
            DrawCmd::Fill { color } => self.buf.fill(color.to_argb()),
            DrawCmd::Grid { spacing, color, alpha } => self.grid(*spacing, *color, *alpha),
            DrawCmd::HexGrid { cell, offset, color, alpha } => self.hex_grid(*cell, *offset, *color, *alpha),
            DrawCmd::Scanlines { spacing, color, alpha } => {
                let step = (*spacing).max(1) as usize;
                for y in (0..self.height).step_by(step) {
                    self.hspan(0, self.width as i32 - 1, y as i32, *color, *alpha);
                }
            }
            DrawCmd::Rect { x, y, w, h, color, thickness, alpha } => {
                if *thickness == 0 {
                    self.fill_rect(*x, *y, *w, *h, *color, *alpha);
                } else {
                    self.rect_outline(*x, *y, *w, *h, *thickness as i32, *color, *alpha);
                }
            }
            DrawCmd::Pill { x, y, w, h, color, alpha } => self.pill(*x, *y, *w, *h, *color, *alpha),
            DrawCmd::Line { from, to, color, thickness, alpha } => {
                self.line(*from, *to, *thickness, *color, *alpha)
            }
            DrawCmd::Circle { center, radius, color, thickness, alpha } => {
                if *thickness == 0 {
                    self.disc(*center, *radius, *color, *alpha);
                } else {
                    self.ring(*center, *radius, *thickness, *color, *alpha);
                }
            }
            DrawCmd::Arc { center, radius, start_deg, end_deg, color, alpha } => {
                self.arc(*center, *radius, *start_deg, *end_deg, *color, *alpha)
            }
            DrawCmd::Text { pos, text, color, scale } => self.text(*pos, text, *color, *scale),
        }
    }

    // ── pixel access ────────────────────────────────────────────────────────

    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.buf[idx] = if alpha >= 1.0 {
            color.to_argb()
        } else {
            Rgb::from_argb(self.buf[idx]).blend(color, alpha).to_argb()
        };
    }

    fn hspan(&mut self, x0: i32, x1: i32, y: i32, color: Rgb, alpha: f32) {
        if y < 0 || y as usize >= self.height {
            return;
        }
        let lo = x0.max(0);
        let hi = x1.min(self.width as i32 - 1);
        for x in lo..=hi {
            self.blend_pixel(x, y, color, alpha);
        }
    }

    // ── shapes ──────────────────────────────────────────────────────────────

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb, alpha: f32) {
        for row in y..y + h {
            self.hspan(x, x + w - 1, row, color, alpha);
        }
    }

    fn rect_outline(&mut self, x: i32, y: i32, w: i32, h: i32, t: i32, color: Rgb, alpha: f32) {
        let t = t.min(w / 2).min(h / 2).max(1);
        self.fill_rect(x, y, w, t, color, alpha);
        self.fill_rect(x, y + h - t, w, t, color, alpha);
        self.fill_rect(x, y + t, t, h - 2 * t, color, alpha);
        self.fill_rect(x + w - t, y + t, t, h - 2 * t, color, alpha);
    }

    fn pill(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb, alpha: f32) {
        let r = h / 2;
        let left = x + r;
        let right = x + w - r;
        for row in y..y + h {
            let dy = row - (y + r);
            let half = ((r * r - dy * dy).max(0) as f32).sqrt() as i32;
            self.hspan(left - half, right + half, row, color, alpha);
        }
    }

    fn disc(&mut self, c: Point, r: i32, color: Rgb, alpha: f32) {
        for dy in -r..=r {
            let half = ((r * r - dy * dy) as f32).sqrt() as i32;
            self.hspan(c.0 - half, c.0 + half, c.1 + dy, color, alpha);
        }
    }

    /// Ring centred on radius `r` with total width `t`.
    fn ring(&mut self, c: Point, r: i32, t: u32, color: Rgb, alpha: f32) {
        let half = t as f32 / 2.0;
        let inner = (r as f32 - half).max(0.0);
        let outer = r as f32 + half;
        let reach = outer.ceil() as i32;
        let (inner2, outer2) = (inner * inner, outer * outer);
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let d2 = (dx * dx + dy * dy) as f32;
                if d2 >= inner2 && d2 <= outer2 {
                    self.blend_pixel(c.0 + dx, c.1 + dy, color, alpha);
                }
            }
        }
    }

    fn arc(&mut self, c: Point, r: i32, start_deg: f32, end_deg: f32, color: Rgb, alpha: f32) {
        if r <= 0 || !(end_deg > start_deg) {
            return;
        }
        // one sample per pixel of arc length
        let span = (end_deg - start_deg).to_radians();
        let steps = ((span * r as f32).ceil() as usize).max(1);
        let mut last = None;
        for i in 0..=steps {
            let a = start_deg.to_radians() + span * i as f32 / steps as f32;
            let p = (
                c.0 + (r as f32 * a.cos()).round() as i32,
                c.1 + (r as f32 * a.sin()).round() as i32,
            );
            if last != Some(p) {
                self.blend_pixel(p.0, p.1, color, alpha);
                last = Some(p);
            }
        }
    }

    fn line(&mut self, from: Point, to: Point, thickness: u32, color: Rgb, alpha: f32) {
        if thickness <= 1 {
            self.thin_line(from, to, color, alpha);
        } else {
            self.thick_line(from, to, thickness as f32 / 2.0, color, alpha);
        }
    }

    /// Bresenham.
    fn thin_line(&mut self, (mut x0, mut y0): Point, (x1, y1): Point, color: Rgb, alpha: f32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend_pixel(x0, y0, color, alpha);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Every pixel within `half` of the segment, scanned over its bounding box.
    fn thick_line(&mut self, a: Point, b: Point, half: f32, color: Rgb, alpha: f32) {
        let pad = half.ceil() as i32;
        let (x_lo, x_hi) = (a.0.min(b.0) - pad, a.0.max(b.0) + pad);
        let (y_lo, y_hi) = (a.1.min(b.1) - pad, a.1.max(b.1) + pad);
        let x_lo = x_lo.max(0);
        let y_lo = y_lo.max(0);
        let x_hi = x_hi.min(self.width as i32 - 1);
        let y_hi = y_hi.min(self.height as i32 - 1);
        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                if segment_distance((x, y), a, b) <= half {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    fn grid(&mut self, spacing: u32, color: Rgb, alpha: f32) {
        let step = spacing.max(1) as usize;
        for y in 0..self.height {
            if y % step == 0 {
                self.hspan(0, self.width as i32 - 1, y as i32, color, alpha);
            } else {
                for x in (0..self.width).step_by(step) {
                    self.blend_pixel(x as i32, y as i32, color, alpha);
                }
            }
        }
    }

    /// Honeycomb of hexagon outlines; odd rows shift by half a cell.
    fn hex_grid(&mut self, cell: u32, offset: Point, color: Rgb, alpha: f32) {
        let cell = cell.max(2) as i32;
        let r = cell / 2;
        let ry = (0.866 * r as f32) as i32;
        let (w, h) = (self.width as i32, self.height as i32);
        let mut y = 0;
        while y < h + cell {
            let shift = ((y / cell) % 2) * r;
            let mut x = 0;
            while x < w + cell {
                let (cx, cy) = (x + shift + offset.0, y + offset.1);
                let pts = [
                    (cx + r, cy),
                    (cx + r / 2, cy + ry),
                    (cx - r / 2, cy + ry),
                    (cx - r, cy),
                    (cx - r / 2, cy - ry),
                    (cx + r / 2, cy - ry),
                ];
                for i in 0..6 {
                    self.thin_line(pts[i], pts[(i + 1) % 6], color, alpha);
                }
                x += cell;
            }
            y += cell;
        }
    }

    fn text(&mut self, (x, y): Point, text: &str, color: Rgb, scale: u32) {
        let s = scale.max(1) as i32;
        let mut cx = x;
        for ch in text.chars() {
            if cx >= self.width as i32 {
                break;
            }
            for (row, bits) in font::glyph(ch).iter().enumerate() {
                for col in 0..font::GLYPH_W as i32 {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * s, y + row as i32 * s, s, s, color, 1.0);
                    }
                }
            }
            cx += font::ADVANCE as i32 * s;
        }
    }
}

fn segment_distance(p: Point, a: Point, b: Point) -> f32 {
    let (px, py) = (p.0 as f32, p.1 as f32);
    let (ax, ay) = (a.0 as f32, a.1 as f32);
    let (dx, dy) = (b.0 as f32 - a.0 as f32, b.1 as f32 - a.1 as f32);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 { 0.0 } else { (((px - ax) * dx + (py - ay) * dy) / len2).clamp(0.0, 1.0) };
    (px - (ax + t * dx)).hypot(py - (ay + t * dy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Layer;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLACK: Rgb = Rgb::new(0, 0, 0);

    #[test]
    fn fill_then_blend() {
        let mut c = Canvas::new(8, 8);
        c.draw(&DrawCmd::Fill { color: BLACK });
        c.draw(&DrawCmd::Rect { x: 2, y: 2, w: 2, h: 2, color: Rgb::new(200, 100, 0), thickness: 0, alpha: 0.5 });
        assert_eq!(c.pixel(2, 2), Some(Rgb::new(100, 50, 0)));
        assert_eq!(c.pixel(4, 4), Some(BLACK));
        assert_eq!(c.pixel(8, 0), None);
    }

    #[test]
    fn thin_line_hits_both_endpoints() {
        let mut c = Canvas::new(20, 20);
        c.draw(&DrawCmd::Line { from: (1, 2), to: (15, 9), color: RED, thickness: 1, alpha: 1.0 });
        assert_eq!(c.pixel(1, 2), Some(RED));
        assert_eq!(c.pixel(15, 9), Some(RED));
    }

    #[test]
    fn offscreen_geometry_is_clipped() {
        let mut c = Canvas::new(10, 10);
        let mut list = DrawList::new();
        list.push(Layer::Wheel, DrawCmd::Circle { center: (-50, -50), radius: 30, color: RED, thickness: 6, alpha: 1.0 });
        list.push(Layer::Hands, DrawCmd::Line { from: (-100, 5), to: (100, 5), color: RED, thickness: 4, alpha: 1.0 });
        list.push(Layer::Text, DrawCmd::Text { pos: (8, 8), text: "Gesture Racer".into(), color: RED, scale: 3 });
        c.render(&list);
        assert_eq!(c.pixel(0, 5), Some(RED));
        assert_eq!(c.buffer().len(), 100);
    }

    #[test]
    fn ring_leaves_centre_empty() {
        let mut c = Canvas::new(40, 40);
        c.draw(&DrawCmd::Circle { center: (20, 20), radius: 10, color: RED, thickness: 2, alpha: 1.0 });
        assert_eq!(c.pixel(20, 20), Some(BLACK));
        assert_eq!(c.pixel(30, 20), Some(RED));
        c.draw(&DrawCmd::Circle { center: (20, 20), radius: 3, color: RED, thickness: 0, alpha: 1.0 });
        assert_eq!(c.pixel(20, 20), Some(RED));
    }

    #[test]
    fn text_uses_glyph_bits() {
        let mut c = Canvas::new(16, 8);
        c.draw(&DrawCmd::Text { pos: (0, 0), text: "1".into(), color: RED, scale: 1 });
        // '1' = 010 / 110 / 010 / 010 / 111
        assert_eq!(c.pixel(1, 0), Some(RED));
        assert_eq!(c.pixel(0, 0), Some(BLACK));
        assert_eq!(c.pixel(0, 4), Some(RED));
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        assert_eq!(segment_distance((0, 5), (0, 0), (10, 0)), 5.0);
        assert_eq!(segment_distance((13, 4), (0, 0), (10, 0)), 5.0);
        assert_eq!(segment_distance((3, 4), (0, 0), (0, 0)), 5.0);
    }
}
