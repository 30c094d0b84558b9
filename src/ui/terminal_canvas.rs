//! A `Canvas` that rasterises world coordinates into terminal cells.
//!
//! Each cell holds two stacked pixels drawn with an upper half block, so the
//! pixel grid is `cols × rows * 2`. Text lives in a separate glyph layer on
//! top of the pixels; later fills blend over it the same way they blend over
//! pixels.

use crate::canvas::{palette, Canvas, Rgba, TextAlign, TextStyle};
use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const HALF_BLOCK: char = '\u{2580}'; // ▀

/// A character drawn over a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgba,
    pub bold: bool,
}

/// One terminal cell: upper and lower pixel plus an optional glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub top: Rgba,
    pub bottom: Rgba,
    pub glyph: Option<Glyph>,
}

impl Cell {
    fn blank(bg: Rgba) -> Self {
        Self {
            top: bg,
            bottom: bg,
            glyph: None,
        }
    }

    fn style(&self) -> Style {
        match self.glyph {
            Some(glyph) => {
                let style = Style::default().fg(to_color(glyph.fg)).bg(to_color(self.top));
                if glyph.bold {
                    style.add_modifier(Modifier::BOLD)
                } else {
                    style
                }
            }
            None => Style::default()
                .fg(to_color(self.top))
                .bg(to_color(self.bottom)),
        }
    }

    fn ch(&self) -> char {
        self.glyph.map_or(HALF_BLOCK, |g| g.ch)
    }
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

pub struct TerminalCanvas {
    cols: usize,
    rows: usize,
    /// Row-major, `rows` rows of `cols` cells.
    cells: Vec<Cell>,
    /// Pixels per world unit.
    sx: f64,
    sy: f64,
}

impl TerminalCanvas {
    /// A canvas showing the whole 1024×480 world in `cols × rows` cells.
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1) as usize;
        let rows = rows.max(1) as usize;
        Self {
            cols,
            rows,
            cells: vec![Cell::blank(palette::SKY); cols * rows],
            sx: cols as f64 / CANVAS_WIDTH,
            sy: (rows * 2) as f64 / CANVAS_HEIGHT,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Reset every cell to the sky colour.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::blank(palette::SKY));
    }

    /// Colour of pixel (px, py), where py counts half-cells.
    pub fn pixel(&self, px: usize, py: usize) -> Option<Rgba> {
        self.cell(px, py / 2)
            .map(|c| if py % 2 == 0 { c.top } else { c.bottom })
    }

    fn pixel_height(&self) -> usize {
        self.rows * 2
    }

    /// Blend `color` onto one pixel; out-of-range pixels are ignored.
    fn blend_pixel(&mut self, px: i64, py: i64, color: Rgba) {
        if px < 0 || py < 0 || px as usize >= self.cols || py as usize >= self.pixel_height() {
            return;
        }
        let (px, py) = (px as usize, py as usize);
        let cell = &mut self.cells[(py / 2) * self.cols + px];
        if py % 2 == 0 {
            cell.top = color.over(cell.top);
        } else {
            cell.bottom = color.over(cell.bottom);
        }

        // Opaque paint hides text underneath; translucent paint tints it.
        if color.a == 255 {
            cell.glyph = None;
        } else if let Some(glyph) = cell.glyph.as_mut() {
            glyph.fg = color.over(glyph.fg);
        }
    }

    /// World-space span `[start, start + len)` to a half-open pixel range.
    fn pixel_span(start: f64, len: f64, scale: f64) -> (i64, i64) {
        let lo = (start * scale).floor() as i64;
        let hi = ((start + len) * scale).ceil() as i64;
        (lo, hi.max(lo + 1))
    }

    /// Build one ratatui line per cell row, merging runs of equal style.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.cols)
            .map(|row| {
                let mut spans: Vec<Span<'static>> = Vec::new();
                let mut current_style: Option<Style> = None;
                let mut current_text = String::new();

                for cell in row {
                    let style = cell.style();
                    if current_style != Some(style) && !current_text.is_empty() {
                        if let Some(s) = current_style {
                            spans.push(Span::styled(std::mem::take(&mut current_text), s));
                        }
                    }
                    current_style = Some(style);
                    current_text.push(cell.ch());
                }
                if let Some(s) = current_style {
                    if !current_text.is_empty() {
                        spans.push(Span::styled(current_text, s));
                    }
                }
                Line::from(spans)
            })
            .collect()
    }
}

impl Canvas for TerminalCanvas {
    fn width(&self) -> f64 {
        CANVAS_WIDTH
    }

    fn height(&self) -> f64 {
        CANVAS_HEIGHT
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let (x0, x1) = Self::pixel_span(x, w, self.sx);
        let (y0, y1) = Self::pixel_span(y, h, self.sy);
        for py in y0.max(0)..y1.min(self.pixel_height() as i64) {
            for px in x0.max(0)..x1.min(self.cols as i64) {
                self.blend_pixel(px, py, color);
            }
        }
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        let (x0, x1) = Self::pixel_span(x, w, self.sx);
        let (y0, y1) = Self::pixel_span(y, h, self.sy);
        for px in x0..x1 {
            self.blend_pixel(px, y0, color);
            if y1 - 1 != y0 {
                self.blend_pixel(px, y1 - 1, color);
            }
        }
        for py in (y0 + 1)..(y1 - 1) {
            self.blend_pixel(x0, py, color);
            if x1 - 1 != x0 {
                self.blend_pixel(x1 - 1, py, color);
            }
        }
    }

    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Rgba) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let (x0, x1) = Self::pixel_span(cx - rx, rx * 2.0, self.sx);
        let (y0, y1) = Self::pixel_span(cy - ry, ry * 2.0, self.sy);

        let mut painted = false;
        for py in y0..y1 {
            for px in x0..x1 {
                // Sample at the pixel centre, back in world units
                let wx = (px as f64 + 0.5) / self.sx;
                let wy = (py as f64 + 0.5) / self.sy;
                let nx = (wx - cx) / rx;
                let ny = (wy - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.blend_pixel(px, py, color);
                    painted = true;
                }
            }
        }

        // Smaller than a pixel: still show something
        if !painted {
            let px = (cx * self.sx).floor() as i64;
            let py = (cy * self.sy).floor() as i64;
            self.blend_pixel(px, py, color);
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        // Text occupies [y - size, y]; put it on the cell row at its middle.
        let mid_y = y - style.size / 2.0;
        let row = ((mid_y * self.sy) / 2.0).floor() as i64;
        if row < 0 || row as usize >= self.rows {
            return;
        }

        let len = text.chars().count() as i64;
        let anchor = (x * self.sx).round() as i64;
        let start = match style.align {
            TextAlign::Start => anchor,
            TextAlign::Center => anchor - len / 2,
        };

        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i64;
            if col < 0 || col as usize >= self.cols {
                continue;
            }
            let idx = row as usize * self.cols + col as usize;
            self.cells[idx].glyph = Some(Glyph {
                ch,
                fg: style.color,
                bold: style.bold,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1024×480 world onto 128×60 cells: 8 world units per pixel both ways.
    fn canvas() -> TerminalCanvas {
        TerminalCanvas::new(128, 30)
    }

    #[test]
    fn test_starts_as_sky() {
        let c = canvas();
        assert_eq!(c.pixel(0, 0), Some(palette::SKY));
        assert_eq!(c.pixel(127, 59), Some(palette::SKY));
        assert_eq!(c.pixel(128, 0), None);
    }

    #[test]
    fn test_fill_rect_scales_to_pixels() {
        let mut c = canvas();
        let red = Rgba::rgb(255, 0, 0);
        c.fill_rect(80.0, 400.0, 16.0, 16.0, red);

        assert_eq!(c.pixel(10, 50), Some(red));
        assert_eq!(c.pixel(11, 51), Some(red));
        assert_eq!(c.pixel(12, 50), Some(palette::SKY));
        assert_eq!(c.pixel(10, 52), Some(palette::SKY));
    }

    #[test]
    fn test_tiny_rect_still_paints_one_pixel() {
        let mut c = canvas();
        let red = Rgba::rgb(255, 0, 0);
        c.fill_rect(9.0, 9.0, 1.0, 1.0, red);
        assert_eq!(c.pixel(1, 1), Some(red));
    }

    #[test]
    fn test_offscreen_fill_is_clipped() {
        let mut c = canvas();
        c.fill_rect(-500.0, -500.0, 200.0, 200.0, Rgba::rgb(1, 2, 3));
        c.fill_rect(2000.0, 100.0, 50.0, 50.0, Rgba::rgb(1, 2, 3));
        assert!(c.cells.iter().all(|cell| *cell == Cell::blank(palette::SKY)));
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut c = canvas();
        c.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, Rgba::rgb(200, 200, 200));
        c.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, palette::OVERLAY);
        let p = c.pixel(5, 5).unwrap();
        assert!(p.r < 200 && p.r > 50);
    }

    #[test]
    fn test_stroke_rect_leaves_interior() {
        let mut c = canvas();
        let red = Rgba::rgb(255, 0, 0);
        c.stroke_rect(80.0, 80.0, 80.0, 80.0, red);
        assert_eq!(c.pixel(10, 10), Some(red));
        assert_eq!(c.pixel(19, 19), Some(red));
        assert_eq!(c.pixel(15, 15), Some(palette::SKY));
    }

    #[test]
    fn test_ellipse_fills_centre_not_corners() {
        let mut c = canvas();
        let grey = palette::CLOUD;
        c.fill_ellipse(400.0, 200.0, 80.0, 40.0, grey);
        assert_eq!(c.pixel(50, 25), Some(grey));
        assert_eq!(c.pixel(40, 20), Some(palette::SKY));
    }

    #[test]
    fn test_text_placed_on_glyph_layer() {
        let mut c = canvas();
        c.fill_text("Score: 7", 16.0, 30.0, TextStyle::new(20.0, palette::TEXT));
        // mid_y 20 -> pixel 2.5 -> cell row 1
        let cell = c.cell(2, 1).unwrap();
        assert_eq!(cell.glyph.map(|g| g.ch), Some('S'));
        assert_eq!(c.cell(9, 1).unwrap().glyph.map(|g| g.ch), Some('7'));
    }

    #[test]
    fn test_centered_text() {
        let mut c = canvas();
        c.fill_text(
            "abcd",
            CANVAS_WIDTH / 2.0,
            240.0,
            TextStyle::new(16.0, palette::TEXT).centered(),
        );
        let row = ((232.0 / 8.0) / 2.0) as usize;
        assert_eq!(c.cell(62, row).unwrap().glyph.map(|g| g.ch), Some('a'));
        assert_eq!(c.cell(65, row).unwrap().glyph.map(|g| g.ch), Some('d'));
    }

    #[test]
    fn test_overlay_tints_text_and_opaque_fill_hides_it() {
        let mut c = canvas();
        c.fill_text("X", 0.0, 20.0, TextStyle::new(20.0, Rgba::rgb(255, 255, 255)));
        c.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, palette::OVERLAY);
        let glyph = c.cell(0, 0).unwrap().glyph.unwrap();
        assert!(glyph.fg.r < 255);

        c.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, palette::GROUND);
        assert!(c.cell(0, 0).unwrap().glyph.is_none());
    }

    #[test]
    fn test_to_lines_merges_runs() {
        let mut c = TerminalCanvas::new(8, 2);
        c.fill_rect(0.0, 0.0, 512.0, CANVAS_HEIGHT, Rgba::rgb(0, 0, 0));
        let lines = c.to_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[0].content.chars().count(), 4);
    }

    #[test]
    fn test_clear_restores_sky() {
        let mut c = canvas();
        c.fill_rect(0.0, 0.0, 100.0, 100.0, palette::GROUND);
        c.fill_text("hi", 0.0, 20.0, TextStyle::new(20.0, palette::TEXT));
        c.clear();
        assert!(c.cells.iter().all(|cell| *cell == Cell::blank(palette::SKY)));
    }
}
