//! 2D drawing surface the entities render into.
//!
//! Coordinates are world pixels (1024×480, y down). Drawing is additive;
//! entities never read back from the surface.

/// An sRGB colour with alpha (255 = opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha-blend `self` over `below`.
    pub fn over(self, below: Rgba) -> Rgba {
        if self.a == 255 {
            return self;
        }
        let alpha = self.a as u16;
        let mix = |top: u8, bottom: u8| -> u8 {
            ((top as u16 * alpha + bottom as u16 * (255 - alpha)) / 255) as u8
        };
        Rgba::rgb(
            mix(self.r, below.r),
            mix(self.g, below.g),
            mix(self.b, below.b),
        )
    }
}

pub mod palette {
    use super::Rgba;

    pub const SKY: Rgba = Rgba::rgb(245, 245, 245);
    pub const PLAYER: Rgba = Rgba::rgb(0x33, 0x33, 0x33);
    pub const PLAYER_FLASH: Rgba = Rgba::rgb(0x88, 0x88, 0x88);
    pub const GROUND: Rgba = Rgba::rgb(0x66, 0x66, 0x66);
    pub const GROUND_DETAIL: Rgba = Rgba::rgb(0x88, 0x88, 0x88);
    pub const CLOUD: Rgba = Rgba::rgb(0x80, 0x80, 0x80);
    pub const SMALL_CACTUS: Rgba = Rgba::rgb(0x00, 0x64, 0x00);
    pub const LARGE_CACTUS: Rgba = Rgba::rgb(0x22, 0x8B, 0x22);
    pub const BIRD: Rgba = Rgba::rgb(0x41, 0x69, 0xE1);
    pub const HITBOX: Rgba = Rgba::rgb(255, 0, 0);
    pub const SCORE_PANEL: Rgba = Rgba::rgba(255, 255, 255, 178);
    pub const TEXT: Rgba = Rgba::rgb(0x33, 0x33, 0x33);
    pub const OVERLAY: Rgba = Rgba::rgba(0, 0, 0, 128);
    pub const OVERLAY_TEXT: Rgba = Rgba::rgb(255, 255, 255);
    pub const GOLD: Rgba = Rgba::rgb(0xFF, 0xD7, 0x00);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
}

/// Font and placement for `fill_text`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub color: Rgba,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(size: f64, color: Rgba) -> Self {
        Self {
            size,
            bold: false,
            color,
            align: TextAlign::Start,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }
}

/// Drawing primitives available to entities.
pub trait Canvas {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba);
    /// Filled axis-aligned ellipse centred on (cx, cy).
    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Rgba);
    /// `y` is the text baseline.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle);
}

/// A recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Rgba,
    },
    StrokeRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Rgba,
    },
    FillEllipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        color: Rgba,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
    },
}

/// Canvas that keeps every call, for tests and the headless simulator.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// All text drawn so far, in call order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    /// Colours of every filled rectangle, in call order.
    pub fn rect_colors(&self) -> Vec<Rgba> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        self.commands
            .push(DrawCommand::FillRect { x, y, w, h, color });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        self.commands
            .push(DrawCommand::StrokeRect { x, y, w, h, color });
    }

    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillEllipse {
            cx,
            cy,
            rx,
            ry,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            style,
        });
    }
}
