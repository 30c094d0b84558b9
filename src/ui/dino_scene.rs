//! Dino Runner scene: play field, status bar and info panel.
//!
//! The world draws itself into a `TerminalCanvas` sized to the play field;
//! the canvas rows are then stamped as a single Paragraph.

use super::layout::{render_footer, split_scene};
use super::terminal_canvas::TerminalCanvas;
use crate::entities::Player;
use crate::world::World;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const INFO_PANEL_WIDTH: u16 = 22;
const CONTENT_MIN_HEIGHT: u16 = 10;

/// Driver settings shown in the info panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneOptions {
    pub sound: bool,
    pub debug_hitboxes: bool,
}

/// Render one frame of the game.
pub fn render_dino_scene(
    frame: &mut Frame,
    area: Rect,
    world: &mut World,
    now_ms: u64,
    options: SceneOptions,
) {
    let border = if world.is_running() {
        Color::LightYellow
    } else {
        Color::Red
    };
    let layout = split_scene(
        frame,
        area,
        " Dino Runner ",
        border,
        CONTENT_MIN_HEIGHT,
        INFO_PANEL_WIDTH,
    );

    render_play_field(frame, layout.field, world, now_ms);
    render_status(frame, layout.footer, world);
    render_info_panel(frame, layout.panel, world, options);
}

fn render_play_field(frame: &mut Frame, area: Rect, world: &mut World, now_ms: u64) {
    if area.height < 2 || area.width < 10 {
        return;
    }
    let mut canvas = TerminalCanvas::new(area.width, area.height);
    world.draw(&mut canvas, now_ms);
    frame.render_widget(Paragraph::new(canvas.to_lines()), area);
}

fn render_status(frame: &mut Frame, area: Rect, world: &World) {
    if !world.is_running() {
        render_footer(
            frame,
            area,
            "Game Over",
            Color::Red,
            &[("[R]", "Restart"), ("[Esc/Q]", "Quit")],
        );
        return;
    }

    let ducking = world.find::<Player>().is_some_and(|p| p.is_ducking);
    let duck_hint = if ducking { "Stand" } else { "Duck" };
    render_footer(
        frame,
        area,
        "Run!",
        Color::LightYellow,
        &[
            ("[Space/Up]", "Jump"),
            ("[Down]", duck_hint),
            ("[Esc/Q]", "Quit"),
        ],
    );
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, world: &World, options: SceneOptions) {
    let ctx = world.ctx();
    let label = Style::default().fg(Color::DarkGray);

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                format!("{}", ctx.score.floor() as u64),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best: ", label),
            Span::styled(
                format!("{}", ctx.high_score),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::styled("Speed: ", label),
            Span::styled(
                format!("{:.1}", ctx.ground_speed),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Sound: ", label),
            Span::styled(on_off(options.sound), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Hitboxes: ", label),
            Span::styled(
                on_off(options.debug_hitboxes),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" \u{2588} ", Style::default().fg(Color::Rgb(0x33, 0x33, 0x33))),
            Span::styled("Runner", label),
        ]),
        Line::from(vec![
            Span::styled(" \u{2588} ", Style::default().fg(Color::Rgb(0x00, 0x64, 0x00))),
            Span::styled("Small cactus", label),
        ]),
        Line::from(vec![
            Span::styled(" \u{2588} ", Style::default().fg(Color::Rgb(0x22, 0x8B, 0x22))),
            Span::styled("Large cactus", label),
        ]),
        Line::from(vec![
            Span::styled(" \u{2588} ", Style::default().fg(Color::Rgb(0x41, 0x69, 0xE1))),
            Span::styled("Bird", label),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}
