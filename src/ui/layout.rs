//! Screen split for the runner: bordered play field, two-line footer and a
//! side panel.
//!
//! ```text
//! ┌─ Dino Runner ───────────────────┬─ Info ──────┐
//! │                                 │             │
//! │   play field                    │  panel      │
//! │                                 │             │
//! │ footer: status / controls       │             │
//! └─────────────────────────────────┴─────────────┘
//! ```

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const FOOTER_HEIGHT: u16 = 2;
const FIELD_MIN_WIDTH: u16 = 20;

/// Areas produced by [`split_scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLayout {
    pub field: Rect,
    pub footer: Rect,
    /// Inside of the side panel's own border.
    pub panel: Rect,
}

/// Draw the outer and panel borders and carve the remaining space.
pub fn split_scene(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border: Color,
    field_min_height: u16,
    panel_width: u16,
) -> SceneLayout {
    frame.render_widget(Clear, area);
    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let [left, right] = columns(inner, panel_width);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(field_min_height),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(left);

    let panel_block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let panel = panel_block.inner(right);
    frame.render_widget(panel_block, right);

    SceneLayout {
        field: rows[0],
        footer: rows[1],
        panel,
    }
}

fn columns(area: Rect, panel_width: u16) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(FIELD_MIN_WIDTH),
            Constraint::Length(panel_width),
        ])
        .split(area);
    [chunks[0], chunks[1]]
}

/// Footer: a centred headline, then `[key] action` hints.
pub fn render_footer(
    frame: &mut Frame,
    area: Rect,
    headline: &str,
    color: Color,
    hints: &[(&str, &str)],
) {
    if area.height == 0 {
        return;
    }
    frame.render_widget(
        Paragraph::new(headline)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center),
        Rect { height: 1, ..area },
    );

    if area.height < FOOTER_HEIGHT || hints.is_empty() {
        return;
    }
    let spans: Vec<Span> = hints
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let gap = if i == 0 { "" } else { "  " };
            [
                Span::raw(gap),
                Span::styled(*key, Style::default().fg(Color::White)),
                Span::styled(format!(" {}", action), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}
