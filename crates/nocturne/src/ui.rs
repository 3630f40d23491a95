//! Foreground text drawn over the sky.
//!
//! Styles set only a foreground colour so the sky's background colours show
//! through behind the text.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Paragraph, Widget},
};

const TITLE_COLOR: Color = Color::Rgb(196, 181, 253);
const TEXT_COLOR: Color = Color::Rgb(226, 232, 240);
const DIM_COLOR: Color = Color::Rgb(120, 113, 160);

/// Title, local time and the key help line.
#[derive(Debug, Clone)]
pub struct Foreground {
    pub now: DateTime<Local>,
}

impl Widget for &Foreground {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Title
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Time
            Constraint::Length(1), // Date
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(area);

        Paragraph::new(Line::from("n o c t u r n e".bold().fg(TITLE_COLOR)))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        Paragraph::new(self.now.format("%H:%M:%S").to_string())
            .style(Style::new().fg(TEXT_COLOR))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(self.now.format("%A, %B %d, %Y").to_string())
            .style(Style::new().fg(DIM_COLOR))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        Line::from(vec![
            "q".bold().fg(TITLE_COLOR),
            " / ".fg(DIM_COLOR),
            "esc".bold().fg(TITLE_COLOR),
            " quit".fg(DIM_COLOR),
        ])
        .centered()
        .render(chunks[6], buf);
    }
}
