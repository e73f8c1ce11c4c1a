//! Dashboard footer component
//!
//! Renders the key bindings of the current screen

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render footer with the screen's key hints.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, hints: &str) {
    let footer = Paragraph::new(hints.to_string())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
