use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

pub struct ConsolePaneWidget<'a> {
    lines: &'a [String],
    theme: &'a Theme,
}

impl<'a> ConsolePaneWidget<'a> {
    pub fn new(lines: &'a [String], theme: &'a Theme) -> Self {
        Self { lines, theme }
    }
}

impl Widget for ConsolePaneWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Console ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.console_bg()));

        let lines: Vec<Line> = self.lines.iter().map(|l| Line::from(l.as_str())).collect();
        Paragraph::new(lines)
            .style(Style::default().fg(colors.console_fg()))
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
