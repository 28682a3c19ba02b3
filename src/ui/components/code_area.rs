use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;
use crate::view::surface::CodeArea;

pub struct CodeAreaWidget<'a> {
    area: &'a CodeArea,
    theme: &'a Theme,
}

impl<'a> CodeAreaWidget<'a> {
    pub fn new(area: &'a CodeArea, theme: &'a Theme) -> Self {
        Self { area, theme }
    }
}

impl Widget for CodeAreaWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.area.visible {
            return;
        }
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Code ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.code_bg()));

        Paragraph::new(self.area.body.trim_end_matches('\n'))
            .style(Style::default().fg(colors.code_fg()))
            .block(block)
            .render(area, buf);
    }
}
