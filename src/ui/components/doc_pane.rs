use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::state::setting::Setting;
use crate::ui::components::setting_toggle::SettingToggle;
use crate::ui::theme::Theme;
use crate::view::surface::{DocNode, DocPane};

pub struct DocPaneWidget<'a> {
    pane: &'a DocPane,
    setting: &'a Setting,
    theme: &'a Theme,
    scroll: u16,
}

impl<'a> DocPaneWidget<'a> {
    pub fn new(pane: &'a DocPane, setting: &'a Setting, theme: &'a Theme) -> Self {
        Self {
            pane,
            setting,
            theme,
            scroll: 0,
        }
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let mut lines = Vec::new();
        for (i, node) in self.pane.nodes.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            match node {
                DocNode::SettingsControl => lines.push(SettingToggle::line(self.setting, self.theme)),
                DocNode::Block(text) => {
                    for raw in text.lines() {
                        let line = match raw.strip_prefix('#') {
                            Some(heading) => Line::from(Span::styled(
                                heading.trim_start_matches('#').trim().to_string(),
                                Style::default()
                                    .fg(colors.heading())
                                    .add_modifier(Modifier::BOLD),
                            )),
                            None => Line::from(Span::styled(
                                raw.to_string(),
                                Style::default().fg(colors.fg()),
                            )),
                        };
                        lines.push(line);
                    }
                }
            }
        }
        lines
    }
}

impl Widget for DocPaneWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Document ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_line_sits_after_first_block() {
        let theme = Theme::default();
        let setting = Setting::default();
        let mut pane = DocPane::default();
        pane.replace("# Title\n\nbody text");
        pane.attach_settings();

        let widget = DocPaneWidget::new(&pane, &setting, &theme);
        let text: Vec<String> = widget
            .lines()
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(text[0], "Title");
        assert!(text[2].contains("[e] editor"));
        assert_eq!(text[4], "body text");
    }
}
