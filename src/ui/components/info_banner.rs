use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;
use crate::view::banner::decode_banner_title;
use crate::view::surface::InfoBanner;

pub struct InfoBannerWidget<'a> {
    banner: &'a InfoBanner,
    theme: &'a Theme,
}

impl<'a> InfoBannerWidget<'a> {
    pub fn new(banner: &'a InfoBanner, theme: &'a Theme) -> Self {
        Self { banner, theme }
    }
}

impl Widget for InfoBannerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.banner.visible {
            return;
        }
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.banner_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", self.banner.chapter),
                Style::default().fg(colors.dim()),
            ),
            Span::styled(
                decode_banner_title(&self.banner.title),
                Style::default()
                    .fg(colors.banner_fg())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(line)
            .alignment(Alignment::Left)
            .render(inner, buf);
    }
}
