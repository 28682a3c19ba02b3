use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::state::pager::{Pager, Position};
use crate::toc::TableOfContents;
use crate::ui::theme::Theme;

/// One-line pager: previous link, progress through the book, next link.
pub struct PagerBar<'a> {
    pager: &'a Pager,
    toc: &'a TableOfContents,
    theme: &'a Theme,
}

impl<'a> PagerBar<'a> {
    pub fn new(pager: &'a Pager, toc: &'a TableOfContents, theme: &'a Theme) -> Self {
        Self { pager, toc, theme }
    }

    fn title_of(&self, position: &Position) -> String {
        let (chapter, section) = position;
        let Ok(entry) = self.toc.chapter(chapter) else {
            return chapter.clone();
        };
        match section {
            Some(sec) => entry
                .section(sec)
                .map(|s| s.display_title().to_string())
                .unwrap_or_else(|_| sec.clone()),
            None => entry.title.clone(),
        }
    }

    fn prev_label(&self) -> String {
        self.pager
            .prev()
            .map(|p| format!("‹ {}", self.title_of(p)))
            .unwrap_or_default()
    }

    fn next_label(&self) -> String {
        self.pager
            .next()
            .map(|p| format!("{} ›", self.title_of(p)))
            .unwrap_or_default()
    }
}

impl Widget for PagerBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.pager.is_empty() {
            return;
        }
        let colors = &self.theme.colors;

        let prev = self.prev_label();
        let next = self.next_label();
        let prev_w = prev.chars().count() as u16;
        let next_w = next.chars().count() as u16;

        buf.set_string(area.x, area.y, &prev, Style::default().fg(colors.accent()));
        let next_x = area.x + area.width.saturating_sub(next_w);
        buf.set_string(next_x, area.y, &next, Style::default().fg(colors.accent()));

        // Progress bar in whatever room is left between the two links.
        let bar_x = area.x + prev_w + 2;
        let bar_end = next_x.saturating_sub(2);
        if bar_end <= bar_x {
            return;
        }
        let bar_w = bar_end - bar_x;
        let filled = (self.pager.progress() * bar_w as f64) as u16;
        for x in bar_x..bar_end {
            let style = if x < bar_x + filled {
                Style::default().bg(colors.bar_filled())
            } else {
                Style::default().bg(colors.bar_empty())
            };
            buf[(x, area.y)].set_style(style);
        }

        let label = match self.pager.index() {
            Some(i) => format!("{}/{}", i + 1, self.pager.len()),
            None => format!("-/{}", self.pager.len()),
        };
        let label_x = bar_x + bar_w.saturating_sub(label.len() as u16) / 2;
        buf.set_string(label_x, area.y, &label, Style::default().fg(colors.fg()));
    }
}
