use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// Scratch buffer behind the editor panel. Starts from the section's code.
#[derive(Clone, Debug, Default)]
pub struct EditorBuffer {
    lines: Vec<String>,
}

impl EditorBuffer {
    pub fn reset(&mut self, text: &str) {
        self.lines = text.trim_end_matches('\n').lines().map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
    }

    pub fn insert(&mut self, ch: char) {
        match self.lines.last_mut() {
            Some(line) => line.push(ch),
            None => self.lines.push(ch.to_string()),
        }
    }

    pub fn newline(&mut self) {
        self.lines.push(String::new());
    }

    pub fn backspace(&mut self) {
        let Some(line) = self.lines.last_mut() else {
            return;
        };
        if line.pop().is_none() && self.lines.len() > 1 {
            self.lines.pop();
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

pub struct EditorAreaWidget<'a> {
    buffer: &'a EditorBuffer,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> EditorAreaWidget<'a> {
    pub fn new(buffer: &'a EditorBuffer, focused: bool, theme: &'a Theme) -> Self {
        Self {
            buffer,
            focused,
            theme,
        }
    }
}

impl Widget for EditorAreaWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let border = if self.focused {
            colors.accent()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .title(if self.focused { " Editor (Tab to leave) " } else { " Editor " })
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));

        let inner_height = area.height.saturating_sub(2) as usize;
        let skip = self.buffer.lines().len().saturating_sub(inner_height);
        let mut lines: Vec<Line> = self
            .buffer
            .lines()
            .iter()
            .skip(skip)
            .map(|l| Line::from(Span::styled(l.as_str(), Style::default().fg(colors.fg()))))
            .collect();
        if self.focused && let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(
                " ",
                Style::default().bg(colors.fg()).add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut buffer = EditorBuffer::default();
        buffer.reset("fn main() {\n}\n");
        assert_eq!(buffer.lines().len(), 2);

        buffer.newline();
        buffer.insert('x');
        assert_eq!(buffer.text(), "fn main() {\n}\nx");

        buffer.backspace();
        buffer.backspace();
        buffer.backspace();
        assert_eq!(buffer.text(), "fn main() {\n");
    }

    #[test]
    fn test_reset_empty_keeps_one_line() {
        let mut buffer = EditorBuffer::default();
        buffer.reset("");
        assert_eq!(buffer.lines(), [""]);
        buffer.backspace();
        assert_eq!(buffer.lines().len(), 1);
    }
}
