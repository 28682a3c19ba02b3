use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::state::setting::{Setting, SettingField};
use crate::ui::theme::Theme;

/// The settings control embedded in the document.
pub struct SettingToggle;

impl SettingToggle {
    pub fn field_for_key(ch: char) -> Option<SettingField> {
        match ch {
            'e' => Some(SettingField::Editor),
            'c' => Some(SettingField::Console),
            _ => None,
        }
    }

    /// Flip the setting bound to `ch`. Returns whether a setting changed.
    pub fn handle_key(setting: &mut Setting, ch: char) -> bool {
        match Self::field_for_key(ch) {
            Some(field) => {
                setting.toggle(field);
                log::info!("{field:?} setting now {}", setting.get(field));
                true
            }
            None => false,
        }
    }

    pub fn line<'a>(setting: &Setting, theme: &Theme) -> Line<'a> {
        let colors = &theme.colors;
        let state = |on: bool| {
            if on {
                Span::styled("on ", Style::default().fg(colors.toggle_on()).add_modifier(Modifier::BOLD))
            } else {
                Span::styled("off", Style::default().fg(colors.toggle_off()))
            }
        };
        Line::from(vec![
            Span::styled("⚙ [e] editor ", Style::default().fg(colors.dim())),
            state(setting.editor()),
            Span::styled("  [c] console ", Style::default().fg(colors.dim())),
            state(setting.console()),
        ])
    }
}
