use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥100 cols: document left, side panels stacked on the right
    Narrow, // <100 cols: everything stacked under the document
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 100 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }
}

/// Which optional panels currently have room reserved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelFlags {
    pub code: bool,
    pub editor: bool,
    pub console: bool,
}

impl PanelFlags {
    fn count(&self) -> usize {
        [self.code, self.editor, self.console]
            .iter()
            .filter(|v| **v)
            .count()
    }
}

pub struct LessonLayout {
    pub banner: Rect,
    pub top_pager: Rect,
    pub doc: Rect,
    pub code: Option<Rect>,
    pub editor: Option<Rect>,
    pub console: Option<Rect>,
    pub bottom_pager: Rect,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl LessonLayout {
    pub fn new(area: Rect, panels: PanelFlags) -> Self {
        let tier = LayoutTier::from_area(area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let main = vertical[2];
        let (doc, side) = if panels.count() == 0 {
            (main, Vec::new())
        } else {
            match tier {
                LayoutTier::Wide => {
                    let horizontal = Layout::default()
                        .direction(Direction::Horizontal)
                        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                        .split(main);
                    let side = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints(
                            (0..panels.count())
                                .map(|_| Constraint::Ratio(1, panels.count() as u32))
                                .collect::<Vec<_>>(),
                        )
                        .split(horizontal[1]);
                    (horizontal[0], side.to_vec())
                }
                LayoutTier::Narrow => {
                    let mut constraints = vec![Constraint::Min(4)];
                    constraints.extend((0..panels.count()).map(|_| Constraint::Length(7)));
                    let stacked = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints(constraints)
                        .split(main);
                    (stacked[0], stacked[1..].to_vec())
                }
            }
        };

        let mut side = side.into_iter();
        let code = if panels.code { side.next() } else { None };
        let editor = if panels.editor { side.next() } else { None };
        let console = if panels.console { side.next() } else { None };

        Self {
            banner: vertical[0],
            top_pager: vertical[1],
            doc,
            code,
            editor,
            console,
            bottom_pager: vertical[3],
            footer: vertical[4],
            tier,
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width || !has_hint {
            current = candidate;
        } else {
            out.push(current);
            current = format!("{prefix}{hint}");
        }
        has_hint = true;
    }

    if has_hint {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_side_panels_gives_doc_full_width() {
        let layout = LessonLayout::new(Rect::new(0, 0, 120, 40), PanelFlags::default());
        assert_eq!(layout.doc.width, 120);
        assert!(layout.code.is_none() && layout.editor.is_none() && layout.console.is_none());
    }

    #[test]
    fn test_wide_puts_panels_on_the_right() {
        let panels = PanelFlags {
            code: true,
            editor: false,
            console: true,
        };
        let layout = LessonLayout::new(Rect::new(0, 0, 120, 40), panels);
        assert_eq!(layout.tier, LayoutTier::Wide);
        let code = layout.code.unwrap();
        let console = layout.console.unwrap();
        assert!(code.x > layout.doc.x);
        assert!(console.y > code.y);
        assert!(layout.editor.is_none());
    }

    #[test]
    fn test_narrow_stacks_panels_below_doc() {
        let panels = PanelFlags {
            code: false,
            editor: true,
            console: false,
        };
        let layout = LessonLayout::new(Rect::new(0, 0, 80, 40), panels);
        assert_eq!(layout.tier, LayoutTier::Narrow);
        assert!(layout.editor.unwrap().y > layout.doc.y);
    }

    #[test]
    fn test_pack_hint_lines_wraps() {
        let lines = pack_hint_lines(&["[n] Next", "[p] Prev", "[q] Quit"], 20);
        assert_eq!(lines, vec![" [n] Next  [p] Prev", " [q] Quit"]);
        assert!(pack_hint_lines(&[], 20).is_empty());
    }
}
