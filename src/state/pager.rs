use crate::toc::TableOfContents;

pub type Position = (String, Option<String>);

/// Reading position shared by the top and bottom pager bars.
pub struct Pager {
    order: Vec<Position>,
    current: Option<usize>,
}

impl Pager {
    pub fn new(toc: &TableOfContents) -> Self {
        Self {
            order: toc.reading_order(),
            current: None,
        }
    }

    pub fn update(&mut self, chapter: &str, section: Option<&str>) {
        self.current = self
            .order
            .iter()
            .position(|(ch, sec)| ch == chapter && sec.as_deref() == section);
    }

    pub fn position(&self) -> Option<&Position> {
        self.current.map(|i| &self.order[i])
    }

    pub fn index(&self) -> Option<usize> {
        self.current
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn prev(&self) -> Option<&Position> {
        let i = self.current?;
        i.checked_sub(1).map(|p| &self.order[p])
    }

    pub fn next(&self) -> Option<&Position> {
        let i = self.current?;
        self.order.get(i + 1)
    }

    pub fn progress(&self) -> f64 {
        match self.current {
            Some(i) if self.order.len() > 1 => i as f64 / (self.order.len() - 1) as f64,
            Some(_) => 1.0,
            None => 0.0,
        }
    }
}
