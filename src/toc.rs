use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::lessons::LessonAssets;

const TOC_FILE: &str = "toc.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableOfContents {
    pub chapters: Vec<TocEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<TocSection>,
}

/// Flags are tri-state: absent means "whatever the panel supports".
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TocSection {
    pub sec: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub editor: Option<bool>,
    #[serde(default)]
    pub console: Option<bool>,
}

impl TocSection {
    pub fn declares_editor(&self) -> bool {
        self.editor == Some(true)
    }

    pub fn console_disabled(&self) -> bool {
        self.console == Some(false)
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.sec)
    }
}

impl TocEntry {
    /// First section whose id matches.
    pub fn section(&self, sec: &str) -> Result<&TocSection, LookupError> {
        self.sections
            .iter()
            .find(|s| s.sec == sec)
            .ok_or_else(|| LookupError::SectionNotFound {
                chapter: self.id.clone(),
                section: sec.to_string(),
            })
    }
}

impl TableOfContents {
    pub fn from_json(content: &str) -> Result<Self> {
        let toc: TableOfContents =
            serde_json::from_str(content).context("invalid table of contents")?;
        Ok(toc)
    }

    /// The table shipped inside the binary.
    pub fn bundled() -> Result<Self> {
        let file = LessonAssets::get(TOC_FILE).context("bundled toc.json is missing")?;
        let content = std::str::from_utf8(file.data.as_ref())?;
        Self::from_json(content)
    }

    /// `<dir>/toc.json` when present, otherwise the bundled table.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        if let Some(dir) = dir {
            let path = dir.join(TOC_FILE);
            if path.exists() {
                log::info!("loading table of contents from {}", path.display());
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                return Self::from_json(&content);
            }
            log::warn!("{} not found, using bundled lessons", path.display());
        }
        Self::bundled()
    }

    pub fn chapter(&self, id: &str) -> Result<&TocEntry, LookupError> {
        self.chapters
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| LookupError::ChapterNotFound(id.to_string()))
    }

    pub fn first_chapter(&self) -> Option<&TocEntry> {
        self.chapters.first()
    }

    /// Every navigable position in reading order: each chapter overview
    /// followed by its sections. Repeated ids resolve to their first entry,
    /// so they get a single slot.
    pub fn reading_order(&self) -> Vec<(String, Option<String>)> {
        let mut order = Vec::new();
        for chapter in &self.chapters {
            let overview = (chapter.id.clone(), None);
            if order.contains(&overview) {
                continue;
            }
            order.push(overview);
            for section in &chapter.sections {
                let position = (chapter.id.clone(), Some(section.sec.clone()));
                if !order.contains(&position) {
                    order.push(position);
                }
            }
        }
        order
    }
}
