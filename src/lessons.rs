use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/lessons/"]
pub(crate) struct LessonAssets;

/// Stored bodies of one chapter overview or section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonBody {
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub exercise: Option<String>,
}

/// Where the view gets document and code bodies from.
pub trait LessonSource {
    fn load(&self, chapter: &str, section: Option<&str>) -> Result<LessonBody>;
}

/// On-disk layout of `<chapter>.toml`: the chapter overview at the top level,
/// one table per section under `[sections.<id>]`.
#[derive(Clone, Debug, Default, Deserialize)]
struct ChapterFile {
    #[serde(flatten)]
    overview: LessonBody,
    #[serde(default)]
    sections: BTreeMap<String, LessonBody>,
}

/// Lesson bodies from a user directory, falling back to the bundled set.
#[derive(Clone, Debug, Default)]
pub struct LessonLibrary {
    dir: Option<PathBuf>,
}

impl LessonLibrary {
    pub fn bundled() -> Self {
        Self { dir: None }
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir: Some(dir) }
    }

    fn read_chapter(&self, chapter: &str) -> Result<ChapterFile> {
        let filename = format!("{chapter}.toml");

        if let Some(ref dir) = self.dir {
            let path = dir.join(&filename);
            if path.exists() {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                return toml::from_str(&content)
                    .with_context(|| format!("invalid lesson file {}", path.display()));
            }
        }

        match LessonAssets::get(&filename) {
            Some(file) => {
                let content = std::str::from_utf8(file.data.as_ref())?;
                toml::from_str(content).with_context(|| format!("invalid bundled lesson {filename}"))
            }
            None => {
                log::warn!("no lesson file for chapter {chapter}");
                Ok(ChapterFile::default())
            }
        }
    }
}

impl LessonSource for LessonLibrary {
    fn load(&self, chapter: &str, section: Option<&str>) -> Result<LessonBody> {
        let mut file = self.read_chapter(chapter)?;
        let body = match section {
            None => file.overview,
            Some(sec) => file.sections.remove(sec).unwrap_or_else(|| {
                log::warn!("chapter {chapter} has no stored body for section {sec}");
                LessonBody::default()
            }),
        };
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_user_dir_overrides_bundled() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("intro.toml"),
            r#"
doc = "overview"

[sections.a]
doc = "section a"
code = "let x = 1;"
exercise = "print x"
"#,
        )
        .unwrap();

        let library = LessonLibrary::with_dir(dir.path().to_path_buf());
        let overview = library.load("intro", None).unwrap();
        assert_eq!(overview.doc, "overview");
        assert_eq!(overview.code, "");

        let section = library.load("intro", Some("a")).unwrap();
        assert_eq!(section.doc, "section a");
        assert_eq!(section.code, "let x = 1;");
        assert_eq!(section.exercise.as_deref(), Some("print x"));
    }

    #[test]
    fn test_missing_section_body_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("intro.toml"), "doc = \"overview\"\n").unwrap();
        let library = LessonLibrary::with_dir(dir.path().to_path_buf());
        assert_eq!(library.load("intro", Some("zz")).unwrap(), LessonBody::default());
    }

    #[test]
    fn test_invalid_lesson_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.toml"), "doc = [").unwrap();
        let library = LessonLibrary::with_dir(dir.path().to_path_buf());
        let err = library.load("broken", None).unwrap_err();
        assert!(err.to_string().contains("invalid lesson file"));
    }
}
