use std::rc::Rc;

use crate::lessons::LessonSource;

/// The console panel as the controller sees it.
pub trait ConsolePanel {
    /// Prepare for `(chapter, section)`; returns whether the console can serve it.
    fn update(&mut self, chapter: &str, section: &str) -> bool;
    fn render(&mut self);
    fn lines(&self) -> &[String];
}

/// Console that is available whenever the section defines an exercise.
pub struct ExerciseConsole {
    lessons: Rc<dyn LessonSource>,
    exercise: Option<String>,
    lines: Vec<String>,
}

impl ExerciseConsole {
    pub fn new(lessons: Rc<dyn LessonSource>) -> Self {
        Self {
            lessons,
            exercise: None,
            lines: Vec::new(),
        }
    }

    pub fn exercise(&self) -> Option<&str> {
        self.exercise.as_deref()
    }
}

impl ConsolePanel for ExerciseConsole {
    fn update(&mut self, chapter: &str, section: &str) -> bool {
        self.exercise = match self.lessons.load(chapter, Some(section)) {
            Ok(body) => body.exercise.filter(|e| !e.trim().is_empty()),
            Err(e) => {
                log::warn!("console could not load {chapter}/{section}: {e:#}");
                None
            }
        };
        self.render();
        self.exercise.is_some()
    }

    fn render(&mut self) {
        self.lines.clear();
        if let Some(ref exercise) = self.exercise {
            self.lines
                .extend(exercise.lines().map(|l| format!("# {l}")));
        }
        self.lines.push("> ".to_string());
    }

    fn lines(&self) -> &[String] {
        &self.lines
    }
}
