use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use crate::config::Config;
use crate::error::ViewError;
use crate::lessons::{LessonLibrary, LessonSource};
use crate::state::setting::Setting;
use crate::toc::TableOfContents;
use crate::ui::components::editor_area::EditorBuffer;
use crate::ui::components::setting_toggle::SettingToggle;
use crate::ui::layout::PanelFlags;
use crate::ui::theme::Theme;
use crate::view::console::{ConsolePanel, ExerciseConsole};
use crate::view::controller::{ContentController, ControllerOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Document,
    Editor,
}

pub struct App {
    pub controller: ContentController,
    pub theme: Theme,
    pub config: Config,
    pub editor: EditorBuffer,
    pub focus: Focus,
    pub doc_scroll: u16,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, theme: Theme) -> Result<Self> {
        let lessons_dir = config.lessons_path();
        let toc = Rc::new(TableOfContents::load(lessons_dir.as_deref())?);
        let lessons: Rc<dyn LessonSource> = Rc::new(match lessons_dir {
            Some(dir) => LessonLibrary::with_dir(dir),
            None => LessonLibrary::bundled(),
        });
        let console: Rc<RefCell<dyn ConsolePanel>> =
            Rc::new(RefCell::new(ExerciseConsole::new(Rc::clone(&lessons))));
        let setting = Setting::new(config.show_editor, config.show_console);
        let options = ControllerOptions {
            code_threshold: config.code_threshold,
        };

        let mut controller = ContentController::new(toc, lessons, console, setting, options);
        controller.render();

        Ok(Self {
            controller,
            theme,
            config,
            editor: EditorBuffer::default(),
            focus: Focus::Document,
            doc_scroll: 0,
            status: None,
            should_quit: false,
        })
    }

    /// Open the requested position, defaulting to the configured start
    /// chapter or the first chapter. Lookup failures are returned as-is.
    pub fn start(&mut self, chapter: Option<&str>, section: Option<&str>) -> Result<(), ViewError> {
        let chapter = match chapter.or(self.config.start_chapter.as_deref()) {
            Some(ch) => ch.to_string(),
            None => match self.controller.toc().first_chapter() {
                Some(entry) => entry.id.clone(),
                None => return Ok(()),
            },
        };
        self.controller.navigate(&chapter, section)?;
        self.after_navigation();
        Ok(())
    }

    pub fn next(&mut self) {
        let moved = self.controller.navigate_next();
        self.settle(moved);
    }

    pub fn prev(&mut self) {
        let moved = self.controller.navigate_prev();
        self.settle(moved);
    }

    pub fn overview(&mut self) {
        let chapter = self
            .controller
            .pager()
            .borrow()
            .position()
            .map(|(ch, _)| ch.clone());
        if let Some(chapter) = chapter {
            let moved = self.controller.navigate(&chapter, None).map(|_| true);
            self.settle(moved);
        }
    }

    fn settle(&mut self, moved: Result<bool, ViewError>) {
        match moved {
            Ok(true) => self.after_navigation(),
            Ok(false) => {}
            Err(e) => {
                log::error!("navigation failed: {e:#}");
                self.status = Some(e.to_string());
            }
        }
    }

    fn after_navigation(&mut self) {
        self.status = None;
        self.doc_scroll = 0;
        self.editor.reset(self.controller.content().code());
        if !self.controller.surface().editor.visible {
            self.focus = Focus::Document;
        }
    }

    pub fn toggle_setting(&mut self, ch: char) {
        if SettingToggle::handle_key(self.controller.setting_mut(), ch)
            && !self.controller.surface().editor.visible
        {
            self.focus = Focus::Document;
        }
    }

    pub fn focus_editor(&mut self) {
        if self.controller.surface().editor.visible {
            self.focus = Focus::Editor;
        }
    }

    pub fn scroll_doc(&mut self, delta: i32) {
        self.doc_scroll = (self.doc_scroll as i32 + delta).max(0) as u16;
    }

    pub fn panel_flags(&self) -> PanelFlags {
        let surface = self.controller.surface();
        PanelFlags {
            code: surface.code_area.visible,
            editor: surface.editor.visible,
            console: surface.console.visible,
        }
    }
}
