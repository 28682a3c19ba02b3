use std::cell::{Ref, RefCell};
use std::rc::Rc;

use serde::Serialize;

use crate::error::ViewError;
use crate::lessons::LessonSource;
use crate::state::content::{Content, ContentChange, ContentField};
use crate::state::pager::{Pager, Position};
use crate::state::setting::{Setting, SettingField};
use crate::toc::TableOfContents;
use crate::view::banner::format_banner_title;
use crate::view::console::ConsolePanel;
use crate::view::surface::{CodeArea, DocPane, PanelGate, Surface};

/// Code bodies shorter than this are treated as "no code".
pub const DEFAULT_CODE_THRESHOLD: usize = 50;

#[derive(Clone, Copy, Debug)]
pub struct ControllerOptions {
    pub code_threshold: usize,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            code_threshold: DEFAULT_CODE_THRESHOLD,
        }
    }
}

/// State of the whole view, for `--dump` and tests.
#[derive(Clone, Debug, Serialize)]
pub struct ViewSnapshot {
    pub position: Option<Position>,
    pub has_editor: bool,
    pub has_console: bool,
    pub setting_editor: bool,
    pub setting_console: bool,
    pub surface: Surface,
}

/// Keeps the lesson panels in sync with the current section and the user's
/// panel settings.
pub struct ContentController {
    toc: Rc<TableOfContents>,
    lessons: Rc<dyn LessonSource>,
    content: Content,
    setting: Setting,
    pager: Rc<RefCell<Pager>>,
    console: Rc<RefCell<dyn ConsolePanel>>,
    surface: Rc<RefCell<Surface>>,
    code_threshold: usize,
}

impl ContentController {
    pub fn new(
        toc: Rc<TableOfContents>,
        lessons: Rc<dyn LessonSource>,
        console: Rc<RefCell<dyn ConsolePanel>>,
        setting: Setting,
        options: ControllerOptions,
    ) -> Self {
        let surface = Rc::new(RefCell::new(Surface {
            editor: PanelGate::new(setting.editor()),
            console: PanelGate::new(setting.console()),
            ..Surface::default()
        }));
        let pager = Rc::new(RefCell::new(Pager::new(&toc)));

        let mut controller = Self {
            toc,
            lessons,
            content: Content::new(),
            setting,
            pager,
            console,
            surface,
            code_threshold: options.code_threshold,
        };
        controller.observe();
        controller
    }

    fn observe(&mut self) {
        let surface = Rc::clone(&self.surface);
        self.content.on(ContentField::Doc, move |change| {
            if let ContentChange::Doc(doc) = change {
                render_doc(&mut surface.borrow_mut().doc, doc);
            }
        });

        let surface = Rc::clone(&self.surface);
        let threshold = self.code_threshold;
        self.content.on(ContentField::Code, move |change| {
            if let ContentChange::Code(code) = change {
                render_code(&mut surface.borrow_mut().code_area, code, threshold);
            }
        });

        let surface = Rc::clone(&self.surface);
        self.content.on(ContentField::HasEditor, move |change| {
            if let ContentChange::HasEditor(eligible) = change {
                let mut surface = surface.borrow_mut();
                surface.editor.eligible = *eligible;
                toggle(&mut surface.editor, "editor");
            }
        });

        let surface = Rc::clone(&self.surface);
        self.content.on(ContentField::HasConsole, move |change| {
            if let ContentChange::HasConsole(eligible) = change {
                let mut surface = surface.borrow_mut();
                surface.console.eligible = *eligible;
                toggle(&mut surface.console, "console");
            }
        });

        let surface = Rc::clone(&self.surface);
        self.setting.on(SettingField::Editor, move |enabled| {
            let mut surface = surface.borrow_mut();
            surface.editor.enabled = *enabled;
            toggle(&mut surface.editor, "editor");
        });

        let surface = Rc::clone(&self.surface);
        self.setting.on(SettingField::Console, move |enabled| {
            let mut surface = surface.borrow_mut();
            surface.console.enabled = *enabled;
            toggle(&mut surface.console, "console");
        });
    }

    /// Show the fixed panels and draw the console.
    pub fn render(&mut self) {
        self.console.borrow_mut().render();
        let mut surface = self.surface.borrow_mut();
        surface.info.visible = true;
        render_code(&mut surface.code_area, self.content.code(), self.code_threshold);
    }

    /// Show `(chapter, section)`. `None` is the chapter overview, which never
    /// has an editor or console.
    ///
    /// Every lookup happens before any state changes, so a failed navigation
    /// leaves the view as it was.
    pub fn navigate(&mut self, chapter: &str, section: Option<&str>) -> Result<(), ViewError> {
        let toc = Rc::clone(&self.toc);
        let entry = toc.chapter(chapter)?;
        let toc_section = section.map(|sec| entry.section(sec)).transpose()?;
        let body = self.lessons.load(chapter, section)?;

        log::debug!("navigate {chapter}/{}", section.unwrap_or("-"));

        self.pager.borrow_mut().update(chapter, section);

        {
            let mut surface = self.surface.borrow_mut();
            surface.info.chapter = chapter.to_string();
            surface.info.title = format_banner_title(&entry.title);
        }

        let (has_console, has_editor) = match toc_section {
            Some(sec) => {
                let available = self.console.borrow_mut().update(chapter, &sec.sec);
                (available && !sec.console_disabled(), sec.declares_editor())
            }
            None => (false, false),
        };
        self.content.set_has_console(has_console);
        self.content.set_has_editor(has_editor);

        self.content.update(&body);
        Ok(())
    }

    pub fn navigate_next(&mut self) -> Result<bool, ViewError> {
        let target = self.pager.borrow().next().cloned();
        self.navigate_to(target)
    }

    pub fn navigate_prev(&mut self) -> Result<bool, ViewError> {
        let target = self.pager.borrow().prev().cloned();
        self.navigate_to(target)
    }

    fn navigate_to(&mut self, target: Option<Position>) -> Result<bool, ViewError> {
        match target {
            Some((chapter, section)) => {
                self.navigate(&chapter, section.as_deref())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn toc(&self) -> &TableOfContents {
        &self.toc
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn setting(&self) -> &Setting {
        &self.setting
    }

    /// For the settings panel; the controller reacts to whatever it changes.
    pub fn setting_mut(&mut self) -> &mut Setting {
        &mut self.setting
    }

    pub fn pager(&self) -> Rc<RefCell<Pager>> {
        Rc::clone(&self.pager)
    }

    pub fn console(&self) -> Rc<RefCell<dyn ConsolePanel>> {
        Rc::clone(&self.console)
    }

    pub fn surface(&self) -> Ref<'_, Surface> {
        self.surface.borrow()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            position: self.pager.borrow().position().cloned(),
            has_editor: self.content.has_editor(),
            has_console: self.content.has_console(),
            setting_editor: self.setting.editor(),
            setting_console: self.setting.console(),
            surface: self.surface.borrow().clone(),
        }
    }
}

fn render_doc(pane: &mut DocPane, doc: &str) {
    pane.detach_settings();
    pane.replace(doc);
    pane.attach_settings();
}

fn render_code(area: &mut CodeArea, code: &str, threshold: usize) {
    if code.chars().count() < threshold {
        area.visible = false;
    } else {
        area.visible = true;
        area.body = code.to_string();
    }
}

fn toggle(gate: &mut PanelGate, name: &str) {
    gate.refresh();
    log::debug!("{name} panel visible: {}", gate.visible);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::lessons::LessonBody;
    use crate::view::surface::DocNode;
    use std::collections::HashMap;

    const TOC: &str = r#"{ "chapters": [
        { "id": "ch1", "title": "my chapter", "sections": [
            { "sec": "plain" },
            { "sec": "edit", "editor": true },
            { "sec": "noconsole", "console": false, "editor": true },
            { "sec": "both", "editor": true, "console": true }
        ]},
        { "id": "ch2", "title": "second", "sections": [{ "sec": "a" }] }
    ]}"#;

    struct MapSource(HashMap<(String, Option<String>), LessonBody>);

    impl LessonSource for MapSource {
        fn load(&self, chapter: &str, section: Option<&str>) -> anyhow::Result<LessonBody> {
            let key = (chapter.to_string(), section.map(str::to_string));
            Ok(self.0.get(&key).cloned().unwrap_or_default())
        }
    }

    struct StubConsole {
        available: bool,
        calls: Vec<(String, String)>,
        lines: Vec<String>,
    }

    impl ConsolePanel for StubConsole {
        fn update(&mut self, chapter: &str, section: &str) -> bool {
            self.calls.push((chapter.to_string(), section.to_string()));
            self.available
        }

        fn render(&mut self) {
            self.lines = vec!["> ".to_string()];
        }

        fn lines(&self) -> &[String] {
            &self.lines
        }
    }

    fn body(doc: &str, code: &str) -> LessonBody {
        LessonBody {
            doc: doc.to_string(),
            code: code.to_string(),
            exercise: None,
        }
    }

    fn setup(available: bool, setting: Setting) -> (ContentController, Rc<RefCell<StubConsole>>) {
        let mut bodies = HashMap::new();
        bodies.insert(
            ("ch1".to_string(), Some("plain".to_string())),
            body("# Plain\n\nText", &"x".repeat(49)),
        );
        bodies.insert(
            ("ch1".to_string(), Some("edit".to_string())),
            body("# Edit\n\nMore text", &"y".repeat(50)),
        );
        bodies.insert(
            ("ch1".to_string(), Some("both".to_string())),
            body("# Both\n\nPanels", &"z".repeat(60)),
        );
        bodies.insert(("ch1".to_string(), None), body("Overview", ""));

        let console = Rc::new(RefCell::new(StubConsole {
            available,
            calls: Vec::new(),
            lines: Vec::new(),
        }));
        let toc = Rc::new(TableOfContents::from_json(TOC).unwrap());
        let controller = ContentController::new(
            toc,
            Rc::new(MapSource(bodies)),
            console.clone(),
            setting,
            ControllerOptions::default(),
        );
        (controller, console)
    }

    #[test]
    fn test_navigate_sets_bodies_and_flags() {
        let (mut c, _) = setup(true, Setting::default());
        c.navigate("ch1", Some("edit")).unwrap();

        assert_eq!(c.content().doc(), "# Edit\n\nMore text");
        assert_eq!(c.content().code(), "y".repeat(50));
        assert!(c.content().has_editor());
        assert!(c.content().has_console());
        assert_eq!(c.surface().info.title, "MY&nbsp;CHAPTER");
        assert_eq!(
            c.pager().borrow().position(),
            Some(&("ch1".to_string(), Some("edit".to_string())))
        );
    }

    #[test]
    fn test_code_threshold_boundary() {
        let (mut c, _) = setup(true, Setting::default());
        c.navigate("ch1", Some("edit")).unwrap();
        assert!(c.surface().code_area.visible);
        assert_eq!(c.surface().code_area.body, "y".repeat(50));

        c.navigate("ch1", Some("plain")).unwrap();
        assert!(!c.surface().code_area.visible);
    }

    #[test]
    fn test_settings_control_follows_first_block() {
        let (mut c, _) = setup(true, Setting::default());
        c.navigate("ch1", Some("plain")).unwrap();
        c.navigate("ch1", Some("edit")).unwrap();

        let nodes = c.surface().doc.nodes.clone();
        assert_eq!(nodes[0], DocNode::Block("# Edit".to_string()));
        assert_eq!(nodes[1], DocNode::SettingsControl);
        assert_eq!(
            nodes.iter().filter(|n| **n == DocNode::SettingsControl).count(),
            1
        );
    }

    #[test]
    fn test_console_override_in_toc() {
        let (mut c, console) = setup(true, Setting::default());
        c.navigate("ch1", Some("noconsole")).unwrap();
        assert!(!c.content().has_console());
        assert!(c.content().has_editor());
        assert_eq!(console.borrow().calls.len(), 1);
    }

    #[test]
    fn test_console_unavailable_beats_toc_flag() {
        let (mut c, _) = setup(false, Setting::default());
        c.navigate("ch1", Some("both")).unwrap();
        assert!(!c.content().has_console());
        assert!(!c.surface().console.visible);
    }

    #[test]
    fn test_chapter_overview_forces_flags_off() {
        let (mut c, console) = setup(true, Setting::default());
        c.navigate("ch1", Some("both")).unwrap();
        assert!(c.surface().editor.visible);
        assert!(c.surface().console.visible);

        c.navigate("ch1", None).unwrap();
        assert!(!c.content().has_editor());
        assert!(!c.content().has_console());
        assert!(!c.surface().editor.visible);
        assert!(!c.surface().console.visible);
        assert_eq!(console.borrow().calls.len(), 1);
    }

    #[test]
    fn test_setting_toggle_takes_effect_without_navigation() {
        let (mut c, _) = setup(true, Setting::default());
        c.navigate("ch1", Some("both")).unwrap();

        c.setting_mut().toggle(SettingField::Editor);
        assert!(!c.surface().editor.visible);
        assert!(c.surface().console.visible);

        c.setting_mut().toggle(SettingField::Editor);
        assert!(c.surface().editor.visible);
    }

    #[test]
    fn test_visibility_is_conjunction_in_either_order() {
        let sections = [
            ("plain", false, true),
            ("edit", true, true),
            ("noconsole", true, false),
        ];
        for (sec, has_editor, has_console) in sections {
            for editor in [false, true] {
                for console in [false, true] {
                    // Settings first, then navigation.
                    let (mut c, _) = setup(true, Setting::new(editor, console));
                    c.navigate("ch1", Some(sec)).unwrap();
                    assert_eq!(c.surface().editor.visible, has_editor && editor);
                    assert_eq!(c.surface().console.visible, has_console && console);

                    // Navigation first, then settings.
                    let (mut c, _) = setup(true, Setting::new(!editor, !console));
                    c.navigate("ch1", Some(sec)).unwrap();
                    c.setting_mut().set(SettingField::Editor, editor);
                    c.setting_mut().set(SettingField::Console, console);
                    assert_eq!(c.surface().editor.visible, has_editor && editor);
                    assert_eq!(c.surface().console.visible, has_console && console);
                }
            }
        }
    }

    #[test]
    fn test_navigate_twice_is_idempotent() {
        let (mut c, _) = setup(true, Setting::default());
        c.navigate("ch1", Some("edit")).unwrap();
        let once = serde_json::to_string(&c.snapshot()).unwrap();
        c.navigate("ch1", Some("edit")).unwrap();
        let twice = serde_json::to_string(&c.snapshot()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_targets_leave_state_untouched() {
        let (mut c, console) = setup(true, Setting::default());
        c.navigate("ch1", Some("edit")).unwrap();
        let before = serde_json::to_string(&c.snapshot()).unwrap();

        let err = c.navigate("nope", None).unwrap_err();
        assert_eq!(err.lookup(), Some(&LookupError::ChapterNotFound("nope".to_string())));

        let err = c.navigate("ch1", Some("zz")).unwrap_err();
        assert!(matches!(err.lookup(), Some(LookupError::SectionNotFound { .. })));

        assert_eq!(serde_json::to_string(&c.snapshot()).unwrap(), before);
        assert_eq!(console.borrow().calls.len(), 1);
    }

    #[test]
    fn test_render_shows_banner_and_hides_empty_code() {
        let (mut c, console) = setup(true, Setting::default());
        c.render();
        assert!(c.surface().info.visible);
        assert!(!c.surface().code_area.visible);
        assert_eq!(console.borrow().lines(), ["> "]);
    }

    #[test]
    fn test_pager_stepping() {
        let (mut c, _) = setup(true, Setting::default());
        c.navigate("ch1", None).unwrap();
        assert!(!c.navigate_prev().unwrap());
        assert!(c.navigate_next().unwrap());
        assert_eq!(c.content().doc(), "# Plain\n\nText");
        assert_eq!(c.surface().info.chapter, "ch1");
    }

    #[test]
    fn test_flags_change_before_bodies() {
        let (mut c, _) = setup(true, Setting::default());
        c.navigate("ch1", Some("both")).unwrap();
        assert!(c.surface().editor.visible);

        let seen = Rc::new(RefCell::new(Vec::new()));
        for field in [
            ContentField::Doc,
            ContentField::Code,
            ContentField::HasEditor,
            ContentField::HasConsole,
        ] {
            let s = Rc::clone(&seen);
            c.content.on(field, move |change| s.borrow_mut().push(change.clone()));
        }
        // Panel state as the document reaction sees it.
        let at_doc = Rc::new(RefCell::new(None));
        let (surface, a) = (Rc::clone(&c.surface), Rc::clone(&at_doc));
        c.content.on(ContentField::Doc, move |_| {
            let surface = surface.borrow();
            *a.borrow_mut() = Some((surface.editor.eligible, surface.console.eligible));
        });

        c.navigate("ch1", None).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                ContentChange::HasConsole(false),
                ContentChange::HasEditor(false),
                ContentChange::Doc("Overview".to_string()),
                ContentChange::Code(String::new()),
            ]
        );
        assert_eq!(*at_doc.borrow(), Some((false, false)));
        assert!(!c.surface().editor.visible);
    }
}
