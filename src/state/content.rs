use crate::lessons::LessonBody;
use crate::reactive::{Notifier, SubscriptionId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentField {
    Doc,
    Code,
    HasEditor,
    HasConsole,
}

/// The new value of whichever field changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentChange {
    Doc(String),
    Code(String),
    HasEditor(bool),
    HasConsole(bool),
}

/// Bodies and eligibility flags of the section on screen.
///
/// Setters only notify when the stored value actually changes, so re-applying
/// the same section is silent.
#[derive(Default)]
pub struct Content {
    doc: String,
    code: String,
    has_editor: bool,
    has_console: bool,
    notifier: Notifier<ContentField, ContentChange>,
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn has_editor(&self) -> bool {
        self.has_editor
    }

    pub fn has_console(&self) -> bool {
        self.has_console
    }

    pub fn on<H>(&mut self, field: ContentField, handler: H) -> SubscriptionId
    where
        H: FnMut(&ContentChange) + 'static,
    {
        self.notifier.subscribe(field, handler)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn set_doc(&mut self, doc: &str) {
        if self.doc != doc {
            self.doc = doc.to_string();
            self.notifier
                .notify(ContentField::Doc, &ContentChange::Doc(self.doc.clone()));
        }
    }

    pub fn set_code(&mut self, code: &str) {
        if self.code != code {
            self.code = code.to_string();
            self.notifier
                .notify(ContentField::Code, &ContentChange::Code(self.code.clone()));
        }
    }

    pub fn set_has_editor(&mut self, value: bool) {
        if self.has_editor != value {
            self.has_editor = value;
            self.notifier
                .notify(ContentField::HasEditor, &ContentChange::HasEditor(value));
        }
    }

    pub fn set_has_console(&mut self, value: bool) {
        if self.has_console != value {
            self.has_console = value;
            self.notifier
                .notify(ContentField::HasConsole, &ContentChange::HasConsole(value));
        }
    }

    /// Replace both bodies, document first.
    pub fn update(&mut self, body: &LessonBody) {
        self.set_doc(&body.doc);
        self.set_code(&body.code);
    }
}
