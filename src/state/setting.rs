use crate::reactive::{Notifier, SubscriptionId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingField {
    Editor,
    Console,
}

/// User preferences for the optional panels.
pub struct Setting {
    editor: bool,
    console: bool,
    notifier: Notifier<SettingField, bool>,
}

impl Setting {
    pub fn new(editor: bool, console: bool) -> Self {
        Self {
            editor,
            console,
            notifier: Notifier::new(),
        }
    }

    pub fn editor(&self) -> bool {
        self.editor
    }

    pub fn console(&self) -> bool {
        self.console
    }

    pub fn get(&self, field: SettingField) -> bool {
        match field {
            SettingField::Editor => self.editor,
            SettingField::Console => self.console,
        }
    }

    pub fn on<H>(&mut self, field: SettingField, handler: H) -> SubscriptionId
    where
        H: FnMut(&bool) + 'static,
    {
        self.notifier.subscribe(field, handler)
    }

    pub fn set(&mut self, field: SettingField, value: bool) {
        let slot = match field {
            SettingField::Editor => &mut self.editor,
            SettingField::Console => &mut self.console,
        };
        if *slot != value {
            *slot = value;
            self.notifier.notify(field, &value);
        }
    }

    pub fn toggle(&mut self, field: SettingField) {
        let value = !self.get(field);
        self.set(field, value);
    }
}

impl Default for Setting {
    fn default() -> Self {
        Self::new(true, true)
    }
}
