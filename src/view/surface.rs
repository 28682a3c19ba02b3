use serde::Serialize;

/// Everything the controller has decided about what is on screen.
///
/// Widgets draw from this; only controller reactions write to it.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Surface {
    pub info: InfoBanner,
    pub doc: DocPane,
    pub code_area: CodeArea,
    pub editor: PanelGate,
    pub console: PanelGate,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct InfoBanner {
    pub visible: bool,
    pub chapter: String,
    /// Banner markup, spaces already turned into `&nbsp;`.
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DocNode {
    Block(String),
    SettingsControl,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct DocPane {
    pub nodes: Vec<DocNode>,
}

impl DocPane {
    pub fn detach_settings(&mut self) {
        self.nodes.retain(|n| *n != DocNode::SettingsControl);
    }

    /// Swap in the top-level blocks of `doc`. Blocks are separated by blank lines.
    pub fn replace(&mut self, doc: &str) {
        self.nodes = doc
            .split("\n\n")
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(|b| DocNode::Block(b.to_string()))
            .collect();
    }

    /// Put the settings control right after the first child. No-op when the
    /// document is empty.
    pub fn attach_settings(&mut self) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        self.nodes.insert(1, DocNode::SettingsControl);
        true
    }

    pub fn settings_index(&self) -> Option<usize> {
        self.nodes.iter().position(|n| *n == DocNode::SettingsControl)
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct CodeArea {
    pub visible: bool,
    pub body: String,
}

/// Visibility of an optional panel: eligible for the section and enabled by
/// the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PanelGate {
    pub eligible: bool,
    pub enabled: bool,
    pub visible: bool,
}

impl PanelGate {
    pub fn new(enabled: bool) -> Self {
        Self {
            eligible: false,
            enabled,
            visible: false,
        }
    }

    pub fn refresh(&mut self) {
        self.visible = self.eligible && self.enabled;
    }
}
