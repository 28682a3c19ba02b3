use thiserror::Error;

/// A navigation target that does not exist in the table of contents.
///
/// These are never recovered inside the view: they mean a broken link upstream
/// and are handed back to whoever asked for the navigation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("chapter `{0}` not found in table of contents")]
    ChapterNotFound(String),

    #[error("section `{section}` not found in chapter `{chapter}`")]
    SectionNotFound { chapter: String, section: String },
}

/// Why a navigation failed.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Load(#[from] anyhow::Error),
}

impl ViewError {
    pub fn lookup(&self) -> Option<&LookupError> {
        match self {
            ViewError::Lookup(e) => Some(e),
            ViewError::Load(_) => None,
        }
    }
}
