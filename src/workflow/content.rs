use serde::{Deserialize, Serialize};

/// The kind of an atomic instruction item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Warning,
    Check,
    Input,
    Formula,
}

/// A single atomic instruction inside a sub-process.
///
/// `required` is advisory: navigation never blocks on it, but
/// [`crate::progress::UserProgress::missing_required`] reports unmet items
/// so a frontend can warn before moving on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepContent {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub text: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl StepContent {
    pub fn text_item(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, ContentType::Text, text)
    }

    pub fn new(id: impl Into<String>, content_type: ContentType, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content_type,
            text: text.into(),
            detail: None,
            required: false,
            placeholder: None,
        }
    }
}

/// An ordered group of instructions under one title.
///
/// The `id` (e.g. `"1.1"`) doubles as the completable-unit key tracked by
/// the progress state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubProcess {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub contents: Vec<StepContent>,
}

impl SubProcess {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            contents: Vec::new(),
        }
    }

    pub fn with_contents(mut self, contents: Vec<StepContent>) -> Self {
        self.contents = contents;
        self
    }
}
