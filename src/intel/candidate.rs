//! Completion candidate data contracts shared by hosts and the commit
//! engine.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use super::chunk::CompletionChunk;

/// Semantic class of a candidate as reported by the code model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionKind {
    Class,
    TemplateClass,
    TypeAlias,
    Enumeration,
    Enumerator,
    Constructor,
    Destructor,
    Function,
    TemplateFunction,
    ObjcMessage,
    Signal,
    Slot,
    Namespace,
    PreProcessor,
    Variable,
    Keyword,
    Snippet,
    Other,
}

/// Availability reported alongside the candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    #[default]
    Available,
    Deprecated,
    NotAccessible,
    NotAvailable,
}

impl Availability {
    /// Available and deprecated symbols can still be used at the cursor.
    pub fn is_accessible(self) -> bool {
        matches!(self, Self::Available | Self::Deprecated)
    }
}

/// Token context the completion was triggered after.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionOperator {
    #[default]
    None,
    Dot,
    Arrow,
    ColonColon,
    Signal,
    Slot,
    StringLiteral,
    AngleStringLiteral,
}

/// One completion result from the code model. Read-only for the commit
/// engine; presentation and commit behavior both key off it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionCandidate {
    pub kind: CompletionKind,
    pub availability: Availability,
    pub text: CompactString,
    pub chunks: Vec<CompletionChunk>,
    pub has_parameters: bool,
    pub brief_comment: Option<CompactString>,
}

impl CompletionCandidate {
    pub fn new(kind: CompletionKind, text: impl Into<CompactString>) -> Self {
        Self {
            kind,
            availability: Availability::Available,
            text: text.into(),
            chunks: Vec::new(),
            has_parameters: false,
            brief_comment: None,
        }
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn with_chunks(mut self, chunks: Vec<CompletionChunk>) -> Self {
        self.chunks = chunks;
        self
    }

    pub fn with_parameters(mut self, has_parameters: bool) -> Self {
        self.has_parameters = has_parameters;
        self
    }

    pub fn with_brief_comment(mut self, comment: impl Into<CompactString>) -> Self {
        self.brief_comment = Some(comment.into());
        self
    }
}
