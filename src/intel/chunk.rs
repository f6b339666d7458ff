//! Completion string chunks and the texts rendered from them.
//!
//! The code model describes each candidate as a chunk sequence: typed text,
//! punctuation, placeholders for arguments. Keyword and namespace commits
//! insert a rendering of those chunks instead of the bare candidate text,
//! and the popup detail pane renders them as a signature line.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChunkKind {
    TypedText,
    Text,
    ResultType,
    Placeholder,
    Informative,
    CurrentParameter,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    LeftAngle,
    RightAngle,
    Comma,
    Colon,
    SemiColon,
    Equal,
    HorizontalSpace,
    VerticalSpace,
}

impl ChunkKind {
    /// Token text for kinds whose rendering never varies.
    fn fixed_text(self) -> Option<&'static str> {
        match self {
            Self::LeftParen => Some("("),
            Self::RightParen => Some(")"),
            Self::LeftBracket => Some("["),
            Self::RightBracket => Some("]"),
            Self::LeftBrace => Some("{"),
            Self::RightBrace => Some("}"),
            Self::LeftAngle => Some("<"),
            Self::RightAngle => Some(">"),
            Self::Comma => Some(", "),
            Self::Colon => Some(":"),
            Self::SemiColon => Some(";"),
            Self::Equal => Some("="),
            Self::HorizontalSpace => Some(" "),
            Self::VerticalSpace => Some("\n"),
            _ => None,
        }
    }
}

/// One chunk of a candidate's completion string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionChunk {
    pub kind: ChunkKind,
    pub text: CompactString,
    /// Chunks belonging to default arguments are marked optional.
    pub is_optional: bool,
}

impl CompletionChunk {
    pub fn new(kind: ChunkKind, text: impl Into<CompactString>) -> Self {
        Self {
            kind,
            text: text.into(),
            is_optional: false,
        }
    }

    /// Chunk carrying the token text fixed for its kind.
    pub fn token(kind: ChunkKind) -> Self {
        Self::new(kind, kind.fixed_text().unwrap_or_default())
    }

    pub fn typed_text(text: impl Into<CompactString>) -> Self {
        Self::new(ChunkKind::TypedText, text)
    }

    pub fn plain(text: impl Into<CompactString>) -> Self {
        Self::new(ChunkKind::Text, text)
    }

    pub fn placeholder(text: impl Into<CompactString>) -> Self {
        Self::new(ChunkKind::Placeholder, text)
    }

    pub fn result_type(text: impl Into<CompactString>) -> Self {
        Self::new(ChunkKind::ResultType, text)
    }

    pub fn informative(text: impl Into<CompactString>) -> Self {
        Self::new(ChunkKind::Informative, text)
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }
}

/// Keyword rendering: insertion text plus the char positions placeholders
/// sat at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedKeyword {
    pub text: String,
    pub placeholder_positions: Vec<usize>,
}

impl RenderedKeyword {
    /// Offset from the end of `text` back to the first placeholder, zero
    /// when the keyword has none.
    pub fn cursor_offset(&self) -> i64 {
        match self.placeholder_positions.first() {
            Some(&position) => position as i64 - self.text.chars().count() as i64,
            None => 0,
        }
    }
}

#[derive(Default)]
struct ChunkTextBuilder {
    emit_placeholders: bool,
    record_placeholders: bool,
    include_result_type: bool,
    include_informative: bool,
    include_optional: bool,
    text: String,
    chars: usize,
    placeholder_positions: Vec<usize>,
}

impl ChunkTextBuilder {
    fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
        self.chars = self.chars.saturating_add(text.chars().count());
    }

    fn feed(&mut self, chunk: &CompletionChunk) {
        if chunk.is_optional && !self.include_optional {
            return;
        }

        match chunk.kind {
            ChunkKind::ResultType => {
                if self.include_result_type && !chunk.text.is_empty() {
                    self.push_str(&chunk.text);
                    self.push_str(" ");
                }
            }
            ChunkKind::Placeholder | ChunkKind::CurrentParameter => {
                if self.record_placeholders {
                    self.placeholder_positions.push(self.chars);
                }
                if self.emit_placeholders {
                    self.push_str(&chunk.text);
                }
            }
            ChunkKind::Informative => {
                if self.include_informative {
                    self.push_str(&chunk.text);
                }
            }
            _ => {
                if chunk.text.is_empty() {
                    if let Some(token) = chunk.kind.fixed_text() {
                        self.push_str(token);
                    }
                } else {
                    self.push_str(&chunk.text);
                }
            }
        }
    }

    fn feed_all(&mut self, chunks: &[CompletionChunk]) {
        for chunk in chunks {
            self.feed(chunk);
        }
    }
}

/// Renders chunks for a keyword commit. Placeholder text is dropped and
/// its position recorded instead, so the cursor can be parked there.
pub fn render_keyword(chunks: &[CompletionChunk]) -> RenderedKeyword {
    let mut builder = ChunkTextBuilder {
        record_placeholders: true,
        ..Default::default()
    };
    builder.feed_all(chunks);
    RenderedKeyword {
        text: builder.text,
        placeholder_positions: builder.placeholder_positions,
    }
}

/// Renders chunks for a namespace commit. The chunk stream carries the
/// trailing scope token, so `std` comes out as `std::`.
pub fn render_namespace(chunks: &[CompletionChunk]) -> String {
    let mut builder = ChunkTextBuilder::default();
    builder.feed_all(chunks);
    builder.text
}

/// Renders chunks as the signature line shown in the popup detail pane.
pub fn render_tooltip(chunks: &[CompletionChunk]) -> String {
    let mut builder = ChunkTextBuilder {
        emit_placeholders: true,
        include_result_type: true,
        include_informative: true,
        include_optional: true,
        ..Default::default()
    };
    builder.feed_all(chunks);
    builder.text
}
