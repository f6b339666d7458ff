//! Turns a chosen proposal into buffer edits.
//!
//! The branch is decided once from (completion operator, candidate kind);
//! each handler only edits the commit session. A shared tail then appends
//! the leftover typed char, drops chars the buffer already has and applies
//! a single replace.

use crate::config::CompletionConfig;
use crate::surface::EditSurface;

use super::candidate::{CompletionCandidate, CompletionKind, CompletionOperator};
use super::chunk;
use super::matching::should_auto_close;

/// Everything one commit needs besides the surface itself.
pub struct CommitRequest<'a> {
    /// Display text of the chosen item.
    pub text: &'a str,
    pub candidate: &'a CompletionCandidate,
    pub operator: CompletionOperator,
    /// True when further candidates share this item's text.
    pub overloaded: bool,
    /// Char offset where the completed prefix starts.
    pub base_position: usize,
    /// Premature trigger char, if one cut the popup session short.
    pub typed_char: Option<char>,
}

/// Mutable state threaded through one commit. The typed char can be
/// consumed at most once; whatever survives the branch handlers is
/// appended by the shared tail.
#[derive(Debug)]
struct CommitSession {
    text: String,
    extra: String,
    cursor_offset: i64,
    typed_char: Option<char>,
}

impl CommitSession {
    fn new(text: &str, typed_char: Option<char>) -> Self {
        Self {
            text: text.to_string(),
            extra: String::new(),
            cursor_offset: 0,
            typed_char,
        }
    }

    fn typed_char(&self) -> Option<char> {
        self.typed_char
    }

    fn typed(&self, ch: char) -> bool {
        self.typed_char == Some(ch)
    }

    fn consume_typed_char(&mut self) {
        self.typed_char = None;
    }

    fn push_extra(&mut self, ch: char) {
        self.extra.push(ch);
    }

    fn retreat_cursor(&mut self) {
        self.cursor_offset -= 1;
    }
}

/// Branch taken by one commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CommitPolicy {
    /// SIGNAL()/SLOT() macro argument: close the macro, eat a typed `(`.
    MacroArgument,
    /// Path segment inside an include string: close the quote unless the
    /// segment is a directory.
    IncludePath { angled: bool },
    /// Keyword with a completion pattern: insert the rendered chunks.
    Keyword,
    /// Namespace: insert the rendered chunks, scope token included.
    Namespace,
    /// Everything else: plain text plus optional call parentheses.
    Symbol,
}

/// The trigger operator outranks the candidate kind: a keyword-shaped
/// candidate inside SIGNAL() still commits as a macro argument.
fn commit_policy(operator: CompletionOperator, kind: CompletionKind) -> CommitPolicy {
    match operator {
        CompletionOperator::Signal | CompletionOperator::Slot => CommitPolicy::MacroArgument,
        CompletionOperator::StringLiteral => CommitPolicy::IncludePath { angled: false },
        CompletionOperator::AngleStringLiteral => CommitPolicy::IncludePath { angled: true },
        _ => match kind {
            CompletionKind::Keyword => CommitPolicy::Keyword,
            CompletionKind::Namespace => CommitPolicy::Namespace,
            _ => CommitPolicy::Symbol,
        },
    }
}

/// Applies `request` to the surface: at most one replace, cursor placed
/// per the chosen branch.
pub fn commit(
    surface: &mut dyn EditSurface,
    request: CommitRequest<'_>,
    config: &CompletionConfig,
) {
    let mut session = CommitSession::new(request.text, request.typed_char);

    match commit_policy(request.operator, request.candidate.kind) {
        CommitPolicy::MacroArgument => handle_macro_argument(&mut session),
        CommitPolicy::IncludePath { angled } => handle_include_path(&mut session, angled),
        CommitPolicy::Keyword => handle_keyword(&mut session, request.candidate),
        CommitPolicy::Namespace => handle_namespace(&mut session, request.candidate),
        CommitPolicy::Symbol => handle_symbol(
            &mut session,
            &*surface,
            request.candidate,
            request.overloaded,
            config,
        ),
    }

    finish_commit(surface, &request, session);
}

fn handle_macro_argument(session: &mut CommitSession) {
    session.push_extra(')');
    if session.typed('(') {
        session.consume_typed_char();
    }
}

fn handle_include_path(session: &mut CommitSession, angled: bool) {
    if !session.text.ends_with('/') {
        session.push_extra(if angled { '>' } else { '"' });
    } else if session.typed('/') {
        session.consume_typed_char();
    }
}

fn handle_keyword(session: &mut CommitSession, candidate: &CompletionCandidate) {
    let rendered = chunk::render_keyword(&candidate.chunks);
    session.cursor_offset = rendered.cursor_offset();
    session.text = rendered.text;
}

fn handle_namespace(session: &mut CommitSession, candidate: &CompletionCandidate) {
    session.text = chunk::render_namespace(&candidate.chunks);
}

fn handle_symbol(
    session: &mut CommitSession,
    surface: &dyn EditSurface,
    candidate: &CompletionCandidate,
    overloaded: bool,
    config: &CompletionConfig,
) {
    if candidate.text.is_empty() {
        return;
    }
    if !config.auto_insert_brackets || !kind_takes_call_parentheses(candidate.kind) {
        return;
    }

    // A user who typed the ( will usually type the ) too; keep the cursor
    // out of its way then.
    let skip_closing_paren = !session.typed('(');

    if config.space_after_function_name {
        session.push_extra(' ');
    }
    session.push_extra('(');
    if session.typed('(') {
        session.consume_typed_char();
    }

    let char_at_cursor = surface.char_at(surface.cursor_offset());
    let mut end_with_semicolon = session.typed(';');
    let semicolon = session.typed_char().unwrap_or(';');
    if end_with_semicolon && char_at_cursor == Some(semicolon) {
        end_with_semicolon = false;
        session.consume_typed_char();
    }

    if !overloaded && !candidate.has_parameters && skip_closing_paren {
        // No arguments to fill in: close the call and land after it.
        session.push_extra(')');
        if end_with_semicolon {
            session.push_extra(semicolon);
            session.consume_typed_char();
        }
    } else {
        let lookahead = surface.char_at(surface.cursor_offset().saturating_add(1));
        if should_auto_close(lookahead) {
            session.push_extra(')');
            session.retreat_cursor();
            if end_with_semicolon {
                session.push_extra(semicolon);
                session.retreat_cursor();
                session.consume_typed_char();
            }
        }
    }
}

fn kind_takes_call_parentheses(kind: CompletionKind) -> bool {
    matches!(
        kind,
        CompletionKind::Function
            | CompletionKind::Destructor
            | CompletionKind::Signal
            | CompletionKind::Slot
    )
}

fn finish_commit(
    surface: &mut dyn EditSurface,
    request: &CommitRequest<'_>,
    mut session: CommitSession,
) {
    // A typed char no branch claimed still has to land in the buffer.
    if let Some(typed) = session.typed_char() {
        session.push_extra(typed);
        if session.cursor_offset != 0 {
            session.retreat_cursor();
        }
        session.consume_typed_char();
    }

    let cursor = surface.cursor_offset();
    let line_end = surface.line_end_offset(cursor);
    let line_tail_len = line_end.saturating_sub(cursor);

    // Keyword insertions replace nothing beyond the typed prefix.
    let exist_len = if line_tail_len == 0 || request.candidate.kind == CompletionKind::Keyword {
        0
    } else {
        let line_tail = surface.text_at(cursor, line_tail_len);
        existing_suffix_overlap(
            &session.text,
            &line_tail,
            cursor.saturating_sub(request.base_position),
        )
    };

    let mut extra_overlap = 0usize;
    for (i, ch) in session.extra.chars().enumerate() {
        let ahead = cursor.saturating_add(i).saturating_add(exist_len);
        if surface.char_at(ahead) == Some(ch) {
            extra_overlap = extra_overlap.saturating_add(1);
        } else {
            break;
        }
    }

    session.text.push_str(&session.extra);

    let replace_len = cursor
        .saturating_sub(request.base_position)
        .saturating_add(exist_len)
        .saturating_add(extra_overlap);
    let replaced = surface.text_at(request.base_position, replace_len);

    // Leave the buffer and undo stack alone when it already reads right.
    if replaced == session.text {
        return;
    }

    surface.set_cursor_offset(request.base_position);
    surface.replace(replace_len, &session.text);

    if session.cursor_offset != 0 {
        let target = surface.cursor_offset() as i64 + session.cursor_offset;
        surface.set_cursor_offset(target.max(0) as usize);
    }

    tracing::debug!(
        base = request.base_position,
        replaced = replace_len,
        inserted = session.text.chars().count(),
        "completion committed"
    );

    if request.candidate.kind == CompletionKind::Keyword {
        let base = request.base_position;
        if only_blanks_before(&*surface, base) {
            surface.auto_indent(base, base.saturating_add(session.text.chars().count()));
        }
    }
}

/// Longest insertion suffix already sitting at the cursor. `typed_span`
/// is how much of the insertion the user has typed since the base
/// position; the scan starts from what remains and shrinks until the line
/// tail confirms it. Zero when nothing matches or the span already covers
/// the insertion.
fn existing_suffix_overlap(insertion: &str, line_tail: &str, typed_span: usize) -> usize {
    let insertion_len = insertion.chars().count();
    let mut exist_len = insertion_len.saturating_sub(typed_span);
    while exist_len > 0 && !line_tail.starts_with(suffix_of(insertion, exist_len)) {
        exist_len -= 1;
    }
    exist_len
}

/// Last `len` chars of `text` as a subslice; the whole text when `len`
/// exceeds it.
fn suffix_of(text: &str, len: usize) -> &str {
    let skip = text.chars().count().saturating_sub(len);
    match text.char_indices().nth(skip) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

fn only_blanks_before(surface: &dyn EditSurface, offset: usize) -> bool {
    let line_start = surface.line_start_offset(offset);
    surface
        .text_at(line_start, offset.saturating_sub(line_start))
        .chars()
        .all(char::is_whitespace)
}
