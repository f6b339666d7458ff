//! Look-ahead rule for auto-closing inserted brackets.

/// Whether an auto-inserted closer may land before `lookahead`.
///
/// Closing in front of an identifier or literal would corrupt it;
/// whitespace, closing tokens, statement separators and end of text are
/// safe.
pub fn should_auto_close(lookahead: Option<char>) -> bool {
    match lookahead {
        None => true,
        Some(ch) => ch.is_whitespace() || matches!(ch, '{' | '}' | ']' | ')' | ';' | ','),
    }
}
