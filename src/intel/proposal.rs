//! Proposal items as the popup sees them.
//!
//! `ProposalItem` is the behavior seam: the popup controller talks to
//! items only through it, so snippet or fix-it items can sit in the same
//! list later. `SemanticProposalItem` wraps one semantic candidate plus
//! the overloads folded onto it.

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::config::CompletionConfig;
use crate::surface::EditSurface;

use super::candidate::{CompletionCandidate, CompletionKind, CompletionOperator};
use super::chunk;
use super::commit::{commit, CommitRequest};
use super::icon::{icon_for, ProposalIcon};

/// One row in the completion popup.
pub trait ProposalItem {
    /// Text shown in the list and matched against the typed prefix.
    fn text(&self) -> &str;

    /// True when `typed_char` should commit this item early instead of
    /// being inserted into the filter prefix.
    fn prematurely_applies(&self, _typed_char: char) -> bool {
        false
    }

    /// True when the item commits as soon as it becomes the only match.
    fn implicitly_applies(&self) -> bool {
        false
    }

    /// Commits the item into the surface. `base_position` is where the
    /// matched prefix starts; `typed_char` is the premature trigger, if
    /// any.
    fn apply(
        &self,
        surface: &mut dyn EditSurface,
        base_position: usize,
        typed_char: Option<char>,
        config: &CompletionConfig,
    );

    fn icon(&self) -> ProposalIcon {
        ProposalIcon::Unknown
    }

    /// Tooltip text for the selected row.
    fn detail(&self) -> String {
        String::new()
    }

    fn is_snippet(&self) -> bool {
        false
    }

    fn is_valid(&self) -> bool {
        true
    }

    /// Identity for popup-refresh dedup; 0 opts out.
    fn hash(&self) -> u64 {
        0
    }
}

/// Proposal item backed by a semantic completion candidate.
#[derive(Clone, Debug)]
pub struct SemanticProposalItem {
    text: String,
    candidate: CompletionCandidate,
    overloads: Vec<CompletionCandidate>,
    completion_operator: CompletionOperator,
}

impl SemanticProposalItem {
    pub fn new(candidate: CompletionCandidate) -> Self {
        Self {
            text: candidate.text.to_string(),
            candidate,
            overloads: Vec::new(),
            completion_operator: CompletionOperator::None,
        }
    }

    /// Overrides the display text; the candidate keeps its own.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Records the operator the completion request was triggered on.
    pub fn set_completion_operator(&mut self, operator: CompletionOperator) {
        self.completion_operator = operator;
    }

    pub fn completion_operator(&self) -> CompletionOperator {
        self.completion_operator
    }

    pub fn candidate(&self) -> &CompletionCandidate {
        &self.candidate
    }

    pub fn add_overload(&mut self, candidate: CompletionCandidate) {
        self.overloads.push(candidate);
    }

    pub fn is_overloaded(&self) -> bool {
        !self.overloads.is_empty()
    }

    pub fn overloads(&self) -> &[CompletionCandidate] {
        &self.overloads
    }
}

impl ProposalItem for SemanticProposalItem {
    fn text(&self) -> &str {
        &self.text
    }

    fn prematurely_applies(&self, typed_char: char) -> bool {
        match self.completion_operator {
            CompletionOperator::Signal | CompletionOperator::Slot => {
                matches!(typed_char, '(' | ',')
            }
            CompletionOperator::StringLiteral | CompletionOperator::AngleStringLiteral => {
                typed_char == '/' && self.text.ends_with('/')
            }
            _ if self.candidate.kind == CompletionKind::ObjcMessage => {
                matches!(typed_char, ';' | '.' | ',')
            }
            _ => matches!(typed_char, ';' | '.' | ',' | ':' | '('),
        }
    }

    fn apply(
        &self,
        surface: &mut dyn EditSurface,
        base_position: usize,
        typed_char: Option<char>,
        config: &CompletionConfig,
    ) {
        commit(
            surface,
            CommitRequest {
                text: &self.text,
                candidate: &self.candidate,
                operator: self.completion_operator,
                overloaded: self.is_overloaded(),
                base_position,
                typed_char,
            },
            config,
        );
    }

    fn icon(&self) -> ProposalIcon {
        icon_for(self.candidate.kind, self.candidate.availability)
    }

    fn detail(&self) -> String {
        let mut detail = chunk::render_tooltip(&self.candidate.chunks);
        if let Some(comment) = &self.candidate.brief_comment {
            if !comment.is_empty() {
                detail.push_str("\n\n");
                detail.push_str(comment);
            }
        }
        detail
    }
}

/// Folds raw candidates into popup items, one per display text in
/// first-seen order. Repeats of a callable's name become overloads on the
/// first item; a parameterless overload still counts, which is what keeps
/// the call from being auto-closed. Non-callable repeats and empty texts
/// are dropped.
pub fn fold_candidates(
    candidates: Vec<CompletionCandidate>,
    operator: CompletionOperator,
) -> Vec<SemanticProposalItem> {
    let mut items: Vec<SemanticProposalItem> = Vec::with_capacity(candidates.len());
    let mut index_by_text: FxHashMap<CompactString, usize> = FxHashMap::default();

    for candidate in candidates {
        if candidate.text.is_empty() {
            continue;
        }
        match index_by_text.get(&candidate.text) {
            Some(&index) if folds_as_overload(items[index].candidate(), &candidate) => {
                items[index].add_overload(candidate);
            }
            Some(_) => {}
            None => {
                index_by_text.insert(candidate.text.clone(), items.len());
                let mut item = SemanticProposalItem::new(candidate);
                item.set_completion_operator(operator);
                items.push(item);
            }
        }
    }

    items
}

fn folds_as_overload(kept: &CompletionCandidate, incoming: &CompletionCandidate) -> bool {
    is_callable_kind(kept.kind) && is_callable_kind(incoming.kind)
}

fn is_callable_kind(kind: CompletionKind) -> bool {
    matches!(
        kind,
        CompletionKind::Constructor
            | CompletionKind::Destructor
            | CompletionKind::Function
            | CompletionKind::TemplateFunction
            | CompletionKind::ObjcMessage
            | CompletionKind::Signal
            | CompletionKind::Slot
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intel::candidate::Availability;
    use crate::intel::chunk::CompletionChunk;
    use crate::models::TextBuffer;

    fn item(kind: CompletionKind, text: &str) -> SemanticProposalItem {
        SemanticProposalItem::new(CompletionCandidate::new(kind, text))
    }

    #[test]
    fn plain_items_apply_prematurely_on_statement_chars() {
        let item = item(CompletionKind::Function, "run");

        for ch in [';', '.', ',', ':', '('] {
            assert!(item.prematurely_applies(ch), "expected {ch:?} to apply");
        }
        assert!(!item.prematurely_applies('x'));
        assert!(!item.prematurely_applies(')'));
        assert!(!item.prematurely_applies('/'));
    }

    #[test]
    fn objc_messages_keep_colon_and_paren_for_the_filter() {
        let item = item(CompletionKind::ObjcMessage, "setValue:");

        assert!(item.prematurely_applies(';'));
        assert!(!item.prematurely_applies(':'));
        assert!(!item.prematurely_applies('('));
    }

    #[test]
    fn signal_operator_applies_on_paren_and_comma_only() {
        let mut item = item(CompletionKind::Signal, "valueChanged(int)");
        item.set_completion_operator(CompletionOperator::Signal);

        assert!(item.prematurely_applies('('));
        assert!(item.prematurely_applies(','));
        assert!(!item.prematurely_applies(';'));
    }

    #[test]
    fn include_slash_applies_only_on_directory_entries() {
        let mut dir = item(CompletionKind::Other, "nested/");
        dir.set_completion_operator(CompletionOperator::StringLiteral);
        let mut header = item(CompletionKind::Other, "config.h");
        header.set_completion_operator(CompletionOperator::StringLiteral);

        assert!(dir.prematurely_applies('/'));
        assert!(!header.prematurely_applies('/'));
        assert!(!dir.prematurely_applies(';'));
    }

    #[test]
    fn items_never_apply_implicitly() {
        assert!(!item(CompletionKind::Function, "run").implicitly_applies());
        assert!(!item(CompletionKind::Keyword, "if").implicitly_applies());
    }

    #[test]
    fn fold_groups_repeated_callables_into_overloads() {
        let candidates = vec![
            CompletionCandidate::new(CompletionKind::Function, "run"),
            CompletionCandidate::new(CompletionKind::Function, "walk").with_parameters(true),
            CompletionCandidate::new(CompletionKind::Function, "run").with_parameters(true),
        ];

        let items = fold_candidates(candidates, CompletionOperator::Dot);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text(), "run");
        assert!(items[0].is_overloaded());
        assert_eq!(items[0].overloads().len(), 1);
        assert_eq!(items[0].completion_operator(), CompletionOperator::Dot);
        assert!(!items[1].is_overloaded());
    }

    #[test]
    fn fold_drops_empty_and_non_callable_duplicates() {
        let candidates = vec![
            CompletionCandidate::new(CompletionKind::Variable, "value"),
            CompletionCandidate::new(CompletionKind::Variable, ""),
            CompletionCandidate::new(CompletionKind::Variable, "value"),
        ];

        let items = fold_candidates(candidates, CompletionOperator::None);

        assert_eq!(items.len(), 1);
        assert!(!items[0].is_overloaded());
    }

    #[test]
    fn folded_overload_blocks_call_auto_close() {
        let candidates = vec![
            CompletionCandidate::new(CompletionKind::Function, "connect"),
            CompletionCandidate::new(CompletionKind::Function, "connect").with_parameters(true),
        ];
        let items = fold_candidates(candidates, CompletionOperator::Dot);
        let mut buffer = TextBuffer::from_text("obj.con");
        buffer.set_cursor_offset(7);

        items[0].apply(&mut buffer, 4, None, &CompletionConfig::default());

        assert_eq!(buffer.text(), "obj.connect()");
        assert_eq!(buffer.cursor_offset(), 12);
    }

    #[test]
    fn detail_appends_brief_comment_after_blank_line() {
        let with_comment = SemanticProposalItem::new(
            CompletionCandidate::new(CompletionKind::Function, "max")
                .with_chunks(vec![
                    CompletionChunk::result_type("int"),
                    CompletionChunk::typed_text("max"),
                ])
                .with_brief_comment("Returns the larger value."),
        );
        let without_comment = item(CompletionKind::Function, "min");

        assert_eq!(with_comment.detail(), "int max\n\nReturns the larger value.");
        assert_eq!(without_comment.detail(), "");
    }

    #[test]
    fn icon_follows_candidate_kind_and_availability() {
        let public = item(CompletionKind::Function, "run");
        let hidden = SemanticProposalItem::new(
            CompletionCandidate::new(CompletionKind::Function, "run")
                .with_availability(Availability::NotAccessible),
        );

        assert_eq!(public.icon(), ProposalIcon::FuncPublic);
        assert_eq!(hidden.icon(), ProposalIcon::FuncPrivate);
    }

    #[test]
    fn hash_and_validity_use_trait_defaults() {
        let item = item(CompletionKind::Function, "run");

        assert_eq!(item.hash(), 0);
        assert!(item.is_valid());
        assert!(!item.is_snippet());
    }
}
