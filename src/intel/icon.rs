//! Popup presentation metadata derived from kind and availability.

use serde::{Deserialize, Serialize};

use super::candidate::{Availability, CompletionKind};

/// Theme identifier for the glyph shown next to a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalIcon {
    Class,
    Enum,
    Enumerator,
    FuncPublic,
    FuncPrivate,
    Signal,
    SlotPublic,
    SlotPrivate,
    Namespace,
    Macro,
    VarPublic,
    VarPrivate,
    Keyword,
    Snippet,
    Unknown,
}

impl ProposalIcon {
    /// Short kind tag for list columns.
    pub fn label(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Enum => "enum",
            Self::Enumerator => "enum_member",
            Self::FuncPublic | Self::FuncPrivate => "fn",
            Self::Signal => "signal",
            Self::SlotPublic | Self::SlotPrivate => "slot",
            Self::Namespace => "ns",
            Self::Macro => "macro",
            Self::VarPublic | Self::VarPrivate => "var",
            Self::Keyword => "kw",
            Self::Snippet => "snippet",
            Self::Unknown => "?",
        }
    }
}

/// Maps a candidate to its popup icon. Function, slot and variable icons
/// split on whether the symbol is accessible at the cursor.
pub fn icon_for(kind: CompletionKind, availability: Availability) -> ProposalIcon {
    match kind {
        CompletionKind::Class | CompletionKind::TemplateClass | CompletionKind::TypeAlias => {
            ProposalIcon::Class
        }
        CompletionKind::Enumeration => ProposalIcon::Enum,
        CompletionKind::Enumerator => ProposalIcon::Enumerator,
        CompletionKind::Constructor
        | CompletionKind::Destructor
        | CompletionKind::Function
        | CompletionKind::TemplateFunction
        | CompletionKind::ObjcMessage => {
            if availability.is_accessible() {
                ProposalIcon::FuncPublic
            } else {
                ProposalIcon::FuncPrivate
            }
        }
        CompletionKind::Signal => ProposalIcon::Signal,
        CompletionKind::Slot => {
            if availability.is_accessible() {
                ProposalIcon::SlotPublic
            } else {
                ProposalIcon::SlotPrivate
            }
        }
        CompletionKind::Namespace => ProposalIcon::Namespace,
        CompletionKind::PreProcessor => ProposalIcon::Macro,
        CompletionKind::Variable => {
            if availability.is_accessible() {
                ProposalIcon::VarPublic
            } else {
                ProposalIcon::VarPrivate
            }
        }
        CompletionKind::Keyword => ProposalIcon::Keyword,
        CompletionKind::Snippet => ProposalIcon::Snippet,
        CompletionKind::Other => ProposalIcon::Unknown,
    }
}
