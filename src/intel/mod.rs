//! Code-intelligence side of completion: candidate model, chunk
//! rendering, proposal items and the commit algorithm that turns a chosen
//! item into buffer edits.

pub mod candidate;
pub mod chunk;
pub mod commit;
pub mod icon;
pub mod matching;
pub mod proposal;

pub use candidate::{Availability, CompletionCandidate, CompletionKind, CompletionOperator};
pub use chunk::{ChunkKind, CompletionChunk, RenderedKeyword};
pub use commit::{commit, CommitRequest};
pub use icon::{icon_for, ProposalIcon};
pub use matching::should_auto_close;
pub use proposal::{fold_candidates, ProposalItem, SemanticProposalItem};
