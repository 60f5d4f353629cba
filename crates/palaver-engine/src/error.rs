//! Error types for the dialogue engine.

use thiserror::Error;

use palaver_core::{GraphError, OfferTag};

use crate::player::PlayerId;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while running a conversation.
///
/// All of these are local and recoverable by the caller: a failed operation
/// leaves the conversation where it was, and the presenter is expected to
/// refresh or close.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Selection index outside the current visible choice view, or the
    /// selected offer stopped being available since the last render.
    #[error("invalid selection: {0}")]
    InvalidSelection(usize),

    /// Operation requires an open session.
    #[error("session is closed")]
    SessionClosed,

    /// A choice is flagged as an offer trigger but the NPC has no matching
    /// offer registered. An authoring defect, surfaced rather than skipped.
    #[error("unresolved offer \"{tag}\" on {npc}")]
    UnresolvedOffer {
        /// The tag the choice carries.
        tag: OfferTag,
        /// Display name of the NPC missing the registration.
        npc: String,
    },

    /// The player already has an open conversation.
    #[error("player {0} is already in a conversation")]
    ConversationOpen(PlayerId),

    /// Graph error.
    #[error("{0}")]
    Graph(#[from] GraphError),
}
