//! The presentation boundary.

use crate::session::VisibleChoice;

/// Receives render and dismiss calls from the dialogue runtime.
///
/// This is the seam between the engine and whatever draws the conversation:
/// the engine pushes node text and the filtered choice labels out through
/// `present`, tells the UI to go away through `dismiss`, and never queries
/// presentation state back. Player input flows the other way, through
/// [`DialogueRuntime::select`](crate::runtime::DialogueRuntime::select) and
/// [`close`](crate::runtime::DialogueRuntime::close) only — a presenter
/// never touches session internals directly.
pub trait DialoguePresenter {
    /// Show the current node's text and the visible choice labels.
    fn present(&mut self, text: &str, choices: &[VisibleChoice]);

    /// Hide the conversation UI.
    fn dismiss(&mut self);
}
