//! Conversation lifecycle management.
//!
//! `DialogueRuntime` owns at most one session per player and wires session
//! transitions to presenter calls: present on open and advance, dismiss on
//! end and close. The forced-close entry points are the hooks the
//! surrounding game calls from its disconnect, despawn, and zone-change
//! handlers.

use std::collections::HashMap;
use std::sync::Arc;

use palaver_core::{DialogueGraph, NodeId};

use crate::error::{EngineError, EngineResult};
use crate::npc::{Npc, NpcId};
use crate::player::{PlayerId, PlayerState};
use crate::presenter::DialoguePresenter;
use crate::session::{DialogueSession, SelectOutcome};

/// Owns the active conversations of all players.
///
/// The map only ever holds open sessions: a conversation that ends or is
/// closed is dropped immediately, so a stale entry can never be selected
/// against.
#[derive(Default)]
pub struct DialogueRuntime {
    sessions: HashMap<PlayerId, DialogueSession>,
}

impl DialogueRuntime {
    /// Create a runtime with no active conversations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a conversation for a player and present its root node.
    ///
    /// A player holds at most one conversation at a time; opening a second
    /// fails with [`EngineError::ConversationOpen`] until the first is
    /// closed.
    pub fn open(
        &mut self,
        graph: Arc<DialogueGraph>,
        root: impl Into<NodeId>,
        npc: Arc<Npc>,
        player: &PlayerState,
        presenter: &mut dyn DialoguePresenter,
    ) -> EngineResult<()> {
        if self.sessions.contains_key(&player.id) {
            return Err(EngineError::ConversationOpen(player.id));
        }

        let mut session = DialogueSession::open(graph, root, npc, player.id)?;
        let view = session.visible_choices(player)?;
        presenter.present(session.node_text()?, &view);
        self.sessions.insert(player.id, session);
        Ok(())
    }

    /// Forward a player-selected index into their session.
    ///
    /// Advancing re-presents the new node; ending dismisses the presentation
    /// and drops the session. A stale selection re-presents the current
    /// node's fresh view and still surfaces the error, so players see a
    /// refreshed menu while callers observe the failure.
    pub fn select(
        &mut self,
        index: usize,
        player: &mut PlayerState,
        presenter: &mut dyn DialoguePresenter,
    ) -> EngineResult<()> {
        let session = self
            .sessions
            .get_mut(&player.id)
            .ok_or(EngineError::SessionClosed)?;

        match session.select(index, player) {
            Ok(SelectOutcome::Advanced(_)) => {
                let view = session.visible_choices(player)?;
                presenter.present(session.node_text()?, &view);
                Ok(())
            }
            Ok(SelectOutcome::Ended) => {
                self.sessions.remove(&player.id);
                presenter.dismiss();
                Ok(())
            }
            Err(err @ EngineError::InvalidSelection(_)) => {
                let view = session.visible_choices(player)?;
                presenter.present(session.node_text()?, &view);
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Close a player's conversation, dismissing its presentation.
    ///
    /// The forced-close hook for disconnects and zone changes. Idempotent:
    /// closing a player with no conversation is a no-op.
    pub fn close(&mut self, player: PlayerId, presenter: &mut dyn DialoguePresenter) {
        if let Some(mut session) = self.sessions.remove(&player) {
            session.close();
            presenter.dismiss();
        }
    }

    /// Force-close every conversation targeting an NPC instance.
    ///
    /// The despawn hook: call when an NPC is destroyed or leaves range.
    /// Returns how many conversations were closed.
    pub fn close_for_npc(&mut self, npc: NpcId, presenter: &mut dyn DialoguePresenter) -> usize {
        let affected: Vec<PlayerId> = self
            .sessions
            .iter()
            .filter(|(_, session)| session.npc_id() == Some(npc))
            .map(|(id, _)| *id)
            .collect();
        for player in &affected {
            self.close(*player, presenter);
        }
        affected.len()
    }

    /// Whether a player currently has an open conversation.
    pub fn is_talking(&self, player: PlayerId) -> bool {
        self.sessions.contains_key(&player)
    }

    /// The player's active session, if any.
    pub fn session(&self, player: PlayerId) -> Option<&DialogueSession> {
        self.sessions.get(&player)
    }

    /// Number of active conversations.
    pub fn open_count(&self) -> usize {
        self.sessions.len()
    }
}
