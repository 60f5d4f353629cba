//! The per-player conversation state machine.
//!
//! A session owns all mutable traversal state for one conversation; the
//! graph and NPC it references are only ever read. The visible choice view
//! is a projection recomputed on every render, and selection maps presented
//! indices back through the projection last handed out — so an availability
//! change between render and select fails loudly instead of silently
//! picking a shifted neighbor.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use palaver_core::{DialogueGraph, GraphError, NodeId, OfferTag};

use crate::error::{EngineError, EngineResult};
use crate::npc::{Npc, NpcId};
use crate::offer::Offer;
use crate::player::{PlayerId, PlayerState};

/// One entry in the filtered choice view handed to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleChoice {
    /// Label to display: the offer's label for offer choices, the authored
    /// text otherwise.
    pub label: String,
    /// Whether selecting this entry triggers an NPC offer.
    pub is_offer: bool,
}

/// The result of a successful selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The conversation advanced to another node.
    Advanced(NodeId),
    /// The conversation ended; the session is now closed.
    Ended,
}

/// A per-player conversation over a shared dialogue graph.
///
/// Two sessions opened against the same graph and NPC template never share
/// mutable state; everything a conversation changes lives in here.
pub struct DialogueSession {
    state: SessionState,
}

enum SessionState {
    Closed,
    Open(OpenState),
}

struct OpenState {
    graph: Arc<DialogueGraph>,
    npc: Arc<Npc>,
    player: PlayerId,
    node: NodeId,
    opened_at: DateTime<Utc>,
    /// Authored choice indices behind the most recently rendered view.
    last_view: Option<Vec<usize>>,
}

impl OpenState {
    /// The currently eligible choices of the current node: authored index
    /// plus the entry the presenter shows. Availability is checked now, on
    /// every call.
    fn project(&self, player: &PlayerState) -> EngineResult<Vec<(usize, VisibleChoice)>> {
        let choices = self.graph.choices(&self.node)?;
        let mut view = Vec::with_capacity(choices.len());
        for (idx, choice) in choices.iter().enumerate() {
            match &choice.offer {
                None => view.push((
                    idx,
                    VisibleChoice {
                        label: choice.text.clone(),
                        is_offer: false,
                    },
                )),
                Some(tag) => {
                    let offer = self.resolve(tag)?;
                    if offer.is_available(player) {
                        view.push((
                            idx,
                            VisibleChoice {
                                label: offer.label(),
                                is_offer: true,
                            },
                        ));
                    }
                }
            }
        }
        Ok(view)
    }

    fn resolve(&self, tag: &OfferTag) -> EngineResult<&dyn Offer> {
        self.npc
            .offer(tag)
            .ok_or_else(|| EngineError::UnresolvedOffer {
                tag: tag.clone(),
                npc: self.npc.name.clone(),
            })
    }
}

impl DialogueSession {
    /// Open a conversation at the given root node.
    ///
    /// A session is born open and is never reopened after closing; start a
    /// new session for a new conversation instead. Errors if the root is not
    /// part of the graph.
    pub fn open(
        graph: Arc<DialogueGraph>,
        root: impl Into<NodeId>,
        npc: Arc<Npc>,
        player: PlayerId,
    ) -> EngineResult<Self> {
        let root = root.into();
        if !graph.contains(&root) {
            return Err(GraphError::NodeNotFound(root).into());
        }
        Ok(Self {
            state: SessionState::Open(OpenState {
                graph,
                npc,
                player,
                node: root,
                opened_at: Utc::now(),
                last_view: None,
            }),
        })
    }

    /// Whether the session is open.
    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open(_))
    }

    /// The node the conversation currently stands at.
    pub fn current_node(&self) -> Option<&NodeId> {
        self.open_ref().map(|open| &open.node).ok()
    }

    /// The NPC instance this session targets.
    pub fn npc_id(&self) -> Option<NpcId> {
        self.open_ref().map(|open| open.npc.id).ok()
    }

    /// The player who opened this session.
    pub fn player(&self) -> Option<PlayerId> {
        self.open_ref().map(|open| open.player).ok()
    }

    /// When the conversation was opened.
    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        self.open_ref().map(|open| open.opened_at).ok()
    }

    /// The display text of the current node.
    pub fn node_text(&self) -> EngineResult<&str> {
        let open = self.open_ref()?;
        let node = open
            .graph
            .node(&open.node)
            .ok_or_else(|| GraphError::NodeNotFound(open.node.clone()))?;
        Ok(&node.text)
    }

    /// Compute the filtered, ordered choice view of the current node.
    ///
    /// Offer choices appear only while their resolved offer is available,
    /// labeled with the offer's label; non-offer choices always appear with
    /// their authored text. Authored order is preserved and availability is
    /// re-run on every call — player and world state can change between two
    /// renders of the same node. The authored identity behind each entry is
    /// recorded so a later [`select`](Self::select) maps display positions
    /// back to the same choices.
    pub fn visible_choices(&mut self, player: &PlayerState) -> EngineResult<Vec<VisibleChoice>> {
        let open = match &mut self.state {
            SessionState::Open(open) => open,
            SessionState::Closed => return Err(EngineError::SessionClosed),
        };
        let projected = open.project(player)?;
        let (authored, view): (Vec<usize>, Vec<VisibleChoice>) = projected.into_iter().unzip();
        open.last_view = Some(authored);
        Ok(view)
    }

    /// Select an entry of the visible choice view by its displayed index.
    ///
    /// The index is interpreted against the view most recently returned by
    /// [`visible_choices`](Self::visible_choices), and the resolved offer's
    /// availability is re-checked here, not just at render time — a flip
    /// between the two fails with [`EngineError::InvalidSelection`] rather
    /// than firing a stale offer. Effects, in order: the offer's selection
    /// action runs, then the session advances to the successor node, or
    /// closes if the choice has none.
    pub fn select(
        &mut self,
        index: usize,
        player: &mut PlayerState,
    ) -> EngineResult<SelectOutcome> {
        let open = match &mut self.state {
            SessionState::Open(open) => open,
            SessionState::Closed => return Err(EngineError::SessionClosed),
        };

        let authored = match &open.last_view {
            Some(view) => view.clone(),
            // Selection before any render: use a fresh projection.
            None => open
                .project(player)?
                .into_iter()
                .map(|(idx, _)| idx)
                .collect(),
        };
        let Some(&choice_idx) = authored.get(index) else {
            return Err(EngineError::InvalidSelection(index));
        };

        let choices = open.graph.choices(&open.node)?;
        let choice = choices[choice_idx].clone();

        if let Some(tag) = &choice.offer {
            let offer = open.resolve(tag)?;
            if !offer.is_available(player) {
                return Err(EngineError::InvalidSelection(index));
            }
            offer.on_select(player);
        }

        match choice.successor {
            Some(next) => {
                if !open.graph.contains(&next) {
                    return Err(GraphError::NodeNotFound(next).into());
                }
                open.node = next;
                open.last_view = None;
                Ok(SelectOutcome::Advanced(open.node.clone()))
            }
            None => {
                self.state = SessionState::Closed;
                Ok(SelectOutcome::Ended)
            }
        }
    }

    /// Close the conversation and release the graph and NPC references.
    ///
    /// Valid from any state and idempotent: closing an already-closed
    /// session is a no-op. Safe to call from external lifecycle hooks (NPC
    /// destroyed, player disconnected, zone change).
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
    }

    fn open_ref(&self) -> EngineResult<&OpenState> {
        match &self.state {
            SessionState::Open(open) => Ok(open),
            SessionState::Closed => Err(EngineError::SessionClosed),
        }
    }
}
