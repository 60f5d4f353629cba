use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a dialogue node within a graph.
///
/// Node ids are authored strings (`"greeting"`, `"shop_menu"`), unique per
/// graph rather than globally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a node id from an authored string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Names which of an NPC's attached offers an offer-triggering choice
/// resolves to (`"respawn"`, `"shop"`).
///
/// A choice carrying a tag is an offer trigger; the engine looks the tag up
/// in the registry of the NPC being talked to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfferTag(pub String);

impl OfferTag {
    /// Create an offer tag from an authored string.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OfferTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for OfferTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl fmt::Display for OfferTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single player-selectable response on a dialogue node.
///
/// A choice may advance the conversation, trigger an NPC offer, do both
/// (the offer fires, then the conversation continues at the successor), or
/// neither — a plain terminal response that ends the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueChoice {
    /// The text shown to the player.
    pub text: String,
    /// Node to advance to after this choice. `None` ends the conversation.
    pub successor: Option<NodeId>,
    /// Offer this choice triggers, resolved against the NPC's registry.
    pub offer: Option<OfferTag>,
}

impl DialogueChoice {
    /// Create a choice with the given display text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            successor: None,
            offer: None,
        }
    }

    /// Set the successor node.
    pub fn with_successor(mut self, id: impl Into<NodeId>) -> Self {
        self.successor = Some(id.into());
        self
    }

    /// Mark this choice as an offer trigger.
    pub fn with_offer(mut self, tag: impl Into<OfferTag>) -> Self {
        self.offer = Some(tag.into());
        self
    }

    /// Whether this choice triggers an NPC offer.
    pub fn is_offer(&self) -> bool {
        self.offer.is_some()
    }
}

/// One unit of NPC dialogue text plus its selectable responses.
///
/// Nodes are shared by reference across every concurrent conversation using
/// them; they carry no per-player state. Choice order is authored order and
/// is the display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueNode {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// The dialogue text to display.
    pub text: String,
    /// Available choices, in display order.
    pub choices: Vec<DialogueChoice>,
}

impl DialogueNode {
    /// Create a node with the given id and text.
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            choices: Vec::new(),
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: DialogueChoice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Whether this node has no choices at all. Such a node is implicitly
    /// terminal: only closing the conversation is valid there.
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty()
    }
}
