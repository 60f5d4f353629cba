use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::node::{DialogueChoice, DialogueNode, NodeId};

/// An authored conversation graph. Owns all nodes and resolves ids.
///
/// A graph is assembled once — programmatically or by deserializing authored
/// JSON — and is read-only afterwards. Share it behind an `Arc`; sessions
/// only ever look nodes up, they never write back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialogueGraph {
    nodes: HashMap<NodeId, DialogueNode>,
}

impl DialogueGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph. Returns the node's ID.
    pub fn add_node(&mut self, node: DialogueNode) -> GraphResult<NodeId> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id.clone()));
        }

        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        Ok(id)
    }

    /// Get a reference to a node by ID.
    pub fn node(&self, id: &NodeId) -> Option<&DialogueNode> {
        self.nodes.get(id)
    }

    /// The ordered choice list of a node.
    pub fn choices(&self, id: &NodeId) -> GraphResult<&[DialogueChoice]> {
        self.nodes
            .get(id)
            .map(|n| n.choices.as_slice())
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))
    }

    /// Whether the graph contains a node with this ID.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &DialogueNode> {
        self.nodes.values()
    }

    /// Check referential integrity of the whole graph.
    ///
    /// Every successor a choice names must exist, and every offer tag must be
    /// non-empty. Run this after deserializing authored data; `add_node`
    /// alone cannot catch forward references.
    pub fn validate(&self) -> GraphResult<()> {
        for node in self.nodes.values() {
            for choice in &node.choices {
                if let Some(target) = &choice.successor
                    && !self.nodes.contains_key(target)
                {
                    return Err(GraphError::DanglingSuccessor {
                        node: node.id.clone(),
                        choice: choice.text.clone(),
                        target: target.clone(),
                    });
                }
                if let Some(tag) = &choice.offer
                    && tag.as_str().is_empty()
                {
                    return Err(GraphError::EmptyOfferTag {
                        node: node.id.clone(),
                        choice: choice.text.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_graph() -> DialogueGraph {
        let mut graph = DialogueGraph::new();
        graph
            .add_node(
                DialogueNode::new("greeting", "Hello traveler")
                    .with_choice(DialogueChoice::new("Let's trade").with_successor("shop_menu"))
                    .with_choice(DialogueChoice::new("Farewell.")),
            )
            .unwrap();
        graph
            .add_node(DialogueNode::new("shop_menu", "Here's what I have."))
            .unwrap();
        graph
    }

    #[test]
    fn add_and_lookup() {
        let graph = test_graph();
        assert_eq!(graph.len(), 2);

        let node = graph.node(&NodeId::from("greeting")).unwrap();
        assert_eq!(node.text, "Hello traveler");
        assert_eq!(node.choices.len(), 2);

        assert!(graph.node(&NodeId::from("missing")).is_none());
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut graph = test_graph();
        let result = graph.add_node(DialogueNode::new("greeting", "again"));
        assert!(matches!(result, Err(GraphError::DuplicateNode(_))));
        // The original node is untouched.
        assert_eq!(graph.node(&NodeId::from("greeting")).unwrap().text, "Hello traveler");
    }

    #[test]
    fn choices_for_missing_node() {
        let graph = test_graph();
        let result = graph.choices(&NodeId::from("missing"));
        assert!(matches!(result, Err(GraphError::NodeNotFound(_))));
    }

    #[test]
    fn validate_complete_graph() {
        assert!(test_graph().validate().is_ok());
    }

    #[test]
    fn validate_catches_dangling_successor() {
        let mut graph = DialogueGraph::new();
        graph
            .add_node(
                DialogueNode::new("greeting", "Hello")
                    .with_choice(DialogueChoice::new("Onward").with_successor("nowhere")),
            )
            .unwrap();

        let err = graph.validate().unwrap_err();
        assert!(matches!(err, GraphError::DanglingSuccessor { .. }));
    }

    #[test]
    fn validate_catches_empty_offer_tag() {
        let mut graph = DialogueGraph::new();
        graph
            .add_node(
                DialogueNode::new("greeting", "Hello")
                    .with_choice(DialogueChoice::new("Trade").with_offer("")),
            )
            .unwrap();

        let err = graph.validate().unwrap_err();
        assert!(matches!(err, GraphError::EmptyOfferTag { .. }));
    }

    #[test]
    fn deserialize_authored_graph() {
        // The in-memory shape of the authoring format: nodes keyed by id,
        // choices in display order.
        let json = r#"{
            "nodes": {
                "greeting": {
                    "id": "greeting",
                    "text": "Hello traveler",
                    "choices": [
                        { "text": "Let's trade", "successor": "shop_menu", "offer": null },
                        { "text": "Set my respawn here", "successor": null, "offer": "respawn" }
                    ]
                },
                "shop_menu": {
                    "id": "shop_menu",
                    "text": "Here's what I have.",
                    "choices": []
                }
            }
        }"#;

        let graph: DialogueGraph = serde_json::from_str(json).unwrap();
        graph.validate().unwrap();

        let greeting = graph.node(&NodeId::from("greeting")).unwrap();
        assert_eq!(greeting.choices[0].text, "Let's trade");
        assert_eq!(greeting.choices[1].offer, Some("respawn".into()));
        assert!(graph.node(&NodeId::from("shop_menu")).unwrap().is_terminal());
    }
}
