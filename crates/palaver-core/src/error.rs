use crate::node::NodeId;

/// Alias for `Result<T, GraphError>`.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur when assembling or validating a dialogue graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The requested node ID does not exist in the graph.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// A node with the same ID was already added.
    #[error("duplicate node: \"{0}\"")]
    DuplicateNode(NodeId),

    /// A choice names a successor node that is not part of the graph.
    #[error("dangling successor: choice \"{choice}\" on node \"{node}\" points to \"{target}\"")]
    DanglingSuccessor {
        /// The node the offending choice belongs to.
        node: NodeId,
        /// The display text of the offending choice.
        choice: String,
        /// The missing successor id.
        target: NodeId,
    },

    /// A choice carries an offer tag with no name.
    #[error("empty offer tag: choice \"{choice}\" on node \"{node}\"")]
    EmptyOfferTag {
        /// The node the offending choice belongs to.
        node: NodeId,
        /// The display text of the offending choice.
        choice: String,
    },
}
