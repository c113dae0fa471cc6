use crate::model::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{category} {id} not found")]
    NotFound { category: &'static str, id: String },

    #[error("node {id} is missing required field `{field}`")]
    MissingField { id: NodeId, field: &'static str },

    #[error("node {node} references missing parent {parent}")]
    DanglingReference { node: String, parent: String },

    #[error("invalid invocation of {operation}: {reason}")]
    InvalidInvocation {
        operation: &'static str,
        reason: String,
    },

    #[error("node id {id} appears more than once")]
    DuplicateId { id: String },

    #[error("parent references form a cycle: {}", nodes.join(" -> "))]
    Cycle { nodes: Vec<String> },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error(transparent)]
    Layout(flowboard_layout::Error),
}

impl From<flowboard_layout::Error> for Error {
    fn from(err: flowboard_layout::Error) -> Self {
        match err {
            flowboard_layout::Error::DanglingReference { node, parent } => {
                Error::DanglingReference { node, parent }
            }
            flowboard_layout::Error::DuplicateId { id } => Error::DuplicateId { id },
            flowboard_layout::Error::Cycle { nodes } => Error::Cycle { nodes },
            other => Error::Layout(other),
        }
    }
}

impl Error {
    pub(crate) fn not_found(category: &'static str, id: impl Into<String>) -> Self {
        Error::NotFound {
            category,
            id: id.into(),
        }
    }

    pub(crate) fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!(operation, %reason, "rejected invocation");
        Error::InvalidInvocation { operation, reason }
    }
}
