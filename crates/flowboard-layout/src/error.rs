#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("node {node} references missing parent {parent}")]
    DanglingReference { node: String, parent: String },

    #[error("node id {id} appears more than once")]
    DuplicateId { id: String },

    #[error("parent references form a cycle: {}", nodes.join(" -> "))]
    Cycle { nodes: Vec<String> },

    #[error("invalid node size hint {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
