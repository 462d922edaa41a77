use thiserror::Error;

pub type TreeResult<T> = Result<T, TreeError>;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Cannot build a merkle tree from zero leaves")]
    EmptyTree,

    #[error("Index {index} is out of range for {count} values")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Tree index {0} is not a leaf node")]
    NotALeaf(usize),

    #[error("Leaf is not in tree")]
    LeafNotInTree,

    #[error("Unknown tree dump format: {0}")]
    UnknownFormat(String),

    #[error("Unsupported leaf encoding: {0:?} (expected [\"bytes\"])")]
    UnsupportedLeafEncoding(Vec<String>),

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Merkle tree is invalid: {0}")]
    InvalidTree(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
