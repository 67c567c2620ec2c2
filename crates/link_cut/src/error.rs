//! Contract violations reported by the public forest API.

use thiserror::Error;

/// Result type for forest operations.
pub type Result<T> = std::result::Result<T, InvalidOperation>;

/// A call that would break the forest's contract.
///
/// Every variant is detected at the API boundary before the represented
/// topology is touched, so a rejected call leaves the forest usable.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidOperation {
    /// Vertex id outside `0..len`.
    #[error("vertex {vertex} out of range for forest of {len} vertices")]
    VertexOutOfRange { vertex: usize, len: usize },

    /// `link`/`cut` called with both endpoints equal.
    #[error("self loop on vertex {0}")]
    SelfLoop(usize),

    /// `link` on two vertices of the same tree.
    #[error("vertices {0} and {1} are already connected")]
    AlreadyConnected(usize, usize),

    /// `cut` on a pair that is not a tree edge.
    #[error("({0}, {1}) is not an edge of the forest")]
    NotAnEdge(usize, usize),

    /// Path query across two different trees.
    #[error("vertices {0} and {1} are not connected")]
    Disconnected(usize, usize),

    /// `path_kth` index past the end of the path.
    #[error("path index {index} out of range for path of {len} vertices")]
    PathIndexOutOfRange { index: usize, len: usize },
}
