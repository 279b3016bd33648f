use thiserror::Error;

use crate::engine::container::ContainerError;

/// Preconditions of a draw call that were not met.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// `first`/`count` do not fit the vertex buffer.
    #[error("invalid vertex range: {0}")]
    VertexRange(#[from] ContainerError),
}
