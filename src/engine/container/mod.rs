//! Vertex storage and render targets.

mod error;
mod frame_buffer;
mod grid_buffer;
mod linear_buffer;

pub use error::ContainerError;
pub use frame_buffer::{
    FrameTarget,
    FrameTargetDescriptor,
    FrameTargetDescriptorBuilder,
    FrameTargetDescriptorBuilderError,
};
pub use grid_buffer::GridBuffer;
pub use linear_buffer::LinearBuffer;
