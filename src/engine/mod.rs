//! Buffers, shader binding and the triangle renderer.

pub mod container;
pub mod renderer;
pub mod shader;
