//! `soft_rend_pipeline`
//!
//! A CPU rasterization pipeline modelled on a fixed-function GPU: a vertex
//! stage and a fragment stage bound through role-tagged I/O records, triangle
//! rasterization with perspective-correct interpolation and a frame target
//! with color and depth attachments.
//!
//! ```
//! use glam::{Vec3, Vec4};
//! use soft_rend_pipeline::{
//!     FragmentShader, FrameTarget, LinearBuffer, PrimitiveType, Renderer, ShaderProgram,
//!     VertexShader, shader_io, vertex_format,
//! };
//!
//! vertex_format! {
//!     pub struct Point { pub position: Vec3 }
//! }
//!
//! shader_io! {
//!     pub struct PassVertexIo: vertex { #[Attribute] pub position: Vec3 }
//! }
//!
//! shader_io! {
//!     pub struct WhiteFragmentIo: fragment {}
//! }
//!
//! struct Pass;
//!
//! impl VertexShader for Pass {
//!     type Io = PassVertexIo;
//!
//!     fn main(&self, io: &mut PassVertexIo) {
//!         io.builtin.clip_position = io.position.extend(1.0);
//!     }
//! }
//!
//! struct White;
//!
//! impl FragmentShader for White {
//!     type Io = WhiteFragmentIo;
//!
//!     fn main(&self, io: &mut WhiteFragmentIo) {
//!         io.builtin.frag_color = Vec4::ONE;
//!     }
//! }
//!
//! let program = ShaderProgram::new(Pass, White)?;
//! let vertices = LinearBuffer::from(vec![
//!     Point::new(Vec3::new(-1.0, -1.0, 0.0)),
//!     Point::new(Vec3::new(1.0, -1.0, 0.0)),
//!     Point::new(Vec3::new(0.0, 1.0, 0.0)),
//! ]);
//! let mut target = FrameTarget::create(8, 8, Some(Vec4::W), Some(1.0))?;
//!
//! let stats = Renderer::new().render(&mut target, &program, &vertices, PrimitiveType::Triangles, 0, 3)?;
//! assert!(stats.fragments_written > 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![allow(unused_results)]

pub mod constants;
pub mod engine;
pub mod log_utils;

// Used by the `soft_rend` binary only.
use clap as _;
use dotenv as _;
use image as _;
#[cfg(target_os = "linux")]
use tikv_jemallocator as _;

pub use engine::container::{
    ContainerError,
    FrameTarget,
    FrameTargetDescriptor,
    FrameTargetDescriptorBuilder,
    GridBuffer,
    LinearBuffer,
};
pub use engine::renderer::{
    DrawStats,
    FillRule,
    FragCoordW,
    InterpolateFn,
    Interpolators,
    PrimitiveType,
    RenderError,
    Renderer,
    RendererConfig,
    RendererConfigBuilder,
};
pub use engine::shader::{
    BindingError,
    BindingPolicy,
    BindingPolicyBuilder,
    FragmentBuiltins,
    FragmentIo,
    FragmentShader,
    ShaderProgram,
    ShaderRecord,
    ShaderType,
    ShaderValue,
    SlotDesc,
    SlotRole,
    ValueKind,
    VaryingValues,
    Vertex,
    VertexBuiltins,
    VertexIo,
    VertexShader,
};
