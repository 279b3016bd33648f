//! Shader stages and the slot-based binding between them.
//!
//! Vertex and fragment programs exchange data through I/O records. A record
//! lists its fields as [`SlotDesc`]s tagged with a [`SlotRole`];
//! [`ShaderProgram`] reads those tables once and afterwards moves attribute,
//! uniform and varying values by slot index.

mod error;
mod io;
pub(crate) mod macros;
mod program;
mod slot;
mod value;

pub use error::BindingError;
pub use io::{
    FRAGMENT_BUILTIN_SLOTS,
    FragmentBuiltins,
    FragmentIo,
    FragmentShader,
    ShaderRecord,
    VERTEX_BUILTIN_SLOTS,
    Vertex,
    VertexBuiltins,
    VertexIo,
    VertexShader,
};
pub use program::{
    BindingPolicy,
    BindingPolicyBuilder,
    BindingPolicyBuilderError,
    BoundSlot,
    ShaderProgram,
    StageLayout,
    VaryingValues,
};
pub use slot::{SlotDesc, SlotRole};
pub use value::{ShaderType, ShaderValue, ValueKind};
