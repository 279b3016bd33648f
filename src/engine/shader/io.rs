use glam::Vec4;

use super::error::BindingError;
use super::slot::{SlotDesc, SlotRole};
use super::value::{ShaderValue, ValueKind};

/// A record type whose named fields can be moved in and out by slot index.
///
/// Slots are listed in declaration order; `read_slot`/`write_slot` use the
/// position in [`ShaderRecord::slots`] as index. Indices past the end read as
/// `None` and writes to them are ignored.
pub trait ShaderRecord: Default {
    fn slots() -> &'static [SlotDesc];

    fn read_slot(&self, index: usize) -> Option<ShaderValue>;

    /// Fails with the kind of `value` when it does not match the slot's kind.
    fn write_slot(&mut self, index: usize, value: ShaderValue) -> Result<(), ValueKind>;

    fn instantiate() -> Result<Self, BindingError> {
        Ok(Self::default())
    }
}

/// Pipeline-owned fields of every vertex I/O record.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VertexBuiltins {
    /// Required output of the vertex stage.
    pub clip_position: Vec4,
}

/// Pipeline-owned fields of every fragment I/O record.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FragmentBuiltins {
    /// Pixel centre x, pixel centre y, depth in `[0,1]`, interpolated `1/w`.
    pub frag_coord: Vec4,
    /// Written to the color attachment.
    pub frag_color: Vec4,
    /// Replaces the interpolated depth on write when set.
    pub frag_depth: Option<f32>,
    /// Set by [`FragmentBuiltins::discard`].
    pub discarded:  bool,
}

impl Default for FragmentBuiltins {
    fn default() -> Self {
        Self {
            frag_coord: Vec4::ZERO,
            frag_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            frag_depth: None,
            discarded:  false,
        }
    }
}

impl FragmentBuiltins {
    /// Drops the fragment; nothing is written for it.
    pub fn discard(&mut self) {
        self.discarded = true;
    }
}

/// Names reserved by [`VertexBuiltins`].
pub const VERTEX_BUILTIN_SLOTS: &[SlotDesc] =
    &[SlotDesc::new("clip_position", SlotRole::BuiltIn, ValueKind::Vec4)];

/// Names reserved by [`FragmentBuiltins`].
pub const FRAGMENT_BUILTIN_SLOTS: &[SlotDesc] = &[
    SlotDesc::new("frag_coord", SlotRole::BuiltIn, ValueKind::Vec4),
    SlotDesc::new("frag_color", SlotRole::BuiltIn, ValueKind::Vec4),
    SlotDesc::new("frag_depth", SlotRole::BuiltIn, ValueKind::Float),
    SlotDesc::new("discarded", SlotRole::BuiltIn, ValueKind::Bool),
];

/// I/O record of a vertex program.
pub trait VertexIo: ShaderRecord {
    fn builtins(&self) -> &VertexBuiltins;
    fn builtins_mut(&mut self) -> &mut VertexBuiltins;

    fn builtin_slots() -> &'static [SlotDesc] {
        VERTEX_BUILTIN_SLOTS
    }

    fn clip_position(&self) -> Vec4 {
        self.builtins().clip_position
    }
}

/// I/O record of a fragment program.
pub trait FragmentIo: ShaderRecord {
    fn builtins(&self) -> &FragmentBuiltins;
    fn builtins_mut(&mut self) -> &mut FragmentBuiltins;

    fn builtin_slots() -> &'static [SlotDesc] {
        FRAGMENT_BUILTIN_SLOTS
    }
}

/// A vertex record that exposes its fields to attribute slots by name.
pub trait Vertex {
    fn attribute(&self, name: &str) -> Option<ShaderValue>;
}

/// The vertex-stage program.
pub trait VertexShader {
    type Io: VertexIo;

    fn main(&self, io: &mut Self::Io);
}

/// The fragment-stage program.
pub trait FragmentShader {
    type Io: FragmentIo;

    fn main(&self, io: &mut Self::Io);
}
