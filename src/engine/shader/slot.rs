use enum_map::Enum;

use super::value::ValueKind;

/// Role a record field plays in the pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enum)]
pub enum SlotRole {
    /// Copied from the same-named field of the vertex being shaded.
    Attribute,
    /// Copied from the program's uniform store.
    Uniform,
    /// Written by the vertex stage, interpolated for the fragment stage.
    Varying,
    /// Managed by the pipeline itself.
    BuiltIn,
}

/// Static description of one named field of a shader I/O record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlotDesc {
    /// Field name, unique within its record.
    pub name: &'static str,
    /// Where the value comes from.
    pub role: SlotRole,
    /// Value kind stored in the field.
    pub kind: ValueKind,
}

impl SlotDesc {
    pub const fn new(name: &'static str, role: SlotRole, kind: ValueKind) -> Self {
        Self { name, role, kind }
    }
}
