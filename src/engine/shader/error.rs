use thiserror::Error;

use super::value::ValueKind;

/// Problems binding shader I/O records to the pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// A record slot without a name.
    #[error("{record} declares a slot with an empty name")]
    EmptySlotName { record: &'static str },

    /// Two slots of one record share a name.
    #[error("slot '{name}' is declared more than once in {record}")]
    DuplicateSlot { record: &'static str, name: &'static str },

    /// A slot shadows a built-in.
    #[error("slot '{name}' in {record} collides with a built-in of the same name")]
    ReservedSlotName { record: &'static str, name: &'static str },

    /// The vertex has no field for an attribute slot.
    #[error("attribute '{name}' not found in vertex object {vertex}")]
    MissingAttribute { vertex: &'static str, name: &'static str },

    /// A value of the wrong kind was offered to a slot.
    #[error("type mismatch for slot '{name}' of {record}: expected {expected:?}, got {found:?}")]
    TypeMismatch {
        record:   &'static str,
        name:     &'static str,
        expected: ValueKind,
        found:    ValueKind,
    },

    /// A record could not be created.
    #[error("{record} could not be instantiated: {reason}")]
    RecordUnavailable { record: &'static str, reason: String },
}

impl BindingError {
    /// Schema errors abort program creation; everything else only affects the
    /// vertex or fragment being bound.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BindingError::EmptySlotName { .. }
                | BindingError::DuplicateSlot { .. }
                | BindingError::ReservedSlotName { .. }
        )
    }
}
