/// Declares a shader I/O record.
///
/// Every field is tagged with its [`SlotRole`](crate::SlotRole) and must be a
/// [`ShaderType`](crate::ShaderType). The generated struct gets a `builtin`
/// field holding the pipeline built-ins of its stage.
///
/// ```
/// use glam::{Mat4, Vec3};
/// use soft_rend_pipeline::shader_io;
///
/// shader_io! {
///     pub struct TintVertexIo: vertex {
///         #[Uniform] pub mvp: Mat4,
///         #[Attribute] pub position: Vec3,
///         #[Varying] pub tint: Vec3,
///     }
/// }
///
/// shader_io! {
///     pub struct TintFragmentIo: fragment {
///         #[Varying] pub tint: Vec3,
///     }
/// }
/// ```
#[macro_export]
macro_rules! shader_io {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : vertex {
            $( #[$role:ident] $field_vis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default)]
        $vis struct $name {
            /// Pipeline-owned vertex outputs.
            pub builtin: $crate::VertexBuiltins,
            $( $field_vis $field: $ty, )*
        }

        impl $crate::VertexIo for $name {
            fn builtins(&self) -> &$crate::VertexBuiltins {
                &self.builtin
            }

            fn builtins_mut(&mut self) -> &mut $crate::VertexBuiltins {
                &mut self.builtin
            }
        }

        $crate::__shader_record_impl!($name { $( $role $field : $ty ),* });
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : fragment {
            $( #[$role:ident] $field_vis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default)]
        $vis struct $name {
            /// Pipeline-owned fragment inputs and outputs.
            pub builtin: $crate::FragmentBuiltins,
            $( $field_vis $field: $ty, )*
        }

        impl $crate::FragmentIo for $name {
            fn builtins(&self) -> &$crate::FragmentBuiltins {
                &self.builtin
            }

            fn builtins_mut(&mut self) -> &mut $crate::FragmentBuiltins {
                &mut self.builtin
            }
        }

        $crate::__shader_record_impl!($name { $( $role $field : $ty ),* });
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __shader_record_impl {
    ($name:ident { $( $role:ident $field:ident : $ty:ty ),* }) => {
        impl $crate::ShaderRecord for $name {
            fn slots() -> &'static [$crate::SlotDesc] {
                const SLOTS: &[$crate::SlotDesc] = &[
                    $(
                        $crate::SlotDesc::new(
                            stringify!($field),
                            $crate::SlotRole::$role,
                            <$ty as $crate::ShaderType>::KIND,
                        ),
                    )*
                ];
                SLOTS
            }

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn read_slot(&self, index: usize) -> Option<$crate::ShaderValue> {
                let mut slot = 0_usize;
                $(
                    if slot == index {
                        return Some($crate::ShaderValue::from(self.$field));
                    }
                    slot += 1;
                )*
                None
            }

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn write_slot(
                &mut self, index: usize, value: $crate::ShaderValue,
            ) -> Result<(), $crate::ValueKind> {
                let mut slot = 0_usize;
                $(
                    if slot == index {
                        self.$field = <$ty as ::core::convert::TryFrom<$crate::ShaderValue>>::try_from(value)?;
                        return Ok(());
                    }
                    slot += 1;
                )*
                Ok(())
            }
        }
    };
}

/// Declares a vertex record whose fields feed attribute slots of the same name.
///
/// ```
/// use glam::Vec3;
/// use soft_rend_pipeline::{Vertex, vertex_format};
///
/// vertex_format! {
///     pub struct ColoredVertex {
///         pub position: Vec3,
///         pub color: Vec3,
///     }
/// }
///
/// let vertex = ColoredVertex::new(Vec3::ZERO, Vec3::X);
/// assert!(vertex.attribute("color").is_some());
/// assert!(vertex.attribute("normal").is_none());
/// ```
#[macro_export]
macro_rules! vertex_format {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $field_vis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        $vis struct $name {
            $( $field_vis $field: $ty, )*
        }

        impl $name {
            /// Builds the vertex from its fields in declaration order.
            #[allow(clippy::too_many_arguments)]
            pub fn new($( $field: $ty ),*) -> Self {
                Self { $( $field ),* }
            }
        }

        impl $crate::Vertex for $name {
            #[allow(unused_variables)]
            fn attribute(&self, name: &str) -> Option<$crate::ShaderValue> {
                $(
                    if name == stringify!($field) {
                        return Some($crate::ShaderValue::from(self.$field));
                    }
                )*
                None
            }
        }
    };
}
