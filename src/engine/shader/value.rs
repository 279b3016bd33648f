use enum_map::Enum;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Discriminant of [`ShaderValue`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enum)]
pub enum ValueKind {
    /// `f32`
    Float,
    /// `i32`
    Int,
    /// `bool`
    Bool,
    /// `glam::Vec2`
    Vec2,
    /// `glam::Vec3`
    Vec3,
    /// `glam::Vec4`
    Vec4,
    /// `glam::Mat4`
    Mat4,
}

/// Every value that can travel through an attribute, uniform or varying slot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShaderValue {
    /// Value of kind [`ValueKind::Float`].
    Float(f32),
    /// Value of kind [`ValueKind::Int`].
    Int(i32),
    /// Value of kind [`ValueKind::Bool`].
    Bool(bool),
    /// Value of kind [`ValueKind::Vec2`].
    Vec2(Vec2),
    /// Value of kind [`ValueKind::Vec3`].
    Vec3(Vec3),
    /// Value of kind [`ValueKind::Vec4`].
    Vec4(Vec4),
    /// Value of kind [`ValueKind::Mat4`].
    Mat4(Mat4),
}

impl ShaderValue {
    /// Discriminant of `self`.
    pub fn kind(&self) -> ValueKind {
        match self {
            ShaderValue::Float(_) => ValueKind::Float,
            ShaderValue::Int(_) => ValueKind::Int,
            ShaderValue::Bool(_) => ValueKind::Bool,
            ShaderValue::Vec2(_) => ValueKind::Vec2,
            ShaderValue::Vec3(_) => ValueKind::Vec3,
            ShaderValue::Vec4(_) => ValueKind::Vec4,
            ShaderValue::Mat4(_) => ValueKind::Mat4,
        }
    }
}

/// A Rust type stored in exactly one [`ValueKind`].
///
/// Conversion out of a [`ShaderValue`] of another kind fails with the kind that
/// was actually found, which the binding layer reports as a type mismatch.
pub trait ShaderType:
    Copy + Default + Into<ShaderValue> + TryFrom<ShaderValue, Error = ValueKind>
{
    const KIND: ValueKind;
}

macro_rules! impl_shader_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ShaderValue {
                fn from(value: $ty) -> Self {
                    ShaderValue::$variant(value)
                }
            }

            impl TryFrom<ShaderValue> for $ty {
                type Error = ValueKind;

                fn try_from(value: ShaderValue) -> Result<Self, Self::Error> {
                    match value {
                        ShaderValue::$variant(inner) => Ok(inner),
                        other => Err(other.kind()),
                    }
                }
            }

            impl ShaderType for $ty {
                const KIND: ValueKind = ValueKind::$variant;
            }
        )*
    };
}

impl_shader_type! {
    f32 => Float,
    i32 => Int,
    bool => Bool,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Vec4 => Vec4,
    Mat4 => Mat4,
}
