use std::ops::{Add, Mul};

use enum_map::{EnumMap, enum_map};
use glam::{Vec2, Vec3, Vec4};

use crate::engine::shader::{ShaderType, ShaderValue, ValueKind};

/// Blends the three vertex values of a varying with per-vertex weights.
///
/// Returns `None` when a value does not have the expected kind.
pub type InterpolateFn = fn(&[ShaderValue; 3], [f32; 3]) -> Option<ShaderValue>;

fn blend<T>(values: &[ShaderValue; 3], weights: [f32; 3]) -> Option<ShaderValue>
where
    T: ShaderType + Mul<f32, Output = T> + Add<Output = T>,
{
    let [v0, v1, v2] = *values;
    let (v0, v1, v2) = (T::try_from(v0).ok()?, T::try_from(v1).ok()?, T::try_from(v2).ok()?);
    Some((v0 * weights[0] + v1 * weights[1] + v2 * weights[2]).into())
}

/// Interpolation functions per varying kind.
#[derive(Clone, Debug)]
pub struct Interpolators {
    table: EnumMap<ValueKind, Option<InterpolateFn>>,
}

impl Default for Interpolators {
    fn default() -> Self {
        let float: InterpolateFn = blend::<f32>;
        let vec2: InterpolateFn = blend::<Vec2>;
        let vec3: InterpolateFn = blend::<Vec3>;
        let vec4: InterpolateFn = blend::<Vec4>;

        let table: EnumMap<ValueKind, Option<InterpolateFn>> = enum_map! {
            ValueKind::Float => Some(float),
            ValueKind::Vec2 => Some(vec2),
            ValueKind::Vec3 => Some(vec3),
            ValueKind::Vec4 => Some(vec4),
            ValueKind::Int | ValueKind::Bool | ValueKind::Mat4 => None,
        };

        Self { table }
    }
}

impl Interpolators {
    /// Installs or replaces the function used for varyings of `kind`.
    pub fn register(&mut self, kind: ValueKind, interpolate: InterpolateFn) {
        self.table[kind] = Some(interpolate);
    }

    /// Makes varyings of `kind` fall back to the first vertex's value.
    pub fn unregister(&mut self, kind: ValueKind) {
        self.table[kind] = None;
    }

    /// Whether varyings of `kind` are interpolated.
    pub fn supports(&self, kind: ValueKind) -> bool {
        self.table[kind].is_some()
    }

    /// Picks the function for a varying whose three vertex values are `values`.
    ///
    /// `None` means the varying falls back to the first vertex's value: either
    /// no function is registered for its kind or the vertices disagree on it.
    pub fn resolve(&self, name: &str, values: &[ShaderValue; 3]) -> Option<InterpolateFn> {
        let kind = values[0].kind();
        if values.iter().any(|value| value.kind() != kind) {
            log::warn!("Varying '{name}' changes kind between vertices. Using value from first vertex.");
            return None;
        }
        let interpolate = self.table[kind];
        if interpolate.is_none() {
            log::warn!(
                "Varying '{name}' of kind {kind:?} cannot be interpolated. Using value from first vertex."
            );
        }
        interpolate
    }
}

/// A varying of one triangle, ready to be evaluated per pixel.
#[derive(Copy, Clone, Debug)]
pub(super) struct TriangleVarying {
    pub slot:        usize,
    pub values:      [ShaderValue; 3],
    pub interpolate: Option<InterpolateFn>,
}

impl TriangleVarying {
    pub fn evaluate(&self, weights: [f32; 3]) -> ShaderValue {
        self.interpolate
            .and_then(|interpolate| interpolate(&self.values, weights))
            .unwrap_or(self.values[0])
    }
}
