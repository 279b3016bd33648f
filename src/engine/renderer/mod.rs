//! Draw calls: vertex stage, triangle setup, rasterization and fragment stage.

use std::any::type_name;

use derive_builder::Builder;
use glam::{Vec2, Vec4};

mod error;
mod raster;
mod stats;
mod varying;

pub use error::RenderError;
pub use raster::{FillRule, PixelRect, TriangleEdges, edge_function, ndc_from_clip, viewport_transform};
pub use stats::DrawStats;
pub use varying::{InterpolateFn, Interpolators};
use varying::TriangleVarying;

use super::container::{FrameTarget, LinearBuffer};
use super::shader::{
    FragmentIo,
    FragmentShader,
    ShaderProgram,
    ShaderRecord,
    SlotRole,
    VaryingValues,
    Vertex,
    VertexIo,
    VertexShader,
};
use crate::constants::NEAR_CLIP_PLANE_W;

/// How consecutive vertices are assembled into primitives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// One point per vertex.
    Points,
    /// A segment per vertex pair.
    Lines,
    /// Connected segments.
    LineStrip,
    /// A triangle per vertex triple.
    Triangles,
    /// Each vertex after the second closes a triangle with the previous two.
    TriangleStrip,
    /// Triangles sharing the first vertex.
    TriangleFan,
}

/// What the fragment stage finds in `frag_coord.w`.
///
/// With `S = Σ b_i / w_i` over the barycentric weights `b_i` of the fragment
/// and the clip-space `w_i` of the triangle's vertices.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FragCoordW {
    /// `1 / S²`, i.e. the square of the perspective-correct clip `w`.
    #[default]
    SquaredClipW,
    /// `S`, the interpolated `1/w` as GLSL defines `gl_FragCoord.w`.
    InverseClipW,
}

/// Tunables of a [`Renderer`].
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
#[builder(derive(Debug))]
pub struct RendererConfig {
    /// Clip-space `w` below which a vertex counts as behind the eye.
    #[builder(default = "NEAR_CLIP_PLANE_W")]
    pub near_clip_w:  f32,
    /// Ownership of pixels lying exactly on an edge.
    #[builder(default)]
    pub fill_rule:    FillRule,
    /// Content of `frag_coord.w`.
    #[builder(default)]
    pub frag_coord_w: FragCoordW,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            near_clip_w:  NEAR_CLIP_PLANE_W,
            fill_rule:    FillRule::default(),
            frag_coord_w: FragCoordW::default(),
        }
    }
}

/// Runs draw calls through the vertex stage, rasterizer and fragment stage.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    config:        RendererConfig,
    interpolators: Interpolators,
}

impl Renderer {
    /// Renderer with the default [`RendererConfig`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RendererConfig) -> Self {
        Self { config, interpolators: Interpolators::default() }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Table deciding how each varying kind is interpolated.
    pub fn interpolators_mut(&mut self) -> &mut Interpolators {
        &mut self.interpolators
    }

    /// Draws `count` vertices starting at `first` into `target`.
    ///
    /// Only an invalid vertex range is reported as an error. Everything that
    /// goes wrong per vertex, triangle or fragment is logged, counted in the
    /// returned [`DrawStats`] and skipped.
    pub fn render<V, VS, FS>(
        &self, target: &mut FrameTarget, program: &ShaderProgram<VS, FS>,
        vertices: &LinearBuffer<V>, primitive: PrimitiveType, first: usize, count: usize,
    ) -> Result<DrawStats, RenderError>
    where
        V: Vertex,
        VS: VertexShader,
        FS: FragmentShader,
    {
        let mut stats = DrawStats::default();

        if vertices.is_empty() {
            return Ok(stats);
        }

        let range = vertices.range(first, count)?;

        if primitive != PrimitiveType::Triangles {
            log::warn!("PrimitiveType {primitive:?} not yet supported. Only Triangles.");
            return Ok(stats);
        }

        let processed = Self::process_vertices(range, program, &mut stats);

        // Failed vertices keep their position, so only the triangles using
        // them are lost.
        for (index, triangle) in processed.chunks_exact(3).enumerate() {
            let [Some(v0), Some(v1), Some(v2)] = triangle else {
                stats.triangles_incomplete += 1;
                log::trace!("Triangle {index} skipped, one of its vertices failed to bind");
                continue;
            };
            stats.triangles_assembled += 1;
            self.rasterize_triangle([v0, v1, v2], program, target, &mut stats);
        }

        log::trace!("Draw call finished: {stats}");

        Ok(stats)
    }

    fn process_vertices<'v, V, VS, FS>(
        vertices: impl Iterator<Item = &'v V>, program: &ShaderProgram<VS, FS>,
        stats: &mut DrawStats,
    ) -> Vec<Option<VS::Io>>
    where
        V: Vertex + 'v,
        VS: VertexShader,
        FS: FragmentShader,
    {
        vertices
            .map(|vertex| match program.create_and_prepare_vertex_io(vertex) {
                Ok(mut io) => {
                    program.execute_vertex_shader(&mut io);
                    stats.vertices_shaded += 1;
                    Some(io)
                },
                Err(err) => {
                    log::warn!("Failed to create vertex I/O from vertex object {}: {err}", type_name::<V>());
                    stats.vertices_dropped += 1;
                    None
                },
            })
            .collect()
    }

    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    fn rasterize_triangle<VS, FS>(
        &self, triangle: [&VS::Io; 3], program: &ShaderProgram<VS, FS>, target: &mut FrameTarget,
        stats: &mut DrawStats,
    ) where
        VS: VertexShader,
        FS: FragmentShader,
    {
        let clip = triangle.map(|io| io.clip_position());

        let behind = clip.iter().filter(|p| p.w < self.config.near_clip_w).count();
        if behind == 3 {
            stats.triangles_clipped += 1;
            log::trace!("Triangle behind the near plane dropped");
            return;
        }
        if behind > 0 {
            // No polygon clipping: a triangle crossing the near plane is lost.
            stats.triangles_clipped += 1;
            log::trace!("Triangle crossing the near plane dropped");
            return;
        }

        let ndc = clip.map(ndc_from_clip);

        #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
        let (viewport_width, viewport_height) = (target.width() as f32, target.height() as f32);
        let screen = ndc.map(|p| viewport_transform(p, viewport_width, viewport_height));

        let w_inv = clip.map(|p| 1.0 / p.w);

        let Some(edges) = TriangleEdges::new(screen, self.config.fill_rule) else {
            stats.triangles_degenerate += 1;
            return;
        };

        stats.triangles_rasterized += 1;

        let bounds = PixelRect::around(&screen, target.width(), target.height());
        if bounds.is_empty() {
            return;
        }

        let varyings: Vec<TriangleVarying> = program
            .vertex_layout()
            .slots(SlotRole::Varying)
            .iter()
            .filter_map(|slot| {
                let [v0, v1, v2] = triangle.map(|io| io.read_slot(slot.index));
                let values = [v0?, v1?, v2?];
                Some(TriangleVarying {
                    slot: slot.index,
                    values,
                    interpolate: self.interpolators.resolve(slot.name, &values),
                })
            })
            .collect();

        let mut interpolated =
            VaryingValues::with_capacity_and_hasher(varyings.len(), Default::default());

        for y in bounds.min_y..=bounds.max_y {
            for x in bounds.min_x..=bounds.max_x {
                #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
                let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

                let Some([b0, b1, b2]) = edges.barycentric(pixel_center) else {
                    continue;
                };

                let w_sum = b0 * w_inv[0] + b1 * w_inv[1] + b2 * w_inv[2];
                let perspective_correction = 1.0 / w_sum;

                let depth_ndc = (b0 * ndc[0].z * w_inv[0]
                    + b1 * ndc[1].z * w_inv[1]
                    + b2 * ndc[2].z * w_inv[2])
                    * perspective_correction;
                let depth = (depth_ndc + 1.0) * 0.5;

                if let Some(stored) = target.depth_attachment().and_then(|d| d.get(x, y)) {
                    if !(depth < stored) {
                        stats.depth_rejected += 1;
                        continue;
                    }
                }

                let weights = [
                    b0 * w_inv[0] * perspective_correction,
                    b1 * w_inv[1] * perspective_correction,
                    b2 * w_inv[2] * perspective_correction,
                ];
                interpolated.clear();
                interpolated
                    .extend(varyings.iter().map(|varying| (varying.slot, varying.evaluate(weights))));

                let frag_w = match self.config.frag_coord_w {
                    FragCoordW::SquaredClipW => 1.0 / (w_sum / perspective_correction),
                    FragCoordW::InverseClipW => w_sum,
                };
                let frag_coord = Vec4::new(pixel_center.x, pixel_center.y, depth, frag_w);

                let mut io = match program.create_and_prepare_fragment_io(&interpolated, frag_coord) {
                    Ok(io) => io,
                    Err(err) => {
                        log::warn!("Failed to create fragment I/O at ({x}, {y}): {err}");
                        stats.fragments_dropped += 1;
                        continue;
                    },
                };

                program.execute_fragment_shader(&mut io);
                stats.fragments_shaded += 1;

                let out = io.builtins();
                if out.discarded {
                    stats.fragments_discarded += 1;
                    continue;
                }

                if let Some(color) = target.color_attachment_mut() {
                    color.set(x, y, out.frag_color);
                }
                if let Some(depth_buffer) = target.depth_attachment_mut() {
                    depth_buffer.set(x, y, out.frag_depth.unwrap_or(depth));
                }
                stats.fragments_written += 1;
            }
        }
    }
}
