mod common;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use common::*;
use glam::{Vec2, Vec3, Vec4};
use soft_rend_pipeline::engine::renderer::{TriangleEdges, ndc_from_clip, viewport_transform};
use soft_rend_pipeline::{
    ContainerError,
    DrawStats,
    FillRule,
    FragCoordW,
    FrameTarget,
    FrameTargetDescriptorBuilder,
    LinearBuffer,
    PrimitiveType,
    RenderError,
    Renderer,
    RendererConfigBuilder,
    ShaderValue,
    Vertex,
};

fn draw(target: &mut FrameTarget, program: &TestProgram, vertices: &[ClipVertex]) -> DrawStats {
    let buffer = LinearBuffer::create(vertices);
    Renderer::new()
        .render(target, program, &buffer, PrimitiveType::Triangles, 0, buffer.len())
        .unwrap()
}

#[test]
fn white_triangle_over_black_target() {
    let mut target = black_target(200, 200);
    let triangle = [
        vertex(clip_at(&target, 10.0, 10.0, 0.5, 1.0)),
        vertex(clip_at(&target, 110.0, 10.0, 0.5, 1.0)),
        vertex(clip_at(&target, 60.0, 100.0, 0.5, 1.0)),
    ];

    let stats = draw(&mut target, &program(MODE_TINT), &triangle);

    let color = target.color_attachment().unwrap();
    assert_eq!(color.get(60, 50), Some(WHITE));
    assert_eq!(color.get(5, 5), Some(BLACK));
    assert_eq!(stats.triangles_rasterized, 1);
    assert_abs_diff_eq!(target.depth_attachment().unwrap().get(60, 50).unwrap(), 0.5, epsilon = 1e-5);
}

#[test]
fn covered_pixels_match_edge_test_and_nothing_else_changes() {
    let mut target = black_target(32, 32);
    let screen = [Vec2::new(3.2, 4.7), Vec2::new(27.9, 9.1), Vec2::new(12.4, 26.3)];
    let triangle = screen.map(|p| vertex(clip_at(&target, p.x, p.y, 0.5, 1.0)));

    draw(&mut target, &program(MODE_TINT), &triangle);

    // Rebuild the screen positions exactly the way the rasterizer does.
    let projected = triangle.map(|v| viewport_transform(ndc_from_clip(v.position), 32.0, 32.0));
    let edges = TriangleEdges::new(projected, FillRule::Inclusive).unwrap();
    let color = target.color_attachment().unwrap();

    for y in 0..32 {
        for x in 0..32 {
            #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let expected = if edges.barycentric(center).is_some() { WHITE } else { BLACK };
            assert_eq!(color.get(x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn varyings_are_exact_at_vertices() {
    let mut target = black_target(8, 8);
    let colors = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)];
    let triangle = [
        colored(clip_at(&target, 0.5, 0.5, 0.5, 1.0), colors[0]),
        colored(clip_at(&target, 6.5, 0.5, 0.5, 2.0), colors[1]),
        colored(clip_at(&target, 0.5, 6.5, 0.5, 4.0), colors[2]),
    ];

    draw(&mut target, &program(MODE_COLOR), &triangle);

    let color = target.color_attachment().unwrap();
    for ((x, y), expected) in [(0, 0), (6, 0), (0, 6)].into_iter().zip(colors) {
        let shaded = color.get(x, y).unwrap().truncate();
        assert!(shaded.abs_diff_eq(expected, 1e-5), "({x}, {y}): {shaded} != {expected}");
    }
}

#[test]
fn interpolation_is_perspective_correct() {
    let target = black_target(16, 16);
    let triangle = [
        vertex(clip_at(&target, 0.0, 0.0, 0.3, 1.0)),
        vertex(clip_at(&target, 16.0, 0.0, 0.6, 3.0)),
        vertex(clip_at(&target, 0.0, 16.0, 0.9, 5.0)),
    ];
    let buffer = LinearBuffer::create(&triangle);
    let program = program(MODE_CLIP_W);

    for frag_coord_w in [FragCoordW::SquaredClipW, FragCoordW::InverseClipW] {
        let mut target = black_target(16, 16);
        let config = RendererConfigBuilder::default().frag_coord_w(frag_coord_w).build().unwrap();

        let stats = Renderer::with_config(config)
            .render(&mut target, &program, &buffer, PrimitiveType::Triangles, 0, 3)
            .unwrap();
        assert!(stats.fragments_written > 0);

        // Red holds the interpolated clip w, green holds frag_coord.w.
        let written = pixels(&target).into_iter().filter(|c| *c != BLACK).collect::<Vec<_>>();
        assert_eq!(written.len(), stats.fragments_written);
        for c in written {
            assert!(c.x >= 1.0 && c.x <= 5.0, "{c}");
            match frag_coord_w {
                FragCoordW::SquaredClipW => assert_relative_eq!(c.y, c.x * c.x, max_relative = 1e-4),
                FragCoordW::InverseClipW => assert_relative_eq!(c.x * c.y, 1.0, max_relative = 1e-4),
            }
        }
    }
}

#[test]
fn nearer_triangle_wins_in_either_order() {
    let target = black_target(8, 8);
    let near = [
        colored(clip_at(&target, 0.0, 0.0, 0.25, 1.0), Vec3::X),
        colored(clip_at(&target, 8.0, 0.0, 0.25, 1.0), Vec3::X),
        colored(clip_at(&target, 0.0, 8.0, 0.25, 1.0), Vec3::X),
    ];
    let far = [
        colored(clip_at(&target, 0.0, 0.0, 0.75, 1.0), Vec3::Y),
        colored(clip_at(&target, 8.0, 0.0, 0.75, 1.0), Vec3::Y),
        colored(clip_at(&target, 0.0, 8.0, 0.75, 1.0), Vec3::Y),
    ];
    let program = program(MODE_COLOR);

    for order in [[near, far], [far, near]] {
        let mut target = black_target(8, 8);
        draw(&mut target, &program, order.as_flattened());

        assert_abs_diff_eq!(target.depth_attachment().unwrap().get(2, 2).unwrap(), 0.25, epsilon = 1e-6);
        assert_eq!(target.color_attachment().unwrap().get(2, 2), Some(Vec4::new(1.0, 0.0, 0.0, 1.0)));
    }
}

#[test]
fn equal_depth_keeps_first_fragment() {
    let mut target = black_target(8, 8);
    let first = [Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0), Vec2::new(0.0, 8.0)]
        .map(|p| colored(clip_at(&target, p.x, p.y, 0.5, 1.0), Vec3::X));
    let second = first.map(|v| colored(v.position, Vec3::Y));

    let stats = draw(&mut target, &program(MODE_COLOR), &[first, second].concat());

    assert_eq!(stats.depth_rejected, stats.fragments_written);
    assert_eq!(target.color_attachment().unwrap().get(1, 1), Some(Vec4::new(1.0, 0.0, 0.0, 1.0)));
}

#[test]
fn degenerate_triangles_write_nothing() {
    let mut target = black_target(16, 16);
    let collinear = [
        vertex(clip_at(&target, 1.0, 1.0, 0.5, 1.0)),
        vertex(clip_at(&target, 8.0, 8.0, 0.5, 1.0)),
        vertex(clip_at(&target, 15.0, 15.0, 0.5, 1.0)),
    ];
    let coincident = [vertex(clip_at(&target, 4.0, 4.0, 0.5, 1.0)); 3];
    let before = pixels(&target);

    let stats = draw(&mut target, &program(MODE_TINT), &[collinear, coincident].concat());

    assert_eq!(stats.triangles_degenerate, 2);
    assert_eq!(stats.fragments_written, 0);
    assert_eq!(pixels(&target), before);
}

#[test]
fn triangles_touching_the_near_plane_are_dropped() {
    let mut target = black_target(16, 16);
    let corners = [Vec2::new(0.0, 0.0), Vec2::new(16.0, 0.0), Vec2::new(0.0, 16.0)];
    let behind = corners.map(|p| vertex(clip_at(&target, p.x, p.y, 0.5, -1.0)));
    let mut straddling = corners.map(|p| vertex(clip_at(&target, p.x, p.y, 0.5, 1.0)));
    straddling[1].position.w = 0.0;
    let before = pixels(&target);

    let stats = draw(&mut target, &program(MODE_TINT), &[behind, straddling].concat());

    assert_eq!(stats.triangles_assembled, 2);
    assert_eq!(stats.triangles_clipped, 2);
    assert_eq!(pixels(&target), before);
    assert!(target.depth_attachment().unwrap().as_slice().iter().all(|d| *d == 1.0));
}

#[test]
fn near_plane_threshold_is_configurable() {
    let mut target = black_target(16, 16);
    let triangle = [Vec2::new(0.0, 0.0), Vec2::new(16.0, 0.0), Vec2::new(0.0, 16.0)]
        .map(|p| vertex(clip_at(&target, p.x, p.y, 0.5, 0.5)));
    let buffer = LinearBuffer::create(&triangle);
    let program = program(MODE_TINT);

    let strict_near = Renderer::with_config(RendererConfigBuilder::default().near_clip_w(1.0).build().unwrap());
    let stats = strict_near.render(&mut target, &program, &buffer, PrimitiveType::Triangles, 0, 3).unwrap();
    assert_eq!(stats.triangles_clipped, 1);

    let stats = Renderer::new().render(&mut target, &program, &buffer, PrimitiveType::Triangles, 0, 3).unwrap();
    assert_eq!(stats.triangles_clipped, 0);
    assert!(stats.fragments_written > 0);
}

#[test]
fn empty_draws_leave_target_untouched() {
    let mut target = black_target(8, 8);
    let before = pixels(&target);
    let program = program(MODE_TINT);

    let empty = LinearBuffer::<ClipVertex>::from(Vec::new());
    let stats = Renderer::new().render(&mut target, &program, &empty, PrimitiveType::Triangles, 0, 0).unwrap();
    assert_eq!(stats, DrawStats::default());

    let triangle = [Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0), Vec2::new(0.0, 8.0)]
        .map(|p| vertex(clip_at(&target, p.x, p.y, 0.5, 1.0)));
    let buffer = LinearBuffer::create(&triangle);
    let stats = Renderer::new().render(&mut target, &program, &buffer, PrimitiveType::Triangles, 1, 0).unwrap();
    assert_eq!(stats.vertices_shaded, 0);

    assert_eq!(pixels(&target), before);
    assert!(target.depth_attachment().unwrap().as_slice().iter().all(|d| *d == 1.0));
}

#[test]
fn invalid_range_fails_before_drawing() {
    let mut target = black_target(8, 8);
    let triangle = [Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0), Vec2::new(0.0, 8.0)]
        .map(|p| vertex(clip_at(&target, p.x, p.y, 0.5, 1.0)));
    let buffer = LinearBuffer::create(&triangle);
    let before = pixels(&target);

    let err = Renderer::new()
        .render(&mut target, &program(MODE_TINT), &buffer, PrimitiveType::Triangles, 1, 3)
        .unwrap_err();

    assert_eq!(
        err,
        RenderError::VertexRange(ContainerError::RangeOutOfBounds { first: 1, count: 3, len: 3 })
    );
    assert_eq!(pixels(&target), before);
}

#[test]
fn only_triangle_lists_are_drawn() {
    let mut target = black_target(8, 8);
    let triangle = [Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0), Vec2::new(0.0, 8.0)]
        .map(|p| vertex(clip_at(&target, p.x, p.y, 0.5, 1.0)));
    let buffer = LinearBuffer::create(&triangle);
    let before = pixels(&target);
    let program = program(MODE_TINT);

    for primitive in [PrimitiveType::Points, PrimitiveType::Lines, PrimitiveType::TriangleStrip] {
        let stats = Renderer::new().render(&mut target, &program, &buffer, primitive, 0, 3).unwrap();
        assert_eq!(stats, DrawStats::default());
    }
    assert_eq!(pixels(&target), before);
}

#[test]
fn trailing_partial_triangle_is_dropped() {
    let mut target = black_target(8, 8);
    let triangle = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0)]
        .map(|p| vertex(clip_at(&target, p.x, p.y, 0.5, 1.0)));
    let extra = [vertex(clip_at(&target, 8.0, 8.0, 0.5, 1.0)), vertex(clip_at(&target, 8.0, 0.0, 0.5, 1.0))];

    let stats = draw(&mut target, &program(MODE_TINT), &[&triangle[..], &extra[..]].concat());

    assert_eq!(stats.vertices_shaded, 5);
    assert_eq!(stats.triangles_assembled, 1);
    assert_eq!(target.color_attachment().unwrap().get(7, 7), Some(BLACK));
}

#[test]
fn shared_edge_ownership_depends_on_fill_rule() {
    let desc = FrameTargetDescriptorBuilder::default()
        .width(4)
        .height(4)
        .clear_color(BLACK)
        .depth_attachment(false)
        .build()
        .unwrap();
    let reference = FrameTarget::from_descriptor(&desc).unwrap();
    let corner = |x, y| vertex(clip_at(&reference, x, y, 0.5, 1.0));
    let quad = [
        corner(0.0, 0.0),
        corner(4.0, 0.0),
        corner(4.0, 4.0),
        corner(0.0, 0.0),
        corner(4.0, 4.0),
        corner(0.0, 4.0),
    ];
    let buffer = LinearBuffer::create(&quad);
    let program = program(MODE_TINT);

    for (rule, shaded) in [(FillRule::Inclusive, 20), (FillRule::TopLeft, 16)] {
        let mut target = FrameTarget::from_descriptor(&desc).unwrap();
        let renderer = Renderer::with_config(RendererConfigBuilder::default().fill_rule(rule).build().unwrap());

        let stats = renderer.render(&mut target, &program, &buffer, PrimitiveType::Triangles, 0, 6).unwrap();

        assert_eq!(stats.fragments_shaded, shaded, "{rule:?}");
        assert!(pixels(&target).iter().all(|c| *c == WHITE), "{rule:?}");
    }
}

#[test]
fn discarded_fragments_leave_attachments_alone() {
    let mut target = black_target(8, 8);
    let triangle = [Vec2::new(0.0, 0.0), Vec2::new(16.0, 0.0), Vec2::new(0.0, 16.0)]
        .map(|p| vertex(clip_at(&target, p.x, p.y, 0.5, 1.0)));
    let mut program = program(MODE_DISCARD_LEFT);
    program.set_uniform("split_x", 4.0_f32);

    let stats = draw(&mut target, &program, &triangle);

    assert_eq!(stats.fragments_discarded, 32);
    assert_eq!(stats.fragments_written, 32);
    let color = target.color_attachment().unwrap();
    let depth = target.depth_attachment().unwrap();
    assert_eq!(color.get(3, 7), Some(BLACK));
    assert_eq!(depth.get(3, 7), Some(1.0));
    assert_eq!(color.get(4, 7), Some(WHITE));
    assert_abs_diff_eq!(depth.get(4, 7).unwrap(), 0.5, epsilon = 1e-6);
}

#[test]
fn zero_depth_clear_rejects_every_fragment_until_cleared() {
    let mut target = FrameTarget::create(8, 8, Some(BLACK), None).unwrap();
    let triangle = [Vec2::new(0.0, 0.0), Vec2::new(16.0, 0.0), Vec2::new(0.0, 16.0)]
        .map(|p| vertex(clip_at(&target, p.x, p.y, 0.5, 1.0)));
    let program = program(MODE_TINT);

    let stats = draw(&mut target, &program, &triangle);
    assert_eq!(stats.depth_rejected, 64);
    assert_eq!(stats.fragments_written, 0);

    target.clear(None, Some(1.0));
    let stats = draw(&mut target, &program, &triangle);
    assert_eq!(stats.fragments_written, 64);
    assert_eq!(target.color_attachment().unwrap().get(3, 3), Some(WHITE));
}

#[test]
fn frag_depth_overrides_computed_depth() {
    let desc = FrameTargetDescriptorBuilder::default()
        .width(8)
        .height(8)
        .clear_depth(1.0)
        .color_attachment(false)
        .build()
        .unwrap();
    let mut target = FrameTarget::from_descriptor(&desc).unwrap();
    let triangle = [Vec2::new(0.0, 0.0), Vec2::new(16.0, 0.0), Vec2::new(0.0, 16.0)]
        .map(|p| vertex(clip_at(&target, p.x, p.y, 0.5, 1.0)));
    let mut program = program(MODE_DEPTH_OVERRIDE);
    program.set_uniform("depth_override", 0.125_f32);

    let stats = draw(&mut target, &program, &triangle);

    assert_eq!(stats.fragments_written, 64);
    assert!(target.depth_attachment().unwrap().as_slice().iter().all(|d| *d == 0.125));
}

struct MaybeColored {
    position: Vec4,
    color:    Option<Vec3>,
}

impl Vertex for MaybeColored {
    fn attribute(&self, name: &str) -> Option<ShaderValue> {
        match name {
            "position" => Some(self.position.into()),
            "color" => self.color.map(ShaderValue::from),
            _ => None,
        }
    }
}

#[test]
fn failed_vertex_only_loses_its_own_triangle() {
    let mut target = black_target(16, 16);
    let at = |x, y| MaybeColored { position: clip_at(&target, x, y, 0.5, 1.0), color: Some(Vec3::ONE) };
    let mut vertices = vec![
        at(0.0, 0.0),
        at(8.0, 0.0),
        at(0.0, 8.0),
        at(8.0, 8.0),
        at(16.0, 8.0),
        at(8.0, 16.0),
    ];
    vertices[0].color = None;
    let buffer = LinearBuffer::from(vertices);

    let stats = Renderer::new()
        .render(&mut target, &strict_program(MODE_COLOR), &buffer, PrimitiveType::Triangles, 0, 6)
        .unwrap();

    assert_eq!(stats.vertices_dropped, 1);
    assert_eq!(stats.triangles_incomplete, 1);
    assert_eq!(stats.triangles_assembled, 1);
    let color = target.color_attachment().unwrap();
    // First triangle is gone.
    assert_eq!(color.get(1, 1), Some(BLACK));
    // No triangle was stitched together from vertices 1, 2 and 3.
    assert_eq!(color.get(5, 5), Some(BLACK));
    // Second triangle is intact.
    assert_eq!(color.get(9, 9), Some(WHITE));
    assert_eq!(color.get(10, 11), Some(WHITE));
}
