#![allow(dead_code)]

use glam::{Vec3, Vec4};
use soft_rend_pipeline::{
    BindingPolicy,
    FragmentShader,
    FrameTarget,
    ShaderProgram,
    VertexShader,
    log_utils,
    shader_io,
    vertex_format,
};

pub const MODE_TINT: i32 = 0;
pub const MODE_COLOR: i32 = 1;
pub const MODE_CLIP_W: i32 = 2;
pub const MODE_DISCARD_LEFT: i32 = 3;
pub const MODE_DEPTH_OVERRIDE: i32 = 4;

pub const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
pub const WHITE: Vec4 = Vec4::ONE;

vertex_format! {
    pub struct ClipVertex {
        pub position: Vec4,
        pub color: Vec3,
    }
}

vertex_format! {
    pub struct BareVertex {
        pub position: Vec4,
    }
}

shader_io! {
    pub struct TestVertexIo: vertex {
        #[Attribute] pub position: Vec4,
        #[Attribute] pub color: Vec3,
        #[Varying] pub shade: Vec3,
        #[Varying] pub clip_w: f32,
    }
}

shader_io! {
    pub struct TestFragmentIo: fragment {
        #[Varying] pub shade: Vec3,
        #[Varying] pub clip_w: f32,
        #[Uniform] pub tint: Vec4,
        #[Uniform] pub mode: i32,
        #[Uniform] pub split_x: f32,
        #[Uniform] pub depth_override: f32,
    }
}

pub struct PassThrough;

impl VertexShader for PassThrough {
    type Io = TestVertexIo;

    fn main(&self, io: &mut TestVertexIo) {
        io.builtin.clip_position = io.position;
        io.shade = io.color;
        io.clip_w = io.position.w;
    }
}

pub struct ModeShader;

impl FragmentShader for ModeShader {
    type Io = TestFragmentIo;

    fn main(&self, io: &mut TestFragmentIo) {
        match io.mode {
            MODE_COLOR => io.builtin.frag_color = io.shade.extend(1.0),
            MODE_CLIP_W => io.builtin.frag_color = Vec4::new(io.clip_w, io.builtin.frag_coord.w, 0.0, 1.0),
            MODE_DISCARD_LEFT =>
                if io.builtin.frag_coord.x < io.split_x {
                    io.builtin.discard();
                } else {
                    io.builtin.frag_color = io.tint;
                },
            MODE_DEPTH_OVERRIDE => {
                io.builtin.frag_color = io.tint;
                io.builtin.frag_depth = Some(io.depth_override);
            },
            _ => io.builtin.frag_color = io.tint,
        }
    }
}

pub type TestProgram = ShaderProgram<PassThrough, ModeShader>;

pub fn program(mode: i32) -> TestProgram {
    log_utils::init_test_logging();
    let mut program = ShaderProgram::new(PassThrough, ModeShader).unwrap();
    program.set_uniform("mode", mode);
    program.set_uniform("tint", WHITE);
    program
}

pub fn strict_program(mode: i32) -> TestProgram {
    log_utils::init_test_logging();
    let policy = BindingPolicy { strict: true };
    let mut program = ShaderProgram::with_policy(PassThrough, ModeShader, policy).unwrap();
    program.set_uniform("mode", mode);
    program.set_uniform("tint", WHITE);
    program
}

/// Clip-space position landing on pixel coordinates `(x, y)` with mapped depth `depth`.
pub fn clip_at(target: &FrameTarget, x: f32, y: f32, depth: f32, w: f32) -> Vec4 {
    #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
    let (width, height) = (target.width() as f32, target.height() as f32);
    let ndc = Vec3::new(x / width * 2.0 - 1.0, y / height * 2.0 - 1.0, depth * 2.0 - 1.0);
    (ndc * w).extend(w)
}

pub fn vertex(position: Vec4) -> ClipVertex {
    ClipVertex::new(position, Vec3::ONE)
}

pub fn colored(position: Vec4, color: Vec3) -> ClipVertex {
    ClipVertex::new(position, color)
}

pub fn black_target(width: u32, height: u32) -> FrameTarget {
    FrameTarget::create(width, height, Some(BLACK), Some(1.0)).unwrap()
}

pub fn pixels(target: &FrameTarget) -> Vec<Vec4> {
    target.color_attachment().unwrap().as_slice().to_vec()
}
