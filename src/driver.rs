use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use glam::{Mat4, Vec3};
use soft_rend_pipeline::constants::{CLEAR_COLOR, CLEAR_DEPTH};
use soft_rend_pipeline::{
    FillRule,
    FragmentShader,
    FrameTarget,
    LinearBuffer,
    PrimitiveType,
    Renderer,
    RendererConfigBuilder,
    ShaderProgram,
    VertexShader,
    shader_io,
    vertex_format,
};

vertex_format! {
    struct DriverVertex {
        position: Vec3,
        color: Vec3,
    }
}

shader_io! {
    struct DriverVertexIo: vertex {
        #[Uniform] mvp_matrix: Mat4,
        #[Attribute] position: Vec3,
        #[Attribute] color: Vec3,
        #[Varying] color_varying: Vec3,
    }
}

shader_io! {
    struct DriverFragmentIo: fragment {
        #[Uniform] intensity: f32,
        #[Varying] color_varying: Vec3,
    }
}

struct DriverVertexShader;

impl VertexShader for DriverVertexShader {
    type Io = DriverVertexIo;

    fn main(&self, io: &mut DriverVertexIo) {
        io.builtin.clip_position = io.mvp_matrix * io.position.extend(1.0);
        io.color_varying = io.color;
    }
}

struct DriverFragmentShader;

impl FragmentShader for DriverFragmentShader {
    type Io = DriverFragmentIo;

    fn main(&self, io: &mut DriverFragmentIo) {
        io.builtin.frag_color = (io.color_varying * io.intensity).extend(1.0);
    }
}

pub(crate) struct DriverConfiguration {
    width:       u32,
    height:      u32,
    output:      PathBuf,
    fill_rule:   FillRule,
    near_clip_w: f32,
    angle:       f32,
}

impl DriverConfiguration {
    pub(crate) fn new(
        width: u32, height: u32, output: PathBuf, fill_rule: FillRule, near_clip_w: f32, angle: f32,
    ) -> Self {
        Self { width, height, output, fill_rule, near_clip_w, angle }
    }
}

pub(crate) struct Driver {
    cfg:      DriverConfiguration,
    renderer: Renderer,
    program:  ShaderProgram<DriverVertexShader, DriverFragmentShader>,
    target:   FrameTarget,
}

impl Driver {
    pub(crate) fn new(cfg: DriverConfiguration) -> Result<Self> {
        let renderer_cfg = RendererConfigBuilder::default()
            .near_clip_w(cfg.near_clip_w)
            .fill_rule(cfg.fill_rule)
            .build()
            .map_err(|err| anyhow!("Failed to build renderer configuration: {err}"))?;

        let program = ShaderProgram::new(DriverVertexShader, DriverFragmentShader)
            .context("Failed to bind driver shaders")?;

        let target = FrameTarget::create(cfg.width, cfg.height, Some(CLEAR_COLOR), Some(CLEAR_DEPTH))
            .context("Failed to allocate frame target")?;

        log::info!("Driver initialized ({}x{}, {:?})", cfg.width, cfg.height, cfg.fill_rule);

        Ok(Self { cfg, renderer: Renderer::with_config(renderer_cfg), program, target })
    }

    pub(crate) fn start(cfg: DriverConfiguration) -> Result<()> {
        Driver::new(cfg)?.run()
    }

    fn run(&mut self) -> Result<()> {
        let vertices = LinearBuffer::from(vec![
            DriverVertex::new(Vec3::new(0.5, -0.5, 0.0), Vec3::new(1.0, 0.0, 0.0)),
            DriverVertex::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            DriverVertex::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 0.0, 1.0)),
        ]);

        let mvp = Mat4::orthographic_rh_gl(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0)
            * Mat4::from_rotation_z(self.cfg.angle.to_radians());

        self.program.set_uniform("mvp_matrix", mvp);
        self.program.set_uniform("intensity", 1.0_f32);

        self.target.clear(Some(CLEAR_COLOR), Some(CLEAR_DEPTH));

        let stats = self
            .renderer
            .render(&mut self.target, &self.program, &vertices, PrimitiveType::Triangles, 0, vertices.len())
            .context("Draw call failed")?;

        log::info!("Frame rendered: {stats}");

        self.save()
    }

    fn save(&self) -> Result<()> {
        let rgba = self.target.color_rgba8().context("Failed to read color attachment")?;

        image::save_buffer(
            &self.cfg.output,
            &rgba,
            self.target.width(),
            self.target.height(),
            image::ExtendedColorType::Rgba8,
        )
        .with_context(|| format!("Failed to write {}", self.cfg.output.display()))?;

        log::info!("Color attachment written to {}", self.cfg.output.display());

        Ok(())
    }
}
