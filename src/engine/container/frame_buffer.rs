use derive_builder::Builder;
use glam::Vec4;

use super::error::ContainerError;
use super::grid_buffer::GridBuffer;

/// Shape and initial contents of a [`FrameTarget`].
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
#[builder(derive(Debug))]
pub struct FrameTargetDescriptor {
    /// Width in pixels.
    pub width:            u32,
    /// Height in pixels.
    pub height:           u32,
    /// Initial color, `Vec4::ZERO` when unset.
    #[builder(setter(strip_option), default)]
    pub clear_color:      Option<Vec4>,
    /// Initial depth, `0.0` when unset.
    #[builder(setter(strip_option), default)]
    pub clear_depth:      Option<f32>,
    /// Whether a color grid is allocated.
    #[builder(default = "true")]
    pub color_attachment: bool,
    /// Whether a depth grid is allocated.
    #[builder(default = "true")]
    pub depth_attachment: bool,
}

/// Render target made of an optional color grid and an optional depth grid
/// of identical size.
#[derive(Clone, Debug)]
pub struct FrameTarget {
    width:  u32,
    height: u32,
    color:  Option<GridBuffer<Vec4>>,
    depth:  Option<GridBuffer<f32>>,
}

impl FrameTarget {
    /// Allocates a target with both attachments.
    ///
    /// Missing clear values fill color with `Vec4::ZERO` and depth with `0.0`.
    /// The depth test passes only for fragments strictly closer than the stored
    /// value, so nothing can be drawn into a target created with a `None` depth
    /// until its depth is cleared to something greater, usually `1.0`.
    pub fn create(
        width: u32, height: u32, clear_color: Option<Vec4>, clear_depth: Option<f32>,
    ) -> Result<Self, ContainerError> {
        Ok(Self {
            width,
            height,
            color: Some(GridBuffer::new(width, height, clear_color)?),
            depth: Some(GridBuffer::new(width, height, clear_depth)?),
        })
    }

    /// Allocates only the attachments `desc` asks for.
    pub fn from_descriptor(desc: &FrameTargetDescriptor) -> Result<Self, ContainerError> {
        let color = desc
            .color_attachment
            .then(|| GridBuffer::new(desc.width, desc.height, desc.clear_color))
            .transpose()?;
        let depth = desc
            .depth_attachment
            .then(|| GridBuffer::new(desc.width, desc.height, desc.clear_depth))
            .transpose()?;

        Ok(Self { width: desc.width, height: desc.height, color, depth })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Refills the attachments; a `None` value or a missing attachment is skipped.
    pub fn clear(&mut self, color: Option<Vec4>, depth: Option<f32>) {
        if let (Some(attachment), Some(color)) = (self.color.as_mut(), color) {
            attachment.clear(color);
        }
        if let (Some(attachment), Some(depth)) = (self.depth.as_mut(), depth) {
            attachment.clear(depth);
        }
    }

    /// Color grid, if the target has one.
    pub fn color_attachment(&self) -> Option<&GridBuffer<Vec4>> {
        self.color.as_ref()
    }

    pub fn color_attachment_mut(&mut self) -> Option<&mut GridBuffer<Vec4>> {
        self.color.as_mut()
    }

    /// Depth grid, if the target has one.
    pub fn depth_attachment(&self) -> Option<&GridBuffer<f32>> {
        self.depth.as_ref()
    }

    pub fn depth_attachment_mut(&mut self) -> Option<&mut GridBuffer<f32>> {
        self.depth.as_mut()
    }

    /// Converts the color attachment to RGBA8, top row first.
    ///
    /// Row `y = height - 1` of the grid comes out first since the viewport maps
    /// NDC `+y` upwards. Channels are clamped to `[0,1]` before scaling. Without
    /// a color attachment every pixel is opaque black.
    pub fn color_rgba8(&self) -> Result<Vec<u8>, ContainerError> {
        #[allow(clippy::as_conversions)]
        let num_pixels = (self.width as usize).checked_mul(self.height as usize).ok_or(
            ContainerError::SizeOverflow { what: "frame", width: self.width, height: self.height },
        )?;

        let rgba_size = num_pixels.checked_mul(4).ok_or(ContainerError::SizeOverflow {
            what:   "color buffer",
            width:  self.width,
            height: self.height,
        })?;

        let mut rgba = Vec::with_capacity(rgba_size);

        let Some(color) = self.color.as_ref() else {
            rgba.extend(std::iter::repeat_n([0, 0, 0, 255], num_pixels).flatten());
            return Ok(rgba);
        };

        #[allow(clippy::as_conversions)]
        let row_len = self.width as usize;
        if row_len == 0 {
            return Ok(rgba);
        }
        for row in color.as_slice().chunks_exact(row_len).rev() {
            for pixel in row {
                #[allow(
                    clippy::as_conversions,
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss
                )]
                rgba.extend(pixel.clamp(Vec4::ZERO, Vec4::ONE).to_array().map(|c| (c * 255.0) as u8));
            }
        }

        Ok(rgba)
    }
}
