use std::fmt;

/// Counters collected during one draw call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Vertices that went through the vertex stage.
    pub vertices_shaded:      usize,
    /// Vertices whose I/O record could not be built.
    pub vertices_dropped:     usize,
    /// Triangles with three bound vertices.
    pub triangles_assembled:  usize,
    /// Triangles lost to a dropped vertex.
    pub triangles_incomplete: usize,
    /// Triangles rejected at the near plane.
    pub triangles_clipped:    usize,
    /// Triangles with zero screen area.
    pub triangles_degenerate: usize,
    /// Triangles scanned for coverage.
    pub triangles_rasterized: usize,
    /// Fragments that ran the fragment stage.
    pub fragments_shaded:     usize,
    /// Fragments whose I/O record could not be built.
    pub fragments_dropped:    usize,
    /// Fragments that called `discard()`.
    pub fragments_discarded:  usize,
    /// Fragments stored in the target.
    pub fragments_written:    usize,
    /// Fragments failing the depth test.
    pub depth_rejected:       usize,
}

impl fmt::Display for DrawStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vertices {}/{} dropped, triangles {} assembled {} incomplete {} clipped {} degenerate {} \
             rasterized, fragments {} shaded {} written {} discarded {} dropped {} depth-rejected",
            self.vertices_shaded,
            self.vertices_dropped,
            self.triangles_assembled,
            self.triangles_incomplete,
            self.triangles_clipped,
            self.triangles_degenerate,
            self.triangles_rasterized,
            self.fragments_shaded,
            self.fragments_written,
            self.fragments_discarded,
            self.fragments_dropped,
            self.depth_rejected,
        )
    }
}
