use glam::{Vec2, Vec3, Vec4};

/// How pixels lying exactly on a triangle edge are resolved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    /// Every weight `>= 0` counts as covered; a pixel on an edge shared by
    /// two triangles is shaded by both (or, after rounding, by neither).
    #[default]
    Inclusive,
    /// Pixels on an edge belong to exactly one of the triangles sharing it.
    TopLeft,
}

/// Signed, doubled area of the triangle `(a, b, p)`.
pub fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Perspective divide; `w == 0` leaves the coordinates as they are.
pub fn ndc_from_clip(clip: Vec4) -> Vec3 {
    if clip.w == 0.0 {
        return clip.truncate();
    }
    clip.truncate() / clip.w
}

/// Maps NDC `[-1, 1]` onto `[0, width] x [0, height]`.
pub fn viewport_transform(ndc: Vec3, width: f32, height: f32) -> Vec2 {
    Vec2::new((ndc.x + 1.0) * 0.5 * width, (ndc.y + 1.0) * 0.5 * height)
}

/// Inclusive pixel rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl PixelRect {
    /// Bounding box of `points`, clamped to a `width`x`height` target.
    #[allow(clippy::as_conversions, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn around(points: &[Vec2; 3], width: u32, height: u32) -> Self {
        let min = points[0].min(points[1]).min(points[2]).floor();
        let max = points[0].max(points[1]).max(points[2]).ceil();

        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);

        Self {
            min_x: (min.x as i32).max(0),
            min_y: (min.y as i32).max(0),
            max_x: (max.x as i32).min(width - 1),
            max_y: (max.y as i32).min(height - 1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }
}

/// Edge functions of one screen-space triangle.
#[derive(Copy, Clone, Debug)]
pub struct TriangleEdges {
    vertices:  [Vec2; 3],
    area:      f32,
    fill_rule: FillRule,
    owned:     [bool; 3],
}

impl TriangleEdges {
    /// `None` when the triangle has zero area.
    pub fn new(vertices: [Vec2; 3], fill_rule: FillRule) -> Option<Self> {
        let [v0, v1, v2] = vertices;
        let area = edge_function(v0, v1, v2);
        if area == 0.0 {
            return None;
        }

        // Edge i is opposite vertex i. Walking the edges in positive winding
        // order, adjacent triangles traverse a shared edge in opposite
        // directions, so exactly one of them owns it.
        let owned = [(v1, v2), (v2, v0), (v0, v1)].map(|(from, to)| {
            let dir = if area > 0.0 { to - from } else { from - to };
            dir.y < 0.0 || (dir.y == 0.0 && dir.x > 0.0)
        });

        Some(Self { vertices, area, fill_rule, owned })
    }

    /// Signed, doubled area; the sign gives the winding.
    pub fn area(&self) -> f32 {
        self.area
    }

    /// Barycentric weights of `p`, or `None` if `p` is not covered.
    pub fn barycentric(&self, p: Vec2) -> Option<[f32; 3]> {
        let [v0, v1, v2] = self.vertices;
        let weights = [
            edge_function(v1, v2, p) / self.area,
            edge_function(v2, v0, p) / self.area,
            edge_function(v0, v1, p) / self.area,
        ];

        let covered = match self.fill_rule {
            FillRule::Inclusive => weights.iter().all(|b| *b >= 0.0),
            FillRule::TopLeft => weights
                .iter()
                .zip(self.owned)
                .all(|(b, owned)| *b > 0.0 || (*b == 0.0 && owned)),
        };

        covered.then_some(weights)
    }
}
