//! Sprite-atlas texture coordinates for unit quads.

/// A rectangle in texture space, origin at the top-left of the atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub u: f32,
    pub v: f32,
    pub width: f32,
    pub height: f32,
}

impl UvRect {
    /// The whole texture.
    pub const FULL: Self = Self {
        u: 0.0,
        v: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Texture coordinates matching `quad_vertices`, two floats per vertex.
    pub fn tex_coords(&self) -> [f32; 12] {
        let (u, v, w, h) = (self.u, self.v, self.width, self.height);
        [
            u,
            v + h,
            u + w,
            v + h,
            u + w,
            v,
            u,
            v + h,
            u + w,
            v,
            u,
            v,
        ]
    }
}

impl Default for UvRect {
    fn default() -> Self {
        Self::FULL
    }
}

/// Cell `index` of an atlas laid out row-major in `cols` x `rows` cells.
pub fn atlas_uv(index: usize, cols: u32, rows: u32) -> UvRect {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let col = (index % cols as usize) as f32;
    let row = (index / cols as usize) as f32;
    UvRect {
        u: col / cols as f32,
        v: row / rows as f32,
        width: 1.0 / cols as f32,
        height: 1.0 / rows as f32,
    }
}

/// A unit quad centred on the origin as two counter-clockwise triangles.
pub fn quad_vertices() -> [f32; 12] {
    [
        -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, //
        -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
    ]
}
