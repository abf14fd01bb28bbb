//! Bitmap-font text layout.
//!
//! Each byte of the string is drawn as one quad whose texture cell is the
//! byte value in a square font atlas. Characters advance along +x by
//! `size + spacing`.

use glam::{Mat4, Vec3};

use crate::atlas::atlas_uv;

/// Cells per side of the font atlas.
pub const FONT_GRID: u32 = 16;

/// Geometry for one string, ready to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMesh {
    /// Two floats per vertex, six vertices per character.
    pub vertices: Vec<f32>,
    pub tex_coords: Vec<f32>,
    pub model: Mat4,
}

impl TextMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn char_count(&self) -> usize {
        self.vertex_count() / 6
    }
}

pub fn layout_text(text: &str, size: f32, spacing: f32, position: Vec3, font_cols: u32) -> TextMesh {
    let mut vertices = Vec::with_capacity(text.len() * 12);
    let mut tex_coords = Vec::with_capacity(text.len() * 12);
    let half = 0.5 * size;

    for (i, byte) in text.bytes().enumerate() {
        let offset = (size + spacing) * i as f32;
        vertices.extend_from_slice(&[
            offset - half,
            half,
            offset - half,
            -half,
            offset + half,
            half,
            offset + half,
            -half,
            offset + half,
            half,
            offset - half,
            -half,
        ]);

        let cell = atlas_uv(byte as usize, font_cols, font_cols);
        let (u, v, w, h) = (cell.u, cell.v, cell.width, cell.height);
        tex_coords.extend_from_slice(&[
            u,
            v,
            u,
            v + h,
            u + w,
            v,
            u + w,
            v + h,
            u + w,
            v,
            u,
            v + h,
        ]);
    }

    TextMesh {
        vertices,
        tex_coords,
        model: Mat4::from_translation(position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_quad_per_byte() {
        let mesh = layout_text("FUEL", 0.25, 0.0, Vec3::ZERO, FONT_GRID);
        assert_eq!(mesh.char_count(), 4);
        assert_eq!(mesh.vertices.len(), 48);
        assert_eq!(mesh.tex_coords.len(), 48);
    }

    #[test]
    fn characters_advance_by_size_plus_spacing() {
        let mesh = layout_text("ab", 0.25, 0.01, Vec3::ZERO, FONT_GRID);
        // first vertex of each quad is its top-left corner
        assert_eq!(mesh.vertices[0], -0.125);
        assert!((mesh.vertices[12] - (0.26 - 0.125)).abs() < 1e-6);
        assert_eq!(mesh.vertices[1], 0.125);
    }

    #[test]
    fn glyph_cell_from_byte_value() {
        // 'A' = 65: column 1, row 4
        let mesh = layout_text("A", 1.0, 0.0, Vec3::ZERO, FONT_GRID);
        assert_eq!(mesh.tex_coords[0], 1.0 / 16.0);
        assert_eq!(mesh.tex_coords[1], 4.0 / 16.0);
        assert_eq!(mesh.tex_coords[3], 5.0 / 16.0);
    }

    #[test]
    fn model_places_string() {
        let mesh = layout_text("1000", 0.25, 0.01, Vec3::new(-4.0, 2.5, 0.0), FONT_GRID);
        let origin = mesh.model.transform_point3(Vec3::ZERO);
        assert_eq!(origin, Vec3::new(-4.0, 2.5, 0.0));
    }

    #[test]
    fn empty_string_has_no_geometry() {
        let mesh = layout_text("", 0.25, 0.0, Vec3::ZERO, FONT_GRID);
        assert_eq!(mesh.char_count(), 0);
    }
}
