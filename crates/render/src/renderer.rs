use glam::Mat4;
use lander_assets::{AssetManifest, TextureRegistry, TextureSet};
use lander_kernel::World;
use lander_kernel::config::ViewConfig;

use crate::frame::DrawList;

/// Orthographic view of the playfield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub clear_color: [f32; 4],
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from_config(&ViewConfig::default())
    }
}

impl RenderView {
    pub fn from_config(config: &ViewConfig) -> Self {
        Self {
            left: config.left,
            right: config.right,
            bottom: config.bottom,
            top: config.top,
            clear_color: config.clear_color,
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh_gl(self.left, self.right, self.bottom, self.top, -1.0, 1.0)
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads world state and a view, then produces output. It never
/// mutates the world.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given world state and view.
    fn render(&self, world: &World, view: &RenderView) -> Self::Output;
}

/// Produces a human-readable description of a frame, for headless runs and
/// logs.
#[derive(Debug, Clone)]
pub struct DebugTextRenderer {
    textures: TextureSet,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        let mut registry = TextureRegistry::new();
        Self::new(TextureSet::register(&AssetManifest::default(), &mut registry))
    }
}

impl DebugTextRenderer {
    pub fn new(textures: TextureSet) -> Self {
        Self { textures }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, world: &World, view: &RenderView) -> String {
        let list = DrawList::build(world, &self.textures);
        let player = world.player();
        let p = player.position();
        let v = player.velocity();

        let mut out = String::new();
        out.push_str(&format!(
            "=== tick={} outcome={} fuel={} ===\n",
            world.tick(),
            world.outcome(),
            world.fuel()
        ));
        out.push_str(&format!(
            "view: x=[{:.2}, {:.2}] y=[{:.2}, {:.2}] quads={}\n",
            view.left,
            view.right,
            view.bottom,
            view.top,
            list.len()
        ));
        out.push_str(&format!(
            "player: pos=({:.3}, {:.3}) vel=({:.3}, {:.3}) angle={:.1}deg thrust={}\n",
            p.x,
            p.y,
            v.x,
            v.y,
            player.angle().to_degrees(),
            world.is_thrusting()
        ));
        for item in &list.items {
            let origin = item.model.w_axis;
            out.push_str(&format!(
                "  {} {:?} at ({:.2}, {:.2})\n",
                item.entity, item.kind, origin.x, origin.y
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn projection_maps_bounds_to_clip_space() {
        let view = RenderView::default();
        let proj = view.projection();
        let corner = proj.project_point3(Vec3::new(5.0, 3.75, 0.0));
        assert!((corner.x - 1.0).abs() < 1e-6);
        assert!((corner.y - 1.0).abs() < 1e-6);
        let corner = proj.project_point3(Vec3::new(-5.0, -3.75, 0.0));
        assert!((corner.x + 1.0).abs() < 1e-6);
        assert!((corner.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn default_clear_color() {
        let view = RenderView::default();
        assert_eq!(view.clear_color, [0.1922, 0.549, 0.9059, 1.0]);
    }

    #[test]
    fn debug_renderer_fresh_world() {
        let world = World::default();
        let output = DebugTextRenderer::default().render(&world, &RenderView::default());
        assert!(output.contains("tick=0"));
        assert!(output.contains("outcome=flying"));
        assert!(output.contains("fuel=1000"));
        assert!(output.contains("quads=15"));
        assert!(output.contains("Player"));
    }

    #[test]
    fn debug_renderer_lists_each_quad() {
        let world = World::default();
        let output = DebugTextRenderer::default().render(&world, &RenderView::default());
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("=== tick=0"));
        assert!(lines[1].starts_with("view:"));
        assert!(lines[2].starts_with("player: pos=(-4.000, 2.000)"));
        let quads = lines.iter().filter(|l| l.starts_with("  #")).count();
        assert_eq!(quads, 15);
        assert!(output.ends_with('\n'));
    }
}
