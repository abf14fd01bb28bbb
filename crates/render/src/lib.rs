//! Rendering adapter: turns world state into renderer-agnostic draw data.
//!
//! # Invariants
//! - Renderers cannot mutate world truth.
//! - Draw data derives only from world state, textures and view.
//!
//! A graphics backend consumes `DrawList`s: textured unit quads with a
//! model matrix plus the HUD text geometry. `DebugTextRenderer` stands in
//! for a GPU backend in headless runs.

mod atlas;
mod frame;
mod renderer;
mod text;

pub use atlas::{UvRect, atlas_uv, quad_vertices};
pub use frame::{DrawItem, DrawList, HUD_LABEL};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use text::{FONT_GRID, TextMesh, layout_text};

pub fn crate_info() -> &'static str {
    "lander-render v0.1.0"
}
