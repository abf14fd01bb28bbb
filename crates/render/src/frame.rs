use glam::{Mat4, Vec3};
use lander_assets::TextureSet;
use lander_common::{EntityId, EntityKind, TextureHandle};
use lander_kernel::{Entity, World};

use crate::atlas::{UvRect, atlas_uv};
use crate::text::{FONT_GRID, TextMesh, layout_text};

pub const HUD_LABEL: &str = "REMAINING FUEL:";
const HUD_SIZE: f32 = 0.25;
const HUD_LABEL_POSITION: Vec3 = Vec3::new(-4.5, 3.0, 0.0);
const HUD_VALUE_POSITION: Vec3 = Vec3::new(-4.0, 2.5, 0.0);
const HUD_VALUE_SPACING: f32 = 0.01;

/// One textured unit quad.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub entity: EntityId,
    pub kind: EntityKind,
    pub texture: TextureHandle,
    pub model: Mat4,
    pub uv: UvRect,
}

/// Everything needed to draw one frame, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub items: Vec<DrawItem>,
    pub text: Vec<TextMesh>,
    pub font: TextureHandle,
}

impl DrawList {
    /// Collect the active entities in painter's order, then the fuel HUD.
    pub fn build(world: &World, textures: &TextureSet) -> Self {
        let roles = world.roles();
        let mut order = vec![
            (roles.background, textures.background),
            (roles.player, textures.player),
            (roles.flame, textures.flame),
        ];
        order.extend(roles.rocks.iter().map(|id| (*id, textures.rock)));
        order.extend([
            (roles.victory_platform, textures.victory),
            (roles.start_platform, textures.start),
            (roles.win_screen, textures.win),
            (roles.lose_screen, textures.lose),
        ]);

        let items: Vec<DrawItem> = order
            .into_iter()
            .filter_map(|(id, texture)| {
                let entity = world.entity(id).filter(|e| e.is_active())?;
                Some(DrawItem {
                    entity: id,
                    kind: entity.kind(),
                    texture,
                    model: entity.model_matrix(),
                    uv: sprite_uv(entity),
                })
            })
            .collect();

        let fuel = world.fuel().to_string();
        let text = vec![
            layout_text(HUD_LABEL, HUD_SIZE, 0.0, HUD_LABEL_POSITION, FONT_GRID),
            layout_text(&fuel, HUD_SIZE, HUD_VALUE_SPACING, HUD_VALUE_POSITION, FONT_GRID),
        ];

        tracing::trace!(items = items.len(), "draw list built");
        Self {
            items,
            text,
            font: textures.font,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Current atlas cell for animated sprites, the whole texture otherwise.
fn sprite_uv(entity: &Entity) -> UvRect {
    match entity.animation() {
        Some(anim) => atlas_uv(anim.current_frame(), anim.cols(), anim.rows()),
        None => UvRect::FULL,
    }
}
