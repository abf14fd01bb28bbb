use serde::{Deserialize, Serialize};

/// Animation rate, in frames per second of sprite playback.
pub const SECONDS_PER_FRAME: u32 = 4;

/// Frame-indexed sprite animation over a texture atlas.
///
/// The atlas is a `cols x rows` grid; `frames` lists the atlas cells to
/// cycle through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteAnimation {
    frames: Vec<usize>,
    cols: u32,
    rows: u32,
    index: usize,
    time: f32,
}

impl SpriteAnimation {
    pub fn new(frames: Vec<usize>, cols: u32, rows: u32) -> Self {
        Self {
            frames,
            cols: cols.max(1),
            rows: rows.max(1),
            index: 0,
            time: 0.0,
        }
    }

    /// Time each frame stays on screen.
    pub fn frame_interval() -> f32 {
        1.0 / SECONDS_PER_FRAME as f32
    }

    /// Advance the animation clock, moving to the next frame once a full
    /// interval has elapsed.
    pub fn advance(&mut self, dt: f32) {
        if self.frames.is_empty() {
            return;
        }
        self.time += dt;
        if self.time >= Self::frame_interval() {
            self.time = 0.0;
            self.index += 1;
            if self.index >= self.frames.len() {
                self.index = 0;
            }
        }
    }

    /// Atlas cell currently shown.
    pub fn current_frame(&self) -> usize {
        self.frames.get(self.index).copied().unwrap_or(0)
    }

    /// Position within `frames`.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_frame() {
        let anim = SpriteAnimation::new(vec![3, 4], 4, 2);
        assert_eq!(anim.current_frame(), 3);
        assert_eq!(anim.index(), 0);
    }

    #[test]
    fn holds_frame_until_interval() {
        let mut anim = SpriteAnimation::new(vec![0, 1], 2, 1);
        anim.advance(0.1);
        anim.advance(0.1);
        assert_eq!(anim.current_frame(), 0);
        anim.advance(0.1);
        assert_eq!(anim.current_frame(), 1);
    }

    #[test]
    fn wraps_after_last_frame() {
        let mut anim = SpriteAnimation::new(vec![0, 1], 2, 1);
        anim.advance(0.3);
        anim.advance(0.3);
        assert_eq!(anim.index(), 0);
    }

    #[test]
    fn large_dt_moves_one_frame_only() {
        let mut anim = SpriteAnimation::new(vec![0, 1, 2], 3, 1);
        anim.advance(5.0);
        assert_eq!(anim.index(), 1);
    }

    #[test]
    fn empty_animation_is_inert() {
        let mut anim = SpriteAnimation::new(Vec::new(), 0, 0);
        anim.advance(1.0);
        assert_eq!(anim.current_frame(), 0);
        assert_eq!(anim.cols(), 1);
    }
}
