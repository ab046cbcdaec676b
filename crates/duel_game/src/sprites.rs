//! Sprite-sheet catalog: builds the shared animation tables from the fighter
//! sheet's fixed column/row grid.
//!
//! The samurai sheet is a 14x8 grid of equal cells. Each animation occupies
//! one row, reading left to right; frame rectangles are normalized sheet
//! coordinates so the renderer never needs the texture's pixel size. Both
//! combatants share one `ClipSet` behind an `Arc` -- the table is immutable,
//! only the per-entity cursors advance.

use std::sync::Arc;

use duel_core::animation::{AnimState, Clip, ClipSet};
use duel_core::geom::Rect;

pub const FIGHTER_SHEET_PATH: &str = "assets/samurai.png";
const SHEET_COLUMNS: u32 = 14;
const SHEET_ROWS: u32 = 8;
const FRAME_MS: f32 = 100.0;

pub struct SpriteCatalog {
    pub fighter_clips: Arc<ClipSet>,
    pub fighter_texture_path: &'static str,
}

pub fn load_catalog() -> SpriteCatalog {
    SpriteCatalog {
        fighter_clips: Arc::new(fighter_clip_set()),
        fighter_texture_path: FIGHTER_SHEET_PATH,
    }
}

/// Row layout of the samurai sheet. Row 6 is unused filler in the source art.
fn fighter_clip_set() -> ClipSet {
    ClipSet::new(vec![
        row_clip(AnimState::Idle, 0, 8, false),
        row_clip(AnimState::Walk, 1, 8, false),
        row_clip(AnimState::SwingA, 2, 4, false),
        row_clip(AnimState::SwingB, 3, 3, false),
        row_clip(AnimState::Ascent, 4, 4, false),
        row_clip(AnimState::Descent, 5, 4, false),
        row_clip(AnimState::Death, 7, 14, true),
    ])
}

fn row_clip(state: AnimState, row: u32, frame_count: u32, one_shot: bool) -> Clip {
    let cell_w = 1.0 / SHEET_COLUMNS as f32;
    let cell_h = 1.0 / SHEET_ROWS as f32;
    let frames = (0..frame_count)
        .map(|col| Rect::new(col as f32 * cell_w, row as f32 * cell_h, cell_w, cell_h))
        .collect();
    Clip {
        state,
        duration_ms: FRAME_MS * frame_count as f32,
        one_shot,
        frames,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_animation_state_has_a_clip() {
        let set = fighter_clip_set();
        for state in [
            AnimState::Idle,
            AnimState::Walk,
            AnimState::Ascent,
            AnimState::Descent,
            AnimState::SwingA,
            AnimState::SwingB,
            AnimState::Death,
        ] {
            assert!(set.has_clip(state), "missing clip for {state:?}");
        }
    }

    #[test]
    fn clip_durations_scale_with_frame_count() {
        let set = fighter_clip_set();
        assert_eq!(set.clip(AnimState::Idle).duration_ms, 800.0);
        assert_eq!(set.clip(AnimState::SwingB).duration_ms, 300.0);
        assert_eq!(set.clip(AnimState::Death).duration_ms, 1400.0);
    }

    #[test]
    fn only_death_is_one_shot() {
        let set = fighter_clip_set();
        assert!(set.clip(AnimState::Death).one_shot);
        assert!(!set.clip(AnimState::Idle).one_shot);
        assert!(!set.clip(AnimState::SwingA).one_shot);
    }

    #[test]
    fn frame_rects_stay_inside_the_sheet() {
        let set = fighter_clip_set();
        for state in [AnimState::Idle, AnimState::SwingA, AnimState::Death] {
            for frame in &set.clip(state).frames {
                assert!(frame.x >= 0.0 && frame.right() <= 1.0 + 1e-6);
                assert!(frame.y >= 0.0 && frame.bottom() <= 1.0 + 1e-6);
            }
        }
    }

    #[test]
    fn death_row_spans_the_full_sheet_width() {
        let set = fighter_clip_set();
        let death = set.clip(AnimState::Death);
        assert_eq!(death.frames.len(), 14);
        let last = death.frames.last().unwrap();
        assert!((last.right() - 1.0).abs() < 1e-6);
    }
}
