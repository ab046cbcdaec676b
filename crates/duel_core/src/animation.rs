//! Sprite-sheet animation tables and per-entity playback cursors.
//!
//! The frame tables are immutable after construction and shared between
//! entities behind an `Arc` -- each combatant only owns an `AnimCursor`
//! (current state + wall-clock anchor), so two entities animating from the
//! same sheet never duplicate the frame-rectangle arrays and still tick
//! independently.
//!
//! Timing is wall-clock driven: the cursor records when the current state was
//! entered and derives the frame index from elapsed time on every query.
//! Repeating clips wrap their anchor forward by whole periods, preserving the
//! remainder so `frame(D + e) == frame(e)`. One-shot clips (death) freeze on
//! their final frame forever.

use crate::geom::Rect;

/// Logical animation states. Exactly one is active per entity at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimState {
    Idle,
    Walk,
    Ascent,
    Descent,
    SwingA,
    SwingB,
    Death,
}

/// One playable clip: an ordered run of sheet-space frame rectangles.
#[derive(Debug, Clone)]
pub struct Clip {
    pub state: AnimState,
    /// Total clip duration in milliseconds.
    pub duration_ms: f32,
    /// One-shot clips hold their last frame instead of looping.
    pub one_shot: bool,
    /// Normalized sub-rectangles of the sprite sheet, in playback order.
    pub frames: Vec<Rect>,
}

/// Immutable set of clips for one sprite sheet. Built once at load time and
/// shared by value-in-`Arc` into every entity using that sheet.
#[derive(Debug, Clone)]
pub struct ClipSet {
    clips: Vec<Clip>,
}

impl ClipSet {
    pub fn new(clips: Vec<Clip>) -> Self {
        Self { clips }
    }

    /// Look up the clip for `state`. An unknown state is a logic bug in the
    /// caller, not a runtime condition, and aborts with a diagnostic.
    pub fn clip(&self, state: AnimState) -> &Clip {
        self.clips
            .iter()
            .find(|c| c.state == state)
            .unwrap_or_else(|| panic!("no clip registered for animation state {state:?}"))
    }

    pub fn has_clip(&self, state: AnimState) -> bool {
        self.clips.iter().any(|c| c.state == state)
    }
}

/// Lightweight per-entity playback position: which state is active and when
/// it was entered. All queries take the shared `ClipSet` plus a wall-clock
/// `now` in seconds.
#[derive(Debug, Clone, Copy)]
pub struct AnimCursor {
    pub state: AnimState,
    started_at: f64,
}

impl AnimCursor {
    pub fn new(state: AnimState, now: f64) -> Self {
        Self {
            state,
            started_at: now,
        }
    }

    /// Switch to `state`, restarting its clip from frame 0. Re-requesting the
    /// active state is a no-op so a held key does not restart the clip.
    pub fn switch(&mut self, state: AnimState, now: f64) {
        if state == self.state {
            return;
        }
        self.state = state;
        self.started_at = now;
    }

    /// Current frame index and sheet rectangle.
    pub fn frame(&mut self, set: &ClipSet, now: f64) -> (usize, Rect) {
        let clip = set.clip(self.state);
        let duration_s = f64::from(clip.duration_ms) / 1000.0;

        let mut elapsed = now - self.started_at;
        if elapsed >= duration_s && duration_s > 0.0 {
            if clip.one_shot {
                // Hold the final frame: time stops advancing past the clip end.
                elapsed = duration_s;
            } else {
                // Wrap by whole periods so the remainder survives the loop.
                let periods = (elapsed / duration_s).floor();
                self.started_at += periods * duration_s;
                elapsed = now - self.started_at;
            }
        }

        let count = clip.frames.len();
        let raw = ((count as f64) * elapsed / duration_s.max(f64::MIN_POSITIVE)) as usize;
        // Duration/frame-count mismatches clamp rather than crash.
        let index = raw.min(count.saturating_sub(1));
        (index, clip.frames[index])
    }

    /// True when playback sits on the clip's final frame. Used to detect
    /// swing completion.
    pub fn on_last_frame(&mut self, set: &ClipSet, now: f64) -> bool {
        let count = set.clip(self.state).frames.len();
        let (index, _) = self.frame(set, now);
        index + 1 == count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_frames(count: usize) -> Vec<Rect> {
        (0..count)
            .map(|i| Rect::new(i as f32 / count as f32, 0.0, 1.0 / count as f32, 0.125))
            .collect()
    }

    fn sample_set() -> ClipSet {
        ClipSet::new(vec![
            Clip {
                state: AnimState::Idle,
                duration_ms: 800.0,
                one_shot: false,
                frames: grid_frames(8),
            },
            Clip {
                state: AnimState::SwingA,
                duration_ms: 400.0,
                one_shot: false,
                frames: grid_frames(4),
            },
            Clip {
                state: AnimState::Death,
                duration_ms: 1400.0,
                one_shot: true,
                frames: grid_frames(14),
            },
        ])
    }

    #[test]
    fn frame_index_advances_with_elapsed_time() {
        let set = sample_set();
        let mut cursor = AnimCursor::new(AnimState::Idle, 0.0);
        assert_eq!(cursor.frame(&set, 0.0).0, 0);
        assert_eq!(cursor.frame(&set, 0.05).0, 0);
        assert_eq!(cursor.frame(&set, 0.15).0, 1);
        assert_eq!(cursor.frame(&set, 0.75).0, 7);
    }

    #[test]
    fn repeating_clip_wraps_preserving_remainder() {
        let set = sample_set();
        // For several epsilons inside one period, D + e lands on the same
        // frame as e alone.
        for eps in [0.0, 0.1, 0.33, 0.79] {
            let mut fresh = AnimCursor::new(AnimState::Idle, 0.0);
            let expected = fresh.frame(&set, eps).0;
            let mut wrapped = AnimCursor::new(AnimState::Idle, 0.0);
            assert_eq!(
                wrapped.frame(&set, 0.8 + eps).0,
                expected,
                "wrap mismatch at eps={eps}"
            );
        }
    }

    #[test]
    fn repeating_clip_wraps_across_many_periods() {
        let set = sample_set();
        let mut cursor = AnimCursor::new(AnimState::Idle, 0.0);
        // 10 full loops plus 0.25s => same frame as 0.25s.
        assert_eq!(cursor.frame(&set, 8.25).0, 2);
    }

    #[test]
    fn one_shot_clip_freezes_on_last_frame() {
        let set = sample_set();
        let mut cursor = AnimCursor::new(AnimState::Death, 0.0);
        assert_eq!(cursor.frame(&set, 1.4).0, 13);
        assert_eq!(cursor.frame(&set, 2.0).0, 13);
        assert_eq!(cursor.frame(&set, 100.0).0, 13);
    }

    #[test]
    fn switch_resets_clip_and_held_state_is_noop() {
        let set = sample_set();
        let mut cursor = AnimCursor::new(AnimState::Idle, 0.0);
        assert_eq!(cursor.frame(&set, 0.35).0, 3);

        // Re-requesting the active state keeps the anchor.
        cursor.switch(AnimState::Idle, 0.35);
        assert_eq!(cursor.frame(&set, 0.36).0, 3);

        // Switching states restarts from frame 0.
        cursor.switch(AnimState::SwingA, 0.4);
        assert_eq!(cursor.frame(&set, 0.4).0, 0);
        assert_eq!(cursor.frame(&set, 0.55).0, 1);
    }

    #[test]
    fn on_last_frame_tracks_swing_completion() {
        let set = sample_set();
        let mut cursor = AnimCursor::new(AnimState::SwingA, 0.0);
        assert!(!cursor.on_last_frame(&set, 0.0));
        assert!(!cursor.on_last_frame(&set, 0.15));
        assert!(cursor.on_last_frame(&set, 0.35));
    }

    #[test]
    #[should_panic(expected = "no clip registered")]
    fn unknown_state_lookup_panics() {
        let set = sample_set();
        set.clip(AnimState::Walk);
    }
}
