//! Axis-aligned rectangle math shared by collision, combat and rendering.
//!
//! Two intersection flavors exist on purpose:
//!  - `overlaps` uses strict inequalities and is the collision-resolution
//!    test (an entity resting flush against a platform does not re-collide).
//!  - `touches` uses inclusive bounds and is the combat hitbox test (a sword
//!    tip exactly on the opponent's edge still connects).
//!
//! `clip_segment` is a slab-method segment-vs-rect clip used by the swept
//! X-axis pass that keeps fast horizontal dashes from tunneling through thin
//! geometry in a single integration step.

use glam::Vec2;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Result of clipping a segment against a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Parametric position of entry along the segment, in `[0, 1]`.
    pub t: f32,
    pub point: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// The rectangle translated so its local offset is anchored at `pos`.
    pub fn anchored_at(self, pos: Vec2) -> Self {
        Self {
            x: pos.x + self.x,
            y: pos.y + self.y,
            w: self.w,
            h: self.h,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Strict-inequality overlap test for collision resolution.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Inclusive-bounds intersection test for combat hitboxes.
    pub fn touches(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.x < p.x && p.x < self.right() && self.y < p.y && p.y < self.bottom()
    }

    /// Slab-method clip of the segment `a -> b` against this rectangle.
    ///
    /// Computes per-axis entry/exit parameters and intersects the intervals.
    /// Returns `None` when the intervals are disjoint, when the segment runs
    /// parallel to an axis with its origin outside that slab, or when the
    /// entry parameter falls outside `[0, 1]`.
    pub fn clip_segment(&self, a: Vec2, b: Vec2) -> Option<SegmentHit> {
        let delta = b - a;

        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;

        for axis in 0..2 {
            let (origin, dir, lo, hi) = if axis == 0 {
                (a.x, delta.x, self.x, self.right())
            } else {
                (a.y, delta.y, self.y, self.bottom())
            };

            if dir == 0.0 {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let mut t0 = (lo - origin) / dir;
            let mut t1 = (hi - origin) / dir;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
        }

        if t_enter > t_exit {
            return None;
        }
        if !(0.0..=1.0).contains(&t_enter) {
            return None;
        }

        Some(SegmentHit {
            t: t_enter,
            point: a + delta * t_enter,
        })
    }
}
