//! Combatant state: kinematics, combat flags, dash bookkeeping, animation.
//!
//! Combat state is a set of independent flags rather than one enum because
//! several can legitimately be true across a frame boundary (a stunned entity
//! can still be mid-swing while its dash ghost fades). The per-frame pipeline
//! is `step()`: combat timers first, then movement intent, then physics
//! integration and collision resolution. Animation-state selection runs
//! separately at render time via `refresh_animation()` so a swing can consume
//! the `attack_queued` flag exactly once.

use std::sync::Arc;

use duel_core::animation::{AnimCursor, AnimState, ClipSet};
use duel_core::geom::Rect;
use glam::{Vec2, Vec3};

use crate::arena::Arena;
use crate::combat;
use crate::physics;
use crate::tuning::{CombatTuning, PhysicsTuning, Tuning};

/// Read-only per-frame simulation environment, passed by reference into every
/// subsystem call.
pub struct SimContext<'a> {
    pub arena: &'a Arena,
    pub tuning: &'a Tuning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Vertical motion phase derived from the sign of vertical velocity.
/// `Still` is asserted by ground contact during Y resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpPhase {
    Ascent,
    Descent,
    #[default]
    Still,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub left: bool,
    pub right: bool,
}

pub struct Entity {
    // --- Kinematics ---------------------------------------------------------
    /// World position; z participates in draw ordering only.
    pub pos: Vec3,
    /// Visual quad size.
    pub size: Vec2,
    /// Collision rectangle in local space, anchored at `pos`.
    pub collider: Rect,
    /// Per-frame scratch velocity: derived from acceleration each frame and
    /// zeroed at the end of every resolve.
    pub vel: Vec2,
    pub accel: Vec2,
    pub airtime: f32,
    pub jump_phase: JumpPhase,
    pub facing: Facing,
    pub intent: MoveIntent,

    // --- Combat -------------------------------------------------------------
    pub health: f32,
    pub dead: bool,
    pub want_attack: bool,
    pub attack_queued: bool,
    pub attack_cooldown: f32,
    pub swing_cooldown: f32,
    pub swing_done: bool,
    /// Which swing variant played last; the next swing uses the other one.
    pub last_swing: AnimState,
    pub last_attack_at: f64,
    pub combo_count: u32,
    /// Enemy-only gate: true while committed to a full combo sequence.
    pub combo_active: bool,

    // --- Dash ---------------------------------------------------------------
    pub dashing: bool,
    pub want_dash: bool,
    pub dash_cooldown: f32,
    pub dash_from: Vec2,
    pub dash_to: Vec2,
    /// Sheet rectangle and facing captured when the dash fired, sampled by
    /// the ghost trail.
    pub dash_frame: Rect,
    pub dash_facing: Facing,
    pub ghost_alpha: f32,

    // --- Damage -------------------------------------------------------------
    pub stunned: bool,
    pub stun_timer: f32,

    // --- Animation ----------------------------------------------------------
    pub clips: Arc<ClipSet>,
    pub anim: AnimCursor,
    /// Sheet rectangle of the frame chosen by the last `refresh_animation`.
    pub frame: Rect,
}

impl Entity {
    pub fn spawn(
        pos: Vec2,
        facing: Facing,
        clips: Arc<ClipSet>,
        tuning: &CombatTuning,
        now: f64,
    ) -> Self {
        let mut anim = AnimCursor::new(AnimState::Idle, now);
        let frame = anim.frame(&clips, now).1;
        Self {
            pos: Vec3::new(pos.x, pos.y, 0.0),
            size: Vec2::new(64.0, 64.0),
            collider: Rect::new(0.0, 0.0, 64.0, 64.0),
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            airtime: 0.0,
            jump_phase: JumpPhase::Still,
            facing,
            intent: MoveIntent::default(),
            health: tuning.max_health,
            dead: false,
            want_attack: false,
            attack_queued: false,
            attack_cooldown: 0.0,
            swing_cooldown: 0.0,
            swing_done: true,
            last_swing: AnimState::SwingB,
            last_attack_at: f64::NEG_INFINITY,
            combo_count: 0,
            combo_active: false,
            dashing: false,
            want_dash: false,
            dash_cooldown: 0.0,
            dash_from: pos,
            dash_to: pos,
            dash_frame: frame,
            dash_facing: facing,
            ghost_alpha: 0.0,
            stunned: false,
            stun_timer: 0.0,
            clips,
            anim,
            frame,
        }
    }

    pub fn world_collider(&self) -> Rect {
        self.collider.anchored_at(self.pos.truncate())
    }

    /// Melee hitbox: a rectangle in front of the collider on the facing side.
    /// Dashing extends the reach and starts the box further back across the
    /// body, so a dash-through connects along the whole pass.
    pub fn hitbox(&self, tuning: &CombatTuning) -> Rect {
        let body = self.world_collider();
        let (range, frac) = if self.dashing {
            (
                tuning.hit_range + tuning.dash_hit_bonus,
                tuning.dash_hitbox_forward_frac,
            )
        } else {
            (tuning.hit_range, tuning.hitbox_forward_frac)
        };
        match self.facing {
            Facing::Right => Rect::new(body.x + body.w * frac, body.y, range, body.h),
            Facing::Left => Rect::new(body.x + body.w * (1.0 - frac) - range, body.y, range, body.h),
        }
    }

    /// One simulation step: combat timers, movement intent, then physics.
    /// Dead entities are frozen; their animation still resolves elsewhere.
    pub fn step(&mut self, ctx: &SimContext<'_>, dt: f32, now: f64) {
        if self.dead {
            return;
        }
        combat::tick_attack(self, &ctx.tuning.combat, now);
        combat::tick_dash(self, &ctx.tuning.combat, &ctx.tuning.physics, dt);
        combat::tick_stun(self, &ctx.tuning.combat);
        self.apply_movement(&ctx.tuning.physics);
        physics::integrate(self, &ctx.tuning.physics, dt);
        physics::resolve(self, &ctx.arena.platforms, &ctx.tuning.physics, dt);
    }

    fn apply_movement(&mut self, p: &PhysicsTuning) {
        if self.intent.up && self.airtime < p.airtime_limit {
            self.accel.y -= p.jump_accel;
        }
        if self.intent.left {
            self.accel.x -= p.move_accel;
            self.facing = Facing::Left;
        }
        if self.intent.right {
            self.accel.x += p.move_accel;
            self.facing = Facing::Right;
        }
    }

    /// Animation-state selection, run once per frame at render time.
    ///
    /// Ordering matters: locomotion may not interrupt an unfinished swing, a
    /// queued attack overrides locomotion and consumes the attack flag, and
    /// death overrides everything permanently.
    pub fn refresh_animation(&mut self, tuning: &CombatTuning, now: f64) {
        if self.health <= 0.0 {
            self.dead = true;
            self.attack_queued = false;
            self.anim.switch(AnimState::Death, now);
            self.frame = self.anim.frame(&self.clips, now).1;
            return;
        }

        if self.swing_done {
            let mut state = if self.intent.left != self.intent.right {
                AnimState::Walk
            } else {
                AnimState::Idle
            };
            state = match self.jump_phase {
                JumpPhase::Ascent => AnimState::Ascent,
                JumpPhase::Descent => AnimState::Descent,
                JumpPhase::Still => state,
            };
            self.anim.switch(state, now);
        }

        if self.attack_queued {
            let next = if self.last_swing == AnimState::SwingA {
                AnimState::SwingB
            } else {
                AnimState::SwingA
            };
            self.anim.switch(next, now);
            self.last_swing = next;
            self.attack_queued = false;
            self.swing_done = false;
            self.swing_cooldown = tuning.swing_cooldown;
        }

        if !self.swing_done && self.anim.on_last_frame(&self.clips, now) {
            self.swing_done = true;
        }

        self.frame = self.anim.frame(&self.clips, now).1;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use duel_core::animation::Clip;

    pub fn test_clips() -> Arc<ClipSet> {
        let grid = |count: usize, row: f32| -> Vec<Rect> {
            (0..count)
                .map(|i| Rect::new(i as f32 / 14.0, row / 8.0, 1.0 / 14.0, 1.0 / 8.0))
                .collect()
        };
        Arc::new(ClipSet::new(vec![
            Clip {
                state: AnimState::Idle,
                duration_ms: 800.0,
                one_shot: false,
                frames: grid(8, 0.0),
            },
            Clip {
                state: AnimState::Walk,
                duration_ms: 800.0,
                one_shot: false,
                frames: grid(8, 1.0),
            },
            Clip {
                state: AnimState::SwingA,
                duration_ms: 400.0,
                one_shot: false,
                frames: grid(4, 2.0),
            },
            Clip {
                state: AnimState::SwingB,
                duration_ms: 300.0,
                one_shot: false,
                frames: grid(3, 3.0),
            },
            Clip {
                state: AnimState::Ascent,
                duration_ms: 400.0,
                one_shot: false,
                frames: grid(4, 4.0),
            },
            Clip {
                state: AnimState::Descent,
                duration_ms: 400.0,
                one_shot: false,
                frames: grid(4, 5.0),
            },
            Clip {
                state: AnimState::Death,
                duration_ms: 1400.0,
                one_shot: true,
                frames: grid(14, 7.0),
            },
        ]))
    }

    pub fn test_entity(x: f32, y: f32, facing: Facing) -> Entity {
        Entity::spawn(
            Vec2::new(x, y),
            facing,
            test_clips(),
            &CombatTuning::default(),
            0.0,
        )
    }
}
