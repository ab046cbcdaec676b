//! Attack, dash and stun bookkeeping plus damage application.
//!
//! All cooldown timers decrement by a constant amount per frame and clamp at
//! zero. Intent flags (`want_attack`, `want_dash`) are one-shot: they are
//! consumed unconditionally every tick whether or not the action fired, so a
//! controller must re-assert them to retry.

use glam::Vec2;

use crate::entity::Entity;
use crate::tuning::{CombatTuning, PhysicsTuning};

/// Attack trigger and combo window.
///
/// The combo counter is time-windowed: it resets to zero once the gap since
/// the last successful attack reaches the hold window, so a chain of up to
/// `max_combo` swings only builds while the attacker keeps pressing.
pub fn tick_attack(ent: &mut Entity, c: &CombatTuning, now: f64) {
    if now - ent.last_attack_at >= c.combo_hold_window {
        ent.combo_count = 0;
    }

    let wants = ent.want_attack;
    ent.want_attack = false;

    if wants
        && !ent.stunned
        && ent.attack_cooldown == 0.0
        && ent.swing_cooldown == 0.0
        && ent.combo_count < c.max_combo
    {
        ent.attack_queued = true;
        ent.combo_count += 1;
        ent.last_attack_at = now;
    }

    ent.attack_cooldown = (ent.attack_cooldown - c.cooldown_decay).max(0.0);
    ent.swing_cooldown = (ent.swing_cooldown - c.cooldown_decay).max(0.0);
}

/// Dash trigger, cooldown decay and ghost-trail bookkeeping.
///
/// On trigger the dash is a one-shot acceleration impulse along the facing
/// direction; actual motion still goes through the regular integrator. The
/// endpoint recorded for the ghost trail comes from replaying the impulse's
/// friction decay to rest, which is exactly what the integrator will do over
/// the following frames.
pub fn tick_dash(ent: &mut Entity, c: &CombatTuning, p: &PhysicsTuning, dt: f32) {
    let wants = ent.want_dash;
    ent.want_dash = false;

    if wants && !ent.stunned && ent.dash_cooldown == 0.0 && dt > 0.0 {
        ent.dashing = true;
        ent.accel.x += c.dash_accel * ent.facing.sign();

        let start = ent.pos.truncate();
        let mut probe_accel = ent.accel;
        let mut predicted = start;
        while probe_accel.length() > 1.0 {
            let vel = probe_accel * dt;
            predicted += vel * dt;
            probe_accel *= p.air_friction;
            probe_accel.x *= p.ground_friction;
        }

        ent.dash_from = start;
        ent.dash_to = predicted;
        ent.dash_frame = ent.frame;
        ent.dash_facing = ent.facing;
        ent.dash_cooldown = c.dash_cooldown;
        ent.ghost_alpha = c.ghost_alpha_start;
    }

    ent.dash_cooldown = (ent.dash_cooldown - c.cooldown_decay).max(0.0);

    // The fading trail doubles as the dash-active window.
    if ent.dashing {
        ent.ghost_alpha -= c.ghost_fade;
        if ent.ghost_alpha <= 0.0 {
            ent.ghost_alpha = 0.0;
            ent.dashing = false;
        }
    }
}

/// Stun decay: the hit flag clears when the timer drains.
pub fn tick_stun(ent: &mut Entity, c: &CombatTuning) {
    if ent.stunned {
        ent.stun_timer = (ent.stun_timer - c.cooldown_decay).max(0.0);
        if ent.stun_timer == 0.0 {
            ent.stunned = false;
        }
    }
}

/// Apply the attacker's queued swing to the defender.
///
/// Runs on the one frame `attack_queued` is true (the flag is consumed at
/// animation-selection time), so a single swing can never multi-hit. Bounds
/// are inclusive: a sword tip exactly on the defender's edge connects.
pub fn strike(attacker: &Entity, defender: &mut Entity, c: &CombatTuning) {
    if !attacker.attack_queued || attacker.dead || defender.dead {
        return;
    }
    if !attacker.hitbox(c).touches(&defender.world_collider()) {
        return;
    }

    defender.accel += Vec2::new(c.knockback_accel * attacker.facing.sign(), 0.0);
    defender.stunned = true;
    defender.stun_timer = c.stun_ticks;
    defender.health -= c.strike_damage;
}
