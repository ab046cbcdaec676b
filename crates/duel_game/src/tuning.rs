//! Gameplay tuning knobs, grouped per subsystem.
//!
//! Cooldown-style timers (attack, swing, dash, stun) tick down by a constant
//! amount per frame, NOT per second -- the decay constants below are tuned
//! for the 60 FPS frame pacing and must be re-balanced if that target
//! changes.

#[derive(Debug, Clone, Copy)]
pub struct PhysicsTuning {
    pub move_accel: f32,
    pub jump_accel: f32,
    pub gravity_accel: f32,
    /// Clamp on |accel.y| after gravity, bounding both jump and fall rates.
    pub vertical_accel_cap: f32,
    /// Multiplied into acceleration every frame on both axes.
    pub air_friction: f32,
    /// Additional per-frame multiplier on the X component only. Applied
    /// regardless of ground contact.
    pub ground_friction: f32,
    pub airtime_rate: f32,
    /// Jump input is honored only while airtime sits below this, which gives
    /// a few frames of jump-boost after leaving the ground.
    pub airtime_limit: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            move_accel: 10_000.0,
            jump_accel: 30_000.0,
            gravity_accel: 2_000.0,
            vertical_accel_cap: 50_000.0,
            air_friction: 0.95,
            ground_friction: 0.5,
            airtime_rate: 10.0,
            airtime_limit: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CombatTuning {
    pub max_health: f32,
    pub strike_damage: f32,
    /// Reach of the hitbox in front of the collider.
    pub hit_range: f32,
    /// Extra reach while dashing.
    pub dash_hit_bonus: f32,
    /// How far across the collider the hitbox starts, as a fraction of its
    /// width measured from the trailing side. 1.0 = flush at the facing edge.
    pub hitbox_forward_frac: f32,
    pub dash_hitbox_forward_frac: f32,
    pub knockback_accel: f32,
    pub stun_ticks: f32,
    /// Constant per-frame decrement applied to every cooldown timer.
    pub cooldown_decay: f32,
    pub swing_cooldown: f32,
    pub max_combo: u32,
    /// Seconds after the last attack before the combo counter resets.
    pub combo_hold_window: f64,
    pub dash_accel: f32,
    pub dash_cooldown: f32,
    pub ghost_alpha_start: f32,
    pub ghost_fade: f32,
    pub ghost_steps: u32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            strike_damage: 10.0,
            hit_range: 70.0,
            dash_hit_bonus: 40.0,
            hitbox_forward_frac: 1.0,
            dash_hitbox_forward_frac: 0.5,
            knockback_accel: 60_000.0,
            stun_ticks: 20.0,
            cooldown_decay: 1.0,
            swing_cooldown: 25.0,
            max_combo: 3,
            combo_hold_window: 0.8,
            dash_accel: 300_000.0,
            dash_cooldown: 90.0,
            ghost_alpha_start: 0.8,
            ghost_fade: 0.05,
            ghost_steps: 5,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyTuning {
    /// Horizontal gap under which the enemy stops chasing and considers
    /// itself in melee.
    pub melee_range_x: f32,
    /// Gap under which a punished enemy considers itself inside the player's
    /// reach and may dash out.
    pub hit_zone_range: f32,
    /// Gap under which a punished enemy walks away instead of holding.
    pub too_close_range: f32,
    /// Per-frame probability of the retreat dash while inside the hit zone.
    pub retreat_dash_chance: f64,
    /// Attack cooldown imposed after finishing a full combo.
    pub punish_cooldown: f32,
    /// Vertical gap before the enemy tries to jump after the player.
    pub jump_chase_margin: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            melee_range_x: 60.0,
            hit_zone_range: 110.0,
            too_close_range: 48.0,
            retreat_dash_chance: 0.02,
            punish_cooldown: 120.0,
            jump_chase_margin: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tuning {
    pub physics: PhysicsTuning,
    pub combat: CombatTuning,
    pub enemy: EnemyTuning,
}
