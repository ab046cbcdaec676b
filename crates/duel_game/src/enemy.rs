//! Enemy behavior: a reactive policy evaluated once per frame.
//!
//! There is no scripted state machine beyond three implicit modes: committed
//! to a combo, punished (attack cooldown running) and chasing. Rules are
//! checked in priority order; whatever intents fall out are fed through the
//! exact same attack/dash/movement/physics pipeline the player uses.

use rand::Rng;

use crate::arena::Arena;
use crate::entity::{Entity, Facing, MoveIntent};
use crate::tuning::Tuning;

/// Decide this frame's intents for the enemy. Call before `Entity::step`.
pub fn drive<R: Rng>(
    enemy: &mut Entity,
    player: &Entity,
    arena: &Arena,
    tuning: &Tuning,
    rng: &mut R,
) {
    if enemy.dead {
        return;
    }
    let e = &tuning.enemy;
    enemy.intent = MoveIntent::default();

    if enemy.combo_active {
        // Committed to the combo: hold position and keep swinging until the
        // chain is spent, then back off behind a long cooldown.
        enemy.want_attack = true;
        if enemy.combo_count >= tuning.combat.max_combo {
            enemy.combo_active = false;
            enemy.attack_cooldown = e.punish_cooldown;
        }
    } else {
        enemy.facing = if player.pos.x < enemy.pos.x {
            Facing::Left
        } else {
            Facing::Right
        };
        enemy.want_attack = false;

        let gap = (player.pos.x - enemy.pos.x).abs();
        if enemy.attack_cooldown > 0.0 {
            // Punished: stay evasive until the cooldown drains.
            if gap <= e.hit_zone_range && rng.random_bool(e.retreat_dash_chance) {
                enemy.facing = escape_direction(enemy, arena);
                enemy.want_dash = true;
            } else if gap <= e.too_close_range {
                if player.pos.x < enemy.pos.x {
                    enemy.intent.right = true;
                } else {
                    enemy.intent.left = true;
                }
            }
        } else {
            // Chase: close the horizontal gap, follow the player upward.
            if gap > e.melee_range_x {
                if player.pos.x < enemy.pos.x {
                    enemy.intent.left = true;
                } else {
                    enemy.intent.right = true;
                }
            } else if player.pos.y + e.jump_chase_margin < enemy.pos.y {
                enemy.intent.up = true;
            }
        }
    }

    // Blade already reaches the player: commit to a combo, unless one just
    // ended and the punish cooldown is still running.
    if !enemy.combo_active
        && enemy.attack_cooldown == 0.0
        && !player.dead
        && enemy.hitbox(&tuning.combat).touches(&player.world_collider())
    {
        enemy.combo_active = true;
    }
}

/// Facing that points toward whichever arena side has more open room.
fn escape_direction(enemy: &Entity, arena: &Arena) -> Facing {
    let room_left = enemy.pos.x - arena.bounds.x;
    let room_right = arena.bounds.right() - enemy.pos.x;
    if room_left > room_right {
        Facing::Left
    } else {
        Facing::Right
    }
}
