//! Full-pipeline scenario tests: scripted intents driven through the same
//! per-frame update order the game loop uses (enemy policy, entity steps,
//! strikes, animation refresh).

use duel_core::geom::Rect;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::arena::Arena;
use crate::combat;
use crate::entity::test_support::test_entity;
use crate::entity::{Entity, Facing, SimContext};
use crate::enemy;
use crate::tuning::Tuning;

const DT: f32 = 1.0 / 60.0;

fn flat_arena() -> Arena {
    Arena {
        arena_id: "scenario".to_string(),
        bounds: Rect::new(0.0, 0.0, 800.0, 600.0),
        platforms: vec![Rect::new(-200.0, 400.0, 1200.0, 100.0)],
        player_spawn: Vec2::new(100.0, 336.0),
        enemy_spawn: Vec2::new(600.0, 336.0),
    }
}

/// One frame of the game-loop update order, minus rendering.
fn run_frame(
    player: &mut Entity,
    enemy_ent: &mut Entity,
    arena: &Arena,
    tuning: &Tuning,
    rng: &mut StdRng,
    now: f64,
) {
    let ctx = SimContext { arena, tuning };
    player.step(&ctx, DT, now);
    enemy::drive(enemy_ent, player, arena, tuning, rng);
    enemy_ent.step(&ctx, DT, now);
    combat::strike(player, enemy_ent, &tuning.combat);
    combat::strike(enemy_ent, player, &tuning.combat);
    player.refresh_animation(&tuning.combat, now);
    enemy_ent.refresh_animation(&tuning.combat, now);
}

#[test]
fn player_attack_lands_on_a_nearby_enemy() {
    let tuning = Tuning::default();
    let arena = flat_arena();
    let mut rng = StdRng::seed_from_u64(3);

    // 50 units apart, inside hit range.
    let mut player = test_entity(300.0, 336.0, Facing::Right);
    let mut enemy_ent = test_entity(350.0, 336.0, Facing::Left);
    // Freeze the enemy's own initiative so the exchange is one-sided.
    enemy_ent.attack_cooldown = 10_000.0;

    player.want_attack = true;
    run_frame(
        &mut player,
        &mut enemy_ent,
        &arena,
        &tuning,
        &mut rng,
        0.0,
    );

    assert_eq!(
        enemy_ent.health,
        tuning.combat.max_health - tuning.combat.strike_damage
    );
    assert!(enemy_ent.stunned);
    // Knocked away from the attacker: the shove points right, and it must
    // survive the frame's friction with its sign intact.
    assert!(enemy_ent.accel.x > 0.0);
    // The swing consumed the attack flag; the same swing cannot hit twice.
    assert!(!player.attack_queued);
}

#[test]
fn single_swing_never_multi_hits() {
    let tuning = Tuning::default();
    let arena = flat_arena();
    let mut rng = StdRng::seed_from_u64(3);

    let mut player = test_entity(300.0, 336.0, Facing::Right);
    let mut enemy_ent = test_entity(350.0, 336.0, Facing::Left);
    enemy_ent.attack_cooldown = 10_000.0;

    player.want_attack = true;
    for frame in 0..10 {
        run_frame(
            &mut player,
            &mut enemy_ent,
            &arena,
            &tuning,
            &mut rng,
            frame as f64 * f64::from(DT),
        );
    }
    assert_eq!(
        enemy_ent.health,
        tuning.combat.max_health - tuning.combat.strike_damage
    );
}

#[test]
fn ten_hits_kill_and_death_is_final() {
    let tuning = Tuning::default();
    let arena = flat_arena();
    let mut rng = StdRng::seed_from_u64(3);

    let mut player = test_entity(300.0, 336.0, Facing::Right);
    let mut enemy_ent = test_entity(350.0, 336.0, Facing::Left);
    enemy_ent.attack_cooldown = 1.0e9;

    let mut now = 0.0f64;
    let mut hits = 0;
    while hits < 10 {
        let before = enemy_ent.health;
        // Clear gates so each loop iteration can land a fresh swing.
        player.swing_cooldown = 0.0;
        player.swing_done = true;
        player.combo_count = 0;
        player.want_attack = true;
        run_frame(&mut player, &mut enemy_ent, &arena, &tuning, &mut rng, now);
        now += f64::from(DT);
        if enemy_ent.health < before {
            hits += 1;
        }
        // Keep the enemy in reach despite knockback drift.
        enemy_ent.pos.x = 350.0;
        assert!(now < 60.0, "took unreasonably long to land ten hits");
    }

    assert_eq!(enemy_ent.health, 0.0);
    assert!(enemy_ent.dead);
    assert_eq!(
        enemy_ent.anim.state,
        duel_core::animation::AnimState::Death
    );

    // Further swings change nothing; the corpse never animates out of Death.
    for _ in 0..30 {
        player.swing_cooldown = 0.0;
        player.swing_done = true;
        player.combo_count = 0;
        player.want_attack = true;
        run_frame(&mut player, &mut enemy_ent, &arena, &tuning, &mut rng, now);
        now += f64::from(DT);
    }
    assert_eq!(enemy_ent.health, 0.0);
    assert!(enemy_ent.dead);
    assert_eq!(
        enemy_ent.anim.state,
        duel_core::animation::AnimState::Death
    );
}

#[test]
fn dashing_player_is_stopped_by_a_thin_pillar() {
    let tuning = Tuning::default();
    let mut arena = flat_arena();
    // An 8px pillar standing on the floor, thinner than one dash-frame's travel.
    arena.platforms.push(Rect::new(500.0, 200.0, 8.0, 200.0));
    let mut rng = StdRng::seed_from_u64(3);

    let mut player = test_entity(380.0, 336.0, Facing::Right);
    let mut enemy_ent = test_entity(40.0, 336.0, Facing::Right);
    enemy_ent.dead = true; // keep the policy out of this test

    player.want_dash = true;
    for frame in 0..30 {
        run_frame(
            &mut player,
            &mut enemy_ent,
            &arena,
            &tuning,
            &mut rng,
            frame as f64 * f64::from(DT),
        );
    }

    // Never past the pillar's near face.
    assert!(
        player.world_collider().right() <= 500.0 + 0.001,
        "dash tunneled: collider right = {}",
        player.world_collider().right()
    );
}

#[test]
fn enemy_chases_walks_and_eventually_engages() {
    let tuning = Tuning::default();
    let arena = flat_arena();
    let mut rng = StdRng::seed_from_u64(11);

    let mut player = test_entity(200.0, 336.0, Facing::Right);
    let mut enemy_ent = test_entity(700.0, 336.0, Facing::Left);

    let mut now = 0.0f64;
    let mut engaged = false;
    for _ in 0..1800 {
        run_frame(&mut player, &mut enemy_ent, &arena, &tuning, &mut rng, now);
        now += f64::from(DT);
        if enemy_ent.combo_active || player.stunned {
            engaged = true;
            break;
        }
    }
    assert!(engaged, "enemy never closed the gap and attacked");
    assert!(enemy_ent.pos.x < 700.0, "enemy never moved toward the player");
}

#[test]
fn knockback_pushes_the_defender_measurably() {
    let tuning = Tuning::default();
    let arena = flat_arena();
    let mut rng = StdRng::seed_from_u64(3);

    let mut player = test_entity(300.0, 336.0, Facing::Right);
    let mut enemy_ent = test_entity(350.0, 336.0, Facing::Left);
    enemy_ent.attack_cooldown = 1.0e9;

    player.want_attack = true;
    let start_x = enemy_ent.pos.x;
    let mut now = 0.0f64;
    for _ in 0..30 {
        run_frame(&mut player, &mut enemy_ent, &arena, &tuning, &mut rng, now);
        now += f64::from(DT);
    }
    assert!(
        enemy_ent.pos.x > start_x + 5.0,
        "knockback displacement too small: {} -> {}",
        start_x,
        enemy_ent.pos.x
    );
}
