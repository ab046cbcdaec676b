//! Acceleration-driven integration and axis-separated collision resolution.
//!
//! The motion model is unusual but deliberate: velocity is recomputed from
//! acceleration every frame and zeroed at the end of every resolve, so
//! acceleration (decayed by per-frame friction) is the only state that
//! carries across frames. Impulses (jump, dash, knockback) are therefore
//! injected as acceleration spikes that friction bleeds off over the next
//! dozen frames.
//!
//! X resolution runs a swept leading-edge segment test before the discrete
//! overlap pass. A dash can cross a thin wall in a single step; the segment
//! clip catches the crossing and snaps the entity flush to the wall, where
//! the endpoint-only overlap test would have tunneled straight through.

use duel_core::geom::Rect;
use glam::Vec2;

use crate::entity::{Entity, JumpPhase};
use crate::tuning::PhysicsTuning;

/// Gravity, vertical clamp, velocity derivation and airtime accrual.
pub fn integrate(ent: &mut Entity, p: &PhysicsTuning, dt: f32) {
    ent.accel.y += p.gravity_accel;

    if ent.accel.y.abs() > p.vertical_accel_cap {
        ent.accel.y = if ent.accel.y < 0.0 {
            -p.vertical_accel_cap
        } else {
            p.vertical_accel_cap
        };
    }

    ent.vel += ent.accel * dt;
    ent.airtime += p.airtime_rate;

    // Screen space: y grows downward, so negative vertical velocity is up.
    ent.jump_phase = if ent.vel.y < 0.0 {
        JumpPhase::Ascent
    } else if ent.vel.y > 0.0 {
        JumpPhase::Descent
    } else {
        JumpPhase::Still
    };
}

/// Mid-height point of the collider face that leads the current X motion.
fn leading_point(ent: &Entity) -> Vec2 {
    let body = ent.world_collider();
    let x = if ent.vel.x >= 0.0 { body.right() } else { body.x };
    Vec2::new(x, body.y + body.h * 0.5)
}

/// Axis-separated resolution against the static platform set, X before Y.
pub fn resolve(ent: &mut Entity, platforms: &[Rect], p: &PhysicsTuning, dt: f32) {
    // --- X axis -------------------------------------------------------------
    let lead_before = leading_point(ent);
    ent.pos.x += ent.vel.x * dt;

    let mut swept_platform = None;
    if ent.vel.x != 0.0 {
        let lead_after = leading_point(ent);
        // Nearest swept hit wins; the others are either behind it or will be
        // handled by the discrete pass.
        let mut nearest: Option<(usize, f32, f32)> = None;
        for (i, rect) in platforms.iter().enumerate() {
            if let Some(hit) = rect.clip_segment(lead_before, lead_after) {
                if nearest.is_none_or(|(_, t, _)| hit.t < t) {
                    nearest = Some((i, hit.t, hit.point.x));
                }
            }
        }
        if let Some((i, _, hit_x)) = nearest {
            // Snap so the leading edge lands exactly on the hit point.
            if ent.vel.x > 0.0 {
                ent.pos.x = hit_x - (ent.collider.x + ent.collider.w);
            } else {
                ent.pos.x = hit_x - ent.collider.x;
            }
            swept_platform = Some(i);
        }
    }

    for (i, rect) in platforms.iter().enumerate() {
        if swept_platform == Some(i) {
            continue;
        }
        let body = ent.world_collider();
        if body.overlaps(rect) {
            if ent.vel.x > 0.0 {
                ent.pos.x -= body.right() - rect.x;
            } else if ent.vel.x < 0.0 {
                ent.pos.x += rect.right() - body.x;
            }
        }
    }

    // --- Y axis -------------------------------------------------------------
    ent.pos.y += ent.vel.y * dt;
    for rect in platforms {
        let body = ent.world_collider();
        if body.overlaps(rect) {
            if ent.vel.y > 0.0 {
                // Land on top: rest flush, ground the jump state.
                ent.pos.y -= body.bottom() - rect.y;
                ent.airtime = 0.0;
                ent.jump_phase = JumpPhase::Still;
            } else if ent.vel.y < 0.0 {
                // Bonk: slide down flush under the platform.
                ent.pos.y += rect.bottom() - body.y;
            }
        }
    }

    // Friction drains acceleration every frame, X harder than Y.
    ent.accel *= p.air_friction;
    ent.accel.x *= p.ground_friction;

    // Velocity is per-frame scratch; it never carries into the next frame.
    ent.vel = Vec2::ZERO;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::test_support::test_entity;
    use crate::entity::Facing;

    const DT: f32 = 1.0 / 60.0;

    fn floor() -> Vec<Rect> {
        vec![Rect::new(-1000.0, 400.0, 3000.0, 100.0)]
    }

    #[test]
    fn velocity_is_zero_after_every_resolve() {
        let p = PhysicsTuning::default();
        let mut ent = test_entity(100.0, 336.0, Facing::Right);
        let platforms = floor();
        for _ in 0..120 {
            ent.accel.x += p.move_accel;
            integrate(&mut ent, &p, DT);
            resolve(&mut ent, &platforms, &p, DT);
            assert_eq!(ent.vel, Vec2::ZERO);
        }
    }

    #[test]
    fn gravity_pulls_the_entity_onto_the_floor() {
        let p = PhysicsTuning::default();
        let mut ent = test_entity(100.0, 0.0, Facing::Right);
        let platforms = floor();
        for _ in 0..600 {
            integrate(&mut ent, &p, DT);
            resolve(&mut ent, &platforms, &p, DT);
        }
        // Resting flush on top of the floor: collider bottom == floor top.
        assert!((ent.world_collider().bottom() - 400.0).abs() < 0.001);
        assert_eq!(ent.jump_phase, JumpPhase::Still);
        assert_eq!(ent.airtime, 0.0);
    }

    #[test]
    fn vertical_acceleration_is_clamped() {
        let p = PhysicsTuning::default();
        let mut ent = test_entity(0.0, 0.0, Facing::Right);
        ent.accel.y = -500_000.0;
        integrate(&mut ent, &p, DT);
        assert_eq!(ent.accel.y, -p.vertical_accel_cap);

        ent.accel.y = 500_000.0;
        integrate(&mut ent, &p, DT);
        assert_eq!(ent.accel.y, p.vertical_accel_cap);
    }

    #[test]
    fn rightward_motion_stops_flush_at_a_wall() {
        let p = PhysicsTuning::default();
        let wall = Rect::new(300.0, 0.0, 50.0, 600.0);
        let platforms = vec![wall];
        let mut ent = test_entity(200.0, 100.0, Facing::Right);
        // Moderate speed: crosses into the wall within a single frame.
        ent.vel = Vec2::new(3_000.0, 0.0);
        resolve(&mut ent, &platforms, &p, 1.0 / 60.0);
        assert!((ent.world_collider().right() - 300.0).abs() < 0.001);
        assert_eq!(ent.vel, Vec2::ZERO);
    }

    #[test]
    fn leftward_motion_stops_flush_at_a_wall() {
        let p = PhysicsTuning::default();
        let wall = Rect::new(100.0, 0.0, 50.0, 600.0);
        let platforms = vec![wall];
        let mut ent = test_entity(160.0, 100.0, Facing::Left);
        ent.vel = Vec2::new(-900.0, 0.0);
        resolve(&mut ent, &platforms, &p, 1.0 / 60.0);
        assert!((ent.world_collider().x - 150.0).abs() < 0.001);
    }

    #[test]
    fn dash_speed_cannot_tunnel_through_a_thin_wall() {
        let p = PhysicsTuning::default();
        // 10px-thin wall; a 18_000 px/s step covers 300px in one frame, so the
        // discrete endpoint test alone would never see the overlap.
        let wall = Rect::new(500.0, 0.0, 10.0, 600.0);
        let platforms = vec![wall];
        let mut ent = test_entity(300.0, 100.0, Facing::Right);
        ent.vel = Vec2::new(18_000.0, 0.0);

        let before = ent.world_collider();
        let after_unclipped = Rect::new(
            before.x + 18_000.0 / 60.0,
            before.y,
            before.w,
            before.h,
        );
        assert!(
            !after_unclipped.overlaps(&wall),
            "precondition: endpoint overlap test would miss this wall"
        );

        resolve(&mut ent, &platforms, &p, 1.0 / 60.0);
        assert!(
            (ent.world_collider().right() - 500.0).abs() < 0.001,
            "swept test must stop the dash at the wall's near edge"
        );
    }

    #[test]
    fn upward_motion_snaps_below_a_ceiling() {
        let p = PhysicsTuning::default();
        let ceiling = Rect::new(0.0, 100.0, 600.0, 40.0);
        let platforms = vec![ceiling];
        let mut ent = test_entity(100.0, 150.0, Facing::Right);
        ent.vel = Vec2::new(0.0, -1200.0);
        resolve(&mut ent, &platforms, &p, 1.0 / 60.0);
        assert!((ent.world_collider().y - 140.0).abs() < 0.001);
    }

    #[test]
    fn friction_decays_acceleration_each_frame() {
        let p = PhysicsTuning::default();
        let mut ent = test_entity(0.0, 0.0, Facing::Right);
        ent.accel = Vec2::new(10_000.0, -10_000.0);
        resolve(&mut ent, &[], &p, DT);
        assert!((ent.accel.x - 10_000.0 * p.air_friction * p.ground_friction).abs() < 0.01);
        assert!((ent.accel.y - -10_000.0 * p.air_friction).abs() < 0.01);
    }

    #[test]
    fn jump_phase_tracks_vertical_velocity_sign() {
        let p = PhysicsTuning::default();
        let mut ent = test_entity(0.0, 0.0, Facing::Right);
        ent.accel.y = -p.vertical_accel_cap;
        integrate(&mut ent, &p, DT);
        assert_eq!(ent.jump_phase, JumpPhase::Ascent);

        let mut ent = test_entity(0.0, 0.0, Facing::Right);
        ent.accel.y = 10_000.0;
        integrate(&mut ent, &p, DT);
        assert_eq!(ent.jump_phase, JumpPhase::Descent);
    }
}
