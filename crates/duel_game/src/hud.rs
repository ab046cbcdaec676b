//! HUD bar layout: health and dash-cooldown bars for both combatants,
//! expressed as world-space colored quads the mesh builder turns into
//! vertices. The camera is pinned to the arena bounds, so world space and
//! screen space coincide.

use duel_core::geom::Rect;

use crate::entity::Entity;
use crate::tuning::Tuning;

const BAR_MARGIN: f32 = 20.0;
const BAR_WIDTH: f32 = 220.0;
const BAR_HEIGHT: f32 = 16.0;
const COOLDOWN_HEIGHT: f32 = 6.0;
const BAR_GAP: f32 = 4.0;

const BACK_COLOR: [f32; 4] = [0.08, 0.08, 0.08, 0.85];
const PLAYER_FILL: [f32; 4] = [0.20, 0.85, 0.30, 1.0];
const ENEMY_FILL: [f32; 4] = [0.90, 0.25, 0.20, 1.0];
const COOLDOWN_FILL: [f32; 4] = [0.35, 0.75, 0.95, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudQuad {
    pub rect: Rect,
    pub color: [f32; 4],
}

/// Build the frame's HUD quads. Player bars anchor top-left, enemy bars
/// top-right with the fill draining toward the screen edge.
pub fn build_hud(player: &Entity, enemy: &Entity, tuning: &Tuning, bounds: &Rect) -> Vec<HudQuad> {
    let mut quads = Vec::with_capacity(8);

    let player_x = bounds.x + BAR_MARGIN;
    let enemy_x = bounds.right() - BAR_MARGIN - BAR_WIDTH;
    let top = bounds.y + BAR_MARGIN;

    push_bar(
        &mut quads,
        player_x,
        top,
        health_frac(player, tuning),
        PLAYER_FILL,
        false,
    );
    push_bar(
        &mut quads,
        enemy_x,
        top,
        health_frac(enemy, tuning),
        ENEMY_FILL,
        true,
    );

    let cooldown_top = top + BAR_HEIGHT + BAR_GAP;
    push_cooldown(
        &mut quads,
        player_x,
        cooldown_top,
        dash_ready_frac(player, tuning),
        false,
    );
    push_cooldown(
        &mut quads,
        enemy_x,
        cooldown_top,
        dash_ready_frac(enemy, tuning),
        true,
    );

    quads
}

fn health_frac(ent: &Entity, tuning: &Tuning) -> f32 {
    (ent.health / tuning.combat.max_health).clamp(0.0, 1.0)
}

fn dash_ready_frac(ent: &Entity, tuning: &Tuning) -> f32 {
    (1.0 - ent.dash_cooldown / tuning.combat.dash_cooldown).clamp(0.0, 1.0)
}

fn push_bar(quads: &mut Vec<HudQuad>, x: f32, y: f32, frac: f32, fill: [f32; 4], right_anchored: bool) {
    quads.push(HudQuad {
        rect: Rect::new(x, y, BAR_WIDTH, BAR_HEIGHT),
        color: BACK_COLOR,
    });
    let fill_w = BAR_WIDTH * frac;
    let fill_x = if right_anchored {
        x + BAR_WIDTH - fill_w
    } else {
        x
    };
    if fill_w > 0.0 {
        quads.push(HudQuad {
            rect: Rect::new(fill_x, y, fill_w, BAR_HEIGHT),
            color: fill,
        });
    }
}

fn push_cooldown(quads: &mut Vec<HudQuad>, x: f32, y: f32, frac: f32, right_anchored: bool) {
    quads.push(HudQuad {
        rect: Rect::new(x, y, BAR_WIDTH, COOLDOWN_HEIGHT),
        color: BACK_COLOR,
    });
    let fill_w = BAR_WIDTH * frac;
    let fill_x = if right_anchored {
        x + BAR_WIDTH - fill_w
    } else {
        x
    };
    if fill_w > 0.0 {
        quads.push(HudQuad {
            rect: Rect::new(fill_x, y, fill_w, COOLDOWN_HEIGHT),
            color: COOLDOWN_FILL,
        });
    }
}
