//! Axis-separated collision resolution against solid platforms
//!
//! Displacement is resolved on X first, then on Y, each time pushing the body
//! out by the penetration depth (no restitution). The X-then-Y order matters
//! for corner approaches and must stay stable.

use glam::Vec2;

use super::physics::Body;
use super::rect::Rect;

/// Which platform a solid came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolidId {
    Static(usize),
    Moving(usize),
}

/// A solid rectangle the resolver pushes bodies out of
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solid {
    pub id: SolidId,
    pub rect: Rect,
}

/// Result of moving a body through the solids
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionResult {
    /// Blocked horizontally by a solid
    pub hit_wall: bool,
    /// Hit a solid while moving up
    pub hit_ceiling: bool,
    /// Solid the body landed on while moving down
    pub landed_on: Option<SolidId>,
}

impl CollisionResult {
    pub fn landed(&self) -> bool {
        self.landed_on.is_some()
    }
}

/// Push `rect` out of every solid it entered along X.
///
/// `dx` is the horizontal displacement applied this tick; its sign decides
/// which edge the body is placed against. Solids that already overlapped the
/// body before the move (a lift rising into its feet) are left to the Y pass.
pub fn resolve_x(rect: &mut Rect, dx: f32, solids: &[Solid]) -> bool {
    if dx == 0.0 {
        return false;
    }
    let before = rect.translated(Vec2::new(-dx, 0.0));
    let mut hit = false;
    for solid in solids {
        if !rect.intersects(&solid.rect) || before.intersects(&solid.rect) {
            continue;
        }
        hit = true;
        if dx > 0.0 {
            rect.set_right(solid.rect.left());
        } else {
            rect.set_left(solid.rect.right());
        }
    }
    hit
}

/// Push `rect` out of every overlapping solid along Y.
///
/// Zeroes `vel_y` on a downward or upward hit. Only a downward hit
/// (`vel_y > 0`) counts as landing.
pub fn resolve_y(rect: &mut Rect, vel_y: &mut f32, solids: &[Solid]) -> CollisionResult {
    let mut result = CollisionResult::default();
    for solid in solids {
        if !rect.intersects(&solid.rect) {
            continue;
        }
        if *vel_y > 0.0 {
            rect.set_bottom(solid.rect.top());
            *vel_y = 0.0;
            result.landed_on = Some(solid.id);
        } else if *vel_y < 0.0 {
            rect.set_top(solid.rect.bottom());
            *vel_y = 0.0;
            result.hit_ceiling = true;
        } else if rect.center().y < solid.rect.center().y {
            // Resting contact pushed by a solid moving into us
            rect.set_bottom(solid.rect.top());
        } else {
            rect.set_top(solid.rect.bottom());
        }
    }
    result
}

/// Move a body by its velocity, resolving X then Y
pub fn move_and_collide(body: &mut Body, solids: &[Solid]) -> CollisionResult {
    body.rect.x += body.vel.x;
    let hit_wall = resolve_x(&mut body.rect, body.vel.x, solids);

    body.rect.y += body.vel.y;
    let mut result = resolve_y(&mut body.rect, &mut body.vel.y, solids);
    result.hit_wall = hit_wall;
    result
}

/// Translate a body by a platform's displacement, then push it out of any
/// other solid that displacement drove it into. Axes with no displacement
/// are left alone: a rising platform already overlaps its rider on Y.
///
/// Runs before the rider's own `move_and_collide` in the same tick, so the
/// rider's collision pass sees its carried position.
pub fn carry(body: &mut Body, delta: Vec2, solids: &[Solid]) {
    if delta.x != 0.0 {
        body.rect.x += delta.x;
        resolve_x(&mut body.rect, delta.x, solids);
    }
    if delta.y != 0.0 {
        body.rect.y += delta.y;
        let mut vy = 0.0;
        resolve_y(&mut body.rect, &mut vy, solids);
    }
}

/// First solid (in order) overlapping `rect`
pub fn first_overlap(rect: &Rect, solids: &[Solid]) -> Option<SolidId> {
    solids.iter().find(|s| rect.intersects(&s.rect)).map(|s| s.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn floor() -> Solid {
        Solid {
            id: SolidId::Static(0),
            rect: Rect::new(0.0, 550.0, 400.0, 40.0),
        }
    }

    #[test]
    fn test_landing_sets_bottom_and_zeroes_vy() {
        let mut body = Body::new(Rect::new(100.0, 495.0, 30.0, 50.0));
        body.vel = Vec2::new(0.0, 8.0);
        let result = move_and_collide(&mut body, &[floor()]);
        assert_eq!(result.landed_on, Some(SolidId::Static(0)));
        assert_eq!(body.rect.bottom(), 550.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_head_bump_is_not_landing() {
        let ceiling = Solid {
            id: SolidId::Static(1),
            rect: Rect::new(0.0, 400.0, 400.0, 30.0),
        };
        let mut body = Body::new(Rect::new(100.0, 435.0, 30.0, 50.0));
        body.vel = Vec2::new(0.0, -10.0);
        let result = move_and_collide(&mut body, &[ceiling]);
        assert!(!result.landed());
        assert!(result.hit_ceiling);
        assert_eq!(body.rect.top(), 430.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_wall_blocks_horizontal_motion() {
        let wall = Solid {
            id: SolidId::Static(2),
            rect: Rect::new(200.0, 300.0, 40.0, 250.0),
        };
        let mut body = Body::new(Rect::new(165.0, 400.0, 30.0, 50.0));
        body.vel = Vec2::new(10.0, 0.0);
        let result = move_and_collide(&mut body, &[wall]);
        assert!(result.hit_wall);
        assert_eq!(body.rect.right(), 200.0);
        // Horizontal velocity is owned by the controller, not zeroed here
        assert_eq!(body.vel.x, 10.0);

        body.rect.x = 245.0;
        body.vel = Vec2::new(-10.0, 0.0);
        move_and_collide(&mut body, &[wall]);
        assert_eq!(body.rect.left(), 240.0);
    }

    #[test]
    fn test_x_resolved_before_y_at_corner() {
        // Falling diagonally into the top-left corner of a block: the X pass
        // sees no overlap at the old height, so the body lands on top.
        let block = Solid {
            id: SolidId::Static(3),
            rect: Rect::new(100.0, 100.0, 100.0, 100.0),
        };
        let mut body = Body::new(Rect::new(70.0, 45.0, 30.0, 50.0));
        body.vel = Vec2::new(5.0, 10.0);
        let result = move_and_collide(&mut body, &[block]);
        assert!(result.landed());
        assert_eq!(body.rect.bottom(), 100.0);
        assert_eq!(body.rect.x, 75.0);
    }

    #[test]
    fn test_carry_moves_rider() {
        let mut body = Body::new(Rect::new(10.0, 10.0, 30.0, 50.0));
        carry(&mut body, Vec2::new(2.0, 0.0), &[]);
        assert_eq!(body.rect.x, 12.0);
    }

    #[test]
    fn test_carry_into_wall_is_blocked() {
        let wall = Solid {
            id: SolidId::Static(0),
            rect: Rect::new(41.0, 0.0, 10.0, 100.0),
        };
        let mut body = Body::new(Rect::new(10.0, 10.0, 30.0, 50.0));
        carry(&mut body, Vec2::new(2.0, 0.0), &[wall]);
        assert_eq!(body.rect.right(), 41.0);
    }

    #[test]
    fn test_rising_platform_is_landed_on_not_a_wall() {
        // Platform rose 3 px into the body's feet since the last tick
        let lift = Solid {
            id: SolidId::Moving(0),
            rect: Rect::new(20.0, 547.0, 200.0, 25.0),
        };
        let mut body = Body::new(Rect::new(100.0, 500.0, 30.0, 50.0));
        body.vel = Vec2::new(0.0, 0.5);
        let result = move_and_collide(&mut body, &[lift]);
        assert!(!result.hit_wall);
        assert_eq!(result.landed_on, Some(SolidId::Moving(0)));
        assert_eq!(body.rect.x, 100.0);
        assert_eq!(body.rect.bottom(), 547.0);
    }

    proptest! {
        #[test]
        fn prop_displaced_solid_keeps_body_on_top(
            rise in 1i32..=10, vx in -10i32..=10,
        ) {
            let lift = Solid {
                id: SolidId::Moving(0),
                rect: Rect::new(0.0, 550.0 - rise as f32 * 0.5, 400.0, 25.0),
            };
            let mut body = Body::new(Rect::new(180.0, 500.0, 30.0, 50.0));
            body.vel = Vec2::new(vx as f32 * 0.5, 0.5);
            let result = move_and_collide(&mut body, &[lift]);
            prop_assert!(!result.hit_wall);
            prop_assert!(result.landed());
            prop_assert_eq!(body.rect.x, 180.0 + vx as f32 * 0.5);
            prop_assert_eq!(body.rect.bottom(), lift.rect.top());
        }

        #[test]
        fn prop_no_overlap_after_resolution(
            x in -200i32..600, y in -200i32..800,
            vx in -20i32..20, vy in -30i32..30,
        ) {
            let solid = Solid { id: SolidId::Static(0), rect: Rect::new(100.0, 300.0, 200.0, 40.0) };
            let mut body = Body::new(Rect::new(x as f32, y as f32, 30.0, 50.0));
            body.vel = Vec2::new(vx as f32 * 0.5, vy as f32 * 0.5);
            move_and_collide(&mut body, &[solid]);
            prop_assert!(body.rect.overlap(&solid.rect) == Vec2::ZERO);
        }
    }
}
