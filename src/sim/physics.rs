//! Physics integration shared by every moving body

use glam::Vec2;

use super::rect::Rect;

/// Position + velocity of a simulated body. The rect is the hitbox.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub rect: Rect,
    pub vel: Vec2,
}

impl Body {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            vel: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.rect.pos()
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Move the top-left corner to `pos`, keeping the velocity
    pub fn teleport(&mut self, pos: Vec2) {
        self.rect.x = pos.x;
        self.rect.y = pos.y;
    }
}

/// Anything with a hitbox that can take part in overlap tests
pub trait Collidable {
    fn hitbox(&self) -> Rect;

    fn overlaps<C: Collidable>(&self, other: &C) -> bool
    where
        Self: Sized,
    {
        self.hitbox().intersects(&other.hitbox())
    }
}

impl Collidable for Body {
    fn hitbox(&self) -> Rect {
        self.rect
    }
}

impl Collidable for Rect {
    fn hitbox(&self) -> Rect {
        *self
    }
}

/// Accelerate downward, clamped to terminal velocity
#[inline]
pub fn apply_gravity(vel: &mut Vec2, gravity: f32, terminal_velocity: f32) {
    vel.y = (vel.y + gravity).min(terminal_velocity);
}

/// Move a body by its velocity with no collision response
#[inline]
pub fn integrate(body: &mut Body) {
    body.rect = body.rect.translated(body.vel);
}
