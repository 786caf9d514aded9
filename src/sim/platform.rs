//! Static and oscillating platforms

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Solid, SolidId};
use super::rect::Rect;

/// Axis a moving platform oscillates along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Axis::X => Vec2::X,
            Axis::Y => Vec2::Y,
        }
    }

    #[inline]
    fn component(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

/// A static solid rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
        }
    }
}

/// A platform that oscillates around its spawn point along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingPlatform {
    pub rect: Rect,
    pub start: Vec2,
    pub axis: Axis,
    /// Half-range of the oscillation
    pub range: f32,
    /// Distance per tick (always positive)
    pub speed: f32,
    /// +1 or -1
    pub direction: f32,
    /// Displacement applied by the last update, carried onto riders
    pub delta: Vec2,
}

impl MovingPlatform {
    pub fn new(rect: Rect, axis: Axis, range: f32, speed: f32, direction: f32) -> Self {
        Self {
            rect,
            start: rect.pos(),
            axis,
            range,
            speed: speed.abs(),
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            delta: Vec2::ZERO,
        }
    }

    /// Signed displacement from the spawn point along the axis
    pub fn displacement(&self) -> f32 {
        self.axis.component(self.rect.pos() - self.start)
    }

    /// Advance one tick. The direction flips once the displacement has
    /// passed the range, so one tick of overshoot is possible.
    pub fn update(&mut self) {
        let step = self.axis.unit() * self.speed * self.direction;
        self.rect = self.rect.translated(step);
        self.delta = step;

        if self.displacement().abs() > self.range {
            self.direction = -self.direction;
        }
    }
}

/// Gather every solid surface in stable order: statics first, then movers
pub fn collect_solids(platforms: &[Platform], moving: &[MovingPlatform]) -> Vec<Solid> {
    platforms
        .iter()
        .enumerate()
        .map(|(i, p)| Solid {
            id: SolidId::Static(i),
            rect: p.rect,
        })
        .chain(moving.iter().enumerate().map(|(i, m)| Solid {
            id: SolidId::Moving(i),
            rect: m.rect,
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_platform_oscillates() {
        let mut mp = MovingPlatform::new(Rect::new(400.0, 500.0, 100.0, 25.0), Axis::X, 10.0, 2.0, 1.0);
        let mut max_disp: f32 = 0.0;
        let mut min_disp: f32 = 0.0;
        for _ in 0..100 {
            mp.update();
            max_disp = max_disp.max(mp.displacement());
            min_disp = min_disp.min(mp.displacement());
        }
        // Overshoot is bounded by one tick of movement
        assert!(max_disp > 10.0 && max_disp <= 12.0);
        assert!(min_disp < -10.0 && min_disp >= -12.0);
    }

    #[test]
    fn test_negative_direction() {
        let mut mp = MovingPlatform::new(Rect::new(0.0, 500.0, 100.0, 25.0), Axis::Y, 100.0, 3.0, -1.0);
        mp.update();
        assert_eq!(mp.rect.y, 497.0);
        assert_eq!(mp.delta, Vec2::new(0.0, -3.0));
        assert_eq!(mp.rect.x, 0.0);
    }

    #[test]
    fn test_flip_happens_past_boundary() {
        let mut mp = MovingPlatform::new(Rect::new(0.0, 0.0, 10.0, 10.0), Axis::X, 4.0, 2.0, 1.0);
        mp.update(); // 2
        mp.update(); // 4, at the boundary: no flip yet
        assert_eq!(mp.direction, 1.0);
        mp.update(); // 6, past it
        assert_eq!(mp.direction, -1.0);
    }

    #[test]
    fn test_collect_solids_order() {
        let statics = [Platform::new(0.0, 0.0, 10.0, 10.0)];
        let movers = [MovingPlatform::new(Rect::new(50.0, 0.0, 10.0, 10.0), Axis::X, 5.0, 1.0, 1.0)];
        let solids = collect_solids(&statics, &movers);
        assert_eq!(solids[0].id, SolidId::Static(0));
        assert_eq!(solids[1].id, SolidId::Moving(0));
    }
}
