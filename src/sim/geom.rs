//! Axis-aligned bounding boxes for all simulated bodies
//!
//! Every entity is a rectangle centered on its position; width and height are
//! fixed per entity kind. Overlap is the only geometric query the simulation
//! needs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A rectangle centered on `center`, extending `half` in each direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Center of the box (the owning entity's position)
    pub center: Vec2,
    /// Half extents (width / 2, height / 2)
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            half: Vec2::new(width / 2.0, height / 2.0),
        }
    }

    /// Lower-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    /// Upper-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Move the box so it is centered on a new position
    #[inline]
    pub fn recenter(&mut self, center: Vec2) {
        self.center = center;
    }
}

/// Check whether two boxes overlap
///
/// Edge contact does not count: boxes that merely touch are not overlapping.
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    (a.center.x - b.center.x).abs() < a.half.x + b.half.x
        && (a.center.y - b.center.y).abs() < a.half.y + b.half.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), 2.0, 2.0);
        let b = Aabb::new(Vec2::new(1.0, 1.0), 2.0, 2.0);
        assert!(overlaps(&a, &b));

        let far = Aabb::new(Vec2::new(5.0, 0.0), 2.0, 2.0);
        assert!(!overlaps(&a, &far));
    }

    #[test]
    fn test_edge_contact_is_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), 2.0, 2.0);
        // Touching exactly at x = 1.0
        let b = Aabb::new(Vec2::new(2.0, 0.0), 2.0, 2.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_containment_is_overlap() {
        let outer = Aabb::new(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let inner = Aabb::new(Vec2::new(1.0, -1.0), 0.5, 0.5);
        assert!(overlaps(&outer, &inner));
    }

    #[test]
    fn test_corners() {
        let a = Aabb::new(Vec2::new(3.0, 4.0), 2.0, 1.0);
        assert_eq!(a.min(), Vec2::new(2.0, 3.5));
        assert_eq!(a.max(), Vec2::new(4.0, 4.5));
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(
            ax in -50.0f32..50.0, ay in -50.0f32..50.0,
            bx in -50.0f32..50.0, by in -50.0f32..50.0,
            aw in 0.1f32..10.0, ah in 0.1f32..10.0,
            bw in 0.1f32..10.0, bh in 0.1f32..10.0,
        ) {
            let a = Aabb::new(Vec2::new(ax, ay), aw, ah);
            let b = Aabb::new(Vec2::new(bx, by), bw, bh);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_box_overlaps_itself(
            x in -50.0f32..50.0, y in -50.0f32..50.0,
            w in 0.1f32..10.0, h in 0.1f32..10.0,
        ) {
            let a = Aabb::new(Vec2::new(x, y), w, h);
            prop_assert!(overlaps(&a, &a));
        }
    }
}
