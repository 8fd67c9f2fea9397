//! Axis-aligned rectangles in screen space (`y` grows downward).

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Aabb { x, y, w, h }
    }

    pub fn left(&self)   -> f32 { self.x }
    pub fn right(&self)  -> f32 { self.x + self.w }
    pub fn top(&self)    -> f32 { self.y }
    pub fn bottom(&self) -> f32 { self.y + self.h }
    pub fn center_x(&self) -> f32 { self.x + self.w / 2.0 }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    /// Empty rectangles never intersect anything.
    pub fn intersects(&self, other: &Aabb) -> bool {
        if self.w <= 0.0 || self.h <= 0.0 || other.w <= 0.0 || other.h <= 0.0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes_intersect_both_ways() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Aabb::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Aabb::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn containment_intersects() {
        let outer = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.intersects(&inner));
    }

    #[test]
    fn zero_height_box_never_intersects() {
        let flat = Aabb::new(0.0, 50.0, 100.0, 0.0);
        assert!(!flat.intersects(&Aabb::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn edges() {
        let a = Aabb::new(2.0, 3.0, 10.0, 20.0);
        assert_eq!((a.left(), a.right(), a.top(), a.bottom()), (2.0, 12.0, 3.0, 23.0));
        assert_eq!(a.center_x(), 7.0);
    }
}
