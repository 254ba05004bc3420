/// Axis-aligned bounding box in pixel coordinates.
///
/// Corners follow the `(x1, y1)` top-left, `(x2, y2)` bottom-right
/// convention. Boxes with `x2 <= x1` or `y2 <= y1` are degenerate and have
/// zero area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
}

impl BoundingBox {
    /// Create a new bounding box from its two corners.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Area of the box, zero for degenerate boxes.
    pub fn area(&self) -> f32 {
        (self.x2 - self.x1).max(0.0) * (self.y2 - self.y1).max(0.0)
    }

    /// Area of the intersection with another box.
    pub fn intersection(&self, other: &Self) -> f32 {
        let x1 = self.x1.max(other.x1);
        let y1 = self.y1.max(other.y1);
        let x2 = self.x2.min(other.x2);
        let y2 = self.y2.min(other.y2);
        (x2 - x1).max(0.0) * (y2 - y1).max(0.0)
    }

    /// Intersection-over-union with another box.
    ///
    /// Returns a value in `[0, 1]`. Pairs with an empty union (two degenerate
    /// boxes) yield `0.0` rather than a NaN.
    pub fn iou(&self, other: &Self) -> f32 {
        let intersection = self.intersection(other);
        let union = self.area() + other.area() - intersection;
        if union > 0.0 {
            intersection / union
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BoundingBox;

    #[test]
    fn identical_boxes_have_unit_iou() {
        let b = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!((b.iou(&b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn disjoint_boxes_have_zero_iou() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(20.0, 20.0, 30.0, 30.0);
        assert_eq!(a.iou(&b), 0.0);
        assert_eq!(a.intersection(&b), 0.0);
    }

    #[test]
    fn quarter_overlap() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        // intersection 25, union 175
        assert!((a.iou(&b) - 25.0 / 175.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_boxes_are_harmless() {
        let a = BoundingBox::new(5.0, 5.0, 5.0, 5.0);
        let b = BoundingBox::new(10.0, 0.0, 4.0, 8.0);
        assert_eq!(a.area(), 0.0);
        assert_eq!(b.area(), 0.0);
        assert_eq!(a.iou(&b), 0.0);
    }
}
