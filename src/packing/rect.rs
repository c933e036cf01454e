/// An axis-aligned rectangle in atlas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub fn right(&self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    /// Check if this rectangle intersects with another
    pub fn intersects(&self, other: &Rect) -> bool {
        u64::from(self.x) < other.right()
            && self.right() > u64::from(other.x)
            && u64::from(self.y) < other.bottom()
            && self.bottom() > u64::from(other.y)
    }

    /// Check if this rectangle lies entirely inside a `width` x `height` area at the origin
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= u64::from(width) && self.bottom() <= u64::from(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        let c = Rect::new(20, 20, 10, 10);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let left = Rect::new(0, 0, 4, 4);
        let right = Rect::new(4, 0, 4, 4);
        let below = Rect::new(0, 4, 4, 4);

        assert!(!left.intersects(&right));
        assert!(!left.intersects(&below));
    }

    #[test]
    fn test_fits_within() {
        assert!(Rect::new(0, 0, 4, 4).fits_within(4, 4));
        assert!(Rect::new(4, 4, 4, 4).fits_within(8, 8));
        assert!(!Rect::new(5, 0, 4, 4).fits_within(8, 8));
        assert!(!Rect::new(u32::MAX, 0, 1, 1).fits_within(u32::MAX, 1));
    }
}
