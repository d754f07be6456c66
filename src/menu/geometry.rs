use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned rectangle. Containment is half-open: the left and top edges are
/// inside, the right and bottom edges are not.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// Angle in degrees of the ray from `from` to `to`, normalized to `[0, 360)`.
///
/// The +X axis is 0° and angles grow toward +Y. In screen coordinates +Y points
/// down, so 90° is straight below the origin.
pub fn angle_from_points(from: Point, to: Point) -> f64 {
    let degrees = (to.y - from.y).atan2(to.x - from.x).to_degrees();
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round a tiny negative angle up to exactly 360.0
    if normalized >= 360.0 { 0.0 } else { normalized }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_angle(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_angle_cardinals() {
        let o = Point::new(10.0, 10.0);
        assert_angle(angle_from_points(o, Point::new(20.0, 10.0)), 0.0);
        assert_angle(angle_from_points(o, Point::new(10.0, 20.0)), 90.0);
        assert_angle(angle_from_points(o, Point::new(0.0, 10.0)), 180.0);
        assert_angle(angle_from_points(o, Point::new(10.0, 0.0)), 270.0);
    }

    #[test]
    fn test_angle_range_and_monotonic_sweep() {
        let o = Point::default();
        let mut last = -1.0;
        for step in 0..3600 {
            let rad = (step as f64 / 10.0).to_radians();
            let angle = angle_from_points(o, Point::new(rad.cos() * 50.0, rad.sin() * 50.0));
            assert!((0.0..360.0).contains(&angle), "angle {angle} out of range");
            assert!(angle > last, "sweep not monotonic at step {step}");
            last = angle;
        }
    }

    #[test]
    fn test_angle_just_below_axis() {
        let angle = angle_from_points(Point::default(), Point::new(100.0, -1e-12));
        assert!((0.0..360.0).contains(&angle));
    }

    #[test]
    fn test_rect_contains_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.99, 4.99)));
        assert!(!r.contains(Point::new(10.0, 2.0)));
        assert!(!r.contains(Point::new(2.0, 5.0)));
        assert!(!r.contains(Point::new(-0.1, 2.0)));
    }

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
