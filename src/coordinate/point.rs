//! Point structure for representing coordinates

/// A point in a coordinate system
///
/// Axis order is fixed: `x` is longitude or easting, `y` is latitude or
/// northing, whatever the reference system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate (longitude in geographic systems)
    pub x: f64,
    /// Y coordinate (latitude in geographic systems)
    pub y: f64,
}

impl Point {
    /// Create a new 2D point
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Arithmetic mean of a set of points, `None` when empty
    pub fn centroid<'a, I>(points: I) -> Option<Point>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let (mut sum_x, mut sum_y, mut count) = (0.0, 0.0, 0usize);
        for p in points {
            sum_x += p.x;
            sum_y += p.y;
            count += 1;
        }

        if count == 0 {
            None
        } else {
            Some(Point::new(sum_x / count as f64, sum_y / count as f64))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid() {
        let points = vec![Point::new(0.0, 0.0), Point::new(2.0, 4.0)];
        assert_eq!(Point::centroid(&points), Some(Point::new(1.0, 2.0)));
        assert_eq!(Point::centroid(&Vec::new()), None);
    }
}
