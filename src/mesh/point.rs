use std::collections::HashMap;

/// A location in the (planar) domain. `z` is always zero for simulator output.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn planar(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    fn key(&self) -> PointKey {
        PointKey([bits(self.x), bits(self.y), bits(self.z)])
    }
}

/// Hashable stand in for a [`Point`] that compares equal exactly when the coordinates do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PointKey([u64; 3]);

fn bits(value: f64) -> u64 {
    // -0.0 == 0.0 but their bit patterns differ
    if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

/// Unique points in the order they were first seen
#[derive(Debug, Clone, Default)]
pub(crate) struct PointSet {
    points: Vec<Point>,
    index: HashMap<PointKey, usize>,
}

impl PointSet {
    /// index of `point`, inserting it at the end if it has not been seen before
    pub(crate) fn insert(&mut self, point: Point) -> usize {
        let points = &mut self.points;
        *self.index.entry(point.key()).or_insert_with(|| {
            points.push(point);
            points.len() - 1
        })
    }

    pub(crate) fn get(&self, point: &Point) -> Option<usize> {
        self.index.get(&point.key()).copied()
    }

    pub(crate) fn as_slice(&self) -> &[Point] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_seen_order() {
        let mut set = PointSet::default();
        assert_eq!(set.insert(Point::planar(1.0, 0.0)), 0);
        assert_eq!(set.insert(Point::planar(0.0, 0.0)), 1);
        assert_eq!(set.insert(Point::planar(1.0, 0.0)), 0);
        assert_eq!(set.as_slice().len(), 2);
        assert_eq!(set.get(&Point::planar(0.0, 0.0)), Some(1));
        assert_eq!(set.get(&Point::planar(0.0, 1.0)), None);
    }

    #[test]
    fn negative_zero_is_zero() {
        let mut set = PointSet::default();
        let a = set.insert(Point::planar(0.0, 1.0));
        let b = set.insert(Point::planar(-0.0, 1.0));
        assert_eq!(a, b);
        assert_eq!(set.as_slice(), &[Point::planar(0.0, 1.0)]);
    }
}
