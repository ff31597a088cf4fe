//! Battlefield geometry: integer cell positions and axis-aligned bounds.

use core::fmt;

use crate::core::common::EngineError;

/// A single battlefield cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Widened to `i128` so that any pair of `i32` triples fits.
    pub fn distance_squared(&self, other: &Position) -> i128 {
        let dx = i128::from(self.x) - i128::from(other.x);
        let dy = i128::from(self.y) - i128::from(other.y);
        let dz = i128::from(self.z) - i128::from(other.z);
        dx * dx + dy * dy + dz * dz
    }

    /// Whether `other` lies within `range` cells, Euclidean.
    pub fn within(&self, other: &Position, range: u32) -> bool {
        let r = i128::from(range);
        self.distance_squared(other) <= r * r
    }
}

impl From<(i32, i32, i32)> for Position {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Inclusive 3-D box `[min, max]` on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
    min_z: i32,
    max_z: i32,
}

impl Bounds {
    /// Build bounds, rejecting any axis where `min > max`.
    pub fn new(
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
        min_z: i32,
        max_z: i32,
    ) -> Result<Self, EngineError> {
        let bounds = Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Re-check the axis ordering, e.g. after deserialization.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.min_x > self.max_x || self.min_y > self.max_y || self.min_z > self.max_z {
            return Err(EngineError::InvalidBounds(*self));
        }
        Ok(())
    }

    pub fn contains(&self, p: &Position) -> bool {
        (self.min_x..=self.max_x).contains(&p.x)
            && (self.min_y..=self.max_y).contains(&p.y)
            && (self.min_z..=self.max_z).contains(&p.z)
    }

    pub fn min(&self) -> Position {
        Position::new(self.min_x, self.min_y, self.min_z)
    }

    pub fn max(&self) -> Position {
        Position::new(self.max_x, self.max_y, self.max_z)
    }

    /// Number of cells in the box, saturating at `u64::MAX`.
    pub fn volume(&self) -> u64 {
        let span = |lo: i32, hi: i32| (i64::from(hi) - i64::from(lo) + 1).max(0) as u64;
        span(self.min_x, self.max_x)
            .saturating_mul(span(self.min_y, self.max_y))
            .saturating_mul(span(self.min_z, self.max_z))
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x {}..={}, y {}..={}, z {}..={}",
            self.min_x, self.max_x, self.min_y, self.max_y, self.min_z, self.max_z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_bounds_contain_their_plane_only() {
        let b = Bounds::new(0, 5, 0, 5, 0, 0).unwrap();
        assert!(b.contains(&Position::new(5, 0, 0)));
        assert!(!b.contains(&Position::new(1, 1, 1)));
        assert!(!b.contains(&Position::new(-1, 1, 0)));
        assert_eq!(b.volume(), 36);
    }

    #[test]
    fn inverted_axis_is_rejected() {
        assert!(matches!(
            Bounds::new(0, 5, 3, 2, 0, 0),
            Err(EngineError::InvalidBounds(_))
        ));
    }

    #[test]
    fn range_is_euclidean() {
        let origin = Position::new(0, 0, 0);
        assert!(origin.within(&Position::new(3, 4, 0), 5));
        assert!(!origin.within(&Position::new(4, 4, 0), 5));
        assert!(origin.within(&origin, 0));
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let a = Position::new(i32::MIN, i32::MIN, i32::MIN);
        let b = Position::new(i32::MAX, i32::MAX, i32::MAX);
        assert!(a.distance_squared(&b) > 0);
        assert!(!a.within(&b, u32::MAX));
    }
}
