//! Procedural elevation.
//!
//! Terrain is a pure function of the column coordinate. Only individual voxels
//! are ever edited afterwards, so regenerating any column must reproduce
//! exactly what was there at startup.

use serde::{Deserialize, Serialize};

/// Column elevation source. Must be deterministic and side-effect free.
///
/// Callers clamp the result to at least 1 before filling a column.
pub trait HeightField: Sync {
    fn height(&self, x: i64, z: i64) -> i64;
}

impl<F> HeightField for F
where
    F: Fn(i64, i64) -> i64 + Sync,
{
    fn height(&self, x: i64, z: i64) -> i64 {
        self(x, z)
    }
}

/// Gentle hills from a sum of low-frequency sines. Adjacent columns never
/// differ by more than one block with the default parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollingHills {
    pub base: f64,
    pub amplitude: f64,
    pub freq_x: f64,
    pub freq_z: f64,
    pub freq_diagonal: f64,
}

impl Default for RollingHills {
    fn default() -> Self {
        Self {
            base: 10.0,
            amplitude: 4.0,
            freq_x: 0.15,
            freq_z: 0.17,
            freq_diagonal: 0.07,
        }
    }
}

impl HeightField for RollingHills {
    fn height(&self, x: i64, z: i64) -> i64 {
        let (fx, fz) = (x as f64, z as f64);
        let s = (fx * self.freq_x).sin() * 0.5 + (fz * self.freq_z).cos() * 0.5;
        let s2 = ((fx + fz) * self.freq_diagonal).sin() * 0.5;
        (self.base + self.amplitude * (s + s2)).floor() as i64
    }
}

/// Rectangular column range, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub min_x: i64,
    pub max_x: i64,
    pub min_z: i64,
    pub max_z: i64,
}

impl Region {
    pub const fn new(min_x: i64, max_x: i64, min_z: i64, max_z: i64) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Square region of the given radius centred on column (0, 0).
    pub const fn around_origin(radius: i64) -> Self {
        Self::new(-radius, radius, -radius, radius)
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_z > self.max_z
    }

    pub fn column_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        ((self.max_x - self.min_x + 1) * (self.max_z - self.min_z + 1)) as usize
    }

    /// Every `(x, z)` column, x-major.
    pub fn columns(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        (self.min_x..=self.max_x).flat_map(move |x| (self.min_z..=self.max_z).map(move |z| (x, z)))
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::around_origin(24)
    }
}

/// Number of solid voxels a column holds after generation.
pub fn column_top(field: &impl HeightField, x: i64, z: i64) -> i64 {
    field.height(x, z).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_is_deterministic() {
        let hills = RollingHills::default();
        for (x, z) in Region::around_origin(10).columns() {
            assert_eq!(hills.height(x, z), hills.height(x, z));
        }
        assert_eq!(hills.height(1_000_000, -42), RollingHills::default().height(1_000_000, -42));
    }

    #[test]
    fn adjacent_columns_differ_by_at_most_one() {
        let hills = RollingHills::default();
        for (x, z) in Region::around_origin(40).columns() {
            let h = hills.height(x, z);
            assert!((h - hills.height(x + 1, z)).abs() <= 1, "cliff at x={x} z={z}");
            assert!((h - hills.height(x, z + 1)).abs() <= 1, "cliff at x={x} z={z}");
        }
    }

    #[test]
    fn default_hills_stay_in_band() {
        let hills = RollingHills::default();
        for (x, z) in Region::around_origin(64).columns() {
            let h = hills.height(x, z);
            assert!((4..=16).contains(&h), "height {h} out of band");
        }
    }

    #[test]
    fn closures_are_height_fields() {
        let flat = |_x: i64, _z: i64| 0;
        assert_eq!(column_top(&flat, 3, 4), 1);
        let step = |x: i64, _z: i64| if x > 0 { 5 } else { -2 };
        assert_eq!(column_top(&step, 1, 0), 5);
        assert_eq!(column_top(&step, -1, 0), 1);
    }

    #[test]
    fn region_columns_are_inclusive() {
        let region = Region::new(-1, 1, 2, 3);
        let cols: Vec<_> = region.columns().collect();
        assert_eq!(cols.len(), region.column_count());
        assert_eq!(cols.len(), 6);
        assert!(cols.contains(&(-1, 2)));
        assert!(cols.contains(&(1, 3)));
        assert!(Region::new(1, 0, 0, 0).is_empty());
        assert_eq!(Region::new(1, 0, 0, 0).column_count(), 0);
    }
}
