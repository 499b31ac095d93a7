// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Density shading.  Once the points are on the canvas, count how many
//! land in each cell; a cell's lightness then comes from the log of its
//! count relative to the log of the busiest cell's count, so that the
//! dense core of the attractor comes out darker than its wispy edges.

use crate::planes::{canvas_coords_to_index, map_from_interval};

/// Lightness of the sparsest cells.
pub const SPARSE_LIGHTNESS: f64 = 0.9;
/// Lightness of the densest cell.
pub const DENSE_LIGHTNESS: f64 = 0.5;

/// Maps a cell count to a lightness.  `ln(count) / ln(max)` runs from 0
/// for a lone point to 1 for the busiest cell, and that is mapped onto
/// `[SPARSE_LIGHTNESS, DENSE_LIGHTNESS]`.  When no cell holds more than
/// one point the ratio would be 0/0, so every cell is treated as sparse.
pub fn brightness(count: u32, max: u32) -> f64 {
    if max <= 1 || count == 0 {
        return SPARSE_LIGHTNESS;
    }
    let ratio = f64::from(count).ln() / f64::from(max).ln();
    map_from_interval(0.0, 1.0, SPARSE_LIGHTNESS, DENSE_LIGHTNESS, ratio)
}

/// A count of points per canvas cell, row-major.
#[derive(Clone, Debug)]
pub struct Histogram {
    width: usize,
    height: usize,
    counts: Vec<u32>,
    max: u32,
}

impl Histogram {
    /// An empty histogram over a `width` x `height` canvas.
    pub fn new(width: usize, height: usize) -> Histogram {
        Histogram {
            width,
            height,
            counts: vec![0; width * height],
            max: 0,
        }
    }

    /// Counts every cell in `cells`.
    pub fn from_cells<I>(width: usize, height: usize, cells: I) -> Histogram
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut histogram = Histogram::new(width, height);
        for (x, y) in cells {
            histogram.insert(x, y);
        }
        histogram
    }

    /// Counts one point at canvas cell `(x, y)`.  Cells off the canvas
    /// are ignored; returns whether the point was counted.
    pub fn insert(&mut self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        let index = canvas_coords_to_index(x as usize, y as usize, self.width);
        let count = &mut self.counts[index];
        *count = count.saturating_add(1);
        if *count > self.max {
            self.max = *count;
        }
        true
    }

    /// The count at a buffer offset.
    pub fn get(&self, index: usize) -> u32 {
        self.counts[index]
    }

    /// The count at cell `(x, y)`.
    pub fn count(&self, x: usize, y: usize) -> u32 {
        self.counts[canvas_coords_to_index(x, y, self.width)]
    }

    /// The highest count of any cell.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// The lightness for the cell at a buffer offset.
    pub fn brightness(&self, index: usize) -> f64 {
        brightness(self.counts[index], self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planes::index_to_canvas_coords;

    fn cells(indices: &[usize], width: usize) -> Vec<(i64, i64)> {
        indices
            .iter()
            .map(|&i| {
                let (x, y) = index_to_canvas_coords(i, width);
                (x as i64, y as i64)
            })
            .collect()
    }

    #[test]
    fn counts_duplicates() {
        let h = Histogram::from_cells(10, 10, cells(&[13, 6, 6, 6, 5, 23], 10));
        assert_eq!(h.get(6), 3);
        assert_eq!(h.get(13), 1);
        assert_eq!(h.get(5), 1);
        assert_eq!(h.get(23), 1);
        assert_eq!(h.get(7), 0);
        assert_eq!(h.count(6, 0), 3);
        assert_eq!(h.max(), 3);
    }

    #[test]
    fn off_canvas_points_are_not_counted() {
        let mut h = Histogram::new(4, 3);
        assert!(!h.insert(-1, 0));
        assert!(!h.insert(4, 0));
        assert!(!h.insert(0, 3));
        assert!(h.insert(3, 2));
        assert_eq!(h.max(), 1);
        assert_eq!(h.count(3, 2), 1);
    }

    #[test]
    fn densest_cell_is_darkest() {
        let h = Histogram::from_cells(10, 10, cells(&[13, 6, 6, 6, 5, 23], 10));
        assert!((h.brightness(6) - DENSE_LIGHTNESS).abs() < 1e-12);
        assert!((h.brightness(13) - SPARSE_LIGHTNESS).abs() < 1e-12);
    }

    #[test]
    fn brightness_is_logarithmic() {
        // ln(10) / ln(100) is exactly halfway.
        assert!((brightness(10, 100) - 0.7).abs() < 1e-12);
        assert!(brightness(50, 100) < brightness(10, 100));
    }

    #[test]
    fn no_density_variation_is_sparse() {
        assert_eq!(brightness(1, 1), SPARSE_LIGHTNESS);
        assert_eq!(brightness(0, 0), SPARSE_LIGHTNESS);
        let h = Histogram::from_cells(3, 3, vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(h.max(), 1);
        assert_eq!(h.brightness(0), SPARSE_LIGHTNESS);
        assert!(!h.brightness(4).is_nan());
    }
}
