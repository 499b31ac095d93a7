// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane (the canvas) with an
//! origin at 0,0 in its upper-left corner, and a rectangle on the real
//! plane (the View) in which the equation's points live.
//!
//! The two planes disagree about which way is up: on the real plane y
//! grows upward, while canvas rows grow downward.  Every mapping in
//! here is built on `map_from_interval`, which is happy to map an
//! interval onto a reversed one, and that is how the flip is done.

/// Maps `value` from the interval `[src_low, src_high]` onto the
/// interval `[dst_low, dst_high]`.  Either interval may be reversed.
/// Values outside the source interval land outside the destination
/// interval; nothing is clamped.
pub fn map_from_interval(src_low: f64, src_high: f64, dst_low: f64, dst_high: f64, value: f64) -> f64 {
    ((dst_high - dst_low) / (src_high - src_low)) * (value - src_low) + dst_low
}

/// Snaps a canvas coordinate to the nearest pixel, rounding halves up.
#[inline]
pub fn snap(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// A location on the equation's own (real) plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, growing upward.
    pub y: f64,
}

impl Point {
    /// Constructor.
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// Distance from the origin.
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// The visible rectangle of the real plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct View {
    /// Left edge.
    pub x_min: f64,
    /// Right edge.
    pub x_max: f64,
    /// Bottom edge.
    pub y_min: f64,
    /// Top edge.
    pub y_max: f64,
}

/// How much a click-to-zoom shrinks the view.
pub const ZOOM_FACTOR: f64 = 0.9;

impl View {
    /// Constructor.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> View {
        View {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// A view that collapses to a line or a point maps everything to
    /// infinity or NaN.
    pub fn is_degenerate(&self) -> bool {
        self.x_min == self.x_max || self.y_min == self.y_max
    }

    /// True if the point is inside the view, edges included.
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x_min.min(self.x_max)
            && point.x <= self.x_max.max(self.x_min)
            && point.y >= self.y_min.min(self.y_max)
            && point.y <= self.y_max.max(self.y_min)
    }

    /// Moves the view so it is centered on `target`, then shrinks it by
    /// `factor` toward `target`.  A factor above one zooms out.
    pub fn zoom_to(&self, target: &Point, factor: f64) -> View {
        let dx = target.x - 0.5 * (self.x_max + self.x_min);
        let dy = target.y - 0.5 * (self.y_max + self.y_min);
        let scale = |edge: f64, center: f64| factor * edge - center * factor + center;
        View {
            x_min: scale(self.x_min + dx, target.x),
            x_max: scale(self.x_max + dx, target.x),
            y_min: scale(self.y_min + dy, target.y),
            y_max: scale(self.y_max + dy, target.y),
        }
    }
}

/// Describes the width and height of an integral plane that is
/// assumed to start at 0,0, and all values are assumed to be
/// non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CanvasSize(pub usize, pub usize);

impl CanvasSize {
    /// The total number of cells in the integral grid.  Used to size
    /// buffers.
    pub fn len(&self) -> usize {
        self.0 * self.1
    }

    /// Describes that the integral plane has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.0 == 0 || self.1 == 0
    }
}

/// Describes the column, row of a cell on the canvas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pixel(pub usize, pub usize);

/// The offset of a cell in a row-major buffer `width` cells wide.
#[inline]
pub fn canvas_coords_to_index(x: usize, y: usize, width: usize) -> usize {
    y * width + x
}

/// The inverse of `canvas_coords_to_index`.
#[inline]
pub fn index_to_canvas_coords(index: usize, width: usize) -> (usize, usize) {
    (index % width, index / width)
}

/// Contains the definitions of two planes: the integral canvas and the
/// real View.  Maps points from one to the other.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The lower-right corner of the canvas.  The upper-left is assumed
    /// to be at 0,0.
    pub canvas: CanvasSize,
    /// The window onto the real plane.
    pub view: View,
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the canvas and the view it
    /// shows.
    pub fn new(width: usize, height: usize, view: View) -> PlaneMapper {
        PlaneMapper {
            canvas: CanvasSize(width, height),
            view,
        }
    }

    /// Canvas width in cells.
    pub fn width(&self) -> usize {
        self.canvas.0
    }

    /// Canvas height in cells.
    pub fn height(&self) -> usize {
        self.canvas.1
    }

    /// Given a point on the real plane, returns the canvas coordinates
    /// it snaps to.  The result may lie off the canvas, or be infinite
    /// or NaN if the view is degenerate.
    pub fn project(&self, point: &Point) -> (f64, f64) {
        let v = &self.view;
        (
            snap(map_from_interval(v.x_min, v.x_max, 0.0, self.width() as f64, point.x)),
            snap(map_from_interval(v.y_min, v.y_max, self.height() as f64, 0.0, point.y)),
        )
    }

    /// Given a point on the real plane, map it as closely as possible
    /// to a cell on the canvas.  Points that fall off the canvas,
    /// including those whose coordinates aren't finite, have no cell.
    pub fn point_to_pixel(&self, point: &Point) -> Option<Pixel> {
        let (x, y) = self.project(point);
        // NaN fails every comparison, so it never passes this test.
        if x >= 0.0 && x < self.width() as f64 && y >= 0.0 && y < self.height() as f64 {
            Some(Pixel(x as usize, y as usize))
        } else {
            None
        }
    }

    /// The buffer offset of the cell the point lands on, if any.
    pub fn point_to_offset(&self, point: &Point) -> Option<usize> {
        self.point_to_pixel(point)
            .map(|Pixel(x, y)| canvas_coords_to_index(x, y, self.width()))
    }

    /// Given a cursor offset from the canvas origin, returns the point on
    /// the real plane under it.  The offset is snapped to a whole pixel
    /// first, the same way `project` snaps, so the two are inverses on
    /// whole pixels.
    pub fn pixel_to_point(&self, x: f64, y: f64) -> Point {
        let v = &self.view;
        Point {
            x: map_from_interval(0.0, self.width() as f64, v.x_min, v.x_max, snap(x)),
            y: map_from_interval(self.height() as f64, 0.0, v.y_min, v.y_max, snap(y)),
        }
    }

    /// Click-to-zoom: the view recentred on the point under the cursor
    /// and shrunk toward it.
    pub fn zoom_at(&self, x: f64, y: f64) -> View {
        self.view.zoom_to(&self.pixel_to_point(x, y), ZOOM_FACTOR)
    }
}
