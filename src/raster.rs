// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns a cloud of colored points into pixels.
//!
//! Every point is projected onto the canvas and snapped to a cell;
//! points that miss the canvas are dropped.  What remains is written,
//! one opaque pixel per point, into a flat buffer of packed 32-bit
//! pixels.  When two points share a cell the later one wins: there is
//! no blending, so when density shading is on it is the histogram, not
//! overdraw, that decides how dark a cell is.
//!
//! A packed pixel is `0xAABBGGRR`, which in little-endian memory order
//! is the R, G, B, A byte sequence most image libraries expect.

use itertools::iproduct;
use log::{debug, warn};

use crate::chaos::ColoredPoint;
use crate::colors::{Color, Rgb, BLACK};
use crate::error::IfsError;
use crate::font;
use crate::histogram::Histogram;
use crate::planes::{canvas_coords_to_index, Pixel, PlaneMapper, Point, View};

/// Packs an opaque color as `0xFFBBGGRR`.
pub fn pack_color(color: Rgb) -> u32 {
    let [r, g, b] = color.to_bytes();
    (255 << 24) | (u32::from(b) << 16) | (u32::from(g) << 8) | u32::from(r)
}

/// Size of the overlay text, in canvas pixels per font pixel.
const TEXT_SCALE: usize = 2;
/// Left margin of the overlay text.
const TEXT_LEFT: usize = 10;
/// Baselines of the three overlay lines.
const TEXT_BASELINES: [usize; 3] = [40, 60, 80];

/// A row-major block of packed pixels.  A pixel of zero is fully
/// transparent: nothing has been drawn there.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u32>,
}

impl PixelBuffer {
    /// A transparent buffer.
    pub fn new(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The packed pixels, row-major.
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// The packed pixel at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> u32 {
        debug_assert!(x < self.width && y < self.height, "({}, {}) is off the buffer", x, y);
        self.data[canvas_coords_to_index(x, y, self.width)]
    }

    /// Overwrites the pixel at `(x, y)`.
    pub fn put(&mut self, x: usize, y: usize, pixel: u32) {
        debug_assert!(x < self.width && y < self.height, "({}, {}) is off the buffer", x, y);
        let index = canvas_coords_to_index(x, y, self.width);
        self.data[index] = pixel;
    }

    /// Replaces every pixel with those of a same-sized buffer, in one
    /// go.
    pub fn composite(&mut self, other: &PixelBuffer) -> Result<(), IfsError> {
        self.check_size(other.width, other.height)?;
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Paints every pixel nothing has been drawn on.
    pub fn fill_background(&mut self, color: Color) {
        let background = pack_color(color.rgb());
        for pixel in self.data.iter_mut().filter(|p| **p >> 24 == 0) {
            *pixel = background;
        }
    }

    /// The cells that have been drawn on, row by row.
    pub fn covered<'a>(&'a self) -> impl Iterator<Item = Pixel> + 'a {
        iproduct!(0..self.height, 0..self.width)
            .filter(move |&(y, x)| self.get(x, y) >> 24 != 0)
            .map(|(y, x)| Pixel(x, y))
    }

    /// The pixels as R, G, B, A bytes, regardless of host byte order.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 * self.data.len());
        for pixel in &self.data {
            bytes.extend_from_slice(&pixel.to_le_bytes());
        }
        bytes
    }

    fn check_size(&self, width: usize, height: usize) -> Result<(), IfsError> {
        if width == self.width && height == self.height {
            Ok(())
        } else {
            Err(IfsError::SurfaceSize {
                width: self.width,
                height: self.height,
                expected_width: width,
                expected_height: height,
            })
        }
    }

    // Bresenham, clipped to the buffer.
    fn draw_line(&mut self, from: (i64, i64), to: (i64, i64), pixel: u32) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
                self.put(x as usize, y as usize, pixel);
            }
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// What to draw besides the points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Draw the x and y axes and the coordinate readout.
    pub show_axes: bool,
    /// Shade points by how crowded their cell is.
    pub color_points: bool,
    /// The last known cursor position on the real plane, for the
    /// readout.
    pub cursor: Point,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            show_axes: false,
            color_points: false,
            cursor: Point::new(0.0, 0.0),
        }
    }
}

/// Draws point clouds for one canvas size and one view.
#[derive(Copy, Clone, Debug)]
pub struct Rasterizer {
    mapper: PlaneMapper,
}

impl Rasterizer {
    /// Constructor.
    pub fn new(width: usize, height: usize, view: View) -> Rasterizer {
        if view.is_degenerate() {
            warn!("view {:?} has no area; nothing will be drawn", view);
        }
        Rasterizer {
            mapper: PlaneMapper::new(width, height, view),
        }
    }

    /// The canvas/real-plane mapping in use.
    pub fn mapper(&self) -> &PlaneMapper {
        &self.mapper
    }

    /// The point on the real plane under a cursor offset from the
    /// canvas's upper-left corner.
    pub fn get_cursor_position(&self, x: f64, y: f64) -> Point {
        self.mapper.pixel_to_point(x, y)
    }

    /// Projects every point and keeps those that land on the canvas,
    /// in order.
    pub fn project_points(&self, points: &[ColoredPoint]) -> Vec<(Pixel, Color)> {
        let projected: Vec<(Pixel, Color)> = points
            .iter()
            .filter_map(|p| self.mapper.point_to_pixel(&p.point).map(|px| (px, p.color)))
            .collect();
        debug!(
            "projected {} points, {} off the canvas",
            points.len(),
            points.len() - projected.len()
        );
        projected
    }

    /// Draws the points, and the axes if asked, into a fresh buffer.
    pub fn render(&self, points: &[ColoredPoint], options: &RenderOptions) -> PixelBuffer {
        let (width, height) = (self.mapper.width(), self.mapper.height());
        let mut buffer = PixelBuffer::new(width, height);
        let projected = self.project_points(points);

        if options.color_points {
            let histogram = Histogram::from_cells(
                width,
                height,
                projected.iter().map(|(Pixel(x, y), _)| (*x as i64, *y as i64)),
            );
            debug!("densest cell holds {} points", histogram.max());
            for (Pixel(x, y), color) in &projected {
                let lightness = histogram.brightness(canvas_coords_to_index(*x, *y, width));
                buffer.put(*x, *y, pack_color(color.with_lightness(lightness).rgb()));
            }
        } else {
            for (Pixel(x, y), color) in &projected {
                buffer.put(*x, *y, pack_color(color.rgb()));
            }
        }

        if options.show_axes {
            self.draw_axes(&mut buffer, options.cursor);
        }
        buffer
    }

    /// Renders and then replaces the contents of `surface` in a single
    /// copy.  Without a surface, or with one of the wrong size, nothing
    /// is drawn and the surface is left as it was.
    pub fn draw(
        &self,
        surface: Option<&mut PixelBuffer>,
        points: &[ColoredPoint],
        options: &RenderOptions,
    ) -> Result<(), IfsError> {
        let surface = surface.ok_or(IfsError::MissingSurface)?;
        surface.check_size(self.mapper.width(), self.mapper.height())?;
        let rendered = self.render(points, options);
        surface.composite(&rendered)
    }

    // The axes are the images of the view's edges at x = 0 and y = 0,
    // so they sit where the origin really is, even in a lopsided view.
    fn draw_axes(&self, buffer: &mut PixelBuffer, cursor: Point) {
        let black = pack_color(BLACK.rgb());
        let v = self.mapper.view;
        let axes = [
            (Point::new(0.0, v.y_min), Point::new(0.0, v.y_max)),
            (Point::new(v.x_min, 0.0), Point::new(v.x_max, 0.0)),
        ];
        for (start, end) in axes.iter() {
            let (x0, y0) = self.mapper.project(start);
            let (x1, y1) = self.mapper.project(end);
            if [x0, y0, x1, y1].iter().all(|c| c.is_finite()) {
                buffer.draw_line((x0 as i64, y0 as i64), (x1 as i64, y1 as i64), black);
            }
        }

        let lines = [
            format!("x: [{:.2}, {:.2}]", v.x_min, v.x_max),
            format!("y: [{:.2}, {:.2}]", v.y_min, v.y_max),
            format!("[x,y]: [{:.2}, {:.2}]", cursor.x, cursor.y),
        ];
        let glyph_height = font::GLYPH_HEIGHT * TEXT_SCALE;
        let (width, height) = (buffer.width, buffer.height);
        for (text, baseline) in lines.iter().zip(TEXT_BASELINES.iter()) {
            let top = baseline.saturating_sub(glyph_height);
            font::draw_text(
                &mut buffer.data,
                width,
                height,
                (TEXT_LEFT, top),
                TEXT_SCALE,
                text,
                black,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{to_hsl, BLUE, RED, WHITE};

    const OPAQUE_RED: u32 = 0xff00_00ff;
    const OPAQUE_BLUE: u32 = 0xffff_0000;

    fn at(x: f64, y: f64, color: Color) -> ColoredPoint {
        ColoredPoint {
            point: Point::new(x, y),
            color,
        }
    }

    fn unit() -> Rasterizer {
        Rasterizer::new(10, 10, View::new(0.0, 10.0, 0.0, 10.0))
    }

    #[test]
    fn packs_alpha_blue_green_red() {
        assert_eq!(pack_color(RED.rgb()), OPAQUE_RED);
        assert_eq!(pack_color(BLUE.rgb()), OPAQUE_BLUE);
        assert_eq!(pack_color(Rgb::new(1, 2, 3)), 0xff03_0201);
    }

    #[test]
    fn bytes_come_out_rgba() {
        let mut buffer = PixelBuffer::new(1, 1);
        buffer.put(0, 0, pack_color(Rgb::new(1, 2, 3)));
        assert_eq!(buffer.to_rgba_bytes(), vec![1, 2, 3, 255]);

        let mut wide = PixelBuffer::new(3, 2);
        wide.put(1, 0, pack_color(Rgb::new(4, 5, 6)));
        wide.put(2, 1, pack_color(Rgb::new(7, 8, 9)));
        let bytes = wide.to_rgba_bytes();
        assert_eq!(bytes.len(), 3 * 2 * 4);
        assert_eq!(&bytes[4..8], &[4, 5, 6, 255]);
        assert_eq!(&bytes[20..24], &[7, 8, 9, 255]);
        assert!(bytes[..4].iter().all(|&b| b == 0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "off the buffer")]
    fn put_past_the_row_end_panics() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.put(4, 0, OPAQUE_RED);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "off the buffer")]
    fn get_past_the_last_row_panics() {
        PixelBuffer::new(4, 4).get(0, 4);
    }

    #[test]
    fn points_land_on_flipped_rows() {
        let r = unit();
        let buffer = r.render(&[at(2.0, 7.0, RED)], &RenderOptions::default());
        assert_eq!(buffer.get(2, 3), OPAQUE_RED);
        assert_eq!(buffer.covered().collect::<Vec<_>>(), vec![Pixel(2, 3)]);
    }

    #[test]
    fn later_points_overwrite_earlier_ones() {
        let r = unit();
        let points = [at(2.0, 7.0, RED), at(2.1, 6.9, BLUE)];
        let buffer = r.render(&points, &RenderOptions::default());
        assert_eq!(buffer.get(2, 3), OPAQUE_BLUE);
    }

    #[test]
    fn off_canvas_and_broken_points_are_dropped() {
        let r = unit();
        let points = [
            at(-1.0, 5.0, RED),
            at(10.0, 5.0, RED),
            at(5.0, 0.0, RED),
            at(std::f64::NAN, 5.0, RED),
            at(5.0, std::f64::NEG_INFINITY, RED),
        ];
        assert!(r.project_points(&points).is_empty());
        let buffer = r.render(&points, &RenderOptions::default());
        assert_eq!(buffer.covered().count(), 0);
    }

    #[test]
    fn degenerate_view_renders_blank() {
        let r = Rasterizer::new(10, 10, View::new(1.0, 1.0, 0.0, 10.0));
        let options = RenderOptions {
            show_axes: true,
            ..RenderOptions::default()
        };
        // The readout sits below the bottom of so small a canvas.
        let buffer = r.render(&[at(1.0, 5.0, RED)], &options);
        assert_eq!(buffer.covered().count(), 0);
    }

    #[test]
    fn density_shading_darkens_crowded_cells() {
        let r = unit();
        let points = [
            at(2.0, 7.0, RED),
            at(2.0, 7.0, RED),
            at(2.0, 7.0, RED),
            at(5.0, 5.0, RED),
        ];
        let options = RenderOptions {
            color_points: true,
            ..RenderOptions::default()
        };
        let buffer = r.render(&points, &options);
        let crowded = buffer.get(2, 3);
        let lonely = buffer.get(5, 5);
        let unpack = |p: u32| Color::Rgb(Rgb::new(p as u8, (p >> 8) as u8, (p >> 16) as u8));
        assert!((to_hsl(unpack(crowded)).lightness - 0.5).abs() < 0.01);
        assert!((to_hsl(unpack(lonely)).lightness - 0.9).abs() < 0.01);
        assert!(to_hsl(unpack(crowded)).hue.abs() < 1.0);
    }

    #[test]
    fn density_shading_without_variation_is_light() {
        let r = unit();
        let options = RenderOptions {
            color_points: true,
            ..RenderOptions::default()
        };
        let buffer = r.render(&[at(2.0, 7.0, RED), at(5.0, 5.0, BLUE)], &options);
        assert_eq!(buffer.get(2, 3), pack_color(RED.with_lightness(0.9).rgb()));
    }

    #[test]
    fn axes_follow_the_origin() {
        let r = Rasterizer::new(100, 100, View::new(-1.0, 3.0, -3.0, 1.0));
        let options = RenderOptions {
            show_axes: true,
            ..RenderOptions::default()
        };
        let buffer = r.render(&[], &options);
        let black = pack_color(BLACK.rgb());
        // x = 0 is a quarter of the way across; y = 0 a quarter of the
        // way down.
        assert_eq!(buffer.get(25, 95), black);
        assert_eq!(buffer.get(95, 25), black);
        assert_eq!(buffer.get(50, 95), 0);
    }

    #[test]
    fn draw_needs_a_surface_of_the_right_size() {
        let r = unit();
        let points = [at(2.0, 7.0, RED)];
        let options = RenderOptions::default();
        assert_eq!(
            r.draw(None, &points, &options),
            Err(IfsError::MissingSurface)
        );
        let mut wrong = PixelBuffer::new(5, 5);
        wrong.fill_background(WHITE);
        let before = wrong.clone();
        assert!(r.draw(Some(&mut wrong), &points, &options).is_err());
        assert_eq!(wrong, before);

        let mut surface = PixelBuffer::new(10, 10);
        surface.fill_background(WHITE);
        r.draw(Some(&mut surface), &points, &options).unwrap();
        assert_eq!(surface.get(2, 3), OPAQUE_RED);
        assert_eq!(surface.get(0, 0), 0);
    }

    #[test]
    fn background_fills_only_empty_pixels() {
        let r = unit();
        let mut buffer = r.render(&[at(2.0, 7.0, RED)], &RenderOptions::default());
        buffer.fill_background(WHITE);
        assert_eq!(buffer.get(2, 3), OPAQUE_RED);
        assert_eq!(buffer.get(0, 0), 0xffff_ffff);
        assert_eq!(buffer.covered().count(), 100);
    }

    #[test]
    fn cursor_position_inverts_the_projection() {
        let r = Rasterizer::new(100, 100, View::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(r.get_cursor_position(100.0, 100.0), Point::new(1.0, 0.0));
        let p = r.get_cursor_position(30.0, 40.0);
        assert_eq!(r.mapper().point_to_pixel(&p), Some(Pixel(30, 40)));
    }
}
