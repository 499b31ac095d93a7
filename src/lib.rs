#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Iterated Function System renderer
//!
//! An Iterated Function System is a small collection of contracting
//! affine maps of the plane.  Apply them over and over, choosing one at
//! random each time, and the running point is drawn onto a fixed set
//! called the attractor: a fern, a spiral, a curl of dragon scales,
//! depending on the maps.  Recording every point the walk visits (the
//! "chaos game") samples the attractor, and plotting the samples draws
//! it.
//!
//! The pipeline runs in one direction: an `Equation` is played by an
//! `IfsIterator`, which yields colored points on the real plane; a
//! `Rasterizer` projects those onto a canvas, optionally shades them by
//! density with a `Histogram`, and writes them into a `PixelBuffer`.

pub mod chaos;
pub mod colors;
pub mod equation;
pub mod error;
pub mod font;
pub mod gallery;
pub mod histogram;
pub mod planes;
pub mod raster;

pub use chaos::{get_points, ColoredPoint, IfsIterator, RandomSource, Replay, UniformSource};
pub use colors::Color;
pub use equation::{Equation, Part};
pub use error::IfsError;
pub use planes::{map_from_interval, PlaneMapper, Point, View};
pub use raster::{PixelBuffer, Rasterizer, RenderOptions};

/// Plays `iterations` rounds of the chaos game on `equation` and draws
/// the result on a `width` x `height` canvas showing `view`.
pub fn render<S: RandomSource>(
    equation: &Equation,
    source: S,
    iterations: usize,
    width: usize,
    height: usize,
    view: View,
    options: &RenderOptions,
) -> Result<PixelBuffer, IfsError> {
    let points = IfsIterator::new(equation, source)?.get_points(iterations);
    Ok(Rasterizer::new(width, height, view).render(&points, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chaos::BURN_IN;

    #[test]
    fn render_fills_a_buffer_of_the_requested_size() {
        let eq = gallery::eq1();
        let buffer = render(
            &eq,
            UniformSource::seeded(7),
            10_000,
            64,
            48,
            eq.default_view(),
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(buffer.width(), 64);
        assert_eq!(buffer.height(), 48);
        assert_eq!(buffer.data().len(), 64 * 48);
        assert!(buffer.covered().count() > 50);
    }

    #[test]
    fn render_matches_the_points_it_plays() {
        let eq = gallery::spirals();
        let options = RenderOptions::default();
        let view = eq.default_view();
        let rendered = render(&eq, UniformSource::seeded(3), 5_000, 32, 32, view, &options).unwrap();
        let points = IfsIterator::new(&eq, UniformSource::seeded(3))
            .unwrap()
            .get_points(5_000);
        assert_eq!(points.len(), 5_000 - BURN_IN);
        let drawn = Rasterizer::new(32, 32, view).render(&points, &options);
        assert_eq!(rendered, drawn);
    }

    #[test]
    fn render_rejects_an_empty_equation() {
        let empty = Equation::new(vec![], View::new(0.0, 1.0, 0.0, 1.0));
        let result = render(
            &empty,
            UniformSource::seeded(1),
            1000,
            8,
            8,
            empty.default_view(),
            &RenderOptions::default(),
        );
        assert_eq!(result, Err(IfsError::EmptyEquation));
    }
}
