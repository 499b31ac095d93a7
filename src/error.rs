// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type shared by every stage of the renderer.

use failure::Fail;

/// Everything that can go wrong while building an equation, iterating
/// it, or putting the result on a surface.
#[derive(Debug, Fail, PartialEq)]
pub enum IfsError {
    /// An equation with no parts has nothing to choose from.
    #[fail(display = "The equation has no parts")]
    EmptyEquation,

    /// A part's probability is negative, above one, or not a number.
    #[fail(display = "Part {} has probability {}, which is not in [0, 1]", index, probability)]
    InvalidProbability {
        /// The offending part.
        index: usize,
        /// The value it carried.
        probability: f64,
    },

    /// The probabilities of all parts must add up to one.
    #[fail(display = "The probabilities sum to {}, not 1", _0)]
    ProbabilitySum(f64),

    /// An edit referred to a part that isn't there.
    #[fail(display = "Part {} does not exist; the equation has {} parts", index, len)]
    PartIndex {
        /// The requested part.
        index: usize,
        /// How many parts the equation actually has.
        len: usize,
    },

    /// A probability edit supplied the wrong number of values.
    #[fail(display = "Expected {} probabilities, got {}", expected, got)]
    ProbabilityCount {
        /// Number of parts in the equation.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// A string could not be read as a six digit hex color.
    #[fail(display = "Could not parse color: {}", _0)]
    InvalidColor(String),

    /// There is nowhere to draw.
    #[fail(display = "No rendering surface is available")]
    MissingSurface,

    /// The surface does not match the size the renderer was built for.
    #[fail(
        display = "Surface is {}x{}, but the renderer expects {}x{}",
        width, height, expected_width, expected_height
    )]
    SurfaceSize {
        /// Width of the surface handed in.
        width: usize,
        /// Height of the surface handed in.
        height: usize,
        /// Width the renderer was built for.
        expected_width: usize,
        /// Height the renderer was built for.
        expected_height: usize,
    },

    /// A name that isn't one of the known examples or variations.
    #[fail(display = "Unknown name: {}", _0)]
    UnknownName(String),

    /// The image encoder refused the buffer.
    #[fail(display = "Could not write image: {}", _0)]
    Image(String),
}
