// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A handful of well-known equations, each with the view it looks best
//! in.

use std::str::FromStr;

use crate::colors::{Color, Hsv, BLUE, BROWN, GREEN, RED};
use crate::equation::{Coefficients, Equation, Part};
use crate::error::IfsError;
use crate::planes::View;

/// The names of the built-in equations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Example {
    /// A two-part, Mandelbrot-like curl.
    Eq1,
    /// Three spiralling arms.
    Spirals,
    /// Barnsley's fern.
    Barnsley,
    /// Nineteen small maps spelling out "Chaos".
    Chaos,
    /// The black spleenwort fern from Fractals Everywhere, p. 115.
    BlackSpleenwort,
}

impl Example {
    /// Every example, in a stable order.
    pub const ALL: [Example; 5] = [
        Example::Eq1,
        Example::Spirals,
        Example::Barnsley,
        Example::Chaos,
        Example::BlackSpleenwort,
    ];

    /// The name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Example::Eq1 => "eq1",
            Example::Spirals => "spirals",
            Example::Barnsley => "barnsley",
            Example::Chaos => "chaos",
            Example::BlackSpleenwort => "black_spleenwort",
        }
    }

    /// Builds the equation.
    pub fn equation(self) -> Equation {
        match self {
            Example::Eq1 => eq1(),
            Example::Spirals => spirals(),
            Example::Barnsley => barnsley(),
            Example::Chaos => chaos(),
            Example::BlackSpleenwort => black_spleenwort(),
        }
    }
}

impl FromStr for Example {
    type Err = IfsError;

    fn from_str(s: &str) -> Result<Example, IfsError> {
        Example::ALL
            .iter()
            .cloned()
            .find(|e| e.name() == s)
            .ok_or_else(|| IfsError::UnknownName(s.to_string()))
    }
}

fn part(probability: f64, color: Color, c: [f64; 6]) -> Part {
    Part::new(
        Coefficients::new(c[0], c[1], c[2], c[3], c[4], c[5]),
        probability,
        color,
    )
}

/// A two-part, Mandelbrot-like curl.
pub fn eq1() -> Equation {
    Equation::new(
        vec![
            part(0.5, BLUE, [0.202, -0.805, -0.689, -0.342, -0.373, -0.653]),
            part(0.5, RED, [0.138, 0.665, -0.502, -0.222, 0.66, -0.277]),
        ],
        View::new(-1.0, 1.0, -1.0, 1.0),
    )
}

/// Three spiralling arms.
pub fn spirals() -> Equation {
    Equation::new(
        vec![
            part(0.7, RED, [0.787879, -0.424242, 0.242424, 0.859848, 0.758647, 0.5]),
            part(0.15, BLUE, [-0.121212, 0.257576, 0.151515, 0.05303, -0.8, 0.8]),
            part(0.15, GREEN, [0.181818, -0.136364, 0.090909, 0.181818, 0.8, 0.5]),
        ],
        View::new(-2.0, 2.0, 0.0, 4.0),
    )
}

/// Barnsley's fern.
pub fn barnsley() -> Equation {
    Equation::new(
        vec![
            part(0.01, RED, [0.0, 0.0, 0.0, 0.16, 0.0, 0.01]),
            part(0.07, BLUE, [0.2, -0.26, 0.23, 0.22, 0.0, 1.6]),
            part(0.07, GREEN, [-0.15, 0.28, 0.26, 0.24, 0.0, 0.44]),
            part(0.85, BROWN, [0.85, 0.04, -0.04, 0.85, 0.0, 1.6]),
        ],
        View::new(-2.0, 2.0, 0.0, 4.0),
    )
}

const CHAOS: [[f64; 6]; 19] = [
    [0.0, 0.053, -0.429, 0.0, -7.083, 5.43],
    [0.143, 0.0, 0.0, -0.053, -5.619, 8.513],
    [0.143, 0.0, 0.0, 0.083, -5.619, 2.057],
    [0.0, 0.053, 0.429, 0.0, -3.952, 5.43],
    [0.119, 0.0, 0.0, 0.053, -2.555, 4.536],
    [-0.0123806, -0.0649723, 0.423819, 0.00189797, -1.226, 5.235],
    [0.0852291, 0.0506328, 0.420449, 0.0156626, -0.421, 4.569],
    [0.104432, 0.00529117, 0.0570516, 0.0527352, 0.976, 8.113],
    [-0.00814186, -0.0417935, 0.423922, 0.00415972, 1.934, 5.37],
    [0.093, 0.0, 0.0, 0.053, 0.861, 4.536],
    [0.0, 0.053, -0.429, 0.0, 2.447, 5.43],
    [0.119, 0.0, 0.0, -0.053, 3.363, 8.513],
    [0.119, 0.0, 0.0, 0.053, 3.363, 1.487],
    [0.0, 0.053, 0.429, 0.0, 3.972, 4.569],
    [0.123998, -0.00183957, 0.000691208, 0.0629731, 6.275, 7.716],
    [0.0, 0.053, 0.167, 0.0, 5.215, 6.483],
    [0.071, 0.0, 0.0, 0.053, 6.279, 5.298],
    [0.0, -0.053, -0.238, 0.0, 6.805, 3.714],
    [-0.121, 0.0, 0.0, 0.053, 5.941, 1.487],
];

/// Nineteen equally likely maps that draw the word "Chaos".  Each map
/// gets its own hue, spread evenly around the color wheel.
pub fn chaos() -> Equation {
    let n = CHAOS.len();
    let parts = CHAOS
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let color = Color::Hsv(Hsv {
                hue: 360.0 * (i as f64) / (n as f64),
                saturation: 0.8,
                value: 0.9,
            });
            part(1.0 / (n as f64), color, *c)
        })
        .collect();
    Equation::new(parts, View::new(-2.0, 2.0, 1.53, 5.53))
}

/// The black spleenwort fern, from page 115 of Fractals Everywhere.
pub fn black_spleenwort() -> Equation {
    Equation::new(
        vec![
            part(0.1, BROWN, [0.0, 0.0, 0.0, 0.16, 0.0, 0.0]),
            part(
                0.3,
                RED,
                [
                    0.8491909883445791,
                    0.0370764792605356,
                    -0.0370764792605356,
                    0.8491909883445791,
                    0.0,
                    1.6,
                ],
            ),
            part(
                0.3,
                GREEN,
                [
                    0.1968177086971522,
                    -0.25660125727574246,
                    0.22641287406683155,
                    0.2230600698567725,
                    0.0,
                    1.6,
                ],
            ),
            part(
                0.3,
                BLUE,
                [
                    -0.15,
                    0.28343644395402184,
                    0.2598076211353316,
                    0.23783141558401957,
                    0.0,
                    0.44,
                ],
            ),
        ],
        View::new(0.0, 1.0, 0.0, 1.0),
    )
}
