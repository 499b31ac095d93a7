// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The chaos game.  Start anywhere, pick one of the equation's parts
//! at random (weighted by its probability), move the point with that
//! part's map, and repeat.  After a few steps the point has fallen onto
//! the attractor and never leaves it; every point after that is a
//! sample of the fractal, colored by the part that produced it.
//!
//! The source of randomness is handed in rather than reached for, so
//! that a test can replay a known sequence and check every choice the
//! game makes.

use log::debug;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::colors::{Color, BLACK};
use crate::equation::Equation;
use crate::error::IfsError;
use crate::planes::Point;

/// The number of points thrown away while the game settles onto the
/// attractor.
pub const BURN_IN: usize = 20;

/// Something that yields numbers uniformly distributed in [0, 1).
pub trait RandomSource {
    /// The next number.
    fn next_f64(&mut self) -> f64;
}

/// A uniform [0, 1) distribution paired with the generator it draws
/// from.
pub struct UniformSource<R: Rng>(Uniform<f64>, R);

impl<R: Rng> UniformSource<R> {
    /// Wraps any generator.
    pub fn new(rng: R) -> Self {
        UniformSource(Uniform::new(0.0_f64, 1.0), rng)
    }
}

impl UniformSource<ThreadRng> {
    /// Draws from the thread-local generator.
    pub fn thread() -> Self {
        UniformSource::new(rand::thread_rng())
    }
}

impl UniformSource<StdRng> {
    /// A reproducible source.
    pub fn seeded(seed: u64) -> Self {
        UniformSource::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for UniformSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.0.sample(&mut self.1)
    }
}

/// Plays back a fixed list of numbers, over and over.
#[derive(Clone, Debug)]
pub struct Replay {
    values: Vec<f64>,
    next: usize,
}

impl Replay {
    /// `None` if there is nothing to play back.
    pub fn new(values: Vec<f64>) -> Option<Replay> {
        if values.is_empty() {
            None
        } else {
            Some(Replay { values, next: 0 })
        }
    }
}

impl RandomSource for Replay {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        value
    }
}

/// A point on the real plane with the color it should be drawn in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColoredPoint {
    /// Where.
    pub point: Point,
    /// What color.
    pub color: Color,
}

/// Given a list of probabilities and a number `r` in [0, 1), walks the
/// running sum of the probabilities and returns the first index at
/// which the sum exceeds `r`.  If rounding leaves the total at or below
/// `r`, the last index is returned.  With no probabilities there is
/// nothing to choose, and the answer is `None`.
pub fn prob_to_index(probs: &[f64], r: f64) -> Option<usize> {
    let mut sum = 0.0_f64;
    for (i, &p) in probs.iter().enumerate() {
        sum += p;
        if r < sum {
            return Some(i);
        }
    }
    probs.len().checked_sub(1)
}

/// The running sums of the probabilities, accumulated in order so that
/// they match `prob_to_index` bit for bit.
fn cumulative(probs: &[f64]) -> Vec<f64> {
    probs
        .iter()
        .scan(0.0_f64, |sum, &p| {
            *sum += p;
            Some(*sum)
        })
        .collect()
}

/// The chaos game over one equation.  As an `Iterator` it yields an
/// endless stream of raw steps: burn-in included, final transform not
/// applied.  `get_points` does the bookkeeping and is what a renderer
/// wants.
pub struct IfsIterator<'a, S: RandomSource> {
    equation: &'a Equation,
    cumulative: Vec<f64>,
    source: S,
    current: ColoredPoint,
}

impl<'a, S: RandomSource> IfsIterator<'a, S> {
    /// Fails if the equation is empty or its probabilities are not a
    /// distribution.  The first point is drawn from the unit square.
    pub fn new(equation: &'a Equation, mut source: S) -> Result<Self, IfsError> {
        equation.validate()?;
        let cumulative = cumulative(&equation.probabilities());
        let start = Point::new(source.next_f64(), source.next_f64());
        Ok(IfsIterator {
            equation,
            cumulative,
            source,
            current: ColoredPoint {
                point: start,
                color: BLACK,
            },
        })
    }

    /// The index of the part chosen for `r`; the same answer
    /// `prob_to_index` gives.
    fn choose(&self, r: f64) -> usize {
        let i = self.cumulative.partition_point(|&sum| sum <= r);
        i.min(self.cumulative.len() - 1)
    }

    /// One round of the game.
    pub fn step(&mut self) -> ColoredPoint {
        let r = self.source.next_f64();
        let part = &self.equation.parts()[self.choose(r)];
        let mut point = part.coefficients.apply(&self.current.point);
        if let Some(variation) = self.equation.variation() {
            point = variation.apply(&point);
        }
        self.current = ColoredPoint {
            point,
            color: part.color,
        };
        self.current
    }

    /// Plays `iterations` rounds and keeps everything after the
    /// burn-in, with the final transform (if any) applied to each kept
    /// point.  Fewer than `BURN_IN` iterations yield nothing.
    pub fn get_points(&mut self, iterations: usize) -> Vec<ColoredPoint> {
        let keep = iterations.saturating_sub(BURN_IN);
        for _ in 0..iterations.min(BURN_IN) {
            self.step();
        }
        let mut points: Vec<ColoredPoint> = (0..keep).map(|_| self.step()).collect();
        if let Some(last) = self.equation.final_transform() {
            for p in points.iter_mut() {
                p.point = last.apply(&p.point);
            }
        }
        debug!("chaos game: {} iterations, kept {}", iterations, points.len());
        points
    }
}

impl<'a, S: RandomSource> Iterator for IfsIterator<'a, S> {
    type Item = ColoredPoint;

    fn next(&mut self) -> Option<ColoredPoint> {
        Some(self.step())
    }
}

/// Convenience: validate, seed from the thread generator, and play.
pub fn get_points(equation: &Equation, iterations: usize) -> Result<Vec<ColoredPoint>, IfsError> {
    Ok(IfsIterator::new(equation, UniformSource::thread())?.get_points(iterations))
}
