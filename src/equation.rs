// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An IFS equation is a short list of parts, each an affine map with a
//! probability and a color, plus the view it looks best in.  It may
//! also carry a nonlinear variation, applied after every affine step,
//! and a final transform, applied once to every point after the whole
//! run.
//!
//! Equations are values.  Every edit returns a new equation and leaves
//! the old one alone, so a renderer holding an equation never sees it
//! change underneath it.

use std::str::FromStr;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::colors::{random_color, Color};
use crate::error::IfsError;
use crate::planes::{Point, View};

/// How far the probabilities may drift from summing to exactly one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// The six coefficients of `(x, y) -> (a*x + b*y + e, c*x + d*y + f)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coefficients {
    /// x contribution to x.
    pub a: f64,
    /// y contribution to x.
    pub b: f64,
    /// x contribution to y.
    pub c: f64,
    /// y contribution to y.
    pub d: f64,
    /// x translation.
    pub e: f64,
    /// y translation.
    pub f: f64,
}

/// Names one of the six coefficients, for edits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Coefficient {
    /// `a`
    A,
    /// `b`
    B,
    /// `c`
    C,
    /// `d`
    D,
    /// `e`
    E,
    /// `f`
    F,
}

impl Coefficients {
    /// Constructor, in `a` through `f` order.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Coefficients {
        Coefficients { a, b, c, d, e, f }
    }

    /// The identity map.
    pub fn identity() -> Coefficients {
        Coefficients::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Applies the affine map.
    #[inline]
    pub fn apply(&self, p: &Point) -> Point {
        Point {
            x: self.a * p.x + self.b * p.y + self.e,
            y: self.c * p.x + self.d * p.y + self.f,
        }
    }

    /// A copy with one coefficient replaced.
    pub fn with(&self, which: Coefficient, value: f64) -> Coefficients {
        let mut next = *self;
        match which {
            Coefficient::A => next.a = value,
            Coefficient::B => next.b = value,
            Coefficient::C => next.c = value,
            Coefficient::D => next.d = value,
            Coefficient::E => next.e = value,
            Coefficient::F => next.f = value,
        }
        next
    }

    /// Six coefficients drawn uniformly from [-1, 1).
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Coefficients {
        let u = Uniform::new(-1.0_f64, 1.0);
        Coefficients::new(
            u.sample(rng),
            u.sample(rng),
            u.sample(rng),
            u.sample(rng),
            u.sample(rng),
            u.sample(rng),
        )
    }
}

/// A nonlinear warp of the plane.  The formulas are the classic
/// fractal flame variations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Variation {
    /// `(sin x, sin y)`
    Sinusoidal,
    /// `(x, y) / r^2`
    Spherical,
    /// Rotation by `r^2`.
    Swirl,
    /// `((x - y)(x + y), 2xy) / r`
    Horseshoe,
    /// `(theta / pi, r - 1)`
    Polar,
}

impl Variation {
    /// Every variation, in a stable order.
    pub const ALL: [Variation; 5] = [
        Variation::Sinusoidal,
        Variation::Spherical,
        Variation::Swirl,
        Variation::Horseshoe,
        Variation::Polar,
    ];

    /// The lower-case name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Variation::Sinusoidal => "sinusoidal",
            Variation::Spherical => "spherical",
            Variation::Swirl => "swirl",
            Variation::Horseshoe => "horseshoe",
            Variation::Polar => "polar",
        }
    }

    /// Warps a single point.  Spherical and horseshoe blow up at the
    /// origin; the resulting non-finite points never reach a canvas.
    pub fn apply(self, p: &Point) -> Point {
        let r2 = p.x * p.x + p.y * p.y;
        match self {
            Variation::Sinusoidal => Point::new(p.x.sin(), p.y.sin()),
            Variation::Spherical => Point::new(p.x / r2, p.y / r2),
            Variation::Swirl => {
                let (s, c) = r2.sin_cos();
                Point::new(p.x * s - p.y * c, p.x * c + p.y * s)
            }
            Variation::Horseshoe => {
                let r = r2.sqrt();
                Point::new((p.x - p.y) * (p.x + p.y) / r, 2.0 * p.x * p.y / r)
            }
            Variation::Polar => Point::new(p.x.atan2(p.y) / std::f64::consts::PI, r2.sqrt() - 1.0),
        }
    }
}

impl FromStr for Variation {
    type Err = IfsError;

    fn from_str(s: &str) -> Result<Variation, IfsError> {
        Variation::ALL
            .iter()
            .cloned()
            .find(|v| v.name() == s)
            .ok_or_else(|| IfsError::UnknownName(s.to_string()))
    }
}

/// A fixed warp applied once to every finished point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FinalTransform {
    /// One more affine map.
    Affine(Coefficients),
    /// One of the nonlinear warps.
    Variation(Variation),
}

impl FinalTransform {
    /// Warps a single point.
    pub fn apply(&self, p: &Point) -> Point {
        match self {
            FinalTransform::Affine(coefficients) => coefficients.apply(p),
            FinalTransform::Variation(variation) => variation.apply(p),
        }
    }
}

/// One of the maps that make up an equation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Part {
    /// The affine map.
    pub coefficients: Coefficients,
    /// How often this part is chosen, in [0, 1].
    pub probability: f64,
    /// The color of the points this part produces.
    pub color: Color,
}

impl Part {
    /// Constructor.
    pub fn new(coefficients: Coefficients, probability: f64, color: Color) -> Part {
        Part {
            coefficients,
            probability,
            color,
        }
    }
}

/// A complete IFS definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Equation {
    parts: Vec<Part>,
    default_view: View,
    variation: Option<Variation>,
    final_transform: Option<FinalTransform>,
}

impl Equation {
    /// An equation with no variation and no final transform.  Nothing is
    /// checked here; an equation only has to be valid by the time it is
    /// iterated.  See `validate`.
    pub fn new(parts: Vec<Part>, default_view: View) -> Equation {
        Equation {
            parts,
            default_view,
            variation: None,
            final_transform: None,
        }
    }

    /// The parts, in order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// The view the equation was designed for.
    pub fn default_view(&self) -> View {
        self.default_view
    }

    /// The warp applied after every affine step, if any.
    pub fn variation(&self) -> Option<Variation> {
        self.variation
    }

    /// The warp applied once to the finished point set, if any.
    pub fn final_transform(&self) -> Option<FinalTransform> {
        self.final_transform
    }

    /// Each part's probability, in order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.parts.iter().map(|p| p.probability).collect()
    }

    /// Checks that the equation can be iterated: it has at least one
    /// part, every probability is in [0, 1], and they sum to one.
    pub fn validate(&self) -> Result<(), IfsError> {
        if self.parts.is_empty() {
            return Err(IfsError::EmptyEquation);
        }
        for (index, part) in self.parts.iter().enumerate() {
            // Written this way round so that NaN is rejected too.
            if !(part.probability >= 0.0 && part.probability <= 1.0) {
                return Err(IfsError::InvalidProbability {
                    index,
                    probability: part.probability,
                });
            }
        }
        let sum: f64 = self.parts.iter().map(|p| p.probability).sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(IfsError::ProbabilitySum(sum));
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), IfsError> {
        if index < self.parts.len() {
            Ok(())
        } else {
            Err(IfsError::PartIndex {
                index,
                len: self.parts.len(),
            })
        }
    }

    fn with_parts(&self, parts: Vec<Part>) -> Equation {
        Equation {
            parts,
            ..self.clone()
        }
    }

    /// A copy with `part` appended.
    pub fn with_part(&self, part: Part) -> Equation {
        let mut parts = self.parts.clone();
        parts.push(part);
        self.with_parts(parts)
    }

    /// A copy without the part at `index`.
    pub fn without_part(&self, index: usize) -> Result<Equation, IfsError> {
        self.check_index(index)?;
        let mut parts = self.parts.clone();
        parts.remove(index);
        Ok(self.with_parts(parts))
    }

    /// A copy with one coefficient of one part replaced.
    pub fn with_coefficient(
        &self,
        index: usize,
        which: Coefficient,
        value: f64,
    ) -> Result<Equation, IfsError> {
        self.check_index(index)?;
        let mut parts = self.parts.clone();
        parts[index].coefficients = parts[index].coefficients.with(which, value);
        Ok(self.with_parts(parts))
    }

    /// A copy with every part's probability replaced, in order.
    pub fn with_probabilities(&self, probabilities: &[f64]) -> Result<Equation, IfsError> {
        if probabilities.len() != self.parts.len() {
            return Err(IfsError::ProbabilityCount {
                expected: self.parts.len(),
                got: probabilities.len(),
            });
        }
        let parts = self
            .parts
            .iter()
            .zip(probabilities)
            .map(|(part, &probability)| Part {
                probability,
                ..*part
            })
            .collect();
        Ok(self.with_parts(parts))
    }

    /// A copy with one part recolored.
    pub fn with_color(&self, index: usize, color: Color) -> Result<Equation, IfsError> {
        self.check_index(index)?;
        let mut parts = self.parts.clone();
        parts[index].color = color;
        Ok(self.with_parts(parts))
    }

    /// A copy with a different default view.
    pub fn with_default_view(&self, default_view: View) -> Equation {
        Equation {
            default_view,
            ..self.clone()
        }
    }

    /// A copy with the per-step variation set or cleared.
    pub fn with_variation(&self, variation: Option<Variation>) -> Equation {
        Equation {
            variation,
            ..self.clone()
        }
    }

    /// A copy with the final transform set or cleared.
    pub fn with_final_transform(&self, final_transform: Option<FinalTransform>) -> Equation {
        Equation {
            final_transform,
            ..self.clone()
        }
    }
}

/// Two random parts, equally likely, with random colors, shown in the
/// unit square around the origin.
pub fn random_equation<R: Rng + ?Sized>(rng: &mut R) -> Equation {
    let mut part = || Part::new(Coefficients::random(rng), 0.5, random_color(rng));
    let parts = vec![part(), part()];
    Equation::new(parts, View::new(-1.0, 1.0, -1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLUE, RED};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_parts() -> Equation {
        Equation::new(
            vec![
                Part::new(Coefficients::new(0.5, 0.0, 0.0, 0.5, 0.0, 0.0), 0.5, RED),
                Part::new(Coefficients::new(0.5, 0.0, 0.0, 0.5, 0.5, 0.5), 0.5, BLUE),
            ],
            View::new(0.0, 1.0, 0.0, 1.0),
        )
    }

    #[test]
    fn affine_map() {
        let c = Coefficients::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(c.apply(&Point::new(1.0, 1.0)), Point::new(8.0, 13.0));
        assert_eq!(
            Coefficients::identity().apply(&Point::new(0.3, -2.0)),
            Point::new(0.3, -2.0)
        );
    }

    #[test]
    fn valid_equation_passes() {
        assert_eq!(two_parts().validate(), Ok(()));
    }

    #[test]
    fn empty_equation_fails() {
        let eq = Equation::new(vec![], View::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(eq.validate(), Err(IfsError::EmptyEquation));
    }

    #[test]
    fn bad_probabilities_fail() {
        let eq = two_parts().with_probabilities(&[1.2, -0.2]).unwrap();
        assert_eq!(
            eq.validate(),
            Err(IfsError::InvalidProbability {
                index: 0,
                probability: 1.2
            })
        );
        let eq = two_parts().with_probabilities(&[0.5, 0.4]).unwrap();
        assert!(match eq.validate() {
            Err(IfsError::ProbabilitySum(s)) => (s - 0.9).abs() < 1e-12,
            _ => false,
        });
        let eq = two_parts().with_probabilities(&[std::f64::NAN, 0.5]).unwrap();
        assert!(eq.validate().is_err());
    }

    #[test]
    fn edits_leave_the_original_alone() {
        let original = two_parts();
        let edited = original
            .with_coefficient(1, Coefficient::E, -0.25)
            .unwrap()
            .with_color(0, BLUE)
            .unwrap();
        assert_eq!(original, two_parts());
        assert_eq!(edited.parts()[1].coefficients.e, -0.25);
        assert_eq!(edited.parts()[0].color, BLUE);
    }

    #[test]
    fn adding_and_removing_parts() {
        let eq = two_parts();
        let three = eq.with_part(Part::new(Coefficients::identity(), 0.0, RED));
        assert_eq!(three.parts().len(), 3);
        assert_eq!(eq.parts().len(), 2);
        let one = eq.without_part(0).unwrap();
        assert_eq!(one.parts().len(), 1);
        assert_eq!(one.parts()[0].color, BLUE);
        assert_eq!(
            eq.without_part(2),
            Err(IfsError::PartIndex { index: 2, len: 2 })
        );
    }

    #[test]
    fn probability_edits_need_one_value_per_part() {
        assert_eq!(
            two_parts().with_probabilities(&[1.0]),
            Err(IfsError::ProbabilityCount {
                expected: 2,
                got: 1
            })
        );
        let eq = two_parts().with_probabilities(&[0.25, 0.75]).unwrap();
        assert_eq!(eq.probabilities(), vec![0.25, 0.75]);
    }

    #[test]
    fn variations() {
        let p = Point::new(1.0, 1.0);
        assert_eq!(Variation::Spherical.apply(&p), Point::new(0.5, 0.5));
        assert_eq!(
            Variation::Sinusoidal.apply(&p),
            Point::new(1.0_f64.sin(), 1.0_f64.sin())
        );
        let swirled = Variation::Swirl.apply(&p);
        assert!((swirled.norm() - p.norm()).abs() < 1e-12);
        let polar = Variation::Polar.apply(&Point::new(0.0, 2.0));
        assert_eq!(polar, Point::new(0.0, 1.0));
        let horseshoe = Variation::Horseshoe.apply(&Point::new(3.0, 4.0));
        assert!((horseshoe.x - (-7.0 / 5.0)).abs() < 1e-12);
        assert!((horseshoe.y - (24.0 / 5.0)).abs() < 1e-12);
        assert!(!Variation::Spherical.apply(&Point::new(0.0, 0.0)).x.is_finite());
    }

    #[test]
    fn variation_names() {
        for v in Variation::ALL.iter() {
            assert_eq!(v.name().parse::<Variation>(), Ok(*v));
        }
        assert!("wobble".parse::<Variation>().is_err());
    }

    #[test]
    fn final_transforms() {
        let flip = FinalTransform::Affine(Coefficients::new(-1.0, 0.0, 0.0, 1.0, 0.0, 0.0));
        assert_eq!(flip.apply(&Point::new(2.0, 3.0)), Point::new(-2.0, 3.0));
        let warp = FinalTransform::Variation(Variation::Spherical);
        assert_eq!(warp.apply(&Point::new(2.0, 0.0)), Point::new(0.5, 0.0));
    }

    #[test]
    fn random_equations_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let eq = random_equation(&mut rng);
            assert_eq!(eq.validate(), Ok(()));
            for part in eq.parts() {
                let c = part.coefficients;
                for v in &[c.a, c.b, c.c, c.d, c.e, c.f] {
                    assert!(*v >= -1.0 && *v < 1.0);
                }
            }
        }
    }
}
