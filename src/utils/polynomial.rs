//! Real roots of low-degree polynomials.

use crate::math::{Real, NEAR_ZERO};
use arrayvec::ArrayVec;
use na::Complex;

/// The real roots of a polynomial of degree at most 3.
pub type PolynomialRoots = ArrayVec<Real, 3>;

/// Computes the real roots of the monic cubic `x³ + a·x² + b·x + c`.
///
/// The roots are computed with Cardano's formula using complex intermediate values. Each of the
/// six candidate values is kept only if it is an actual root up to [`NEAR_ZERO`], and near-equal
/// roots are merged. The returned roots are not sorted.
pub fn solve_monic_cubic(a: Real, b: Real, c: Real) -> PolynomialRoots {
    let p = b - a * a / 3.0;
    let q = c + (2.0 * a * a * a - 9.0 * a * b) / 27.0;

    let croot = Complex::new(q * q / 4.0 + p * p * p / 27.0, 0.0).sqrt();
    let u1 = (Complex::new(-q / 2.0, 0.0) + croot).powf(1.0 / 3.0);
    let u2 = (Complex::new(-q / 2.0, 0.0) - croot).powf(1.0 / 3.0);

    #[expect(clippy::unnecessary_cast)]
    let sqrt3_2 = (3.0 as Real).sqrt() / 2.0;
    let rot1 = Complex::new(-0.5, sqrt3_2);
    let rot2 = Complex::new(-0.5, -sqrt3_2);

    let candidates = [u1, u1 * rot1, u1 * rot2, u2, u2 * rot1, u2 * rot2];
    let eval = |x: Real| ((x + a) * x + b) * x + c;
    let eval_deriv = |x: Real| (3.0 * x + 2.0 * a) * x + b;

    let mut roots = PolynomialRoots::new();

    for u in candidates {
        let x = if u.norm() <= Real::EPSILON {
            // Triple root, `p/u` is undefined here.
            -a / 3.0
        } else {
            (u - p / (u * 3.0)).re - a / 3.0
        };

        let x = polish_root(x, eval, eval_deriv);

        if !(eval(x).abs() < NEAR_ZERO) {
            continue;
        }

        if roots.iter().all(|r| (r - x).abs() >= NEAR_ZERO) && !roots.is_full() {
            roots.push(x);
        }
    }

    roots
}

/// Computes the real roots of `a·x² + b·x + c`.
///
/// Degrades to the linear equation `b·x + c = 0` when `|a| < NEAR_ZERO`. Returns no roots if the
/// polynomial is (nearly) constant or if its discriminant is negative.
pub fn solve_quadratic(a: Real, b: Real, c: Real) -> PolynomialRoots {
    let mut roots = PolynomialRoots::new();

    if a.abs() < NEAR_ZERO {
        if b.abs() >= NEAR_ZERO {
            roots.push(-c / b);
        }
        return roots;
    }

    let discr = b * b - 4.0 * a * c;
    if discr < 0.0 {
        return roots;
    }

    let sqrt_discr = discr.sqrt();
    roots.push((-b + sqrt_discr) / (2.0 * a));
    if sqrt_discr > 0.0 {
        roots.push((-b - sqrt_discr) / (2.0 * a));
    }

    roots
}

/// Computes the real roots of `a·x³ + b·x² + c·x + d`.
///
/// Falls back to [`solve_quadratic`] when the leading coefficient satisfies `|a| < NEAR_ZERO`.
pub fn solve_cubic(a: Real, b: Real, c: Real, d: Real) -> PolynomialRoots {
    if a.abs() < NEAR_ZERO {
        solve_quadratic(b, c, d)
    } else {
        solve_monic_cubic(b / a, c / a, d / a)
    }
}

// A couple of Newton steps, kept only while they reduce the residual.
fn polish_root(mut x: Real, f: impl Fn(Real) -> Real, df: impl Fn(Real) -> Real) -> Real {
    for _ in 0..2 {
        let fx = f(x);
        let dfx = df(x);

        if dfx.abs() <= Real::EPSILON || !fx.is_finite() {
            break;
        }

        let candidate = x - fx / dfx;
        if f(candidate).abs() < fx.abs() {
            x = candidate;
        } else {
            break;
        }
    }

    x
}
