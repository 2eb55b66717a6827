//! Various unsorted geometrical and logical operators.

pub use self::basis::{orthonormal_basis, PlaneProjection};
pub use self::center::center;
pub use self::cov::{center_cov, principal_axes};
pub use self::polynomial::{solve_cubic, solve_monic_cubic, solve_quadratic, PolynomialRoots};
pub use self::sorted_pair::SortedPair;

mod basis;
mod center;
mod cov;
mod polynomial;
mod sorted_pair;
