use super::utils::scale;
use super::ConvexHullError;
use crate::math::{Point, Real, Vector, NEAR_ZERO};
use hashbrown::HashSet;

/// A triangular facet of the hull being built, oriented with its normal pointing outward.
#[derive(Clone, Debug)]
struct HullFacet {
    pts: [usize; 3],
    normal: Vector<Real>,
    valid: bool,
}

impl HullFacet {
    fn new(pts: [usize; 3], points: &[Point<Real>]) -> Self {
        let [a, b, c] = pts.map(|i| points[i]);
        Self {
            pts,
            // Zero for slivers, which are then never seen by any point.
            normal: (b - a)
                .cross(&(c - a))
                .try_normalize(Real::EPSILON)
                .unwrap_or_else(Vector::zeros),
            valid: true,
        }
    }

    fn distance_to(&self, pt: &Point<Real>, points: &[Point<Real>]) -> Real {
        (pt - points[self.pts[0]]).dot(&self.normal)
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.pts;
        [(a, b), (b, c), (c, a)]
    }
}

/// Computes the convex hull of a set of 3D points.
///
/// Returns the sorted indices of the input points that are vertices of the hull. The hull is
/// built incrementally: each point outside of the current hull replaces the facets it can see
/// with a fan of facets joining it to the horizon of the visible region.
///
/// Points closer than a scale-relative tolerance to a facet are never seen by it, so on thin
/// point sets a vertex inserted early may end up barely inside the final hull. The hull is then
/// rebuilt from its own vertices until no more vertex is dropped: the hull of the returned
/// vertices is always made of all of them.
///
/// Fails with [`ConvexHullError::IncompletePoints`] if fewer than 4 points are given, and with
/// [`ConvexHullError::Degenerate`] if all the points are collinear or coplanar.
pub fn convex_hull3(points: &[Point<Real>]) -> Result<Vec<usize>, ConvexHullError> {
    let mut vertices = incremental_hull(points)?;

    loop {
        let subset: Vec<_> = vertices.iter().map(|i| points[*i]).collect();
        let refined = incremental_hull(&subset)?;
        if refined.len() == vertices.len() {
            break;
        }

        log::trace!(
            "3D convex hull refined from {} to {} vertices",
            vertices.len(),
            refined.len()
        );
        vertices = refined.into_iter().map(|i| vertices[i]).collect();
    }

    log::trace!(
        "3D convex hull: {} vertices out of {} points",
        vertices.len(),
        points.len()
    );

    Ok(vertices)
}

// Sorted indices of the vertices of the hull built by inserting the points in order.
fn incremental_hull(points: &[Point<Real>]) -> Result<Vec<usize>, ConvexHullError> {
    if points.len() < 4 {
        return Err(ConvexHullError::IncompletePoints);
    }

    let eps = NEAR_ZERO * scale(points);
    let simplex = initial_simplex(points, eps)?;
    let interior = Point::from(
        simplex
            .iter()
            .map(|i| points[*i].coords)
            .sum::<Vector<Real>>()
            / 4.0,
    );

    let [p0, p1, p2, p3] = simplex;
    let mut facets: Vec<HullFacet> = [[p0, p1, p2], [p0, p1, p3], [p0, p2, p3], [p1, p2, p3]]
        .into_iter()
        .map(|[a, b, c]| {
            let facet = HullFacet::new([a, b, c], points);
            if facet.distance_to(&interior, points) > 0.0 {
                HullFacet::new([a, c, b], points)
            } else {
                facet
            }
        })
        .collect();

    let mut visible = Vec::new();
    let mut visible_edges = HashSet::new();

    for (i, pt) in points.iter().enumerate() {
        if simplex.contains(&i) {
            continue;
        }

        visible.clear();
        visible.extend(
            facets
                .iter()
                .enumerate()
                .filter(|(_, f)| f.valid && f.distance_to(pt, points) > eps)
                .map(|(id, _)| id),
        );

        if visible.is_empty() {
            continue;
        }

        visible_edges.clear();
        for id in &visible {
            facets[*id].valid = false;
            visible_edges.extend(facets[*id].edges());
        }

        // Horizon edges are those whose opposite edge does not belong to a visible facet.
        let horizon: Vec<_> = visible_edges
            .iter()
            .filter(|(a, b)| !visible_edges.contains(&(*b, *a)))
            .copied()
            .collect();

        if horizon.len() < 3 {
            return Err(ConvexHullError::InternalError(
                "the horizon of a visible region must contain at least three edges",
            ));
        }

        for (a, b) in horizon {
            facets.push(HullFacet::new([a, b, i], points));
        }
    }

    let mut vertices: Vec<usize> = facets
        .iter()
        .filter(|f| f.valid)
        .flat_map(|f| f.pts)
        .collect();
    vertices.sort_unstable();
    vertices.dedup();

    Ok(vertices)
}

// Finds four points spanning a tetrahedron with non-negligible volume.
fn initial_simplex(points: &[Point<Real>], eps: Real) -> Result<[usize; 4], ConvexHullError> {
    let p0 = 0;

    let farthest = |dist: &dyn Fn(&Point<Real>) -> Real| {
        let mut best: (usize, Real) = (0, -1.0);
        for (i, pt) in points.iter().enumerate() {
            let d = dist(pt);
            if d > best.1 {
                best = (i, d);
            }
        }
        best
    };

    let (p1, d1) = farthest(&|pt| na::distance(pt, &points[p0]));
    if d1 <= eps {
        return Err(ConvexHullError::Degenerate);
    }

    let dir = (points[p1] - points[p0]) / d1;
    let (p2, d2) = farthest(&|pt| {
        let dpt = pt - points[p0];
        (dpt - dir * dpt.dot(&dir)).norm()
    });
    if d2 <= eps {
        return Err(ConvexHullError::Degenerate);
    }

    let normal = dir.cross(&(points[p2] - points[p0])).normalize();
    let (p3, d3) = farthest(&|pt| (pt - points[p0]).dot(&normal).abs());
    if d3 <= eps {
        return Err(ConvexHullError::Degenerate);
    }

    Ok([p0, p1, p2, p3])
}
