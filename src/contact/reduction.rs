use crate::contact::ContactEvent;
use crate::math::{Point, Real, Vector, NEAR_ZERO};
use crate::pipeline::BodyHandle;
use crate::transformation::{self, ConvexHullError};
use crate::utils::{PlaneProjection, SortedPair};
use alloc::collections::BTreeMap;

/// Reduces a group of contacts to a minimal set describing the same contact manifold.
///
/// Groups of at most four contacts are left untouched. Larger groups are partitioned by pair of
/// bodies in contact, each part is reduced with [`determine_convex_set`], and the parts are
/// concatenated back into `group`.
pub fn determine_minimal_set(group: &mut Vec<usize>, contacts: &[ContactEvent]) {
    if group.len() <= 4 {
        return;
    }

    log::debug!("computing the minimal set of {} contacts", group.len());

    let mut parts: BTreeMap<SortedPair<BodyHandle>, Vec<usize>> = BTreeMap::new();
    for i in group.drain(..) {
        let contact = &contacts[i];
        parts
            .entry(SortedPair::new(contact.body1, contact.body2))
            .or_default()
            .push(i);
    }

    for mut part in parts.into_values() {
        determine_convex_set(&mut part, contacts);
        group.extend(part);
    }

    log::debug!("{} contacts remain in the minimal set", group.len());
}

/// Keeps only the contacts of `part` lying on the boundary of the convex hull of its points.
///
/// Parts of at most three contacts, or with different friction coefficients, are left
/// untouched. Collinear points are reduced to the two extremities of their segment. Points
/// coplanar with the tangent plane of the first contact, up to a tolerance relative to their
/// magnitude, are reduced to their 2D convex hull. Otherwise the 3D convex hull is used. If a
/// hull cannot be computed, the reduction falls back to the 2D hull of the points projected
/// along the normal of the first contact, then to segment extremities, so `part` never becomes
/// empty.
pub fn determine_convex_set(part: &mut Vec<usize>, contacts: &[ContactEvent]) {
    if part.len() <= 3 {
        return;
    }

    let mu = contacts[part[0]].mu_coulomb;
    if part
        .iter()
        .any(|i| !relative_eq!(contacts[*i].mu_coulomb, mu, epsilon = NEAR_ZERO))
    {
        return;
    }

    let points: Vec<Point<Real>> = part.iter().map(|i| contacts[*i].point).collect();
    let first = &contacts[part[0]];
    let tangent_plane = PlaneProjection::new(first.point, first.normal);
    let eps = tolerance(&points);

    let kept: Vec<usize> = if calc_dimensionality(&points) <= 1 {
        log::trace!("contact points are collinear");
        segment_endpoints(&points)
    } else if points
        .iter()
        .all(|pt| tangent_plane.signed_distance(pt).abs() <= eps)
    {
        hull2(&points, &first.normal).unwrap_or_else(|err| {
            log::warn!(
                "2D convex hull of the contact points failed ({}), keeping segment endpoints",
                err
            );
            segment_endpoints(&points)
        })
    } else {
        convex_hull_3d_or_fallback(&points, &first.normal)
    };

    let kept_points: Vec<_> = kept.iter().map(|i| points[*i]).collect();
    part.retain(|i| {
        kept_points
            .iter()
            .any(|pt| na::distance(pt, &contacts[*i].point) <= NEAR_ZERO)
    });
}

fn convex_hull_3d_or_fallback(points: &[Point<Real>], normal: &Vector<Real>) -> Vec<usize> {
    transformation::convex_hull3(points)
        .or_else(|err| {
            log::warn!(
                "3D convex hull of the contact points failed ({}), trying a 2D hull",
                err
            );
            hull2(points, normal)
        })
        .unwrap_or_else(|err| {
            log::warn!(
                "2D convex hull of the contact points failed ({}), keeping segment endpoints",
                err
            );
            segment_endpoints(points)
        })
}

fn hull2(points: &[Point<Real>], normal: &Vector<Real>) -> Result<Vec<usize>, ConvexHullError> {
    let projected = transformation::project_to_plane(points, normal);
    if projected.is_empty() {
        return Err(ConvexHullError::Degenerate);
    }
    transformation::convex_hull2(&projected)
}

fn segment_endpoints(points: &[Point<Real>]) -> Vec<usize> {
    match determine_segment_endpoints(points) {
        Some((a, b)) if a == b => vec![a],
        Some((a, b)) => vec![a, b],
        None => vec![],
    }
}

/// Finds two points of the set that are the farthest apart along the set main direction.
///
/// For collinear points these are the extremities of the segment containing all of them.
/// Returns `None` if `points` is empty.
pub fn determine_segment_endpoints(points: &[Point<Real>]) -> Option<(usize, usize)> {
    let first = points.first()?;
    let farthest_from = |origin: &Point<Real>| {
        let mut best = (0, 0.0);
        for (i, pt) in points.iter().enumerate() {
            let dist = na::distance_squared(origin, pt);
            if dist > best.1 {
                best = (i, dist);
            }
        }
        best.0
    };

    let a = farthest_from(first);
    let b = farthest_from(&points[a]);
    Some((a.min(b), a.max(b)))
}

// Below this distance two contact points, or a point and a plane, are considered coincident.
fn tolerance(points: &[Point<Real>]) -> Real {
    let scale = points
        .iter()
        .fold(1.0, |scale: Real, pt| scale.max(pt.coords.amax()));
    NEAR_ZERO * scale
}

/// The dimension of the affine space spanned by a set of points.
///
/// Returns 0 if all the points coincide (or if the set is empty), 1 if they are collinear, 2 if
/// they are coplanar, and 3 otherwise.
pub fn calc_dimensionality(points: &[Point<Real>]) -> usize {
    let Some(origin) = points.first() else {
        return 0;
    };

    let eps = tolerance(points);

    let Some((_, dir)) = points
        .iter()
        .map(|pt| pt - origin)
        .map(|d| (d.norm(), d))
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .filter(|(len, _)| *len > eps)
    else {
        return 0;
    };
    let dir = dir.normalize();

    let Some((_, offset)) = points
        .iter()
        .map(|pt| {
            let d = pt - origin;
            d - dir * d.dot(&dir)
        })
        .map(|d| (d.norm(), d))
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .filter(|(len, _)| *len > eps)
    else {
        return 1;
    };

    let normal = dir.cross(&offset.normalize());

    if points
        .iter()
        .all(|pt| (pt - origin).dot(&normal).abs() <= eps)
    {
        2
    } else {
        3
    }
}
