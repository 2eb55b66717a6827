//! Contact determination between two geometries over the time window of their first impact.

use crate::contact::ContactEvent;
use crate::math::{Point, Real, Vector};
use crate::pipeline::{BodySet, CollisionGeometry, GeometryHandle};
use crate::query::{
    intersection_segment_thick_triangle, time_of_impact_point_moving_triangle,
    time_of_impact_swept_segment_triangle,
};
use crate::shape::{Segment, Triangle};

/// The interval `[t, t + h]` of a time step, in fractions of the step, bracketing a first impact.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct ContactWindow {
    /// The last known contact-free time.
    pub t: Real,
    /// The length of the window.
    pub h: Real,
    /// The length of the window, in seconds.
    pub duration: Real,
    /// The half-thickness of the triangles hit by moving vertices.
    pub isect_tolerance: Real,
}

impl ContactWindow {
    // The time of an event happening at `frac` of the window.
    fn event_time(&self, frac: Real) -> Real {
        self.t + frac.clamp(0.0, 1.0) * self.h
    }
}

/// A geometry together with its handle.
#[derive(Copy, Clone)]
pub(crate) struct GeometryRef<'a> {
    pub handle: GeometryHandle,
    pub geom: &'a CollisionGeometry,
}

impl GeometryRef<'_> {
    fn world_triangle(&self, i: u32) -> Triangle {
        self.geom.mesh().triangle(i).transformed(self.geom.position())
    }

    fn world_vertices(&self) -> impl Iterator<Item = Point<Real>> + '_ {
        let pos = self.geom.position();
        self.geom.mesh().vertices().iter().map(move |v| pos * v)
    }
}

// Creates the contact where `a` hits the face `triangle` of `b`. The contact always reports
// `first` as its first geometry.
fn push_contact(
    out: &mut Vec<ContactEvent>,
    first: GeometryRef,
    a: GeometryRef,
    b: GeometryRef,
    t: Real,
    point: Point<Real>,
    relative_velocity: &Vector<Real>,
    triangle: &Triangle,
) {
    let mut contact = ContactEvent::new_contact(
        t,
        a.handle,
        b.handle,
        a.geom.body(),
        b.geom.body(),
        point,
        relative_velocity,
        triangle,
    );

    if a.handle != first.handle {
        contact.flip();
    }

    log::trace!(
        "contact at t = {} between {:?} and {:?}: {}",
        contact.t,
        contact.geom1,
        contact.geom2,
        contact.point
    );
    out.push(contact);
}

// Velocity of the point of `a` located at `pt` relative to `b`.
fn relative_velocity(
    bodies: &impl BodySet,
    a: GeometryRef,
    b: GeometryRef,
    pt: &Point<Real>,
) -> Vector<Real> {
    bodies.point_velocity(a.geom.body(), pt) - bodies.point_velocity(b.geom.body(), pt)
}

/// Contacts between two rigid geometries.
///
/// `candidates` are the pairs of triangles of `g1` and `g2` intersecting at the end of the
/// window. Each vertex of a candidate triangle is swept along its velocity relative to the other
/// body and tested against the other triangle. If no vertex hits anything, the edges of the
/// candidate triangles are swept instead. If that fails too, the edges of each triangle crossing
/// the other at the end of the window yield contacts at the end of the window.
pub(crate) fn determine_contacts_rigid(
    g1: GeometryRef,
    g2: GeometryRef,
    candidates: &[(u32, u32)],
    bodies: &impl BodySet,
    window: &ContactWindow,
    out: &mut Vec<ContactEvent>,
) {
    let start = out.len();
    let triangles: Vec<_> = candidates
        .iter()
        .map(|(i1, i2)| (g1.world_triangle(*i1), g2.world_triangle(*i2)))
        .collect();

    for (tri1, tri2) in &triangles {
        vertex_sweeps(g1, g1, g2, tri1, tri2, bodies, window, out);
        vertex_sweeps(g1, g2, g1, tri2, tri1, bodies, window, out);
    }

    if out.len() == start {
        log::debug!(
            "no vertex contact between {:?} and {:?}, sweeping edges",
            g1.handle,
            g2.handle
        );

        for (tri1, tri2) in &triangles {
            edge_sweeps(g1, g1, g2, tri1, tri2, bodies, window, out);
            edge_sweeps(g1, g2, g1, tri2, tri1, bodies, window, out);
        }
    }

    if out.len() == start {
        log::debug!(
            "no swept contact between {:?} and {:?}, using the final crossings",
            g1.handle,
            g2.handle
        );

        for (tri1, tri2) in &triangles {
            final_crossings(g1, g1, g2, tri1, tri2, bodies, window, out);
            final_crossings(g1, g2, g1, tri2, tri1, bodies, window, out);
        }
    }
}

// The vertices of `tri_a`, moving with `a`, against `tri_b`, moving with `b`.
fn vertex_sweeps(
    first: GeometryRef,
    a: GeometryRef,
    b: GeometryRef,
    tri_a: &Triangle,
    tri_b: &Triangle,
    bodies: &impl BodySet,
    window: &ContactWindow,
    out: &mut Vec<ContactEvent>,
) {
    for vtx in tri_a.vertices() {
        let relvel = relative_velocity(bodies, a, b, &vtx);
        let sweep = Segment::from_displacement(vtx, &(relvel * window.duration));

        if let Some(hit) =
            intersection_segment_thick_triangle(&sweep, tri_b, window.isect_tolerance)
        {
            push_contact(
                out,
                first,
                a,
                b,
                window.event_time(hit.param),
                hit.point,
                &relvel,
                tri_b,
            );
        }
    }
}

fn edge_sweeps(
    first: GeometryRef,
    a: GeometryRef,
    b: GeometryRef,
    tri_a: &Triangle,
    tri_b: &Triangle,
    bodies: &impl BodySet,
    window: &ContactWindow,
    out: &mut Vec<ContactEvent>,
) {
    for edge in tri_a.edges() {
        let relvel = relative_velocity(bodies, a, b, &edge.center());
        let displacement = relvel * window.duration;

        let hit = time_of_impact_swept_segment_triangle(
            &edge,
            &displacement,
            tri_b,
            window.isect_tolerance,
        );

        if let Some(hit) = hit {
            push_contact(
                out,
                first,
                a,
                b,
                window.event_time(hit.toi),
                hit.point,
                &relvel,
                tri_b,
            );
        }
    }
}

fn final_crossings(
    first: GeometryRef,
    a: GeometryRef,
    b: GeometryRef,
    tri_a: &Triangle,
    tri_b: &Triangle,
    bodies: &impl BodySet,
    window: &ContactWindow,
    out: &mut Vec<ContactEvent>,
) {
    let vels = tri_a
        .vertices()
        .map(|vtx| relative_velocity(bodies, a, b, &vtx));
    let moved = tri_a.moved(&vels, window.duration);

    for edge in moved.edges() {
        if let Some(hit) = intersection_segment_thick_triangle(&edge, tri_b, window.isect_tolerance)
        {
            let relvel = relative_velocity(bodies, a, b, &hit.point);
            push_contact(
                out,
                first,
                a,
                b,
                window.event_time(1.0),
                hit.point,
                &relvel,
                tri_b,
            );
        }
    }
}

/// Contacts between the vertices of `a` and the static (rigid) triangles of `b`.
///
/// Each vertex is swept along its velocity relative to `b` and tested against every triangle of
/// `b` thickened by the intersection tolerance.
pub(crate) fn determine_contacts_points_rigid(
    first: GeometryRef,
    a: GeometryRef,
    b: GeometryRef,
    bodies: &impl BodySet,
    window: &ContactWindow,
    out: &mut Vec<ContactEvent>,
) {
    let triangles: Vec<_> = (0..b.geom.mesh().num_triangles() as u32)
        .map(|j| b.world_triangle(j))
        .collect();

    for vtx in a.world_vertices() {
        let relvel = relative_velocity(bodies, a, b, &vtx);
        let sweep = Segment::from_displacement(vtx, &(relvel * window.duration));
        log::trace!("testing vertex {} with relative velocity {}", vtx, relvel);

        for tri in &triangles {
            if let Some(hit) =
                intersection_segment_thick_triangle(&sweep, tri, window.isect_tolerance)
            {
                push_contact(
                    out,
                    first,
                    a,
                    b,
                    window.event_time(hit.param),
                    hit.point,
                    &relvel,
                    tri,
                );
            }
        }
    }
}

/// Contacts between the moving vertices of `a` and the moving triangles of `b`.
///
/// Both the vertices and the triangle corners move with their own constant velocities during
/// the window. If `a` and `b` are the same geometry, a vertex is never tested against the
/// triangles it belongs to.
pub(crate) fn determine_contacts_moving_points(
    first: GeometryRef,
    a: GeometryRef,
    b: GeometryRef,
    bodies: &impl BodySet,
    window: &ContactWindow,
    out: &mut Vec<ContactEvent>,
) {
    let self_check = a.handle == b.handle;
    let mesh_b = b.geom.mesh();
    let triangles: Vec<_> = (0..mesh_b.num_triangles() as u32)
        .map(|j| {
            let tri = b.world_triangle(j);
            let vels = tri
                .vertices()
                .map(|vtx| bodies.point_velocity(b.geom.body(), &vtx));
            (j, tri, vels)
        })
        .collect();

    for (i, vtx) in a.world_vertices().enumerate() {
        let pdot = bodies.point_velocity(a.geom.body(), &vtx);

        for (j, tri, vels) in &triangles {
            if self_check && mesh_b.triangle_has_vertex(*j, i as u32) {
                continue;
            }

            let Some(toi) =
                time_of_impact_point_moving_triangle(&vtx, &pdot, tri, vels, window.duration)
            else {
                continue;
            };

            let point = vtx + pdot * toi;
            let tri_at_toi = tri.moved(vels, toi);
            let relvel = pdot - (vels[0] + vels[1] + vels[2]) / 3.0;
            let frac = if window.duration > 0.0 {
                toi / window.duration
            } else {
                0.0
            };

            push_contact(
                out,
                first,
                a,
                b,
                window.event_time(frac),
                point,
                &relvel,
                &tri_at_toi,
            );
        }
    }
}
