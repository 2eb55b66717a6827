use impact3d::math::{GeneralizedVector, Isometry, Point, Real, Vector};
use impact3d::pipeline::{
    ArticulationHandle, BodyHandle, BodyKind, BodySet, StateMap, SuperBody, Velocity,
};
use impact3d::shape::TriMesh;

/// A minimal body container.
///
/// The generalized coordinates of a rigid body are its translation followed by its scaled
/// rotation axis. Those of a deformable body are the concatenated coordinates of its vertices.
#[derive(Default)]
pub struct TestBodies {
    bodies: Vec<TestBody>,
}

struct TestBody {
    kind: BodyKind,
    enabled: bool,
    articulation: Option<ArticulationHandle>,
    position: Isometry<Real>,
    velocity: Velocity,
    vertices: Vec<Point<Real>>,
    vertex_velocities: Vec<Vector<Real>>,
}

impl TestBodies {
    pub fn add_rigid(&mut self, position: Isometry<Real>) -> BodyHandle {
        self.push(TestBody {
            kind: BodyKind::Rigid,
            enabled: true,
            articulation: None,
            position,
            velocity: Velocity::zero(),
            vertices: vec![],
            vertex_velocities: vec![],
        })
    }

    pub fn add_link(&mut self, articulation: ArticulationHandle) -> BodyHandle {
        let body = self.add_rigid(Isometry::identity());
        self.bodies[body.0 as usize].articulation = Some(articulation);
        body
    }

    pub fn add_deformable(&mut self, mesh: &TriMesh) -> BodyHandle {
        self.push(TestBody {
            kind: BodyKind::Deformable,
            enabled: true,
            articulation: None,
            position: Isometry::identity(),
            velocity: Velocity::zero(),
            vertices: mesh.vertices().to_vec(),
            vertex_velocities: vec![Vector::zeros(); mesh.vertices().len()],
        })
    }

    pub fn set_enabled(&mut self, body: BodyHandle, enabled: bool) {
        self.bodies[body.0 as usize].enabled = enabled;
    }

    fn push(&mut self, body: TestBody) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() as u32 - 1)
    }

    fn body(&self, body: BodyHandle) -> &TestBody {
        &self.bodies[body.0 as usize]
    }

    fn single(&mut self, body: SuperBody) -> &mut TestBody {
        match body {
            SuperBody::Single(handle) => &mut self.bodies[handle.0 as usize],
            SuperBody::Articulated(_) => panic!("articulations have no coordinates here"),
        }
    }
}

/// The generalized coordinates of a rigid body with the given translation and no rotation.
pub fn rigid_state(translation: Vector<Real>) -> GeneralizedVector {
    GeneralizedVector::from_row_slice(&[translation.x, translation.y, translation.z, 0.0, 0.0, 0.0])
}

/// The generalized coordinates of a deformable body with the given vertices.
pub fn deformable_state(vertices: &[Point<Real>]) -> GeneralizedVector {
    GeneralizedVector::from_iterator(
        3 * vertices.len(),
        vertices.iter().flat_map(|pt| pt.coords.iter().copied()),
    )
}

pub fn state_map(states: Vec<(BodyHandle, GeneralizedVector)>) -> StateMap {
    states
        .into_iter()
        .map(|(body, q)| (SuperBody::Single(body), q))
        .collect()
}

fn vector_at(q: &GeneralizedVector, i: usize) -> Vector<Real> {
    Vector::new(q[i], q[i + 1], q[i + 2])
}

impl BodySet for TestBodies {
    fn body_kind(&self, body: BodyHandle) -> BodyKind {
        self.body(body).kind
    }

    fn is_enabled(&self, body: BodyHandle) -> bool {
        self.body(body).enabled
    }

    fn super_body(&self, body: BodyHandle) -> SuperBody {
        match self.body(body).articulation {
            Some(articulation) => SuperBody::Articulated(articulation),
            None => SuperBody::Single(body),
        }
    }

    fn articulation_links(&self, articulation: ArticulationHandle) -> Vec<BodyHandle> {
        (0..self.bodies.len() as u32)
            .map(BodyHandle)
            .filter(|b| self.body(*b).articulation == Some(articulation))
            .collect()
    }

    fn position(&self, body: BodyHandle) -> Isometry<Real> {
        self.body(body).position
    }

    fn velocity(&self, body: BodyHandle) -> Velocity {
        self.body(body).velocity
    }

    fn acceleration(&self, _: BodyHandle) -> Velocity {
        Velocity::zero()
    }

    fn point_velocity(&self, body: BodyHandle, point: &Point<Real>) -> Vector<Real> {
        let body = self.body(body);

        match body.kind {
            BodyKind::Rigid => {
                let origin = Point::from(body.position.translation.vector);
                body.velocity.shift_to(&origin, point).linvel
            }
            BodyKind::Deformable => body
                .vertices
                .iter()
                .zip(&body.vertex_velocities)
                .min_by(|a, b| {
                    na::distance_squared(a.0, point).total_cmp(&na::distance_squared(b.0, point))
                })
                .map(|(_, vel)| *vel)
                .unwrap_or_else(Vector::zeros),
        }
    }

    fn deformed_vertices(&self, body: BodyHandle) -> Option<Vec<Point<Real>>> {
        let body = self.body(body);
        (body.kind == BodyKind::Deformable).then(|| body.vertices.clone())
    }

    fn generalized_coordinates(&self, body: SuperBody) -> GeneralizedVector {
        let SuperBody::Single(handle) = body else {
            return GeneralizedVector::zeros(0);
        };
        let body = self.body(handle);

        match body.kind {
            BodyKind::Rigid => {
                let t = body.position.translation.vector;
                let r = body.position.rotation.scaled_axis();
                GeneralizedVector::from_row_slice(&[t.x, t.y, t.z, r.x, r.y, r.z])
            }
            BodyKind::Deformable => deformable_state(&body.vertices),
        }
    }

    fn set_generalized_coordinates(&mut self, body: SuperBody, q: &GeneralizedVector) {
        let body = self.single(body);

        match body.kind {
            BodyKind::Rigid => {
                body.position = Isometry::new(vector_at(q, 0), vector_at(q, 3));
            }
            BodyKind::Deformable => {
                for (i, vtx) in body.vertices.iter_mut().enumerate() {
                    *vtx = Point::from(vector_at(q, 3 * i));
                }
            }
        }
    }

    fn set_generalized_velocity(&mut self, body: SuperBody, qd: &GeneralizedVector) {
        let body = self.single(body);

        match body.kind {
            BodyKind::Rigid => {
                body.velocity = Velocity::new(vector_at(qd, 0), vector_at(qd, 3));
            }
            BodyKind::Deformable => {
                for (i, vel) in body.vertex_velocities.iter_mut().enumerate() {
                    *vel = vector_at(qd, 3 * i);
                }
            }
        }
    }
}

/// An axis-aligned cube of half-extent `half`, centered at the origin, with outward normals.
pub fn cube(half: Real) -> TriMesh {
    let vertices = (0..8)
        .map(|i| {
            Point::new(
                if i & 1 == 0 { -half } else { half },
                if i & 2 == 0 { -half } else { half },
                if i & 4 == 0 { -half } else { half },
            )
        })
        .collect();
    let indices = vec![
        [0, 2, 1],
        [1, 2, 3],
        [4, 5, 6],
        [5, 7, 6],
        [0, 1, 4],
        [1, 5, 4],
        [2, 6, 3],
        [3, 6, 7],
        [0, 4, 2],
        [2, 4, 6],
        [1, 3, 5],
        [3, 7, 5],
    ];

    TriMesh::new(vertices, indices).unwrap()
}

/// A square of half-extent `half` in the plane `z = height`, facing `+z`.
pub fn ground(half: Real, height: Real) -> TriMesh {
    let vertices = vec![
        Point::new(-half, -half, height),
        Point::new(half, -half, height),
        Point::new(half, half, height),
        Point::new(-half, half, height),
    ];
    TriMesh::new(vertices, vec![[0, 1, 2], [0, 2, 3]]).unwrap()
}
