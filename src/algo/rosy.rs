//! Rotation-symmetric (RoSy) direction field computation.
//!
//! Assigns each face of a planar triangle mesh a direction defined only up
//! to 90° rotation (a cross field of symmetry order 4), the usual
//! orientation guide for quad-dominant remeshing and texture alignment.
//!
//! The field is the solution of one global sparse linear system over the
//! complex numbers. Directions are encoded as `e^{i·4θ}`, which collapses
//! the four equivalent rotations of a cross onto a single complex value and
//! makes smoothness between differently-aligned neighbors a linear
//! constraint. Boundary faces are hard-constrained to the direction of
//! their boundary edge; interior faces are coupled to their edge-adjacent
//! neighbors by a Laplacian-style smoothness term. The system is factored
//! once with a sparse LU decomposition and each solution entry is decoded
//! back to an angle.
//!
//! # References
//!
//! - Ray, N., Vallet, B., Li, W. C., & Lévy, B. (2008). "N-symmetry
//!   direction field design." ACM Transactions on Graphics.

use std::marker::PhantomData;
use std::time::Instant;

use faer::linalg::solvers::Solve;
use faer::sparse::{SparseColMat, Triplet};
use faer::{c64, ColMut};
use log::debug;
use nalgebra::Vector2;

use crate::error::{FieldError, Result};
use crate::mesh::{FaceId, MeshIndex, PlanarMesh};

/// Symmetry order of the field: directions are equivalent under rotation
/// by 2π/4.
const SYMMETRY: f64 = 4.0;

/// A per-face direction field with 4-fold rotational symmetry.
///
/// Angles are radians against the +x axis, one per face, in face-index
/// order. Each angle is a representative in (−π/4, π/4]; the field value is
/// only meaningful modulo π/2, so consumers should compare angles through
/// that equivalence or work with [`cross_directions`].
///
/// [`cross_directions`]: RoSyField::cross_directions
#[derive(Debug, Clone)]
pub struct RoSyField<I: MeshIndex = u32> {
    /// Representative angle for each face.
    angles: Vec<f64>,

    /// Phantom data for the index type.
    _marker: PhantomData<I>,
}

impl<I: MeshIndex> RoSyField<I> {
    fn new(angles: Vec<f64>) -> Self {
        Self {
            angles,
            _marker: PhantomData,
        }
    }

    /// The representative angle for a face, in (−π/4, π/4].
    #[inline]
    pub fn angle(&self, f: FaceId<I>) -> f64 {
        self.angles[f.index()]
    }

    /// All angles, indexed by face.
    #[inline]
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// The number of faces in the field.
    #[inline]
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// Whether the field is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Iterate over all faces with their angles.
    pub fn iter(&self) -> impl Iterator<Item = (FaceId<I>, f64)> + '_ {
        self.angles
            .iter()
            .enumerate()
            .map(|(i, &a)| (FaceId::new(i), a))
    }

    /// The representative direction for a face as a unit vector.
    pub fn direction(&self, f: FaceId<I>) -> Vector2<f64> {
        let a = self.angle(f);
        Vector2::new(a.cos(), a.sin())
    }

    /// The four equivalent unit directions of the cross at a face.
    pub fn cross_directions(&self, f: FaceId<I>) -> [Vector2<f64>; 4] {
        let d = self.direction(f);
        let p = Vector2::new(-d.y, d.x);
        [d, p, -d, -p]
    }

    /// The member of the cross at `f` that points most nearly along `guide`.
    ///
    /// This is the query downstream remeshers use to trace the field
    /// coherently from face to face.
    pub fn matching_direction(&self, f: FaceId<I>, guide: &Vector2<f64>) -> Vector2<f64> {
        let mut best = self.direction(f);
        let mut best_dot = best.dot(guide);
        for d in self.cross_directions(f) {
            let dot = d.dot(guide);
            if dot > best_dot {
                best = d;
                best_dot = dot;
            }
        }
        best
    }
}

/// Compute the 4-RoSy direction field of a planar triangle mesh.
///
/// Boundary faces (faces with at least one boundary edge) are constrained
/// to the direction of their boundary edge; interior faces are smoothed
/// against their edge-adjacent neighbors. The resulting angles are
/// meaningful modulo π/2.
///
/// # Errors
///
/// - [`FieldError::EmptyMesh`] if the mesh has no faces
/// - [`FieldError::MissingBoundaryDirection`] if a boundary-classified face
///   has no boundary edge to take a direction from
/// - [`FieldError::IsolatedFace`] if a face is neither on the boundary nor
///   edge-adjacent to any other face
/// - [`FieldError::SingularSystem`] if the sparse factorization fails
/// - [`FieldError::NonFiniteSolution`] if the solver produces a non-finite
///   value
///
/// No partial results: any failure returns an error and no field.
///
/// # Example
///
/// ```
/// use crossfield::prelude::*;
/// use nalgebra::Point2;
///
/// let vertices = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.5, 1.0),
/// ];
/// let faces = vec![[0, 1, 2]];
/// let mesh: PlanarMesh = build_from_triangles(&vertices, &faces).unwrap();
///
/// let field = rosy_field(&mesh).unwrap();
/// assert_eq!(field.len(), 1);
/// ```
pub fn rosy_field<I: MeshIndex>(mesh: &PlanarMesh<I>) -> Result<RoSyField<I>> {
    let n = mesh.num_faces();
    if n == 0 {
        return Err(FieldError::EmptyMesh);
    }

    let start = Instant::now();

    // Classify once. Face indices double as matrix row/column indices, so
    // the face order supplied by the mesh is the row order of the system.
    let fixed: Vec<bool> = mesh.face_ids().map(|f| mesh.is_boundary_face(f)).collect();

    let mut triplets: Vec<Triplet<usize, usize, c64>> = Vec::new();
    let mut rhs = vec![c64::new(0.0, 0.0); n];

    for (i, f) in mesh.face_ids().enumerate() {
        if fixed[i] {
            // Hard constraint: pin the 4th-power representation to the
            // boundary direction.
            triplets.push(Triplet::new(i, i, c64::new(1.0, 0.0)));
            let dir = boundary_direction(mesh, f)
                .ok_or(FieldError::MissingBoundaryDirection { face: i })?;
            let alpha = axis_angle(&dir);
            rhs[i] += unit_polar(SYMMETRY * alpha);
        } else {
            // Smoothness: pull the representation toward each neighbor
            // across a shared edge, weight 2 per edge, unnormalized.
            let mut coupled = false;
            for j in mesh.adjacent_faces(f) {
                // Vertex adjacency is too wide; only neighbors across an
                // actual shared edge couple.
                if mesh.edge_between_faces(f, j).is_some() {
                    triplets.push(Triplet::new(i, i, c64::new(2.0, 0.0)));
                    triplets.push(Triplet::new(i, j.index(), c64::new(-2.0, 0.0)));
                    coupled = true;
                }
            }
            if !coupled {
                return Err(FieldError::IsolatedFace { face: i });
            }
        }
    }

    let boundary_count = fixed.iter().filter(|&&b| b).count();
    debug!(
        "assembled {n}x{n} field system: {boundary_count} boundary faces, {} interior, {} triplets",
        n - boundary_count,
        triplets.len()
    );

    // Repeated (i, i) triplets from the accumulation above are summed by
    // the constructor.
    let matrix = SparseColMat::<usize, c64>::try_new_from_triplets(n, n, &triplets)
        .map_err(|_| FieldError::SingularSystem)?;

    // Boundary rows break symmetry, so this needs a general LU
    // factorization rather than a Cholesky-class solver.
    let lu = matrix.sp_lu().map_err(|_| FieldError::SingularSystem)?;

    let mut solution = rhs;
    lu.solve_in_place(ColMut::from_slice_mut(&mut solution).as_mat_mut());

    // Undo the 4th-power encoding; each angle is one representative of the
    // π/2-equivalence class.
    let mut angles = Vec::with_capacity(n);
    for (i, z) in solution.iter().enumerate() {
        let angle = z.im.atan2(z.re) / SYMMETRY;
        if !angle.is_finite() {
            return Err(FieldError::NonFiniteSolution { face: i });
        }
        angles.push(angle);
    }

    debug!("solved RoSy field for {n} faces in {:?}", start.elapsed());

    Ok(RoSyField::new(angles))
}

/// The direction of the first boundary edge of a face, scanning its three
/// ordered vertex pairs in winding order.
fn boundary_direction<I: MeshIndex>(
    mesh: &PlanarMesh<I>,
    f: FaceId<I>,
) -> Option<Vector2<f64>> {
    let tri = mesh.face_triangle(f);
    for i in 0..3 {
        let (va, vb) = (tri[i], tri[(i + 1) % 3]);
        if let Some(edge) = mesh.edge_between_vertices(va, vb) {
            if mesh.is_boundary_edge(edge) {
                return Some(mesh.position(vb) - mesh.position(va));
            }
        }
    }
    None
}

/// Signed angle from the +x reference axis to `dir`, in (−π, π].
fn axis_angle(dir: &Vector2<f64>) -> f64 {
    let axis = Vector2::x();
    axis.perp(dir).atan2(axis.dot(dir))
}

/// Unit complex number at the given angle.
fn unit_polar(angle: f64) -> c64 {
    c64::new(angle.cos(), angle.sin())
}
