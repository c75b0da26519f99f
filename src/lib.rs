//! # Crossfield
//!
//! Rotation-symmetric (RoSy) direction fields on planar triangle meshes.
//!
//! Crossfield computes a 4-fold rotation-symmetric direction field (a
//! *cross field*) over the faces of a triangulated 2D region. Each face
//! receives one direction defined only up to 90° rotation, which is the
//! standard orientation guide for quad-dominant remeshing and
//! texture-alignment pipelines.
//!
//! ## How it works
//!
//! Boundary faces are pinned to the direction of the mesh boundary;
//! interior faces are coupled to their edge-adjacent neighbors through
//! smoothness constraints. Directions are encoded as `e^{i·4θ}` so the four
//! equivalent rotations collapse to one complex value, the whole mesh
//! becomes a single sparse complex linear system, and one LU factorization
//! solves it.
//!
//! ## Quick Start
//!
//! ```
//! use crossfield::prelude::*;
//! use nalgebra::Point2;
//!
//! // A unit square split into two triangles.
//! let vertices = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let faces = vec![[0, 1, 2], [0, 2, 3]];
//!
//! let mesh: PlanarMesh = build_from_triangles(&vertices, &faces).unwrap();
//! let field = rosy_field(&mesh).unwrap();
//!
//! assert_eq!(field.len(), mesh.num_faces());
//! for (face, angle) in field.iter() {
//!     println!("face {:?}: {:.3} rad (mod π/2)", face, angle);
//! }
//! ```
//!
//! ## Mesh Queries
//!
//! The mesh is a half-edge structure with O(1) adjacency queries; it is
//! built once from a face-vertex list and read-only afterwards:
//!
//! ```
//! use crossfield::prelude::*;
//! use nalgebra::Point2;
//!
//! # let vertices = vec![
//! #     Point2::new(0.0, 0.0),
//! #     Point2::new(1.0, 0.0),
//! #     Point2::new(0.5, 1.0),
//! # ];
//! # let faces = vec![[0, 1, 2]];
//! # let mesh: PlanarMesh = build_from_triangles(&vertices, &faces).unwrap();
//! let f = FaceId::new(0);
//! assert!(mesh.is_boundary_face(f));
//!
//! let [v0, v1, _v2] = mesh.face_triangle(f);
//! let edge = mesh.edge_between_vertices(v0, v1).unwrap();
//! assert!(mesh.is_boundary_edge(edge));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use crossfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::rosy::{rosy_field, RoSyField};
    pub use crate::error::{FieldError, Result};
    pub use crate::mesh::{
        build_from_triangles, EdgeId, FaceId, HalfEdgeId, MeshIndex, PlanarMesh, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point2;

    #[test]
    fn test_end_to_end() {
        let vertices = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let faces = vec![[0, 1, 2], [0, 2, 3]];

        let mesh: PlanarMesh = build_from_triangles(&vertices, &faces).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
        assert!(mesh.is_valid());

        let field = rosy_field(&mesh).unwrap();
        assert_eq!(field.len(), 2);
        for (_, angle) in field.iter() {
            assert!(angle.is_finite());
        }
    }
}
