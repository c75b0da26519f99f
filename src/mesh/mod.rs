//! Planar mesh data structures.
//!
//! This module provides the half-edge representation of a triangulated 2D
//! region and the query interface the field solver consumes: positions,
//! boundary predicates, edge lookup between vertices, and face adjacency
//! with edge confirmation.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//! - [`EdgeId`] - Identifies an undirected edge
//!
//! The wrappers are generic over the underlying integer type (the
//! [`MeshIndex`] trait), allowing `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! Meshes are built from face-vertex lists and are read-only afterwards:
//!
//! ```
//! use crossfield::mesh::{build_from_triangles, PlanarMesh};
//! use nalgebra::Point2;
//!
//! let vertices = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.5, 1.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: PlanarMesh = build_from_triangles(&vertices, &faces).unwrap();
//! ```

mod builder;
mod halfedge;
mod index;

pub use builder::build_from_triangles;
pub use halfedge::{Face, HalfEdge, PlanarMesh, Vertex};
pub use index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
