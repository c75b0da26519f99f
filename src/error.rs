//! Error types for crossfield.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`FieldError`].
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors that can occur during mesh construction or field computation.
#[derive(Error, Debug)]
pub enum FieldError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has duplicate vertex indices (degenerate triangle).
    #[error("face {face} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// A directed edge is claimed by more than one face.
    #[error("edge ({v0}, {v1}) is claimed by more than one face")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// A face classified as boundary has no boundary edge to take a
    /// direction from.
    #[error("boundary face {face} has no boundary edge")]
    MissingBoundaryDirection {
        /// The face index.
        face: usize,
    },

    /// A face is neither on the boundary nor edge-adjacent to any other
    /// face, so its matrix row would be identically zero.
    #[error("face {face} is isolated (no boundary edge and no edge-adjacent neighbor)")]
    IsolatedFace {
        /// The face index.
        face: usize,
    },

    /// Sparse factorization of the field system failed.
    #[error("field system is singular or could not be factored")]
    SingularSystem,

    /// The solver produced a non-finite value.
    #[error("solution for face {face} is not finite")]
    NonFiniteSolution {
        /// The face index.
        face: usize,
    },
}
