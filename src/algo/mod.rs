//! Field computation algorithms.
//!
//! This module contains the direction-field solvers:
//!
//! - **RoSy fields**: 4-fold rotation-symmetric (cross) fields guided by the
//!   mesh boundary
//!
//! Algorithms consume a read-only [`PlanarMesh`](crate::mesh::PlanarMesh)
//! and return an owned per-face result.

pub mod rosy;
