//! Mesh construction.
//!
//! Builds a [`PlanarMesh`] from a face-vertex list. Construction is the only
//! mutation path: the input is validated up front, connectivity is wired in
//! two passes, and the finished mesh is read-only.

use std::collections::HashMap;

use nalgebra::Point2;

use super::halfedge::{Face, HalfEdge, PlanarMesh};
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{FieldError, Result};

/// Build a planar half-edge mesh from vertices and triangles.
///
/// Faces keep the order they are given in: face `i` of the mesh is
/// `faces[i]`, with its vertices in the given winding order.
///
/// # Errors
///
/// - [`FieldError::EmptyMesh`] if `faces` is empty
/// - [`FieldError::InvalidVertexIndex`] if a face references a vertex out of
///   range
/// - [`FieldError::DegenerateFace`] if a face's vertices are not pairwise
///   distinct
/// - [`FieldError::NonManifoldEdge`] if a directed edge occurs in more than
///   one face
///
/// # Example
/// ```
/// use crossfield::mesh::{build_from_triangles, PlanarMesh};
/// use nalgebra::Point2;
///
/// let vertices = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.5, 1.0),
/// ];
/// let faces = vec![[0, 1, 2]];
///
/// let mesh: PlanarMesh = build_from_triangles(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point2<f64>],
    faces: &[[usize; 3]],
) -> Result<PlanarMesh<I>> {
    if faces.is_empty() {
        return Err(FieldError::EmptyMesh);
    }

    for (fi, face) in faces.iter().enumerate() {
        for &vi in face {
            if vi >= vertices.len() {
                return Err(FieldError::InvalidVertexIndex { face: fi, vertex: vi });
            }
        }
        if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
            return Err(FieldError::DegenerateFace { face: fi });
        }
    }

    let mut mesh = PlanarMesh::with_capacity(vertices.len(), faces.len());

    let vertex_ids: Vec<VertexId<I>> = vertices.iter().map(|&p| mesh.add_vertex(p)).collect();

    // Map from directed edge (v0, v1) to its half-edge.
    let mut edge_map: HashMap<(usize, usize), HalfEdgeId<I>> = HashMap::new();

    // First pass: create the half-edges and faces.
    for face in faces {
        let [v0, v1, v2] = *face;

        let he0 = HalfEdgeId::<I>::new(mesh.num_halfedges());
        let he1 = HalfEdgeId::<I>::new(mesh.num_halfedges() + 1);
        let he2 = HalfEdgeId::<I>::new(mesh.num_halfedges() + 2);

        for _ in 0..3 {
            mesh.halfedges.push(HalfEdge::new());
        }

        let face_id = FaceId::<I>::new(mesh.num_faces());
        mesh.faces.push(Face::new(he0));

        for (he, origin, next, prev) in [
            (he0, v0, he1, he2),
            (he1, v1, he2, he0),
            (he2, v2, he0, he1),
        ] {
            let h = mesh.halfedge_mut(he);
            h.origin = vertex_ids[origin];
            h.next = next;
            h.prev = prev;
            h.face = face_id;
        }

        // Anchor vertices (overwritten for shared vertices, fixed up later).
        mesh.vertex_mut(vertex_ids[v0]).halfedge = he0;
        mesh.vertex_mut(vertex_ids[v1]).halfedge = he1;
        mesh.vertex_mut(vertex_ids[v2]).halfedge = he2;

        for (a, b, he) in [(v0, v1, he0), (v1, v2, he1), (v2, v0, he2)] {
            if edge_map.insert((a, b), he).is_some() {
                return Err(FieldError::NonManifoldEdge { v0: a, v1: b });
            }
        }
    }

    // Second pass: link twins, creating boundary half-edges where the
    // reverse directed edge is absent.
    for (&(v0, v1), &he) in &edge_map {
        if let Some(&twin) = edge_map.get(&(v1, v0)) {
            mesh.halfedge_mut(he).twin = twin;
        } else {
            let boundary_he = HalfEdgeId::<I>::new(mesh.num_halfedges());
            mesh.halfedges.push(HalfEdge::new());

            mesh.halfedge_mut(he).twin = boundary_he;
            let bhe = mesh.halfedge_mut(boundary_he);
            bhe.origin = vertex_ids[v1];
            bhe.twin = he;
            // Face stays invalid (boundary).
        }
    }

    link_boundary_loops(&mut mesh);
    fix_boundary_vertex_halfedges(&mut mesh);

    Ok(mesh)
}

/// Link boundary half-edges into loops.
fn link_boundary_loops<I: MeshIndex>(mesh: &mut PlanarMesh<I>) {
    let boundary_hes: Vec<HalfEdgeId<I>> = mesh
        .halfedge_ids()
        .filter(|&he| mesh.is_boundary_halfedge(he))
        .collect();

    // Index outgoing boundary half-edges by origin vertex.
    let mut outgoing: HashMap<usize, HalfEdgeId<I>> = HashMap::new();
    for &he in &boundary_hes {
        outgoing.insert(mesh.origin(he).index(), he);
    }

    for &he in &boundary_hes {
        let dest = mesh.dest(he).index();
        if let Some(&next_he) = outgoing.get(&dest) {
            mesh.halfedge_mut(he).next = next_he;
            mesh.halfedge_mut(next_he).prev = he;
        }
    }
}

/// Point boundary vertices at an outgoing boundary half-edge so vertex
/// circulation visits the full one-ring.
fn fix_boundary_vertex_halfedges<I: MeshIndex>(mesh: &mut PlanarMesh<I>) {
    for vid in mesh.vertex_ids().collect::<Vec<_>>() {
        let start_he = mesh.vertex(vid).halfedge;
        if !start_he.is_valid() {
            continue;
        }

        let mut he = start_he;
        loop {
            if mesh.is_boundary_halfedge(he) {
                mesh.vertex_mut(vid).halfedge = he;
                break;
            }
            he = mesh.next(mesh.twin(he));
            if he == start_he {
                break;
            }
        }
    }
}
