//! Half-edge mesh data structure for planar triangle meshes.
//!
//! This module provides a half-edge (doubly-connected edge list)
//! representation for triangulated 2D regions. The structure gives O(1)
//! adjacency queries, which is what the field solver needs: boundary tests,
//! edge lookup between vertices, and face-to-face adjacency with edge
//! confirmation.
//!
//! # Structure
//!
//! - Each undirected edge is split into two **half-edges** pointing in
//!   opposite directions
//! - Each half-edge knows its **twin**, **next** (counter-clockwise around
//!   the face), **prev**, **origin vertex**, and **incident face**
//! - Each vertex stores one outgoing half-edge
//! - Each face stores one half-edge on its boundary
//!
//! # Boundary Handling
//!
//! Boundary half-edges have an invalid face id; their twins are the interior
//! half-edges. Boundary loops are traversable through the `next` pointers of
//! boundary half-edges.
//!
//! # Edges
//!
//! An undirected edge is named by an [`EdgeId`] derived from the
//! lower-indexed of its two half-edges, so lookups from either direction
//! agree. The mesh is read-only once built; all mutation is internal to the
//! builder.

use nalgebra::{Point2, Vector2};

use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};

/// A vertex in the mesh.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 2D position of this vertex.
    pub position: Point2<f64>,

    /// One outgoing half-edge from this vertex.
    /// For boundary vertices, this is guaranteed to be a boundary half-edge.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create a new vertex at the given position.
    pub fn new(position: Point2<f64>) -> Self {
        Self {
            position,
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge originates from.
    pub origin: VertexId<I>,

    /// The opposite half-edge.
    pub twin: HalfEdgeId<I>,

    /// The next half-edge around the face (counter-clockwise).
    pub next: HalfEdgeId<I>,

    /// The previous half-edge around the face.
    pub prev: HalfEdgeId<I>,

    /// The face this half-edge belongs to. Invalid for boundary half-edges.
    pub face: FaceId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create a new uninitialized half-edge.
    pub fn new() -> Self {
        Self {
            origin: VertexId::invalid(),
            twin: HalfEdgeId::invalid(),
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
        }
    }

    /// Whether this half-edge lies on the mesh boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.face.is_valid()
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// A face in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// One half-edge on the boundary of this face.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a new face with the given half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge }
    }
}

/// A planar half-edge triangle mesh.
///
/// Face indices are dense and stable: face `i` is the `i`-th triangle passed
/// to the builder. This ordering is part of the contract: the field solver
/// uses face indices directly as matrix row/column indices.
#[derive(Debug, Clone)]
pub struct PlanarMesh<I: MeshIndex = u32> {
    /// All vertices in the mesh.
    pub(crate) vertices: Vec<Vertex<I>>,

    /// All half-edges in the mesh.
    pub(crate) halfedges: Vec<HalfEdge<I>>,

    /// All faces in the mesh.
    pub(crate) faces: Vec<Face<I>>,
}

impl<I: MeshIndex> Default for PlanarMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> PlanarMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            halfedges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub(crate) fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        // 3 half-edges per triangle plus boundary half-edges.
        let num_halfedges = num_faces * 3 + num_faces / 2;
        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_halfedges),
            faces: Vec::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// The number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The number of half-edges.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// The number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by id.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    #[inline]
    pub(crate) fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[id.index()]
    }

    /// Get a half-edge by id.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    #[inline]
    pub(crate) fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    /// Get a face by id.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point2<f64> {
        &self.vertex(v).position
    }

    pub(crate) fn add_vertex(&mut self, position: Point2<f64>) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        id
    }

    // ==================== Topology Queries ====================

    /// The twin (opposite) half-edge.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).twin
    }

    /// The next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// The previous half-edge around the face.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// The origin vertex of a half-edge.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).origin
    }

    /// The destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.origin(self.twin(he))
    }

    /// The face a half-edge belongs to. Invalid for boundary half-edges.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Whether a half-edge lies on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Whether a vertex lies on the boundary.
    pub fn is_boundary_vertex(&self, v: VertexId<I>) -> bool {
        let start = self.vertex(v).halfedge;
        if !start.is_valid() {
            return true; // Isolated vertex
        }

        let mut he = start;
        loop {
            if self.is_boundary_halfedge(he) || self.is_boundary_halfedge(self.twin(he)) {
                return true;
            }
            he = self.next(self.twin(he));
            if he == start {
                break;
            }
        }
        false
    }

    /// Whether a face touches the mesh boundary through one of its edges.
    pub fn is_boundary_face(&self, f: FaceId<I>) -> bool {
        self.face_halfedges(f)
            .any(|he| self.is_boundary_halfedge(self.twin(he)))
    }

    // ==================== Edge Queries ====================

    /// The canonical edge id of a half-edge (shared with its twin).
    #[inline]
    pub fn edge_of(&self, he: HalfEdgeId<I>) -> EdgeId<I> {
        let twin = self.twin(he);
        EdgeId::new(he.index().min(twin.index()))
    }

    /// The canonical half-edge of an edge.
    #[inline]
    pub fn halfedge_of_edge(&self, e: EdgeId<I>) -> HalfEdgeId<I> {
        HalfEdgeId::new(e.index())
    }

    /// The two endpoint vertices of an edge.
    pub fn edge_endpoints(&self, e: EdgeId<I>) -> (VertexId<I>, VertexId<I>) {
        let he = self.halfedge_of_edge(e);
        (self.origin(he), self.dest(he))
    }

    /// Whether an edge lies on the boundary (has only one incident face).
    pub fn is_boundary_edge(&self, e: EdgeId<I>) -> bool {
        let he = self.halfedge_of_edge(e);
        self.is_boundary_halfedge(he) || self.is_boundary_halfedge(self.twin(he))
    }

    /// Find the edge connecting two vertices, if one exists.
    pub fn edge_between_vertices(&self, va: VertexId<I>, vb: VertexId<I>) -> Option<EdgeId<I>> {
        for he in self.vertex_halfedges(va) {
            if self.dest(he) == vb {
                return Some(self.edge_of(he));
            }
        }
        None
    }

    /// Find the edge shared by two faces, if they are edge-adjacent.
    pub fn edge_between_faces(&self, fa: FaceId<I>, fb: FaceId<I>) -> Option<EdgeId<I>> {
        for he in self.face_halfedges(fa) {
            if self.face_of(self.twin(he)) == fb {
                return Some(self.edge_of(he));
            }
        }
        None
    }

    /// Faces sharing at least one vertex with `f`, excluding `f` itself.
    ///
    /// This is the wider vertex-adjacency set; callers that need edge
    /// adjacency must confirm with [`edge_between_faces`]. Order is the
    /// deterministic traversal order of the face's corners.
    ///
    /// [`edge_between_faces`]: PlanarMesh::edge_between_faces
    pub fn adjacent_faces(&self, f: FaceId<I>) -> Vec<FaceId<I>> {
        let mut result = Vec::new();
        for v in self.face_triangle(f) {
            for g in self.vertex_faces(v) {
                if g != f && !result.contains(&g) {
                    result.push(g);
                }
            }
        }
        result
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex ids.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all half-edge ids.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all face ids.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over the outgoing half-edges of a vertex.
    pub fn vertex_halfedges(&self, v: VertexId<I>) -> VertexHalfEdgeIter<'_, I> {
        VertexHalfEdgeIter::new(self, v)
    }

    /// Iterate over the faces incident to a vertex.
    pub fn vertex_faces(&self, v: VertexId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.vertex_halfedges(v).filter_map(|he| {
            let f = self.face_of(he);
            if f.is_valid() {
                Some(f)
            } else {
                None
            }
        })
    }

    /// Iterate over the half-edges around a face.
    pub fn face_halfedges(&self, f: FaceId<I>) -> FaceHalfEdgeIter<'_, I> {
        FaceHalfEdgeIter::new(self, f)
    }

    /// The three vertices of a face, in winding order.
    pub fn face_triangle(&self, f: FaceId<I>) -> [VertexId<I>; 3] {
        let he0 = self.face(f).halfedge;
        let he1 = self.next(he0);
        let he2 = self.next(he1);
        [self.origin(he0), self.origin(he1), self.origin(he2)]
    }

    /// The positions of the three vertices of a face, in winding order.
    pub fn face_positions(&self, f: FaceId<I>) -> [Point2<f64>; 3] {
        let [v0, v1, v2] = self.face_triangle(f);
        [*self.position(v0), *self.position(v1), *self.position(v2)]
    }

    // ==================== Geometry ====================

    /// The signed area of a face (positive for counter-clockwise winding).
    pub fn face_signed_area(&self, f: FaceId<I>) -> f64 {
        let [p0, p1, p2] = self.face_positions(f);
        0.5 * (p1 - p0).perp(&(p2 - p0))
    }

    /// The (unsigned) area of a face.
    pub fn face_area(&self, f: FaceId<I>) -> f64 {
        self.face_signed_area(f).abs()
    }

    /// The centroid of a face.
    pub fn face_centroid(&self, f: FaceId<I>) -> Point2<f64> {
        let [p0, p1, p2] = self.face_positions(f);
        Point2::from((p0.coords + p1.coords + p2.coords) / 3.0)
    }

    /// The vector from a half-edge's origin to its destination.
    pub fn edge_vector(&self, he: HalfEdgeId<I>) -> Vector2<f64> {
        self.position(self.dest(he)) - self.position(self.origin(he))
    }

    /// The length of an edge.
    pub fn edge_length(&self, e: EdgeId<I>) -> f64 {
        self.edge_vector(self.halfedge_of_edge(e)).norm()
    }

    // ==================== Validation ====================

    /// Check that all connectivity is consistent.
    pub fn is_valid(&self) -> bool {
        for (vi, v) in self.vertices.iter().enumerate() {
            if v.halfedge.is_valid() && self.halfedge(v.halfedge).origin.index() != vi {
                return false;
            }
        }

        for (hi, he) in self.halfedges.iter().enumerate() {
            if he.twin.is_valid() && self.halfedge(he.twin).twin.index() != hi {
                return false;
            }
            if he.next.is_valid() && self.halfedge(he.next).prev.index() != hi {
                return false;
            }
            if he.prev.is_valid() && self.halfedge(he.prev).next.index() != hi {
                return false;
            }
        }

        for f in &self.faces {
            if !f.halfedge.is_valid() {
                return false;
            }
        }

        true
    }
}

/// Iterator over the outgoing half-edges of a vertex.
pub struct VertexHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a PlanarMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> VertexHalfEdgeIter<'a, I> {
    fn new(mesh: &'a PlanarMesh<I>, v: VertexId<I>) -> Self {
        let start = mesh.vertex(v).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<I: MeshIndex> Iterator for VertexHalfEdgeIter<'_, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = self.current;
        let next = self.mesh.next(self.mesh.twin(current));
        if next == self.start || !next.is_valid() {
            self.done = true;
        } else {
            self.current = next;
        }
        Some(current)
    }
}

/// Iterator over the half-edges around a face.
pub struct FaceHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a PlanarMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> FaceHalfEdgeIter<'a, I> {
    fn new(mesh: &'a PlanarMesh<I>, f: FaceId<I>) -> Self {
        let start = mesh.face(f).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<I: MeshIndex> Iterator for FaceHalfEdgeIter<'_, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = self.current;
        let next = self.mesh.next(current);
        if next == self.start || !next.is_valid() {
            self.done = true;
        } else {
            self.current = next;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_triangles;

    fn two_triangles() -> PlanarMesh<u32> {
        // Unit square split along the diagonal (0, 2).
        let vertices = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let faces = vec![[0, 1, 2], [0, 2, 3]];
        build_from_triangles(&vertices, &faces).unwrap()
    }

    #[test]
    fn test_counts() {
        let mesh = two_triangles();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
        // 6 interior half-edges + 4 boundary half-edges
        assert_eq!(mesh.num_halfedges(), 10);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_face_triangle_winding() {
        let mesh = two_triangles();
        let tri = mesh.face_triangle(FaceId::new(0));
        assert_eq!([tri[0].index(), tri[1].index(), tri[2].index()], [0, 1, 2]);
    }

    #[test]
    fn test_edge_between_vertices() {
        let mesh = two_triangles();
        let diag = mesh.edge_between_vertices(VertexId::new(0), VertexId::new(2));
        assert!(diag.is_some());
        assert!(!mesh.is_boundary_edge(diag.unwrap()));

        // Lookup agrees from both directions.
        let diag_rev = mesh.edge_between_vertices(VertexId::new(2), VertexId::new(0));
        assert_eq!(diag, diag_rev);

        // (1, 3) is not an edge of this triangulation.
        assert!(mesh
            .edge_between_vertices(VertexId::new(1), VertexId::new(3))
            .is_none());
    }

    #[test]
    fn test_boundary_classification() {
        let mesh = two_triangles();
        let bottom = mesh
            .edge_between_vertices(VertexId::new(0), VertexId::new(1))
            .unwrap();
        assert!(mesh.is_boundary_edge(bottom));

        for f in mesh.face_ids() {
            assert!(mesh.is_boundary_face(f));
        }
        for v in mesh.vertex_ids() {
            assert!(mesh.is_boundary_vertex(v));
        }
    }

    #[test]
    fn test_edge_between_faces() {
        let mesh = two_triangles();
        let shared = mesh.edge_between_faces(FaceId::new(0), FaceId::new(1));
        assert!(shared.is_some());

        let (a, b) = mesh.edge_endpoints(shared.unwrap());
        let mut endpoints = [a.index(), b.index()];
        endpoints.sort();
        assert_eq!(endpoints, [0, 2]);

        // Symmetric.
        let shared_rev = mesh.edge_between_faces(FaceId::new(1), FaceId::new(0));
        assert_eq!(shared, shared_rev);
    }

    #[test]
    fn test_adjacent_faces() {
        let mesh = two_triangles();
        let adj = mesh.adjacent_faces(FaceId::new(0));
        assert_eq!(adj, vec![FaceId::new(1)]);
    }

    #[test]
    fn test_adjacent_faces_vertex_only_neighbor() {
        // Fan of three triangles around hub vertex 0: the first and last
        // faces share only the hub, so they are vertex-adjacent but not
        // edge-adjacent.
        let vertices = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 1.0),
        ];
        let faces = vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]];
        let mesh: PlanarMesh<u32> = build_from_triangles(&vertices, &faces).unwrap();

        let adj = mesh.adjacent_faces(FaceId::new(0));
        assert_eq!(adj.len(), 2);
        assert!(adj.contains(&FaceId::new(1)));
        assert!(adj.contains(&FaceId::new(2)));

        assert!(mesh
            .edge_between_faces(FaceId::new(0), FaceId::new(1))
            .is_some());
        assert!(mesh
            .edge_between_faces(FaceId::new(0), FaceId::new(2))
            .is_none());
    }

    #[test]
    fn test_geometry() {
        let mesh = two_triangles();
        let f = FaceId::new(0);

        assert!((mesh.face_area(f) - 0.5).abs() < 1e-12);
        // CCW winding gives positive signed area.
        assert!(mesh.face_signed_area(f) > 0.0);

        let c = mesh.face_centroid(f);
        assert!((c.x - 2.0 / 3.0).abs() < 1e-12);
        assert!((c.y - 1.0 / 3.0).abs() < 1e-12);

        let diag = mesh
            .edge_between_vertices(VertexId::new(0), VertexId::new(2))
            .unwrap();
        assert!((mesh.edge_length(diag) - 2.0_f64.sqrt()).abs() < 1e-12);
    }
}
