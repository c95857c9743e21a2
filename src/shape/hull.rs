use crate::math::{Point, Real, Tangent, TexCoord, Vector};
use crate::shape::{HullBuilderError, HullEdge, HullPoint, HullTriangle, MeshBuffers};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::{HashablePartialEq, SortedPair};

/// A closed triangulated surface together with its vertex attribute buffers.
///
/// The hull stores two layers of data:
/// - the render-facing vertex attributes (positions, normals, tangents and optional
///   texture coordinates), indexed by vertex id;
/// - the topology: deduplicated [`HullPoint`]s, [`HullEdge`]s and [`HullTriangle`]s,
///   all referencing each other by their id in this hull's arenas.
///
/// A hull with fewer than [`Hull::MIN_POINTS`] points, [`Hull::MIN_EDGES`] edges, or
/// [`Hull::MIN_TRIANGLES`] triangles cannot enclose a volume: it is considered empty
/// and must be neither split nor exported.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Hull {
    positions: Vec<Point<Real>>,
    normals: Vec<Vector<Real>>,
    tangents: Vec<Tangent<Real>>,
    uvs: Vec<TexCoord<Real>>,
    vertex_points: Vec<u32>,
    points: Vec<HullPoint>,
    edges: Vec<HullEdge>,
    triangles: Vec<HullTriangle>,
}

impl Hull {
    /// The minimum number of points of a non-empty hull.
    pub const MIN_POINTS: usize = 4;
    /// The minimum number of edges of a non-empty hull.
    pub const MIN_EDGES: usize = 6;
    /// The minimum number of triangles of a non-empty hull.
    pub const MIN_TRIANGLES: usize = 4;

    /// Builds a hull from mesh buffers.
    ///
    /// Vertices with exactly equal positions are merged into a single point, and edges
    /// shared by several triangles are merged into a single edge.
    pub fn new(buffers: MeshBuffers) -> Result<Self, HullBuilderError> {
        buffers.validate()?;

        let MeshBuffers {
            positions,
            normals,
            tangents,
            uvs,
            indices,
        } = buffers;

        let mut points = Vec::new();
        let mut point_ids = HashMap::default();
        let vertex_points = positions
            .iter()
            .map(|pt| {
                *point_ids
                    .entry(HashablePartialEq::new(*pt))
                    .or_insert_with(|| {
                        points.push(HullPoint::new(*pt));
                        points.len() as u32 - 1
                    })
            })
            .collect();

        let mut result = Self {
            positions,
            normals,
            tangents,
            uvs,
            vertex_points,
            points,
            edges: Vec::new(),
            triangles: Vec::with_capacity(indices.len() / 3),
        };

        let mut edge_ids = HashMap::default();
        for vertices in indices.chunks_exact(3) {
            let vertices = [vertices[0], vertices[1], vertices[2]];
            let points = vertices.map(|vid| result.vertex_points[vid as usize]);
            let edges = [0, 1, 2].map(|i| {
                result.add_unique_edge(&mut edge_ids, points[i], points[(i + 1) % 3])
            });

            result.triangles.push(HullTriangle {
                vertices,
                points,
                edges,
            });
        }

        log::trace!(
            "Built hull with {} vertices, {} points, {} edges, {} triangles.",
            result.positions.len(),
            result.points.len(),
            result.edges.len(),
            result.triangles.len()
        );

        Ok(result)
    }

    /// Creates an empty hull with buffers sized for receiving about half of `reference`
    /// plus the geometry generated by a cut.
    pub(crate) fn with_capacity_for_split_of(reference: &Hull) -> Self {
        let num_vertices = reference.positions.len();
        Self {
            positions: Vec::with_capacity(num_vertices),
            normals: Vec::with_capacity(num_vertices),
            tangents: Vec::with_capacity(num_vertices),
            uvs: Vec::with_capacity(if reference.has_uvs() { num_vertices } else { 0 }),
            vertex_points: Vec::with_capacity(num_vertices),
            points: Vec::with_capacity(reference.points.len()),
            edges: Vec::with_capacity(reference.edges.len()),
            triangles: Vec::with_capacity(reference.triangles.len()),
        }
    }

    fn add_unique_edge(
        &mut self,
        edge_ids: &mut HashMap<SortedPair<u32>, u32>,
        point0: u32,
        point1: u32,
    ) -> u32 {
        match edge_ids.entry(SortedPair::new(point0, point1)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => *entry.insert(self.push_edge(point0, point1)),
        }
    }

    /// Is this hull too small to enclose a volume?
    pub fn is_empty(&self) -> bool {
        self.points.len() < Self::MIN_POINTS
            || self.edges.len() < Self::MIN_EDGES
            || self.triangles.len() < Self::MIN_TRIANGLES
    }

    /// Does this hull carry texture coordinates?
    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    /// The vertex positions.
    pub fn positions(&self) -> &[Point<Real>] {
        &self.positions
    }

    /// The vertex normals.
    pub fn normals(&self) -> &[Vector<Real>] {
        &self.normals
    }

    /// The vertex tangents.
    pub fn tangents(&self) -> &[Tangent<Real>] {
        &self.tangents
    }

    /// The vertex texture coordinates, empty if this hull has none.
    pub fn uvs(&self) -> &[TexCoord<Real>] {
        &self.uvs
    }

    /// The id of the point each vertex is located at.
    pub fn vertex_points(&self) -> &[u32] {
        &self.vertex_points
    }

    /// The deduplicated points of this hull.
    pub fn points(&self) -> &[HullPoint] {
        &self.points
    }

    /// The edges of this hull.
    pub fn edges(&self) -> &[HullEdge] {
        &self.edges
    }

    /// The triangles of this hull.
    pub fn triangles(&self) -> &[HullTriangle] {
        &self.triangles
    }

    /// The number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// The number of points.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// The number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// The vertex index triple of every triangle.
    pub fn indices(&self) -> Vec<[u32; 3]> {
        self.triangles.iter().map(|tri| tri.vertices).collect()
    }

    /// Exports the mesh buffers of this hull.
    ///
    /// Returns `None` if this hull is empty.
    pub fn to_mesh_buffers(&self) -> Option<MeshBuffers> {
        if self.is_empty() {
            return None;
        }

        Some(MeshBuffers {
            positions: self.positions.clone(),
            normals: self.normals.clone(),
            tangents: self.tangents.clone(),
            uvs: self.uvs.clone(),
            indices: self.flat_indices(),
        })
    }

    /// Exports the mesh buffers of this hull, consuming it.
    ///
    /// Returns `None` if this hull is empty.
    pub fn into_mesh_buffers(self) -> Option<MeshBuffers> {
        if self.is_empty() {
            return None;
        }

        let indices = self.flat_indices();
        Some(MeshBuffers {
            positions: self.positions,
            normals: self.normals,
            tangents: self.tangents,
            uvs: self.uvs,
            indices,
        })
    }

    fn flat_indices(&self) -> Vec<u32> {
        self.triangles
            .iter()
            .flat_map(|tri| tri.vertices)
            .collect()
    }

    /// Releases all the geometry of this hull, leaving it empty.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.tangents.clear();
        self.uvs.clear();
        self.vertex_points.clear();
        self.points.clear();
        self.edges.clear();
        self.triangles.clear();
    }

    pub(crate) fn push_point(&mut self, position: Point<Real>) -> u32 {
        self.points.push(HullPoint::new(position));
        self.points.len() as u32 - 1
    }

    pub(crate) fn push_edge(&mut self, point0: u32, point1: u32) -> u32 {
        let edge = HullEdge::new(
            [point0, point1],
            [
                &self.points[point0 as usize].position,
                &self.points[point1 as usize].position,
            ],
        );
        self.edges.push(edge);
        self.edges.len() as u32 - 1
    }

    pub(crate) fn push_vertex(
        &mut self,
        position: Point<Real>,
        normal: Vector<Real>,
        tangent: Tangent<Real>,
        uv: Option<TexCoord<Real>>,
        point: u32,
    ) -> u32 {
        self.positions.push(position);
        self.normals.push(normal);
        self.tangents.push(tangent);
        if let Some(uv) = uv {
            self.uvs.push(uv);
        }
        self.vertex_points.push(point);
        self.positions.len() as u32 - 1
    }

    /// Appends a copy of the `vid`-th vertex of `source`, located at the point `point` of `self`.
    pub(crate) fn push_vertex_from(&mut self, source: &Hull, vid: u32, point: u32) -> u32 {
        let i = vid as usize;
        self.push_vertex(
            source.positions[i],
            source.normals[i],
            source.tangents[i],
            source.uvs.get(i).copied(),
            point,
        )
    }

    pub(crate) fn push_triangle(&mut self, triangle: HullTriangle) {
        self.triangles.push(triangle);
    }
}
