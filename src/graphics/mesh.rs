//! Vertex data uploaded to the software pipeline.
//!
//! Every mesh is a flat list of 3-component positions (z is always 0)
//! with no other attributes. How the vertices are assembled into
//! triangles is chosen per draw call, see [`Topology`].

use std::fmt;

use log::debug;

use crate::math::{Vec2, Vec3, TAU};

/// Opaque handle to a mesh owned by a [`MeshStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(usize);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Topology {
    /// Vertex 0 is shared by every triangle.
    #[default]
    TriangleFan,
    Triangles,
    TriangleStrip,
}

/// A contiguous range of vertices inside a mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubMesh {
    pub offset: usize,
    pub count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyePart {
    LeftSclera,
    RightSclera,
    LeftPupil,
    RightPupil,
}

impl EyePart {
    /// Drawing order: both scleras, then the pupils on top.
    pub const ALL: [EyePart; 4] = [
        EyePart::LeftSclera,
        EyePart::RightSclera,
        EyePart::LeftPupil,
        EyePart::RightPupil,
    ];

    pub fn is_pupil(self) -> bool {
        matches!(self, EyePart::LeftPupil | EyePart::RightPupil)
    }
}

/// Where each part of the eye mesh lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EyeLayout {
    pub left_sclera: SubMesh,
    pub right_sclera: SubMesh,
    pub left_pupil: SubMesh,
    pub right_pupil: SubMesh,
}

impl EyeLayout {
    pub fn part(&self, part: EyePart) -> SubMesh {
        match part {
            EyePart::LeftSclera => self.left_sclera,
            EyePart::RightSclera => self.right_sclera,
            EyePart::LeftPupil => self.left_pupil,
            EyePart::RightPupil => self.right_pupil,
        }
    }

    pub fn parts(&self) -> impl Iterator<Item = (EyePart, SubMesh)> + '_ {
        EyePart::ALL.into_iter().map(|p| (p, self.part(p)))
    }
}

pub const SCLERA_CENTER: Vec2 = Vec2::new(0.125, 0.3);
pub const SCLERA_RADIUS: f32 = 0.225;
pub const PUPIL_SHIFT: f32 = 0.09;
pub const PUPIL_RADIUS: f32 = 0.18;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    TooFewPoints(usize),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::TooFewPoints(n) => {
                write!(f, "a circle needs at least 3 points, got {n}")
            }
        }
    }
}

impl std::error::Error for MeshError {}

/// Vertices of a circle drawn as a triangle fan.
///
/// The center comes first, followed by `n_points + 1` points on the rim.
/// The last rim point closes the fan and is the same as the first one.
pub fn circle_vertices(n_points: usize, radius: f32, center: Vec2) -> Result<Vec<Vec3>, MeshError> {
    if n_points < 3 {
        return Err(MeshError::TooFewPoints(n_points));
    }

    let slice = TAU / n_points as f32;

    let mut vertices = Vec::with_capacity(n_points + 2);
    vertices.push(center.extend(0.0));

    let mut angle = 0.0f32;
    for _ in 0..n_points {
        let (sin, cos) = angle.sin_cos();
        vertices.push(Vec3::new(center.x + radius * cos, center.y + radius * sin, 0.0));
        angle += slice;
    }

    // Accumulating the angle drifts a little; close the fan exactly.
    vertices.push(vertices[1]);

    Ok(vertices)
}

pub struct Mesh {
    vertices: Vec<Vec3>,
}

impl Mesh {
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }
}

/// Owns every mesh of the program. Meshes are never freed one by one,
/// they all go away with the store.
#[derive(Default)]
pub struct MeshStore {
    meshes: Vec<Mesh>,
}

impl MeshStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload(&mut self, vertices: Vec<Vec3>) -> MeshId {
        let id = MeshId(self.meshes.len());
        debug!("Uploading mesh {} with {} vertices", id.0, vertices.len());
        self.meshes.push(Mesh { vertices });
        id
    }

    pub fn get(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn create_circle(&mut self, n_points: usize, radius: f32, center: Vec2) -> Result<MeshId, MeshError> {
        let vertices = circle_vertices(n_points, radius, center)?;
        Ok(self.upload(vertices))
    }

    /// Packs both eyes into one mesh: scleras first, then pupils.
    /// The pupils are shifted forward (+x) so the eyes look ahead.
    pub fn create_eyes(&mut self, n_points: usize) -> Result<(MeshId, EyeLayout), MeshError> {
        let pupil_center = SCLERA_CENTER + Vec2::new(PUPIL_SHIFT, 0.0);
        let mirror = Vec2::new(1.0, -1.0);

        let blocks = [
            circle_vertices(n_points, SCLERA_RADIUS, SCLERA_CENTER)?,
            circle_vertices(n_points, SCLERA_RADIUS, SCLERA_CENTER * mirror)?,
            circle_vertices(n_points, PUPIL_RADIUS, pupil_center)?,
            circle_vertices(n_points, PUPIL_RADIUS, pupil_center * mirror)?,
        ];

        let mut vertices = Vec::with_capacity(blocks.iter().map(Vec::len).sum());
        let mut ranges = [SubMesh { offset: 0, count: 0 }; 4];

        for (range, block) in ranges.iter_mut().zip(blocks) {
            *range = SubMesh {
                offset: vertices.len(),
                count: block.len(),
            };
            vertices.extend(block);
        }

        let [left_sclera, right_sclera, left_pupil, right_pupil] = ranges;

        let layout = EyeLayout {
            left_sclera,
            right_sclera,
            left_pupil,
            right_pupil,
        };

        Ok((self.upload(vertices), layout))
    }

    /// Unit triangle pointing up, used as the cursor marker.
    pub fn create_triangle(&mut self) -> MeshId {
        self.upload(vec![
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
        ])
    }
}

impl Drop for MeshStore {
    fn drop(&mut self) {
        debug!("Releasing {} meshes", self.len());
    }
}
