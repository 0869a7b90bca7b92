//! A tiny fixed-function pipeline.
//!
//! The vertex stage computes `projection * model * vec4(position, 1.0)`,
//! the fragment stage writes the flat `input_color` uniform. Clip space is
//! mapped onto the whole canvas, with +y pointing up.

use std::fmt;

use super::{
    draw_raw::Triangle,
    mesh::{MeshId, MeshStore, Topology},
    Argb, Canvas, Pixel,
};
use crate::math::{Mat4, Vec2, Vec3, Vec4};

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    NonFiniteProjection,
    SingularProjection,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::NonFiniteProjection => {
                write!(f, "projection matrix contains NaN or infinite values")
            }
            PipelineError::SingularProjection => {
                write!(f, "projection matrix is not invertible")
            }
        }
    }
}

impl std::error::Error for PipelineError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    UnknownMesh(MeshId),
    OutOfRange { first: usize, count: usize, len: usize },
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::UnknownMesh(id) => write!(f, "no mesh with handle {id:?}"),
            DrawError::OutOfRange { first, count, len } => write!(
                f,
                "vertices {first}..{} are outside of a mesh with {len} vertices",
                first + count
            ),
        }
    }
}

impl std::error::Error for DrawError {}

pub struct Pipeline {
    projection: Mat4,
    model: Mat4,
    input_color: Vec4,
}

impl Pipeline {
    pub fn new(projection: Mat4) -> Result<Self, PipelineError> {
        if !projection.is_finite() {
            return Err(PipelineError::NonFiniteProjection);
        }

        if projection.determinant().abs() <= f32::EPSILON * f32::EPSILON {
            return Err(PipelineError::SingularProjection);
        }

        Ok(Self {
            projection,
            model: Mat4::IDENTITY,
            input_color: Vec4::ONE,
        })
    }

    /// Same as `glm::ortho(0, width, 0, height, -1, 1)`.
    pub fn orthographic(width: f32, height: f32) -> Result<Self, PipelineError> {
        Self::new(Mat4::orthographic_rh_gl(0.0, width, 0.0, height, -1.0, 1.0))
    }

    pub fn set_model(&mut self, model: Mat4) {
        self.model = model;
    }

    pub fn set_input_color(&mut self, color: Vec4) {
        self.input_color = color;
    }

    /// Every draw is opaque; the alpha of `input_color` is not used.
    fn fragment_color(&self) -> Argb {
        Argb::from_rgb(self.input_color.truncate())
    }

    /// Runs the vertex stage and returns canvas coordinates
    /// (origin at the top left, y down).
    pub fn vertex_stage(&self, position: Vec3, width: usize, height: usize) -> Vec2 {
        let clip = self.projection * self.model * position.extend(1.0);
        let ndc = clip.truncate() / clip.w;

        Vec2::new(
            (ndc.x + 1.0) * 0.5 * width as f32,
            (1.0 - ndc.y) * 0.5 * height as f32,
        )
    }

    /// Draws `count` vertices of `mesh`, starting at `first`.
    pub fn draw_arrays(
        &self,
        canvas: &mut Canvas,
        meshes: &MeshStore,
        mesh: MeshId,
        topology: Topology,
        first: usize,
        count: usize,
    ) -> Result<(), DrawError> {
        let mesh_data = meshes.get(mesh).ok_or(DrawError::UnknownMesh(mesh))?;
        let len = mesh_data.len();

        let range = mesh_data
            .vertices()
            .get(first..first.saturating_add(count))
            .ok_or(DrawError::OutOfRange { first, count, len })?;

        let (w, h) = (canvas.width(), canvas.height());
        let screen: Vec<Vec2> = range.iter().map(|&v| self.vertex_stage(v, w, h)).collect();

        let color = self.fragment_color();
        let mixer = canvas.current_mixer();

        for [a, b, c] in assemble(topology, &screen) {
            Triangle { a, b, c }.exec(canvas.as_mut_slice(), w, h, color, mixer);
        }

        Ok(())
    }
}

/// Primitive assembly. Trailing vertices that do not form a whole
/// triangle are dropped, like OpenGL does.
fn assemble(topology: Topology, v: &[Vec2]) -> Vec<[Vec2; 3]> {
    match topology {
        Topology::TriangleFan => match v.split_first() {
            Some((&center, rim)) => rim.windows(2).map(|w| [center, w[0], w[1]]).collect(),
            None => Vec::new(),
        },

        Topology::Triangles => v.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect(),

        Topology::TriangleStrip => v.windows(3).map(|t| [t[0], t[1], t[2]]).collect(),
    }
}
