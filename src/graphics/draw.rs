use super::{
    mesh::{MeshId, MeshStore, Topology},
    pipeline::{DrawError, Pipeline, PipelineError},
    Canvas,
};
use crate::math::{Mat4, Vec3};

/// Per-draw transform and color.
#[derive(Clone, Copy, Debug)]
pub struct DrawParams {
    pub position: Vec3,
    pub dimensions: Vec3,
    pub angle: f32,
    pub color: Vec3,
    pub topology: Topology,
    pub offset: usize,
    pub axis: Vec3,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            dimensions: Vec3::ONE,
            angle: 0.0,
            color: Vec3::ONE,
            topology: Topology::TriangleFan,
            offset: 0,
            axis: Vec3::Z,
        }
    }
}

/// translate(position) * rotate(angle, axis) * scale(dimensions)
pub fn model_matrix(position: Vec3, dimensions: Vec3, angle: f32, axis: Vec3) -> Mat4 {
    let axis = axis.try_normalize().unwrap_or(Vec3::Z);

    Mat4::from_translation(position)
        * Mat4::from_axis_angle(axis, angle)
        * Mat4::from_scale(dimensions)
}

pub struct Renderer {
    pub pix: Canvas,
    pub meshes: MeshStore,
    pipeline: Pipeline,
}

impl Renderer {
    /// A renderer whose world units are canvas pixels, with the
    /// origin at the bottom left.
    pub fn new(width: usize, height: usize) -> Result<Self, PipelineError> {
        Ok(Self {
            pix: Canvas::new(width, height),
            meshes: MeshStore::new(),
            pipeline: Pipeline::orthographic(width as f32, height as f32)?,
        })
    }

    pub fn clear(&mut self) {
        self.pix.clear();
    }

    pub fn draw_geometry(
        &mut self,
        mesh: MeshId,
        vertex_count: usize,
        params: &DrawParams,
    ) -> Result<(), DrawError> {
        self.pipeline.set_model(model_matrix(
            params.position,
            params.dimensions,
            params.angle,
            params.axis,
        ));
        self.pipeline.set_input_color(params.color.extend(1.0));

        self.pipeline.draw_arrays(
            &mut self.pix,
            &self.meshes,
            mesh,
            params.topology,
            params.offset,
            vertex_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{Pixel, P2};
    use crate::math::Vec2;

    #[test]
    fn model_matrix_translates_rotates_scales() {
        let angle = 0.7f32;
        let position = Vec3::new(400.0, 300.0, 0.0);
        let m = model_matrix(position, Vec3::new(50.0, 50.0, 1.0), angle, Vec3::Z);

        let p = m.transform_point3(Vec3::new(0.5, 0.0, 0.0));
        let expected = position + 25.0 * Vec3::new(angle.cos(), angle.sin(), 0.0);

        assert!((p - expected).length() < 1e-3);
    }

    #[test]
    fn zero_axis_falls_back_to_z() {
        let m = model_matrix(Vec3::ZERO, Vec3::ONE, std::f32::consts::FRAC_PI_2, Vec3::ZERO);
        let p = m.transform_point3(Vec3::X);

        assert!((p - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn draw_geometry_uses_params() {
        let mut r = Renderer::new(100, 100).unwrap();
        r.clear();

        let circle = r.meshes.create_circle(32, 0.5, Vec2::ZERO).unwrap();

        let params = DrawParams {
            position: Vec3::new(20.0, 80.0, 0.0),
            dimensions: Vec3::new(10.0, 10.0, 1.0),
            color: Vec3::new(0.0, 0.0, 1.0),
            ..Default::default()
        };

        r.draw_geometry(circle, 34, &params).unwrap();

        // World y = 80 is canvas row 20.
        assert_eq!(r.pix.pixel(P2(20, 20)), Some(0xFF_00_00_FF));
        assert_eq!(r.pix.pixel(P2(20, 80)), Some(u32::black()));
    }
}
