use log::info;

use crate::graphics::mesh::{EyeLayout, MeshId};
use crate::math::{direction_and_distance, Vec3};

/// Spacing between consecutive segments when they are created, and the
/// lower end of the band the chain relaxes towards.
pub const MIN_DISTANCE: f32 = 15.0;
pub const MAX_DISTANCE: f32 = 17.0;

pub const HEAD_START: Vec3 = Vec3::new(400.0, 300.0, 0.0);
pub const SEGMENT_DIMENSIONS: Vec3 = Vec3::new(50.0, 50.0, 1.0);

pub const CIRCLE_POINTS: usize = 32;
pub const SEGMENT_RADIUS: f32 = 0.5;
/// Center, rim and the vertex closing the fan.
pub const SEGMENT_VERTICES: usize = CIRCLE_POINTS + 2;

pub const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
pub const YELLOW: Vec3 = Vec3::new(1.0, 1.0, 0.0);
pub const SCLERA_COLOR: Vec3 = Vec3::ONE;
pub const PUPIL_COLOR: Vec3 = Vec3::ZERO;

#[derive(Clone, Debug)]
pub struct Segment {
    pub mesh: MeshId,
    pub position: Vec3,
    /// Only the head is ever rotated.
    pub angle: f32,
    pub dimensions: Vec3,
    pub color: Vec3,
    pub vertex_count: usize,
}

pub fn segment_color(index: usize) -> Vec3 {
    if index % 2 == 0 {
        BLUE
    } else {
        YELLOW
    }
}

/// Builds segment `index` of `chain`, which holds the segments
/// created so far (`chain.len() == index` for an append).
///
/// The first body segment is placed along `fallback`. Later ones
/// continue the direction of the last two segments, falling back to
/// `fallback` if those two happen to coincide.
pub fn create_segment(index: usize, fallback: Vec3, chain: &[Segment], mesh: MeshId) -> Segment {
    info!("Creating segment {index}");

    let position = match index {
        0 => HEAD_START,

        _ => {
            let prev = chain[index - 1].position;

            let dir = if index >= 2 {
                let (dir, _) = direction_and_distance(chain[index - 2].position, prev);
                if dir == Vec3::ZERO {
                    fallback
                } else {
                    dir
                }
            } else {
                fallback
            };

            prev + MIN_DISTANCE * dir
        }
    };

    Segment {
        mesh,
        position,
        angle: 0.0,
        dimensions: SEGMENT_DIMENSIONS,
        color: segment_color(index),
        vertex_count: SEGMENT_VERTICES,
    }
}

/// The two eyes drawn over the head. They follow the head's
/// position and angle every frame.
#[derive(Clone, Debug)]
pub struct Eyes {
    pub mesh: MeshId,
    pub layout: EyeLayout,
    pub position: Vec3,
    pub angle: f32,
    pub dimensions: Vec3,
}

impl Eyes {
    pub fn new(mesh: MeshId, layout: EyeLayout) -> Self {
        Self {
            mesh,
            layout,
            position: HEAD_START,
            angle: 0.0,
            dimensions: SEGMENT_DIMENSIONS,
        }
    }

    pub fn follow(&mut self, head: &Segment) {
        self.position = head.position;
        self.angle = head.angle;
    }
}
