pub use glam::{Mat4, Vec2, Vec3, Vec4};

pub const TAU: f32 = std::f32::consts::TAU;

pub mod interpolate {
    use super::Vec3;

    /// Same as GLSL's `mix`. `t = 0` returns `a` exactly.
    pub fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
        a + (b - a) * t
    }
}

/// Unit vector pointing from `from` to `to`, together with the
/// distance between the two points.
///
/// Coinciding points have no direction; the zero vector is
/// returned in that case so callers never see NaN.
pub fn direction_and_distance(from: Vec3, to: Vec3) -> (Vec3, f32) {
    let delta = to - from;
    let distance = delta.length();

    if distance > 0.0 && distance.is_finite() {
        (delta / distance, distance)
    } else {
        (Vec3::ZERO, 0.0)
    }
}

/// Window coordinates have their origin at the top left corner and
/// may be scaled up; the world has its origin at the bottom left.
pub fn window_to_world(cursor: (f64, f64), scale: f32, world_height: f32) -> Vec3 {
    let scale = scale.max(1.0);
    let x = cursor.0 as f32 / scale;
    let y = cursor.1 as f32 / scale;

    Vec3::new(x, world_height - y, 0.0)
}

/// Angle of a direction in the xy plane, as `atan2(y, x)`.
pub fn heading_angle(dir: Vec3) -> f32 {
    dir.y.atan2(dir.x)
}
