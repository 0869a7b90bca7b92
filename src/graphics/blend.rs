use super::{Argb, Pixel};
use crate::math::Vec3;

pub type Mixer = fn(Argb, Argb) -> Argb;

fn channel_from_unit(x: f32) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Pixel for Argb {
    fn black() -> Argb {
        0xFF_00_00_00
    }

    fn trans() -> Argb {
        0x0
    }

    fn from_rgb(color: Vec3) -> Argb {
        Argb::compose([
            0xFF,
            channel_from_unit(color.x),
            channel_from_unit(color.y),
            channel_from_unit(color.z),
        ])
    }

    fn compose(array: [u8; 4]) -> Argb {
        Argb::from_be_bytes(array)
    }

    fn over(self, other: Argb) -> Argb {
        other
    }
}
