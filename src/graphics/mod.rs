pub mod blend;
pub mod draw;
pub mod draw_raw;
pub mod mesh;
pub mod pipeline;

use blend::Mixer;

use crate::math::Vec3;

pub type Argb = u32;

pub(crate) trait Pixel: Copy + Clone + Sized + std::fmt::Debug {
    fn black() -> Self;
    fn trans() -> Self;

    /// Packs an `(r, g, b)` triple in `0.0..=1.0` into an opaque pixel.
    fn from_rgb(color: Vec3) -> Self;

    /// Opaque drawing: the source pixel replaces the destination.
    fn over(self, other: Self) -> Self;

    fn compose(array: [u8; 4]) -> Self;
}

/// The render target of the software pipeline.
///
/// Row 0 is the top of the window. Pixels are stored as ARGB.
pub struct Canvas {
    buffer: Vec<Argb>,
    width: usize,
    height: usize,

    mixer: Mixer,
    background: Argb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct P2(pub i32, pub i32);

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            buffer: vec![Argb::trans(); w * h],
            width: w,
            height: h,

            mixer: u32::over,
            background: Argb::black(),
        }
    }

    pub fn current_mixer(&self) -> Mixer {
        self.mixer
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        draw_raw::Fill {}.exec(
            &mut self.buffer,
            self.width,
            self.height,
            self.background,
            self.mixer,
        );
    }

    pub fn pixel(&self, p: P2) -> Option<Argb> {
        if p.0 < 0 || p.1 < 0 || p.0 as usize >= self.width || p.1 as usize >= self.height {
            return None;
        }

        self.buffer.get(p.1 as usize * self.width + p.0 as usize).copied()
    }

    pub fn as_mut_slice(&mut self) -> &mut [Argb] {
        &mut self.buffer
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[Argb] {
        &self.buffer
    }

    /// Copies the canvas into `dest`, repeating every pixel `scale`
    /// times in both directions.
    ///
    /// `width` is the row stride of `dest`. It can be larger than
    /// `self.width * scale` when the compositor hands us a surface
    /// that is bigger than requested.
    pub fn scale_to(&self, scale: usize, dest: &mut [Argb], width: Option<usize>) {
        if self.width == 0 || scale == 0 {
            return;
        }

        let dst_width = width.unwrap_or(self.width * scale);

        self.buffer
            .chunks_exact(self.width) // source lines
            .flat_map(|row| std::iter::repeat(row).take(scale))
            .zip(dest.chunks_exact_mut(dst_width)) // with destination lines
            .flat_map(|(src_row, dst_row)| src_row.iter().zip(dst_row.chunks_exact_mut(scale)))
            .for_each(|(src_pixel, dst_chunk)| dst_chunk.fill(src_pixel & 0x00_FF_FF_FF));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_uses_background() {
        let mut canvas = Canvas::new(4, 3);
        assert!(canvas.as_slice().iter().all(|&p| p == Argb::trans()));

        canvas.clear();

        assert!(canvas.as_slice().iter().all(|&p| p == Argb::black()));
        assert_eq!(canvas.as_slice().len(), 12);
    }

    #[test]
    fn pixel_outside_is_none() {
        let canvas = Canvas::new(4, 3);

        assert!(canvas.pixel(P2(-1, 0)).is_none());
        assert!(canvas.pixel(P2(4, 0)).is_none());
        assert!(canvas.pixel(P2(0, 3)).is_none());
        assert!(canvas.pixel(P2(3, 2)).is_some());
    }

    #[test]
    fn scale_to_repeats_pixels() {
        let mut canvas = Canvas::new(2, 1);
        canvas.as_mut_slice().copy_from_slice(&[0xFF_00_00_01, 0xFF_00_00_02]);

        let mut dest = vec![0u32; 2 * 2 * 2];
        canvas.scale_to(2, &mut dest, None);

        assert_eq!(dest, vec![1, 1, 2, 2, 1, 1, 2, 2]);
    }

    #[test]
    fn scale_to_respects_wider_stride() {
        let mut canvas = Canvas::new(1, 2);
        canvas.as_mut_slice().copy_from_slice(&[0xFF_00_00_07, 0xFF_00_00_09]);

        let mut dest = vec![0u32; 3 * 2];
        canvas.scale_to(1, &mut dest, Some(3));

        assert_eq!(dest, vec![7, 0, 0, 9, 0, 0]);
    }
}
