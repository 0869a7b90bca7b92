use super::{blend::Mixer, Argb};
use crate::math::Vec2;

macro_rules! make_struct {
	($i:item) => {
		#[derive(Clone, Debug)]
		$i
	}
}

make_struct!(pub struct Fill {});
make_struct!(pub struct Triangle {pub a: Vec2, pub b: Vec2, pub c: Vec2});

macro_rules! impl_param {
	($name:ty, $func:ident) => {
		impl $name {
			pub fn exec(self, canvas: &mut [Argb], cwidth: usize, cheight: usize, c: Argb, b: Mixer) {
				$func(canvas, cwidth, cheight, c, b, self);
			}
		}
	}
}

impl_param!(Fill, fill);
impl_param!(Triangle, fill_triangle_by);

pub fn fill(canvas: &mut [Argb], _cwidth: usize, _cheight: usize, c: Argb, _b: Mixer, _param: Fill) {
    canvas.fill(c);
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

// With y pointing down and a positive area, left edges go up and
// top edges go right.
fn is_top_left(a: Vec2, b: Vec2) -> bool {
    let d = b - a;
    d.y < 0.0 || (d.y == 0.0 && d.x > 0.0)
}

fn covers(w: f32, top_left: bool) -> bool {
    w > 0.0 || (w == 0.0 && top_left)
}

// Half-space rasterizer sampling pixel centers. With the top-left
// rule a pixel on an edge shared by two triangles belongs to exactly
// one of them.
pub fn fill_triangle_by(
    canvas: &mut [Argb],
    cwidth: usize,
    cheight: usize,
    c: Argb,
    b: Mixer,
    param: Triangle
) {
    let Triangle { a, b: mut pb, c: mut pc } = param;

    if !(a.is_finite() && pb.is_finite() && pc.is_finite()) || cwidth == 0 || cheight == 0 {
        return;
    }

    let area = edge(a, pb, pc);

    if area == 0.0 {
        return;
    }

    if area < 0.0 {
        std::mem::swap(&mut pb, &mut pc);
    }

    let min = a.min(pb).min(pc).floor();
    let max = a.max(pb).max(pc).ceil();

    let xs = min.x.max(0.0) as usize;
    let ys = min.y.max(0.0) as usize;
    let xe = (max.x.min(cwidth as f32) as usize).min(cwidth);
    let ye = (max.y.min(cheight as f32) as usize).min(cheight);

    let tl0 = is_top_left(pb, pc);
    let tl1 = is_top_left(pc, a);
    let tl2 = is_top_left(a, pb);

    let lines = canvas
        .chunks_exact_mut(cwidth)
        .enumerate()
        .skip(ys)
        .take(ye.saturating_sub(ys));

    for (y, line) in lines {
        let Some(chunk) = line.get_mut(xs..xe.max(xs)) else {
            return;
        };

        for (x, px) in (xs..).zip(chunk.iter_mut()) {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

            let w0 = edge(pb, pc, p);
            let w1 = edge(pc, a, p);
            let w2 = edge(a, pb, p);

            if covers(w0, tl0) && covers(w1, tl1) && covers(w2, tl2) {
                *px = b(*px, c);
            }
        }
    }
}
