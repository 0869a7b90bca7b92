pub mod segment;

use log::debug;

use crate::graphics::{
    draw::{DrawParams, Renderer},
    mesh::{MeshError, MeshId, MeshStore},
    pipeline::DrawError,
};
use crate::math::{direction_and_distance, heading_angle, interpolate, Vec2, Vec3};

use segment::*;

/// Distance the head moves towards the cursor every frame,
/// whatever the distance to the cursor is.
pub const HEAD_STEP: f32 = 0.5;
pub const SMOOTH_FACTOR: f32 = 0.1;

/// Direction the first body segment grows in before the head has
/// moved: the opposite of this.
pub const INITIAL_HEADING: Vec3 = Vec3::new(0.0, -1.0, 0.0);

pub struct Snake {
    segments: Vec<Segment>,
    eyes: Eyes,
    body_mesh: MeshId,
    heading: Vec3,
}

impl Snake {
    /// A snake made of just its head, at the center of the window.
    pub fn new(meshes: &mut MeshStore) -> Result<Self, MeshError> {
        let body_mesh = meshes.create_circle(CIRCLE_POINTS, SEGMENT_RADIUS, Vec2::ZERO)?;
        let (eye_mesh, layout) = meshes.create_eyes(CIRCLE_POINTS)?;

        let head = create_segment(0, INITIAL_HEADING, &[], body_mesh);

        Ok(Self {
            segments: vec![head],
            eyes: Eyes::new(eye_mesh, layout),
            body_mesh,
            heading: INITIAL_HEADING,
        })
    }

    #[cfg(test)]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[cfg(test)]
    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    #[cfg(test)]
    pub fn eyes(&self) -> &Eyes {
        &self.eyes
    }

    #[cfg(test)]
    pub fn heading(&self) -> Vec3 {
        self.heading
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Moves the head a fixed step towards `target` and turns it to
    /// face the target. Nothing changes when the head is already
    /// exactly on the target.
    pub fn drive_head(&mut self, target: Vec3) {
        let head = &mut self.segments[0];
        let (dir, _) = direction_and_distance(head.position, target);

        if dir != Vec3::ZERO {
            head.position += HEAD_STEP * dir;
            head.angle = heading_angle(dir);
            self.heading = dir;
        }

        self.eyes.follow(&self.segments[0]);
    }

    /// One pass of soft distance constraints from the neck to the tail.
    ///
    /// Segments are visited in order, so every segment reacts to where
    /// its predecessor is after this frame's update.
    pub fn relax(&mut self) {
        for i in 1..self.segments.len() {
            let leader = self.segments[i - 1].position;
            let current = self.segments[i].position;

            let (dir, distance) = direction_and_distance(current, leader);

            let target = if distance < MIN_DISTANCE {
                current + (distance - MIN_DISTANCE) * dir
            } else if distance > MAX_DISTANCE {
                current + (distance - MAX_DISTANCE) * dir
            } else {
                current
            };

            // Stretched links catch up faster.
            let factor = SMOOTH_FACTOR * (distance / MAX_DISTANCE);

            self.segments[i].position = interpolate::mix(current, target, factor);
        }
    }

    /// Appends one segment behind the tail.
    pub fn grow(&mut self) {
        let index = self.segments.len();
        let segment = create_segment(index, -self.heading, &self.segments, self.body_mesh);

        debug!("Snake grew to {} segments", index + 1);

        self.segments.push(segment);
    }

    /// One frame of motion: head, then chain, then growth. The head
    /// stays where it is while the cursor position is unknown.
    pub fn update(&mut self, cursor: Option<Vec3>, grow: u32) {
        if let Some(cursor) = cursor {
            self.drive_head(cursor);
        }

        self.relax();

        for _ in 0..grow {
            self.grow();
        }
    }

    /// Draws from the tail to the head so the head ends up on top,
    /// then the eyes over the head.
    pub fn draw(&self, renderer: &mut Renderer) -> Result<(), DrawError> {
        for segment in self.segments.iter().rev() {
            renderer.draw_geometry(
                segment.mesh,
                segment.vertex_count,
                &DrawParams {
                    position: segment.position,
                    dimensions: segment.dimensions,
                    angle: segment.angle,
                    color: segment.color,
                    ..Default::default()
                },
            )?;
        }

        let eyes = &self.eyes;

        for (part, sub) in eyes.layout.parts() {
            let color = if part.is_pupil() {
                PUPIL_COLOR
            } else {
                SCLERA_COLOR
            };

            renderer.draw_geometry(
                eyes.mesh,
                sub.count,
                &DrawParams {
                    position: eyes.position,
                    dimensions: eyes.dimensions,
                    angle: eyes.angle,
                    color,
                    offset: sub.offset,
                    ..Default::default()
                },
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{WORLD_HEIGHT, WORLD_WIDTH};
    use crate::graphics::{Pixel, P2};

    fn snake() -> Snake {
        Snake::new(&mut MeshStore::new()).unwrap()
    }

    fn distance(a: &Segment, b: &Segment) -> f32 {
        (a.position - b.position).length()
    }

    #[test]
    fn starts_with_only_the_head() {
        let s = snake();

        assert_eq!(s.len(), 1);
        assert_eq!(s.head().position, HEAD_START);
        assert_eq!(s.heading(), INITIAL_HEADING);
    }

    #[test]
    fn new_segments_are_spaced_by_min_distance() {
        let mut s = snake();

        for _ in 0..6 {
            s.grow();
        }

        for pair in s.segments().windows(2) {
            assert!((distance(&pair[0], &pair[1]) - MIN_DISTANCE).abs() < 1e-4);
        }

        // Colors alternate, starting with the head.
        for (i, seg) in s.segments().iter().enumerate() {
            assert_eq!(seg.color, segment_color(i));
        }
    }

    #[test]
    fn growing_twice_gives_three_segments() {
        let mut s = snake();
        s.update(Some(Vec3::new(500.0, 300.0, 0.0)), 1);
        s.grow();

        assert_eq!(s.len(), 3);

        let tail = &s.segments()[2];
        let before = &s.segments()[1];
        assert!((distance(tail, before) - 15.0).abs() < 1e-4);
    }

    #[test]
    fn first_growth_goes_opposite_the_initial_heading() {
        let mut s = snake();
        s.grow();

        assert_eq!(s.segments()[1].position, HEAD_START + Vec3::new(0.0, 15.0, 0.0));
    }

    #[test]
    fn head_moves_a_fixed_step_and_turns() {
        let mut s = snake();
        s.drive_head(Vec3::new(400.0, 1000.0, 0.0));

        assert_eq!(s.head().position, Vec3::new(400.0, 300.5, 0.0));
        assert!((s.head().angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(s.eyes().position, s.head().position);
        assert_eq!(s.eyes().angle, s.head().angle);
    }

    #[test]
    fn head_on_cursor_stays_put() {
        let mut s = snake();
        s.drive_head(Vec3::new(500.0, 300.0, 0.0));
        let angle = s.head().angle;

        s.drive_head(s.head().position);

        assert_eq!(s.head().position, Vec3::new(400.5, 300.0, 0.0));
        assert_eq!(s.head().angle, angle);
        assert_eq!(s.heading(), Vec3::X);
    }

    #[test]
    fn head_converges_on_cursor() {
        let mut s = snake();
        let cursor = Vec3::new(500.0, 300.0, 0.0);

        let mut last_gap = (cursor - s.head().position).length();

        for _ in 0..200 {
            s.update(Some(cursor), 0);

            let gap = (cursor - s.head().position).length();
            assert!(gap <= last_gap);
            last_gap = gap;
        }

        assert!(last_gap < 1.0);
        assert!((s.head().position.y - 300.0).abs() < 1e-4);
    }

    #[test]
    fn relaxing_inside_band_changes_nothing() {
        let mut s = snake();
        for _ in 0..5 {
            s.grow();
        }

        // Spread links over the band.
        let spacing = [15.0, 15.5, 16.0, 16.5, 17.0];
        let mut y = HEAD_START.y;
        for (seg, gap) in s.segments.iter_mut().skip(1).zip(spacing) {
            y += gap;
            seg.position = Vec3::new(HEAD_START.x, y, 0.0);
        }

        let before: Vec<_> = s.segments().iter().map(|seg| seg.position).collect();
        s.relax();
        let after: Vec<_> = s.segments().iter().map(|seg| seg.position).collect();

        assert_eq!(before, after);
    }

    #[test]
    fn compressed_link_is_pushed_back() {
        let mut s = snake();
        s.grow();
        s.segments[1].position = HEAD_START + Vec3::new(0.0, 5.0, 0.0);

        s.relax();

        let d = distance(&s.segments()[0], &s.segments()[1]);
        assert!(d > 5.0);
        assert!(d < MIN_DISTANCE);
    }

    #[test]
    fn compressed_link_opens_up_without_passing_the_band() {
        let mut s = snake();
        s.grow();
        s.segments[1].position = HEAD_START + Vec3::new(0.0, 5.0, 0.0);

        let mut last = 5.0;

        for _ in 0..300 {
            s.relax();

            let d = distance(&s.segments()[0], &s.segments()[1]);
            assert!(d >= last - 1e-5);
            assert!(d <= MIN_DISTANCE + 1e-4);
            last = d;
        }

        assert!(last > MIN_DISTANCE - 0.01);
    }

    #[test]
    fn unknown_cursor_leaves_the_head_alone() {
        let mut s = snake();
        s.grow();
        s.segments[1].position = HEAD_START + Vec3::new(0.0, 40.0, 0.0);

        s.update(None, 1);

        assert_eq!(s.head().position, HEAD_START);
        assert_eq!(s.heading(), INITIAL_HEADING);
        assert!(distance(&s.segments()[0], &s.segments()[1]) < 40.0);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn stretched_link_is_pulled_in() {
        let mut s = snake();
        s.grow();
        s.segments[1].position = HEAD_START + Vec3::new(40.0, 0.0, 0.0);

        s.relax();

        let d = distance(&s.segments()[0], &s.segments()[1]);
        assert!(d < 40.0);
        assert!(d > MAX_DISTANCE);
    }

    #[test]
    fn coinciding_segments_do_not_produce_nan() {
        let mut s = snake();
        s.grow();
        s.segments[1].position = s.segments[0].position;

        s.relax();

        assert_eq!(s.segments()[1].position, s.segments()[0].position);
        assert!(s.segments()[1].position.is_finite());
    }

    #[test]
    fn growth_keeps_existing_segments() {
        let mut s = snake();
        for _ in 0..3 {
            s.grow();
        }

        let cursor = Vec3::new(100.0, 100.0, 0.0);

        let mut relaxed_only = snake();
        relaxed_only.segments = s.segments.clone();
        relaxed_only.heading = s.heading;
        relaxed_only.update(Some(cursor), 0);

        s.update(Some(cursor), 1);

        assert_eq!(s.len(), 5);
        for (a, b) in s.segments().iter().zip(relaxed_only.segments()) {
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn draw_puts_head_and_eyes_on_top() {
        let mut renderer = Renderer::new(WORLD_WIDTH, WORLD_HEIGHT).unwrap();
        renderer.clear();

        let mut s = Snake::new(&mut renderer.meshes).unwrap();
        s.grow();
        s.draw(&mut renderer).unwrap();

        // The head center shows between the two eyes.
        let head = P2(400, (WORLD_HEIGHT as i32) - 300);
        assert_eq!(renderer.pix.pixel(head), Some(0xFF_00_00_FF));

        // Left pupil center: 0.215 * 50 ahead of the head (+x at angle 0)
        // and 0.3 * 50 to its left.
        let pupil = P2(400 + 11, (WORLD_HEIGHT as i32) - 300 - 15);
        assert_eq!(renderer.pix.pixel(pupil), Some(u32::black()));

        // The neck grew straight up and sticks out above the head.
        let body = P2(400, (WORLD_HEIGHT as i32) - 300 - 35);
        assert_eq!(renderer.pix.pixel(body), Some(0xFF_FF_FF_00));
    }
}
