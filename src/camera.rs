use glam::DVec2;

use crate::Input;
use crate::consts::{DEFAULT_CAMERA_DIRECTION, DEFAULT_CAMERA_PLANE, DEFAULT_CAMERA_POSITION};
use crate::map::WorldGrid;

/// Viewer in grid units. `dir` and `plane` always change together, so the
/// angle between them and the field of view they span are preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pos: DVec2,
    dir: DVec2,
    plane: DVec2,
}

impl Camera {
    pub fn new(pos: DVec2, dir: DVec2, plane: DVec2) -> Self {
        Camera { pos, dir, plane }
    }

    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    pub fn dir(&self) -> DVec2 {
        self.dir
    }

    pub fn plane(&self) -> DVec2 {
        self.plane
    }

    /// Horizontal field of view spanned by `dir` and `plane`.
    pub fn fov_degrees(&self) -> f64 {
        2.0 * (self.plane.length() / self.dir.length()).atan().to_degrees()
    }

    /// Ray through screen column `camera_x` in [-1, 1].
    #[inline]
    pub fn ray_dir(&self, camera_x: f64) -> DVec2 {
        self.dir + self.plane * camera_x
    }

    /// Rotates `dir` and `plane` by `angle` radians with one rotation matrix.
    pub fn rotate(&mut self, angle: f64) {
        let r = DVec2::from_angle(angle);
        self.dir = r.rotate(self.dir);
        self.plane = r.rotate(self.plane);
    }

    /// Moves by `delta`, committing X and Y separately. An axis only moves
    /// when the cell it lands in is open, so the camera slides along walls.
    /// X is tested against the current row, Y against the already-updated
    /// column. Cells are found by truncating toward zero.
    pub fn translate(&mut self, delta: DVec2, world: &WorldGrid) {
        let new_x = self.pos.x + delta.x;
        if world.is_open(new_x as i64, self.pos.y as i64) {
            self.pos.x = new_x;
        }
        let new_y = self.pos.y + delta.y;
        if world.is_open(self.pos.x as i64, new_y as i64) {
            self.pos.y = new_y;
        }
    }

    pub fn move_forward(&mut self, step: f64, world: &WorldGrid) {
        self.translate(self.dir * step, world);
    }

    pub fn move_backward(&mut self, step: f64, world: &WorldGrid) {
        self.translate(-self.dir * step, world);
    }

    pub fn rotate_left(&mut self, rot: f64) {
        self.rotate(-rot);
    }

    pub fn rotate_right(&mut self, rot: f64) {
        self.rotate(rot);
    }

    /// Sideways along `(dirY, -dirX)`.
    pub fn strafe_left(&mut self, step: f64, world: &WorldGrid) {
        self.translate(DVec2::new(self.dir.y, -self.dir.x) * step, world);
    }

    /// Sideways along `(-dirY, dirX)`.
    pub fn strafe_right(&mut self, step: f64, world: &WorldGrid) {
        self.translate(DVec2::new(-self.dir.y, self.dir.x) * step, world);
    }

    /// Applies one frame of input in a fixed order: forward, backward,
    /// rotations, then strafes.
    pub fn apply_input(&mut self, input: &Input, world: &WorldGrid, move_step: f64, rot_step: f64) {
        if input.forward {
            self.move_forward(move_step, world);
        }
        if input.backward {
            self.move_backward(move_step, world);
        }
        if input.rotate_left {
            self.rotate_left(rot_step);
        }
        if input.rotate_right {
            self.rotate_right(rot_step);
        }
        if input.strafe_left {
            self.strafe_left(move_step, world);
        }
        if input.strafe_right {
            self.strafe_right(move_step, world);
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(
            DVec2::from(DEFAULT_CAMERA_POSITION),
            DVec2::from(DEFAULT_CAMERA_DIRECTION),
            DVec2::from(DEFAULT_CAMERA_PLANE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-9
    }

    // 5x5 room, (3, 2) solid, (2, 3) open
    fn room() -> WorldGrid {
        WorldGrid::from_rows(vec![
            vec![1, 1, 1, 1, 1],
            vec![1, 0, 0, 0, 1],
            vec![1, 0, 0, 1, 1],
            vec![1, 0, 0, 0, 1],
            vec![1, 1, 1, 1, 1],
        ])
        .unwrap()
    }

    #[test]
    fn rotation_round_trip() {
        let mut cam = Camera::default();
        let original = cam;
        for angle in [0.03, 0.5, 1.7, -2.9] {
            cam.rotate(angle);
            cam.rotate(-angle);
            assert!(close(cam.dir(), original.dir()));
            assert!(close(cam.plane(), original.plane()));
        }
    }

    #[test]
    fn rotation_keeps_basis_perpendicular() {
        let mut cam = Camera::default();
        let fov = cam.fov_degrees();
        for _ in 0..1000 {
            cam.rotate_right(0.03);
        }
        assert!(cam.dir().dot(cam.plane()).abs() < 1e-9);
        assert!((cam.fov_degrees() - fov).abs() < 1e-9);
    }

    #[test]
    fn rotation_matches_matrix_form() {
        let mut cam = Camera::default();
        cam.rotate(std::f64::consts::FRAC_PI_2);
        assert!(close(cam.dir(), DVec2::new(0.0, 1.0)));
        assert!(close(cam.plane(), DVec2::new(-0.8, 0.0)));
    }

    #[test]
    fn default_fov_follows_plane_length() {
        let fov = Camera::default().fov_degrees();
        assert!((fov - 2.0 * 0.8f64.atan().to_degrees()).abs() < 1e-9);
    }

    #[test]
    fn slides_along_wall() {
        let world = room();
        let mut cam = Camera::new(
            DVec2::new(2.9, 2.5),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 0.8),
        );
        cam.translate(DVec2::new(0.2, 0.6), &world);
        // (3, 2) blocks X, (2, 3) lets Y through
        assert_eq!(cam.pos().x, 2.9);
        assert!((cam.pos().y - 3.1).abs() < 1e-12);
    }

    #[test]
    fn blocked_move_is_a_no_op() {
        let world = room();
        let mut cam = Camera::new(
            DVec2::new(1.5, 1.5),
            DVec2::new(-1.0, 0.0),
            DVec2::new(0.0, 0.8),
        );
        let before = cam;
        cam.move_forward(1.0, &world);
        assert_eq!(cam, before);
    }

    #[test]
    fn strafes_translate_without_turning() {
        let world = room();
        let mut cam = Camera::new(
            DVec2::new(2.5, 2.5),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 0.8),
        );
        cam.strafe_left(0.25, &world);
        assert!(close(cam.pos(), DVec2::new(2.5, 2.25)));
        cam.strafe_right(0.5, &world);
        assert!(close(cam.pos(), DVec2::new(2.5, 2.75)));
        assert_eq!(cam.dir(), DVec2::new(1.0, 0.0));
    }

    #[test]
    fn input_rotations_do_not_move() {
        let world = room();
        let mut cam = Camera::new(
            DVec2::new(2.5, 2.5),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 0.8),
        );
        let input = Input {
            rotate_left: true,
            ..Input::default()
        };
        cam.apply_input(&input, &world, 0.05, 0.1);
        assert_eq!(cam.pos(), DVec2::new(2.5, 2.5));
        assert!(cam.dir().y < 0.0);
    }

    #[test]
    fn forward_then_backward_returns() {
        let world = WorldGrid::legacy();
        let mut cam = Camera::default();
        let start = cam.pos();
        let forward = Input {
            forward: true,
            ..Input::default()
        };
        let backward = Input {
            backward: true,
            ..Input::default()
        };
        cam.apply_input(&forward, &world, 0.05, 0.03);
        assert!(cam.pos().x > start.x);
        cam.apply_input(&backward, &world, 0.05, 0.03);
        assert!(close(cam.pos(), start));
    }
}
