use crate::config::PlayerConfig;
use crate::ray::heading_vector;
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// The six logical movement inputs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Action {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    RotateLeft,
    RotateRight,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Forward,
        Action::Back,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::RotateLeft,
        Action::RotateRight,
    ];
}

/// Position and heading captured once per frame for rendering.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Pose {
    pub position: Vec3,
    /// radians, counter-clockwise from +X
    pub heading: f32,
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
struct Intent {
    forward: bool,
    back: bool,
    strafe_left: bool,
    strafe_right: bool,
    rotate_left: bool,
    rotate_right: bool,
}

impl Intent {
    fn slot(&mut self, action: Action) -> &mut bool {
        match action {
            Action::Forward => &mut self.forward,
            Action::Back => &mut self.back,
            Action::StrafeLeft => &mut self.strafe_left,
            Action::StrafeRight => &mut self.strafe_right,
            Action::RotateLeft => &mut self.rotate_left,
            Action::RotateRight => &mut self.rotate_right,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Player {
    pos: Vec3,
    heading: f32,
    intent: Intent,
    movement_speed: f32,
    rotation_speed: f32,
}

fn wrap_heading(heading: f32) -> f32 {
    let wrapped = heading.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.
    } else {
        wrapped
    }
}

impl Player {
    pub fn new(position: Vec3, heading: f32, config: &PlayerConfig) -> Self {
        Self {
            pos: position,
            heading: wrap_heading(heading),
            intent: Intent::default(),
            movement_speed: config.movement_speed,
            rotation_speed: config.rotation_speed,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.pos
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.pos = position;
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn set_heading(&mut self, heading: f32) {
        debug_assert!(heading.is_finite(), "heading must be finite");
        if heading.is_finite() {
            self.heading = wrap_heading(heading);
        }
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.pos,
            heading: self.heading,
        }
    }

    /// record a press or release; the last write for an action wins
    pub fn set_flag(&mut self, action: Action, pressed: bool) {
        *self.intent.slot(action) = pressed;
    }

    pub fn is_set(&self, action: Action) -> bool {
        let mut intent = self.intent;
        *intent.slot(action)
    }

    pub fn release_all(&mut self) {
        self.intent = Intent::default();
    }

    /// Integrate the held actions over `dt` seconds.
    ///
    /// Rotation is applied first so translation follows the new heading. Walls are not
    /// consulted.
    pub fn advance(&mut self, dt: f32) {
        if !(dt > 0. && dt.is_finite()) {
            return;
        }

        let rotation = self.rotation_speed * dt;
        let mut heading = self.heading;
        if self.intent.rotate_left {
            heading += rotation;
        }
        if self.intent.rotate_right {
            heading -= rotation;
        }
        self.heading = wrap_heading(heading);

        let forward = heading_vector(self.heading);
        let mut movement = Vec2::ZERO;
        if self.intent.forward {
            movement += forward;
        }
        if self.intent.back {
            movement -= forward;
        }
        if self.intent.strafe_right {
            movement += heading_vector(self.heading - FRAC_PI_2);
        }
        if self.intent.strafe_left {
            movement += heading_vector(self.heading + FRAC_PI_2);
        }

        self.pos += (movement * self.movement_speed * dt).extend(0.);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn player() -> Player {
        Player::new(
            Vec3::new(5., 5., 0.5),
            0.,
            &PlayerConfig {
                movement_speed: 2.,
                rotation_speed: 1.,
            },
        )
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut p = player();
        p.set_heading(1.3);
        for action in Action::ALL {
            p.set_flag(action, true);
        }
        let before = p.clone();
        p.advance(0.);
        assert_eq!(p, before);
    }

    #[test]
    fn forward_moves_along_heading_with_inverted_y() {
        let mut p = player();
        p.set_flag(Action::Forward, true);
        p.advance(0.5);
        assert!(close(p.position(), Vec3::new(6., 5., 0.5)));

        let mut p = player();
        p.set_heading(FRAC_PI_2);
        p.set_flag(Action::Forward, true);
        p.advance(1.);
        // counter-clockwise heading points up the screen, toward smaller y
        assert!(close(p.position(), Vec3::new(5., 3., 0.5)));
    }

    #[test]
    fn strafing_is_perpendicular_to_heading() {
        let mut p = player();
        p.set_flag(Action::StrafeRight, true);
        p.advance(1.);
        assert!(close(p.position(), Vec3::new(5., 7., 0.5)));

        let mut p = player();
        p.set_flag(Action::StrafeLeft, true);
        p.advance(1.);
        assert!(close(p.position(), Vec3::new(5., 3., 0.5)));
    }

    #[test]
    fn opposite_flags_cancel() {
        let mut p = player();
        p.set_flag(Action::Forward, true);
        p.set_flag(Action::Back, true);
        p.set_flag(Action::StrafeLeft, true);
        p.set_flag(Action::StrafeRight, true);
        p.set_flag(Action::RotateLeft, true);
        p.set_flag(Action::RotateRight, true);
        p.advance(0.25);
        assert!(close(p.position(), Vec3::new(5., 5., 0.5)));
        assert!(p.heading().abs() < 1e-6);
    }

    #[test]
    fn diagonal_movement_is_an_unweighted_sum() {
        let mut p = player();
        p.set_flag(Action::Forward, true);
        p.set_flag(Action::StrafeRight, true);
        p.advance(1.);
        assert!(close(p.position(), Vec3::new(7., 7., 0.5)));
    }

    #[test]
    fn rotation_applies_before_translation() {
        let mut p = player();
        p.set_flag(Action::RotateLeft, true);
        p.set_flag(Action::Forward, true);
        p.advance(FRAC_PI_2);
        assert!((p.heading() - FRAC_PI_2).abs() < 1e-5);
        assert!(close(p.position(), Vec3::new(5., 5. - PI, 0.5)));
    }

    #[test]
    fn heading_wraps_into_one_turn() {
        let mut p = player();
        p.set_flag(Action::RotateRight, true);
        p.advance(0.5);
        assert!((p.heading() - (TAU - 0.5)).abs() < 1e-5);

        p.set_heading(3. * TAU + 1.);
        assert!((p.heading() - 1.).abs() < 1e-4);
        p.set_heading(-1e-9);
        assert!(p.heading() >= 0. && p.heading() < TAU);
    }

    #[test]
    fn flags_are_last_write_wins() {
        let mut p = player();
        p.set_flag(Action::Forward, true);
        p.set_flag(Action::Forward, true);
        assert!(p.is_set(Action::Forward));
        p.set_flag(Action::Forward, false);
        assert!(!p.is_set(Action::Forward));

        p.set_flag(Action::Back, true);
        p.release_all();
        assert!(Action::ALL.iter().all(|a| !p.is_set(*a)));
    }
}
