use crate::math::{cross, normalize, v, Ray, B2, V3};

/// Distance from the eye to the image plane; the plane spans `[-1, 1]`
/// vertically, so this gives a 90 degree vertical field of view.
const FOCAL_LENGTH: f64 = 1.0;

/// Keeps the view from flipping over the poles.
const PITCH_LIMIT: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub position: V3,
    /// Radians around +y; zero looks down +z.
    pub yaw: f64,
    /// Radians above the horizon.
    pub pitch: f64,
}

impl CameraState {
    pub fn new(position: V3, yaw: f64, pitch: f64) -> CameraState {
        CameraState {
            position,
            yaw,
            pitch,
        }
    }

    pub fn forward(&self) -> V3 {
        v(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Level right vector; independent of pitch so it never degenerates.
    pub fn right(&self) -> V3 {
        v(self.yaw.cos(), 0., -self.yaw.sin())
    }

    pub fn up(&self) -> V3 {
        cross(&self.forward(), &self.right())
    }

    /// Primary ray through a continuous pixel position, where `(0, 0)` is the
    /// top-left corner and `(width, height)` the bottom-right.
    pub fn ray_through(&self, px: f64, py: f64, width: u32, height: u32) -> Ray {
        let aspect = width as f64 / height as f64;
        let u = (2. * px / width as f64 - 1.) * aspect;
        let w = 1. - 2. * py / height as f64;
        let d = FOCAL_LENGTH * self.forward() + u * self.right() + w * self.up();
        Ray {
            x: self.position,
            d: normalize(&d),
        }
    }
}

/// One frame's worth of movement input, each axis in `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlyInput {
    pub forward: f64,
    pub strafe: f64,
    pub lift: f64,
    pub turn: f64,
    pub look: f64,
}

/// Free-flight controller that advances a [`CameraState`] between frames.
#[derive(Clone, Copy, Debug)]
pub struct FlyController {
    /// World units per second.
    pub speed: f64,
    /// Radians per second.
    pub turn_rate: f64,
}

impl Default for FlyController {
    fn default() -> Self {
        FlyController {
            speed: 1.0,
            turn_rate: 0.5,
        }
    }
}

impl FlyController {
    pub fn advance(&self, camera: &CameraState, input: &FlyInput, dt: f64) -> CameraState {
        let yaw = camera.yaw + input.turn * self.turn_rate * dt;
        let pitch = (camera.pitch + input.look * self.turn_rate * dt).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let turned = CameraState::new(camera.position, yaw, pitch);

        let step = input.forward * turned.forward() + input.strafe * turned.right() + input.lift * B2;
        CameraState::new(camera.position + (self.speed * dt) * step, yaw, pitch)
    }
}
