use crate::field::DensityField;
use crate::math::Ray;
use serde::{Deserialize, Serialize};

/// Fixed bisection count after a crossing is bracketed; the final position
/// error is about `step_size / 16`.
pub const REFINE_ITERATIONS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarchParameters {
    pub step_size: f64,
    pub max_steps: u32,
    pub max_distance: f64,
}

impl Default for MarchParameters {
    fn default() -> Self {
        MarchParameters {
            step_size: 0.01,
            max_steps: 1024,
            max_distance: 200.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarchResult {
    Hit { distance: f64 },
    Miss { traveled: f64 },
}

impl MarchResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, MarchResult::Hit { .. })
    }
}

/// Walks the ray in fixed steps until the density changes sign, then
/// narrows the crossing by bisection.
///
/// The field is not a distance bound, so the step cannot adapt to it. A
/// zero sample is not treated as a crossing.
pub fn march(field: &impl DensityField, ray: &Ray, params: &MarchParameters) -> MarchResult {
    let mut prev = field.density(&ray.x);
    let mut prev_t = 0.;
    let mut t = 0.;
    for _ in 0..params.max_steps {
        t = prev_t + params.step_size;
        if t > params.max_distance {
            return MarchResult::Miss {
                traveled: params.max_distance,
            };
        }
        let value = field.density(&ray.at(t));
        if prev * value < 0. {
            return refine(field, ray, prev_t, t);
        }
        prev = value;
        prev_t = t;
    }
    MarchResult::Miss { traveled: t }
}

/// Bisects a bracket `[a, b]` whose endpoints have opposite density signs.
pub fn refine(field: &impl DensityField, ray: &Ray, a: f64, b: f64) -> MarchResult {
    refine_with(field, ray, a, b, |_, _| {})
}

/// Same as [`refine`], reporting the bracket after every iteration.
pub fn refine_with(
    field: &impl DensityField,
    ray: &Ray,
    mut a: f64,
    mut b: f64,
    mut visit: impl FnMut(f64, f64),
) -> MarchResult {
    let mut at_b = field.density(&ray.at(b));
    for _ in 0..REFINE_ITERATIONS {
        let m = 0.5 * (a + b);
        let at_m = field.density(&ray.at(m));
        if at_m * at_b < 0. {
            a = m;
        } else {
            b = m;
            at_b = at_m;
        }
        visit(a, b);
    }
    MarchResult::Hit {
        distance: 0.5 * (a + b),
    }
}
