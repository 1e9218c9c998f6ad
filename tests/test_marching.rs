//! Integration tests: marching the cave field
//!
//! Hit/miss classification on the real field, bracket invariants and the
//! effect of the distance budget.

mod common;

use cavemarch::camera::CameraState;
use cavemarch::field::DensityField;
use cavemarch::marcher::{march, refine_with, MarchParameters, MarchResult, REFINE_ITERATIONS};
use cavemarch::math::{v, O};
use cavemarch::render::{render_pixel, trace};
use common::*;

fn centre_result(seed: i32) -> MarchResult {
    let frame = frame_for(settings(seed), 65, 65);
    let ray = CameraState::new(O, 0., 0.).ray_through(32.5, 32.5, 65, 65);
    trace(&frame, &ray)
}

#[test]
fn default_scene_centre_pixel_is_hit_or_miss_in_range() {
    match centre_result(0) {
        MarchResult::Hit { distance } => assert!(distance > 0. && distance <= 200.),
        MarchResult::Miss { traveled } => assert!(traveled > 0. && traveled <= 200.),
    }
}

#[test]
fn changing_the_seed_changes_the_centre_pixel() {
    let base = centre_result(0);
    let differing = (1..=64).filter(|&seed| centre_result(seed) != base).count();
    assert!(differing > 0, "64 seeds all reproduced {:?}", base);
}

#[test]
fn repeated_renders_are_bit_identical() {
    let frame = frame_for(settings(21), 16, 9);
    let cam = CameraState::new(v(0.2, -0.1, 3.), 0.4, -0.1);
    for (x, y) in [(0, 0), (8, 4), (15, 8)] {
        let a = render_pixel(&frame, &cam, x, y);
        let b = render_pixel(&frame_for(settings(21), 16, 9), &cam, x, y);
        assert_eq!(a.to_array().map(f64::to_bits), b.to_array().map(f64::to_bits));
    }
}

#[test]
fn larger_distance_budget_never_loses_a_hit() {
    let field = field_for(&settings(4));
    let near = MarchParameters {
        step_size: 0.05,
        max_steps: 2000,
        max_distance: 8.,
    };
    let far = MarchParameters {
        max_distance: 60.,
        ..near
    };
    let mut rng = rng();
    let mut hits = 0;
    for _ in 0..200 {
        let ray = random_ray(&mut rng);
        if let MarchResult::Hit { distance } = march(&field, &ray, &near) {
            hits += 1;
            assert_eq!(march(&field, &ray, &far), MarchResult::Hit { distance });
        }
    }
    assert!(hits > 0);
}

#[test]
fn refinement_on_cave_field_keeps_root_bracketed() {
    let field = field_for(&settings(8));
    let step = 0.05;
    let mut rng = rng();
    let mut checked = 0;
    for _ in 0..100 {
        let ray = random_ray(&mut rng);
        let mut prev = field.density(&ray.x);
        for i in 1..2000 {
            let t = i as f64 * step;
            let value = field.density(&ray.at(t));
            if prev * value < 0. {
                let mut brackets = Vec::new();
                let result = refine_with(&field, &ray, t - step, t, |a, b| brackets.push((a, b)));
                assert_eq!(brackets.len(), REFINE_ITERATIONS);
                for &(a, b) in &brackets {
                    assert!(a < b);
                    assert!(field.density(&ray.at(a)) * field.density(&ray.at(b)) < 0.);
                }
                let (a, b) = brackets[REFINE_ITERATIONS - 1];
                assert!(b - a <= step / 16. + 1e-12);
                assert_eq!(result, MarchResult::Hit { distance: 0.5 * (a + b) });
                checked += 1;
                break;
            }
            prev = value;
        }
    }
    assert!(checked > 0);
}
