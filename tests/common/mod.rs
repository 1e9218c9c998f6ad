//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use cavemarch::config::{FrameParams, ParamStore, Resolution, Settings};
use cavemarch::field::FractalField;
use cavemarch::math::{normalize, v, Ray, V3};
use cavemarch::noise::SeedVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0xcafe)
}

/// Default settings with a different seed.
pub fn settings(seed: i32) -> Settings {
    Settings {
        seed,
        ..Default::default()
    }
}

pub fn frame_for(settings: Settings, width: u32, height: u32) -> FrameParams {
    let store = ParamStore::new(settings).expect("fixture settings are valid");
    store
        .frame(Resolution::new(width, height).unwrap(), 0., 1)
        .expect("fixture time is valid")
}

pub fn field_for(settings: &Settings) -> FractalField {
    FractalField::new(SeedVector::from_seed(settings.seed), settings.field(), 0.)
}

pub fn random_point(rng: &mut StdRng, extent: f64) -> V3 {
    v(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

pub fn random_ray(rng: &mut StdRng) -> Ray {
    let mut d = random_point(rng, 1.);
    while d.x.abs() + d.y.abs() + d.z.abs() < 1e-3 {
        d = random_point(rng, 1.);
    }
    Ray {
        x: random_point(rng, 50.),
        d: normalize(&d),
    }
}
